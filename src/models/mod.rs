//! Data models for the movies server

pub mod film;
pub mod person;
pub mod role;

// Re-export commonly used types
pub use film::{Film, FilmDetails, FilmView};
pub use person::Person;
pub use role::{Role, RoleAssociation};
