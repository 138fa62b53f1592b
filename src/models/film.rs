//! Film model and the assembled film view

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::person::Person;

/// Film record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Film {
    pub id: i32,
    pub name: String,
    pub year: u16,
    pub genre: String,
}

/// Mutable film fields (create input, update request)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate, ToSchema)]
pub struct FilmDetails {
    #[validate(length(min = 1, message = "film name cannot be empty"))]
    pub name: String,
    /// Release year
    #[serde(alias = "release_year")]
    pub year: u16,
    #[serde(default)]
    pub genre: String,
}

/// A film together with its director and cast
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate, ToSchema)]
pub struct FilmView {
    /// Film ID (present in responses, ignored on input)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i32>,
    #[validate(length(min = 1, message = "film name cannot be empty"))]
    pub name: String,
    /// Release year
    #[serde(alias = "release_year")]
    pub year: u16,
    #[serde(default)]
    pub genre: String,
    #[validate(nested)]
    pub director: Person,
    /// Cast members in billing order
    #[serde(default)]
    pub cast: Vec<Person>,
}

impl FilmView {
    pub fn assemble(film: Film, director: Person, cast: Vec<Person>) -> Self {
        Self {
            id: Some(film.id),
            name: film.name,
            year: film.year,
            genre: film.genre,
            director,
            cast,
        }
    }

    pub fn details(&self) -> FilmDetails {
        FilmDetails {
            name: self.name.clone(),
            year: self.year,
            genre: self.genre.clone(),
        }
    }
}
