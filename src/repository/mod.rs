//! Repository layer for database operations
//!
//! Store methods take any Postgres executor, so the same query runs on the
//! pool for single reads or on a transaction for the aggregate writes.

pub mod film_roles;
pub mod films;
pub mod persons;

use sqlx::{Pool, Postgres, Transaction};

use crate::error::AppResult;

/// Main repository struct holding database connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
    pub persons: persons::PersonsRepository,
    pub films: films::FilmsRepository,
    pub film_roles: film_roles::FilmRolesRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            persons: persons::PersonsRepository,
            films: films::FilmsRepository,
            film_roles: film_roles::FilmRolesRepository,
            pool,
        }
    }

    /// Start a transaction. Dropping it without `commit` rolls everything back.
    pub async fn begin(&self) -> AppResult<Transaction<'static, Postgres>> {
        Ok(self.pool.begin().await?)
    }

    /// Round-trip to the database (readiness probe)
    pub async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
