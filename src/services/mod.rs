//! Business logic services

pub mod films;

use std::sync::Arc;

use crate::{error::AppResult, repository::Repository};

pub use films::{FilmCatalog, FilmService};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub films: Arc<dyn FilmCatalog>,
    repository: Repository,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository) -> Self {
        Self {
            films: Arc::new(FilmService::new(repository.clone())),
            repository,
        }
    }

    /// Use another film catalog implementation (test doubles)
    pub fn with_catalog(repository: Repository, films: Arc<dyn FilmCatalog>) -> Self {
        Self { films, repository }
    }

    /// Check database connectivity
    pub async fn ping(&self) -> AppResult<()> {
        self.repository.ping().await
    }
}
