//! Application state and composition.

use std::sync::Arc;
use std::time::Duration;

use crate::infrastructure::config::CrawlerConfig;
use crate::infrastructure::ports::{CatalogPort, ThrottlePort};
use crate::infrastructure::storage::StorageRepositories;
use crate::use_cases::crawl::{BoundedRetry, Crawler, FailurePolicy, LogAndSkip};
use crate::use_cases::MovieUseCases;

/// Main application state.
///
/// Passed to HTTP handlers via Axum state.
pub struct App {
    pub use_cases: UseCases,
}

/// Container for all use cases.
pub struct UseCases {
    pub movie: MovieUseCases,
}

impl App {
    pub fn new(repositories: StorageRepositories, usecase_timeout: Duration) -> Self {
        let movie = MovieUseCases::from_repositories(&repositories, usecase_timeout);

        Self {
            use_cases: UseCases { movie },
        }
    }

    /// Build a crawler that stores what it finds through this app's add use case.
    pub fn crawler(
        &self,
        config: &CrawlerConfig,
        catalog: Arc<dyn CatalogPort>,
        throttle: Arc<dyn ThrottlePort>,
    ) -> Crawler {
        let policy: Arc<dyn FailurePolicy> = if config.max_attempts > 1 {
            Arc::new(BoundedRetry::new(config.max_attempts))
        } else {
            Arc::new(LogAndSkip)
        };

        Crawler::new(
            catalog,
            self.use_cases.movie.add.clone(),
            throttle,
            policy,
            config.start_id,
        )
        .with_max_movies(config.max_movies)
    }
}
