//! Crawl use case: walks the remote catalog and feeds the movie store.
//!
//! A cursor probes movie ids one by one; every person seen on a movie is
//! queued on the frontier and later expanded into their filmography.

use kinograph_domain::{MovieId, PersonId};

use crate::infrastructure::ports::{CatalogError, ErrorKind};
use crate::use_cases::movie::MovieError;

mod crawler;
mod frontier;
mod policy;

pub use crawler::{decompose, Crawler};
pub use frontier::Frontier;
pub use policy::{BoundedRetry, FailureDecision, FailurePolicy, LogAndSkip};

#[derive(Debug, thiserror::Error)]
pub enum CrawlError {
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),
    #[error("Movie error: {0}")]
    Movie(#[from] MovieError),
}

impl CrawlError {
    /// Worth another attempt: connectivity problems and throttling statuses.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Catalog(CatalogError::Status(status)) => *status == 429 || *status >= 500,
            Self::Catalog(e) => e.kind() == ErrorKind::TransientIo,
            Self::Movie(MovieError::Timeout(_)) => true,
            Self::Movie(MovieError::Repo(e)) => e.kind() == ErrorKind::TransientIo,
            Self::Movie(_) => false,
        }
    }
}

/// The unit of work a failure belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrawlItem {
    Movie(MovieId),
    Person(PersonId),
}

impl std::fmt::Display for CrawlItem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Movie(id) => write!(f, "movie {id}"),
            Self::Person(id) => write!(f, "person {id}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::ports::RepoError;
    use std::time::Duration;

    #[test]
    fn transient_errors_are_classified() {
        assert!(CrawlError::from(CatalogError::Request("reset".into())).is_transient());
        assert!(CrawlError::from(CatalogError::Status(503)).is_transient());
        assert!(CrawlError::from(CatalogError::Status(429)).is_transient());
        assert!(!CrawlError::from(CatalogError::Status(404)).is_transient());
        assert!(!CrawlError::from(CatalogError::Decode("eof".into())).is_transient());
        assert!(CrawlError::from(MovieError::Timeout(Duration::from_secs(5))).is_transient());
        assert!(!CrawlError::from(MovieError::Repo(RepoError::constraint("dup"))).is_transient());
    }
}
