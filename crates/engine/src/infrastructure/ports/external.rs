//! External service port traits.

use async_trait::async_trait;
use kinograph_domain::{MovieId, PersonId};

use super::error::CatalogError;
use super::types::{CatalogMovie, CatalogPerson};

// =============================================================================
// Remote Catalog Port
// =============================================================================

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogPort: Send + Sync {
    async fn fetch_movie(&self, id: MovieId) -> Result<CatalogMovie, CatalogError>;
    async fn fetch_person(&self, id: PersonId) -> Result<CatalogPerson, CatalogError>;
}

// =============================================================================
// Throttle Port
// =============================================================================

/// Awaited before every outbound catalog fetch.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ThrottlePort: Send + Sync {
    async fn wait(&self);
}
