//! Port traits for infrastructure boundaries.
//!
//! These are the ONLY abstractions in the engine. Everything else is concrete types.
//! Ports exist for:
//! - Database access (Postgres, Neo4j or in-memory, chosen at startup)
//! - The remote catalog API
//! - Request throttling (for testing)

mod error;
mod external;
mod repos;
pub mod types;

// =============================================================================
// Repository Ports
// =============================================================================
pub use repos::{MovieRepo, PersonRepo, ProfessionRepo};

// =============================================================================
// External Service Ports
// =============================================================================
pub use external::{CatalogPort, ThrottlePort};
pub use types::{CatalogCredit, CatalogMovie, CatalogPerson};

// =============================================================================
// Test-Only Mocks (only available during test builds)
// =============================================================================
#[cfg(test)]
pub use repos::{MockMovieRepo, MockPersonRepo, MockProfessionRepo};

#[cfg(test)]
pub use external::{MockCatalogPort, MockThrottlePort};

// =============================================================================
// Error Types
// =============================================================================
pub use error::{CatalogError, ErrorKind, RepoError};
