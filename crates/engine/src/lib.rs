//! Kinograph Engine library.
//!
//! ## Structure
//!
//! - `infrastructure/` - Ports, storage adapters, catalog client and configuration
//! - `use_cases/` - Movie persistence and the catalog crawl
//! - `api/` - HTTP entry points
//! - `app` - Application composition

pub mod api;
pub mod app;
pub mod infrastructure;
pub mod use_cases;

pub use app::App;
