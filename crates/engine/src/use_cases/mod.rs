//! Use cases: movie persistence and the catalog crawl.

pub mod crawl;
pub mod movie;

pub use crawl::{CrawlError, Crawler};
pub use movie::{MovieError, MovieUseCases};
