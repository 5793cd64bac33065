//! Infrastructure: port traits and their adapters.

pub mod catalog;
pub mod config;
pub mod in_memory;
pub mod neo4j;
pub mod ports;
pub mod postgres;
pub mod storage;
pub mod throttle;
