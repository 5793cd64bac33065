//! Neo4j database implementations.

use neo4rs::Graph;
use std::sync::Arc;

mod helpers;
mod query_helpers;
mod schema;

mod movie_repo;
mod person_repo;
mod profession_repo;

#[cfg(test)]
mod integration_tests;

pub use movie_repo::Neo4jMovieRepo;
pub use person_repo::Neo4jPersonRepo;
pub use profession_repo::Neo4jProfessionRepo;
pub use schema::ensure_schema;

/// Create all Neo4j repositories from a graph connection.
pub struct Neo4jRepositories {
    pub movie: Arc<Neo4jMovieRepo>,
    pub person: Arc<Neo4jPersonRepo>,
    pub profession: Arc<Neo4jProfessionRepo>,
}

impl Neo4jRepositories {
    pub fn new(graph: Graph) -> Self {
        Self {
            movie: Arc::new(Neo4jMovieRepo::new(graph.clone())),
            person: Arc::new(Neo4jPersonRepo::new(graph.clone())),
            profession: Arc::new(Neo4jProfessionRepo::new(graph)),
        }
    }
}
