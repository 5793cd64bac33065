//! Construction-time selection of the storage backend.

use std::sync::Arc;

use neo4rs::{ConfigBuilder, Graph};
use sqlx::postgres::PgPoolOptions;

use crate::infrastructure::config::{DatabaseConfig, StorageBackend};
use crate::infrastructure::in_memory::InMemoryRepositories;
use crate::infrastructure::neo4j::{self, Neo4jRepositories};
use crate::infrastructure::ports::{MovieRepo, PersonRepo, ProfessionRepo, RepoError};
use crate::infrastructure::postgres::{self, PostgresRepositories};

/// The three repositories the movie use cases run against.
#[derive(Clone)]
pub struct StorageRepositories {
    pub movie: Arc<dyn MovieRepo>,
    pub person: Arc<dyn PersonRepo>,
    pub profession: Arc<dyn ProfessionRepo>,
}

impl From<InMemoryRepositories> for StorageRepositories {
    fn from(repos: InMemoryRepositories) -> Self {
        Self {
            movie: repos.movie,
            person: repos.person,
            profession: repos.profession,
        }
    }
}

impl From<PostgresRepositories> for StorageRepositories {
    fn from(repos: PostgresRepositories) -> Self {
        Self {
            movie: repos.movie,
            person: repos.person,
            profession: repos.profession,
        }
    }
}

impl From<Neo4jRepositories> for StorageRepositories {
    fn from(repos: Neo4jRepositories) -> Self {
        Self {
            movie: repos.movie,
            person: repos.person,
            profession: repos.profession,
        }
    }
}

/// Connect to the configured backend and make sure its schema exists.
pub async fn connect(config: &DatabaseConfig) -> Result<StorageRepositories, RepoError> {
    match config.backend {
        StorageBackend::Postgres => {
            tracing::info!(host = %config.host, port = config.port, database = %config.database, "Connecting to Postgres");
            let pool = PgPoolOptions::new()
                .max_connections(10)
                .connect(&config.postgres_url())
                .await
                .map_err(|e| RepoError::database("connect", e))?;
            postgres::ensure_schema(&pool).await?;
            Ok(PostgresRepositories::new(pool).into())
        }
        StorageBackend::Neo4j => {
            tracing::info!(uri = %config.neo4j_uri(), database = %config.database, "Connecting to Neo4j");
            let neo4j_config = ConfigBuilder::default()
                .uri(config.neo4j_uri())
                .user(config.user.as_str())
                .password(config.password.as_str())
                .db(config.database.as_str())
                .build()
                .map_err(|e| RepoError::database("connect", e))?;
            let graph = Graph::connect(neo4j_config)
                .await
                .map_err(|e| RepoError::database("connect", e))?;
            neo4j::ensure_schema(&graph)
                .await
                .map_err(|e| RepoError::database("schema", e))?;
            Ok(Neo4jRepositories::new(graph).into())
        }
        StorageBackend::Memory => {
            tracing::info!("Using in-memory storage; data is lost on exit");
            Ok(InMemoryRepositories::new().into())
        }
    }
}
