//! Postgres database implementations.
//!
//! Tables:
//! - `movie(id, title, movie_year, tagline, duration, rating, budget, gross)`
//! - `person(id, full_name, age, height)`
//! - `professions(id, movie_id, person_id, movie_role)`

use sqlx::PgPool;
use std::sync::Arc;

use crate::infrastructure::ports::RepoError;

mod movie_repo;
mod person_repo;
mod profession_repo;


pub use movie_repo::PostgresMovieRepo;
pub use person_repo::PostgresPersonRepo;
pub use profession_repo::PostgresProfessionRepo;

/// Create all Postgres repositories from a connection pool.
pub struct PostgresRepositories {
    pub movie: Arc<PostgresMovieRepo>,
    pub person: Arc<PostgresPersonRepo>,
    pub profession: Arc<PostgresProfessionRepo>,
}

impl PostgresRepositories {
    pub fn new(pool: PgPool) -> Self {
        Self {
            movie: Arc::new(PostgresMovieRepo::new(pool.clone())),
            person: Arc::new(PostgresPersonRepo::new(pool.clone())),
            profession: Arc::new(PostgresProfessionRepo::new(pool)),
        }
    }
}

/// Create the three tables if they do not exist yet.
pub async fn ensure_schema(pool: &PgPool) -> Result<(), RepoError> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS movie (
            id BIGINT PRIMARY KEY,
            title TEXT NOT NULL,
            movie_year INTEGER NOT NULL DEFAULT 0,
            tagline TEXT NOT NULL DEFAULT '',
            duration INTEGER NOT NULL DEFAULT 0,
            rating DOUBLE PRECISION NOT NULL DEFAULT 0,
            budget BIGINT NOT NULL DEFAULT 0,
            gross BIGINT NOT NULL DEFAULT 0
        )
        "#,
    )
    .execute(pool)
    .await
    .map_err(|e| RepoError::database("schema", e))?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS person (
            id BIGINT PRIMARY KEY,
            full_name TEXT NOT NULL,
            age INTEGER,
            height INTEGER
        )
        "#,
    )
    .execute(pool)
    .await
    .map_err(|e| RepoError::database("schema", e))?;

    sqlx::query("CREATE INDEX IF NOT EXISTS person_full_name_idx ON person (full_name)")
        .execute(pool)
        .await
        .map_err(|e| RepoError::database("schema", e))?;

    sqlx::query("CREATE INDEX IF NOT EXISTS movie_title_idx ON movie (title)")
        .execute(pool)
        .await
        .map_err(|e| RepoError::database("schema", e))?;

    // No foreign keys: base info is deleted before its role-edges.
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS professions (
            id BIGSERIAL PRIMARY KEY,
            movie_id BIGINT NOT NULL,
            person_id BIGINT NOT NULL,
            movie_role SMALLINT NOT NULL,
            UNIQUE (movie_id, person_id, movie_role)
        )
        "#,
    )
    .execute(pool)
    .await
    .map_err(|e| RepoError::database("schema", e))?;

    tracing::info!("Postgres schema initialized");
    Ok(())
}

/// Map a failed statement, surfacing unique violations as `ConstraintViolation`.
fn map_sqlx_error(operation: &'static str, error: sqlx::Error) -> RepoError {
    match &error {
        sqlx::Error::Database(db) if db.is_unique_violation() => RepoError::constraint(db.message()),
        _ => RepoError::database(operation, error),
    }
}

fn to_db(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

fn from_db(column: &str, value: i64) -> Result<u64, RepoError> {
    u64::try_from(value)
        .map_err(|_| RepoError::serialization(format!("negative value {value} in {column}")))
}

fn column<'r, T>(row: &'r sqlx::postgres::PgRow, name: &str) -> Result<T, RepoError>
where
    T: sqlx::Decode<'r, sqlx::Postgres> + sqlx::Type<sqlx::Postgres>,
{
    use sqlx::Row;

    row.try_get(name)
        .map_err(|e| RepoError::serialization(format!("column {name}: {e}")))
}
