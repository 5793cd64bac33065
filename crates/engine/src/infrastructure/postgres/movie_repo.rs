//! Postgres movie repository implementation.

use async_trait::async_trait;
use kinograph_domain::{MovieBaseInfo, MovieId};
use sqlx::postgres::PgRow;
use sqlx::PgPool;

use super::{column, from_db, map_sqlx_error, to_db};
use crate::infrastructure::ports::{MovieRepo, RepoError};

const MOVIE_COLUMNS: &str = "id, title, movie_year, tagline, duration, rating, budget, gross";

/// Postgres implementation for movie base info.
pub struct PostgresMovieRepo {
    pool: PgPool,
}

impl PostgresMovieRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn row_to_movie(row: &PgRow) -> Result<MovieBaseInfo, RepoError> {
        let year: i32 = column(row, "movie_year")?;
        let duration: i32 = column(row, "duration")?;

        Ok(MovieBaseInfo {
            id: MovieId::new(from_db("id", column(row, "id")?)?),
            title: column(row, "title")?,
            year: u32::try_from(year).unwrap_or(0),
            tagline: column(row, "tagline")?,
            duration: u32::try_from(duration).unwrap_or(0),
            rating: column(row, "rating")?,
            budget: from_db("budget", column(row, "budget")?)?,
            gross: from_db("gross", column(row, "gross")?)?,
        })
    }
}

#[async_trait]
impl MovieRepo for PostgresMovieRepo {
    async fn get_by_id(&self, id: MovieId) -> Result<MovieBaseInfo, RepoError> {
        let row = sqlx::query(&format!("SELECT {MOVIE_COLUMNS} FROM movie WHERE id = $1"))
            .bind(to_db(id.get()))
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| RepoError::database("get_movie", e))?;

        match row {
            Some(row) => Self::row_to_movie(&row),
            None => Err(RepoError::not_found("Movie", id)),
        }
    }

    async fn get_by_title(&self, title: &str) -> Result<MovieBaseInfo, RepoError> {
        let row = sqlx::query(&format!(
            "SELECT {MOVIE_COLUMNS} FROM movie WHERE title = $1 ORDER BY id LIMIT 1"
        ))
        .bind(title)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepoError::database("get_movie_by_title", e))?;

        match row {
            Some(row) => Self::row_to_movie(&row),
            None => Err(RepoError::not_found("Movie", title)),
        }
    }

    async fn get_movies(&self, limit: u64, offset: u64) -> Result<Vec<MovieBaseInfo>, RepoError> {
        let rows = sqlx::query(&format!(
            "SELECT {MOVIE_COLUMNS} FROM movie ORDER BY id LIMIT $1 OFFSET $2"
        ))
        .bind(to_db(limit))
        .bind(to_db(offset))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepoError::database("get_movies", e))?;

        rows.iter().map(Self::row_to_movie).collect()
    }

    async fn add(&self, movie: &MovieBaseInfo) -> Result<(), RepoError> {
        sqlx::query(
            r#"
            INSERT INTO movie (id, title, movie_year, tagline, duration, rating, budget, gross)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(to_db(movie.id.get()))
        .bind(&movie.title)
        .bind(i32::try_from(movie.year).unwrap_or(i32::MAX))
        .bind(&movie.tagline)
        .bind(i32::try_from(movie.duration).unwrap_or(i32::MAX))
        .bind(movie.rating)
        .bind(to_db(movie.budget))
        .bind(to_db(movie.gross))
        .execute(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("add_movie", e))?;

        tracing::debug!(movie_id = %movie.id, "Saved movie: {}", movie.title);
        Ok(())
    }

    async fn delete(&self, id: MovieId) -> Result<(), RepoError> {
        sqlx::query("DELETE FROM movie WHERE id = $1")
            .bind(to_db(id.get()))
            .execute(&self.pool)
            .await
            .map_err(|e| RepoError::database("delete_movie", e))?;
        Ok(())
    }
}
