//! Neo4j movie repository implementation.
//!
//! Movies are standalone `(:Movie)` nodes keyed by the catalog id.

use async_trait::async_trait;
use kinograph_domain::{MovieBaseInfo, MovieId};
use neo4rs::{query, Graph, Row};

use super::helpers::{id_to_bolt, NodeExt};
use super::query_helpers::{collect_rows, get_first_row, run_query};
use crate::infrastructure::ports::{MovieRepo, RepoError};

/// Repository for Movie operations.
pub struct Neo4jMovieRepo {
    graph: Graph,
}

impl Neo4jMovieRepo {
    pub fn new(graph: Graph) -> Self {
        Self { graph }
    }

    fn row_to_movie(&self, row: Row) -> Result<MovieBaseInfo, RepoError> {
        let node: neo4rs::Node = row.get("m").map_err(|e| RepoError::database("query", e))?;

        Ok(MovieBaseInfo {
            id: MovieId::new(node.get_id_strict("id")?),
            title: node.get_string_or("title", ""),
            year: node.get_optional_u32("year").unwrap_or(0),
            tagline: node.get_string_or("tagline", ""),
            duration: node.get_optional_u32("duration").unwrap_or(0),
            rating: node.get_f64_or("rating", 0.0),
            budget: node.get_u64_or_zero("budget"),
            gross: node.get_u64_or_zero("gross"),
        })
    }
}

#[async_trait]
impl MovieRepo for Neo4jMovieRepo {
    async fn get_by_id(&self, id: MovieId) -> Result<MovieBaseInfo, RepoError> {
        let q = query("MATCH (m:Movie {id: $id}) RETURN m").param("id", id_to_bolt(id.get()));

        get_first_row(&self.graph, q, |row| self.row_to_movie(row))
            .await?
            .ok_or_else(|| RepoError::not_found("Movie", id))
    }

    async fn get_by_title(&self, title: &str) -> Result<MovieBaseInfo, RepoError> {
        let q = query(
            "MATCH (m:Movie {title: $title})
            RETURN m
            ORDER BY m.id
            LIMIT 1",
        )
        .param("title", title);

        get_first_row(&self.graph, q, |row| self.row_to_movie(row))
            .await?
            .ok_or_else(|| RepoError::not_found("Movie", title))
    }

    async fn get_movies(&self, limit: u64, offset: u64) -> Result<Vec<MovieBaseInfo>, RepoError> {
        let q = query(
            "MATCH (m:Movie)
            RETURN m
            ORDER BY m.id
            SKIP $offset
            LIMIT $limit",
        )
        .param("offset", id_to_bolt(offset))
        .param("limit", id_to_bolt(limit));

        collect_rows(&self.graph, q, |row| self.row_to_movie(row)).await
    }

    async fn add(&self, movie: &MovieBaseInfo) -> Result<(), RepoError> {
        let q = query(
            "CREATE (m:Movie {
                id: $id,
                title: $title,
                year: $year,
                tagline: $tagline,
                duration: $duration,
                rating: $rating,
                budget: $budget,
                gross: $gross
            })",
        )
        .param("id", id_to_bolt(movie.id.get()))
        .param("title", movie.title.clone())
        .param("year", i64::from(movie.year))
        .param("tagline", movie.tagline.clone())
        .param("duration", i64::from(movie.duration))
        .param("rating", movie.rating)
        .param("budget", id_to_bolt(movie.budget))
        .param("gross", id_to_bolt(movie.gross));

        run_query(&self.graph, q, "add_movie").await?;

        tracing::debug!(movie_id = %movie.id, "Saved movie: {}", movie.title);
        Ok(())
    }

    async fn delete(&self, id: MovieId) -> Result<(), RepoError> {
        let q = query("MATCH (m:Movie {id: $id}) DETACH DELETE m").param("id", id_to_bolt(id.get()));

        run_query(&self.graph, q, "delete_movie").await
    }
}
