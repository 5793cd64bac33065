//! HTTP routes.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use kinograph_domain::{Movie, MovieId};
use serde::Deserialize;
use std::sync::Arc;

use crate::app::App;
use crate::use_cases::MovieError;

const DEFAULT_PAGE_LIMIT: u64 = 10;

/// Create all HTTP routes.
pub fn routes() -> Router<Arc<App>> {
    Router::new()
        .route("/", get(health))
        .route("/api/health", get(health))
        .route("/add", post(add_movie))
        .route("/movies", get(list_movies))
        .route("/movies/{title}", get(get_movie_by_title))
        .route(
            "/movies/id/{id}",
            get(get_movie_by_id).delete(delete_movie),
        )
}

async fn health() -> &'static str {
    "OK"
}

async fn add_movie(
    State(app): State<Arc<App>>,
    Json(movie): Json<Movie>,
) -> Result<StatusCode, ApiError> {
    app.use_cases.movie.add.execute(movie).await?;
    Ok(StatusCode::OK)
}

#[derive(Debug, Deserialize)]
struct Pagination {
    limit: Option<u64>,
    offset: Option<u64>,
}

async fn list_movies(
    State(app): State<Arc<App>>,
    Query(page): Query<Pagination>,
) -> Result<Json<Vec<Movie>>, ApiError> {
    let movies = app
        .use_cases
        .movie
        .list
        .execute(
            page.limit.unwrap_or(DEFAULT_PAGE_LIMIT),
            page.offset.unwrap_or(0),
        )
        .await?;
    Ok(Json(movies))
}

async fn get_movie_by_title(
    State(app): State<Arc<App>>,
    Path(title): Path<String>,
) -> Result<Json<Movie>, ApiError> {
    let movie = app.use_cases.movie.get.by_title(&title).await?;
    Ok(Json(movie))
}

async fn get_movie_by_id(
    State(app): State<Arc<App>>,
    Path(id): Path<MovieId>,
) -> Result<Json<Movie>, ApiError> {
    let movie = app.use_cases.movie.get.by_id(id).await?;
    Ok(Json(movie))
}

async fn delete_movie(
    State(app): State<Arc<App>>,
    Path(id): Path<MovieId>,
) -> Result<StatusCode, ApiError> {
    app.use_cases.movie.delete.execute(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Debug)]
pub enum ApiError {
    NotFound,
    Internal(String),
}

impl axum::response::IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        match self {
            ApiError::NotFound => (StatusCode::NOT_FOUND, "Not found").into_response(),
            ApiError::Internal(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal error").into_response()
            }
        }
    }
}

impl From<MovieError> for ApiError {
    fn from(e: MovieError) -> Self {
        match e {
            MovieError::NotFound => ApiError::NotFound,
            other => {
                tracing::error!(error = %other, "Request failed");
                ApiError::Internal(other.to_string())
            }
        }
    }
}
