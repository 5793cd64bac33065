//! Repository port traits for database access.
//!
//! Every read-by-key operation reports an absent entity as
//! `RepoError::NotFound` so callers can tell "absent" from "failed".
//! `add` is not idempotent on any backend.

use async_trait::async_trait;
use kinograph_domain::{
    MovieBaseInfo, MovieId, Person, PersonId, Profession, ProfessionId, Role,
};

use super::error::RepoError;

// =============================================================================
// Database Ports (one per entity type)
// =============================================================================

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MovieRepo: Send + Sync {
    async fn get_by_id(&self, id: MovieId) -> Result<MovieBaseInfo, RepoError>;
    async fn get_by_title(&self, title: &str) -> Result<MovieBaseInfo, RepoError>;
    /// At most `limit` movies starting at `offset`; empty when the window is past the end.
    async fn get_movies(&self, limit: u64, offset: u64) -> Result<Vec<MovieBaseInfo>, RepoError>;
    async fn add(&self, movie: &MovieBaseInfo) -> Result<(), RepoError>;
    async fn delete(&self, id: MovieId) -> Result<(), RepoError>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PersonRepo: Send + Sync {
    async fn get_by_id(&self, id: PersonId) -> Result<Person, RepoError>;
    /// Dedup lookup - full name is the natural key.
    async fn get_by_full_name(&self, full_name: &str) -> Result<Person, RepoError>;
    async fn get_persons(&self, limit: u64, offset: u64) -> Result<Vec<Person>, RepoError>;
    async fn add(&self, person: &Person) -> Result<(), RepoError>;
    async fn delete(&self, id: PersonId) -> Result<(), RepoError>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProfessionRepo: Send + Sync {
    async fn get_id_by_params(
        &self,
        movie_id: MovieId,
        person_id: PersonId,
        role: Role,
    ) -> Result<ProfessionId, RepoError>;
    async fn get_by_id(&self, id: ProfessionId) -> Result<Profession, RepoError>;

    /// Role-edges of one role for a movie, in insertion order.
    async fn get_by_movie(
        &self,
        movie_id: MovieId,
        role: Role,
    ) -> Result<Vec<Profession>, RepoError>;

    async fn get_directors_by_movie(&self, movie_id: MovieId) -> Result<Vec<Profession>, RepoError> {
        self.get_by_movie(movie_id, Role::Director).await
    }

    async fn get_producers_by_movie(&self, movie_id: MovieId) -> Result<Vec<Profession>, RepoError> {
        self.get_by_movie(movie_id, Role::Producer).await
    }

    async fn get_writers_by_movie(&self, movie_id: MovieId) -> Result<Vec<Profession>, RepoError> {
        self.get_by_movie(movie_id, Role::Writer).await
    }

    async fn get_actors_by_movie(&self, movie_id: MovieId) -> Result<Vec<Profession>, RepoError> {
        self.get_by_movie(movie_id, Role::Actor).await
    }

    async fn add(&self, movie_id: MovieId, person_id: PersonId, role: Role) -> Result<(), RepoError>;
    async fn delete(&self, id: ProfessionId) -> Result<(), RepoError>;
}
