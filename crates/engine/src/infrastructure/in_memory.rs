//! In-memory repository implementations.
//!
//! Ordered maps keep pagination deterministic (ascending id). Used for local
//! runs without a database and as the reference backend in tests.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use kinograph_domain::{
    MovieBaseInfo, MovieId, Person, PersonId, Profession, ProfessionId, Role,
};
use tokio::sync::RwLock;

use crate::infrastructure::ports::{MovieRepo, PersonRepo, ProfessionRepo, RepoError};

fn page<T: Clone>(items: impl Iterator<Item = T>, limit: u64, offset: u64) -> Vec<T> {
    let offset = usize::try_from(offset).unwrap_or(usize::MAX);
    let limit = usize::try_from(limit).unwrap_or(usize::MAX);
    items.skip(offset).take(limit).collect()
}

/// All three in-memory repositories.
pub struct InMemoryRepositories {
    pub movie: Arc<InMemoryMovieRepo>,
    pub person: Arc<InMemoryPersonRepo>,
    pub profession: Arc<InMemoryProfessionRepo>,
}

impl InMemoryRepositories {
    pub fn new() -> Self {
        Self {
            movie: Arc::new(InMemoryMovieRepo::new()),
            person: Arc::new(InMemoryPersonRepo::new()),
            profession: Arc::new(InMemoryProfessionRepo::new()),
        }
    }
}

impl Default for InMemoryRepositories {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Movies
// =============================================================================

pub struct InMemoryMovieRepo {
    movies: RwLock<BTreeMap<MovieId, MovieBaseInfo>>,
}

impl InMemoryMovieRepo {
    pub fn new() -> Self {
        Self {
            movies: RwLock::new(BTreeMap::new()),
        }
    }

    pub async fn len(&self) -> usize {
        self.movies.read().await.len()
    }
}

impl Default for InMemoryMovieRepo {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MovieRepo for InMemoryMovieRepo {
    async fn get_by_id(&self, id: MovieId) -> Result<MovieBaseInfo, RepoError> {
        self.movies
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(|| RepoError::not_found("Movie", id))
    }

    async fn get_by_title(&self, title: &str) -> Result<MovieBaseInfo, RepoError> {
        self.movies
            .read()
            .await
            .values()
            .find(|m| m.title == title)
            .cloned()
            .ok_or_else(|| RepoError::not_found("Movie", title))
    }

    async fn get_movies(&self, limit: u64, offset: u64) -> Result<Vec<MovieBaseInfo>, RepoError> {
        let movies = self.movies.read().await;
        Ok(page(movies.values().cloned(), limit, offset))
    }

    async fn add(&self, movie: &MovieBaseInfo) -> Result<(), RepoError> {
        let mut movies = self.movies.write().await;
        if movies.contains_key(&movie.id) {
            return Err(RepoError::constraint(format!(
                "movie {} already exists",
                movie.id
            )));
        }
        movies.insert(movie.id, movie.clone());
        Ok(())
    }

    async fn delete(&self, id: MovieId) -> Result<(), RepoError> {
        self.movies.write().await.remove(&id);
        Ok(())
    }
}

// =============================================================================
// Persons
// =============================================================================

pub struct InMemoryPersonRepo {
    persons: RwLock<BTreeMap<PersonId, Person>>,
}

impl InMemoryPersonRepo {
    pub fn new() -> Self {
        Self {
            persons: RwLock::new(BTreeMap::new()),
        }
    }

    pub async fn len(&self) -> usize {
        self.persons.read().await.len()
    }
}

impl Default for InMemoryPersonRepo {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PersonRepo for InMemoryPersonRepo {
    async fn get_by_id(&self, id: PersonId) -> Result<Person, RepoError> {
        self.persons
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(|| RepoError::not_found("Person", id))
    }

    async fn get_by_full_name(&self, full_name: &str) -> Result<Person, RepoError> {
        self.persons
            .read()
            .await
            .values()
            .find(|p| p.full_name == full_name)
            .cloned()
            .ok_or_else(|| RepoError::not_found("Person", full_name))
    }

    async fn get_persons(&self, limit: u64, offset: u64) -> Result<Vec<Person>, RepoError> {
        let persons = self.persons.read().await;
        Ok(page(persons.values().cloned(), limit, offset))
    }

    async fn add(&self, person: &Person) -> Result<(), RepoError> {
        let mut persons = self.persons.write().await;
        if persons.contains_key(&person.id) {
            return Err(RepoError::constraint(format!(
                "person {} already exists",
                person.id
            )));
        }
        persons.insert(person.id, person.clone());
        Ok(())
    }

    async fn delete(&self, id: PersonId) -> Result<(), RepoError> {
        self.persons.write().await.remove(&id);
        Ok(())
    }
}

// =============================================================================
// Role-edges
// =============================================================================

struct ProfessionTable {
    next_id: u64,
    rows: Vec<Profession>,
}

pub struct InMemoryProfessionRepo {
    table: RwLock<ProfessionTable>,
}

impl InMemoryProfessionRepo {
    pub fn new() -> Self {
        Self {
            table: RwLock::new(ProfessionTable {
                next_id: 1,
                rows: Vec::new(),
            }),
        }
    }

    pub async fn len(&self) -> usize {
        self.table.read().await.rows.len()
    }
}

impl Default for InMemoryProfessionRepo {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProfessionRepo for InMemoryProfessionRepo {
    async fn get_id_by_params(
        &self,
        movie_id: MovieId,
        person_id: PersonId,
        role: Role,
    ) -> Result<ProfessionId, RepoError> {
        self.table
            .read()
            .await
            .rows
            .iter()
            .find(|p| p.movie_id == movie_id && p.person_id == person_id && p.role == role)
            .map(|p| p.id)
            .ok_or_else(|| {
                RepoError::not_found("Profession", format!("{movie_id}/{person_id}/{role}"))
            })
    }

    async fn get_by_id(&self, id: ProfessionId) -> Result<Profession, RepoError> {
        self.table
            .read()
            .await
            .rows
            .iter()
            .find(|p| p.id == id)
            .copied()
            .ok_or_else(|| RepoError::not_found("Profession", id))
    }

    async fn get_by_movie(
        &self,
        movie_id: MovieId,
        role: Role,
    ) -> Result<Vec<Profession>, RepoError> {
        Ok(self
            .table
            .read()
            .await
            .rows
            .iter()
            .filter(|p| p.movie_id == movie_id && p.role == role)
            .copied()
            .collect())
    }

    async fn add(&self, movie_id: MovieId, person_id: PersonId, role: Role) -> Result<(), RepoError> {
        let mut table = self.table.write().await;
        let duplicate = table
            .rows
            .iter()
            .any(|p| p.movie_id == movie_id && p.person_id == person_id && p.role == role);
        if duplicate {
            return Err(RepoError::constraint(format!(
                "{role} credit for person {person_id} on movie {movie_id} already exists"
            )));
        }

        let id = ProfessionId::new(table.next_id);
        table.next_id += 1;
        table.rows.push(Profession::new(id, movie_id, person_id, role));
        Ok(())
    }

    async fn delete(&self, id: ProfessionId) -> Result<(), RepoError> {
        self.table.write().await.rows.retain(|p| p.id != id);
        Ok(())
    }
}
