//! Movie use cases: persist a decomposed movie and assemble it back.
//!
//! Every public operation runs under the configured deadline and fails
//! with `MovieError::Timeout` instead of hanging.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use kinograph_domain::{MovieId, PersonId};

use crate::infrastructure::ports::RepoError;
use crate::infrastructure::storage::StorageRepositories;

mod add;
mod assemble;
mod delete;
mod get;
mod list;

pub use add::AddMovie;
pub use assemble::MovieAssembler;
pub use delete::DeleteMovie;
pub use get::GetMovie;
pub use list::ListMovies;

/// Shared error type for movie use cases.
#[derive(Debug, thiserror::Error)]
pub enum MovieError {
    #[error("Movie not found")]
    NotFound,
    #[error("Movie {movie_id} credits person {person_id}, which is not stored")]
    MissingPerson {
        movie_id: MovieId,
        person_id: PersonId,
    },
    #[error("Operation did not finish within {0:?}")]
    Timeout(Duration),
    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),
}

impl MovieError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound)
    }
}

/// Base-info lookups report absence as `MovieError::NotFound`.
pub(crate) fn movie_lookup_error(error: RepoError) -> MovieError {
    if error.is_not_found() {
        MovieError::NotFound
    } else {
        MovieError::Repo(error)
    }
}

pub(crate) async fn with_deadline<T, F>(deadline: Duration, operation: F) -> Result<T, MovieError>
where
    F: Future<Output = Result<T, MovieError>>,
{
    match tokio::time::timeout(deadline, operation).await {
        Ok(result) => result,
        Err(_) => {
            tracing::warn!(timeout_ms = deadline.as_millis() as u64, "Movie operation timed out");
            Err(MovieError::Timeout(deadline))
        }
    }
}

/// Container for movie use cases.
pub struct MovieUseCases {
    pub add: Arc<AddMovie>,
    pub get: Arc<GetMovie>,
    pub list: Arc<ListMovies>,
    pub delete: Arc<DeleteMovie>,
}

impl MovieUseCases {
    pub fn new(add: Arc<AddMovie>, get: Arc<GetMovie>, list: Arc<ListMovies>, delete: Arc<DeleteMovie>) -> Self {
        Self {
            add,
            get,
            list,
            delete,
        }
    }

    /// Wire every movie use case against one set of repositories.
    pub fn from_repositories(repos: &StorageRepositories, timeout: Duration) -> Self {
        let assembler = Arc::new(MovieAssembler::new(
            repos.person.clone(),
            repos.profession.clone(),
        ));

        Self::new(
            Arc::new(AddMovie::new(
                repos.movie.clone(),
                repos.person.clone(),
                repos.profession.clone(),
                timeout,
            )),
            Arc::new(GetMovie::new(repos.movie.clone(), assembler.clone(), timeout)),
            Arc::new(ListMovies::new(repos.movie.clone(), assembler, timeout)),
            Arc::new(DeleteMovie::new(
                repos.movie.clone(),
                repos.profession.clone(),
                timeout,
            )),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::in_memory::InMemoryRepositories;
    use kinograph_domain::{Movie, MovieBaseInfo, Person};

    fn matrix() -> Movie {
        let mut movie = Movie::new(
            MovieBaseInfo::new(MovieId::new(1000), "The Matrix")
                .with_year(1999)
                .with_tagline("Welcome to the Real World")
                .with_duration(136)
                .with_rating(8.7)
                .with_budget(63_000_000)
                .with_gross(467_222_728),
        );
        movie.directors.push(Person::new(PersonId::new(1), "Lana Wachowski"));
        movie.producers.push(Person::new(PersonId::new(2), "Joel Silver"));
        movie.writers.push(Person::new(PersonId::new(1), "Lana Wachowski"));
        movie.actors.push(Person::new(PersonId::new(3), "Keanu Reeves"));
        movie
    }

    #[tokio::test]
    async fn add_then_read_back_through_every_path() {
        let repos: StorageRepositories = InMemoryRepositories::new().into();
        let use_cases = MovieUseCases::from_repositories(&repos, Duration::from_secs(5));

        let movie = matrix();
        use_cases.add.execute(movie.clone()).await.expect("add movie");

        let by_id = use_cases.get.by_id(MovieId::new(1000)).await.expect("by id");
        assert_eq!(by_id, movie);

        let by_title = use_cases.get.by_title("The Matrix").await.expect("by title");
        assert_eq!(by_title, movie);

        let page = use_cases.list.execute(10, 0).await.expect("list");
        assert_eq!(page, vec![movie]);

        use_cases.delete.execute(MovieId::new(1000)).await.expect("delete");
        assert!(use_cases
            .get
            .by_id(MovieId::new(1000))
            .await
            .expect_err("deleted")
            .is_not_found());
        assert!(use_cases.list.execute(10, 0).await.expect("list").is_empty());
    }
}
