//! List movies use case - one page of fully assembled movies.

use std::sync::Arc;
use std::time::Duration;

use kinograph_domain::Movie;

use super::{with_deadline, MovieAssembler, MovieError};
use crate::infrastructure::ports::MovieRepo;

pub struct ListMovies {
    movie_repo: Arc<dyn MovieRepo>,
    assembler: Arc<MovieAssembler>,
    timeout: Duration,
}

impl ListMovies {
    pub fn new(movie_repo: Arc<dyn MovieRepo>, assembler: Arc<MovieAssembler>, timeout: Duration) -> Self {
        Self {
            movie_repo,
            assembler,
            timeout,
        }
    }

    /// At most `limit` movies starting at `offset`; empty past the end.
    pub async fn execute(&self, limit: u64, offset: u64) -> Result<Vec<Movie>, MovieError> {
        with_deadline(self.timeout, async {
            let page = self.movie_repo.get_movies(limit, offset).await?;
            let mut movies = Vec::with_capacity(page.len());
            for base_info in page {
                movies.push(self.assembler.assemble(base_info).await?);
            }
            Ok(movies)
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::in_memory::InMemoryRepositories;
    use kinograph_domain::{MovieBaseInfo, MovieId};

    #[tokio::test]
    async fn window_past_the_end_returns_the_tail() {
        let repos = InMemoryRepositories::new();
        for id in 1..=12 {
            repos
                .movie
                .add(&MovieBaseInfo::new(MovieId::new(id), format!("Movie {id}")))
                .await
                .expect("add movie");
        }

        let use_case = ListMovies::new(
            repos.movie.clone(),
            Arc::new(MovieAssembler::new(repos.person.clone(), repos.profession.clone())),
            Duration::from_secs(5),
        );

        let tail = use_case.execute(10, 10).await.expect("tail");
        let titles: Vec<&str> = tail.iter().map(|m| m.base_info.title.as_str()).collect();
        assert_eq!(titles, vec!["Movie 11", "Movie 12"]);

        assert!(use_case.execute(10, 100).await.expect("empty").is_empty());
    }
}
