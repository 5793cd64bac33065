//! Get movie use case - lookup by id or title, then assemble credits.

use std::sync::Arc;
use std::time::Duration;

use kinograph_domain::{Movie, MovieId};

use super::{movie_lookup_error, with_deadline, MovieAssembler, MovieError};
use crate::infrastructure::ports::MovieRepo;

pub struct GetMovie {
    movie_repo: Arc<dyn MovieRepo>,
    assembler: Arc<MovieAssembler>,
    timeout: Duration,
}

impl GetMovie {
    pub fn new(movie_repo: Arc<dyn MovieRepo>, assembler: Arc<MovieAssembler>, timeout: Duration) -> Self {
        Self {
            movie_repo,
            assembler,
            timeout,
        }
    }

    pub async fn by_id(&self, id: MovieId) -> Result<Movie, MovieError> {
        with_deadline(self.timeout, async {
            let base_info = self
                .movie_repo
                .get_by_id(id)
                .await
                .map_err(movie_lookup_error)?;
            self.assembler.assemble(base_info).await
        })
        .await
    }

    pub async fn by_title(&self, title: &str) -> Result<Movie, MovieError> {
        with_deadline(self.timeout, async {
            let base_info = self
                .movie_repo
                .get_by_title(title)
                .await
                .map_err(movie_lookup_error)?;
            self.assembler.assemble(base_info).await
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::ports::{
        MockMovieRepo, MockPersonRepo, MockProfessionRepo, RepoError,
    };
    use async_trait::async_trait;
    use kinograph_domain::MovieBaseInfo;

    fn assembler_without_credits() -> Arc<MovieAssembler> {
        let person_repo = MockPersonRepo::new();
        let mut profession_repo = MockProfessionRepo::new();
        profession_repo
            .expect_get_by_movie()
            .returning(|_, _| Ok(vec![]));
        Arc::new(MovieAssembler::new(
            Arc::new(person_repo),
            Arc::new(profession_repo),
        ))
    }

    #[tokio::test]
    async fn absent_title_is_not_found() {
        let mut movie_repo = MockMovieRepo::new();
        movie_repo
            .expect_get_by_title()
            .withf(|title| title == "Ronin")
            .returning(|title| Err(RepoError::not_found("Movie", title)));

        let use_case = GetMovie::new(
            Arc::new(movie_repo),
            assembler_without_credits(),
            Duration::from_secs(5),
        );

        let error = use_case.by_title("Ronin").await.expect_err("absent");
        assert!(error.is_not_found());
    }

    #[tokio::test]
    async fn storage_failure_is_not_reported_as_not_found() {
        let mut movie_repo = MockMovieRepo::new();
        movie_repo
            .expect_get_by_id()
            .returning(|_| Err(RepoError::database("get_movie", "connection refused")));

        let use_case = GetMovie::new(
            Arc::new(movie_repo),
            assembler_without_credits(),
            Duration::from_secs(5),
        );

        let error = use_case.by_id(MovieId::new(1)).await.expect_err("db down");
        assert!(matches!(error, MovieError::Repo(RepoError::Database { .. })));
    }

    #[tokio::test]
    async fn returns_base_info_unchanged() {
        let base = MovieBaseInfo::new(MovieId::new(3), "Ronin")
            .with_year(1998)
            .with_tagline("No questions. No answers. No loyalties.")
            .with_duration(122)
            .with_rating(7.2)
            .with_budget(55_000_000)
            .with_gross(41_610_884);
        let stored = base.clone();

        let mut movie_repo = MockMovieRepo::new();
        movie_repo
            .expect_get_by_id()
            .returning(move |_| Ok(stored.clone()));

        let use_case = GetMovie::new(
            Arc::new(movie_repo),
            assembler_without_credits(),
            Duration::from_secs(5),
        );

        let movie = use_case.by_id(MovieId::new(3)).await.expect("movie");
        assert_eq!(movie.base_info, base);
    }

    struct SlowMovieRepo;

    #[async_trait]
    impl MovieRepo for SlowMovieRepo {
        async fn get_by_id(&self, id: MovieId) -> Result<MovieBaseInfo, RepoError> {
            tokio::time::sleep(Duration::from_secs(10)).await;
            Ok(MovieBaseInfo::new(id, "Late"))
        }

        async fn get_by_title(&self, title: &str) -> Result<MovieBaseInfo, RepoError> {
            Err(RepoError::not_found("Movie", title))
        }

        async fn get_movies(&self, _limit: u64, _offset: u64) -> Result<Vec<MovieBaseInfo>, RepoError> {
            Ok(vec![])
        }

        async fn add(&self, _movie: &MovieBaseInfo) -> Result<(), RepoError> {
            Ok(())
        }

        async fn delete(&self, _id: MovieId) -> Result<(), RepoError> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn slow_store_hits_the_deadline() {
        let use_case = GetMovie::new(
            Arc::new(SlowMovieRepo),
            assembler_without_credits(),
            Duration::from_millis(50),
        );

        let error = use_case.by_id(MovieId::new(1)).await.expect_err("deadline");
        assert!(matches!(error, MovieError::Timeout(d) if d == Duration::from_millis(50)));
    }
}
