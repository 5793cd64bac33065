//! Add movie use case - persists base info, deduplicated persons and role-edges.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use kinograph_domain::{Movie, PersonId, Role};

use super::{with_deadline, MovieError};
use crate::infrastructure::ports::{MovieRepo, PersonRepo, ProfessionRepo};

/// Writes a fully decomposed movie.
///
/// Order is fixed: base info, then every person (deduplicated by full name),
/// then every role-edge. A `(role, person)` pair listed twice, directly or
/// through name dedup, yields one edge. Nothing is rolled back; a failure
/// part-way through leaves the writes made so far in place.
pub struct AddMovie {
    movie_repo: Arc<dyn MovieRepo>,
    person_repo: Arc<dyn PersonRepo>,
    profession_repo: Arc<dyn ProfessionRepo>,
    timeout: Duration,
}

impl AddMovie {
    pub fn new(
        movie_repo: Arc<dyn MovieRepo>,
        person_repo: Arc<dyn PersonRepo>,
        profession_repo: Arc<dyn ProfessionRepo>,
        timeout: Duration,
    ) -> Self {
        Self {
            movie_repo,
            person_repo,
            profession_repo,
            timeout,
        }
    }

    pub async fn execute(&self, movie: Movie) -> Result<(), MovieError> {
        with_deadline(self.timeout, self.add(movie)).await
    }

    async fn add(&self, movie: Movie) -> Result<(), MovieError> {
        let movie_id = movie.id();
        self.movie_repo.add(&movie.base_info).await?;

        // Edges point at whichever id the store holds for the name.
        let mut credits: Vec<(Role, PersonId)> = Vec::with_capacity(movie.credit_count());
        let mut written: HashSet<(Role, PersonId)> = HashSet::new();
        for (role, person) in movie.all_credits() {
            let stored_id = match self.person_repo.get_by_full_name(&person.full_name).await {
                Ok(existing) => {
                    tracing::info!(
                        person_id = %existing.id,
                        full_name = %existing.full_name,
                        "Person already stored"
                    );
                    existing.id
                }
                Err(e) if e.is_not_found() => {
                    self.person_repo.add(person).await?;
                    person.id
                }
                Err(e) => return Err(e.into()),
            };
            if !written.insert((role, stored_id)) {
                tracing::info!(
                    %movie_id,
                    person_id = %stored_id,
                    %role,
                    "Credit already listed for this movie"
                );
                continue;
            }
            credits.push((role, stored_id));
        }

        for (role, person_id) in credits {
            self.profession_repo.add(movie_id, person_id, role).await?;
        }

        tracing::debug!(%movie_id, title = %movie.base_info.title, "Added movie");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::in_memory::{
        InMemoryMovieRepo, InMemoryPersonRepo, InMemoryProfessionRepo, InMemoryRepositories,
    };
    use crate::infrastructure::ports::{
        MockMovieRepo, MockPersonRepo, MockProfessionRepo, RepoError,
    };
    use async_trait::async_trait;
    use kinograph_domain::{MovieBaseInfo, MovieId, Person, Profession, ProfessionId};
    use mockall::predicate::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    const TIMEOUT: Duration = Duration::from_secs(5);

    fn base(id: u64) -> MovieBaseInfo {
        MovieBaseInfo::new(MovieId::new(id), "Heat").with_year(1995)
    }

    /// Role-edge store that fails the Nth `add`.
    struct FailingNthAdd {
        inner: InMemoryProfessionRepo,
        fail_on: usize,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl ProfessionRepo for FailingNthAdd {
        async fn get_id_by_params(
            &self,
            movie_id: MovieId,
            person_id: PersonId,
            role: Role,
        ) -> Result<ProfessionId, RepoError> {
            self.inner.get_id_by_params(movie_id, person_id, role).await
        }

        async fn get_by_id(&self, id: ProfessionId) -> Result<Profession, RepoError> {
            self.inner.get_by_id(id).await
        }

        async fn get_by_movie(
            &self,
            movie_id: MovieId,
            role: Role,
        ) -> Result<Vec<Profession>, RepoError> {
            self.inner.get_by_movie(movie_id, role).await
        }

        async fn add(&self, movie_id: MovieId, person_id: PersonId, role: Role) -> Result<(), RepoError> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
            if call == self.fail_on {
                return Err(RepoError::database("add_profession", "connection reset"));
            }
            self.inner.add(movie_id, person_id, role).await
        }

        async fn delete(&self, id: ProfessionId) -> Result<(), RepoError> {
            self.inner.delete(id).await
        }
    }

    #[tokio::test]
    async fn same_name_under_different_ids_is_stored_once() {
        let movie_repo = Arc::new(InMemoryMovieRepo::new());
        let person_repo = Arc::new(InMemoryPersonRepo::new());
        let profession_repo = Arc::new(InMemoryProfessionRepo::new());
        let use_case = AddMovie::new(
            movie_repo.clone(),
            person_repo.clone(),
            profession_repo.clone(),
            TIMEOUT,
        );

        let mut movie = Movie::new(base(1));
        movie.add_credit(Role::Director, Person::new(PersonId::new(10), "Michael Mann"));
        movie.add_credit(Role::Writer, Person::new(PersonId::new(99), "Michael Mann"));

        use_case.execute(movie).await.expect("add movie");

        assert_eq!(person_repo.len().await, 1);
        let writers = profession_repo
            .get_writers_by_movie(MovieId::new(1))
            .await
            .expect("writers");
        assert_eq!(writers.len(), 1);
        assert_eq!(writers[0].person_id, PersonId::new(10));
    }

    #[tokio::test]
    async fn namesakes_in_one_role_share_a_single_edge() {
        let repos = InMemoryRepositories::new();
        let use_case = AddMovie::new(
            repos.movie.clone(),
            repos.person.clone(),
            repos.profession.clone(),
            TIMEOUT,
        );

        let mut movie = Movie::new(base(1));
        movie.add_credit(Role::Actor, Person::new(PersonId::new(1), "John Smith"));
        movie.add_credit(Role::Actor, Person::new(PersonId::new(2), "John Smith"));
        movie.add_credit(Role::Actor, Person::new(PersonId::new(3), "Zed"));

        use_case.execute(movie).await.expect("add movie");

        let actors: Vec<PersonId> = repos
            .profession
            .get_actors_by_movie(MovieId::new(1))
            .await
            .expect("actors")
            .iter()
            .map(|edge| edge.person_id)
            .collect();
        assert_eq!(actors, vec![PersonId::new(1), PersonId::new(3)]);
        assert_eq!(repos.person.len().await, 2);
    }

    #[tokio::test]
    async fn third_edge_failure_keeps_the_first_two() {
        let movie_repo = Arc::new(InMemoryMovieRepo::new());
        let person_repo = Arc::new(InMemoryPersonRepo::new());
        let profession_repo = Arc::new(FailingNthAdd {
            inner: InMemoryProfessionRepo::new(),
            fail_on: 3,
            calls: AtomicUsize::new(0),
        });
        let use_case = AddMovie::new(
            movie_repo.clone(),
            person_repo.clone(),
            profession_repo.clone(),
            TIMEOUT,
        );

        let mut movie = Movie::new(base(1));
        movie.add_credit(Role::Director, Person::new(PersonId::new(1), "Michael Mann"));
        movie.add_credit(Role::Producer, Person::new(PersonId::new(2), "Art Linson"));
        movie.add_credit(Role::Writer, Person::new(PersonId::new(3), "Someone Else"));
        movie.add_credit(Role::Actor, Person::new(PersonId::new(4), "Al Pacino"));

        let error = use_case.execute(movie).await.expect_err("third edge fails");
        assert!(matches!(error, MovieError::Repo(RepoError::Database { .. })));

        let movie_id = MovieId::new(1);
        assert_eq!(
            profession_repo
                .get_directors_by_movie(movie_id)
                .await
                .expect("directors")
                .len(),
            1
        );
        assert_eq!(
            profession_repo
                .get_producers_by_movie(movie_id)
                .await
                .expect("producers")
                .len(),
            1
        );
        assert!(profession_repo
            .get_writers_by_movie(movie_id)
            .await
            .expect("writers")
            .is_empty());
        assert!(profession_repo
            .get_actors_by_movie(movie_id)
            .await
            .expect("actors")
            .is_empty());

        // Persons are all written before any edge.
        assert_eq!(person_repo.len().await, 4);
        assert_eq!(movie_repo.len().await, 1);
    }

    #[tokio::test]
    async fn base_info_failure_writes_nothing_else() {
        let mut movie_repo = MockMovieRepo::new();
        let person_repo = MockPersonRepo::new();
        let profession_repo = MockProfessionRepo::new();

        movie_repo
            .expect_add()
            .times(1)
            .returning(|_| Err(RepoError::constraint("movie 1 already exists")));

        let use_case = AddMovie::new(
            Arc::new(movie_repo),
            Arc::new(person_repo),
            Arc::new(profession_repo),
            TIMEOUT,
        );

        let mut movie = Movie::new(base(1));
        movie.add_credit(Role::Actor, Person::new(PersonId::new(2), "Al Pacino"));

        let error = use_case.execute(movie).await.expect_err("conflict");
        assert!(matches!(error, MovieError::Repo(RepoError::ConstraintViolation(_))));
    }

    #[tokio::test]
    async fn lookup_failure_other_than_not_found_aborts() {
        let mut movie_repo = MockMovieRepo::new();
        let mut person_repo = MockPersonRepo::new();
        let profession_repo = MockProfessionRepo::new();

        movie_repo.expect_add().returning(|_| Ok(()));
        person_repo
            .expect_get_by_full_name()
            .withf(|name| name == "Al Pacino")
            .returning(|_| Err(RepoError::database("get_person_by_name", "timeout")));
        person_repo.expect_add().never();

        let use_case = AddMovie::new(
            Arc::new(movie_repo),
            Arc::new(person_repo),
            Arc::new(profession_repo),
            TIMEOUT,
        );

        let mut movie = Movie::new(base(1));
        movie.add_credit(Role::Actor, Person::new(PersonId::new(2), "Al Pacino"));

        let error = use_case.execute(movie).await.expect_err("lookup fails");
        assert!(matches!(error, MovieError::Repo(RepoError::Database { .. })));
    }

    #[tokio::test]
    async fn edges_are_written_in_role_order_after_all_persons() {
        let mut movie_repo = MockMovieRepo::new();
        let mut person_repo = MockPersonRepo::new();
        let mut profession_repo = MockProfessionRepo::new();
        let mut seq = mockall::Sequence::new();

        movie_repo.expect_add().returning(|_| Ok(()));
        person_repo
            .expect_get_by_full_name()
            .returning(|name| Err(RepoError::not_found("Person", name)));
        person_repo.expect_add().times(2).returning(|_| Ok(()));

        profession_repo
            .expect_add()
            .with(eq(MovieId::new(1)), eq(PersonId::new(2)), eq(Role::Director))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _, _| Ok(()));
        profession_repo
            .expect_add()
            .with(eq(MovieId::new(1)), eq(PersonId::new(3)), eq(Role::Actor))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _, _| Ok(()));

        let use_case = AddMovie::new(
            Arc::new(movie_repo),
            Arc::new(person_repo),
            Arc::new(profession_repo),
            TIMEOUT,
        );

        let mut movie = Movie::new(base(1));
        movie.add_credit(Role::Actor, Person::new(PersonId::new(3), "Al Pacino"));
        movie.add_credit(Role::Director, Person::new(PersonId::new(2), "Michael Mann"));

        use_case.execute(movie).await.expect("add movie");
    }
}
