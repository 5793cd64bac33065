//! Crawl loop: drain the frontier, then probe the next movie id.

use std::sync::Arc;

use kinograph_domain::{Movie, MovieId, Person, PersonId, Role};

use super::{CrawlError, CrawlItem, FailureDecision, FailurePolicy, Frontier};
use crate::infrastructure::ports::{CatalogMovie, CatalogPerson, CatalogPort, ThrottlePort};
use crate::use_cases::movie::AddMovie;

/// Split a catalog payload into a `Movie` and the person ids it credits.
///
/// Person ids come back in payload order. Unrecognised profession tags are
/// credited as actors.
pub fn decompose(payload: CatalogMovie) -> (Movie, Vec<PersonId>) {
    let mut movie = Movie::new(payload.base);
    let mut person_ids = Vec::with_capacity(payload.credits.len());

    for credit in payload.credits {
        person_ids.push(credit.person_id);
        let role = Role::from_profession_tag(&credit.profession);
        movie.add_credit(role, Person::new(credit.person_id, credit.name));
    }

    (movie, person_ids)
}

pub struct Crawler {
    catalog: Arc<dyn CatalogPort>,
    add_movie: Arc<AddMovie>,
    throttle: Arc<dyn ThrottlePort>,
    policy: Arc<dyn FailurePolicy>,
    frontier: Frontier,
    cursor: MovieId,
    max_movies: Option<u64>,
    processed: u64,
}

impl Crawler {
    pub fn new(
        catalog: Arc<dyn CatalogPort>,
        add_movie: Arc<AddMovie>,
        throttle: Arc<dyn ThrottlePort>,
        policy: Arc<dyn FailurePolicy>,
        start: MovieId,
    ) -> Self {
        Self {
            catalog,
            add_movie,
            throttle,
            policy,
            frontier: Frontier::new(),
            cursor: start,
            max_movies: None,
            processed: 0,
        }
    }

    /// Start from a pre-seeded frontier.
    pub fn with_frontier(mut self, frontier: Frontier) -> Self {
        self.frontier = frontier;
        self
    }

    /// Stop `run` after this many cursor positions.
    pub fn with_max_movies(mut self, max_movies: Option<u64>) -> Self {
        self.max_movies = max_movies;
        self
    }

    pub fn frontier(&self) -> &Frontier {
        &self.frontier
    }

    pub fn cursor(&self) -> MovieId {
        self.cursor
    }

    /// Cursor positions processed so far.
    pub fn processed(&self) -> u64 {
        self.processed
    }

    /// Loop `step` until the movie cap is reached, or forever without one.
    pub async fn run(mut self) {
        tracing::info!(start = %self.cursor, max_movies = ?self.max_movies, "Crawler started");

        loop {
            if let Some(max) = self.max_movies {
                if self.processed >= max {
                    tracing::info!(processed = self.processed, cursor = %self.cursor, "Crawler reached movie limit");
                    return;
                }
            }
            self.step().await;
        }
    }

    /// One iteration: expand every queued person, then process the movie at
    /// the cursor and advance it whatever the outcome.
    pub async fn step(&mut self) {
        while let Some(person_id) = self.frontier.pop() {
            if let Err(e) = self.expand_person(person_id).await {
                tracing::warn!(%person_id, error = %e, "Person expansion abandoned");
            }
        }

        let movie_id = self.cursor;
        if let Err(e) = self.process_movie(movie_id).await {
            tracing::warn!(%movie_id, error = %e, "Movie skipped");
        }

        self.cursor = movie_id.next();
        self.processed += 1;
    }

    /// Fetch a person's filmography and process each movie in turn.
    ///
    /// Stops at the first movie that fails.
    async fn expand_person(&mut self, person_id: PersonId) -> Result<(), CrawlError> {
        let person = self.fetch_person(person_id).await?;
        tracing::debug!(%person_id, movies = person.movie_ids.len(), "Expanding person");

        for movie_id in person.movie_ids {
            self.process_movie(movie_id).await?;
        }
        Ok(())
    }

    async fn process_movie(&mut self, movie_id: MovieId) -> Result<(), CrawlError> {
        let payload = self.fetch_movie(movie_id).await?;
        let (movie, person_ids) = decompose(payload);
        self.frontier.extend(person_ids);

        let title = movie.base_info.title.clone();
        if let Err(e) = self.add_movie.execute(movie).await {
            tracing::warn!(%movie_id, error = %e, "Failed to store crawled movie");
            return Err(e.into());
        }

        tracing::info!(%movie_id, %title, frontier = self.frontier.len(), "Stored crawled movie");
        Ok(())
    }

    async fn fetch_movie(&self, movie_id: MovieId) -> Result<CatalogMovie, CrawlError> {
        let mut attempt = 1;
        loop {
            self.throttle.wait().await;
            match self.catalog.fetch_movie(movie_id).await {
                Ok(payload) => return Ok(payload),
                Err(e) => {
                    let error = CrawlError::from(e);
                    match self.policy.on_failure(CrawlItem::Movie(movie_id), attempt, &error) {
                        FailureDecision::Retry => attempt += 1,
                        FailureDecision::Skip => return Err(error),
                    }
                }
            }
        }
    }

    async fn fetch_person(&self, person_id: PersonId) -> Result<CatalogPerson, CrawlError> {
        let mut attempt = 1;
        loop {
            self.throttle.wait().await;
            match self.catalog.fetch_person(person_id).await {
                Ok(payload) => return Ok(payload),
                Err(e) => {
                    let error = CrawlError::from(e);
                    match self.policy.on_failure(CrawlItem::Person(person_id), attempt, &error) {
                        FailureDecision::Retry => attempt += 1,
                        FailureDecision::Skip => return Err(error),
                    }
                }
            }
        }
    }
}
