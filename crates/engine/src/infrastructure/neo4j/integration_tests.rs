//! Neo4j adapter tests against a throwaway container.

use std::time::Duration;

use kinograph_domain::{MovieBaseInfo, MovieId, Person, PersonId, Role};
use neo4rs::{query, Graph};
use testcontainers::{core::WaitFor, runners::AsyncRunner, ContainerAsync, GenericImage};
use tokio::time::sleep;

use super::{ensure_schema, Neo4jRepositories};
use crate::infrastructure::ports::{MovieRepo, PersonRepo, ProfessionRepo, RepoError};

const TEST_NEO4J_PASSWORD: &str = "testpassword";

struct Neo4jHarness {
    _container: ContainerAsync<GenericImage>,
    graph: Graph,
}

impl Neo4jHarness {
    async fn start() -> Self {
        let container: ContainerAsync<GenericImage> = GenericImage::new("neo4j", "5.26.0-community")
            .with_env_var("NEO4J_AUTH", format!("neo4j/{TEST_NEO4J_PASSWORD}"))
            .with_env_var("NEO4J_server_memory_heap_max__size", "512m")
            .with_exposed_port(7687)
            .with_wait_for(WaitFor::seconds(5))
            .start()
            .await;
        let bolt_port = container.get_host_port_ipv4(7687).await;
        let uri = format!("bolt://127.0.0.1:{bolt_port}");

        let graph = connect_with_retry(&uri).await;
        ensure_schema(&graph).await.expect("Failed to ensure schema");

        Self {
            _container: container,
            graph,
        }
    }
}

async fn connect_with_retry(uri: &str) -> Graph {
    let mut delay = Duration::from_millis(500);
    for _ in 0..30 {
        if let Ok(graph) = Graph::new(uri, "neo4j", TEST_NEO4J_PASSWORD).await {
            if graph.run(query("RETURN 1")).await.is_ok() {
                return graph;
            }
        }
        sleep(delay).await;
        delay = std::cmp::min(delay.saturating_mul(2), Duration::from_secs(5));
    }
    panic!("Neo4j at {uri} never became ready");
}

#[tokio::test]
#[ignore = "requires docker (testcontainers)"]
async fn movie_round_trip_and_pagination() {
    let harness = Neo4jHarness::start().await;
    let repos = Neo4jRepositories::new(harness.graph.clone());

    for id in 1..=13u64 {
        let movie = MovieBaseInfo::new(MovieId::new(id), format!("Movie {id}"))
            .with_year(2000)
            .with_rating(6.5)
            .with_budget(1_000)
            .with_gross(2_000);
        repos.movie.add(&movie).await.expect("add movie");
    }

    let stored = repos.movie.get_by_id(MovieId::new(3)).await.expect("get movie");
    assert_eq!(stored.title, "Movie 3");
    assert_eq!(stored.gross, 2_000);

    let tail = repos.movie.get_movies(10, 10).await.expect("page");
    assert_eq!(tail.len(), 3);
    assert!(repos.movie.get_movies(10, 50).await.expect("past end").is_empty());

    let error = repos
        .movie
        .add(&MovieBaseInfo::new(MovieId::new(1), "Again"))
        .await
        .expect_err("duplicate id");
    assert!(matches!(error, RepoError::ConstraintViolation(_)));
}

#[tokio::test]
#[ignore = "requires docker (testcontainers)"]
async fn person_keeps_height_and_age_apart() {
    let harness = Neo4jHarness::start().await;
    let repos = Neo4jRepositories::new(harness.graph.clone());

    let person = Person::new(PersonId::new(7), "Keanu Reeves")
        .with_height(186)
        .with_age(60);
    repos.person.add(&person).await.expect("add person");

    let stored = repos
        .person
        .get_by_full_name("Keanu Reeves")
        .await
        .expect("lookup");
    assert_eq!(stored, person);
}

#[tokio::test]
#[ignore = "requires docker (testcontainers)"]
async fn role_edges_are_addressable_by_id() {
    let harness = Neo4jHarness::start().await;
    let repos = Neo4jRepositories::new(harness.graph.clone());

    let movie_id = MovieId::new(1000);
    let person_id = PersonId::new(7);
    repos
        .movie
        .add(&MovieBaseInfo::new(movie_id, "The Matrix"))
        .await
        .expect("add movie");
    repos
        .person
        .add(&Person::new(person_id, "Lana Wachowski"))
        .await
        .expect("add person");

    repos
        .profession
        .add(movie_id, person_id, Role::Director)
        .await
        .expect("director edge");
    repos
        .profession
        .add(movie_id, person_id, Role::Writer)
        .await
        .expect("writer edge");

    let writers = repos
        .profession
        .get_writers_by_movie(movie_id)
        .await
        .expect("writers");
    assert_eq!(writers.len(), 1);
    assert_eq!(writers[0].person_id, person_id);

    let id = repos
        .profession
        .get_id_by_params(movie_id, person_id, Role::Writer)
        .await
        .expect("edge id");
    repos.profession.delete(id).await.expect("delete edge");
    assert!(repos
        .profession
        .get_by_id(id)
        .await
        .expect_err("deleted")
        .is_not_found());
    assert_eq!(
        repos
            .profession
            .get_directors_by_movie(movie_id)
            .await
            .expect("directors")
            .len(),
        1
    );
}
