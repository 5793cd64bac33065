//! Neo4j person repository implementation.

use async_trait::async_trait;
use kinograph_domain::{Person, PersonId};
use neo4rs::{query, Graph, Row};

use super::helpers::{id_to_bolt, NodeExt};
use super::query_helpers::{collect_rows, get_first_row, run_query};
use crate::infrastructure::ports::{PersonRepo, RepoError};

/// Repository for Person operations.
pub struct Neo4jPersonRepo {
    graph: Graph,
}

impl Neo4jPersonRepo {
    pub fn new(graph: Graph) -> Self {
        Self { graph }
    }

    fn row_to_person(&self, row: Row) -> Result<Person, RepoError> {
        let node: neo4rs::Node = row.get("p").map_err(|e| RepoError::database("query", e))?;

        Ok(Person {
            id: PersonId::new(node.get_id_strict("id")?),
            full_name: node.get_string_or("full_name", ""),
            height: node.get_optional_u32("height"),
            age: node.get_optional_u32("age"),
        })
    }
}

#[async_trait]
impl PersonRepo for Neo4jPersonRepo {
    async fn get_by_id(&self, id: PersonId) -> Result<Person, RepoError> {
        let q = query("MATCH (p:Person {id: $id}) RETURN p").param("id", id_to_bolt(id.get()));

        get_first_row(&self.graph, q, |row| self.row_to_person(row))
            .await?
            .ok_or_else(|| RepoError::not_found("Person", id))
    }

    async fn get_by_full_name(&self, full_name: &str) -> Result<Person, RepoError> {
        let q = query(
            "MATCH (p:Person {full_name: $full_name})
            RETURN p
            ORDER BY p.id
            LIMIT 1",
        )
        .param("full_name", full_name);

        get_first_row(&self.graph, q, |row| self.row_to_person(row))
            .await?
            .ok_or_else(|| RepoError::not_found("Person", full_name))
    }

    async fn get_persons(&self, limit: u64, offset: u64) -> Result<Vec<Person>, RepoError> {
        let q = query(
            "MATCH (p:Person)
            RETURN p
            ORDER BY p.id
            SKIP $offset
            LIMIT $limit",
        )
        .param("offset", id_to_bolt(offset))
        .param("limit", id_to_bolt(limit));

        collect_rows(&self.graph, q, |row| self.row_to_person(row)).await
    }

    async fn add(&self, person: &Person) -> Result<(), RepoError> {
        let q = query(
            "CREATE (p:Person {
                id: $id,
                full_name: $full_name,
                height: $height,
                age: $age
            })",
        )
        .param("id", id_to_bolt(person.id.get()))
        .param("full_name", person.full_name.clone())
        .param("height", person.height.map(i64::from))
        .param("age", person.age.map(i64::from));

        run_query(&self.graph, q, "add_person").await?;

        tracing::debug!(person_id = %person.id, "Saved person: {}", person.full_name);
        Ok(())
    }

    async fn delete(&self, id: PersonId) -> Result<(), RepoError> {
        let q = query("MATCH (p:Person {id: $id}) DETACH DELETE p").param("id", id_to_bolt(id.get()));

        run_query(&self.graph, q, "delete_person").await
    }
}
