//! Neo4j role-edge repository implementation.
//!
//! Role-edges are relationships from person to movie:
//! - `(Person)-[:DIRECTED]->(Movie)`
//! - `(Person)-[:PRODUCED]->(Movie)`
//! - `(Person)-[:WROTE]->(Movie)`
//! - `(Person)-[:ACTED_IN]->(Movie)`
//!
//! Each relationship carries an `id` drawn from the `profession` sequence
//! node so edges can be addressed individually.

use async_trait::async_trait;
use kinograph_domain::{MovieId, PersonId, Profession, ProfessionId, Role};
use neo4rs::{query, Graph, Row};

use super::helpers::{id_from_bolt, id_to_bolt};
use super::query_helpers::{collect_rows, get_first_row, run_query};
use crate::infrastructure::ports::{ProfessionRepo, RepoError};

fn relationship_type(role: Role) -> &'static str {
    match role {
        Role::Director => "DIRECTED",
        Role::Producer => "PRODUCED",
        Role::Writer => "WROTE",
        Role::Actor => "ACTED_IN",
    }
}

fn role_from_relationship(rel_type: &str) -> Result<Role, RepoError> {
    Role::ALL
        .into_iter()
        .find(|role| relationship_type(*role) == rel_type)
        .ok_or_else(|| RepoError::serialization(format!("unknown relationship type {rel_type}")))
}

fn column_id(row: &Row, column: &str) -> Result<u64, RepoError> {
    let raw: i64 = row.get(column).map_err(|e| RepoError::database("query", e))?;
    id_from_bolt(raw)
}

/// Repository for role-edge operations.
pub struct Neo4jProfessionRepo {
    graph: Graph,
}

impl Neo4jProfessionRepo {
    pub fn new(graph: Graph) -> Self {
        Self { graph }
    }

    fn row_to_profession(&self, row: Row) -> Result<Profession, RepoError> {
        let rel_type: String = row
            .get("rel_type")
            .map_err(|e| RepoError::database("query", e))?;

        Ok(Profession::new(
            ProfessionId::new(column_id(&row, "id")?),
            MovieId::new(column_id(&row, "movie_id")?),
            PersonId::new(column_id(&row, "person_id")?),
            role_from_relationship(&rel_type)?,
        ))
    }
}

#[async_trait]
impl ProfessionRepo for Neo4jProfessionRepo {
    async fn get_id_by_params(
        &self,
        movie_id: MovieId,
        person_id: PersonId,
        role: Role,
    ) -> Result<ProfessionId, RepoError> {
        let cypher = format!(
            "MATCH (p:Person {{id: $person_id}})-[r:{}]->(m:Movie {{id: $movie_id}})
            RETURN r.id AS id
            ORDER BY r.id
            LIMIT 1",
            relationship_type(role)
        );
        let q = query(&cypher)
            .param("person_id", id_to_bolt(person_id.get()))
            .param("movie_id", id_to_bolt(movie_id.get()));

        get_first_row(&self.graph, q, |row| {
            column_id(&row, "id").map(ProfessionId::new)
        })
        .await?
        .ok_or_else(|| RepoError::not_found("Profession", format!("{movie_id}/{person_id}/{role}")))
    }

    async fn get_by_id(&self, id: ProfessionId) -> Result<Profession, RepoError> {
        let q = query(
            "MATCH (p:Person)-[r]->(m:Movie)
            WHERE r.id = $id AND type(r) IN ['DIRECTED', 'PRODUCED', 'WROTE', 'ACTED_IN']
            RETURN r.id AS id, type(r) AS rel_type, p.id AS person_id, m.id AS movie_id",
        )
        .param("id", id_to_bolt(id.get()));

        get_first_row(&self.graph, q, |row| self.row_to_profession(row))
            .await?
            .ok_or_else(|| RepoError::not_found("Profession", id))
    }

    async fn get_by_movie(
        &self,
        movie_id: MovieId,
        role: Role,
    ) -> Result<Vec<Profession>, RepoError> {
        let cypher = format!(
            "MATCH (p:Person)-[r:{}]->(m:Movie {{id: $movie_id}})
            RETURN r.id AS id, type(r) AS rel_type, p.id AS person_id, m.id AS movie_id
            ORDER BY r.id",
            relationship_type(role)
        );
        let q = query(&cypher).param("movie_id", id_to_bolt(movie_id.get()));

        collect_rows(&self.graph, q, |row| self.row_to_profession(row)).await
    }

    async fn add(&self, movie_id: MovieId, person_id: PersonId, role: Role) -> Result<(), RepoError> {
        match self.get_id_by_params(movie_id, person_id, role).await {
            Ok(existing) => {
                return Err(RepoError::constraint(format!(
                    "{role} credit {existing} for person {person_id} on movie {movie_id} already exists"
                )))
            }
            Err(e) if e.is_not_found() => {}
            Err(e) => return Err(e),
        }

        let cypher = format!(
            "MATCH (p:Person {{id: $person_id}}), (m:Movie {{id: $movie_id}})
            MERGE (s:Sequence {{name: 'profession'}})
            ON CREATE SET s.value = 0
            SET s.value = s.value + 1
            CREATE (p)-[r:{} {{id: s.value}}]->(m)
            RETURN r.id AS id",
            relationship_type(role)
        );
        let q = query(&cypher)
            .param("person_id", id_to_bolt(person_id.get()))
            .param("movie_id", id_to_bolt(movie_id.get()));

        let created = get_first_row(&self.graph, q, |row| column_id(&row, "id")).await?;
        match created {
            Some(id) => {
                tracing::debug!(profession_id = id, %movie_id, %person_id, %role, "Saved role-edge");
                Ok(())
            }
            None => Err(RepoError::not_found(
                "Person or Movie",
                format!("{person_id}/{movie_id}"),
            )),
        }
    }

    async fn delete(&self, id: ProfessionId) -> Result<(), RepoError> {
        let q = query(
            "MATCH (:Person)-[r]->(:Movie)
            WHERE r.id = $id
            DELETE r",
        )
        .param("id", id_to_bolt(id.get()));

        run_query(&self.graph, q, "delete_profession").await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_role_has_a_distinct_relationship_type() {
        for role in Role::ALL {
            let rel = relationship_type(role);
            assert_eq!(role_from_relationship(rel).expect("known type"), role);
        }
        assert!(role_from_relationship("KNOWS").is_err());
    }
}
