//! Neo4j schema initialization - constraints and indexes.

use neo4rs::{query, Graph};

/// Initialize Neo4j schema with required constraints and indexes.
///
/// Called once on startup. Every statement uses IF NOT EXISTS.
pub async fn ensure_schema(graph: &Graph) -> Result<(), neo4rs::Error> {
    graph
        .run(query(
            "CREATE CONSTRAINT movie_id_unique IF NOT EXISTS
             FOR (m:Movie) REQUIRE m.id IS UNIQUE",
        ))
        .await?;

    graph
        .run(query(
            "CREATE CONSTRAINT person_id_unique IF NOT EXISTS
             FOR (p:Person) REQUIRE p.id IS UNIQUE",
        ))
        .await?;

    // Issues role-edge ids.
    graph
        .run(query(
            "CREATE CONSTRAINT sequence_name_unique IF NOT EXISTS
             FOR (s:Sequence) REQUIRE s.name IS UNIQUE",
        ))
        .await?;

    graph
        .run(query(
            "CREATE INDEX person_full_name IF NOT EXISTS
             FOR (p:Person) ON (p.full_name)",
        ))
        .await?;

    graph
        .run(query(
            "CREATE INDEX movie_title IF NOT EXISTS
             FOR (m:Movie) ON (m.title)",
        ))
        .await?;

    tracing::info!("Neo4j schema initialized (constraints and indexes ensured)");
    Ok(())
}
