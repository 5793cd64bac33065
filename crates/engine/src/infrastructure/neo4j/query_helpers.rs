//! Generic query helpers to reduce Neo4j repository boilerplate.

use neo4rs::{Graph, Query, Row};

use super::helpers::map_write_error;
use crate::infrastructure::ports::RepoError;

/// Execute a query and collect results using a converter function.
pub async fn collect_rows<T, F>(graph: &Graph, query: Query, converter: F) -> Result<Vec<T>, RepoError>
where
    F: Fn(Row) -> Result<T, RepoError>,
{
    let mut result = graph
        .execute(query)
        .await
        .map_err(|e| map_write_error("execute", e))?;

    let mut items = Vec::new();
    while let Some(row) = result
        .next()
        .await
        .map_err(|e| map_write_error("fetch_row", e))?
    {
        items.push(converter(row)?);
    }
    Ok(items)
}

/// Execute a query and return first result using a converter function.
pub async fn get_first_row<T, F>(
    graph: &Graph,
    query: Query,
    converter: F,
) -> Result<Option<T>, RepoError>
where
    F: Fn(Row) -> Result<T, RepoError>,
{
    let mut result = graph
        .execute(query)
        .await
        .map_err(|e| map_write_error("execute", e))?;

    if let Some(row) = result
        .next()
        .await
        .map_err(|e| map_write_error("fetch_row", e))?
    {
        Ok(Some(converter(row)?))
    } else {
        Ok(None)
    }
}

/// Execute a write query with no return value.
pub async fn run_query(graph: &Graph, query: Query, operation: &'static str) -> Result<(), RepoError> {
    graph
        .run(query)
        .await
        .map_err(|e| map_write_error(operation, e))
}
