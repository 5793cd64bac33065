//! Postgres person repository implementation.

use async_trait::async_trait;
use kinograph_domain::{Person, PersonId};
use sqlx::postgres::PgRow;
use sqlx::PgPool;

use super::{column, from_db, map_sqlx_error, to_db};
use crate::infrastructure::ports::{PersonRepo, RepoError};

/// Postgres implementation for person records.
pub struct PostgresPersonRepo {
    pool: PgPool,
}

impl PostgresPersonRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn row_to_person(row: &PgRow) -> Result<Person, RepoError> {
        let age: Option<i32> = column(row, "age")?;
        let height: Option<i32> = column(row, "height")?;

        Ok(Person {
            id: PersonId::new(from_db("id", column(row, "id")?)?),
            full_name: column(row, "full_name")?,
            height: height.and_then(|h| u32::try_from(h).ok()),
            age: age.and_then(|a| u32::try_from(a).ok()),
        })
    }
}

fn optional_int(value: Option<u32>) -> Option<i32> {
    value.and_then(|v| i32::try_from(v).ok())
}

#[async_trait]
impl PersonRepo for PostgresPersonRepo {
    async fn get_by_id(&self, id: PersonId) -> Result<Person, RepoError> {
        let row = sqlx::query("SELECT id, full_name, age, height FROM person WHERE id = $1")
            .bind(to_db(id.get()))
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| RepoError::database("get_person", e))?;

        match row {
            Some(row) => Self::row_to_person(&row),
            None => Err(RepoError::not_found("Person", id)),
        }
    }

    async fn get_by_full_name(&self, full_name: &str) -> Result<Person, RepoError> {
        let row = sqlx::query(
            "SELECT id, full_name, age, height FROM person WHERE full_name = $1 ORDER BY id LIMIT 1",
        )
        .bind(full_name)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepoError::database("get_person_by_name", e))?;

        match row {
            Some(row) => Self::row_to_person(&row),
            None => Err(RepoError::not_found("Person", full_name)),
        }
    }

    async fn get_persons(&self, limit: u64, offset: u64) -> Result<Vec<Person>, RepoError> {
        let rows = sqlx::query(
            "SELECT id, full_name, age, height FROM person ORDER BY id LIMIT $1 OFFSET $2",
        )
        .bind(to_db(limit))
        .bind(to_db(offset))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepoError::database("get_persons", e))?;

        rows.iter().map(Self::row_to_person).collect()
    }

    async fn add(&self, person: &Person) -> Result<(), RepoError> {
        sqlx::query("INSERT INTO person (id, full_name, age, height) VALUES ($1, $2, $3, $4)")
            .bind(to_db(person.id.get()))
            .bind(&person.full_name)
            .bind(optional_int(person.age))
            .bind(optional_int(person.height))
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("add_person", e))?;

        tracing::debug!(person_id = %person.id, "Saved person: {}", person.full_name);
        Ok(())
    }

    async fn delete(&self, id: PersonId) -> Result<(), RepoError> {
        sqlx::query("DELETE FROM person WHERE id = $1")
            .bind(to_db(id.get()))
            .execute(&self.pool)
            .await
            .map_err(|e| RepoError::database("delete_person", e))?;
        Ok(())
    }
}
