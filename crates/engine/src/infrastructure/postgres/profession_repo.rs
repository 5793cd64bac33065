//! Postgres role-edge repository implementation.
//!
//! `movie_role` holds the numeric role code (Director=1 .. Actor=4).

use async_trait::async_trait;
use kinograph_domain::{MovieId, PersonId, Profession, ProfessionId, Role};
use sqlx::postgres::PgRow;
use sqlx::PgPool;

use super::{column, from_db, map_sqlx_error, to_db};
use crate::infrastructure::ports::{ProfessionRepo, RepoError};

/// Postgres implementation for role-edges.
pub struct PostgresProfessionRepo {
    pool: PgPool,
}

impl PostgresProfessionRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn row_to_profession(row: &PgRow) -> Result<Profession, RepoError> {
        let code: i16 = column(row, "movie_role")?;

        Ok(Profession::new(
            ProfessionId::new(from_db("id", column(row, "id")?)?),
            MovieId::new(from_db("movie_id", column(row, "movie_id")?)?),
            PersonId::new(from_db("person_id", column(row, "person_id")?)?),
            Role::from_code(i64::from(code))?,
        ))
    }
}

#[async_trait]
impl ProfessionRepo for PostgresProfessionRepo {
    async fn get_id_by_params(
        &self,
        movie_id: MovieId,
        person_id: PersonId,
        role: Role,
    ) -> Result<ProfessionId, RepoError> {
        let row = sqlx::query(
            "SELECT id FROM professions WHERE movie_id = $1 AND person_id = $2 AND movie_role = $3",
        )
        .bind(to_db(movie_id.get()))
        .bind(to_db(person_id.get()))
        .bind(role.code())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepoError::database("get_profession_id", e))?;

        match row {
            Some(row) => Ok(ProfessionId::new(from_db("id", column(&row, "id")?)?)),
            None => Err(RepoError::not_found(
                "Profession",
                format!("{movie_id}/{person_id}/{role}"),
            )),
        }
    }

    async fn get_by_id(&self, id: ProfessionId) -> Result<Profession, RepoError> {
        let row = sqlx::query(
            "SELECT id, movie_id, person_id, movie_role FROM professions WHERE id = $1",
        )
        .bind(to_db(id.get()))
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepoError::database("get_profession", e))?;

        match row {
            Some(row) => Self::row_to_profession(&row),
            None => Err(RepoError::not_found("Profession", id)),
        }
    }

    async fn get_by_movie(
        &self,
        movie_id: MovieId,
        role: Role,
    ) -> Result<Vec<Profession>, RepoError> {
        let rows = sqlx::query(
            r#"
            SELECT id, movie_id, person_id, movie_role
            FROM professions
            WHERE movie_id = $1 AND movie_role = $2
            ORDER BY id
            "#,
        )
        .bind(to_db(movie_id.get()))
        .bind(role.code())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepoError::database("get_professions_by_movie", e))?;

        rows.iter().map(Self::row_to_profession).collect()
    }

    async fn add(&self, movie_id: MovieId, person_id: PersonId, role: Role) -> Result<(), RepoError> {
        sqlx::query("INSERT INTO professions (movie_id, person_id, movie_role) VALUES ($1, $2, $3)")
            .bind(to_db(movie_id.get()))
            .bind(to_db(person_id.get()))
            .bind(role.code())
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("add_profession", e))?;

        tracing::debug!(%movie_id, %person_id, %role, "Saved role-edge");
        Ok(())
    }

    async fn delete(&self, id: ProfessionId) -> Result<(), RepoError> {
        sqlx::query("DELETE FROM professions WHERE id = $1")
            .bind(to_db(id.get()))
            .execute(&self.pool)
            .await
            .map_err(|e| RepoError::database("delete_profession", e))?;
        Ok(())
    }
}
