//! Read composition - base info plus role-edges resolved to persons.

use std::sync::Arc;

use kinograph_domain::{Movie, MovieBaseInfo, Role};

use super::MovieError;
use crate::infrastructure::ports::{PersonRepo, ProfessionRepo};

/// Builds a `Movie` from stored base info.
///
/// All-or-nothing: one role-edge whose person cannot be resolved fails the
/// whole assembly.
pub struct MovieAssembler {
    person_repo: Arc<dyn PersonRepo>,
    profession_repo: Arc<dyn ProfessionRepo>,
}

impl MovieAssembler {
    pub fn new(person_repo: Arc<dyn PersonRepo>, profession_repo: Arc<dyn ProfessionRepo>) -> Self {
        Self {
            person_repo,
            profession_repo,
        }
    }

    pub async fn assemble(&self, base_info: MovieBaseInfo) -> Result<Movie, MovieError> {
        let movie_id = base_info.id;
        let mut movie = Movie::new(base_info);

        for role in Role::ALL {
            let edges = self.profession_repo.get_by_movie(movie_id, role).await?;
            for edge in edges {
                let person = self
                    .person_repo
                    .get_by_id(edge.person_id)
                    .await
                    .map_err(|e| {
                        if e.is_not_found() {
                            tracing::warn!(%movie_id, person_id = %edge.person_id, "Role-edge points at a missing person");
                            MovieError::MissingPerson {
                                movie_id,
                                person_id: edge.person_id,
                            }
                        } else {
                            MovieError::Repo(e)
                        }
                    })?;
                movie.add_credit(role, person);
            }
        }

        Ok(movie)
    }
}
