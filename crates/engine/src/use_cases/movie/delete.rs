//! Delete movie use case - base info first, then every role-edge.
//!
//! Person records are shared between movies and are never removed here.

use std::sync::Arc;
use std::time::Duration;

use kinograph_domain::{MovieId, Role};

use super::{with_deadline, MovieError};
use crate::infrastructure::ports::{MovieRepo, ProfessionRepo};

pub struct DeleteMovie {
    movie_repo: Arc<dyn MovieRepo>,
    profession_repo: Arc<dyn ProfessionRepo>,
    timeout: Duration,
}

impl DeleteMovie {
    pub fn new(
        movie_repo: Arc<dyn MovieRepo>,
        profession_repo: Arc<dyn ProfessionRepo>,
        timeout: Duration,
    ) -> Self {
        Self {
            movie_repo,
            profession_repo,
            timeout,
        }
    }

    pub async fn execute(&self, id: MovieId) -> Result<(), MovieError> {
        with_deadline(self.timeout, async {
            self.movie_repo.delete(id).await?;

            let mut removed = 0usize;
            for role in Role::ALL {
                for edge in self.profession_repo.get_by_movie(id, role).await? {
                    self.profession_repo.delete(edge.id).await?;
                    removed += 1;
                }
            }

            tracing::debug!(movie_id = %id, edges_removed = removed, "Deleted movie");
            Ok(())
        })
        .await
    }
}
