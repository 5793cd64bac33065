pub mod entities;
pub mod error;
pub mod ids;

pub use entities::{Movie, MovieBaseInfo, Person, Profession, Role};
pub use error::DomainError;
pub use ids::{MovieId, PersonId, ProfessionId};
