//! Entities - movie, person and role-edge types.

mod movie;
mod person;
mod profession;

pub use movie::{Movie, MovieBaseInfo};
pub use person::Person;
pub use profession::{Profession, Role};
