//! Movie entities - base facts and the read-side aggregate
//!
//! `MovieBaseInfo` is what the movie store persists. `Movie` is assembled on
//! demand from base info, role-edges and person records; it is never stored
//! as a unit.

use serde::{Deserialize, Serialize};

use crate::{MovieId, Person, Role};

/// Scalar facts about a movie, excluding its cast and crew.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MovieBaseInfo {
    pub id: MovieId,
    pub title: String,
    pub year: u32,
    pub tagline: String,
    /// Running time in minutes
    pub duration: u32,
    pub rating: f64,
    pub budget: u64,
    /// Worldwide gross revenue
    pub gross: u64,
}

impl MovieBaseInfo {
    pub fn new(id: MovieId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn with_year(mut self, year: u32) -> Self {
        self.year = year;
        self
    }

    pub fn with_tagline(mut self, tagline: impl Into<String>) -> Self {
        self.tagline = tagline.into();
        self
    }

    pub fn with_duration(mut self, minutes: u32) -> Self {
        self.duration = minutes;
        self
    }

    pub fn with_rating(mut self, rating: f64) -> Self {
        self.rating = rating;
        self
    }

    pub fn with_budget(mut self, budget: u64) -> Self {
        self.budget = budget;
        self
    }

    pub fn with_gross(mut self, gross: u64) -> Self {
        self.gross = gross;
        self
    }
}

/// A movie with its credits partitioned by role.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    #[serde(rename = "info")]
    pub base_info: MovieBaseInfo,
    #[serde(default)]
    pub producers: Vec<Person>,
    #[serde(default)]
    pub directors: Vec<Person>,
    #[serde(default)]
    pub writers: Vec<Person>,
    #[serde(default)]
    pub actors: Vec<Person>,
}

impl Movie {
    pub fn new(base_info: MovieBaseInfo) -> Self {
        Self {
            base_info,
            ..Self::default()
        }
    }

    pub fn id(&self) -> MovieId {
        self.base_info.id
    }

    /// Persons credited under `role`, in credit order.
    pub fn credits(&self, role: Role) -> &[Person] {
        match role {
            Role::Director => &self.directors,
            Role::Producer => &self.producers,
            Role::Writer => &self.writers,
            Role::Actor => &self.actors,
        }
    }

    pub fn credits_mut(&mut self, role: Role) -> &mut Vec<Person> {
        match role {
            Role::Director => &mut self.directors,
            Role::Producer => &mut self.producers,
            Role::Writer => &mut self.writers,
            Role::Actor => &mut self.actors,
        }
    }

    pub fn add_credit(&mut self, role: Role, person: Person) {
        self.credits_mut(role).push(person);
    }

    /// Every credit as `(role, person)` in `Role::ALL` order.
    pub fn all_credits(&self) -> impl Iterator<Item = (Role, &Person)> {
        Role::ALL
            .into_iter()
            .flat_map(move |role| self.credits(role).iter().map(move |p| (role, p)))
    }

    pub fn credit_count(&self) -> usize {
        Role::ALL.iter().map(|role| self.credits(*role).len()).sum()
    }
}
