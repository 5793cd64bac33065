//! Profession entity - a role-edge between a person and a movie
//!
//! `(movie, person, role)` records one credited participation. The same
//! person may hold several roles in one movie, one edge per role.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{DomainError, MovieId, PersonId, ProfessionId};

/// The four credit roles the catalog distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Director,
    Producer,
    Writer,
    Actor,
}

impl Role {
    /// Processing order for writes and read assembly.
    pub const ALL: [Role; 4] = [Role::Director, Role::Producer, Role::Writer, Role::Actor];

    /// Stable integer code used by the relational store.
    pub const fn code(self) -> i16 {
        match self {
            Self::Director => 1,
            Self::Producer => 2,
            Self::Writer => 3,
            Self::Actor => 4,
        }
    }

    pub fn from_code(code: i64) -> Result<Self, DomainError> {
        match code {
            1 => Ok(Self::Director),
            2 => Ok(Self::Producer),
            3 => Ok(Self::Writer),
            4 => Ok(Self::Actor),
            other => Err(DomainError::UnknownRole(other)),
        }
    }

    /// Classify a catalog profession tag. Unrecognized tags count as acting credits.
    pub fn from_profession_tag(tag: &str) -> Self {
        tag.parse().unwrap_or(Self::Actor)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Director => "director",
            Self::Producer => "producer",
            Self::Writer => "writer",
            Self::Actor => "actor",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "director" => Ok(Self::Director),
            "producer" => Ok(Self::Producer),
            "writer" => Ok(Self::Writer),
            "actor" => Ok(Self::Actor),
            other => Err(DomainError::parse(format!("unknown role '{other}'"))),
        }
    }
}

/// A stored role-edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profession {
    pub id: ProfessionId,
    pub movie_id: MovieId,
    pub person_id: PersonId,
    pub role: Role,
}

impl Profession {
    pub fn new(id: ProfessionId, movie_id: MovieId, person_id: PersonId, role: Role) -> Self {
        Self {
            id,
            movie_id,
            person_id,
            role,
        }
    }
}
