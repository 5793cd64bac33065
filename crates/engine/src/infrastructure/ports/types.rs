//! Flat types exchanged across the catalog port.
//!
//! These mirror what the remote catalog reports before the crawler
//! classifies credits into role buckets.

use kinograph_domain::{MovieBaseInfo, MovieId, PersonId};

/// One decoded movie payload.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogMovie {
    pub base: MovieBaseInfo,
    pub credits: Vec<CatalogCredit>,
}

/// A person listed on a movie payload, with the raw profession tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogCredit {
    pub person_id: PersonId,
    pub name: String,
    pub profession: String,
}

impl CatalogCredit {
    pub fn new(person_id: PersonId, name: impl Into<String>, profession: impl Into<String>) -> Self {
        Self {
            person_id,
            name: name.into(),
            profession: profession.into(),
        }
    }
}

/// One decoded person payload - only the filmography matters to the crawler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogPerson {
    pub id: PersonId,
    pub movie_ids: Vec<MovieId>,
}
