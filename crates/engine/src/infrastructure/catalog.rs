//! Remote movie catalog client
//!
//! Fetches movie and person payloads by numeric id from
//! `{movie_url}/{id}` and `{person_url}/{id}`, authenticating with the
//! `X-API-KEY` header. The catalog omits or nulls fields freely, so every
//! payload field is optional and defaults to zero or empty.

use async_trait::async_trait;
use kinograph_domain::{MovieBaseInfo, MovieId, PersonId};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;

use crate::infrastructure::config::CatalogConfig;
use crate::infrastructure::ports::{
    CatalogCredit, CatalogError, CatalogMovie, CatalogPerson, CatalogPort,
};

const API_KEY_HEADER: &str = "X-API-KEY";

/// Client for the remote catalog API
#[derive(Clone)]
pub struct CatalogClient {
    client: Client,
    movie_url: String,
    person_url: String,
    token: String,
}

impl CatalogClient {
    pub fn new(config: &CatalogConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            movie_url: config.movie_url.trim_end_matches('/').to_string(),
            person_url: config.person_url.trim_end_matches('/').to_string(),
            token: config.token.clone(),
        }
    }

    async fn fetch<T: DeserializeOwned>(&self, url: String) -> Result<T, CatalogError> {
        let response = self
            .client
            .get(&url)
            .header(API_KEY_HEADER, &self.token)
            .send()
            .await
            .map_err(|e| CatalogError::Request(e.to_string()))?;

        let status = response.status();
        if status != StatusCode::OK {
            tracing::debug!(url = %url, status = status.as_u16(), "Catalog rejected request");
            return Err(CatalogError::Status(status.as_u16()));
        }

        let body = response
            .text()
            .await
            .map_err(|e| CatalogError::Request(e.to_string()))?;

        serde_json::from_str(&body).map_err(|e| CatalogError::Decode(e.to_string()))
    }
}

#[async_trait]
impl CatalogPort for CatalogClient {
    async fn fetch_movie(&self, id: MovieId) -> Result<CatalogMovie, CatalogError> {
        let payload: MoviePayload = self.fetch(format!("{}/{}", self.movie_url, id)).await?;
        Ok(payload.into_catalog_movie())
    }

    async fn fetch_person(&self, id: PersonId) -> Result<CatalogPerson, CatalogError> {
        let payload: PersonPayload = self.fetch(format!("{}/{}", self.person_url, id)).await?;
        Ok(payload.into_catalog_person())
    }
}

// =============================================================================
// Wire payloads
// =============================================================================

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct MoviePayload {
    id: u64,
    name: Option<String>,
    year: Option<i64>,
    slogan: Option<String>,
    movie_length: Option<i64>,
    rating: Option<RatingPayload>,
    budget: Option<MoneyPayload>,
    fees: Option<FeesPayload>,
    persons: Option<Vec<CreditPayload>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RatingPayload {
    imdb: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct MoneyPayload {
    value: Option<i64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct FeesPayload {
    world: Option<MoneyPayload>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct CreditPayload {
    id: u64,
    name: Option<String>,
    en_profession: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct PersonPayload {
    id: u64,
    movies: Option<Vec<FilmographyEntry>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct FilmographyEntry {
    id: u64,
}

fn non_negative_u32(value: Option<i64>) -> u32 {
    value.and_then(|v| u32::try_from(v).ok()).unwrap_or(0)
}

fn non_negative_u64(value: Option<i64>) -> u64 {
    value.and_then(|v| u64::try_from(v).ok()).unwrap_or(0)
}

impl MoviePayload {
    fn into_catalog_movie(self) -> CatalogMovie {
        let base = MovieBaseInfo::new(MovieId::new(self.id), self.name.unwrap_or_default())
            .with_year(non_negative_u32(self.year))
            .with_tagline(self.slogan.unwrap_or_default())
            .with_duration(non_negative_u32(self.movie_length))
            .with_rating(self.rating.and_then(|r| r.imdb).unwrap_or(0.0))
            .with_budget(non_negative_u64(self.budget.and_then(|b| b.value)))
            .with_gross(non_negative_u64(
                self.fees.and_then(|f| f.world).and_then(|w| w.value),
            ));

        let credits = self
            .persons
            .unwrap_or_default()
            .into_iter()
            .map(|p| {
                CatalogCredit::new(
                    PersonId::new(p.id),
                    p.name.unwrap_or_default(),
                    p.en_profession.unwrap_or_default(),
                )
            })
            .collect();

        CatalogMovie { base, credits }
    }
}

impl PersonPayload {
    fn into_catalog_person(self) -> CatalogPerson {
        CatalogPerson {
            id: PersonId::new(self.id),
            movie_ids: self
                .movies
                .unwrap_or_default()
                .into_iter()
                .map(|m| MovieId::new(m.id))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_full_movie_payload() {
        let json = r#"{
            "id": 1000,
            "name": "The Matrix",
            "year": 1999,
            "slogan": "Welcome to the Real World",
            "movieLength": 136,
            "rating": {"kp": 8.5, "imdb": 8.7},
            "budget": {"value": 63000000, "currency": "$"},
            "fees": {"world": {"value": 467222728, "currency": "$"}},
            "persons": [
                {"id": 7, "name": "Keanu Reeves", "enProfession": "actor"},
                {"id": 8, "name": "Lana Wachowski", "enProfession": "director"}
            ]
        }"#;

        let payload: MoviePayload = serde_json::from_str(json).expect("decode");
        let movie = payload.into_catalog_movie();

        assert_eq!(movie.base.id, MovieId::new(1000));
        assert_eq!(movie.base.title, "The Matrix");
        assert_eq!(movie.base.year, 1999);
        assert_eq!(movie.base.tagline, "Welcome to the Real World");
        assert_eq!(movie.base.duration, 136);
        assert_eq!(movie.base.rating, 8.7);
        assert_eq!(movie.base.budget, 63_000_000);
        assert_eq!(movie.base.gross, 467_222_728);
        assert_eq!(
            movie.credits,
            vec![
                CatalogCredit::new(PersonId::new(7), "Keanu Reeves", "actor"),
                CatalogCredit::new(PersonId::new(8), "Lana Wachowski", "director"),
            ]
        );
    }

    #[test]
    fn missing_and_null_fields_default_to_zero() {
        let json = r#"{"id": 5, "name": null, "slogan": null, "budget": {}, "persons": null}"#;

        let movie = serde_json::from_str::<MoviePayload>(json)
            .expect("decode")
            .into_catalog_movie();

        assert_eq!(movie.base, MovieBaseInfo::new(MovieId::new(5), ""));
        assert!(movie.credits.is_empty());
    }

    #[test]
    fn decodes_person_filmography() {
        let json = r#"{"id": 7, "name": "Keanu Reeves", "growth": 186, "movies": [{"id": 1000}, {"id": 1001}]}"#;

        let person = serde_json::from_str::<PersonPayload>(json)
            .expect("decode")
            .into_catalog_person();

        assert_eq!(person.id, PersonId::new(7));
        assert_eq!(person.movie_ids, vec![MovieId::new(1000), MovieId::new(1001)]);
    }

    #[test]
    fn malformed_body_is_a_decode_error() {
        let result: Result<MoviePayload, _> = serde_json::from_str("not json");
        let error = result
            .map_err(|e| CatalogError::Decode(e.to_string()))
            .expect_err("garbage");
        assert!(matches!(error, CatalogError::Decode(_)));
    }

    #[test]
    fn client_trims_trailing_slashes() {
        let client = CatalogClient::new(&CatalogConfig {
            movie_url: "http://catalog.test/movie/".to_string(),
            person_url: "http://catalog.test/person".to_string(),
            token: "token".to_string(),
        });
        assert_eq!(client.movie_url, "http://catalog.test/movie");
        assert_eq!(client.person_url, "http://catalog.test/person");
    }
}
