//! Application configuration

use std::env;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use kinograph_domain::MovieId;

/// Default public catalog endpoints.
pub const DEFAULT_CATALOG_MOVIE_URL: &str = "https://api.kinopoisk.dev/v1.4/movie";
pub const DEFAULT_CATALOG_PERSON_URL: &str = "https://api.kinopoisk.dev/v1.4/person";

/// Application configuration loaded from environment
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database: DatabaseConfig,

    /// HTTP bind host
    pub server_host: String,
    /// HTTP port
    pub server_port: u16,

    pub catalog: CatalogConfig,
    pub crawler: CrawlerConfig,

    /// Deadline applied to every movie use case
    pub usecase_timeout: Duration,
}

/// Which store backs the three repositories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    Postgres,
    Neo4j,
    Memory,
}

impl StorageBackend {
    fn default_port(self) -> u16 {
        match self {
            Self::Postgres => 5432,
            Self::Neo4j => 7687,
            Self::Memory => 0,
        }
    }

    fn default_user(self) -> &'static str {
        match self {
            Self::Postgres => "postgres",
            Self::Neo4j => "neo4j",
            Self::Memory => "",
        }
    }

    fn default_database(self) -> &'static str {
        match self {
            Self::Postgres => "kinograph",
            Self::Neo4j => "neo4j",
            Self::Memory => "",
        }
    }
}

impl FromStr for StorageBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(Self::Postgres),
            "neo4j" | "bolt" => Ok(Self::Neo4j),
            "memory" => Ok(Self::Memory),
            other => Err(anyhow!("unknown DB_SCHEME '{other}' (expected postgres, neo4j or memory)")),
        }
    }
}

/// Database connection settings
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub backend: StorageBackend,
    pub host: String,
    pub port: u16,
    pub database: String,
    pub user: String,
    pub password: String,
}

impl DatabaseConfig {
    pub fn in_memory() -> Self {
        Self {
            backend: StorageBackend::Memory,
            host: String::new(),
            port: 0,
            database: String::new(),
            user: String::new(),
            password: String::new(),
        }
    }

    pub fn postgres_url(&self) -> String {
        format!(
            "postgres://{}:{}@{}:{}/{}",
            self.user, self.password, self.host, self.port, self.database
        )
    }

    pub fn neo4j_uri(&self) -> String {
        format!("bolt://{}:{}", self.host, self.port)
    }
}

/// Remote catalog endpoints and credentials
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    pub movie_url: String,
    pub person_url: String,
    pub token: String,
}

/// Background crawler settings
#[derive(Debug, Clone)]
pub struct CrawlerConfig {
    pub enabled: bool,
    /// First movie id probed by the cursor
    pub start_id: MovieId,
    /// Pause before every catalog request
    pub delay: Duration,
    /// Stop after this many cursor positions; run forever when unset
    pub max_movies: Option<u64>,
    /// 1 means log and skip; more enables bounded retry
    pub max_attempts: u32,
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from any key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let backend: StorageBackend = var("DB_SCHEME", "postgres").parse()?;
        let password = match backend {
            StorageBackend::Memory => lookup("DB_PASSWORD").unwrap_or_default(),
            _ => lookup("DB_PASSWORD").context("DB_PASSWORD environment variable is required")?,
        };
        let database = DatabaseConfig {
            backend,
            host: var("DB_HOST", "localhost"),
            port: var("DB_PORT", &backend.default_port().to_string())
                .parse()
                .context("DB_PORT must be a valid port number")?,
            database: var("DB_NAME", backend.default_database()),
            user: var("DB_USER", backend.default_user()),
            password,
        };

        let crawler_enabled = parse_bool(&var("CRAWLER_ENABLED", "true"))
            .context("CRAWLER_ENABLED must be true or false")?;
        let token = if crawler_enabled {
            lookup("CATALOG_TOKEN")
                .filter(|t| !t.trim().is_empty())
                .context("CATALOG_TOKEN environment variable is required when the crawler is enabled")?
        } else {
            lookup("CATALOG_TOKEN").unwrap_or_default()
        };

        Ok(Self {
            database,

            server_host: var("SERVER_HOST", "0.0.0.0"),
            server_port: var("SERVER_PORT", "8080")
                .parse()
                .context("SERVER_PORT must be a valid port number")?,

            catalog: CatalogConfig {
                movie_url: var("CATALOG_MOVIE_URL", DEFAULT_CATALOG_MOVIE_URL),
                person_url: var("CATALOG_PERSON_URL", DEFAULT_CATALOG_PERSON_URL),
                token,
            },

            crawler: CrawlerConfig {
                enabled: crawler_enabled,
                start_id: var("CRAWLER_START_ID", "1000")
                    .parse()
                    .context("CRAWLER_START_ID must be a positive integer")?,
                delay: Duration::from_secs(
                    var("CRAWLER_DELAY_SECS", "1")
                        .parse()
                        .context("CRAWLER_DELAY_SECS must be a number of seconds")?,
                ),
                max_movies: lookup("CRAWLER_MAX_MOVIES")
                    .map(|v| v.parse::<u64>())
                    .transpose()
                    .context("CRAWLER_MAX_MOVIES must be a positive integer")?,
                max_attempts: var("CRAWLER_MAX_ATTEMPTS", "1")
                    .parse::<u32>()
                    .context("CRAWLER_MAX_ATTEMPTS must be a positive integer")?
                    .max(1),
            },

            usecase_timeout: Duration::from_secs(
                var("USECASE_TIMEOUT_SECS", "5")
                    .parse()
                    .context("USECASE_TIMEOUT_SECS must be a number of seconds")?,
            ),
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

fn parse_bool(value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(anyhow!("not a boolean: '{other}'")),
    }
}
