// src/config.rs

use std::env;
use std::time::Duration;

use dotenvy::dotenv;
use thiserror::Error;

/// Number of questions returned when the caller does not ask for a count.
pub const DEFAULT_QUESTION_COUNT: usize = 20;
/// Upper bound for the `count` query parameter.
pub const MAX_QUESTION_COUNT: usize = 50;
/// Records requested per store page.
pub const STORE_PAGE_SIZE: u32 = 100;
/// Pagination stops once this many records have been accumulated.
pub const CANDIDATE_CAP: usize = 500;

// Property names in the quiz database.
pub const PROP_TYPE: &str = "Type";
pub const PROP_QUESTION: &str = "Question";
pub const PROP_OPTIONS: &str = "Options";
pub const PROP_CORRECT: &str = "Correct answer";
pub const PROP_LECTURE: &str = "Lecture";

const DEFAULT_NOTION_BASE_URL: &str = "https://api.notion.com";
const DEFAULT_NOTION_VERSION: &str = "2022-06-28";
const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_ALLOWED_ORIGINS: &str = "http://localhost:3000,http://127.0.0.1:3000";
const DEFAULT_PORT: u16 = 3000;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("invalid value for {name}: {value}")]
    Invalid { name: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub notion_token: String,
    pub quiz_database_id: String,
    pub notion_base_url: String,
    pub notion_version: String,
    pub notion_timeout: Duration,
    pub allowed_origins: Vec<String>,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv().ok();

        let notion_token = required("NOTION_TOKEN")?;
        let quiz_database_id = required("NOTION_QUIZ_DB_ID")?;

        let notion_base_url =
            env::var("NOTION_BASE_URL").unwrap_or_else(|_| DEFAULT_NOTION_BASE_URL.to_string());

        let notion_version =
            env::var("NOTION_VERSION").unwrap_or_else(|_| DEFAULT_NOTION_VERSION.to_string());

        let notion_timeout = Duration::from_secs(parsed("NOTION_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS)?);

        let allowed_origins = split_origins(
            &env::var("ALLOWED_ORIGINS").unwrap_or_else(|_| DEFAULT_ALLOWED_ORIGINS.to_string()),
        );

        let port = parsed("PORT", DEFAULT_PORT)?;

        let rust_log = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            notion_token,
            quiz_database_id,
            notion_base_url,
            notion_version,
            notion_timeout,
            allowed_origins,
            port,
            rust_log,
        })
    }
}

fn required(name: &'static str) -> Result<String, ConfigError> {
    match env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ConfigError::Missing(name)),
    }
}

fn parsed<T: std::str::FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value }),
        Err(_) => Ok(default),
    }
}

fn split_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}
