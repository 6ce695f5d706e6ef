use anyhow::{Context, Result};
use chrono::{Datelike, Utc};

/// Default row cap for the keyword query against the job table.
pub const DEFAULT_JOB_FETCH_LIMIT: i64 = 200;

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub gemini_api_key: String,
    pub port: u16,
    pub rust_log: String,
    /// Maximum number of postings fetched per search.
    pub job_fetch_limit: i64,
    /// Graduation year whose cohort counts as "fresh graduates" this cycle.
    pub graduation_cohort: u16,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            gemini_api_key: require_env("GEMINI_API_KEY")?,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            job_fetch_limit: parse_fetch_limit(std::env::var("JOB_FETCH_LIMIT").ok().as_deref())?,
            graduation_cohort: parse_cohort(std::env::var("GRADUATION_COHORT").ok().as_deref())?,
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn parse_fetch_limit(raw: Option<&str>) -> Result<i64> {
    let Some(raw) = raw else {
        return Ok(DEFAULT_JOB_FETCH_LIMIT);
    };
    let limit = raw
        .trim()
        .parse::<i64>()
        .context("JOB_FETCH_LIMIT must be an integer")?;
    anyhow::ensure!(limit > 0, "JOB_FETCH_LIMIT must be positive, got {limit}");
    Ok(limit)
}

fn parse_cohort(raw: Option<&str>) -> Result<u16> {
    match raw {
        Some(raw) => raw
            .trim()
            .parse::<u16>()
            .context("GRADUATION_COHORT must be a four-digit year"),
        None => Ok(Utc::now().year() as u16),
    }
}
