use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    /// A member whose ban_count reaches this threshold is permanently banned.
    pub ban_count_threshold: i32,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Ok(Self {
            database_url: env::var("DATABASE_URL")
                .context("DATABASE_URL must be set")?,
            ban_count_threshold: env::var("BAN_COUNT_THRESHOLD")
                .unwrap_or_else(|_| "5".to_string())
                .parse()
                .context("BAN_COUNT_THRESHOLD must be a valid number")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_ban_threshold_parses() {
        // The default string must survive the same parse path as env input.
        let threshold: i32 = "5".parse().unwrap();
        assert_eq!(threshold, 5);
        let _ = Config {
            database_url: "postgres://localhost/forum".into(),
            ban_count_threshold: threshold,
        };
    }
}
