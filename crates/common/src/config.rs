//! Application configuration.

use serde::Deserialize;
use std::path::Path;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Database configuration.
    pub database: DatabaseConfig,
    /// Redis configuration (job queue backend).
    pub redis: RedisConfig,
    /// Classifier service configuration.
    pub classifier: ClassifierConfig,
}

/// Database connection configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// `PostgreSQL` connection URL.
    pub url: String,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Minimum number of connections in the pool.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

/// Redis configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct RedisConfig {
    /// Redis connection URL.
    pub url: String,
}

/// External text-classification service configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ClassifierConfig {
    /// Base URL of the classification service.
    pub url: String,
    /// Bearer token sent with every request.
    pub bearer_token: String,
    /// Path for aspect-based sentiment extraction.
    #[serde(default = "default_aspect_path")]
    pub aspect_path: String,
    /// Path for topic extraction.
    #[serde(default = "default_topic_path")]
    pub topic_path: String,
    /// Path for overall sentiment classification.
    #[serde(default = "default_overall_path")]
    pub overall_path: String,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            bearer_token: String::new(),
            aspect_path: default_aspect_path(),
            topic_path: default_topic_path(),
            overall_path: default_overall_path(),
        }
    }
}

const fn default_max_connections() -> u32 {
    100
}

const fn default_min_connections() -> u32 {
    5
}

fn default_aspect_path() -> String {
    "get_aspects".to_string()
}

fn default_topic_path() -> String {
    "get_topics".to_string()
}

fn default_overall_path() -> String {
    "get_overall_sentiment".to_string()
}

impl Config {
    /// Load configuration from files and environment variables.
    ///
    /// Configuration is loaded in the following order:
    /// 1. `config/default.toml`
    /// 2. `config/{environment}.toml` (based on `NOTEMOOD_ENV`)
    /// 3. Environment variables with `NOTEMOOD_` prefix
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenvy::dotenv().ok();

        let env = std::env::var("NOTEMOOD_ENV").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("NOTEMOOD")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }

    /// Load configuration from a specific file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::from(path.as_ref()))
            .add_source(
                config::Environment::with_prefix("NOTEMOOD")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn classifier_paths_default_to_original_endpoints() {
        let config: ClassifierConfig = serde_json::from_value(serde_json::json!({
            "url": "http://localhost:5000",
            "bearer_token": "secret",
        }))
        .unwrap();

        assert_eq!(config.aspect_path, "get_aspects");
        assert_eq!(config.topic_path, "get_topics");
        assert_eq!(config.overall_path, "get_overall_sentiment");
    }
}
