use serde::Deserialize;
use std::env;
use std::sync::OnceLock;
use thiserror::Error;

/// Errors encountered while loading configuration from environment variables.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Required environment variable was not provided.
    #[error("Missing environment variable: {0}")]
    MissingVariable(String),
    /// Environment variable contained a value that could not be parsed.
    #[error("Invalid value for environment variable: {0}")]
    InvalidValue(String),
    /// Minimum word bound exceeds the maximum word bound.
    #[error("SUMMARY_MIN_WORDS ({min}) must not exceed SUMMARY_MAX_WORDS ({max})")]
    InvertedBounds {
        /// Configured minimum summary length in words.
        min: usize,
        /// Configured maximum summary length in words.
        max: usize,
    },
}

/// Default minimum summary length in words when no override is set.
pub const DEFAULT_MIN_WORDS: usize = 30;
/// Default maximum summary length in words when no override is set.
pub const DEFAULT_MAX_WORDS: usize = 1000;
/// Default request body cap for uploads (10 MiB).
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Runtime configuration for the docbrief server.
#[derive(Debug, Deserialize)]
pub struct Config {
    /// Model identifier passed to the summarization provider.
    pub summary_model: String,
    /// Optional base URL of the Ollama runtime (defaults applied by the adapter).
    pub ollama_url: Option<String>,
    /// Minimum summary length requested from the model, in words.
    pub summary_min_words: usize,
    /// Maximum summary length requested from the model, in words.
    pub summary_max_words: usize,
    /// Upper bound on accepted upload body size, in bytes.
    pub max_upload_bytes: usize,
    /// Optional override for the HTTP server port.
    pub server_port: Option<u16>,
}

impl Config {
    /// Load configuration from environment variables, performing validation along the way.
    pub fn from_env() -> Result<Self, ConfigError> {
        let summary_min_words =
            load_env_parsed("SUMMARY_MIN_WORDS")?.unwrap_or(DEFAULT_MIN_WORDS);
        let summary_max_words =
            load_env_parsed("SUMMARY_MAX_WORDS")?.unwrap_or(DEFAULT_MAX_WORDS);
        if summary_min_words > summary_max_words {
            return Err(ConfigError::InvertedBounds {
                min: summary_min_words,
                max: summary_max_words,
            });
        }

        Ok(Self {
            summary_model: load_env("SUMMARY_MODEL")?,
            ollama_url: load_env_optional("OLLAMA_URL"),
            summary_min_words,
            summary_max_words,
            max_upload_bytes: load_env_parsed("MAX_UPLOAD_BYTES")?
                .unwrap_or(DEFAULT_MAX_UPLOAD_BYTES),
            server_port: load_env_parsed("SERVER_PORT")?,
        })
    }
}

fn load_env(key: &str) -> Result<String, ConfigError> {
    env::var(key).map_err(|_| ConfigError::MissingVariable(key.to_string()))
}

fn load_env_optional(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

fn load_env_parsed<T: std::str::FromStr>(key: &str) -> Result<Option<T>, ConfigError> {
    load_env_optional(key)
        .map(|value| {
            value
                .parse()
                .map_err(|_| ConfigError::InvalidValue(key.to_string()))
        })
        .transpose()
}

/// Global configuration cache populated during process start.
pub static CONFIG: OnceLock<Config> = OnceLock::new();

/// Retrieve the loaded configuration, panicking if initialization has not occurred.
pub fn get_config() -> &'static Config {
    CONFIG.get().expect("Config not initialized")
}

/// Load configuration from the environment and install it in the global cache.
pub fn init_config() {
    dotenvy::dotenv().ok();
    let config = Config::from_env().expect("Failed to load config from environment");
    tracing::debug!(
        model = %config.summary_model,
        ollama_url = ?config.ollama_url,
        min_words = config.summary_min_words,
        max_words = config.summary_max_words,
        server_port = ?config.server_port,
        "Loaded configuration"
    );
    CONFIG.set(config).expect("Failed to set config");
}
