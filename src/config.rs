use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{AnuvadError, Result};

fn default_cache_capacity() -> usize {
    10_000
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub providers: ProvidersConfig,
    pub cache: CacheConfig,
    pub limits: LimitsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Address to bind the HTTP listener to
    pub host: String,
    /// Port for the HTTP listener
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProvidersConfig {
    /// Provider names in fallback priority order
    pub priority: Vec<String>,
    /// Per-provider HTTP request deadline (seconds)
    pub request_timeout_secs: u64,
    /// LibreTranslate endpoint URL
    pub libretranslate_endpoint: String,
    /// Backoff before surfacing an HTTP 429 failure (seconds)
    pub rate_limited_backoff_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Maximum number of cached translations kept in memory
    #[serde(default = "default_cache_capacity")]
    pub capacity: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LimitsConfig {
    /// Consecutive failures before a provider's circuit opens
    pub breaker_failure_threshold: u32,
    /// How long an open circuit stays open (seconds)
    pub breaker_open_secs: u64,
    /// Minimum spacing between calls to the same provider (milliseconds)
    pub min_call_interval_ms: u64,
    /// Longest text handed to a provider; longer inputs are truncated
    pub max_text_chars: usize,
    /// Maximum items processed per batch request
    pub max_batch_items: usize,
    /// Pacing delay between batch items (milliseconds)
    pub batch_item_delay_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 8787,
            },
            providers: ProvidersConfig {
                priority: vec![
                    "google".to_string(),
                    "libretranslate".to_string(),
                    "mymemory".to_string(),
                ],
                request_timeout_secs: 10,
                libretranslate_endpoint: "https://libretranslate.com".to_string(),
                rate_limited_backoff_secs: 60,
            },
            cache: CacheConfig {
                capacity: default_cache_capacity(),
            },
            limits: LimitsConfig {
                breaker_failure_threshold: 5,
                breaker_open_secs: 300,
                min_call_interval_ms: 1000,
                max_text_chars: 5000,
                max_batch_items: 10,
                batch_item_delay_ms: 500,
            },
        }
    }
}

impl Config {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| AnuvadError::Config(format!("Failed to read config file: {}", e)))?;

        toml::from_str(&content)
            .map_err(|e| AnuvadError::Config(format!("Failed to parse config file: {}", e)))
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| AnuvadError::Config(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, content)
            .map_err(|e| AnuvadError::Config(format!("Failed to write config file: {}", e)))?;

        Ok(())
    }
}
