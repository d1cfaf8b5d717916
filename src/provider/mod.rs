// Translation provider adapters
//
// Each adapter wraps one external translation API behind the same contract:
// - Google: Google Cloud Translation v2 (API key)
// - Libre: LibreTranslate (self-hosted or hosted endpoint, optional API key)
// - MyMemory: MyMemory free tier (contact email raises the daily quota)
//
// Adapters make a single attempt per invocation. Retry, fallback ordering,
// circuit breaking and rate limiting all live in the service layer.

pub mod google;
pub mod libre;
pub mod mymemory;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use crate::config::ProvidersConfig;
use crate::error::{AnuvadError, Result};

pub use google::GoogleTranslator;
pub use libre::LibreTranslator;
pub use mymemory::MyMemoryTranslator;

/// Uniform contract over external translation APIs
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Translator: Send + Sync {
    /// Stable provider name, used as the breaker/limiter key and reported
    /// in responses
    fn name(&self) -> &'static str;

    /// Whether the provider's credential was found at startup
    fn is_configured(&self) -> bool;

    /// Translate text between two language codes. Language codes are passed
    /// through to the provider unvalidated.
    async fn translate(&self, text: &str, from: &str, to: &str) -> Result<String>;
}

/// Build the reqwest client shared by an adapter, with the per-request
/// deadline from configuration
pub(crate) fn build_http_client(config: &ProvidersConfig) -> Client {
    Client::builder()
        .timeout(Duration::from_secs(config.request_timeout_secs))
        .build()
        .expect("HTTP client creation should not fail")
}

/// Instantiate the provider chain in the configured priority order
pub fn build_provider_chain(config: &ProvidersConfig) -> Result<Vec<Arc<dyn Translator>>> {
    let mut chain: Vec<Arc<dyn Translator>> = Vec::with_capacity(config.priority.len());

    for name in &config.priority {
        match name.as_str() {
            "google" => chain.push(Arc::new(GoogleTranslator::new(config))),
            "libretranslate" => chain.push(Arc::new(LibreTranslator::new(config))),
            "mymemory" => chain.push(Arc::new(MyMemoryTranslator::new(config))),
            other => {
                return Err(AnuvadError::Config(format!(
                    "Unknown provider '{}' in priority list. Valid providers: google, libretranslate, mymemory",
                    other
                )));
            }
        }
    }

    Ok(chain)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    #[test]
    fn test_chain_follows_priority_order() {
        let mut config = Config::default().providers;
        config.priority = vec!["mymemory".to_string(), "google".to_string()];

        let chain = build_provider_chain(&config).unwrap();
        assert_eq!(chain.len(), 2);
        assert_eq!(chain[0].name(), "mymemory");
        assert_eq!(chain[1].name(), "google");
    }

    #[test]
    fn test_unknown_provider_is_rejected() {
        let mut config = Config::default().providers;
        config.priority = vec!["bing".to_string()];

        let err = build_provider_chain(&config).err().unwrap();
        assert!(err.to_string().contains("bing"));
    }
}
