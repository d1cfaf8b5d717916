//! Translation orchestration.
//!
//! The service owns the cache and the provider chain, where every provider is
//! paired with its own circuit breaker and rate limiter. Resolution order for
//! a single translation: cache, identity short-circuit, then the providers in
//! priority order until one succeeds. Exhaustion degrades to returning the
//! input unchanged; for UI text an untranslated string beats an error page,
//! so `translate` never fails.

use std::borrow::Cow;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use crate::breaker::CircuitBreaker;
use crate::cache::{CacheStats, TranslationCache};
use crate::config::{Config, LimitsConfig};
use crate::error::Result;
use crate::limiter::RateLimiter;
use crate::provider::{build_provider_chain, Translator};

/// Outcome of a single translation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Translation {
    pub text: String,
    /// Name of the provider that produced the text, or "cache", "none",
    /// "fallback"
    pub provider: String,
    pub cached: bool,
}

/// Snapshot of one provider's health, for the status surfaces
#[derive(Debug, Clone)]
pub struct ProviderStatus {
    pub name: String,
    pub configured: bool,
    pub circuit_open: bool,
    pub failures: u32,
}

struct ProviderSlot {
    provider: Arc<dyn Translator>,
    breaker: CircuitBreaker,
    limiter: RateLimiter,
}

pub struct TranslationService {
    slots: Vec<ProviderSlot>,
    cache: TranslationCache,
    limits: LimitsConfig,
}

impl TranslationService {
    pub fn new(config: &Config) -> Result<Self> {
        let providers = build_provider_chain(&config.providers)?;
        Ok(Self::with_providers(
            providers,
            config.limits.clone(),
            config.cache.capacity,
        ))
    }

    /// Assemble a service around an explicit provider list. Tests use this
    /// with mock providers; `new` uses it with the configured chain.
    pub fn with_providers(
        providers: Vec<Arc<dyn Translator>>,
        limits: LimitsConfig,
        cache_capacity: usize,
    ) -> Self {
        let slots = providers
            .into_iter()
            .map(|provider| ProviderSlot {
                breaker: CircuitBreaker::new(
                    limits.breaker_failure_threshold,
                    Duration::from_secs(limits.breaker_open_secs),
                ),
                limiter: RateLimiter::new(Duration::from_millis(limits.min_call_interval_ms)),
                provider,
            })
            .collect();

        Self {
            slots,
            cache: TranslationCache::new(cache_capacity),
            limits,
        }
    }

    /// Translate a single text. Never fails: when no provider can serve the
    /// request the original text comes back with provider "fallback".
    pub async fn translate(&self, text: &str, from: &str, to: &str) -> Translation {
        if let Some(cached) = self.cache.get(text, from, to).await {
            return Translation {
                text: cached,
                provider: "cache".to_string(),
                cached: true,
            };
        }

        if from == to {
            return Translation {
                text: text.to_string(),
                provider: "none".to_string(),
                cached: false,
            };
        }

        let prepared = self.truncate(text);

        for slot in &self.slots {
            let name = slot.provider.name();

            if slot.breaker.is_open() {
                debug!("Skipping provider '{}': circuit open", name);
                continue;
            }

            slot.limiter.wait_if_needed().await;

            match slot.provider.translate(&prepared, from, to).await {
                Ok(translated) => {
                    slot.breaker.record_success();
                    self.cache.set(text, from, to, &translated).await;
                    return Translation {
                        text: translated,
                        provider: name.to_string(),
                        cached: false,
                    };
                }
                Err(e) => {
                    slot.breaker.record_failure();
                    warn!("Provider '{}' failed: {}", name, e);
                }
            }
        }

        // Cache the identity result too, so a string that no provider can
        // handle does not retrigger the whole chain on every request.
        self.cache.set(text, from, to, text).await;
        Translation {
            text: text.to_string(),
            provider: "fallback".to_string(),
            cached: false,
        }
    }

    /// Translate a batch of texts sequentially with a pacing delay between
    /// items. Input beyond the batch cap is dropped. A failed item degrades
    /// to its original text instead of aborting the batch.
    pub async fn batch_translate(
        &self,
        texts: &[String],
        from: &str,
        to: &str,
    ) -> HashMap<String, String> {
        if texts.len() > self.limits.max_batch_items {
            warn!(
                "Batch of {} items capped at {}; extra items dropped",
                texts.len(),
                self.limits.max_batch_items
            );
        }

        let delay = Duration::from_millis(self.limits.batch_item_delay_ms);
        let mut results = HashMap::new();

        for (i, text) in texts.iter().take(self.limits.max_batch_items).enumerate() {
            if i > 0 && !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }

            let translation = self.translate(text, from, to).await;
            results.insert(text.clone(), translation.text);
        }

        results
    }

    pub fn provider_status(&self) -> Vec<ProviderStatus> {
        self.slots
            .iter()
            .map(|slot| ProviderStatus {
                name: slot.provider.name().to_string(),
                configured: slot.provider.is_configured(),
                circuit_open: slot.breaker.is_open(),
                failures: slot.breaker.failure_count(),
            })
            .collect()
    }

    pub async fn cache_stats(&self) -> CacheStats {
        self.cache.stats().await
    }

    fn truncate<'a>(&self, text: &'a str) -> Cow<'a, str> {
        if text.chars().count() > self.limits.max_text_chars {
            warn!(
                "Input of {} chars truncated to {}",
                text.chars().count(),
                self.limits.max_text_chars
            );
            Cow::Owned(text.chars().take(self.limits.max_text_chars).collect())
        } else {
            Cow::Borrowed(text)
        }
    }
}
