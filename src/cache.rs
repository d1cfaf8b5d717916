//! In-process translation cache.
//!
//! Bounded LRU keyed by (source language, target language, text). Repeated
//! requests for the same string are served from here without touching any
//! provider. Entries live for the process lifetime or until evicted by
//! capacity pressure.

use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicU64, Ordering};

use lru::LruCache;
use tokio::sync::RwLock;

const FALLBACK_CAPACITY: usize = 1000;

#[derive(Debug, Clone, Default)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub entries: usize,
}

pub struct TranslationCache {
    entries: RwLock<LruCache<String, String>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl TranslationCache {
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity)
            .unwrap_or_else(|| NonZeroUsize::new(FALLBACK_CAPACITY).expect("nonzero"));

        Self {
            entries: RwLock::new(LruCache::new(capacity)),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    fn key(text: &str, from: &str, to: &str) -> String {
        format!("{}\u{1f}{}\u{1f}{}", from, to, text)
    }

    pub async fn get(&self, text: &str, from: &str, to: &str) -> Option<String> {
        let key = Self::key(text, from, to);
        let mut entries = self.entries.write().await;

        match entries.get(&key) {
            Some(translated) => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                Some(translated.clone())
            }
            None => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                None
            }
        }
    }

    pub async fn set(&self, text: &str, from: &str, to: &str, translated: &str) {
        let key = Self::key(text, from, to);
        let mut entries = self.entries.write().await;
        entries.put(key, translated.to_string());
    }

    pub async fn stats(&self) -> CacheStats {
        let entries = self.entries.read().await;
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            entries: entries.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_miss_then_hit() {
        let cache = TranslationCache::new(16);
        assert_eq!(cache.get("Submit", "en", "hi").await, None);

        cache.set("Submit", "en", "hi", "जमा करें").await;
        assert_eq!(
            cache.get("Submit", "en", "hi").await.as_deref(),
            Some("जमा करें")
        );

        let stats = cache.stats().await;
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.entries, 1);
    }

    #[tokio::test]
    async fn test_language_pair_is_part_of_the_key() {
        let cache = TranslationCache::new(16);
        cache.set("Submit", "en", "hi", "जमा करें").await;
        assert_eq!(cache.get("Submit", "en", "ta").await, None);
        assert_eq!(cache.get("Submit", "hi", "en").await, None);
    }

    #[tokio::test]
    async fn test_capacity_evicts_oldest() {
        let cache = TranslationCache::new(2);
        cache.set("a", "en", "hi", "1").await;
        cache.set("b", "en", "hi", "2").await;
        cache.set("c", "en", "hi", "3").await;

        assert_eq!(cache.get("a", "en", "hi").await, None);
        assert_eq!(cache.get("c", "en", "hi").await.as_deref(), Some("3"));
    }

    #[tokio::test]
    async fn test_zero_capacity_falls_back() {
        let cache = TranslationCache::new(0);
        cache.set("a", "en", "hi", "1").await;
        assert_eq!(cache.get("a", "en", "hi").await.as_deref(), Some("1"));
    }
}
