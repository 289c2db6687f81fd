//! In-memory LRU translation cache with TTL.
//! Key: blake3 hash of (source_code | target_code | trimmed text).
//! Session-lifetime only; nothing is persisted.

use std::num::NonZeroUsize;
use std::time::{Duration, Instant};

use lru::LruCache;
use parking_lot::Mutex;

use crate::language::Language;

struct CacheEntry {
    translated_text: String,
    inserted_at: Instant,
}

pub struct TranslationCache {
    inner: Mutex<LruCache<[u8; 32], CacheEntry>>,
    ttl: Duration,
}

impl TranslationCache {
    pub fn new(capacity: usize, ttl: Duration) -> Self {
        Self {
            inner: Mutex::new(LruCache::new(
                NonZeroUsize::new(capacity).expect("cache capacity must be > 0"),
            )),
            ttl,
        }
    }

    /// Compute the cache key for a (pair, text) combination.
    pub fn compute_key(source: Language, target: Language, text: &str) -> [u8; 32] {
        let mut hasher = blake3::Hasher::new();
        hasher.update(source.code().as_bytes());
        hasher.update(b"|");
        hasher.update(target.code().as_bytes());
        hasher.update(b"|");
        hasher.update(text.trim().as_bytes());
        *hasher.finalize().as_bytes()
    }

    /// Look up a cached translation. Returns None if absent or expired.
    pub fn get(&self, key: &[u8; 32]) -> Option<String> {
        let mut cache = self.inner.lock();
        if let Some(entry) = cache.get(key) {
            if entry.inserted_at.elapsed() < self.ttl {
                return Some(entry.translated_text.clone());
            }
            // Expired — remove it
            cache.pop(key);
        }
        None
    }

    /// Insert a translation result into the cache.
    pub fn insert(&self, key: [u8; 32], translated_text: String) {
        let mut cache = self.inner.lock();
        cache.put(
            key,
            CacheEntry {
                translated_text,
                inserted_at: Instant::now(),
            },
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_then_get_round_trips() {
        let cache = TranslationCache::new(8, Duration::from_secs(60));
        let key = TranslationCache::compute_key(Language::English, Language::Tamil, "Hello");
        assert_eq!(cache.get(&key), None);
        cache.insert(key, "வணக்கம்".into());
        assert_eq!(cache.get(&key), Some("வணக்கம்".into()));
    }

    #[test]
    fn key_separates_directions_and_texts() {
        let forward = TranslationCache::compute_key(Language::English, Language::Tamil, "Hello");
        let reverse = TranslationCache::compute_key(Language::Tamil, Language::English, "Hello");
        let other = TranslationCache::compute_key(Language::English, Language::Tamil, "Goodbye");
        assert_ne!(forward, reverse);
        assert_ne!(forward, other);
    }

    #[test]
    fn key_ignores_surrounding_whitespace() {
        let bare = TranslationCache::compute_key(Language::English, Language::Tamil, "Hello");
        let padded = TranslationCache::compute_key(Language::English, Language::Tamil, "  Hello ");
        assert_eq!(bare, padded);
    }

    #[test]
    fn expired_entries_are_dropped() {
        let cache = TranslationCache::new(8, Duration::from_millis(0));
        let key = TranslationCache::compute_key(Language::English, Language::Tamil, "Hello");
        cache.insert(key, "வணக்கம்".into());
        std::thread::sleep(Duration::from_millis(5));
        assert_eq!(cache.get(&key), None);
    }

    #[test]
    fn capacity_evicts_least_recent() {
        let cache = TranslationCache::new(1, Duration::from_secs(60));
        let first = TranslationCache::compute_key(Language::English, Language::Tamil, "one");
        let second = TranslationCache::compute_key(Language::English, Language::Tamil, "two");
        cache.insert(first, "ஒன்று".into());
        cache.insert(second, "இரண்டு".into());
        assert_eq!(cache.get(&first), None);
        assert_eq!(cache.get(&second), Some("இரண்டு".into()));
    }
}
