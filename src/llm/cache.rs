use async_trait::async_trait;
use lru::LruCache;
use parking_lot::Mutex;
use sha2::{Digest, Sha256};
use std::num::NonZeroUsize;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};
use tracing::{debug, info};

use super::embeddings::{EmbeddingError, EmbeddingProvider};

pub const DEFAULT_CACHE_SIZE: usize = 1000;

pub const DEFAULT_CACHE_TTL: u64 = 300;


#[derive(Debug, Default, Clone, PartialEq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub size: usize,
    pub hit_rate: f64,
}


pub struct CachedEmbeddingProvider {
    inner: Arc<dyn EmbeddingProvider>,
    cache: Mutex<LruCache<String, (Vec<f32>, Instant)>>,
    ttl: Duration,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl CachedEmbeddingProvider {
    pub fn new(inner: Arc<dyn EmbeddingProvider>) -> Self {
        Self::with_capacity(inner, DEFAULT_CACHE_SIZE, DEFAULT_CACHE_TTL)
    }

    pub fn with_capacity(inner: Arc<dyn EmbeddingProvider>, capacity: usize, ttl_secs: u64) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);

        info!(
            "CachedEmbeddingProvider initialized: inner={}, capacity={}, ttl={}s",
            inner.name(),
            capacity,
            ttl_secs
        );

        Self {
            inner,
            cache: Mutex::new(LruCache::new(capacity)),
            ttl: Duration::from_secs(ttl_secs),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    fn make_key(text: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(text.as_bytes());
        format!("{:x}", hasher.finalize())
    }

    fn lookup(&self, key: &str) -> Option<Vec<f32>> {
        let mut cache = self.cache.lock();
        let fresh = cache
            .get(key)
            .map(|(embedding, created_at)| (embedding.clone(), created_at.elapsed() < self.ttl));

        match fresh {
            Some((embedding, true)) => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                Some(embedding)
            }
            Some((_, false)) => {
                cache.pop(key);
                self.misses.fetch_add(1, Ordering::Relaxed);
                None
            }
            None => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                None
            }
        }
    }

    pub fn stats(&self) -> CacheStats {
        let hits = self.hits.load(Ordering::Relaxed);
        let misses = self.misses.load(Ordering::Relaxed);
        let total = hits + misses;
        let hit_rate = if total > 0 { hits as f64 / total as f64 } else { 0.0 };

        CacheStats {
            hits,
            misses,
            size: self.cache.lock().len(),
            hit_rate,
        }
    }

    pub fn clear(&self) {
        self.cache.lock().clear();
        self.hits.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
        info!("Embedding cache cleared");
    }
}

#[async_trait]
impl EmbeddingProvider for CachedEmbeddingProvider {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        let key = Self::make_key(text);

        if let Some(cached) = self.lookup(&key) {
            debug!("Cache HIT for: {}", crate::utils::preview(text, 50));
            return Ok(cached);
        }

        // Lock is not held across the await; concurrent misses on the same
        // text may both reach the inner provider.
        let embedding = self.inner.embed(text).await?;
        self.cache.lock().put(key, (embedding.clone(), Instant::now()));
        Ok(embedding)
    }

    fn name(&self) -> &str {
        self.inner.name()
    }
}
