

use async_trait::async_trait;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use tracing::{debug, info};

use super::embeddings::{EmbeddingError, EmbeddingProvider};


pub struct FallbackEmbeddingProvider {
    primary: Arc<dyn EmbeddingProvider>,
    fallback: Arc<dyn EmbeddingProvider>,
    using_fallback: AtomicBool,
    fallback_count: AtomicUsize,
    primary_failures: AtomicUsize,
}

impl FallbackEmbeddingProvider {
    pub fn new(primary: Arc<dyn EmbeddingProvider>, fallback: Arc<dyn EmbeddingProvider>) -> Self {
        info!(
            "FallbackEmbeddingProvider initialized: primary={}, fallback={}",
            primary.name(),
            fallback.name()
        );

        Self {
            primary,
            fallback,
            using_fallback: AtomicBool::new(false),
            fallback_count: AtomicUsize::new(0),
            primary_failures: AtomicUsize::new(0),
        }
    }

    pub fn is_using_fallback(&self) -> bool {
        self.using_fallback.load(Ordering::SeqCst)
    }

    pub fn fallback_count(&self) -> usize {
        self.fallback_count.load(Ordering::SeqCst)
    }

    pub fn primary_failures(&self) -> usize {
        self.primary_failures.load(Ordering::SeqCst)
    }

    pub fn reset_fallback_state(&self) {
        self.using_fallback.store(false, Ordering::SeqCst);
        info!("Fallback state reset");
    }
}

#[async_trait]
impl EmbeddingProvider for FallbackEmbeddingProvider {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        match self.primary.embed(text).await {
            Ok(embedding) => {
                self.using_fallback.store(false, Ordering::SeqCst);
                Ok(embedding)
            }
            Err(primary_err) => {
                self.primary_failures.fetch_add(1, Ordering::SeqCst);
                debug!(
                    "Primary embedding provider {} unavailable, trying {}: {}",
                    self.primary.name(),
                    self.fallback.name(),
                    primary_err
                );

                let embedding = self.fallback.embed(text).await.map_err(|fallback_err| {
                    EmbeddingError::BothFailed(primary_err.to_string(), fallback_err.to_string())
                })?;

                self.using_fallback.store(true, Ordering::SeqCst);
                self.fallback_count.fetch_add(1, Ordering::SeqCst);
                Ok(embedding)
            }
        }
    }

    fn name(&self) -> &str {
        if self.is_using_fallback() {
            self.fallback.name()
        } else {
            self.primary.name()
        }
    }
}
