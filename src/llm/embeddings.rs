use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;


#[derive(Error, Debug)]
pub enum EmbeddingError {
    #[error("Provider error: {0}")]
    Provider(String),

    #[error("Embedding request timed out after {0:?}")]
    Timeout(Duration),

    #[error("Malformed embedding: {0}")]
    Malformed(String),

    #[error("Embedding dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("Both primary and fallback failed: primary={0}, fallback={1}")]
    BothFailed(String, String),
}


#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError>;

    fn name(&self) -> &str;
}

#[async_trait]
impl EmbeddingProvider for Arc<dyn EmbeddingProvider> {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        (**self).embed(text).await
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}


type EmbedFn = dyn Fn(&str) -> Result<Vec<f32>, EmbeddingError> + Send + Sync;

/// Adapts a plain function into a provider. Handy for local models that
/// embed synchronously and for deterministic test doubles.
pub struct FnEmbeddingProvider {
    name: String,
    func: Box<EmbedFn>,
}

impl FnEmbeddingProvider {
    pub fn new<F>(name: impl Into<String>, func: F) -> Self
    where
        F: Fn(&str) -> Result<Vec<f32>, EmbeddingError> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            func: Box::new(func),
        }
    }
}

#[async_trait]
impl EmbeddingProvider for FnEmbeddingProvider {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        (self.func)(text)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl std::fmt::Debug for FnEmbeddingProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnEmbeddingProvider")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}


pub fn magnitude(vec: &[f32]) -> f64 {
    vec.iter().map(|&a| (a as f64) * (a as f64)).sum::<f64>().sqrt()
}

/// `None` when either vector has zero magnitude or the lengths differ.
pub fn cosine_similarity(vec1: &[f32], vec2: &[f32]) -> Option<f64> {
    if vec1.len() != vec2.len() {
        return None;
    }

    let dot_product: f64 = vec1
        .iter()
        .zip(vec2.iter())
        .map(|(&a, &b)| a as f64 * b as f64)
        .sum();
    let mag1 = magnitude(vec1);
    let mag2 = magnitude(vec2);

    if mag1 == 0.0 || mag2 == 0.0 {
        return None;
    }

    Some(dot_product / (mag1 * mag2))
}
