

pub mod cache;
pub mod embeddings;
pub mod fallback;

pub use cache::{CacheStats, CachedEmbeddingProvider};
pub use embeddings::{cosine_similarity, EmbeddingError, EmbeddingProvider, FnEmbeddingProvider};
pub use fallback::FallbackEmbeddingProvider;
