

pub mod core;
pub mod llm;
pub mod utils;


pub use crate::core::config::{BreakpointMethod, ChunkerConfig, ChunkerSettings};
pub use crate::core::error::{ChunkerError, Result};
pub use crate::core::services::chunking::{
    Chunk, ChunkingEvent, ChunkingOutcome, SemanticChunker, Sentence, split_into_sentences,
};
pub use llm::embeddings::{EmbeddingError, EmbeddingProvider, FnEmbeddingProvider};
pub use llm::{CachedEmbeddingProvider, FallbackEmbeddingProvider};


pub const DEFAULT_BUFFER_SIZE: usize = crate::core::config::DEFAULT_BUFFER_SIZE;


pub const DEFAULT_MAX_CONCURRENCY: usize = crate::core::config::DEFAULT_MAX_CONCURRENCY;
