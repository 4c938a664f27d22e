

pub mod config;
pub mod error;

pub mod services;

pub use self::config::{BreakpointMethod, ChunkerConfig, ChunkerSettings};
pub use error::{ChunkerError, Result};


pub use services::chunking::{
    Chunk, ChunkingCompleteEvent, ChunkingEvent, ChunkingFailedEvent, ChunkingOutcome,
    ChunkingStartedEvent, SemanticChunker, Sentence, split_into_sentences,
};
