

pub mod chunking;

pub use chunking::{ChunkingEvent, ChunkingOutcome, SemanticChunker};
