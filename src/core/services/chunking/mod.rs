
mod assembly;
mod distance;
mod embed;
mod events;
mod sentences;
mod service;
mod threshold;
mod window;

pub use assembly::{assemble_chunks, breakpoints, Chunk};
pub use distance::{adjacent_distances, attach_distances, cosine_distance};
pub use embed::{embed_windows, validate_embeddings};
pub use events::{
    ChunkingCompleteEvent, ChunkingEvent, ChunkingFailedEvent, ChunkingStartedEvent,
};
pub use sentences::{split_into_sentences, text_to_sentences, Sentence};
pub use service::{ChunkingOutcome, SemanticChunker};
pub use threshold::{breakpoint_threshold, interquartile_range, mean, percentile, std_dev};
pub use window::{combine_sentences, window_text};
