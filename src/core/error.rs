

use thiserror::Error;

use crate::llm::embeddings::EmbeddingError;


#[derive(Error, Debug)]
pub enum ChunkerError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Embedding provider failed for sentence {index}: {source}")]
    EmbeddingProvider {
        index: usize,
        #[source]
        source: EmbeddingError,
    },

    #[error("Degenerate distance between sentence {index} and the next one: zero-magnitude embedding")]
    DegenerateDistance { index: usize },

    #[error("Configuration source error: {0}")]
    ConfigSource(#[from] config::ConfigError),
}

impl ChunkerError {
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfiguration(message.into())
    }

    pub fn provider(index: usize, source: EmbeddingError) -> Self {
        Self::EmbeddingProvider { index, source }
    }


    pub fn stage(&self) -> &'static str {
        match self {
            Self::InvalidConfiguration(_) | Self::ConfigSource(_) => "configuration",
            Self::EmbeddingProvider { .. } => "embedding",
            Self::DegenerateDistance { .. } => "distance",
        }
    }
}


pub type Result<T> = std::result::Result<T, ChunkerError>;
