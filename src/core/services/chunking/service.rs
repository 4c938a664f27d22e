

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::assembly::{assemble_chunks, breakpoints, Chunk};
use super::distance::{adjacent_distances, attach_distances};
use super::embed::embed_windows;
use super::events::{
    ChunkingCompleteEvent, ChunkingEvent, ChunkingFailedEvent, ChunkingStartedEvent,
};
use super::sentences::{text_to_sentences, Sentence};
use super::threshold::breakpoint_threshold;
use super::window::combine_sentences;
use crate::core::config::ChunkerConfig;
use crate::core::error::Result;
use crate::llm::embeddings::EmbeddingProvider;
use crate::utils::preview;


#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChunkingOutcome {
    pub sentences: Vec<Sentence>,
    pub distances: Vec<f64>,
    pub threshold: Option<f64>,
    pub breakpoints: Vec<usize>,
    pub chunks: Vec<Chunk>,
}

impl ChunkingOutcome {
    fn trivial(sentences: Vec<Sentence>) -> Self {
        let chunks = assemble_chunks(&sentences, &[]);
        Self {
            sentences,
            distances: Vec::new(),
            threshold: None,
            breakpoints: Vec::new(),
            chunks,
        }
    }

    pub fn chunk_texts(&self) -> Vec<String> {
        self.chunks.iter().map(|c| c.text.clone()).collect()
    }

    pub fn into_chunk_texts(self) -> Vec<String> {
        self.chunks.into_iter().map(|c| c.text).collect()
    }
}


pub struct SemanticChunker {
    provider: Arc<dyn EmbeddingProvider>,
    config: ChunkerConfig,
    event_tx: Option<mpsc::Sender<ChunkingEvent>>,
}

impl SemanticChunker {
    pub fn new(provider: Arc<dyn EmbeddingProvider>, config: ChunkerConfig) -> Self {
        info!(
            "SemanticChunker initialized: provider={}, method={}, amount={}, buffer_size={}",
            provider.name(),
            config.method().as_ref(),
            config.amount(),
            config.buffer_size()
        );

        Self {
            provider,
            config,
            event_tx: None,
        }
    }

    pub fn with_event_sender(mut self, tx: mpsc::Sender<ChunkingEvent>) -> Self {
        self.event_tx = Some(tx);
        self
    }

    pub fn config(&self) -> &ChunkerConfig {
        &self.config
    }

    pub async fn chunk(&self, text: &str) -> Result<Vec<String>> {
        Ok(self.chunk_detailed(text).await?.into_chunk_texts())
    }

    /// Runs the full pipeline and keeps every intermediate: sentence units
    /// with windows, embeddings and distances, the threshold, and the cuts.
    ///
    /// Fewer than two sentences short-circuit before any embedding call.
    pub async fn chunk_detailed(&self, text: &str) -> Result<ChunkingOutcome> {
        let start_time = Instant::now();
        let run_id = Uuid::new_v4();

        let mut sentences = text_to_sentences(text);
        debug!(
            "Split {} chars into {} sentences: {}",
            text.len(),
            sentences.len(),
            preview(text, 60)
        );

        self.emit_event(ChunkingEvent::Started(ChunkingStartedEvent {
            run_id,
            content_length: text.len(),
            sentence_count: sentences.len(),
            method: self.config.method(),
            amount: self.config.amount(),
            buffer_size: self.config.buffer_size(),
            provider: self.provider.name().to_string(),
            started_at: Utc::now(),
        }))
        .await;

        let outcome = if sentences.len() < 2 {
            Ok(ChunkingOutcome::trivial(sentences))
        } else {
            combine_sentences(&mut sentences, self.config.buffer_size());
            self.run_pipeline(sentences).await
        };

        match outcome {
            Ok(outcome) => {
                let duration_ms = start_time.elapsed().as_secs_f64() * 1000.0;
                debug!(
                    "Chunking finished: {} sentences -> {} chunks in {:.1}ms",
                    outcome.sentences.len(),
                    outcome.chunks.len(),
                    duration_ms
                );

                self.emit_event(ChunkingEvent::Complete(ChunkingCompleteEvent {
                    run_id,
                    sentence_count: outcome.sentences.len(),
                    chunk_count: outcome.chunks.len(),
                    breakpoint_count: outcome.breakpoints.len(),
                    threshold: outcome.threshold,
                    duration_ms,
                    finished_at: Utc::now(),
                }))
                .await;

                Ok(outcome)
            }
            Err(e) => {
                warn!("Chunking failed at {} stage: {}", e.stage(), e);

                self.emit_event(ChunkingEvent::Failed(ChunkingFailedEvent {
                    run_id,
                    stage: e.stage().to_string(),
                    error: e.to_string(),
                    failed_at: Utc::now(),
                }))
                .await;

                Err(e)
            }
        }
    }

    async fn run_pipeline(&self, mut sentences: Vec<Sentence>) -> Result<ChunkingOutcome> {
        let windows: Vec<String> = sentences
            .iter()
            .map(|s| s.combined_text.clone().unwrap_or_else(|| s.text.clone()))
            .collect();

        let embeddings = embed_windows(
            self.provider.as_ref(),
            &windows,
            self.config.max_concurrency(),
            self.config.embedding_timeout(),
        )
        .await?;

        let distances = adjacent_distances(&embeddings)?;
        debug!("Computed {} distances", distances.len());

        for (sentence, embedding) in sentences.iter_mut().zip(embeddings) {
            sentence.embedding = Some(embedding);
        }
        attach_distances(&mut sentences, &distances);

        let threshold = breakpoint_threshold(&distances, self.config.method(), self.config.amount());
        let cuts = breakpoints(&distances, threshold);
        debug!("Threshold {:.4} -> {} breakpoints", threshold, cuts.len());

        let chunks = assemble_chunks(&sentences, &cuts);

        Ok(ChunkingOutcome {
            sentences,
            distances,
            threshold: Some(threshold),
            breakpoints: cuts,
            chunks,
        })
    }

    async fn emit_event(&self, event: ChunkingEvent) {
        if let Some(ref tx) = self.event_tx {
            if let Err(e) = tx.send(event).await {
                warn!("Failed to emit chunking event: {}", e);
            }
        }
    }
}
