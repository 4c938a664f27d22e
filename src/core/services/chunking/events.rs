

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;
use uuid::Uuid;

use crate::core::config::BreakpointMethod;


#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkingStartedEvent {
    pub run_id: Uuid,
    pub content_length: usize,
    pub sentence_count: usize,
    pub method: BreakpointMethod,
    pub amount: f64,
    pub buffer_size: usize,
    pub provider: String,
    pub started_at: DateTime<Utc>,
}


#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkingCompleteEvent {
    pub run_id: Uuid,
    pub sentence_count: usize,
    pub chunk_count: usize,
    pub breakpoint_count: usize,
    pub threshold: Option<f64>,
    pub duration_ms: f64,
    pub finished_at: DateTime<Utc>,
}


#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkingFailedEvent {
    pub run_id: Uuid,
    pub stage: String,
    pub error: String,
    pub failed_at: DateTime<Utc>,
}


#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ChunkingEvent {
    Started(ChunkingStartedEvent),
    Complete(ChunkingCompleteEvent),
    Failed(ChunkingFailedEvent),
}

impl ChunkingEvent {
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::Started(_) => "chunking.started",
            Self::Complete(_) => "chunking.complete",
            Self::Failed(_) => "chunking.failed",
        }
    }

    pub fn run_id(&self) -> Uuid {
        match self {
            Self::Started(e) => e.run_id,
            Self::Complete(e) => e.run_id,
            Self::Failed(e) => e.run_id,
        }
    }

    pub fn payload(&self) -> Value {
        let payload = match self {
            Self::Started(e) => serde_json::to_value(e),
            Self::Complete(e) => serde_json::to_value(e),
            Self::Failed(e) => serde_json::to_value(e),
        };
        match payload {
            Ok(value) => value,
            Err(e) => {
                warn!("Failed to serialize {} payload: {}", self.event_type(), e);
                Value::Null
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_shape() {
        let event = ChunkingEvent::Failed(ChunkingFailedEvent {
            run_id: Uuid::new_v4(),
            stage: "embedding".to_string(),
            error: "boom".to_string(),
            failed_at: Utc::now(),
        });

        assert_eq!(event.event_type(), "chunking.failed");
        let payload = event.payload();
        assert_eq!(payload["stage"], "embedding");
        assert_eq!(payload["run_id"], event.run_id().to_string());
    }

    #[test]
    fn test_payload_keeps_non_finite_threshold_as_object() {
        let event = ChunkingEvent::Complete(ChunkingCompleteEvent {
            run_id: Uuid::nil(),
            sentence_count: 2,
            chunk_count: 1,
            breakpoint_count: 0,
            threshold: Some(f64::NAN),
            duration_ms: 0.5,
            finished_at: Utc::now(),
        });
        let payload = event.payload();
        assert!(payload.is_object());
        assert_eq!(payload["chunk_count"], 1);
        assert!(payload["threshold"].is_null());
    }

    #[test]
    fn test_tagged_serialization() {
        let event = ChunkingEvent::Complete(ChunkingCompleteEvent {
            run_id: Uuid::new_v4(),
            sentence_count: 4,
            chunk_count: 2,
            breakpoint_count: 1,
            threshold: Some(0.825),
            duration_ms: 1.0,
            finished_at: Utc::now(),
        });
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "complete");
        assert_eq!(json["chunk_count"], 2);
    }

    #[test]
    fn test_method_serializes_snake_case() {
        let event = ChunkingStartedEvent {
            run_id: Uuid::nil(),
            content_length: 10,
            sentence_count: 2,
            method: BreakpointMethod::StandardDeviation,
            amount: 3.0,
            buffer_size: 1,
            provider: "stub".to_string(),
            started_at: Utc::now(),
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["method"], "standard_deviation");
    }
}
