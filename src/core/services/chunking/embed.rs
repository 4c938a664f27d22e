use futures::stream::{self, StreamExt, TryStreamExt};
use std::time::Duration;
use tracing::debug;

use crate::core::error::{ChunkerError, Result};
use crate::llm::embeddings::{EmbeddingError, EmbeddingProvider};


/// Embeds every window with at most `max_concurrency` calls in flight.
///
/// Output index `i` always belongs to `windows[i]`, whatever order the
/// provider answers in. The first failure, including a malformed vector,
/// aborts the whole batch and no further calls are started.
pub async fn embed_windows(
    provider: &dyn EmbeddingProvider,
    windows: &[String],
    max_concurrency: usize,
    timeout: Option<Duration>,
) -> Result<Vec<Vec<f32>>> {
    stream::iter(windows.iter().enumerate())
        .map(|(index, window)| async move {
            let embedding = embed_one(provider, window, timeout)
                .await
                .map_err(|e| ChunkerError::provider(index, e))?;
            check_components(index, &embedding)?;
            debug!("Sentence {} embedded (dims={})", index, embedding.len());
            Ok::<_, ChunkerError>((index, embedding))
        })
        .buffered(max_concurrency.max(1))
        .try_fold(
            Vec::with_capacity(windows.len()),
            |mut embeddings: Vec<Vec<f32>>, (index, embedding)| async move {
                if let Some(first) = embeddings.first() {
                    check_dimension(index, first.len(), &embedding)?;
                }
                embeddings.push(embedding);
                Ok::<_, ChunkerError>(embeddings)
            },
        )
        .await
}

async fn embed_one(
    provider: &dyn EmbeddingProvider,
    text: &str,
    timeout: Option<Duration>,
) -> std::result::Result<Vec<f32>, EmbeddingError> {
    match timeout {
        Some(limit) => tokio::time::timeout(limit, provider.embed(text))
            .await
            .map_err(|_| EmbeddingError::Timeout(limit))?,
        None => provider.embed(text).await,
    }
}

fn check_components(index: usize, embedding: &[f32]) -> Result<()> {
    if embedding.is_empty() {
        return Err(ChunkerError::provider(
            index,
            EmbeddingError::Malformed("empty vector".to_string()),
        ));
    }
    if let Some(pos) = embedding.iter().position(|v| !v.is_finite()) {
        return Err(ChunkerError::provider(
            index,
            EmbeddingError::Malformed(format!("non-finite component at position {}", pos)),
        ));
    }
    Ok(())
}

fn check_dimension(index: usize, expected: usize, embedding: &[f32]) -> Result<()> {
    if embedding.len() != expected {
        return Err(ChunkerError::provider(
            index,
            EmbeddingError::DimensionMismatch {
                expected,
                actual: embedding.len(),
            },
        ));
    }
    Ok(())
}


pub fn validate_embeddings(embeddings: &[Vec<f32>]) -> Result<()> {
    let Some(first) = embeddings.first() else {
        return Ok(());
    };
    let expected = first.len();

    for (index, embedding) in embeddings.iter().enumerate() {
        if !embedding.is_empty() {
            check_dimension(index, expected, embedding)?;
        }
        check_components(index, embedding)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::embeddings::FnEmbeddingProvider;
    use async_trait::async_trait;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct SlowFirst;

    #[async_trait]
    impl EmbeddingProvider for SlowFirst {
        async fn embed(&self, text: &str) -> std::result::Result<Vec<f32>, EmbeddingError> {
            let n: u64 = text.trim_start_matches('w').parse().unwrap();
            tokio::time::sleep(Duration::from_millis(40 - n * 10)).await;
            Ok(vec![n as f32, 1.0])
        }

        fn name(&self) -> &str {
            "slow-first"
        }
    }

    fn windows(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("w{}", i)).collect()
    }

    #[tokio::test]
    async fn test_order_preserved_under_concurrency() {
        let embeddings = embed_windows(&SlowFirst, &windows(4), 4, None).await.unwrap();
        let firsts: Vec<f32> = embeddings.iter().map(|e| e[0]).collect();
        assert_eq!(firsts, vec![0.0, 1.0, 2.0, 3.0]);
    }

    #[tokio::test]
    async fn test_sequential() {
        let embeddings = embed_windows(&SlowFirst, &windows(3), 1, None).await.unwrap();
        assert_eq!(embeddings.len(), 3);
        assert_eq!(embeddings[2], vec![2.0, 1.0]);
    }

    #[tokio::test]
    async fn test_provider_error_names_index() {
        let provider = FnEmbeddingProvider::new("picky", |text: &str| {
            if text == "w2" {
                Err(EmbeddingError::Provider("boom".to_string()))
            } else {
                Ok(vec![1.0, 0.0])
            }
        });
        let err = embed_windows(&provider, &windows(4), 2, None).await.unwrap_err();
        assert!(matches!(
            err,
            ChunkerError::EmbeddingProvider { index: 2, source: EmbeddingError::Provider(_) }
        ));
    }

    #[tokio::test]
    async fn test_timeout_is_provider_failure() {
        let err = embed_windows(&SlowFirst, &windows(1), 1, Some(Duration::from_millis(5)))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ChunkerError::EmbeddingProvider { index: 0, source: EmbeddingError::Timeout(_) }
        ));
    }

    #[tokio::test]
    async fn test_dimension_mismatch() {
        let provider = FnEmbeddingProvider::new("ragged", |text: &str| {
            Ok(vec![1.0; if text == "w1" { 3 } else { 2 }])
        });
        let err = embed_windows(&provider, &windows(3), 1, None).await.unwrap_err();
        assert!(matches!(
            err,
            ChunkerError::EmbeddingProvider {
                index: 1,
                source: EmbeddingError::DimensionMismatch { expected: 2, actual: 3 }
            }
        ));
    }

    #[tokio::test]
    async fn test_malformed_first_vector_stops_further_calls() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let provider = FnEmbeddingProvider::new("nan-first", move |text: &str| {
            counter.fetch_add(1, Ordering::SeqCst);
            if text == "w0" {
                Ok(vec![f32::NAN, 1.0])
            } else {
                Ok(vec![1.0, 0.0])
            }
        });

        let err = embed_windows(&provider, &windows(200), 4, None).await.unwrap_err();
        assert!(matches!(
            err,
            ChunkerError::EmbeddingProvider { index: 0, source: EmbeddingError::Malformed(_) }
        ));
        assert!(calls.load(Ordering::SeqCst) <= 4, "made {} calls", calls.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_dimension_mismatch_stops_further_calls() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let provider = FnEmbeddingProvider::new("short-second", move |text: &str| {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(vec![1.0; if text == "w1" { 1 } else { 2 }])
        });

        let err = embed_windows(&provider, &windows(100), 1, None).await.unwrap_err();
        assert!(matches!(
            err,
            ChunkerError::EmbeddingProvider {
                index: 1,
                source: EmbeddingError::DimensionMismatch { expected: 2, actual: 1 }
            }
        ));
        assert!(calls.load(Ordering::SeqCst) <= 3);
    }

    #[test]
    fn test_validate_rejects_empty_and_nan() {
        assert!(validate_embeddings(&[]).is_ok());
        assert!(validate_embeddings(&[vec![]]).is_err());
        assert!(validate_embeddings(&[vec![1.0], vec![f32::NAN]]).is_err());
        assert!(validate_embeddings(&[vec![1.0, 2.0], vec![3.0, 4.0]]).is_ok());
    }
}
