use crate::core::error::{ChunkerError, Result};
use crate::llm::embeddings::{EmbeddingError, cosine_similarity};

use super::sentences::Sentence;


/// `1 - cosine_similarity`; `None` for a zero-magnitude operand.
pub fn cosine_distance(a: &[f32], b: &[f32]) -> Option<f64> {
    cosine_similarity(a, b).map(|similarity| 1.0 - similarity)
}


/// Distances between consecutive embeddings, `N - 1` of them for `N` inputs.
///
/// A pair of different lengths is a `DimensionMismatch` against the
/// earlier vector, reported for the later index.
pub fn adjacent_distances(embeddings: &[Vec<f32>]) -> Result<Vec<f64>> {
    embeddings
        .windows(2)
        .enumerate()
        .map(|(index, pair)| {
            if pair[0].len() != pair[1].len() {
                return Err(ChunkerError::provider(
                    index + 1,
                    EmbeddingError::DimensionMismatch {
                        expected: pair[0].len(),
                        actual: pair[1].len(),
                    },
                ));
            }
            cosine_distance(&pair[0], &pair[1]).ok_or(ChunkerError::DegenerateDistance { index })
        })
        .collect()
}


pub fn attach_distances(sentences: &mut [Sentence], distances: &[f64]) {
    for (sentence, distance) in sentences.iter_mut().zip(distances) {
        sentence.distance_to_next = Some(*distance);
    }
}
