use serde::{Deserialize, Serialize};

use super::sentences::Sentence;


#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chunk {
    pub text: String,
    pub first_sentence: usize,
    pub last_sentence: usize,
}

impl Chunk {
    /// Zero for an inverted range.
    pub fn sentence_count(&self) -> usize {
        self.last_sentence
            .checked_sub(self.first_sentence)
            .map_or(0, |span| span + 1)
    }
}


/// Indices `i` with `distances[i] > threshold`, ascending; a cut falls right
/// after sentence `i`.
pub fn breakpoints(distances: &[f64], threshold: f64) -> Vec<usize> {
    distances
        .iter()
        .enumerate()
        .filter(|&(_, &d)| d > threshold)
        .map(|(i, _)| i)
        .collect()
}


pub fn assemble_chunks(sentences: &[Sentence], breakpoints: &[usize]) -> Vec<Chunk> {
    let mut chunks = Vec::with_capacity(breakpoints.len() + 1);
    let mut start = 0;

    for &end in breakpoints {
        if end < start || end >= sentences.len() {
            continue;
        }
        chunks.push(join_range(sentences, start, end));
        start = end + 1;
    }

    if start < sentences.len() {
        chunks.push(join_range(sentences, start, sentences.len() - 1));
    }

    chunks
}

fn join_range(sentences: &[Sentence], first: usize, last: usize) -> Chunk {
    let text = sentences[first..=last]
        .iter()
        .map(|s| s.text.as_str())
        .collect::<Vec<_>>()
        .join(" ");

    Chunk {
        text,
        first_sentence: first,
        last_sentence: last,
    }
}
