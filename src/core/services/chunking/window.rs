use super::sentences::Sentence;


/// Window of sentence `index`: its neighbours within `buffer_size` on each
/// side, clipped to the sequence, joined by single spaces. Empty when
/// `index` is past the end.
pub fn window_text(sentences: &[Sentence], index: usize, buffer_size: usize) -> String {
    if index >= sentences.len() {
        return String::new();
    }

    let start = index.saturating_sub(buffer_size);
    let end = index.saturating_add(buffer_size).min(sentences.len().saturating_sub(1));

    sentences[start..=end]
        .iter()
        .map(|s| s.text.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}


pub fn combine_sentences(sentences: &mut [Sentence], buffer_size: usize) {
    let windows: Vec<String> = (0..sentences.len())
        .map(|i| window_text(sentences, i, buffer_size))
        .collect();

    for (sentence, window) in sentences.iter_mut().zip(windows) {
        sentence.combined_text = Some(window);
    }
}
