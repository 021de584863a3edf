// Sentence boundary detection.

use unicode_segmentation::UnicodeSegmentation;

/// Split `text` into sentences using Unicode sentence boundaries.
/// Sentences are trimmed; whitespace-only fragments are dropped.
pub fn split_sentences(text: &str) -> Vec<String> {
    text.unicode_sentences()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
