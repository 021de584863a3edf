// TextRank extractive summarization.
//
// Sentences become graph nodes; edge weights are normalized content-word
// overlap. Power iteration ranks the nodes. The iteration either stabilizes
// below the tolerance or exhausts the budget — the latter is reported as
// SummarizeError::NotConverged and handled by the fallback engine, never
// here.
//
// No embeddings: similarity is word overlap with stop words removed.

use std::collections::HashSet;

use stop_words::{get, LANGUAGE};
use unicode_segmentation::UnicodeSegmentation;

use super::sentences::split_sentences;
use super::traits::{SummarizeError, Summarizer};

const DAMPING: f64 = 0.85;

/// Word-overlap TextRank summarizer.
pub struct TextRank {
    /// Convergence threshold, scaled by sentence count.
    pub tolerance: f64,
    /// Iteration budget. Exhausting it is the non-convergence signal.
    pub max_iterations: usize,
    stop_words: HashSet<String>,
}

impl Default for TextRank {
    fn default() -> Self {
        Self {
            tolerance: 1e-6,
            max_iterations: 100,
            stop_words: get(LANGUAGE::English).into_iter().collect(),
        }
    }
}

impl TextRank {
    /// Lowercased content words of one sentence, stop words removed.
    fn content_words(&self, sentence: &str) -> HashSet<String> {
        sentence
            .unicode_words()
            .map(|w| w.to_lowercase())
            .filter(|w| !self.stop_words.contains(w))
            .collect()
    }
}

/// Normalized overlap between two sentences' content-word sets. The log
/// denominator keeps long sentences from dominating purely by length.
fn similarity(a: &HashSet<String>, b: &HashSet<String>) -> f64 {
    let shared = a.intersection(b).count();
    if shared == 0 {
        return 0.0;
    }
    let denom = (1.0 + a.len() as f64).ln() + (1.0 + b.len() as f64).ln();
    if denom < f64::EPSILON {
        return 0.0;
    }
    shared as f64 / denom
}

impl Summarizer for TextRank {
    fn best_sentences(
        &self,
        text: &str,
        num_sentences: usize,
    ) -> Result<Vec<String>, SummarizeError> {
        let sentences = split_sentences(text);
        let n = sentences.len();

        // With no more sentences than requested, every sentence is in the
        // summary and there is nothing to rank.
        if n <= num_sentences {
            return Ok(sentences);
        }

        let word_sets: Vec<HashSet<String>> = sentences
            .iter()
            .map(|s| self.content_words(s))
            .collect();

        let mut weights = vec![vec![0.0f64; n]; n];
        let mut degrees = vec![0.0f64; n];
        for i in 0..n {
            for j in (i + 1)..n {
                let w = similarity(&word_sets[i], &word_sets[j]);
                weights[i][j] = w;
                weights[j][i] = w;
                degrees[i] += w;
                degrees[j] += w;
            }
        }

        // Power iteration with damping. Nodes with no edges keep the
        // baseline score.
        let baseline = (1.0 - DAMPING) / n as f64;
        let mut scores = vec![1.0 / n as f64; n];
        let mut converged = false;
        for _ in 0..self.max_iterations {
            let mut next = vec![baseline; n];
            for j in 0..n {
                if degrees[j] < f64::EPSILON {
                    continue;
                }
                let contribution = DAMPING * scores[j] / degrees[j];
                for i in 0..n {
                    if weights[j][i] > 0.0 {
                        next[i] += contribution * weights[j][i];
                    }
                }
            }

            let delta: f64 = next
                .iter()
                .zip(&scores)
                .map(|(a, b)| (a - b).abs())
                .sum();
            scores = next;
            if delta < self.tolerance * n as f64 {
                converged = true;
                break;
            }
        }

        if !converged {
            return Err(SummarizeError::NotConverged);
        }

        // Top `num_sentences` by score, restored to original order.
        let mut ranked: Vec<usize> = (0..n).collect();
        ranked.sort_by(|&a, &b| {
            scores[b]
                .partial_cmp(&scores[a])
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        let mut chosen: Vec<usize> = ranked.into_iter().take(num_sentences).collect();
        chosen.sort_unstable();

        Ok(chosen.into_iter().map(|i| sentences[i].clone()).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_text() -> String {
        [
            "The spacecraft entered orbit after a flawless launch from the coastal pad.",
            "Engineers monitored the orbit insertion burn from the control room.",
            "The launch vehicle performed within expected parameters throughout ascent.",
            "Local weather had threatened to delay the launch for a second day.",
            "Mission control confirmed the spacecraft deployed its solar panels in orbit.",
            "The team celebrated once telemetry confirmed a stable orbit.",
        ]
        .join(" ")
    }

    #[test]
    fn returns_requested_sentence_count_in_original_order() {
        let textrank = TextRank::default();
        let summary = textrank.best_sentences(&sample_text(), 3).unwrap();
        assert_eq!(summary.len(), 3);

        // Selected sentences keep their original relative order.
        let full = split_sentences(&sample_text());
        let positions: Vec<usize> = summary
            .iter()
            .map(|s| full.iter().position(|f| f == s).unwrap())
            .collect();
        for window in positions.windows(2) {
            assert!(window[0] < window[1]);
        }
    }

    #[test]
    fn short_text_returned_whole() {
        let textrank = TextRank::default();
        let summary = textrank.best_sentences("One sentence. Two sentences.", 5).unwrap();
        assert_eq!(summary.len(), 2);
    }

    #[test]
    fn exhausted_iteration_budget_signals_non_convergence() {
        let textrank = TextRank {
            max_iterations: 0,
            ..TextRank::default()
        };
        let result = textrank.best_sentences(&sample_text(), 2);
        assert!(matches!(result, Err(SummarizeError::NotConverged)));
    }
}
