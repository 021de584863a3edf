// Unit tests for the summarization fallback engine.
//
// The engine is exercised through stub summarizers so each path is
// deterministic: the model path, the non-convergence fallback, and the
// propagation of every other failure.

use gist::summary::summarize_with_fallback;
use gist::summary::traits::{SummarizeError, Summarizer};

/// Always signals non-convergence — forces the fallback path.
struct NeverConverges;

impl Summarizer for NeverConverges {
    fn best_sentences(
        &self,
        _text: &str,
        _num_sentences: usize,
    ) -> Result<Vec<String>, SummarizeError> {
        Err(SummarizeError::NotConverged)
    }
}

/// Always succeeds with a fixed sentence list — forces the model path.
struct FixedOutput(Vec<&'static str>);

impl Summarizer for FixedOutput {
    fn best_sentences(
        &self,
        _text: &str,
        _num_sentences: usize,
    ) -> Result<Vec<String>, SummarizeError> {
        Ok(self.0.iter().map(|s| s.to_string()).collect())
    }
}

/// Fails with a non-convergence-unrelated error.
struct BrokenBackend;

impl Summarizer for BrokenBackend {
    fn best_sentences(
        &self,
        _text: &str,
        _num_sentences: usize,
    ) -> Result<Vec<String>, SummarizeError> {
        Err(SummarizeError::Other(anyhow::anyhow!(
            "scoring backend unavailable"
        )))
    }
}

const TEXT: &str = "The launch was delayed by weather. Engineers rechecked the fuel lines. \
                    The countdown resumed at dawn. Liftoff was flawless.";

// ============================================================
// Fallback path
// ============================================================

#[test]
fn fallback_takes_leading_sentences_joined_by_newline() {
    let result = summarize_with_fallback(&NeverConverges, TEXT, 2).unwrap();
    assert!(!result.generated_by_model);
    assert_eq!(
        result.text,
        "The launch was delayed by weather.\nEngineers rechecked the fuel lines."
    );
}

#[test]
fn fallback_with_short_text_returns_all_sentences() {
    // 2 sentences, 4 requested: both come back, no error, no padding.
    let short = "One thing happened. Then another.";
    let result = summarize_with_fallback(&NeverConverges, short, 4).unwrap();
    assert!(!result.generated_by_model);
    assert_eq!(result.text, "One thing happened.\nThen another.");
}

#[test]
fn fallback_is_deterministic() {
    let a = summarize_with_fallback(&NeverConverges, TEXT, 3).unwrap();
    let b = summarize_with_fallback(&NeverConverges, TEXT, 3).unwrap();
    assert_eq!(a.text, b.text);
    assert_eq!(a.generated_by_model, b.generated_by_model);
}

#[test]
fn fallback_with_empty_text_is_empty() {
    let result = summarize_with_fallback(&NeverConverges, "", 3).unwrap();
    assert!(!result.generated_by_model);
    assert_eq!(result.text, "");
}

// ============================================================
// Model path
// ============================================================

#[test]
fn model_path_sets_flag_true() {
    let summarizer = FixedOutput(vec!["The countdown resumed at dawn."]);
    let result = summarize_with_fallback(&summarizer, TEXT, 1).unwrap();
    assert!(result.generated_by_model);
    assert_eq!(result.text, "The countdown resumed at dawn.");
}

#[test]
fn model_path_flag_is_true_even_when_output_equals_naive_prefix() {
    // The model happening to pick the leading sentences must not be
    // mistaken for the fallback.
    let summarizer = FixedOutput(vec![
        "The launch was delayed by weather.",
        "Engineers rechecked the fuel lines.",
    ]);
    let result = summarize_with_fallback(&summarizer, TEXT, 2).unwrap();
    assert!(result.generated_by_model);
    assert_eq!(
        result.text,
        "The launch was delayed by weather.\nEngineers rechecked the fuel lines."
    );
}

// ============================================================
// Error propagation
// ============================================================

#[test]
fn non_convergence_unrelated_errors_propagate() {
    let result = summarize_with_fallback(&BrokenBackend, TEXT, 2);
    let err = result.unwrap_err();
    assert!(err.to_string().contains("scoring backend unavailable"));
}
