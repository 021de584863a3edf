// Summarizer trait — the swap-ready abstraction.
//
// Non-convergence is a documented failure mode of iterative sentence
// ranking on short or low-connectivity texts. It gets its own error variant
// so the fallback engine can catch exactly that signal and nothing else.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SummarizeError {
    /// The iterative ranking did not reach a fixed point within the
    /// iteration budget.
    #[error("sentence ranking did not converge")]
    NotConverged,

    /// Any other summarizer failure. Propagates unmodified.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Trait for extractive summarization backends.
pub trait Summarizer: Send + Sync {
    /// The `num_sentences` most important sentences of `text`, in their
    /// original order. May return fewer when the text is shorter.
    fn best_sentences(
        &self,
        text: &str,
        num_sentences: usize,
    ) -> Result<Vec<String>, SummarizeError>;
}
