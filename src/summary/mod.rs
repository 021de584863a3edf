// Summarization — trait seam, the TextRank backend, and the fallback engine.
//
// The fallback engine is the only place in the system that catches the
// non-convergence signal. Every other summarizer failure propagates to the
// caller unmodified.

pub mod sentences;
pub mod textrank;
pub mod traits;

use serde::Serialize;
use tracing::warn;

use self::traits::{SummarizeError, Summarizer};

/// Outcome of a summarization request.
///
/// `generated_by_model` is part of the API contract, not a log detail:
/// false means the ranking did not converge and the summary is the leading
/// sentences of the input.
#[derive(Debug, Clone, Serialize)]
pub struct SummaryResult {
    pub text: String,
    pub generated_by_model: bool,
}

/// Summarize `text` with `summarizer`, degrading to the first
/// `num_sentences` sentences when the ranking does not converge.
///
/// The fallback takes fewer sentences when the text has fewer — never an
/// error. Both paths join sentences with a newline.
pub fn summarize_with_fallback(
    summarizer: &dyn Summarizer,
    text: &str,
    num_sentences: usize,
) -> anyhow::Result<SummaryResult> {
    match summarizer.best_sentences(text, num_sentences) {
        Ok(best) => Ok(SummaryResult {
            text: best.join("\n"),
            generated_by_model: true,
        }),
        Err(SummarizeError::NotConverged) => {
            warn!(num_sentences, "ranking did not converge, using leading sentences");
            let leading: Vec<String> = sentences::split_sentences(text)
                .into_iter()
                .take(num_sentences)
                .collect();
            Ok(SummaryResult {
                text: leading.join("\n"),
                generated_by_model: false,
            })
        }
        Err(SummarizeError::Other(e)) => Err(e),
    }
}
