// Error types for the wrapper core.
//
// Two user-facing kinds (a supplied parameter outside its configured bounds,
// and a topic id that doesn't exist in the loaded model) plus a transparent
// internal variant wrapping everything else. The web adapter maps these to
// 400 / 404 / 500 — the core never talks HTTP.

use thiserror::Error;

/// Result type for wrapper operations.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// A user-supplied parameter falls outside its configured [min, max].
    #[error(
        "Invalid value for parameter '{name}': {value} is outside the allowed range [{min}, {max}]"
    )]
    InvalidParamRange {
        name: String,
        value: i64,
        min: i64,
        max: i64,
    },

    /// A user-supplied parameter falls below its configured minimum.
    /// Used for parameters that are intentionally unbounded above
    /// (summary sentence count).
    #[error("Invalid value for parameter '{name}': {value} is below the minimum of {min}")]
    InvalidParamMin { name: String, value: i64, min: i64 },

    /// The referenced topic id does not exist in the loaded model.
    #[error("Topic {topic_id} does not exist: the model has {num_topics} topics")]
    TopicNotFound { topic_id: i64, num_topics: usize },

    /// Any non-user failure: params file I/O, model bundle problems,
    /// rendering failures. Never shown verbatim to API clients.
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}
