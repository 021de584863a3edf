// Output records assembled by the wrapper.
//
// Immutable once built; ownership moves whole to the serialization
// boundary. These are the wire shapes of the user API.

use serde::Serialize;

/// One keyword of a topic with its weight within that topic.
#[derive(Debug, Clone, Serialize)]
pub struct TopicKeyword {
    pub word: String,
    pub weight: f64,
}

/// A discovered topic with its ranked keywords.
#[derive(Debug, Clone, Serialize)]
pub struct Topic {
    pub id: usize,
    pub keywords: Vec<TopicKeyword>,
}

/// A corpus document representative of one topic, with its auxiliary summary.
#[derive(Debug, Clone, Serialize)]
pub struct ReprDocOfTopic {
    pub content: String,
    pub summary: String,
    pub probability: f64,
}

/// One (topic, probability) pair for a scored free text.
#[derive(Debug, Clone, Serialize)]
pub struct TextTopicProb {
    pub topic_id: usize,
    pub probability: f64,
}

/// A corpus document related to a free text.
#[derive(Debug, Clone, Serialize)]
pub struct TextRelatedDoc {
    pub content: String,
    pub summary: String,
    pub probability: f64,
    pub dominant_topic: usize,
}
