// Topic model trait — the swap-ready abstraction.
//
// The model is trained offline; at serve time it only answers queries about
// its fixed set of discovered topics and the corpus it was trained on.

use anyhow::Result;

/// The ranked keywords of one topic.
#[derive(Debug, Clone)]
pub struct TopicKeywords {
    pub topic_id: usize,
    /// (word, weight) pairs in descending weight order.
    pub keywords: Vec<(String, f64)>,
}

/// A corpus document ranked by its membership in one topic.
#[derive(Debug, Clone)]
pub struct RankedDoc {
    pub content: String,
    pub probability: f64,
}

/// A corpus document ranked by its relatedness to a free text.
#[derive(Debug, Clone)]
pub struct RelatedDoc {
    pub content: String,
    pub probability: f64,
    /// The topic with the highest membership probability for this document.
    pub dominant_topic: usize,
}

/// Trait for querying an offline-trained topic model.
pub trait TopicModel: Send + Sync {
    /// Number of topics discovered by the training run. Topic ids form the
    /// dense range `0..num_topics()`.
    fn num_topics(&self) -> usize;

    /// The top `num_keywords` keywords of every topic.
    fn topics_as_keywords(&self, num_keywords: usize) -> Result<Vec<TopicKeywords>>;

    /// The `num_docs` corpus documents most representative of `topic_id`,
    /// by descending membership probability.
    fn most_representative_docs(&self, topic_id: usize, num_docs: usize)
        -> Result<Vec<RankedDoc>>;

    /// The `num_docs` corpus documents most related to `text`, by
    /// descending relatedness.
    fn related_docs(&self, text: &str, num_docs: usize) -> Result<Vec<RelatedDoc>>;

    /// Topic membership probabilities for `text`, highest first, at most
    /// `limit` entries.
    fn topic_probabilities(&self, text: &str, limit: usize) -> Result<Vec<(usize, f64)>>;
}
