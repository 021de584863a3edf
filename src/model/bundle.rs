// Bundle-backed topic model.
//
// The bundle is a JSON file produced by the offline training pipeline:
// per-topic ranked keyword/weight lists plus the corpus documents with their
// per-document topic distributions. Serving is pure lookup and scoring —
// free text is scored against a topic by summing the weights of that topic's
// keywords present in the text, and related documents are ranked by the
// similarity between the text's topic distribution and each document's.

use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use stop_words::{get, LANGUAGE};
use tracing::debug;
use unicode_segmentation::UnicodeSegmentation;

use super::traits::{RankedDoc, RelatedDoc, TopicKeywords, TopicModel};

#[derive(Debug, Deserialize)]
struct Bundle {
    topics: Vec<BundleTopic>,
    documents: Vec<BundleDoc>,
}

#[derive(Debug, Deserialize)]
struct BundleTopic {
    /// Ranked keywords, descending weight.
    keywords: Vec<BundleKeyword>,
}

#[derive(Debug, Deserialize)]
struct BundleKeyword {
    word: String,
    weight: f64,
}

#[derive(Debug, Deserialize)]
struct BundleDoc {
    content: String,
    /// One probability per topic, same order as `topics`.
    topic_probabilities: Vec<f64>,
}

/// Topic model serving an offline-trained bundle loaded from disk.
#[derive(Debug)]
pub struct BundleModel {
    bundle: Bundle,
    stop_words: HashSet<String>,
}

impl BundleModel {
    /// Load and validate a bundle file.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            anyhow::bail!(
                "Model bundle not found: {}\nSet GIST_MODEL_BUNDLE to the trained bundle file.",
                path.display()
            );
        }

        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read model bundle {}", path.display()))?;
        let bundle: Bundle = serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse model bundle {}", path.display()))?;

        if bundle.topics.is_empty() {
            anyhow::bail!("Model bundle {} contains no topics", path.display());
        }
        for (i, doc) in bundle.documents.iter().enumerate() {
            if doc.topic_probabilities.len() != bundle.topics.len() {
                anyhow::bail!(
                    "Model bundle {} is inconsistent: document {i} has {} topic probabilities \
                     but the bundle has {} topics",
                    path.display(),
                    doc.topic_probabilities.len(),
                    bundle.topics.len()
                );
            }
        }

        debug!(
            topics = bundle.topics.len(),
            documents = bundle.documents.len(),
            "Loaded topic model bundle"
        );

        Ok(Self::from_bundle(bundle))
    }

    fn from_bundle(bundle: Bundle) -> Self {
        let stop_words: HashSet<String> = get(LANGUAGE::English).into_iter().collect();
        Self { bundle, stop_words }
    }

    /// Lowercased content words of `text`, stop words removed.
    fn content_words(&self, text: &str) -> HashSet<String> {
        text.unicode_words()
            .map(|w| w.to_lowercase())
            .filter(|w| !self.stop_words.contains(w))
            .collect()
    }

    /// Unnormalized per-topic scores for `text`: the sum of each topic's
    /// keyword weights over the keywords present in the text.
    fn topic_scores(&self, text: &str) -> Vec<f64> {
        let words = self.content_words(text);
        self.bundle
            .topics
            .iter()
            .map(|topic| {
                topic
                    .keywords
                    .iter()
                    .filter(|kw| words.contains(&kw.word))
                    .map(|kw| kw.weight)
                    .sum()
            })
            .collect()
    }
}

fn cosine(a: &[f64], b: &[f64]) -> f64 {
    let dot: f64 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let mag_a: f64 = a.iter().map(|x| x * x).sum::<f64>().sqrt();
    let mag_b: f64 = b.iter().map(|x| x * x).sum::<f64>().sqrt();
    if mag_a < f64::EPSILON || mag_b < f64::EPSILON {
        return 0.0;
    }
    (dot / (mag_a * mag_b)).clamp(0.0, 1.0)
}

/// Index of the largest value. Ties resolve to the lowest index.
fn argmax(values: &[f64]) -> usize {
    let mut best = 0;
    for (i, v) in values.iter().enumerate() {
        if *v > values[best] {
            best = i;
        }
    }
    best
}

impl TopicModel for BundleModel {
    fn num_topics(&self) -> usize {
        self.bundle.topics.len()
    }

    fn topics_as_keywords(&self, num_keywords: usize) -> Result<Vec<TopicKeywords>> {
        Ok(self
            .bundle
            .topics
            .iter()
            .enumerate()
            .map(|(topic_id, topic)| TopicKeywords {
                topic_id,
                keywords: topic
                    .keywords
                    .iter()
                    .take(num_keywords)
                    .map(|kw| (kw.word.clone(), kw.weight))
                    .collect(),
            })
            .collect())
    }

    fn most_representative_docs(
        &self,
        topic_id: usize,
        num_docs: usize,
    ) -> Result<Vec<RankedDoc>> {
        if topic_id >= self.bundle.topics.len() {
            anyhow::bail!(
                "topic id {topic_id} out of range for a {}-topic bundle",
                self.bundle.topics.len()
            );
        }

        let mut ranked: Vec<RankedDoc> = self
            .bundle
            .documents
            .iter()
            .map(|doc| RankedDoc {
                content: doc.content.clone(),
                probability: doc.topic_probabilities[topic_id],
            })
            .collect();
        ranked.sort_by(|a, b| {
            b.probability
                .partial_cmp(&a.probability)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        ranked.truncate(num_docs);
        Ok(ranked)
    }

    fn related_docs(&self, text: &str, num_docs: usize) -> Result<Vec<RelatedDoc>> {
        let scores = self.topic_scores(text);
        if scores.iter().all(|s| *s <= 0.0) {
            // The text shares no vocabulary with any topic — nothing to rank.
            return Ok(Vec::new());
        }

        let mut ranked: Vec<RelatedDoc> = self
            .bundle
            .documents
            .iter()
            .map(|doc| RelatedDoc {
                content: doc.content.clone(),
                probability: cosine(&scores, &doc.topic_probabilities),
                dominant_topic: argmax(&doc.topic_probabilities),
            })
            .collect();
        ranked.sort_by(|a, b| {
            b.probability
                .partial_cmp(&a.probability)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        ranked.truncate(num_docs);
        Ok(ranked)
    }

    fn topic_probabilities(&self, text: &str, limit: usize) -> Result<Vec<(usize, f64)>> {
        let scores = self.topic_scores(text);
        let total: f64 = scores.iter().sum();
        if total <= 0.0 {
            return Ok(Vec::new());
        }

        let mut probs: Vec<(usize, f64)> = scores
            .into_iter()
            .enumerate()
            .filter(|(_, s)| *s > 0.0)
            .map(|(topic_id, s)| (topic_id, s / total))
            .collect();
        probs.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        probs.truncate(limit);
        Ok(probs)
    }
}
