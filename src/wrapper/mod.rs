// ModelsWrapper — the orchestration core.
//
// Validates request parameters against the params store, invokes the model
// capabilities, runs summarization with its fallback, and assembles the
// output records. Constructed once at startup and shared behind an Arc —
// there is no hidden global instance.
//
// Failure contract, shared by every operation: validation failures are
// raised before any capability call; every capability failure propagates
// unmodified as an internal error. The only sanctioned degraded-success
// path is the summarization fallback, which reports itself through the
// `generated_by_model` flag.

pub mod records;

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::config::{Config, ModelBackend};
use crate::error::{Error, Result};
use crate::model::bundle::BundleModel;
use crate::model::traits::TopicModel;
use crate::params::ParamsStore;
use crate::summary::textrank::TextRank;
use crate::summary::traits::Summarizer;
use crate::summary::{summarize_with_fallback, SummaryResult};
use crate::wordcloud::cache::WordcloudCache;
use crate::wordcloud::render::SvgWordcloudRenderer;

use self::records::{ReprDocOfTopic, TextRelatedDoc, TextTopicProb, Topic, TopicKeyword};

// Dotted names of the bounds triples governing each operation.
const TOPICS_TEXT_NUM_KEYWORDS: &str = "topics.text.num_keywords";
const TOPICS_WORDCLOUD_NUM_KEYWORDS: &str = "topics.wordcloud.num_keywords";
const TOPICS_DOCUMENTS_NUM_DOCUMENTS: &str = "topics.documents.num_documents";
const TEXT_NUM_RELATED_DOCUMENTS: &str = "text.num_related_documents";
const TEXT_NUM_SUMMARY_SENTENCES: &str = "text.num_summary_sentences";

// Fixed sentence count for the auxiliary per-document summaries. Read as a
// plain scalar — it is not a user-facing parameter.
const DOC_SUMMARY_SENTENCES: &str = "topics.documents.num_summary_sentences.default";

pub struct ModelsWrapper {
    model: Arc<dyn TopicModel>,
    summarizer: Box<dyn Summarizer>,
    params: ParamsStore,
    cache: WordcloudCache,
    renderer: SvgWordcloudRenderer,
    loaded_at: DateTime<Utc>,
}

impl ModelsWrapper {
    /// Load the configured model backend and assemble the wrapper.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let model: Arc<dyn TopicModel> = match config.model_backend {
            ModelBackend::Bundle => {
                info!(path = %config.model_bundle_path.display(), "Loading topic model bundle");
                Arc::new(BundleModel::load(&config.model_bundle_path)?)
            }
        };
        info!(topics = model.num_topics(), "Topic model ready");

        Ok(Self::new(
            model,
            Box::new(TextRank::default()),
            ParamsStore::new(&config.params_file),
            WordcloudCache::new(&config.static_root),
        ))
    }

    /// Assemble a wrapper from explicit parts. Tests inject stub
    /// capabilities through this.
    pub fn new(
        model: Arc<dyn TopicModel>,
        summarizer: Box<dyn Summarizer>,
        params: ParamsStore,
        cache: WordcloudCache,
    ) -> Self {
        Self {
            model,
            summarizer,
            params,
            cache,
            renderer: SvgWordcloudRenderer,
            loaded_at: Utc::now(),
        }
    }

    pub fn num_topics(&self) -> usize {
        self.model.num_topics()
    }

    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }

    /// Every topic as its ranked keywords.
    pub fn topics_as_text(&self, num_keywords: Option<i64>) -> Result<Vec<Topic>> {
        let k = self.params.resolve(TOPICS_TEXT_NUM_KEYWORDS, num_keywords)? as usize;
        let topics = self.model.topics_as_keywords(k)?;
        debug!(topics = topics.len(), num_keywords = k, "assembled topics as text");
        Ok(topics
            .into_iter()
            .map(|t| Topic {
                id: t.topic_id,
                keywords: t
                    .keywords
                    .into_iter()
                    .map(|(word, weight)| TopicKeyword { word, weight })
                    .collect(),
            })
            .collect())
    }

    /// Public locations of the wordcloud image set for the effective
    /// keyword count, rendering the set on first use.
    pub fn topics_wordcloud_locations(
        &self,
        num_keywords: Option<i64>,
    ) -> Result<BTreeMap<String, String>> {
        let k = self.params.resolve(TOPICS_WORDCLOUD_NUM_KEYWORDS, num_keywords)? as usize;
        let locations = self.cache.get_or_create(k, self.model.num_topics(), |dir| {
            let topics = self.model.topics_as_keywords(k)?;
            self.renderer.render(&topics, dir)
        })?;
        Ok(locations)
    }

    /// The documents most representative of one topic, each with an
    /// auxiliary summary. The summary's model-vs-fallback flag is
    /// deliberately dropped here — summaries are not the primary output.
    pub fn most_representative_docs(
        &self,
        topic_id: i64,
        num_documents: Option<i64>,
    ) -> Result<Vec<ReprDocOfTopic>> {
        let num_topics = self.model.num_topics();
        if topic_id < 0 || topic_id as usize >= num_topics {
            return Err(Error::TopicNotFound {
                topic_id,
                num_topics,
            });
        }
        let n = self.params.resolve(TOPICS_DOCUMENTS_NUM_DOCUMENTS, num_documents)? as usize;
        let sentence_count = self.params.get(DOC_SUMMARY_SENTENCES)? as usize;

        let docs = self.model.most_representative_docs(topic_id as usize, n)?;
        docs.into_iter()
            .map(|doc| {
                let summary =
                    summarize_with_fallback(self.summarizer.as_ref(), &doc.content, sentence_count)?;
                Ok(ReprDocOfTopic {
                    content: doc.content,
                    summary: summary.text,
                    probability: doc.probability,
                })
            })
            .collect()
    }

    /// Topic membership probabilities for a free text, highest first.
    pub fn text_related_topics(
        &self,
        text: &str,
        max_num_topics: Option<i64>,
    ) -> Result<Vec<TextTopicProb>> {
        let num_topics = self.model.num_topics();
        let limit = match max_num_topics {
            Some(v) => {
                if v < 1 || v > num_topics as i64 {
                    return Err(Error::InvalidParamRange {
                        name: "max_num_topics".to_string(),
                        value: v,
                        min: 1,
                        max: num_topics as i64,
                    });
                }
                v as usize
            }
            None => num_topics,
        };

        let probs = self.model.topic_probabilities(text, limit)?;
        Ok(probs
            .into_iter()
            .map(|(topic_id, probability)| TextTopicProb {
                topic_id,
                probability,
            })
            .collect())
    }

    /// The corpus documents most related to a free text, each with an
    /// auxiliary summary (flag dropped, as for representative documents).
    pub fn text_related_docs(
        &self,
        text: &str,
        num_documents: Option<i64>,
    ) -> Result<Vec<TextRelatedDoc>> {
        let n = self.params.resolve(TEXT_NUM_RELATED_DOCUMENTS, num_documents)? as usize;
        let sentence_count = self.params.get(DOC_SUMMARY_SENTENCES)? as usize;

        let docs = self.model.related_docs(text, n)?;
        docs.into_iter()
            .map(|doc| {
                let summary =
                    summarize_with_fallback(self.summarizer.as_ref(), &doc.content, sentence_count)?;
                Ok(TextRelatedDoc {
                    content: doc.content,
                    summary: summary.text,
                    probability: doc.probability,
                    dominant_topic: doc.dominant_topic,
                })
            })
            .collect()
    }

    /// Summary of a free text. Here the model-vs-fallback flag IS primary
    /// output and is returned to the caller.
    ///
    /// The sentence count is checked against its minimum only: summary
    /// length has no meaningful ceiling, unlike every other parameter.
    pub fn text_summary(&self, text: &str, num_sentences: Option<i64>) -> Result<SummaryResult> {
        let k = self
            .params
            .resolve_min_only(TEXT_NUM_SUMMARY_SENTENCES, num_sentences)? as usize;
        Ok(summarize_with_fallback(self.summarizer.as_ref(), text, k)?)
    }
}
