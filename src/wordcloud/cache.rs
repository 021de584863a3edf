// Wordcloud artifact cache.
//
// Artifacts live under `<static_root>/wordcloud-images/<n>keywords/`.
// Directory presence is the completion marker: if the directory exists the
// artifact set is served as-is, regardless of how it was produced. Content
// is never checked for staleness.
//
// The check-generate-publish sequence is serialized per key: a generation
// lock is held across the whole sequence, and the artifact set is rendered
// into a `.tmp` sibling that is renamed into place only on success. A
// concurrent request for the same key blocks on the lock, then observes the
// published directory and skips generation. A failed generation leaves no
// published directory, so the next request retries.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use tracing::{debug, info};

/// Public URL prefix under which the static root is served.
const PUBLIC_PREFIX: &str = "/static";

pub struct WordcloudCache {
    static_root: PathBuf,
    images_dir: PathBuf,
    locks: Mutex<HashMap<usize, Arc<Mutex<()>>>>,
}

impl WordcloudCache {
    pub fn new(static_root: impl Into<PathBuf>) -> Self {
        let static_root = static_root.into();
        let images_dir = static_root.join("wordcloud-images");
        Self {
            static_root,
            images_dir,
            locks: Mutex::new(HashMap::new()),
        }
    }

    fn key_lock(&self, num_keywords: usize) -> Arc<Mutex<()>> {
        let mut locks = self
            .locks
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        locks
            .entry(num_keywords)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    /// Location map for the `num_keywords` artifact set, generating it on
    /// first use.
    ///
    /// `generate` is called at most once per published artifact set, with
    /// the directory it must fill. Returns `topic<i>` -> public path for
    /// each of the `num_topics` topics.
    pub fn get_or_create<F>(
        &self,
        num_keywords: usize,
        num_topics: usize,
        generate: F,
    ) -> Result<BTreeMap<String, String>>
    where
        F: FnOnce(&Path) -> Result<()>,
    {
        let dir = self.images_dir.join(format!("{num_keywords}keywords"));

        let key_lock = self.key_lock(num_keywords);
        // A poisoned lock means another request panicked mid-generation;
        // the directory protocol below is still consistent, so continue.
        let _guard = key_lock
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        if dir.exists() {
            debug!(num_keywords, "wordcloud artifact set already on disk");
        } else {
            let tmp = self.images_dir.join(format!("{num_keywords}keywords.tmp"));
            if tmp.exists() {
                // Leftover from an earlier failed generation.
                fs::remove_dir_all(&tmp).with_context(|| {
                    format!("Failed to clear stale artifact dir {}", tmp.display())
                })?;
            }
            fs::create_dir_all(&tmp)
                .with_context(|| format!("Failed to create artifact dir {}", tmp.display()))?;
            generate(&tmp)?;
            fs::rename(&tmp, &dir).with_context(|| {
                format!("Failed to publish artifact dir {}", dir.display())
            })?;
            info!(num_keywords, "generated wordcloud artifact set");
        }

        self.locations(&dir, num_topics)
    }

    fn locations(&self, dir: &Path, num_topics: usize) -> Result<BTreeMap<String, String>> {
        let mut locations = BTreeMap::new();
        for topic_id in 0..num_topics {
            let file = dir.join(format!("topic{topic_id}.svg"));
            // Failing to strip the prefix means the cache was constructed
            // with inconsistent paths — an internal invariant, not user error.
            let relative = file.strip_prefix(&self.static_root).with_context(|| {
                format!(
                    "artifact path {} is outside the static root {}",
                    file.display(),
                    self.static_root.display()
                )
            })?;
            locations.insert(
                format!("topic{topic_id}"),
                format!("{PUBLIC_PREFIX}/{}", relative.display()),
            );
        }
        Ok(locations)
    }
}
