// Unit tests for the wordcloud artifact cache.
//
// The cache's contract: directory presence is the completion marker, the
// generator runs at most once per published artifact set, and concurrent
// first-time requests for the same key are safe.

use std::fs;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use gist::wordcloud::cache::WordcloudCache;
use tempfile::TempDir;

fn write_topic_files(dir: &Path, num_topics: usize) -> anyhow::Result<()> {
    for i in 0..num_topics {
        fs::write(dir.join(format!("topic{i}.svg")), "<svg/>")?;
    }
    Ok(())
}

#[test]
fn generator_runs_once_for_repeated_key() {
    let root = TempDir::new().unwrap();
    let cache = WordcloudCache::new(root.path());
    let calls = AtomicUsize::new(0);

    let first = cache
        .get_or_create(5, 2, |dir| {
            calls.fetch_add(1, Ordering::SeqCst);
            write_topic_files(dir, 2)
        })
        .unwrap();

    let second = cache
        .get_or_create(5, 2, |dir| {
            calls.fetch_add(1, Ordering::SeqCst);
            write_topic_files(dir, 2)
        })
        .unwrap();

    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(first, second);
}

#[test]
fn locations_are_paths_under_the_public_static_prefix() {
    let root = TempDir::new().unwrap();
    let cache = WordcloudCache::new(root.path());

    let locations = cache
        .get_or_create(5, 2, |dir| write_topic_files(dir, 2))
        .unwrap();

    assert_eq!(locations.len(), 2);
    assert_eq!(
        locations["topic0"],
        "/static/wordcloud-images/5keywords/topic0.svg"
    );
    assert_eq!(
        locations["topic1"],
        "/static/wordcloud-images/5keywords/topic1.svg"
    );
    assert!(root.path().join("wordcloud-images/5keywords/topic0.svg").exists());
}

#[test]
fn distinct_keys_generate_distinct_artifact_sets() {
    let root = TempDir::new().unwrap();
    let cache = WordcloudCache::new(root.path());
    let calls = AtomicUsize::new(0);

    let three = cache
        .get_or_create(3, 1, |dir| {
            calls.fetch_add(1, Ordering::SeqCst);
            write_topic_files(dir, 1)
        })
        .unwrap();
    let four = cache
        .get_or_create(4, 1, |dir| {
            calls.fetch_add(1, Ordering::SeqCst);
            write_topic_files(dir, 1)
        })
        .unwrap();

    assert_eq!(calls.load(Ordering::SeqCst), 2);
    assert_ne!(three["topic0"], four["topic0"]);
}

#[test]
fn failed_generation_publishes_nothing_and_is_retried() {
    let root = TempDir::new().unwrap();
    let cache = WordcloudCache::new(root.path());

    let result = cache.get_or_create(5, 1, |_dir| anyhow::bail!("renderer crashed"));
    assert!(result.is_err());
    // No completion marker was published.
    assert!(!root.path().join("wordcloud-images/5keywords").exists());

    // The next request generates from scratch.
    let locations = cache
        .get_or_create(5, 1, |dir| write_topic_files(dir, 1))
        .unwrap();
    assert_eq!(
        locations["topic0"],
        "/static/wordcloud-images/5keywords/topic0.svg"
    );
}

#[test]
fn concurrent_first_time_requests_are_safe() {
    let root = TempDir::new().unwrap();
    let cache = Arc::new(WordcloudCache::new(root.path()));
    let calls = Arc::new(AtomicUsize::new(0));

    let mut handles = Vec::new();
    for _ in 0..4 {
        let cache = Arc::clone(&cache);
        let calls = Arc::clone(&calls);
        handles.push(thread::spawn(move || {
            cache.get_or_create(8, 2, |dir| {
                calls.fetch_add(1, Ordering::SeqCst);
                // Widen the race window: generation takes a while.
                thread::sleep(Duration::from_millis(50));
                write_topic_files(dir, 2)
            })
        }));
    }

    let results: Vec<_> = handles
        .into_iter()
        .map(|h| h.join().unwrap().unwrap())
        .collect();

    // Exactly one generation; every caller sees the same complete set.
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    for locations in &results {
        assert_eq!(locations, &results[0]);
    }
    let dir = root.path().join("wordcloud-images/8keywords");
    assert!(dir.join("topic0.svg").exists());
    assert!(dir.join("topic1.svg").exists());
}
