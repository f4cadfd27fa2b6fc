use std::fs;
use std::path::PathBuf;

use tracing::warn;

use crate::vocab::{self, WordRecord, csv};

const SAMPLE_CSV: &str = include_str!("../../assets/vocabulary-sample.csv");
const CACHE_KEY: &str = "vocabulary.csv";

/// Where the loaded word list came from, for the post-load notification.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VocabSource {
    Remote,
    Cache,
    Bundled,
}

pub struct DiskCache {
    base_dir: PathBuf,
}

impl DiskCache {
    pub fn new(subdir: &str) -> Option<Self> {
        let base = dirs::data_dir()?.join("kotoba").join(subdir);
        fs::create_dir_all(&base).ok()?;
        Some(Self { base_dir: base })
    }

    pub fn get(&self, key: &str) -> Option<String> {
        let path = self.base_dir.join(key);
        fs::read_to_string(path).ok()
    }

    pub fn put(&self, key: &str, content: &str) -> bool {
        let path = self.base_dir.join(key);
        fs::write(path, content).is_ok()
    }
}

#[cfg(feature = "network")]
pub fn fetch_url(url: &str, timeout_secs: u64) -> Option<String> {
    let client = reqwest::blocking::Client::builder()
        .timeout(std::time::Duration::from_secs(timeout_secs))
        .build()
        .ok()?;
    let response = client.get(url).send().ok()?;
    if response.status().is_success() {
        response.text().ok()
    } else {
        None
    }
}

#[cfg(not(feature = "network"))]
pub fn fetch_url(_url: &str, _timeout_secs: u64) -> Option<String> {
    None
}

/// Load the word list: remote CSV if a source URL is configured (written
/// through to the disk cache on success), else the cached copy, else the
/// bundled sample. The result is always de-duplicated on `word`.
///
/// A download that times out leaves no partial state; the cache keeps its
/// previous contents.
pub fn load_vocabulary(source_url: &str, timeout_secs: u64) -> (Vec<WordRecord>, VocabSource) {
    let cache = DiskCache::new("vocab");

    if !source_url.is_empty() {
        if let Some(text) = fetch_url(source_url, timeout_secs) {
            let records = vocab::dedupe_words(csv::parse_csv(&text));
            if !records.is_empty() {
                if let Some(ref cache) = cache {
                    cache.put(CACHE_KEY, &text);
                }
                return (records, VocabSource::Remote);
            }
            warn!(url = source_url, "vocabulary download contained no valid rows");
        } else {
            warn!(url = source_url, "vocabulary download failed");
        }
    }

    if let Some(text) = cache.as_ref().and_then(|c| c.get(CACHE_KEY)) {
        let records = vocab::dedupe_words(csv::parse_csv(&text));
        if !records.is_empty() {
            return (records, VocabSource::Cache);
        }
    }

    (
        vocab::dedupe_words(csv::parse_csv(SAMPLE_CSV)),
        VocabSource::Bundled,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_sample_parses_and_is_playable() {
        let records = csv::parse_csv(SAMPLE_CSV);
        // Multiple-choice needs at least 4 distinct words.
        assert!(records.len() >= 4);
        let deduped = vocab::dedupe_words(records.clone());
        assert_eq!(deduped.len(), records.len());
    }
}
