use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Per-word success/failure counters. `attempts >= successes` always;
/// failures are derived rather than stored so the invariant cannot drift.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordStat {
    pub successes: u32,
    pub attempts: u32,
}

impl WordStat {
    pub fn failures(&self) -> u32 {
        self.attempts.saturating_sub(self.successes)
    }
}

/// The full word -> stat mapping for one user at one instant. A word with no
/// entry is treated identically to `{successes: 0, attempts: 0}`.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct StatsSnapshot {
    pub stats: HashMap<String, WordStat>,
}

impl StatsSnapshot {
    pub fn get(&self, word: &str) -> WordStat {
        self.stats.get(word).copied().unwrap_or_default()
    }

    pub fn entry(&self, word: &str) -> Option<&WordStat> {
        self.stats.get(word)
    }

    pub fn set(&mut self, word: &str, stat: WordStat) {
        self.stats.insert(word.to_string(), stat);
    }

    pub fn mastered_count(&self, mastery_threshold: u32) -> usize {
        self.stats
            .values()
            .filter(|s| s.successes >= mastery_threshold)
            .count()
    }
}
