use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::engine::stats::{StatsSnapshot, WordStat};

const SCHEMA_VERSION: u32 = 1;

/// Compact remote encoding of one word's counters: s = successes, f = failures.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordSlot {
    pub s: u32,
    pub f: u32,
}

impl From<WordStat> for WordSlot {
    fn from(stat: WordStat) -> Self {
        Self {
            s: stat.successes,
            f: stat.failures(),
        }
    }
}

impl From<WordSlot> for WordStat {
    fn from(slot: WordSlot) -> Self {
        Self {
            successes: slot.s,
            attempts: slot.s + slot.f,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme_index: Option<usize>,
}

/// The per-user remote document. Both sub-maps may be absent on the wire;
/// the core never reads or writes any other top-level field.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct UserDocument {
    #[serde(default)]
    pub vocabulary: HashMap<String, WordSlot>,
    #[serde(default)]
    pub settings: Settings,
}

impl UserDocument {
    pub fn to_snapshot(&self) -> StatsSnapshot {
        let stats = self
            .vocabulary
            .iter()
            .map(|(word, slot)| (word.clone(), WordStat::from(*slot)))
            .collect();
        StatsSnapshot { stats }
    }
}

/// On-disk shape of the local fallback stats cache.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CacheData {
    pub schema_version: u32,
    pub saved_at: DateTime<Utc>,
    pub stats: StatsSnapshot,
}

impl Default for CacheData {
    fn default() -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            saved_at: Utc::now(),
            stats: StatsSnapshot::default(),
        }
    }
}

impl CacheData {
    /// Check if loaded data has a stale schema version and needs reset.
    pub fn needs_reset(&self) -> bool {
        self.schema_version != SCHEMA_VERSION
    }
}
