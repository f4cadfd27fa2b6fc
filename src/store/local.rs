use std::fs;
use std::io::Write;
use std::path::PathBuf;

use anyhow::Result;
use chrono::Utc;

use crate::engine::stats::StatsSnapshot;
use crate::store::schema::CacheData;

/// Local per-user fallback cache of the stats snapshot. Refreshed after a
/// successful remote load and after every answer, so a later bootstrap that
/// cannot reach the remote store still starts from recent counters.
pub struct LocalCache {
    base_dir: PathBuf,
}

impl LocalCache {
    pub fn new() -> Result<Self> {
        let base_dir = dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("kotoba");
        fs::create_dir_all(&base_dir)?;
        Ok(Self { base_dir })
    }

    #[allow(dead_code)] // Used by integration tests
    pub fn with_base_dir(base_dir: PathBuf) -> Result<Self> {
        fs::create_dir_all(&base_dir)?;
        Ok(Self { base_dir })
    }

    fn stats_path(&self, user: &str) -> PathBuf {
        self.base_dir.join(format!("stats_{}.json", sanitize(user)))
    }

    /// Load the cached snapshot, or an empty one if the file is missing,
    /// unreadable, or carries a stale schema version.
    pub fn load_stats(&self, user: &str) -> StatsSnapshot {
        let path = self.stats_path(user);
        if !path.exists() {
            return StatsSnapshot::default();
        }
        let data: CacheData = fs::read_to_string(&path)
            .ok()
            .and_then(|content| serde_json::from_str(&content).ok())
            .unwrap_or_default();
        if data.needs_reset() {
            return StatsSnapshot::default();
        }
        data.stats
    }

    pub fn save_stats(&self, user: &str, stats: &StatsSnapshot) -> Result<()> {
        let data = CacheData {
            saved_at: Utc::now(),
            stats: stats.clone(),
            ..CacheData::default()
        };

        let path = self.stats_path(user);
        let tmp_path = path.with_extension("tmp");

        let json = serde_json::to_string_pretty(&data)?;
        let mut file = fs::File::create(&tmp_path)?;
        file.write_all(json.as_bytes())?;
        file.sync_all()?;

        fs::rename(&tmp_path, &path)?;
        Ok(())
    }
}

fn sanitize(key: &str) -> String {
    key.chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '-' || c == '_' || c == '.' {
                c
            } else {
                '_'
            }
        })
        .collect()
}
