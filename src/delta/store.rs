// Snapshot store — where yesterday's snapshot comes from.
//
// The delta engine never does I/O; callers load the prior-day snapshot
// through this trait and pass it in. Stores must treat structurally invalid
// data as a missing snapshot rather than an error.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use tracing::{debug, info};

use super::snapshot::Snapshot;

pub trait SnapshotStore: Send + Sync {
    /// Load the snapshot for an exact date, if one exists.
    fn load(&self, date: NaiveDate) -> Result<Option<Snapshot>>;

    /// Persist a snapshot, replacing any existing one for the same date.
    fn save(&self, snapshot: &Snapshot) -> Result<()>;

    /// Load the snapshot for the day before `date`.
    fn load_prior_day(&self, date: NaiveDate) -> Result<Option<Snapshot>> {
        match date.pred_opt() {
            Some(prior) => self.load(prior),
            None => Ok(None),
        }
    }
}

/// In-memory store, for tests and for embedding in a long-running process.
#[derive(Default)]
pub struct MemorySnapshotStore {
    snapshots: Mutex<BTreeMap<NaiveDate, Snapshot>>,
}

impl MemorySnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SnapshotStore for MemorySnapshotStore {
    fn load(&self, date: NaiveDate) -> Result<Option<Snapshot>> {
        let snapshots = self
            .snapshots
            .lock()
            .map_err(|_| anyhow::anyhow!("snapshot store lock poisoned"))?;
        Ok(snapshots.get(&date).cloned())
    }

    fn save(&self, snapshot: &Snapshot) -> Result<()> {
        let mut snapshots = self
            .snapshots
            .lock()
            .map_err(|_| anyhow::anyhow!("snapshot store lock poisoned"))?;
        snapshots.insert(snapshot.date, snapshot.clone());
        Ok(())
    }
}

/// One JSON file per day: `<dir>/<YYYY-MM-DD>.json`.
pub struct JsonDirSnapshotStore {
    dir: PathBuf,
}

impl JsonDirSnapshotStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, date: NaiveDate) -> PathBuf {
        self.dir.join(format!("{}.json", date.format("%Y-%m-%d")))
    }
}

impl SnapshotStore for JsonDirSnapshotStore {
    fn load(&self, date: NaiveDate) -> Result<Option<Snapshot>> {
        let path = self.path_for(date);
        if !path.exists() {
            debug!(path = %path.display(), "No snapshot on disk");
            return Ok(None);
        }
        let json = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read snapshot {}", path.display()))?;
        Ok(Snapshot::from_json(&json))
    }

    fn save(&self, snapshot: &Snapshot) -> Result<()> {
        std::fs::create_dir_all(&self.dir)
            .with_context(|| format!("Failed to create snapshot dir {}", self.dir.display()))?;
        let path = self.path_for(snapshot.date);
        let json = serde_json::to_string_pretty(snapshot)?;
        std::fs::write(&path, json)
            .with_context(|| format!("Failed to write snapshot {}", path.display()))?;
        info!(path = %path.display(), topics = snapshot.topics.len(), "Saved snapshot");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::delta::snapshot::build_snapshot;
    use crate::scoring::emotion::EmotionDistribution;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
    }

    fn snap(date: NaiveDate, tension: f64) -> Snapshot {
        build_snapshot(date, tension, &EmotionDistribution::neutral(), &[], BTreeMap::new())
    }

    #[test]
    fn test_memory_store_prior_day() {
        let store = MemorySnapshotStore::new();
        store.save(&snap(day(9), 40.0)).unwrap();
        let prior = store.load_prior_day(day(10)).unwrap().unwrap();
        assert_eq!(prior.tension_index, 40.0);
        assert!(store.load_prior_day(day(9)).unwrap().is_none());
    }

    #[test]
    fn test_dir_store_roundtrip_and_corruption() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonDirSnapshotStore::new(dir.path().join("snaps"));
        assert!(store.load(day(1)).unwrap().is_none());

        store.save(&snap(day(1), 12.0)).unwrap();
        assert_eq!(store.load(day(1)).unwrap().unwrap().tension_index, 12.0);

        std::fs::write(store.dir().join("2024-03-02.json"), "{\"date\": 5}").unwrap();
        assert!(store.load(day(2)).unwrap().is_none());
    }
}
