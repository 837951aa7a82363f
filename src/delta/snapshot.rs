// Daily snapshot — the persisted summary the delta engine compares against.
//
// A snapshot keeps only what tomorrow's run needs: the tension index, the
// emotion mix, and an abbreviated topic list (keywords + member ids, top 10).
// Receipt payloads are dropped. Externally generated text (titles, summaries)
// rides along as an opaque string map.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::scoring::emotion::EmotionDistribution;
use crate::topics::Topic;

/// Topics kept per snapshot.
pub const SNAPSHOT_TOPIC_LIMIT: usize = 10;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotTopic {
    pub keywords: Vec<String>,
    pub item_ids: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub date: NaiveDate,
    pub tension_index: f64,
    pub emotions: EmotionDistribution,
    pub topics: Vec<SnapshotTopic>,
    /// Opaque externally generated strings keyed by identifier
    #[serde(default)]
    pub enriched: BTreeMap<String, String>,
}

impl Snapshot {
    /// Parse a persisted snapshot, treating structurally invalid data as absent.
    pub fn from_json(json: &str) -> Option<Snapshot> {
        match serde_json::from_str::<Snapshot>(json) {
            Ok(snapshot) if snapshot.tension_index.is_finite() => Some(snapshot),
            Ok(snapshot) => {
                warn!(date = %snapshot.date, "Snapshot has a non-finite tension index, ignoring it");
                None
            }
            Err(e) => {
                warn!(error = %e, "Snapshot failed validation, ignoring it");
                None
            }
        }
    }
}

/// Build today's snapshot from the already ordered topic list.
///
/// Only the first SNAPSHOT_TOPIC_LIMIT topics are kept, in the caller's order.
pub fn build_snapshot(
    date: NaiveDate,
    tension_index: f64,
    emotions: &EmotionDistribution,
    topics: &[Topic],
    enriched: BTreeMap<String, String>,
) -> Snapshot {
    Snapshot {
        date,
        tension_index,
        emotions: *emotions,
        topics: topics
            .iter()
            .take(SNAPSHOT_TOPIC_LIMIT)
            .map(|t| SnapshotTopic {
                keywords: t.keywords.clone(),
                item_ids: t.member_ids.clone(),
            })
            .collect(),
        enriched,
    }
}
