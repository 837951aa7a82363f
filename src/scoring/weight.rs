// Item weighting shared by emotion aggregation and topic importance.
//
// weight = recency * log10(min(engagement, cap) + 2) * (relevance ?? 0.5)
//
// Recency decays exponentially: an item loses half its weight every
// `half_life_hours`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::items::ContentItem;

/// Relevance assumed for items the relevance scorer never touched.
pub const DEFAULT_RELEVANCE: f64 = 0.5;

/// Parameters for recency decay and engagement capping.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeightParams {
    /// Hours for an item's recency weight to halve (default 6)
    pub half_life_hours: f64,
    /// Engagement above this is ignored (default 1000)
    pub engagement_cap: u64,
}

impl Default for WeightParams {
    fn default() -> Self {
        Self {
            half_life_hours: 6.0,
            engagement_cap: 1000,
        }
    }
}

/// Exponential recency decay, 1.0 for a brand-new item.
///
/// Items dated in the future count as age zero.
pub fn recency_weight(created_at: DateTime<Utc>, now: DateTime<Utc>, half_life_hours: f64) -> f64 {
    let age_hours = ((now - created_at).num_seconds() as f64 / 3600.0).max(0.0);
    (-0.693 * age_hours / half_life_hours).exp()
}

/// Combined recency * engagement * relevance weight for one item.
pub fn item_weight(item: &ContentItem, now: DateTime<Utc>, params: &WeightParams) -> f64 {
    let recency = recency_weight(item.created_at, now, params.half_life_hours);
    let engagement = (item.engagement.min(params.engagement_cap) as f64 + 2.0).log10();
    let relevance = item.relevance_score.unwrap_or(DEFAULT_RELEVANCE);
    recency * engagement * relevance
}
