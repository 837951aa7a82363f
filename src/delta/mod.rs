// Delta engine — what changed since yesterday.
//
// Compares today's tension, emotions and topics against the prior-day
// snapshot. Without a snapshot every delta is zero. Topic matching is
// one-sided best match: each of today's topics looks for its closest
// keyword overlap among yesterday's topics, and several of today's topics
// may match the same one.

pub mod snapshot;
pub mod store;

use tracing::debug;

use crate::scoring::emotion::{EmotionDeltas, EmotionDistribution};
use crate::topics::Topic;
use snapshot::Snapshot;

/// Below this best-match keyword overlap, a topic counts as new.
pub const NEW_TOPIC_OVERLAP: f64 = 0.3;

/// Change in tension index since yesterday (0 without a snapshot).
pub fn tension_delta(current: f64, yesterday: Option<&Snapshot>) -> f64 {
    yesterday.map_or(0.0, |s| current - s.tension_index)
}

/// |A ∩ B| / max(|A|, |B|) over two keyword lists. 0 if both are empty.
pub fn keyword_overlap(a: &[String], b: &[String]) -> f64 {
    let longest = a.len().max(b.len());
    if longest == 0 {
        return 0.0;
    }
    let shared = a.iter().filter(|k| b.contains(k)).count();
    shared as f64 / longest as f64
}

/// 1 if the topic is new since yesterday, 0 if it was seen (or no snapshot).
pub fn topic_delta(topic: &Topic, yesterday: Option<&Snapshot>) -> u8 {
    let Some(snapshot) = yesterday else {
        return 0;
    };

    let best = snapshot
        .topics
        .iter()
        .map(|prior| keyword_overlap(&topic.keywords, &prior.keywords))
        .fold(0.0, f64::max);

    debug!(topic = %topic.id, best_overlap = best, "Matched topic against yesterday");

    if best < NEW_TOPIC_OVERLAP {
        1
    } else {
        0
    }
}

/// Set `delta` on every topic from the prior-day snapshot.
pub fn apply_topic_deltas(topics: &mut [Topic], yesterday: Option<&Snapshot>) {
    for topic in topics.iter_mut() {
        topic.delta = topic_delta(topic, yesterday);
    }
}

/// Per-category emotion change since yesterday (all zero without a snapshot).
pub fn emotion_deltas(current: &EmotionDistribution, yesterday: Option<&Snapshot>) -> EmotionDeltas {
    match yesterday {
        Some(s) => current.minus(&s.emotions),
        None => EmotionDeltas::default(),
    }
}
