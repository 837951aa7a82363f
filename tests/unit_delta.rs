// Unit tests for the delta engine and snapshots.
//
// Tests tension/topic/emotion deltas against a prior-day snapshot,
// the one-sided best-match topic rule, and build_snapshot truncation.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use moodpulse::delta::snapshot::{build_snapshot, Snapshot, SnapshotTopic, SNAPSHOT_TOPIC_LIMIT};
use moodpulse::delta::{apply_topic_deltas, emotion_deltas, keyword_overlap, tension_delta, topic_delta};
use moodpulse::scoring::emotion::{Emotion, EmotionDistribution};
use moodpulse::topics::Topic;

fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
}

fn strings(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| w.to_string()).collect()
}

fn topic(id: &str, keywords: &[&str]) -> Topic {
    Topic {
        id: id.to_string(),
        title: id.to_string(),
        summary: None,
        keywords: strings(keywords),
        emotions: EmotionDistribution::neutral(),
        weight: 1.0,
        delta: 0,
        receipts: vec![],
        member_ids: vec![format!("{id}-a"), format!("{id}-b")],
    }
}

fn yesterday(tension: f64, topics: &[&[&str]]) -> Snapshot {
    Snapshot {
        date: date().pred_opt().unwrap(),
        tension_index: tension,
        emotions: EmotionDistribution::pure(Emotion::Anxiety),
        topics: topics
            .iter()
            .map(|k| SnapshotTopic {
                keywords: strings(k),
                item_ids: vec![],
            })
            .collect(),
        enriched: BTreeMap::new(),
    }
}

// ============================================================
// tension_delta
// ============================================================

#[test]
fn tension_delta_against_snapshot() {
    let snap = yesterday(40.0, &[]);
    assert_eq!(tension_delta(60.0, Some(&snap)), 20.0);
    assert_eq!(tension_delta(25.0, Some(&snap)), -15.0);
}

#[test]
fn tension_delta_without_snapshot_is_zero() {
    assert_eq!(tension_delta(60.0, None), 0.0);
}

// ============================================================
// topic_delta
// ============================================================

#[test]
fn topic_delta_without_snapshot_is_zero() {
    assert_eq!(topic_delta(&topic("t", &["rocket", "tel", "aviv"]), None), 0);
}

#[test]
fn unrelated_topic_is_new() {
    let snap = yesterday(10.0, &[&["election", "ballot", "turnout"]]);
    assert_eq!(topic_delta(&topic("t", &["rocket", "tel", "aviv"]), Some(&snap)), 1);
}

#[test]
fn empty_snapshot_topic_list_makes_everything_new() {
    let snap = yesterday(10.0, &[]);
    assert_eq!(topic_delta(&topic("t", &["rocket"]), Some(&snap)), 1);
}

#[test]
fn overlap_at_threshold_is_seen() {
    // 3 shared of max(5, 10) = 0.3 -> not new
    let snap = yesterday(
        10.0,
        &[&["a", "b", "c", "d", "e", "f", "g", "h", "i", "j"]],
    );
    let t = topic("t", &["a", "b", "c", "x", "y"]);
    assert!((keyword_overlap(&t.keywords, &snap.topics[0].keywords) - 0.3).abs() < 1e-9);
    assert_eq!(topic_delta(&t, Some(&snap)), 0);
}

#[test]
fn best_match_wins_over_other_topics() {
    let snap = yesterday(
        10.0,
        &[
            &["election", "ballot", "turnout", "vote", "poll"],
            &["rocket", "tel", "aviv", "siren", "idf"],
        ],
    );
    let t = topic("t", &["rocket", "tel", "aviv", "interceptor", "night"]);
    assert_eq!(topic_delta(&t, Some(&snap)), 0);
}

#[test]
fn several_topics_may_match_the_same_prior_topic() {
    let snap = yesterday(10.0, &[&["rocket", "tel", "aviv", "siren", "idf"]]);
    let mut topics = vec![
        topic("a", &["rocket", "tel", "aviv", "north", "night"]),
        topic("b", &["siren", "idf", "rocket", "haifa", "port"]),
        topic("c", &["bakery", "bread", "prize", "sourdough", "flour"]),
    ];
    apply_topic_deltas(&mut topics, Some(&snap));
    let deltas: Vec<u8> = topics.iter().map(|t| t.delta).collect();
    assert_eq!(deltas, vec![0, 0, 1]);
}

// ============================================================
// emotion_deltas
// ============================================================

#[test]
fn emotion_deltas_subtract_per_category() {
    let snap = yesterday(10.0, &[]);
    let today = EmotionDistribution {
        anxiety: 0.25,
        hope: 0.75,
        ..Default::default()
    };
    let deltas = emotion_deltas(&today, Some(&snap));
    assert!((deltas.get(Emotion::Anxiety) + 0.75).abs() < 1e-9);
    assert!((deltas.get(Emotion::Hope) - 0.75).abs() < 1e-9);
    assert_eq!(deltas.get(Emotion::Neutral), 0.0);
}

#[test]
fn emotion_deltas_without_snapshot_are_zero() {
    let deltas = emotion_deltas(&EmotionDistribution::pure(Emotion::Anger), None);
    assert!(deltas.iter().all(|(_, v)| v == 0.0));
}

// ============================================================
// build_snapshot
// ============================================================

#[test]
fn snapshot_keeps_top_ten_in_caller_order() {
    let topics: Vec<Topic> = (0..15)
        .map(|i| topic(&format!("t{i}"), &["kw"]))
        .collect();
    let mut enriched = BTreeMap::new();
    enriched.insert("topic:t0:title".to_string(), "Headline".to_string());

    let snap = build_snapshot(date(), 33.0, &EmotionDistribution::neutral(), &topics, enriched);
    assert_eq!(snap.topics.len(), SNAPSHOT_TOPIC_LIMIT);
    assert_eq!(snap.topics[0].item_ids, vec!["t0-a", "t0-b"]);
    assert_eq!(snap.topics[9].item_ids, vec!["t9-a", "t9-b"]);
    assert_eq!(snap.enriched["topic:t0:title"], "Headline");
    assert_eq!(snap.tension_index, 33.0);
}

#[test]
fn snapshot_json_drops_receipts() {
    let snap = build_snapshot(
        date(),
        12.0,
        &EmotionDistribution::neutral(),
        &[topic("t", &["rocket"])],
        BTreeMap::new(),
    );
    let json = serde_json::to_string(&snap).unwrap();
    assert!(!json.contains("receipts"));
    assert_eq!(Snapshot::from_json(&json), Some(snap));
}
