// Unit tests for emotion scoring, aggregation and the tension index.
//
// Tests isolated pure functions: score_item lexicon behavior,
// aggregate_emotions invariants (sums to one, recency weighting),
// and calculate_tension_index boundaries with default and custom weights.

use chrono::{Duration, TimeZone, Utc};

use moodpulse::items::{ContentItem, SourceType};
use moodpulse::scoring::emotion::{
    aggregate_emotions, normalize_distribution, score_item, Emotion, EmotionDistribution,
};
use moodpulse::scoring::tension::{calculate_tension_index, TensionWeights};
use moodpulse::scoring::weight::WeightParams;

fn now() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 18, 0, 0).unwrap()
}

fn item(title: &str, text: Option<&str>, hours_old: i64, engagement: u64) -> ContentItem {
    ContentItem::new(
        SourceType::News,
        "en",
        title,
        text,
        &format!("https://example.com/{title}"),
        now() - Duration::hours(hours_old),
    )
    .with_engagement(engagement)
}

// ============================================================
// score_item
// ============================================================

#[test]
fn no_keywords_means_fully_neutral() {
    let it = item("Town council approves new bus timetable", Some("Routes 4 and 9 change."), 1, 3);
    let dist = score_item(&it);
    assert_eq!(dist.neutral, 1.0);
    assert_eq!(dist.sum(), 1.0);
}

#[test]
fn keyword_matching_is_case_insensitive() {
    let it = item("CEASEFIRE holds", None, 1, 3);
    assert_eq!(score_item(&it), EmotionDistribution::pure(Emotion::Hope));
}

#[test]
fn mixed_item_splits_mass() {
    let it = item("Grief and hope after the flood", None, 1, 3);
    let dist = score_item(&it);
    assert!((dist.sadness - 0.5).abs() < 1e-9, "{dist:?}");
    assert!((dist.hope - 0.5).abs() < 1e-9, "{dist:?}");
}

#[test]
fn lexicon_ignores_words_that_merely_contain_an_entry() {
    let it = item("Opportunity knocks for community theatre", None, 1, 3);
    assert_eq!(score_item(&it), EmotionDistribution::neutral());

    let it = item("Dangerous heat and deadline pressure", None, 1, 3);
    assert_eq!(score_item(&it), EmotionDistribution::pure(Emotion::Anxiety));
}

// ============================================================
// aggregate_emotions
// ============================================================

#[test]
fn aggregate_sums_to_one_for_non_empty_sets() {
    let sets = vec![
        vec![item("Outrage over scandal", None, 1, 10)],
        vec![
            item("Outrage over scandal", None, 1, 10),
            item("Hope for peace talks", None, 30, 0),
            item("Quiet day at the market", None, 2, 5000),
        ],
        vec![item("Nothing to see", None, 200, 0)],
    ];
    for set in sets {
        let agg = aggregate_emotions(&set, now(), &WeightParams::default());
        assert!((agg.sum() - 1.0).abs() < 1e-5, "sum = {}", agg.sum());
    }
}

#[test]
fn recent_items_dominate() {
    let fresh = item("Furious protest downtown", None, 0, 100);
    let stale = item("Ceasefire brings relief", None, 48, 100);
    let agg = aggregate_emotions(&[fresh, stale], now(), &WeightParams::default());
    assert!(agg.anger > agg.hope * 10.0, "{agg:?}");
}

#[test]
fn longer_half_life_flattens_recency() {
    let fresh = item("Furious protest downtown", None, 0, 100);
    let stale = item("Ceasefire brings relief", None, 12, 100);
    let short = aggregate_emotions(&[fresh.clone(), stale.clone()], now(), &WeightParams::default());
    let long = aggregate_emotions(
        &[fresh, stale],
        now(),
        &WeightParams {
            half_life_hours: 48.0,
            ..Default::default()
        },
    );
    assert!(long.hope > short.hope);
}

#[test]
fn normalize_keeps_proportions() {
    let raw = EmotionDistribution {
        anxiety: 3.0,
        resilience: 1.0,
        ..Default::default()
    };
    let dist = normalize_distribution(&raw);
    assert!((dist.anxiety - 0.75).abs() < 1e-9);
    assert!((dist.resilience - 0.25).abs() < 1e-9);
}

// ============================================================
// calculate_tension_index
// ============================================================

#[test]
fn tension_all_neutral_is_zero() {
    assert_eq!(
        calculate_tension_index(&EmotionDistribution::neutral(), &TensionWeights::default()),
        0.0
    );
}

#[test]
fn tension_all_anger_is_high_and_capped() {
    let t = calculate_tension_index(
        &EmotionDistribution::pure(Emotion::Anger),
        &TensionWeights::default(),
    );
    assert!(t > 50.0, "got {t}");
    assert!(t <= 100.0, "got {t}");
}

#[test]
fn tension_weights_are_tunable() {
    let dist = EmotionDistribution::pure(Emotion::Cynicism);
    let default = calculate_tension_index(&dist, &TensionWeights::default());
    assert_eq!(default, 40.0);

    let mut weights = TensionWeights::default();
    weights.negative.cynicism = 0.9;
    assert_eq!(calculate_tension_index(&dist, &weights), 90.0);
}

#[test]
fn tension_is_never_negative() {
    for emotion in [Emotion::Hope, Emotion::Resilience, Emotion::Excitement] {
        let t = calculate_tension_index(&EmotionDistribution::pure(emotion), &TensionWeights::default());
        assert_eq!(t, 0.0, "{emotion} should not produce tension");
    }
}
