// Emotion scoring — deterministic keyword lexicon, per-item and aggregate.
//
// Each item gets a distribution over eight emotion categories by counting
// case-insensitive word-start hits from a fixed lexicon. Items with no hits are
// fully neutral. A set of items is aggregated by weighting each item's
// distribution by recency, engagement and relevance (see scoring::weight).

use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use regex_lite::Regex;
use serde::{Deserialize, Serialize};

use super::weight::{item_weight, WeightParams};
use crate::items::ContentItem;

/// The eight emotion categories. `Neutral` absorbs items with no signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Emotion {
    Anger,
    Anxiety,
    Sadness,
    Cynicism,
    Resilience,
    Hope,
    Excitement,
    Neutral,
}

impl Emotion {
    pub const ALL: [Emotion; 8] = [
        Emotion::Anger,
        Emotion::Anxiety,
        Emotion::Sadness,
        Emotion::Cynicism,
        Emotion::Resilience,
        Emotion::Hope,
        Emotion::Excitement,
        Emotion::Neutral,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Emotion::Anger => "anger",
            Emotion::Anxiety => "anxiety",
            Emotion::Sadness => "sadness",
            Emotion::Cynicism => "cynicism",
            Emotion::Resilience => "resilience",
            Emotion::Hope => "hope",
            Emotion::Excitement => "excitement",
            Emotion::Neutral => "neutral",
        }
    }
}

impl std::fmt::Display for Emotion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Lexicon entries per non-neutral category, matched case-insensitively at
/// the start of a word. A trailing `*` marks a stem that may continue
/// ("devastat*" catches "devastated" and "devastating"); every other entry
/// must match a whole word, so "dead" stays out of "deadline" and "record"
/// out of "recorded".
const LEXICON: [(Emotion, &[&str]); 7] = [
    (
        Emotion::Anger,
        &[
            "outrage*", "furious", "anger", "angry", "enraged", "fury", "condemn*", "protest*",
            "riots", "rioters", "attack*", "violen*", "clash*", "hostil*", "backlash", "denounc*",
        ],
    ),
    (
        Emotion::Anxiety,
        &[
            "fear*", "worried", "worries", "anxious", "anxiety", "threat*", "warning*", "alarm*",
            "panic*", "uncertain*", "crisis", "danger*", "siren*", "escalat*", "tension*",
            "rocket*", "missile*",
        ],
    ),
    (
        Emotion::Sadness,
        &[
            "grief", "mourn*", "tragic", "tragedy", "sadness", "saddened", "killed", "victim*",
            "funeral*", "heartbreak*", "devastat*", "sorrow*", "dead", "loss",
        ],
    ),
    (
        Emotion::Cynicism,
        &[
            "corrupt*", "scandal*", "hypocri*", "lying", "cover-up", "incompeten*", "failed",
            "wasted", "scam*", "fraud*", "so-called", "excuse*",
        ],
    ),
    (
        Emotion::Resilience,
        &[
            "resilien*", "rebuild*", "recover*", "surviv*", "unity", "solidarity", "volunteer*",
            "support*", "endur*", "strength*", "together", "persever*",
        ],
    ),
    (
        Emotion::Hope,
        &[
            "hope*", "peace*", "ceasefire*", "agreement*", "breakthrough*", "progress*", "relief",
            "optimis*", "promising", "release*",
        ],
    ),
    (
        Emotion::Excitement,
        &[
            "excit*", "celebrat*", "record", "victor*", "triumph*", "launch*", "amazing",
            "thrill*", "historic", "champion*", "unveil*",
        ],
    ),
];

/// One alternation per category, compiled from `LEXICON`.
static LEXICON_PATTERNS: LazyLock<Vec<(Emotion, Regex)>> = LazyLock::new(|| {
    LEXICON
        .iter()
        .map(|(emotion, entries)| {
            let alternatives: Vec<String> = entries
                .iter()
                .map(|entry| match entry.strip_suffix('*') {
                    Some(stem) => regex_lite::escape(stem),
                    None => format!(r"{}\b", regex_lite::escape(entry)),
                })
                .collect();
            let pattern = format!(r"\b(?:{})", alternatives.join("|"));
            (
                *emotion,
                Regex::new(&pattern).expect("valid emotion lexicon pattern"),
            )
        })
        .collect()
});

/// A fixed-shape distribution over the eight categories.
///
/// Normalized distributions sum to 1.0; raw keyword counts use the same shape
/// before `normalize_distribution` is applied.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct EmotionDistribution {
    pub anger: f64,
    pub anxiety: f64,
    pub sadness: f64,
    pub cynicism: f64,
    pub resilience: f64,
    pub hope: f64,
    pub excitement: f64,
    pub neutral: f64,
}

impl EmotionDistribution {
    /// The fully neutral distribution (`neutral = 1`).
    pub fn neutral() -> Self {
        Self {
            neutral: 1.0,
            ..Self::default()
        }
    }

    /// A distribution with all mass on one category.
    pub fn pure(emotion: Emotion) -> Self {
        let mut dist = Self::default();
        *dist.get_mut(emotion) = 1.0;
        dist
    }

    pub fn get(&self, emotion: Emotion) -> f64 {
        match emotion {
            Emotion::Anger => self.anger,
            Emotion::Anxiety => self.anxiety,
            Emotion::Sadness => self.sadness,
            Emotion::Cynicism => self.cynicism,
            Emotion::Resilience => self.resilience,
            Emotion::Hope => self.hope,
            Emotion::Excitement => self.excitement,
            Emotion::Neutral => self.neutral,
        }
    }

    pub fn get_mut(&mut self, emotion: Emotion) -> &mut f64 {
        match emotion {
            Emotion::Anger => &mut self.anger,
            Emotion::Anxiety => &mut self.anxiety,
            Emotion::Sadness => &mut self.sadness,
            Emotion::Cynicism => &mut self.cynicism,
            Emotion::Resilience => &mut self.resilience,
            Emotion::Hope => &mut self.hope,
            Emotion::Excitement => &mut self.excitement,
            Emotion::Neutral => &mut self.neutral,
        }
    }

    /// (category, weight) pairs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (Emotion, f64)> + '_ {
        Emotion::ALL.iter().map(move |&e| (e, self.get(e)))
    }

    pub fn sum(&self) -> f64 {
        self.iter().map(|(_, v)| v).sum()
    }

    /// The highest-weighted category. Ties resolve to the earlier category.
    pub fn dominant(&self) -> Emotion {
        let mut best = (Emotion::Neutral, f64::MIN);
        for (emotion, value) in self.iter() {
            if value > best.1 {
                best = (emotion, value);
            }
        }
        best.0
    }

    /// Per-category difference `self - other`.
    pub fn minus(&self, other: &EmotionDistribution) -> EmotionDeltas {
        let mut deltas = EmotionDeltas::default();
        for emotion in Emotion::ALL {
            *deltas.0.get_mut(emotion) = self.get(emotion) - other.get(emotion);
        }
        deltas
    }
}

/// Signed per-category change between two distributions. Does not sum to 1.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmotionDeltas(EmotionDistribution);

impl EmotionDeltas {
    pub fn get(&self, emotion: Emotion) -> f64 {
        self.0.get(emotion)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Emotion, f64)> + '_ {
        self.0.iter()
    }

    pub fn is_zero(&self) -> bool {
        self.iter().all(|(_, v)| v == 0.0)
    }
}

/// Scale a raw distribution so its values sum to 1.
///
/// Negative and non-finite entries count as zero. An all-zero input becomes
/// the neutral distribution.
pub fn normalize_distribution(raw: &EmotionDistribution) -> EmotionDistribution {
    let mut clean = EmotionDistribution::default();
    for (emotion, value) in raw.iter() {
        if value.is_finite() && value > 0.0 {
            *clean.get_mut(emotion) = value;
        }
    }

    let total = clean.sum();
    if total <= 0.0 {
        return EmotionDistribution::neutral();
    }

    let mut out = EmotionDistribution::default();
    for (emotion, value) in clean.iter() {
        *out.get_mut(emotion) = value / total;
    }
    out
}

/// Raw lexicon hit counts for a piece of text (neutral is always 0).
pub fn count_emotion_keywords(text: &str) -> EmotionDistribution {
    let lower = text.to_lowercase();
    let mut counts = EmotionDistribution::default();
    for (emotion, pattern) in LEXICON_PATTERNS.iter() {
        let hits = pattern.find_iter(&lower).count();
        *counts.get_mut(*emotion) = hits as f64;
    }
    counts
}

/// Emotion distribution for a single item from its title and body.
pub fn score_item(item: &ContentItem) -> EmotionDistribution {
    let counts = count_emotion_keywords(&item.combined_text());
    if counts.sum() == 0.0 {
        return EmotionDistribution::neutral();
    }
    normalize_distribution(&counts)
}

/// Weighted aggregate distribution over a set of items.
///
/// Items marked as duplicates are skipped. Empty input, or input whose total
/// weight is zero, yields the neutral distribution.
pub fn aggregate_emotions(
    items: &[ContentItem],
    now: DateTime<Utc>,
    params: &WeightParams,
) -> EmotionDistribution {
    let mut weighted = EmotionDistribution::default();
    let mut total_weight = 0.0;

    for item in items.iter().filter(|i| !i.is_duplicate()) {
        let weight = item_weight(item, now, params);
        if weight <= 0.0 || !weight.is_finite() {
            continue;
        }
        let dist = score_item(item);
        for (emotion, value) in dist.iter() {
            *weighted.get_mut(emotion) += value * weight;
        }
        total_weight += weight;
    }

    if total_weight <= 0.0 {
        return EmotionDistribution::neutral();
    }

    let mut averaged = EmotionDistribution::default();
    for (emotion, value) in weighted.iter() {
        *averaged.get_mut(emotion) = value / total_weight;
    }
    normalize_distribution(&averaged)
}
