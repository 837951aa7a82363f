// Pairwise item similarity for near-duplicate detection.
//
// The score starts from a blend of title and body token Jaccard similarity,
// then a few story-level heuristics can raise it to a floor:
//
//   - one title (>= 20 chars) contained in the other      -> at least 0.85
//   - same domain and title similarity > 0.5              -> at least 0.80
//   - same story (shared entities or shared 3-word phrases) -> at least 0.75
//
// Features are extracted once per item (ItemFeatures) so the O(n^2) pairwise
// pass only compares precomputed sets.

use std::collections::{BTreeSet, HashSet};
use std::sync::LazyLock;

use regex_lite::Regex;
use stop_words::{get, LANGUAGE};

use super::url::url_domain;
use crate::items::ContentItem;

const SUBSTRING_MIN_CHARS: usize = 20;
const SUBSTRING_FLOOR: f64 = 0.85;
const SAME_DOMAIN_TITLE_MIN: f64 = 0.5;
const SAME_DOMAIN_FLOOR: f64 = 0.8;
const SAME_STORY_FLOOR: f64 = 0.75;
const ENTITY_OVERLAP_RATIO: f64 = 0.6;
const ENTITY_MIN_SHARED: usize = 3;
const PHRASE_MIN_SHARED: usize = 2;

static STOP_WORDS: LazyLock<HashSet<String>> =
    LazyLock::new(|| get(LANGUAGE::English).into_iter().collect());

static CAPITALIZED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[A-Z][A-Za-z]+\b").expect("valid capitalized-word regex"));
static QUOTED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#""([^"]{3,})"|“([^”]{3,})”"#).expect("valid quoted-phrase regex")
});
static NUMBERS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\d+(?:[.,]\d+)*%?").expect("valid number regex"));
static HONORIFIC_NAMES: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:Mr|Mrs|Ms|Dr|Prof|Gen|Sen|Rep|Gov|President|Minister)\.?\s+[A-Z][a-z]+")
        .expect("valid honorific regex")
});

/// Precomputed comparison features for one item.
#[derive(Debug, Clone)]
pub struct ItemFeatures {
    title_lower: String,
    title_tokens: BTreeSet<String>,
    text_tokens: BTreeSet<String>,
    domain: Option<String>,
    entities: BTreeSet<String>,
    phrases: BTreeSet<String>,
}

impl ItemFeatures {
    pub fn from_item(item: &ContentItem) -> Self {
        let combined = item.combined_text();
        Self {
            title_lower: collapse_whitespace(&item.title.to_lowercase()),
            title_tokens: word_tokens(&item.title),
            text_tokens: item.text.as_deref().map(word_tokens).unwrap_or_default(),
            domain: url_domain(&item.url),
            entities: extract_entities(&combined),
            phrases: three_word_phrases(&combined),
        }
    }
}

/// Lowercased letter/digit tokens longer than two characters.
pub fn word_tokens(text: &str) -> BTreeSet<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| t.chars().count() > 2)
        .map(str::to_string)
        .collect()
}

/// Set Jaccard similarity. Two empty sets share nothing, so they score 0.
pub fn jaccard(a: &BTreeSet<String>, b: &BTreeSet<String>) -> f64 {
    let union = a.union(b).count();
    if union == 0 {
        return 0.0;
    }
    a.intersection(b).count() as f64 / union as f64
}

/// Key entities: capitalized words, quoted phrases, numbers/percentages and
/// honorific + name pairs. Returned lowercased.
pub fn extract_entities(text: &str) -> BTreeSet<String> {
    let mut entities = BTreeSet::new();

    for m in CAPITALIZED.find_iter(text) {
        let word = m.as_str().to_lowercase();
        if !STOP_WORDS.contains(&word) {
            entities.insert(word);
        }
    }
    for caps in QUOTED.captures_iter(text) {
        if let Some(phrase) = caps.get(1).or_else(|| caps.get(2)) {
            entities.insert(collapse_whitespace(&phrase.as_str().to_lowercase()));
        }
    }
    for m in NUMBERS.find_iter(text) {
        entities.insert(m.as_str().to_string());
    }
    for m in HONORIFIC_NAMES.find_iter(text) {
        entities.insert(collapse_whitespace(&m.as_str().to_lowercase().replace('.', "")));
    }

    entities
}

/// Consecutive 3-word phrases after dropping English stop words.
pub fn three_word_phrases(text: &str) -> BTreeSet<String> {
    let lower = text.to_lowercase();
    let words: Vec<&str> = lower
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| w.chars().count() > 1 && !STOP_WORDS.contains(*w))
        .collect();
    words.windows(3).map(|w| w.join(" ")).collect()
}

/// Whether two items look like coverage of the same story.
fn same_story(a: &ItemFeatures, b: &ItemFeatures) -> bool {
    let shared_entities = a.entities.intersection(&b.entities).count();
    let smaller = a.entities.len().min(b.entities.len());
    if smaller > 0 {
        let ratio = shared_entities as f64 / smaller as f64;
        if ratio >= ENTITY_OVERLAP_RATIO && shared_entities >= ENTITY_MIN_SHARED {
            return true;
        }
    }
    a.phrases.intersection(&b.phrases).count() >= PHRASE_MIN_SHARED
}

fn title_contains_other(a: &ItemFeatures, b: &ItemFeatures) -> bool {
    let (shorter, longer) = if a.title_lower.chars().count() <= b.title_lower.chars().count() {
        (&a.title_lower, &b.title_lower)
    } else {
        (&b.title_lower, &a.title_lower)
    };
    shorter.chars().count() >= SUBSTRING_MIN_CHARS && longer.contains(shorter.as_str())
}

/// Similarity in [0, 1] between two precomputed feature sets.
pub fn feature_similarity(a: &ItemFeatures, b: &ItemFeatures) -> f64 {
    let title_sim = jaccard(&a.title_tokens, &b.title_tokens);

    let mut sim = title_sim;
    if title_sim > 0.4 && !a.text_tokens.is_empty() && !b.text_tokens.is_empty() {
        let text_sim = jaccard(&a.text_tokens, &b.text_tokens);
        sim = if text_sim > 0.5 {
            (title_sim * 0.4 + text_sim * 0.6).max(0.7)
        } else {
            title_sim * 0.7 + text_sim * 0.3
        };
    }

    if title_contains_other(a, b) {
        sim = sim.max(SUBSTRING_FLOOR);
    }
    if a.domain.is_some() && a.domain == b.domain && title_sim > SAME_DOMAIN_TITLE_MIN {
        sim = sim.max(SAME_DOMAIN_FLOOR);
    }
    if sim < SAME_STORY_FLOOR && same_story(a, b) {
        sim = SAME_STORY_FLOOR;
    }

    sim.clamp(0.0, 1.0)
}

/// Similarity in [0, 1] between two items.
pub fn item_similarity(a: &ContentItem, b: &ContentItem) -> f64 {
    feature_similarity(&ItemFeatures::from_item(a), &ItemFeatures::from_item(b))
}

fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
