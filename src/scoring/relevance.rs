// Relevance scoring — how on-topic an item is for this run.
//
// score = trust(source) * 0.3
//       + min(1, keyword_matches / 3) * 0.5
//       + 0.1 if the item came from search
//
// clamped to [0, 1]. The keyword list is passed in explicitly for every batch,
// so independent runs with different keyword lists never interfere.

use crate::items::{ContentItem, SourceRegistry, SourceType};

const TRUST_WEIGHT: f64 = 0.3;
const KEYWORD_WEIGHT: f64 = 0.5;
/// Matches needed for the full keyword contribution
const KEYWORD_SATURATION: f64 = 3.0;
const SEARCH_BOOST: f64 = 0.1;

/// Count how many of the configured keywords occur in the item's text.
///
/// Matching is case-insensitive substring matching; each keyword counts once
/// no matter how often it appears. Blank keywords are ignored.
pub fn keyword_matches(item: &ContentItem, keywords: &[String]) -> usize {
    let haystack = item.combined_text().to_lowercase();
    keywords
        .iter()
        .map(|k| k.trim().to_lowercase())
        .filter(|k| !k.is_empty() && haystack.contains(k.as_str()))
        .count()
}

/// Score a single item's topical relevance in [0, 1].
pub fn score_relevance(item: &ContentItem, keywords: &[String], sources: &SourceRegistry) -> f64 {
    let base = sources.trust(item.source_type) * TRUST_WEIGHT;

    let matches = keyword_matches(item, keywords) as f64;
    let keyword_score = (matches / KEYWORD_SATURATION).min(1.0) * KEYWORD_WEIGHT;

    let boost = if item.source_type == SourceType::Search {
        SEARCH_BOOST
    } else {
        0.0
    };

    (base + keyword_score + boost).clamp(0.0, 1.0)
}

/// Score every item in a batch, storing the result on the item.
pub fn apply_relevance(items: &mut [ContentItem], keywords: &[String], sources: &SourceRegistry) {
    for item in items.iter_mut() {
        item.relevance_score = Some(score_relevance(item, keywords, sources));
    }
}
