// Near-duplicate detection.
//
// Items are visited from most to least engaging, so the representative of
// any group of similar items is the one with the highest engagement. An item
// is a duplicate when its normalized URL was already accepted, or when its
// similarity to any accepted item reaches the threshold.
//
// Two entry points share the same decision procedure:
//   - deduplicate: drop duplicates, return the survivors
//   - mark_duplicates: keep everything, set `duplicate_of` on duplicates

pub mod similarity;
pub mod url;

use std::cmp::Ordering;
use std::collections::HashMap;

use tracing::{debug, info};

use crate::items::ContentItem;
use crate::scoring::weight::DEFAULT_RELEVANCE;
use similarity::{feature_similarity, ItemFeatures};
use url::normalize_url;

/// Default similarity at or above which two items are treated as the same.
pub const DEFAULT_DEDUP_THRESHOLD: f64 = 0.5;

/// Visiting order: engagement desc, relevance desc, id asc.
fn representative_order(a: &ContentItem, b: &ContentItem) -> Ordering {
    b.engagement
        .cmp(&a.engagement)
        .then_with(|| {
            let ra = a.relevance_score.unwrap_or(DEFAULT_RELEVANCE);
            let rb = b.relevance_score.unwrap_or(DEFAULT_RELEVANCE);
            rb.partial_cmp(&ra).unwrap_or(Ordering::Equal)
        })
        .then_with(|| a.id.cmp(&b.id))
}

/// For each item (by original index), the index of the representative it
/// duplicates, or `None` if it survives. Also returns the visiting order.
fn plan(items: &[ContentItem], threshold: f64) -> (Vec<usize>, Vec<Option<usize>>) {
    let mut order: Vec<usize> = (0..items.len()).collect();
    order.sort_by(|&a, &b| representative_order(&items[a], &items[b]));

    let features: Vec<ItemFeatures> = items.iter().map(ItemFeatures::from_item).collect();
    let mut seen_urls: HashMap<String, usize> = HashMap::new();
    let mut accepted: Vec<usize> = Vec::new();
    let mut representative: Vec<Option<usize>> = vec![None; items.len()];

    for &idx in &order {
        let url_key = normalize_url(&items[idx].url);
        if !url_key.is_empty() {
            if let Some(&rep) = seen_urls.get(&url_key) {
                debug!(item = %items[idx].id, duplicate_of = %items[rep].id, "Exact URL duplicate");
                representative[idx] = Some(rep);
                continue;
            }
        }

        let mut best: Option<(usize, f64)> = None;
        for &acc in &accepted {
            let sim = feature_similarity(&features[idx], &features[acc]);
            if sim >= threshold && best.is_none_or(|(_, s)| sim > s) {
                best = Some((acc, sim));
            }
        }

        match best {
            Some((rep, sim)) => {
                debug!(
                    item = %items[idx].id,
                    duplicate_of = %items[rep].id,
                    similarity = sim,
                    "Near duplicate"
                );
                representative[idx] = Some(rep);
            }
            None => {
                accepted.push(idx);
                if !url_key.is_empty() {
                    seen_urls.insert(url_key, idx);
                }
            }
        }
    }

    (order, representative)
}

/// Drop near-duplicates, keeping the most engaging item of each group.
///
/// Survivors come back in visiting order (most engaging first) with
/// `duplicate_of` cleared. Running this twice gives the same result as once.
pub fn deduplicate(items: Vec<ContentItem>, threshold: f64) -> Vec<ContentItem> {
    let total = items.len();
    let (order, representative) = plan(&items, threshold);

    let mut slots: Vec<Option<ContentItem>> = items.into_iter().map(Some).collect();
    let survivors: Vec<ContentItem> = order
        .into_iter()
        .filter(|&idx| representative[idx].is_none())
        .filter_map(|idx| slots[idx].take())
        .map(|mut item| {
            item.duplicate_of = None;
            item
        })
        .collect();

    info!(
        input = total,
        kept = survivors.len(),
        removed = total - survivors.len(),
        threshold,
        "Deduplicated items"
    );
    survivors
}

/// Mark near-duplicates in place instead of dropping them.
///
/// Every item keeps its position. Duplicates get `duplicate_of` set to their
/// representative's id; survivors get it cleared. Returns the number marked.
pub fn mark_duplicates(items: &mut [ContentItem], threshold: f64) -> usize {
    let (_, representative) = plan(items, threshold);
    let rep_ids: Vec<Option<String>> = representative
        .iter()
        .map(|rep| rep.map(|r| items[r].id.clone()))
        .collect();

    let mut marked = 0;
    for (item, rep_id) in items.iter_mut().zip(rep_ids) {
        if rep_id.is_some() {
            marked += 1;
        }
        item.duplicate_of = rep_id;
    }

    info!(total = items.len(), marked, threshold, "Marked duplicate items");
    marked
}
