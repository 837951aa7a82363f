// Greedy TF-IDF clustering of items into trending topics.
//
// This is a single-pass, first-seed-wins heuristic, not an optimal partition:
// walk the items in order; each item not yet assigned seeds a new cluster and
// pulls in every later unassigned item whose cosine similarity to the seed is
// at least the threshold. Results depend on item order, so items are sorted
// by id before clustering to make the order explicit and reproducible.
//
// Comparisons are O(n^2) in the number of items.

use std::collections::HashMap;

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::overlap::cosine_similarity;
use super::tfidf::vectorize;
use super::tokenize::tokenize;
use super::topic::{keyword_title, Receipt, Topic};
use crate::items::models::stable_hash;
use crate::items::ContentItem;
use crate::scoring::emotion::aggregate_emotions;
use crate::scoring::weight::{item_weight, WeightParams};

/// Knobs for topic clustering.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClusterParams {
    /// Minimum cosine similarity to the seed to join its cluster (default 0.25)
    pub similarity_threshold: f64,
    /// Maximum number of topics returned (default 12)
    pub max_topics: usize,
    /// Clusters with fewer members are dropped (default 2)
    pub min_cluster_size: usize,
    /// Keywords kept per topic (default 5)
    pub keywords_per_topic: usize,
    /// Receipts kept per topic (default 5)
    pub receipts_per_topic: usize,
}

impl Default for ClusterParams {
    fn default() -> Self {
        Self {
            similarity_threshold: 0.25,
            max_topics: 12,
            min_cluster_size: 2,
            keywords_per_topic: 5,
            receipts_per_topic: 5,
        }
    }
}

impl ClusterParams {
    /// Fail fast on settings that would silently misbehave.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.similarity_threshold) {
            anyhow::bail!(
                "similarity_threshold must be within [0, 1], got {}",
                self.similarity_threshold
            );
        }
        let counts = [
            ("max_topics", self.max_topics),
            ("min_cluster_size", self.min_cluster_size),
            ("keywords_per_topic", self.keywords_per_topic),
            ("receipts_per_topic", self.receipts_per_topic),
        ];
        for (name, value) in counts {
            if value < 1 {
                anyhow::bail!("{name} must be at least 1, got {value}");
            }
        }
        Ok(())
    }
}

/// Group item indices into clusters, seeds first.
///
/// `vectors[i]` is the TF-IDF vector for item i. Every index appears in
/// exactly one cluster.
pub fn greedy_clusters(vectors: &[Vec<f64>], threshold: f64) -> Vec<Vec<usize>> {
    let mut assigned = vec![false; vectors.len()];
    let mut clusters = Vec::new();

    for seed in 0..vectors.len() {
        if assigned[seed] {
            continue;
        }
        assigned[seed] = true;
        let mut members = vec![seed];

        for candidate in (seed + 1)..vectors.len() {
            if assigned[candidate] {
                continue;
            }
            if cosine_similarity(&vectors[seed], &vectors[candidate]) >= threshold {
                assigned[candidate] = true;
                members.push(candidate);
            }
        }

        clusters.push(members);
    }

    clusters
}

/// Cluster items into weighted, keyworded topics.
///
/// Duplicates (items with `duplicate_of` set) are ignored. Returned topics are
/// sorted by weight, heaviest first, with `delta` left at 0.
pub fn cluster_into_topics(
    items: &[ContentItem],
    params: &ClusterParams,
    weights: &WeightParams,
    now: DateTime<Utc>,
) -> Vec<Topic> {
    let mut members: Vec<&ContentItem> = items.iter().filter(|i| !i.is_duplicate()).collect();
    if members.is_empty() {
        return Vec::new();
    }
    members.sort_by(|a, b| a.id.cmp(&b.id));

    let docs: Vec<Vec<String>> = members.iter().map(|i| tokenize(&i.combined_text())).collect();
    let vectors = vectorize(&docs);
    let clusters = greedy_clusters(&vectors.vectors, params.similarity_threshold);

    let sizes: Vec<usize> = clusters.iter().map(Vec::len).collect();
    debug!(
        clusters = clusters.len(),
        largest = sizes.iter().max().copied().unwrap_or(0),
        singletons = sizes.iter().filter(|&&s| s == 1).count(),
        "Greedy clustering pass complete"
    );

    let mut topics: Vec<Topic> = clusters
        .into_iter()
        .filter(|c| c.len() >= params.min_cluster_size)
        .map(|indices| {
            let cluster_items: Vec<ContentItem> =
                indices.iter().map(|&i| members[i].clone()).collect();

            let weight: f64 = cluster_items.iter().map(|i| item_weight(i, now, weights)).sum();
            let keywords = vectors.top_terms(&indices, params.keywords_per_topic);
            let emotions = aggregate_emotions(&cluster_items, now, weights);

            let mut by_engagement: Vec<&ContentItem> = cluster_items.iter().collect();
            by_engagement.sort_by(|a, b| b.engagement.cmp(&a.engagement).then(a.id.cmp(&b.id)));
            let receipts: Vec<Receipt> = by_engagement
                .into_iter()
                .take(params.receipts_per_topic)
                .map(Receipt::from_item)
                .collect();

            Topic {
                id: stable_hash(&keywords.join("|")),
                title: keyword_title(&keywords),
                summary: None,
                keywords,
                emotions,
                weight,
                delta: 0,
                receipts,
                member_ids: cluster_items.iter().map(|i| i.id.clone()).collect(),
            }
        })
        .collect();

    disambiguate_ids(&mut topics);

    topics.sort_by(|a, b| {
        b.weight
            .partial_cmp(&a.weight)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.id.cmp(&b.id))
    });
    topics.truncate(params.max_topics);

    info!(
        items = members.len(),
        topics = topics.len(),
        threshold = params.similarity_threshold,
        "Clustered items into topics"
    );

    topics
}

/// Topics with identical keyword lists would share an id. Rehash those
/// with their sorted member ids mixed in so every id is unique.
fn disambiguate_ids(topics: &mut [Topic]) {
    let mut counts: HashMap<String, usize> = HashMap::new();
    for topic in topics.iter() {
        *counts.entry(topic.id.clone()).or_default() += 1;
    }

    for topic in topics.iter_mut() {
        if counts.get(&topic.id).copied().unwrap_or(0) > 1 {
            let mut members = topic.member_ids.clone();
            members.sort();
            debug!(topic = %topic.id, "Keyword id collision, mixing in member ids");
            topic.id = stable_hash(&format!("{}#{}", topic.keywords.join("|"), members.join(",")));
        }
    }
}
