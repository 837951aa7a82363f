// Analysis pipeline — the full day's run, leaves first.
//
//   relevance -> dedup -> emotions -> tension -> topics -> deltas
//
// `analyze` is synchronous and pure: same items, keywords, config, snapshot
// and clock in, same Analysis out. `run_day` wraps it with the I/O-bound
// collaborators (snapshot store, topic enricher).

use std::collections::BTreeMap;

use anyhow::Result;
use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use tracing::info;

use crate::config::Config;
use crate::dedup::deduplicate;
use crate::delta::snapshot::{build_snapshot, Snapshot, SNAPSHOT_TOPIC_LIMIT};
use crate::delta::store::SnapshotStore;
use crate::delta::{apply_topic_deltas, emotion_deltas, tension_delta};
use crate::items::{ContentItem, SourceRegistry};
use crate::scoring::emotion::{aggregate_emotions, EmotionDeltas, EmotionDistribution};
use crate::scoring::relevance::apply_relevance;
use crate::scoring::tension::calculate_tension_index;
use crate::topics::enrich::enrich_topics;
use crate::topics::traits::TopicEnricher;
use crate::topics::{cluster_into_topics, Topic};

/// Everything derived from one run.
#[derive(Debug, Clone, Serialize)]
pub struct Analysis {
    /// Deduplicated items, most engaging first, with relevance scores set
    pub items: Vec<ContentItem>,
    pub duplicates_removed: usize,
    pub emotions: EmotionDistribution,
    pub tension_index: f64,
    pub tension_delta: f64,
    pub emotion_deltas: EmotionDeltas,
    pub topics: Vec<Topic>,
    /// Whether a prior-day snapshot was available for the deltas
    pub has_baseline: bool,
}

/// Run the in-memory pipeline over a batch of items.
///
/// Fails only on invalid configuration.
pub fn analyze(
    mut items: Vec<ContentItem>,
    keywords: &[String],
    sources: &SourceRegistry,
    config: &Config,
    yesterday: Option<&Snapshot>,
    now: DateTime<Utc>,
) -> Result<Analysis> {
    config.validate()?;
    let total = items.len();

    apply_relevance(&mut items, keywords, sources);
    let items = deduplicate(items, config.dedup_threshold);
    let duplicates_removed = total - items.len();

    let emotions = aggregate_emotions(&items, now, &config.weighting);
    let tension_index = calculate_tension_index(&emotions, &config.tension);

    let mut topics = cluster_into_topics(&items, &config.clustering, &config.weighting, now);
    apply_topic_deltas(&mut topics, yesterday);

    let analysis = Analysis {
        tension_delta: tension_delta(tension_index, yesterday),
        emotion_deltas: emotion_deltas(&emotions, yesterday),
        has_baseline: yesterday.is_some(),
        items,
        duplicates_removed,
        emotions,
        tension_index,
        topics,
    };

    info!(
        items = total,
        kept = analysis.items.len(),
        tension = analysis.tension_index,
        tension_delta = analysis.tension_delta,
        topics = analysis.topics.len(),
        new_topics = analysis.topics.iter().filter(|t| t.is_new()).count(),
        "Analysis complete"
    );

    Ok(analysis)
}

/// Build the snapshot to persist for `date`.
///
/// Enriched titles and summaries of the persisted topics are stored under
/// `topic:<id>:title` and `topic:<id>:summary`.
pub fn snapshot_for(analysis: &Analysis, date: NaiveDate) -> Snapshot {
    let mut enriched = BTreeMap::new();
    for topic in analysis.topics.iter().take(SNAPSHOT_TOPIC_LIMIT) {
        enriched.insert(format!("topic:{}:title", topic.id), topic.title.clone());
        if let Some(summary) = &topic.summary {
            enriched.insert(format!("topic:{}:summary", topic.id), summary.clone());
        }
    }
    build_snapshot(
        date,
        analysis.tension_index,
        &analysis.emotions,
        &analysis.topics,
        enriched,
    )
}

/// A full day's run: load yesterday, analyze, enrich topics, optionally save today.
#[allow(clippy::too_many_arguments)]
pub async fn run_day(
    store: &dyn SnapshotStore,
    enricher: &dyn TopicEnricher,
    items: Vec<ContentItem>,
    sources: &SourceRegistry,
    config: &Config,
    date: NaiveDate,
    now: DateTime<Utc>,
    save: bool,
) -> Result<(Analysis, Snapshot)> {
    let yesterday = store.load_prior_day(date)?;
    if yesterday.is_none() {
        info!(%date, "No prior-day snapshot, deltas will be zero");
    }

    let mut analysis = analyze(
        items,
        &config.relevance_keywords,
        sources,
        config,
        yesterday.as_ref(),
        now,
    )?;
    analysis.topics = enrich_topics(enricher, analysis.topics, config.enrich_concurrency).await;

    let snapshot = snapshot_for(&analysis, date);
    if save {
        store.save(&snapshot)?;
    }
    Ok((analysis, snapshot))
}
