use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::dedup::DEFAULT_DEDUP_THRESHOLD;
use crate::scoring::tension::TensionWeights;
use crate::scoring::weight::WeightParams;
use crate::topics::ClusterParams;

/// Central configuration: algorithm knobs plus where snapshots live.
///
/// Every field has a default. Environment variables override them; the
/// binary loads a .env file first via dotenvy.
#[derive(Debug, Clone, Serialize)]
pub struct Config {
    /// Topic clustering parameters
    pub clustering: ClusterParams,
    /// Dedup similarity threshold, separate from the clustering one (default 0.5)
    pub dedup_threshold: f64,
    /// Recency half-life and engagement cap
    pub weighting: WeightParams,
    /// Tension formula weights
    pub tension: TensionWeights,
    /// Relevance keywords for this run (MOODPULSE_KEYWORDS, comma-separated)
    pub relevance_keywords: Vec<String>,
    /// Directory for daily snapshot files
    pub snapshot_dir: PathBuf,
    /// Topic enrichment calls allowed in flight at once
    pub enrich_concurrency: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            clustering: ClusterParams::default(),
            dedup_threshold: DEFAULT_DEDUP_THRESHOLD,
            weighting: WeightParams::default(),
            tension: TensionWeights::default(),
            relevance_keywords: Vec::new(),
            snapshot_dir: PathBuf::from("./snapshots"),
            enrich_concurrency: 4,
        }
    }
}

/// Parse an optional environment variable, naming it in the error.
fn env_parse<T>(name: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(raw) if !raw.trim().is_empty() => {
            let value = raw
                .trim()
                .parse::<T>()
                .with_context(|| format!("{name} has an invalid value: {raw:?}"))?;
            Ok(Some(value))
        }
        _ => Ok(None),
    }
}

impl Config {
    /// Load configuration from environment variables on top of the defaults.
    ///
    /// The result is validated before it is returned.
    pub fn load() -> Result<Self> {
        let mut config = Self::default();

        if let Some(v) = env_parse("MOODPULSE_SIMILARITY_THRESHOLD")? {
            config.clustering.similarity_threshold = v;
        }
        if let Some(v) = env_parse("MOODPULSE_MAX_TOPICS")? {
            config.clustering.max_topics = v;
        }
        if let Some(v) = env_parse("MOODPULSE_MIN_CLUSTER_SIZE")? {
            config.clustering.min_cluster_size = v;
        }
        if let Some(v) = env_parse("MOODPULSE_KEYWORDS_PER_TOPIC")? {
            config.clustering.keywords_per_topic = v;
        }
        if let Some(v) = env_parse("MOODPULSE_RECEIPTS_PER_TOPIC")? {
            config.clustering.receipts_per_topic = v;
        }
        if let Some(v) = env_parse("MOODPULSE_DEDUP_THRESHOLD")? {
            config.dedup_threshold = v;
        }
        if let Some(v) = env_parse("MOODPULSE_HALF_LIFE_HOURS")? {
            config.weighting.half_life_hours = v;
        }
        if let Some(v) = env_parse("MOODPULSE_ENGAGEMENT_CAP")? {
            config.weighting.engagement_cap = v;
        }
        if let Some(v) = env_parse("MOODPULSE_ENRICH_CONCURRENCY")? {
            config.enrich_concurrency = v;
        }
        if let Ok(dir) = env::var("MOODPULSE_SNAPSHOT_DIR") {
            if !dir.trim().is_empty() {
                config.snapshot_dir = PathBuf::from(dir);
            }
        }
        if let Ok(raw) = env::var("MOODPULSE_KEYWORDS") {
            config.relevance_keywords = parse_keyword_list(&raw);
        }

        config.validate()?;
        Ok(config)
    }

    /// Reject configuration that would make the algorithms misbehave.
    pub fn validate(&self) -> Result<()> {
        self.clustering.validate()?;
        self.tension.validate()?;

        if !(0.0..=1.0).contains(&self.dedup_threshold) {
            anyhow::bail!(
                "dedup_threshold must be within [0, 1], got {}",
                self.dedup_threshold
            );
        }
        let half_life = self.weighting.half_life_hours;
        if !half_life.is_finite() || half_life <= 0.0 {
            anyhow::bail!("half_life_hours must be a positive number, got {half_life}");
        }
        if self.weighting.engagement_cap < 1 {
            anyhow::bail!("engagement_cap must be at least 1");
        }
        if self.enrich_concurrency < 1 {
            anyhow::bail!("enrich_concurrency must be at least 1");
        }
        Ok(())
    }
}

/// Split a comma-separated keyword list, trimming and dropping blanks.
pub fn parse_keyword_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|k| k.trim().to_lowercase())
        .filter(|k| !k.is_empty())
        .collect()
}
