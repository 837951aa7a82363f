// Content items — the unit of input flowing through the pipeline.
//
// Items are created by an external collector, then enriched in place by the
// relevance scorer (relevance_score) and the deduplicator (duplicate_of).
// After that they are read-only: clustering and aggregation never mutate them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Where an item came from. Drives source trust in relevance scoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceType {
    /// Web search results, the distinguished type that gets a relevance boost
    Search,
    News,
    Social,
    Forum,
    Blog,
    Video,
    /// Any tag the collector emits that we don't recognize
    #[serde(other)]
    Other,
}

impl SourceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceType::Search => "search",
            SourceType::News => "news",
            SourceType::Social => "social",
            SourceType::Forum => "forum",
            SourceType::Blog => "blog",
            SourceType::Video => "video",
            SourceType::Other => "other",
        }
    }
}

impl std::fmt::Display for SourceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Optional geolocation attached by the collector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoLocation {
    pub lat: f64,
    pub lon: f64,
    /// Human-readable place name, if the collector resolved one
    #[serde(default)]
    pub name: Option<String>,
}

/// A single news/search result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentItem {
    /// Stable hash of the item's content (see `content_id`). Collectors may
    /// omit it; `ensure_id` fills it in.
    #[serde(default)]
    pub id: String,
    pub source_type: SourceType,
    /// Language tag, e.g. "en" or "he"
    pub language: String,
    pub title: String,
    #[serde(default)]
    pub text: Option<String>,
    pub created_at: DateTime<Utc>,
    pub url: String,
    /// Platform-specific engagement count (likes, comments, shares...). Uncapped.
    #[serde(default)]
    pub engagement: u64,
    /// Topical relevance in [0, 1], set by the relevance scorer
    #[serde(default)]
    pub relevance_score: Option<f64>,
    /// Id of the representative item this one was folded into
    #[serde(default)]
    pub duplicate_of: Option<String>,
    #[serde(default)]
    pub location: Option<GeoLocation>,
    /// Preview image or video URL, passed through to receipts
    #[serde(default)]
    pub media_url: Option<String>,
}

impl ContentItem {
    /// Build a new item with its id derived from the content.
    pub fn new(
        source_type: SourceType,
        language: &str,
        title: &str,
        text: Option<&str>,
        url: &str,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: content_id(title, text, url),
            source_type,
            language: language.to_string(),
            title: title.to_string(),
            text: text.map(str::to_string),
            created_at,
            url: url.to_string(),
            engagement: 0,
            relevance_score: None,
            duplicate_of: None,
            location: None,
            media_url: None,
        }
    }

    pub fn with_engagement(mut self, engagement: u64) -> Self {
        self.engagement = engagement;
        self
    }

    pub fn with_relevance(mut self, score: f64) -> Self {
        self.relevance_score = Some(score);
        self
    }

    /// Title and body joined with a single space. This is the text every scorer reads.
    pub fn combined_text(&self) -> String {
        match self.text.as_deref() {
            Some(text) if !text.is_empty() => format!("{} {}", self.title, text),
            _ => self.title.clone(),
        }
    }

    /// Derive the id from the content when the input didn't carry one.
    pub fn ensure_id(&mut self) {
        if self.id.trim().is_empty() {
            self.id = content_id(&self.title, self.text.as_deref(), &self.url);
        }
    }

    pub fn is_duplicate(&self) -> bool {
        self.duplicate_of.is_some()
    }
}

/// Stable 16-hex-char id for a piece of content.
pub fn content_id(title: &str, text: Option<&str>, url: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(title.as_bytes());
    hasher.update([0x1f]);
    hasher.update(text.unwrap_or_default().as_bytes());
    hasher.update([0x1f]);
    hasher.update(url.as_bytes());
    short_hash(hasher)
}

/// Hash an arbitrary key the same way content ids are hashed.
pub fn stable_hash(key: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(key.as_bytes());
    short_hash(hasher)
}

fn short_hash(hasher: Sha256) -> String {
    let digest = hasher.finalize();
    hex::encode(&digest[..8])
}
