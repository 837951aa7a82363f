// Topic — a cluster of related items with its keywords, mood and evidence.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::items::{ContentItem, GeoLocation, SourceType};
use crate::output::truncate_chars;
use crate::scoring::emotion::EmotionDistribution;

/// Maximum characters of body text kept in a receipt snippet.
pub const SNIPPET_CHARS: usize = 200;

/// A trending topic produced by clustering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Topic {
    /// Hash of the joined keyword list
    pub id: String,
    /// Keyword placeholder until an enricher replaces it
    pub title: String,
    /// Optional "why is this trending" text from an enricher
    #[serde(default)]
    pub summary: Option<String>,
    /// Top keywords, strongest first
    pub keywords: Vec<String>,
    /// Aggregate emotion mix of the member items
    pub emotions: EmotionDistribution,
    /// Importance: summed recency * engagement * relevance of the members
    pub weight: f64,
    /// 1 if no similar topic existed yesterday, 0 otherwise
    pub delta: u8,
    /// Most engaging members, projected for display
    pub receipts: Vec<Receipt>,
    /// Ids of every member item, in clustering order
    pub member_ids: Vec<String>,
}

impl Topic {
    pub fn is_new(&self) -> bool {
        self.delta == 1
    }
}

/// Evidence for a topic: a bounded, display-ready view of one source item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Receipt {
    pub item_id: String,
    pub title: String,
    pub snippet: Option<String>,
    pub url: String,
    pub source: SourceType,
    pub language: String,
    pub engagement: u64,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub location: Option<GeoLocation>,
    #[serde(default)]
    pub media_url: Option<String>,
}

impl Receipt {
    pub fn from_item(item: &ContentItem) -> Self {
        Self {
            item_id: item.id.clone(),
            title: item.title.clone(),
            snippet: item
                .text
                .as_deref()
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(|t| truncate_chars(t, SNIPPET_CHARS)),
            url: item.url.clone(),
            source: item.source_type,
            language: item.language.clone(),
            engagement: item.engagement,
            created_at: item.created_at,
            location: item.location.clone(),
            media_url: item.media_url.clone(),
        }
    }
}

/// Placeholder title: the first three keywords, capitalized.
pub fn keyword_title(keywords: &[String]) -> String {
    keywords
        .iter()
        .take(3)
        .map(|k| capitalize(k))
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
