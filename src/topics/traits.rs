// Topic enricher trait — swap-ready abstraction for human-readable titles.
//
// Clustering produces a keyword placeholder title. An enricher (typically an
// LLM call) can replace it with a real headline and a "why it's trending"
// summary. Enrichment is purely additive: topics stay valid without it.

use anyhow::Result;
use async_trait::async_trait;

use super::topic::{keyword_title, Topic};

/// The human-readable text an enricher produces for one topic.
#[derive(Debug, Clone, PartialEq)]
pub struct Enrichment {
    pub title: String,
    pub summary: Option<String>,
}

/// Trait for turning a topic's keywords and receipts into readable text.
/// Implementations are async because most providers are remote APIs.
#[async_trait]
pub trait TopicEnricher: Send + Sync {
    async fn enrich(&self, topic: &Topic) -> Result<Enrichment>;
}

/// Offline enricher: keyword title plus a one-line summary built from the
/// topic's own data. Used when no remote enricher is configured.
pub struct KeywordTitleEnricher;

#[async_trait]
impl TopicEnricher for KeywordTitleEnricher {
    async fn enrich(&self, topic: &Topic) -> Result<Enrichment> {
        let lead = topic
            .receipts
            .first()
            .map(|r| format!(" Leading story: \"{}\".", r.title))
            .unwrap_or_default();
        Ok(Enrichment {
            title: keyword_title(&topic.keywords),
            summary: Some(format!(
                "{} stories about {}.{}",
                topic.member_ids.len(),
                topic.keywords.join(", "),
                lead
            )),
        })
    }
}
