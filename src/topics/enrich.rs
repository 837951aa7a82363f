// Bounded-concurrency topic enrichment.
//
// Runs an enricher over every topic with at most `concurrency` calls in
// flight. Output order matches input order. A failed enrichment keeps the
// topic's keyword title so one bad call never drops a topic.

use futures::stream::{self, StreamExt};
use tracing::{info, warn};

use super::topic::Topic;
use super::traits::TopicEnricher;

/// Enrich topics in place, returning them in their original order.
pub async fn enrich_topics(
    enricher: &dyn TopicEnricher,
    topics: Vec<Topic>,
    concurrency: usize,
) -> Vec<Topic> {
    let total = topics.len();

    let results: Vec<_> = stream::iter(topics.into_iter().map(|topic| async move {
        let result = enricher.enrich(&topic).await;
        (topic, result)
    }))
    .buffered(concurrency.max(1))
    .collect()
    .await;

    let mut enriched = 0;
    let topics: Vec<Topic> = results
        .into_iter()
        .map(|(mut topic, result)| {
            match result {
                Ok(enrichment) => {
                    if !enrichment.title.trim().is_empty() {
                        topic.title = enrichment.title;
                    }
                    topic.summary = enrichment.summary;
                    enriched += 1;
                }
                Err(e) => {
                    warn!(topic = %topic.id, error = %e, "Enrichment failed, keeping keyword title");
                }
            }
            topic
        })
        .collect();

    info!(topics = total, enriched, "Enriched topics");
    topics
}
