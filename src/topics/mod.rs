// Topic extraction — TF-IDF vectorization, greedy clustering and enrichment.

pub mod cluster;
pub mod enrich;
pub mod overlap;
pub mod tfidf;
pub mod tokenize;
pub mod topic;
pub mod traits;

pub use cluster::{cluster_into_topics, ClusterParams};
pub use topic::{Receipt, Topic};
