// Content items and the source registry.

pub mod models;
pub mod sources;

pub use models::{ContentItem, GeoLocation, SourceType};
pub use sources::SourceRegistry;
