// Source registry — how much we trust each kind of source.
//
// Trust feeds the base term of the relevance score. Anything not registered
// falls back to DEFAULT_TRUST.

use std::collections::HashMap;

use anyhow::Result;

use super::models::SourceType;

/// Trust assigned to source types with no registry entry.
pub const DEFAULT_TRUST: f64 = 0.5;

#[derive(Debug, Clone)]
pub struct SourceRegistry {
    trust: HashMap<SourceType, f64>,
}

impl Default for SourceRegistry {
    fn default() -> Self {
        let trust = HashMap::from([
            (SourceType::Search, 0.8),
            (SourceType::News, 0.9),
            (SourceType::Social, 0.5),
            (SourceType::Forum, 0.6),
            (SourceType::Blog, 0.6),
            (SourceType::Video, 0.5),
        ]);
        Self { trust }
    }
}

impl SourceRegistry {
    /// A registry with no entries: every source gets DEFAULT_TRUST.
    pub fn empty() -> Self {
        Self {
            trust: HashMap::new(),
        }
    }

    /// Trust score in [0, 1] for a source type.
    pub fn trust(&self, source: SourceType) -> f64 {
        self.trust.get(&source).copied().unwrap_or(DEFAULT_TRUST)
    }

    /// Register or replace a trust score. Rejects values outside [0, 1].
    pub fn set_trust(&mut self, source: SourceType, trust: f64) -> Result<()> {
        if !(0.0..=1.0).contains(&trust) {
            anyhow::bail!("Trust for source '{source}' must be within [0, 1], got {trust}");
        }
        self.trust.insert(source, trust);
        Ok(())
    }
}
