// Scoring — relevance, item weighting, emotion distributions and tension.

pub mod emotion;
pub mod relevance;
pub mod tension;
pub mod weight;
