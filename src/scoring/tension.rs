// Tension index — one 0-100 number for how negative the mood is.
//
//   negative = anger*1.0 + anxiety*1.0 + sadness*0.7 + cynicism*0.4
//   positive = resilience*0.5 + hope*0.7 + excitement*0.3
//   tension  = round(max(0, negative - positive * 0.5) * 100), capped at 100
//
// All weights live in TensionWeights so they can be tuned from config.

use anyhow::Result;
use serde::{Deserialize, Serialize};

use super::emotion::EmotionDistribution;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NegativeWeights {
    pub anger: f64,
    pub anxiety: f64,
    pub sadness: f64,
    pub cynicism: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PositiveWeights {
    pub resilience: f64,
    pub hope: f64,
    pub excitement: f64,
}

/// Configurable weights for the tension formula.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TensionWeights {
    pub negative: NegativeWeights,
    pub positive: PositiveWeights,
    /// How strongly positive emotion offsets negative emotion (default 0.5)
    pub positive_reduction_factor: f64,
}

impl Default for TensionWeights {
    fn default() -> Self {
        Self {
            negative: NegativeWeights {
                anger: 1.0,
                anxiety: 1.0,
                sadness: 0.7,
                cynicism: 0.4,
            },
            positive: PositiveWeights {
                resilience: 0.5,
                hope: 0.7,
                excitement: 0.3,
            },
            positive_reduction_factor: 0.5,
        }
    }
}

impl TensionWeights {
    /// Reject negative or non-finite weights.
    pub fn validate(&self) -> Result<()> {
        let named = [
            ("negative.anger", self.negative.anger),
            ("negative.anxiety", self.negative.anxiety),
            ("negative.sadness", self.negative.sadness),
            ("negative.cynicism", self.negative.cynicism),
            ("positive.resilience", self.positive.resilience),
            ("positive.hope", self.positive.hope),
            ("positive.excitement", self.positive.excitement),
            ("positive_reduction_factor", self.positive_reduction_factor),
        ];
        for (name, value) in named {
            if !value.is_finite() || value < 0.0 {
                anyhow::bail!("Tension weight {name} must be a non-negative number, got {value}");
            }
        }
        Ok(())
    }
}

/// Compute the tension index (0-100) from an emotion distribution.
pub fn calculate_tension_index(dist: &EmotionDistribution, weights: &TensionWeights) -> f64 {
    let neg = &weights.negative;
    let pos = &weights.positive;

    let negative_score = dist.anger * neg.anger
        + dist.anxiety * neg.anxiety
        + dist.sadness * neg.sadness
        + dist.cynicism * neg.cynicism;
    let positive_score =
        dist.resilience * pos.resilience + dist.hope * pos.hope + dist.excitement * pos.excitement;

    let tension = (negative_score - positive_score * weights.positive_reduction_factor).max(0.0);
    (tension * 100.0).round().min(100.0)
}
