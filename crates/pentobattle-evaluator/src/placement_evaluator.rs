//! Placement evaluation: scoring a single candidate placement.
//!
//! The [`WeightedPlacementEvaluator`] computes
//!
//! ```text
//! score = w₁·f₁ + w₂·f₂ + ... + w₁₁·f₁₁
//! ```
//!
//! where `fᵢ` is the raw value of the i-th entry of
//! [`ALL_BOARD_FEATURES`](crate::board_feature::ALL_BOARD_FEATURES) and `wᵢ`
//! the matching weight from a [`WeightSet`]. Features whose weight is zero are
//! never extracted, so a sparse weight set keeps evaluation cheap.

use std::fmt;

use log::Level;

use crate::{placement_analysis::PlacementAnalysis, weights::WeightSet};

/// Evaluates piece placements by assigning scores (higher is better).
pub trait PlacementEvaluator: fmt::Debug {
    fn evaluate_placement(&self, analysis: &PlacementAnalysis) -> f32;
}

#[derive(Debug, Clone)]
pub struct WeightedPlacementEvaluator {
    weights: WeightSet,
}

impl WeightedPlacementEvaluator {
    #[must_use]
    pub fn new(weights: WeightSet) -> Self {
        Self { weights }
    }

    #[must_use]
    pub fn weights(&self) -> &WeightSet {
        &self.weights
    }
}

impl PlacementEvaluator for WeightedPlacementEvaluator {
    fn evaluate_placement(&self, analysis: &PlacementAnalysis) -> f32 {
        let trace = log::log_enabled!(Level::Trace);
        let mut score = 0.0;
        for (feature, weight) in self.weights.active_features() {
            let raw = feature.extract_raw(analysis);
            if trace {
                log::trace!(
                    "{} {}: raw={raw:.2} weighted={:.2}",
                    analysis.placement(),
                    feature.id(),
                    raw * weight
                );
            }
            score += raw * weight;
        }
        score
    }
}
