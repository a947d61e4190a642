//! Positional evaluation of candidate placements.
//!
//! A candidate placement is analysed against the position it was generated
//! from ([`placement_analysis`]), measured by independent feature sources
//! ([`board_feature`]) and combined into one score by a weighted sum
//! ([`placement_evaluator`]) whose coefficients live in a [`weights::WeightSet`].
//!
//! ```text
//! GameSnapshot + Move
//!     ↓ EvaluationContext::analyze
//! PlacementAnalysis (lazy: simulated position, regions, territory)
//!     ↓ BoardFeatureSource::extract_raw (per non-zero weight)
//! raw feature values
//!     ↓ WeightedPlacementEvaluator
//! score
//! ```
//!
//! [`territory`] holds the Voronoi split shared by the territory feature and
//! the search's quick estimate.

pub mod board_feature;
pub mod placement_analysis;
pub mod placement_evaluator;
pub mod territory;
pub mod weights;
