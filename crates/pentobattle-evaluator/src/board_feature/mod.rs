//! Positional features for scoring a candidate placement.
//!
//! Every feature reads a [`PlacementAnalysis`] and returns a signed raw value,
//! higher meaning better for the mover unless its weight is negative. Features
//! are independent and are combined by
//! [`WeightedPlacementEvaluator`](crate::placement_evaluator::WeightedPlacementEvaluator).
//!
//! # Feature groups
//!
//! **Space** ([`space`]):
//! - [`TerritoryControl`] - net Voronoi territory
//! - [`FrontierControl`] - empty cells bordering only one side
//! - [`OpenTerritory`] - racing into the largest open region
//!
//! **Regions** ([`region`]):
//! - [`RegionFeasibility`] - untileable pockets next to the opponent
//! - [`ZoneSeal`] - regions cut off from the opponent by this move
//! - [`ZoneClaim`] - occupying clean 5×2 corridors
//!
//! **Mobility** ([`mobility`]):
//! - [`MobilityDestruction`] - opponent moves removed
//! - [`OwnFeasibility`] / [`OpponentFeasibility`] - shapes still placeable
//!
//! **Placement shape** ([`placement`]):
//! - [`PieceEfficiency`] - edges, cohesion and stranded cells
//! - [`OpponentContact`] - exposure to opponent cells
//!
//! The order of [`ALL_BOARD_FEATURES`] is the index order of
//! [`WeightSet`](crate::weights::WeightSet).

use std::fmt;

use crate::placement_analysis::PlacementAnalysis;

pub use self::{mobility::*, placement::*, region::*, space::*};

pub mod mobility;
pub mod placement;
pub mod region;
pub mod space;

pub trait BoardFeatureSource: fmt::Debug + Send + Sync {
    #[must_use]
    fn id(&self) -> &'static str;
    #[must_use]
    fn name(&self) -> &'static str;
    #[must_use]
    fn extract_raw(&self, analysis: &PlacementAnalysis) -> f32;
}

pub const FEATURE_COUNT: usize = 11;

pub const ALL_BOARD_FEATURES: [&dyn BoardFeatureSource; FEATURE_COUNT] = [
    &TerritoryControl,
    &MobilityDestruction,
    &OwnFeasibility,
    &OpponentFeasibility,
    &RegionFeasibility,
    &ZoneSeal,
    &FrontierControl,
    &PieceEfficiency,
    &ZoneClaim,
    &OpenTerritory,
    &OpponentContact,
];

/// Index of the feature with `id` in [`ALL_BOARD_FEATURES`].
#[must_use]
pub fn feature_index(id: &str) -> Option<usize> {
    ALL_BOARD_FEATURES.iter().position(|f| f.id() == id)
}


#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_feature_ids_are_unique() {
        let ids: HashSet<_> = ALL_BOARD_FEATURES.iter().map(|f| f.id()).collect();
        assert_eq!(ids.len(), FEATURE_COUNT);
        assert_eq!(feature_index("territory"), Some(0));
        assert_eq!(feature_index("opponent_contact"), Some(10));
        assert_eq!(feature_index("holes"), None);
    }
}
