use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::board_feature::{ALL_BOARD_FEATURES, BoardFeatureSource, FEATURE_COUNT, feature_index};

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("unknown feature id '{id}'")]
pub struct UnknownFeatureError {
    pub id: String,
}

/// One weight per entry of [`ALL_BOARD_FEATURES`].
///
/// Serialized as a map from feature id to weight. Ids missing from the map
/// weigh 0; unknown ids are rejected.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(into = "BTreeMap<String, f32>", try_from = "BTreeMap<String, f32>")]
pub struct WeightSet([f32; FEATURE_COUNT]);

impl WeightSet {
    pub const ZERO: Self = WeightSet([0.0; FEATURE_COUNT]);

    pub const ELITE: Self = WeightSet([
        0.5,  // territory
        0.0,  // mobility_destruction
        0.0,  // own_feasibility
        0.0,  // opponent_feasibility
        0.25, // region_feasibility
        0.0,  // zone_seal
        0.0,  // frontier
        0.0,  // piece_efficiency
        0.0,  // zone_claim
        0.0,  // open_territory
        0.0,  // opponent_contact
    ]);

    pub const TACTICIAN: Self = WeightSet([
        6.0, // territory
        0.0, // mobility_destruction
        0.0, // own_feasibility
        0.0, // opponent_feasibility
        1.0, // region_feasibility
        0.0, // zone_seal
        0.5, // frontier
        0.6, // piece_efficiency
        0.0, // zone_claim
        0.0, // open_territory
        2.2, // opponent_contact
    ]);

    pub const GRANDMASTER: Self = WeightSet([
        6.0,  // territory
        8.0,  // mobility_destruction
        4.0,  // own_feasibility
        -6.0, // opponent_feasibility
        1.0,  // region_feasibility
        1.0,  // zone_seal
        3.5,  // frontier
        1.0,  // piece_efficiency
        1.0,  // zone_claim
        2.0,  // open_territory
        4.0,  // opponent_contact
    ]);

    pub const LEGENDARY: Self = WeightSet([
        12.0,  // territory
        8.0,   // mobility_destruction
        8.0,   // own_feasibility
        -10.0, // opponent_feasibility
        1.0,   // region_feasibility
        1.0,   // zone_seal
        7.0,   // frontier
        1.0,   // piece_efficiency
        1.0,   // zone_claim
        3.0,   // open_territory
        -6.0,  // opponent_contact
    ]);

    #[must_use]
    pub const fn from_array(weights: [f32; FEATURE_COUNT]) -> Self {
        Self(weights)
    }

    #[must_use]
    pub const fn as_array(&self) -> [f32; FEATURE_COUNT] {
        self.0
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<f32> {
        feature_index(id).map(|i| self.0[i])
    }

    pub fn set(&mut self, id: &str, weight: f32) -> Result<(), UnknownFeatureError> {
        let index = feature_index(id).ok_or_else(|| UnknownFeatureError { id: id.to_owned() })?;
        self.0[index] = weight;
        Ok(())
    }

    /// Features paired with their weights, skipping zero weights.
    pub fn active_features(
        &self,
    ) -> impl Iterator<Item = (&'static dyn BoardFeatureSource, f32)> + '_ {
        ALL_BOARD_FEATURES
            .iter()
            .zip(self.0)
            .filter(|(_, w)| *w != 0.0)
            .map(|(f, w)| (*f, w))
    }
}

impl Default for WeightSet {
    fn default() -> Self {
        Self::ZERO
    }
}

impl From<WeightSet> for BTreeMap<String, f32> {
    fn from(weights: WeightSet) -> Self {
        ALL_BOARD_FEATURES
            .iter()
            .zip(weights.0)
            .map(|(f, w)| (f.id().to_owned(), w))
            .collect()
    }
}

impl TryFrom<BTreeMap<String, f32>> for WeightSet {
    type Error = UnknownFeatureError;

    fn try_from(map: BTreeMap<String, f32>) -> Result<Self, Self::Error> {
        let mut weights = Self::ZERO;
        for (id, weight) in map {
            weights.set(&id, weight)?;
        }
        Ok(weights)
    }
}
