use pentobattle_engine::{Board, Cell, PlayerId, Region, largest_region};

use super::BoardFeatureSource;
use crate::placement_analysis::PlacementAnalysis;

/// Net territory after the placement.
///
/// # Raw measurement
///
/// `raw = mine - theirs` of the Voronoi split (see [`Territory`](crate::territory::Territory)).
#[derive(Debug, Clone)]
pub struct TerritoryControl;

impl BoardFeatureSource for TerritoryControl {
    fn id(&self) -> &'static str {
        "territory"
    }
    fn name(&self) -> &'static str {
        "Territory Control"
    }
    fn extract_raw(&self, analysis: &PlacementAnalysis) -> f32 {
        analysis.territory().net()
    }
}

/// Empty cells bordering exactly one side.
///
/// # Raw measurement
///
/// Each empty cell next to the mover only counts +1, next to the opponent only
/// counts -1, and contested or untouched cells count 0.
#[derive(Debug, Clone)]
pub struct FrontierControl;

impl BoardFeatureSource for FrontierControl {
    fn id(&self) -> &'static str {
        "frontier"
    }
    fn name(&self) -> &'static str {
        "Frontier Control"
    }
    fn extract_raw(&self, analysis: &PlacementAnalysis) -> f32 {
        frontier_balance(analysis.after().board(), analysis.mover())
    }
}

/// Bonus for moving into the largest open area.
///
/// # Raw measurement
///
/// `+1` per placed cell that lay in the largest empty region before the move,
/// `+0.5` per placed cell adjacent to the largest empty region after it.
#[derive(Debug, Clone)]
pub struct OpenTerritory;

impl BoardFeatureSource for OpenTerritory {
    fn id(&self) -> &'static str {
        "open_territory"
    }
    fn name(&self) -> &'static str {
        "Open Territory"
    }
    fn extract_raw(&self, analysis: &PlacementAnalysis) -> f32 {
        open_territory_bonus(
            analysis.placement().cells(),
            analysis.context().regions_before(),
            analysis.after().board(),
            analysis.regions(),
        )
    }
}

#[must_use]
#[expect(clippy::cast_precision_loss)]
pub fn frontier_balance(board: &Board, me: PlayerId) -> f32 {
    let mut balance = 0i32;
    for cell in board.empty_cells() {
        let mut near_me = false;
        let mut near_them = false;
        for neighbor in board.neighbors(cell) {
            match board.owner(neighbor) {
                Some(p) if p == me => near_me = true,
                Some(_) => near_them = true,
                None => {}
            }
        }
        match (near_me, near_them) {
            (true, false) => balance += 1,
            (false, true) => balance -= 1,
            _ => {}
        }
    }
    balance as f32
}

#[must_use]
pub fn open_territory_bonus(
    cells: &[Cell],
    regions_before: &[Region],
    board_after: &Board,
    regions_after: &[Region],
) -> f32 {
    let mut bonus = 0.0;
    if let Some(largest) = largest_region(regions_before) {
        for &cell in cells {
            if largest.contains(cell) {
                bonus += 1.0;
            }
        }
    }
    if let Some(largest) = largest_region(regions_after) {
        for &cell in cells {
            if board_after
                .neighbors(cell)
                .iter()
                .any(|&n| largest.contains(n))
            {
                bonus += 0.5;
            }
        }
    }
    bonus
}
