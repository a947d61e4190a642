use pentobattle_engine::{Board, Cell, PlayerId, Region};

use super::BoardFeatureSource;
use crate::placement_analysis::PlacementAnalysis;

/// Empty pockets next to the opponent that pentominoes cannot tile.
///
/// # Raw measurement
///
/// For each region after the move that borders an opponent cell:
/// - `+ (size mod 5) × 12` unless the size is a multiple of 5
/// - checkerboard imbalance `d > 0` adds `d × 10` if odd, `d × 4` if even
/// - `+ (5 - size) × 8` for regions of at most 4 cells
#[derive(Debug, Clone)]
pub struct RegionFeasibility;

impl BoardFeatureSource for RegionFeasibility {
    fn id(&self) -> &'static str {
        "region_feasibility"
    }
    fn name(&self) -> &'static str {
        "Region Feasibility"
    }
    fn extract_raw(&self, analysis: &PlacementAnalysis) -> f32 {
        region_feasibility_bonus(
            analysis.regions(),
            analysis.after().board(),
            analysis.opponent(),
        )
    }
}

/// Regions this move cuts off from the opponent.
///
/// # Raw measurement
///
/// For each region of at least 5 cells after the move:
/// - `+ size × 9` if the region it was split from bordered the opponent before
///   the move and the region itself no longer does
/// - `+ long side × 4` if it is a corridor (short side ≤ 2, long side ≥ 4) the
///   opponent does not border
#[derive(Debug, Clone)]
pub struct ZoneSeal;

impl BoardFeatureSource for ZoneSeal {
    fn id(&self) -> &'static str {
        "zone_seal"
    }
    fn name(&self) -> &'static str {
        "Zone Seal"
    }
    fn extract_raw(&self, analysis: &PlacementAnalysis) -> f32 {
        zone_seal_bonus(
            analysis.regions(),
            analysis.context().regions_before(),
            analysis.before().board(),
            analysis.after().board(),
            analysis.opponent(),
        )
    }
}

/// Claiming untouched 5×2 and 2×5 corridors.
///
/// # Raw measurement
///
/// For each 5×2 or 2×5 window that was completely empty before the move,
/// `+1.8` per placed cell inside the window. Capped at 15.
#[derive(Debug, Clone)]
pub struct ZoneClaim;

impl BoardFeatureSource for ZoneClaim {
    fn id(&self) -> &'static str {
        "zone_claim"
    }
    fn name(&self) -> &'static str {
        "Zone Claim"
    }
    fn extract_raw(&self, analysis: &PlacementAnalysis) -> f32 {
        zone_claim_bonus(analysis.placement().cells(), analysis.before().board())
    }
}

const ZONE_CLAIM_PER_CELL: f32 = 1.8;
const ZONE_CLAIM_CAP: f32 = 15.0;

#[must_use]
#[expect(clippy::cast_precision_loss)]
pub fn region_feasibility_bonus(regions: &[Region], board: &Board, opponent: PlayerId) -> f32 {
    let mut bonus = 0.0;
    for region in regions {
        let size = region.len();
        let remainder = size % 5;
        let imbalance = region.parity_imbalance();
        if remainder == 0 && imbalance == 0 {
            continue;
        }
        if !region.touches(board, opponent) {
            continue;
        }
        if remainder != 0 {
            bonus += remainder as f32 * 12.0;
        }
        if imbalance > 0 {
            let factor = if imbalance % 2 == 1 { 10.0 } else { 4.0 };
            bonus += imbalance as f32 * factor;
        }
        if size <= 4 {
            bonus += (5 - size) as f32 * 8.0;
        }
    }
    bonus
}

#[must_use]
#[expect(clippy::cast_precision_loss)]
pub fn zone_seal_bonus(
    regions_after: &[Region],
    regions_before: &[Region],
    board_before: &Board,
    board_after: &Board,
    opponent: PlayerId,
) -> f32 {
    let mut bonus = 0.0;
    for region in regions_after.iter().filter(|r| r.len() >= 5) {
        let reachable_after = region.touches(board_after, opponent);
        // Empty cells only shrink, so every region after a move lies inside
        // exactly one region from before it.
        let reachable_before = region.cells().first().is_some_and(|&cell| {
            regions_before
                .iter()
                .find(|r| r.contains(cell))
                .is_some_and(|r| r.touches(board_before, opponent))
        });
        if reachable_before && !reachable_after {
            bonus += region.len() as f32 * 9.0;
        }
        let bounds = region.bounds();
        let narrow = bounds.width().min(bounds.height());
        let span = bounds.span();
        if narrow <= 2 && span >= 4 && !reachable_after {
            bonus += f32::from(span) * 4.0;
        }
    }
    bonus
}

#[must_use]
#[expect(clippy::cast_precision_loss)]
pub fn zone_claim_bonus(cells: &[Cell], board_before: &Board) -> f32 {
    let mut bonus = 0.0;
    for (w, h) in [(5u8, 2u8), (2, 5)] {
        let (Some(max_x), Some(max_y)) = (
            board_before.width().checked_sub(w),
            board_before.height().checked_sub(h),
        ) else {
            continue;
        };
        for y0 in 0..=max_y {
            for x0 in 0..=max_x {
                let inside = cells
                    .iter()
                    .filter(|c| (x0..x0 + w).contains(&c.x) && (y0..y0 + h).contains(&c.y))
                    .count();
                if inside == 0 {
                    continue;
                }
                let clear = (y0..y0 + h)
                    .all(|y| (x0..x0 + w).all(|x| board_before.is_empty(Cell::new(x, y))));
                if clear {
                    bonus += inside as f32 * ZONE_CLAIM_PER_CELL;
                }
            }
        }
    }
    bonus.min(ZONE_CLAIM_CAP)
}
