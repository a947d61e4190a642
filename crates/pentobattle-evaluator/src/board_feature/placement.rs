use pentobattle_engine::{Board, Cell, PlayerId};

use super::BoardFeatureSource;
use crate::placement_analysis::PlacementAnalysis;

/// Compact, edge-hugging placements that do not strand empty cells.
///
/// # Raw measurement
///
/// Per placed cell: `+0.8` on a vertical board edge, `+0.8` on a horizontal
/// edge, `+0.5` per neighbor owned by the mover. Per empty neighbor of a
/// placed cell: `-8` if it is now fully enclosed, `-2` if it has a single empty
/// neighbor left. The sum is multiplied by 5. A placement that does not touch
/// the mover's earlier cells once the mover has placed 2 or more shapes costs
/// another `-40`.
///
/// Generated moves always touch the mover's cells, so the penalty only applies
/// to placements supplied from outside the move generator.
#[derive(Debug, Clone)]
pub struct PieceEfficiency;

impl BoardFeatureSource for PieceEfficiency {
    fn id(&self) -> &'static str {
        "piece_efficiency"
    }
    fn name(&self) -> &'static str {
        "Piece Efficiency"
    }
    fn extract_raw(&self, analysis: &PlacementAnalysis) -> f32 {
        let mover = analysis.mover();
        let cells = analysis.placement().cells();
        let mut score = piece_efficiency_score(cells, analysis.after().board(), mover);
        if analysis.before().placed_count(mover) >= DISCONNECTION_GRACE
            && !cells
                .iter()
                .any(|&c| analysis.before().board().touches_player(c, mover))
        {
            score += DISCONNECTION_PENALTY;
        }
        score
    }
}

/// How much of the placement is pressed against opponent cells.
///
/// # Raw measurement
///
/// Number of (placed cell, opponent neighbor) pairs.
#[derive(Debug, Clone)]
pub struct OpponentContact;

impl BoardFeatureSource for OpponentContact {
    fn id(&self) -> &'static str {
        "opponent_contact"
    }
    fn name(&self) -> &'static str {
        "Opponent Contact"
    }
    #[expect(clippy::cast_precision_loss)]
    fn extract_raw(&self, analysis: &PlacementAnalysis) -> f32 {
        contacts(
            analysis.placement().cells(),
            analysis.after().board(),
            analysis.opponent(),
        ) as f32
    }
}

const DISCONNECTION_GRACE: usize = 2;
const DISCONNECTION_PENALTY: f32 = -40.0;

/// Number of (cell, neighbor) pairs where the neighbor belongs to `player`.
#[must_use]
pub fn contacts(cells: &[Cell], board: &Board, player: PlayerId) -> usize {
    cells
        .iter()
        .map(|&c| {
            board
                .neighbors(c)
                .iter()
                .filter(|&&n| board.owner(n) == Some(player))
                .count()
        })
        .sum()
}

/// Edge, cohesion and stranding terms of [`PieceEfficiency`], on the board
/// after the placement.
#[must_use]
pub fn piece_efficiency_score(cells: &[Cell], board_after: &Board, mover: PlayerId) -> f32 {
    let last_x = board_after.width() - 1;
    let last_y = board_after.height() - 1;
    let mut score = 0.0;
    for &cell in cells {
        if cell.x == 0 || cell.x == last_x {
            score += 0.8;
        }
        if cell.y == 0 || cell.y == last_y {
            score += 0.8;
        }
        for neighbor in board_after.neighbors(cell) {
            if board_after.owner(neighbor) == Some(mover) {
                score += 0.5;
            }
        }
    }
    for &cell in cells {
        for neighbor in board_after.neighbors(cell) {
            if !board_after.is_empty(neighbor) {
                continue;
            }
            let empty_around = board_after
                .neighbors(neighbor)
                .iter()
                .filter(|&&n| board_after.is_empty(n))
                .count();
            match empty_around {
                0 => score -= 8.0,
                1 => score -= 2.0,
                _ => {}
            }
        }
    }
    score * 5.0
}

#[cfg(test)]
mod tests {
    use pentobattle_engine::ShapeKind;

    use super::*;
    use crate::{
        board_feature::test_util::{placement, snapshot, source},
        placement_analysis::EvaluationContext,
    };

    #[test]
    fn test_contacts_counts_pairs() {
        let board = Board::from_ascii(
            "
            xx...
            XXXXX
            ",
        )
        .unwrap();
        let cells: Vec<_> = (0..5).map(|x| Cell::new(x, 1)).collect();
        assert_eq!(contacts(&cells, &board, PlayerId::Two), 2);
        assert_eq!(contacts(&cells, &board, PlayerId::One), 8);
    }

    #[test]
    fn test_stranding_a_cell_is_penalized() {
        // Placing the I along row 1 leaves (0,0) walled in by x and I.
        let stranded = Board::from_ascii(
            "
            .x....
            IIIII.
            ",
        )
        .unwrap();
        let clean = Board::from_ascii(
            "
            ......
            IIIII.
            ",
        )
        .unwrap();
        let cells: Vec<_> = (0..5).map(|x| Cell::new(x, 1)).collect();
        let stranded_score = piece_efficiency_score(&cells, &stranded, PlayerId::One);
        let clean_score = piece_efficiency_score(&cells, &clean, PlayerId::One);
        assert!(stranded_score < clean_score);
    }

    #[test]
    fn test_edge_and_cohesion_terms() {
        let board = Board::from_ascii(
            "
            IIIII
            ",
        )
        .unwrap();
        let cells: Vec<_> = (0..5).map(|x| Cell::new(x, 0)).collect();
        // 2 vertical-edge cells, 5 horizontal-edge cells, 8 own neighbor pairs.
        let expected = (2.0 * 0.8 + 5.0 * 0.8 + 8.0 * 0.5) * 5.0;
        let score = piece_efficiency_score(&cells, &board, PlayerId::One);
        assert!((score - expected).abs() < 1e-4, "score = {score}");
    }

    #[test]
    fn test_disconnected_placement_after_two_pieces() {
        let before = snapshot(
            "
            XXXXX.....
            LLLL......
            L.........
            ..........
            ..........
            ..........
            ",
            "I",
            "T",
        )
        .with_placed_count(PlayerId::One, 2);
        let context = EvaluationContext::new(&before, PlayerId::One, source());
        let far = context.analyze(placement(ShapeKind::I, 1, 5, 5));
        let near = context.analyze(placement(ShapeKind::I, 1, 5, 0));
        let far_raw = PieceEfficiency.extract_raw(&far);
        let near_raw = PieceEfficiency.extract_raw(&near);
        assert!(far_raw < near_raw - 30.0, "far = {far_raw}, near = {near_raw}");
    }
}
