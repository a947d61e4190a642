use super::BoardFeatureSource;
use crate::placement_analysis::PlacementAnalysis;

/// Opponent moves taken away by the placement.
///
/// # Raw measurement
///
/// `raw = opponent move count before - opponent move count after`
#[derive(Debug, Clone)]
pub struct MobilityDestruction;

impl BoardFeatureSource for MobilityDestruction {
    fn id(&self) -> &'static str {
        "mobility_destruction"
    }
    fn name(&self) -> &'static str {
        "Mobility Destruction"
    }
    #[expect(clippy::cast_precision_loss)]
    fn extract_raw(&self, analysis: &PlacementAnalysis) -> f32 {
        let before = analysis.context().opponent_moves_before();
        let after = analysis.moves_after(analysis.opponent());
        before as f32 - after as f32
    }
}

/// Shapes the mover can still place afterwards.
///
/// # Raw measurement
///
/// Distinct shapes in the mover's remaining inventory with at least one legal
/// placement in the simulated position.
#[derive(Debug, Clone)]
pub struct OwnFeasibility;

impl BoardFeatureSource for OwnFeasibility {
    fn id(&self) -> &'static str {
        "own_feasibility"
    }
    fn name(&self) -> &'static str {
        "Own Feasibility"
    }
    #[expect(clippy::cast_precision_loss)]
    fn extract_raw(&self, analysis: &PlacementAnalysis) -> f32 {
        analysis.feasible_shapes_after(analysis.mover()) as f32
    }
}

/// Shapes the opponent can still place afterwards.
///
/// # Raw measurement
///
/// Same as [`OwnFeasibility`] for the opponent; usually weighted negatively.
#[derive(Debug, Clone)]
pub struct OpponentFeasibility;

impl BoardFeatureSource for OpponentFeasibility {
    fn id(&self) -> &'static str {
        "opponent_feasibility"
    }
    fn name(&self) -> &'static str {
        "Opponent Feasibility"
    }
    #[expect(clippy::cast_precision_loss)]
    fn extract_raw(&self, analysis: &PlacementAnalysis) -> f32 {
        analysis.feasible_shapes_after(analysis.opponent()) as f32
    }
}

#[cfg(test)]
mod tests {
    use pentobattle_engine::{PlayerId, ShapeKind};

    use super::*;
    use crate::{
        board_feature::test_util::{placement, snapshot, source},
        placement_analysis::EvaluationContext,
    };

    fn before() -> pentobattle_engine::GameSnapshot {
        snapshot(
            "
            X.........
            ..........
            ..........
            ..........
            ..........
            .........x
            ",
            "IL",
            "IX",
        )
    }

    #[test]
    fn test_blocking_move_destroys_opponent_mobility() {
        let before = before();
        let context = EvaluationContext::new(&before, PlayerId::One, source());
        // Far corner vs. next to the opponent's only cell.
        let far = context.analyze(placement(ShapeKind::I, 0, 0, 1));
        let near = context.analyze(placement(ShapeKind::I, 1, 5, 4));
        let far_raw = MobilityDestruction.extract_raw(&far);
        let near_raw = MobilityDestruction.extract_raw(&near);
        assert!(near_raw > far_raw, "near = {near_raw}, far = {far_raw}");
    }

    #[test]
    fn test_feasibility_counts_distinct_shapes() {
        let before = before();
        let context = EvaluationContext::new(&before, PlayerId::One, source());
        let analysis = context.analyze(placement(ShapeKind::I, 0, 0, 1));
        // The I is spent, only the L remains.
        assert!((OwnFeasibility.extract_raw(&analysis) - 1.0).abs() < f32::EPSILON);
        assert!((OpponentFeasibility.extract_raw(&analysis) - 2.0).abs() < f32::EPSILON);
    }
}
