use pentobattle_engine::{Board, GameSnapshot, Move, MoveSource, PlayerId};
use pentobattle_evaluator::{
    placement_analysis::EvaluationContext,
    placement_evaluator::{PlacementEvaluator as _, WeightedPlacementEvaluator},
    weights::WeightSet,
};
use rand::{Rng, seq::IndexedRandom as _};

use super::{first_max, sample_jitter};
use crate::difficulty::GreedyParams;

/// Picks the best single-ply move, or a random one with probability
/// `params.random_move_chance`.
pub fn choose<R>(
    snapshot: &GameSnapshot,
    source: MoveSource<'_>,
    params: &GreedyParams,
    jitter: f32,
    weights: &WeightSet,
    rng: &mut R,
) -> Option<Move>
where
    R: Rng + ?Sized,
{
    let me = snapshot.me();
    let moves = source.moves(
        snapshot.board(),
        me,
        snapshot.inventory(me),
        snapshot.placed_count(me),
    );
    if moves.is_empty() {
        return None;
    }
    if rng.random_bool(params.random_move_chance.clamp(0.0, 1.0)) {
        log::debug!("{me} plays a random move");
        return moves.choose(rng).copied();
    }

    let context = EvaluationContext::new(snapshot, me, source);
    let evaluator = weights
        .active_features()
        .next()
        .is_some()
        .then(|| WeightedPlacementEvaluator::new(*weights));
    let best = first_max(moves.iter().map(|&mv| {
        let mut score =
            sample_jitter(rng, jitter) + contact_score(snapshot.board(), &mv, me, params);
        if let Some(evaluator) = &evaluator {
            score += evaluator.evaluate_placement(&context.analyze(mv));
        }
        (score, mv)
    }));
    best.map(|(_, mv)| mv)
}

/// Neighbor and interior terms of `params`, on the board before the move.
#[must_use]
pub fn contact_score(board: &Board, mv: &Move, me: PlayerId, params: &GreedyParams) -> f32 {
    let mut score = 0.0;
    for &cell in mv.cells() {
        for neighbor in board.neighbors(cell) {
            match board.owner(neighbor) {
                Some(owner) if owner == me => score += params.own_contact,
                Some(_) => score += params.opponent_contact,
                None => {}
            }
        }
        let interior = cell.x > 0
            && cell.y > 0
            && cell.x + 1 < board.width()
            && cell.y + 1 < board.height();
        if interior {
            score += params.interior;
        }
    }
    score
}

#[cfg(test)]
mod tests {
    use pentobattle_engine::{Cell, ShapeKind, ShapeLibrary};
    use rand::SeedableRng as _;
    use rand_pcg::Pcg32;

    use super::*;
    use crate::difficulty::Difficulty;

    fn params_of(difficulty: Difficulty) -> GreedyParams {
        match difficulty.profile().strategy {
            crate::difficulty::SearchStrategy::Greedy(params) => params,
            crate::difficulty::SearchStrategy::Beam(_) => unreachable!(),
        }
    }

    #[test]
    fn test_contact_score_counts_neighbors() {
        let board = Board::from_ascii(
            "
            ......
            .X..x.
            ......
            ",
        )
        .unwrap();
        let mv = Move::new(ShapeLibrary::standard(), ShapeKind::I, 1, Cell::new(0, 0)).unwrap();
        let params = GreedyParams {
            random_move_chance: 0.0,
            own_contact: 2.0,
            opponent_contact: 0.5,
            interior: 0.0,
        };
        // (1,0) touches X, (4,0) touches x.
        let score = contact_score(&board, &mv, PlayerId::One, &params);
        assert!((score - 2.5).abs() < f32::EPSILON);
    }

    #[test]
    fn test_interior_excludes_edges() {
        let board = Board::standard();
        let mv = Move::new(ShapeLibrary::standard(), ShapeKind::I, 1, Cell::new(1, 1)).unwrap();
        let params = GreedyParams {
            random_move_chance: 0.0,
            own_contact: 0.0,
            opponent_contact: 0.0,
            interior: 1.0,
        };
        assert!((contact_score(&board, &mv, PlayerId::One, &params) - 5.0).abs() < f32::EPSILON);
        let edge = Move::new(ShapeLibrary::standard(), ShapeKind::I, 1, Cell::new(0, 0)).unwrap();
        assert!(contact_score(&board, &edge, PlayerId::One, &params).abs() < f32::EPSILON);
    }

    #[test]
    fn test_greedy_tiers_return_legal_moves() {
        let snapshot = GameSnapshot::new(
            Board::from_ascii(
                "
                ..........
                .LLLL.....
                .L........
                ......ttt.
                .......t..
                .......t..
                ",
            )
            .unwrap(),
            PlayerId::One,
        )
        .with_inventory(PlayerId::One, "FIPXYZ".parse().unwrap())
        .with_inventory(PlayerId::Two, "NUVW".parse().unwrap())
        .with_placed_count(PlayerId::One, 1)
        .with_placed_count(PlayerId::Two, 1);
        let legal = snapshot.legal_moves(PlayerId::One);
        let source = MoveSource::uncached(snapshot.move_generator());
        let mut rng = Pcg32::seed_from_u64(42);
        for difficulty in [Difficulty::Novice, Difficulty::Elite] {
            let profile = difficulty.profile();
            for _ in 0..10 {
                let mv = choose(
                    &snapshot,
                    source,
                    &params_of(difficulty),
                    profile.jitter,
                    &profile.weights,
                    &mut rng,
                )
                .unwrap();
                assert!(legal.contains(&mv), "{difficulty}: {mv}");
            }
        }
    }

    #[test]
    fn test_no_moves_returns_none() {
        let snapshot = GameSnapshot::new(Board::new(3, 3), PlayerId::One)
            .with_inventory(PlayerId::One, "I".parse().unwrap());
        let source = MoveSource::uncached(snapshot.move_generator());
        let mut rng = Pcg32::seed_from_u64(0);
        let params = params_of(Difficulty::Novice);
        assert_eq!(
            choose(&snapshot, source, &params, 2.0, &WeightSet::ZERO, &mut rng),
            None
        );
    }
}
