//! Exact endgame solver.
//!
//! Once either side has few shapes left the move list is small enough to
//! score every legal move by the real outcome: owned-cell differential,
//! untileable pockets left next to the opponent and whether the opponent can
//! still move at all. No pruning, no lookahead.

use pentobattle_engine::{GameSnapshot, Move, MoveSource, PlayerId, find_regions};
use pentobattle_evaluator::board_feature::region_feasibility_bonus;

use crate::search::{WIN_VALUE, first_max};

const CELL_DIFFERENTIAL_WEIGHT: f32 = 20.0;

/// Whether either player holds at most `threshold` shapes.
#[must_use]
pub fn is_endgame(snapshot: &GameSnapshot, threshold: usize) -> bool {
    PlayerId::BOTH
        .iter()
        .any(|&p| snapshot.inventory(p).len() <= threshold)
}

/// Score of `mv` for `snapshot.me()`:
/// `(own cells - opponent cells) × 20 + region feasibility`, plus
/// [`WIN_VALUE`] if the opponent has no legal move afterwards.
#[must_use]
#[expect(clippy::cast_precision_loss)]
pub fn endgame_score(snapshot: &GameSnapshot, mv: &Move, source: MoveSource<'_>) -> f32 {
    let me = snapshot.me();
    let opponent = me.opponent();
    let after = snapshot.after_move(me, mv);
    let board = after.board();
    let differential = board.count_owned(me) as f32 - board.count_owned(opponent) as f32;
    let regions = find_regions(board);
    let mut score = differential * CELL_DIFFERENTIAL_WEIGHT
        + region_feasibility_bonus(&regions, board, opponent);
    if !source.has_any_legal_move(
        board,
        opponent,
        after.inventory(opponent),
        after.placed_count(opponent),
    ) {
        score += WIN_VALUE;
    }
    score
}

/// The first legal move with the highest [`endgame_score`].
#[must_use]
pub fn solve_endgame(snapshot: &GameSnapshot, source: MoveSource<'_>) -> Option<Move> {
    let me = snapshot.me();
    let moves = source.moves(
        snapshot.board(),
        me,
        snapshot.inventory(me),
        snapshot.placed_count(me),
    );
    let best = first_max(
        moves
            .iter()
            .map(|mv| (endgame_score(snapshot, mv, source), *mv)),
    );
    if let Some((score, mv)) = &best {
        log::debug!("{me} endgame: {mv} scores {score:.1} of {} moves", moves.len());
    }
    best.map(|(_, mv)| mv)
}

#[cfg(test)]
mod tests {
    use pentobattle_engine::Board;

    use super::*;

    fn late_game() -> GameSnapshot {
        GameSnapshot::new(
            Board::from_ascii(
                "
                FF.IIIII..
                .FF.......
                .F..nn....
                ...nnn..tt
                ....y...t.
                ..yyyy..tt
                ",
            )
            .unwrap(),
            PlayerId::One,
        )
        .with_inventory(PlayerId::One, "LPV".parse().unwrap())
        .with_inventory(PlayerId::Two, "UZ".parse().unwrap())
        .with_placed_count(PlayerId::One, 2)
        .with_placed_count(PlayerId::Two, 3)
    }

    #[test]
    fn test_is_endgame() {
        let snapshot = late_game();
        assert!(is_endgame(&snapshot, 4));
        assert!(is_endgame(&snapshot, 2));
        assert!(!is_endgame(&snapshot, 1));
    }

    #[test]
    fn test_solver_picks_true_argmax() {
        let snapshot = late_game();
        let source = MoveSource::uncached(snapshot.move_generator());
        let legal = snapshot.legal_moves(PlayerId::One);
        assert!(!legal.is_empty());
        let chosen = solve_endgame(&snapshot, source).unwrap();
        assert!(legal.contains(&chosen));

        let chosen_score = endgame_score(&snapshot, &chosen, source);
        for mv in &legal {
            assert!(endgame_score(&snapshot, mv, source) <= chosen_score, "{mv}");
        }
        // First maximal move in generation order.
        let first_best = legal
            .iter()
            .find(|mv| endgame_score(&snapshot, mv, source).to_bits() == chosen_score.to_bits())
            .unwrap();
        assert_eq!(*first_best, chosen);
    }

    #[test]
    fn test_blocking_the_last_shape_wins() {
        // Both sides need the middle row for their last I; taking it first
        // leaves the opponent without a move.
        let snapshot = GameSnapshot::new(
            Board::from_ascii(
                "
                IIIII.
                ......
                iiiii.
                ",
            )
            .unwrap(),
            PlayerId::One,
        )
        .with_inventory(PlayerId::One, "IX".parse().unwrap())
        .with_inventory(PlayerId::Two, "I".parse().unwrap())
        .with_placed_count(PlayerId::One, 1)
        .with_placed_count(PlayerId::Two, 1);
        let source = MoveSource::uncached(snapshot.move_generator());
        assert!(snapshot.has_any_legal_move(PlayerId::Two));
        let chosen = solve_endgame(&snapshot, source).unwrap();
        assert!(chosen.cells().iter().all(|c| c.y == 1));
        assert!(endgame_score(&snapshot, &chosen, source) > WIN_VALUE);
    }

    #[test]
    fn test_no_moves_is_none() {
        let snapshot = GameSnapshot::new(Board::new(4, 4), PlayerId::One)
            .with_inventory(PlayerId::One, "I".parse().unwrap());
        let source = MoveSource::uncached(snapshot.move_generator());
        assert_eq!(solve_endgame(&snapshot, source), None);
    }
}
