//! Placement search.
//!
//! [`greedy`] scores every legal move once. [`beam`] pre-scores every legal
//! move with [`quick_estimate`], keeps the best few and looks one or two
//! plies ahead from each.

use pentobattle_engine::{Board, PlayerId};
use pentobattle_evaluator::territory::Territory;
use rand::Rng;

pub mod beam;
pub mod greedy;

/// Lookahead value of a position where the opponent cannot move.
pub const WIN_VALUE: f32 = 1000.0;
/// Lookahead value of a position where self cannot move.
pub const LOSS_VALUE: f32 = -WIN_VALUE;

/// Cheap positional estimate used for pruning: net Voronoi territory.
#[must_use]
pub fn quick_estimate(board: &Board, me: PlayerId) -> f32 {
    Territory::compute(board, me).net()
}

/// Uniform noise in `[0, amplitude)`; draws nothing when `amplitude` is not
/// positive.
pub(crate) fn sample_jitter<R>(rng: &mut R, amplitude: f32) -> f32
where
    R: Rng + ?Sized,
{
    if amplitude > 0.0 {
        rng.random_range(0.0..amplitude)
    } else {
        0.0
    }
}

/// Highest-scored item; the earliest one wins ties.
pub(crate) fn first_max<T>(items: impl IntoIterator<Item = (f32, T)>) -> Option<(f32, T)> {
    let mut best: Option<(f32, T)> = None;
    for (score, item) in items {
        if best.as_ref().is_none_or(|(best_score, _)| score > *best_score) {
            best = Some((score, item));
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_max_keeps_earliest_tie() {
        let best = first_max([(1.0, 'a'), (3.0, 'b'), (3.0, 'c'), (2.0, 'd')]);
        assert_eq!(best, Some((3.0, 'b')));
        assert_eq!(first_max(Vec::<(f32, char)>::new()), None);
    }

    #[test]
    fn test_zero_jitter_draws_nothing() {
        use rand::SeedableRng as _;
        let mut a = rand_pcg::Pcg32::seed_from_u64(1);
        let b = a.clone();
        assert!(sample_jitter(&mut a, 0.0).abs() < f32::EPSILON);
        assert_eq!(a, b);
        let noise = sample_jitter(&mut a, 0.5);
        assert!((0.0..0.5).contains(&noise));
    }
}
