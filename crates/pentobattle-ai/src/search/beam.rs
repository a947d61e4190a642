//! Beam-pruned minimax.
//!
//! 1. Every legal move is pre-scored by [`quick_estimate`] of the position
//!    after it (plus optional jitter) and only the best `beam_width` survive.
//!    The sort is stable, so equal pre-scores keep generation order.
//! 2. Each survivor gets the full weighted evaluator score plus
//!    `lookahead_weight × lookahead value`.
//! 3. The lookahead keeps the `reply_beam_width` opponent replies that are
//!    worst for self by the quick estimate and takes the minimum over them,
//!    either of the quick estimate itself ([`Lookahead::OpponentReply`]) or of
//!    self's best follow-up ([`Lookahead::SelfFollowUp`]). An opponent without
//!    replies is worth [`WIN_VALUE`]; self without a follow-up is worth
//!    [`LOSS_VALUE`].
//! 4. The highest combined score wins; ties keep the earlier survivor.

use log::Level;
use pentobattle_engine::{GameSnapshot, Move, MoveSource, PlayerId};
use pentobattle_evaluator::{
    placement_analysis::EvaluationContext,
    placement_evaluator::{PlacementEvaluator as _, WeightedPlacementEvaluator},
    weights::WeightSet,
};
use rand::Rng;

use super::{LOSS_VALUE, WIN_VALUE, first_max, quick_estimate, sample_jitter};
use crate::difficulty::{BeamParams, Lookahead};

pub fn choose<R>(
    snapshot: &GameSnapshot,
    source: MoveSource<'_>,
    params: &BeamParams,
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
    let mut candidates: Vec<(f32, Move)> = moves
        .iter()
        .map(|&mv| {
            let board = snapshot.board().with_placement(me, mv.shape(), mv.cells());
            (quick_estimate(&board, me) + sample_jitter(rng, jitter), mv)
        })
        .collect();
    candidates.sort_by(|a, b| b.0.total_cmp(&a.0));
    candidates.truncate(params.beam_width.max(1));
    log::debug!(
        "{me}: {} legal moves, {} in beam",
        moves.len(),
        candidates.len()
    );

    let context = EvaluationContext::new(snapshot, me, source);
    let evaluator = WeightedPlacementEvaluator::new(*weights);
    let trace = log::log_enabled!(Level::Trace);
    let best = first_max(candidates.into_iter().map(|(quick, mv)| {
        let analysis = context.analyze(mv);
        let positional = evaluator.evaluate_placement(&analysis);
        let lookahead = lookahead_value(analysis.after(), me, source, params);
        let score = positional + params.lookahead_weight * lookahead;
        if trace {
            log::trace!(
                "{mv}: quick={quick:.1} positional={positional:.1} lookahead={lookahead:.1} score={score:.1}"
            );
        }
        (score, mv)
    }));
    best.map(|(_, mv)| mv)
}

/// Value of `position` (self to be answered by the opponent) under
/// `params.lookahead`.
#[must_use]
pub fn lookahead_value(
    position: &GameSnapshot,
    me: PlayerId,
    source: MoveSource<'_>,
    params: &BeamParams,
) -> f32 {
    if params.lookahead == Lookahead::None {
        return 0.0;
    }
    let replies = worst_replies(position, me, source, params.reply_beam_width);
    if replies.is_empty() {
        return WIN_VALUE;
    }
    match params.lookahead {
        Lookahead::None | Lookahead::OpponentReply => replies
            .iter()
            .map(|(score, _)| *score)
            .fold(f32::INFINITY, f32::min),
        Lookahead::SelfFollowUp => {
            let opponent = me.opponent();
            replies
                .iter()
                .map(|(_, reply)| best_follow_up(&position.after_move(opponent, reply), me, source))
                .fold(f32::INFINITY, f32::min)
        }
    }
}

/// Up to `width` opponent replies, worst for `me` first by the quick estimate.
fn worst_replies(
    position: &GameSnapshot,
    me: PlayerId,
    source: MoveSource<'_>,
    width: usize,
) -> Vec<(f32, Move)> {
    let opponent = me.opponent();
    let moves = source.moves(
        position.board(),
        opponent,
        position.inventory(opponent),
        position.placed_count(opponent),
    );
    let mut replies: Vec<(f32, Move)> = moves
        .iter()
        .map(|&reply| {
            let board = position
                .board()
                .with_placement(opponent, reply.shape(), reply.cells());
            (quick_estimate(&board, me), reply)
        })
        .collect();
    replies.sort_by(|a, b| a.0.total_cmp(&b.0));
    replies.truncate(width.max(1));
    replies
}

/// Best quick estimate `me` can reach with one more move from `position`.
fn best_follow_up(position: &GameSnapshot, me: PlayerId, source: MoveSource<'_>) -> f32 {
    let moves = source.moves(
        position.board(),
        me,
        position.inventory(me),
        position.placed_count(me),
    );
    moves
        .iter()
        .map(|mv| {
            let board = position.board().with_placement(me, mv.shape(), mv.cells());
            quick_estimate(&board, me)
        })
        .fold(LOSS_VALUE, f32::max)
}
