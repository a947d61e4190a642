//! Lazily computed facts about a candidate placement.
//!
//! An [`EvaluationContext`] wraps the position a move list was generated from
//! and caches what every candidate shares (regions before the move, the
//! opponent's move count before the move). A [`PlacementAnalysis`] adds one
//! candidate on top of it and computes the simulated position, its regions and
//! its territory split on first use, so features that are weighted zero cost
//! nothing.
//!
//! ```rust,ignore
//! let context = EvaluationContext::new(&snapshot, snapshot.me(), source);
//! let analysis = context.analyze(mv);
//! let net = analysis.territory().net();
//! ```

use std::cell::OnceCell;

use pentobattle_engine::{GameSnapshot, Move, MoveSource, PlayerId, Region, find_regions};

use crate::territory::Territory;

#[derive(Debug)]
pub struct EvaluationContext<'a> {
    before: &'a GameSnapshot,
    mover: PlayerId,
    source: MoveSource<'a>,
    regions_before: OnceCell<Vec<Region>>,
    opponent_moves_before: OnceCell<usize>,
}

impl<'a> EvaluationContext<'a> {
    #[must_use]
    pub fn new(before: &'a GameSnapshot, mover: PlayerId, source: MoveSource<'a>) -> Self {
        Self {
            before,
            mover,
            source,
            regions_before: OnceCell::new(),
            opponent_moves_before: OnceCell::new(),
        }
    }

    #[must_use]
    pub fn before(&self) -> &'a GameSnapshot {
        self.before
    }

    #[must_use]
    pub fn mover(&self) -> PlayerId {
        self.mover
    }

    #[must_use]
    pub fn opponent(&self) -> PlayerId {
        self.mover.opponent()
    }

    #[must_use]
    pub fn source(&self) -> MoveSource<'a> {
        self.source
    }

    #[must_use]
    pub fn regions_before(&self) -> &[Region] {
        self.regions_before
            .get_or_init(|| find_regions(self.before.board()))
    }

    /// Opponent's legal move count in the position before any candidate.
    #[must_use]
    pub fn opponent_moves_before(&self) -> usize {
        *self.opponent_moves_before.get_or_init(|| {
            let opponent = self.opponent();
            self.source.count_moves(
                self.before.board(),
                opponent,
                self.before.inventory(opponent),
                self.before.placed_count(opponent),
            )
        })
    }

    #[must_use]
    pub fn analyze(&self, placement: Move) -> PlacementAnalysis<'_> {
        PlacementAnalysis::new(self, placement)
    }
}

#[derive(Debug)]
pub struct PlacementAnalysis<'c> {
    context: &'c EvaluationContext<'c>,
    placement: Move,
    after: GameSnapshot,
    regions: OnceCell<Vec<Region>>,
    territory: OnceCell<Territory>,
}

impl<'c> PlacementAnalysis<'c> {
    #[must_use]
    pub fn new(context: &'c EvaluationContext<'c>, placement: Move) -> Self {
        let after = context.before().after_move(context.mover(), &placement);
        Self {
            context,
            placement,
            after,
            regions: OnceCell::new(),
            territory: OnceCell::new(),
        }
    }

    #[must_use]
    pub fn context(&self) -> &'c EvaluationContext<'c> {
        self.context
    }

    #[must_use]
    pub fn placement(&self) -> &Move {
        &self.placement
    }

    #[must_use]
    pub fn mover(&self) -> PlayerId {
        self.context.mover()
    }

    #[must_use]
    pub fn opponent(&self) -> PlayerId {
        self.context.opponent()
    }

    #[must_use]
    pub fn before(&self) -> &GameSnapshot {
        self.context.before()
    }

    /// Simulated position after the placement.
    #[must_use]
    pub fn after(&self) -> &GameSnapshot {
        &self.after
    }

    /// Empty regions after the placement.
    #[must_use]
    pub fn regions(&self) -> &[Region] {
        self.regions.get_or_init(|| find_regions(self.after.board()))
    }

    /// Territory after the placement, from the mover's side.
    #[must_use]
    pub fn territory(&self) -> Territory {
        *self
            .territory
            .get_or_init(|| Territory::compute(self.after.board(), self.mover()))
    }

    /// Legal move count of `player` in the simulated position.
    #[must_use]
    pub fn moves_after(&self, player: PlayerId) -> usize {
        self.context.source().count_moves(
            self.after.board(),
            player,
            self.after.inventory(player),
            self.after.placed_count(player),
        )
    }

    /// Distinct shapes `player` can still place in the simulated position.
    #[must_use]
    pub fn feasible_shapes_after(&self, player: PlayerId) -> usize {
        self.context.source().count_feasible_shapes(
            self.after.board(),
            player,
            self.after.inventory(player),
            self.after.placed_count(player),
        )
    }
}
