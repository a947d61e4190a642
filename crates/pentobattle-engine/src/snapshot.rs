use serde::{Deserialize, Serialize};

use crate::{
    core::{Board, Inventory, PlayerId, ShapeKind},
    movegen::{Move, MoveGenerator},
};

fn default_allow_mirror() -> bool {
    true
}

/// Read-only view of a placement-phase position, as seen by the side to move.
///
/// `me` is the player the engine decides for. `placed_counts` is kept per
/// player; a player whose count is zero may place anywhere, everyone else must
/// touch their own cells.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GameSnapshot {
    board: Board,
    inventories: [Inventory; 2],
    #[serde(default)]
    placed_counts: [usize; 2],
    #[serde(default = "default_allow_mirror")]
    allow_mirror: bool,
    me: PlayerId,
}

impl GameSnapshot {
    /// Snapshot with empty inventories, no placements and mirroring allowed.
    #[must_use]
    pub fn new(board: Board, me: PlayerId) -> Self {
        Self {
            board,
            inventories: [Inventory::default(), Inventory::default()],
            placed_counts: [0, 0],
            allow_mirror: true,
            me,
        }
    }

    #[must_use]
    pub fn with_inventory(mut self, player: PlayerId, inventory: Inventory) -> Self {
        self.inventories[player.index()] = inventory;
        self
    }

    #[must_use]
    pub fn with_placed_count(mut self, player: PlayerId, count: usize) -> Self {
        self.placed_counts[player.index()] = count;
        self
    }

    #[must_use]
    pub fn with_allow_mirror(mut self, allow_mirror: bool) -> Self {
        self.allow_mirror = allow_mirror;
        self
    }

    /// Same position, deciding for `me` instead.
    #[must_use]
    pub fn with_me(mut self, me: PlayerId) -> Self {
        self.me = me;
        self
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn me(&self) -> PlayerId {
        self.me
    }

    #[must_use]
    pub fn opponent(&self) -> PlayerId {
        self.me.opponent()
    }

    #[must_use]
    pub fn inventory(&self, player: PlayerId) -> &Inventory {
        &self.inventories[player.index()]
    }

    #[must_use]
    pub fn placed_count(&self, player: PlayerId) -> usize {
        self.placed_counts[player.index()]
    }

    #[must_use]
    pub fn allow_mirror(&self) -> bool {
        self.allow_mirror
    }

    /// Uncached generator matching this snapshot's mirror rule.
    #[must_use]
    pub fn move_generator(&self) -> MoveGenerator<'static> {
        MoveGenerator::standard(self.allow_mirror)
    }

    #[must_use]
    pub fn legal_moves(&self, player: PlayerId) -> Vec<Move> {
        self.move_generator().generate(
            &self.board,
            player,
            self.inventory(player),
            self.placed_count(player),
        )
    }

    #[must_use]
    pub fn has_any_legal_move(&self, player: PlayerId) -> bool {
        self.move_generator().has_any_legal_move(
            &self.board,
            player,
            self.inventory(player),
            self.placed_count(player),
        )
    }

    /// Position after `player` makes `mv`: the cells are claimed, the shape
    /// leaves the inventory and the player's placed count grows by one.
    /// `me` is unchanged.
    #[must_use]
    pub fn after_move(&self, player: PlayerId, mv: &Move) -> Self {
        let mut next = self.clone();
        next.board.place(player, mv.shape(), mv.cells());
        next.inventories[player.index()].remove(mv.shape());
        next.placed_counts[player.index()] += 1;
        next
    }
}

/// Read-only view of the draft phase.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DraftSnapshot {
    pool: Inventory,
    #[serde(default)]
    picks: [Inventory; 2],
    me: PlayerId,
}

impl DraftSnapshot {
    #[must_use]
    pub fn new(pool: Inventory, me: PlayerId) -> Self {
        Self {
            pool,
            picks: [Inventory::default(), Inventory::default()],
            me,
        }
    }

    /// Draft over one of each shape with nothing picked yet.
    #[must_use]
    pub fn full_pool(me: PlayerId) -> Self {
        Self::new(Inventory::full_set(), me)
    }

    #[must_use]
    pub fn with_picks(mut self, player: PlayerId, picks: Inventory) -> Self {
        self.picks[player.index()] = picks;
        self
    }

    #[must_use]
    pub fn with_me(mut self, me: PlayerId) -> Self {
        self.me = me;
        self
    }

    #[must_use]
    pub fn pool(&self) -> &Inventory {
        &self.pool
    }

    #[must_use]
    pub fn picks(&self, player: PlayerId) -> &Inventory {
        &self.picks[player.index()]
    }

    #[must_use]
    pub fn me(&self) -> PlayerId {
        self.me
    }

    #[must_use]
    pub fn opponent(&self) -> PlayerId {
        self.me.opponent()
    }

    /// Draft state after `player` takes `shape` from the pool.
    ///
    /// Returns `None` if the pool does not hold `shape`.
    #[must_use]
    pub fn after_pick(&self, player: PlayerId, shape: ShapeKind) -> Option<Self> {
        let mut next = self.clone();
        if !next.pool.remove(shape) {
            return None;
        }
        next.picks[player.index()].push(shape);
        Some(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Cell, ShapeLibrary};

    #[test]
    fn test_after_move_updates_everything() {
        let snapshot = GameSnapshot::new(Board::standard(), PlayerId::One)
            .with_inventory(PlayerId::One, "ILX".parse().unwrap())
            .with_inventory(PlayerId::Two, "ILX".parse().unwrap());
        let mv = Move::new(ShapeLibrary::standard(), ShapeKind::I, 0, Cell::new(0, 0)).unwrap();
        let next = snapshot.after_move(PlayerId::One, &mv);
        assert_eq!(next.board().count_owned(PlayerId::One), 5);
        assert_eq!(next.inventory(PlayerId::One).to_string(), "LX");
        assert_eq!(next.inventory(PlayerId::Two).to_string(), "ILX");
        assert_eq!(next.placed_count(PlayerId::One), 1);
        assert_eq!(next.placed_count(PlayerId::Two), 0);
        assert_eq!(snapshot.placed_count(PlayerId::One), 0);
        for mv in next.legal_moves(PlayerId::One) {
            assert!(
                mv.cells()
                    .iter()
                    .any(|&c| next.board().touches_player(c, PlayerId::One))
            );
        }
        assert!(next.has_any_legal_move(PlayerId::Two));
    }

    #[test]
    fn test_game_snapshot_json() {
        let json = r#"{
            "board": ["I....", "I....", "I....", "I....", "I...x"],
            "inventories": ["LP", "TUV"],
            "placed_counts": [1, 1],
            "me": 2
        }"#;
        let snapshot: GameSnapshot = serde_json::from_str(json).unwrap();
        assert_eq!(snapshot.me(), PlayerId::Two);
        assert!(snapshot.allow_mirror());
        assert_eq!(snapshot.inventory(PlayerId::Two).len(), 3);
        let restored: GameSnapshot =
            serde_json::from_str(&serde_json::to_string(&snapshot).unwrap()).unwrap();
        assert_eq!(restored, snapshot);
    }

    #[test]
    fn test_after_pick() {
        let draft = DraftSnapshot::full_pool(PlayerId::One);
        let next = draft.after_pick(PlayerId::One, ShapeKind::X).unwrap();
        assert_eq!(next.pool().len(), 11);
        assert_eq!(next.picks(PlayerId::One).to_string(), "X");
        assert!(next.after_pick(PlayerId::Two, ShapeKind::X).is_none());
    }
}
