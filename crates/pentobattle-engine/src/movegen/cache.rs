use std::{cell::RefCell, collections::HashMap, rc::Rc};

use super::{Move, MoveGenerator};
use crate::core::{Board, Inventory, PlayerId, ShapeKind};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct MoveCacheKey {
    board: Board,
    player: PlayerId,
    shapes: u16,
    needs_contact: bool,
    allow_mirror: bool,
}

#[derive(Debug, Default)]
struct MoveCacheState {
    entries: HashMap<MoveCacheKey, Rc<[Move]>>,
    hits: usize,
    misses: usize,
}

/// Memo of generated move lists, scoped to one decision.
///
/// Entries are keyed by everything generation depends on: the board, the
/// player, the set of distinct shapes, whether contact is required and the
/// mirror flag. A cached list is therefore identical to a fresh one.
///
/// The cache is single-threaded and grows without bound; create one per
/// decision and drop it afterwards.
#[derive(Debug, Default)]
pub struct MoveCache {
    state: RefCell<MoveCacheState>,
}

impl MoveCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.state.borrow().entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub fn hits(&self) -> usize {
        self.state.borrow().hits
    }

    #[must_use]
    pub fn misses(&self) -> usize {
        self.state.borrow().misses
    }

    pub fn clear(&self) {
        let mut state = self.state.borrow_mut();
        state.entries.clear();
        state.hits = 0;
        state.misses = 0;
    }
}

/// Move generation with an optional [`MoveCache`] in front of it.
#[derive(Debug, Clone, Copy)]
pub struct MoveSource<'a> {
    generator: MoveGenerator<'a>,
    cache: Option<&'a MoveCache>,
}

impl<'a> MoveSource<'a> {
    #[must_use]
    pub fn uncached(generator: MoveGenerator<'a>) -> Self {
        Self {
            generator,
            cache: None,
        }
    }

    #[must_use]
    pub fn cached(generator: MoveGenerator<'a>, cache: &'a MoveCache) -> Self {
        Self {
            generator,
            cache: Some(cache),
        }
    }

    #[must_use]
    pub fn generator(&self) -> MoveGenerator<'a> {
        self.generator
    }

    #[must_use]
    pub fn is_cached(&self) -> bool {
        self.cache.is_some()
    }

    #[must_use]
    pub fn moves(
        &self,
        board: &Board,
        player: PlayerId,
        inventory: &Inventory,
        placed_count: usize,
    ) -> Rc<[Move]> {
        let Some(cache) = self.cache else {
            return self
                .generator
                .generate(board, player, inventory, placed_count)
                .into();
        };

        let key = MoveCacheKey {
            board: board.clone(),
            player,
            shapes: inventory.shape_mask(),
            needs_contact: placed_count > 0,
            allow_mirror: self.generator.allow_mirror(),
        };
        if let Some(moves) = cache.state.borrow_mut().lookup(&key) {
            return moves;
        }
        let moves: Rc<[Move]> = self
            .generator
            .generate(board, player, inventory, placed_count)
            .into();
        cache.state.borrow_mut().insert(key, Rc::clone(&moves));
        moves
    }

    #[must_use]
    pub fn count_moves(
        &self,
        board: &Board,
        player: PlayerId,
        inventory: &Inventory,
        placed_count: usize,
    ) -> usize {
        if self.cache.is_some() {
            self.moves(board, player, inventory, placed_count).len()
        } else {
            self.generator
                .count_moves(board, player, inventory, placed_count)
        }
    }

    #[must_use]
    pub fn count_feasible_shapes(
        &self,
        board: &Board,
        player: PlayerId,
        inventory: &Inventory,
        placed_count: usize,
    ) -> usize {
        if self.cache.is_some() {
            let moves = self.moves(board, player, inventory, placed_count);
            let mask = moves.iter().fold(0u16, |mask, m| mask | m.shape().bit());
            ShapeKind::ALL.iter().filter(|s| mask & s.bit() != 0).count()
        } else {
            self.generator
                .count_feasible_shapes(board, player, inventory, placed_count)
        }
    }

    #[must_use]
    pub fn has_any_legal_move(
        &self,
        board: &Board,
        player: PlayerId,
        inventory: &Inventory,
        placed_count: usize,
    ) -> bool {
        if self.cache.is_some() {
            !self.moves(board, player, inventory, placed_count).is_empty()
        } else {
            self.generator
                .has_any_legal_move(board, player, inventory, placed_count)
        }
    }
}

impl MoveCacheState {
    fn lookup(&mut self, key: &MoveCacheKey) -> Option<Rc<[Move]>> {
        let found = self.entries.get(key).cloned();
        if found.is_some() {
            self.hits += 1;
        } else {
            self.misses += 1;
        }
        found
    }

    fn insert(&mut self, key: MoveCacheKey, moves: Rc<[Move]>) {
        self.entries.insert(key, moves);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cached_moves_match_fresh_generation() {
        let board = Board::from_ascii(
            r"
            ..........
            .LLLL.....
            .L........
            ......nn..
            .......nnn
            ..........
            ",
        )
        .unwrap();
        let inventory: Inventory = "FTUWXZ".parse().unwrap();
        let generator = MoveGenerator::standard(true);
        let cache = MoveCache::new();
        let source = MoveSource::cached(generator, &cache);

        let fresh = generator.generate(&board, PlayerId::One, &inventory, 1);
        let first = source.moves(&board, PlayerId::One, &inventory, 1);
        let second = source.moves(&board, PlayerId::One, &inventory, 1);
        assert_eq!(&*first, fresh.as_slice());
        assert!(Rc::ptr_eq(&first, &second));
        assert_eq!((cache.hits(), cache.misses()), (1, 1));
        assert_eq!(
            source.count_feasible_shapes(&board, PlayerId::One, &inventory, 1),
            generator.count_feasible_shapes(&board, PlayerId::One, &inventory, 1)
        );
    }

    #[test]
    fn test_cache_key_separates_players_and_contact() {
        let board = Board::from_ascii(
            r"
            I.........
            I.........
            I.........
            I.........
            I.........
            .........x
            ",
        )
        .unwrap();
        let inventory: Inventory = "V".parse().unwrap();
        let cache = MoveCache::new();
        let source = MoveSource::cached(MoveGenerator::standard(true), &cache);
        let one = source.moves(&board, PlayerId::One, &inventory, 1);
        let two = source.moves(&board, PlayerId::Two, &inventory, 1);
        let free = source.moves(&board, PlayerId::Two, &inventory, 0);
        assert_ne!(one, two);
        assert!(free.len() > two.len());
        assert_eq!(cache.len(), 3);
        cache.clear();
        assert!(cache.is_empty());
    }
}
