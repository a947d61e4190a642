use std::{fmt, ops::ControlFlow};

use serde::{Deserialize, Serialize};

use crate::core::{Board, Cell, Inventory, Orientation, PlayerId, ShapeKind, ShapeLibrary};

pub use self::cache::*;

mod cache;

/// A concrete placement: one orientation of a shape at an anchor.
///
/// The anchor is the board cell that the orientation's `(0, 0)` offset maps
/// to. `cells` is the covered set, sorted, so two moves cover the same cells
/// exactly when their `cells` are equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    shape: ShapeKind,
    orientation: u8,
    anchor: Cell,
    cells: [Cell; 5],
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Format: "shape#orientation@x,y" (e.g., "F#3@2,1")
        write!(
            f,
            "{}#{}@{},{}",
            self.shape.as_char(),
            self.orientation,
            self.anchor.x,
            self.anchor.y
        )
    }
}

impl Serialize for Move {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Move {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de::Error as _;

        let s = String::deserialize(deserializer)?;
        let invalid = || D::Error::custom(format!("expected 'shape#orientation@x,y', got '{s}'"));

        let (shape, rest) = s.split_once('#').ok_or_else(invalid)?;
        let (orientation, anchor) = rest.split_once('@').ok_or_else(invalid)?;
        let (x, y) = anchor.split_once(',').ok_or_else(invalid)?;

        let mut chars = shape.chars();
        let (Some(shape), None) = (chars.next(), chars.next()) else {
            return Err(invalid());
        };
        let shape = ShapeKind::try_from(shape).map_err(D::Error::custom)?;
        let orientation: u8 = orientation.trim().parse().map_err(D::Error::custom)?;
        let x: u8 = x.trim().parse().map_err(D::Error::custom)?;
        let y: u8 = y.trim().parse().map_err(D::Error::custom)?;

        let pattern = ShapeLibrary::standard()
            .orientation(shape, orientation)
            .ok_or_else(|| {
                D::Error::custom(format!("shape {shape} has no orientation {orientation}"))
            })?;
        Move::try_from_orientation(shape, orientation, Cell::new(x, y), pattern)
            .ok_or_else(|| D::Error::custom(format!("placement '{s}' leaves the coordinate range")))
    }
}

impl Move {
    fn try_from_orientation(
        shape: ShapeKind,
        orientation: u8,
        anchor: Cell,
        pattern: &Orientation,
    ) -> Option<Self> {
        let mut cells = [anchor; 5];
        for (cell, offset) in cells.iter_mut().zip(pattern.offsets()) {
            *cell = Cell::new(
                anchor.x.checked_add(offset.dx)?,
                anchor.y.checked_add(offset.dy)?,
            );
        }
        Some(Self {
            shape,
            orientation,
            anchor,
            cells,
        })
    }

    /// Builds the move for orientation `orientation` of `shape` at `anchor`.
    ///
    /// Returns `None` if the orientation index does not exist or the covered
    /// cells would leave the `u8` coordinate range. Board bounds and legality
    /// are not checked.
    #[must_use]
    pub fn new(
        library: &ShapeLibrary,
        shape: ShapeKind,
        orientation: u8,
        anchor: Cell,
    ) -> Option<Self> {
        let pattern = library.orientation(shape, orientation)?;
        Self::try_from_orientation(shape, orientation, anchor, pattern)
    }

    #[must_use]
    pub fn shape(&self) -> ShapeKind {
        self.shape
    }

    #[must_use]
    pub fn orientation(&self) -> u8 {
        self.orientation
    }

    #[must_use]
    pub fn anchor(&self) -> Cell {
        self.anchor
    }

    #[must_use]
    pub fn cells(&self) -> &[Cell; 5] {
        &self.cells
    }

    #[must_use]
    pub fn covers(&self, cell: Cell) -> bool {
        self.cells.binary_search(&cell).is_ok()
    }

    /// Whether both moves cover the same cells, regardless of shape or anchor.
    #[must_use]
    pub fn is_same_placement(&self, other: &Self) -> bool {
        self.cells == other.cells
    }
}

/// Enumerates legal placements for one player.
///
/// A placement is legal when every covered cell is on the board and empty and,
/// once the player has placed at least one shape, at least one covered cell is
/// orthogonally adjacent to a cell that player already owns. Touching only the
/// opponent does not count.
#[derive(Debug, Clone, Copy)]
pub struct MoveGenerator<'a> {
    library: &'a ShapeLibrary,
    allow_mirror: bool,
}

impl MoveGenerator<'static> {
    /// Generator over the process-wide [`ShapeLibrary::standard`].
    #[must_use]
    pub fn standard(allow_mirror: bool) -> Self {
        Self::new(ShapeLibrary::standard(), allow_mirror)
    }
}

impl<'a> MoveGenerator<'a> {
    #[must_use]
    pub fn new(library: &'a ShapeLibrary, allow_mirror: bool) -> Self {
        Self {
            library,
            allow_mirror,
        }
    }

    #[must_use]
    pub fn library(&self) -> &'a ShapeLibrary {
        self.library
    }

    #[must_use]
    pub fn allow_mirror(&self) -> bool {
        self.allow_mirror
    }

    /// All legal moves, grouped by shape in `F..=Z` order, then by
    /// orientation, then row-major by anchor. Duplicated shapes in the
    /// inventory are enumerated once, and the order of the inventory does not
    /// matter.
    #[must_use]
    pub fn generate(
        &self,
        board: &Board,
        player: PlayerId,
        inventory: &Inventory,
        placed_count: usize,
    ) -> Vec<Move> {
        let mut moves = Vec::new();
        let _ = self.try_for_each_move(board, player, inventory, placed_count, |mv| {
            moves.push(mv);
            ControlFlow::Continue(())
        });
        moves
    }

    /// Same answer as `!generate(..).is_empty()`, but stops at the first hit.
    #[must_use]
    pub fn has_any_legal_move(
        &self,
        board: &Board,
        player: PlayerId,
        inventory: &Inventory,
        placed_count: usize,
    ) -> bool {
        self.try_for_each_move(board, player, inventory, placed_count, |_| {
            ControlFlow::Break(())
        })
        .is_break()
    }

    #[must_use]
    pub fn count_moves(
        &self,
        board: &Board,
        player: PlayerId,
        inventory: &Inventory,
        placed_count: usize,
    ) -> usize {
        let mut count = 0;
        let _ = self.try_for_each_move(board, player, inventory, placed_count, |_| {
            count += 1;
            ControlFlow::Continue(())
        });
        count
    }

    /// Number of distinct shapes in `inventory` with at least one legal move.
    #[must_use]
    pub fn count_feasible_shapes(
        &self,
        board: &Board,
        player: PlayerId,
        inventory: &Inventory,
        placed_count: usize,
    ) -> usize {
        inventory
            .distinct()
            .filter(|&shape| {
                self.try_for_each_shape_move(board, player, shape, placed_count, &mut |_| {
                    ControlFlow::Break(())
                })
                .is_break()
            })
            .count()
    }

    fn try_for_each_move<F>(
        &self,
        board: &Board,
        player: PlayerId,
        inventory: &Inventory,
        placed_count: usize,
        mut f: F,
    ) -> ControlFlow<()>
    where
        F: FnMut(Move) -> ControlFlow<()>,
    {
        let mask = inventory.shape_mask();
        for &shape in ShapeKind::ALL.iter().filter(|s| mask & s.bit() != 0) {
            self.try_for_each_shape_move(board, player, shape, placed_count, &mut f)?;
        }
        ControlFlow::Continue(())
    }

    fn try_for_each_shape_move<F>(
        &self,
        board: &Board,
        player: PlayerId,
        shape: ShapeKind,
        placed_count: usize,
        f: &mut F,
    ) -> ControlFlow<()>
    where
        F: FnMut(Move) -> ControlFlow<()>,
    {
        let needs_contact = placed_count > 0;
        let orientations = self.library.orientations(shape, self.allow_mirror);
        for (index, pattern) in (0u8..).zip(orientations) {
            let (Some(max_x), Some(max_y)) = (
                board.width().checked_sub(pattern.width()),
                board.height().checked_sub(pattern.height()),
            ) else {
                continue;
            };
            for y in 0..=max_y {
                for x in 0..=max_x {
                    let Some(mv) = Move::try_from_orientation(shape, index, Cell::new(x, y), pattern)
                    else {
                        continue;
                    };
                    if !mv.cells.iter().all(|&c| board.is_empty(c)) {
                        continue;
                    }
                    if needs_contact && !mv.cells.iter().any(|&c| board.touches_player(c, player)) {
                        continue;
                    }
                    f(mv)?;
                }
            }
        }
        ControlFlow::Continue(())
    }
}

/// Whether `player` can place any shape of `inventory` on `board`.
///
/// A player with an empty inventory has no legal move.
#[must_use]
pub fn has_any_legal_move(
    player: PlayerId,
    board: &Board,
    inventory: &Inventory,
    placed_count: usize,
    allow_mirror: bool,
) -> bool {
    MoveGenerator::standard(allow_mirror).has_any_legal_move(board, player, inventory, placed_count)
}
