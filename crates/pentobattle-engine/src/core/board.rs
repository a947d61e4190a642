use std::{fmt, str::FromStr};

use arrayvec::ArrayVec;
use serde::{Deserialize, Serialize};

use super::shape::ShapeKind;
use crate::InvalidPlayerError;

/// One of the two seats at the table.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::IsVariant,
)]
#[serde(into = "u8", try_from = "u8")]
pub enum PlayerId {
    One,
    Two,
}

impl PlayerId {
    pub const BOTH: [Self; 2] = [Self::One, Self::Two];

    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Self::One => Self::Two,
            Self::Two => Self::One,
        }
    }

    /// Zero-based index for per-player arrays.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::One => 0,
            Self::Two => 1,
        }
    }

    /// One-based player number as used on the wire.
    #[must_use]
    pub const fn number(self) -> u8 {
        match self {
            Self::One => 1,
            Self::Two => 2,
        }
    }

    #[must_use]
    pub const fn from_number(n: u8) -> Option<Self> {
        match n {
            1 => Some(Self::One),
            2 => Some(Self::Two),
            _ => None,
        }
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P{}", self.number())
    }
}

impl From<PlayerId> for u8 {
    fn from(player: PlayerId) -> Self {
        player.number()
    }
}

impl TryFrom<u8> for PlayerId {
    type Error = InvalidPlayerError;

    fn try_from(n: u8) -> Result<Self, Self::Error> {
        Self::from_number(n).ok_or(InvalidPlayerError(n))
    }
}

/// Board coordinate. `x` is the column, `y` the row, both from the top-left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub x: u8,
    pub y: u8,
}

impl Cell {
    #[must_use]
    pub const fn new(x: u8, y: u8) -> Self {
        Self { x, y }
    }

    /// Checkerboard color of the cell.
    #[must_use]
    pub const fn is_even(self) -> bool {
        (self.x ^ self.y) & 1 == 0
    }
}

/// Contents of an occupied cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Occupant {
    pub player: PlayerId,
    pub shape: ShapeKind,
}

impl Occupant {
    /// Player one is written uppercase, player two lowercase.
    #[must_use]
    pub const fn as_char(self) -> char {
        let c = self.shape.as_char();
        match self.player {
            PlayerId::One => c,
            PlayerId::Two => c.to_ascii_lowercase(),
        }
    }

    #[must_use]
    pub const fn from_char(c: char) -> Option<Self> {
        let Some(shape) = ShapeKind::from_char(c) else {
            return None;
        };
        let player = if c.is_ascii_uppercase() {
            PlayerId::One
        } else {
            PlayerId::Two
        };
        Some(Self { player, shape })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum BoardParseError {
    #[display("board has no rows")]
    Empty,
    #[display("row {row} has {actual} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        actual: usize,
    },
    #[display("invalid cell '{ch}' at row {row}, column {column}")]
    InvalidCell { row: usize, column: usize, ch: char },
    #[display("board of {width}x{height} cells exceeds 255 cells per side")]
    TooLarge { width: usize, height: usize },
}

const DIRECTIONS: [(i16, i16); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

/// Rectangular grid of cells, each empty or owned by one player.
///
/// Boards are values: the search derives child positions with
/// [`Board::with_placement`] and never mutates a position it was handed.
///
/// # Text form
///
/// `.` is an empty cell, an uppercase shape letter a cell of player one and a
/// lowercase letter a cell of player two:
///
/// ```
/// use pentobattle_engine::{Board, Cell, PlayerId};
///
/// let board = Board::from_ascii(
///     "
///     II...
///     I....
///     ...zz
///     ",
/// )
/// .unwrap();
/// assert_eq!(board.width(), 5);
/// assert_eq!(board.owner(Cell::new(4, 2)), Some(PlayerId::Two));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "Vec<String>", try_from = "Vec<String>")]
pub struct Board {
    width: u8,
    height: u8,
    cells: Vec<Option<Occupant>>,
}

impl Default for Board {
    fn default() -> Self {
        Self::standard()
    }
}

impl Board {
    pub const STANDARD_WIDTH: u8 = 10;
    pub const STANDARD_HEIGHT: u8 = 6;

    /// Creates an empty board.
    ///
    /// # Panics
    ///
    /// Panics if either dimension is zero.
    #[must_use]
    pub fn new(width: u8, height: u8) -> Self {
        assert!(width > 0 && height > 0, "board must not be empty");
        Self {
            width,
            height,
            cells: vec![None; usize::from(width) * usize::from(height)],
        }
    }

    /// Empty 10×6 board.
    #[must_use]
    pub fn standard() -> Self {
        Self::new(Self::STANDARD_WIDTH, Self::STANDARD_HEIGHT)
    }

    #[must_use]
    pub fn width(&self) -> u8 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> u8 {
        self.height
    }

    #[must_use]
    pub fn area(&self) -> usize {
        self.cells.len()
    }

    fn index(&self, cell: Cell) -> usize {
        usize::from(cell.y) * usize::from(self.width) + usize::from(cell.x)
    }

    /// Dense index of `cell`, suitable for side tables of length [`Board::area`].
    #[must_use]
    pub fn cell_index(&self, cell: Cell) -> usize {
        self.index(cell)
    }

    #[must_use]
    pub fn contains(&self, cell: Cell) -> bool {
        cell.x < self.width && cell.y < self.height
    }

    #[must_use]
    pub fn get(&self, cell: Cell) -> Option<Occupant> {
        self.cells[self.index(cell)]
    }

    #[must_use]
    pub fn owner(&self, cell: Cell) -> Option<PlayerId> {
        self.get(cell).map(|o| o.player)
    }

    #[must_use]
    pub fn is_empty(&self, cell: Cell) -> bool {
        self.get(cell).is_none()
    }

    /// Orthogonal neighbors of `cell` that lie on the board.
    #[must_use]
    pub fn neighbors(&self, cell: Cell) -> ArrayVec<Cell, 4> {
        let mut neighbors = ArrayVec::new();
        for (dx, dy) in DIRECTIONS {
            let x = i16::from(cell.x) + dx;
            let y = i16::from(cell.y) + dy;
            if let (Ok(x), Ok(y)) = (u8::try_from(x), u8::try_from(y)) {
                let neighbor = Cell::new(x, y);
                if self.contains(neighbor) {
                    neighbors.push(neighbor);
                }
            }
        }
        neighbors
    }

    /// Whether any orthogonal neighbor of `cell` belongs to `player`.
    #[must_use]
    pub fn touches_player(&self, cell: Cell, player: PlayerId) -> bool {
        self.neighbors(cell)
            .iter()
            .any(|&n| self.owner(n) == Some(player))
    }

    /// All cells in row-major order.
    pub fn all_cells(&self) -> impl Iterator<Item = Cell> + use<> {
        let width = self.width;
        (0..self.height).flat_map(move |y| (0..width).map(move |x| Cell::new(x, y)))
    }

    pub fn empty_cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.all_cells().filter(|&c| self.is_empty(c))
    }

    #[must_use]
    pub fn count_empty(&self) -> usize {
        self.cells.iter().filter(|c| c.is_none()).count()
    }

    #[must_use]
    pub fn count_owned(&self, player: PlayerId) -> usize {
        self.cells
            .iter()
            .filter(|c| c.is_some_and(|o| o.player == player))
            .count()
    }

    /// Marks `cells` as owned by `player`.
    ///
    /// Callers are expected to have checked legality; occupied cells are
    /// overwritten.
    pub fn place(&mut self, player: PlayerId, shape: ShapeKind, cells: &[Cell]) {
        for &cell in cells {
            debug_assert!(self.is_empty(cell), "placing onto occupied cell {cell:?}");
            let index = self.index(cell);
            self.cells[index] = Some(Occupant { player, shape });
        }
    }

    /// Copy of this board with `cells` owned by `player`.
    #[must_use]
    pub fn with_placement(&self, player: PlayerId, shape: ShapeKind, cells: &[Cell]) -> Self {
        let mut board = self.clone();
        board.place(player, shape, cells);
        board
    }

    /// Parses the text form described on [`Board`].
    ///
    /// Blank lines are skipped and surrounding whitespace on each line is
    /// ignored, so indented raw strings work as fixtures.
    pub fn from_ascii(art: &str) -> Result<Self, BoardParseError> {
        let rows: Vec<&str> = art
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();
        let Some(first) = rows.first() else {
            return Err(BoardParseError::Empty);
        };
        let width = first.chars().count();
        let height = rows.len();
        let (Ok(w), Ok(h)) = (u8::try_from(width), u8::try_from(height)) else {
            return Err(BoardParseError::TooLarge { width, height });
        };

        let mut board = Self::new(w, h);
        for (y, row) in rows.iter().enumerate() {
            let actual = row.chars().count();
            if actual != width {
                return Err(BoardParseError::RaggedRow {
                    row: y,
                    expected: width,
                    actual,
                });
            }
            for (x, ch) in row.chars().enumerate() {
                let occupant = match ch {
                    '.' => None,
                    _ => Some(Occupant::from_char(ch).ok_or(BoardParseError::InvalidCell {
                        row: y,
                        column: x,
                        ch,
                    })?),
                };
                board.cells[y * width + x] = occupant;
            }
        }
        Ok(board)
    }

    /// Text rows, top to bottom.
    #[must_use]
    pub fn to_rows(&self) -> Vec<String> {
        self.cells
            .chunks(usize::from(self.width))
            .map(|row| {
                row.iter()
                    .map(|c| c.map_or('.', Occupant::as_char))
                    .collect()
            })
            .collect()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.to_rows().iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            f.write_str(row)?;
        }
        Ok(())
    }
}

impl FromStr for Board {
    type Err = BoardParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_ascii(s)
    }
}

impl From<Board> for Vec<String> {
    fn from(board: Board) -> Self {
        board.to_rows()
    }
}

impl TryFrom<Vec<String>> for Board {
    type Error = BoardParseError;

    fn try_from(rows: Vec<String>) -> Result<Self, Self::Error> {
        Self::from_ascii(&rows.join("\n"))
    }
}
