use std::collections::VecDeque;

use super::board::{Board, Cell, PlayerId};

/// Bounding box of a region, inclusive on both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegionBounds {
    pub min_x: u8,
    pub max_x: u8,
    pub min_y: u8,
    pub max_y: u8,
}

impl RegionBounds {
    #[must_use]
    pub fn width(&self) -> u8 {
        self.max_x - self.min_x + 1
    }

    #[must_use]
    pub fn height(&self) -> u8 {
        self.max_y - self.min_y + 1
    }

    /// Longer side of the box.
    #[must_use]
    pub fn span(&self) -> u8 {
        self.width().max(self.height())
    }
}

/// Maximal orthogonally connected set of empty cells.
///
/// Cells are stored sorted so membership checks are a binary search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    cells: Vec<Cell>,
}

impl Region {
    fn new(mut cells: Vec<Cell>) -> Self {
        cells.sort_unstable();
        Self { cells }
    }

    #[must_use]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    #[must_use]
    pub fn contains(&self, cell: Cell) -> bool {
        self.cells.binary_search(&cell).is_ok()
    }

    /// Absolute difference between the region's even and odd checkerboard cells.
    #[must_use]
    pub fn parity_imbalance(&self) -> usize {
        let even = self.cells.iter().filter(|c| c.is_even()).count();
        even.abs_diff(self.cells.len() - even)
    }

    /// # Panics
    ///
    /// Panics if the region is empty, which [`find_regions`] never produces.
    #[must_use]
    pub fn bounds(&self) -> RegionBounds {
        let first = self.cells[0];
        self.cells.iter().fold(
            RegionBounds {
                min_x: first.x,
                max_x: first.x,
                min_y: first.y,
                max_y: first.y,
            },
            |b, c| RegionBounds {
                min_x: b.min_x.min(c.x),
                max_x: b.max_x.max(c.x),
                min_y: b.min_y.min(c.y),
                max_y: b.max_y.max(c.y),
            },
        )
    }

    /// Whether any cell of the region borders a cell owned by `player`.
    #[must_use]
    pub fn touches(&self, board: &Board, player: PlayerId) -> bool {
        self.cells.iter().any(|&c| board.touches_player(c, player))
    }
}

/// Splits the empty cells of `board` into connected regions.
///
/// Regions are discovered in row-major order of their first cell.
#[must_use]
pub fn find_regions(board: &Board) -> Vec<Region> {
    let mut visited = vec![false; board.area()];
    let mut regions = Vec::new();
    let mut queue = VecDeque::new();

    for start in board.empty_cells() {
        if visited[board.cell_index(start)] {
            continue;
        }
        visited[board.cell_index(start)] = true;
        queue.push_back(start);
        let mut cells = Vec::new();
        while let Some(cell) = queue.pop_front() {
            cells.push(cell);
            for neighbor in board.neighbors(cell) {
                let index = board.cell_index(neighbor);
                if !visited[index] && board.is_empty(neighbor) {
                    visited[index] = true;
                    queue.push_back(neighbor);
                }
            }
        }
        regions.push(Region::new(cells));
    }
    regions
}

/// First region of maximal size.
#[must_use]
pub fn largest_region(regions: &[Region]) -> Option<&Region> {
    regions
        .iter()
        .fold(None, |best: Option<&Region>, r| match best {
            Some(b) if b.len() >= r.len() => Some(b),
            _ => Some(r),
        })
}
