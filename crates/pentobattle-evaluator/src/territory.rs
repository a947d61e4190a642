//! Voronoi-style territory split of the empty cells.

use std::collections::VecDeque;

use pentobattle_engine::{Board, PlayerId};

/// Empty cells attributed to each side by nearest-owner distance.
///
/// Each empty cell goes to the player whose own cells are strictly closer,
/// measured through empty cells only. Ties, including cells neither player can
/// reach, count half for each side, so `mine + theirs` always equals the number
/// of empty cells.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Territory {
    mine: f32,
    theirs: f32,
}

impl Territory {
    #[must_use]
    pub fn compute(board: &Board, me: PlayerId) -> Self {
        let mine_dist = distances_from(board, me);
        let theirs_dist = distances_from(board, me.opponent());

        let mut halves_mine = 0u32;
        let mut halves_theirs = 0u32;
        for cell in board.empty_cells() {
            let index = board.cell_index(cell);
            match mine_dist[index].cmp(&theirs_dist[index]) {
                std::cmp::Ordering::Less => halves_mine += 2,
                std::cmp::Ordering::Greater => halves_theirs += 2,
                std::cmp::Ordering::Equal => {
                    halves_mine += 1;
                    halves_theirs += 1;
                }
            }
        }
        #[expect(clippy::cast_precision_loss)]
        let (mine, theirs) = (halves_mine as f32 / 2.0, halves_theirs as f32 / 2.0);
        Self { mine, theirs }
    }

    #[must_use]
    pub fn mine(&self) -> f32 {
        self.mine
    }

    #[must_use]
    pub fn theirs(&self) -> f32 {
        self.theirs
    }

    /// `mine - theirs`.
    #[must_use]
    pub fn net(&self) -> f32 {
        self.mine - self.theirs
    }
}

/// Multi-source BFS distance from `player`'s cells; `u32::MAX` if unreachable.
fn distances_from(board: &Board, player: PlayerId) -> Vec<u32> {
    let mut dist = vec![u32::MAX; board.area()];
    let mut queue = VecDeque::new();
    for cell in board.all_cells() {
        if board.owner(cell) == Some(player) {
            dist[board.cell_index(cell)] = 0;
            queue.push_back(cell);
        }
    }
    while let Some(cell) = queue.pop_front() {
        let next = dist[board.cell_index(cell)] + 1;
        for neighbor in board.neighbors(cell) {
            let index = board.cell_index(neighbor);
            if board.is_empty(neighbor) && dist[index] == u32::MAX {
                dist[index] = next;
                queue.push_back(neighbor);
            }
        }
    }
    dist
}
