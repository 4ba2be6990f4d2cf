//! Scout walker: where a scout on foot may step next.
//!
//! A scout enters the field from the bottom edge, so before the first step
//! only bottom-row cells are reachable. After that the scout moves one
//! cell at a time up, down, left, or right.

use serde::{Deserialize, Serialize};

use scout_types::CellPos;

/// Position of the scout on a fixed-size field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoutWalker {
    rows: usize,
    cols: usize,
    position: Option<CellPos>,
}

impl ScoutWalker {
    /// A walker standing outside a `rows x cols` field.
    pub const fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            position: None,
        }
    }

    /// Current position, or `None` before the first step.
    pub const fn position(&self) -> Option<CellPos> {
        self.position
    }

    /// Whether `pos` lies inside the field.
    pub const fn in_bounds(&self, pos: CellPos) -> bool {
        pos.row < self.rows && pos.col < self.cols
    }

    /// Whether the scout may step onto `pos` next.
    pub fn can_reach(&self, pos: CellPos) -> bool {
        if !self.in_bounds(pos) {
            return false;
        }
        match self.position {
            None => pos.row.checked_add(1) == Some(self.rows),
            Some(current) => current.is_adjacent(pos),
        }
    }

    /// Cells the scout may step onto next, in row-major order.
    pub fn reachable_cells(&self) -> Vec<CellPos> {
        match self.position {
            None => match self.rows.checked_sub(1) {
                Some(bottom) => (0..self.cols).map(|col| CellPos::new(bottom, col)).collect(),
                None => Vec::new(),
            },
            Some(current) => {
                let mut cells = current.neighbours(self.rows, self.cols);
                cells.sort_unstable();
                cells
            }
        }
    }

    /// Move onto `pos` if reachable. Returns whether the move happened.
    pub fn step(&mut self, pos: CellPos) -> bool {
        if !self.can_reach(pos) {
            return false;
        }
        self.position = Some(pos);
        true
    }

    /// Step off the field.
    pub const fn reset(&mut self) {
        self.position = None;
    }
}
