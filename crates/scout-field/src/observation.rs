//! Scouting state: which cells the player has revealed.
//!
//! [`ObservationTracker`] is the only writer of the session's
//! [`ObservationGrid`]. Cells move from closed to open and never back;
//! opening an open cell is a silent no-op. Replanting does not touch this
//! state.

use tracing::debug;

use scout_types::{CellPos, Grid, ObservationGrid};

use crate::error::FieldError;

/// Tracks revealed cells and computes aggregates over them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObservationTracker {
    /// The one-way open/closed mask.
    mask: ObservationGrid,
}

impl ObservationTracker {
    /// Start tracking an all-closed field of the same shape as `grid`.
    pub fn for_grid(grid: &Grid) -> Self {
        Self {
            mask: ObservationGrid::for_grid(grid),
        }
    }

    /// Read-only view of the mask.
    pub const fn grid(&self) -> &ObservationGrid {
        &self.mask
    }

    /// Reveal the cell at `pos`.
    ///
    /// Returns `true` if the cell was newly opened and `false` if it was
    /// already open.
    pub fn open_cell(&mut self, pos: CellPos) -> Result<bool, FieldError> {
        let newly_opened = self.mask.open(pos).ok_or(FieldError::OutOfBounds {
            pos,
            rows: self.mask.rows(),
            cols: self.mask.cols(),
        })?;
        if newly_opened {
            debug!(row = pos.row, col = pos.col, open = self.mask.open_count(), "Cell scouted");
        }
        Ok(newly_opened)
    }

    /// Reveal every closed cell, returning the newly opened positions in
    /// row-major order.
    pub fn open_all(&mut self) -> Vec<CellPos> {
        let mut closed: Vec<CellPos> = self.mask.closed_positions().collect();
        closed.retain(|&pos| self.mask.open(pos) == Some(true));
        closed
    }

    /// Whether the cell at `pos` has been revealed.
    pub fn is_open(&self, pos: CellPos) -> bool {
        self.mask.is_open(pos)
    }

    /// Whether every cell has been revealed.
    pub fn is_fully_opened(&self) -> bool {
        self.mask.is_fully_open()
    }

    /// Number of revealed cells.
    pub fn opened_count(&self) -> usize {
        self.mask.open_count()
    }

    /// Mean stand count over revealed cells only.
    ///
    /// Returns `None` when nothing has been revealed yet. That means "no
    /// data", not an average of zero.
    pub fn average_of_opened(&self, grid: &Grid) -> Option<f64> {
        let (sum, count) = self
            .mask
            .open_positions()
            .filter_map(|pos| grid.get(pos))
            .fold((0.0_f64, 0_u32), |(sum, count), v| (sum + v, count.saturating_add(1)));
        if count == 0 {
            return None;
        }
        Some(sum / f64::from(count))
    }

    /// Close every cell again. Only used when a session restarts on a new
    /// field of the same shape as `grid`.
    pub fn reset(&mut self, grid: &Grid) {
        self.mask = ObservationGrid::for_grid(grid);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn field() -> Grid {
        Grid::from_rows(vec![
            vec![10.0, 20.0, 30.0],
            vec![12.0, 22.0, 32.0],
        ])
        .unwrap()
    }

    #[test]
    fn average_is_none_without_data() {
        let grid = field();
        let tracker = ObservationTracker::for_grid(&grid);
        assert_eq!(tracker.average_of_opened(&grid), None);
        assert!(!tracker.is_fully_opened());
    }

    #[test]
    fn average_covers_only_opened_cells() {
        let grid = field();
        let mut tracker = ObservationTracker::for_grid(&grid);
        assert!(tracker.open_cell(CellPos::new(0, 0)).unwrap());
        assert!(tracker.open_cell(CellPos::new(1, 2)).unwrap());
        let avg = tracker.average_of_opened(&grid).unwrap();
        assert!((avg - 21.0).abs() < f64::EPSILON);
    }

    #[test]
    fn opening_twice_is_a_no_op() {
        let grid = field();
        let mut tracker = ObservationTracker::for_grid(&grid);
        assert!(tracker.open_cell(CellPos::new(1, 1)).unwrap());
        assert!(!tracker.open_cell(CellPos::new(1, 1)).unwrap());
        assert_eq!(tracker.opened_count(), 1);
    }

    #[test]
    fn out_of_bounds_is_an_error() {
        let grid = field();
        let mut tracker = ObservationTracker::for_grid(&grid);
        let err = tracker.open_cell(CellPos::new(2, 0));
        assert!(matches!(err, Err(FieldError::OutOfBounds { rows: 2, cols: 3, .. })));
        assert_eq!(tracker.opened_count(), 0);
    }

    #[test]
    fn fully_opened_average_is_grid_mean() {
        let grid = field();
        let mut tracker = ObservationTracker::for_grid(&grid);
        assert!(tracker.open_cell(CellPos::new(0, 1)).unwrap());
        let newly = tracker.open_all();
        assert_eq!(newly.len(), 5);
        assert!(!newly.contains(&CellPos::new(0, 1)));
        assert!(tracker.is_fully_opened());
        let avg = tracker.average_of_opened(&grid).unwrap();
        assert!((avg - grid.mean().unwrap()).abs() < 1e-12);
        assert!(tracker.open_all().is_empty());
    }

    #[test]
    fn reset_closes_everything() {
        let grid = field();
        let mut tracker = ObservationTracker::for_grid(&grid);
        let _ = tracker.open_all();
        tracker.reset(&grid);
        assert_eq!(tracker.opened_count(), 0);
        assert_eq!(tracker.average_of_opened(&grid), None);
    }
}
