//! The stand-count field and its scouting mask.
//!
//! Both grids are stored row-major in a flat `Vec` and always share the
//! same `rows x cols` shape for the lifetime of a session. Neither grid is
//! ever resized; cells are overwritten in place.

use serde::{Deserialize, Deserializer, Serialize};
use ts_rs::TS;

// ---------------------------------------------------------------------------
// CellPos
// ---------------------------------------------------------------------------

/// A `(row, col)` coordinate inside a grid. Row 0 is the top of the field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct CellPos {
    /// Zero-based row index.
    pub row: usize,
    /// Zero-based column index.
    pub col: usize,
}

impl CellPos {
    /// Create a new position.
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Return the orthogonal neighbours (up, down, left, right) that lie
    /// inside a `rows x cols` grid.
    pub fn neighbours(self, rows: usize, cols: usize) -> Vec<Self> {
        let mut out = Vec::with_capacity(4);
        if let Some(up) = self.row.checked_sub(1) {
            out.push(Self::new(up, self.col));
        }
        if let Some(down) = self.row.checked_add(1).filter(|&r| r < rows) {
            out.push(Self::new(down, self.col));
        }
        if let Some(left) = self.col.checked_sub(1) {
            out.push(Self::new(self.row, left));
        }
        if let Some(right) = self.col.checked_add(1).filter(|&c| c < cols) {
            out.push(Self::new(self.row, right));
        }
        out
    }

    /// Whether `other` is exactly one orthogonal step away.
    pub const fn is_adjacent(self, other: Self) -> bool {
        let dr = self.row.abs_diff(other.row);
        let dc = self.col.abs_diff(other.col);
        matches!((dr, dc), (0, 1) | (1, 0))
    }
}

impl core::fmt::Display for CellPos {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Flat row-major index for `pos`, or `None` when it falls outside the shape.
fn flat_index(rows: usize, cols: usize, pos: CellPos) -> Option<usize> {
    if pos.row >= rows || pos.col >= cols {
        return None;
    }
    pos.row.checked_mul(cols)?.checked_add(pos.col)
}

/// Iterate every position of a `rows x cols` grid in row-major order.
fn positions(rows: usize, cols: usize) -> impl Iterator<Item = CellPos> {
    (0..rows).flat_map(move |row| (0..cols).map(move |col| CellPos::new(row, col)))
}

/// Check that `len` stored cells fill a `rows x cols` shape exactly.
fn check_shape(rows: usize, cols: usize, len: usize) -> Result<(), String> {
    match rows.checked_mul(cols) {
        Some(expected) if expected == len => Ok(()),
        Some(expected) => Err(format!("a {rows}x{cols} grid needs {expected} cells, got {len}")),
        None => Err(format!("a {rows}x{cols} grid is too large")),
    }
}

// ---------------------------------------------------------------------------
// Grid
// ---------------------------------------------------------------------------

/// The field: one stand count (thousands of plants per acre) per cell.
///
/// Generated values are clamped to `[0, 35]` and rounded to whole numbers,
/// but the grid itself stores plain `f64` so hand-built fixtures and
/// intermediate generation passes can use fractional values.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Grid {
    /// Number of rows.
    rows: usize,
    /// Number of columns.
    cols: usize,
    /// Row-major cell values.
    cells: Vec<f64>,
}

impl Grid {
    /// Create a grid where every cell holds `value`.
    ///
    /// Returns `None` if `rows * cols` overflows.
    pub fn filled(rows: usize, cols: usize, value: f64) -> Option<Self> {
        let len = rows.checked_mul(cols)?;
        Some(Self {
            rows,
            cols,
            cells: vec![value; len],
        })
    }

    /// Build a grid from nested rows.
    ///
    /// Returns `None` if there are no rows, the first row is empty, or the
    /// rows have differing lengths.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Option<Self> {
        let cols = rows.first().map(Vec::len)?;
        if cols == 0 || rows.iter().any(|r| r.len() != cols) {
            return None;
        }
        let row_count = rows.len();
        let cells: Vec<f64> = rows.into_iter().flatten().collect();
        Some(Self {
            rows: row_count,
            cols,
            cells,
        })
    }

    /// Number of rows.
    pub const fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    pub const fn cols(&self) -> usize {
        self.cols
    }

    /// Total number of cells (one acre each).
    pub const fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether the grid has no cells.
    pub const fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Whether `pos` lies inside the grid.
    pub const fn contains(&self, pos: CellPos) -> bool {
        pos.row < self.rows && pos.col < self.cols
    }

    /// The value at `pos`, or `None` if out of bounds.
    pub fn get(&self, pos: CellPos) -> Option<f64> {
        let idx = flat_index(self.rows, self.cols, pos)?;
        self.cells.get(idx).copied()
    }

    /// Mutable access to the value at `pos`, or `None` if out of bounds.
    pub fn get_mut(&mut self, pos: CellPos) -> Option<&mut f64> {
        let idx = flat_index(self.rows, self.cols, pos)?;
        self.cells.get_mut(idx)
    }

    /// Overwrite the value at `pos`. Returns the previous value, or `None`
    /// (leaving the grid untouched) if `pos` is out of bounds.
    pub fn set(&mut self, pos: CellPos, value: f64) -> Option<f64> {
        let idx = flat_index(self.rows, self.cols, pos)?;
        let cell = self.cells.get_mut(idx)?;
        Some(core::mem::replace(cell, value))
    }

    /// Row-major view of all values.
    pub fn values(&self) -> &[f64] {
        &self.cells
    }

    /// Mutable row-major view of all values.
    pub fn values_mut(&mut self) -> &mut [f64] {
        &mut self.cells
    }

    /// Iterate `(position, value)` pairs in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (CellPos, f64)> + '_ {
        positions(self.rows, self.cols).zip(self.cells.iter().copied())
    }

    /// Arithmetic mean of every cell, `None` for an empty grid.
    pub fn mean(&self) -> Option<f64> {
        if self.cells.is_empty() {
            return None;
        }
        let sum: f64 = self.cells.iter().sum();
        #[allow(clippy::cast_precision_loss)]
        let count = self.cells.len() as f64;
        Some(sum / count)
    }

    /// Number of cells whose value is strictly below `threshold`.
    pub fn count_below(&self, threshold: f64) -> usize {
        self.cells.iter().filter(|&&v| v < threshold).count()
    }

    /// Copy the values out as nested rows.
    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        if self.cols == 0 {
            return Vec::new();
        }
        self.cells.chunks(self.cols).map(<[f64]>::to_vec).collect()
    }
}

/// Wire form of [`Grid`] before its shape is checked.
#[derive(Deserialize)]
struct RawGrid {
    rows: usize,
    cols: usize,
    cells: Vec<f64>,
}

impl<'de> Deserialize<'de> for Grid {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let RawGrid { rows, cols, cells } = RawGrid::deserialize(deserializer)?;
        check_shape(rows, cols, cells.len()).map_err(serde::de::Error::custom)?;
        Ok(Self { rows, cols, cells })
    }
}

// ---------------------------------------------------------------------------
// ObservationGrid
// ---------------------------------------------------------------------------

/// Which cells of the field have been scouted.
///
/// Every cell starts closed. Opening is one-directional: there is no way to
/// close a cell again short of building a fresh grid for a new session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct ObservationGrid {
    /// Number of rows.
    rows: usize,
    /// Number of columns.
    cols: usize,
    /// Row-major open flags.
    open: Vec<bool>,
}

impl ObservationGrid {
    /// Create an all-closed mask of the given shape.
    ///
    /// Returns `None` if `rows * cols` overflows.
    pub fn closed(rows: usize, cols: usize) -> Option<Self> {
        let len = rows.checked_mul(cols)?;
        Some(Self {
            rows,
            cols,
            open: vec![false; len],
        })
    }

    /// Create an all-closed mask matching the shape of `grid`.
    pub fn for_grid(grid: &Grid) -> Self {
        Self {
            rows: grid.rows(),
            cols: grid.cols(),
            open: vec![false; grid.len()],
        }
    }

    /// Number of rows.
    pub const fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    pub const fn cols(&self) -> usize {
        self.cols
    }

    /// Whether this mask has the same shape as `grid`.
    pub const fn matches(&self, grid: &Grid) -> bool {
        self.rows == grid.rows() && self.cols == grid.cols()
    }

    /// Whether `pos` lies inside the mask.
    pub const fn contains(&self, pos: CellPos) -> bool {
        pos.row < self.rows && pos.col < self.cols
    }

    /// Whether the cell at `pos` is open. Out-of-bounds cells read as closed.
    pub fn is_open(&self, pos: CellPos) -> bool {
        flat_index(self.rows, self.cols, pos)
            .and_then(|idx| self.open.get(idx).copied())
            .unwrap_or(false)
    }

    /// Mark the cell at `pos` open.
    ///
    /// Returns `Some(true)` if the cell was closed before, `Some(false)` if
    /// it was already open, and `None` if `pos` is out of bounds.
    pub fn open(&mut self, pos: CellPos) -> Option<bool> {
        let idx = flat_index(self.rows, self.cols, pos)?;
        let flag = self.open.get_mut(idx)?;
        let newly_opened = !*flag;
        *flag = true;
        Some(newly_opened)
    }

    /// Number of open cells.
    pub fn open_count(&self) -> usize {
        self.open.iter().filter(|&&o| o).count()
    }

    /// Number of closed cells.
    pub fn closed_count(&self) -> usize {
        self.open.len().saturating_sub(self.open_count())
    }

    /// Whether every cell is open.
    pub fn is_fully_open(&self) -> bool {
        self.open.iter().all(|&o| o)
    }

    /// Iterate the positions of open cells in row-major order.
    pub fn open_positions(&self) -> impl Iterator<Item = CellPos> + '_ {
        positions(self.rows, self.cols)
            .zip(self.open.iter().copied())
            .filter_map(|(pos, open)| open.then_some(pos))
    }

    /// Iterate the positions of closed cells in row-major order.
    pub fn closed_positions(&self) -> impl Iterator<Item = CellPos> + '_ {
        positions(self.rows, self.cols)
            .zip(self.open.iter().copied())
            .filter_map(|(pos, open)| (!open).then_some(pos))
    }
}

/// Wire form of [`ObservationGrid`] before its shape is checked.
#[derive(Deserialize)]
struct RawObservationGrid {
    rows: usize,
    cols: usize,
    open: Vec<bool>,
}

impl<'de> Deserialize<'de> for ObservationGrid {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let RawObservationGrid { rows, cols, open } = RawObservationGrid::deserialize(deserializer)?;
        check_shape(rows, cols, open.len()).map_err(serde::de::Error::custom)?;
        Ok(Self { rows, cols, open })
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    fn sample() -> Grid {
        Grid {
            rows: 2,
            cols: 3,
            cells: vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0],
        }
    }

    #[test]
    fn from_rows_rejects_ragged_input() {
        assert!(Grid::from_rows(vec![vec![1.0, 2.0], vec![3.0]]).is_none());
        assert!(Grid::from_rows(Vec::new()).is_none());
        assert!(Grid::from_rows(vec![Vec::new()]).is_none());
    }

    #[test]
    fn get_and_set_respect_bounds() {
        let mut grid = sample();
        assert_eq!(grid.rows(), 2);
        assert_eq!(grid.cols(), 3);
        assert_eq!(grid.get(CellPos::new(1, 2)), Some(6.0));
        assert_eq!(grid.get(CellPos::new(2, 0)), None);
        assert_eq!(grid.set(CellPos::new(0, 1), 9.0), Some(2.0));
        assert_eq!(grid.get(CellPos::new(0, 1)), Some(9.0));
        assert_eq!(grid.set(CellPos::new(0, 3), 9.0), None);
    }

    #[test]
    fn iter_is_row_major() {
        let grid = sample();
        let positions: Vec<CellPos> = grid.iter().map(|(p, _)| p).collect();
        assert_eq!(positions.first(), Some(&CellPos::new(0, 0)));
        assert_eq!(positions.get(3), Some(&CellPos::new(1, 0)));
        assert_eq!(grid.to_rows(), vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]]);
    }

    #[test]
    fn mean_and_count_below() {
        let grid = sample();
        let mean = grid.mean().unwrap_or(f64::NAN);
        assert!((mean - 3.5).abs() < f64::EPSILON);
        assert_eq!(grid.count_below(4.0), 3);
        assert_eq!(grid.count_below(1.0), 0);
        let empty = Grid::filled(0, 0, 0.0);
        assert!(empty.is_some_and(|g| g.mean().is_none()));
    }

    #[test]
    fn observation_open_is_idempotent() {
        let mut obs = ObservationGrid {
            rows: 2,
            cols: 2,
            open: vec![false; 4],
        };
        assert_eq!(obs.open_count(), 0);
        assert_eq!(obs.open(CellPos::new(1, 1)), Some(true));
        assert_eq!(obs.open(CellPos::new(1, 1)), Some(false));
        assert_eq!(obs.open(CellPos::new(2, 0)), None);
        assert!(obs.is_open(CellPos::new(1, 1)));
        assert!(!obs.is_open(CellPos::new(0, 0)));
        assert_eq!(obs.open_count(), 1);
        assert_eq!(obs.closed_count(), 3);
        assert!(!obs.is_fully_open());
    }

    #[test]
    fn observation_fully_open_after_every_cell() {
        let grid = sample();
        let mut obs = ObservationGrid::for_grid(&grid);
        assert!(obs.matches(&grid));
        for (pos, _) in grid.iter() {
            let _ = obs.open(pos);
        }
        assert!(obs.is_fully_open());
        assert_eq!(obs.closed_positions().count(), 0);
        assert_eq!(obs.open_positions().count(), 6);
    }

    #[test]
    fn neighbours_clip_at_edges() {
        let corner = CellPos::new(0, 0).neighbours(3, 3);
        assert_eq!(corner, vec![CellPos::new(1, 0), CellPos::new(0, 1)]);
        let centre = CellPos::new(1, 1).neighbours(3, 3);
        assert_eq!(centre.len(), 4);
        assert!(CellPos::new(1, 1).is_adjacent(CellPos::new(1, 2)));
        assert!(!CellPos::new(1, 1).is_adjacent(CellPos::new(2, 2)));
        assert!(!CellPos::new(1, 1).is_adjacent(CellPos::new(1, 1)));
    }

    #[test]
    fn grid_serde_roundtrip_keeps_shape() {
        let grid = sample();
        let json = serde_json::to_string(&grid).unwrap_or_default();
        let back: Option<Grid> = serde_json::from_str(&json).ok();
        assert_eq!(back, Some(grid));
    }

    #[test]
    fn grid_with_missing_cells_is_rejected() {
        let short = serde_json::from_str::<Grid>(r#"{"rows":2,"cols":2,"cells":[30,30,30]}"#);
        let err = short.err().map(|e| e.to_string()).unwrap_or_default();
        assert!(err.contains("needs 4 cells, got 3"), "{err}");

        let long = serde_json::from_str::<Grid>(r#"{"rows":1,"cols":2,"cells":[1,2,3]}"#);
        assert!(long.is_err());
        let overflow = format!(r#"{{"rows":{},"cols":2,"cells":[]}}"#, usize::MAX);
        assert!(serde_json::from_str::<Grid>(&overflow).is_err());
    }

    #[test]
    fn observation_with_wrong_length_is_rejected() {
        let bad = serde_json::from_str::<ObservationGrid>(
            r#"{"rows":2,"cols":3,"open":[true,false,true]}"#,
        );
        assert!(bad.is_err());

        let mut obs = ObservationGrid {
            rows: 2,
            cols: 3,
            open: vec![false; 6],
        };
        assert_eq!(obs.open(CellPos::new(1, 2)), Some(true));
        let json = serde_json::to_string(&obs).unwrap_or_default();
        let back: Option<ObservationGrid> = serde_json::from_str(&json).ok();
        assert_eq!(back.as_ref().map(ObservationGrid::open_count), Some(1));
        assert_eq!(back, Some(obs));
    }

    #[test]
    fn get_mut_updates_in_place() {
        let mut grid = sample();
        if let Some(cell) = grid.get_mut(CellPos::new(1, 0)) {
            *cell *= 0.5;
        }
        assert_eq!(grid.get(CellPos::new(1, 0)), Some(2.0));
        assert!(grid.get_mut(CellPos::new(2, 0)).is_none());
    }
}
