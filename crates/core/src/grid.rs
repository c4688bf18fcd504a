//! Grid module - owns the board cells
//!
//! The grid is an R x C matrix where each cell is empty or holds a gem type.
//! Storage is a flat row-major vector (`row * cols + col`) for cache locality.
//! Coordinates: row grows downward, col grows rightward, both zero-based.
//!
//! The grid is pure data. Matching, gravity and generation live in their own
//! modules and only go through the accessors below.

use crate::error::{EngineError, Result};
use crate::types::{Cell, GemType, Position};

/// The game grid - `rows x cols` cells in a flat vector
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Grid {
    rows: usize,
    cols: usize,
    /// Flat array of cells, row-major order (row * cols + col)
    cells: Vec<Cell>,
}

impl Grid {
    /// Create an empty grid
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![None; rows * cols],
        }
    }

    /// Build a grid from text rows.
    ///
    /// `A`..`Z` map to `GemType(0)`..`GemType(25)` and `.` is an empty cell.
    /// Every row must have the same length.
    ///
    /// ```
    /// use gem_cascade_core::Grid;
    /// use gem_cascade_core::types::{GemType, Position};
    ///
    /// let grid = Grid::from_rows(&["AB", "C."]).unwrap();
    /// assert_eq!(grid.get(0, 1), Ok(Some(GemType(1))));
    /// assert_eq!(grid.peek(Position::new(1, 1)), None);
    /// ```
    pub fn from_rows(rows: &[&str]) -> Result<Self> {
        let height = rows.len();
        let width = rows.first().map(|r| r.chars().count()).unwrap_or(0);
        let mut grid = Self::new(height, width);

        for (row, line) in rows.iter().enumerate() {
            if line.chars().count() != width {
                return Err(EngineError::InvalidConfig(format!(
                    "row {row} has {} cells, expected {width}",
                    line.chars().count()
                )));
            }
            for (col, ch) in line.chars().enumerate() {
                let cell = match ch {
                    '.' => None,
                    'A'..='Z' => Some(GemType(ch as u8 - b'A')),
                    other => {
                        return Err(EngineError::InvalidConfig(format!(
                            "unexpected cell {other:?} at ({row}, {col})"
                        )))
                    }
                };
                grid.set(row, col, cell)?;
            }
        }
        Ok(grid)
    }

    /// Calculate flat index from (row, col)
    #[inline(always)]
    fn index(&self, row: usize, col: usize) -> Option<usize> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        Some(row * self.cols + col)
    }

    fn out_of_bounds(&self, row: usize, col: usize) -> EngineError {
        EngineError::OutOfBounds {
            row,
            col,
            rows: self.rows,
            cols: self.cols,
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn is_in_bounds(&self, row: usize, col: usize) -> bool {
        row < self.rows && col < self.cols
    }

    /// Get the cell at (row, col)
    pub fn get(&self, row: usize, col: usize) -> Result<Cell> {
        self.index(row, col)
            .map(|idx| self.cells[idx])
            .ok_or_else(|| self.out_of_bounds(row, col))
    }

    /// Set the cell at (row, col)
    pub fn set(&mut self, row: usize, col: usize, cell: Cell) -> Result<()> {
        match self.index(row, col) {
            Some(idx) => {
                self.cells[idx] = cell;
                Ok(())
            }
            None => Err(self.out_of_bounds(row, col)),
        }
    }

    /// Exchange the contents of two cells
    pub fn swap(&mut self, a: Position, b: Position) -> Result<()> {
        let ia = self
            .index(a.row, a.col)
            .ok_or_else(|| self.out_of_bounds(a.row, a.col))?;
        let ib = self
            .index(b.row, b.col)
            .ok_or_else(|| self.out_of_bounds(b.row, b.col))?;
        self.cells.swap(ia, ib);
        Ok(())
    }

    /// Lenient read: `None` for empty *or* out-of-bounds cells.
    ///
    /// Used for neighbour lookups where "off the board" and "empty" mean the same thing.
    #[inline]
    pub fn peek(&self, pos: Position) -> Cell {
        self.index(pos.row, pos.col).and_then(|idx| self.cells[idx])
    }

    /// Take the gem out of a cell, leaving it empty
    pub fn take(&mut self, pos: Position) -> Result<Cell> {
        let idx = self
            .index(pos.row, pos.col)
            .ok_or_else(|| self.out_of_bounds(pos.row, pos.col))?;
        Ok(self.cells[idx].take())
    }

    /// All positions in row-major order
    pub fn positions(&self) -> impl Iterator<Item = Position> {
        let cols = self.cols;
        (0..self.rows).flat_map(move |row| (0..cols).map(move |col| Position::new(row, col)))
    }

    /// True if no cell is empty
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Empty every cell
    pub fn clear(&mut self) {
        for cell in &mut self.cells {
            *cell = None;
        }
    }

    /// One byte per cell (0 = empty, gem index + 1 otherwise), row-major
    pub fn cell_bytes(&self) -> impl Iterator<Item = u8> + '_ {
        self.cells
            .iter()
            .map(|cell| cell.map_or(0, |gem| gem.0.saturating_add(1)))
    }

    /// Convert to nested rows for display or serialization
    pub fn to_rows(&self) -> Vec<Vec<Cell>> {
        self.cells.chunks(self.cols.max(1)).map(<[Cell]>::to_vec).collect()
    }

    /// Render as text rows, the inverse of [`Grid::from_rows`] for catalogs up to 26 types
    pub fn to_text(&self) -> Vec<String> {
        (0..self.rows)
            .map(|row| {
                (0..self.cols)
                    .map(|col| match self.peek(Position::new(row, col)) {
                        Some(gem) if gem.0 < 26 => (b'A' + gem.0) as char,
                        Some(_) => '#',
                        None => '.',
                    })
                    .collect()
            })
            .collect()
    }
}
