//! Match detection
//!
//! Scans every row left-to-right and every column top-to-bottom, merging
//! consecutive equal gems into runs. Runs of [`MIN_MATCH_LEN`] or more are matches.
//!
//! A cell that sits in both a horizontal and a vertical run (L/T shapes) appears
//! once in the match set. Scoring counts cells, not runs, so intersections are
//! never rewarded twice.
//!
//! Output is a pure function of the grid: same snapshot, same result.

use std::collections::BTreeSet;

use crate::grid::Grid;
use crate::types::{Direction, Position, Run, MIN_MATCH_LEN};

/// Cells matched on one grid snapshot, plus the runs that produced them
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchSet {
    cells: BTreeSet<Position>,
    runs: Vec<Run>,
}

impl MatchSet {
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Number of distinct matched cells
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn contains(&self, pos: Position) -> bool {
        self.cells.contains(&pos)
    }

    /// Matched cells in row-major order
    pub fn cells(&self) -> impl Iterator<Item = Position> + '_ {
        self.cells.iter().copied()
    }

    /// Runs in scan order: all horizontal runs (top row first), then vertical runs (left column first)
    pub fn runs(&self) -> &[Run] {
        &self.runs
    }

    fn push(&mut self, run: Run) {
        self.cells.extend(run.cells());
        self.runs.push(run);
    }
}

/// Scan a line of `len` cells; `at(i)` maps the i-th step to a grid position.
fn scan_line(
    grid: &Grid,
    len: usize,
    direction: Direction,
    at: impl Fn(usize) -> Position,
    out: &mut MatchSet,
) {
    let mut i = 0;
    while i < len {
        let Some(gem) = grid.peek(at(i)) else {
            i += 1;
            continue;
        };

        let mut run_len = 1;
        while i + run_len < len && grid.peek(at(i + run_len)) == Some(gem) {
            run_len += 1;
        }

        if run_len >= MIN_MATCH_LEN {
            out.push(Run {
                start: at(i),
                direction,
                length: run_len,
                gem,
            });
        }
        i += run_len;
    }
}

/// Find every run of three or more identical gems
pub fn find_matches(grid: &Grid) -> MatchSet {
    let mut out = MatchSet::default();

    for row in 0..grid.rows() {
        scan_line(
            grid,
            grid.cols(),
            Direction::Horizontal,
            |col| Position::new(row, col),
            &mut out,
        );
    }

    for col in 0..grid.cols() {
        scan_line(
            grid,
            grid.rows(),
            Direction::Vertical,
            |row| Position::new(row, col),
            &mut out,
        );
    }

    out
}

/// Cheaper yes/no variant of [`find_matches`] that stops at the first run
pub fn has_matches(grid: &Grid) -> bool {
    let window = |a: Position, b: Position, c: Position| match grid.peek(a) {
        Some(gem) => grid.peek(b) == Some(gem) && grid.peek(c) == Some(gem),
        None => false,
    };

    grid.positions().any(|p| {
        let horizontal = p.col + 2 < grid.cols()
            && window(
                p,
                Position::new(p.row, p.col + 1),
                Position::new(p.row, p.col + 2),
            );
        let vertical = p.row + 2 < grid.rows()
            && window(
                p,
                Position::new(p.row + 1, p.col),
                Position::new(p.row + 2, p.col),
            );
        horizontal || vertical
    })
}
