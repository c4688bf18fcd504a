//! Board generation
//!
//! Every random placement goes through [`draw_gem`]: draw a type, reject it if it
//! would complete a run of three with gems already on the grid, retry up to the
//! configured budget, then accept whatever was drawn last. The fallback keeps
//! generation terminating even for catalogs too small to satisfy the constraint;
//! callers detect the resulting matches afterwards.

use log::{debug, warn};

use crate::error::Result;
use crate::grid::Grid;
use crate::matcher::find_matches;
use crate::rng::GemRng;
use crate::types::{EngineConfig, GemType, Position};

/// The six 3-cell windows through a cell, as offsets of the two other cells.
const WINDOWS: [[(isize, isize); 2]; 6] = [
    [(0, -2), (0, -1)],
    [(0, -1), (0, 1)],
    [(0, 1), (0, 2)],
    [(-2, 0), (-1, 0)],
    [(-1, 0), (1, 0)],
    [(1, 0), (2, 0)],
];

/// Catalog size and retry budget for constrained draws
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationParams {
    pub gem_count: usize,
    pub max_retries: u32,
}

impl From<&EngineConfig> for GenerationParams {
    fn from(config: &EngineConfig) -> Self {
        Self {
            gem_count: config.gem_count(),
            max_retries: config.max_generation_retries,
        }
    }
}

/// Result of one constrained draw
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Draw {
    pub gem: GemType,
    /// The retry budget ran out and `gem` was accepted unconstrained
    pub fell_back: bool,
}

fn offset(pos: Position, (dr, dc): (isize, isize)) -> Option<Position> {
    let row = pos.row.checked_add_signed(dr)?;
    let col = pos.col.checked_add_signed(dc)?;
    Some(Position::new(row, col))
}

/// True if `gem` at `pos` would complete a run of three with its current neighbours
pub fn completes_run(grid: &Grid, pos: Position, gem: GemType) -> bool {
    WINDOWS.iter().any(|window| {
        window.iter().all(|&d| {
            offset(pos, d)
                .map(|p| grid.peek(p) == Some(gem))
                .unwrap_or(false)
        })
    })
}

/// Draw a gem for `pos` that does not complete a run, within the retry budget
pub fn draw_gem(grid: &Grid, pos: Position, rng: &mut GemRng, params: GenerationParams) -> Draw {
    let mut gem = rng.next_gem(params.gem_count);
    for _ in 1..params.max_retries {
        if !completes_run(grid, pos, gem) {
            return Draw {
                gem,
                fell_back: false,
            };
        }
        gem = rng.next_gem(params.gem_count);
    }

    let fell_back = completes_run(grid, pos, gem);
    if fell_back {
        warn!("retry budget exhausted at ({}, {}), using unconstrained draw", pos.row, pos.col);
    }
    Draw { gem, fell_back }
}

/// Replace every cell with a fresh constrained draw, row-major.
///
/// Returns how many draws fell back to an unconstrained type.
pub fn fill_board(grid: &mut Grid, rng: &mut GemRng, params: GenerationParams) -> Result<usize> {
    grid.clear();
    let mut fallbacks = 0;
    for pos in grid.positions().collect::<Vec<_>>() {
        let draw = draw_gem(grid, pos, rng, params);
        fallbacks += usize::from(draw.fell_back);
        grid.set(pos.row, pos.col, Some(draw.gem))?;
    }
    Ok(fallbacks)
}

/// Clear and redraw only the matched cells until the grid is match-free.
///
/// Gives up after `params.max_retries` passes and returns `Ok(false)`; the
/// caller falls back to a complete re-fill.
pub fn remove_initial_matches(
    grid: &mut Grid,
    rng: &mut GemRng,
    params: GenerationParams,
) -> Result<bool> {
    for pass in 0..params.max_retries {
        let matches = find_matches(grid);
        if matches.is_empty() {
            if pass > 0 {
                debug!("initial matches removed after {pass} pass(es)");
            }
            return Ok(true);
        }

        let cells: Vec<Position> = matches.cells().collect();
        for &pos in &cells {
            grid.take(pos)?;
        }
        for &pos in &cells {
            let draw = draw_gem(grid, pos, rng, params);
            grid.set(pos.row, pos.col, Some(draw.gem))?;
        }
    }
    Ok(find_matches(grid).is_empty())
}
