//! Deadlock detection and board regeneration
//!
//! A settled board with no match-producing swap is replaced wholesale. Each
//! attempt builds a candidate on a scratch grid (fill, strip accidental matches,
//! check for a move); the live grid is only overwritten by a candidate that
//! passes. After `max_attempts` failures the board is declared unsolvable.

use log::{debug, error, info};

use crate::error::{EngineError, Result};
use crate::generator::{fill_board, remove_initial_matches, GenerationParams};
use crate::grid::Grid;
use crate::rng::GemRng;
use crate::types::EngineConfig;
use crate::validator;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeadlockResolver {
    params: GenerationParams,
    max_attempts: u32,
}

impl DeadlockResolver {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            params: GenerationParams::from(config),
            max_attempts: config.max_regeneration_attempts,
        }
    }

    pub fn params(&self) -> GenerationParams {
        self.params
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// True if at least one adjacent swap produces a match
    pub fn has_any_valid_move(&self, grid: &Grid) -> bool {
        validator::has_any_valid_move(grid)
    }

    /// Replace `grid` with a fresh match-free board that has a valid move.
    ///
    /// Returns the number of attempts used. On failure `grid` is untouched.
    pub fn regenerate(&self, grid: &mut Grid, rng: &mut GemRng) -> Result<u32> {
        let mut scratch = Grid::new(grid.rows(), grid.cols());

        for attempt in 1..=self.max_attempts {
            let fallbacks = fill_board(&mut scratch, rng, self.params)?;
            if fallbacks > 0 {
                debug!("attempt {attempt}: {fallbacks} unconstrained draw(s)");
            }
            if !remove_initial_matches(&mut scratch, rng, self.params)? {
                debug!("attempt {attempt}: could not clear initial matches");
                continue;
            }
            if !self.has_any_valid_move(&scratch) {
                debug!("attempt {attempt}: board has no valid move");
                continue;
            }

            if attempt > 1 {
                info!("board generated after {attempt} attempts");
            }
            *grid = scratch;
            return Ok(attempt);
        }

        error!(
            "no playable {}x{} board with {} gem type(s) after {} attempts",
            grid.rows(),
            grid.cols(),
            self.params.gem_count,
            self.max_attempts
        );
        Err(EngineError::BoardUnsolvable {
            attempts: self.max_attempts,
        })
    }
}
