//! Read-only, serialisable view of a session
//!
//! The board part (`board`, `board_hash`) and the meta part (phase, score,
//! counters) are filled separately, so a host polling every frame can refresh
//! the cheap meta fields without re-hashing an unchanged board.

use serde::{Deserialize, Serialize};

use crate::grid::Grid;
use crate::types::{CascadePhase, Cell, Position};

/// FNV-1a 64-bit over [`Grid::cell_bytes`]
pub fn board_hash(grid: &Grid) -> u64 {
    let mut h: u64 = 0xcbf29ce484222325;
    for b in grid.cell_bytes() {
        h ^= u64::from(b);
        h = h.wrapping_mul(0x00000100000001B3);
    }
    h
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardSnapshot {
    pub rows: usize,
    pub cols: usize,
    pub board: Vec<Vec<Cell>>,
    pub board_hash: u64,
    pub phase: CascadePhase,
    pub selected: Option<Position>,
    pub score: u64,
    pub combo_depth: u32,
    pub best_combo: u32,
    pub moves: u32,
    pub board_id: u32,
    pub episode_id: u32,
    pub seed: u32,
}

impl Default for BoardSnapshot {
    fn default() -> Self {
        Self {
            rows: 0,
            cols: 0,
            board: Vec::new(),
            board_hash: 0,
            phase: CascadePhase::Idle,
            selected: None,
            score: 0,
            combo_depth: 0,
            best_combo: 0,
            moves: 0,
            board_id: 0,
            episode_id: 0,
            seed: 0,
        }
    }
}

impl BoardSnapshot {
    /// Copy the cells of `grid` and recompute the hash
    pub fn set_board(&mut self, grid: &Grid) {
        self.rows = grid.rows();
        self.cols = grid.cols();
        self.board = grid.to_rows();
        self.board_hash = board_hash(grid);
    }
}
