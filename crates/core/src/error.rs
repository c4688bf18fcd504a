//! Engine error taxonomy.

use thiserror::Error;

use crate::types::{EngineConfig, Position, MAX_CELLS, MAX_GEM_TYPES};

/// Errors surfaced by the engine.
///
/// `OutOfBounds` is a caller bug, `BoardUnsolvable` a configuration problem
/// (too few gem types for the board size). `InvalidSwap` is only produced by the
/// low-level swap entry point; the player-facing API reports it as a no-op.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("position ({row}, {col}) is outside the {rows}x{cols} grid")]
    OutOfBounds {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },

    #[error("cells ({}, {}) and ({}, {}) are not adjacent", .a.row, .a.col, .b.row, .b.col)]
    InvalidSwap { a: Position, b: Position },

    #[error("no playable board found after {attempts} generation attempts")]
    BoardUnsolvable { attempts: u32 },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, EngineError>;

/// Check a configuration before any board is built from it.
pub fn validate_config(config: &EngineConfig) -> Result<()> {
    let invalid = |msg: &str| Err(EngineError::InvalidConfig(msg.to_string()));

    if config.rows == 0 || config.cols == 0 {
        return invalid("rows and cols must be greater than zero");
    }
    match config.rows.checked_mul(config.cols) {
        Some(cells) if cells <= MAX_CELLS => {}
        _ => {
            return Err(EngineError::InvalidConfig(format!(
                "{}x{} board exceeds the {MAX_CELLS} cell limit",
                config.rows, config.cols
            )))
        }
    }
    if config.gem_types.is_empty() {
        return invalid("gem catalog is empty");
    }
    if config.gem_types.len() > MAX_GEM_TYPES {
        return Err(EngineError::InvalidConfig(format!(
            "gem catalog has {} entries, at most {} are supported",
            config.gem_types.len(),
            MAX_GEM_TYPES
        )));
    }
    for (i, name) in config.gem_types.iter().enumerate() {
        if config.gem_types[..i].contains(name) {
            return Err(EngineError::InvalidConfig(format!(
                "gem type {name:?} appears more than once"
            )));
        }
    }
    if config.base_points == 0 {
        return invalid("basePoints must be greater than zero");
    }
    if config.max_generation_retries == 0 {
        return invalid("maxGenerationRetries must be greater than zero");
    }
    if config.max_regeneration_attempts == 0 {
        return invalid("maxRegenerationAttempts must be greater than zero");
    }
    Ok(())
}
