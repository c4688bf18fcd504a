//! Core match-3 logic - pure, deterministic, and testable
//!
//! Everything that decides what happens on the board lives here. There is no
//! rendering, input handling or I/O, which makes the crate:
//!
//! - **Deterministic**: the same seed and the same swaps produce the same session
//! - **Testable**: boards can be written as text fixtures
//! - **Portable**: usable from a terminal, a browser host or a headless bot
//!
//! # Module Structure
//!
//! - [`grid`]: R x C cell storage with bounds-checked accessors
//! - [`matcher`]: horizontal/vertical run detection
//! - [`validator`]: adjacency and hypothetical-swap checks on scratch copies
//! - [`generator`]: constrained random fills and initial-match removal
//! - [`deadlock`]: "no valid moves" detection and board regeneration
//! - [`scoring`]: cell-count scoring with a combo multiplier
//! - [`cascade`]: the swap → destroy → gravity → refill state machine
//! - [`snapshot`]: serialisable read-only session view
//! - [`rng`]: seeded LCG for gem draws
//!
//! # Rules
//!
//! - A **match** is a run of three or more identical gems in a row or column
//! - A swap is only kept if it produces a match; otherwise it snaps back
//! - Pass `n` of a cascade scores `cells * base_points * n`
//! - Generated boards never contain a match and always contain a valid move
//!
//! # Example
//!
//! ```
//! use gem_cascade_core::{find_matches, Grid};
//!
//! let grid = Grid::from_rows(&["AAAB", "BCDC", "CDBD"]).unwrap();
//! let matches = find_matches(&grid);
//! assert_eq!(matches.len(), 3);
//! ```

pub mod cascade;
pub mod deadlock;
pub mod error;
pub mod generator;
pub mod grid;
pub mod matcher;
pub mod rng;
pub mod scoring;
pub mod snapshot;
pub mod validator;

pub use gem_cascade_types as types;

// Re-export commonly used types for convenience
pub use cascade::{apply_gravity, refill, CascadeContext, CascadeEngine, CascadeOutcome};
pub use deadlock::DeadlockResolver;
pub use error::{validate_config, EngineError, Result};
pub use generator::{draw_gem, fill_board, remove_initial_matches, Draw, GenerationParams};
pub use grid::Grid;
pub use matcher::{find_matches, has_matches, MatchSet};
pub use rng::GemRng;
pub use scoring::{calculate_points, ScoreTracker};
pub use snapshot::{board_hash, BoardSnapshot};
pub use validator::{find_valid_move, has_any_valid_move, is_adjacent, would_match};
