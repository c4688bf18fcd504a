//! Player-facing orchestration on top of `gem-cascade-core`.
//!
//! [`BoardController`] is the only type a renderer or input layer needs: it
//! accepts clicks and swaps, runs cascades, and hands back render events.

pub mod autoplay;
pub mod controller;

pub use autoplay::{play_hinted_move, play_moves, PlayStats};
pub use controller::{BoardController, SelectOutcome, SwapOutcome};
