//! Gem Cascade (workspace facade crate).
//!
//! Re-exports the `gem_cascade::{core, engine, types}` public API while the
//! implementation lives in dedicated crates under `crates/`.

pub use gem_cascade_core as core;
pub use gem_cascade_engine as engine;
pub use gem_cascade_types as types;
