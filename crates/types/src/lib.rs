//! Core types module - shared data structures and constants
//!
//! This crate defines the fundamental types used throughout the engine.
//! Everything here is plain data with no game behaviour, so the same types can be
//! used by the core logic, by a renderer consuming the event feed, and by a host
//! passing configuration in as JSON.
//!
//! # Coordinates
//!
//! Positions are zero-based `(row, col)` pairs:
//!
//! - **row** increases downward (row 0 is the top of the board)
//! - **col** increases rightward (col 0 is the left edge)
//!
//! # Defaults
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `DEFAULT_ROWS` | 7 | Board height |
//! | `DEFAULT_COLS` | 7 | Board width |
//! | `DEFAULT_BASE_POINTS` | 10 | Points per destroyed gem before the combo multiplier |
//! | `DEFAULT_MAX_GENERATION_RETRIES` | 50 | Constrained draws before falling back to any type |
//! | `DEFAULT_MAX_REGENERATION_ATTEMPTS` | 20 | Full boards tried before `BoardUnsolvable` |
//! | `MIN_MATCH_LEN` | 3 | Shortest run that counts as a match |
//! | `MAX_CELLS` | 65536 | Largest accepted `rows * cols` |
//! | `MAX_GEM_TYPES` | 255 | Largest accepted gem catalog |
//!
//! # Examples
//!
//! ```
//! use gem_cascade_types::{EngineConfig, GemType, Position, DEFAULT_GEM_CATALOG};
//!
//! let config = EngineConfig::default();
//! assert_eq!(config.rows, 7);
//! assert_eq!(config.gem_count(), DEFAULT_GEM_CATALOG.len());
//! assert_eq!(config.gem_by_name("heart"), Some(GemType(5)));
//!
//! let a = Position::new(3, 3);
//! assert!(a.is_adjacent(Position::new(3, 4)));
//! assert!(!a.is_adjacent(Position::new(4, 4)));
//! ```

use serde::{Deserialize, Serialize};

/// Default board height in rows
pub const DEFAULT_ROWS: usize = 7;

/// Default board width in columns
pub const DEFAULT_COLS: usize = 7;

/// Points awarded per destroyed gem at combo depth 1
pub const DEFAULT_BASE_POINTS: u32 = 10;

/// Candidate draws per cell before an unconstrained fallback
pub const DEFAULT_MAX_GENERATION_RETRIES: u32 = 50;

/// Complete boards generated before giving up with `BoardUnsolvable`
pub const DEFAULT_MAX_REGENERATION_ATTEMPTS: u32 = 20;

/// Default RNG seed
pub const DEFAULT_SEED: u32 = 1;

/// Shortest run of identical gems that forms a match
pub const MIN_MATCH_LEN: usize = 3;

/// Catalog sizes below this still work but deadlock far more often
pub const RECOMMENDED_MIN_GEM_TYPES: usize = 4;

/// Largest catalog a [`GemType`] index can address.
///
/// One below 256 so every gem still has a non-zero byte in the board hash encoding.
pub const MAX_GEM_TYPES: usize = u8::MAX as usize;

/// Upper bound on `rows * cols`
pub const MAX_CELLS: usize = 1 << 16;

/// Gem catalog used when the host does not supply one
pub const DEFAULT_GEM_CATALOG: [&str; 6] = ["sparkle", "diamond", "crystal", "star", "lightning", "heart"];

/// A gem symbol, stored as an index into the configured catalog.
///
/// The engine never interprets the index beyond equality; names live in
/// [`EngineConfig::gem_types`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GemType(pub u8);

impl GemType {
    /// Catalog index of this gem
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A cell on the grid
///
/// - `None`: empty (only ever observed mid-cascade)
/// - `Some(GemType)`: occupied by a gem of that type
pub type Cell = Option<GemType>;

/// Zero-based grid coordinate.
///
/// Ordering is row-major, which is also the scan order used everywhere in the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Manhattan distance between two positions
    pub fn distance(self, other: Position) -> usize {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }

    /// True iff the two positions share an edge (diagonals are not adjacent)
    ///
    /// # Examples
    ///
    /// ```
    /// use gem_cascade_types::Position;
    ///
    /// let p = Position::new(2, 2);
    /// assert!(p.is_adjacent(Position::new(1, 2)));
    /// assert!(p.is_adjacent(Position::new(2, 3)));
    /// assert!(!p.is_adjacent(Position::new(3, 3)));
    /// assert!(!p.is_adjacent(p));
    /// ```
    pub fn is_adjacent(self, other: Position) -> bool {
        self.distance(other) == 1
    }

    /// The cell to the right, if `col + 1 < cols`
    pub fn right(self, cols: usize) -> Option<Position> {
        (self.col + 1 < cols).then(|| Position::new(self.row, self.col + 1))
    }

    /// The cell below, if `row + 1 < rows`
    pub fn below(self, rows: usize) -> Option<Position> {
        (self.row + 1 < rows).then(|| Position::new(self.row + 1, self.col))
    }
}

impl From<(usize, usize)> for Position {
    fn from((row, col): (usize, usize)) -> Self {
        Self::new(row, col)
    }
}

/// Axis of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Direction {
    /// Left to right along a row
    Horizontal,
    /// Top to bottom along a column
    Vertical,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Horizontal => "horizontal",
            Direction::Vertical => "vertical",
        }
    }
}

/// A maximal run of identical gems of length >= [`MIN_MATCH_LEN`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Run {
    pub start: Position,
    pub direction: Direction,
    pub length: usize,
    pub gem: GemType,
}

impl Run {
    /// Cells covered by the run, from `start` onward
    pub fn cells(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.length).map(move |i| match self.direction {
            Direction::Horizontal => Position::new(self.start.row, self.start.col + i),
            Direction::Vertical => Position::new(self.start.row + i, self.start.col),
        })
    }
}

/// Engine configuration supplied at construction time.
///
/// Deserializes from the camelCase JSON form a host would send; any omitted
/// field takes its default.
///
/// ```
/// use gem_cascade_types::EngineConfig;
///
/// let config: EngineConfig =
///     serde_json::from_str(r#"{"rows": 8, "cols": 9, "basePoints": 25}"#).unwrap();
/// assert_eq!((config.rows, config.cols, config.base_points), (8, 9, 25));
/// assert_eq!(config.max_generation_retries, 50);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EngineConfig {
    pub rows: usize,
    pub cols: usize,
    /// Gem catalog; `GemType(i)` names `gem_types[i]`
    pub gem_types: Vec<String>,
    pub base_points: u32,
    pub max_generation_retries: u32,
    pub max_regeneration_attempts: u32,
    pub seed: u32,
}

impl EngineConfig {
    /// Default configuration with a custom board size
    pub fn with_size(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            ..Self::default()
        }
    }

    /// Number of distinct gem types in the catalog
    pub fn gem_count(&self) -> usize {
        self.gem_types.len()
    }

    /// Catalog name of a gem, if it is in range
    pub fn gem_name(&self, gem: GemType) -> Option<&str> {
        self.gem_types.get(gem.index()).map(String::as_str)
    }

    /// Look a gem up by its catalog name (case-insensitive)
    pub fn gem_by_name(&self, name: &str) -> Option<GemType> {
        self.gem_types
            .iter()
            .position(|g| g.eq_ignore_ascii_case(name))
            .and_then(|i| u8::try_from(i).ok())
            .map(GemType)
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            cols: DEFAULT_COLS,
            gem_types: DEFAULT_GEM_CATALOG.iter().map(|s| s.to_string()).collect(),
            base_points: DEFAULT_BASE_POINTS,
            max_generation_retries: DEFAULT_MAX_GENERATION_RETRIES,
            max_regeneration_attempts: DEFAULT_MAX_REGENERATION_ATTEMPTS,
            seed: DEFAULT_SEED,
        }
    }
}

/// Cascade state machine phases
///
/// `Idle → Swapping → Resolving(1..n) → Settled → Idle`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "camelCase")]
pub enum CascadePhase {
    /// Waiting for player input
    Idle,
    /// A swap has been committed to the grid and is about to be checked
    Swapping { a: Position, b: Position },
    /// Destroy → gravity → refill pass number `pass` (1-based) is next
    Resolving { pass: u32 },
    /// No matches remain; the deadlock check runs next
    Settled,
}

impl CascadePhase {
    pub fn is_idle(&self) -> bool {
        matches!(self, CascadePhase::Idle)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CascadePhase::Idle => "idle",
            CascadePhase::Swapping { .. } => "swapping",
            CascadePhase::Resolving { .. } => "resolving",
            CascadePhase::Settled => "settled",
        }
    }
}

/// Why a whole board was (re)generated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RegenerationReason {
    /// First board of a session
    Initial,
    /// The settled board had no valid move left
    Deadlock,
    /// The player asked for a new game
    Restart,
}

/// One gem falling within its column during gravity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GemDrop {
    pub col: usize,
    pub from_row: usize,
    pub to_row: usize,
}

/// A freshly generated gem placed into an emptied top cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GemSpawn {
    pub position: Position,
    pub gem: GemType,
}

/// Render feed entry.
///
/// Emitted in order for every state transition so a renderer can animate
/// without owning any game-state truth. The wire form carries a camelCase
/// `kind` tag:
///
/// ```
/// use gem_cascade_types::{EngineEvent, Position};
///
/// let event = EngineEvent::SwapReverted { a: Position::new(0, 0), b: Position::new(0, 1) };
/// let json = serde_json::to_string(&event).unwrap();
/// assert!(json.starts_with(r#"{"kind":"swapReverted""#));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum EngineEvent {
    Selected {
        position: Position,
    },
    Deselected {
        position: Position,
    },
    /// A tentative swap was committed to the grid
    Swapped {
        a: Position,
        b: Position,
    },
    /// The swap produced no match and was undone
    SwapReverted {
        a: Position,
        b: Position,
    },
    /// Matched gems removed in cascade pass `pass`
    Destroyed {
        pass: u32,
        cells: Vec<Position>,
        runs: Vec<Run>,
        points: u64,
    },
    /// A second (or later) consecutive matching pass within one cascade
    ComboAdvanced {
        depth: u32,
    },
    Dropped {
        drops: Vec<GemDrop>,
    },
    Spawned {
        gems: Vec<GemSpawn>,
    },
    /// The cascade finished; totals for the whole cascade
    Settled {
        passes: u32,
        points: u64,
    },
    /// A whole new board replaced the previous one
    Regenerated {
        reason: RegenerationReason,
        board: Vec<Vec<Cell>>,
    },
}

impl EngineEvent {
    /// The wire `kind` tag
    pub fn kind(&self) -> &'static str {
        match self {
            EngineEvent::Selected { .. } => "selected",
            EngineEvent::Deselected { .. } => "deselected",
            EngineEvent::Swapped { .. } => "swapped",
            EngineEvent::SwapReverted { .. } => "swapReverted",
            EngineEvent::Destroyed { .. } => "destroyed",
            EngineEvent::ComboAdvanced { .. } => "comboAdvanced",
            EngineEvent::Dropped { .. } => "dropped",
            EngineEvent::Spawned { .. } => "spawned",
            EngineEvent::Settled { .. } => "settled",
            EngineEvent::Regenerated { .. } => "regenerated",
        }
    }
}
