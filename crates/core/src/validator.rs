//! Move validation
//!
//! Answers "would this swap match?" without touching the committed grid. All
//! hypothetical swaps run against a scratch copy, so a negative answer can never
//! leak a half-swapped board.

use arrayvec::ArrayVec;

use crate::grid::Grid;
use crate::matcher::has_matches;
use crate::types::Position;

/// True iff `a` and `b` share an edge
pub fn is_adjacent(a: Position, b: Position) -> bool {
    a.is_adjacent(b)
}

/// Right and lower neighbours of `pos`.
///
/// Visiting only these from every cell enumerates each unordered adjacent pair once.
pub fn forward_neighbors(grid: &Grid, pos: Position) -> ArrayVec<Position, 2> {
    let mut out = ArrayVec::new();
    if let Some(right) = pos.right(grid.cols()) {
        out.push(right);
    }
    if let Some(below) = pos.below(grid.rows()) {
        out.push(below);
    }
    out
}

/// Would swapping `a` and `b` leave at least one run of three on the board?
///
/// Out-of-bounds positions never match.
pub fn would_match(grid: &Grid, a: Position, b: Position) -> bool {
    let mut scratch = grid.clone();
    if scratch.swap(a, b).is_err() {
        return false;
    }
    has_matches(&scratch)
}

/// First adjacent swap that produces a match, in row-major order (right before down)
pub fn find_valid_move(grid: &Grid) -> Option<(Position, Position)> {
    // One scratch copy for the whole scan; each trial swap is undone before the next.
    let mut scratch = grid.clone();
    for pos in grid.positions() {
        for other in forward_neighbors(grid, pos) {
            if scratch.swap(pos, other).is_err() {
                continue;
            }
            let hit = has_matches(&scratch);
            let _ = scratch.swap(pos, other);
            if hit {
                return Some((pos, other));
            }
        }
    }
    None
}

/// True if any adjacent swap on the board produces a match
pub fn has_any_valid_move(grid: &Grid) -> bool {
    find_valid_move(grid).is_some()
}
