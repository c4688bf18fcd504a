//! Board tests - grid accessors, match detection and move validation

use gem_cascade::core::{
    find_matches, find_valid_move, has_any_valid_move, has_matches, would_match, EngineError,
    Grid,
};
use gem_cascade::types::{Direction, GemType, Position};

#[test]
fn test_grid_new_is_empty() {
    let grid = Grid::new(7, 7);
    assert_eq!(grid.rows(), 7);
    assert_eq!(grid.cols(), 7);
    for pos in grid.positions() {
        assert_eq!(grid.get(pos.row, pos.col), Ok(None));
    }
    assert!(!grid.is_full());
}

#[test]
fn test_grid_out_of_bounds() {
    let mut grid = Grid::new(3, 4);

    assert_eq!(
        grid.get(3, 0),
        Err(EngineError::OutOfBounds {
            row: 3,
            col: 0,
            rows: 3,
            cols: 4
        })
    );
    assert!(grid.set(0, 4, Some(GemType(0))).is_err());
    assert!(grid
        .swap(Position::new(0, 0), Position::new(0, 4))
        .is_err());
    assert!(!grid.is_in_bounds(0, 4));
    assert!(grid.is_in_bounds(2, 3));
}

#[test]
fn test_grid_swap_exchanges_contents() {
    let mut grid = Grid::from_rows(&["AB", "CD"]).unwrap();
    grid.swap(Position::new(0, 0), Position::new(1, 1)).unwrap();
    assert_eq!(grid.to_text(), vec!["DB", "CA"]);
}

#[test]
fn test_t_shape_dedups_intersection() {
    let grid = Grid::from_rows(&[
        "AAAB", //
        "CADB", //
        "DAEC",
    ])
    .unwrap();
    let matches = find_matches(&grid);

    assert_eq!(matches.runs().len(), 2);
    assert_eq!(matches.runs()[0].direction, Direction::Horizontal);
    assert_eq!(matches.runs()[1].direction, Direction::Vertical);
    // 3 + 3 cells sharing (0, 1)
    assert_eq!(matches.len(), 5);
}

#[test]
fn test_has_matches_agrees_with_find_matches() {
    let boards: [&[&str]; 4] = [
        &["ABAB", "BABA"],
        &["AAAB", "BABA"],
        &["AB", "AB", "AC"],
        &["ABC", "ABC", "CAB"],
    ];
    for rows in boards {
        let grid = Grid::from_rows(rows).unwrap();
        assert_eq!(has_matches(&grid), !find_matches(&grid).is_empty(), "{rows:?}");
    }
}

#[test]
fn test_would_match_leaves_grid_unchanged() {
    let grid = Grid::from_rows(&["ABAA", "CDCD", "DCDC"]).unwrap();
    let before = grid.clone();

    for pos in grid.positions() {
        for other in [Position::new(pos.row, pos.col + 1), Position::new(pos.row + 1, pos.col)] {
            let _ = would_match(&grid, pos, other);
            assert_eq!(grid, before);
        }
    }
}

#[test]
fn test_valid_move_search() {
    let grid = Grid::from_rows(&["ABAA", "CDCD", "DCDC"]).unwrap();
    let (a, b) = find_valid_move(&grid).unwrap();
    assert!(a.is_adjacent(b));
    assert!(would_match(&grid, a, b));

    let deadlocked = Grid::from_rows(&["ABC", "BCA", "CAB"]).unwrap();
    assert!(!has_any_valid_move(&deadlocked));
    assert_eq!(find_valid_move(&deadlocked), None);
}
