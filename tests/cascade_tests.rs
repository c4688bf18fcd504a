//! Cascade scenarios driven through the public controller

use gem_cascade::core::{apply_gravity, has_any_valid_move, has_matches, EngineError, Grid};
use gem_cascade::engine::{BoardController, SwapOutcome};
use gem_cascade::types::{EngineConfig, EngineEvent, Position, RegenerationReason};

/// 7x7, six types. (3,3)=A (3,4)=A (3,5)=B (2,5)=A (4,5)=A, no run anywhere.
const SEVEN_BY_SEVEN: [&str; 7] = [
    "ABCDEFA", //
    "CDEFABC", //
    "EFABCAE", //
    "ABCAABD", //
    "CDEFAAC", //
    "EFABCDE", //
    "ABCDEFA",
];

/// Swapping (2,0)/(2,1) completes A in column 0; the gems above fall and
/// line up C C C on the bottom row.
const TWO_PASS: [&str; 5] = ["DEFDE", "CFDEF", "BAEFD", "ADFED", "ACCEF"];

fn controller(rows: &[&str]) -> BoardController {
    BoardController::from_grid(EngineConfig::default(), Grid::from_rows(rows).unwrap()).unwrap()
}

fn destroyed(events: &[EngineEvent]) -> Vec<(u32, usize, u64)> {
    events
        .iter()
        .filter_map(|e| match e {
            EngineEvent::Destroyed {
                pass,
                cells,
                points,
                ..
            } => Some((*pass, cells.len(), *points)),
            _ => None,
        })
        .collect()
}

#[test]
fn test_fixture_starts_clean() {
    let grid = Grid::from_rows(&SEVEN_BY_SEVEN).unwrap();
    assert!(!has_matches(&grid));
    let grid = Grid::from_rows(&TWO_PASS).unwrap();
    assert!(!has_matches(&grid));
}

#[test]
fn test_single_match_scores_base_points_per_cell() {
    let mut ctrl = controller(&SEVEN_BY_SEVEN);

    let outcome = ctrl
        .try_swap(Position::new(3, 5), Position::new(4, 5))
        .unwrap();

    assert!(matches!(
        outcome,
        SwapOutcome::Resolved {
            passes: 1,
            points: 30,
            ..
        }
    ));
    assert_eq!(ctrl.score(), 3 * 10);
    assert_eq!(destroyed(&ctrl.drain_events()), vec![(1, 3, 30)]);
}

#[test]
fn test_second_pass_uses_combo_multiplier() {
    let mut ctrl = controller(&TWO_PASS);

    ctrl.try_swap(Position::new(2, 0), Position::new(2, 1))
        .unwrap();
    let events = ctrl.drain_events();

    assert_eq!(destroyed(&events), vec![(1, 3, 30), (2, 3, 60)]);
    assert!(events.contains(&EngineEvent::ComboAdvanced { depth: 2 }));
    assert!(events.contains(&EngineEvent::Settled {
        passes: 2,
        points: 90
    }));
    assert_eq!(ctrl.score(), 90);
    assert_eq!(ctrl.best_combo(), 2);
    // Combo is per cascade.
    assert_eq!(ctrl.combo_depth(), 0);
}

#[test]
fn test_event_order_for_one_pass() {
    let mut ctrl = controller(&SEVEN_BY_SEVEN);
    ctrl.try_swap(Position::new(3, 5), Position::new(4, 5))
        .unwrap();

    let kinds: Vec<&str> = ctrl.drain_events().iter().map(EngineEvent::kind).collect();
    let expected = ["swapped", "destroyed", "dropped", "spawned", "settled"];
    assert_eq!(&kinds[..expected.len()], &expected);
}

#[test]
fn test_single_gem_type_is_unsolvable() {
    let config = EngineConfig {
        gem_types: vec!["sparkle".into()],
        ..EngineConfig::default()
    };
    match BoardController::new(config) {
        Err(EngineError::BoardUnsolvable { attempts }) => assert_eq!(attempts, 20),
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("a single gem type cannot produce a playable board"),
    }
}

#[test]
fn test_non_adjacent_swap_rejected() {
    let mut ctrl = controller(&SEVEN_BY_SEVEN);
    let before = ctrl.grid().clone();

    assert_eq!(
        ctrl.try_swap(Position::new(3, 3), Position::new(3, 5))
            .unwrap(),
        SwapOutcome::NotAdjacent
    );
    assert_eq!(
        ctrl.try_swap(Position::new(3, 3), Position::new(4, 4))
            .unwrap(),
        SwapOutcome::NotAdjacent
    );
    assert_eq!(ctrl.grid(), &before);

    assert!(matches!(
        ctrl.begin_swap(Position::new(0, 0), Position::new(2, 0)),
        Err(EngineError::InvalidSwap { .. })
    ));
    assert!(ctrl.is_idle());
}

#[test]
fn test_no_match_swap_restores_exact_grid() {
    let mut ctrl = controller(&SEVEN_BY_SEVEN);
    let before = ctrl.grid().clone();

    let outcome = ctrl
        .try_swap(Position::new(0, 0), Position::new(0, 1))
        .unwrap();

    assert_eq!(outcome, SwapOutcome::Reverted);
    assert_eq!(ctrl.grid(), &before);
    assert_eq!(ctrl.score(), 0);
    assert_eq!(ctrl.moves(), 0);
}

#[test]
fn test_gravity_idempotent_on_full_board() {
    let mut grid = Grid::from_rows(&SEVEN_BY_SEVEN).unwrap();
    let before = grid.clone();
    assert!(apply_gravity(&mut grid).unwrap().is_empty());
    assert_eq!(grid, before);

    let mut sparse = Grid::from_rows(&["A..", "B.C", "DEF"]).unwrap();
    apply_gravity(&mut sparse).unwrap();
    let once = sparse.clone();
    assert!(apply_gravity(&mut sparse).unwrap().is_empty());
    assert_eq!(sparse, once);
}

#[test]
fn test_settled_board_always_has_a_move() {
    for rows in [&SEVEN_BY_SEVEN[..], &TWO_PASS[..]] {
        let mut ctrl = controller(rows);
        let (a, b) = ctrl.hint().unwrap();
        ctrl.try_swap(a, b).unwrap();
        assert!(!has_matches(ctrl.grid()));
        assert!(has_any_valid_move(ctrl.grid()));
    }
}

#[test]
fn test_deadlock_after_cascade_regenerates_live_board() {
    // Clearing the bottom row of this 3x3 usually leaves no move behind.
    let mut regenerated = 0;
    for seed in 1..=200 {
        let config = EngineConfig {
            seed,
            ..EngineConfig::default()
        };
        let grid = Grid::from_rows(&["ABC", "CDA", "AAB"]).unwrap();
        let mut ctrl = BoardController::from_grid(config, grid).unwrap();
        ctrl.drain_events();

        let outcome = ctrl
            .try_swap(Position::new(2, 2), Position::new(1, 2))
            .unwrap();
        let SwapOutcome::Resolved {
            regenerated: true, ..
        } = outcome
        else {
            continue;
        };
        regenerated += 1;

        let events = ctrl.drain_events();
        let board = events.iter().find_map(|e| match e {
            EngineEvent::Regenerated {
                reason: RegenerationReason::Deadlock,
                board,
            } => Some(board.clone()),
            _ => None,
        });
        assert_eq!(board, Some(ctrl.grid().to_rows()), "seed {seed}");
        assert_eq!(ctrl.board_id(), 2, "seed {seed}");
        assert!(ctrl.is_idle(), "seed {seed}");
        assert!(!ctrl.is_stalled(), "seed {seed}");
        assert!(!has_matches(ctrl.grid()), "seed {seed}");
        assert!(has_any_valid_move(ctrl.grid()), "seed {seed}");
    }
    assert!(regenerated > 0);
}
