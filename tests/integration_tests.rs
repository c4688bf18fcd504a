//! Integration tests - whole sessions through the facade crate

use gem_cascade::core::{has_any_valid_move, has_matches, DeadlockResolver, GemRng, Grid};
use gem_cascade::engine::{play_moves, BoardController, SelectOutcome, SwapOutcome};
use gem_cascade::types::{EngineConfig, EngineEvent, RegenerationReason};

#[test]
fn test_generated_boards_are_clean_and_playable() {
    for seed in 1..=25 {
        let config = EngineConfig {
            seed,
            ..EngineConfig::default()
        };
        let ctrl = BoardController::new(config).unwrap();
        assert!(ctrl.grid().is_full());
        assert!(!has_matches(ctrl.grid()), "seed {seed}");
        assert!(has_any_valid_move(ctrl.grid()), "seed {seed}");
    }
}

#[test]
fn test_regeneration_over_sizes() {
    for (rows, cols) in [(4, 4), (5, 9), (8, 8), (10, 6)] {
        let config = EngineConfig::with_size(rows, cols);
        let resolver = DeadlockResolver::new(&config);
        let mut grid = Grid::new(rows, cols);
        let mut rng = GemRng::new(rows as u32 * 31 + cols as u32);

        resolver.regenerate(&mut grid, &mut rng).unwrap();
        assert!(!has_matches(&grid));
        assert!(has_any_valid_move(&grid));
    }
}

#[test]
fn test_sessions_are_deterministic() {
    let run = || {
        let mut ctrl = BoardController::new(EngineConfig::default()).unwrap();
        let stats = play_moves(&mut ctrl, 30).unwrap();
        (stats, ctrl.score(), ctrl.grid().clone(), ctrl.drain_events())
    };
    assert_eq!(run(), run());
}

#[test]
fn test_invariants_hold_after_every_move() {
    let mut ctrl = BoardController::new(EngineConfig {
        seed: 2024,
        ..EngineConfig::default()
    })
    .unwrap();

    let mut last_score = 0;
    for _ in 0..40 {
        let (a, b) = ctrl.hint().expect("settled board must have a move");
        let outcome = ctrl.try_swap(a, b).unwrap();
        assert!(outcome.is_resolved());
        assert!(ctrl.is_idle());
        assert!(!has_matches(ctrl.grid()));
        assert!(has_any_valid_move(ctrl.grid()));
        assert!(ctrl.score() > last_score);
        last_score = ctrl.score();
    }
    assert_eq!(ctrl.moves(), 40);
}

#[test]
fn test_click_driven_swap() {
    let mut ctrl = BoardController::new(EngineConfig::default()).unwrap();
    let (a, b) = ctrl.hint().unwrap();

    assert_eq!(
        ctrl.select_cell(a.row, a.col).unwrap(),
        SelectOutcome::Selected(a)
    );
    match ctrl.select_cell(b.row, b.col).unwrap() {
        SelectOutcome::Swapped(SwapOutcome::Resolved { passes, .. }) => assert!(passes >= 1),
        other => panic!("expected a resolved swap, got {other:?}"),
    }
    assert_eq!(ctrl.selected(), None);
}

#[test]
fn test_restart_starts_new_episode() {
    let mut ctrl = BoardController::new(EngineConfig::default()).unwrap();
    play_moves(&mut ctrl, 5).unwrap();
    let board_id = ctrl.board_id();
    ctrl.drain_events();

    assert!(ctrl.restart().unwrap());
    assert_eq!(ctrl.score(), 0);
    assert_eq!(ctrl.best_combo(), 0);
    assert_eq!(ctrl.episode_id(), 1);
    assert_eq!(ctrl.board_id(), board_id + 1);
    assert!(!has_matches(ctrl.grid()));

    let events = ctrl.drain_events();
    assert!(matches!(
        events.as_slice(),
        [EngineEvent::Regenerated {
            reason: RegenerationReason::Restart,
            ..
        }]
    ));
}

#[test]
fn test_custom_catalog_from_json() {
    let config: EngineConfig = serde_json::from_str(
        r#"{"rows": 6, "cols": 8, "gemTypes": ["ruby", "jade", "onyx", "opal", "pearl"], "basePoints": 5, "seed": 9}"#,
    )
    .unwrap();
    let mut ctrl = BoardController::new(config).unwrap();
    assert_eq!((ctrl.grid().rows(), ctrl.grid().cols()), (6, 8));
    assert!(ctrl.grid().cells().iter().flatten().all(|g| g.index() < 5));

    let stats = play_moves(&mut ctrl, 10).unwrap();
    assert_eq!(stats.moves, 10);
    // Every destroyed cell is worth a multiple of 5.
    assert_eq!(ctrl.score() % 5, 0);
}
