//! Hint-driven play for bots, benchmarks and the headless CLI.

use gem_cascade_core::Result;

use crate::controller::{BoardController, SwapOutcome};

/// Running totals over a sequence of played moves
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlayStats {
    pub moves: u32,
    pub passes: u32,
    pub points: u64,
    pub regenerations: u32,
    pub deepest_cascade: u32,
}

impl PlayStats {
    pub fn record(&mut self, outcome: SwapOutcome) {
        if let SwapOutcome::Resolved {
            passes,
            points,
            regenerated,
        } = outcome
        {
            self.moves += 1;
            self.passes += passes;
            self.points = self.points.saturating_add(points);
            self.regenerations += u32::from(regenerated);
            self.deepest_cascade = self.deepest_cascade.max(passes);
        }
    }
}

/// Play the controller's hint, if there is one.
///
/// `Ok(None)` means nothing was played: a cascade is in flight or the board has
/// no move (only possible for boards loaded with [`BoardController::from_grid`]).
pub fn play_hinted_move(controller: &mut BoardController) -> Result<Option<SwapOutcome>> {
    let Some((a, b)) = controller.hint() else {
        return Ok(None);
    };
    controller.try_swap(a, b).map(Some)
}

/// Play up to `max_moves` hinted moves, stopping early when no hint is available
pub fn play_moves(controller: &mut BoardController, max_moves: u32) -> Result<PlayStats> {
    let mut stats = PlayStats::default();
    for _ in 0..max_moves {
        match play_hinted_move(controller)? {
            Some(outcome) => stats.record(outcome),
            None => break,
        }
    }
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use gem_cascade_core::{has_any_valid_move, has_matches, Grid};
    use gem_cascade_types::EngineConfig;

    #[test]
    fn test_hinted_move_always_resolves() {
        let mut controller = BoardController::new(EngineConfig::default()).unwrap();
        for _ in 0..20 {
            let outcome = play_hinted_move(&mut controller).unwrap();
            assert!(matches!(outcome, Some(SwapOutcome::Resolved { .. })));
            assert!(!has_matches(controller.grid()));
            assert!(has_any_valid_move(controller.grid()));
        }
        assert_eq!(controller.moves(), 20);
    }

    #[test]
    fn test_play_moves_accumulates() {
        let mut controller = BoardController::new(EngineConfig::default()).unwrap();
        let stats = play_moves(&mut controller, 10).unwrap();
        assert_eq!(stats.moves, 10);
        assert!(stats.passes >= 10);
        assert_eq!(stats.points, controller.score());
    }

    #[test]
    fn test_no_hint_on_deadlocked_fixture() {
        let grid = Grid::from_rows(&["ABAB", "CDCD", "ABAB", "CDCD"]).unwrap();
        let mut controller = BoardController::from_grid(EngineConfig::default(), grid).unwrap();
        assert_eq!(play_hinted_move(&mut controller).unwrap(), None);
        assert_eq!(play_moves(&mut controller, 5).unwrap(), PlayStats::default());
    }
}
