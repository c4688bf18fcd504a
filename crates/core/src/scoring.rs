//! Scoring module - cell-count points with a combo multiplier
//!
//! Each destroy pass awards `cells * base_points * max(1, combo_depth)`, where
//! `combo_depth` is the 1-based pass number within the current cascade. The
//! player's initial match is depth 1, the first chain reaction depth 2, and so on.
//!
//! Cells, not runs, are counted: an L or T shape pays for its corner once.

/// Points for one destroy pass
pub fn calculate_points(cells: usize, base_points: u32, combo_depth: u32) -> u64 {
    (cells as u64)
        .saturating_mul(u64::from(base_points))
        .saturating_mul(u64::from(combo_depth.max(1)))
}

/// Running score plus combo bookkeeping for one session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreTracker {
    base_points: u32,
    score: u64,
    combo_depth: u32,
    best_combo: u32,
}

impl ScoreTracker {
    pub fn new(base_points: u32) -> Self {
        Self {
            base_points,
            score: 0,
            combo_depth: 0,
            best_combo: 0,
        }
    }

    /// Credit a destroy pass and return the points it earned
    pub fn on_destroy(&mut self, cells: usize, combo_depth: u32) -> u64 {
        let points = calculate_points(cells, self.base_points, combo_depth);
        self.score = self.score.saturating_add(points);
        self.combo_depth = combo_depth;
        self.best_combo = self.best_combo.max(combo_depth);
        points
    }

    /// The cascade settled; the next match starts a fresh combo
    pub fn end_cascade(&mut self) {
        self.combo_depth = 0;
    }

    /// Back to zero for a new game (base points are kept)
    pub fn reset(&mut self) {
        self.score = 0;
        self.combo_depth = 0;
        self.best_combo = 0;
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    /// Depth of the pass being scored; 0 between cascades
    pub fn combo_depth(&self) -> u32 {
        self.combo_depth
    }

    /// Deepest combo reached since the last reset
    pub fn best_combo(&self) -> u32 {
        self.best_combo
    }

    pub fn base_points(&self) -> u32 {
        self.base_points
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_pass_points() {
        assert_eq!(calculate_points(3, 10, 1), 30);
        assert_eq!(calculate_points(5, 10, 1), 50);
    }

    #[test]
    fn test_combo_multiplier() {
        assert_eq!(calculate_points(3, 10, 2), 60);
        assert_eq!(calculate_points(4, 10, 3), 120);
    }

    #[test]
    fn test_depth_zero_counts_as_one() {
        assert_eq!(calculate_points(3, 10, 0), 30);
    }

    #[test]
    fn test_points_saturate() {
        assert_eq!(calculate_points(usize::MAX, u32::MAX, u32::MAX), u64::MAX);
    }

    #[test]
    fn test_tracker_accumulates_over_a_cascade() {
        let mut tracker = ScoreTracker::new(10);
        assert_eq!(tracker.on_destroy(3, 1), 30);
        assert_eq!(tracker.on_destroy(3, 2), 60);
        assert_eq!(tracker.score(), 90);
        assert_eq!(tracker.combo_depth(), 2);

        tracker.end_cascade();
        assert_eq!(tracker.combo_depth(), 0);
        assert_eq!(tracker.best_combo(), 2);
        assert_eq!(tracker.score(), 90);
    }

    #[test]
    fn test_reset_clears_score_and_combo() {
        let mut tracker = ScoreTracker::new(25);
        tracker.on_destroy(4, 3);
        tracker.reset();
        assert_eq!(tracker.score(), 0);
        assert_eq!(tracker.combo_depth(), 0);
        assert_eq!(tracker.best_combo(), 0);
        assert_eq!(tracker.base_points(), 25);
    }
}
