//! Board controller - the single facade collaborators talk to
//!
//! Owns the grid, RNG, score and cascade machine, and threads every player
//! operation through them. Only one operation is ever in flight: while the
//! cascade is not `Idle`, input is dropped rather than queued.
//!
//! Render events accumulate in an internal queue; hosts pull them with
//! [`BoardController::drain_events`] after each call.

use std::mem;

use log::{debug, info, warn};

use gem_cascade_core::{
    find_valid_move, has_matches, validate_config, BoardSnapshot, CascadeContext, CascadeEngine,
    CascadeOutcome, EngineError, GemRng, Grid, Result, ScoreTracker,
};
use gem_cascade_types::{
    CascadePhase, EngineConfig, EngineEvent, Position, RegenerationReason,
    RECOMMENDED_MIN_GEM_TYPES,
};

/// Result of a swap request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwapOutcome {
    /// A cascade is in flight (or the board is stalled); the request was dropped
    Busy,
    /// The cells do not share an edge; nothing changed
    NotAdjacent,
    /// No match; the swap snapped back
    Reverted,
    Resolved {
        passes: u32,
        points: u64,
        regenerated: bool,
    },
}

impl SwapOutcome {
    pub fn is_resolved(&self) -> bool {
        matches!(self, SwapOutcome::Resolved { .. })
    }
}

impl From<CascadeOutcome> for SwapOutcome {
    fn from(outcome: CascadeOutcome) -> Self {
        match outcome {
            CascadeOutcome::Reverted => SwapOutcome::Reverted,
            CascadeOutcome::Resolved {
                passes,
                points,
                regenerated,
            } => SwapOutcome::Resolved {
                passes,
                points,
                regenerated,
            },
        }
    }
}

/// Result of a cell click
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectOutcome {
    /// Not `Idle`; the click was dropped
    Ignored,
    Selected(Position),
    /// The selected cell was clicked again
    Deselected(Position),
    /// A non-adjacent cell was clicked; the selection jumped there
    Moved { from: Position, to: Position },
    /// An adjacent cell was clicked; the two were swapped
    Swapped(SwapOutcome),
}

pub struct BoardController {
    config: EngineConfig,
    grid: Grid,
    rng: GemRng,
    score: ScoreTracker,
    cascade: CascadeEngine,
    selected: Option<Position>,
    events: Vec<EngineEvent>,
    moves: u32,
    board_id: u32,
    episode_id: u32,
}

impl BoardController {
    /// Validate `config` and generate the first board.
    ///
    /// Fails with `InvalidConfig` for unusable settings and `BoardUnsolvable`
    /// when no playable board exists for the catalog and grid size.
    pub fn new(config: EngineConfig) -> Result<Self> {
        validate_config(&config)?;
        if config.gem_count() < RECOMMENDED_MIN_GEM_TYPES {
            warn!(
                "gem catalog has {} type(s); at least {} are recommended",
                config.gem_count(),
                RECOMMENDED_MIN_GEM_TYPES
            );
        }

        let mut controller = Self::with_grid(config.clone(), Grid::new(config.rows, config.cols));
        controller
            .cascade
            .resolver()
            .regenerate(&mut controller.grid, &mut controller.rng)?;
        controller.board_id = 1;
        controller.push_regenerated(RegenerationReason::Initial);
        info!(
            "new {}x{} board, {} gem types, seed {}",
            config.rows,
            config.cols,
            config.gem_count(),
            config.seed
        );
        Ok(controller)
    }

    /// Start from a prepared board instead of a generated one.
    ///
    /// `rows`/`cols` of `config` are taken from `grid`. The grid must be full,
    /// free of runs, and only use types from a catalog of at least two. It is
    /// not checked for valid moves.
    pub fn from_grid(config: EngineConfig, grid: Grid) -> Result<Self> {
        let config = EngineConfig {
            rows: grid.rows(),
            cols: grid.cols(),
            ..config
        };
        validate_config(&config)?;
        if config.gem_count() < 2 {
            // Every refill would re-complete a run and the cascade could never settle.
            return Err(EngineError::InvalidConfig(
                "a starting grid needs at least two gem types".to_string(),
            ));
        }
        if !grid.is_full() {
            return Err(EngineError::InvalidConfig(
                "starting grid has empty cells".to_string(),
            ));
        }
        if let Some(gem) = grid.cells().iter().flatten().find(|g| g.index() >= config.gem_count()) {
            return Err(EngineError::InvalidConfig(format!(
                "starting grid uses gem type {} but the catalog has {}",
                gem.index(),
                config.gem_count()
            )));
        }
        if has_matches(&grid) {
            return Err(EngineError::InvalidConfig(
                "starting grid already contains a match".to_string(),
            ));
        }

        let mut controller = Self::with_grid(config, grid);
        controller.board_id = 1;
        Ok(controller)
    }

    fn with_grid(config: EngineConfig, grid: Grid) -> Self {
        Self {
            rng: GemRng::new(config.seed),
            score: ScoreTracker::new(config.base_points),
            cascade: CascadeEngine::new(&config),
            grid,
            selected: None,
            events: Vec::new(),
            moves: 0,
            board_id: 0,
            episode_id: 0,
            config,
        }
    }

    /// Borrow the cascade machine alongside the state it mutates
    fn split(&mut self) -> (&mut CascadeEngine, CascadeContext<'_>) {
        let Self {
            cascade,
            grid,
            rng,
            score,
            events,
            ..
        } = self;
        (
            cascade,
            CascadeContext {
                grid,
                rng,
                score,
                events,
            },
        )
    }

    fn accepts_input(&self) -> bool {
        self.cascade.is_idle() && !self.cascade.is_stalled()
    }

    fn push_regenerated(&mut self, reason: RegenerationReason) {
        self.events.push(EngineEvent::Regenerated {
            reason,
            board: self.grid.to_rows(),
        });
    }

    fn check_bounds(&self, pos: Position) -> Result<()> {
        if self.grid.is_in_bounds(pos.row, pos.col) {
            Ok(())
        } else {
            Err(EngineError::OutOfBounds {
                row: pos.row,
                col: pos.col,
                rows: self.grid.rows(),
                cols: self.grid.cols(),
            })
        }
    }

    fn clear_selection(&mut self) {
        if let Some(position) = self.selected.take() {
            self.events.push(EngineEvent::Deselected { position });
        }
    }

    /// Click on a cell.
    ///
    /// First click selects; clicking the selected cell deselects; clicking an
    /// adjacent cell swaps; clicking any other cell moves the selection.
    pub fn select_cell(&mut self, row: usize, col: usize) -> Result<SelectOutcome> {
        if !self.accepts_input() {
            return Ok(SelectOutcome::Ignored);
        }
        let pos = Position::new(row, col);
        self.check_bounds(pos)?;

        match self.selected {
            None => {
                self.selected = Some(pos);
                self.events.push(EngineEvent::Selected { position: pos });
                Ok(SelectOutcome::Selected(pos))
            }
            Some(current) if current == pos => {
                self.clear_selection();
                Ok(SelectOutcome::Deselected(pos))
            }
            Some(current) if current.is_adjacent(pos) => {
                let outcome = self.try_swap(current, pos)?;
                Ok(SelectOutcome::Swapped(outcome))
            }
            Some(current) => {
                self.clear_selection();
                self.selected = Some(pos);
                self.events.push(EngineEvent::Selected { position: pos });
                Ok(SelectOutcome::Moved {
                    from: current,
                    to: pos,
                })
            }
        }
    }

    /// Drop the selection. Returns `false` if input is not accepted right now.
    pub fn deselect_all(&mut self) -> bool {
        if !self.accepts_input() {
            return false;
        }
        self.clear_selection();
        true
    }

    /// Swap two cells and run the whole cascade.
    ///
    /// Non-adjacent pairs and requests made mid-cascade are no-ops reported in
    /// the outcome. Coordinates outside the grid are an error.
    pub fn try_swap(&mut self, a: Position, b: Position) -> Result<SwapOutcome> {
        if !self.accepts_input() {
            return Ok(SwapOutcome::Busy);
        }
        self.check_bounds(a)?;
        self.check_bounds(b)?;
        if !a.is_adjacent(b) {
            debug!("ignoring swap of non-adjacent cells {a:?} and {b:?}");
            return Ok(SwapOutcome::NotAdjacent);
        }

        self.begin_swap(a, b)?;
        Ok(self.resolve()?.unwrap_or(SwapOutcome::Busy))
    }

    /// Commit a swap and stop in `Swapping`; advance with [`step`](Self::step).
    ///
    /// Returns `Ok(false)` when input is not accepted. Non-adjacent pairs are
    /// an `InvalidSwap` error at this level.
    pub fn begin_swap(&mut self, a: Position, b: Position) -> Result<bool> {
        if !self.accepts_input() {
            return Ok(false);
        }
        let (cascade, mut ctx) = self.split();
        let started = cascade.begin(&mut ctx, a, b)?;
        if started {
            self.clear_selection();
        }
        Ok(started)
    }

    /// Advance the cascade by one transition.
    ///
    /// Returns the swap outcome once the machine is back to `Idle`.
    pub fn step(&mut self) -> Result<Option<SwapOutcome>> {
        let (cascade, mut ctx) = self.split();
        let outcome = cascade.step(&mut ctx)?;
        Ok(outcome.map(|o| self.finish(o)))
    }

    /// Step until the cascade is back to `Idle`
    pub fn resolve(&mut self) -> Result<Option<SwapOutcome>> {
        let (cascade, mut ctx) = self.split();
        let outcome = cascade.resolve(&mut ctx)?;
        Ok(outcome.map(|o| self.finish(o)))
    }

    fn finish(&mut self, outcome: CascadeOutcome) -> SwapOutcome {
        if let CascadeOutcome::Resolved {
            passes,
            points,
            regenerated,
        } = outcome
        {
            self.moves += 1;
            if regenerated {
                self.board_id += 1;
            }
            debug!(
                "move {} resolved in {passes} pass(es) for {points} points",
                self.moves
            );
        }
        outcome.into()
    }

    /// New game: fresh board, score and combo back to zero.
    ///
    /// Ignored mid-cascade, but allowed when a failed regeneration stalled the board.
    pub fn restart(&mut self) -> Result<bool> {
        if !self.cascade.is_idle() && !self.cascade.is_stalled() {
            return Ok(false);
        }

        self.cascade
            .resolver()
            .regenerate(&mut self.grid, &mut self.rng)?;
        self.cascade.reset();
        self.score.reset();
        self.selected = None;
        self.moves = 0;
        self.board_id += 1;
        self.episode_id += 1;
        self.push_regenerated(RegenerationReason::Restart);
        info!("restarted, episode {}", self.episode_id);
        Ok(true)
    }

    /// First valid swap in scan order, if input is currently accepted
    pub fn hint(&self) -> Option<(Position, Position)> {
        if !self.accepts_input() {
            return None;
        }
        find_valid_move(&self.grid)
    }

    /// Take every event emitted since the last drain
    pub fn drain_events(&mut self) -> Vec<EngineEvent> {
        mem::take(&mut self.events)
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn phase(&self) -> CascadePhase {
        self.cascade.phase()
    }

    pub fn is_idle(&self) -> bool {
        self.cascade.is_idle()
    }

    /// A deadlock regeneration failed; only [`restart`](Self::restart) is accepted
    pub fn is_stalled(&self) -> bool {
        self.cascade.is_stalled()
    }

    pub fn selected(&self) -> Option<Position> {
        self.selected
    }

    pub fn score(&self) -> u64 {
        self.score.score()
    }

    pub fn combo_depth(&self) -> u32 {
        self.score.combo_depth()
    }

    pub fn best_combo(&self) -> u32 {
        self.score.best_combo()
    }

    pub fn moves(&self) -> u32 {
        self.moves
    }

    pub fn board_id(&self) -> u32 {
        self.board_id
    }

    pub fn episode_id(&self) -> u32 {
        self.episode_id
    }

    pub fn seed(&self) -> u32 {
        self.config.seed
    }

    /// Refresh cells and hash only
    pub fn snapshot_board_into(&self, out: &mut BoardSnapshot) {
        out.set_board(&self.grid);
        out.board_id = self.board_id;
    }

    /// Refresh everything except the board
    pub fn snapshot_meta_into(&self, out: &mut BoardSnapshot) {
        out.phase = self.phase();
        out.selected = self.selected;
        out.score = self.score();
        out.combo_depth = self.combo_depth();
        out.best_combo = self.best_combo();
        out.moves = self.moves;
        out.episode_id = self.episode_id;
        out.seed = self.config.seed;
    }

    pub fn snapshot(&self) -> BoardSnapshot {
        let mut snap = BoardSnapshot::default();
        self.snapshot_board_into(&mut snap);
        self.snapshot_meta_into(&mut snap);
        snap
    }
}
