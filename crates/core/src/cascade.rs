//! Cascade engine - the swap → destroy → gravity → refill state machine
//!
//! ```text
//! Idle ──begin──▶ Swapping ──no match──▶ Idle            (swap reverted)
//!                    │
//!                    └─match──▶ Resolving(1) ─▶ Resolving(2) ─▶ … ─▶ Settled ─▶ Idle
//! ```
//!
//! Each call to [`CascadeEngine::step`] performs exactly one transition, so a
//! renderer can animate between passes. [`CascadeEngine::resolve`] drives the
//! machine back to `Idle` in one go.
//!
//! One `Resolving(n)` pass:
//! 1. report `(cells, n)` to the [`ScoreTracker`]
//! 2. clear the matched cells
//! 3. compact every column downward ([`apply_gravity`])
//! 4. refill empty top cells with constrained draws ([`refill`])
//! 5. re-scan; any match means pass `n + 1`, otherwise `Settled`
//!
//! `Settled` runs the deadlock check and regenerates the board when no move is left.

use log::{debug, info, trace};

use crate::deadlock::DeadlockResolver;
use crate::error::{EngineError, Result};
use crate::generator::{draw_gem, GenerationParams};
use crate::grid::Grid;
use crate::matcher::{find_matches, MatchSet};
use crate::rng::GemRng;
use crate::scoring::ScoreTracker;
use crate::types::{
    CascadePhase, EngineConfig, EngineEvent, GemDrop, GemSpawn, Position, RegenerationReason,
};

/// Mutable session state a cascade step works on
pub struct CascadeContext<'a> {
    pub grid: &'a mut Grid,
    pub rng: &'a mut GemRng,
    pub score: &'a mut ScoreTracker,
    pub events: &'a mut Vec<EngineEvent>,
}

/// How a swap ended once the machine is back to `Idle`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CascadeOutcome {
    /// No match; the grid is exactly as before the swap
    Reverted,
    Resolved {
        passes: u32,
        points: u64,
        /// The settled board was deadlocked and got replaced
        regenerated: bool,
    },
}

#[derive(Debug, Clone)]
pub struct CascadeEngine {
    phase: CascadePhase,
    /// Matches found at the end of the previous transition, consumed by the next pass
    pending: Option<MatchSet>,
    passes: u32,
    points: u64,
    params: GenerationParams,
    resolver: DeadlockResolver,
    /// Regeneration failed in `Settled`; nothing moves until [`CascadeEngine::reset`]
    stalled: bool,
}

impl CascadeEngine {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            phase: CascadePhase::Idle,
            pending: None,
            passes: 0,
            points: 0,
            params: GenerationParams::from(config),
            resolver: DeadlockResolver::new(config),
            stalled: false,
        }
    }

    pub fn phase(&self) -> CascadePhase {
        self.phase
    }

    pub fn is_idle(&self) -> bool {
        self.phase.is_idle()
    }

    pub fn is_stalled(&self) -> bool {
        self.stalled
    }

    pub fn resolver(&self) -> &DeadlockResolver {
        &self.resolver
    }

    /// Back to `Idle` with no cascade in flight (used after a board is replaced)
    pub fn reset(&mut self) {
        self.phase = CascadePhase::Idle;
        self.pending = None;
        self.passes = 0;
        self.points = 0;
        self.stalled = false;
    }

    /// Commit a swap to the grid and enter `Swapping`.
    ///
    /// Returns `Ok(false)` without touching anything if a cascade is already in flight.
    pub fn begin(&mut self, ctx: &mut CascadeContext<'_>, a: Position, b: Position) -> Result<bool> {
        if !self.is_idle() || self.stalled {
            return Ok(false);
        }
        if !a.is_adjacent(b) {
            return Err(EngineError::InvalidSwap { a, b });
        }

        ctx.grid.swap(a, b)?;
        ctx.events.push(EngineEvent::Swapped { a, b });
        self.phase = CascadePhase::Swapping { a, b };
        Ok(true)
    }

    /// Perform one transition.
    ///
    /// Returns the outcome when this step brought the machine back to `Idle`.
    pub fn step(&mut self, ctx: &mut CascadeContext<'_>) -> Result<Option<CascadeOutcome>> {
        if self.stalled {
            return Ok(None);
        }
        match self.phase {
            CascadePhase::Idle => Ok(None),
            CascadePhase::Swapping { a, b } => self.check_swap(ctx, a, b),
            CascadePhase::Resolving { pass } => {
                self.resolve_pass(ctx, pass)?;
                Ok(None)
            }
            CascadePhase::Settled => self.settle(ctx),
        }
    }

    /// Step until the machine is back to `Idle`
    pub fn resolve(&mut self, ctx: &mut CascadeContext<'_>) -> Result<Option<CascadeOutcome>> {
        while !self.is_idle() && !self.stalled {
            if let Some(outcome) = self.step(ctx)? {
                return Ok(Some(outcome));
            }
        }
        Ok(None)
    }

    fn check_swap(
        &mut self,
        ctx: &mut CascadeContext<'_>,
        a: Position,
        b: Position,
    ) -> Result<Option<CascadeOutcome>> {
        let matches = find_matches(ctx.grid);
        if matches.is_empty() {
            ctx.grid.swap(a, b)?;
            ctx.events.push(EngineEvent::SwapReverted { a, b });
            self.phase = CascadePhase::Idle;
            return Ok(Some(CascadeOutcome::Reverted));
        }

        self.pending = Some(matches);
        self.passes = 0;
        self.points = 0;
        self.phase = CascadePhase::Resolving { pass: 1 };
        Ok(None)
    }

    fn resolve_pass(&mut self, ctx: &mut CascadeContext<'_>, pass: u32) -> Result<()> {
        let matches = match self.pending.take() {
            Some(matches) => matches,
            None => find_matches(ctx.grid),
        };
        if matches.is_empty() {
            self.finish_cascade(ctx);
            return Ok(());
        }

        if pass >= 2 {
            ctx.events.push(EngineEvent::ComboAdvanced { depth: pass });
        }

        let points = ctx.score.on_destroy(matches.len(), pass);
        let cells: Vec<Position> = matches.cells().collect();
        for &pos in &cells {
            ctx.grid.take(pos)?;
        }
        debug!(
            "pass {pass}: destroyed {} cell(s) in {} run(s) for {points} points",
            cells.len(),
            matches.runs().len()
        );
        ctx.events.push(EngineEvent::Destroyed {
            pass,
            cells,
            runs: matches.runs().to_vec(),
            points,
        });
        self.passes = pass;
        self.points = self.points.saturating_add(points);

        let drops = apply_gravity(ctx.grid)?;
        ctx.events.push(EngineEvent::Dropped { drops });

        let gems = refill(ctx.grid, ctx.rng, self.params)?;
        ctx.events.push(EngineEvent::Spawned { gems });

        let next = find_matches(ctx.grid);
        if next.is_empty() {
            self.finish_cascade(ctx);
        } else {
            self.pending = Some(next);
            self.phase = CascadePhase::Resolving { pass: pass + 1 };
        }
        Ok(())
    }

    fn finish_cascade(&mut self, ctx: &mut CascadeContext<'_>) {
        ctx.score.end_cascade();
        ctx.events.push(EngineEvent::Settled {
            passes: self.passes,
            points: self.points,
        });
        self.phase = CascadePhase::Settled;
    }

    fn settle(&mut self, ctx: &mut CascadeContext<'_>) -> Result<Option<CascadeOutcome>> {
        let mut regenerated = false;
        if !self.resolver.has_any_valid_move(ctx.grid) {
            info!("no valid moves left, regenerating board");
            if let Err(err) = self.resolver.regenerate(ctx.grid, ctx.rng) {
                self.stalled = true;
                return Err(err);
            }
            ctx.events.push(EngineEvent::Regenerated {
                reason: RegenerationReason::Deadlock,
                board: ctx.grid.to_rows(),
            });
            regenerated = true;
        }

        self.phase = CascadePhase::Idle;
        Ok(Some(CascadeOutcome::Resolved {
            passes: self.passes,
            points: self.points,
            regenerated,
        }))
    }
}

/// Compact every column toward the bottom, preserving order.
///
/// Returns one [`GemDrop`] per gem that moved. An already compacted grid is left unchanged.
pub fn apply_gravity(grid: &mut Grid) -> Result<Vec<GemDrop>> {
    let mut drops = Vec::new();
    for col in 0..grid.cols() {
        // Next free slot from the bottom.
        let mut write = grid.rows();
        for row in (0..grid.rows()).rev() {
            let Some(gem) = grid.get(row, col)? else {
                continue;
            };
            write -= 1;
            if write != row {
                grid.set(write, col, Some(gem))?;
                grid.set(row, col, None)?;
                drops.push(GemDrop {
                    col,
                    from_row: row,
                    to_row: write,
                });
            }
        }
    }
    Ok(drops)
}

/// Fill every empty cell with a constrained draw, bottom-up within each column
pub fn refill(grid: &mut Grid, rng: &mut GemRng, params: GenerationParams) -> Result<Vec<GemSpawn>> {
    let mut spawned = Vec::new();
    for col in 0..grid.cols() {
        for row in (0..grid.rows()).rev() {
            if grid.get(row, col)?.is_some() {
                continue;
            }
            let position = Position::new(row, col);
            let draw = draw_gem(grid, position, rng, params);
            grid.set(row, col, Some(draw.gem))?;
            trace!("spawned gem {} at ({row}, {col})", draw.gem.0);
            spawned.push(GemSpawn {
                position,
                gem: draw.gem,
            });
        }
    }
    Ok(spawned)
}
