//! Particle spawning and settling.
//!
//! Each [`Settler::step`] spawns one particle under the inlet and moves it one
//! row at a time until the landing rule finds nowhere left to go.

use crate::cell::Cell;
use crate::error::GridError;
use crate::{Grid, Pos};

/// Horizontal offsets tried one row down, in priority order:
/// straight, right diagonal, left diagonal.
const FALL_ORDER: [i32; 3] = [0, 1, -1];

/// The cell a particle at `from` would drop into, if any.
///
/// Only Air can be entered. Neighbours are bounds-checked before they are
/// read, so a particle on an edge column never probes outside the grid.
///
/// # Errors
///
/// [`GridError::OutOfBounds`] if `from` is not on the grid.
pub fn find_landing(grid: &Grid, from: Pos) -> Result<Option<Pos>, GridError> {
    grid.cell_at(from.x, from.y)?;
    let y = from.y - 1;
    if y < 0 {
        return Ok(None);
    }
    Ok(FALL_ORDER
        .iter()
        .filter_map(|&dx| from.x.checked_add(dx).map(|x| Pos::new(x, y)))
        .find(|to| grid.in_bounds(to.x, to.y) && grid.cell_at(to.x, to.y) == Ok(Cell::Air)))
}

/// Lifecycle of the particle handled by one step.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum Particle {
    Spawning,
    Falling(Pos),
    Settled(Pos),
    Rejected,
}

/// Drops particles into a borrowed grid, one per [`Settler::step`].
#[derive(Debug)]
pub struct Settler<'a> {
    grid: &'a mut Grid,
    placed: usize,
}

impl<'a> Settler<'a> {
    pub fn new(grid: &'a mut Grid) -> Self {
        Self { grid, placed: 0 }
    }

    /// Particles placed by this settler so far.
    #[must_use]
    pub fn placed(&self) -> usize {
        self.placed
    }

    #[must_use]
    pub fn grid(&self) -> &Grid {
        self.grid
    }

    /// Spawns one particle and lets it fall until it rests.
    ///
    /// Returns `false` when nothing could be placed under the inlet. The
    /// particle is fully settled before this returns.
    pub fn step(&mut self) -> bool {
        let mut particle = Particle::Spawning;
        loop {
            particle = match particle {
                Particle::Spawning => self.spawn(),
                Particle::Falling(at) => self.fall(at),
                Particle::Settled(at) => {
                    self.placed += 1;
                    log::trace!("particle {} settled at {at}", self.placed);
                    return true;
                }
                Particle::Rejected => return false,
            };
        }
    }

    fn spawn(&mut self) -> Particle {
        let Some(inlet) = self.grid.inlet() else {
            log::warn!("step on a grid without an inlet");
            return Particle::Rejected;
        };
        let at = match find_landing(self.grid, inlet) {
            Ok(Some(at)) => at,
            Ok(None) => {
                log::debug!("no room under inlet {inlet}");
                return Particle::Rejected;
            }
            Err(err) => {
                log::error!("inlet {inlet} is unusable: {err}");
                return Particle::Rejected;
            }
        };
        match self.grid.place_sand(at) {
            Ok(()) => Particle::Falling(at),
            Err(err) => {
                log::error!("could not spawn at {at}: {err}");
                Particle::Rejected
            }
        }
    }

    fn fall(&mut self, at: Pos) -> Particle {
        let next = match find_landing(self.grid, at) {
            Ok(Some(next)) => next,
            Ok(None) => return Particle::Settled(at),
            Err(err) => {
                log::error!("particle left the grid at {at}: {err}");
                return Particle::Settled(at);
            }
        };
        match self.grid.swap(at, next) {
            Ok(()) => {
                log::trace!("{at} -> {next}");
                Particle::Falling(next)
            }
            Err(err) => {
                log::error!("could not move {at} -> {next}: {err}");
                Particle::Settled(at)
            }
        }
    }
}

/// Why a [`run`] ended.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum StopReason {
    /// A step could not place its particle.
    Saturated,
    /// The step budget ran out first.
    BudgetExhausted,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct RunSummary {
    pub placed: usize,
    pub stop: StopReason,
}

/// Steps until a particle cannot be placed, or until `budget` steps have run.
pub fn run(grid: &mut Grid, budget: Option<usize>) -> RunSummary {
    let mut settler = Settler::new(grid);
    let stop = loop {
        if budget.is_some_and(|limit| settler.placed() >= limit) {
            break StopReason::BudgetExhausted;
        }
        if !settler.step() {
            break StopReason::Saturated;
        }
    };
    let summary = RunSummary {
        placed: settler.placed(),
        stop,
    };
    log::info!("placed {} particles ({:?})", summary.placed, summary.stop);
    summary
}
