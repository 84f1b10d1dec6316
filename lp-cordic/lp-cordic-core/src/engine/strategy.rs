//! Per-mode decision rules and recurrences.
//!
//! A [`Strategy`] answers two questions for one (coordinate, operation) pair:
//! which way to turn given the current state, and how a micro-rotation updates
//! the state. The dispatcher hands the engine a `&'static dyn Strategy` so the
//! iteration loop never branches on mode.

use super::{CordicState, Datapath, Direction};
use crate::dispatch::{Coordinate, Mode, Operation};
use crate::tables::MicroStep;

pub trait Strategy: Sync {
    fn mode(&self) -> Mode;

    fn direction(&self, state: &CordicState) -> Direction;

    fn rotate(
        &self,
        state: CordicState,
        step: &MicroStep,
        direction: Direction,
        datapath: &Datapath,
    ) -> CordicState;
}

/// Shift-add recurrence of one coordinate system.
pub trait Recurrence: Sync {
    const COORDINATE: Coordinate;

    fn rotate(
        &self,
        state: CordicState,
        step: &MicroStep,
        d: Direction,
        datapath: &Datapath,
    ) -> CordicState;

    /// Vectoring drives y to zero.
    fn vectoring_direction(&self, state: &CordicState) -> Direction {
        if state.y >= 0 {
            Direction::Negative
        } else {
            Direction::Positive
        }
    }
}

pub struct Circular;
pub struct Linear;
pub struct Hyperbolic;

impl Recurrence for Circular {
    const COORDINATE: Coordinate = Coordinate::Circular;

    fn rotate(
        &self,
        s: CordicState,
        step: &MicroStep,
        d: Direction,
        dp: &Datapath,
    ) -> CordicState {
        let xs = dp.shift(s.x, step.shift);
        let ys = dp.shift(s.y, step.shift);
        CordicState {
            x: dp.wrap(i64::from(s.x) - d.apply(ys)),
            y: dp.wrap(i64::from(s.y) + d.apply(xs)),
            z: dp.wrap(i64::from(s.z) - d.apply(i64::from(step.value))),
        }
    }
}

impl Recurrence for Linear {
    const COORDINATE: Coordinate = Coordinate::Linear;

    fn rotate(
        &self,
        s: CordicState,
        step: &MicroStep,
        d: Direction,
        dp: &Datapath,
    ) -> CordicState {
        let xs = dp.shift(s.x, step.shift);
        CordicState {
            x: s.x,
            y: dp.wrap(i64::from(s.y) + d.apply(xs)),
            z: dp.wrap(i64::from(s.z) - d.apply(i64::from(step.value))),
        }
    }

    /// Drive y towards zero relative to the sign of the divisor in x.
    fn vectoring_direction(&self, state: &CordicState) -> Direction {
        if (state.y >= 0) == (state.x >= 0) {
            Direction::Negative
        } else {
            Direction::Positive
        }
    }
}

impl Recurrence for Hyperbolic {
    const COORDINATE: Coordinate = Coordinate::Hyperbolic;

    fn rotate(
        &self,
        s: CordicState,
        step: &MicroStep,
        d: Direction,
        dp: &Datapath,
    ) -> CordicState {
        let xs = dp.shift(s.x, step.shift);
        let ys = dp.shift(s.y, step.shift);
        CordicState {
            x: dp.wrap(i64::from(s.x) + d.apply(ys)),
            y: dp.wrap(i64::from(s.y) + d.apply(xs)),
            z: dp.wrap(i64::from(s.z) - d.apply(i64::from(step.value))),
        }
    }
}

/// Drives z to zero.
pub struct Rotating<R>(R);

/// Drives y to zero.
pub struct Vectoring<R>(R);

impl<R: Recurrence> Strategy for Rotating<R> {
    fn mode(&self) -> Mode {
        Mode::new(R::COORDINATE, Operation::Rotation)
    }

    fn direction(&self, state: &CordicState) -> Direction {
        if state.z >= 0 {
            Direction::Positive
        } else {
            Direction::Negative
        }
    }

    fn rotate(
        &self,
        state: CordicState,
        step: &MicroStep,
        direction: Direction,
        datapath: &Datapath,
    ) -> CordicState {
        self.0.rotate(state, step, direction, datapath)
    }
}

impl<R: Recurrence> Strategy for Vectoring<R> {
    fn mode(&self) -> Mode {
        Mode::new(R::COORDINATE, Operation::Vectoring)
    }

    fn direction(&self, state: &CordicState) -> Direction {
        self.0.vectoring_direction(state)
    }

    fn rotate(
        &self,
        state: CordicState,
        step: &MicroStep,
        direction: Direction,
        datapath: &Datapath,
    ) -> CordicState {
        self.0.rotate(state, step, direction, datapath)
    }
}

static CIRCULAR_ROTATION: Rotating<Circular> = Rotating(Circular);
static CIRCULAR_VECTORING: Vectoring<Circular> = Vectoring(Circular);
static LINEAR_ROTATION: Rotating<Linear> = Rotating(Linear);
static LINEAR_VECTORING: Vectoring<Linear> = Vectoring(Linear);
static HYPERBOLIC_ROTATION: Rotating<Hyperbolic> = Rotating(Hyperbolic);
static HYPERBOLIC_VECTORING: Vectoring<Hyperbolic> = Vectoring(Hyperbolic);

/// The strategy driving `mode`.
pub fn strategy_for(mode: Mode) -> &'static dyn Strategy {
    match (mode.coordinate, mode.operation) {
        (Coordinate::Circular, Operation::Rotation) => &CIRCULAR_ROTATION,
        (Coordinate::Circular, Operation::Vectoring) => &CIRCULAR_VECTORING,
        (Coordinate::Linear, Operation::Rotation) => &LINEAR_ROTATION,
        (Coordinate::Linear, Operation::Vectoring) => &LINEAR_VECTORING,
        (Coordinate::Hyperbolic, Operation::Rotation) => &HYPERBOLIC_ROTATION,
        (Coordinate::Hyperbolic, Operation::Vectoring) => &HYPERBOLIC_VECTORING,
    }
}
