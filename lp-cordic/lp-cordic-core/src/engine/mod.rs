//! CORDIC iteration engine.
//!
//! The engine owns one run: the (x, y, z) state, the schedule being walked and
//! the strategy that picks directions and applies the recurrence. It advances
//! one micro-rotation per [`Engine::tick`] and never exits early, so a run
//! always takes exactly `schedule.len()` ticks.
//!
//! All arithmetic is on a `width`-bit two's-complement datapath. Shifted terms
//! are formed in 64 bits and every register update wraps back to `width` bits.

pub mod logging;
pub mod strategy;

use alloc::vec::Vec;

use serde::{Deserialize, Serialize};

use crate::dispatch::Mode;
use crate::fixed::sign_extend;
use crate::tables::Schedule;
use logging::{IterationLog, LoggingDisabled, LoggingMode};
use strategy::{Strategy, strategy_for};

/// Raw iteration registers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct CordicState {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl CordicState {
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }
}

/// Micro-rotation direction d.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Direction {
    Positive,
    Negative,
}

impl Direction {
    pub fn apply(self, value: i64) -> i64 {
        match self {
            Direction::Positive => value,
            Direction::Negative => -value,
        }
    }
}

/// How right shifts drop bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShiftRounding {
    /// Arithmetic shift, rounds towards negative infinity.
    Truncate,
    /// Add half an output LSB before shifting.
    #[default]
    Nearest,
}

/// Width and rounding rules of the shift-add datapath.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Datapath {
    pub width: u8,
    pub rounding: ShiftRounding,
}

impl Datapath {
    pub const fn new(width: u8, rounding: ShiftRounding) -> Self {
        Self { width, rounding }
    }

    /// `value >> shift`, or `value << -shift` for negative shifts.
    pub fn shift(&self, value: i32, shift: i8) -> i64 {
        let value = i64::from(value);
        if shift <= 0 {
            return value << shift.unsigned_abs();
        }
        let shift = u32::from(shift.unsigned_abs());
        match self.rounding {
            ShiftRounding::Truncate => value >> shift,
            ShiftRounding::Nearest => (value + (1i64 << (shift - 1))) >> shift,
        }
    }

    pub fn wrap(&self, value: i64) -> i32 {
        sign_extend(value as u32, self.width)
    }
}

/// Outcome of a single tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepResult {
    /// A micro-rotation ran and more remain.
    Continue,
    /// The final micro-rotation ran.
    Complete,
    /// The schedule was already exhausted.
    Idle,
}

pub struct Engine {
    mode: Mode,
    strategy: &'static dyn Strategy,
    schedule: Schedule,
    datapath: Datapath,
    state: CordicState,
    cursor: usize,
}

impl Engine {
    /// Seed a run. The schedule must belong to `mode`'s coordinate system.
    pub fn start(mode: Mode, schedule: Schedule, datapath: Datapath, seed: CordicState) -> Self {
        debug_assert_eq!(schedule.coordinate(), mode.coordinate);
        Self {
            mode,
            strategy: strategy_for(mode),
            schedule,
            datapath,
            state: seed,
            cursor: 0,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn state(&self) -> CordicState {
        self.state
    }

    pub fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    /// Total ticks this run takes.
    pub fn latency(&self) -> usize {
        self.schedule.len()
    }

    pub fn remaining(&self) -> usize {
        self.schedule.len() - self.cursor
    }

    pub fn is_finished(&self) -> bool {
        self.cursor >= self.schedule.len()
    }

    pub fn tick(&mut self) -> StepResult {
        self.tick_with::<LoggingDisabled>(&mut Vec::new())
    }

    /// Execute one micro-rotation, appending a record to `log` when `M` is enabled.
    pub fn tick_with<M: LoggingMode>(&mut self, log: &mut Vec<IterationLog>) -> StepResult {
        let Some(&step) = self.schedule.steps().get(self.cursor) else {
            return StepResult::Idle;
        };
        let before = self.state;
        let direction = self.strategy.direction(&before);
        let after = self
            .strategy
            .rotate(before, &step, direction, &self.datapath);

        log::trace!(
            "cordic step {} i={} {direction:?}: {before:?} -> {after:?}",
            self.cursor,
            step.index,
        );
        if M::ENABLED {
            log.push(IterationLog {
                step: self.cursor,
                index: step.index,
                shift: step.shift,
                direction,
                before,
                after,
            });
        }

        self.state = after;
        self.cursor += 1;
        if self.is_finished() {
            StepResult::Complete
        } else {
            StepResult::Continue
        }
    }

    /// Run the rest of the schedule and return the final state.
    pub fn run(&mut self) -> CordicState {
        while self.tick() != StepResult::Idle {}
        self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::{Coordinate, Operation};
    use crate::engine::logging::LoggingEnabled;
    use crate::fixed::Q2_14;

    #[test]
    fn test_shift_rounding() {
        let truncate = Datapath::new(16, ShiftRounding::Truncate);
        let nearest = Datapath::new(16, ShiftRounding::Nearest);
        assert_eq!(truncate.shift(7, 1), 3);
        assert_eq!(nearest.shift(7, 1), 4);
        assert_eq!(truncate.shift(-7, 1), -4);
        assert_eq!(nearest.shift(-7, 1), -3);
        assert_eq!(nearest.shift(5, 2), 1);
        assert_eq!(nearest.shift(6, 2), 2);
        assert_eq!(nearest.shift(5, 0), 5);
        assert_eq!(nearest.shift(5, -1), 10);
    }

    #[test]
    fn test_tick_counts_exactly_schedule_length() {
        let mode = Mode::new(Coordinate::Circular, Operation::Rotation);
        let schedule = Schedule::circular(14, Q2_14);
        let mut engine = Engine::start(
            mode,
            schedule,
            Datapath::new(16, ShiftRounding::Nearest),
            CordicState::new(9949, 0, 8579),
        );

        assert_eq!(engine.latency(), 14);
        let mut ticks = 0;
        loop {
            match engine.tick() {
                StepResult::Continue => ticks += 1,
                StepResult::Complete => {
                    ticks += 1;
                    break;
                }
                StepResult::Idle => panic!("went idle before completing"),
            }
        }
        assert_eq!(ticks, 14);
        assert!(engine.is_finished());
        assert_eq!(engine.tick(), StepResult::Idle);
    }

    #[test]
    fn test_logging_captures_every_step() {
        let mode = Mode::new(Coordinate::Hyperbolic, Operation::Vectoring);
        let schedule = Schedule::hyperbolic(14, Q2_14);
        let mut engine = Engine::start(
            mode,
            schedule,
            Datapath::new(16, ShiftRounding::Nearest),
            CordicState::new(8192, 4096, 0),
        );
        let mut log = Vec::new();
        while engine.tick_with::<LoggingEnabled>(&mut log) != StepResult::Idle {}

        assert_eq!(log.len(), 15);
        assert_eq!(log[0].before, CordicState::new(8192, 4096, 0));
        assert_eq!(log[14].after, engine.state());
        assert_eq!(log[3].index, log[4].index);
        for pair in log.windows(2) {
            assert_eq!(pair[0].after, pair[1].before);
        }
    }

    #[test]
    fn test_untraced_run_matches_traced_run() {
        let mode = Mode::new(Coordinate::Circular, Operation::Vectoring);
        let seed = CordicState::new(5000, -3000, 0);
        let datapath = Datapath::new(16, ShiftRounding::Nearest);

        let mut plain = Engine::start(mode, Schedule::circular(14, Q2_14), datapath, seed);
        let mut traced = Engine::start(mode, Schedule::circular(14, Q2_14), datapath, seed);
        let mut log = Vec::new();
        while traced.tick_with::<LoggingEnabled>(&mut log) != StepResult::Idle {}

        assert_eq!(plain.run(), traced.state());
    }
}
