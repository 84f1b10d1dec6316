//! Logging infrastructure for the iteration engine.

use core::fmt;

use serde::Serialize;

use super::{CordicState, Direction};

/// Logging verbosity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize)]
pub enum LogLevel {
    /// No logging.
    #[default]
    None,
    /// Only log rejected or ignored requests.
    Errors,
    /// Log each micro-rotation plus run start/completion.
    Iterations,
    /// Everything, including register accesses.
    Verbose,
}

/// Compile-time switch for per-step capture.
pub trait LoggingMode {
    const ENABLED: bool;
}

pub struct LoggingEnabled;
pub struct LoggingDisabled;

impl LoggingMode for LoggingEnabled {
    const ENABLED: bool = true;
}

impl LoggingMode for LoggingDisabled {
    const ENABLED: bool = false;
}

/// Log entry for a single micro-rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IterationLog {
    /// Position in the schedule, from zero.
    pub step: usize,
    pub index: u8,
    pub shift: i8,
    pub direction: Direction,
    pub before: CordicState,
    pub after: CordicState,
}

impl fmt::Display for IterationLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = match self.direction {
            Direction::Positive => '+',
            Direction::Negative => '-',
        };
        write!(
            f,
            "#{:<2} i={:<2} d={sign} x={:>7} y={:>7} z={:>7} -> x={:>7} y={:>7} z={:>7}",
            self.step,
            self.index,
            self.before.x,
            self.before.y,
            self.before.z,
            self.after.x,
            self.after.y,
            self.after.z,
        )
    }
}
