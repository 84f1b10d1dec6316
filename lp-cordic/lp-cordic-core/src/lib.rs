//! Fixed-point CORDIC compute core.
//!
//! This crate provides the datapath side of the CORDIC peripheral:
//! - Qm.f fixed-point codec with saturating, ties-to-even encoding
//! - Elementary value tables and micro-rotation schedules for circular,
//!   linear and hyperbolic coordinates
//! - A tick-driven iteration engine with per-mode strategies
//! - Mode dispatch (seeds, schedules, output assignment)
//!
//! Everything is `no_std` + `alloc`; enable `std` for `std::error::Error`.

#![no_std]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

pub mod config;
pub mod dispatch;
pub mod engine;
pub mod error;
pub mod fixed;
pub mod tables;

pub use config::EngineConfig;
pub use dispatch::{Coordinate, Dispatcher, Mode, Operands, Operation, Outputs};
pub use engine::logging::{IterationLog, LogLevel, LoggingDisabled, LoggingEnabled, LoggingMode};
pub use engine::{CordicState, Datapath, Direction, Engine, ShiftRounding, StepResult};
pub use error::CordicError;
pub use fixed::{FixedFormat, Q2_14, Q5_11, Q7_9};
pub use tables::{MicroStep, Schedule, hyperbolic_repeats};
