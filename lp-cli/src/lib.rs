//! lp-cordic CLI library.
//!
//! This library exposes the CLI functionality for use in tests and as a library.
//! It provides:
//! - Argument definitions for the `compute` and `tables` commands
//! - JSON peripheral config loading with command line overrides
//! - Command handlers that drive the peripheral through its registers

pub mod cli;
pub mod commands;
pub mod config;
pub mod messages;

pub use commands::{compute, tables};
