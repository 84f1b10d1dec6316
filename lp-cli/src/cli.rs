use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use lp_cordic_core::{Coordinate, Operation, ShiftRounding};
use lp_cordic_periph::ConfigLayout;

use crate::commands::compute::args::ComputeArgs;
use crate::commands::tables::args::TablesArgs;

#[derive(Parser)]
#[command(name = "lp-cordic")]
#[command(version, about = "Drive the fixed-point CORDIC peripheral model")]
pub struct Cli {
    /// Peripheral config (JSON)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// More log output (-v info, -vv debug, -vvv trace); RUST_LOG wins when set
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run one computation through the register interface
    Compute(ComputeArgs),
    /// Print elementary value tables and gains
    Tables(TablesArgs),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CoordinateArg {
    Circular,
    Linear,
    Hyperbolic,
}

impl From<CoordinateArg> for Coordinate {
    fn from(arg: CoordinateArg) -> Self {
        match arg {
            CoordinateArg::Circular => Coordinate::Circular,
            CoordinateArg::Linear => Coordinate::Linear,
            CoordinateArg::Hyperbolic => Coordinate::Hyperbolic,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OperationArg {
    Rotation,
    Vectoring,
}

impl From<OperationArg> for Operation {
    fn from(arg: OperationArg) -> Self {
        match arg {
            OperationArg::Rotation => Operation::Rotation,
            OperationArg::Vectoring => Operation::Vectoring,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LayoutArg {
    V1,
    V2,
}

impl From<LayoutArg> for ConfigLayout {
    fn from(arg: LayoutArg) -> Self {
        match arg {
            LayoutArg::V1 => ConfigLayout::V1,
            LayoutArg::V2 => ConfigLayout::V2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RoundingArg {
    Truncate,
    Nearest,
}

impl From<RoundingArg> for ShiftRounding {
    fn from(arg: RoundingArg) -> Self {
        match arg {
            RoundingArg::Truncate => ShiftRounding::Truncate,
            RoundingArg::Nearest => ShiftRounding::Nearest,
        }
    }
}

/// Engine overrides shared by every command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct EngineOverrides {
    /// Distinct table indices per run
    #[arg(long)]
    pub iterations: Option<u8>,

    /// Config byte revision
    #[arg(long, value_enum)]
    pub layout: Option<LayoutArg>,

    /// Right-shift rounding
    #[arg(long, value_enum)]
    pub rounding: Option<RoundingArg>,
}
