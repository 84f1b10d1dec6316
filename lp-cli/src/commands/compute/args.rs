use lp_cordic_core::FixedFormat;

use crate::cli::{CoordinateArg, EngineOverrides, OperationArg};
use crate::config::format_value_parser;

#[derive(Debug, Clone, clap::Args)]
pub struct ComputeArgs {
    /// Coordinate system
    #[arg(value_enum)]
    pub coordinate: CoordinateArg,

    /// Drive z (rotation) or y (vectoring) to zero
    #[arg(value_enum)]
    pub operation: OperationArg,

    /// Operand 1: angle, x, or the linear A (multiplicand / divisor)
    #[arg(allow_hyphen_values = true)]
    pub op1: f64,

    /// Operand 2: y, or the linear B (multiplier / dividend)
    #[arg(allow_hyphen_values = true, default_value_t = 0.0)]
    pub op2: f64,

    /// Operand format for linear and vectoring modes, e.g. Q5.11
    #[arg(long, value_parser = format_value_parser)]
    pub format: Option<FixedFormat>,

    /// Linear radix position; defaults to the operand format's fractional bits,
    /// capped at width - 3
    #[arg(long)]
    pub scale: Option<u8>,

    /// Print every micro-rotation
    #[arg(long)]
    pub trace: bool,

    /// Emit a JSON report instead of text
    #[arg(long)]
    pub json: bool,

    #[command(flatten)]
    pub engine: EngineOverrides,
}
