use crate::cli::{CoordinateArg, EngineOverrides};

#[derive(Debug, Clone, clap::Args)]
pub struct TablesArgs {
    /// Only print this coordinate's table
    #[arg(value_enum)]
    pub coordinate: Option<CoordinateArg>,

    /// Linear radix position; defaults to the value format's fractional bits,
    /// capped at width - 3
    #[arg(long)]
    pub scale: Option<u8>,

    /// Emit JSON instead of text
    #[arg(long)]
    pub json: bool,

    #[command(flatten)]
    pub engine: EngineOverrides,
}
