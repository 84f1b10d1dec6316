//! Compute command handler
//!
//! Encodes the operands, runs them through the peripheral's register file and
//! decodes the two outputs according to the mode.

use anyhow::{Context, Result};
use lp_cordic_core::{Coordinate, FixedFormat, LogLevel, Mode, Operation, Outputs};
use lp_cordic_periph::{
    CordicPeripheral, HostDriver, PeripheralConfig, PeripheralLog, linear_z_format,
};
use serde::Serialize;

use super::args::ComputeArgs;
use crate::config::apply_overrides;
use crate::messages;

#[derive(Debug, Clone, Serialize)]
pub struct ComputeReport {
    pub mode: Mode,
    pub layout: &'static str,
    pub latency: usize,
    pub raw: Outputs,
    pub out1_label: &'static str,
    pub out1: f64,
    pub out2_label: &'static str,
    pub out2: f64,
    /// Vectoring magnitude with the schedule's growth removed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub magnitude: Option<f64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub trace: Vec<PeripheralLog>,
}

fn labels(mode: Mode) -> (&'static str, &'static str) {
    match (mode.coordinate, mode.operation) {
        (Coordinate::Circular, Operation::Rotation) => ("cos", "sin"),
        (Coordinate::Circular, Operation::Vectoring) => ("Kc*magnitude", "atan(y/x)"),
        (Coordinate::Linear, Operation::Rotation) => ("a", "a*b"),
        (Coordinate::Linear, Operation::Vectoring) => ("residual", "b/a"),
        (Coordinate::Hyperbolic, Operation::Rotation) => ("cosh", "sinh"),
        (Coordinate::Hyperbolic, Operation::Vectoring) => ("Kh*magnitude", "atanh(y/x)"),
    }
}

/// Run the computation and build a report without printing anything.
pub fn run_compute(args: &ComputeArgs, config: PeripheralConfig) -> Result<ComputeReport> {
    let config = apply_overrides(config, &args.engine)?;
    let engine = config.engine;
    let mode = Mode::new(args.coordinate.into(), args.operation.into());

    let format = args.format.unwrap_or(engine.value_format);
    if format.width != engine.width() {
        anyhow::bail!(
            "Operand format {format} does not match the {}-bit datapath",
            engine.width()
        );
    }
    let scale = args
        .scale
        .unwrap_or_else(|| linear_z_format(format).fractional_bits());
    let z_format = engine
        .width()
        .checked_sub(scale)
        .and_then(|integer_bits| FixedFormat::try_new(engine.width(), integer_bits).ok())
        .with_context(|| format!("Scale {scale} does not fit the datapath"))?;

    // (op1, op2, scale register, out1 format, out2 format)
    let (op1, op2, scale, out1_format, out2_format) = match (mode.coordinate, mode.operation) {
        (Coordinate::Linear, Operation::Rotation) => (
            format.encode(args.op1),
            z_format.encode(args.op2),
            scale,
            format,
            format,
        ),
        (Coordinate::Linear, Operation::Vectoring) => (
            format.encode(args.op1),
            format.encode(args.op2),
            scale,
            format,
            z_format,
        ),
        (_, Operation::Rotation) => (
            engine.angle_format.encode(args.op1),
            0,
            0,
            engine.value_format,
            engine.value_format,
        ),
        (_, Operation::Vectoring) => (
            format.encode(args.op1),
            format.encode(args.op2),
            0,
            format,
            engine.angle_format,
        ),
    };

    let level = if args.trace {
        LogLevel::Iterations
    } else {
        LogLevel::Errors
    };
    let mut peripheral = CordicPeripheral::new(config)
        .context("Failed to create peripheral")?
        .with_log_level(level);
    let latency = peripheral.dispatcher().latency(mode, scale)?;
    let compensation = peripheral.dispatcher().compensation(mode.coordinate);

    let raw = HostDriver::new(&mut peripheral, config)
        .run(mode, op1, op2, scale)
        .with_context(|| format!("{mode} did not complete"))?;
    let trace = if args.trace {
        peripheral.take_logs()
    } else {
        Vec::new()
    };

    let out1 = out1_format.decode(raw.out1);
    let magnitude = match (mode.coordinate, mode.operation) {
        (Coordinate::Linear, _) | (_, Operation::Rotation) => None,
        (_, Operation::Vectoring) => Some(out1 * compensation),
    };
    let (out1_label, out2_label) = labels(mode);

    Ok(ComputeReport {
        mode,
        layout: config.layout.name(),
        latency,
        raw,
        out1_label,
        out1,
        out2_label,
        out2: out2_format.decode(raw.out2),
        magnitude,
        trace,
    })
}

/// Handle the compute command
pub fn handle_compute(args: ComputeArgs, config: PeripheralConfig) -> Result<()> {
    let report = run_compute(&args, config)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    for entry in &report.trace {
        println!("{entry}");
    }
    let width = config.engine.width();
    println!(
        "  out1 {:<13} = {:>12.6}  ({})",
        report.out1_label,
        report.out1,
        messages::format_register(report.raw.out1, width)
    );
    println!(
        "  out2 {:<13} = {:>12.6}  ({})",
        report.out2_label,
        report.out2,
        messages::format_register(report.raw.out2, width)
    );
    if let Some(magnitude) = report.magnitude {
        println!("  {:<18} = {magnitude:>12.6}", "magnitude");
    }
    messages::print_success(
        &format!(
            "{} done in {} ticks (layout {})",
            report.mode, report.latency, report.layout
        ),
        &[],
    );
    Ok(())
}
