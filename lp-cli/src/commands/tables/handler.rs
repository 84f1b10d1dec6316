//! Tables command handler

use anyhow::{Context, Result};
use lp_cordic_core::{Coordinate, Dispatcher, FixedFormat, Mode, Operation};
use lp_cordic_periph::{PeripheralConfig, linear_z_format};
use serde::Serialize;

use super::args::TablesArgs;
use crate::config::apply_overrides;
use crate::messages;

#[derive(Debug, Clone, Serialize)]
pub struct TableRow {
    pub index: u8,
    pub shift: i8,
    pub raw: i32,
    pub value: f64,
}

/// Schedule of one coordinate as the engine will execute it.
#[derive(Debug, Clone, Serialize)]
pub struct TableReport {
    pub coordinate: Coordinate,
    pub format: FixedFormat,
    pub gain: f64,
    pub compensation: f64,
    pub rows: Vec<TableRow>,
}

pub fn build_tables(args: &TablesArgs, config: PeripheralConfig) -> Result<Vec<TableReport>> {
    let config = apply_overrides(config, &args.engine)?;
    let engine = config.engine;
    let width = engine.width();
    let scale = args
        .scale
        .unwrap_or_else(|| linear_z_format(engine.value_format).fractional_bits());
    let dispatcher = Dispatcher::new(engine)?;

    let selected: Vec<Coordinate> = match args.coordinate {
        Some(coordinate) => vec![coordinate.into()],
        None => Coordinate::ALL.to_vec(),
    };

    let mut reports = Vec::with_capacity(selected.len());
    for coordinate in selected {
        let format = match coordinate {
            Coordinate::Linear => width
                .checked_sub(scale)
                .and_then(|integer_bits| FixedFormat::try_new(width, integer_bits).ok())
                .with_context(|| format!("Scale {scale} does not fit the datapath"))?,
            Coordinate::Circular | Coordinate::Hyperbolic => engine.angle_format,
        };
        let schedule = dispatcher.schedule(Mode::new(coordinate, Operation::Rotation), scale)?;
        let rows = schedule
            .steps()
            .iter()
            .map(|step| TableRow {
                index: step.index,
                shift: step.shift,
                raw: step.value,
                value: format.decode(step.value),
            })
            .collect();
        reports.push(TableReport {
            coordinate,
            format,
            gain: dispatcher.gain(coordinate),
            compensation: dispatcher.compensation(coordinate),
            rows,
        });
    }
    Ok(reports)
}

/// Handle the tables command
pub fn handle_tables(args: TablesArgs, config: PeripheralConfig) -> Result<()> {
    let reports = build_tables(&args, config)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
        return Ok(());
    }

    for report in &reports {
        println!(
            "{} ({}, {} steps, gain {:.6}, compensation {:.6})",
            report.coordinate.name(),
            report.format,
            report.rows.len(),
            report.gain,
            report.compensation
        );
        println!("  {:>5} {:>5} {:>10} {:>12}", "index", "shift", "raw", "value");
        for row in &report.rows {
            println!(
                "  {:>5} {:>5} {:>10} {:>12.6}",
                row.index,
                row.shift,
                messages::format_register(row.raw, report.format.width),
                row.value
            );
        }
        println!();
    }
    messages::print_success(&format!("{} table(s) printed", reports.len()), &[]);
    Ok(())
}
