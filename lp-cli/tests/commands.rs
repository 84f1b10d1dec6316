//! Command handlers driven end to end through the peripheral registers.

use lp_cordic_cli::cli::{CoordinateArg, EngineOverrides, OperationArg};
use lp_cordic_cli::compute::{ComputeArgs, run_compute};
use lp_cordic_cli::config::parse_format;
use lp_cordic_cli::tables::{TablesArgs, build_tables};
use lp_cordic_core::Coordinate;
use lp_cordic_periph::PeripheralConfig;

fn compute_args(
    coordinate: CoordinateArg,
    operation: OperationArg,
    op1: f64,
    op2: f64,
) -> ComputeArgs {
    ComputeArgs {
        coordinate,
        operation,
        op1,
        op2,
        format: None,
        scale: None,
        trace: false,
        json: false,
        engine: EngineOverrides::default(),
    }
}

fn assert_close(actual: f64, expected: f64, tol: f64) {
    assert!(
        (actual - expected).abs() < tol,
        "expected {expected}, got {actual} (tol {tol})"
    );
}

#[test_log::test]
fn test_compute_sin_cos() {
    let args = compute_args(CoordinateArg::Circular, OperationArg::Rotation, 0.5, 0.0);

    let report = run_compute(&args, PeripheralConfig::default()).unwrap();

    assert_eq!(report.latency, 14);
    assert_eq!(report.out1_label, "cos");
    assert_close(report.out1, 0.5f64.cos(), 2e-3);
    assert_close(report.out2, 0.5f64.sin(), 2e-3);
    assert!(report.magnitude.is_none());
    assert!(report.trace.is_empty());
}

#[test_log::test]
fn test_compute_multiply_and_divide() {
    // ---- Arrange
    let mut multiply = compute_args(CoordinateArg::Linear, OperationArg::Rotation, 1.5, 0.75);
    multiply.format = Some(parse_format("Q5.11").unwrap());
    let mut divide = compute_args(CoordinateArg::Linear, OperationArg::Vectoring, 2.0, 1.0);
    divide.format = Some(parse_format("Q5.11").unwrap());

    // ---- Act
    let product = run_compute(&multiply, PeripheralConfig::default()).unwrap();
    let quotient = run_compute(&divide, PeripheralConfig::default()).unwrap();

    // ---- Assert
    assert_close(product.out2, 1.125, 1e-2);
    assert_close(quotient.out2, 0.5, 1e-2);
}

#[test_log::test]
fn test_compute_default_format_caps_scale() {
    // Q2.14 has 14 fractional bits, one more than a 16-bit linear schedule allows.
    let args = compute_args(CoordinateArg::Linear, OperationArg::Rotation, 0.5, 0.5);

    let report = run_compute(&args, PeripheralConfig::default()).unwrap();

    assert_close(report.out2, 0.25, 1e-2);
}

#[test_log::test]
fn test_compute_vectoring_magnitude() {
    let mut args = compute_args(CoordinateArg::Circular, OperationArg::Vectoring, 3.0, 4.0);
    args.format = Some(parse_format("Q5.11").unwrap());

    let report = run_compute(&args, PeripheralConfig::default()).unwrap();

    assert_close(report.magnitude.unwrap(), 5.0, 2e-2);
    assert_close(report.out2, (4.0f64).atan2(3.0), 2e-3);
}

#[test_log::test]
fn test_compute_trace_and_json() {
    let mut args = compute_args(CoordinateArg::Hyperbolic, OperationArg::Rotation, 0.5, 0.0);
    args.trace = true;

    let report = run_compute(&args, PeripheralConfig::default()).unwrap();
    assert!(report.trace.len() >= report.latency);

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["mode"]["coordinate"], "hyperbolic");
    assert_eq!(json["layout"], "v2");
    assert!(json["trace"].is_array());
    assert!(json.get("magnitude").is_none());
}

#[test_log::test]
fn test_compute_rejects_mismatched_format() {
    let mut args = compute_args(CoordinateArg::Linear, OperationArg::Rotation, 1.0, 1.0);
    args.format = Some(parse_format("Q8.16").unwrap());

    assert!(run_compute(&args, PeripheralConfig::default()).is_err());
}

#[test_log::test]
fn test_tables() {
    // ---- Arrange
    let args = TablesArgs {
        coordinate: None,
        scale: None,
        json: false,
        engine: EngineOverrides::default(),
    };

    // ---- Act
    let reports = build_tables(&args, PeripheralConfig::default()).unwrap();

    // ---- Assert
    assert_eq!(reports.len(), 3);
    let circular = &reports[0];
    assert_eq!(circular.coordinate, Coordinate::Circular);
    assert_eq!(circular.rows.len(), 14);
    assert_close(circular.rows[0].value, std::f64::consts::FRAC_PI_4, 1e-3);
    assert_close(circular.gain, 1.646760, 1e-4);

    let linear = &reports[1];
    assert_eq!(linear.rows[0].value, 2.0);
    assert_eq!(linear.rows[1].value, 1.0);

    let hyperbolic = &reports[2];
    let indices: Vec<u8> = hyperbolic.rows.iter().map(|row| row.index).collect();
    assert_eq!(&indices[..5], &[1, 2, 3, 4, 4]);
}
