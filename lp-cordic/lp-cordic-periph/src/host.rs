//! Host-side driver.
//!
//! Drives any [`RegisterBus`] + [`Clocked`] target the way a bus master does:
//! write the operand registers, pulse start through the config byte, clock
//! until STATUS reads DONE, then read both outputs back.

use lp_cordic_core::{Coordinate, FixedFormat, Mode, Operation, Outputs, fixed::sign_extend};

use crate::bus::{AccessWidth, Clocked, RegisterBus};
use crate::config::PeripheralConfig;
use crate::control::Status;
use crate::error::PeripheralError;
use crate::protocol::ConfigWord;
use crate::regs::{DATA_WIDTH, ID_CONFIG, OPERAND1, OPERAND2, OUTPUT1, OUTPUT2, SCALE, STATUS};

/// Longest schedule any supported configuration produces, plus slack.
pub const DEFAULT_TIMEOUT_TICKS: usize = 64;

/// Result of a vectoring run, with the growth factor removed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vectored {
    pub magnitude: f64,
    pub angle: f64,
}

pub struct HostDriver<'a, P> {
    target: &'a mut P,
    config: PeripheralConfig,
    /// Growth factors of the target's schedules, for vectoring compensation.
    gains: Option<(f64, f64)>,
    timeout_ticks: usize,
}

impl<'a, P: RegisterBus + Clocked> HostDriver<'a, P> {
    pub fn new(target: &'a mut P, config: PeripheralConfig) -> Self {
        Self {
            target,
            config,
            gains: None,
            timeout_ticks: DEFAULT_TIMEOUT_TICKS,
        }
    }

    pub fn with_timeout(mut self, ticks: usize) -> Self {
        self.timeout_ticks = ticks;
        self
    }

    /// Circular and hyperbolic growth factors used by [`HostDriver::vector`].
    pub fn with_gains(mut self, circular: f64, hyperbolic: f64) -> Self {
        self.gains = Some((circular, hyperbolic));
        self
    }

    pub fn read_id(&mut self) -> Result<u32, PeripheralError> {
        self.target.read(ID_CONFIG, AccessWidth::Word)
    }

    pub fn status(&mut self) -> Result<Option<Status>, PeripheralError> {
        let code = self.target.read(STATUS, AccessWidth::Byte)?;
        Ok(Status::from_code(code as u8))
    }

    /// Run one computation on raw operands and return the raw outputs.
    pub fn run(
        &mut self,
        mode: Mode,
        op1: i32,
        op2: i32,
        scale: u8,
    ) -> Result<Outputs, PeripheralError> {
        // A start pulse while BUSY is ignored, so polling would pick up the old run.
        if self.status()? == Some(Status::Busy) {
            return Err(PeripheralError::Busy);
        }
        let mask = (1u32 << DATA_WIDTH) - 1;
        self.target.write(OPERAND1, AccessWidth::Half, op1 as u32 & mask)?;
        self.target.write(OPERAND2, AccessWidth::Half, op2 as u32 & mask)?;
        self.target.write(SCALE, AccessWidth::Byte, u32::from(scale))?;

        let config = self.config.layout.encode(ConfigWord::new(mode, true));
        self.target.write(ID_CONFIG, AccessWidth::Byte, u32::from(config))?;
        if self.status()? != Some(Status::Busy) {
            return Err(PeripheralError::StartRejected);
        }

        let mut ticks = 0;
        loop {
            if ticks == self.timeout_ticks {
                return Err(PeripheralError::Timeout { ticks });
            }
            self.target.clock();
            ticks += 1;
            if self.status()? == Some(Status::Done) {
                break;
            }
        }
        log::debug!("cordic {mode} finished after {ticks} ticks");

        let out1 = self.target.read(OUTPUT1, AccessWidth::Half)?;
        let out2 = self.target.read(OUTPUT2, AccessWidth::Half)?;
        Ok(Outputs {
            out1: sign_extend(out1, DATA_WIDTH),
            out2: sign_extend(out2, DATA_WIDTH),
        })
    }

    /// (sin, cos) of an angle in radians.
    pub fn sin_cos(&mut self, angle: f64) -> Result<(f64, f64), PeripheralError> {
        let engine = self.config.engine;
        let mode = Mode::new(Coordinate::Circular, Operation::Rotation);
        let out = self.run(mode, engine.angle_format.encode(angle), 0, 0)?;
        Ok((
            engine.value_format.decode(out.out2),
            engine.value_format.decode(out.out1),
        ))
    }

    /// (sinh, cosh) of `x`.
    pub fn sinh_cosh(&mut self, x: f64) -> Result<(f64, f64), PeripheralError> {
        let engine = self.config.engine;
        let mode = Mode::new(Coordinate::Hyperbolic, Operation::Rotation);
        let out = self.run(mode, engine.angle_format.encode(x), 0, 0)?;
        Ok((
            engine.value_format.decode(out.out2),
            engine.value_format.decode(out.out1),
        ))
    }

    /// `a * b`. `a` and the product are in `format`; `b` sits in z at the
    /// radix position from [`linear_z_format`].
    pub fn multiply(
        &mut self,
        a: f64,
        b: f64,
        format: FixedFormat,
    ) -> Result<f64, PeripheralError> {
        let mode = Mode::new(Coordinate::Linear, Operation::Rotation);
        let z_format = linear_z_format(format);
        let out = self.run(
            mode,
            format.encode(a),
            z_format.encode(b),
            z_format.fractional_bits(),
        )?;
        Ok(format.decode(out.out2))
    }

    /// `dividend / divisor`. Operands are in `format`; the quotient comes back
    /// from z at the radix position from [`linear_z_format`].
    pub fn divide(
        &mut self,
        dividend: f64,
        divisor: f64,
        format: FixedFormat,
    ) -> Result<f64, PeripheralError> {
        let mode = Mode::new(Coordinate::Linear, Operation::Vectoring);
        let z_format = linear_z_format(format);
        let out = self.run(
            mode,
            format.encode(divisor),
            format.encode(dividend),
            z_format.fractional_bits(),
        )?;
        Ok(z_format.decode(out.out2))
    }

    /// Magnitude and angle of (x, y) in `format`. The magnitude is divided by
    /// the schedule's growth factor when gains were supplied.
    ///
    /// Linear vectoring is a division; use [`HostDriver::divide`].
    pub fn vector(
        &mut self,
        coordinate: Coordinate,
        x: f64,
        y: f64,
        format: FixedFormat,
    ) -> Result<Vectored, PeripheralError> {
        let mode = Mode::new(coordinate, Operation::Vectoring);
        if coordinate == Coordinate::Linear {
            return Err(PeripheralError::UnsupportedMode(mode));
        }
        let out = self.run(mode, format.encode(x), format.encode(y), 0)?;
        let gain = match (coordinate, self.gains) {
            (Coordinate::Circular, Some((circular, _))) => circular,
            (Coordinate::Hyperbolic, Some((_, hyperbolic))) => hyperbolic,
            _ => 1.0,
        };
        Ok(Vectored {
            magnitude: format.decode(out.out1) / gain,
            angle: self.config.engine.angle_format.decode(out.out2),
        })
    }
}

/// Format of z for linear runs over `format`: the operand's fractional bits,
/// capped at `width - 3` so the schedule's 2^1 opening step still fits.
pub fn linear_z_format(format: FixedFormat) -> FixedFormat {
    let position = format.fractional_bits().min(format.width.saturating_sub(3));
    FixedFormat::new(format.width, format.width - position)
}
