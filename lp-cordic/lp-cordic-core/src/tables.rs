//! Elementary value tables and micro-rotation schedules.
//!
//! A [`Schedule`] is the ordered list of micro-rotations one run executes. Each
//! step carries the shift applied to the cross terms and the raw elementary
//! value accumulated into z. The schedule is the only place that knows about
//! skipped or repeated indices; the engine walks it blindly.
//!
//! Gains are computed from the steps actually emitted, so a truncated or
//! repeated schedule reports the growth it really produces.

use alloc::vec::Vec;

use serde::Serialize;

use crate::dispatch::Coordinate;
use crate::error::CordicError;
use crate::fixed::FixedFormat;

/// One micro-rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MicroStep {
    /// Table index i, as in 2^-i.
    pub index: u8,
    /// Right shift of the cross terms. Negative values shift left.
    pub shift: i8,
    /// Raw elementary value added to or subtracted from z.
    pub value: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Schedule {
    coordinate: Coordinate,
    steps: Vec<MicroStep>,
}

/// Hyperbolic indices that must be executed twice: 4, 13, 40, 121, ...
///
/// k(1) = 4, k(n+1) = 3 k(n) + 1.
pub fn hyperbolic_repeats() -> impl Iterator<Item = u32> {
    core::iter::successors(Some(4u32), |k| k.checked_mul(3)?.checked_add(1))
}

fn pow2(exp: i32) -> f64 {
    libm::ldexp(1.0, exp)
}

impl Schedule {
    /// atan(2^-i) for i = 0..iterations.
    pub fn circular(iterations: u8, angle: FixedFormat) -> Self {
        let steps = (0..iterations)
            .map(|i| MicroStep {
                index: i,
                shift: i as i8,
                value: angle.encode(libm::atan(pow2(-i32::from(i)))),
            })
            .collect();
        Self {
            coordinate: Coordinate::Circular,
            steps,
        }
    }

    /// atanh(2^-i) for i = 1..iterations, repeat indices emitted twice.
    pub fn hyperbolic(iterations: u8, angle: FixedFormat) -> Self {
        let repeats: Vec<u32> = hyperbolic_repeats()
            .take_while(|&k| k < u32::from(iterations))
            .collect();

        let mut steps = Vec::with_capacity(usize::from(iterations) + repeats.len());
        for i in 1..iterations {
            let step = MicroStep {
                index: i,
                shift: i as i8,
                value: angle.encode(libm::atanh(pow2(-i32::from(i)))),
            };
            steps.push(step);
            if repeats.contains(&u32::from(i)) {
                steps.push(step);
            }
        }
        Self {
            coordinate: Coordinate::Hyperbolic,
            steps,
        }
    }

    /// 2^(1-k) for k = 0.., with z's binary point at bit `position`.
    ///
    /// Opening one octave above unity extends the convergence range to |z| < 4.
    /// Steps finer than one LSB of z are dropped, so the length is
    /// `min(iterations, position + 2)`.
    pub fn linear(iterations: u8, position: u8, width: u8) -> Result<Self, CordicError> {
        if width < 3 || position > width - 3 {
            return Err(CordicError::InvalidRadixPosition { position, width });
        }
        let len = iterations.min(position + 2);
        let steps = (0..len)
            .map(|k| MicroStep {
                index: k,
                shift: k as i8 - 1,
                value: 1i32 << (position + 1 - k),
            })
            .collect();
        Ok(Self {
            coordinate: Coordinate::Linear,
            steps,
        })
    }

    pub fn coordinate(&self) -> Coordinate {
        self.coordinate
    }

    pub fn steps(&self) -> &[MicroStep] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Magnitude growth of x/y after the whole schedule.
    pub fn gain(&self) -> f64 {
        let sign = match self.coordinate {
            Coordinate::Circular => 1.0,
            Coordinate::Hyperbolic => -1.0,
            Coordinate::Linear => return 1.0,
        };
        self.steps
            .iter()
            .map(|step| libm::sqrt(1.0 + sign * pow2(-2 * i32::from(step.shift))))
            .product()
    }

    /// Reciprocal of [`Schedule::gain`]; the rotation-mode x seed.
    pub fn compensation(&self) -> f64 {
        1.0 / self.gain()
    }
}
