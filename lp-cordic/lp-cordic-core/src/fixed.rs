//! Signed two's-complement Qm.f fixed-point codec.
//!
//! A [`FixedFormat`] describes a `width`-bit word with `integer_bits` integer bits
//! (sign included) and `width - integer_bits` fractional bits. Raw values are kept
//! in an `i32`, sign-extended from the low `width` bits.
//!
//! Encoding rounds to nearest with ties to even and saturates at the format
//! boundaries. Decoding is exact.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CordicError;

/// Qm.f layout of a fixed-point word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FixedFormat {
    pub width: u8,
    pub integer_bits: u8,
}

/// 16-bit angle/value format used by circular and hyperbolic modes.
pub const Q2_14: FixedFormat = FixedFormat::new(16, 2);
/// 16-bit format used by the linear multiply/divide tests.
pub const Q5_11: FixedFormat = FixedFormat::new(16, 5);
/// 16-bit format with enough headroom for hyperbolic vectoring sweeps.
pub const Q7_9: FixedFormat = FixedFormat::new(16, 7);

impl FixedFormat {
    pub const fn new(width: u8, integer_bits: u8) -> Self {
        Self {
            width,
            integer_bits,
        }
    }

    /// Build a format, rejecting layouts the datapath cannot hold.
    pub fn try_new(width: u8, integer_bits: u8) -> Result<Self, CordicError> {
        let format = Self::new(width, integer_bits);
        format.validate()?;
        Ok(format)
    }

    pub fn validate(&self) -> Result<(), CordicError> {
        if self.width == 0 || self.width > 32 || self.integer_bits == 0 {
            return Err(CordicError::InvalidFormat {
                width: self.width,
                integer_bits: self.integer_bits,
            });
        }
        if self.integer_bits > self.width {
            return Err(CordicError::InvalidFormat {
                width: self.width,
                integer_bits: self.integer_bits,
            });
        }
        Ok(())
    }

    pub const fn fractional_bits(&self) -> u8 {
        self.width - self.integer_bits
    }

    /// Raw value of 1.0, as a float. May exceed the representable range.
    pub fn scale(&self) -> f64 {
        (1u64 << self.fractional_bits()) as f64
    }

    /// Weight of one LSB.
    pub fn resolution(&self) -> f64 {
        1.0 / self.scale()
    }

    pub const fn max_raw(&self) -> i32 {
        ((1i64 << (self.width - 1)) - 1) as i32
    }

    pub const fn min_raw(&self) -> i32 {
        (-(1i64 << (self.width - 1))) as i32
    }

    pub fn max_value(&self) -> f64 {
        self.decode(self.max_raw())
    }

    pub fn min_value(&self) -> f64 {
        self.decode(self.min_raw())
    }

    /// Mask covering the low `width` bits.
    pub const fn mask(&self) -> u32 {
        if self.width >= 32 {
            u32::MAX
        } else {
            (1u32 << self.width) - 1
        }
    }

    /// Nearest representable raw value, ties to even, saturating.
    ///
    /// NaN encodes to zero so the codec stays total.
    pub fn encode(&self, real: f64) -> i32 {
        if real.is_nan() {
            return 0;
        }
        let scaled = libm::rint(real * self.scale());
        if scaled >= self.max_raw() as f64 {
            self.max_raw()
        } else if scaled <= self.min_raw() as f64 {
            self.min_raw()
        } else {
            scaled as i32
        }
    }

    /// Real value of a raw word. Exact for every representable value.
    pub fn decode(&self, raw: i32) -> f64 {
        raw as f64 / self.scale()
    }

    /// Decode the low `width` bits of a register word.
    pub fn decode_bits(&self, bits: u32) -> f64 {
        self.decode(self.from_bits(bits))
    }

    /// Reduce a wide intermediate to `width` bits, two's-complement wraparound.
    pub fn wrap(&self, value: i64) -> i32 {
        sign_extend(value as u32, self.width)
    }

    /// Low `width` bits of a raw value, as stored in a register.
    pub fn to_bits(&self, raw: i32) -> u32 {
        raw as u32 & self.mask()
    }

    /// Sign-extend the low `width` bits of a register word.
    pub fn from_bits(&self, bits: u32) -> i32 {
        sign_extend(bits, self.width)
    }
}

impl Default for FixedFormat {
    fn default() -> Self {
        Q2_14
    }
}

impl fmt::Display for FixedFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Q{}.{}", self.integer_bits, self.fractional_bits())
    }
}

/// Interpret the low `width` bits of `bits` as a signed integer.
pub fn sign_extend(bits: u32, width: u8) -> i32 {
    let shift = 32 - u32::from(width.clamp(1, 32));
    ((bits << shift) as i32) >> shift
}
