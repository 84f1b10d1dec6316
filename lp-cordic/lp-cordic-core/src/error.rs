//! Error types for lp-cordic-core

use core::fmt;

/// Error type for engine construction and per-run parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CordicError {
    /// Fixed-point format outside 1..=32 bits, narrower than the engine's 3-bit
    /// minimum, or with more integer bits than width
    InvalidFormat { width: u8, integer_bits: u8 },
    /// Iteration count outside 2..=32
    InvalidIterations(u8),
    /// Angle and value formats must share the datapath width
    FormatWidthMismatch { angle: u8, value: u8 },
    /// Linear radix position does not fit the datapath
    InvalidRadixPosition { position: u8, width: u8 },
}

impl fmt::Display for CordicError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CordicError::InvalidFormat {
                width,
                integer_bits,
            } => {
                write!(
                    f,
                    "Invalid fixed-point format: {integer_bits} integer bits in {width} bits"
                )
            }
            CordicError::InvalidIterations(n) => {
                write!(f, "Invalid iteration count: {n} (expected 2..=32)")
            }
            CordicError::FormatWidthMismatch { angle, value } => {
                write!(
                    f,
                    "Angle format is {angle} bits wide but value format is {value} bits wide"
                )
            }
            CordicError::InvalidRadixPosition { position, width } => {
                write!(
                    f,
                    "Invalid radix position {position} for a {width}-bit datapath"
                )
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for CordicError {}
