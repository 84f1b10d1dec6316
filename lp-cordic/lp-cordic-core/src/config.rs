//! Engine configuration.

use serde::{Deserialize, Serialize};

use crate::engine::{Datapath, ShiftRounding};
use crate::error::CordicError;
use crate::fixed::{FixedFormat, Q2_14};

pub const DEFAULT_ITERATIONS: u8 = 14;
pub const MAX_ITERATIONS: u8 = 32;
/// Narrowest datapath the linear schedule fits in.
pub const MIN_WIDTH: u8 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Distinct table indices per run (hyperbolic repeats come on top).
    pub iterations: u8,
    /// Format of z in circular and hyperbolic modes.
    pub angle_format: FixedFormat,
    /// Format of rotation-mode seeds and decoded x/y outputs.
    pub value_format: FixedFormat,
    pub shift_rounding: ShiftRounding,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            iterations: DEFAULT_ITERATIONS,
            angle_format: Q2_14,
            value_format: Q2_14,
            shift_rounding: ShiftRounding::Nearest,
        }
    }
}

impl EngineConfig {
    pub fn validate(&self) -> Result<(), CordicError> {
        // A single iteration leaves the hyperbolic schedule empty.
        if !(2..=MAX_ITERATIONS).contains(&self.iterations) {
            return Err(CordicError::InvalidIterations(self.iterations));
        }
        self.angle_format.validate()?;
        self.value_format.validate()?;
        if self.angle_format.width < MIN_WIDTH {
            return Err(CordicError::InvalidFormat {
                width: self.angle_format.width,
                integer_bits: self.angle_format.integer_bits,
            });
        }
        if self.angle_format.width != self.value_format.width {
            return Err(CordicError::FormatWidthMismatch {
                angle: self.angle_format.width,
                value: self.value_format.width,
            });
        }
        Ok(())
    }

    /// Datapath width shared by every register.
    pub fn width(&self) -> u8 {
        self.angle_format.width
    }

    pub fn datapath(&self) -> Datapath {
        Datapath::new(self.width(), self.shift_rounding)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixed::Q5_11;

    #[test]
    fn test_default_is_valid() {
        assert_eq!(EngineConfig::default().validate(), Ok(()));
        assert_eq!(EngineConfig::default().width(), 16);
    }

    #[test]
    fn test_rejects_iteration_counts_out_of_range() {
        for iterations in [0, 1, 33] {
            let config = EngineConfig {
                iterations,
                ..EngineConfig::default()
            };
            assert_eq!(
                config.validate(),
                Err(CordicError::InvalidIterations(iterations))
            );
        }
        let message = alloc::format!("{}", CordicError::InvalidIterations(1));
        assert!(message.contains("2..=32"), "{message}");
    }

    #[test]
    fn test_rejects_mixed_widths() {
        let config = EngineConfig {
            value_format: FixedFormat::new(24, 4),
            ..EngineConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(CordicError::FormatWidthMismatch {
                angle: 16,
                value: 24
            })
        );
    }

    #[test]
    fn test_rejects_datapath_narrower_than_three_bits() {
        for width in [1, 2] {
            let format = FixedFormat::new(width, 1);
            let config = EngineConfig {
                angle_format: format,
                value_format: format,
                ..EngineConfig::default()
            };
            assert_eq!(
                config.validate(),
                Err(CordicError::InvalidFormat {
                    width,
                    integer_bits: 1
                })
            );
        }
        let format = FixedFormat::new(3, 1);
        let config = EngineConfig {
            angle_format: format,
            value_format: format,
            ..EngineConfig::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_formats_may_differ_within_a_width() {
        let config = EngineConfig {
            value_format: Q5_11,
            ..EngineConfig::default()
        };
        assert!(config.validate().is_ok());
    }
}
