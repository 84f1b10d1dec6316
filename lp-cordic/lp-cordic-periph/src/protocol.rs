//! Config byte layouts.
//!
//! Two revisions of the config byte exist in the field. Both carry a start
//! pulse in bit 0, a rotating/vectoring flag and a two-bit coordinate code;
//! they differ in where the flag and the code sit:
//!
//! ```text
//! V1:  [7:4] -  [3:2] coordinate  [1] rotating  [0] start
//! V2:  [7:4] -  [3] rotating  [2:1] coordinate  [0] start
//! ```
//!
//! Coordinate codes: 0 circular, 1 linear, 2 hyperbolic, 3 reserved.

use lp_cordic_core::{Coordinate, Mode, Operation};
use serde::{Deserialize, Serialize};

pub const START_BIT: u8 = 1 << 0;
pub const RESERVED_COORDINATE: u8 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfigLayout {
    V1,
    #[default]
    V2,
}

/// Decoded config byte. The coordinate code is kept raw so reserved codes
/// survive decoding and can be rejected at start time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfigWord {
    pub coordinate: u8,
    pub operation: Operation,
    pub start: bool,
}

impl ConfigWord {
    pub fn new(mode: Mode, start: bool) -> Self {
        Self {
            coordinate: coordinate_code(mode.coordinate),
            operation: mode.operation,
            start,
        }
    }

    /// `None` for the reserved coordinate code.
    pub fn mode(&self) -> Option<Mode> {
        coordinate_from_code(self.coordinate).map(|c| Mode::new(c, self.operation))
    }
}

pub fn coordinate_code(coordinate: Coordinate) -> u8 {
    match coordinate {
        Coordinate::Circular => 0,
        Coordinate::Linear => 1,
        Coordinate::Hyperbolic => 2,
    }
}

pub fn coordinate_from_code(code: u8) -> Option<Coordinate> {
    match code & 0b11 {
        0 => Some(Coordinate::Circular),
        1 => Some(Coordinate::Linear),
        2 => Some(Coordinate::Hyperbolic),
        _ => None,
    }
}

impl ConfigLayout {
    const fn coordinate_shift(self) -> u8 {
        match self {
            ConfigLayout::V1 => 2,
            ConfigLayout::V2 => 1,
        }
    }

    const fn rotating_bit(self) -> u8 {
        match self {
            ConfigLayout::V1 => 1 << 1,
            ConfigLayout::V2 => 1 << 3,
        }
    }

    pub fn encode(self, word: ConfigWord) -> u8 {
        let mut byte = (word.coordinate & 0b11) << self.coordinate_shift();
        if word.operation == Operation::Rotation {
            byte |= self.rotating_bit();
        }
        if word.start {
            byte |= START_BIT;
        }
        byte
    }

    pub fn decode(self, byte: u8) -> ConfigWord {
        let operation = if byte & self.rotating_bit() != 0 {
            Operation::Rotation
        } else {
            Operation::Vectoring
        };
        ConfigWord {
            coordinate: (byte >> self.coordinate_shift()) & 0b11,
            operation,
            start: byte & START_BIT != 0,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ConfigLayout::V1 => "v1",
            ConfigLayout::V2 => "v2",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HYPERBOLIC_ROTATION: Mode = Mode::new(Coordinate::Hyperbolic, Operation::Rotation);

    #[test]
    fn test_v1_bit_positions() {
        let byte = ConfigLayout::V1.encode(ConfigWord::new(HYPERBOLIC_ROTATION, true));
        assert_eq!(byte, 0b1011);
        let byte = ConfigLayout::V1.encode(ConfigWord::new(
            Mode::new(Coordinate::Linear, Operation::Vectoring),
            false,
        ));
        assert_eq!(byte, 0b0100);
    }

    #[test]
    fn test_v2_bit_positions() {
        let byte = ConfigLayout::V2.encode(ConfigWord::new(HYPERBOLIC_ROTATION, true));
        assert_eq!(byte, 0b1101);
        let byte = ConfigLayout::V2.encode(ConfigWord::new(
            Mode::new(Coordinate::Circular, Operation::Rotation),
            true,
        ));
        assert_eq!(byte, 0b1001);
    }

    #[test]
    fn test_layouts_disagree_on_the_same_byte() {
        let v1 = ConfigLayout::V1.decode(0b0011).mode();
        let v2 = ConfigLayout::V2.decode(0b0011).mode();
        assert_eq!(
            v1,
            Some(Mode::new(Coordinate::Circular, Operation::Rotation))
        );
        assert_eq!(
            v2,
            Some(Mode::new(Coordinate::Linear, Operation::Vectoring))
        );
    }

    #[test]
    fn test_decode_inverts_encode_for_every_mode() {
        for layout in [ConfigLayout::V1, ConfigLayout::V2] {
            for coordinate in Coordinate::ALL {
                for operation in [Operation::Rotation, Operation::Vectoring] {
                    let word = ConfigWord::new(Mode::new(coordinate, operation), true);
                    assert_eq!(layout.decode(layout.encode(word)), word);
                }
            }
        }
    }

    #[test]
    fn test_reserved_coordinate_has_no_mode() {
        let word = ConfigLayout::V2.decode(0b0111);
        assert_eq!(word.coordinate, RESERVED_COORDINATE);
        assert!(word.start);
        assert_eq!(word.mode(), None);
    }
}
