//! Bus-facing traits.

use serde::Serialize;

use crate::error::PeripheralError;

/// Size of one bus access.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AccessWidth {
    Byte,
    Half,
    Word,
}

impl AccessWidth {
    pub const fn mask(self) -> u32 {
        match self {
            AccessWidth::Byte => 0xFF,
            AccessWidth::Half => 0xFFFF,
            AccessWidth::Word => 0xFFFF_FFFF,
        }
    }

    pub const fn bits(self) -> u8 {
        match self {
            AccessWidth::Byte => 8,
            AccessWidth::Half => 16,
            AccessWidth::Word => 32,
        }
    }
}

/// Memory-mapped register file.
///
/// Reads return the register masked to the access width. Writes replace only
/// the low bits covered by the access width.
pub trait RegisterBus {
    fn read(&mut self, addr: u32, width: AccessWidth) -> Result<u32, PeripheralError>;

    fn write(&mut self, addr: u32, width: AccessWidth, value: u32) -> Result<(), PeripheralError>;
}

/// Something advanced by a clock edge.
pub trait Clocked {
    fn clock(&mut self);
}

/// Merge a partial write into an existing register value.
pub fn merge_write(current: u32, width: AccessWidth, value: u32) -> u32 {
    let mask = width.mask();
    (current & !mask) | (value & mask)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_write_keeps_upper_bits() {
        assert_eq!(merge_write(0x1234, AccessWidth::Byte, 0xAB), 0x12AB);
        assert_eq!(merge_write(0x1234, AccessWidth::Half, 0xFFFF_5678), 0x5678);
        assert_eq!(merge_write(0x1234, AccessWidth::Word, 0xDEAD_BEEF), 0xDEAD_BEEF);
    }
}
