//! CORDIC peripheral register addresses and status codes.
//!
//! Registers are index-addressed. Address 0 is shared: reads return the
//! identification word, writes load the config byte.

/// Identification word (read) / config byte (write).
pub const ID_CONFIG: u32 = 0x0;
/// Angle, X or A operand (16 bit, write-only).
pub const OPERAND1: u32 = 0x1;
/// Y or B operand (16 bit, write-only).
pub const OPERAND2: u32 = 0x2;
/// Bit position of 1.0 in z for linear modes (8 bit, write-only).
pub const SCALE: u32 = 0x3;
/// First result (16 bit, read-only).
pub const OUTPUT1: u32 = 0x4;
/// Second result (16 bit, read-only).
pub const OUTPUT2: u32 = 0x5;
/// Control state (8 bit, read-only).
pub const STATUS: u32 = 0x6;

/// Value returned by reads of [`ID_CONFIG`].
pub const PERIPHERAL_ID: u32 = 0xBADC_AFFE;

pub const STATUS_READY: u8 = 0;
pub const STATUS_BUSY: u8 = 1;
pub const STATUS_DONE: u8 = 2;

/// Width of the operand and output registers.
pub const DATA_WIDTH: u8 = 16;
