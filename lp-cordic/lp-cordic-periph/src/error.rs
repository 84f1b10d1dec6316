//! Error types for lp-cordic-periph

use core::fmt;

use lp_cordic_core::{CordicError, Mode};

/// Error type for register accesses and peripheral construction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PeripheralError {
    /// No register at this address
    UnmappedAddress(u32),
    /// Write to a read-only register
    ReadOnly(u32),
    /// Read from a write-only register
    WriteOnly(u32),
    /// Engine datapath does not match the register width
    DatapathWidth(u8),
    /// Engine configuration error
    Config(CordicError),
    /// A start pulse was not accepted (driver only)
    StartRejected,
    /// A previous run is still in flight (driver only)
    Busy,
    /// The driver helper has no meaning in this mode
    UnsupportedMode(Mode),
    /// DONE not reached within the polling budget (driver only)
    Timeout { ticks: usize },
}

impl fmt::Display for PeripheralError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PeripheralError::UnmappedAddress(addr) => {
                write!(f, "No register at address {addr:#x}")
            }
            PeripheralError::ReadOnly(addr) => write!(f, "Register {addr:#x} is read-only"),
            PeripheralError::WriteOnly(addr) => write!(f, "Register {addr:#x} is write-only"),
            PeripheralError::DatapathWidth(width) => {
                write!(
                    f,
                    "Datapath is {width} bits wide but registers hold 16 bits"
                )
            }
            PeripheralError::Config(err) => write!(f, "Config error: {err}"),
            PeripheralError::StartRejected => write!(f, "Start pulse was not accepted"),
            PeripheralError::Busy => write!(f, "Peripheral is still BUSY with a previous run"),
            PeripheralError::UnsupportedMode(mode) => write!(f, "{mode} is not supported here"),
            PeripheralError::Timeout { ticks } => {
                write!(f, "Peripheral not DONE after {ticks} ticks")
            }
        }
    }
}

impl From<CordicError> for PeripheralError {
    fn from(err: CordicError) -> Self {
        PeripheralError::Config(err)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for PeripheralError {}
