//! Register-mapped CORDIC peripheral.
//!
//! Wraps the `lp-cordic-core` engine in a small index-addressed register file
//! with a READY/BUSY/DONE control state machine, plus a host driver that talks
//! to it over the [`bus::RegisterBus`] trait.

#![no_std]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

pub mod bus;
pub mod config;
pub mod control;
pub mod error;
pub mod host;
pub mod periph;
pub mod protocol;
pub mod regs;

pub use bus::{AccessWidth, Clocked, RegisterBus};
pub use config::PeripheralConfig;
pub use control::Status;
pub use error::PeripheralError;
pub use host::{HostDriver, Vectored, linear_z_format};
pub use periph::{CordicPeripheral, PeripheralLog, TickResult};
pub use protocol::{ConfigLayout, ConfigWord};
