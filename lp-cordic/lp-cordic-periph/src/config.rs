//! Peripheral configuration: engine settings plus the config byte layout.

use lp_cordic_core::EngineConfig;
use serde::{Deserialize, Serialize};

use crate::protocol::ConfigLayout;

/// Everything needed to build a peripheral.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PeripheralConfig {
    pub engine: EngineConfig,
    /// Config byte revision the peripheral decodes.
    pub layout: ConfigLayout,
}
