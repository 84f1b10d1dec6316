//! Peripheral config loading.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use lp_cordic_core::FixedFormat;
use lp_cordic_periph::PeripheralConfig;

use crate::cli::EngineOverrides;

/// Load a JSON config, or the defaults when no path is given.
pub fn load_config(path: Option<&Path>) -> Result<PeripheralConfig> {
    let Some(path) = path else {
        return Ok(PeripheralConfig::default());
    };
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let config: PeripheralConfig = serde_json::from_str(&text)
        .with_context(|| format!("Failed to parse config {}", path.display()))?;
    log::info!("loaded config from {}", path.display());
    Ok(config)
}

/// Apply command line overrides and validate the result.
pub fn apply_overrides(
    mut config: PeripheralConfig,
    overrides: &EngineOverrides,
) -> Result<PeripheralConfig> {
    if let Some(iterations) = overrides.iterations {
        config.engine.iterations = iterations;
    }
    if let Some(layout) = overrides.layout {
        config.layout = layout.into();
    }
    if let Some(rounding) = overrides.rounding {
        config.engine.shift_rounding = rounding.into();
    }
    config
        .engine
        .validate()
        .context("Invalid engine configuration")?;
    Ok(config)
}

/// Parse `Qm.f` (or `m.f`) into a fixed-point format.
pub fn parse_format(text: &str) -> Result<FixedFormat> {
    let body = text
        .strip_prefix('Q')
        .or_else(|| text.strip_prefix('q'))
        .unwrap_or(text);
    let Some((integer, fraction)) = body.split_once('.') else {
        bail!("Expected a format like Q5.11, got {text:?}");
    };
    let integer: u8 = integer
        .parse()
        .with_context(|| format!("Bad integer bit count in {text:?}"))?;
    let fraction: u8 = fraction
        .parse()
        .with_context(|| format!("Bad fractional bit count in {text:?}"))?;
    let width = integer
        .checked_add(fraction)
        .with_context(|| format!("Format {text:?} is too wide"))?;
    Ok(FixedFormat::try_new(width, integer)?)
}

/// clap value parser for [`parse_format`].
pub fn format_value_parser(text: &str) -> Result<FixedFormat, String> {
    parse_format(text).map_err(|e| format!("{e:#}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{LayoutArg, RoundingArg};
    use lp_cordic_core::{Q2_14, Q5_11, ShiftRounding};
    use lp_cordic_periph::ConfigLayout;
    use std::io::Write;

    #[test]
    fn test_parse_format() {
        assert_eq!(parse_format("Q5.11").unwrap(), Q5_11);
        assert_eq!(parse_format("2.14").unwrap(), Q2_14);
        assert!(parse_format("Q5").is_err());
        assert!(parse_format("Q0.16").is_err());
        assert!(parse_format("Q200.200").is_err());
    }

    #[test]
    fn test_missing_path_gives_defaults() {
        assert_eq!(load_config(None).unwrap(), PeripheralConfig::default());
    }

    #[test]
    fn test_load_and_override() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "engine": {{ "iterations": 10 }} }}"#).unwrap();

        let config = load_config(Some(file.path())).unwrap();
        assert_eq!(config.engine.iterations, 10);

        let overrides = EngineOverrides {
            iterations: Some(16),
            layout: Some(LayoutArg::V1),
            rounding: Some(RoundingArg::Truncate),
        };
        let config = apply_overrides(config, &overrides).unwrap();
        assert_eq!(config.engine.iterations, 16);
        assert_eq!(config.layout, ConfigLayout::V1);
        assert_eq!(config.engine.shift_rounding, ShiftRounding::Truncate);
    }

    #[test]
    fn test_invalid_override_is_an_error() {
        let overrides = EngineOverrides {
            iterations: Some(0),
            ..EngineOverrides::default()
        };
        assert!(apply_overrides(PeripheralConfig::default(), &overrides).is_err());
    }
}
