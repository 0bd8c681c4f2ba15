use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::model_params::{OptionKind, OptionParameters};
use crate::models::bs::implied_vol::ImpliedVolSettings;
use crate::report::DEFAULT_PRECISION;

/// Fallback parameter set used by front-ends when inputs are missing.
///
/// The core never substitutes these on its own; see [`PricerConfig::example`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExampleParameters {
    pub spot: f64,
    pub strike: f64,
    pub rate: f64,
    pub volatility: f64,
    pub maturity: f64,
}

impl Default for ExampleParameters {
    fn default() -> Self {
        Self {
            spot: 100.0,
            strike: 105.0,
            rate: 0.05,
            volatility: 0.2,
            maturity: 1.0,
        }
    }
}

impl ExampleParameters {
    /// Validated [`OptionParameters`] built from these values.
    pub fn to_params(&self) -> crate::Result<OptionParameters> {
        OptionParameters::new(
            self.spot,
            self.strike,
            self.rate,
            self.volatility,
            self.maturity,
        )
    }
}

/// Main configuration struct for the pricer front-ends
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PricerConfig {
    /// Parameters used when the caller asks for the example or omits an input
    #[serde(default)]
    pub example: ExampleParameters,

    /// Option side priced when none is given
    #[serde(default = "default_kind")]
    pub kind: OptionKind,

    /// Decimal places in the summary report
    #[serde(default = "default_precision")]
    pub precision: usize,

    /// Implied-volatility solver settings
    #[serde(default)]
    pub implied_vol: ImpliedVolSettings,
}

impl Default for PricerConfig {
    fn default() -> Self {
        Self {
            example: ExampleParameters::default(),
            kind: default_kind(),
            precision: default_precision(),
            implied_vol: ImpliedVolSettings::default(),
        }
    }
}

impl PricerConfig {
    /// Standard settings: six decimals, solver tolerance 1e-12
    pub fn standard() -> Self {
        Self::default()
    }

    /// Ten decimals in reports and a tighter, wider-range volatility search
    pub fn high_precision() -> Self {
        Self {
            precision: 10,
            implied_vol: ImpliedVolSettings {
                lower: 1e-8,
                upper: 10.0,
                tolerance: 1e-14,
                max_iterations: 500,
            },
            ..Self::default()
        }
    }

    /// Parses a TOML document; absent keys fall back to [`PricerConfig::default`].
    pub fn from_toml_str(src: &str) -> Result<Self> {
        let config: Self = toml::from_str(src).context("invalid pricer configuration")?;
        Ok(config)
    }

    /// Reads and parses a TOML configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let src = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Self::from_toml_str(&src).with_context(|| format!("in {}", path.display()))
    }
}

fn default_kind() -> OptionKind {
    OptionKind::Call
}

fn default_precision() -> usize {
    DEFAULT_PRECISION
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_gives_defaults() {
        let config = PricerConfig::from_toml_str("").unwrap();
        assert_eq!(config.example, ExampleParameters::default());
        assert_eq!(config.kind, OptionKind::Call);
        assert_eq!(config.precision, 6);
        assert_eq!(config.implied_vol, ImpliedVolSettings::default());
    }

    #[test]
    fn test_partial_overrides() {
        let src = r#"
            kind = "put"
            precision = 4

            [example]
            spot = 120.0
            volatility = 0.35

            [implied_vol]
            upper = 3.0
        "#;
        let config = PricerConfig::from_toml_str(src).unwrap();
        assert_eq!(config.kind, OptionKind::Put);
        assert_eq!(config.precision, 4);
        assert_eq!(config.example.spot, 120.0);
        assert_eq!(config.example.strike, 105.0);
        assert_eq!(config.example.volatility, 0.35);
        assert_eq!(config.implied_vol.upper, 3.0);
        assert_eq!(config.implied_vol.lower, 1e-6);
    }

    #[test]
    fn test_invalid_example_is_reported_on_use() {
        let config = PricerConfig::from_toml_str("[example]\nmaturity = 0.0\n").unwrap();
        assert!(config.example.to_params().is_err());
    }

    #[test]
    fn test_rejects_malformed_toml() {
        assert!(PricerConfig::from_toml_str("precision = \"six\"").is_err());
        assert!(PricerConfig::from_toml_str("kind = \"straddle\"").is_err());
    }

    #[test]
    fn test_presets() {
        let standard = PricerConfig::standard();
        let precise = PricerConfig::high_precision();
        assert_eq!(standard.precision, 6);
        assert!(precise.precision > standard.precision);
        assert!(precise.implied_vol.tolerance < standard.implied_vol.tolerance);
        assert!(precise.example.to_params().is_ok());
    }
}
