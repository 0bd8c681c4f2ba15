//! Contract and market inputs shared by every pricing and sensitivity function.
//!
//! [`OptionParameters`] is a small immutable value: it is built once by the caller,
//! passed by reference into the engine and never mutated. The payoff side is kept
//! out of it on purpose and selected per call with [`OptionKind`], so one parameter
//! set prices both the call and the put.

use std::fmt;
use std::str::FromStr;

use crate::error::{PricingError, Result};

/// Payoff side of a European option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase", try_from = "String"))]
pub enum OptionKind {
    Call,
    Put,
}

impl OptionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            OptionKind::Call => "call",
            OptionKind::Put => "put",
        }
    }
}

impl fmt::Display for OptionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OptionKind {
    type Err = PricingError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "call" => Ok(OptionKind::Call),
            "put" => Ok(OptionKind::Put),
            _ => Err(PricingError::UnknownOptionKind(s.to_string())),
        }
    }
}

/// Deserialisation goes through [`FromStr`], so config files, CSV rows and the
/// command line accept the same spellings.
impl TryFrom<String> for OptionKind {
    type Error = PricingError;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

/// Black-Scholes-Merton inputs for a single European option.
///
/// All rates and volatilities are decimals (`0.05` for 5%), maturity is in years.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OptionParameters {
    spot: f64,
    strike: f64,
    rate: f64,
    volatility: f64,
    maturity: f64,
}

impl OptionParameters {
    /// Builds a validated parameter set.
    ///
    /// Fails with [`PricingError::InvalidParameters`] when spot, strike, volatility
    /// or maturity is not strictly positive, or when any input is NaN or infinite.
    pub fn new(spot: f64, strike: f64, rate: f64, volatility: f64, maturity: f64) -> Result<Self> {
        let params = Self {
            spot,
            strike,
            rate,
            volatility,
            maturity,
        };
        params.validate()?;
        Ok(params)
    }

    /// Re-checks the domain constraints.
    ///
    /// Values that arrive through deserialisation never pass through [`Self::new`],
    /// so the engine calls this again before every computation.
    pub fn validate(&self) -> Result<()> {
        for (field, value) in [
            ("spot", self.spot),
            ("strike", self.strike),
            ("volatility", self.volatility),
            ("maturity", self.maturity),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(PricingError::not_positive(field, value));
            }
        }
        if !self.rate.is_finite() {
            return Err(PricingError::not_finite("rate", self.rate));
        }
        Ok(())
    }

    /// Copy of these parameters with a different volatility, validated.
    pub fn with_volatility(&self, volatility: f64) -> Result<Self> {
        Self::new(self.spot, self.strike, self.rate, volatility, self.maturity)
    }

    /// Current price of the underlying (S).
    pub fn spot(&self) -> f64 {
        self.spot
    }

    /// Strike price (K).
    pub fn strike(&self) -> f64 {
        self.strike
    }

    /// Continuously-compounded annual risk-free rate (r).
    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Annualised volatility (σ).
    pub fn volatility(&self) -> f64 {
        self.volatility
    }

    /// Time to expiry in years (T).
    pub fn maturity(&self) -> f64 {
        self.maturity
    }

    /// Discount factor `e^(−rT)`.
    pub fn discount_factor(&self) -> f64 {
        (-self.rate * self.maturity).exp()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_params_validation() {
        assert!(OptionParameters::new(100.0, 105.0, 0.05, 0.2, 1.0).is_ok());
        assert!(OptionParameters::new(100.0, 105.0, -0.01, 0.2, 1.0).is_ok()); // negative rate is fine

        assert!(OptionParameters::new(0.0, 105.0, 0.05, 0.2, 1.0).is_err()); // zero spot
        assert!(OptionParameters::new(100.0, -5.0, 0.05, 0.2, 1.0).is_err()); // negative strike
        assert!(OptionParameters::new(100.0, 105.0, 0.05, 0.0, 1.0).is_err()); // zero sigma
        assert!(OptionParameters::new(100.0, 105.0, 0.05, 0.2, 0.0).is_err()); // zero maturity
        assert!(OptionParameters::new(f64::NAN, 105.0, 0.05, 0.2, 1.0).is_err());
        assert!(OptionParameters::new(100.0, f64::INFINITY, 0.05, 0.2, 1.0).is_err());
        assert!(OptionParameters::new(100.0, 105.0, f64::NAN, 0.2, 1.0).is_err());
    }

    #[test]
    fn test_error_names_field() {
        let err = OptionParameters::new(100.0, 105.0, 0.05, 0.2, -1.0).unwrap_err();
        match err {
            PricingError::InvalidParameters { field, value, .. } => {
                assert_eq!(field, "maturity");
                assert_eq!(value, -1.0);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_kind_parsing() {
        assert_eq!("call".parse::<OptionKind>().unwrap(), OptionKind::Call);
        assert_eq!(" PUT ".parse::<OptionKind>().unwrap(), OptionKind::Put);
        assert_eq!("cALL".parse::<OptionKind>().unwrap(), OptionKind::Call);
        assert!("straddle".parse::<OptionKind>().is_err());
        assert!("c".parse::<OptionKind>().is_err());
        assert!("p".parse::<OptionKind>().is_err());
        assert_eq!(OptionKind::Put.to_string(), "put");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_kind_deserialises_like_from_str() {
        #[derive(serde::Deserialize)]
        struct Row {
            kind: OptionKind,
        }

        let parse = |raw: &str| toml::from_str::<Row>(&format!("kind = \"{raw}\""));
        assert_eq!(parse("call").unwrap().kind, OptionKind::Call);
        assert_eq!(parse("cALL").unwrap().kind, OptionKind::Call);
        assert_eq!(parse("Put").unwrap().kind, OptionKind::Put);
        assert!(parse("c").is_err());
        assert!(parse("straddle").is_err());
    }

    #[test]
    fn test_with_volatility() {
        let p = OptionParameters::new(100.0, 105.0, 0.05, 0.2, 1.0).unwrap();
        let q = p.with_volatility(0.35).unwrap();
        assert_eq!(q.volatility(), 0.35);
        assert_eq!(q.spot(), p.spot());
        assert!(p.with_volatility(0.0).is_err());
    }
}
