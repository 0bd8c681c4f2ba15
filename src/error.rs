use thiserror::Error;

/// Errors raised by the pricing core.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PricingError {
    /// A contract or market input is outside its domain.
    ///
    /// Spot, strike, volatility and maturity must be strictly positive; every
    /// input, the rate included, must be finite. Inputs that are individually
    /// valid but whose combination overflows or underflows `f64` are reported
    /// here too, naming the input or output that left the representable range.
    #[error("invalid parameters: {field} must be {requirement} (got {value})")]
    InvalidParameters {
        field: &'static str,
        requirement: &'static str,
        value: f64,
    },

    /// No volatility reproduces the requested option price.
    #[error("no implied volatility for target price {target}: {reason}")]
    NoImpliedVolatility { target: f64, reason: String },

    #[error("unknown option kind '{0}', expected 'call' or 'put'")]
    UnknownOptionKind(String),
}

impl PricingError {
    pub(crate) fn not_positive(field: &'static str, value: f64) -> Self {
        Self::InvalidParameters {
            field,
            requirement: "finite and > 0",
            value,
        }
    }

    pub(crate) fn out_of_range(field: &'static str, requirement: &'static str, value: f64) -> Self {
        Self::InvalidParameters {
            field,
            requirement,
            value,
        }
    }

    pub(crate) fn not_finite(field: &'static str, value: f64) -> Self {
        Self::InvalidParameters {
            field,
            requirement: "finite",
            value,
        }
    }
}

pub type Result<T> = std::result::Result<T, PricingError>;
