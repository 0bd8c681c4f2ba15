//! # BSM-Lib: Closed-Form European Option Pricing
//!
//! `bsm-lib` prices European options on a non-dividend-paying underlying under the
//! Black-Scholes-Merton model and computes their analytic Greeks. Every quantity is
//! an exact closed-form expression; nothing is approximated by finite differences.
//!
//! ## Core Features
//!
//! - **Pricing**: call and put fair values from a single validated parameter set
//! - **Greeks**: delta, gamma, vega, theta and rho, individually or in one pass
//! - **Implied Volatility**: Brent inversion of the pricing formula
//! - **Reports**: fixed-precision text summaries and CSV batch pricing
//!
//! ## Quick Start
//!
//! ```rust
//! use bsm_lib::{price, delta, summarize, OptionKind, OptionParameters};
//!
//! let params = OptionParameters::new(100.0, 105.0, 0.05, 0.20, 1.0)?;
//!
//! let call = price(&params, OptionKind::Call)?;
//! let put = price(&params, OptionKind::Put)?;
//!
//! // put-call parity
//! let forward_gap = params.spot() - params.strike() * params.discount_factor();
//! assert!((call - put - forward_gap).abs() < 1e-10);
//!
//! assert!(delta(&params, OptionKind::Call)? > 0.5);
//! println!("{}", summarize(&params, OptionKind::Call)?);
//! # Ok::<(), bsm_lib::PricingError>(())
//! ```
//!
//! ## Validation
//!
//! Spot, strike, volatility and maturity must be strictly positive and every input
//! finite. [`OptionParameters::new`] checks this, and every pricing entry point
//! checks it again before deriving `d1`/`d2`, so degenerate inputs surface as
//! [`PricingError::InvalidParameters`] rather than NaN or infinity.
//!
//! ## Conventions
//!
//! - Rates and volatilities are decimals (`0.05` for 5%), maturities in years.
//! - Vega is per unit of volatility (1.00 = 100 vol points).
//! - Theta is per year, `−(S·φ(d1)·σ)/(2√T) ∓ r·K·e^(−rT)·Φ(±d2)`, without any
//!   day-count rescaling.

// ================================================================================================
// MODULES
// ================================================================================================

pub mod error;
pub mod model_params;
pub mod models;
pub mod report;

#[cfg(feature = "serde")]
pub mod batch;
#[cfg(feature = "serde")]
pub mod config;

// ================================================================================================
// PUBLIC RE-EXPORTS
// ================================================================================================

pub use error::{PricingError, Result};
pub use model_params::{OptionKind, OptionParameters};

// Pricing and sensitivities
pub use models::bs::{
    call_price,
    greeks::{delta, gamma, rho, theta, valuation, vega, Valuation},
    implied_vol::{implied_volatility, ImpliedVolSettings},
    price, put_price, D1D2,
};

// Standard normal helpers
pub use models::normal::{norm_cdf, norm_pdf};

// Reporting
pub use report::{format_valuation, summarize, summarize_with_precision};

#[cfg(feature = "serde")]
pub use batch::{price_csv, price_csv_file, write_records, BatchOutcome, BatchRecord, BatchRejection};
#[cfg(feature = "serde")]
pub use config::{ExampleParameters, PricerConfig};

// ================================================================================================
// DEFAULT CONFIGURATIONS
// ================================================================================================

/// Pre-configured front-end settings.
///
/// - [`standard()`](default_configs::standard): six-decimal reports, 1e-12 solver tolerance
/// - [`high_precision()`](default_configs::high_precision): ten-decimal reports and a
///   tighter, wider volatility search
#[cfg(feature = "serde")]
pub mod default_configs {
    use crate::config::PricerConfig;

    /// Standard configuration.
    ///
    /// # Example
    ///
    /// ```rust
    /// use bsm_lib::default_configs;
    ///
    /// let config = default_configs::standard();
    /// assert_eq!(config.precision, 6);
    /// ```
    pub fn standard() -> PricerConfig {
        PricerConfig::standard()
    }

    /// High-precision configuration for validation work.
    ///
    /// **Characteristics:**
    /// - Report precision: 10 decimals
    /// - Volatility search: [1e-8, 10.0]
    /// - Solver tolerance: 1e-14
    pub fn high_precision() -> PricerConfig {
        PricerConfig::high_precision()
    }
}

// ================================================================================================
// CONVENIENCE API
// ================================================================================================

/// Price and Greeks for both the call and the put of one parameter set.
///
/// Either both valuations are returned or the validation error is; there are no
/// partial results.
///
/// # Example
///
/// ```rust
/// use bsm_lib::{value_both_sides, OptionParameters};
///
/// let params = OptionParameters::new(100.0, 100.0, 0.03, 0.25, 0.5)?;
/// let (call, put) = value_both_sides(&params)?;
///
/// assert_eq!(call.gamma, put.gamma);
/// assert!((call.delta - put.delta - 1.0).abs() < 1e-15);
/// # Ok::<(), bsm_lib::PricingError>(())
/// ```
pub fn value_both_sides(params: &OptionParameters) -> Result<(Valuation, Valuation)> {
    let call = valuation(params, OptionKind::Call)?;
    let put = valuation(params, OptionKind::Put)?;
    Ok((call, put))
}
