//! Implied volatility: inverts the Black-Scholes price in σ.
//!
//! The price is strictly increasing in σ, so a target strictly inside the
//! no-arbitrage band has exactly one solution. It is found with Brent's method
//! on `price(σ) − target` over a bracketing volatility interval.

use roots::{find_root_brent, SimpleConvergency};
use tracing::debug;

use crate::error::{PricingError, Result};
use crate::model_params::{OptionKind, OptionParameters};
use crate::models::bs::price;

/// Search interval and stopping rule of the implied-volatility solver.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ImpliedVolSettings {
    /// Smallest volatility searched
    pub lower: f64,
    /// Largest volatility searched
    pub upper: f64,
    /// Absolute tolerance on both the price residual and the σ bracket width
    pub tolerance: f64,
    pub max_iterations: usize,
}

impl Default for ImpliedVolSettings {
    fn default() -> Self {
        Self {
            lower: 1e-6,
            upper: 5.0,
            tolerance: 1e-12,
            max_iterations: 200,
        }
    }
}

/// Volatility at which the Black-Scholes price of `kind` equals `target_price`.
///
/// # Errors
///
/// * [`PricingError::InvalidParameters`] if spot, strike or maturity is not
///   strictly positive, or the search interval is malformed.
/// * [`PricingError::NoImpliedVolatility`] if the target is outside the
///   no-arbitrage band, outside the prices spanned by the search interval, or
///   the solver does not converge.
pub fn implied_volatility(
    spot: f64,
    strike: f64,
    rate: f64,
    maturity: f64,
    kind: OptionKind,
    target_price: f64,
    settings: &ImpliedVolSettings,
) -> Result<f64> {
    if !(settings.lower.is_finite() && settings.lower > 0.0) {
        return Err(PricingError::not_positive("lower volatility bound", settings.lower));
    }
    if !(settings.upper.is_finite() && settings.upper > settings.lower) {
        return Err(PricingError::InvalidParameters {
            field: "upper volatility bound",
            requirement: "finite and above the lower bound",
            value: settings.upper,
        });
    }

    let params = OptionParameters::new(spot, strike, rate, settings.upper, maturity)?;
    let no_iv = |reason: String| PricingError::NoImpliedVolatility {
        target: target_price,
        reason,
    };

    if !target_price.is_finite() {
        return Err(no_iv("target price is not finite".to_string()));
    }

    let discounted_strike = strike * params.discount_factor();
    let (floor, cap) = match kind {
        OptionKind::Call => ((spot - discounted_strike).max(0.0), spot),
        OptionKind::Put => ((discounted_strike - spot).max(0.0), discounted_strike),
    };
    if target_price <= floor || target_price >= cap {
        return Err(no_iv(format!(
            "outside the no-arbitrage band ({floor:.6}, {cap:.6}) for a {kind}"
        )));
    }

    let objective = |sigma: f64| -> f64 {
        params
            .with_volatility(sigma)
            .and_then(|p| price(&p, kind))
            .map_or(f64::NAN, |v| v - target_price)
    };

    let at_lower = objective(settings.lower);
    let at_upper = objective(settings.upper);
    if at_lower > 0.0 || at_upper < 0.0 {
        return Err(no_iv(format!(
            "volatility search range [{}, {}] does not bracket the target",
            settings.lower, settings.upper
        )));
    }

    let mut convergency = SimpleConvergency {
        eps: settings.tolerance,
        max_iter: settings.max_iterations,
    };
    match find_root_brent(settings.lower, settings.upper, &objective, &mut convergency) {
        Ok(sigma) => {
            debug!(target_price, sigma, %kind, "implied volatility solved");
            Ok(sigma)
        }
        Err(err) => Err(no_iv(format!("root finding failed: {err:?}"))),
    }
}
