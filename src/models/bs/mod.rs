//! Black-Scholes-Merton pricing of European options on a non-dividend-paying
//! underlying.
//!
//! Every entry point validates its [`OptionParameters`] and derives the pair
//! `(d1, d2)` through [`D1D2::derive`]; the price and all Greeks are algebraic
//! combinations of that pair, Φ and φ. Nothing is cached between calls.

pub mod greeks;
pub mod implied_vol;

use crate::error::{PricingError, Result};
use crate::model_params::{OptionKind, OptionParameters};
use crate::models::normal::norm_cdf;

/// The two standardised arguments of the Black-Scholes formula.
///
/// ```text
/// d1 = (ln(S/K) + (r + σ²/2)·T) / (σ·√T)
/// d2 = d1 − σ·√T
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct D1D2 {
    pub d1: f64,
    pub d2: f64,
    /// σ·√T, kept because several Greeks reuse it.
    pub vol_sqrt_t: f64,
}

impl D1D2 {
    /// Validates `params` and computes `(d1, d2)`.
    ///
    /// The positivity check runs before any logarithm or division, so T → 0⁺ or
    /// σ → 0⁺ surfaces as an error instead of a NaN or infinity. Positive
    /// inputs whose σ·√T underflows to zero or overflows, or whose d1/d2 are not
    /// finite, are rejected the same way.
    pub fn derive(params: &OptionParameters) -> Result<Self> {
        params.validate()?;

        let sigma = params.volatility();
        let vol_sqrt_t = sigma * params.maturity().sqrt();
        if !vol_sqrt_t.is_normal() {
            return Err(PricingError::out_of_range(
                "volatility",
                "such that σ·√T is a normal, finite number",
                sigma,
            ));
        }

        let d1 = ((params.spot() / params.strike()).ln()
            + (params.rate() + 0.5 * sigma.powi(2)) * params.maturity())
            / vol_sqrt_t;
        let d2 = d1 - vol_sqrt_t;
        if !(d1.is_finite() && d2.is_finite()) {
            return Err(PricingError::out_of_range(
                "volatility",
                "such that d1 and d2 are finite",
                sigma,
            ));
        }

        Ok(Self { d1, d2, vol_sqrt_t })
    }
}

/// Fair value of a European option.
///
/// ```text
/// call = S·Φ(d1) − K·e^(−rT)·Φ(d2)
/// put  = K·e^(−rT)·Φ(−d2) − S·Φ(−d1)
/// ```
pub fn price(params: &OptionParameters, kind: OptionKind) -> Result<f64> {
    let d = D1D2::derive(params)?;
    finite_output("price", price_from(params, kind, &d))
}

/// Fair value of a European call.
pub fn call_price(params: &OptionParameters) -> Result<f64> {
    price(params, OptionKind::Call)
}

/// Fair value of a European put.
pub fn put_price(params: &OptionParameters) -> Result<f64> {
    price(params, OptionKind::Put)
}

/// Passes `value` through if it is finite.
///
/// Extreme rates or maturities can overflow the discount factor or a Greek's
/// scale even when d1 and d2 are finite.
pub(crate) fn finite_output(output: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(PricingError::out_of_range(
            output,
            "finite for these inputs",
            value,
        ))
    }
}

pub(crate) fn price_from(params: &OptionParameters, kind: OptionKind, d: &D1D2) -> f64 {
    let s = params.spot();
    let discounted_strike = params.strike() * params.discount_factor();
    match kind {
        OptionKind::Call => s * norm_cdf(d.d1) - discounted_strike * norm_cdf(d.d2),
        OptionKind::Put => discounted_strike * norm_cdf(-d.d2) - s * norm_cdf(-d.d1),
    }
}
