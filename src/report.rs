//! Human-readable valuation report.

use crate::error::Result;
use crate::model_params::{OptionKind, OptionParameters};
use crate::models::bs::greeks::{valuation, Valuation};

/// Decimal places used by [`summarize`].
pub const DEFAULT_PRECISION: usize = 6;

/// Six-line report of the price and the five Greeks:
///
/// ```text
/// CALL price: 8.021352
/// Delta: 0.542228
/// Gamma: 0.019835
/// Vega : 39.670524
/// Theta: -6.277126
/// Rho  : 46.201481
/// ```
pub fn summarize(params: &OptionParameters, kind: OptionKind) -> Result<String> {
    summarize_with_precision(params, kind, DEFAULT_PRECISION)
}

/// [`summarize`] with a caller-chosen number of decimal places.
pub fn summarize_with_precision(
    params: &OptionParameters,
    kind: OptionKind,
    precision: usize,
) -> Result<String> {
    let v = valuation(params, kind)?;
    Ok(format_valuation(&v, precision))
}

/// Renders an already computed [`Valuation`].
pub fn format_valuation(v: &Valuation, precision: usize) -> String {
    format!(
        "{label} price: {price:.p$}\n\
         Delta: {delta:.p$}\n\
         Gamma: {gamma:.p$}\n\
         Vega : {vega:.p$}\n\
         Theta: {theta:.p$}\n\
         Rho  : {rho:.p$}",
        label = v.kind.as_str().to_uppercase(),
        price = v.price,
        delta = v.delta,
        gamma = v.gamma,
        vega = v.vega,
        theta = v.theta,
        rho = v.rho,
        p = precision,
    )
}
