//! Standard normal distribution helpers.
//!
//! Every price and Greek is an algebraic combination of Φ and φ evaluated at
//! d1 and d2, so both are computed to full double precision. Φ goes through the
//! complementary error function rather than `erf`: `0.5 * (1 + erf(x/√2))`
//! cancels catastrophically in the lower tail, while `0.5 * erfc(-x/√2)` keeps
//! relative accuracy down to the smallest representable probabilities.

use std::f64::consts::FRAC_1_SQRT_2;

/// 1/√(2π)
const INV_SQRT_2PI: f64 = 0.398_942_280_401_432_7;

/// Standard normal cumulative distribution function Φ(x).
pub fn norm_cdf(x: f64) -> f64 {
    0.5 * libm::erfc(-x * FRAC_1_SQRT_2)
}

/// Standard normal probability density function φ(x).
pub fn norm_pdf(x: f64) -> f64 {
    INV_SQRT_2PI * (-0.5 * x * x).exp()
}
