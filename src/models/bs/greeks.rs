//! Closed-form Black-Scholes Greeks.
//!
//! Each public function re-derives `(d1, d2)` from its parameters. [`valuation`]
//! derives the pair once and evaluates the same formula helpers, so its fields
//! are bit-identical to the single-Greek functions.
//!
//! | Greek | Call | Put |
//! |-------|------|-----|
//! | delta | Φ(d1) | Φ(d1) − 1 |
//! | gamma | φ(d1) / (S·σ·√T) | same |
//! | vega  | S·φ(d1)·√T | same |
//! | theta | −S·φ(d1)·σ/(2√T) − r·K·e^(−rT)·Φ(d2) | −S·φ(d1)·σ/(2√T) + r·K·e^(−rT)·Φ(−d2) |
//! | rho   | K·T·e^(−rT)·Φ(d2) | −K·T·e^(−rT)·Φ(−d2) |
//!
//! Vega is per unit of volatility (1.00 = 100 vol points) and theta is per year,
//! with no further rescaling.

use crate::error::Result;
use crate::model_params::{OptionKind, OptionParameters};
use crate::models::bs::{finite_output, price_from, D1D2};
use crate::models::normal::{norm_cdf, norm_pdf};

/// Price and all five Greeks for one `(params, kind)` pair.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Valuation {
    pub kind: OptionKind,
    pub price: f64,
    pub delta: f64,
    pub gamma: f64,
    pub vega: f64,
    pub theta: f64,
    pub rho: f64,
}

/// ∂price/∂S
pub fn delta(params: &OptionParameters, kind: OptionKind) -> Result<f64> {
    let d = D1D2::derive(params)?;
    finite_output("delta", delta_from(kind, &d))
}

/// ∂²price/∂S². Identical for calls and puts; `kind` is accepted for a uniform
/// signature and ignored.
pub fn gamma(params: &OptionParameters, _kind: OptionKind) -> Result<f64> {
    let d = D1D2::derive(params)?;
    finite_output("gamma", gamma_from(params, &d))
}

/// ∂price/∂σ. Identical for calls and puts; `kind` is ignored.
pub fn vega(params: &OptionParameters, _kind: OptionKind) -> Result<f64> {
    let d = D1D2::derive(params)?;
    finite_output("vega", vega_from(params, &d))
}

/// Time decay, per year.
pub fn theta(params: &OptionParameters, kind: OptionKind) -> Result<f64> {
    let d = D1D2::derive(params)?;
    finite_output("theta", theta_from(params, kind, &d))
}

/// ∂price/∂r
pub fn rho(params: &OptionParameters, kind: OptionKind) -> Result<f64> {
    let d = D1D2::derive(params)?;
    finite_output("rho", rho_from(params, kind, &d))
}

/// Price and Greeks in one pass over a single `(d1, d2)` derivation.
///
/// Either every field is finite or the whole valuation fails.
pub fn valuation(params: &OptionParameters, kind: OptionKind) -> Result<Valuation> {
    let d = D1D2::derive(params)?;
    Ok(Valuation {
        kind,
        price: finite_output("price", price_from(params, kind, &d))?,
        delta: finite_output("delta", delta_from(kind, &d))?,
        gamma: finite_output("gamma", gamma_from(params, &d))?,
        vega: finite_output("vega", vega_from(params, &d))?,
        theta: finite_output("theta", theta_from(params, kind, &d))?,
        rho: finite_output("rho", rho_from(params, kind, &d))?,
    })
}

fn delta_from(kind: OptionKind, d: &D1D2) -> f64 {
    match kind {
        OptionKind::Call => norm_cdf(d.d1),
        OptionKind::Put => norm_cdf(d.d1) - 1.0,
    }
}

fn gamma_from(params: &OptionParameters, d: &D1D2) -> f64 {
    norm_pdf(d.d1) / (params.spot() * d.vol_sqrt_t)
}

fn vega_from(params: &OptionParameters, d: &D1D2) -> f64 {
    params.spot() * norm_pdf(d.d1) * params.maturity().sqrt()
}

fn theta_from(params: &OptionParameters, kind: OptionKind, d: &D1D2) -> f64 {
    let decay = -(params.spot() * norm_pdf(d.d1) * params.volatility())
        / (2.0 * params.maturity().sqrt());
    let carry = params.rate() * params.strike() * params.discount_factor();
    match kind {
        OptionKind::Call => decay - carry * norm_cdf(d.d2),
        OptionKind::Put => decay + carry * norm_cdf(-d.d2),
    }
}

fn rho_from(params: &OptionParameters, kind: OptionKind, d: &D1D2) -> f64 {
    let k_t_disc = params.strike() * params.maturity() * params.discount_factor();
    match kind {
        OptionKind::Call => k_t_disc * norm_cdf(d.d2),
        OptionKind::Put => -k_t_disc * norm_cdf(-d.d2),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::bs::price;

    fn reference_params() -> OptionParameters {
        OptionParameters::new(100.0, 105.0, 0.05, 0.2, 1.0).unwrap()
    }

    fn assert_close(got: f64, expected: f64, tol: f64, what: &str) {
        assert!(
            (got - expected).abs() < tol,
            "{what}: got {got}, expected {expected}"
        );
    }

    #[test]
    fn test_reference_greeks() {
        let p = reference_params();
        let call = OptionKind::Call;
        let put = OptionKind::Put;

        assert_close(delta(&p, call).unwrap(), 0.542_228_333_6, 1e-9, "call delta");
        assert_close(delta(&p, put).unwrap(), -0.457_771_666_4, 1e-9, "put delta");
        assert_close(gamma(&p, call).unwrap(), 0.019_835_261_9, 1e-9, "gamma");
        assert_close(vega(&p, call).unwrap(), 39.670_523_808, 1e-8, "vega");
        assert_close(theta(&p, call).unwrap(), -6.277_126_437, 1e-8, "call theta");
        assert_close(theta(&p, put).unwrap(), -1.283_171_958, 1e-8, "put theta");
        assert_close(rho(&p, call).unwrap(), 46.201_481_123, 1e-8, "call rho");
        assert_close(rho(&p, put).unwrap(), -53.677_608_449, 1e-8, "put rho");
    }

    #[test]
    fn test_valuation_matches_single_greeks_exactly() {
        let p = OptionParameters::new(87.5, 92.0, -0.01, 0.35, 0.4).unwrap();
        for kind in [OptionKind::Call, OptionKind::Put] {
            let v = valuation(&p, kind).unwrap();
            assert_eq!(v.kind, kind);
            assert_eq!(v.price, price(&p, kind).unwrap());
            assert_eq!(v.delta, delta(&p, kind).unwrap());
            assert_eq!(v.gamma, gamma(&p, kind).unwrap());
            assert_eq!(v.vega, vega(&p, kind).unwrap());
            assert_eq!(v.theta, theta(&p, kind).unwrap());
            assert_eq!(v.rho, rho(&p, kind).unwrap());
        }
    }

    #[test]
    fn test_delta_parity() {
        // call delta − put delta = 1
        let p = reference_params();
        let diff = delta(&p, OptionKind::Call).unwrap() - delta(&p, OptionKind::Put).unwrap();
        assert_close(diff, 1.0, 1e-15, "delta parity");
    }

    #[test]
    fn test_greeks_agree_with_bumped_prices() {
        // Sanity check of the analytic formulas against central differences.
        let p = OptionParameters::new(100.0, 95.0, 0.03, 0.25, 0.75).unwrap();
        let bump = |s: f64, k: f64, r: f64, v: f64, t: f64, kind| {
            price(&OptionParameters::new(s, k, r, v, t).unwrap(), kind).unwrap()
        };
        let h = 1e-4;
        for kind in [OptionKind::Call, OptionKind::Put] {
            let fd_delta = (bump(100.0 + h, 95.0, 0.03, 0.25, 0.75, kind)
                - bump(100.0 - h, 95.0, 0.03, 0.25, 0.75, kind))
                / (2.0 * h);
            assert_close(delta(&p, kind).unwrap(), fd_delta, 1e-6, "delta vs bump");

            let fd_vega = (bump(100.0, 95.0, 0.03, 0.25 + h, 0.75, kind)
                - bump(100.0, 95.0, 0.03, 0.25 - h, 0.75, kind))
                / (2.0 * h);
            assert_close(vega(&p, kind).unwrap(), fd_vega, 1e-5, "vega vs bump");

            let fd_rho = (bump(100.0, 95.0, 0.03 + h, 0.25, 0.75, kind)
                - bump(100.0, 95.0, 0.03 - h, 0.25, 0.75, kind))
                / (2.0 * h);
            assert_close(rho(&p, kind).unwrap(), fd_rho, 1e-5, "rho vs bump");

            // theta = −∂price/∂T
            let fd_theta = -(bump(100.0, 95.0, 0.03, 0.25, 0.75 + h, kind)
                - bump(100.0, 95.0, 0.03, 0.25, 0.75 - h, kind))
                / (2.0 * h);
            assert_close(theta(&p, kind).unwrap(), fd_theta, 1e-5, "theta vs bump");
        }

        let h = 1e-2;
        let fd_gamma = (bump(100.0 + h, 95.0, 0.03, 0.25, 0.75, OptionKind::Call)
            - 2.0 * bump(100.0, 95.0, 0.03, 0.25, 0.75, OptionKind::Call)
            + bump(100.0 - h, 95.0, 0.03, 0.25, 0.75, OptionKind::Call))
            / (h * h);
        assert_close(gamma(&p, OptionKind::Call).unwrap(), fd_gamma, 1e-6, "gamma vs bump");
    }

    #[test]
    fn test_overflowing_greek_fails_whole_valuation() {
        // S·√T overflows in vega while d1 stays finite
        let p = OptionParameters::new(1e300, 1e300, 0.0, 1e-12, 1e20).unwrap();
        assert!(matches!(
            vega(&p, OptionKind::Call),
            Err(crate::error::PricingError::InvalidParameters { field: "vega", .. })
        ));
        assert!(valuation(&p, OptionKind::Call).is_err());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_greeks_reject_invalid_params() {
        let raw = "spot = 100.0\nstrike = 105.0\nrate = 0.05\nvolatility = 0.0\nmaturity = 1.0\n";
        let p: OptionParameters = toml::from_str(raw).unwrap();
        for kind in [OptionKind::Call, OptionKind::Put] {
            assert!(delta(&p, kind).is_err());
            assert!(gamma(&p, kind).is_err());
            assert!(vega(&p, kind).is_err());
            assert!(theta(&p, kind).is_err());
            assert!(rho(&p, kind).is_err());
            assert!(valuation(&p, kind).is_err());
        }
    }
}
