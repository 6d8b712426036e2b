//! Analytic Black-Scholes Greeks
//!
//! Each greek guards against a non-finite `w` (t = 0 or v = 0) and falls
//! back to its limiting value. Rho is the exception: it only falls back when
//! `w` is NaN, so an infinite `w` still produces the discounted-strike limit.

use super::black_scholes::{ensure_finite_w, w};
use super::normal::{std_norm_cdf, std_norm_density};
use crate::core::{Greeks, OptionSide, RiskResult};

/// Default theta scale (calendar days per year)
pub const DEFAULT_THETA_SCALE: f64 = 365.0;

/// Default rho scale (per 1% rate move)
pub const DEFAULT_RHO_SCALE: f64 = 100.0;

/// Delta: N(w) for calls, N(w) − 1 for puts
///
/// With a non-finite `w` a call is 1 when in the money and 0 otherwise.
/// A put whose delta comes out at exactly −1 with spot equal to strike is
/// reported as 0 rather than −1.
pub fn delta(spot: f64, strike: f64, time: f64, vol: f64, rate: f64, side: OptionSide) -> f64 {
    let call_delta = {
        let w = w(spot, strike, time, vol, rate);
        if w.is_finite() {
            std_norm_cdf(w)
        } else if spot > strike {
            1.0
        } else {
            0.0
        }
    };

    match side {
        OptionSide::Call => call_delta,
        OptionSide::Put => {
            let put_delta = call_delta - 1.0;
            if put_delta == -1.0 && strike == spot {
                0.0
            } else {
                put_delta
            }
        }
    }
}

/// Gamma, identical for calls and puts
pub fn gamma(spot: f64, strike: f64, time: f64, vol: f64, rate: f64) -> f64 {
    let w = w(spot, strike, time, vol, rate);
    if w.is_finite() {
        std_norm_density(w) / (spot * vol * time.sqrt())
    } else {
        0.0
    }
}

/// Vega per one volatility point, identical for calls and puts
pub fn vega(spot: f64, strike: f64, time: f64, vol: f64, rate: f64) -> f64 {
    let w = w(spot, strike, time, vol, rate);
    if w.is_finite() {
        spot * time.sqrt() * std_norm_density(w) / 100.0
    } else {
        0.0
    }
}

/// Theta per `1/scale` of a year (default: per calendar day)
pub fn theta(
    spot: f64,
    strike: f64,
    time: f64,
    vol: f64,
    rate: f64,
    side: OptionSide,
    scale: Option<f64>,
) -> f64 {
    let scale = scale.unwrap_or(DEFAULT_THETA_SCALE);
    let w = w(spot, strike, time, vol, rate);
    if !w.is_finite() {
        return 0.0;
    }

    let sqrt_t = time.sqrt();
    let decay = -vol * spot * std_norm_density(w) / (2.0 * sqrt_t);
    let carry = strike * rate * (-rate * time).exp();
    let annual = match side {
        OptionSide::Call => decay - carry * std_norm_cdf(w - vol * sqrt_t),
        OptionSide::Put => decay + carry * std_norm_cdf(vol * sqrt_t - w),
    };
    annual / scale
}

/// Rho per `1/scale` of rate (default: per 1%)
pub fn rho(
    spot: f64,
    strike: f64,
    time: f64,
    vol: f64,
    rate: f64,
    side: OptionSide,
    scale: Option<f64>,
) -> f64 {
    let scale = scale.unwrap_or(DEFAULT_RHO_SCALE);
    let w = w(spot, strike, time, vol, rate);
    if w.is_nan() {
        return 0.0;
    }

    let discounted = strike * time * (-rate * time).exp();
    let sqrt_t = time.sqrt();
    let annual = match side {
        OptionSide::Call => discounted * std_norm_cdf(w - vol * sqrt_t),
        OptionSide::Put => -discounted * std_norm_cdf(vol * sqrt_t - w),
    };
    annual / scale
}

/// All five greeks at the given scales
#[allow(clippy::too_many_arguments)]
pub fn greeks(
    spot: f64,
    strike: f64,
    time: f64,
    vol: f64,
    rate: f64,
    side: OptionSide,
    theta_scale: f64,
    rho_scale: f64,
) -> Greeks {
    Greeks::new(
        delta(spot, strike, time, vol, rate, side),
        gamma(spot, strike, time, vol, rate),
        theta(spot, strike, time, vol, rate, side, Some(theta_scale)),
        vega(spot, strike, time, vol, rate),
        rho(spot, strike, time, vol, rate, side, Some(rho_scale)),
    )
}

/// Like [`greeks`], but `DegenerateInput` instead of limiting values
#[allow(clippy::too_many_arguments)]
pub fn try_greeks(
    spot: f64,
    strike: f64,
    time: f64,
    vol: f64,
    rate: f64,
    side: OptionSide,
    theta_scale: f64,
    rho_scale: f64,
) -> RiskResult<Greeks> {
    ensure_finite_w(spot, strike, time, vol, rate)?;
    Ok(greeks(spot, strike, time, vol, rate, side, theta_scale, rho_scale))
}
