//! Black-Scholes Model
//!
//! Provides:
//! - European option pricing (no dividends)
//! - Implied volatility solver (bracketing bisection with an open upper bound)
//!
//! Argument order throughout is `(spot, strike, time, vol, rate, side)`,
//! with time in years and vol/rate as decimals.

use serde::{Deserialize, Serialize};

use super::normal::std_norm_cdf;
use crate::core::{OptionSide, RiskError, RiskResult};

/// Default starting volatility for the implied-vol search
pub const DEFAULT_IV_GUESS: f64 = 0.1;

/// Default iteration cap for the implied-vol search
pub const DEFAULT_IV_ITERATIONS: usize = 100;

/// The Black-Scholes `d1` term, written `w` here
///
/// `(r·t + v²·t/2 − ln(k/s)) / (v·√t)`. Not finite when `t = 0` or `v = 0`.
pub fn w(spot: f64, strike: f64, time: f64, vol: f64, rate: f64) -> f64 {
    (rate * time + vol * vol * time / 2.0 - (strike / spot).ln()) / (vol * time.sqrt())
}

/// Black-Scholes European option price
///
/// No special handling for `time = 0` or `vol = 0`: the result is whatever
/// the arithmetic produces (typically NaN). Use [`try_price`] to have that
/// reported.
pub fn price(spot: f64, strike: f64, time: f64, vol: f64, rate: f64, side: OptionSide) -> f64 {
    let w = w(spot, strike, time, vol, rate);
    let vol_sqrt_t = vol * time.sqrt();
    let discounted_strike = strike * (-rate * time).exp();

    match side {
        OptionSide::Call => {
            spot * std_norm_cdf(w) - discounted_strike * std_norm_cdf(w - vol_sqrt_t)
        }
        OptionSide::Put => {
            discounted_strike * std_norm_cdf(vol_sqrt_t - w) - spot * std_norm_cdf(-w)
        }
    }
}

/// Price, or `DegenerateInput` when `w` is not finite
pub fn try_price(
    spot: f64,
    strike: f64,
    time: f64,
    vol: f64,
    rate: f64,
    side: OptionSide,
) -> RiskResult<f64> {
    ensure_finite_w(spot, strike, time, vol, rate)?;
    Ok(price(spot, strike, time, vol, rate, side))
}

pub(crate) fn ensure_finite_w(
    spot: f64,
    strike: f64,
    time: f64,
    vol: f64,
    rate: f64,
) -> RiskResult<f64> {
    let w = w(spot, strike, time, vol, rate);
    if w.is_finite() {
        Ok(w)
    } else {
        Err(RiskError::degenerate(format!(
            "w is not finite (spot={}, strike={}, time={}, vol={})",
            spot, strike, time, vol
        )))
    }
}

/// Outcome of an implied-volatility search
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IvSolution {
    /// Last estimate, converged or not
    pub volatility: f64,
    /// Model prices evaluated
    pub iterations: usize,
    /// Whether the model price matched the target to the cent
    pub converged: bool,
}

/// Implied volatility of an observed price
///
/// Same search as [`solve_implied_volatility`] with the default iteration
/// cap; returns the final estimate whether or not it converged.
pub fn implied_volatility(
    market_price: f64,
    spot: f64,
    strike: f64,
    time: f64,
    rate: f64,
    side: OptionSide,
    initial_guess: Option<f64>,
) -> f64 {
    solve_implied_volatility(
        market_price,
        spot,
        strike,
        time,
        rate,
        side,
        initial_guess,
        DEFAULT_IV_ITERATIONS,
    )
    .volatility
}

/// Bisection on volatility with `low = 0` and `high = +∞`
///
/// Stops once `floor(model·100) == floor(target·100)`. While no price above
/// the target has been seen the upper bound stays infinite, so the midpoint
/// step overflows and the estimate doubles instead. There is no convergence
/// guarantee: after `max_iterations` the last estimate is returned as is.
#[allow(clippy::too_many_arguments)]
pub fn solve_implied_volatility(
    market_price: f64,
    spot: f64,
    strike: f64,
    time: f64,
    rate: f64,
    side: OptionSide,
    initial_guess: Option<f64>,
    max_iterations: usize,
) -> IvSolution {
    let mut estimate = match initial_guess {
        Some(guess) if guess != 0.0 && guess.is_finite() => guess,
        _ => DEFAULT_IV_GUESS,
    };
    let mut low = 0.0;
    let mut high = f64::INFINITY;
    let target_cents = (market_price * 100.0).floor();

    for iteration in 1..=max_iterations {
        let model = price(spot, strike, time, estimate, rate, side);

        if (model * 100.0).floor() == target_cents {
            return IvSolution {
                volatility: estimate,
                iterations: iteration,
                converged: true,
            };
        }

        if model > market_price {
            high = estimate;
            estimate = low + (estimate - low) / 2.0;
        } else {
            low = estimate;
            estimate += (high - estimate) / 2.0;
            if !estimate.is_finite() {
                estimate = low * 2.0;
            }
        }
    }

    tracing::warn!(
        "Implied vol did not converge after {} iterations (price={}, spot={}, strike={}, last={})",
        max_iterations,
        market_price,
        spot,
        strike,
        estimate
    );

    IvSolution {
        volatility: estimate,
        iterations: max_iterations,
        converged: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bs_price() {
        // ATM call, 20% vol, 1 year, 5% rate
        let call_price = price(100.0, 100.0, 1.0, 0.20, 0.05, OptionSide::Call);

        // Should be around 10.45 for these parameters
        assert!((call_price - 10.4506).abs() < 0.001);

        let put_price = price(100.0, 100.0, 1.0, 0.20, 0.05, OptionSide::Put);
        assert!((put_price - 5.5735).abs() < 0.001);
    }

    #[test]
    fn test_put_call_parity() {
        let cases = [
            (100.0, 100.0, 1.0, 0.20, 0.05),
            (450.0, 480.0, 0.1, 0.35, 0.0),
            (30.0, 25.0, 2.5, 0.9, -0.01),
            (5000.0, 4800.0, 7.0 / 365.0, 0.12, 0.0525),
        ];
        for (s, k, t, v, r) in cases {
            let call = price(s, k, t, v, r, OptionSide::Call);
            let put = price(s, k, t, v, r, OptionSide::Put);
            let parity = s - k * (-r * t).exp();
            assert!(
                (call - put - parity).abs() < 1e-8 * s,
                "parity failed for {:?}",
                (s, k, t, v, r)
            );
        }
    }

    #[test]
    fn test_degenerate_price() {
        assert!(price(100.0, 100.0, 0.0, 0.2, 0.05, OptionSide::Call).is_nan());

        let err = try_price(100.0, 100.0, 0.5, 0.0, 0.05, OptionSide::Put).unwrap_err();
        assert!(err.is_degenerate());
        assert!(try_price(100.0, 100.0, 0.5, 0.2, 0.05, OptionSide::Put).is_ok());
    }

    #[test]
    fn test_implied_vol_round_trip() {
        for &vol in &[0.05, 0.15, 0.25, 0.6, 1.2, 2.0] {
            for side in [OptionSide::Call, OptionSide::Put] {
                let (spot, strike, time, rate) = (100.0, 105.0, 0.5, 0.03);
                let market_price = price(spot, strike, time, vol, rate, side);
                let solution = solve_implied_volatility(
                    market_price,
                    spot,
                    strike,
                    time,
                    rate,
                    side,
                    None,
                    100,
                );

                assert!(solution.converged, "vol {} {:?} did not converge", vol, side);
                let repriced = price(spot, strike, time, solution.volatility, rate, side);
                assert!((repriced - market_price).abs() < 0.01, "vol {} {:?}", vol, side);
            }
        }
    }

    #[test]
    fn test_implied_vol_recovers_vol() {
        let market_price = price(100.0, 100.0, 0.5, 0.25, 0.05, OptionSide::Call);
        let iv = implied_volatility(market_price, 100.0, 100.0, 0.5, 0.05, OptionSide::Call, None);
        assert!((iv - 0.25).abs() < 0.001);
    }

    #[test]
    fn test_implied_vol_doubles_while_unbounded() {
        // Far above any reachable price: never brackets, so the estimate keeps doubling
        let solution =
            solve_implied_volatility(500.0, 100.0, 100.0, 1.0, 0.0, OptionSide::Call, Some(0.1), 5);
        assert!(!solution.converged);
        assert_eq!(solution.iterations, 5);
        assert!((solution.volatility - 3.2).abs() < 1e-12);
    }

    #[test]
    fn test_implied_vol_zero_guess_uses_default() {
        let solve = |guess| {
            solve_implied_volatility(3.0, 100.0, 100.0, 0.25, 0.0, OptionSide::Call, guess, 100)
        };
        assert_eq!(solve(Some(0.0)), solve(None));
    }
}
