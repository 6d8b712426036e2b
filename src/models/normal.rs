//! Standard normal distribution
//!
//! The CDF is evaluated from its power series,
//!
//! ```text
//! N(x) = 1/2 + φ(x) · Σ x^(2i+1) / (2i+1)!!
//! ```
//!
//! truncated at 100 terms. The truncated series loses accuracy past |x| ≈ 8,
//! so the tails are saturated there.

use std::f64::consts::PI;

/// Number of series terms summed by [`std_norm_cdf`]
const SERIES_TERMS: i32 = 100;

/// Beyond this magnitude the CDF is pinned to 0 or 1
const SATURATION: f64 = 8.0;

/// Standard normal CDF
///
/// Returns exactly 0 for `x <= -8` and 1 for `x >= 8` (including the
/// infinities). A NaN argument is not special-cased and yields NaN.
pub fn std_norm_cdf(x: f64) -> f64 {
    if x >= SATURATION {
        return 1.0;
    }
    if x <= -SATURATION {
        return 0.0;
    }

    let mut probability = 0.0;
    for i in 0..SERIES_TERMS {
        let n = 2 * i + 1;
        probability += x.powi(n) / double_factorial(n);
    }
    probability * std_norm_density(x) + 0.5
}

/// Standard normal PDF
pub fn std_norm_density(x: f64) -> f64 {
    (-0.5 * x * x).exp() / (2.0 * PI).sqrt()
}

/// n!! = n · (n-2) · (n-4) · ... down to 1 or 2
fn double_factorial(n: i32) -> f64 {
    let mut value = 1.0;
    let mut k = n;
    while k > 1 {
        value *= k as f64;
        k -= 2;
    }
    value
}

#[cfg(test)]
mod tests {
    use super::*;
    use statrs::distribution::{Continuous, ContinuousCDF, Normal};

    #[test]
    fn test_double_factorial() {
        assert_eq!(double_factorial(1), 1.0);
        assert_eq!(double_factorial(5), 15.0);
        assert_eq!(double_factorial(7), 105.0);
        assert_eq!(double_factorial(8), 384.0);
    }

    #[test]
    fn test_cdf_at_zero() {
        assert_eq!(std_norm_cdf(0.0), 0.5);
    }

    #[test]
    fn test_cdf_known_values() {
        assert!((std_norm_cdf(1.96) - 0.975).abs() < 0.001);
        assert!((std_norm_cdf(-1.96) - 0.025).abs() < 0.001);
        assert!((std_norm_cdf(1.0) - 0.841_344_746).abs() < 1e-8);
    }

    #[test]
    fn test_cdf_matches_statrs() {
        let normal = Normal::new(0.0, 1.0).unwrap();
        let mut x = -6.0;
        while x <= 6.0 {
            assert!((std_norm_cdf(x) - normal.cdf(x)).abs() < 1e-9, "x = {}", x);
            assert!((std_norm_density(x) - normal.pdf(x)).abs() < 1e-12, "x = {}", x);
            x += 0.25;
        }
    }

    #[test]
    fn test_cdf_symmetry_and_monotonicity() {
        let mut prev = 0.0;
        let mut x = -7.9;
        while x < 7.9 {
            let p = std_norm_cdf(x);
            assert!((std_norm_cdf(-x) - (1.0 - p)).abs() < 1e-9, "x = {}", x);
            assert!(p >= prev - 1e-12, "not monotone at x = {}", x);
            prev = p;
            x += 0.1;
        }
    }

    #[test]
    fn test_cdf_saturates() {
        assert_eq!(std_norm_cdf(8.0), 1.0);
        assert_eq!(std_norm_cdf(12.5), 1.0);
        assert_eq!(std_norm_cdf(-8.0), 0.0);
        assert_eq!(std_norm_cdf(f64::INFINITY), 1.0);
        assert_eq!(std_norm_cdf(f64::NEG_INFINITY), 0.0);
    }

    #[test]
    fn test_cdf_nan_propagates() {
        assert!(std_norm_cdf(f64::NAN).is_nan());
    }
}
