//! Pricing models
//!
//! Implements:
//! - Standard normal kernel (series CDF, density)
//! - Black-Scholes price and implied volatility
//! - Analytic Greeks
//! - OptionAnalyzer facade bound to a market context

pub mod analyzer;
pub mod black_scholes;
pub mod greeks;
pub mod normal;

pub use analyzer::*;
pub use black_scholes::*;
pub use greeks::*;
pub use normal::*;
