//! # options-risk - Option analytics and buying power
//!
//! Pricing, risk and margin primitives for an options trading dashboard.
//!
//! ## Key Components
//!
//! - **Normal kernel**: series-expansion CDF saturated at ±8
//! - **Black-Scholes**: price and implied volatility (open-bracket bisection)
//! - **Greeks**: delta, gamma, theta, vega, rho with limiting fallbacks
//! - **Symbology**: tastytrade (broker) and dxfeed (market data) symbols
//! - **Margin**: maintenance buying power with vertical-spread netting
//!
//! ## Usage
//!
//! ```rust
//! use options_risk::prelude::*;
//!
//! let analyzer = OptionAnalyzer::new(MarketContext::new(0.05));
//! let call = analyzer.value(100.0, 105.0, 0.25, 0.2, OptionSide::Call).unwrap();
//! assert!(call.greeks.delta > 0.0 && call.greeks.delta < 1.0);
//!
//! let positions = vec![
//!     Position::new("SPY", "SPY   240119C00100000", Direction::Short, 1, 100.0),
//!     Position::new("SPY", "SPY   240119C00110000", Direction::Long, 1, 100.0),
//! ];
//! let margin = maintenance_buying_power(&positions, 100.0);
//! assert_eq!(margin.values().next().unwrap().calls, 1000.0);
//! ```
//!
//! Everything here is a pure function of its arguments; nothing is fetched
//! or cached.

pub mod core;
pub mod margin;
pub mod models;
pub mod symbology;

/// Prelude with commonly used types
pub mod prelude {
    // Core types
    pub use crate::core::{
        days_to_expiration, option_underlyings, parse_positions, round_number, DegenerateMode,
        Direction, EngineConfig, Greeks, Instrument, MarketContext, OptionLeg, OptionSide,
        PortfolioGreeks, Position, RiskError, RiskResult,
    };

    // Models
    pub use crate::models::{
        greeks as bs_greeks, implied_volatility, price as bs_price, solve_implied_volatility,
        std_norm_cdf, std_norm_density, try_greeks, try_price, IvSolution, OptionAnalyzer,
        Valuation,
    };

    // Symbology
    pub use crate::symbology::{dxfeed, tastytrade};

    // Margin
    pub use crate::margin::{
        calculate_quantities, maintenance_buying_power, maintenance_buying_power_for,
        BuyingPowerEngine, MarginRequirement, MarginResult, Quantities, Quantity,
    };
}

// Re-export main types at crate root
pub use crate::core::{RiskError, RiskResult};
pub use crate::models::OptionAnalyzer;
