//! OptionAnalyzer - pricing, greeks and implied vol behind one context
//!
//! Binds a [`MarketContext`] (risk-free rate) and an [`EngineConfig`] so
//! call sites pass only the contract terms.

use serde::{Deserialize, Serialize};

use super::black_scholes::{self, IvSolution};
use super::greeks;
use crate::core::{DegenerateMode, EngineConfig, Greeks, MarketContext, OptionSide, RiskResult};

/// Price and greeks of one contract
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Valuation {
    pub price: f64,
    pub greeks: Greeks,
}

/// Pricing facade over the Black-Scholes functions
#[derive(Debug, Clone)]
pub struct OptionAnalyzer {
    context: MarketContext,
    config: EngineConfig,
}

impl OptionAnalyzer {
    /// Create an analyzer with default configuration
    pub fn new(context: MarketContext) -> Self {
        Self {
            context,
            config: EngineConfig::default(),
        }
    }

    /// Create with custom configuration
    pub fn with_config(context: MarketContext, config: EngineConfig) -> Self {
        Self { context, config }
    }

    pub fn context(&self) -> &MarketContext {
        &self.context
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Replace the market context (e.g. after a rate refresh)
    pub fn set_context(&mut self, context: MarketContext) {
        self.context = context;
    }

    /// Option value
    ///
    /// In strict mode a non-finite `w` is an error; in legacy mode the raw
    /// formula result (possibly NaN) is returned.
    pub fn price(
        &self,
        spot: f64,
        strike: f64,
        time: f64,
        vol: f64,
        side: OptionSide,
    ) -> RiskResult<f64> {
        let rate = self.context.risk_free_rate;
        match self.config.degenerate_mode {
            DegenerateMode::Strict => black_scholes::try_price(spot, strike, time, vol, rate, side),
            DegenerateMode::Legacy => Ok(black_scholes::price(spot, strike, time, vol, rate, side)),
        }
    }

    /// Greeks at the configured theta/rho scales
    pub fn greeks(
        &self,
        spot: f64,
        strike: f64,
        time: f64,
        vol: f64,
        side: OptionSide,
    ) -> RiskResult<Greeks> {
        let rate = self.context.risk_free_rate;
        let (theta_scale, rho_scale) = (self.config.theta_scale, self.config.rho_scale);
        match self.config.degenerate_mode {
            DegenerateMode::Strict => {
                greeks::try_greeks(spot, strike, time, vol, rate, side, theta_scale, rho_scale)
            }
            DegenerateMode::Legacy => Ok(greeks::greeks(
                spot,
                strike,
                time,
                vol,
                rate,
                side,
                theta_scale,
                rho_scale,
            )),
        }
    }

    /// Price and greeks together
    pub fn value(
        &self,
        spot: f64,
        strike: f64,
        time: f64,
        vol: f64,
        side: OptionSide,
    ) -> RiskResult<Valuation> {
        Ok(Valuation {
            price: self.price(spot, strike, time, vol, side)?,
            greeks: self.greeks(spot, strike, time, vol, side)?,
        })
    }

    /// Implied volatility using the configured seed and iteration cap
    pub fn implied_volatility(
        &self,
        market_price: f64,
        spot: f64,
        strike: f64,
        time: f64,
        side: OptionSide,
    ) -> IvSolution {
        black_scholes::solve_implied_volatility(
            market_price,
            spot,
            strike,
            time,
            self.context.risk_free_rate,
            side,
            Some(self.config.iv_initial_guess),
            self.config.iv_max_iterations,
        )
    }
}
