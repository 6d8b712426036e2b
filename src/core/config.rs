//! Engine configuration and market context
//!
//! Market inputs that the dashboard used to cache globally (the risk-free
//! rate) travel in an explicit [`MarketContext`]; tunables live in
//! [`EngineConfig`].

use serde::{Deserialize, Serialize};

use super::error::{RiskError, RiskResult};

/// How greeks and prices react when `w` is not finite (t = 0 or v = 0)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DegenerateMode {
    /// Substitute the limiting values (delta 0/1, other greeks 0)
    #[default]
    Legacy,
    /// Report `RiskError::DegenerateInput`
    Strict,
}

/// Engine tunables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Margin charged per naked short, as a fraction of strike
    /// Default: 0.20
    pub naked_margin_rate: f64,

    /// Days theta is scaled by (365 calendar or 252 trading)
    /// Default: 365
    pub theta_scale: f64,

    /// Rho scale (100 = per 1%, 10000 = per basis point)
    /// Default: 100
    pub rho_scale: f64,

    /// Starting volatility for the implied-vol search
    /// Default: 0.1
    pub iv_initial_guess: f64,

    /// Iteration cap for the implied-vol search
    /// Default: 100
    pub iv_max_iterations: usize,

    pub degenerate_mode: DegenerateMode,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            naked_margin_rate: 0.20,
            theta_scale: 365.0,
            rho_scale: 100.0,
            iv_initial_guess: 0.1,
            iv_max_iterations: 100,
            degenerate_mode: DegenerateMode::Legacy,
        }
    }
}

impl EngineConfig {
    /// Strict settings: degenerate inputs are errors
    pub fn strict() -> Self {
        Self {
            degenerate_mode: DegenerateMode::Strict,
            ..Default::default()
        }
    }

    /// Theta per trading day instead of calendar day
    pub fn trading_days() -> Self {
        Self {
            theta_scale: 252.0,
            ..Default::default()
        }
    }

    /// Load from a JSON document; missing fields take their defaults
    pub fn from_json(json: &str) -> RiskResult<Self> {
        let config: EngineConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> RiskResult<()> {
        if !(self.naked_margin_rate.is_finite() && self.naked_margin_rate >= 0.0) {
            return Err(RiskError::invalid_input("naked_margin_rate must be a non-negative number"));
        }
        if !(self.theta_scale.is_finite() && self.theta_scale > 0.0) {
            return Err(RiskError::invalid_input("theta_scale must be positive"));
        }
        if !(self.rho_scale.is_finite() && self.rho_scale > 0.0) {
            return Err(RiskError::invalid_input("rho_scale must be positive"));
        }
        if !(self.iv_initial_guess.is_finite() && self.iv_initial_guess > 0.0) {
            return Err(RiskError::invalid_input("iv_initial_guess must be positive"));
        }
        if self.iv_max_iterations == 0 {
            return Err(RiskError::invalid_input("iv_max_iterations must be at least 1"));
        }
        Ok(())
    }
}

/// Market inputs shared by every pricing call
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarketContext {
    /// Annual risk-free rate as a decimal
    pub risk_free_rate: f64,
}

impl MarketContext {
    pub fn new(risk_free_rate: f64) -> Self {
        Self { risk_free_rate }
    }

    /// From the broker's string form (`"risk-free-rate": "0.0525"`)
    pub fn from_rate_str(rate: &str) -> RiskResult<Self> {
        let risk_free_rate: f64 = rate
            .trim()
            .parse()
            .map_err(|_| RiskError::data(format!("Invalid risk-free rate '{}'", rate)))?;
        if !risk_free_rate.is_finite() {
            return Err(RiskError::data(format!("Invalid risk-free rate '{}'", rate)));
        }
        Ok(Self { risk_free_rate })
    }
}
