//! Option Greeks
//!
//! First and second order sensitivities for options.

use serde::{Deserialize, Serialize};

use super::position::Position;

/// Option Greeks (sensitivities)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Greeks {
    /// Delta: dV/dS (sensitivity to spot)
    pub delta: f64,
    /// Gamma: d²V/dS² (sensitivity of delta to spot)
    pub gamma: f64,
    /// Theta: dV/dt (time decay, per `theta_scale` days)
    pub theta: f64,
    /// Vega: dV/dσ per one volatility point
    pub vega: f64,
    /// Rho: dV/dr per `rho_scale`
    pub rho: f64,
}

impl Greeks {
    pub fn new(delta: f64, gamma: f64, theta: f64, vega: f64, rho: f64) -> Self {
        Self {
            delta,
            gamma,
            theta,
            vega,
            rho,
        }
    }

    /// Scale Greeks by a factor (e.g., for notional)
    pub fn scale(&self, factor: f64) -> Self {
        Self {
            delta: self.delta * factor,
            gamma: self.gamma * factor,
            theta: self.theta * factor,
            vega: self.vega * factor,
            rho: self.rho * factor,
        }
    }

    /// Add two Greeks (for portfolio)
    pub fn add(&self, other: &Greeks) -> Self {
        Self {
            delta: self.delta + other.delta,
            gamma: self.gamma + other.gamma,
            theta: self.theta + other.theta,
            vega: self.vega + other.vega,
            rho: self.rho + other.rho,
        }
    }
}

/// Greeks summed over a book of positions
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PortfolioGreeks {
    /// Net share-equivalent greeks (direction × quantity × multiplier applied)
    pub net: Greeks,
    /// Net delta in dollars
    pub delta_dollars: f64,
    /// Number of positions
    pub num_positions: usize,
}

impl PortfolioGreeks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a position's per-contract Greeks
    pub fn add_position(&mut self, greeks: &Greeks, position: &Position, spot: f64) {
        let exposure = position.signed_quantity() * position.multiplier;
        let weighted = greeks.scale(exposure);
        self.net = self.net.add(&weighted);
        self.delta_dollars += weighted.delta * spot;
        self.num_positions += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Direction;

    #[test]
    fn test_scale_and_add() {
        let g = Greeks::new(0.5, 0.02, -0.05, 0.1, 0.03);
        let doubled = g.add(&g);
        assert_eq!(doubled, g.scale(2.0));
    }

    #[test]
    fn test_portfolio_signs_short_positions() {
        let call = Greeks::new(0.5, 0.02, -0.05, 0.1, 0.03);
        let long = Position::new("SPY", "SPY   240119C00450000", Direction::Long, 2, 100.0);
        let short = Position::new("SPY", "SPY   240119C00460000", Direction::Short, 1, 100.0);

        let mut book = PortfolioGreeks::new();
        book.add_position(&call, &long, 450.0);
        book.add_position(&call, &short, 450.0);

        assert_eq!(book.num_positions, 2);
        assert!((book.net.delta - 50.0).abs() < 1e-9);
        assert!((book.net.theta - -5.0).abs() < 1e-9);
        assert!((book.delta_dollars - 22_500.0).abs() < 1e-6);
    }
}
