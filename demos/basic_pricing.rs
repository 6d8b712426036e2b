//! Example: pricing, greeks, implied volatility and buying power
//!
//! Run with: cargo run --example basic_pricing

use chrono::NaiveDate;
use options_risk::prelude::*;

fn main() {
    let spot = 500.0;
    let strike = 505.0;
    let time = 0.25; // 3 months
    let rate = 0.05;
    let vol = 0.20;

    println!("=== Black-Scholes Pricing ===\n");
    println!("Spot:     ${:.2}", spot);
    println!("Strike:   ${:.2}", strike);
    println!("Time:     {:.2} years ({:.0} days)", time, time * 365.0);
    println!("Rate:     {:.1}%", rate * 100.0);
    println!("Vol:      {:.1}%\n", vol * 100.0);

    let call_price = bs_price(spot, strike, time, vol, rate, OptionSide::Call);
    let put_price = bs_price(spot, strike, time, vol, rate, OptionSide::Put);
    println!("Call Price: ${:.4}", call_price);
    println!("Put Price:  ${:.4}", put_price);

    // C - P = S - K*e^(-rT)
    let parity_lhs = call_price - put_price;
    let parity_rhs = spot - strike * (-rate * time).exp();
    println!("\nPut-Call Parity Check:");
    println!("  C - P = {:.4}", parity_lhs);
    println!("  S - K*e^(-rT) = {:.4}", parity_rhs);
    println!("  Difference: {:.6}", (parity_lhs - parity_rhs).abs());

    let g = bs_greeks(spot, strike, time, vol, rate, OptionSide::Call, 365.0, 100.0);
    println!("\n=== Call Greeks ===\n");
    println!("Delta: {:.4}", g.delta);
    println!("Gamma: {:.6}", g.gamma);
    println!("Theta: {:.4} (per day)", g.theta);
    println!("Vega:  {:.4} (per vol point)", g.vega);
    println!("Rho:   {:.4} (per 1%)", g.rho);

    println!("\n=== Implied Volatility ===\n");
    let analyzer = OptionAnalyzer::new(MarketContext::new(rate));
    for target_vol in [0.15, 0.20, 0.35] {
        let observed = bs_price(spot, strike, time, target_vol, rate, OptionSide::Call);
        let solution = analyzer.implied_volatility(observed, spot, strike, time, OptionSide::Call);
        println!(
            "Price ${:>8.4} -> IV {:.4} ({} iterations, converged: {})",
            observed, solution.volatility, solution.iterations, solution.converged
        );
    }

    println!("\n=== Symbology ===\n");
    if let Some(expiration) = NaiveDate::from_ymd_opt(2024, 3, 15) {
        let leg = OptionLeg::new("spx", expiration, OptionSide::Call, 5000.0);
        println!("tastytrade: {:?}", leg.tastytrade_symbol);
        println!("dxfeed:     {}", leg.dxfeed_symbol);
        println!("decoded:    {:?}", tastytrade::decode(&leg.tastytrade_symbol));
    }

    println!("\n=== Maintenance Buying Power ===\n");
    let positions = vec![
        Position::new("SPY", "SPY   240119C00460000", Direction::Short, 1, 100.0),
        Position::new("SPY", "SPY   240119C00470000", Direction::Long, 1, 100.0),
        Position::new("SPY", "SPY   240119P00440000", Direction::Short, 2, 100.0),
        Position::new("SPY", "SPY   240119P00430000", Direction::Long, 1, 100.0),
    ];

    for (expiration, margin) in maintenance_buying_power(&positions, 100.0) {
        println!(
            "{}  calls ${:>9.2}  puts ${:>9.2}  total ${:>9.2}",
            expiration,
            margin.calls,
            margin.puts,
            margin.total()
        );
    }
}
