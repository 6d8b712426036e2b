//! options-risk CLI
//!
//! Command-line front end for pricing, implied volatility, symbol decoding
//! and maintenance buying power.
//!
//! ```bash
//! options-risk price --spot 500 --strike 505 --days 30 --vol 0.2 --rate 0.05 --side call
//! options-risk iv --price 7.25 --spot 500 --strike 505 --days 30 --rate 0.05 --side call
//! options-risk decode "SPXW  240315C05000000"
//! options-risk margin --positions positions.json --underlying SPY --multiplier 100
//! ```

use std::fs;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use tracing::Level;

use options_risk::prelude::*;

#[derive(Debug, Parser)]
#[command(name = "options-risk", version, about = "Option analytics and maintenance buying power")]
struct Cli {
    /// Engine configuration (JSON); defaults apply to missing fields
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Price an option and compute its greeks
    Price(ContractArgs),
    /// Greeks only
    Greeks(ContractArgs),
    /// Implied volatility of an observed price
    Iv(IvArgs),
    /// Decode a tastytrade or dxfeed symbol
    Decode {
        symbol: String,
        /// Treat the symbol as a dxfeed streamer symbol
        #[arg(long = "dxfeed")]
        streamer: bool,
    },
    /// Maintenance buying power per expiration
    Margin {
        /// Positions JSON (array or {"data":{"items":[...]}})
        #[arg(long)]
        positions: PathBuf,
        /// Restrict to one underlying symbol
        #[arg(long)]
        underlying: Option<String>,
        #[arg(long, default_value_t = 100.0)]
        multiplier: f64,
    },
}

#[derive(Debug, Args)]
struct MarketArgs {
    #[arg(long)]
    spot: f64,
    #[arg(long)]
    strike: f64,
    /// Calendar days to expiration
    #[arg(long)]
    days: f64,
    /// Annual risk-free rate as a decimal
    #[arg(long, default_value_t = 0.05)]
    rate: f64,
    /// call or put
    #[arg(long)]
    side: OptionSide,
}

impl MarketArgs {
    fn time(&self) -> f64 {
        self.days / 365.0
    }
}

#[derive(Debug, Args)]
struct ContractArgs {
    #[command(flatten)]
    market: MarketArgs,
    /// Volatility as a decimal
    #[arg(long)]
    vol: f64,
}

#[derive(Debug, Args)]
struct IvArgs {
    #[command(flatten)]
    market: MarketArgs,
    /// Observed option price
    #[arg(long)]
    price: f64,
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::INFO })
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(cli) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> RiskResult<()> {
    let config = match &cli.config {
        Some(path) => EngineConfig::from_json(&fs::read_to_string(path)?)?,
        None => EngineConfig::default(),
    };

    match cli.command {
        Command::Price(args) => {
            let analyzer = analyzer(&args.market, config);
            let m = &args.market;
            let valuation = analyzer.value(m.spot, m.strike, m.time(), args.vol, m.side)?;
            print_json(&valuation)
        }
        Command::Greeks(args) => {
            let analyzer = analyzer(&args.market, config);
            let m = &args.market;
            let greeks = analyzer.greeks(m.spot, m.strike, m.time(), args.vol, m.side)?;
            print_json(&greeks)
        }
        Command::Iv(args) => {
            let analyzer = analyzer(&args.market, config);
            let m = &args.market;
            let solution =
                analyzer.implied_volatility(args.price, m.spot, m.strike, m.time(), m.side);
            print_json(&solution)
        }
        Command::Decode { symbol, streamer } => {
            let instrument = if streamer {
                dxfeed::decode(&symbol)
            } else {
                tastytrade::decode(&symbol)
            };
            let instrument = instrument.ok_or_else(|| {
                RiskError::invalid_input(format!("Unrecognized symbol '{}'", symbol))
            })?;
            print_json(&instrument)
        }
        Command::Margin {
            positions,
            underlying,
            multiplier,
        } => {
            let positions = parse_positions(&fs::read_to_string(&positions)?)?;
            let engine = BuyingPowerEngine::with_config(config);
            let result = match underlying {
                Some(underlying) => engine.compute_for(&positions, &underlying, multiplier),
                None => engine.compute(&positions, multiplier),
            };
            tracing::info!(
                "Buying power across {} expirations: {:.2}",
                result.len(),
                result.values().map(|m| m.total()).sum::<f64>()
            );
            print_json(&result)
        }
    }
}

fn analyzer(market: &MarketArgs, config: EngineConfig) -> OptionAnalyzer {
    OptionAnalyzer::with_config(MarketContext::new(market.rate), config)
}

fn print_json<T: Serialize>(value: &T) -> RiskResult<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
