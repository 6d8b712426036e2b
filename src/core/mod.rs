//! Core data types for options-risk
//!
//! Defines fundamental types:
//! - Instrument / OptionLeg: decoded equities, futures and options
//! - Position: a raw broker symbol with direction, quantity and multiplier
//! - Greeks: option sensitivities
//! - EngineConfig / MarketContext: tunables and market inputs

pub mod config;
pub mod error;
pub mod greeks;
pub mod math;
pub mod option;
pub mod position;

pub use config::*;
pub use error::*;
pub use greeks::*;
pub use math::*;
pub use option::*;
pub use position::*;
