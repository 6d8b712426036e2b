//! Margin and exposure aggregation over a position book
//!
//! - Maintenance buying power: short/long strikes netted into verticals,
//!   remaining shorts charged as naked
//! - Unit counts per expiration

mod buying_power;
mod quantities;

pub use buying_power::*;
pub use quantities::*;
