//! Maintenance buying power for equity option books
//!
//! Positions are bucketed by expiration. Within a bucket each short unit is
//! paired with the first long of the same side that still has units left:
//!
//! - calls: shorts and longs walked by strike ascending, a pair costs
//!   `long − short`
//! - puts: both walked by strike descending, a pair costs `short − long`
//! - a short with no long left is naked and costs `strike × naked rate`
//!
//! Both totals are multiplied by the contract multiplier. Sorting is stable
//! and symbols keep the order in which they first appear in the position
//! list, so longs at the same strike are consumed first-seen first.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::core::{Direction, EngineConfig, OptionSide, Position};

/// Margin for one expiration
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MarginRequirement {
    pub calls: f64,
    pub puts: f64,
}

impl MarginRequirement {
    pub fn total(&self) -> f64 {
        self.calls + self.puts
    }
}

/// Margin per expiration date
pub type MarginResult = BTreeMap<NaiveDate, MarginRequirement>;

/// Outstanding units of one option symbol
#[derive(Debug, Clone, PartialEq)]
pub struct LegCount {
    pub symbol: String,
    pub strike: f64,
    pub quantity: u32,
}

/// Symbol -> unit count, kept in first-seen order
#[derive(Debug, Clone, Default)]
pub struct LegCounts {
    entries: Vec<LegCount>,
}

impl LegCounts {
    fn add(&mut self, symbol: &str, strike: f64, quantity: u32) {
        match self.entries.iter_mut().find(|e| e.symbol == symbol) {
            Some(entry) => entry.quantity = entry.quantity.saturating_add(quantity),
            None => self.entries.push(LegCount {
                symbol: symbol.to_string(),
                strike,
                quantity,
            }),
        }
    }

    pub fn entries(&self) -> &[LegCount] {
        &self.entries
    }

    pub fn total(&self) -> u64 {
        self.entries.iter().map(|e| u64::from(e.quantity)).sum()
    }

    fn sorted(&self, ascending: bool) -> Vec<LegCount> {
        let mut sorted = self.entries.clone();
        if ascending {
            sorted.sort_by(|a, b| a.strike.total_cmp(&b.strike));
        } else {
            sorted.sort_by(|a, b| b.strike.total_cmp(&a.strike));
        }
        sorted
    }
}

/// Working state for one expiration
#[derive(Debug, Clone)]
pub struct ExpirationBucket {
    pub expiration: NaiveDate,
    pub short_calls: LegCounts,
    pub long_calls: LegCounts,
    pub short_puts: LegCounts,
    pub long_puts: LegCounts,
    pub calls: f64,
    pub puts: f64,
}

impl ExpirationBucket {
    fn new(expiration: NaiveDate) -> Self {
        Self {
            expiration,
            short_calls: LegCounts::default(),
            long_calls: LegCounts::default(),
            short_puts: LegCounts::default(),
            long_puts: LegCounts::default(),
            calls: 0.0,
            puts: 0.0,
        }
    }

    fn settle(&mut self, multiplier: f64, naked_rate: f64) {
        let calls = net_shorts(&self.short_calls, &self.long_calls, OptionSide::Call, naked_rate);
        let puts = net_shorts(&self.short_puts, &self.long_puts, OptionSide::Put, naked_rate);
        self.calls = calls * multiplier;
        self.puts = puts * multiplier;
        tracing::debug!(
            "Buying power {}: calls {:.2}, puts {:.2}",
            self.expiration,
            self.calls,
            self.puts
        );
    }
}

/// Pair shorts against longs of one side and return the per-unit requirement
fn net_shorts(shorts: &LegCounts, longs: &LegCounts, side: OptionSide, naked_rate: f64) -> f64 {
    let ascending = side == OptionSide::Call;
    let shorts = shorts.sorted(ascending);
    let mut longs = longs.sorted(ascending);

    let mut total = 0.0;
    for short in &shorts {
        for _ in 0..short.quantity {
            match longs.iter_mut().find(|l| l.quantity > 0) {
                Some(long) => {
                    long.quantity -= 1;
                    let width = match side {
                        OptionSide::Call => long.strike - short.strike,
                        OptionSide::Put => short.strike - long.strike,
                    };
                    tracing::debug!("Vertical {} / {}: width {}", short.symbol, long.symbol, width);
                    total += width;
                }
                None => {
                    tracing::debug!("Naked {} at {}", short.symbol, short.strike);
                    total += short.strike * naked_rate;
                }
            }
        }
    }
    total
}

/// Computes maintenance buying power from positions
#[derive(Debug, Clone, Default)]
pub struct BuyingPowerEngine {
    config: EngineConfig,
}

impl BuyingPowerEngine {
    /// Create an engine with default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with custom configuration
    pub fn with_config(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Bucket option positions by expiration, in first-seen order
    ///
    /// Positions that are not options (or whose symbol did not decode) are
    /// skipped and do not open a bucket.
    pub fn buckets(&self, positions: &[Position]) -> Vec<ExpirationBucket> {
        let mut buckets: Vec<ExpirationBucket> = Vec::new();

        for position in positions {
            let Some(leg) = position.instrument.as_ref().and_then(|i| i.option_leg()) else {
                continue;
            };

            let index = match buckets.iter().position(|b| b.expiration == leg.expiration) {
                Some(index) => index,
                None => {
                    buckets.push(ExpirationBucket::new(leg.expiration));
                    buckets.len() - 1
                }
            };
            let bucket = &mut buckets[index];

            let counts = match (leg.side, position.direction) {
                (OptionSide::Call, Direction::Short) => &mut bucket.short_calls,
                (OptionSide::Call, Direction::Long) => &mut bucket.long_calls,
                (OptionSide::Put, Direction::Short) => &mut bucket.short_puts,
                (OptionSide::Put, Direction::Long) => &mut bucket.long_puts,
            };
            counts.add(&position.symbol, leg.strike, position.quantity);
        }

        buckets
    }

    /// Buckets with their `calls` / `puts` requirements filled in
    pub fn settled_buckets(
        &self,
        positions: &[Position],
        multiplier: f64,
    ) -> Vec<ExpirationBucket> {
        let mut buckets = self.buckets(positions);
        for bucket in &mut buckets {
            bucket.settle(multiplier, self.config.naked_margin_rate);
        }
        buckets
    }

    /// Margin per expiration for positions in a single underlying
    pub fn compute(&self, positions: &[Position], multiplier: f64) -> MarginResult {
        self.settled_buckets(positions, multiplier)
            .into_iter()
            .map(|b| {
                (
                    b.expiration,
                    MarginRequirement {
                        calls: b.calls,
                        puts: b.puts,
                    },
                )
            })
            .collect()
    }

    /// Margin per expiration for the positions of `underlying` in a mixed book
    pub fn compute_for(
        &self,
        positions: &[Position],
        underlying: &str,
        multiplier: f64,
    ) -> MarginResult {
        let selected: Vec<Position> = positions
            .iter()
            .filter(|p| p.underlying_symbol == underlying)
            .cloned()
            .collect();
        self.compute(&selected, multiplier)
    }
}

/// Maintenance buying power with the default naked rate
pub fn maintenance_buying_power(positions: &[Position], multiplier: f64) -> MarginResult {
    BuyingPowerEngine::new().compute(positions, multiplier)
}

/// [`maintenance_buying_power`] restricted to one underlying
pub fn maintenance_buying_power_for(
    positions: &[Position],
    underlying: &str,
    multiplier: f64,
) -> MarginResult {
    BuyingPowerEngine::new().compute_for(positions, underlying, multiplier)
}
