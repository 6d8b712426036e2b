//! Position records
//!
//! A position pairs a raw broker symbol with its decoded instrument. Records
//! arrive from the broker's positions endpoint in kebab-case JSON, either
//! bare or wrapped in the `{"data": {"items": [...]}}` envelope.

use serde::{Deserialize, Serialize};

use super::error::{RiskError, RiskResult};
use super::option::Instrument;
use crate::symbology::tastytrade;

/// Direction of a position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Long,
    Short,
}

impl Direction {
    /// +1 for long, -1 for short
    pub fn sign(&self) -> f64 {
        match self {
            Direction::Long => 1.0,
            Direction::Short => -1.0,
        }
    }
}

/// An open position
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub underlying_symbol: String,
    /// Raw broker symbol
    pub symbol: String,
    /// Decoded from `symbol`; `None` when the symbol could not be decoded
    pub instrument: Option<Instrument>,
    pub direction: Direction,
    pub quantity: u32,
    pub multiplier: f64,
}

impl Position {
    pub fn new(
        underlying_symbol: impl Into<String>,
        symbol: impl Into<String>,
        direction: Direction,
        quantity: u32,
        multiplier: f64,
    ) -> Self {
        let symbol = symbol.into();
        let instrument = tastytrade::decode(&symbol);
        if instrument.is_none() {
            tracing::warn!("Could not decode position symbol {:?}", symbol);
        }

        Self {
            underlying_symbol: underlying_symbol.into(),
            symbol,
            instrument,
            direction,
            quantity,
            multiplier,
        }
    }

    pub fn is_option(&self) -> bool {
        self.instrument.as_ref().map(|i| i.is_option()).unwrap_or(false)
    }

    /// Quantity signed by direction
    pub fn signed_quantity(&self) -> f64 {
        self.direction.sign() * self.quantity as f64
    }
}

/// Wire record as delivered by the broker
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct PositionRecord {
    pub underlying_symbol: String,
    pub symbol: String,
    pub quantity_direction: String,
    pub quantity: f64,
    #[serde(default = "default_multiplier")]
    pub multiplier: f64,
    #[serde(default)]
    pub instrument_type: Option<String>,
}

fn default_multiplier() -> f64 {
    1.0
}

impl TryFrom<PositionRecord> for Position {
    type Error = RiskError;

    fn try_from(record: PositionRecord) -> RiskResult<Self> {
        let direction = match record.quantity_direction.as_str() {
            "Long" => Direction::Long,
            "Short" => Direction::Short,
            other => {
                return Err(RiskError::data(format!(
                    "Unsupported quantity-direction '{}' for {}",
                    other, record.symbol
                )))
            }
        };

        if !record.quantity.is_finite() || record.quantity < 0.0 || record.quantity.fract() != 0.0 {
            return Err(RiskError::data(format!(
                "Quantity {} for {} is not a non-negative integer",
                record.quantity, record.symbol
            )));
        }
        if record.quantity > u32::MAX as f64 {
            return Err(RiskError::data(format!(
                "Quantity {} for {} exceeds {}",
                record.quantity,
                record.symbol,
                u32::MAX
            )));
        }

        Ok(Position::new(
            record.underlying_symbol,
            record.symbol,
            direction,
            record.quantity as u32,
            record.multiplier,
        ))
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum PositionsPayload {
    Envelope { data: PositionItems },
    Bare(Vec<PositionRecord>),
}

#[derive(Deserialize)]
struct PositionItems {
    items: Vec<PositionRecord>,
}

/// Parse a positions payload and decode every symbol
pub fn parse_positions(json: &str) -> RiskResult<Vec<Position>> {
    let records = match serde_json::from_str::<PositionsPayload>(json)? {
        PositionsPayload::Envelope { data } => data.items,
        PositionsPayload::Bare(items) => items,
    };

    let positions = records
        .into_iter()
        .map(Position::try_from)
        .collect::<RiskResult<Vec<_>>>()?;

    tracing::info!("Loaded {} positions", positions.len());
    Ok(positions)
}

/// Distinct underlyings holding option positions, sorted
pub fn option_underlyings(positions: &[Position]) -> Vec<String> {
    let mut underlyings: Vec<String> = positions
        .iter()
        .filter(|p| p.is_option())
        .map(|p| p.underlying_symbol.clone())
        .collect();
    underlyings.sort();
    underlyings.dedup();
    underlyings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::OptionSide;

    const FEED: &str = r#"{
        "data": {
            "items": [
                {
                    "account-number": "5WX00000",
                    "underlying-symbol": "SPY",
                    "symbol": "SPY   240119P00450000",
                    "instrument-type": "Equity Option",
                    "quantity-direction": "Short",
                    "quantity": 2,
                    "multiplier": 100
                },
                {
                    "underlying-symbol": "AAPL",
                    "symbol": "AAPL",
                    "instrument-type": "Equity",
                    "quantity-direction": "Long",
                    "quantity": 100,
                    "multiplier": 1
                },
                {
                    "underlying-symbol": "/CL",
                    "symbol": "./CLZ2 LO1X2 221104C91",
                    "instrument-type": "Future Option",
                    "quantity-direction": "Long",
                    "quantity": 1,
                    "multiplier": 1000
                }
            ]
        }
    }"#;

    #[test]
    fn test_parse_envelope() {
        let positions = parse_positions(FEED).unwrap();
        assert_eq!(positions.len(), 3);

        let put = &positions[0];
        assert_eq!(put.direction, Direction::Short);
        assert_eq!(put.quantity, 2);
        assert_eq!(put.signed_quantity(), -2.0);
        let instrument = put.instrument.as_ref().unwrap();
        assert_eq!(instrument.side(), Some(OptionSide::Put));
        assert_eq!(instrument.strike(), Some(450.0));

        assert!(!positions[1].is_option());
        assert!(positions[2].is_option());
    }

    #[test]
    fn test_parse_bare_array() {
        let json = r#"[{"underlying-symbol": "QQQ", "symbol": "QQQ   240216C00400000",
                        "quantity-direction": "Long", "quantity": 3}]"#;
        let positions = parse_positions(json).unwrap();
        assert_eq!(positions[0].quantity, 3);
        assert_eq!(positions[0].multiplier, 1.0);
    }

    #[test]
    fn test_rejects_unknown_direction() {
        let json = r#"[{"underlying-symbol": "QQQ", "symbol": "QQQ",
                        "quantity-direction": "Zero", "quantity": 0}]"#;
        assert!(matches!(parse_positions(json), Err(RiskError::Data(_))));
    }

    #[test]
    fn test_rejects_fractional_quantity() {
        let json = r#"[{"underlying-symbol": "QQQ", "symbol": "QQQ",
                        "quantity-direction": "Long", "quantity": 1.5}]"#;
        assert!(parse_positions(json).is_err());
    }

    #[test]
    fn test_rejects_quantity_beyond_u32() {
        let json = r#"[{"underlying-symbol": "QQQ", "symbol": "QQQ",
                        "quantity-direction": "Long", "quantity": 5000000000}]"#;
        assert!(matches!(parse_positions(json), Err(RiskError::Data(_))));

        let json = r#"[{"underlying-symbol": "QQQ", "symbol": "QQQ",
                        "quantity-direction": "Long", "quantity": 4294967295}]"#;
        assert_eq!(parse_positions(json).unwrap()[0].quantity, u32::MAX);
    }

    #[test]
    fn test_option_underlyings() {
        let positions = parse_positions(FEED).unwrap();
        assert_eq!(option_underlyings(&positions), vec!["/CL".to_string(), "SPY".to_string()]);
    }
}
