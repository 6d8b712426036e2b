//! Open option units per expiration

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::core::{Direction, OptionSide, Position};

/// Short/long call/put units for one expiration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quantity {
    pub short_calls: u32,
    pub long_calls: u32,
    pub short_puts: u32,
    pub long_puts: u32,
}

pub type Quantities = BTreeMap<NaiveDate, Quantity>;

/// Count option units held in `underlying`, by expiration
pub fn calculate_quantities(positions: &[Position], underlying: &str) -> Quantities {
    let mut quantities = Quantities::new();

    for position in positions.iter().filter(|p| p.underlying_symbol == underlying) {
        let Some(leg) = position.instrument.as_ref().and_then(|i| i.option_leg()) else {
            continue;
        };

        let entry = quantities.entry(leg.expiration).or_default();
        let slot = match (leg.side, position.direction) {
            (OptionSide::Call, Direction::Short) => &mut entry.short_calls,
            (OptionSide::Call, Direction::Long) => &mut entry.long_calls,
            (OptionSide::Put, Direction::Short) => &mut entry.short_puts,
            (OptionSide::Put, Direction::Long) => &mut entry.long_puts,
        };
        *slot = slot.saturating_add(position.quantity);
    }

    quantities
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calculate_quantities() {
        let positions = vec![
            Position::new("SPY", "SPY   240119C00460000", Direction::Short, 2, 100.0),
            Position::new("SPY", "SPY   240119C00470000", Direction::Long, 2, 100.0),
            Position::new("SPY", "SPY   240119P00440000", Direction::Short, 1, 100.0),
            Position::new("SPY", "SPY   240216P00430000", Direction::Long, 4, 100.0),
            Position::new("SPY", "SPY", Direction::Long, 100, 1.0),
            Position::new("QQQ", "QQQ   240119P00400000", Direction::Short, 7, 100.0),
        ];

        let quantities = calculate_quantities(&positions, "SPY");
        assert_eq!(quantities.len(), 2);

        let jan = quantities[&NaiveDate::from_ymd_opt(2024, 1, 19).unwrap()];
        assert_eq!(
            jan,
            Quantity {
                short_calls: 2,
                long_calls: 2,
                short_puts: 1,
                long_puts: 0
            }
        );

        let feb = quantities[&NaiveDate::from_ymd_opt(2024, 2, 16).unwrap()];
        assert_eq!(feb.long_puts, 4);
    }

    #[test]
    fn test_quantities_saturate() {
        let positions = vec![
            Position::new("SPY", "SPY   240119C00460000", Direction::Long, u32::MAX, 100.0),
            Position::new("SPY", "SPY   240119C00470000", Direction::Long, 5, 100.0),
        ];
        let quantities = calculate_quantities(&positions, "SPY");
        let jan = quantities[&NaiveDate::from_ymd_opt(2024, 1, 19).unwrap()];
        assert_eq!(jan.long_calls, u32::MAX);
    }
}
