//! tastytrade broker symbols
//!
//! Equity options use the fixed 21-character OCC layout:
//!
//! ```text
//! SPXW  240315C05000000
//! |     |     ||
//! |     |     |strike x 1000, 8 digits
//! |     |     side
//! |     YYMMDD
//! root, space-padded to 6
//! ```
//!
//! Futures are `/` + contract code (`/ESZ3`); future options are
//! `./<contract> <option code> <YYMMDD><C|P><strike>` (`./CLZ2 LO1X2 221104C91`).
//! Anything else is treated as an equity ticker.

use chrono::NaiveDate;

use super::{dxfeed, from_weekly_root, parse_yymmdd, to_weekly_root};
use crate::core::{round_number, Instrument, OptionLeg, OptionSide};

/// Width of an OCC equity option symbol
pub const OCC_SYMBOL_LEN: usize = 21;

/// Length of the option sub-code in a future option symbol (e.g. "LO1X2")
const FUTURE_OPTION_CODE_LEN: usize = 5;

/// Thousandths of a strike that fit the 8-digit strike field
const MAX_STRIKE_THOUSANDTHS: f64 = 99_999_999.0;

/// Encode an equity option as a 21-character broker symbol
///
/// Strikes must lie in `0..=99999.999`. A larger strike widens the symbol
/// past 21 characters (it then decodes as an equity) and a negative one
/// clamps to zero; both are logged.
pub fn encode(asset: &str, expiration: NaiveDate, side: OptionSide, strike: f64) -> String {
    let thousandths = (strike * 1000.0).round();
    if !(0.0..=MAX_STRIKE_THOUSANDTHS).contains(&thousandths) {
        tracing::warn!(
            "Strike {} does not fit a {}-character broker symbol",
            strike,
            OCC_SYMBOL_LEN
        );
    }

    format!(
        "{:<6}{}{}{:08}",
        to_weekly_root(asset),
        expiration.format("%y%m%d"),
        side.letter(),
        thousandths as u64
    )
}

/// Encode an outright future
pub fn encode_future(contract_code: &str) -> String {
    format!("/{}", contract_code)
}

/// Encode a future option in the broker's `./` form
pub fn encode_future_option(
    future_contract_code: &str,
    future_option_contract_code: &str,
    expiration: NaiveDate,
    side: OptionSide,
    strike: f64,
) -> String {
    format!(
        "./{} {} {}{}{}",
        future_contract_code,
        future_option_contract_code,
        expiration.format("%y%m%d"),
        side.letter(),
        dxfeed::strike_text(strike)
    )
}

/// Decode any broker symbol
///
/// Returns `None` when an option-shaped symbol has no side letter or its
/// date or strike cannot be parsed.
pub fn decode(symbol: &str) -> Option<Instrument> {
    if symbol.starts_with('.') {
        decode_future_option(symbol)
    } else if let Some(code) = symbol.strip_prefix('/') {
        Some(Instrument::Future {
            asset: code.to_string(),
        })
    } else if symbol.len() == OCC_SYMBOL_LEN {
        decode_equity_option(symbol)
    } else if symbol.is_empty() {
        None
    } else {
        Some(Instrument::Equity {
            asset: symbol.to_string(),
        })
    }
}

fn decode_equity_option(symbol: &str) -> Option<Instrument> {
    if !symbol.is_ascii() {
        return None;
    }

    let asset = from_weekly_root(symbol[0..6].trim());
    let expiration = parse_yymmdd(&symbol[6..12])?;
    let side = OptionSide::from_letter(symbol.as_bytes()[12] as char)?;

    let raw: f64 = symbol[13..].parse().ok()?;
    let strike = round_number(raw / 1000.0, 2);
    if asset.is_empty() || !(strike > 0.0) {
        return None;
    }

    Some(Instrument::EquityOption(OptionLeg::new(asset, expiration, side, strike)))
}

fn decode_future_option(symbol: &str) -> Option<Instrument> {
    if !symbol.is_ascii() {
        return None;
    }
    let body = symbol
        .strip_prefix("./")
        .or_else(|| symbol.strip_prefix('.'))?;

    // Side, date and strike live in the last space-delimited segment
    let last = body.rsplit(' ').next()?;
    let side_at = last.find('C').or_else(|| last.find('P'))?;
    let side = OptionSide::from_letter(last.as_bytes()[side_at] as char)?;

    let strike: f64 = last[side_at + 1..].parse().ok()?;
    if !(strike.is_finite() && strike > 0.0) {
        return None;
    }
    let expiration = parse_yymmdd(&last[..side_at])?;

    // "CLZ2 LO1X2": option code is the trailing 5 characters, contract code the rest
    let head = body[..body.len() - last.len()].trim_end();
    if head.len() <= FUTURE_OPTION_CODE_LEN {
        return None;
    }
    let split = head.len() - FUTURE_OPTION_CODE_LEN;
    let future_option_contract_code = head[split..].to_string();
    let future_contract_code = head[..split].trim().to_string();

    // Contract code minus month letter and year digit. The code is trimmed
    // first, so "CLZ2 " gives "CL"; stripping the untrimmed text gives "CLZ".
    if future_contract_code.len() <= 2 {
        return None;
    }
    let asset = &future_contract_code[..future_contract_code.len() - 2];

    // The broker form is kept as received; `encode_future_option` would
    // normalize strikes such as "4825.50"
    let mut leg = OptionLeg::new(asset, expiration, side, strike);
    leg.tastytrade_symbol = symbol.to_string();

    Some(Instrument::FutureOption {
        leg,
        future_contract_code,
        future_option_contract_code,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_encode() {
        let cases = [
            ("SPX", date(2024, 3, 15), OptionSide::Call, 5000.0, "SPXW  240315C05000000"),
            ("aapl", date(2024, 1, 19), OptionSide::Put, 182.5, "AAPL  240119P00182500"),
            ("F", date(2024, 6, 21), OptionSide::Call, 12.0, "F     240621C00012000"),
            ("QQQ", date(2024, 6, 21), OptionSide::Call, 100.0, "QQQ   240621C00100000"),
        ];
        for (asset, expiration, side, strike, expected) in cases {
            assert_eq!(encode(asset, expiration, side, strike), expected);
        }
    }

    #[test]
    fn test_encode_strike_limit() {
        let widest = encode("NVR", date(2024, 1, 19), OptionSide::Call, 99_999.999);
        assert_eq!(widest, "NVR   240119C99999999");
        assert!(decode(&widest).unwrap().is_option());

        // one past the field width no longer reads back as an option
        let too_wide = encode("NVR", date(2024, 1, 19), OptionSide::Call, 100_000.0);
        assert_eq!(too_wide.len(), OCC_SYMBOL_LEN + 1);
        assert!(!decode(&too_wide).unwrap().is_option());
    }

    #[test]
    fn test_decode_equity_option() {
        let instrument = decode("SPXW  240315C05000000").unwrap();
        let leg = match &instrument {
            Instrument::EquityOption(leg) => leg,
            other => panic!("expected equity option, got {:?}", other),
        };
        assert_eq!(leg.asset, "SPX");
        assert_eq!(leg.expiration, date(2024, 3, 15));
        assert_eq!(leg.side, OptionSide::Call);
        assert_eq!(leg.strike, 5000.0);
        assert_eq!(leg.dxfeed_symbol, ".SPXW240315C5000");
    }

    #[test]
    fn test_decode_fractional_strike() {
        let instrument = decode("AAPL  240119P00182500").unwrap();
        assert_eq!(instrument.strike(), Some(182.5));
        assert_eq!(instrument.side(), Some(OptionSide::Put));
    }

    #[test]
    fn test_decode_future_and_equity() {
        assert_eq!(decode("/ESZ3"), Some(Instrument::Future { asset: "ESZ3".into() }));
        assert_eq!(decode("AAPL"), Some(Instrument::Equity { asset: "AAPL".into() }));
        assert_eq!(encode_future("ESZ3"), "/ESZ3");
    }

    #[test]
    fn test_decode_future_option() {
        let symbol = "./CLZ2 LO1X2 221104C91";
        match decode(symbol).unwrap() {
            Instrument::FutureOption {
                leg,
                future_contract_code,
                future_option_contract_code,
            } => {
                assert_eq!(future_contract_code, "CLZ2");
                assert_eq!(future_option_contract_code, "LO1X2");
                assert_eq!(leg.asset, "CL");
                assert_eq!(leg.expiration, date(2022, 11, 4));
                assert_eq!(leg.side, OptionSide::Call);
                assert_eq!(leg.strike, 91.0);
                assert_eq!(leg.tastytrade_symbol, symbol);
                assert_eq!(leg.dxfeed_symbol, ".CL221104C91");
            }
            other => panic!("expected future option, got {:?}", other),
        }
    }

    #[test]
    fn test_decode_future_option_put() {
        let instrument = decode("./ESH4 EW3H4 240315P4825.5").unwrap();
        assert_eq!(instrument.side(), Some(OptionSide::Put));
        assert_eq!(instrument.strike(), Some(4825.5));
        assert_eq!(instrument.asset(), "ES");
    }

    #[test]
    fn test_future_option_keeps_broker_symbol() {
        for symbol in [
            "./ESH4 EW3H4 240315P4825.50",
            ".CLZ2 LO1X2 221104C91",
            "./CLZ2 LO1X2 221104C91",
        ] {
            let instrument = decode(symbol).unwrap();
            let leg = instrument.option_leg().unwrap();
            assert_eq!(leg.tastytrade_symbol, symbol);
        }

        let instrument = decode("./ESH4 EW3H4 240315P4825.50").unwrap();
        assert_eq!(instrument.strike(), Some(4825.5));
        assert_eq!(instrument.option_leg().unwrap().dxfeed_symbol, ".ES240315P4825.5");
    }

    #[test]
    fn test_encode_future_option() {
        let expiration = date(2022, 11, 4);
        let encoded = encode_future_option("CLZ2", "LO1X2", expiration, OptionSide::Call, 91.0);
        assert_eq!(encoded, "./CLZ2 LO1X2 221104C91");
        assert_eq!(decode(&encoded).unwrap().strike(), Some(91.0));
    }

    #[test]
    fn test_decode_unrecognized() {
        // no side letter
        assert_eq!(decode("./CLZ2 LO1X2 22110491"), None);
        // 21 characters but side slot is not C/P
        assert_eq!(decode("SPXW  240315X05000000"), None);
        // bad date
        assert_eq!(decode("SPXW  241315C05000000"), None);
        // bad strike
        assert_eq!(decode("SPXW  240315C05O00000"), None);
        assert_eq!(decode(""), None);
    }

    #[test]
    fn test_round_trip() {
        for symbol in [
            "SPXW  240315C05000000",
            "AAPL  240119P00182500",
            "SPY   261218C00600000",
            "BRKB  240621P00410000",
        ] {
            let instrument = decode(symbol).unwrap();
            let leg = instrument.option_leg().unwrap();
            let encoded = encode(&leg.asset, leg.expiration, leg.side, leg.strike);
            assert_eq!(encoded, symbol);
            assert_eq!(leg.tastytrade_symbol, symbol);
        }
    }

    #[test]
    fn test_both_dialects_agree() {
        let broker = decode("SPXW  240315P04950000").unwrap();
        let market = dxfeed::decode(".SPXW240315P4950").unwrap();
        assert_eq!(broker, market);
    }
}
