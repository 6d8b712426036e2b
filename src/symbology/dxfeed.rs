//! dxfeed streamer symbols
//!
//! Format: `.` + root + `YYMMDD` + `C|P` + strike, e.g. `.SPXW240315C5000`
//! or `.AAPL240119P182.5`. Symbols from the feed may carry a venue
//! qualifier after a colon (`.SPXW240315C5000:C`), which is ignored.

use chrono::NaiveDate;

use super::{from_weekly_root, parse_yymmdd, to_weekly_root};
use crate::core::{Instrument, OptionLeg, OptionSide};

/// Encode an option as a streamer symbol
pub fn encode(asset: &str, expiration: NaiveDate, side: OptionSide, strike: f64) -> String {
    format!(
        ".{}{}{}{}",
        to_weekly_root(asset),
        expiration.format("%y%m%d"),
        side.letter(),
        strike_text(strike)
    )
}

/// Shortest decimal form of a strike, without a trailing `.0` / `.00`
pub fn strike_text(strike: f64) -> String {
    let text = strike.to_string();
    text.strip_suffix(".00")
        .or_else(|| text.strip_suffix(".0"))
        .unwrap_or(&text)
        .to_string()
}

/// Decode a streamer symbol; `None` if it does not name an option
pub fn decode(symbol: &str) -> Option<Instrument> {
    let body = symbol.strip_prefix('.').unwrap_or(symbol);
    let body = match body.find(':') {
        Some(colon) => &body[..colon],
        None => body,
    };
    if !body.is_ascii() {
        return None;
    }

    // The last side letter separates the strike from root + date. Anything
    // at or below index 6 leaves no room for a root before the date.
    let side_at = body.rfind(|c: char| c == 'C' || c == 'P')?;
    if side_at <= 6 {
        return None;
    }
    let side = OptionSide::from_letter(body.as_bytes()[side_at] as char)?;

    let strike: f64 = body[side_at + 1..].parse().ok()?;
    if !(strike.is_finite() && strike > 0.0) {
        return None;
    }
    let expiration = parse_yymmdd(&body[side_at - 6..side_at])?;
    let asset = from_weekly_root(&body[..side_at - 6]);

    Some(Instrument::EquityOption(OptionLeg::new(asset, expiration, side, strike)))
}
