//! Instrument symbol codecs
//!
//! Two dialects name the same option contract:
//! - **tastytrade** (broker): fixed 21-character OCC-style symbols, plus
//!   `/` futures and `./` future options
//! - **dxfeed** (market data): variable-width `.`-prefixed streamer symbols
//!
//! Both fold the SPX index onto its weekly root (SPXW) when encoding and
//! unfold it when decoding.

pub mod dxfeed;
pub mod tastytrade;

use chrono::NaiveDate;

/// Index root that trades under a separate weekly-expiration root
const INDEX_ROOT: &str = "SPX";
const WEEKLY_ROOT: &str = "SPXW";

/// Uppercase the ticker and swap in the weekly root where one exists
pub fn to_weekly_root(asset: &str) -> String {
    let asset = asset.to_uppercase();
    if asset == INDEX_ROOT {
        WEEKLY_ROOT.to_string()
    } else {
        asset
    }
}

/// Inverse of [`to_weekly_root`]
pub fn from_weekly_root(asset: &str) -> String {
    if asset == WEEKLY_ROOT {
        INDEX_ROOT.to_string()
    } else {
        asset.to_string()
    }
}

/// Parse a `YYMMDD` date in the 2000s
pub(crate) fn parse_yymmdd(s: &str) -> Option<NaiveDate> {
    if s.len() != 6 || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let year: i32 = s[0..2].parse().ok()?;
    let month: u32 = s[2..4].parse().ok()?;
    let day: u32 = s[4..6].parse().ok()?;
    NaiveDate::from_ymd_opt(2000 + year, month, day)
}
