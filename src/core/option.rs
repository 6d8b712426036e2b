//! Instrument definitions
//!
//! Equities, futures and options on both, as decoded from broker symbols.

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use crate::symbology::{dxfeed, tastytrade};

/// Option side (Call or Put)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionSide {
    Call,
    Put,
}

impl OptionSide {
    /// Side marker used by both symbol dialects
    pub fn letter(&self) -> char {
        match self {
            OptionSide::Call => 'C',
            OptionSide::Put => 'P',
        }
    }

    pub fn from_letter(c: char) -> Option<Self> {
        match c {
            'C' => Some(OptionSide::Call),
            'P' => Some(OptionSide::Put),
            _ => None,
        }
    }
}

impl std::fmt::Display for OptionSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OptionSide::Call => write!(f, "call"),
            OptionSide::Put => write!(f, "put"),
        }
    }
}

impl std::str::FromStr for OptionSide {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "call" | "c" => Ok(OptionSide::Call),
            "put" | "p" => Ok(OptionSide::Put),
            other => Err(format!("unknown option side '{}'", other)),
        }
    }
}

/// The option-specific part of an instrument
///
/// Both dialect symbols are canonical encodings of
/// `(asset, expiration, side, strike)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionLeg {
    /// Underlying ticker, with the weekly index root folded back (SPXW -> SPX)
    pub asset: String,
    pub expiration: NaiveDate,
    pub side: OptionSide,
    pub strike: f64,
    /// Fixed-width broker symbol
    pub tastytrade_symbol: String,
    /// Market-data streamer symbol
    pub dxfeed_symbol: String,
}

impl OptionLeg {
    /// Build a leg and derive both dialect symbols
    pub fn new(
        asset: impl Into<String>,
        expiration: NaiveDate,
        side: OptionSide,
        strike: f64,
    ) -> Self {
        let asset = asset.into().to_uppercase();
        Self {
            tastytrade_symbol: tastytrade::encode(&asset, expiration, side, strike),
            dxfeed_symbol: dxfeed::encode(&asset, expiration, side, strike),
            asset,
            expiration,
            side,
            strike,
        }
    }

    /// Days until the 21:00 UTC close of the expiration date
    pub fn days_to_expiration(&self, now: DateTime<Utc>) -> i64 {
        days_to_expiration(self.expiration, now)
    }
}

/// A tradable instrument
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Instrument {
    Equity {
        asset: String,
    },
    Future {
        asset: String,
    },
    EquityOption(OptionLeg),
    FutureOption {
        #[serde(flatten)]
        leg: OptionLeg,
        /// Contract of the underlying future (e.g. "CLZ2")
        future_contract_code: String,
        /// Option contract sub-code (e.g. "LO1X2")
        future_option_contract_code: String,
    },
}

impl Instrument {
    pub fn asset(&self) -> &str {
        match self {
            Instrument::Equity { asset } | Instrument::Future { asset } => asset,
            Instrument::EquityOption(leg) | Instrument::FutureOption { leg, .. } => &leg.asset,
        }
    }

    /// Option terms, if this is an option
    pub fn option_leg(&self) -> Option<&OptionLeg> {
        match self {
            Instrument::EquityOption(leg) | Instrument::FutureOption { leg, .. } => Some(leg),
            _ => None,
        }
    }

    pub fn is_option(&self) -> bool {
        self.option_leg().is_some()
    }

    pub fn expiration(&self) -> Option<NaiveDate> {
        self.option_leg().map(|leg| leg.expiration)
    }

    pub fn side(&self) -> Option<OptionSide> {
        self.option_leg().map(|leg| leg.side)
    }

    pub fn strike(&self) -> Option<f64> {
        self.option_leg().map(|leg| leg.strike)
    }

    /// Label matching the broker's `instrument-type` field
    pub fn kind_label(&self) -> &'static str {
        match self {
            Instrument::Equity { .. } => "Equity",
            Instrument::Future { .. } => "Future",
            Instrument::EquityOption(_) => "Equity Option",
            Instrument::FutureOption { .. } => "Future Option",
        }
    }
}

/// Whole days between `now` and 21:00 UTC on the expiration date
///
/// The distance is absolute, so an expired contract reports the days since
/// expiry.
pub fn days_to_expiration(expiration: NaiveDate, now: DateTime<Utc>) -> i64 {
    let close = expiration.and_time(NaiveTime::default()).and_utc() + Duration::hours(21);
    (close - now).num_milliseconds().abs() / Duration::days(1).num_milliseconds()
}
