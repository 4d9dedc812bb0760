//! Domain Models
//!
//! Reference and market data types shared by the catalog, the feed and the
//! recommendation synthesizer. Uses `rust_decimal` for all prices.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::MentorError;

/// Decimal places kept on synthesized prices
pub const PRICE_SCALE: u32 = 10;

/// Canonical asset key (e.g. "bitcoin", "shiba-inu")
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssetId(String);

impl AssetId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AssetId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl PartialEq<str> for AssetId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for AssetId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// A cryptocurrency reference entry
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Asset {
    /// Canonical key, identity of the asset
    pub id: AssetId,

    /// Display name (e.g., "Bitcoin")
    pub name: String,

    /// Ticker symbol (e.g., "BTC")
    pub symbol: String,

    /// Lowercase aliases recognised in chat messages
    pub aliases: Vec<String>,

    /// Baseline price in USD
    pub base_price: Decimal,

    /// Baseline 24-hour change percentage
    pub base_change_pct: Decimal,

    /// Market capitalization in USD
    pub market_cap: Decimal,
}

/// A simulated point-in-time price reading
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MarketSnapshot {
    pub asset: Asset,

    /// Current price in USD, always positive
    pub price: Decimal,

    /// 24-hour price change percentage
    pub change_pct_24h: Decimal,

    pub observed_at: DateTime<Utc>,
}

/// One point of a synthetic price walk
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartPoint {
    /// Milliseconds since the Unix epoch
    pub timestamp: i64,

    /// Price at `timestamp`
    pub price: Decimal,
}

/// Chart periods offered by the chart panel
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChartRange {
    #[serde(rename = "1d")]
    OneDay,
    #[default]
    #[serde(rename = "7d")]
    SevenDays,
    #[serde(rename = "30d")]
    ThirtyDays,
    #[serde(rename = "90d")]
    NinetyDays,
}

impl ChartRange {
    pub const fn days(self) -> u32 {
        match self {
            Self::OneDay => 1,
            Self::SevenDays => 7,
            Self::ThirtyDays => 30,
            Self::NinetyDays => 90,
        }
    }
}

impl FromStr for ChartRange {
    type Err = MentorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "1d" => Ok(Self::OneDay),
            "7d" => Ok(Self::SevenDays),
            "30d" => Ok(Self::ThirtyDays),
            "90d" => Ok(Self::NinetyDays),
            other => Err(MentorError::InvalidRange(other.to_string())),
        }
    }
}

/// Overall direction of a chart
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
}

impl Trend {
    /// Compare the last price against the first; `None` for fewer than two points
    pub fn of(points: &[ChartPoint]) -> Option<Self> {
        match points {
            [first, .., last] if last.price > first.price => Some(Self::Up),
            [_, .., _] => Some(Self::Down),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn point(timestamp: i64, price: Decimal) -> ChartPoint {
        ChartPoint { timestamp, price }
    }

    #[test]
    fn test_chart_range_parsing() {
        assert_eq!("1d".parse::<ChartRange>().unwrap(), ChartRange::OneDay);
        assert_eq!(" 90D ".parse::<ChartRange>().unwrap().days(), 90);
        assert!(matches!(
            "2w".parse::<ChartRange>(),
            Err(MentorError::InvalidRange(_))
        ));
        assert_eq!(ChartRange::default().days(), 7);
    }

    #[test]
    fn test_trend() {
        assert_eq!(Trend::of(&[]), None);
        assert_eq!(Trend::of(&[point(0, dec!(1))]), None);
        assert_eq!(
            Trend::of(&[point(0, dec!(100)), point(1, dec!(90)), point(2, dec!(101))]),
            Some(Trend::Up)
        );
        assert_eq!(
            Trend::of(&[point(0, dec!(100)), point(1, dec!(100))]),
            Some(Trend::Down)
        );
    }

    #[test]
    fn test_asset_id_compares_with_str() {
        let id = AssetId::from("solana");
        assert_eq!(id, "solana");
        assert_eq!(id.to_string(), "solana");
    }
}
