use std::fmt::{Display, Formatter};

use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{CoinId, UtcDateTime};

const UNBOUNDED_MARKER: &str = "unbounded";

/// Maximum supply of a coin: a fixed cap or explicitly none.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Supply {
    Limited(f64),
    Unbounded,
}

impl Supply {
    /// Upstream sends `null` for coins without a hard cap.
    pub fn from_upstream(value: Option<f64>) -> Self {
        value.map_or(Self::Unbounded, Self::Limited)
    }

    pub const fn limit(self) -> Option<f64> {
        match self {
            Self::Limited(value) => Some(value),
            Self::Unbounded => None,
        }
    }

    pub const fn is_unbounded(self) -> bool {
        matches!(self, Self::Unbounded)
    }
}

impl Display for Supply {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Limited(value) => write!(f, "{value}"),
            Self::Unbounded => f.write_str(UNBOUNDED_MARKER),
        }
    }
}

impl Serialize for Supply {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::Limited(value) => serializer.serialize_f64(*value),
            Self::Unbounded => serializer.serialize_str(UNBOUNDED_MARKER),
        }
    }
}

impl<'de> Deserialize<'de> for Supply {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Limited(f64),
            Marker(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Limited(value) => Ok(Self::Limited(value)),
            Raw::Marker(marker) if marker == UNBOUNDED_MARKER => Ok(Self::Unbounded),
            Raw::Marker(other) => Err(D::Error::custom(format!(
                "expected a number or '{UNBOUNDED_MARKER}', got '{other}'"
            ))),
        }
    }
}

/// Source-code repositories listed for a coin.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoLinks {
    pub github: Vec<String>,
    pub bitbucket: Vec<String>,
}

/// Project links published for a coin. Empty entries are dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoinLinks {
    pub homepage: Vec<String>,
    pub blockchain_site: Vec<String>,
    pub official_forum_url: Vec<String>,
    pub chat_url: Vec<String>,
    pub announcement_url: Vec<String>,
    pub twitter_screen_name: Option<String>,
    pub facebook_username: Option<String>,
    pub telegram_channel_identifier: Option<String>,
    pub subreddit_url: Option<String>,
    pub repos_url: RepoLinks,
}

/// Point-in-time market view of one coin.
///
/// Listing endpoints fill the market fields; the details endpoint additionally
/// fills `description`, `categories` and `links`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketSnapshot {
    pub id: CoinId,
    pub symbol: String,
    pub name: String,
    pub image: Option<String>,
    /// `None` for coins the upstream has no USD price for (inactive or just listed).
    pub current_price: Option<f64>,
    pub market_cap: Option<f64>,
    pub market_cap_rank: Option<u32>,
    pub price_change_percentage_24h: Option<f64>,
    pub price_change_percentage_7d: Option<f64>,
    pub circulating_supply: Option<f64>,
    pub total_supply: Option<f64>,
    pub max_supply: Supply,
    pub description: Option<String>,
    pub categories: Option<Vec<String>>,
    pub links: Option<CoinLinks>,
    pub sparkline: Option<Vec<f64>>,
    pub last_updated: Option<UtcDateTime>,
}

/// One `(timestamp, value)` sample of a chart series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HistoryPoint {
    pub timestamp_ms: i64,
    pub value: f64,
}

impl HistoryPoint {
    pub const fn new(timestamp_ms: i64, value: f64) -> Self {
        Self {
            timestamp_ms,
            value,
        }
    }
}

/// Price, market-cap and volume history for one coin over a time range.
///
/// `prices` is always ordered by ascending timestamp; the secondary series are
/// kept in upstream order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistorySeries {
    prices: Vec<HistoryPoint>,
    market_caps: Vec<HistoryPoint>,
    total_volumes: Vec<HistoryPoint>,
}

impl HistorySeries {
    pub fn new(
        mut prices: Vec<HistoryPoint>,
        market_caps: Vec<HistoryPoint>,
        total_volumes: Vec<HistoryPoint>,
    ) -> Self {
        prices.sort_by_key(|point| point.timestamp_ms);
        Self {
            prices,
            market_caps,
            total_volumes,
        }
    }

    pub fn prices(&self) -> &[HistoryPoint] {
        &self.prices
    }

    pub fn market_caps(&self) -> &[HistoryPoint] {
        &self.market_caps
    }

    pub fn total_volumes(&self) -> &[HistoryPoint] {
        &self.total_volumes
    }

    pub fn latest_price(&self) -> Option<HistoryPoint> {
        self.prices.last().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_max_supply_maps_to_unbounded() {
        assert_eq!(Supply::from_upstream(None), Supply::Unbounded);
        assert_eq!(
            Supply::from_upstream(Some(21_000_000.0)),
            Supply::Limited(21_000_000.0)
        );
    }

    #[test]
    fn unbounded_supply_serializes_as_marker_not_zero() {
        let json = serde_json::to_string(&Supply::Unbounded).expect("serializable");
        assert_eq!(json, "\"unbounded\"");

        let parsed: Supply = serde_json::from_str(&json).expect("round trips");
        assert!(parsed.is_unbounded());
    }

    #[test]
    fn history_series_sorts_prices_but_not_secondary_series() {
        let series = HistorySeries::new(
            vec![HistoryPoint::new(3, 30.0), HistoryPoint::new(1, 10.0)],
            vec![HistoryPoint::new(2, 1.0), HistoryPoint::new(1, 2.0)],
            Vec::new(),
        );

        let timestamps = series
            .prices()
            .iter()
            .map(|p| p.timestamp_ms)
            .collect::<Vec<_>>();
        assert_eq!(timestamps, [1, 3]);
        assert_eq!(series.market_caps()[0].timestamp_ms, 2);
        assert_eq!(series.latest_price(), Some(HistoryPoint::new(3, 30.0)));
    }
}
