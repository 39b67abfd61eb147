//! # Domain Models
//!
//! Internal shapes handed to callers. They never expose the upstream schema:
//! the CoinGecko payloads are mapped into these types in [`crate::coingecko`].
//!
//! | Type | Description |
//! |------|-------------|
//! | [`MarketSnapshot`] | Market view of one coin (listing or details) |
//! | [`Supply`] | Capped supply or the explicit unbounded marker |
//! | [`CoinLinks`] | Project links from the details endpoint |
//! | [`HistorySeries`] | Price / market-cap / volume history |
//! | [`TimeRange`] | History window (1d, 7d, 30d, 90d, 1y, max) |
//! | [`CoinId`] | Validated upstream coin identifier |
//! | [`UtcDateTime`] | UTC timestamp |

mod coin_id;
mod models;
mod time_range;
mod timestamp;

pub use coin_id::CoinId;
pub use models::{CoinLinks, HistoryPoint, HistorySeries, MarketSnapshot, RepoLinks, Supply};
pub use time_range::TimeRange;
pub use timestamp::UtcDateTime;
