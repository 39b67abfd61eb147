//! # Geckogate Core
//!
//! Client-side gateway for the rate-limited CoinGecko market-data API.
//!
//! ## Overview
//!
//! - **Request pacing**: one FIFO admission queue spaces every outbound call
//!   by a fixed minimum interval, no matter how many tasks fetch at once
//! - **Credential rotation**: API keys are handed out round-robin, one per call
//! - **Stable domain models**: upstream payloads are mapped into
//!   [`MarketSnapshot`] and [`HistorySeries`] and never leak to callers
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`coingecko`] | Endpoint shapes and payload mapping |
//! | [`config`] | Gateway settings and environment loading |
//! | [`credentials`] | Round-robin API key rotation |
//! | [`domain`] | Domain models (MarketSnapshot, HistorySeries, TimeRange) |
//! | [`error`] | Gateway and validation errors |
//! | [`gateway`] | The request orchestrator |
//! | [`http_client`] | HTTP transport abstraction |
//! | [`pacer`] | FIFO request pacing |
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use geckogate_core::{CoinId, GatewayConfig, MarketGateway, ReqwestHttpClient, TimeRange};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = GatewayConfig::from_env()?;
//!     let gateway = MarketGateway::from_config(&config, Arc::new(ReqwestHttpClient::new()))?;
//!
//!     for coin in gateway.list_markets(1, 20).await? {
//!         let price = coin.current_price.unwrap_or_default();
//!         println!("{:>4} {} ${price:.2}", coin.market_cap_rank.unwrap_or(0), coin.name);
//!     }
//!
//!     let history = gateway.history(&CoinId::parse("bitcoin")?, TimeRange::ThirtyDays).await?;
//!     println!("{} price points", history.prices().len());
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │  CLI / App      │
//! └────────┬────────┘
//!          │
//!          ▼
//! ┌─────────────────┐     ┌──────────────────┐
//! │ Market Gateway  │────▶│ Request Pacer    │
//! │                 │     └──────────────────┘
//! │                 │     ┌──────────────────┐
//! │                 │────▶│ Credential       │
//! │                 │     │ Rotator          │
//! └────────┬────────┘     └──────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐     ┌──────────────────┐
//! │ CoinGecko       │────▶│ HTTP Client      │
//! │ mapping         │     │ (reqwest)        │
//! └─────────────────┘     └──────────────────┘
//! ```
//!
//! ## Error Handling
//!
//! ```rust
//! use geckogate_core::{GatewayError, GatewayErrorKind};
//!
//! fn handle_error(error: GatewayError) {
//!     match error.kind() {
//!         GatewayErrorKind::Upstream if error.retryable() => {
//!             // Let the user retry later
//!         }
//!         GatewayErrorKind::Transport => {
//!             // Network is down
//!         }
//!         _ => {}
//!     }
//! }
//! ```
//!
//! ## Security
//!
//! - API keys are read from the environment and never logged
//! - Coin ids are validated before they are placed in URL paths

pub mod coingecko;
pub mod config;
pub mod credentials;
pub mod domain;
pub mod error;
pub mod gateway;
pub mod http_client;
pub mod pacer;

pub use config::GatewayConfig;
pub use credentials::{Credential, CredentialRotator};
pub use domain::{
    CoinId, CoinLinks, HistoryPoint, HistorySeries, MarketSnapshot, RepoLinks, Supply, TimeRange,
    UtcDateTime,
};
pub use error::{GatewayError, GatewayErrorKind, ValidationError};
pub use gateway::MarketGateway;
pub use http_client::{HttpClient, HttpError, HttpRequest, HttpResponse, ReqwestHttpClient};
pub use pacer::{Admission, RequestPacer};
