//! CoinGecko v3 endpoints and payload mapping.
//!
//! Everything that knows the upstream schema lives here: request shapes for
//! each endpoint and the private payload structs that are mapped into the
//! domain types. Callers never see these payloads.

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Deserializer};

use crate::error::GatewayError;
use crate::http_client::HttpRequest;
use crate::{
    CoinId, CoinLinks, HistoryPoint, HistorySeries, MarketSnapshot, RepoLinks, Supply, TimeRange,
    UtcDateTime,
};

/// Quote currency for every request.
pub const VS_CURRENCY: &str = "usd";
/// Upstream cap on `per_page` for the markets endpoint.
pub const MAX_PAGE_SIZE: u32 = 250;
/// Number of search hits expanded into full market data.
pub const SEARCH_CANDIDATE_LIMIT: usize = 10;

/// Upstream endpoint family, used for logging and error context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Markets,
    CoinDetails,
    MarketChart,
    Search,
}

impl Endpoint {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Markets => "coins/markets",
            Self::CoinDetails => "coins/{id}",
            Self::MarketChart => "coins/{id}/market_chart",
            Self::Search => "search",
        }
    }
}

impl Display for Endpoint {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One upstream call, before base URL, credential and timeout are attached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiCall {
    pub endpoint: Endpoint,
    pub path: String,
    pub query: Vec<(&'static str, String)>,
}

impl ApiCall {
    fn new(endpoint: Endpoint, path: impl Into<String>) -> Self {
        Self {
            endpoint,
            path: path.into(),
            query: Vec::new(),
        }
    }

    fn param(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.query.push((name, value.into()));
        self
    }

    pub fn into_request(self, base_url: &str) -> HttpRequest {
        self.query
            .into_iter()
            .fold(HttpRequest::get(base_url, self.path), |request, (name, value)| {
                request.with_query(name, value)
            })
    }
}

/// Top coins by market cap, with 24h and 7d change and a 7d sparkline.
pub fn list_markets(page: u32, per_page: u32) -> ApiCall {
    ApiCall::new(Endpoint::Markets, "coins/markets")
        .param("vs_currency", VS_CURRENCY)
        .param("order", "market_cap_desc")
        .param("per_page", per_page.to_string())
        .param("page", page.to_string())
        .param("sparkline", "true")
        .param("price_change_percentage", "24h,7d")
}

/// Market rows for an explicit id set. `price_change` selects the change
/// windows the upstream should include.
pub fn markets_for_ids(ids: &[CoinId], price_change: &str) -> ApiCall {
    let joined = ids.iter().map(CoinId::as_str).collect::<Vec<_>>().join(",");
    ApiCall::new(Endpoint::Markets, "coins/markets")
        .param("vs_currency", VS_CURRENCY)
        .param("ids", joined)
        .param("order", "market_cap_desc")
        .param("sparkline", "true")
        .param("price_change_percentage", price_change)
}

pub fn coin_details(id: &CoinId) -> ApiCall {
    ApiCall::new(Endpoint::CoinDetails, format!("coins/{id}"))
        .param("localization", "false")
        .param("tickers", "false")
        .param("market_data", "true")
        .param("community_data", "false")
        .param("developer_data", "false")
        .param("sparkline", "true")
}

pub fn market_chart(id: &CoinId, range: TimeRange) -> ApiCall {
    ApiCall::new(Endpoint::MarketChart, format!("coins/{id}/market_chart"))
        .param("vs_currency", VS_CURRENCY)
        .param("days", range.lookback_days())
}

pub fn search(query: &str) -> ApiCall {
    ApiCall::new(Endpoint::Search, "search").param("query", query)
}

pub fn parse_markets(body: &str) -> Result<Vec<MarketSnapshot>, GatewayError> {
    let rows: Vec<MarketRow> = serde_json::from_str(body)
        .map_err(|e| GatewayError::schema(format!("failed to parse markets response: {e}")))?;

    rows.into_iter().map(MarketRow::into_snapshot).collect()
}

pub fn parse_details(body: &str) -> Result<MarketSnapshot, GatewayError> {
    let payload: CoinDetailPayload = serde_json::from_str(body)
        .map_err(|e| GatewayError::schema(format!("failed to parse coin details: {e}")))?;

    payload.into_snapshot()
}

pub fn parse_market_chart(body: &str) -> Result<HistorySeries, GatewayError> {
    let payload: MarketChartPayload = serde_json::from_str(body)
        .map_err(|e| GatewayError::schema(format!("invalid historical data format: {e}")))?;

    let prices = payload
        .prices
        .ok_or_else(|| GatewayError::schema("historical data is missing the prices series"))?;

    Ok(HistorySeries::new(
        into_points(prices),
        into_points(payload.market_caps.unwrap_or_default()),
        into_points(payload.total_volumes.unwrap_or_default()),
    ))
}

/// Ids of the best search matches, in upstream relevance order.
pub fn parse_search(body: &str) -> Result<Vec<CoinId>, GatewayError> {
    let payload: SearchPayload = serde_json::from_str(body)
        .map_err(|e| GatewayError::schema(format!("failed to parse search response: {e}")))?;

    payload
        .coins
        .into_iter()
        .take(SEARCH_CANDIDATE_LIMIT)
        .map(|coin| {
            CoinId::parse(&coin.id).map_err(|e| {
                GatewayError::schema(format!("search returned unusable id '{}': {e}", coin.id))
            })
        })
        .collect()
}

#[derive(Debug, Deserialize)]
struct MarketRow {
    id: String,
    symbol: String,
    name: String,
    image: Option<String>,
    current_price: Option<f64>,
    market_cap: Option<f64>,
    market_cap_rank: Option<u32>,
    price_change_percentage_24h: Option<f64>,
    price_change_percentage_7d_in_currency: Option<f64>,
    circulating_supply: Option<f64>,
    total_supply: Option<f64>,
    max_supply: Option<f64>,
    last_updated: Option<String>,
    sparkline_in_7d: Option<SparklinePayload>,
}

impl MarketRow {
    fn into_snapshot(self) -> Result<MarketSnapshot, GatewayError> {
        Ok(MarketSnapshot {
            id: parse_id(&self.id)?,
            symbol: self.symbol,
            name: self.name,
            image: self.image,
            current_price: self.current_price,
            market_cap: self.market_cap,
            market_cap_rank: self.market_cap_rank,
            price_change_percentage_24h: self.price_change_percentage_24h,
            price_change_percentage_7d: self.price_change_percentage_7d_in_currency,
            circulating_supply: self.circulating_supply,
            total_supply: self.total_supply,
            max_supply: Supply::from_upstream(self.max_supply),
            description: None,
            categories: None,
            links: None,
            sparkline: self.sparkline_in_7d.map(|s| s.price),
            last_updated: parse_last_updated(self.last_updated)?,
        })
    }
}

#[derive(Debug, Deserialize)]
struct SparklinePayload {
    #[serde(default)]
    price: Vec<f64>,
}

#[derive(Debug, Deserialize)]
struct CoinDetailPayload {
    id: String,
    symbol: String,
    name: String,
    image: Option<ImagePayload>,
    market_cap_rank: Option<u32>,
    #[serde(default, deserialize_with = "null_as_default")]
    categories: Vec<Option<String>>,
    description: Option<DescriptionPayload>,
    links: Option<LinksPayload>,
    last_updated: Option<String>,
    market_data: Option<MarketDataPayload>,
}

#[derive(Debug, Deserialize)]
struct ImagePayload {
    large: Option<String>,
}

#[derive(Debug, Deserialize)]
struct DescriptionPayload {
    en: Option<String>,
}

#[derive(Debug, Deserialize)]
struct UsdValue {
    usd: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct MarketDataPayload {
    current_price: Option<UsdValue>,
    market_cap: Option<UsdValue>,
    price_change_percentage_24h: Option<f64>,
    price_change_percentage_7d_in_currency: Option<UsdValue>,
    circulating_supply: Option<f64>,
    total_supply: Option<f64>,
    max_supply: Option<f64>,
    sparkline_7d: Option<SparklinePayload>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct LinksPayload {
    #[serde(deserialize_with = "null_as_default")]
    homepage: Vec<Option<String>>,
    #[serde(deserialize_with = "null_as_default")]
    blockchain_site: Vec<Option<String>>,
    #[serde(deserialize_with = "null_as_default")]
    official_forum_url: Vec<Option<String>>,
    #[serde(deserialize_with = "null_as_default")]
    chat_url: Vec<Option<String>>,
    #[serde(deserialize_with = "null_as_default")]
    announcement_url: Vec<Option<String>>,
    twitter_screen_name: Option<String>,
    facebook_username: Option<String>,
    telegram_channel_identifier: Option<String>,
    subreddit_url: Option<String>,
    repos_url: Option<ReposPayload>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ReposPayload {
    #[serde(deserialize_with = "null_as_default")]
    github: Vec<Option<String>>,
    #[serde(deserialize_with = "null_as_default")]
    bitbucket: Vec<Option<String>>,
}

impl CoinDetailPayload {
    fn into_snapshot(self) -> Result<MarketSnapshot, GatewayError> {
        let id = parse_id(&self.id)?;
        let market = self.market_data.ok_or_else(|| {
            GatewayError::schema(format!("coin '{id}' details are missing market_data"))
        })?;

        Ok(MarketSnapshot {
            symbol: self.symbol,
            name: self.name,
            image: self.image.and_then(|image| image.large),
            current_price: market.current_price.and_then(|v| v.usd),
            market_cap: market.market_cap.and_then(|v| v.usd),
            market_cap_rank: self.market_cap_rank,
            price_change_percentage_24h: market.price_change_percentage_24h,
            price_change_percentage_7d: market
                .price_change_percentage_7d_in_currency
                .and_then(|v| v.usd),
            circulating_supply: market.circulating_supply,
            total_supply: market.total_supply,
            max_supply: Supply::from_upstream(market.max_supply),
            description: self
                .description
                .and_then(|d| d.en)
                .filter(|text| !text.trim().is_empty()),
            categories: Some(compact(self.categories)),
            links: Some(self.links.unwrap_or_default().into_links()),
            sparkline: market.sparkline_7d.map(|s| s.price),
            last_updated: parse_last_updated(self.last_updated)?,
            id,
        })
    }
}

impl LinksPayload {
    fn into_links(self) -> CoinLinks {
        let repos = self.repos_url.unwrap_or_default();
        CoinLinks {
            homepage: compact(self.homepage),
            blockchain_site: compact(self.blockchain_site),
            official_forum_url: compact(self.official_forum_url),
            chat_url: compact(self.chat_url),
            announcement_url: compact(self.announcement_url),
            twitter_screen_name: non_empty(self.twitter_screen_name),
            facebook_username: non_empty(self.facebook_username),
            telegram_channel_identifier: non_empty(self.telegram_channel_identifier),
            subreddit_url: non_empty(self.subreddit_url),
            repos_url: RepoLinks {
                github: compact(repos.github),
                bitbucket: compact(repos.bitbucket),
            },
        }
    }
}

#[derive(Debug, Deserialize)]
struct MarketChartPayload {
    prices: Option<Vec<RawPoint>>,
    market_caps: Option<Vec<RawPoint>>,
    total_volumes: Option<Vec<RawPoint>>,
}

/// `[timestamp_ms, value]` pair as sent by the chart endpoint.
#[derive(Debug, Deserialize)]
struct RawPoint(f64, f64);

#[derive(Debug, Deserialize)]
struct SearchPayload {
    #[serde(default)]
    coins: Vec<SearchCoin>,
}

#[derive(Debug, Deserialize)]
struct SearchCoin {
    id: String,
}

fn into_points(raw: Vec<RawPoint>) -> Vec<HistoryPoint> {
    raw.into_iter()
        .map(|RawPoint(timestamp, value)| HistoryPoint::new(timestamp as i64, value))
        .collect()
}

fn parse_id(raw: &str) -> Result<CoinId, GatewayError> {
    CoinId::parse(raw)
        .map_err(|e| GatewayError::schema(format!("upstream returned invalid coin id '{raw}': {e}")))
}

/// Treats an explicit `null` like a missing key.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn parse_last_updated(raw: Option<String>) -> Result<Option<UtcDateTime>, GatewayError> {
    raw.map(|value| {
        UtcDateTime::parse(&value)
            .map_err(|e| GatewayError::schema(format!("invalid last_updated: {e}")))
    })
    .transpose()
}

fn compact(values: Vec<Option<String>>) -> Vec<String> {
    values.into_iter().filter_map(non_empty).collect()
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
