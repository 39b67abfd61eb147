//! Request orchestration.
//!
//! [`MarketGateway`] is the only component that talks to the upstream API.
//! Every upstream call follows the same path:
//!
//! 1. wait for an [`Admission`](crate::Admission) from the shared pacer,
//! 2. take the next credential from the rotator,
//! 3. issue exactly one GET,
//! 4. check the status and map the payload into domain types.
//!
//! Nothing is retried. A failure at any step is returned to the caller as a
//! [`GatewayError`].

use std::sync::{Arc, Mutex, PoisonError};

use tracing::{debug, warn};

use crate::coingecko::{self, ApiCall, Endpoint, MAX_PAGE_SIZE};
use crate::config::{GatewayConfig, DEFAULT_API_KEY_HEADER, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_MS};
use crate::credentials::CredentialRotator;
use crate::error::{GatewayError, ValidationError};
use crate::http_client::HttpClient;
use crate::pacer::RequestPacer;
use crate::{CoinId, HistorySeries, MarketSnapshot, TimeRange};

const MAX_ERROR_BODY_CHARS: usize = 512;

/// Paced, credential-rotating client for the market-data API.
///
/// Share one instance (behind an `Arc`) across every task that fetches data;
/// pacing only holds across calls made through the same gateway.
pub struct MarketGateway {
    http_client: Arc<dyn HttpClient>,
    pacer: RequestPacer,
    rotator: Mutex<CredentialRotator>,
    base_url: String,
    api_key_header: String,
    timeout_ms: u64,
}

impl MarketGateway {
    /// Assembles a gateway from injected parts using default endpoint settings.
    pub fn new(
        rotator: CredentialRotator,
        pacer: RequestPacer,
        http_client: Arc<dyn HttpClient>,
    ) -> Self {
        Self {
            http_client,
            pacer,
            rotator: Mutex::new(rotator),
            base_url: String::from(DEFAULT_BASE_URL),
            api_key_header: String::from(DEFAULT_API_KEY_HEADER),
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }

    /// Builds the rotator and starts the pacer from `config`.
    ///
    /// Fails with a configuration error when no API key is configured, before
    /// any pacing task is started. Must be called within a Tokio runtime.
    pub fn from_config(
        config: &GatewayConfig,
        http_client: Arc<dyn HttpClient>,
    ) -> Result<Self, GatewayError> {
        let rotator = CredentialRotator::new(config.api_keys.iter().cloned())?;
        let pacer = RequestPacer::spawn(config.min_interval);

        Ok(Self::new(rotator, pacer, http_client)
            .with_base_url(config.base_url.clone())
            .with_api_key_header(config.api_key_header.clone())
            .with_timeout_ms(config.timeout_ms))
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_api_key_header(mut self, header: impl Into<String>) -> Self {
        self.api_key_header = header.into();
        self
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Callers currently waiting for a pacing slot.
    pub fn pending_admissions(&self) -> usize {
        self.pacer.pending()
    }

    /// One page of coins ordered by market cap, descending.
    pub async fn list_markets(
        &self,
        page: u32,
        per_page: u32,
    ) -> Result<Vec<MarketSnapshot>, GatewayError> {
        if page == 0 {
            return Err(ValidationError::InvalidPage.into());
        }
        if per_page == 0 || per_page > MAX_PAGE_SIZE {
            return Err(ValidationError::InvalidPageSize {
                value: per_page,
                max: MAX_PAGE_SIZE,
            }
            .into());
        }

        let body = self.fetch(coingecko::list_markets(page, per_page)).await?;
        decode(Endpoint::Markets, &body, coingecko::parse_markets)
    }

    /// Market rows for the given ids. An empty id set makes no upstream call.
    pub async fn list_favorites(
        &self,
        ids: &[CoinId],
    ) -> Result<Vec<MarketSnapshot>, GatewayError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let body = self
            .fetch(coingecko::markets_for_ids(ids, "24h,7d"))
            .await?;
        decode(Endpoint::Markets, &body, coingecko::parse_markets)
    }

    /// Full snapshot of one coin, including description, categories and links.
    pub async fn coin_details(&self, id: &CoinId) -> Result<MarketSnapshot, GatewayError> {
        let body = self.fetch(coingecko::coin_details(id)).await?;
        decode(Endpoint::CoinDetails, &body, coingecko::parse_details)
    }

    /// Price, market-cap and volume history, prices sorted by time.
    pub async fn history(
        &self,
        id: &CoinId,
        range: TimeRange,
    ) -> Result<HistorySeries, GatewayError> {
        let body = self.fetch(coingecko::market_chart(id, range)).await?;
        decode(Endpoint::MarketChart, &body, coingecko::parse_market_chart)
    }

    /// Free-text search expanded into market rows for the top matches.
    ///
    /// Uses two upstream calls, each paced and with its own credential. When
    /// the search finds nothing the second call is skipped.
    pub async fn search(&self, query: &str) -> Result<Vec<MarketSnapshot>, GatewayError> {
        let body = self.fetch(coingecko::search(query.trim())).await?;
        let candidates = decode(Endpoint::Search, &body, coingecko::parse_search)?;
        if candidates.is_empty() {
            debug!(query, "search returned no candidates");
            return Ok(Vec::new());
        }

        let body = self
            .fetch(coingecko::markets_for_ids(&candidates, "24h"))
            .await?;
        decode(Endpoint::Markets, &body, coingecko::parse_markets)
    }

    async fn fetch(&self, call: ApiCall) -> Result<String, GatewayError> {
        let endpoint = call.endpoint;
        let admission = self.pacer.acquire().await;

        let (key_slot, credential) = {
            let mut rotator = self
                .rotator
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            (rotator.cursor(), rotator.next())
        };

        let request = call
            .into_request(&self.base_url)
            .with_header(self.api_key_header.as_str(), credential.expose())
            .with_timeout_ms(self.timeout_ms);

        debug!(
            %endpoint,
            ticket = admission.ticket(),
            waited_ms = admission.waited().as_millis() as u64,
            key_slot,
            "dispatching upstream request"
        );

        let response = self.http_client.execute(request).await.map_err(|error| {
            warn!(%endpoint, error = error.message(), "upstream unreachable");
            GatewayError::transport(error.message())
        })?;

        if !response.is_success() {
            warn!(%endpoint, status = response.status, "upstream rejected request");
            return Err(GatewayError::upstream(
                response.status,
                truncate(&response.body, MAX_ERROR_BODY_CHARS),
            ));
        }

        debug!(
            %endpoint,
            status = response.status,
            bytes = response.body.len(),
            "upstream responded"
        );
        Ok(response.body)
    }
}

fn decode<T>(
    endpoint: Endpoint,
    body: &str,
    parse: fn(&str) -> Result<T, GatewayError>,
) -> Result<T, GatewayError> {
    parse(body).inspect_err(|error| warn!(%endpoint, %error, "unexpected upstream payload"))
}

fn truncate(body: &str, max_chars: usize) -> String {
    match body.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}…", &body[..cut]),
        None => body.to_owned(),
    }
}
