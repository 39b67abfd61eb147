//! Gateway settings and their environment-variable sources.
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | `COINGECKO_API_KEY_1`..`COINGECKO_API_KEY_3` | unset | Individual API keys |
//! | `COINGECKO_API_KEYS` | unset | Comma-separated API keys |
//! | `GECKOGATE_BASE_URL` | `https://api.coingecko.com/api/v3` | Upstream base URL |
//! | `GECKOGATE_MIN_INTERVAL_MS` | `2000` | Minimum spacing between calls |
//! | `GECKOGATE_TIMEOUT_MS` | `10000` | Per-call HTTP timeout |
//! | `GECKOGATE_API_KEY_HEADER` | `x-cg-demo-api-key` | Header carrying the key |

use std::time::Duration;

use crate::credentials::Credential;
use crate::error::GatewayError;
use crate::pacer::DEFAULT_MIN_INTERVAL;

pub const DEFAULT_BASE_URL: &str = "https://api.coingecko.com/api/v3";
pub const DEFAULT_API_KEY_HEADER: &str = "x-cg-demo-api-key";
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;

const NUMBERED_KEY_VARS: [&str; 3] = [
    "COINGECKO_API_KEY_1",
    "COINGECKO_API_KEY_2",
    "COINGECKO_API_KEY_3",
];
const KEY_LIST_VAR: &str = "COINGECKO_API_KEYS";

#[derive(Debug, Clone, PartialEq)]
pub struct GatewayConfig {
    pub base_url: String,
    pub min_interval: Duration,
    pub timeout_ms: u64,
    pub api_key_header: String,
    pub api_keys: Vec<Credential>,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            base_url: String::from(DEFAULT_BASE_URL),
            min_interval: DEFAULT_MIN_INTERVAL,
            timeout_ms: DEFAULT_TIMEOUT_MS,
            api_key_header: String::from(DEFAULT_API_KEY_HEADER),
            api_keys: Vec::new(),
        }
    }
}

impl GatewayConfig {
    pub fn from_env() -> Result<Self, GatewayError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads settings through `lookup`, which maps a variable name to its value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, GatewayError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        let numbered = NUMBERED_KEY_VARS.iter().filter_map(|name| lookup(name));
        let listed = lookup(KEY_LIST_VAR)
            .map(|list| list.split(',').map(str::to_owned).collect::<Vec<_>>())
            .unwrap_or_default();
        config.api_keys = numbered
            .chain(listed)
            .map(|key| key.trim().to_owned())
            .filter(|key| !key.is_empty())
            .map(Credential::new)
            .collect();

        if let Some(base_url) = non_blank(lookup("GECKOGATE_BASE_URL")) {
            config.base_url = base_url;
        }
        if let Some(raw) = non_blank(lookup("GECKOGATE_MIN_INTERVAL_MS")) {
            config.min_interval =
                Duration::from_millis(parse_millis("GECKOGATE_MIN_INTERVAL_MS", &raw)?);
        }
        if let Some(raw) = non_blank(lookup("GECKOGATE_TIMEOUT_MS")) {
            config.timeout_ms = parse_millis("GECKOGATE_TIMEOUT_MS", &raw)?;
        }
        if let Some(header) = non_blank(lookup("GECKOGATE_API_KEY_HEADER")) {
            config.api_key_header = header;
        }

        Ok(config)
    }

    pub fn with_api_keys<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.api_keys = keys.into_iter().map(Credential::new).collect();
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_min_interval(mut self, min_interval: Duration) -> Self {
        self.min_interval = min_interval;
        self
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
}

fn parse_millis(name: &str, raw: &str) -> Result<u64, GatewayError> {
    raw.parse::<u64>().map_err(|_| {
        GatewayError::configuration(format!(
            "{name} must be a whole number of milliseconds, got '{raw}'"
        ))
    })
}
