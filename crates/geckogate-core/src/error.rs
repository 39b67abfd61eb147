use std::fmt::{Display, Formatter};

use thiserror::Error;

/// Validation errors for domain values and request parameters.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("coin id cannot be empty")]
    EmptyCoinId,
    #[error("coin id length {len} exceeds max {max}")]
    CoinIdTooLong { len: usize, max: usize },
    #[error("coin id contains invalid character '{ch}' at index {index}")]
    CoinIdInvalidChar { ch: char, index: usize },

    #[error("invalid time range '{value}', expected one of 1d, 7d, 30d, 90d, 1y, max")]
    InvalidTimeRange { value: String },

    #[error("page must be at least 1")]
    InvalidPage,
    #[error("per_page {value} must be between 1 and {max}")]
    InvalidPageSize { value: u32, max: u32 },

    #[error("timestamp must be RFC3339 UTC (suffix Z): '{value}'")]
    TimestampNotUtc { value: String },
}

/// Coarse classification of a [`GatewayError`], stable across message changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GatewayErrorKind {
    Configuration,
    InvalidRequest,
    Transport,
    Upstream,
    Schema,
}

impl GatewayErrorKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Configuration => "configuration",
            Self::InvalidRequest => "invalid_request",
            Self::Transport => "transport",
            Self::Upstream => "upstream",
            Self::Schema => "schema",
        }
    }
}

impl Display for GatewayErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failure of a gateway operation.
///
/// The gateway performs exactly one attempt per upstream call and never
/// retries; [`GatewayError::retryable`] is a hint for the caller only.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GatewayError {
    /// No usable credentials or malformed settings. Fatal at startup.
    #[error("configuration error: {0}")]
    Configuration(String),

    #[error(transparent)]
    InvalidRequest(#[from] ValidationError),

    /// The upstream could not be reached (DNS, connect, timeout, body read).
    #[error("transport error: {0}")]
    Transport(String),

    /// The upstream answered with a non-2xx status.
    #[error("upstream returned status {status}: {body}")]
    Upstream { status: u16, body: String },

    /// The upstream payload does not have the expected shape.
    #[error("schema error: {0}")]
    Schema(String),
}

impl GatewayError {
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport(message.into())
    }

    pub fn upstream(status: u16, body: impl Into<String>) -> Self {
        Self::Upstream {
            status,
            body: body.into(),
        }
    }

    pub fn schema(message: impl Into<String>) -> Self {
        Self::Schema(message.into())
    }

    pub const fn kind(&self) -> GatewayErrorKind {
        match self {
            Self::Configuration(_) => GatewayErrorKind::Configuration,
            Self::InvalidRequest(_) => GatewayErrorKind::InvalidRequest,
            Self::Transport(_) => GatewayErrorKind::Transport,
            Self::Upstream { .. } => GatewayErrorKind::Upstream,
            Self::Schema(_) => GatewayErrorKind::Schema,
        }
    }

    /// Whether repeating the same call later could plausibly succeed.
    pub const fn retryable(&self) -> bool {
        match self {
            Self::Transport(_) => true,
            Self::Upstream { status, .. } => *status == 429 || *status >= 500,
            Self::Configuration(_) | Self::InvalidRequest(_) | Self::Schema(_) => false,
        }
    }

    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Upstream { status, .. } => Some(*status),
            _ => None,
        }
    }
}
