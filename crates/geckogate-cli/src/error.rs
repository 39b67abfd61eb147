use geckogate_core::{GatewayError, GatewayErrorKind, ValidationError};
use thiserror::Error;

/// CLI-level error categories mapped to exit codes.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Gateway(#[from] GatewayError),

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Validation(_) => 2,
            Self::Gateway(error) => match error.kind() {
                GatewayErrorKind::InvalidRequest => 2,
                GatewayErrorKind::Configuration => 3,
                GatewayErrorKind::Transport | GatewayErrorKind::Upstream => 5,
                GatewayErrorKind::Schema => 6,
            },
            Self::Serialization(_) => 4,
            Self::Io(_) => 10,
        }
    }
}
