//! Round-robin credential rotation.
//!
//! The upstream quota is enforced per API key, so the gateway spreads calls
//! across every configured key in turn.

use std::fmt::{Debug, Formatter};

use crate::error::GatewayError;

/// Opaque API token. `Debug` never prints the secret.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl From<Credential> for String {
    fn from(value: Credential) -> Self {
        value.0
    }
}

impl Debug for Credential {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str("Credential(***)")
    }
}

/// Hands out credentials cyclically, starting from the first one.
///
/// The rotator is not reentrant: it has no locking of its own and `next`
/// takes `&mut self`. The gateway keeps it behind a mutex and only touches it
/// after the pacer has admitted the call.
#[derive(Debug, Clone)]
pub struct CredentialRotator {
    credentials: Vec<Credential>,
    cursor: usize,
}

impl CredentialRotator {
    /// Builds a rotator from raw tokens. Blank tokens are ignored; if nothing
    /// usable remains this is a configuration error.
    pub fn new<I, S>(tokens: I) -> Result<Self, GatewayError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let credentials = tokens
            .into_iter()
            .map(Into::into)
            .map(|token| token.trim().to_owned())
            .filter(|token| !token.is_empty())
            .map(Credential)
            .collect::<Vec<_>>();

        if credentials.is_empty() {
            return Err(GatewayError::configuration(
                "at least one API key is required",
            ));
        }

        Ok(Self {
            credentials,
            cursor: 0,
        })
    }

    /// Returns the credential at the cursor and advances it.
    pub fn next(&mut self) -> Credential {
        let credential = self.credentials[self.cursor].clone();
        self.cursor = (self.cursor + 1) % self.credentials.len();
        credential
    }

    /// The credential the next call to [`CredentialRotator::next`] will return.
    pub fn current(&self) -> &Credential {
        &self.credentials[self.cursor]
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.credentials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.credentials.is_empty()
    }
}
