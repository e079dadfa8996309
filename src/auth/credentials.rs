//! API credentials issued by the CLOB.

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use crate::error::PolymarketError;

/// API credentials: key, secret and passphrase.
///
/// These are issued by the venue for a wallet and are distinct from the
/// wallet's private key. The secret and passphrase are kept behind
/// [`SecretString`] and redacted from `Debug` output.
#[derive(Clone)]
pub struct ApiCredentials {
    /// The API key (public identifier)
    pub api_key: String,
    api_secret: SecretString,
    api_passphrase: SecretString,
}

impl ApiCredentials {
    /// Create credentials from their three parts.
    pub fn new(
        api_key: impl Into<String>,
        api_secret: impl Into<String>,
        api_passphrase: impl Into<String>,
    ) -> Self {
        Self {
            api_key: api_key.into(),
            api_secret: SecretString::from(api_secret.into()),
            api_passphrase: SecretString::from(api_passphrase.into()),
        }
    }

    /// Get the API secret for signing.
    ///
    /// This method exposes the secret - use carefully.
    pub fn expose_secret(&self) -> &str {
        self.api_secret.expose_secret()
    }

    /// Get the API passphrase.
    ///
    /// This method exposes the passphrase - use carefully.
    pub fn expose_passphrase(&self) -> &str {
        self.api_passphrase.expose_secret()
    }

    /// Reject credentials with an empty field.
    pub fn validate(&self) -> Result<(), PolymarketError> {
        let missing = [
            ("apiKey", self.api_key.is_empty()),
            ("secret", self.expose_secret().is_empty()),
            ("passphrase", self.expose_passphrase().is_empty()),
        ]
        .into_iter()
        .find_map(|(field, empty)| empty.then_some(field));

        match missing {
            Some(field) => Err(PolymarketError::InvalidResponse(format!(
                "credentials field '{field}' is empty"
            ))),
            None => Ok(()),
        }
    }
}

impl PartialEq for ApiCredentials {
    fn eq(&self, other: &Self) -> bool {
        self.api_key == other.api_key
            && self.expose_secret() == other.expose_secret()
            && self.expose_passphrase() == other.expose_passphrase()
    }
}

impl Eq for ApiCredentials {}

impl std::fmt::Debug for ApiCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiCredentials")
            .field("api_key", &self.api_key)
            .field("api_secret", &"[REDACTED]")
            .field("api_passphrase", &"[REDACTED]")
            .finish()
    }
}

/// Wire form of `/auth/api-key` and `/auth/derive-api-key` responses.
#[derive(Deserialize)]
struct CredentialsPayload {
    #[serde(rename = "apiKey")]
    api_key: String,
    secret: String,
    passphrase: String,
}

impl<'de> Deserialize<'de> for ApiCredentials {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let payload = CredentialsPayload::deserialize(deserializer)?;
        Ok(Self::new(payload.api_key, payload.secret, payload.passphrase))
    }
}
