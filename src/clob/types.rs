//! Response types for the CLOB REST API.

use serde::Deserialize;

/// Response of `GET /auth/api-keys`.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiKeysResponse {
    /// Keys registered for the wallet
    #[serde(rename = "apiKeys", default)]
    pub api_keys: Vec<ApiKeyEntry>,
}

impl ApiKeysResponse {
    /// Whether the given API key is listed.
    pub fn contains(&self, api_key: &str) -> bool {
        self.api_keys.iter().any(|entry| entry.api_key() == api_key)
    }
}

/// A listed API key.
///
/// Older deployments return bare strings, newer ones return objects.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ApiKeyEntry {
    /// Bare key
    Key(String),
    /// Key object
    Detailed {
        /// The API key
        #[serde(rename = "apiKey")]
        api_key: String,
    },
}

impl ApiKeyEntry {
    /// The API key value.
    pub fn api_key(&self) -> &str {
        match self {
            Self::Key(key) => key,
            Self::Detailed { api_key } => api_key,
        }
    }
}
