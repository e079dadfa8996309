//! Polymarket CLOB REST API client implementation.

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_tracing::TracingMiddleware;

use crate::POLYGON;
use crate::auth::{
    ApiCredentials, PrivateKeySigner, create_l1_headers, create_l2_headers,
    current_unix_time_secs,
};
use crate::clob::endpoints::{CLOB_BASE_URL, l1, l2, public};
use crate::clob::traits::ClobAuthApi;
use crate::clob::types::ApiKeysResponse;
use crate::error::{ApiError, PolymarketError};

/// The Polymarket CLOB REST API client.
///
/// Covers the endpoints needed to obtain and check API credentials.
/// Credential endpoints need a wallet [`PrivateKeySigner`]; the key listing
/// additionally needs [`ApiCredentials`].
///
/// # Example
///
/// ```rust,no_run
/// use polymarket_keys::auth::signer_from_hex;
/// use polymarket_keys::clob::ClobClient;
/// use std::sync::Arc;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let signer = signer_from_hex(&std::env::var("POLYMARKET_PRIVATE_KEY")?)?;
///     let client = ClobClient::builder()
///         .chain_id(137)
///         .signer(Arc::new(signer))
///         .build();
///
///     let creds = client.create_or_derive_api_key(None).await?;
///     println!("API key: {}", creds.api_key);
///
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct ClobClient {
    http_client: ClientWithMiddleware,
    base_url: String,
    chain_id: u64,
    signer: Option<Arc<PrivateKeySigner>>,
    api_credentials: Option<ApiCredentials>,
    use_server_time: bool,
}

impl ClobClient {
    /// Create a new client with default settings.
    ///
    /// This client can only access public endpoints.
    /// Use [`ClobClient::builder()`] to configure a signer.
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Create a new client builder.
    pub fn builder() -> ClobClientBuilder {
        ClobClientBuilder::new()
    }

    /// The chain this client signs for.
    pub fn chain_id(&self) -> u64 {
        self.chain_id
    }

    /// The address of the configured signer, if any.
    pub fn address(&self) -> Option<String> {
        self.signer.as_ref().map(|s| s.address().to_checksum(None))
    }

    /// Get the server time in Unix seconds.
    pub async fn get_server_time(&self) -> Result<u64, PolymarketError> {
        let url = format!("{}{}", self.base_url, public::TIME);
        let response = self.http_client.get(&url).send().await?;
        self.parse_response(response).await
    }

    /// Create a new API key for the signer.
    pub async fn create_api_key(&self, nonce: Option<u64>) -> Result<ApiCredentials, PolymarketError> {
        let headers = self.l1_headers(nonce).await?;
        let url = format!("{}{}", self.base_url, l1::CREATE_API_KEY);
        let response = self.http_client.post(&url).headers(headers).send().await?;

        let credentials: ApiCredentials = self.parse_response(response).await?;
        credentials.validate()?;
        Ok(credentials)
    }

    /// Derive the existing API key for the signer.
    pub async fn derive_api_key(&self, nonce: Option<u64>) -> Result<ApiCredentials, PolymarketError> {
        let headers = self.l1_headers(nonce).await?;
        let url = format!("{}{}", self.base_url, l1::DERIVE_API_KEY);
        let response = self.http_client.get(&url).headers(headers).send().await?;

        let credentials: ApiCredentials = self.parse_response(response).await?;
        credentials.validate()?;
        Ok(credentials)
    }

    /// Create an API key, or derive the existing one if creation is refused.
    pub async fn create_or_derive_api_key(
        &self,
        nonce: Option<u64>,
    ) -> Result<ApiCredentials, PolymarketError> {
        ClobAuthApi::create_or_derive_api_key(self, nonce).await
    }

    /// List the API keys registered for the signer.
    ///
    /// Requires both a signer and API credentials.
    pub async fn get_api_keys(&self) -> Result<ApiKeysResponse, PolymarketError> {
        let signer = self.signer.as_ref().ok_or(PolymarketError::MissingCredentials)?;
        let credentials = self
            .api_credentials
            .as_ref()
            .ok_or(PolymarketError::MissingCredentials)?;

        let timestamp = self.timestamp().await?;
        let headers =
            create_l2_headers(signer, credentials, timestamp, "GET", l2::GET_API_KEYS, None)?;

        let url = format!("{}{}", self.base_url, l2::GET_API_KEYS);
        let response = self.http_client.get(&url).headers(headers).send().await?;
        self.parse_response(response).await
    }

    async fn l1_headers(&self, nonce: Option<u64>) -> Result<HeaderMap, PolymarketError> {
        let signer = self
            .signer
            .as_ref()
            .ok_or_else(|| PolymarketError::Auth("A signer is required for L1 endpoints".into()))?;
        let timestamp = self.timestamp().await?;
        create_l1_headers(signer, self.chain_id, timestamp, nonce.unwrap_or(0))
    }

    async fn timestamp(&self) -> Result<u64, PolymarketError> {
        if self.use_server_time {
            self.get_server_time().await
        } else {
            Ok(current_unix_time_secs())
        }
    }

    /// Parse a response from the CLOB API.
    ///
    /// 401 and 403 map to [`PolymarketError::Auth`], any other non-2xx
    /// status to [`PolymarketError::Api`].
    async fn parse_response<T>(&self, response: reqwest::Response) -> Result<T, PolymarketError>
    where
        T: serde::de::DeserializeOwned,
    {
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let api_error = ApiError::from_body(status.as_u16(), &body);
            if api_error.is_unauthorized() {
                return Err(PolymarketError::Auth(api_error.message));
            }
            return Err(PolymarketError::Api(api_error));
        }

        // The body is left out of the message: it may hold credential material.
        serde_json::from_str(&body).map_err(|e| {
            PolymarketError::InvalidResponse(format!("Failed to parse response: {e}"))
        })
    }
}

impl Default for ClobClient {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ClobClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClobClient")
            .field("base_url", &self.base_url)
            .field("chain_id", &self.chain_id)
            .field("address", &self.address())
            .field("has_api_credentials", &self.api_credentials.is_some())
            .finish()
    }
}

/// Builder for [`ClobClient`].
pub struct ClobClientBuilder {
    base_url: String,
    chain_id: u64,
    signer: Option<Arc<PrivateKeySigner>>,
    api_credentials: Option<ApiCredentials>,
    timeout: Option<Duration>,
    use_server_time: bool,
}

impl ClobClientBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self {
            base_url: CLOB_BASE_URL.to_string(),
            chain_id: POLYGON,
            signer: None,
            api_credentials: None,
            timeout: None,
            use_server_time: false,
        }
    }

    /// Set the base URL (useful for testing with a mock server).
    ///
    /// A trailing slash is removed.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        let mut url = url.into();
        while url.ends_with('/') {
            url.pop();
        }
        self.base_url = url;
        self
    }

    /// Set the chain id signed into L1 messages.
    pub fn chain_id(mut self, chain_id: u64) -> Self {
        self.chain_id = chain_id;
        self
    }

    /// Set the wallet signer for L1 requests.
    pub fn signer(mut self, signer: Arc<PrivateKeySigner>) -> Self {
        self.signer = Some(signer);
        self
    }

    /// Set the API credentials for L2 requests.
    pub fn api_credentials(mut self, credentials: ApiCredentials) -> Self {
        self.api_credentials = Some(credentials);
        self
    }

    /// Set the total timeout for each request.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Use the server's clock instead of the local one for signed timestamps.
    pub fn use_server_time(mut self, enabled: bool) -> Self {
        self.use_server_time = enabled;
        self
    }

    /// Build the client.
    ///
    /// Requests are sent once; a failed attempt is reported to the caller.
    pub fn build(self) -> ClobClient {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_static(concat!("polymarket-keys/", env!("CARGO_PKG_VERSION"))),
        );

        // Build the HTTP client with middleware.
        let mut reqwest_builder = reqwest::Client::builder().default_headers(headers);
        if let Some(timeout) = self.timeout {
            reqwest_builder = reqwest_builder.timeout(timeout);
        }
        let reqwest_client = reqwest_builder.build().unwrap_or_else(|e| {
            tracing::warn!(
                error = %e,
                "Failed to build configured HTTP client, falling back to defaults without timeout"
            );
            reqwest::Client::new()
        });

        let http_client = ClientBuilder::new(reqwest_client)
            .with(TracingMiddleware::default())
            .build();

        ClobClient {
            http_client,
            base_url: self.base_url,
            chain_id: self.chain_id,
            signer: self.signer,
            api_credentials: self.api_credentials,
            use_server_time: self.use_server_time,
        }
    }
}

impl Default for ClobClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

// ClobAuthApi trait implementation.

impl ClobAuthApi for ClobClient {
    async fn create_api_key(&self, nonce: Option<u64>) -> Result<ApiCredentials, PolymarketError> {
        ClobClient::create_api_key(self, nonce).await
    }

    async fn derive_api_key(&self, nonce: Option<u64>) -> Result<ApiCredentials, PolymarketError> {
        ClobClient::derive_api_key(self, nonce).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_removed() {
        let client = ClobClient::builder().base_url("http://localhost:8080//").build();
        assert_eq!(client.base_url, "http://localhost:8080");
    }

    #[test]
    fn test_builder_defaults() {
        let client = ClobClient::new();
        assert_eq!(client.base_url, CLOB_BASE_URL);
        assert_eq!(client.chain_id(), POLYGON);
        assert!(client.address().is_none());
    }

    #[test]
    fn test_address_is_checksummed() {
        let signer = crate::auth::signer_from_hex(
            "0x4c0883a69102937d6231471b5dbb6204fe5129617082792ae468d01a3f362318",
        )
        .unwrap();
        let client = ClobClient::builder().signer(Arc::new(signer)).build();
        assert_eq!(
            client.address().as_deref(),
            Some("0x2c7536E3605D9C16a7a3D7b1898e529396a65c23")
        );
    }

    #[test]
    fn test_debug_hides_credentials() {
        let client = ClobClient::builder()
            .api_credentials(ApiCredentials::new("k", "top_secret", "phrase"))
            .build();
        let debug_str = format!("{:?}", client);
        assert!(debug_str.contains("has_api_credentials: true"));
        assert!(!debug_str.contains("top_secret"));
    }

    #[tokio::test]
    async fn test_l1_requires_signer() {
        let client = ClobClient::new();
        let err = client.create_api_key(None).await.unwrap_err();
        assert!(err.is_auth());
    }

    #[tokio::test]
    async fn test_l2_requires_credentials() {
        let client = ClobClient::new();
        let err = client.get_api_keys().await.unwrap_err();
        assert!(matches!(err, PolymarketError::MissingCredentials));
    }
}
