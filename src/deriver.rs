//! Credential derivation workflow.
//!
//! Initialize a client from [`DeriverConfig`], create or derive the API
//! credentials once, then render them as `KEY=VALUE` lines:
//!
//! ```text
//! POLYMARKET_API_KEY=<key>
//! POLYMARKET_SECRET=<secret>
//! POLYMARKET_PASSPHRASE=<passphrase>
//! ```
//!
//! The wallet key is parsed inside each call and dropped before it returns.

use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use url::Url;

use crate::POLYGON;
use crate::auth::{ApiCredentials, signer_from_hex};
use crate::clob::{CLOB_BASE_URL, ClobAuthApi, ClobClient};
use crate::error::PolymarketError;

/// Environment variable name for the API key line.
pub const API_KEY_VAR: &str = "POLYMARKET_API_KEY";
/// Environment variable name for the API secret line.
pub const SECRET_VAR: &str = "POLYMARKET_SECRET";
/// Environment variable name for the passphrase line.
pub const PASSPHRASE_VAR: &str = "POLYMARKET_PASSPHRASE";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration for one derivation run.
#[derive(Clone)]
pub struct DeriverConfig {
    /// Base URL of the CLOB API
    pub endpoint: String,
    /// Chain id signed into the L1 message
    pub chain_id: u64,
    /// Nonce signed into the L1 message
    pub nonce: u64,
    /// Timeout for each request
    pub timeout: Duration,
    /// Sign with the server's clock instead of the local one
    pub use_server_time: bool,
    signing_key: SecretString,
}

impl DeriverConfig {
    /// Create a configuration for Polygon mainnet with default settings.
    pub fn new(signing_key: impl Into<String>) -> Self {
        Self {
            endpoint: CLOB_BASE_URL.to_string(),
            chain_id: POLYGON,
            nonce: 0,
            timeout: DEFAULT_TIMEOUT,
            use_server_time: false,
            signing_key: SecretString::from(signing_key.into()),
        }
    }

    /// Set the CLOB base URL.
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Set the chain id.
    pub fn chain_id(mut self, chain_id: u64) -> Self {
        self.chain_id = chain_id;
        self
    }

    /// Set the nonce.
    pub fn nonce(mut self, nonce: u64) -> Self {
        self.nonce = nonce;
        self
    }

    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sign with the server's clock.
    pub fn use_server_time(mut self, enabled: bool) -> Self {
        self.use_server_time = enabled;
        self
    }

    /// Parse the signing key and build a client around it.
    ///
    /// The endpoint is validated before the key is touched.
    fn client(&self, api_credentials: Option<ApiCredentials>) -> Result<ClobClient, PolymarketError> {
        Url::parse(&self.endpoint)?;
        let signer = signer_from_hex(self.signing_key.expose_secret())?;

        let mut builder = ClobClient::builder()
            .base_url(self.endpoint.as_str())
            .chain_id(self.chain_id)
            .signer(Arc::new(signer))
            .timeout(self.timeout)
            .use_server_time(self.use_server_time);
        if let Some(credentials) = api_credentials {
            builder = builder.api_credentials(credentials);
        }
        Ok(builder.build())
    }
}

impl std::fmt::Debug for DeriverConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeriverConfig")
            .field("endpoint", &self.endpoint)
            .field("chain_id", &self.chain_id)
            .field("nonce", &self.nonce)
            .field("timeout", &self.timeout)
            .field("use_server_time", &self.use_server_time)
            .field("signing_key", &"[REDACTED]")
            .finish()
    }
}

/// Obtain the API credentials for the configured key.
///
/// Makes a single create-or-derive call against the venue. A malformed key
/// fails with [`PolymarketError::Auth`] before any request is sent.
pub async fn derive_credentials(config: &DeriverConfig) -> Result<ApiCredentials, PolymarketError> {
    let client = config.client(None)?;
    tracing::info!(
        endpoint = %config.endpoint,
        chain_id = config.chain_id,
        address = %client.address().unwrap_or_default(),
        "Connecting to Polymarket CLOB"
    );
    derive_with(&client, config.nonce).await
}

/// Obtain the API credentials through any [`ClobAuthApi`] implementation.
pub async fn derive_with<C: ClobAuthApi>(
    api: &C,
    nonce: u64,
) -> Result<ApiCredentials, PolymarketError> {
    tracing::info!(nonce, "Deriving API credentials");
    let credentials = api.create_or_derive_api_key(Some(nonce)).await?;
    credentials.validate()?;
    tracing::debug!(api_key = %credentials.api_key, "API credentials obtained");
    Ok(credentials)
}

/// Check that the venue lists the credentials for the configured key.
pub async fn verify_credentials(
    config: &DeriverConfig,
    credentials: &ApiCredentials,
) -> Result<bool, PolymarketError> {
    let client = config.client(Some(credentials.clone()))?;
    let keys = client.get_api_keys().await?;
    Ok(keys.contains(&credentials.api_key))
}

/// Render the credentials as three `KEY=VALUE` lines.
pub fn render_env_lines(credentials: &ApiCredentials) -> String {
    format!(
        "{API_KEY_VAR}={}\n{SECRET_VAR}={}\n{PASSPHRASE_VAR}={}\n",
        credentials.api_key,
        credentials.expose_secret(),
        credentials.expose_passphrase()
    )
}

/// Write the credentials as three `KEY=VALUE` lines.
pub fn present_credentials<W: Write>(
    credentials: &ApiCredentials,
    writer: &mut W,
) -> std::io::Result<()> {
    writer.write_all(render_env_lines(credentials).as_bytes())?;
    writer.flush()
}

/// Derive the credentials and write them.
///
/// Nothing is written when derivation fails.
pub async fn run<W: Write>(
    config: &DeriverConfig,
    writer: &mut W,
) -> Result<ApiCredentials, PolymarketError> {
    let credentials = derive_credentials(config).await?;
    present_credentials(&credentials, writer)?;
    Ok(credentials)
}
