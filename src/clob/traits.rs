//! Trait definition for the CLOB credential endpoints.
//!
//! [`ClobAuthApi`] abstracts the venue so the derivation workflow can run
//! against [`ClobClient`](crate::clob::ClobClient) or a mock.
//!
//! # Example
//!
//! ```rust,ignore
//! use polymarket_keys::clob::ClobAuthApi;
//!
//! async fn show_key<C: ClobAuthApi>(client: &C) -> Result<(), polymarket_keys::PolymarketError> {
//!     let creds = client.create_or_derive_api_key(None).await?;
//!     println!("API key: {}", creds.api_key);
//!     Ok(())
//! }
//! ```

use std::future::Future;

use crate::auth::ApiCredentials;
use crate::error::PolymarketError;

/// The credential operations of the CLOB.
///
/// All methods are async and return `Result<T, PolymarketError>`.
pub trait ClobAuthApi: Send + Sync {
    /// Create a new API key for the wallet.
    ///
    /// Fails with an application error when a key already exists for the nonce.
    fn create_api_key(
        &self,
        nonce: Option<u64>,
    ) -> impl Future<Output = Result<ApiCredentials, PolymarketError>> + Send;

    /// Derive the existing API key for the wallet and nonce.
    fn derive_api_key(
        &self,
        nonce: Option<u64>,
    ) -> impl Future<Output = Result<ApiCredentials, PolymarketError>> + Send;

    /// Create an API key, or derive the existing one if creation is refused.
    ///
    /// Only application-level failures ([`PolymarketError::Api`] and
    /// [`PolymarketError::InvalidResponse`]) lead to the derive call.
    /// Authentication and network failures are returned as is.
    fn create_or_derive_api_key(
        &self,
        nonce: Option<u64>,
    ) -> impl Future<Output = Result<ApiCredentials, PolymarketError>> + Send {
        async move {
            match self.create_api_key(nonce).await {
                Ok(credentials) => Ok(credentials),
                Err(err @ (PolymarketError::Api(_) | PolymarketError::InvalidResponse(_))) => {
                    tracing::debug!(error = %err, "API key creation refused, deriving");
                    self.derive_api_key(nonce).await
                }
                Err(err) => Err(err),
            }
        }
    }
}
