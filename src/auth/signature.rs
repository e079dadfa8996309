//! HMAC-SHA256 signature generation for CLOB L2 authentication.
//!
//! L2 endpoints require a signature computed as:
//! ```text
//! HMAC-SHA256(timestamp + METHOD + requestPath + body, base64url_decode(api_secret))
//! ```
//!
//! The signature is then URL-safe base64 encoded and sent in the
//! `POLY_SIGNATURE` header.

use base64::{Engine, engine::general_purpose::URL_SAFE};
use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::auth::ApiCredentials;
use crate::error::PolymarketError;

type HmacSha256 = Hmac<Sha256>;

/// Sign a request for the CLOB's L2 endpoints.
///
/// # Arguments
///
/// * `credentials` - API credentials containing the secret
/// * `timestamp` - Unix timestamp in seconds sent in `POLY_TIMESTAMP`
/// * `method` - HTTP method, e.g. `GET`
/// * `request_path` - The API endpoint path (e.g., "/auth/api-keys")
/// * `body` - The serialized JSON body, if any
///
/// # Example
///
/// ```rust
/// use polymarket_keys::auth::{ApiCredentials, sign_l2_request};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let credentials = ApiCredentials::new("key", "c2VjcmV0", "passphrase"); // base64 of "secret"
/// let signature = sign_l2_request(&credentials, 1_700_000_000, "GET", "/auth/api-keys", None)?;
/// # Ok(())
/// # }
/// ```
pub fn sign_l2_request(
    credentials: &ApiCredentials,
    timestamp: u64,
    method: &str,
    request_path: &str,
    body: Option<&str>,
) -> Result<String, PolymarketError> {
    let secret_decoded = URL_SAFE.decode(credentials.expose_secret()).map_err(|_| {
        PolymarketError::Auth("API secret must be valid URL-safe base64.".to_string())
    })?;

    let mut message = format!("{timestamp}{method}{request_path}");
    if let Some(body) = body {
        // The venue signs bodies with double quotes only.
        message.push_str(&body.replace('\'', "\""));
    }

    let mut hmac = HmacSha256::new_from_slice(&secret_decoded)
        .map_err(|e| PolymarketError::Auth(format!("Invalid HMAC key: {e}")))?;
    hmac.update(message.as_bytes());
    let hmac_result = hmac.finalize().into_bytes();

    Ok(URL_SAFE.encode(hmac_result))
}
