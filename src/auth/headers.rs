//! Authentication header construction.
//!
//! ## L1 headers (wallet signature)
//!
//! - `POLY_ADDRESS`: checksummed wallet address
//! - `POLY_SIGNATURE`: EIP-712 signature over `ClobAuth`
//! - `POLY_TIMESTAMP`: Unix seconds
//! - `POLY_NONCE`: nonce signed into `ClobAuth`
//!
//! ## L2 headers (API key)
//!
//! - `POLY_ADDRESS`, `POLY_SIGNATURE` (HMAC), `POLY_TIMESTAMP`
//! - `POLY_API_KEY`, `POLY_PASSPHRASE`

use std::time::{SystemTime, UNIX_EPOCH};

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};

use crate::auth::{ApiCredentials, PrivateKeySigner, sign_clob_auth_message, sign_l2_request};
use crate::error::PolymarketError;

/// Checksummed address of the signing wallet (L1 and L2).
pub const POLY_ADDRESS: &str = "poly_address";
/// EIP-712 signature for L1, HMAC-SHA256 signature for L2.
pub const POLY_SIGNATURE: &str = "poly_signature";
/// Unix seconds covered by the signature.
pub const POLY_TIMESTAMP: &str = "poly_timestamp";
/// Nonce signed into `ClobAuth` (L1 only).
pub const POLY_NONCE: &str = "poly_nonce";
/// API key of the credential set (L2 only).
pub const POLY_API_KEY: &str = "poly_api_key";
/// Passphrase of the credential set (L2 only). Marked sensitive.
pub const POLY_PASSPHRASE: &str = "poly_passphrase";

/// Current time in seconds since UNIX epoch.
pub fn current_unix_time_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}

/// Build the L1 headers for `/auth/api-key` and `/auth/derive-api-key`.
pub fn create_l1_headers(
    signer: &PrivateKeySigner,
    chain_id: u64,
    timestamp: u64,
    nonce: u64,
) -> Result<HeaderMap, PolymarketError> {
    let signature = sign_clob_auth_message(signer, chain_id, timestamp, nonce)?;

    let mut headers = HeaderMap::new();
    insert(&mut headers, POLY_ADDRESS, &signer.address().to_checksum(None))?;
    insert(&mut headers, POLY_SIGNATURE, &signature)?;
    insert(&mut headers, POLY_TIMESTAMP, &timestamp.to_string())?;
    insert(&mut headers, POLY_NONCE, &nonce.to_string())?;
    Ok(headers)
}

/// Build the L2 headers for a request made with API credentials.
pub fn create_l2_headers(
    signer: &PrivateKeySigner,
    credentials: &ApiCredentials,
    timestamp: u64,
    method: &str,
    request_path: &str,
    body: Option<&str>,
) -> Result<HeaderMap, PolymarketError> {
    let signature = sign_l2_request(credentials, timestamp, method, request_path, body)?;

    let mut headers = HeaderMap::new();
    insert(&mut headers, POLY_ADDRESS, &signer.address().to_checksum(None))?;
    insert(&mut headers, POLY_SIGNATURE, &signature)?;
    insert(&mut headers, POLY_TIMESTAMP, &timestamp.to_string())?;
    insert(&mut headers, POLY_API_KEY, &credentials.api_key)?;
    insert(&mut headers, POLY_PASSPHRASE, credentials.expose_passphrase())?;
    Ok(headers)
}

fn insert(headers: &mut HeaderMap, name: &'static str, value: &str) -> Result<(), PolymarketError> {
    let mut value = HeaderValue::from_str(value)
        .map_err(|_| PolymarketError::Auth(format!("Invalid value for header {name}")))?;
    if name == POLY_PASSPHRASE {
        value.set_sensitive(true);
    }
    headers.insert(HeaderName::from_static(name), value);
    Ok(())
}
