//! Wallet signer construction and digest signing.

use alloy_primitives::{B256, hex};
use alloy_signer::SignerSync;
use alloy_signer_local::PrivateKeySigner;

use crate::error::PolymarketError;

/// Parse a hex-encoded private key, with or without a `0x` prefix.
///
/// A malformed key is reported as [`PolymarketError::Auth`].
pub fn signer_from_hex(key: &str) -> Result<PrivateKeySigner, PolymarketError> {
    let trimmed = key.trim();
    let digits = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);

    // Shorter keys would be left-padded by the scalar parser.
    if digits.len() != 64 {
        return Err(PolymarketError::Auth(
            "private key must be 32 bytes of hex".to_string(),
        ));
    }

    digits.parse::<PrivateKeySigner>().map_err(|_| {
        PolymarketError::Auth("private key is not a valid secp256k1 key".to_string())
    })
}

/// Sign a 32-byte digest.
///
/// Returns the 65-byte `r || s || v` signature as `0x`-prefixed hex,
/// with `v` in the Ethereum `27`/`28` form.
pub fn sign_digest(signer: &PrivateKeySigner, hash: &B256) -> Result<String, PolymarketError> {
    let signature = signer
        .sign_hash_sync(hash)
        .map_err(|e| PolymarketError::Auth(format!("Signing failed: {e}")))?;
    Ok(hex::encode_prefixed(signature.as_bytes()))
}
