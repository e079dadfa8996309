//! EIP-712 typed data for CLOB L1 authentication.
//!
//! Creating or deriving API credentials requires a wallet signature over a
//! `ClobAuth` struct in the `ClobAuthDomain` domain:
//!
//! ```text
//! EIP712Domain(string name,string version,uint256 chainId)
//! ClobAuth(address address,string timestamp,uint256 nonce,string message)
//! ```

use alloy_primitives::{Address, B256, U256};
use alloy_signer_local::PrivateKeySigner;
use alloy_sol_types::{Eip712Domain, SolStruct, eip712_domain, sol};

use crate::auth::signer::sign_digest;
use crate::error::PolymarketError;

/// Domain name used by the CLOB for L1 authentication.
pub const CLOB_DOMAIN_NAME: &str = "ClobAuthDomain";
/// Domain version used by the CLOB for L1 authentication.
pub const CLOB_VERSION: &str = "1";
/// Fixed attestation message embedded in every `ClobAuth` struct.
pub const MSG_TO_SIGN: &str = "This message attests that I control the given wallet";

sol! {
    /// The `ClobAuth` message signed for L1 requests.
    #[derive(Debug, PartialEq, Eq)]
    struct ClobAuth {
        address address;
        string timestamp;
        uint256 nonce;
        string message;
    }
}

impl ClobAuth {
    /// Build the message for a wallet, Unix timestamp and nonce.
    pub fn for_wallet(address: Address, timestamp: u64, nonce: u64) -> Self {
        Self {
            address,
            timestamp: timestamp.to_string(),
            nonce: U256::from(nonce),
            message: MSG_TO_SIGN.to_string(),
        }
    }

    /// The final digest to sign for the given chain.
    pub fn signing_hash(&self, chain_id: u64) -> B256 {
        self.eip712_signing_hash(&clob_auth_domain(chain_id))
    }
}

/// The CLOB auth domain on a chain.
pub fn clob_auth_domain(chain_id: u64) -> Eip712Domain {
    eip712_domain! {
        name: CLOB_DOMAIN_NAME,
        version: CLOB_VERSION,
        chain_id: chain_id,
    }
}

/// Sign a `ClobAuth` message for the signer's address.
///
/// # Example
///
/// ```rust
/// use polymarket_keys::auth::{sign_clob_auth_message, signer_from_hex};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let signer = signer_from_hex(
///     "0x4c0883a69102937d6231471b5dbb6204fe5129617082792ae468d01a3f362318",
/// )?;
/// let signature = sign_clob_auth_message(&signer, 137, 1_700_000_000, 0)?;
/// assert_eq!(signature.len(), 132);
/// # Ok(())
/// # }
/// ```
pub fn sign_clob_auth_message(
    signer: &PrivateKeySigner,
    chain_id: u64,
    timestamp: u64,
    nonce: u64,
) -> Result<String, PolymarketError> {
    let message = ClobAuth::for_wallet(signer.address(), timestamp, nonce);
    sign_digest(signer, &message.signing_hash(chain_id))
}
