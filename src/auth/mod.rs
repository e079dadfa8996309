//! Authentication module for the Polymarket CLOB.
//!
//! This module provides:
//! - Wallet signer construction from a hex private key
//! - EIP-712 `ClobAuth` signing for L1 (wallet) authentication
//! - API credential storage with redacted secrets
//! - HMAC-SHA256 signature generation for L2 (API key) authentication

mod credentials;
mod eip712;
pub mod headers;
mod signature;
mod signer;

pub use credentials::ApiCredentials;
pub use eip712::{ClobAuth, MSG_TO_SIGN, clob_auth_domain, sign_clob_auth_message};
pub use headers::{create_l1_headers, create_l2_headers, current_unix_time_secs};
pub use signature::sign_l2_request;
pub use alloy_primitives::Address;
pub use alloy_signer_local::PrivateKeySigner;
pub use signer::{sign_digest, signer_from_hex};
