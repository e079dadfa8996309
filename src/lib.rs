//! # Polymarket Keys
//!
//! Derive Polymarket CLOB API credentials from a wallet private key.
//!
//! ## Features
//!
//! - EIP-712 L1 authentication with a local secp256k1 key
//! - Create-or-derive of the API key, secret and passphrase triplet
//! - L2 (HMAC) authentication to check the derived credentials
//! - `KEY=VALUE` rendering for environment files
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use polymarket_keys::deriver::{DeriverConfig, derive_credentials, present_credentials};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = DeriverConfig::new(std::env::var("POLYMARKET_PRIVATE_KEY")?);
//!     let creds = derive_credentials(&config).await?;
//!     present_credentials(&creds, &mut std::io::stdout())?;
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod clob;
pub mod deriver;
pub mod error;

// Re-export commonly used types at crate root
pub use auth::ApiCredentials;
pub use error::PolymarketError;

/// Chain id of Polygon mainnet.
pub const POLYGON: u64 = 137;
/// Chain id of the Polygon Amoy testnet.
pub const AMOY: u64 = 80002;

/// Result type alias using PolymarketError
pub type Result<T> = std::result::Result<T, PolymarketError>;
