//! Polymarket CLOB REST API client.
//!
//! Only the credential endpoints are covered:
//!
//! | Level | Endpoint | Authentication |
//! |-------|----------|----------------|
//! | Public | `GET /time` | none |
//! | L1 | `POST /auth/api-key`, `GET /auth/derive-api-key` | EIP-712 wallet signature |
//! | L2 | `GET /auth/api-keys` | HMAC-SHA256 with API credentials |
//!
//! The [`ClobAuthApi`] trait abstracts the L1 operations so callers can
//! substitute a mock venue.

mod client;
mod endpoints;
mod traits;
pub mod types;

pub use client::{ClobClient, ClobClientBuilder};
pub use endpoints::*;
pub use traits::ClobAuthApi;
