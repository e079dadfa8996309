//! CLOB REST API endpoint constants.

/// Base URL for the Polymarket CLOB REST API.
pub const CLOB_BASE_URL: &str = "https://clob.polymarket.com";

/// Public endpoints (no authentication required).
pub mod public {
    /// Get server time.
    pub const TIME: &str = "/time";
}

/// L1 endpoints (wallet signature required).
pub mod l1 {
    /// Create a new API key.
    pub const CREATE_API_KEY: &str = "/auth/api-key";
    /// Derive the existing API key for a nonce.
    pub const DERIVE_API_KEY: &str = "/auth/derive-api-key";
}

/// L2 endpoints (API credentials required).
pub mod l2 {
    /// List API keys of the authenticated wallet.
    pub const GET_API_KEYS: &str = "/auth/api-keys";
}
