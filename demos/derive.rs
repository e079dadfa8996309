//! Example: derive API credentials with the library and check them.
//!
//! Run with: cargo run --example derive

use std::env;

use polymarket_keys::deriver::{DeriverConfig, derive_credentials, verify_credentials};
use polymarket_keys::{AMOY, POLYGON};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenv::dotenv();

    let Ok(private_key) = env::var("POLYMARKET_PRIVATE_KEY") else {
        println!("Set POLYMARKET_PRIVATE_KEY to run this example.");
        return Ok(());
    };

    let chain_id = if env::var("POLYMARKET_USE_AMOY").is_ok() { AMOY } else { POLYGON };
    let config = DeriverConfig::new(private_key).chain_id(chain_id);

    let credentials = derive_credentials(&config).await?;
    println!("API key: {}", credentials.api_key);
    println!("Credentials: {credentials:?}");

    let listed = verify_credentials(&config, &credentials).await?;
    println!("Listed by the CLOB: {listed}");

    Ok(())
}
