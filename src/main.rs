//! Print Polymarket CLOB API credentials for a wallet.
//!
//! Run with: `POLYMARKET_PRIVATE_KEY=0x... polymarket-keys`
//!
//! The three `KEY=VALUE` lines go to stdout; progress goes to stderr.

use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use polymarket_keys::POLYGON;
use polymarket_keys::clob::CLOB_BASE_URL;
use polymarket_keys::deriver::{DeriverConfig, run, verify_credentials};

#[derive(Parser)]
#[command(name = "polymarket-keys", version, about = "Derive Polymarket CLOB API credentials")]
struct Cli {
    /// Hex-encoded wallet private key
    #[arg(long, env = "POLYMARKET_PRIVATE_KEY", hide_env_values = true)]
    private_key: String,

    /// Chain id of the target network
    #[arg(long, env = "POLYMARKET_CHAIN_ID", default_value_t = POLYGON)]
    chain_id: u64,

    /// CLOB API base URL
    #[arg(long, env = "POLYMARKET_CLOB_URL", default_value = CLOB_BASE_URL)]
    endpoint: String,

    /// Nonce signed into the authentication message
    #[arg(long, env = "POLYMARKET_NONCE", default_value_t = 0)]
    nonce: u64,

    /// Request timeout in seconds
    #[arg(long, default_value_t = 30, value_parser = clap::value_parser!(u64).range(1..))]
    timeout_secs: u64,

    /// Sign with the server's clock instead of the local one
    #[arg(long)]
    use_server_time: bool,

    /// List the wallet's API keys afterwards and check the derived key is present
    #[arg(long)]
    verify: bool,
}

impl Cli {
    fn into_config(self) -> (DeriverConfig, bool) {
        let config = DeriverConfig::new(self.private_key)
            .endpoint(self.endpoint)
            .chain_id(self.chain_id)
            .nonce(self.nonce)
            .timeout(Duration::from_secs(self.timeout_secs))
            .use_server_time(self.use_server_time);
        (config, self.verify)
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let _ = dotenv::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let (config, verify) = Cli::parse().into_config();

    let credentials = match run(&config, &mut std::io::stdout().lock()).await {
        Ok(credentials) => credentials,
        Err(err) => {
            tracing::error!("Failed to derive API credentials: {err}");
            return ExitCode::FAILURE;
        }
    };
    tracing::info!("Copy the lines above into your .env.local file");

    if verify {
        match verify_credentials(&config, &credentials).await {
            Ok(true) => tracing::info!("API key is registered with the CLOB"),
            Ok(false) => {
                tracing::error!("API key {} is not listed by the CLOB", credentials.api_key);
                return ExitCode::FAILURE;
            }
            Err(err) => {
                tracing::error!("Failed to verify API credentials: {err}");
                return ExitCode::FAILURE;
            }
        }
    }

    ExitCode::SUCCESS
}
