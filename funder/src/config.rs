// funder/src/config.rs

use dotenv::dotenv;
use ethers::types::U256;
use ethers::utils::parse_ether;
use eyre::Result;
use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    // Endpoints
    pub rpc_url: String,
    pub faucet_url: String,

    // Funding Options
    pub funding_threshold_eth: String,
    pub funding_threshold_wei: U256,
    pub faucet_claim_retries: u32,
    pub poll_interval_secs: u64,
    pub max_poll_wait_secs: u64,

    // Faucet acknowledgment heuristic. The faucet's response format is not a
    // stable contract, so the marker we scan the body for is configurable.
    pub faucet_success_marker: String,

    // Transport Options
    pub http_timeout_secs: u64,
}

pub fn load_config() -> Result<Config> {
    println!("Loading configuration from .env file...");
    dotenv().ok();

    let parse_u32_env = |var_name: &str, default: u32| -> u32 {
        env::var(var_name).ok().and_then(|s| s.parse::<u32>().ok()).unwrap_or(default)
    };
    let parse_u64_env = |var_name: &str, default: u64| -> u64 {
        env::var(var_name).ok().and_then(|s| s.parse::<u64>().ok()).unwrap_or(default)
    };
    let string_env_or = |var_name: &str, default: &str| -> String {
        env::var(var_name).ok().filter(|s| !s.is_empty()).unwrap_or_else(|| default.to_string())
    };

    // --- Load vars ---
    let rpc_url = env::var("RPC_URL")
        .map_err(|_| eyre::eyre!("RPC_URL must be set in .env or the environment"))?;
    let faucet_url = env::var("FAUCET_URL")
        .map_err(|_| eyre::eyre!("FAUCET_URL must be set in .env or the environment"))?;

    let funding_threshold_eth = string_env_or("FUNDING_THRESHOLD_ETH", "0.1");
    // Threshold is parsed straight to wei so balance comparisons are exact
    // integer compares, immune to float rounding near the boundary.
    let funding_threshold_wei: U256 = parse_ether(&funding_threshold_eth)
        .map_err(|e| eyre::eyre!("FUNDING_THRESHOLD_ETH {:?} is not a valid decimal ETH amount: {}", funding_threshold_eth, e))?;
    if funding_threshold_wei.is_zero() {
        eyre::bail!("FUNDING_THRESHOLD_ETH must be positive");
    }

    let faucet_claim_retries = parse_u32_env("FAUCET_CLAIM_RETRIES", 3);
    if faucet_claim_retries == 0 {
        eyre::bail!("FAUCET_CLAIM_RETRIES must be at least 1");
    }
    let poll_interval_secs = parse_u64_env("POLL_INTERVAL_SECS", 30);
    if poll_interval_secs == 0 {
        eyre::bail!("POLL_INTERVAL_SECS must be at least 1");
    }
    let max_poll_wait_secs = parse_u64_env("MAX_POLL_WAIT_SECS", 600);
    let faucet_success_marker = string_env_or("FAUCET_SUCCESS_MARKER", "success");
    let http_timeout_secs = parse_u64_env("HTTP_TIMEOUT_SECS", 10);

    let config = Config {
        rpc_url,
        faucet_url,
        funding_threshold_eth,
        funding_threshold_wei,
        faucet_claim_retries,
        poll_interval_secs,
        max_poll_wait_secs,
        faucet_success_marker,
        http_timeout_secs,
    };

    println!("✅ Configuration loaded successfully.");
    Ok(config)
}
// END OF FILE: funder/src/config.rs
