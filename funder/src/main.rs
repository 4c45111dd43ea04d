// funder/src/main.rs

use std::io::{self, BufRead, Write};
use std::time::Duration;

use chrono::Utc;
use eyre::Result;

use testnet_funder::balance::wei_to_eth;
use testnet_funder::config::load_config;
use testnet_funder::{
    FunderError, FundingMonitor, FundingSettings, HttpChainRpc, HttpFaucet, PrivateKey,
    TokioSleeper, WalletAddress,
};

fn prompt(label: &str) -> Result<String> {
    print!("{}: ", label);
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("testnet_funder=info")),
        )
        .init();

    let config = load_config()?;

    println!("\n--- Testnet Wallet Funding ({}) ---", Utc::now());
    println!(
        "RPC: {} | Faucet: {} | Threshold: {} ETH",
        config.rpc_url, config.faucet_url, config.funding_threshold_eth
    );

    // Interactive input only, no flags. Validation failures abort before any
    // network call is made.
    let address_input = prompt("Enter wallet address")?;
    let address: WalletAddress = match address_input.parse() {
        Ok(addr) => addr,
        Err(e) => {
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    };

    // The private key is only needed by the contract deployment that follows
    // a funded run; we validate the format up front so the operator finds out
    // now rather than after the faucet wait.
    let key_input = prompt("Enter private key for the deploy step (Enter to skip)")?;
    if !key_input.is_empty() {
        if let Err(e) = key_input.parse::<PrivateKey>() {
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
        println!("  Private key format OK (kept in memory only).");
    }

    let http_timeout = Duration::from_secs(config.http_timeout_secs);
    let rpc = HttpChainRpc::new(&config.rpc_url, http_timeout)?;
    let faucet = HttpFaucet::new(&config.faucet_url, &config.faucet_success_marker, http_timeout)?;
    let monitor = FundingMonitor::new(rpc, faucet, TokioSleeper, FundingSettings::from_config(&config));

    println!(
        "⏳ Ensuring {} holds at least {} ETH (claim retries: {}, poll every {}s, max wait {}s)...",
        address,
        config.funding_threshold_eth,
        config.faucet_claim_retries,
        config.poll_interval_secs,
        config.max_poll_wait_secs
    );

    match monitor.ensure_funded(&address.to_hex()).await {
        Ok(funded) => {
            let source = if funded.via_faucet { "after faucet claim" } else { "already funded" };
            println!(
                "✅ Wallet funded: {:.6} ETH ({}).",
                wei_to_eth(funded.balance_wei),
                source
            );
            println!("--- Funding Complete ({}) ---", Utc::now());
            Ok(())
        }
        Err(e @ FunderError::FaucetExhausted { .. }) => {
            eprintln!("❌ {}", e);
            eprintln!("   The faucet may be rate-limiting this address. Try again later.");
            std::process::exit(1);
        }
        Err(e @ FunderError::PollTimeout { .. }) => {
            eprintln!("⏳ {}", e);
            eprintln!("   The claim may still land; re-run to keep waiting.");
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    }
}
// END OF FILE: funder/src/main.rs
