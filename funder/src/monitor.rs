// funder/src/monitor.rs

use std::time::Duration;

use ethers::types::U256;
use tracing::{info, warn};

use crate::balance::wei_to_eth;
use crate::clock::Sleeper;
use crate::config::Config;
use crate::error::FunderError;
use crate::faucet::FaucetApi;
use crate::rpc::ChainRpc;
use crate::wallet::WalletAddress;

/// Knobs for one funding run. Threshold is carried in integer wei; the
/// decimal string is kept only for status lines and error messages.
#[derive(Debug, Clone)]
pub struct FundingSettings {
    pub threshold_wei: U256,
    pub threshold_eth: String,
    pub max_claim_retries: u32,
    pub poll_interval: Duration,
    pub max_poll_wait: Duration,
}

impl FundingSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            threshold_wei: config.funding_threshold_wei,
            threshold_eth: config.funding_threshold_eth.clone(),
            max_claim_retries: config.faucet_claim_retries,
            poll_interval: Duration::from_secs(config.poll_interval_secs),
            max_poll_wait: Duration::from_secs(config.max_poll_wait_secs),
        }
    }
}

/// Terminal success: the wallet is at or above the threshold.
#[derive(Debug, Clone)]
pub struct Funded {
    pub balance_wei: U256,
    /// False when the initial balance check already met the threshold and no
    /// faucet request was ever issued.
    pub via_faucet: bool,
}

/// Drives the claim-and-wait sequence:
///
/// ```text
/// INIT --(balance>=threshold)--> FUNDED
/// INIT --(balance<threshold)--> CLAIMING
/// CLAIMING --(ack success)--> POLLING
/// CLAIMING --(all retries fail)--> EXHAUSTED
/// POLLING --(balance>=threshold)--> FUNDED
/// POLLING --(balance<threshold)--> POLLING (after delay, bounded by max_poll_wait)
/// ```
///
/// One monitor per process run; everything is sequential awaits on the
/// calling task, so there is no shared state to protect.
pub struct FundingMonitor<R: ChainRpc, F: FaucetApi, S: Sleeper> {
    rpc: R,
    faucet: F,
    sleeper: S,
    settings: FundingSettings,
}

impl<R: ChainRpc, F: FaucetApi, S: Sleeper> FundingMonitor<R, F, S> {
    pub fn new(rpc: R, faucet: F, sleeper: S, settings: FundingSettings) -> Self {
        Self { rpc, faucet, sleeper, settings }
    }

    /// Brings `address` at or above the configured threshold using at most
    /// one faucet claim cycle. The raw string is validated before anything
    /// touches the network.
    pub async fn ensure_funded(&self, address: &str) -> Result<Funded, FunderError> {
        let address: WalletAddress = address.parse()?;
        let threshold = self.settings.threshold_wei;

        // INIT: short-circuit for operators who are already funded.
        let balance = self.rpc.balance_wei(&address).await?;
        info!(
            balance_eth = wei_to_eth(balance),
            threshold_eth = %self.settings.threshold_eth,
            "Initial balance check"
        );
        if balance >= threshold {
            info!("Already funded, skipping faucet claim.");
            return Ok(Funded { balance_wei: balance, via_faucet: false });
        }

        // CLAIMING: bounded retries with a fixed delay between attempts.
        info!(
            retries = self.settings.max_claim_retries,
            "Balance below threshold, requesting faucet funds"
        );
        let mut last_response: Option<String> = None;
        let mut acknowledged = false;
        for attempt in 1..=self.settings.max_claim_retries {
            info!(attempt, of = self.settings.max_claim_retries, "Faucet claim attempt");
            match self.faucet.claim(&address).await {
                Ok(result) => {
                    last_response = Some(result.raw);
                    if result.acknowledged {
                        info!(attempt, "Faucet acknowledged the claim.");
                        acknowledged = true;
                        break;
                    }
                    warn!(attempt, "Faucet response did not acknowledge success.");
                }
                Err(e) => {
                    warn!(attempt, error = %e, "Faucet claim attempt failed.");
                }
            }
            if attempt < self.settings.max_claim_retries {
                self.sleeper.sleep(self.settings.poll_interval).await;
            }
        }
        if !acknowledged {
            return Err(FunderError::FaucetExhausted {
                attempts: self.settings.max_claim_retries,
                last_response,
            });
        }

        // POLLING: wait for the claim to land, bounded by max_poll_wait.
        let mut waited = Duration::ZERO;
        loop {
            let balance = self.rpc.balance_wei(&address).await?;
            info!(
                balance_eth = wei_to_eth(balance),
                waited_secs = waited.as_secs(),
                "Polling balance"
            );
            if balance >= threshold {
                info!("Threshold reached, wallet funded.");
                return Ok(Funded { balance_wei: balance, via_faucet: true });
            }
            if waited >= self.settings.max_poll_wait {
                return Err(FunderError::PollTimeout {
                    waited,
                    threshold_eth: self.settings.threshold_eth.clone(),
                });
            }
            self.sleeper.sleep(self.settings.poll_interval).await;
            waited += self.settings.poll_interval;
        }
    }
}
