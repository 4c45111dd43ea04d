// funder/src/error.rs

use std::time::Duration;
use thiserror::Error;

/// Error taxonomy for the funding workflow.
///
/// Validation failures and malformed RPC payloads are hard errors and are
/// never retried. Faucet transport failures are retried by the monitor up to
/// its configured bound. Exhaustion and timeout are reported outcomes, not
/// crashes: the caller decides whether to abort the run.
#[derive(Debug, Error)]
pub enum FunderError {
    #[error("invalid wallet address {0:?}: expected 0x followed by 40 hex characters")]
    InvalidAddress(String),

    #[error("invalid private key: {0}")]
    InvalidPrivateKey(String),

    #[error("RPC request failed: {reason}")]
    RpcTransport { reason: String },

    #[error("malformed RPC response: {0}")]
    MalformedRpcResponse(String),

    #[error("faucet request failed: {reason}")]
    FaucetTransport { reason: String },

    #[error("faucet did not acknowledge success after {attempts} attempts")]
    FaucetExhausted {
        attempts: u32,
        /// Body of the last faucet response, if any reached us. Kept raw
        /// because the faucet's success contract is not stable JSON.
        last_response: Option<String>,
    },

    #[error("balance did not reach {threshold_eth} ETH within {waited:?}")]
    PollTimeout { waited: Duration, threshold_eth: String },
}
