// funder/src/lib.rs
// Library interface for the testnet funding tool.

// Re-export modules needed by integration tests and the binary
pub mod balance;
pub mod clock;
pub mod config;
pub mod error;
pub mod faucet;
pub mod monitor;
pub mod rpc;
pub mod wallet;

// Public types re-exported for convenience
pub use clock::{Sleeper, TokioSleeper};
pub use error::FunderError;
pub use faucet::{ClaimResult, FaucetApi, HttpFaucet};
pub use monitor::{Funded, FundingMonitor, FundingSettings};
pub use rpc::{ChainRpc, HttpChainRpc};
pub use wallet::{PrivateKey, WalletAddress};
