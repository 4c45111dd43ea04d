// funder/src/wallet.rs

use std::fmt;
use std::str::FromStr;

use ethers::types::Address;
use lazy_static::lazy_static;
use regex::Regex;

use crate::error::FunderError;

lazy_static! {
    // Strict form: mandatory 0x prefix, exactly 40 hex digits. ethers'
    // Address parser is laxer (prefix optional), so we gate on this first.
    static ref ADDRESS_RE: Regex = Regex::new(r"^0x[0-9a-fA-F]{40}$").unwrap();
}

/// A validated 20-byte wallet address. Constructing one is the only way to
/// hand an address to the RPC or faucet clients, so no network call can ever
/// be made with a malformed address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WalletAddress(Address);

impl WalletAddress {
    pub fn inner(&self) -> Address {
        self.0
    }

    /// Canonical textual form, `0x` + 40 lowercase hex digits.
    pub fn to_hex(&self) -> String {
        format!("{:#x}", self.0)
    }
}

impl FromStr for WalletAddress {
    type Err = FunderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if !ADDRESS_RE.is_match(trimmed) {
            return Err(FunderError::InvalidAddress(trimmed.to_string()));
        }
        let parsed = trimmed
            .parse::<Address>()
            .map_err(|_| FunderError::InvalidAddress(trimmed.to_string()))?;
        Ok(WalletAddress(parsed))
    }
}

impl fmt::Display for WalletAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

/// A 32-byte private key collected from the operator for the follow-up deploy
/// step. Only the format is checked here; the key is never logged and both
/// `Debug` and `Display` are redacted.
#[derive(Clone)]
pub struct PrivateKey([u8; 32]);

impl PrivateKey {
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl FromStr for PrivateKey {
    type Err = FunderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let cleaned = s.trim().trim_start_matches("0x");
        if cleaned.len() != 64 {
            return Err(FunderError::InvalidPrivateKey(format!(
                "expected 64 hex characters, got {}",
                cleaned.len()
            )));
        }
        let bytes = hex::decode(cleaned)
            .map_err(|_| FunderError::InvalidPrivateKey("non-hex characters".to_string()))?;
        let mut key = [0u8; 32];
        key.copy_from_slice(&bytes);
        Ok(PrivateKey(key))
    }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PrivateKey(<redacted>)")
    }
}

impl fmt::Display for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<redacted>")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_well_formed_address() {
        let addr: WalletAddress = "0xd8dA6BF26964aF9D7eEd9e03E53415D37aA96045"
            .parse()
            .unwrap();
        assert_eq!(addr.to_hex(), "0xd8da6bf26964af9d7eed9e03e53415d37aa96045");
    }

    #[test]
    fn rejects_malformed_addresses() {
        let bad = [
            "",
            "0x",
            "d8dA6BF26964aF9D7eEd9e03E53415D37aA96045", // missing prefix
            "0xd8dA6BF26964aF9D7eEd9e03E53415D37aA9604",  // 39 digits
            "0xd8dA6BF26964aF9D7eEd9e03E53415D37aA960455", // 41 digits
            "0xd8dA6BF26964aF9D7eEd9e03E53415D37aA9604g", // non-hex
            "0x d8dA6BF26964aF9D7eEd9e03E53415D37aA9604",
        ];
        for input in bad {
            let err = input.parse::<WalletAddress>().unwrap_err();
            assert!(
                matches!(err, FunderError::InvalidAddress(_)),
                "expected InvalidAddress for {:?}",
                input
            );
        }
    }

    #[test]
    fn address_tolerates_surrounding_whitespace() {
        let addr: WalletAddress = "  0xd8dA6BF26964aF9D7eEd9e03E53415D37aA96045\n"
            .parse()
            .unwrap();
        assert_eq!(addr.to_hex(), "0xd8da6bf26964af9d7eed9e03e53415d37aa96045");
    }

    #[test]
    fn private_key_accepts_with_and_without_prefix() {
        let hex64 = "4c0883a69102937d6231471b5dbb6204fe5129617082792ae468d01a3f362318";
        assert!(hex64.parse::<PrivateKey>().is_ok());
        assert!(format!("0x{}", hex64).parse::<PrivateKey>().is_ok());
    }

    #[test]
    fn private_key_rejects_bad_lengths_and_non_hex() {
        assert!(matches!(
            "abcd".parse::<PrivateKey>().unwrap_err(),
            FunderError::InvalidPrivateKey(_)
        ));
        let non_hex = "zz0883a69102937d6231471b5dbb6204fe5129617082792ae468d01a3f362318";
        assert!(matches!(
            non_hex.parse::<PrivateKey>().unwrap_err(),
            FunderError::InvalidPrivateKey(_)
        ));
    }

    #[test]
    fn private_key_debug_is_redacted() {
        let key: PrivateKey = "4c0883a69102937d6231471b5dbb6204fe5129617082792ae468d01a3f362318"
            .parse()
            .unwrap();
        assert_eq!(format!("{:?}", key), "PrivateKey(<redacted>)");
    }
}
