// funder/src/balance.rs

use ethers::types::U256;
use ethers::utils::format_units;

use crate::error::FunderError;

/// Parses an `eth_getBalance` result string into wei.
///
/// The node returns a `0x`-prefixed hex quantity. Anything else (missing
/// prefix, empty digits, non-hex characters) is a malformed response and is
/// surfaced as a hard error -- it must never be read as a zero balance.
pub fn parse_hex_wei(raw: &str) -> Result<U256, FunderError> {
    let trimmed = raw.trim();
    let digits = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .ok_or_else(|| {
            FunderError::MalformedRpcResponse(format!(
                "balance {:?} is not a 0x-prefixed hex quantity",
                raw
            ))
        })?;
    if digits.is_empty() {
        return Err(FunderError::MalformedRpcResponse(
            "balance hex quantity has no digits".to_string(),
        ));
    }
    U256::from_str_radix(digits, 16).map_err(|_| {
        FunderError::MalformedRpcResponse(format!("balance {:?} contains non-hex digits", raw))
    })
}

/// Wei -> ETH as f64, for display only. Threshold comparisons stay in integer
/// wei so this lossy conversion can never produce a false negative.
pub fn wei_to_eth(wei: U256) -> f64 {
    format_units(wei, "ether")
        .ok()
        .and_then(|s| s.parse::<f64>().ok())
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ethers::utils::parse_ether;

    #[test]
    fn parses_known_hex_wei() {
        // 0.1 ETH = 10^17 wei
        let wei = parse_hex_wei("0x16345785D8A0000").unwrap();
        assert_eq!(wei, U256::from(100_000_000_000_000_000u64));
    }

    #[test]
    fn round_trips_to_eth_within_epsilon() {
        let wei = parse_hex_wei("0x16345785D8A0000").unwrap();
        let eth = wei_to_eth(wei);
        assert!((eth - 0.1).abs() < 1e-5, "got {}", eth);
    }

    #[test]
    fn zero_balance_parses() {
        assert_eq!(parse_hex_wei("0x0").unwrap(), U256::zero());
    }

    #[test]
    fn rejects_missing_prefix() {
        assert!(matches!(
            parse_hex_wei("16345785D8A0000").unwrap_err(),
            FunderError::MalformedRpcResponse(_)
        ));
    }

    #[test]
    fn rejects_empty_and_non_hex() {
        for raw in ["", "0x", "0xZZ", "null", "0x12g4"] {
            assert!(
                matches!(
                    parse_hex_wei(raw),
                    Err(FunderError::MalformedRpcResponse(_))
                ),
                "expected malformed for {:?}",
                raw
            );
        }
    }

    #[test]
    fn threshold_compare_is_exact_at_the_boundary() {
        let threshold = parse_ether("0.1").unwrap();
        let exactly = parse_hex_wei("0x16345785D8A0000").unwrap();
        let one_short = exactly - U256::one();
        assert!(exactly >= threshold);
        assert!(one_short < threshold);
    }
}
