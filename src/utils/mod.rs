use crate::core::{error::SwapResult, SwapError};
use colored::*;
use dialoguer::{theme::ColorfulTheme, Password};
use solana_sdk::signature::Keypair;
use solana_sdk::signer::SeedDerivable;

/// Convert a human token amount to base units.
pub fn to_base_units(amount: f64, decimals: u8) -> u64 {
    (amount * 10f64.powi(decimals as i32)) as u64
}

/// Convert base units back to a human token amount.
pub fn from_base_units(amount: u64, decimals: u8) -> f64 {
    amount as f64 / 10f64.powi(decimals as i32)
}

/// Format large numbers with thousands separators
pub fn format_number(n: u64) -> String {
    let s = n.to_string();
    let mut result = String::new();
    let mut count = 0;

    for ch in s.chars().rev() {
        if count == 3 {
            result.push(',');
            count = 0;
        }
        result.push(ch);
        count += 1;
    }

    result.chars().rev().collect()
}

/// Load the signing keypair from the environment, prompting when absent.
/// Accepts a JSON byte array or base58-encoded key material.
pub fn load_keypair() -> SwapResult<Keypair> {
    let private_key = if let Ok(key) = std::env::var("WALLET_PRIVATE_KEY") {
        key
    } else if let Ok(key) = std::env::var("PRIVATE_KEY") {
        key
    } else {
        println!("{}", "🔑 Enter your private key".yellow());
        Password::with_theme(&ColorfulTheme::default())
            .with_prompt("Private Key")
            .interact()
            .map_err(|e| SwapError::ConfigError(format!("Could not read key: {}", e)))?
    };

    parse_keypair(&private_key)
}

fn parse_keypair(private_key: &str) -> SwapResult<Keypair> {
    if private_key.starts_with('[') && private_key.ends_with(']') {
        // JSON array format
        let bytes: Vec<u8> = serde_json::from_str(private_key)
            .map_err(|_| SwapError::ConfigError("Invalid private key format".to_string()))?;
        return Keypair::from_bytes(&bytes)
            .map_err(|_| SwapError::ConfigError("Invalid private key".to_string()));
    }

    // Base58 encoded
    let mut bytes = bs58::decode(private_key)
        .into_vec()
        .map_err(|_| SwapError::ConfigError("Invalid base58 private key format".to_string()))?;

    // Some wallets export keys with a leading version byte
    if bytes.len() == 65 {
        bytes.remove(0);
    }

    match bytes.len() {
        32 => Keypair::from_seed(&bytes)
            .map_err(|e| SwapError::ConfigError(format!("Invalid seed: {}", e))),
        64 => Keypair::from_bytes(&bytes)
            .map_err(|e| SwapError::ConfigError(format!("Invalid keypair: {}", e))),
        other => Err(SwapError::ConfigError(format!(
            "Private key must be 32 (seed) or 64 (keypair) bytes, got {}",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use solana_sdk::signer::Signer;

    #[test]
    fn test_base_unit_conversion() {
        assert_eq!(to_base_units(1.5, 9), 1_500_000_000);
        assert_eq!(to_base_units(0.000001, 6), 1);
        assert_eq!(from_base_units(1_500_000_000, 9), 1.5);
    }

    #[test]
    fn test_negative_amounts_saturate_to_zero() {
        // Zero is rejected by request validation downstream.
        assert_eq!(to_base_units(-1.0, 6), 0);
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(1234567), "1,234,567");
        assert_eq!(format_number(100), "100");
        assert_eq!(format_number(1000), "1,000");
    }

    #[test]
    fn test_parse_keypair_json_array() {
        let keypair = Keypair::new();
        let json = serde_json::to_string(&keypair.to_bytes().to_vec()).unwrap();
        let parsed = parse_keypair(&json).unwrap();
        assert_eq!(parsed.pubkey(), keypair.pubkey());
    }

    #[test]
    fn test_parse_keypair_base58() {
        let keypair = Keypair::new();
        let encoded = bs58::encode(keypair.to_bytes()).into_string();
        let parsed = parse_keypair(&encoded).unwrap();
        assert_eq!(parsed.pubkey(), keypair.pubkey());
    }

    #[test]
    fn test_parse_keypair_rejects_garbage() {
        assert!(parse_keypair("not-a-key").is_err());
    }
}
