use crate::core::{constants::*, error::SwapResult, SwapError};
use serde::{Deserialize, Serialize};
use solana_sdk::pubkey::Pubkey;
use std::env;
use std::str::FromStr;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub rpc_url: String,
    pub exchange_program: Pubkey,
    pub timeout_secs: u64,
    pub default_slippage_pct: f64,
    pub max_slippage_pct: f64,
    pub compute_unit_limit: u32,
    pub priority_fee_microlamports: u64,
    /// Optional JSON file with extra registry tokens.
    pub token_registry_path: Option<String>,
}

impl Config {
    pub fn from_env() -> SwapResult<Self> {
        let rpc_url = env::var("RPC_URL")
            .unwrap_or_else(|_| "https://api.mainnet-beta.solana.com".to_string());

        let exchange_program = match env::var("EXCHANGE_PROGRAM_ID") {
            Ok(id) => Pubkey::from_str(&id)
                .map_err(|e| SwapError::ConfigError(format!("Invalid EXCHANGE_PROGRAM_ID: {}", e)))?,
            Err(_) => *EXCHANGE_PROGRAM,
        };

        Ok(Self {
            rpc_url,
            exchange_program,
            timeout_secs: env::var("TIMEOUT_SECS")
                .unwrap_or_default()
                .parse()
                .unwrap_or(DEFAULT_RPC_TIMEOUT),
            default_slippage_pct: env::var("DEFAULT_SLIPPAGE_PCT")
                .unwrap_or_default()
                .parse()
                .unwrap_or(DEFAULT_SLIPPAGE_PCT),
            max_slippage_pct: env::var("MAX_SLIPPAGE_PCT")
                .unwrap_or_default()
                .parse()
                .unwrap_or(MAX_SLIPPAGE_PCT),
            compute_unit_limit: env::var("COMPUTE_UNIT_LIMIT")
                .unwrap_or_default()
                .parse()
                .unwrap_or(COMPUTE_UNIT_LIMIT),
            priority_fee_microlamports: env::var("PRIORITY_FEE_MICROLAMPORTS")
                .unwrap_or_default()
                .parse()
                .unwrap_or(PRIORITY_FEE_MICROLAMPORTS),
            token_registry_path: env::var("TOKEN_REGISTRY_PATH").ok(),
        })
    }

    pub fn validate(&self) -> SwapResult<()> {
        if self.max_slippage_pct > MAX_SLIPPAGE_PCT {
            return Err(SwapError::ConfigError(format!(
                "Max slippage cannot exceed {}%",
                MAX_SLIPPAGE_PCT
            )));
        }

        if self.default_slippage_pct > self.max_slippage_pct {
            return Err(SwapError::ConfigError(
                "Default slippage cannot exceed max slippage".to_string(),
            ));
        }

        if self.timeout_secs == 0 {
            return Err(SwapError::ConfigError(
                "Timeout must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rpc_url: "https://api.mainnet-beta.solana.com".to_string(),
            exchange_program: *EXCHANGE_PROGRAM,
            timeout_secs: DEFAULT_RPC_TIMEOUT,
            default_slippage_pct: DEFAULT_SLIPPAGE_PCT,
            max_slippage_pct: MAX_SLIPPAGE_PCT,
            compute_unit_limit: COMPUTE_UNIT_LIMIT,
            priority_fee_microlamports: PRIORITY_FEE_MICROLAMPORTS,
            token_registry_path: None,
        }
    }
}
