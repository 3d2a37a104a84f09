use crate::core::{constants::*, error::SwapResult, Config, SwapError, Token, TokenProgram};
use log::info;
use serde::Deserialize;
use solana_sdk::pubkey::Pubkey;
use std::collections::HashMap;
use std::str::FromStr;

/// Static symbol → token mapping, fixed at configuration time.
///
/// Resolution is symbol-indexed, not identity-indexed: two symbols sharing a
/// mint (the native asset under two display names) are both legitimate.
pub struct TokenRegistry {
    tokens: HashMap<String, Token>,
}

#[derive(Debug, Deserialize)]
struct RegistryEntry {
    symbol: String,
    mint: String,
    decimals: u8,
    #[serde(default)]
    program: Option<TokenProgram>,
}

impl TokenRegistry {
    /// Built-in mainnet token set.
    pub fn mainnet() -> Self {
        let mut registry = Self {
            tokens: HashMap::new(),
        };

        let native = spl_token::native_mint::ID;
        registry.insert(Token {
            symbol: "SOL".to_string(),
            mint: native,
            decimals: 9,
            program: TokenProgram::Legacy,
        });
        registry.insert(Token {
            symbol: "WSOL".to_string(),
            mint: native,
            decimals: 9,
            program: TokenProgram::Legacy,
        });
        registry.insert(Token {
            symbol: "USDC".to_string(),
            mint: Pubkey::from_str(USDC_MINT).unwrap(),
            decimals: 6,
            program: TokenProgram::Legacy,
        });
        registry.insert(Token {
            symbol: "USDT".to_string(),
            mint: Pubkey::from_str(USDT_MINT).unwrap(),
            decimals: 6,
            program: TokenProgram::Legacy,
        });
        registry.insert(Token {
            symbol: "BONK".to_string(),
            mint: Pubkey::from_str(BONK_MINT).unwrap(),
            decimals: 5,
            program: TokenProgram::Legacy,
        });
        registry.insert(Token {
            symbol: "PYUSD".to_string(),
            mint: Pubkey::from_str(PYUSD_MINT).unwrap(),
            decimals: 6,
            program: TokenProgram::Extended,
        });

        registry
    }

    /// Built-in set, extended with entries from the configured JSON file.
    pub fn from_config(config: &Config) -> SwapResult<Self> {
        let mut registry = Self::mainnet();

        if let Some(path) = &config.token_registry_path {
            let raw = std::fs::read_to_string(path)?;
            let entries: Vec<RegistryEntry> = serde_json::from_str(&raw)?;
            info!("Loading {} registry entries from {}", entries.len(), path);

            for entry in entries {
                let mint = Pubkey::from_str(&entry.mint)?;
                registry.insert(Token {
                    symbol: entry.symbol,
                    mint,
                    decimals: entry.decimals,
                    program: entry.program.unwrap_or(TokenProgram::Legacy),
                });
            }
        }

        Ok(registry)
    }

    pub fn insert(&mut self, token: Token) {
        self.tokens.insert(token.symbol.to_uppercase(), token);
    }

    /// Pure lookup; symbols are case-insensitive.
    pub fn resolve(&self, symbol: &str) -> SwapResult<&Token> {
        self.tokens
            .get(&symbol.to_uppercase())
            .ok_or_else(|| SwapError::UnknownToken(symbol.to_string()))
    }

    /// All registered tokens, sorted by symbol for stable display.
    pub fn tokens(&self) -> Vec<&Token> {
        let mut tokens: Vec<&Token> = self.tokens.values().collect();
        tokens.sort_by(|a, b| a.symbol.cmp(&b.symbol));
        tokens
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_known_symbol() {
        let registry = TokenRegistry::mainnet();
        let usdc = registry.resolve("USDC").unwrap();
        assert_eq!(usdc.decimals, 6);
        assert_eq!(usdc.program, TokenProgram::Legacy);
    }

    #[test]
    fn test_resolve_is_case_insensitive() {
        let registry = TokenRegistry::mainnet();
        assert!(registry.resolve("usdt").is_ok());
        assert!(registry.resolve("Bonk").is_ok());
    }

    #[test]
    fn test_resolve_unknown_symbol() {
        let registry = TokenRegistry::mainnet();
        match registry.resolve("NOPE") {
            Err(SwapError::UnknownToken(symbol)) => assert_eq!(symbol, "NOPE"),
            other => panic!("expected UnknownToken, got {:?}", other.map(|t| t.symbol.clone())),
        }
    }

    #[test]
    fn test_native_aliasing_shares_identity() {
        let registry = TokenRegistry::mainnet();
        let sol = registry.resolve("SOL").unwrap();
        let wsol = registry.resolve("WSOL").unwrap();
        assert_eq!(sol.mint, wsol.mint);
        assert_ne!(sol.symbol, wsol.symbol);
    }

    #[test]
    fn test_extended_program_token() {
        let registry = TokenRegistry::mainnet();
        let pyusd = registry.resolve("PYUSD").unwrap();
        assert_eq!(pyusd.program, TokenProgram::Extended);
        assert_eq!(pyusd.program.id(), spl_token_2022::ID);
    }
}
