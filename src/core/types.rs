use crate::core::constants::FEE_DENOMINATOR;
use serde::{Deserialize, Serialize};
use solana_sdk::pubkey::Pubkey;
use std::fmt;

/// Which token program owns a mint's accounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenProgram {
    Legacy,
    Extended,
}

impl TokenProgram {
    pub fn id(&self) -> Pubkey {
        match self {
            TokenProgram::Legacy => spl_token::ID,
            TokenProgram::Extended => spl_token_2022::ID,
        }
    }
}

impl fmt::Display for TokenProgram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenProgram::Legacy => write!(f, "legacy"),
            TokenProgram::Extended => write!(f, "extended"),
        }
    }
}

/// A registered token: symbol, mint identity, precision and account program.
/// Two symbols may share one mint (native asset aliasing).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub symbol: String,
    pub mint: Pubkey,
    pub decimals: u8,
    pub program: TokenProgram,
}

impl Token {
    pub fn is_native(&self) -> bool {
        self.mint == spl_token::native_mint::ID
    }
}

/// A liquidity pool as enumerated from the exchange program.
///
/// `token_a`/`token_b` carry the on-chain record order; canonical ordering is
/// applied by the pair resolver, not here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PoolInfo {
    pub address: Pubkey,
    pub token_a: Pubkey,
    pub token_b: Pubkey,
    pub vault_a: Pubkey,
    pub vault_b: Pubkey,
    pub fee: u64,
    pub tick_spacing: u16,
    pub liquidity: u128,
    pub sqrt_price: u128,
}

impl PoolInfo {
    /// Unordered pair match.
    pub fn trades_pair(&self, mint_a: &Pubkey, mint_b: &Pubkey) -> bool {
        (self.token_a == *mint_a && self.token_b == *mint_b)
            || (self.token_a == *mint_b && self.token_b == *mint_a)
    }

    /// Fee as a human percentage, for display only.
    pub fn fee_pct(&self) -> f64 {
        self.fee as f64 / FEE_DENOMINATOR as f64 * 100.0
    }
}

/// A pool normalized against a concrete request: canonical token ordering,
/// swap direction and the owner's two token accounts (derived, not created).
#[derive(Debug, Clone)]
pub struct Candidate {
    pub pool: PoolInfo,
    pub token_x: Token,
    pub token_y: Token,
    pub vault_x: Pubkey,
    pub vault_y: Pubkey,
    /// True iff the canonical first token is the request's from-token.
    pub x_to_y: bool,
    pub token_x_account: Pubkey,
    pub token_y_account: Pubkey,
}

impl Candidate {
    pub fn input_account(&self) -> Pubkey {
        if self.x_to_y {
            self.token_x_account
        } else {
            self.token_y_account
        }
    }

    pub fn output_account(&self) -> Pubkey {
        if self.x_to_y {
            self.token_y_account
        } else {
            self.token_x_account
        }
    }

    pub fn input_token(&self) -> &Token {
        if self.x_to_y {
            &self.token_x
        } else {
            &self.token_y
        }
    }

    pub fn output_token(&self) -> &Token {
        if self.x_to_y {
            &self.token_y
        } else {
            &self.token_x
        }
    }
}

/// A swap request as received from the caller. Never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SwapRequest {
    pub from: String,
    pub to: String,
    /// Denominated in the from-token's smallest unit.
    pub amount: u64,
    /// Percentage units, bounded to [0, 50].
    pub slippage_pct: f64,
    pub owner: Pubkey,
}

/// A quote request: same shape as a swap but no signing capability required.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuoteRequest {
    pub from: String,
    pub to: String,
    pub amount: u64,
    pub slippage_pct: f64,
    /// Optional: quotes do not need a funded owner.
    pub owner: Option<Pubkey>,
}

/// Outcome of a trade simulation against one pool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SimulationStatus {
    Success,
    InsufficientLiquidity,
    SlippageExceeded,
    InvalidTickRange,
    Rejected(String),
}

impl SimulationStatus {
    pub fn is_success(&self) -> bool {
        matches!(self, SimulationStatus::Success)
    }
}

impl fmt::Display for SimulationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimulationStatus::Success => write!(f, "success"),
            SimulationStatus::InsufficientLiquidity => write!(f, "insufficient liquidity"),
            SimulationStatus::SlippageExceeded => write!(f, "slippage exceeded"),
            SimulationStatus::InvalidTickRange => write!(f, "invalid tick range"),
            SimulationStatus::Rejected(reason) => write!(f, "rejected: {}", reason),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationOutcome {
    pub status: SimulationStatus,
    /// Predicted post-trade sqrt price, used as the execution bound.
    pub predicted_price: u128,
    pub estimated_output: u64,
}

/// One recorded failure in the routing trail. The full ordered trail is the
/// primary debugging signal when every candidate fails.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttemptFailure {
    NoPoolsFound {
        from: String,
        to: String,
    },
    Resolution {
        pool: Pubkey,
        reason: String,
    },
    Simulation {
        pool: Pubkey,
        fee: u64,
        reason: String,
    },
    Execution {
        pool: Pubkey,
        fee: u64,
        reason: String,
    },
}

impl fmt::Display for AttemptFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttemptFailure::NoPoolsFound { from, to } => {
                write!(f, "no pools found for {}/{}", from, to)
            }
            AttemptFailure::Resolution { pool, reason } => {
                write!(f, "pool {}: resolution failed: {}", pool, reason)
            }
            AttemptFailure::Simulation { pool, fee, reason } => {
                write!(f, "pool {} (fee {}): simulation failed: {}", pool, fee, reason)
            }
            AttemptFailure::Execution { pool, fee, reason } => {
                write!(f, "pool {} (fee {}): execution failed: {}", pool, fee, reason)
            }
        }
    }
}

/// A successful swap: the receipt handle plus the pool that filled it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SwapReceipt {
    pub signature: String,
    pub pool_address: Pubkey,
    pub pool_fee: u64,
    pub amount_in: u64,
    pub estimated_out: u64,
    /// Parsed from the confirmed transaction when available.
    pub actual_out: Option<u64>,
    pub timestamp: i64,
}

/// A successful simulation-only quote.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Quote {
    pub pool: PoolInfo,
    pub x_to_y: bool,
    pub amount_in: u64,
    pub estimated_out: u64,
    pub min_out: u64,
    pub predicted_price: u128,
}

/// Floor of `estimated` reduced by `slippage_pct` percent.
pub fn min_output(estimated: u64, slippage_pct: f64) -> u64 {
    (estimated as f64 * (1.0 - slippage_pct / 100.0)) as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_min_output() {
        assert_eq!(min_output(1_000, 0.0), 1_000);
        assert_eq!(min_output(1_000, 1.0), 990);
        assert_eq!(min_output(1_000, 50.0), 500);
    }

    #[test]
    fn test_trades_pair_either_order() {
        let a = Pubkey::new_unique();
        let b = Pubkey::new_unique();
        let pool = PoolInfo {
            address: Pubkey::new_unique(),
            token_a: a,
            token_b: b,
            vault_a: Pubkey::new_unique(),
            vault_b: Pubkey::new_unique(),
            fee: 2_500_000,
            tick_spacing: 64,
            liquidity: 1,
            sqrt_price: 1,
        };

        assert!(pool.trades_pair(&a, &b));
        assert!(pool.trades_pair(&b, &a));
        assert!(!pool.trades_pair(&a, &Pubkey::new_unique()));
    }

    #[test]
    fn test_candidate_account_orientation() {
        let x = Token {
            symbol: "X".to_string(),
            mint: Pubkey::new_unique(),
            decimals: 9,
            program: TokenProgram::Legacy,
        };
        let y = Token {
            symbol: "Y".to_string(),
            mint: Pubkey::new_unique(),
            decimals: 6,
            program: TokenProgram::Legacy,
        };
        let x_account = Pubkey::new_unique();
        let y_account = Pubkey::new_unique();
        let pool = PoolInfo {
            address: Pubkey::new_unique(),
            token_a: x.mint,
            token_b: y.mint,
            vault_a: Pubkey::new_unique(),
            vault_b: Pubkey::new_unique(),
            fee: 0,
            tick_spacing: 1,
            liquidity: 0,
            sqrt_price: 0,
        };

        let forward = Candidate {
            pool: pool.clone(),
            token_x: x.clone(),
            token_y: y.clone(),
            vault_x: pool.vault_a,
            vault_y: pool.vault_b,
            x_to_y: true,
            token_x_account: x_account,
            token_y_account: y_account,
        };
        assert_eq!(forward.input_account(), x_account);
        assert_eq!(forward.output_account(), y_account);
        assert_eq!(forward.output_token().symbol, "Y");

        let reverse = Candidate {
            x_to_y: false,
            ..forward
        };
        assert_eq!(reverse.input_account(), y_account);
        assert_eq!(reverse.output_account(), x_account);
        assert_eq!(reverse.output_token().symbol, "X");
    }
}
