use clap::{Parser, Subcommand};
use solana_sdk::pubkey::Pubkey;

pub mod commands;
pub mod display;

#[derive(Parser)]
#[command(name = "clmm-router")]
#[command(about = "Pool discovery and fallback routing for concentrated-liquidity swaps", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List supported tokens
    Tokens,

    /// List candidate pools for a token pair, cheapest fee first
    Pools(PoolsArgs),

    /// Get a swap quote through the best viable pool (no execution)
    Quote(QuoteArgs),

    /// Execute a swap with fallback across candidate pools
    Swap(SwapArgs),

    /// Show owner balances for registered tokens
    Balance(BalanceArgs),

    /// Check ledger endpoint health
    Status,
}

#[derive(Parser)]
pub struct PoolsArgs {
    /// Input token symbol
    pub from: String,

    /// Output token symbol
    pub to: String,

    /// Show detailed pool information
    #[arg(short, long)]
    pub detailed: bool,
}

#[derive(Parser)]
pub struct QuoteArgs {
    /// Input token symbol
    pub from: String,

    /// Output token symbol
    pub to: String,

    /// Amount to swap (in token units, considering decimals)
    pub amount: f64,

    /// Slippage tolerance in percent (default: 0.5)
    #[arg(short, long, default_value = "0.5")]
    pub slippage: f64,

    /// Owner address to quote against (optional)
    #[arg(long, value_parser = parse_pubkey)]
    pub owner: Option<Pubkey>,
}

#[derive(Parser)]
pub struct SwapArgs {
    /// Input token symbol
    pub from: String,

    /// Output token symbol
    pub to: String,

    /// Amount to swap (in token units, considering decimals)
    pub amount: f64,

    /// Slippage tolerance in percent (default: 0.5)
    #[arg(short, long, default_value = "0.5")]
    pub slippage: f64,

    /// Skip confirmation prompt
    #[arg(long)]
    pub yes: bool,
}

#[derive(Parser)]
pub struct BalanceArgs {
    /// Owner address (defaults to the configured wallet)
    #[arg(long, value_parser = parse_pubkey)]
    pub owner: Option<Pubkey>,
}

fn parse_pubkey(s: &str) -> Result<Pubkey, String> {
    s.parse::<Pubkey>()
        .map_err(|e| format!("Invalid pubkey: {}", e))
}
