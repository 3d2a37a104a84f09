use solana_sdk::pubkey::Pubkey;
use std::str::FromStr;

// Exchange program ID (Mainnet)
pub const EXCHANGE_PROGRAM_ID: &str = "CAMMCzo5YL8w4VFF8KVHrK22GGUsp5VTaW7grrKgrWqK";

lazy_static::lazy_static! {
    pub static ref EXCHANGE_PROGRAM: Pubkey = Pubkey::from_str(EXCHANGE_PROGRAM_ID).unwrap();
}

// Common token mints
pub const WSOL_MINT: &str = "So11111111111111111111111111111111111111112";
pub const USDC_MINT: &str = "EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v";
pub const USDT_MINT: &str = "Es9vMFrzaCERmJfrF4H2FYD4KCoNkY11McCe8BenwNYB";
pub const BONK_MINT: &str = "DezXAZ8z7PnrnRJjz3wXBoRgixCa6xjnB7YaB1pPB263";
pub const PYUSD_MINT: &str = "2b1kV6DkPAnxd5ixfnxCpjxmKwqjjaYmCZfHsFu24GXo";

// Fee encoding: the exchange stores fees as an integer over this denominator.
// A fee of 2_500_000 is 0.25%.
pub const FEE_DENOMINATOR: u64 = 1_000_000_000;

// A pool record without an explicit tick spacing is treated as spacing 1.
pub const DEFAULT_TICK_SPACING: u16 = 1;

// Slippage bounds (percentage units)
pub const DEFAULT_SLIPPAGE_PCT: f64 = 0.5;
pub const MAX_SLIPPAGE_PCT: f64 = 50.0;

// Simulation step budget passed to the on-chain quoter
pub const DEFAULT_STEP_BUDGET: u32 = 64;

// RPC Configuration
pub const DEFAULT_RPC_TIMEOUT: u64 = 30;

// Transaction Configuration
pub const COMPUTE_UNIT_LIMIT: u32 = 400_000;
pub const PRIORITY_FEE_MICROLAMPORTS: u64 = 1_000;

// SOL kept back from wrapping so the owner can still pay transaction fees
pub const NATIVE_FEE_RESERVE_LAMPORTS: u64 = 10_000_000;
