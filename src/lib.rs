pub mod accounts;
pub mod cli;
pub mod core;
pub mod discovery;
pub mod ledger;
pub mod registry;
pub mod routing;
pub mod utils;

// Re-export commonly used types
pub use crate::accounts::AccountProvisioner;
pub use crate::core::{Config, PoolInfo, Quote, SwapError, SwapReceipt, SwapRequest, SwapResult};
pub use crate::discovery::{PairResolver, PoolDiscovery};
pub use crate::ledger::{LedgerClient, RpcLedgerClient};
pub use crate::registry::TokenRegistry;
pub use crate::routing::SwapOrchestrator;
