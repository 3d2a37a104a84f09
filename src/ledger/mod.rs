pub mod layout;
pub mod rpc;

#[cfg(test)]
pub(crate) mod mock;

use crate::core::{
    error::SwapResult, Candidate, PoolInfo, SimulationOutcome, Token,
};
use solana_sdk::{pubkey::Pubkey, signature::Keypair, signature::Signature};

pub use rpc::RpcLedgerClient;

/// One simulation attempt against a specific pool.
#[derive(Debug, Clone)]
pub struct SimulationRequest {
    pub pool: Pubkey,
    pub x_to_y: bool,
    pub by_amount_in: bool,
    pub amount: u64,
    pub slippage_pct: f64,
    pub step_budget: u32,
    pub owner: Pubkey,
}

/// One execution attempt, bound to a fresh simulation of the same candidate.
pub struct ExecutionRequest<'a> {
    pub candidate: &'a Candidate,
    pub amount: u64,
    /// The simulation's predicted post-trade price; execution must not cross it.
    pub predicted_price: u128,
    pub min_amount_out: u64,
    pub slippage_pct: f64,
    pub signer: &'a Keypair,
}

/// Closed interface to the exchange ledger. Everything this system knows
/// about pools, accounts and balances flows through here; implementations
/// own their own transport and timeout behavior.
#[async_trait::async_trait]
pub trait LedgerClient: Send + Sync {
    /// Full pool enumeration; no query filter pushed down.
    async fn list_pools(&self) -> SwapResult<Vec<PoolInfo>>;

    /// Point lookup by derived address.
    async fn get_pool(&self, address: &Pubkey) -> SwapResult<PoolInfo>;

    /// Read-only trade prediction. A non-success status is a per-candidate
    /// outcome, not a transport error.
    async fn simulate(&self, request: &SimulationRequest) -> SwapResult<SimulationOutcome>;

    /// Submit the trade. Fails if on-chain state diverged from the simulation.
    async fn execute(&self, request: &ExecutionRequest<'_>) -> SwapResult<Signature>;

    async fn account_exists(&self, address: &Pubkey) -> SwapResult<bool>;

    /// Create the owner's token accounts for `tokens` in a single atomic
    /// submission. Returns the derived addresses in input order.
    async fn create_accounts(&self, signer: &Keypair, tokens: &[&Token]) -> SwapResult<Vec<Pubkey>>;

    async fn native_balance(&self, owner: &Pubkey) -> SwapResult<u64>;

    async fn token_balance(&self, account: &Pubkey) -> SwapResult<u64>;

    /// Actual output amount observed on the confirmed transaction, when the
    /// implementation can recover it. Best effort.
    async fn receipt_output(
        &self,
        _signature: &Signature,
        _output_account: &Pubkey,
    ) -> SwapResult<Option<u64>> {
        Ok(None)
    }
}
