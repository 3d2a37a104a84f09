//! Scripted in-memory ledger for exercising the routing machinery without a
//! cluster. Records every call so tests can assert ordering and counts.

use crate::core::{
    error::SwapResult, PoolInfo, SimulationOutcome, SimulationStatus, SwapError, Token,
};
use crate::ledger::{ExecutionRequest, LedgerClient, SimulationRequest};
use solana_sdk::{pubkey::Pubkey, signature::Keypair, signature::Signature, signer::Signer};
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

#[derive(Default)]
pub struct MockLedger {
    pools: Vec<PoolInfo>,
    simulations: HashMap<Pubkey, SimulationOutcome>,
    execution_failures: HashMap<Pubkey, String>,
    existing_accounts: Mutex<HashSet<Pubkey>>,
    pub simulate_calls: Mutex<Vec<Pubkey>>,
    pub execute_calls: Mutex<Vec<Pubkey>>,
    pub create_batches: Mutex<Vec<Vec<Pubkey>>>,
    pub list_calls: Mutex<usize>,
}

impl MockLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_pools(mut self, pools: Vec<PoolInfo>) -> Self {
        self.pools = pools;
        self
    }

    /// Script the outcome of simulating against `pool`. Unscripted pools
    /// simulate successfully at par.
    pub fn with_simulation(mut self, pool: Pubkey, outcome: SimulationOutcome) -> Self {
        self.simulations.insert(pool, outcome);
        self
    }

    pub fn with_execution_failure(mut self, pool: Pubkey, reason: &str) -> Self {
        self.execution_failures.insert(pool, reason.to_string());
        self
    }

    pub fn with_existing_account(self, address: Pubkey) -> Self {
        self.existing_accounts.lock().unwrap().insert(address);
        self
    }

    pub fn simulate_count(&self) -> usize {
        self.simulate_calls.lock().unwrap().len()
    }

    pub fn execute_count(&self) -> usize {
        self.execute_calls.lock().unwrap().len()
    }

    pub fn create_count(&self) -> usize {
        self.create_batches.lock().unwrap().len()
    }
}

pub fn success_outcome(predicted_price: u128, estimated_output: u64) -> SimulationOutcome {
    SimulationOutcome {
        status: SimulationStatus::Success,
        predicted_price,
        estimated_output,
    }
}

pub fn failed_outcome(status: SimulationStatus) -> SimulationOutcome {
    SimulationOutcome {
        status,
        predicted_price: 0,
        estimated_output: 0,
    }
}

#[async_trait::async_trait]
impl LedgerClient for MockLedger {
    async fn list_pools(&self) -> SwapResult<Vec<PoolInfo>> {
        *self.list_calls.lock().unwrap() += 1;
        Ok(self.pools.clone())
    }

    async fn get_pool(&self, address: &Pubkey) -> SwapResult<PoolInfo> {
        self.pools
            .iter()
            .find(|p| p.address == *address)
            .cloned()
            .ok_or_else(|| SwapError::Other(format!("pool {} not found", address)))
    }

    async fn simulate(&self, request: &SimulationRequest) -> SwapResult<SimulationOutcome> {
        self.simulate_calls.lock().unwrap().push(request.pool);
        Ok(self
            .simulations
            .get(&request.pool)
            .cloned()
            .unwrap_or_else(|| success_outcome(1, request.amount)))
    }

    async fn execute(&self, request: &ExecutionRequest<'_>) -> SwapResult<Signature> {
        let pool = request.candidate.pool.address;
        self.execute_calls.lock().unwrap().push(pool);
        match self.execution_failures.get(&pool) {
            Some(reason) => Err(SwapError::ExecutionFailed(reason.clone())),
            None => Ok(Signature::new_unique()),
        }
    }

    async fn account_exists(&self, address: &Pubkey) -> SwapResult<bool> {
        Ok(self.existing_accounts.lock().unwrap().contains(address))
    }

    async fn create_accounts(&self, signer: &Keypair, tokens: &[&Token]) -> SwapResult<Vec<Pubkey>> {
        let owner = signer.pubkey();
        let addresses: Vec<Pubkey> = tokens
            .iter()
            .map(|token| {
                spl_associated_token_account::get_associated_token_address_with_program_id(
                    &owner,
                    &token.mint,
                    &token.program.id(),
                )
            })
            .collect();

        self.create_batches
            .lock()
            .unwrap()
            .push(tokens.iter().map(|t| t.mint).collect());

        let mut existing = self.existing_accounts.lock().unwrap();
        for address in &addresses {
            existing.insert(*address);
        }

        Ok(addresses)
    }

    async fn native_balance(&self, _owner: &Pubkey) -> SwapResult<u64> {
        Ok(10_000_000_000)
    }

    async fn token_balance(&self, _account: &Pubkey) -> SwapResult<u64> {
        Ok(0)
    }
}
