use crate::accounts::AccountProvisioner;
use crate::core::{
    error::SwapResult, min_output, AttemptFailure, Config, PoolInfo, Quote, QuoteRequest,
    SwapError, SwapReceipt, SwapRequest, Token, MAX_SLIPPAGE_PCT,
};
use crate::discovery::{PairResolver, PoolDiscovery};
use crate::ledger::{ExecutionRequest, LedgerClient, SimulationRequest};
use crate::registry::TokenRegistry;
use chrono::Utc;
use log::{debug, info, warn};
use solana_sdk::{pubkey::Pubkey, signature::Keypair, signer::Signer};
use std::sync::Arc;

/// Tagged outcome of one candidate attempt.
enum CandidateOutcome {
    Filled(SwapReceipt),
    Failed(AttemptFailure),
}

/// The routing state machine: ranks candidate pools and walks them in order,
/// one simulation and at most one execution per candidate, stopping at the
/// first fill or exhausting the list.
///
/// Candidates are tried cheapest-fee-first: posted fee is the only proxy for
/// liquidity depth available without inspecting each pool, and first success
/// beats best-of-all for an interactive swap.
pub struct SwapOrchestrator {
    ledger: Arc<dyn LedgerClient>,
    registry: Arc<TokenRegistry>,
    provisioner: AccountProvisioner,
    discovery: PoolDiscovery,
    resolver: PairResolver,
    step_budget: u32,
}

impl SwapOrchestrator {
    pub fn new(
        ledger: Arc<dyn LedgerClient>,
        registry: Arc<TokenRegistry>,
        config: &Config,
    ) -> Self {
        Self {
            provisioner: AccountProvisioner::new(ledger.clone()),
            discovery: PoolDiscovery::new(ledger.clone()),
            resolver: PairResolver::new(config.exchange_program),
            ledger,
            registry,
            step_budget: crate::core::DEFAULT_STEP_BUDGET,
        }
    }

    /// Execute a swap with fallback across all candidate pools.
    pub async fn swap(&self, request: &SwapRequest, signer: &Keypair) -> SwapResult<SwapReceipt> {
        validate_request(&request.from, &request.to, request.amount, request.slippage_pct)?;
        if signer.pubkey() != request.owner {
            return Err(SwapError::InvalidParameters(
                "signer does not match request owner".to_string(),
            ));
        }

        let (from, to) = self.resolve_pair(&request.from, &request.to)?;

        // Both owner accounts are ensured once, shared across every
        // candidate. A provisioning failure is structural, not a pool
        // problem, so it is fatal rather than retried downstream.
        self.provisioner.ensure_pair(&from, &to, signer).await?;

        let pools = self
            .discovery
            .find_candidates(&from.mint, &to.mint)
            .await?;
        if pools.is_empty() {
            return Err(SwapError::AllFailed(vec![AttemptFailure::NoPoolsFound {
                from: from.symbol.clone(),
                to: to.symbol.clone(),
            }]));
        }

        info!(
            "Routing {} {} -> {} across {} candidate pool(s)",
            request.amount,
            from.symbol,
            to.symbol,
            pools.len()
        );

        let mut attempts = Vec::with_capacity(pools.len());
        for pool in &pools {
            match self.try_candidate(pool, &from, &to, request, signer).await {
                CandidateOutcome::Filled(receipt) => {
                    info!(
                        "Swap filled by pool {} (fee {})",
                        receipt.pool_address, receipt.pool_fee
                    );
                    return Ok(receipt);
                }
                CandidateOutcome::Failed(failure) => {
                    warn!("Candidate failed, advancing: {}", failure);
                    attempts.push(failure);
                }
            }
        }

        Err(SwapError::AllFailed(attempts))
    }

    /// Simulation-only quote. No signing capability, no account creation.
    pub async fn quote(&self, request: &QuoteRequest) -> SwapResult<Quote> {
        validate_request(&request.from, &request.to, request.amount, request.slippage_pct)?;
        let (from, to) = self.resolve_pair(&request.from, &request.to)?;
        let owner = request.owner.unwrap_or_default();

        let pools = self
            .discovery
            .find_candidates(&from.mint, &to.mint)
            .await?;
        if pools.is_empty() {
            return Err(SwapError::AllFailed(vec![AttemptFailure::NoPoolsFound {
                from: from.symbol.clone(),
                to: to.symbol.clone(),
            }]));
        }

        let mut attempts = Vec::with_capacity(pools.len());
        for pool in &pools {
            let candidate = match self.resolver.resolve(pool, &from, &to, &owner) {
                Ok(candidate) => candidate,
                Err(e) => {
                    attempts.push(AttemptFailure::Resolution {
                        pool: pool.address,
                        reason: e.to_string(),
                    });
                    continue;
                }
            };

            let simulation = match self
                .ledger
                .simulate(&self.simulation_request(&candidate.pool.address, candidate.x_to_y, request.amount, request.slippage_pct, owner))
                .await
            {
                Ok(simulation) => simulation,
                Err(e) => {
                    attempts.push(AttemptFailure::Simulation {
                        pool: candidate.pool.address,
                        fee: pool.fee,
                        reason: e.to_string(),
                    });
                    continue;
                }
            };

            if !simulation.status.is_success() {
                attempts.push(AttemptFailure::Simulation {
                    pool: candidate.pool.address,
                    fee: pool.fee,
                    reason: simulation.status.to_string(),
                });
                continue;
            }

            return Ok(Quote {
                pool: candidate.pool.clone(),
                x_to_y: candidate.x_to_y,
                amount_in: request.amount,
                estimated_out: simulation.estimated_output,
                min_out: min_output(simulation.estimated_output, request.slippage_pct),
                predicted_price: simulation.predicted_price,
            });
        }

        Err(SwapError::AllFailed(attempts))
    }

    /// Candidate pools for a pair, cheapest first. Emptiness is an error at
    /// this surface.
    pub async fn pools_for_pair(&self, from: &str, to: &str) -> SwapResult<Vec<PoolInfo>> {
        let (from, to) = self.resolve_pair(from, to)?;
        let pools = self
            .discovery
            .find_candidates(&from.mint, &to.mint)
            .await?;
        if pools.is_empty() {
            return Err(SwapError::NoPoolsFound(from.symbol, to.symbol));
        }
        Ok(pools)
    }

    async fn try_candidate(
        &self,
        pool: &PoolInfo,
        from: &Token,
        to: &Token,
        request: &SwapRequest,
        signer: &Keypair,
    ) -> CandidateOutcome {
        let candidate = match self.resolver.resolve(pool, from, to, &request.owner) {
            Ok(candidate) => candidate,
            Err(e) => {
                return CandidateOutcome::Failed(AttemptFailure::Resolution {
                    pool: pool.address,
                    reason: e.to_string(),
                })
            }
        };

        debug!(
            "Simulating candidate {} (fee {}, x_to_y: {})",
            candidate.pool.address, pool.fee, candidate.x_to_y
        );

        // Exactly one simulation per candidate per request; no parameter
        // retries.
        let simulation = match self
            .ledger
            .simulate(&self.simulation_request(&candidate.pool.address, candidate.x_to_y, request.amount, request.slippage_pct, request.owner))
            .await
        {
            Ok(simulation) => simulation,
            Err(e) => {
                return CandidateOutcome::Failed(AttemptFailure::Simulation {
                    pool: candidate.pool.address,
                    fee: pool.fee,
                    reason: e.to_string(),
                })
            }
        };

        if !simulation.status.is_success() {
            return CandidateOutcome::Failed(AttemptFailure::Simulation {
                pool: candidate.pool.address,
                fee: pool.fee,
                reason: simulation.status.to_string(),
            });
        }

        // Execution is bound to this candidate's fresh simulation; a
        // simulation from an earlier candidate is never reused here.
        let execution = ExecutionRequest {
            candidate: &candidate,
            amount: request.amount,
            predicted_price: simulation.predicted_price,
            min_amount_out: min_output(simulation.estimated_output, request.slippage_pct),
            slippage_pct: request.slippage_pct,
            signer,
        };

        match self.ledger.execute(&execution).await {
            Ok(signature) => {
                let actual_out = self
                    .ledger
                    .receipt_output(&signature, &candidate.output_account())
                    .await
                    .unwrap_or(None);
                CandidateOutcome::Filled(SwapReceipt {
                    signature: signature.to_string(),
                    pool_address: candidate.pool.address,
                    pool_fee: pool.fee,
                    amount_in: request.amount,
                    estimated_out: simulation.estimated_output,
                    actual_out,
                    timestamp: Utc::now().timestamp(),
                })
            }
            Err(e) => CandidateOutcome::Failed(AttemptFailure::Execution {
                pool: candidate.pool.address,
                fee: pool.fee,
                reason: e.to_string(),
            }),
        }
    }

    fn simulation_request(
        &self,
        pool: &Pubkey,
        x_to_y: bool,
        amount: u64,
        slippage_pct: f64,
        owner: Pubkey,
    ) -> SimulationRequest {
        SimulationRequest {
            pool: *pool,
            x_to_y,
            by_amount_in: true,
            amount,
            slippage_pct,
            step_budget: self.step_budget,
            owner,
        }
    }

    fn resolve_pair(&self, from: &str, to: &str) -> SwapResult<(Token, Token)> {
        let from = self.registry.resolve(from)?.clone();
        let to = self.registry.resolve(to)?.clone();
        if from.mint == to.mint {
            return Err(SwapError::InvalidParameters(format!(
                "{} and {} are the same token identity",
                from.symbol, to.symbol
            )));
        }
        Ok((from, to))
    }
}

/// Local parameter validation; rejected requests never reach the network.
fn validate_request(from: &str, to: &str, amount: u64, slippage_pct: f64) -> SwapResult<()> {
    if amount == 0 {
        return Err(SwapError::InvalidParameters(
            "amount must be positive".to_string(),
        ));
    }
    if from.eq_ignore_ascii_case(to) {
        return Err(SwapError::InvalidParameters(
            "from and to tokens must differ".to_string(),
        ));
    }
    if !slippage_pct.is_finite() || slippage_pct < 0.0 || slippage_pct > MAX_SLIPPAGE_PCT {
        return Err(SwapError::InvalidParameters(format!(
            "slippage must be within [0, {}] percent",
            MAX_SLIPPAGE_PCT
        )));
    }
    Ok(())
}
