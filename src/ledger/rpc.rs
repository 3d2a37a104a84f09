use crate::accounts::native;
use crate::core::{
    error::SwapResult, Config, PoolInfo, SimulationOutcome, SimulationStatus, SwapError,
    NATIVE_FEE_RESERVE_LAMPORTS,
};
use crate::ledger::layout::{build_swap_instruction, PoolAccountLayout, SwapInstructionArgs};
use crate::ledger::{ExecutionRequest, LedgerClient, SimulationRequest};
use log::{debug, info, warn};
use solana_account_decoder::UiAccountEncoding;
use solana_client::{
    nonblocking::rpc_client::RpcClient,
    rpc_config::{
        RpcAccountInfoConfig, RpcProgramAccountsConfig, RpcSimulateTransactionConfig,
        RpcTransactionConfig,
    },
    rpc_filter::RpcFilterType,
};
use solana_sdk::{
    commitment_config::CommitmentConfig,
    compute_budget::ComputeBudgetInstruction,
    instruction::Instruction,
    message::{v0, Message, VersionedMessage},
    pubkey::Pubkey,
    signature::{Keypair, Signature},
    signer::Signer,
    transaction::{Transaction, VersionedTransaction},
};
use solana_transaction_status::{option_serializer::OptionSerializer, UiTransactionEncoding};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

/// Production ledger client over a Solana RPC endpoint.
pub struct RpcLedgerClient {
    rpc_client: Arc<RpcClient>,
    program_id: Pubkey,
    timeout: Duration,
    compute_unit_limit: u32,
    priority_fee_microlamports: u64,
}

impl RpcLedgerClient {
    pub fn new(config: &Config) -> Self {
        let rpc_client = Arc::new(RpcClient::new_with_commitment(
            config.rpc_url.clone(),
            CommitmentConfig::confirmed(),
        ));

        Self {
            rpc_client,
            program_id: config.exchange_program,
            timeout: Duration::from_secs(config.timeout_secs),
            compute_unit_limit: config.compute_unit_limit,
            priority_fee_microlamports: config.priority_fee_microlamports,
        }
    }

    /// Every RPC call runs under the configured deadline; indefinite blocking
    /// is never inherited from the transport.
    async fn bounded<T, F>(&self, fut: F) -> SwapResult<T>
    where
        F: Future<Output = Result<T, solana_client::client_error::ClientError>>,
    {
        match tokio::time::timeout(self.timeout, fut).await {
            Ok(result) => result.map_err(SwapError::RpcError),
            Err(_) => Err(SwapError::Timeout(self.timeout.as_secs())),
        }
    }

    /// RPC endpoint health for the status command.
    pub async fn health(&self) -> SwapResult<(String, u64)> {
        let version = self
            .bounded(self.rpc_client.get_version())
            .await?
            .solana_core;
        let slot = self.bounded(self.rpc_client.get_slot()).await?;
        Ok((version, slot))
    }

    fn compute_budget_instructions(&self) -> Vec<Instruction> {
        vec![
            ComputeBudgetInstruction::set_compute_unit_limit(self.compute_unit_limit),
            ComputeBudgetInstruction::set_compute_unit_price(self.priority_fee_microlamports),
        ]
    }

    async fn build_versioned_transaction(
        &self,
        instructions: Vec<Instruction>,
        payer: &Pubkey,
        signers: &[&Keypair],
    ) -> SwapResult<VersionedTransaction> {
        let recent_blockhash = self
            .bounded(self.rpc_client.get_latest_blockhash())
            .await?;

        let message = v0::Message::try_compile(payer, &instructions, &[], recent_blockhash)
            .map_err(|e| SwapError::Other(format!("Failed to compile v0 message: {}", e)))?;

        VersionedTransaction::try_new(VersionedMessage::V0(message), signers)
            .map_err(|e| SwapError::Other(format!("Failed to sign transaction: {}", e)))
    }

    /// Wrap lamports into the owner's native token account when the current
    /// balance cannot cover the input amount.
    async fn prepare_native_input(
        &self,
        owner: &Pubkey,
        amount_needed: u64,
    ) -> SwapResult<Vec<Instruction>> {
        let native_account = native::native_token_account(owner);
        let (exists, current_balance) = match self.account_exists(&native_account).await? {
            true => (true, self.token_balance(&native_account).await.unwrap_or(0)),
            false => (false, 0),
        };

        if current_balance >= amount_needed {
            debug!(
                "Native account balance {} covers input {}",
                current_balance, amount_needed
            );
            return Ok(vec![]);
        }

        let shortfall = amount_needed - current_balance;
        let lamports = self.native_balance(owner).await?;
        let available = lamports.saturating_sub(NATIVE_FEE_RESERVE_LAMPORTS);
        if available < shortfall {
            return Err(SwapError::InsufficientBalance(format!(
                "need {} more lamports to wrap, only {} available after fee reserve",
                shortfall, available
            )));
        }

        info!("Wrapping {} lamports into {}", shortfall, native_account);
        Ok(native::wrap_instructions(owner, shortfall, !exists))
    }

    /// Classify a failed on-chain simulation from its program logs.
    fn classify_simulation_failure(err: String, logs: &[String]) -> SimulationStatus {
        for log in logs {
            let lowered = log.to_lowercase();
            if lowered.contains("insufficient liquidity") {
                return SimulationStatus::InsufficientLiquidity;
            }
            if lowered.contains("slippage") || lowered.contains("price limit") {
                return SimulationStatus::SlippageExceeded;
            }
            if lowered.contains("tick") {
                return SimulationStatus::InvalidTickRange;
            }
        }
        SimulationStatus::Rejected(err)
    }

    /// Extract the quoter's predicted price and output amount from program
    /// logs. Log lines carry `price_after:<u128>` and `amount_out:<u64>`.
    fn parse_simulation_logs(logs: &[String]) -> Option<(u128, u64)> {
        let mut price: Option<u128> = None;
        let mut amount: Option<u64> = None;

        for log in logs {
            if price.is_none() {
                price = parse_log_value(log, "price_after:");
            }
            if amount.is_none() {
                amount = parse_log_value(log, "amount_out:");
            }
        }

        match (price, amount) {
            (Some(p), Some(a)) => Some((p, a)),
            _ => None,
        }
    }
}

/// Find `pattern` in a log line and parse the numeric run that follows it.
fn parse_log_value<T: std::str::FromStr>(log: &str, pattern: &str) -> Option<T> {
    let start = log.find(pattern)? + pattern.len();
    let remaining = &log[start..];
    let end = remaining
        .find(|c: char| !c.is_numeric())
        .unwrap_or(remaining.len());
    remaining[..end].trim().parse::<T>().ok()
}

#[async_trait::async_trait]
impl LedgerClient for RpcLedgerClient {
    async fn list_pools(&self) -> SwapResult<Vec<PoolInfo>> {
        debug!("Enumerating pools for program {}", self.program_id);

        let config = RpcProgramAccountsConfig {
            filters: Some(vec![RpcFilterType::DataSize(PoolAccountLayout::LEN as u64)]),
            account_config: RpcAccountInfoConfig {
                encoding: Some(UiAccountEncoding::Base64),
                commitment: Some(CommitmentConfig::confirmed()),
                ..Default::default()
            },
            ..Default::default()
        };

        let accounts = self
            .bounded(
                self.rpc_client
                    .get_program_accounts_with_config(&self.program_id, config),
            )
            .await?;

        let mut pools = Vec::with_capacity(accounts.len());
        for (address, account) in accounts {
            match PoolAccountLayout::from_bytes(&account.data) {
                Ok(layout) => pools.push(layout.into_pool_info(address)),
                Err(e) => debug!("Skipping unparseable pool {}: {}", address, e),
            }
        }

        info!("Enumerated {} pools", pools.len());
        Ok(pools)
    }

    async fn get_pool(&self, address: &Pubkey) -> SwapResult<PoolInfo> {
        let account = self.bounded(self.rpc_client.get_account(address)).await?;
        let layout = PoolAccountLayout::from_bytes(&account.data)
            .map_err(SwapError::InvalidPoolState)?;
        Ok(layout.into_pool_info(*address))
    }

    async fn simulate(&self, request: &SimulationRequest) -> SwapResult<SimulationOutcome> {
        debug!(
            "Simulating swap on pool {} (x_to_y: {}, amount: {}, steps: {})",
            request.pool, request.x_to_y, request.amount, request.step_budget
        );

        let pool = self.get_pool(&request.pool).await?;

        // Canonical orientation of the record for the instruction accounts.
        // The dry run moves no funds, so the legacy token program suffices
        // for the owner-side account derivation.
        let ((mint_x, vault_x), (mint_y, vault_y)) = if pool.token_a.to_bytes() <= pool.token_b.to_bytes()
        {
            ((pool.token_a, pool.vault_a), (pool.token_b, pool.vault_b))
        } else {
            ((pool.token_b, pool.vault_b), (pool.token_a, pool.vault_a))
        };
        let token_x_account = spl_associated_token_account::get_associated_token_address(
            &request.owner,
            &mint_x,
        );
        let token_y_account = spl_associated_token_account::get_associated_token_address(
            &request.owner,
            &mint_y,
        );

        let args = SwapInstructionArgs {
            amount: request.amount,
            other_amount_threshold: 0,
            sqrt_price_limit: 0,
            by_amount_in: request.by_amount_in,
            x_to_y: request.x_to_y,
        };
        let ix = crate::ledger::layout::build_swap_instruction_raw(
            &self.program_id,
            &request.pool,
            &request.owner,
            &token_x_account,
            &token_y_account,
            &vault_x,
            &vault_y,
            &spl_token::ID,
            &spl_token::ID,
            &args,
        );

        let message = Message::new(&[ix], Some(&request.owner));
        let transaction = Transaction::new_unsigned(message);

        let sim_config = RpcSimulateTransactionConfig {
            sig_verify: false,
            replace_recent_blockhash: true,
            commitment: Some(CommitmentConfig::confirmed()),
            ..Default::default()
        };

        let result = self
            .bounded(
                self.rpc_client
                    .simulate_transaction_with_config(&transaction, sim_config),
            )
            .await?;

        let logs = result.value.logs.unwrap_or_default();
        if let Some(err) = result.value.err {
            let status = Self::classify_simulation_failure(format!("{:?}", err), &logs);
            debug!("Simulation on {} not viable: {}", request.pool, status);
            return Ok(SimulationOutcome {
                status,
                predicted_price: 0,
                estimated_output: 0,
            });
        }

        match Self::parse_simulation_logs(&logs) {
            Some((predicted_price, estimated_output)) => Ok(SimulationOutcome {
                status: SimulationStatus::Success,
                predicted_price,
                estimated_output,
            }),
            None => Ok(SimulationOutcome {
                status: SimulationStatus::Rejected(
                    "simulation succeeded but quoter logs are missing".to_string(),
                ),
                predicted_price: 0,
                estimated_output: 0,
            }),
        }
    }

    async fn execute(&self, request: &ExecutionRequest<'_>) -> SwapResult<Signature> {
        let candidate = request.candidate;
        let owner = request.signer.pubkey();
        info!(
            "Executing swap on pool {} (fee {}, x_to_y: {})",
            candidate.pool.address, candidate.pool.fee, candidate.x_to_y
        );

        let mut instructions = self.compute_budget_instructions();

        if candidate.input_token().is_native() {
            instructions.extend(self.prepare_native_input(&owner, request.amount).await?);
        }

        let args = SwapInstructionArgs {
            amount: request.amount,
            other_amount_threshold: request.min_amount_out,
            sqrt_price_limit: request.predicted_price,
            by_amount_in: true,
            x_to_y: candidate.x_to_y,
        };
        instructions.push(build_swap_instruction(
            &self.program_id,
            candidate,
            &owner,
            &args,
        ));

        if candidate.output_token().is_native() {
            instructions.push(native::unwrap_instruction(&owner)?);
        }

        let transaction = self
            .build_versioned_transaction(instructions, &owner, &[request.signer])
            .await?;

        // Guard send with a dry run; divergence from the fresh simulation
        // surfaces here instead of as an on-chain failure.
        let dry_run = self
            .bounded(self.rpc_client.simulate_transaction(&transaction))
            .await?;
        if let Some(err) = dry_run.value.err {
            return Err(SwapError::ExecutionFailed(format!(
                "state diverged from simulation: {:?}",
                err
            )));
        }

        let signature = self
            .bounded(self.rpc_client.send_and_confirm_transaction(&transaction))
            .await
            .map_err(|e| match e {
                SwapError::Timeout(secs) => SwapError::Timeout(secs),
                other => SwapError::ExecutionFailed(other.to_string()),
            })?;

        info!("Swap confirmed: {}", signature);
        Ok(signature)
    }

    async fn account_exists(&self, address: &Pubkey) -> SwapResult<bool> {
        let response = self
            .bounded(
                self.rpc_client
                    .get_account_with_commitment(address, CommitmentConfig::confirmed()),
            )
            .await?;
        Ok(response.value.is_some())
    }

    async fn create_accounts(
        &self,
        signer: &Keypair,
        tokens: &[&crate::core::Token],
    ) -> SwapResult<Vec<Pubkey>> {
        let owner = signer.pubkey();
        let mut instructions = Vec::with_capacity(tokens.len());
        let mut addresses = Vec::with_capacity(tokens.len());

        for token in tokens {
            addresses.push(
                spl_associated_token_account::get_associated_token_address_with_program_id(
                    &owner,
                    &token.mint,
                    &token.program.id(),
                ),
            );
            instructions.push(
                spl_associated_token_account::instruction::create_associated_token_account_idempotent(
                    &owner,
                    &owner,
                    &token.mint,
                    &token.program.id(),
                ),
            );
        }

        if instructions.is_empty() {
            return Ok(addresses);
        }

        info!("Creating {} token accounts for {}", instructions.len(), owner);
        let recent_blockhash = self
            .bounded(self.rpc_client.get_latest_blockhash())
            .await?;
        let transaction = Transaction::new_signed_with_payer(
            &instructions,
            Some(&owner),
            &[signer],
            recent_blockhash,
        );

        self.bounded(self.rpc_client.send_and_confirm_transaction(&transaction))
            .await?;

        Ok(addresses)
    }

    async fn native_balance(&self, owner: &Pubkey) -> SwapResult<u64> {
        self.bounded(self.rpc_client.get_balance(owner)).await
    }

    async fn token_balance(&self, account: &Pubkey) -> SwapResult<u64> {
        let balance = self
            .bounded(self.rpc_client.get_token_account_balance(account))
            .await?;
        balance
            .amount
            .parse::<u64>()
            .map_err(|e| SwapError::SerializationError(format!("bad token amount: {}", e)))
    }

    async fn receipt_output(
        &self,
        signature: &Signature,
        _output_account: &Pubkey,
    ) -> SwapResult<Option<u64>> {
        // Let the cluster finish indexing the transaction first.
        tokio::time::sleep(Duration::from_millis(2000)).await;

        let config = RpcTransactionConfig {
            encoding: Some(UiTransactionEncoding::Json),
            commitment: Some(CommitmentConfig::confirmed()),
            max_supported_transaction_version: Some(0),
        };

        let transaction = match self
            .bounded(self.rpc_client.get_transaction_with_config(signature, config))
            .await
        {
            Ok(tx) => tx,
            Err(e) => {
                warn!("Could not fetch transaction {}: {}", signature, e);
                return Ok(None);
            }
        };

        let meta = match transaction.transaction.meta {
            Some(meta) => meta,
            None => return Ok(None),
        };

        let (pre_balances, post_balances) =
            match (&meta.pre_token_balances, &meta.post_token_balances) {
                (OptionSerializer::Some(pre), OptionSerializer::Some(post)) => (pre, post),
                _ => {
                    debug!("Token balance data not available for {}", signature);
                    return Ok(None);
                }
            };

        for post in post_balances {
            let pre_amount = pre_balances
                .iter()
                .find(|pre| pre.account_index == post.account_index)
                .map(|pre| pre.ui_token_amount.amount.parse::<u64>().unwrap_or(0))
                .unwrap_or(0);
            let post_amount = post.ui_token_amount.amount.parse::<u64>().unwrap_or(0);

            if post_amount > pre_amount {
                let received = post_amount - pre_amount;
                debug!(
                    "Balance increase of {} on account index {}",
                    received, post.account_index
                );
                return Ok(Some(received));
            }
        }

        Ok(None)
    }
}
