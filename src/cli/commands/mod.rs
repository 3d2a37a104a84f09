pub mod balance;
pub mod pools;
pub mod quote;
pub mod status;
pub mod swap;
pub mod tokens;

use crate::core::{error::SwapResult, Config};
use crate::ledger::RpcLedgerClient;
use crate::registry::TokenRegistry;
use crate::routing::SwapOrchestrator;
use std::sync::Arc;

/// Shared command bootstrap: config, registry, ledger client, orchestrator.
pub(crate) struct CommandContext {
    pub config: Config,
    pub registry: Arc<TokenRegistry>,
    pub ledger: Arc<RpcLedgerClient>,
    pub orchestrator: SwapOrchestrator,
}

pub(crate) fn setup() -> SwapResult<CommandContext> {
    let config = Config::from_env()?;
    config.validate()?;

    let registry = Arc::new(TokenRegistry::from_config(&config)?);
    let ledger = Arc::new(RpcLedgerClient::new(&config));
    let orchestrator = SwapOrchestrator::new(ledger.clone(), registry.clone(), &config);

    Ok(CommandContext {
        config,
        registry,
        ledger,
        orchestrator,
    })
}
