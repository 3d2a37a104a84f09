use crate::core::types::AttemptFailure;
use solana_client::client_error::ClientError;
use solana_sdk::pubkey::{ParsePubkeyError, Pubkey};
use thiserror::Error;

pub type SwapResult<T> = Result<T, SwapError>;

#[derive(Error, Debug)]
pub enum SwapError {
    #[error("Unknown token symbol: {0}")]
    UnknownToken(String),

    #[error("Invalid parameters: {0}")]
    InvalidParameters(String),

    #[error("No pools found for pair {0}/{1}")]
    NoPoolsFound(String, String),

    #[error("Pool {0} does not trade the requested pair")]
    InvalidPool(Pubkey),

    #[error("Simulation failed: {0}")]
    SimulationFailed(String),

    #[error("Execution failed: {0}")]
    ExecutionFailed(String),

    #[error("Account provisioning failed: {0}")]
    AccountProvisioning(String),

    #[error("All {} candidate pools failed", .0.len())]
    AllFailed(Vec<AttemptFailure>),

    #[error("Insufficient balance: {0}")]
    InsufficientBalance(String),

    #[error("Invalid pool state: {0}")]
    InvalidPoolState(String),

    #[error("RPC error: {0}")]
    RpcError(#[from] ClientError),

    #[error("Timeout: operation took longer than {0} seconds")]
    Timeout(u64),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Parse error: {0}")]
    ParseError(#[from] ParsePubkeyError),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Other error: {0}")]
    Other(String),
}

impl From<anyhow::Error> for SwapError {
    fn from(err: anyhow::Error) -> Self {
        SwapError::Other(err.to_string())
    }
}

impl From<serde_json::Error> for SwapError {
    fn from(err: serde_json::Error) -> Self {
        SwapError::SerializationError(err.to_string())
    }
}

impl From<std::io::Error> for SwapError {
    fn from(err: std::io::Error) -> Self {
        SwapError::Other(err.to_string())
    }
}
