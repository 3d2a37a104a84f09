pub mod config;
pub mod constants;
pub mod error;
pub mod types;

pub use config::Config;
pub use constants::*;
pub use error::{SwapError, SwapResult};
pub use types::*;
