use clap::Parser;
use clmm_router::cli::{Cli, Commands};
use clmm_router::core::SwapError;

#[tokio::main]
async fn main() -> Result<(), SwapError> {
    // Initialize logger
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    dotenv::dotenv().ok();

    // Parse CLI arguments
    let cli = Cli::parse();

    // Execute command
    match cli.command {
        Commands::Tokens => {
            clmm_router::cli::commands::tokens::execute().await?;
        }
        Commands::Pools(args) => {
            clmm_router::cli::commands::pools::execute(args).await?;
        }
        Commands::Quote(args) => {
            clmm_router::cli::commands::quote::execute(args).await?;
        }
        Commands::Swap(args) => {
            clmm_router::cli::commands::swap::execute(args).await?;
        }
        Commands::Balance(args) => {
            clmm_router::cli::commands::balance::execute(args).await?;
        }
        Commands::Status => {
            clmm_router::cli::commands::status::execute().await?;
        }
    }

    Ok(())
}
