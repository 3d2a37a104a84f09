use crate::cli::display::RouterDisplay;
use crate::core::error::SwapResult;
use colored::*;

pub async fn execute() -> SwapResult<()> {
    let ctx = super::setup()?;

    let pb = RouterDisplay::create_progress_bar("Checking ledger endpoint...");
    let result = ctx.ledger.health().await;
    pb.finish_and_clear();

    match result {
        Ok((version, slot)) => {
            println!("{}", "✅ Ledger endpoint healthy".green().bold());
            println!("  RPC: {}", ctx.config.rpc_url);
            println!("  Node version: {} | slot: {}", version, slot);
            Ok(())
        }
        Err(e) => {
            println!("{} {}", "❌ Ledger endpoint unreachable:".red().bold(), e);
            Err(e)
        }
    }
}
