use crate::cli::{display::RouterDisplay, PoolsArgs};
use crate::core::{error::SwapResult, SwapError};
use colored::*;

pub async fn execute(args: PoolsArgs) -> SwapResult<()> {
    let ctx = super::setup()?;

    let pb = RouterDisplay::create_progress_bar("Discovering pools...");
    let result = ctx.orchestrator.pools_for_pair(&args.from, &args.to).await;
    pb.finish_and_clear();

    match result {
        Ok(pools) => {
            RouterDisplay::display_pools(&pools, args.detailed);
            Ok(())
        }
        Err(SwapError::NoPoolsFound(from, to)) => {
            println!(
                "{}",
                format!("❌ No pools found for {}/{}", from, to).yellow()
            );
            Ok(())
        }
        Err(e) => Err(e),
    }
}
