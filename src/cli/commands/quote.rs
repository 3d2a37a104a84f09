use crate::cli::{display::RouterDisplay, QuoteArgs};
use crate::core::{error::SwapResult, QuoteRequest, SwapError};
use crate::utils::to_base_units;
use colored::*;

pub async fn execute(args: QuoteArgs) -> SwapResult<()> {
    let ctx = super::setup()?;

    let from = ctx.registry.resolve(&args.from)?.clone();
    let to = ctx.registry.resolve(&args.to)?.clone();

    let request = QuoteRequest {
        from: args.from,
        to: args.to,
        amount: to_base_units(args.amount, from.decimals),
        slippage_pct: args.slippage,
        owner: args.owner,
    };

    let pb = RouterDisplay::create_progress_bar("Simulating against candidate pools...");
    let result = ctx.orchestrator.quote(&request).await;
    pb.finish_and_clear();

    match result {
        Ok(quote) => {
            RouterDisplay::display_quote(&quote, &from, &to);
            Ok(())
        }
        Err(SwapError::AllFailed(attempts)) => {
            RouterDisplay::display_failure_trail(&attempts);
            Err(SwapError::AllFailed(attempts))
        }
        Err(e) => {
            println!("{} {}", "❌ Quote failed:".red().bold(), e);
            Err(e)
        }
    }
}
