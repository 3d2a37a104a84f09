use crate::cli::{display::RouterDisplay, SwapArgs};
use crate::core::{error::SwapResult, QuoteRequest, SwapError, SwapRequest};
use crate::utils::{load_keypair, to_base_units};
use colored::*;
use dialoguer::{theme::ColorfulTheme, Confirm};
use log::info;
use solana_sdk::signer::Signer;

pub async fn execute(args: SwapArgs) -> SwapResult<()> {
    println!("{}", "🚀 CLMM Swap Router".bold().cyan());

    let ctx = super::setup()?;

    let from = ctx.registry.resolve(&args.from)?.clone();
    let to = ctx.registry.resolve(&args.to)?.clone();
    let amount = to_base_units(args.amount, from.decimals);

    // Preview the route before asking for signing capability.
    let pb = RouterDisplay::create_progress_bar("Finding best pool...");
    let preview = ctx
        .orchestrator
        .quote(&QuoteRequest {
            from: args.from.clone(),
            to: args.to.clone(),
            amount,
            slippage_pct: args.slippage,
            owner: None,
        })
        .await;
    pb.finish_and_clear();

    match preview {
        Ok(quote) => RouterDisplay::display_quote(&quote, &from, &to),
        Err(SwapError::AllFailed(attempts)) => {
            RouterDisplay::display_failure_trail(&attempts);
            return Err(SwapError::AllFailed(attempts));
        }
        Err(e) => return Err(e),
    }

    let proceed = if args.yes {
        true
    } else {
        Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt("Do you want to proceed with this swap?")
            .default(false)
            .interact()
            .unwrap_or(false)
    };

    if !proceed {
        println!("{}", "❌ Swap cancelled".yellow());
        return Ok(());
    }

    let pb = RouterDisplay::create_progress_bar("Loading wallet...");
    let signer = match load_keypair() {
        Ok(signer) => signer,
        Err(e) => {
            pb.finish_and_clear();
            return Err(e);
        }
    };
    let owner = signer.pubkey();
    info!("Using wallet: {}", owner);

    let request = SwapRequest {
        from: args.from,
        to: args.to,
        amount,
        slippage_pct: args.slippage,
        owner,
    };

    pb.set_message("Routing swap...");
    let result = ctx.orchestrator.swap(&request, &signer).await;
    pb.finish_and_clear();

    match result {
        Ok(receipt) => {
            RouterDisplay::display_receipt(&receipt, &to);
            Ok(())
        }
        Err(SwapError::AllFailed(attempts)) => {
            RouterDisplay::display_failure_trail(&attempts);
            Err(SwapError::AllFailed(attempts))
        }
        Err(e) => {
            println!("{} {}", "❌ Swap failed:".red().bold(), e);
            Err(e)
        }
    }
}
