use crate::accounts::AccountProvisioner;
use crate::cli::{display::RouterDisplay, BalanceArgs};
use crate::core::error::SwapResult;
use crate::ledger::LedgerClient;
use crate::utils::{from_base_units, load_keypair};
use colored::*;
use console::style;
use solana_sdk::signer::Signer;
use std::collections::HashSet;

pub async fn execute(args: BalanceArgs) -> SwapResult<()> {
    let ctx = super::setup()?;

    let owner = match args.owner {
        Some(owner) => owner,
        None => load_keypair()?.pubkey(),
    };

    let pb = RouterDisplay::create_progress_bar("Fetching balances...");

    let lamports = ctx.ledger.native_balance(&owner).await?;

    // One line per mint; aliased symbols share an account.
    let mut seen_mints = HashSet::new();
    let mut lines = Vec::new();
    for token in ctx.registry.tokens() {
        if !seen_mints.insert(token.mint) {
            continue;
        }
        let account = AccountProvisioner::derive_address(token, &owner);
        if !ctx.ledger.account_exists(&account).await? {
            continue;
        }
        let balance = ctx.ledger.token_balance(&account).await?;
        lines.push(format!(
            "  {} {}",
            from_base_units(balance, token.decimals),
            token.symbol.bold()
        ));
    }

    pb.finish_and_clear();

    println!("\n{}", style(format!("Balances for {}", owner)).bold().underlined());
    println!("  {} {}", from_base_units(lamports, 9), "SOL (native)".bold());
    for line in lines {
        println!("{}", line);
    }
    println!();

    Ok(())
}
