use crate::core::{AttemptFailure, PoolInfo, Quote, SwapReceipt, Token};
use crate::utils::{format_number, from_base_units};
use colored::*;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Display helper for routing output
pub struct RouterDisplay;

impl RouterDisplay {
    pub fn create_progress_bar(message: &str) -> ProgressBar {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.cyan} {msg}")
                .unwrap()
                .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ "),
        );
        pb.set_message(message.to_string());
        pb.enable_steady_tick(Duration::from_millis(80));
        pb
    }

    pub fn display_tokens(tokens: &[&Token]) {
        println!("\n{}", style("Supported tokens").bold().underlined());
        for token in tokens {
            println!(
                "  {} {} ({} decimals, {} program)",
                style("►").cyan(),
                token.symbol.bold(),
                token.decimals,
                token.program
            );
            println!("    {}", style(token.mint.to_string()).dim());
        }
        println!();
    }

    pub fn display_pools(pools: &[PoolInfo], detailed: bool) {
        println!(
            "\n{}",
            style(format!("{} candidate pool(s), cheapest first", pools.len()))
                .bold()
                .underlined()
        );

        for (index, pool) in pools.iter().enumerate() {
            println!(
                "{} {} fee {:.4}%",
                style(format!("#{}", index + 1)).cyan(),
                pool.address,
                pool.fee_pct()
            );
            if detailed {
                println!("    pair: {} / {}", pool.token_a, pool.token_b);
                println!(
                    "    tick spacing: {} | liquidity: {}",
                    pool.tick_spacing,
                    format_number(pool.liquidity as u64)
                );
            }
        }
        println!();
    }

    pub fn display_quote(quote: &Quote, from: &Token, to: &Token) {
        println!("\n{}", style("Best quote").bold().underlined());
        println!(
            "  {} {} → {} {}",
            from_base_units(quote.amount_in, from.decimals),
            from.symbol.bold(),
            from_base_units(quote.estimated_out, to.decimals),
            to.symbol.bold()
        );
        println!(
            "  Min output: {} {} | direction: {}",
            from_base_units(quote.min_out, to.decimals),
            to.symbol,
            if quote.x_to_y { "x→y" } else { "y→x" }
        );
        println!(
            "  Pool: {} (fee {:.4}%)",
            style(quote.pool.address.to_string()).dim(),
            quote.pool.fee_pct()
        );
        println!();
    }

    pub fn display_receipt(receipt: &SwapReceipt, to: &Token) {
        println!("\n{}", "✅ Swap executed".green().bold());
        println!(
            "  Pool: {} (fee {:.4}%)",
            receipt.pool_address,
            receipt.pool_fee as f64 / crate::core::FEE_DENOMINATOR as f64 * 100.0
        );
        println!(
            "  Estimated output: {} {}",
            from_base_units(receipt.estimated_out, to.decimals),
            to.symbol
        );
        match receipt.actual_out {
            Some(actual) => println!(
                "  Actual output:    {} {}",
                from_base_units(actual, to.decimals),
                to.symbol
            ),
            None => println!("  Actual output:    (not yet observable)"),
        }
        println!(
            "\n{}",
            style(format!(
                "View on Solscan: https://solscan.io/tx/{}",
                receipt.signature
            ))
            .dim()
        );
    }

    /// The per-candidate failure trail is the primary diagnostic when a
    /// route exhausts every pool; print all of it.
    pub fn display_failure_trail(attempts: &[AttemptFailure]) {
        println!("{}", "❌ All candidate pools failed".red().bold());
        for (index, attempt) in attempts.iter().enumerate() {
            println!("  {} {}", style(format!("{}.", index + 1)).dim(), attempt);
        }
    }
}
