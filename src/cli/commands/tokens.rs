use crate::cli::display::RouterDisplay;
use crate::core::error::SwapResult;

pub async fn execute() -> SwapResult<()> {
    let ctx = super::setup()?;
    RouterDisplay::display_tokens(&ctx.registry.tokens());
    Ok(())
}
