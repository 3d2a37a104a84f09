use crate::accounts::AccountProvisioner;
use crate::core::{error::SwapResult, Candidate, PoolInfo, SwapError, Token};
use crate::ledger::layout::derive_pool_address;
use log::warn;
use solana_sdk::pubkey::Pubkey;

/// Canonical total order over token identities: byte-wise mint comparison,
/// smaller identity first. Address derivation is sensitive to this order, so
/// it is applied here and nowhere else.
pub fn canonical_order<'a>(a: &'a Token, b: &'a Token) -> (&'a Token, &'a Token) {
    if a.mint.to_bytes() <= b.mint.to_bytes() {
        (a, b)
    } else {
        (b, a)
    }
}

/// Normalizes a discovered pool record into a tradeable candidate: canonical
/// token ordering, derived pool address, direction flag and the owner's two
/// token account addresses (derived only; creation is a separate step).
pub struct PairResolver {
    exchange_program: Pubkey,
}

impl PairResolver {
    pub fn new(exchange_program: Pubkey) -> Self {
        Self { exchange_program }
    }

    pub fn resolve(
        &self,
        pool: &PoolInfo,
        from: &Token,
        to: &Token,
        owner: &Pubkey,
    ) -> SwapResult<Candidate> {
        // Defensive: discovery filters to the pair, but a wrong fee or tick
        // spacing can silently derive an unintended pool address, so the
        // record is re-checked before any address leaves this function.
        if !pool.trades_pair(&from.mint, &to.mint) {
            return Err(SwapError::InvalidPool(pool.address));
        }

        let (token_x, token_y) = canonical_order(from, to);
        let x_to_y = token_x.mint == from.mint;

        let (vault_x, vault_y) = if pool.token_a == token_x.mint {
            (pool.vault_a, pool.vault_b)
        } else {
            (pool.vault_b, pool.vault_a)
        };

        let address = derive_pool_address(
            &self.exchange_program,
            &token_x.mint,
            &token_y.mint,
            pool.fee,
            pool.tick_spacing,
        );
        if address != pool.address {
            warn!(
                "Pool {} does not match derived address {} (fee {}, tick spacing {})",
                pool.address, address, pool.fee, pool.tick_spacing
            );
        }

        let token_x_account = AccountProvisioner::derive_address(token_x, owner);
        let token_y_account = AccountProvisioner::derive_address(token_y, owner);

        Ok(Candidate {
            pool: PoolInfo {
                address,
                ..pool.clone()
            },
            token_x: token_x.clone(),
            token_y: token_y.clone(),
            vault_x,
            vault_y,
            x_to_y,
            token_x_account,
            token_y_account,
        })
    }
}
