pub mod pair;

use crate::core::{error::SwapResult, PoolInfo};
use crate::ledger::LedgerClient;
use log::{debug, info};
use solana_sdk::pubkey::Pubkey;
use std::sync::Arc;

pub use pair::PairResolver;

/// Finds every pool trading a requested pair, cheapest fee first.
///
/// Enumeration hits the ledger on every call: pool state changes between
/// requests, so results are never cached here.
pub struct PoolDiscovery {
    ledger: Arc<dyn LedgerClient>,
}

impl PoolDiscovery {
    pub fn new(ledger: Arc<dyn LedgerClient>) -> Self {
        Self { ledger }
    }

    /// All pools whose unordered pair equals {token_a, token_b}, ascending by
    /// fee. Pools sharing a fee keep ledger enumeration order; fee is the only
    /// liquidity signal available without deeper inspection. An empty result
    /// is not an error at this layer.
    pub async fn find_candidates(
        &self,
        token_a: &Pubkey,
        token_b: &Pubkey,
    ) -> SwapResult<Vec<PoolInfo>> {
        debug!("Discovering pools for {}/{}", token_a, token_b);

        let mut pools = self.ledger.list_pools().await?;
        pools.retain(|pool| pool.trades_pair(token_a, token_b));
        pools.sort_by_key(|pool| pool.fee);

        info!(
            "Found {} pool(s) for {}/{}",
            pools.len(),
            token_a,
            token_b
        );
        Ok(pools)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::mock::MockLedger;

    fn pool(token_a: Pubkey, token_b: Pubkey, fee: u64) -> PoolInfo {
        PoolInfo {
            address: Pubkey::new_unique(),
            token_a,
            token_b,
            vault_a: Pubkey::new_unique(),
            vault_b: Pubkey::new_unique(),
            fee,
            tick_spacing: 64,
            liquidity: 1_000_000,
            sqrt_price: 1,
        }
    }

    #[tokio::test]
    async fn test_filters_to_requested_pair_in_either_order() {
        let a = Pubkey::new_unique();
        let b = Pubkey::new_unique();
        let c = Pubkey::new_unique();

        let matching_forward = pool(a, b, 100);
        let matching_reversed = pool(b, a, 200);
        let other = pool(a, c, 50);

        let ledger = Arc::new(MockLedger::new().with_pools(vec![
            matching_forward.clone(),
            other,
            matching_reversed.clone(),
        ]));
        let discovery = PoolDiscovery::new(ledger);

        let found = discovery.find_candidates(&a, &b).await.unwrap();
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].address, matching_forward.address);
        assert_eq!(found[1].address, matching_reversed.address);
    }

    #[tokio::test]
    async fn test_orders_ascending_by_fee() {
        let a = Pubkey::new_unique();
        let b = Pubkey::new_unique();

        let expensive = pool(a, b, 500_000_000);
        let cheap = pool(a, b, 100_000_000);
        let middle = pool(a, b, 300_000_000);

        let ledger = Arc::new(MockLedger::new().with_pools(vec![
            expensive.clone(),
            cheap.clone(),
            middle.clone(),
        ]));
        let discovery = PoolDiscovery::new(ledger);

        let found = discovery.find_candidates(&a, &b).await.unwrap();
        let fees: Vec<u64> = found.iter().map(|p| p.fee).collect();
        assert_eq!(fees, vec![100_000_000, 300_000_000, 500_000_000]);
    }

    #[tokio::test]
    async fn test_equal_fees_keep_enumeration_order() {
        let a = Pubkey::new_unique();
        let b = Pubkey::new_unique();

        let first = pool(a, b, 100);
        let second = pool(a, b, 100);
        let third = pool(a, b, 100);

        let ledger = Arc::new(MockLedger::new().with_pools(vec![
            first.clone(),
            second.clone(),
            third.clone(),
        ]));
        let discovery = PoolDiscovery::new(ledger);

        let found = discovery.find_candidates(&a, &b).await.unwrap();
        let addresses: Vec<Pubkey> = found.iter().map(|p| p.address).collect();
        assert_eq!(addresses, vec![first.address, second.address, third.address]);
    }

    #[tokio::test]
    async fn test_no_match_is_empty_not_error() {
        let ledger = Arc::new(MockLedger::new());
        let discovery = PoolDiscovery::new(ledger);

        let found = discovery
            .find_candidates(&Pubkey::new_unique(), &Pubkey::new_unique())
            .await
            .unwrap();
        assert!(found.is_empty());
    }

    #[tokio::test]
    async fn test_enumerates_on_every_call() {
        let ledger = Arc::new(MockLedger::new());
        let discovery = PoolDiscovery::new(ledger.clone());
        let a = Pubkey::new_unique();
        let b = Pubkey::new_unique();

        discovery.find_candidates(&a, &b).await.unwrap();
        discovery.find_candidates(&a, &b).await.unwrap();
        assert_eq!(*ledger.list_calls.lock().unwrap(), 2);
    }
}
