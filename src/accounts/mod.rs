pub mod native;

use crate::core::{error::SwapResult, SwapError, Token};
use crate::ledger::LedgerClient;
use log::{debug, info};
use solana_sdk::{pubkey::Pubkey, signature::Keypair, signer::Signer};
use std::sync::Arc;

/// Ensures the owner's token accounts exist before a trade touches them.
///
/// Address derivation is pure; the only side effect is at most one
/// ledger-visible creation per missing account, batched into a single atomic
/// submission when more than one is missing.
pub struct AccountProvisioner {
    ledger: Arc<dyn LedgerClient>,
}

impl AccountProvisioner {
    pub fn new(ledger: Arc<dyn LedgerClient>) -> Self {
        Self { ledger }
    }

    /// Deterministic token account address for (mint, owner, program variant).
    /// No network interaction.
    pub fn derive_address(token: &Token, owner: &Pubkey) -> Pubkey {
        spl_associated_token_account::get_associated_token_address_with_program_id(
            owner,
            &token.mint,
            &token.program.id(),
        )
    }

    /// Idempotent: an existing account is only checked, never mutated.
    pub async fn ensure(&self, token: &Token, signer: &Keypair) -> SwapResult<Pubkey> {
        let owner = signer.pubkey();
        let address = Self::derive_address(token, &owner);

        if self.exists(&address).await? {
            debug!("Token account {} already exists", address);
            return Ok(address);
        }

        info!("Creating token account {} for {}", address, token.symbol);
        self.create(signer, &[token]).await?;
        Ok(address)
    }

    /// Ensure both sides of a pair in one pass. Existence checks run
    /// concurrently; missing accounts are created in a single submission, so
    /// a mid-batch failure leaves no accounts created.
    pub async fn ensure_pair(
        &self,
        from: &Token,
        to: &Token,
        signer: &Keypair,
    ) -> SwapResult<(Pubkey, Pubkey)> {
        let owner = signer.pubkey();
        let from_address = Self::derive_address(from, &owner);
        let to_address = Self::derive_address(to, &owner);

        let (from_exists, to_exists) =
            futures::try_join!(self.exists(&from_address), self.exists(&to_address))?;

        let mut missing: Vec<&Token> = Vec::new();
        if !from_exists {
            missing.push(from);
        }
        if !to_exists && to_address != from_address {
            missing.push(to);
        }

        if !missing.is_empty() {
            info!(
                "Creating {} missing token account(s) for {}",
                missing.len(),
                owner
            );
            self.create(signer, &missing).await?;
        }

        Ok((from_address, to_address))
    }

    async fn exists(&self, address: &Pubkey) -> SwapResult<bool> {
        self.ledger
            .account_exists(address)
            .await
            .map_err(|e| SwapError::AccountProvisioning(e.to_string()))
    }

    async fn create(&self, signer: &Keypair, tokens: &[&Token]) -> SwapResult<Vec<Pubkey>> {
        self.ledger
            .create_accounts(signer, tokens)
            .await
            .map_err(|e| SwapError::AccountProvisioning(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::TokenProgram;
    use crate::ledger::mock::MockLedger;

    fn token(symbol: &str, program: TokenProgram) -> Token {
        Token {
            symbol: symbol.to_string(),
            mint: Pubkey::new_unique(),
            decimals: 6,
            program,
        }
    }

    #[test]
    fn test_derive_address_is_deterministic() {
        let token = token("USDC", TokenProgram::Legacy);
        let owner = Pubkey::new_unique();
        assert_eq!(
            AccountProvisioner::derive_address(&token, &owner),
            AccountProvisioner::derive_address(&token, &owner)
        );
    }

    #[test]
    fn test_derive_address_depends_on_program_variant() {
        let owner = Pubkey::new_unique();
        let mint = Pubkey::new_unique();
        let legacy = Token {
            symbol: "A".to_string(),
            mint,
            decimals: 6,
            program: TokenProgram::Legacy,
        };
        let extended = Token {
            program: TokenProgram::Extended,
            ..legacy.clone()
        };
        assert_ne!(
            AccountProvisioner::derive_address(&legacy, &owner),
            AccountProvisioner::derive_address(&extended, &owner)
        );
    }

    #[tokio::test]
    async fn test_ensure_is_idempotent() {
        let ledger = Arc::new(MockLedger::new());
        let provisioner = AccountProvisioner::new(ledger.clone());
        let token = token("USDC", TokenProgram::Legacy);
        let signer = Keypair::new();

        let first = provisioner.ensure(&token, &signer).await.unwrap();
        assert_eq!(ledger.create_count(), 1);

        // Second call observes existence and performs no mutation.
        let second = provisioner.ensure(&token, &signer).await.unwrap();
        assert_eq!(first, second);
        assert_eq!(ledger.create_count(), 1);
    }

    #[tokio::test]
    async fn test_ensure_pair_batches_missing_accounts() {
        let ledger = Arc::new(MockLedger::new());
        let provisioner = AccountProvisioner::new(ledger.clone());
        let from = token("USDC", TokenProgram::Legacy);
        let to = token("BONK", TokenProgram::Legacy);
        let signer = Keypair::new();

        provisioner.ensure_pair(&from, &to, &signer).await.unwrap();

        let batches = ledger.create_batches.lock().unwrap().clone();
        assert_eq!(batches.len(), 1, "both accounts created in one submission");
        assert_eq!(batches[0], vec![from.mint, to.mint]);
    }

    #[tokio::test]
    async fn test_ensure_pair_skips_existing() {
        let from = token("USDC", TokenProgram::Legacy);
        let to = token("BONK", TokenProgram::Legacy);
        let signer = Keypair::new();
        let from_address = AccountProvisioner::derive_address(&from, &signer.pubkey());

        let ledger = Arc::new(MockLedger::new().with_existing_account(from_address));
        let provisioner = AccountProvisioner::new(ledger.clone());

        provisioner.ensure_pair(&from, &to, &signer).await.unwrap();

        let batches = ledger.create_batches.lock().unwrap().clone();
        assert_eq!(batches.len(), 1);
        assert_eq!(batches[0], vec![to.mint], "only the missing account is created");
    }

    #[tokio::test]
    async fn test_ensure_pair_no_creation_when_both_exist() {
        let from = token("USDC", TokenProgram::Legacy);
        let to = token("BONK", TokenProgram::Legacy);
        let signer = Keypair::new();
        let owner = signer.pubkey();

        let ledger = Arc::new(
            MockLedger::new()
                .with_existing_account(AccountProvisioner::derive_address(&from, &owner))
                .with_existing_account(AccountProvisioner::derive_address(&to, &owner)),
        );
        let provisioner = AccountProvisioner::new(ledger.clone());

        provisioner.ensure_pair(&from, &to, &signer).await.unwrap();
        assert_eq!(ledger.create_count(), 0);
    }
}
