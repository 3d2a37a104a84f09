//! Native asset handling. Swaps denominated in the native asset run against
//! its wrapped mint; lamports are wrapped into the owner's native token
//! account before the trade and unwrapped by closing it afterwards.

use crate::core::{error::SwapResult, SwapError};
use solana_sdk::{instruction::Instruction, pubkey::Pubkey, system_instruction};
use spl_associated_token_account::get_associated_token_address;
use spl_token::instruction as token_instruction;

/// The owner's wrapped-native token account address.
pub fn native_token_account(owner: &Pubkey) -> Pubkey {
    get_associated_token_address(owner, &spl_token::native_mint::ID)
}

/// Instructions to move `amount` lamports into the wrapped-native account.
pub fn wrap_instructions(owner: &Pubkey, amount: u64, create_account: bool) -> Vec<Instruction> {
    let account = native_token_account(owner);
    let mut instructions = Vec::with_capacity(3);

    if create_account {
        instructions.push(
            spl_associated_token_account::instruction::create_associated_token_account_idempotent(
                owner,
                owner,
                &spl_token::native_mint::ID,
                &spl_token::ID,
            ),
        );
    }

    instructions.push(system_instruction::transfer(owner, &account, amount));
    instructions.push(
        token_instruction::sync_native(&spl_token::ID, &account)
            .expect("sync_native accepts the native account"),
    );

    instructions
}

/// Close the wrapped-native account, returning all lamports to the owner.
pub fn unwrap_instruction(owner: &Pubkey) -> SwapResult<Instruction> {
    let account = native_token_account(owner);
    token_instruction::close_account(&spl_token::ID, &account, owner, owner, &[])
        .map_err(|e| SwapError::Other(format!("Failed to build close instruction: {:?}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_with_creation_has_three_instructions() {
        let owner = Pubkey::new_unique();
        let instructions = wrap_instructions(&owner, 1_000_000, true);
        assert_eq!(instructions.len(), 3);
    }

    #[test]
    fn test_wrap_without_creation_skips_ata_instruction() {
        let owner = Pubkey::new_unique();
        let instructions = wrap_instructions(&owner, 1_000_000, false);
        assert_eq!(instructions.len(), 2);
        assert_eq!(
            instructions[0].program_id,
            solana_sdk::system_program::ID
        );
    }

    #[test]
    fn test_unwrap_targets_native_account() {
        let owner = Pubkey::new_unique();
        let ix = unwrap_instruction(&owner).unwrap();
        assert_eq!(ix.program_id, spl_token::ID);
        assert_eq!(ix.accounts[0].pubkey, native_token_account(&owner));
    }
}
