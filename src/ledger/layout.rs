use borsh::BorshSerialize;
use solana_sdk::{
    instruction::{AccountMeta, Instruction},
    pubkey::Pubkey,
};

use crate::core::{Candidate, PoolInfo};

/// Seed prefix for pool PDAs.
pub const POOL_SEED: &[u8] = b"pool";

/// Anchor-style discriminator for the exchange's `swap` instruction.
pub const SWAP_IX_DISCRIMINATOR: [u8; 8] = [248, 198, 158, 145, 225, 117, 135, 200];

/// Exchange pool account layout.
///
/// Fixed-size packed record: 8-byte discriminator, the two mints in record
/// order, their vaults, then fee/tick-spacing/price state.
#[derive(Debug, Clone)]
pub struct PoolAccountLayout {
    pub token_a: Pubkey,
    pub token_b: Pubkey,
    pub vault_a: Pubkey,
    pub vault_b: Pubkey,
    pub fee: u64,
    pub tick_spacing: u16,
    pub current_tick: i32,
    pub sqrt_price: u128,
    pub liquidity: u128,
}

impl PoolAccountLayout {
    pub const LEN: usize = 182;

    /// Parse from raw account bytes (packed layout).
    pub fn from_bytes(data: &[u8]) -> Result<Self, String> {
        if data.len() != Self::LEN {
            return Err(format!(
                "Invalid data length: {} (expected {})",
                data.len(),
                Self::LEN
            ));
        }

        let read_pubkey = |offset: usize| -> Pubkey {
            Pubkey::new_from_array(data[offset..offset + 32].try_into().unwrap())
        };

        Ok(Self {
            token_a: read_pubkey(8),
            token_b: read_pubkey(40),
            vault_a: read_pubkey(72),
            vault_b: read_pubkey(104),
            fee: u64::from_le_bytes(data[136..144].try_into().unwrap()),
            tick_spacing: u16::from_le_bytes(data[144..146].try_into().unwrap()),
            current_tick: i32::from_le_bytes(data[146..150].try_into().unwrap()),
            sqrt_price: u128::from_le_bytes(data[150..166].try_into().unwrap()),
            liquidity: u128::from_le_bytes(data[166..182].try_into().unwrap()),
        })
    }

    pub fn into_pool_info(self, address: Pubkey) -> PoolInfo {
        PoolInfo {
            address,
            token_a: self.token_a,
            token_b: self.token_b,
            vault_a: self.vault_a,
            vault_b: self.vault_b,
            fee: self.fee,
            // An unset spacing in the record means spacing 1.
            tick_spacing: if self.tick_spacing == 0 {
                crate::core::DEFAULT_TICK_SPACING
            } else {
                self.tick_spacing
            },
            liquidity: self.liquidity,
            sqrt_price: self.sqrt_price,
        }
    }
}

/// Pool addresses are PDAs of (canonical pair, fee, tick spacing). Any fee or
/// tick-spacing value not actually present on the ledger derives an address
/// that resolves to nothing.
pub fn derive_pool_address(
    program: &Pubkey,
    token_x: &Pubkey,
    token_y: &Pubkey,
    fee: u64,
    tick_spacing: u16,
) -> Pubkey {
    Pubkey::find_program_address(
        &[
            POOL_SEED,
            token_x.as_ref(),
            token_y.as_ref(),
            &fee.to_le_bytes(),
            &tick_spacing.to_le_bytes(),
        ],
        program,
    )
    .0
}

/// Borsh-encoded argument block of the `swap` instruction.
#[derive(Debug, BorshSerialize)]
pub struct SwapInstructionArgs {
    pub amount: u64,
    pub other_amount_threshold: u64,
    pub sqrt_price_limit: u128,
    pub by_amount_in: bool,
    pub x_to_y: bool,
}

/// Build the exchange `swap` instruction for a resolved candidate.
pub fn build_swap_instruction(
    program: &Pubkey,
    candidate: &Candidate,
    owner: &Pubkey,
    args: &SwapInstructionArgs,
) -> Instruction {
    build_swap_instruction_raw(
        program,
        &candidate.pool.address,
        owner,
        &candidate.token_x_account,
        &candidate.token_y_account,
        &candidate.vault_x,
        &candidate.vault_y,
        &candidate.token_x.program.id(),
        &candidate.token_y.program.id(),
        args,
    )
}

/// Instruction builder over raw account addresses, for callers that have a
/// pool record but no resolved candidate (the dry-run quoter path).
#[allow(clippy::too_many_arguments)]
pub fn build_swap_instruction_raw(
    program: &Pubkey,
    pool: &Pubkey,
    owner: &Pubkey,
    token_x_account: &Pubkey,
    token_y_account: &Pubkey,
    vault_x: &Pubkey,
    vault_y: &Pubkey,
    token_program_x: &Pubkey,
    token_program_y: &Pubkey,
    args: &SwapInstructionArgs,
) -> Instruction {
    let mut data = Vec::with_capacity(8 + 35);
    data.extend_from_slice(&SWAP_IX_DISCRIMINATOR);
    args.serialize(&mut data)
        .expect("borsh serialization of plain fields cannot fail");

    let accounts = vec![
        AccountMeta::new(*owner, true),
        AccountMeta::new(*pool, false),
        AccountMeta::new(*token_x_account, false),
        AccountMeta::new(*token_y_account, false),
        AccountMeta::new(*vault_x, false),
        AccountMeta::new(*vault_y, false),
        AccountMeta::new_readonly(*token_program_x, false),
        AccountMeta::new_readonly(*token_program_y, false),
    ];

    Instruction {
        program_id: *program,
        accounts,
        data,
    }
}
