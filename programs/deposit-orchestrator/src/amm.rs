//! Client for the external AMM router.
//!
//! The router is an Anchor program without a published Rust crate, so its
//! instructions are encoded by hand: 8-byte Anchor discriminator followed by
//! little-endian arguments. Pools are PDAs of the router keyed by the sorted
//! mint pair.

use anchor_lang::prelude::*;
use anchor_lang::solana_program::{
    instruction::{AccountMeta, Instruction},
    program::invoke_signed,
};

use crate::error::OrchestratorError;

/// sha256("global:swap_exact_in")[..8]
pub const SWAP_EXACT_IN_DISCRIMINATOR: [u8; 8] = [104, 104, 131, 86, 161, 189, 180, 216];

/// sha256("global:add_liquidity")[..8]
pub const ADD_LIQUIDITY_DISCRIMINATOR: [u8; 8] = [181, 157, 89, 67, 143, 182, 52, 72];

pub const AMM_POOL_SEED: &[u8] = b"pool";

/// Mints in the order the router stores them (token A < token B)
pub fn sorted_mints(mint_x: Pubkey, mint_y: Pubkey) -> (Pubkey, Pubkey) {
    if mint_x < mint_y {
        (mint_x, mint_y)
    } else {
        (mint_y, mint_x)
    }
}

/// Pair address the router's factory derives for two mints
pub fn pool_address(amm_program: &Pubkey, mint_x: Pubkey, mint_y: Pubkey) -> Pubkey {
    let (token_a, token_b) = sorted_mints(mint_x, mint_y);
    Pubkey::find_program_address(
        &[AMM_POOL_SEED, token_a.as_ref(), token_b.as_ref()],
        amm_program,
    )
    .0
}

pub fn swap_exact_in_data(amount_in: u64, minimum_amount_out: u64, deadline: i64) -> Vec<u8> {
    let mut data = Vec::with_capacity(8 + 24);
    data.extend_from_slice(&SWAP_EXACT_IN_DISCRIMINATOR);
    data.extend_from_slice(&amount_in.to_le_bytes());
    data.extend_from_slice(&minimum_amount_out.to_le_bytes());
    data.extend_from_slice(&deadline.to_le_bytes());
    data
}

pub fn add_liquidity_data(
    amount_a_desired: u64,
    amount_b_desired: u64,
    amount_a_min: u64,
    amount_b_min: u64,
    deadline: i64,
) -> Vec<u8> {
    let mut data = Vec::with_capacity(8 + 40);
    data.extend_from_slice(&ADD_LIQUIDITY_DISCRIMINATOR);
    data.extend_from_slice(&amount_a_desired.to_le_bytes());
    data.extend_from_slice(&amount_b_desired.to_le_bytes());
    data.extend_from_slice(&amount_a_min.to_le_bytes());
    data.extend_from_slice(&amount_b_min.to_le_bytes());
    data.extend_from_slice(&deadline.to_le_bytes());
    data
}

/// Accounts for `swap_exact_in`, in router order
pub struct SwapExactIn<'info> {
    pub amm_program: AccountInfo<'info>,
    pub pool: AccountInfo<'info>,
    pub authority: AccountInfo<'info>,
    pub source: AccountInfo<'info>,
    pub destination: AccountInfo<'info>,
    pub pool_vault_in: AccountInfo<'info>,
    pub pool_vault_out: AccountInfo<'info>,
    pub token_program: AccountInfo<'info>,
}

/// Accounts for `add_liquidity`, token A/B in sorted mint order
pub struct AddLiquidity<'info> {
    pub amm_program: AccountInfo<'info>,
    pub pool: AccountInfo<'info>,
    pub authority: AccountInfo<'info>,
    pub user_token_a: AccountInfo<'info>,
    pub user_token_b: AccountInfo<'info>,
    pub pool_vault_a: AccountInfo<'info>,
    pub pool_vault_b: AccountInfo<'info>,
    pub lp_mint: AccountInfo<'info>,
    pub user_lp: AccountInfo<'info>,
    pub token_program: AccountInfo<'info>,
}

pub fn swap_exact_in<'info>(
    accounts: SwapExactIn<'info>,
    amount_in: u64,
    minimum_amount_out: u64,
    deadline: i64,
    signer_seeds: &[&[&[u8]]],
) -> Result<()> {
    let instruction = Instruction {
        program_id: accounts.amm_program.key(),
        accounts: vec![
            AccountMeta::new(accounts.pool.key(), false),
            AccountMeta::new_readonly(accounts.authority.key(), true),
            AccountMeta::new(accounts.source.key(), false),
            AccountMeta::new(accounts.destination.key(), false),
            AccountMeta::new(accounts.pool_vault_in.key(), false),
            AccountMeta::new(accounts.pool_vault_out.key(), false),
            AccountMeta::new_readonly(accounts.token_program.key(), false),
        ],
        data: swap_exact_in_data(amount_in, minimum_amount_out, deadline),
    };

    invoke_signed(
        &instruction,
        &[
            accounts.pool,
            accounts.authority,
            accounts.source,
            accounts.destination,
            accounts.pool_vault_in,
            accounts.pool_vault_out,
            accounts.token_program,
            accounts.amm_program,
        ],
        signer_seeds,
    )
    .map_err(|e| {
        msg!("AMM swap CPI failed: {:?}", e);
        OrchestratorError::AmmCpiFailed
    })?;

    Ok(())
}

#[allow(clippy::too_many_arguments)]
pub fn add_liquidity<'info>(
    accounts: AddLiquidity<'info>,
    amount_a_desired: u64,
    amount_b_desired: u64,
    amount_a_min: u64,
    amount_b_min: u64,
    deadline: i64,
    signer_seeds: &[&[&[u8]]],
) -> Result<()> {
    let instruction = Instruction {
        program_id: accounts.amm_program.key(),
        accounts: vec![
            AccountMeta::new(accounts.pool.key(), false),
            AccountMeta::new_readonly(accounts.authority.key(), true),
            AccountMeta::new(accounts.user_token_a.key(), false),
            AccountMeta::new(accounts.user_token_b.key(), false),
            AccountMeta::new(accounts.pool_vault_a.key(), false),
            AccountMeta::new(accounts.pool_vault_b.key(), false),
            AccountMeta::new(accounts.lp_mint.key(), false),
            AccountMeta::new(accounts.user_lp.key(), false),
            AccountMeta::new_readonly(accounts.token_program.key(), false),
        ],
        data: add_liquidity_data(
            amount_a_desired,
            amount_b_desired,
            amount_a_min,
            amount_b_min,
            deadline,
        ),
    };

    invoke_signed(
        &instruction,
        &[
            accounts.pool,
            accounts.authority,
            accounts.user_token_a,
            accounts.user_token_b,
            accounts.pool_vault_a,
            accounts.pool_vault_b,
            accounts.lp_mint,
            accounts.user_lp,
            accounts.token_program,
            accounts.amm_program,
        ],
        signer_seeds,
    )
    .map_err(|e| {
        msg!("AMM add_liquidity CPI failed: {:?}", e);
        OrchestratorError::AmmCpiFailed
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pool_address_ignores_mint_order() {
        let amm = Pubkey::new_unique();
        let wsol = Pubkey::new_unique();
        let token = Pubkey::new_unique();

        assert_eq!(pool_address(&amm, wsol, token), pool_address(&amm, token, wsol));
        assert_ne!(
            pool_address(&amm, wsol, token),
            pool_address(&Pubkey::new_unique(), wsol, token)
        );
    }

    #[test]
    fn swap_data_layout() {
        let data = swap_exact_in_data(5, 7, -1);
        assert_eq!(data.len(), 32);
        assert_eq!(data[..8], SWAP_EXACT_IN_DISCRIMINATOR);
        assert_eq!(data[8..16], 5u64.to_le_bytes());
        assert_eq!(data[16..24], 7u64.to_le_bytes());
        assert_eq!(data[24..32], (-1i64).to_le_bytes());
    }

    #[test]
    fn add_liquidity_data_layout() {
        let data = add_liquidity_data(1, 2, 3, 4, 1_700_000_000);
        assert_eq!(data.len(), 48);
        assert_eq!(data[..8], ADD_LIQUIDITY_DISCRIMINATOR);
        assert_eq!(data[8..16], 1u64.to_le_bytes());
        assert_eq!(data[32..40], 4u64.to_le_bytes());
        assert_eq!(data[40..48], 1_700_000_000i64.to_le_bytes());
    }
}
