use anchor_lang::prelude::*;
use anchor_spl::token::TokenAccount;

use crate::constants::{POSITION_SEED, REWARD_PROGRAM_SEED, REWARD_VAULT_SEED};
use crate::state::{RewardProgram, StakePosition};

// =============================================================================
// Read-only instructions. Values come back as return data, so clients
// usually run them through simulateTransaction.
// =============================================================================

#[derive(Accounts)]
pub struct LedgerView<'info> {
    #[account(
        seeds = [
            REWARD_PROGRAM_SEED,
            reward_program.stake_mint.as_ref(),
            reward_program.reward_mint.as_ref(),
            &reward_program.ledger_id.to_le_bytes(),
        ],
        bump = reward_program.bump
    )]
    pub reward_program: Box<Account<'info, RewardProgram>>,
}

#[derive(Accounts)]
pub struct PositionRewardView<'info> {
    /// CHECK: Only used as a PDA seed
    pub holder: UncheckedAccount<'info>,

    #[account(
        seeds = [
            REWARD_PROGRAM_SEED,
            reward_program.stake_mint.as_ref(),
            reward_program.reward_mint.as_ref(),
            &reward_program.ledger_id.to_le_bytes(),
        ],
        bump = reward_program.bump
    )]
    pub reward_program: Box<Account<'info, RewardProgram>>,

    /// Absent when the holder never staked
    #[account(
        seeds = [POSITION_SEED, reward_program.key().as_ref(), holder.key().as_ref()],
        bump = position.bump
    )]
    pub position: Option<Account<'info, StakePosition>>,

    #[account(
        seeds = [REWARD_VAULT_SEED, reward_program.key().as_ref()],
        bump = reward_program.reward_vault_bump
    )]
    pub reward_vault: Box<Account<'info, TokenAccount>>,
}

#[derive(Accounts)]
#[instruction(holder: Pubkey)]
pub struct BalanceView<'info> {
    #[account(
        seeds = [
            REWARD_PROGRAM_SEED,
            reward_program.stake_mint.as_ref(),
            reward_program.reward_mint.as_ref(),
            &reward_program.ledger_id.to_le_bytes(),
        ],
        bump = reward_program.bump
    )]
    pub reward_program: Box<Account<'info, RewardProgram>>,

    /// Absent when the holder never staked
    #[account(
        seeds = [POSITION_SEED, reward_program.key().as_ref(), holder.as_ref()],
        bump = position.bump
    )]
    pub position: Option<Account<'info, StakePosition>>,
}

/// Reward `shares` of the holder's position would receive if it exited now
pub fn calculate_reward_by_share(ctx: Context<PositionRewardView>, shares: u64) -> Result<u64> {
    let Some(position) = ctx.accounts.position.as_ref() else {
        msg!("No position for {}", ctx.accounts.holder.key());
        return Ok(0);
    };

    let now = Clock::get()?.unix_timestamp;
    let reward = ctx.accounts.reward_program.quote_reward(
        position,
        shares,
        ctx.accounts.reward_vault.amount,
        now,
    )?;

    msg!("Reward for {} shares: {}", shares, reward);
    Ok(reward)
}

pub fn calculate_reward_bonus(ctx: Context<LedgerView>, amount: u64) -> Result<u64> {
    let now = Clock::get()?.unix_timestamp;
    ctx.accounts.reward_program.reward_bonus(amount, now)
}

pub fn balance_of(ctx: Context<BalanceView>, _holder: Pubkey) -> Result<u64> {
    Ok(ctx
        .accounts
        .position
        .as_ref()
        .map_or(0, |position| position.shares))
}

pub fn total_supply(ctx: Context<LedgerView>) -> Result<u64> {
    Ok(ctx.accounts.reward_program.total_shares)
}

pub fn stake_asset(ctx: Context<LedgerView>) -> Result<Pubkey> {
    Ok(ctx.accounts.reward_program.stake_mint)
}

pub fn reward_asset(ctx: Context<LedgerView>) -> Result<Pubkey> {
    Ok(ctx.accounts.reward_program.reward_mint)
}
