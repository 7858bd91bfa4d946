use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::constants::{
    MAX_BONUS_CONSTANT, MAX_DURATION_SECONDS, MIN_DURATION_SECONDS, REWARD_PROGRAM_SEED,
    REWARD_VAULT_SEED, STAKE_VAULT_SEED,
};
use crate::error::LedgerError;
use crate::events::LedgerInitialized;
use crate::state::RewardProgram;

/// Create a reward program with its stake and reward vaults
///
/// # Arguments
/// * `ctx` - The context containing all accounts
/// * `ledger_id` - Distinguishes programs over the same asset pair
/// * `duration` - Maturity window in seconds
/// * `bonus_constant` - Early-bird bonus, percent of the base accrual rate
///
/// The clock starts at creation. Rewards are funded afterwards, either with
/// `fund_rewards` or a plain token transfer into the reward vault.
///
#[derive(Accounts)]
#[instruction(ledger_id: u64)]
pub struct Initialize<'info> {
    /// Creator, pays for the accounts
    #[account(mut)]
    pub authority: Signer<'info>,

    /// Reward program PDA
    #[account(
        init,
        payer = authority,
        space = RewardProgram::SIZE,
        seeds = [
            REWARD_PROGRAM_SEED,
            stake_mint.key().as_ref(),
            reward_mint.key().as_ref(),
            &ledger_id.to_le_bytes(),
        ],
        bump
    )]
    pub reward_program: Box<Account<'info, RewardProgram>>,

    /// Staked asset (LP token)
    pub stake_mint: Box<Account<'info, Mint>>,

    /// Reward asset
    pub reward_mint: Box<Account<'info, Mint>>,

    /// Vault holding staked principal
    #[account(
        init,
        payer = authority,
        seeds = [STAKE_VAULT_SEED, reward_program.key().as_ref()],
        bump,
        token::mint = stake_mint,
        token::authority = reward_program
    )]
    pub stake_vault: Box<Account<'info, TokenAccount>>,

    /// Vault holding the reward balance
    #[account(
        init,
        payer = authority,
        seeds = [REWARD_VAULT_SEED, reward_program.key().as_ref()],
        bump,
        token::mint = reward_mint,
        token::authority = reward_program
    )]
    pub reward_vault: Box<Account<'info, TokenAccount>>,

    pub system_program: Program<'info, System>,
    pub token_program: Program<'info, Token>,
}

pub fn handler_initialize(
    ctx: Context<Initialize>,
    ledger_id: u64,
    duration: i64,
    bonus_constant: u64,
) -> Result<()> {
    require!(
        (MIN_DURATION_SECONDS..=MAX_DURATION_SECONDS).contains(&duration),
        LedgerError::InvalidDuration
    );
    require!(
        bonus_constant <= MAX_BONUS_CONSTANT,
        LedgerError::InvalidBonusConstant
    );

    let now = Clock::get()?.unix_timestamp;
    let reward_program = &mut ctx.accounts.reward_program;

    reward_program.authority = ctx.accounts.authority.key();
    reward_program.stake_mint = ctx.accounts.stake_mint.key();
    reward_program.reward_mint = ctx.accounts.reward_mint.key();
    reward_program.stake_vault = ctx.accounts.stake_vault.key();
    reward_program.reward_vault = ctx.accounts.reward_vault.key();
    reward_program.ledger_id = ledger_id;

    reward_program.created_at = now;
    reward_program.duration = duration;
    reward_program.bonus_constant = bonus_constant;

    reward_program.total_shares = 0;
    reward_program.total_principal = 0;
    reward_program.total_weight = 0;
    reward_program.weight_per_share = 0;
    reward_program.last_update = now;
    reward_program.holder_count = 0;
    reward_program.total_rewards_paid = 0;
    reward_program.emergency_exits = 0;
    reward_program.locked = false;

    reward_program.bump = ctx.bumps.reward_program;
    reward_program.stake_vault_bump = ctx.bumps.stake_vault;
    reward_program.reward_vault_bump = ctx.bumps.reward_vault;

    msg!(
        "Reward program initialized: stake_mint={}, reward_mint={}, ledger_id={}",
        reward_program.stake_mint,
        reward_program.reward_mint,
        ledger_id
    );
    msg!(
        "Duration: {}s, bonus constant: {}, matures at {}",
        duration,
        bonus_constant,
        reward_program.maturity()?
    );

    emit!(LedgerInitialized {
        reward_program: reward_program.key(),
        authority: reward_program.authority,
        stake_mint: reward_program.stake_mint,
        reward_mint: reward_program.reward_mint,
        ledger_id,
        duration,
        bonus_constant,
        timestamp: now,
    });

    Ok(())
}
