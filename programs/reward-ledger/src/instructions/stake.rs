use anchor_lang::prelude::*;
use anchor_spl::token::{self, Mint, Token, TokenAccount, Transfer};

use crate::constants::{POSITION_SEED, REWARD_PROGRAM_SEED, STAKE_VAULT_SEED};
use crate::error::LedgerError;
use crate::events::Staked;
use crate::state::{RewardProgram, StakePosition};

/// Stake tokens into a reward program
///
/// # Arguments
/// * `ctx` - The context containing all accounts
/// * `amount` - Stake tokens to deposit; credited 1:1 as shares
///
/// # Flow
/// 1. Validate amount, take the lock
/// 2. Move the accumulator and settle the position
/// 3. Credit shares, persist state
/// 4. Pull stake tokens into the vault
///
#[derive(Accounts)]
pub struct Stake<'info> {
    /// Holder staking their tokens
    #[account(mut)]
    pub holder: Signer<'info>,

    #[account(
        mut,
        seeds = [
            REWARD_PROGRAM_SEED,
            reward_program.stake_mint.as_ref(),
            reward_program.reward_mint.as_ref(),
            &reward_program.ledger_id.to_le_bytes(),
        ],
        bump = reward_program.bump,
        constraint = !reward_program.locked @ LedgerError::Reentrancy
    )]
    pub reward_program: Box<Account<'info, RewardProgram>>,

    /// Holder's position (created on first stake)
    #[account(
        init_if_needed,
        payer = holder,
        space = StakePosition::SIZE,
        seeds = [POSITION_SEED, reward_program.key().as_ref(), holder.key().as_ref()],
        bump
    )]
    pub position: Box<Account<'info, StakePosition>>,

    #[account(
        constraint = stake_mint.key() == reward_program.stake_mint @ LedgerError::InvalidStakeMint
    )]
    pub stake_mint: Box<Account<'info, Mint>>,

    /// Holder's stake token account
    #[account(
        mut,
        token::mint = stake_mint,
        token::authority = holder
    )]
    pub holder_stake_account: Box<Account<'info, TokenAccount>>,

    #[account(
        mut,
        seeds = [STAKE_VAULT_SEED, reward_program.key().as_ref()],
        bump = reward_program.stake_vault_bump,
        token::mint = stake_mint,
        token::authority = reward_program
    )]
    pub stake_vault: Box<Account<'info, TokenAccount>>,

    pub system_program: Program<'info, System>,
    pub token_program: Program<'info, Token>,
}

/// Bind a fresh position to its program and holder
pub(crate) fn open_position(
    position: &mut StakePosition,
    reward_program: Pubkey,
    holder: Pubkey,
    bump: u8,
) {
    if position.reward_program == Pubkey::default() {
        position.reward_program = reward_program;
        position.holder = holder;
        position.bump = bump;
    }
}

pub fn handler_stake(ctx: Context<Stake>, amount: u64) -> Result<()> {
    require!(amount > 0, LedgerError::InvalidAmount);
    require!(
        ctx.accounts.holder_stake_account.amount >= amount,
        LedgerError::InsufficientBalance
    );

    let now = Clock::get()?.unix_timestamp;
    let holder = ctx.accounts.holder.key();
    let reward_program_key = ctx.accounts.reward_program.key();

    ctx.accounts.reward_program.lock()?;

    open_position(
        &mut ctx.accounts.position,
        reward_program_key,
        holder,
        ctx.bumps.position,
    );

    ctx.accounts
        .reward_program
        .credit_stake(&mut ctx.accounts.position, amount, now)?;

    // Effects and lock are persisted before the token CPI
    ctx.accounts.reward_program.exit(&crate::ID)?;
    ctx.accounts.position.exit(&crate::ID)?;

    token::transfer(
        CpiContext::new(
            ctx.accounts.token_program.to_account_info(),
            Transfer {
                from: ctx.accounts.holder_stake_account.to_account_info(),
                to: ctx.accounts.stake_vault.to_account_info(),
                authority: ctx.accounts.holder.to_account_info(),
            },
        ),
        amount,
    )?;

    ctx.accounts.reward_program.unlock();

    let reward_program = &ctx.accounts.reward_program;
    let position = &ctx.accounts.position;

    msg!(
        "Staked {}. Holder shares: {}, total shares: {}",
        amount,
        position.shares,
        reward_program.total_shares
    );

    emit!(Staked {
        reward_program: reward_program_key,
        holder,
        funder: holder,
        amount,
        holder_shares: position.shares,
        total_shares: reward_program.total_shares,
        timestamp: now,
    });

    Ok(())
}
