use anchor_lang::prelude::*;
use anchor_spl::token::{self, Mint, Token, TokenAccount, Transfer};

use crate::constants::{POSITION_SEED, REWARD_PROGRAM_SEED, STAKE_VAULT_SEED};
use crate::error::LedgerError;
use crate::events::Staked;
use crate::instructions::stake::open_position;
use crate::state::{RewardProgram, StakePosition};

/// Stake tokens owned by `funder` and credit the shares to `beneficiary`
///
/// Used by the deposit orchestrator, which signs as funder with its PDA and
/// credits the depositor. Accounting is identical to `stake`.
///
#[derive(Accounts)]
pub struct StakeFor<'info> {
    /// Owner of the stake tokens being deposited
    pub funder: Signer<'info>,

    /// Pays rent for a new position
    #[account(mut)]
    pub payer: Signer<'info>,

    /// CHECK: Only used as the position owner and PDA seed
    pub beneficiary: UncheckedAccount<'info>,

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

    /// Beneficiary's position (created on first stake)
    #[account(
        init_if_needed,
        payer = payer,
        space = StakePosition::SIZE,
        seeds = [POSITION_SEED, reward_program.key().as_ref(), beneficiary.key().as_ref()],
        bump
    )]
    pub position: Box<Account<'info, StakePosition>>,

    #[account(
        constraint = stake_mint.key() == reward_program.stake_mint @ LedgerError::InvalidStakeMint
    )]
    pub stake_mint: Box<Account<'info, Mint>>,

    /// Funder's stake token account
    #[account(
        mut,
        token::mint = stake_mint,
        token::authority = funder
    )]
    pub funder_stake_account: Box<Account<'info, TokenAccount>>,

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

pub fn handler_stake_for(ctx: Context<StakeFor>, amount: u64) -> Result<()> {
    require!(amount > 0, LedgerError::InvalidAmount);
    require!(
        ctx.accounts.funder_stake_account.amount >= amount,
        LedgerError::InsufficientBalance
    );

    let now = Clock::get()?.unix_timestamp;
    let beneficiary = ctx.accounts.beneficiary.key();
    let funder = ctx.accounts.funder.key();
    let reward_program_key = ctx.accounts.reward_program.key();

    ctx.accounts.reward_program.lock()?;

    open_position(
        &mut ctx.accounts.position,
        reward_program_key,
        beneficiary,
        ctx.bumps.position,
    );

    ctx.accounts
        .reward_program
        .credit_stake(&mut ctx.accounts.position, amount, now)?;

    ctx.accounts.reward_program.exit(&crate::ID)?;
    ctx.accounts.position.exit(&crate::ID)?;

    token::transfer(
        CpiContext::new(
            ctx.accounts.token_program.to_account_info(),
            Transfer {
                from: ctx.accounts.funder_stake_account.to_account_info(),
                to: ctx.accounts.stake_vault.to_account_info(),
                authority: ctx.accounts.funder.to_account_info(),
            },
        ),
        amount,
    )?;

    ctx.accounts.reward_program.unlock();

    let reward_program = &ctx.accounts.reward_program;
    let position = &ctx.accounts.position;

    msg!(
        "Staked {} for {} (funded by {}). Holder shares: {}, total shares: {}",
        amount,
        beneficiary,
        funder,
        position.shares,
        reward_program.total_shares
    );

    emit!(Staked {
        reward_program: reward_program_key,
        holder: beneficiary,
        funder,
        amount,
        holder_shares: position.shares,
        total_shares: reward_program.total_shares,
        timestamp: now,
    });

    Ok(())
}
