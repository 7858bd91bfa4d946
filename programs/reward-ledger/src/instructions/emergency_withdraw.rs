use anchor_lang::prelude::*;
use anchor_spl::token::{self, Mint, Token, TokenAccount, Transfer};

use crate::constants::{POSITION_SEED, REWARD_PROGRAM_SEED, STAKE_VAULT_SEED};
use crate::error::LedgerError;
use crate::events::EmergencyWithdrawn;
use crate::state::{RewardProgram, StakePosition};

/// Exit at any time, forfeiting the reward
///
/// The position's weight leaves the ledger with it, so the forfeited reward
/// stays in the vault for the remaining holders.
///
#[derive(Accounts)]
pub struct EmergencyWithdraw<'info> {
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

    #[account(
        mut,
        seeds = [POSITION_SEED, reward_program.key().as_ref(), holder.key().as_ref()],
        bump = position.bump,
        constraint = position.holder == holder.key() @ LedgerError::InvalidAuthority
    )]
    pub position: Box<Account<'info, StakePosition>>,

    #[account(
        constraint = stake_mint.key() == reward_program.stake_mint @ LedgerError::InvalidStakeMint
    )]
    pub stake_mint: Box<Account<'info, Mint>>,

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

    pub token_program: Program<'info, Token>,
}

pub fn handler_emergency_withdraw(ctx: Context<EmergencyWithdraw>) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;

    ctx.accounts.reward_program.lock()?;

    let settlement = ctx
        .accounts
        .reward_program
        .settle_emergency_withdraw(&mut ctx.accounts.position, now)?;

    require!(
        ctx.accounts.stake_vault.amount >= settlement.principal,
        LedgerError::InsufficientBalance
    );

    ctx.accounts.reward_program.exit(&crate::ID)?;
    ctx.accounts.position.exit(&crate::ID)?;

    let stake_mint = ctx.accounts.reward_program.stake_mint;
    let reward_mint = ctx.accounts.reward_program.reward_mint;
    let ledger_id = ctx.accounts.reward_program.ledger_id.to_le_bytes();
    let seeds = &[
        REWARD_PROGRAM_SEED,
        stake_mint.as_ref(),
        reward_mint.as_ref(),
        ledger_id.as_ref(),
        &[ctx.accounts.reward_program.bump],
    ];
    let signer_seeds = &[&seeds[..]];

    token::transfer(
        CpiContext::new_with_signer(
            ctx.accounts.token_program.to_account_info(),
            Transfer {
                from: ctx.accounts.stake_vault.to_account_info(),
                to: ctx.accounts.holder_stake_account.to_account_info(),
                authority: ctx.accounts.reward_program.to_account_info(),
            },
            signer_seeds,
        ),
        settlement.principal,
    )?;

    ctx.accounts.reward_program.unlock();

    let reward_program = &ctx.accounts.reward_program;

    msg!(
        "Emergency withdrawal of {} principal, reward forfeited. Remaining shares: {}",
        settlement.principal,
        reward_program.total_shares
    );

    emit!(EmergencyWithdrawn {
        reward_program: reward_program.key(),
        holder: ctx.accounts.holder.key(),
        principal: settlement.principal,
        total_shares: reward_program.total_shares,
        timestamp: now,
    });

    Ok(())
}
