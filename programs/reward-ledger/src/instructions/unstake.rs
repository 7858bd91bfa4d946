use anchor_lang::prelude::*;
use anchor_spl::token::{self, Mint, Token, TokenAccount, Transfer};

use crate::constants::{POSITION_SEED, REWARD_PROGRAM_SEED, REWARD_VAULT_SEED, STAKE_VAULT_SEED};
use crate::error::LedgerError;
use crate::events::Unstaked;
use crate::state::{RewardProgram, StakePosition};

/// Exit the whole position after maturity
///
/// # Flow
/// 1. Require maturity and a non-empty position, take the lock
/// 2. Settle weight, compute the reward share of the vault balance
/// 3. Zero the position, decrease totals, persist state
/// 4. Return principal 1:1 and pay the reward
///
/// The last holder out receives the entire remaining reward balance.
///
#[derive(Accounts)]
pub struct Unstake<'info> {
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
        constraint = reward_mint.key() == reward_program.reward_mint @ LedgerError::InvalidRewardMint
    )]
    pub reward_mint: Box<Account<'info, Mint>>,

    /// Receives the principal
    #[account(
        mut,
        token::mint = stake_mint,
        token::authority = holder
    )]
    pub holder_stake_account: Box<Account<'info, TokenAccount>>,

    /// Receives the reward
    #[account(
        mut,
        token::mint = reward_mint,
        token::authority = holder
    )]
    pub holder_reward_account: Box<Account<'info, TokenAccount>>,

    #[account(
        mut,
        seeds = [STAKE_VAULT_SEED, reward_program.key().as_ref()],
        bump = reward_program.stake_vault_bump,
        token::mint = stake_mint,
        token::authority = reward_program
    )]
    pub stake_vault: Box<Account<'info, TokenAccount>>,

    #[account(
        mut,
        seeds = [REWARD_VAULT_SEED, reward_program.key().as_ref()],
        bump = reward_program.reward_vault_bump,
        token::mint = reward_mint,
        token::authority = reward_program
    )]
    pub reward_vault: Box<Account<'info, TokenAccount>>,

    pub token_program: Program<'info, Token>,
}

pub fn handler_unstake(ctx: Context<Unstake>) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let reward_balance = ctx.accounts.reward_vault.amount;

    ctx.accounts.reward_program.lock()?;

    let settlement = ctx.accounts.reward_program.settle_unstake(
        &mut ctx.accounts.position,
        reward_balance,
        now,
    )?;

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

    if settlement.reward > 0 {
        token::transfer(
            CpiContext::new_with_signer(
                ctx.accounts.token_program.to_account_info(),
                Transfer {
                    from: ctx.accounts.reward_vault.to_account_info(),
                    to: ctx.accounts.holder_reward_account.to_account_info(),
                    authority: ctx.accounts.reward_program.to_account_info(),
                },
                signer_seeds,
            ),
            settlement.reward,
        )?;
    }

    ctx.accounts.reward_program.unlock();

    let reward_program = &ctx.accounts.reward_program;

    msg!(
        "Unstaked {} principal, paid {} reward. Remaining shares: {}, holders: {}",
        settlement.principal,
        settlement.reward,
        reward_program.total_shares,
        reward_program.holder_count
    );

    emit!(Unstaked {
        reward_program: reward_program.key(),
        holder: ctx.accounts.holder.key(),
        principal: settlement.principal,
        reward: settlement.reward,
        total_shares: reward_program.total_shares,
        timestamp: now,
    });

    Ok(())
}
