use anchor_lang::prelude::*;
use anchor_spl::token::{self, Mint, Token, TokenAccount, Transfer};

use crate::constants::{REWARD_PROGRAM_SEED, REWARD_VAULT_SEED};
use crate::error::LedgerError;
use crate::events::RewardsFunded;
use crate::state::RewardProgram;

/// Top up the reward vault. Open to anyone.
///
/// A plain token transfer into the vault has the same effect; this entry
/// point only adds the event.
///
#[derive(Accounts)]
pub struct FundRewards<'info> {
    pub funder: Signer<'info>,

    #[account(
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
        constraint = reward_mint.key() == reward_program.reward_mint @ LedgerError::InvalidRewardMint
    )]
    pub reward_mint: Box<Account<'info, Mint>>,

    /// Funder's reward token account
    #[account(
        mut,
        token::mint = reward_mint,
        token::authority = funder
    )]
    pub funder_reward_account: Box<Account<'info, TokenAccount>>,

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

pub fn handler_fund_rewards(ctx: Context<FundRewards>, amount: u64) -> Result<()> {
    require!(amount > 0, LedgerError::InvalidAmount);
    require!(
        ctx.accounts.funder_reward_account.amount >= amount,
        LedgerError::InsufficientBalance
    );

    token::transfer(
        CpiContext::new(
            ctx.accounts.token_program.to_account_info(),
            Transfer {
                from: ctx.accounts.funder_reward_account.to_account_info(),
                to: ctx.accounts.reward_vault.to_account_info(),
                authority: ctx.accounts.funder.to_account_info(),
            },
        ),
        amount,
    )?;

    ctx.accounts.reward_vault.reload()?;
    let reward_balance = ctx.accounts.reward_vault.amount;

    msg!("Funded {} reward tokens. Vault balance: {}", amount, reward_balance);

    emit!(RewardsFunded {
        reward_program: ctx.accounts.reward_program.key(),
        funder: ctx.accounts.funder.key(),
        amount,
        reward_balance,
        timestamp: Clock::get()?.unix_timestamp,
    });

    Ok(())
}
