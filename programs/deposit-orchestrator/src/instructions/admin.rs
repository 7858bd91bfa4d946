use anchor_lang::prelude::*;
use reward_ledger::state::RewardProgram;

use crate::constants::CONFIG_SEED;
use crate::error::OrchestratorError;
use crate::events::{BurnPercentUpdated, BurnStatusUpdated, StakeAddressChanged};
use crate::state::OrchestratorConfig;

// =============================================================================
// Update Burn Percent / Burn Status
// =============================================================================

#[derive(Accounts)]
pub struct UpdateConfig<'info> {
    #[account(
        constraint = owner.key() == config.owner @ OrchestratorError::Unauthorized
    )]
    pub owner: Signer<'info>,

    #[account(
        mut,
        seeds = [CONFIG_SEED, config.lp_mint.as_ref()],
        bump = config.bump,
        constraint = !config.locked @ OrchestratorError::Reentrancy
    )]
    pub config: Account<'info, OrchestratorConfig>,
}

pub fn update_burn_percent(ctx: Context<UpdateConfig>, burn_percent: u8) -> Result<()> {
    OrchestratorConfig::validate_burn_percent(burn_percent)?;

    let config = &mut ctx.accounts.config;
    let old_percent = config.burn_percent;
    config.burn_percent = burn_percent;

    msg!("Burn percent updated from {} to {}", old_percent, burn_percent);

    emit!(BurnPercentUpdated {
        config: config.key(),
        old_percent,
        new_percent: burn_percent,
    });

    Ok(())
}

pub fn update_burn_status(ctx: Context<UpdateConfig>, enabled: bool) -> Result<()> {
    let config = &mut ctx.accounts.config;
    config.burn_enabled = enabled;

    msg!(
        "LP burn {} ({}%)",
        if enabled { "ENABLED" } else { "DISABLED" },
        config.burn_percent
    );

    emit!(BurnStatusUpdated {
        config: config.key(),
        enabled,
    });

    Ok(())
}

// =============================================================================
// Change Stake Address
// =============================================================================

/// Re-point future deposits at another reward program.
/// Positions already held in the old program stay there.
#[derive(Accounts)]
pub struct ChangeStakeAddress<'info> {
    #[account(
        constraint = owner.key() == config.owner @ OrchestratorError::Unauthorized
    )]
    pub owner: Signer<'info>,

    #[account(
        mut,
        seeds = [CONFIG_SEED, config.lp_mint.as_ref()],
        bump = config.bump,
        constraint = !config.locked @ OrchestratorError::Reentrancy
    )]
    pub config: Account<'info, OrchestratorConfig>,

    #[account(
        constraint = new_reward_program.stake_mint == config.lp_mint @ OrchestratorError::LedgerAssetMismatch,
        constraint = new_reward_program.reward_mint == config.base_mint @ OrchestratorError::LedgerAssetMismatch
    )]
    pub new_reward_program: Box<Account<'info, RewardProgram>>,
}

pub fn change_stake_address(ctx: Context<ChangeStakeAddress>) -> Result<()> {
    let new_stake_address = ctx.accounts.new_reward_program.key();
    let config = &mut ctx.accounts.config;
    let old_stake_address = config.stake_address;
    config.stake_address = new_stake_address;

    msg!(
        "Stake address changed from {} to {}",
        old_stake_address,
        new_stake_address
    );

    emit!(StakeAddressChanged {
        config: config.key(),
        old_stake_address,
        new_stake_address,
    });

    Ok(())
}
