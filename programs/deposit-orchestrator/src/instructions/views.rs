use anchor_lang::prelude::*;

use crate::constants::CONFIG_SEED;
use crate::state::OrchestratorConfig;

#[derive(Accounts)]
pub struct ConfigView<'info> {
    #[account(
        seeds = [CONFIG_SEED, config.lp_mint.as_ref()],
        bump = config.bump
    )]
    pub config: Account<'info, OrchestratorConfig>,
}

/// Reward program currently receiving staked LP
pub fn stake_address(ctx: Context<ConfigView>) -> Result<Pubkey> {
    Ok(ctx.accounts.config.stake_address)
}
