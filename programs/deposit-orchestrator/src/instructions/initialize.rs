use anchor_lang::prelude::*;
use anchor_spl::token::{spl_token, Mint, Token, TokenAccount};
use reward_ledger::state::RewardProgram;

use crate::amm;
use crate::constants::{CONFIG_SEED, DEFAULT_BURN_PERCENT, LP_CUSTODY_SEED, TOKEN_CUSTODY_SEED};
use crate::error::OrchestratorError;
use crate::events::OrchestratorInitialized;
use crate::state::OrchestratorConfig;

/// Create the orchestrator for one (SOL, base token) pool
///
/// # Accounts
/// * `owner` - Becomes the permanent owner (signer, payer)
/// * `config` - Config PDA to create
/// * `native_mint` - Must be the wrapped SOL mint
/// * `base_mint` - Project token
/// * `lp_mint` - LP mint of the pool
/// * `amm_pool` - Must be the router's pair address for the two mints
/// * `reward_program` - Initial stake target; stakes `lp_mint`, rewards `base_mint`
///
#[derive(Accounts)]
pub struct Initialize<'info> {
    #[account(mut)]
    pub owner: Signer<'info>,

    #[account(
        init,
        payer = owner,
        space = 8 + OrchestratorConfig::INIT_SPACE,
        seeds = [CONFIG_SEED, lp_mint.key().as_ref()],
        bump
    )]
    pub config: Box<Account<'info, OrchestratorConfig>>,

    #[account(
        address = spl_token::native_mint::ID @ OrchestratorError::InvalidNativeMint
    )]
    pub native_mint: Box<Account<'info, Mint>>,

    pub base_mint: Box<Account<'info, Mint>>,

    pub lp_mint: Box<Account<'info, Mint>>,

    #[account(
        init,
        payer = owner,
        seeds = [LP_CUSTODY_SEED, config.key().as_ref()],
        bump,
        token::mint = lp_mint,
        token::authority = config
    )]
    pub lp_custody: Box<Account<'info, TokenAccount>>,

    #[account(
        init,
        payer = owner,
        seeds = [TOKEN_CUSTODY_SEED, config.key().as_ref()],
        bump,
        token::mint = base_mint,
        token::authority = config
    )]
    pub token_custody: Box<Account<'info, TokenAccount>>,

    /// Reward ledger the staked LP goes to
    #[account(
        constraint = reward_program.stake_mint == lp_mint.key() @ OrchestratorError::LedgerAssetMismatch,
        constraint = reward_program.reward_mint == base_mint.key() @ OrchestratorError::LedgerAssetMismatch
    )]
    pub reward_program: Box<Account<'info, RewardProgram>>,

    /// CHECK: Executable check only; the router validates its own accounts
    #[account(executable)]
    pub amm_program: UncheckedAccount<'info>,

    /// CHECK: Address checked against the pair derivation in the handler
    pub amm_pool: UncheckedAccount<'info>,

    pub system_program: Program<'info, System>,
    pub token_program: Program<'info, Token>,
}

pub fn handler_initialize(ctx: Context<Initialize>) -> Result<()> {
    let expected_pool = amm::pool_address(
        ctx.accounts.amm_program.key,
        ctx.accounts.native_mint.key(),
        ctx.accounts.base_mint.key(),
    );
    require_keys_eq!(
        ctx.accounts.amm_pool.key(),
        expected_pool,
        OrchestratorError::InvalidAmmPool
    );

    let config = &mut ctx.accounts.config;

    config.owner = ctx.accounts.owner.key();
    config.stake_address = ctx.accounts.reward_program.key();
    config.burn_percent = DEFAULT_BURN_PERCENT;
    config.burn_enabled = false;

    config.native_mint = ctx.accounts.native_mint.key();
    config.base_mint = ctx.accounts.base_mint.key();
    config.lp_mint = ctx.accounts.lp_mint.key();
    config.amm_program = ctx.accounts.amm_program.key();
    config.amm_pool = expected_pool;
    config.lp_custody = ctx.accounts.lp_custody.key();
    config.token_custody = ctx.accounts.token_custody.key();

    config.deposit_count = 0;
    config.total_native_deposited = 0;
    config.total_lp_burned = 0;
    config.total_lp_staked = 0;
    config.locked = false;

    config.bump = ctx.bumps.config;
    config.lp_custody_bump = ctx.bumps.lp_custody;
    config.token_custody_bump = ctx.bumps.token_custody;

    msg!(
        "Orchestrator initialized: lp_mint={}, base_mint={}, amm_pool={}",
        config.lp_mint,
        config.base_mint,
        config.amm_pool
    );
    msg!("Staking into {}", config.stake_address);

    emit!(OrchestratorInitialized {
        config: config.key(),
        owner: config.owner,
        lp_mint: config.lp_mint,
        base_mint: config.base_mint,
        amm_pool: config.amm_pool,
        stake_address: config.stake_address,
        timestamp: Clock::get()?.unix_timestamp,
    });

    Ok(())
}
