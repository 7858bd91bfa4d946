use anchor_lang::prelude::*;

pub mod amm;
pub mod constants;
pub mod error;
pub mod events;
pub mod instructions;
pub mod state;

use instructions::*;

declare_id!("DUWZ26psPFDEC1h1LNwqVVW1nCqjgbkLioURLiBi8kK5");

#[program]
pub mod deposit_orchestrator {
    use super::*;

    /// Create the orchestrator for a (SOL, base token) pool
    ///
    /// # Accounts
    /// * `owner` - Permanent owner (signer, payer)
    /// * `config` - Config PDA to create
    /// * `lp_custody` / `token_custody` - Pass-through custody accounts
    /// * `reward_program` - Initial stake target
    /// * `amm_program` / `amm_pool` - Router and the pair it derives
    ///
    pub fn initialize(ctx: Context<Initialize>) -> Result<()> {
        instructions::initialize::handler_initialize(ctx)
    }

    /// Deposit SOL; half is swapped, the rest paired, the LP staked for the depositor
    ///
    /// # Arguments
    /// * `ctx` - Context containing all required accounts
    /// * `amount` - Lamports to deposit
    /// * `min_lp_out` - Minimum LP minted
    /// * `deadline` - Router deadline (unix seconds)
    ///
    pub fn deposit(ctx: Context<Deposit>, amount: u64, min_lp_out: u64, deadline: i64) -> Result<()> {
        instructions::deposit::handler_deposit(ctx, amount, min_lp_out, deadline)
    }

    /// Deposit SOL and base tokens together without a swap
    ///
    /// # Arguments
    /// * `ctx` - Context containing all required accounts
    /// * `amount` - Lamports to deposit
    /// * `token_amount` - Base tokens to deposit
    /// * `min_lp_out` - Minimum LP minted
    /// * `deadline` - Router deadline (unix seconds)
    ///
    pub fn deposit_native_and_token(
        ctx: Context<Deposit>,
        amount: u64,
        token_amount: u64,
        min_lp_out: u64,
        deadline: i64,
    ) -> Result<()> {
        instructions::deposit::handler_deposit_native_and_token(
            ctx,
            amount,
            token_amount,
            min_lp_out,
            deadline,
        )
    }

    /// Set the burned cut of minted LP, 1-10 percent (owner only)
    pub fn update_burn_percent(ctx: Context<UpdateConfig>, burn_percent: u8) -> Result<()> {
        instructions::admin::update_burn_percent(ctx, burn_percent)
    }

    /// Turn LP burning on or off (owner only)
    pub fn update_burn_status(ctx: Context<UpdateConfig>, enabled: bool) -> Result<()> {
        instructions::admin::update_burn_status(ctx, enabled)
    }

    /// Point future deposits at another reward program (owner only)
    pub fn change_stake_address(ctx: Context<ChangeStakeAddress>) -> Result<()> {
        instructions::admin::change_stake_address(ctx)
    }

    pub fn stake_address(ctx: Context<ConfigView>) -> Result<Pubkey> {
        instructions::views::stake_address(ctx)
    }
}
