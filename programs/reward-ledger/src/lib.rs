use anchor_lang::prelude::*;

pub mod constants;
pub mod error;
pub mod events;
pub mod instructions;
pub mod math;
pub mod state;

use instructions::*;

declare_id!("C7e7gnFor9PQ2vdD6BymVSmJVYyADpecAD7gdgxQHsyZ");

#[program]
pub mod reward_ledger {
    use super::*;

    /// Create a reward program over a (stake mint, reward mint) pair
    ///
    /// # Arguments
    /// * `ctx` - Context containing all required accounts
    /// * `ledger_id` - Distinguishes programs over the same pair
    /// * `duration` - Seconds until maturity
    /// * `bonus_constant` - Early-bird bonus, percent of the base rate
    ///
    /// # Accounts
    /// * `authority` - Creator (signer, payer)
    /// * `reward_program` - Reward program PDA to create
    /// * `stake_mint` - Staked asset (LP token)
    /// * `reward_mint` - Reward asset
    /// * `stake_vault` - Vault to hold staked principal
    /// * `reward_vault` - Vault to hold the reward balance
    ///
    pub fn initialize(
        ctx: Context<Initialize>,
        ledger_id: u64,
        duration: i64,
        bonus_constant: u64,
    ) -> Result<()> {
        instructions::initialize::handler_initialize(ctx, ledger_id, duration, bonus_constant)
    }

    /// Top up the reward vault
    ///
    /// # Arguments
    /// * `ctx` - Context containing all required accounts
    /// * `amount` - Reward tokens to add
    ///
    pub fn fund_rewards(ctx: Context<FundRewards>, amount: u64) -> Result<()> {
        instructions::fund_rewards::handler_fund_rewards(ctx, amount)
    }

    /// Stake tokens, credited 1:1 as shares
    ///
    /// # Arguments
    /// * `ctx` - Context containing all required accounts
    /// * `amount` - Amount of stake tokens
    ///
    pub fn stake(ctx: Context<Stake>, amount: u64) -> Result<()> {
        instructions::stake::handler_stake(ctx, amount)
    }

    /// Stake tokens from a signing funder on behalf of a beneficiary
    ///
    /// # Arguments
    /// * `ctx` - Context containing all required accounts
    /// * `amount` - Amount of stake tokens
    ///
    pub fn stake_for(ctx: Context<StakeFor>, amount: u64) -> Result<()> {
        instructions::stake_for::handler_stake_for(ctx, amount)
    }

    /// Exit the whole position after maturity with principal and reward
    pub fn unstake(ctx: Context<Unstake>) -> Result<()> {
        instructions::unstake::handler_unstake(ctx)
    }

    /// Exit at any time with principal only
    pub fn emergency_withdraw(ctx: Context<EmergencyWithdraw>) -> Result<()> {
        instructions::emergency_withdraw::handler_emergency_withdraw(ctx)
    }

    /// Reward `shares` of a position would receive on exit now
    pub fn calculate_reward_by_share(
        ctx: Context<PositionRewardView>,
        shares: u64,
    ) -> Result<u64> {
        instructions::views::calculate_reward_by_share(ctx, shares)
    }

    /// Early-bird bonus for staking `amount` now
    pub fn calculate_reward_bonus(ctx: Context<LedgerView>, amount: u64) -> Result<u64> {
        instructions::views::calculate_reward_bonus(ctx, amount)
    }

    /// Shares held by `holder`
    pub fn balance_of(ctx: Context<BalanceView>, holder: Pubkey) -> Result<u64> {
        instructions::views::balance_of(ctx, holder)
    }

    /// Shares outstanding
    pub fn total_supply(ctx: Context<LedgerView>) -> Result<u64> {
        instructions::views::total_supply(ctx)
    }

    pub fn stake_asset(ctx: Context<LedgerView>) -> Result<Pubkey> {
        instructions::views::stake_asset(ctx)
    }

    pub fn reward_asset(ctx: Context<LedgerView>) -> Result<Pubkey> {
        instructions::views::reward_asset(ctx)
    }
}
