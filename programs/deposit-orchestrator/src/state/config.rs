// =============================================================================
// Orchestrator Config Account
// =============================================================================
// One config per LP mint. It owns the custody accounts the deposit flow
// passes tokens through, and points at the reward program that receives
// the staked share of every deposit.
// =============================================================================

use anchor_lang::prelude::*;

use crate::constants::{MAX_BURN_PERCENT, MIN_BURN_PERCENT, PERCENT_DENOMINATOR};
use crate::error::OrchestratorError;

/// PDA: ["orchestrator", lp_mint]
#[account]
#[derive(InitSpace, Default)]
pub struct OrchestratorConfig {
    // =========================================================================
    // Authority & Targets
    // =========================================================================

    /// Fixed at initialization, no transfer
    pub owner: Pubkey,

    /// Reward program receiving the staked LP
    pub stake_address: Pubkey,

    // =========================================================================
    // Burn Split
    // =========================================================================

    /// Percent of minted LP burned when burning is enabled (1-10)
    pub burn_percent: u8,

    /// Off by default; while off every LP token is staked
    pub burn_enabled: bool,

    // =========================================================================
    // Assets & Collaborators
    // =========================================================================

    /// Wrapped SOL mint
    pub native_mint: Pubkey,

    /// Project token paired with SOL in the AMM pool
    pub base_mint: Pubkey,

    /// LP mint of the (native, base) pool
    pub lp_mint: Pubkey,

    /// AMM router program
    pub amm_program: Pubkey,

    /// Pair address derived from the two mints
    pub amm_pool: Pubkey,

    pub lp_custody: Pubkey,
    pub token_custody: Pubkey,

    // =========================================================================
    // Statistics
    // =========================================================================

    pub deposit_count: u64,
    pub total_native_deposited: u64,
    pub total_lp_burned: u64,
    pub total_lp_staked: u64,

    // =========================================================================
    // Guard & Bumps
    // =========================================================================

    /// Set while a deposit is in flight
    pub locked: bool,

    pub bump: u8,
    pub lp_custody_bump: u8,
    pub token_custody_bump: u8,
}

/// LP split of one deposit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LpSplit {
    pub burn: u64,
    pub stake: u64,
}

impl OrchestratorConfig {
    pub fn validate_burn_percent(percent: u8) -> Result<()> {
        require!(
            (MIN_BURN_PERCENT..=MAX_BURN_PERCENT).contains(&percent),
            OrchestratorError::InvalidBurnPercent
        );
        Ok(())
    }

    /// Split minted LP into the burned and staked parts
    ///
    /// burn = floor(lp * burn_percent / 100) when burning is enabled, else 0.
    /// The remainder is staked, so burn + stake == lp always holds.
    pub fn split_lp(&self, lp_amount: u64) -> Result<LpSplit> {
        let burn = if self.burn_enabled {
            let burn = (lp_amount as u128)
                .checked_mul(self.burn_percent as u128)
                .ok_or(OrchestratorError::MathOverflow)?
                .checked_div(PERCENT_DENOMINATOR as u128)
                .ok_or(OrchestratorError::DivisionByZero)?;
            burn as u64
        } else {
            0
        };

        let stake = lp_amount
            .checked_sub(burn)
            .ok_or(OrchestratorError::MathUnderflow)?;

        Ok(LpSplit { burn, stake })
    }

    /// Split everything the LP custody holds once add-liquidity returns
    ///
    /// The custody is an ordinary token account and anyone can send LP to
    /// it. Any such balance is burned or staked along with `minted`, so
    /// the custody always ends the deposit empty.
    pub fn split_custody_lp(&self, custody_balance: u64, minted: u64) -> Result<LpSplit> {
        require!(custody_balance >= minted, OrchestratorError::MathUnderflow);
        self.split_lp(custody_balance)
    }

    /// Fold one completed deposit into the statistics
    pub fn record_deposit(&mut self, native_amount: u64, split: LpSplit) -> Result<()> {
        self.deposit_count = self
            .deposit_count
            .checked_add(1)
            .ok_or(OrchestratorError::MathOverflow)?;

        self.total_native_deposited = self
            .total_native_deposited
            .checked_add(native_amount)
            .ok_or(OrchestratorError::MathOverflow)?;

        self.total_lp_burned = self
            .total_lp_burned
            .checked_add(split.burn)
            .ok_or(OrchestratorError::MathOverflow)?;

        self.total_lp_staked = self
            .total_lp_staked
            .checked_add(split.stake)
            .ok_or(OrchestratorError::MathOverflow)?;

        Ok(())
    }

    pub fn lock(&mut self) -> Result<()> {
        require!(!self.locked, OrchestratorError::Reentrancy);
        self.locked = true;
        Ok(())
    }

    pub fn unlock(&mut self) {
        self.locked = false;
    }
}
