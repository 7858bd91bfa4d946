use anchor_lang::prelude::*;

use crate::error::LedgerError;

/// Per-holder staking position
/// PDA: ["position", reward_program, holder]
#[account]
#[derive(Default)]
pub struct StakePosition {
    /// The reward program this position belongs to
    pub reward_program: Pubkey,

    /// Wallet credited with these shares
    pub holder: Pubkey,

    /// Ledger shares held (1:1 with staked principal)
    pub shares: u64,

    /// Stake tokens held in the stake vault for this holder
    pub principal: u64,

    /// Weight-per-share snapshot at the last settle.
    /// Only share-time after this snapshot is still unaccounted.
    pub reward_debt: u128,

    /// Weight settled into this position so far
    pub accrued_weight: u128,

    /// Timestamp of first stake into the current position
    pub first_stake_time: i64,

    /// Timestamp of last stake action
    pub last_stake_time: i64,

    /// Total rewards paid out (lifetime)
    pub rewards_claimed: u64,

    /// PDA bump seed
    pub bump: u8,
}

impl StakePosition {
    /// Account size for allocation
    pub const SIZE: usize = 8 + // discriminator
        32 + // reward_program
        32 + // holder
        8 +  // shares
        8 +  // principal
        16 + // reward_debt (u128)
        16 + // accrued_weight (u128)
        8 +  // first_stake_time
        8 +  // last_stake_time
        8 +  // rewards_claimed
        1 +  // bump
        32;  // padding for future fields

    pub fn is_active(&self) -> bool {
        self.shares > 0
    }

    /// Weight including share-time not yet settled
    pub fn live_weight(&self, weight_per_share: u128) -> Result<u128> {
        let delta = weight_per_share
            .checked_sub(self.reward_debt)
            .ok_or(LedgerError::MathUnderflow)?;

        let pending = (self.shares as u128)
            .checked_mul(delta)
            .ok_or(LedgerError::MathOverflow)?;

        let weight = self
            .accrued_weight
            .checked_add(pending)
            .ok_or(LedgerError::MathOverflow)?;

        Ok(weight)
    }

    /// Fold pending share-time into accrued_weight and move the snapshot
    pub fn settle(&mut self, weight_per_share: u128) -> Result<()> {
        self.accrued_weight = self.live_weight(weight_per_share)?;
        self.reward_debt = weight_per_share;
        Ok(())
    }

    /// Record a stake. Caller settles first so new shares earn nothing retroactively.
    pub fn record_stake(&mut self, amount: u64, now: i64) -> Result<()> {
        if self.shares == 0 {
            self.first_stake_time = now;
        }

        self.shares = self
            .shares
            .checked_add(amount)
            .ok_or(LedgerError::MathOverflow)?;

        self.principal = self
            .principal
            .checked_add(amount)
            .ok_or(LedgerError::MathOverflow)?;

        self.last_stake_time = now;

        Ok(())
    }

    /// Zero the position; reward_debt is kept so a later stake resumes from it
    pub fn record_exit(&mut self, reward: u64) -> Result<()> {
        self.rewards_claimed = self
            .rewards_claimed
            .checked_add(reward)
            .ok_or(LedgerError::MathOverflow)?;

        self.shares = 0;
        self.principal = 0;
        self.accrued_weight = 0;

        Ok(())
    }
}
