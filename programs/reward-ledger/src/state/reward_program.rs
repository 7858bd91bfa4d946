use anchor_lang::prelude::*;

use crate::error::LedgerError;
use crate::math;
use crate::state::StakePosition;

/// One reward program: a stake asset, a pre-funded reward vault and a fixed
/// maturity window.
/// PDA: ["reward_program", stake_mint, reward_mint, ledger_id]
#[account]
#[derive(Default)]
pub struct RewardProgram {
    /// Creator of the program (informational, no privileges)
    pub authority: Pubkey,

    /// Mint of the staked asset (LP token)
    pub stake_mint: Pubkey,

    /// Mint of the reward asset
    pub reward_mint: Pubkey,

    /// Vault holding staked principal
    /// PDA: ["stake_vault", reward_program]
    pub stake_vault: Pubkey,

    /// Vault holding the funded reward balance
    /// PDA: ["reward_vault", reward_program]
    pub reward_vault: Pubkey,

    /// Distinguishes programs sharing the same asset pair
    pub ledger_id: u64,

    /// Program start (unix seconds)
    pub created_at: i64,

    /// Maturity window in seconds
    pub duration: i64,

    /// Early-bird bonus constant, percent of the base accrual rate
    pub bonus_constant: u64,

    /// Shares outstanding across all positions
    pub total_shares: u64,

    /// Principal held across all positions
    pub total_principal: u64,

    /// Sum of all live position weights as of last_update
    pub total_weight: u128,

    /// Weight-per-share accumulator as of last_update
    pub weight_per_share: u128,

    /// Last time the accumulator was moved
    pub last_update: i64,

    /// Positions currently holding shares
    pub holder_count: u64,

    /// Rewards paid out (lifetime)
    pub total_rewards_paid: u64,

    /// Positions closed through emergency_withdraw (lifetime)
    pub emergency_exits: u64,

    /// Set while an instruction is between its effects and its transfers
    pub locked: bool,

    /// PDA bump seed
    pub bump: u8,

    /// Stake vault bump seed
    pub stake_vault_bump: u8,

    /// Reward vault bump seed
    pub reward_vault_bump: u8,
}

/// Outcome of closing a position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitSettlement {
    pub shares: u64,
    pub principal: u64,
    pub reward: u64,
}

impl RewardProgram {
    /// Account size for allocation
    pub const SIZE: usize = 8 + // discriminator
        32 + // authority
        32 + // stake_mint
        32 + // reward_mint
        32 + // stake_vault
        32 + // reward_vault
        8 +  // ledger_id
        8 +  // created_at
        8 +  // duration
        8 +  // bonus_constant
        8 +  // total_shares
        8 +  // total_principal
        16 + // total_weight (u128)
        16 + // weight_per_share (u128)
        8 +  // last_update
        8 +  // holder_count
        8 +  // total_rewards_paid
        8 +  // emergency_exits
        1 +  // locked
        1 +  // bump
        1 +  // stake_vault_bump
        1 +  // reward_vault_bump
        64;  // padding for future fields

    pub fn maturity(&self) -> Result<i64> {
        let maturity = self
            .created_at
            .checked_add(self.duration)
            .ok_or(LedgerError::MathOverflow)?;
        Ok(maturity)
    }

    pub fn has_matured(&self, now: i64) -> Result<bool> {
        Ok(now >= self.maturity()?)
    }

    pub fn elapsed(&self, now: i64) -> u64 {
        math::clamped_elapsed(self.created_at, self.duration, now)
    }

    /// Accumulator value at `now`; never moves backwards
    pub fn current_weight_per_share(&self, now: i64) -> Result<u128> {
        let acc = math::weight_per_share(
            self.elapsed(now),
            self.duration as u64,
            self.bonus_constant,
        )?;
        Ok(acc.max(self.weight_per_share))
    }

    /// total_weight as it would read after accumulating up to `acc`
    fn total_weight_at(&self, acc: u128) -> Result<u128> {
        let delta = acc
            .checked_sub(self.weight_per_share)
            .ok_or(LedgerError::MathUnderflow)?;

        let added = (self.total_shares as u128)
            .checked_mul(delta)
            .ok_or(LedgerError::MathOverflow)?;

        let total = self
            .total_weight
            .checked_add(added)
            .ok_or(LedgerError::MathOverflow)?;

        Ok(total)
    }

    /// Move the global accumulator to `now`
    pub fn accumulate(&mut self, now: i64) -> Result<u128> {
        let acc = self.current_weight_per_share(now)?;
        self.total_weight = self.total_weight_at(acc)?;
        self.weight_per_share = acc;
        self.last_update = now;
        Ok(acc)
    }

    /// Credit `amount` shares and principal to `position`
    pub fn credit_stake(
        &mut self,
        position: &mut StakePosition,
        amount: u64,
        now: i64,
    ) -> Result<()> {
        require!(amount > 0, LedgerError::InvalidAmount);

        let acc = self.accumulate(now)?;
        position.settle(acc)?;

        if !position.is_active() {
            self.holder_count = self
                .holder_count
                .checked_add(1)
                .ok_or(LedgerError::MathOverflow)?;
        }

        position.record_stake(amount, now)?;

        self.total_shares = self
            .total_shares
            .checked_add(amount)
            .ok_or(LedgerError::MathOverflow)?;

        self.total_principal = self
            .total_principal
            .checked_add(amount)
            .ok_or(LedgerError::MathOverflow)?;

        Ok(())
    }

    /// Reward owed for `shares` of `position` if it exited at `now`
    pub fn quote_reward(
        &self,
        position: &StakePosition,
        shares: u64,
        reward_balance: u64,
        now: i64,
    ) -> Result<u64> {
        require!(shares <= position.shares, LedgerError::InsufficientShares);

        if shares == 0 || self.total_shares == 0 {
            return Ok(0);
        }

        // Sole holder asking for everything: no rounding remainder left behind
        if shares == self.total_shares {
            return Ok(reward_balance);
        }

        let acc = self.current_weight_per_share(now)?;
        let total_weight = self.total_weight_at(acc)?;
        let position_weight = position.live_weight(acc)?;

        let weight = if shares == position.shares {
            position_weight
        } else {
            math::mul_div(position_weight, shares as u128, position.shares as u128)?
        };

        math::proportional_reward(reward_balance, weight, total_weight, shares, self.total_shares)
    }

    /// Close `position` after maturity and compute its payout
    pub fn settle_unstake(
        &mut self,
        position: &mut StakePosition,
        reward_balance: u64,
        now: i64,
    ) -> Result<ExitSettlement> {
        require!(self.has_matured(now)?, LedgerError::ProgramNotMatured);
        self.settle_exit(position, reward_balance, now, false)
    }

    /// Close `position` at any time, forfeiting its reward
    pub fn settle_emergency_withdraw(
        &mut self,
        position: &mut StakePosition,
        now: i64,
    ) -> Result<ExitSettlement> {
        let settlement = self.settle_exit(position, 0, now, true)?;

        self.emergency_exits = self
            .emergency_exits
            .checked_add(1)
            .ok_or(LedgerError::MathOverflow)?;

        Ok(settlement)
    }

    fn settle_exit(
        &mut self,
        position: &mut StakePosition,
        reward_balance: u64,
        now: i64,
        forfeit: bool,
    ) -> Result<ExitSettlement> {
        require!(position.is_active(), LedgerError::NothingStaked);

        let acc = self.accumulate(now)?;
        position.settle(acc)?;

        let shares = position.shares;
        let principal = position.principal;
        let weight = position.accrued_weight;

        let reward = if forfeit {
            0
        } else if shares == self.total_shares {
            // Last holder out flushes the rounding remainder
            reward_balance
        } else {
            math::proportional_reward(
                reward_balance,
                weight,
                self.total_weight,
                shares,
                self.total_shares,
            )?
        };

        self.total_shares = self
            .total_shares
            .checked_sub(shares)
            .ok_or(LedgerError::MathUnderflow)?;

        self.total_principal = self
            .total_principal
            .checked_sub(principal)
            .ok_or(LedgerError::MathUnderflow)?;

        self.total_weight = self
            .total_weight
            .checked_sub(weight)
            .ok_or(LedgerError::MathUnderflow)?;

        self.holder_count = self
            .holder_count
            .checked_sub(1)
            .ok_or(LedgerError::MathUnderflow)?;

        self.total_rewards_paid = self
            .total_rewards_paid
            .checked_add(reward)
            .ok_or(LedgerError::MathOverflow)?;

        position.record_exit(reward)?;

        Ok(ExitSettlement {
            shares,
            principal,
            reward,
        })
    }

    /// Early-bird bonus for `amount` at `now`
    pub fn reward_bonus(&self, amount: u64, now: i64) -> Result<u64> {
        math::reward_bonus(
            amount,
            self.elapsed(now),
            self.duration as u64,
            self.bonus_constant,
        )
    }

    pub fn lock(&mut self) -> Result<()> {
        require!(!self.locked, LedgerError::Reentrancy);
        self.locked = true;
        Ok(())
    }

    pub fn unlock(&mut self) {
        self.locked = false;
    }
}
