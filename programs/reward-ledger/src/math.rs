//! Pure reward math, free of account and clock access.
//!
//! Accrual model: a share held at elapsed time `x` (seconds since program
//! start, clamped to `[0, D]`) accrues weight at rate
//! `BONUS_SCALE + K * (1 - x / D)`. The weight-per-share accumulator is the
//! integral of that rate from program start:
//!
//! ```text
//! W(x) = ((BONUS_SCALE + K) * 2D * x - K * x^2) / 2D
//! ```
//!
//! `W` is strictly increasing on `[0, D]` and flat afterwards, so nothing
//! accrues past maturity. Every holder weight and the ledger total are built
//! from the same `W` values, which keeps `sum(holder weights) == total_weight`
//! exact in integer arithmetic.

use anchor_lang::prelude::*;
use primitive_types::U256;

use crate::constants::BONUS_SCALE;
use crate::error::LedgerError;

/// Seconds since `created_at`, clamped to `[0, duration]`.
pub fn clamped_elapsed(created_at: i64, duration: i64, now: i64) -> u64 {
    let elapsed = now.saturating_sub(created_at).clamp(0, duration.max(0));
    elapsed as u64
}

/// Weight-per-share accumulated between program start and `elapsed`.
pub fn weight_per_share(elapsed: u64, duration: u64, bonus_constant: u64) -> Result<u128> {
    require!(duration > 0, LedgerError::InvalidDuration);

    let d = duration as u128;
    let x = elapsed.min(duration) as u128;
    let k = bonus_constant as u128;

    let two_d = d.checked_mul(2).ok_or(LedgerError::MathOverflow)?;

    let linear = BONUS_SCALE
        .checked_add(k)
        .ok_or(LedgerError::MathOverflow)?
        .checked_mul(two_d)
        .ok_or(LedgerError::MathOverflow)?
        .checked_mul(x)
        .ok_or(LedgerError::MathOverflow)?;

    let quadratic = k
        .checked_mul(x)
        .ok_or(LedgerError::MathOverflow)?
        .checked_mul(x)
        .ok_or(LedgerError::MathOverflow)?;

    // x <= D guarantees linear >= quadratic
    let area = linear
        .checked_sub(quadratic)
        .ok_or(LedgerError::MathUnderflow)?;

    Ok(area / two_d)
}

/// Early-participation bonus for `amount` at `elapsed`.
///
/// Linear decay from `amount * K / BONUS_SCALE` at program start to zero at
/// maturity. This is exactly the part of the accrual rate above the base
/// rate, expressed in units of `amount`.
pub fn reward_bonus(amount: u64, elapsed: u64, duration: u64, bonus_constant: u64) -> Result<u64> {
    require!(duration > 0, LedgerError::InvalidDuration);

    let remaining = duration.saturating_sub(elapsed) as u128;

    let numerator = (amount as u128)
        .checked_mul(bonus_constant as u128)
        .ok_or(LedgerError::MathOverflow)?
        .checked_mul(remaining)
        .ok_or(LedgerError::MathOverflow)?;

    let denominator = (duration as u128)
        .checked_mul(BONUS_SCALE)
        .ok_or(LedgerError::MathOverflow)?;

    let bonus = numerator
        .checked_div(denominator)
        .ok_or(LedgerError::DivisionByZero)?;

    u64::try_from(bonus).map_err(|_| error!(LedgerError::MathOverflow))
}

/// `a * b / denominator` with a 256-bit intermediate, rounded down.
pub fn mul_div(a: u128, b: u128, denominator: u128) -> Result<u128> {
    require!(denominator != 0, LedgerError::DivisionByZero);

    let product = U256::from(a)
        .checked_mul(U256::from(b))
        .ok_or(LedgerError::MathOverflow)?;
    let quotient = product / U256::from(denominator);

    u128::try_from(quotient).map_err(|_| error!(LedgerError::MathOverflow))
}

/// Portion of `balance` owed to a holder.
///
/// Weighted by accrued share-time when any weight exists; otherwise (every
/// share entered at or after maturity) split by raw shares.
pub fn proportional_reward(
    balance: u64,
    weight: u128,
    total_weight: u128,
    shares: u64,
    total_shares: u64,
) -> Result<u64> {
    if balance == 0 {
        return Ok(0);
    }

    let reward = if total_weight > 0 {
        mul_div(balance as u128, weight, total_weight)?
    } else {
        mul_div(balance as u128, shares as u128, total_shares as u128)?
    };

    // weight <= total_weight and shares <= total_shares keep this <= balance
    Ok(reward.min(balance as u128) as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    const YEAR: u64 = 365 * 24 * 60 * 60;
    const FIVE_YEARS: u64 = 5 * YEAR;

    #[test]
    fn weight_starts_at_zero_and_stops_at_maturity() {
        assert_eq!(weight_per_share(0, FIVE_YEARS, 400).unwrap(), 0);

        let at_maturity = weight_per_share(FIVE_YEARS, FIVE_YEARS, 400).unwrap();
        let after = weight_per_share(FIVE_YEARS * 3, FIVE_YEARS, 400).unwrap();
        assert_eq!(at_maturity, after);

        // (100 + 400) * D - 400 * D / 2 = 300 * D
        assert_eq!(at_maturity, 300 * FIVE_YEARS as u128);
    }

    #[test]
    fn weight_without_bonus_is_linear_time() {
        let d = 1_000u64;
        for x in [0u64, 1, 250, 999, 1_000] {
            assert_eq!(weight_per_share(x, d, 0).unwrap(), 100 * x as u128);
        }
    }

    #[test]
    fn weight_is_increasing_before_maturity() {
        let d = 10_000u64;
        let mut previous = 0u128;
        for x in 1..=d {
            let w = weight_per_share(x, d, 400).unwrap();
            assert!(w > previous, "weight must grow at x = {x}");
            previous = w;
        }
    }

    #[test]
    fn early_half_outweighs_late_half() {
        let half = weight_per_share(FIVE_YEARS / 2, FIVE_YEARS, 400).unwrap();
        let full = weight_per_share(FIVE_YEARS, FIVE_YEARS, 400).unwrap();
        assert!(half > full - half);
    }

    #[test]
    fn bonus_decays_to_zero() {
        let amount = 1_000_000_000u64;
        let start = reward_bonus(amount, 0, FIVE_YEARS, 400).unwrap();
        assert_eq!(start, amount * 4);

        let mut previous = start;
        for step in 1..=10 {
            let bonus = reward_bonus(amount, FIVE_YEARS / 10 * step, FIVE_YEARS, 400).unwrap();
            assert!(bonus <= previous);
            previous = bonus;
        }

        assert_eq!(reward_bonus(amount, FIVE_YEARS, FIVE_YEARS, 400).unwrap(), 0);
        assert_eq!(reward_bonus(amount, FIVE_YEARS * 2, FIVE_YEARS, 400).unwrap(), 0);
    }

    #[test]
    fn bonus_rejects_zero_duration() {
        assert!(reward_bonus(1, 0, 0, 400).is_err());
        assert!(weight_per_share(1, 0, 400).is_err());
    }

    #[test]
    fn mul_div_handles_products_wider_than_u128() {
        let weight = 10u128.pow(30);
        let result = mul_div(u64::MAX as u128, weight, weight).unwrap();
        assert_eq!(result, u64::MAX as u128);

        assert!(mul_div(1, 1, 0).is_err());
    }

    #[test]
    fn proportional_reward_prefers_weight_and_falls_back_to_shares() {
        assert_eq!(proportional_reward(1_000, 3, 4, 1, 2).unwrap(), 750);
        assert_eq!(proportional_reward(1_000, 0, 0, 1, 4).unwrap(), 250);
        assert_eq!(proportional_reward(0, 3, 4, 1, 2).unwrap(), 0);
    }

    #[test]
    fn clamped_elapsed_stays_inside_program_window() {
        assert_eq!(clamped_elapsed(100, 50, 90), 0);
        assert_eq!(clamped_elapsed(100, 50, 120), 20);
        assert_eq!(clamped_elapsed(100, 50, 1_000), 50);
    }
}
