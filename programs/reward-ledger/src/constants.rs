// =============================================================================
// Reward Ledger Constants
// =============================================================================

// PDA Seeds
pub const REWARD_PROGRAM_SEED: &[u8] = b"reward_program";
pub const STAKE_VAULT_SEED: &[u8] = b"stake_vault";
pub const REWARD_VAULT_SEED: &[u8] = b"reward_vault";
pub const POSITION_SEED: &[u8] = b"position";

// Bonus constants are expressed in percent of the base accrual rate.
// A bonus constant of 400 makes a share staked at program start accrue
// 5x (100 + 400) as fast as a share staked right before maturity.
pub const BONUS_SCALE: u128 = 100;

// Safety limits
pub const MIN_DURATION_SECONDS: i64 = 1;
pub const MAX_DURATION_SECONDS: i64 = 20 * 365 * 24 * 60 * 60; // 20 years
pub const MAX_BONUS_CONSTANT: u64 = 1_000_000;
