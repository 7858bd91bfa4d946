// =============================================================================
// Instructions Module - Reward Ledger
// =============================================================================

pub mod emergency_withdraw;
pub mod fund_rewards;
pub mod initialize;
pub mod stake;
pub mod stake_for;
pub mod unstake;
pub mod views;

pub use emergency_withdraw::*;
pub use fund_rewards::*;
pub use initialize::*;
pub use stake::*;
pub use stake_for::*;
pub use unstake::*;
pub use views::*;
