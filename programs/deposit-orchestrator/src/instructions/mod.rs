// =============================================================================
// Instructions Module - Deposit Orchestrator
// =============================================================================

pub mod admin;
pub mod deposit;
pub mod initialize;
pub mod views;

pub use admin::*;
pub use deposit::*;
pub use initialize::*;
pub use views::*;
