use anchor_lang::prelude::*;

/// Emitted when a reward program is created
#[event]
pub struct LedgerInitialized {
    pub reward_program: Pubkey,
    pub authority: Pubkey,
    pub stake_mint: Pubkey,
    pub reward_mint: Pubkey,
    pub ledger_id: u64,
    pub duration: i64,
    pub bonus_constant: u64,
    pub timestamp: i64,
}

/// Emitted when the reward vault is topped up through the program
#[event]
pub struct RewardsFunded {
    pub reward_program: Pubkey,
    pub funder: Pubkey,
    pub amount: u64,
    pub reward_balance: u64,
    pub timestamp: i64,
}

/// Emitted when shares are credited to a holder
#[event]
pub struct Staked {
    pub reward_program: Pubkey,
    pub holder: Pubkey,
    pub funder: Pubkey,
    pub amount: u64,
    pub holder_shares: u64,
    pub total_shares: u64,
    pub timestamp: i64,
}

/// Emitted when a holder exits after maturity
#[event]
pub struct Unstaked {
    pub reward_program: Pubkey,
    pub holder: Pubkey,
    pub principal: u64,
    pub reward: u64,
    pub total_shares: u64,
    pub timestamp: i64,
}

/// Emitted when a holder exits early and forfeits its reward
#[event]
pub struct EmergencyWithdrawn {
    pub reward_program: Pubkey,
    pub holder: Pubkey,
    pub principal: u64,
    pub total_shares: u64,
    pub timestamp: i64,
}
