use anchor_lang::prelude::*;

#[event]
pub struct OrchestratorInitialized {
    pub config: Pubkey,
    pub owner: Pubkey,
    pub lp_mint: Pubkey,
    pub base_mint: Pubkey,
    pub amm_pool: Pubkey,
    pub stake_address: Pubkey,
    pub timestamp: i64,
}

/// Emitted once per completed deposit
#[event]
pub struct Deposited {
    pub config: Pubkey,
    pub depositor: Pubkey,
    pub native_amount: u64,
    pub token_amount: u64,
    pub lp_minted: u64,
    pub lp_burned: u64,
    pub lp_staked: u64,
    pub tokens_refunded: u64,
    pub stake_address: Pubkey,
    pub timestamp: i64,
}

#[event]
pub struct BurnPercentUpdated {
    pub config: Pubkey,
    pub old_percent: u8,
    pub new_percent: u8,
}

#[event]
pub struct BurnStatusUpdated {
    pub config: Pubkey,
    pub enabled: bool,
}

#[event]
pub struct StakeAddressChanged {
    pub config: Pubkey,
    pub old_stake_address: Pubkey,
    pub new_stake_address: Pubkey,
}
