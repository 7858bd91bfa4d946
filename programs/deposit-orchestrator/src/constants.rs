// =============================================================================
// Deposit Orchestrator Constants
// =============================================================================

// =============================================================================
// PDA SEEDS
// =============================================================================

/// Orchestrator config
/// Full seed: ["orchestrator", lp_mint_pubkey]
pub const CONFIG_SEED: &[u8] = b"orchestrator";

/// LP tokens minted by the AMM land here before being burned or staked
/// Full seed: ["lp_custody", config_pubkey]
pub const LP_CUSTODY_SEED: &[u8] = b"lp_custody";

/// Base tokens bought or pulled from the depositor
/// Full seed: ["token_custody", config_pubkey]
pub const TOKEN_CUSTODY_SEED: &[u8] = b"token_custody";

/// Per-deposit wSOL account, created and closed within one instruction
/// Full seed: ["native_custody", config_pubkey]
pub const NATIVE_CUSTODY_SEED: &[u8] = b"native_custody";

// =============================================================================
// BURN SPLIT
// =============================================================================

/// Burn percent a fresh orchestrator starts with (burning itself starts disabled)
pub const DEFAULT_BURN_PERCENT: u8 = 10;

pub const MIN_BURN_PERCENT: u8 = 1;
pub const MAX_BURN_PERCENT: u8 = 10;

pub const PERCENT_DENOMINATOR: u64 = 100;

// =============================================================================
// LIMITS
// =============================================================================

/// Half of a native deposit is swapped, so both halves must be non-zero
pub const MIN_DEPOSIT_LAMPORTS: u64 = 2;
