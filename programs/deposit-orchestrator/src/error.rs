use anchor_lang::prelude::*;

#[error_code]
pub enum OrchestratorError {
    // Authorization
    #[msg("Unauthorized: only the owner can perform this action")]
    Unauthorized,

    #[msg("Re-entrant call into the orchestrator")]
    Reentrancy,

    // Parameters
    #[msg("Invalid amount")]
    InvalidAmount,

    #[msg("Burn percent must be between 1 and 10")]
    InvalidBurnPercent,

    #[msg("Reward program does not match the configured stake address")]
    StakeAddressMismatch,

    #[msg("Reward program must stake the LP mint and reward the base mint")]
    LedgerAssetMismatch,

    #[msg("Native mint is not the wrapped SOL mint")]
    InvalidNativeMint,

    #[msg("AMM pool is not the pair address for these mints")]
    InvalidAmmPool,

    #[msg("AMM program does not match configuration")]
    InvalidAmmProgram,

    #[msg("Insufficient token balance")]
    InsufficientBalance,

    // Collaborators
    #[msg("AMM CPI failed")]
    AmmCpiFailed,

    #[msg("Slippage tolerance exceeded")]
    SlippageExceeded,

    #[msg("AMM minted no liquidity")]
    NoLiquidityMinted,

    // Custody
    #[msg("Orchestrator custody not empty after deposit")]
    ResidualBalance,

    // Math
    #[msg("Math overflow")]
    MathOverflow,

    #[msg("Math underflow")]
    MathUnderflow,

    #[msg("Division by zero")]
    DivisionByZero,
}
