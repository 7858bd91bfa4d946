use anchor_lang::prelude::*;

#[error_code]
pub enum LedgerError {
    // Program State Errors
    #[msg("Reward program has not reached maturity yet")]
    ProgramNotMatured,

    #[msg("Re-entrant call into the reward ledger")]
    Reentrancy,

    // Amount Errors
    #[msg("Invalid amount: must be greater than zero")]
    InvalidAmount,

    #[msg("Invalid duration")]
    InvalidDuration,

    #[msg("Bonus constant exceeds maximum")]
    InvalidBonusConstant,

    #[msg("Position holds no shares")]
    NothingStaked,

    #[msg("Requested shares exceed position")]
    InsufficientShares,

    #[msg("Insufficient token balance")]
    InsufficientBalance,

    // Authorization Errors
    #[msg("Invalid authority")]
    InvalidAuthority,

    // Math Errors
    #[msg("Math overflow")]
    MathOverflow,

    #[msg("Math underflow")]
    MathUnderflow,

    #[msg("Division by zero")]
    DivisionByZero,

    // Account Validation Errors
    #[msg("Invalid stake mint")]
    InvalidStakeMint,

    #[msg("Invalid reward mint")]
    InvalidRewardMint,
}
