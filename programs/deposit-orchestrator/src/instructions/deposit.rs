use anchor_lang::prelude::*;
use anchor_lang::system_program;
use anchor_spl::token::{self, Burn, CloseAccount, Mint, SyncNative, Token, TokenAccount, Transfer};
use reward_ledger::program::RewardLedger;

use crate::amm;
use crate::constants::{
    CONFIG_SEED, LP_CUSTODY_SEED, MIN_DEPOSIT_LAMPORTS, NATIVE_CUSTODY_SEED, TOKEN_CUSTODY_SEED,
};
use crate::error::OrchestratorError;
use crate::events::Deposited;
use crate::state::{LpSplit, OrchestratorConfig};

/// Accounts shared by `deposit` and `deposit_native_and_token`
///
/// Tokens only pass through the orchestrator: every custody account is
/// empty again, and the wSOL custody closed, when the instruction returns.
#[derive(Accounts)]
pub struct Deposit<'info> {
    // =========================================================================
    // Depositor
    // =========================================================================

    /// Sends the SOL, receives the ledger shares and any leftovers
    #[account(mut)]
    pub depositor: Signer<'info>,

    // =========================================================================
    // Orchestrator
    // =========================================================================

    #[account(
        mut,
        seeds = [CONFIG_SEED, config.lp_mint.as_ref()],
        bump = config.bump,
        constraint = !config.locked @ OrchestratorError::Reentrancy
    )]
    pub config: Box<Account<'info, OrchestratorConfig>>,

    #[account(address = config.native_mint @ OrchestratorError::InvalidNativeMint)]
    pub native_mint: Box<Account<'info, Mint>>,

    #[account(address = config.base_mint @ OrchestratorError::LedgerAssetMismatch)]
    pub base_mint: Box<Account<'info, Mint>>,

    /// Mutable: the burned cut reduces supply
    #[account(mut, address = config.lp_mint @ OrchestratorError::LedgerAssetMismatch)]
    pub lp_mint: Box<Account<'info, Mint>>,

    /// Source of base tokens and destination of refunds
    #[account(
        mut,
        token::mint = base_mint,
        token::authority = depositor
    )]
    pub depositor_token_account: Box<Account<'info, TokenAccount>>,

    /// Wrapped SOL for this deposit only; closed back to the depositor
    #[account(
        init,
        payer = depositor,
        seeds = [NATIVE_CUSTODY_SEED, config.key().as_ref()],
        bump,
        token::mint = native_mint,
        token::authority = config
    )]
    pub native_custody: Box<Account<'info, TokenAccount>>,

    #[account(
        mut,
        seeds = [TOKEN_CUSTODY_SEED, config.key().as_ref()],
        bump = config.token_custody_bump,
        token::mint = base_mint,
        token::authority = config
    )]
    pub token_custody: Box<Account<'info, TokenAccount>>,

    #[account(
        mut,
        seeds = [LP_CUSTODY_SEED, config.key().as_ref()],
        bump = config.lp_custody_bump,
        token::mint = lp_mint,
        token::authority = config
    )]
    pub lp_custody: Box<Account<'info, TokenAccount>>,

    // =========================================================================
    // AMM
    // =========================================================================

    /// CHECK: Pinned to the configured router
    #[account(address = config.amm_program @ OrchestratorError::InvalidAmmProgram)]
    pub amm_program: UncheckedAccount<'info>,

    /// CHECK: Pinned to the configured pair
    #[account(mut, address = config.amm_pool @ OrchestratorError::InvalidAmmPool)]
    pub amm_pool: UncheckedAccount<'info>,

    /// CHECK: Pool's wSOL reserve, validated by the router
    #[account(mut)]
    pub amm_native_vault: UncheckedAccount<'info>,

    /// CHECK: Pool's base token reserve, validated by the router
    #[account(mut)]
    pub amm_base_vault: UncheckedAccount<'info>,

    // =========================================================================
    // Reward Ledger
    // =========================================================================

    pub ledger_program: Program<'info, RewardLedger>,

    /// CHECK: Pinned to the configured stake address. Left undeserialized
    /// here because the ledger rewrites it during the CPI.
    #[account(mut, address = config.stake_address @ OrchestratorError::StakeAddressMismatch)]
    pub reward_program: UncheckedAccount<'info>,

    /// CHECK: Depositor's position PDA, validated by the ledger
    #[account(mut)]
    pub ledger_position: UncheckedAccount<'info>,

    /// CHECK: Ledger stake vault, validated by the ledger
    #[account(mut)]
    pub ledger_stake_vault: UncheckedAccount<'info>,

    pub system_program: Program<'info, System>,
    pub token_program: Program<'info, Token>,
}

impl<'info> Deposit<'info> {
    /// Take the lock and persist it before the first CPI
    fn begin(&mut self) -> Result<()> {
        self.config.lock()?;
        self.config.exit(&crate::ID)
    }

    fn wrap_native(&self, amount: u64) -> Result<()> {
        system_program::transfer(
            CpiContext::new(
                self.system_program.to_account_info(),
                system_program::Transfer {
                    from: self.depositor.to_account_info(),
                    to: self.native_custody.to_account_info(),
                },
            ),
            amount,
        )?;

        token::sync_native(CpiContext::new(
            self.token_program.to_account_info(),
            SyncNative {
                account: self.native_custody.to_account_info(),
            },
        ))
    }

    fn pull_tokens(&mut self, amount: u64) -> Result<()> {
        token::transfer(
            CpiContext::new(
                self.token_program.to_account_info(),
                Transfer {
                    from: self.depositor_token_account.to_account_info(),
                    to: self.token_custody.to_account_info(),
                    authority: self.depositor.to_account_info(),
                },
            ),
            amount,
        )?;

        self.token_custody.reload()
    }

    /// Swap wSOL for base tokens, returning the tokens received
    fn swap_native_for_base(
        &mut self,
        amount_in: u64,
        deadline: i64,
        signer_seeds: &[&[&[u8]]],
    ) -> Result<u64> {
        let before = self.token_custody.amount;

        amm::swap_exact_in(
            amm::SwapExactIn {
                amm_program: self.amm_program.to_account_info(),
                pool: self.amm_pool.to_account_info(),
                authority: self.config.to_account_info(),
                source: self.native_custody.to_account_info(),
                destination: self.token_custody.to_account_info(),
                pool_vault_in: self.amm_native_vault.to_account_info(),
                pool_vault_out: self.amm_base_vault.to_account_info(),
                token_program: self.token_program.to_account_info(),
            },
            amount_in,
            0,
            deadline,
            signer_seeds,
        )?;

        self.native_custody.reload()?;
        self.token_custody.reload()?;

        let bought = self
            .token_custody
            .amount
            .checked_sub(before)
            .ok_or(OrchestratorError::MathUnderflow)?;

        msg!("Swapped {} lamports for {} tokens", amount_in, bought);
        Ok(bought)
    }

    /// Add liquidity from custody, returning the LP minted
    fn provide_liquidity(
        &mut self,
        native_amount: u64,
        base_amount: u64,
        deadline: i64,
        signer_seeds: &[&[&[u8]]],
    ) -> Result<u64> {
        let before = self.lp_custody.amount;

        let native = (
            self.native_custody.to_account_info(),
            self.amm_native_vault.to_account_info(),
            native_amount,
        );
        let base = (
            self.token_custody.to_account_info(),
            self.amm_base_vault.to_account_info(),
            base_amount,
        );
        let (side_a, side_b) = if self.config.native_mint < self.config.base_mint {
            (native, base)
        } else {
            (base, native)
        };

        amm::add_liquidity(
            amm::AddLiquidity {
                amm_program: self.amm_program.to_account_info(),
                pool: self.amm_pool.to_account_info(),
                authority: self.config.to_account_info(),
                user_token_a: side_a.0,
                user_token_b: side_b.0,
                pool_vault_a: side_a.1,
                pool_vault_b: side_b.1,
                lp_mint: self.lp_mint.to_account_info(),
                user_lp: self.lp_custody.to_account_info(),
                token_program: self.token_program.to_account_info(),
            },
            side_a.2,
            side_b.2,
            0,
            0,
            deadline,
            signer_seeds,
        )?;

        self.native_custody.reload()?;
        self.token_custody.reload()?;
        self.lp_custody.reload()?;

        let minted = self
            .lp_custody
            .amount
            .checked_sub(before)
            .ok_or(OrchestratorError::MathUnderflow)?;

        msg!(
            "Added liquidity: {} lamports + {} tokens -> {} LP",
            native_amount,
            base_amount,
            minted
        );
        Ok(minted)
    }

    fn burn_lp(&self, amount: u64, signer_seeds: &[&[&[u8]]]) -> Result<()> {
        token::burn(
            CpiContext::new_with_signer(
                self.token_program.to_account_info(),
                Burn {
                    mint: self.lp_mint.to_account_info(),
                    from: self.lp_custody.to_account_info(),
                    authority: self.config.to_account_info(),
                },
                signer_seeds,
            ),
            amount,
        )
    }

    /// Stake LP from custody into the ledger, credited to the depositor
    fn stake_lp(&self, amount: u64, signer_seeds: &[&[&[u8]]]) -> Result<()> {
        reward_ledger::cpi::stake_for(
            CpiContext::new_with_signer(
                self.ledger_program.to_account_info(),
                reward_ledger::cpi::accounts::StakeFor {
                    funder: self.config.to_account_info(),
                    payer: self.depositor.to_account_info(),
                    beneficiary: self.depositor.to_account_info(),
                    reward_program: self.reward_program.to_account_info(),
                    position: self.ledger_position.to_account_info(),
                    stake_mint: self.lp_mint.to_account_info(),
                    funder_stake_account: self.lp_custody.to_account_info(),
                    stake_vault: self.ledger_stake_vault.to_account_info(),
                    system_program: self.system_program.to_account_info(),
                    token_program: self.token_program.to_account_info(),
                },
                signer_seeds,
            ),
            amount,
        )
    }

    /// Return unused base tokens to the depositor
    fn refund_tokens(&mut self, signer_seeds: &[&[&[u8]]]) -> Result<u64> {
        self.token_custody.reload()?;
        let leftover = self.token_custody.amount;

        if leftover > 0 {
            token::transfer(
                CpiContext::new_with_signer(
                    self.token_program.to_account_info(),
                    Transfer {
                        from: self.token_custody.to_account_info(),
                        to: self.depositor_token_account.to_account_info(),
                        authority: self.config.to_account_info(),
                    },
                    signer_seeds,
                ),
                leftover,
            )?;
        }

        Ok(leftover)
    }

    /// Close the wSOL custody; leftover wSOL and rent go back as SOL
    fn close_native_custody(&self, signer_seeds: &[&[&[u8]]]) -> Result<()> {
        token::close_account(CpiContext::new_with_signer(
            self.token_program.to_account_info(),
            CloseAccount {
                account: self.native_custody.to_account_info(),
                destination: self.depositor.to_account_info(),
                authority: self.config.to_account_info(),
            },
            signer_seeds,
        ))
    }

    fn assert_custody_empty(&mut self) -> Result<()> {
        self.lp_custody.reload()?;
        self.token_custody.reload()?;

        require!(self.lp_custody.amount == 0, OrchestratorError::ResidualBalance);
        require!(self.token_custody.amount == 0, OrchestratorError::ResidualBalance);
        require!(
            self.native_custody.to_account_info().lamports() == 0,
            OrchestratorError::ResidualBalance
        );

        Ok(())
    }
}

/// Deposit SOL: half is swapped for base tokens, the rest paired with them
///
/// # Arguments
/// * `ctx` - The context containing all accounts
/// * `amount` - Lamports to deposit
/// * `min_lp_out` - Minimum LP minted (slippage protection)
/// * `deadline` - Forwarded to the router
///
/// # Flow
/// 1. Wrap SOL into the wSOL custody
/// 2. Swap half for base tokens
/// 3. Add liquidity with the other half and everything bought
/// 4. Burn the configured cut, stake the rest for the depositor
/// 5. Refund leftovers and close the wSOL custody
///
pub fn handler_deposit(
    ctx: Context<Deposit>,
    amount: u64,
    min_lp_out: u64,
    deadline: i64,
) -> Result<()> {
    require!(amount >= MIN_DEPOSIT_LAMPORTS, OrchestratorError::InvalidAmount);
    require!(
        ctx.accounts.depositor.lamports() >= amount,
        OrchestratorError::InsufficientBalance
    );

    msg!("Deposit of {} lamports by {}", amount, ctx.accounts.depositor.key());

    let accounts = ctx.accounts;
    accounts.begin()?;

    let lp_mint = accounts.config.lp_mint;
    let bump = [accounts.config.bump];
    let seeds: &[&[u8]] = &[CONFIG_SEED, lp_mint.as_ref(), &bump];
    let signer_seeds = &[seeds];

    accounts.wrap_native(amount)?;

    let swap_amount = amount / 2;
    let bought = accounts.swap_native_for_base(swap_amount, deadline, signer_seeds)?;
    require!(bought > 0, OrchestratorError::SlippageExceeded);

    let native_for_liquidity = amount
        .checked_sub(swap_amount)
        .ok_or(OrchestratorError::MathUnderflow)?;

    complete_deposit(
        accounts,
        amount,
        0,
        native_for_liquidity,
        bought,
        min_lp_out,
        deadline,
        signer_seeds,
    )
}

/// Deposit SOL and base tokens together; no swap
///
/// # Arguments
/// * `ctx` - The context containing all accounts
/// * `amount` - Lamports to deposit
/// * `token_amount` - Base tokens to deposit
/// * `min_lp_out` - Minimum LP minted (slippage protection)
/// * `deadline` - Forwarded to the router
///
/// Whichever side the pool ratio does not need is returned.
///
pub fn handler_deposit_native_and_token(
    ctx: Context<Deposit>,
    amount: u64,
    token_amount: u64,
    min_lp_out: u64,
    deadline: i64,
) -> Result<()> {
    require!(amount > 0, OrchestratorError::InvalidAmount);
    require!(token_amount > 0, OrchestratorError::InvalidAmount);
    require!(
        ctx.accounts.depositor.lamports() >= amount,
        OrchestratorError::InsufficientBalance
    );
    require!(
        ctx.accounts.depositor_token_account.amount >= token_amount,
        OrchestratorError::InsufficientBalance
    );

    msg!(
        "Deposit of {} lamports + {} tokens by {}",
        amount,
        token_amount,
        ctx.accounts.depositor.key()
    );

    let accounts = ctx.accounts;
    accounts.begin()?;

    let lp_mint = accounts.config.lp_mint;
    let bump = [accounts.config.bump];
    let seeds: &[&[u8]] = &[CONFIG_SEED, lp_mint.as_ref(), &bump];
    let signer_seeds = &[seeds];

    accounts.wrap_native(amount)?;
    accounts.pull_tokens(token_amount)?;

    let base_available = accounts.token_custody.amount;

    complete_deposit(
        accounts,
        amount,
        token_amount,
        amount,
        base_available,
        min_lp_out,
        deadline,
        signer_seeds,
    )
}

/// Shared tail of both deposits: liquidity, split, stake, refunds, checks
#[allow(clippy::too_many_arguments)]
fn complete_deposit(
    accounts: &mut Deposit,
    native_deposited: u64,
    tokens_deposited: u64,
    native_for_liquidity: u64,
    base_for_liquidity: u64,
    min_lp_out: u64,
    deadline: i64,
    signer_seeds: &[&[&[u8]]],
) -> Result<()> {
    let lp_minted = accounts.provide_liquidity(
        native_for_liquidity,
        base_for_liquidity,
        deadline,
        signer_seeds,
    )?;

    require!(lp_minted > 0, OrchestratorError::NoLiquidityMinted);
    require!(lp_minted >= min_lp_out, OrchestratorError::SlippageExceeded);

    // Custody was reloaded after add-liquidity; split all of it
    let split: LpSplit = accounts
        .config
        .split_custody_lp(accounts.lp_custody.amount, lp_minted)?;

    if split.burn > 0 {
        accounts.burn_lp(split.burn, signer_seeds)?;
        msg!("Burned {} LP ({}%)", split.burn, accounts.config.burn_percent);
    }

    accounts.stake_lp(split.stake, signer_seeds)?;
    msg!("Staked {} LP into {}", split.stake, accounts.config.stake_address);

    let tokens_refunded = accounts.refund_tokens(signer_seeds)?;
    accounts.close_native_custody(signer_seeds)?;
    accounts.assert_custody_empty()?;

    let config = &mut accounts.config;
    config.record_deposit(native_deposited, split)?;
    config.unlock();

    msg!(
        "Deposit complete: {} LP minted, {} burned, {} staked, {} tokens refunded",
        lp_minted,
        split.burn,
        split.stake,
        tokens_refunded
    );

    emit!(Deposited {
        config: config.key(),
        depositor: accounts.depositor.key(),
        native_amount: native_deposited,
        token_amount: tokens_deposited,
        lp_minted,
        lp_burned: split.burn,
        lp_staked: split.stake,
        tokens_refunded,
        stake_address: config.stake_address,
        timestamp: Clock::get()?.unix_timestamp,
    });

    Ok(())
}
