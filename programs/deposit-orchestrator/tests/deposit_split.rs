//! LP split and the ledger side of deposits, driven through the state APIs
//! of both programs.

use anchor_lang::error::Error;
use anchor_lang::prelude::Pubkey;
use deposit_orchestrator::constants::DEFAULT_BURN_PERCENT;
use deposit_orchestrator::error::OrchestratorError;
use deposit_orchestrator::state::{LpSplit, OrchestratorConfig};
use reward_ledger::state::{RewardProgram, StakePosition};

const START: i64 = 1_700_000_000;
const FIVE_YEARS: i64 = 5 * 365 * 24 * 60 * 60;

fn fresh_config() -> OrchestratorConfig {
    OrchestratorConfig {
        owner: Pubkey::new_unique(),
        stake_address: Pubkey::new_unique(),
        burn_percent: DEFAULT_BURN_PERCENT,
        burn_enabled: false,
        ..Default::default()
    }
}

fn fresh_ledger() -> RewardProgram {
    RewardProgram {
        created_at: START,
        duration: FIVE_YEARS,
        bonus_constant: 400,
        last_update: START,
        ..Default::default()
    }
}

fn error_code(err: Error) -> u32 {
    match err {
        Error::AnchorError(e) => e.error_code_number,
        Error::ProgramError(_) => u32::MAX,
    }
}

#[test]
fn burning_starts_disabled() {
    let config = fresh_config();
    assert_eq!(config.burn_percent, 10);
    assert_eq!(
        config.split_lp(5_000).unwrap(),
        LpSplit { burn: 0, stake: 5_000 }
    );
}

#[test]
fn ten_percent_burn_stakes_nine_times_the_burn() {
    let mut config = fresh_config();
    config.burn_enabled = true;

    let split = config.split_lp(1_000_000).unwrap();
    assert_eq!(split.burn, 100_000);
    assert_eq!(split.stake, 9 * split.burn);
}

#[test]
fn five_percent_burn_stakes_nineteen_times_the_burn() {
    let mut config = fresh_config();
    config.burn_enabled = true;
    OrchestratorConfig::validate_burn_percent(5).unwrap();
    config.burn_percent = 5;

    let split = config.split_lp(2_000_000).unwrap();
    assert_eq!(split.burn, 100_000);
    assert_eq!(split.stake, 19 * split.burn);
}

#[test]
fn burn_percent_outside_range_is_rejected() {
    for percent in [0u8, 11, 50, u8::MAX] {
        let err = OrchestratorConfig::validate_burn_percent(percent).unwrap_err();
        assert_eq!(
            error_code(err),
            u32::from(OrchestratorError::InvalidBurnPercent)
        );
    }
}

#[test]
fn sequential_small_deposits_keep_growing_the_position() {
    let mut config = fresh_config();
    config.burn_enabled = true;

    let mut ledger = fresh_ledger();
    let mut position = StakePosition::default();
    let mut lp_total = 0u64;

    for i in 0..100u64 {
        // Small deposits mint a handful of LP; the 10% cut often rounds to zero
        let lp_minted = 3 + i % 17;
        lp_total += lp_minted;

        let split = config.split_lp(lp_minted).unwrap();
        assert!(split.stake > 0);

        let before = position.shares;
        ledger
            .credit_stake(&mut position, split.stake, START + i as i64 * 600)
            .unwrap();
        assert!(position.shares > before);

        config.record_deposit(1_000, split).unwrap();
    }

    assert_eq!(config.deposit_count, 100);
    assert_eq!(config.total_native_deposited, 100_000);
    assert_eq!(config.total_lp_burned + config.total_lp_staked, lp_total);
    assert_eq!(ledger.total_shares, config.total_lp_staked);
    assert_eq!(position.shares, config.total_lp_staked);
    assert_eq!(ledger.holder_count, 1);
}

#[test]
fn lp_already_in_custody_leaves_with_the_next_deposit() {
    let mut config = fresh_config();
    let mut ledger = fresh_ledger();
    let mut position = StakePosition::default();

    // 3 LP were sent to custody directly, the deposit mints 1_000 more
    let split = config.split_custody_lp(1_003, 1_000).unwrap();
    assert_eq!(split, LpSplit { burn: 0, stake: 1_003 });
    ledger.credit_stake(&mut position, split.stake, START).unwrap();
    assert_eq!(position.shares, 1_003);

    config.burn_enabled = true;
    let split = config.split_custody_lp(2_003, 2_000).unwrap();
    assert_eq!(split.burn, 200);
    assert_eq!(split.burn + split.stake, 2_003);

    let err = config.split_custody_lp(999, 1_000).unwrap_err();
    assert_eq!(error_code(err), u32::from(OrchestratorError::MathUnderflow));
}

#[test]
fn depositor_alone_collects_the_whole_reward_at_maturity() {
    let config = fresh_config();
    let mut ledger = fresh_ledger();
    let mut position = StakePosition::default();

    for i in 0..5i64 {
        let split = config.split_lp(1_000).unwrap();
        ledger
            .credit_stake(&mut position, split.stake, START + i * 86_400)
            .unwrap();
    }

    let reward_balance = 42_000_000;
    let settlement = ledger
        .settle_unstake(&mut position, reward_balance, START + FIVE_YEARS)
        .unwrap();

    assert_eq!(settlement.principal, 5_000);
    assert_eq!(settlement.reward, reward_balance);
    assert_eq!(ledger.total_shares, 0);
}

#[test]
fn deposit_lock_rejects_reentry() {
    let mut config = fresh_config();
    config.lock().unwrap();

    let err = config.lock().unwrap_err();
    assert_eq!(error_code(err), u32::from(OrchestratorError::Reentrancy));

    config.unlock();
    assert!(!config.locked);
}
