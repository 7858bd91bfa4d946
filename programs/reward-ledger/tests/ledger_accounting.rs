//! Ledger accounting driven through the state API with a simulated clock and
//! reward vault.

use anchor_lang::error::Error;
use reward_ledger::error::LedgerError;
use reward_ledger::state::{RewardProgram, StakePosition};

const START: i64 = 1_700_000_000;
const YEAR: i64 = 365 * 24 * 60 * 60;
const FIVE_YEARS: i64 = 5 * YEAR;
const BONUS: u64 = 400;

struct Ledger {
    program: RewardProgram,
    positions: Vec<StakePosition>,
    reward_balance: u64,
    stake_vault: u64,
}

impl Ledger {
    fn new(holders: usize, duration: i64, bonus_constant: u64, reward_balance: u64) -> Self {
        Self {
            program: RewardProgram {
                created_at: START,
                duration,
                bonus_constant,
                last_update: START,
                ..Default::default()
            },
            positions: vec![StakePosition::default(); holders],
            reward_balance,
            stake_vault: 0,
        }
    }

    fn stake(&mut self, holder: usize, amount: u64, now: i64) {
        self.program
            .credit_stake(&mut self.positions[holder], amount, now)
            .unwrap();
        self.stake_vault += amount;
        self.assert_conserved();
    }

    fn unstake(&mut self, holder: usize, now: i64) -> Result<u64, Error> {
        let settlement =
            self.program
                .settle_unstake(&mut self.positions[holder], self.reward_balance, now)?;
        self.reward_balance -= settlement.reward;
        self.stake_vault -= settlement.principal;
        self.assert_conserved();
        Ok(settlement.reward)
    }

    fn emergency_withdraw(&mut self, holder: usize, now: i64) -> u64 {
        let settlement = self
            .program
            .settle_emergency_withdraw(&mut self.positions[holder], now)
            .unwrap();
        assert_eq!(settlement.reward, 0);
        self.stake_vault -= settlement.principal;
        self.assert_conserved();
        settlement.principal
    }

    fn quote(&self, holder: usize, now: i64) -> u64 {
        let position = &self.positions[holder];
        self.program
            .quote_reward(position, position.shares, self.reward_balance, now)
            .unwrap()
    }

    fn assert_conserved(&self) {
        let shares: u64 = self.positions.iter().map(|p| p.shares).sum();
        let principal: u64 = self.positions.iter().map(|p| p.principal).sum();
        let weight: u128 = self
            .positions
            .iter()
            .map(|p| p.live_weight(self.program.weight_per_share).unwrap())
            .sum();
        let holders = self.positions.iter().filter(|p| p.is_active()).count() as u64;

        assert_eq!(self.program.total_shares, shares);
        assert_eq!(self.program.total_principal, principal);
        assert_eq!(self.program.total_principal, self.stake_vault);
        assert_eq!(self.program.total_weight, weight);
        assert_eq!(self.program.holder_count, holders);
    }
}

fn error_code(err: Error) -> u32 {
    match err {
        Error::AnchorError(e) => e.error_code_number,
        Error::ProgramError(_) => u32::MAX,
    }
}

#[test]
fn five_year_program_with_bonus_400() {
    let reward = 1_000_000u64;
    let mut ledger = Ledger::new(2, FIVE_YEARS, BONUS, reward);

    // Bonus at start is 4x the staked amount, fading to zero at maturity
    assert_eq!(ledger.program.reward_bonus(1_000, START).unwrap(), 4_000);
    assert_eq!(
        ledger.program.reward_bonus(1_000, START + FIVE_YEARS / 2).unwrap(),
        2_000
    );
    assert_eq!(
        ledger.program.reward_bonus(1_000, START + FIVE_YEARS).unwrap(),
        0
    );

    ledger.stake(0, 1_000, START);
    ledger.stake(1, 1_000, START + FIVE_YEARS / 2);

    let maturity = START + FIVE_YEARS;

    // Early holder: 300D per share, late holder: 100D per share
    assert_eq!(ledger.quote(0, maturity), 750_000);
    assert_eq!(ledger.quote(1, maturity), 250_000);

    assert_eq!(ledger.unstake(0, maturity).unwrap(), 750_000);
    assert_eq!(ledger.unstake(1, maturity + 1).unwrap(), 250_000);

    assert_eq!(ledger.reward_balance, 0);
    assert_eq!(ledger.program.total_shares, 0);
    assert_eq!(ledger.program.total_weight, 0);
    assert_eq!(ledger.program.total_rewards_paid, reward);
    assert_eq!(ledger.positions[0].rewards_claimed, 750_000);
}

#[test]
fn unstake_is_gated_on_maturity() {
    let mut ledger = Ledger::new(1, FIVE_YEARS, BONUS, 10_000);
    ledger.stake(0, 500, START);

    let err = ledger.unstake(0, START + FIVE_YEARS - 1).unwrap_err();
    assert_eq!(error_code(err), u32::from(LedgerError::ProgramNotMatured));
    assert_eq!(ledger.positions[0].shares, 500);

    assert_eq!(ledger.unstake(0, START + FIVE_YEARS).unwrap(), 10_000);
}

#[test]
fn sole_holder_takes_the_full_balance() {
    let mut ledger = Ledger::new(1, YEAR, BONUS, 123_456_789);
    ledger.stake(0, 7, START + 100);
    ledger.stake(0, 3, START + YEAR / 3);

    let quoted = ledger.quote(0, START + YEAR);
    assert_eq!(quoted, 123_456_789);
    assert_eq!(ledger.unstake(0, START + YEAR).unwrap(), quoted);
    assert_eq!(ledger.reward_balance, 0);
}

#[test]
fn earlier_holder_earns_strictly_more() {
    let mut ledger = Ledger::new(3, FIVE_YEARS, BONUS, 9_000_000);
    ledger.stake(0, 1_000, START);
    ledger.stake(1, 1_000, START + YEAR);
    ledger.stake(2, 1_000, START + 3 * YEAR);

    let maturity = START + FIVE_YEARS;
    let first = ledger.quote(0, maturity);
    let second = ledger.quote(1, maturity);
    let third = ledger.quote(2, maturity);

    assert!(first > second);
    assert!(second > third);
    assert!(third > 0);
}

#[test]
fn later_joiner_earns_less_without_bonus() {
    let duration = 1_000;
    let mut ledger = Ledger::new(2, duration, 0, 3_000);
    ledger.stake(0, 100, START);
    ledger.stake(1, 100, START + duration / 2);

    // Plain share-time: twice as long held, twice the reward
    let maturity = START + duration;
    assert_eq!(ledger.quote(0, maturity), 2_000);
    assert_eq!(ledger.quote(1, maturity), 1_000);
}

#[test]
fn quote_matches_payout_at_the_same_moment() {
    let mut ledger = Ledger::new(3, FIVE_YEARS, BONUS, 1_000_003);
    ledger.stake(0, 333, START + 17);
    ledger.stake(1, 1_001, START + YEAR);
    ledger.stake(2, 50, START + 2 * YEAR + 5);
    ledger.stake(0, 10, START + 4 * YEAR);

    let t = START + FIVE_YEARS + 10;
    for holder in 0..3 {
        let quoted = ledger.quote(holder, t);
        assert_eq!(ledger.unstake(holder, t).unwrap(), quoted);
    }
    assert_eq!(ledger.reward_balance, 0);
}

#[test]
fn partial_share_quote_scales_with_shares() {
    let mut ledger = Ledger::new(2, YEAR, BONUS, 1_000_000);
    ledger.stake(0, 1_000, START);
    ledger.stake(1, 1_000, START);

    let t = START + YEAR;
    let full = ledger.quote(0, t);
    let half = ledger
        .program
        .quote_reward(&ledger.positions[0], 500, ledger.reward_balance, t)
        .unwrap();

    assert_eq!(full, 500_000);
    assert_eq!(half, 250_000);

    let err = ledger
        .program
        .quote_reward(&ledger.positions[0], 1_001, ledger.reward_balance, t)
        .unwrap_err();
    assert_eq!(error_code(err), u32::from(LedgerError::InsufficientShares));
}

#[test]
fn emergency_withdraw_forfeits_to_remaining_holders() {
    let mut ledger = Ledger::new(3, FIVE_YEARS, BONUS, 600_000);
    for holder in 0..3 {
        ledger.stake(holder, 1_000, START);
    }

    assert_eq!(ledger.emergency_withdraw(2, START + YEAR), 1_000);
    assert_eq!(ledger.program.emergency_exits, 1);
    assert_eq!(ledger.positions[2].rewards_claimed, 0);

    let maturity = START + FIVE_YEARS;
    assert_eq!(ledger.unstake(0, maturity).unwrap(), 300_000);
    assert_eq!(ledger.unstake(1, maturity).unwrap(), 300_000);
    assert_eq!(ledger.reward_balance, 0);
}

#[test]
fn emergency_withdraw_on_empty_position_fails() {
    let mut ledger = Ledger::new(1, YEAR, BONUS, 1);
    let err = ledger
        .program
        .settle_emergency_withdraw(&mut ledger.positions[0], START)
        .unwrap_err();
    assert_eq!(error_code(err), u32::from(LedgerError::NothingStaked));
}

#[test]
fn position_reentry_starts_from_scratch() {
    let mut ledger = Ledger::new(2, FIVE_YEARS, BONUS, 1_000_000);
    ledger.stake(0, 1_000, START);
    ledger.emergency_withdraw(0, START + YEAR);

    let rejoin = START + 2 * YEAR;
    ledger.stake(0, 1_000, rejoin);
    ledger.stake(1, 1_000, rejoin);

    assert_eq!(ledger.positions[0].first_stake_time, rejoin);

    let acc = ledger
        .program
        .current_weight_per_share(START + FIVE_YEARS)
        .unwrap();
    assert_eq!(
        ledger.positions[0].live_weight(acc).unwrap(),
        ledger.positions[1].live_weight(acc).unwrap()
    );

    let maturity = START + FIVE_YEARS;
    assert_eq!(ledger.unstake(0, maturity).unwrap(), 500_000);
    assert_eq!(ledger.unstake(1, maturity).unwrap(), 500_000);
}

#[test]
fn stakes_after_maturity_split_by_shares() {
    let mut ledger = Ledger::new(2, YEAR, BONUS, 900);
    let late = START + 2 * YEAR;
    ledger.stake(0, 100, late);
    ledger.stake(1, 200, late);

    assert_eq!(ledger.program.total_weight, 0);
    assert_eq!(ledger.unstake(0, late + 1).unwrap(), 300);
    assert_eq!(ledger.unstake(1, late + 1).unwrap(), 600);
}

#[test]
fn conservation_over_mixed_sequence() {
    let mut ledger = Ledger::new(5, FIVE_YEARS, BONUS, 77_777_777);
    let step = FIVE_YEARS / 40;

    for round in 0..30i64 {
        let holder = (round * 7 % 5) as usize;
        let now = START + round * step;
        if round % 9 == 8 && ledger.positions[holder].is_active() {
            ledger.emergency_withdraw(holder, now);
        } else {
            ledger.stake(holder, 10 + (round as u64 * 37) % 1_000, now);
        }
    }

    let maturity = START + FIVE_YEARS;
    let mut paid = 0;
    for holder in 0..5 {
        if ledger.positions[holder].is_active() {
            paid += ledger.unstake(holder, maturity + holder as i64).unwrap();
        }
    }

    assert_eq!(paid, 77_777_777);
    assert_eq!(ledger.program.total_shares, 0);
    assert_eq!(ledger.program.total_weight, 0);
    assert_eq!(ledger.stake_vault, 0);
}

#[test]
fn zero_stake_is_rejected() {
    let mut ledger = Ledger::new(1, YEAR, BONUS, 0);
    let err = ledger
        .program
        .credit_stake(&mut ledger.positions[0], 0, START)
        .unwrap_err();
    assert_eq!(error_code(err), u32::from(LedgerError::InvalidAmount));
}

#[test]
fn lock_rejects_nested_entry() {
    let mut program = RewardProgram::default();
    program.lock().unwrap();

    let err = program.lock().unwrap_err();
    assert_eq!(error_code(err), u32::from(LedgerError::Reentrancy));

    program.unlock();
    assert!(program.lock().is_ok());
}
