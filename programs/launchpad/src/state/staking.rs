use anchor_lang::prelude::*;
use crate::constants::*;
use crate::errors::LaunchpadError;

/// Global staking configuration.
///
/// A stake's value is `amount * multiplier / 100`, where the multiplier comes
/// from the lock option the staker picked. The value is mapped onto
/// `tier_levels`, which bounds how much the staker may invest per campaign.
#[account]
#[derive(Default)]
pub struct StakingPool {
    /// Mint of the staked asset
    pub stake_mint: Pubkey,

    /// Lock durations offered, in seconds
    pub locks: Vec<i64>,

    /// Multiplier for each lock option (x100)
    pub multipliers: Vec<u64>,

    /// Ascending upper bounds of each tier; the last one is always u64::MAX
    pub tier_levels: Vec<u64>,

    /// Smallest accepted stake deposit
    pub minimum_amount: u64,

    /// Window after an investment during which withdrawing is penalised
    pub investment_lock_time: i64,

    /// Receives early-exit penalties
    pub penalty_receiver: Pubkey,

    /// Total amount currently staked
    pub total_staked: u64,

    /// Number of open locks
    pub staker_count: u64,

    /// PDA bump seed
    pub bump: u8,

    /// Bump seed of the staking vault token account
    pub vault_bump: u8,
}

impl StakingPool {
    pub const LEN: usize = 8  // discriminator
        + 32  // stake_mint
        + (4 + MAX_LOCK_OPTIONS * 8) // locks
        + (4 + MAX_LOCK_OPTIONS * 8) // multipliers
        + (4 + MAX_TIERS * 8) // tier_levels
        + 8   // minimum_amount
        + 8   // investment_lock_time
        + 32  // penalty_receiver
        + 8   // total_staked
        + 8   // staker_count
        + 1   // bump
        + 1   // vault_bump
        + 32; // padding

    pub fn validate_config(
        locks: &[i64],
        multipliers: &[u64],
        tier_levels: &[u64],
        investment_lock_time: i64,
    ) -> Result<()> {
        require!(
            locks.len() == multipliers.len(),
            LaunchpadError::LockMultiplierMismatch
        );
        require!(
            !locks.is_empty() && locks.len() <= MAX_LOCK_OPTIONS,
            LaunchpadError::InvalidLockOption
        );
        require!(
            locks.iter().all(|l| *l >= 0) && multipliers.iter().all(|m| *m > 0),
            LaunchpadError::InvalidLockOption
        );
        require!(
            !tier_levels.is_empty() && tier_levels.len() <= MAX_TIERS,
            LaunchpadError::TooManyTiers
        );
        require!(
            tier_levels.windows(2).all(|w| w[0] < w[1]),
            LaunchpadError::TierLevelsNotAscending
        );
        require!(
            tier_levels.last() == Some(&u64::MAX),
            LaunchpadError::TierLevelsNotUnbounded
        );
        require!(
            investment_lock_time > 0,
            LaunchpadError::InvalidInvestmentLockTime
        );
        Ok(())
    }

    /// Returns the previous receiver
    pub(crate) fn set_penalty_receiver(&mut self, new_receiver: Pubkey) -> Result<Pubkey> {
        require!(
            new_receiver != Pubkey::default(),
            LaunchpadError::InvalidPenaltyReceiver
        );
        Ok(std::mem::replace(&mut self.penalty_receiver, new_receiver))
    }

    /// (lock_time, multiplier) of an offered lock option
    pub fn lock_option(&self, index: u8) -> Result<(i64, u64)> {
        let index = index as usize;
        match (self.locks.get(index), self.multipliers.get(index)) {
            (Some(lock_time), Some(multiplier)) => Ok((*lock_time, *multiplier)),
            _ => err!(LaunchpadError::InvalidLockOption),
        }
    }

    pub fn get_stake_value(amount: u64, multiplier: u64) -> Result<u64> {
        let value = (amount as u128)
            .checked_mul(multiplier as u128)
            .ok_or(LaunchpadError::Overflow)?
            / MULTIPLIER_SCALE;
        u64::try_from(value).map_err(|_| error!(LaunchpadError::Overflow))
    }

    /// Lowest tier whose threshold covers `stake_value`. A validated pool ends
    /// with u64::MAX, so the result is always below the tier count.
    pub fn get_tier_level(&self, stake_value: u64) -> u8 {
        self.tier_levels
            .iter()
            .position(|threshold| stake_value <= *threshold)
            .unwrap_or(self.tier_levels.len()) as u8
    }

    /// Tier of an investor; no lock counts as a zero stake
    pub fn tier_of(&self, lock: Option<&StakingLock>) -> Result<u8> {
        let stake_value = match lock {
            Some(lock) => lock.stake_value()?,
            None => 0,
        };
        Ok(self.get_tier_level(stake_value))
    }
}

/// A staker's time-locked position
#[account]
#[derive(Default)]
pub struct StakingLock {
    /// The staker's wallet address
    pub owner: Pubkey,

    /// Amount staked
    pub amount: u64,

    /// Reset to now on every deposit
    pub staking_start_timestamp: i64,

    /// Lock duration in seconds; never shortened
    pub lock_time: i64,

    /// Multiplier of the chosen lock option (x100)
    pub multiplier: u64,

    /// Last time this stake backed an investment
    pub last_distribution_timestamp: i64,

    /// PDA bump seed
    pub bump: u8,
}

impl StakingLock {
    pub const LEN: usize = 8  // discriminator
        + 32  // owner
        + 8   // amount
        + 8   // staking_start_timestamp
        + 8   // lock_time
        + 8   // multiplier
        + 8   // last_distribution_timestamp
        + 1   // bump
        + 16; // padding

    pub fn is_open(&self) -> bool {
        self.amount > 0
    }

    pub fn unlock_timestamp(&self) -> i64 {
        self.staking_start_timestamp.saturating_add(self.lock_time)
    }

    pub fn is_unlocked(&self, now: i64) -> bool {
        now >= self.unlock_timestamp()
    }

    pub fn stake_value(&self) -> Result<u64> {
        StakingPool::get_stake_value(self.amount, self.multiplier)
    }

    pub(crate) fn stake(
        &mut self,
        amount: u64,
        lock_time: i64,
        multiplier: u64,
        now: i64,
    ) -> Result<()> {
        require!(amount > 0, LaunchpadError::InvalidAmount);
        require!(
            lock_time >= self.lock_time,
            LaunchpadError::LockTimeDecreased
        );

        if !self.is_open() {
            self.last_distribution_timestamp = now;
        }
        self.amount = self
            .amount
            .checked_add(amount)
            .ok_or(LaunchpadError::Overflow)?;
        self.lock_time = lock_time;
        self.multiplier = multiplier;
        self.staking_start_timestamp = now;
        Ok(())
    }

    pub(crate) fn record_participation(&mut self, now: i64) {
        self.last_distribution_timestamp = now;
    }

    /// Early-exit penalty at `now`: 15% of the stake, decaying linearly to
    /// zero over `investment_lock_time` after the last investment
    pub fn withdrawal_penalty(&self, now: i64, investment_lock_time: i64) -> Result<u64> {
        require!(
            investment_lock_time > 0,
            LaunchpadError::InvalidInvestmentLockTime
        );
        let penalty_end = self
            .last_distribution_timestamp
            .checked_add(investment_lock_time)
            .ok_or(LaunchpadError::Overflow)?;
        if now >= penalty_end {
            return Ok(0);
        }

        let remaining = (penalty_end - now).min(investment_lock_time) as u128;
        let total_applicable_penalty =
            self.amount as u128 * EARLY_EXIT_PENALTY_BPS as u128 / BPS_DENOMINATOR as u128;
        let penalty = total_applicable_penalty
            .checked_mul(remaining)
            .ok_or(LaunchpadError::Overflow)?
            / investment_lock_time as u128;
        u64::try_from(penalty).map_err(|_| error!(LaunchpadError::Overflow))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::test_utils::assert_error;

    const NOW: i64 = 1_700_000_000;
    const INVESTMENT_LOCK: i64 = 30 * ONE_DAY;

    fn pool() -> StakingPool {
        StakingPool {
            locks: vec![0, 30 * ONE_DAY, 90 * ONE_DAY],
            multipliers: vec![100, 150, 200],
            tier_levels: vec![1_000, 5_000, 20_000, u64::MAX],
            minimum_amount: 10,
            investment_lock_time: INVESTMENT_LOCK,
            ..Default::default()
        }
    }

    #[test]
    fn weights_stake_by_multiplier() {
        assert_eq!(StakingPool::get_stake_value(1_000, 150).unwrap(), 1_500);
        assert_eq!(StakingPool::get_stake_value(3, 150).unwrap(), 4);
        assert_eq!(StakingPool::get_stake_value(0, 200).unwrap(), 0);
    }

    #[test]
    fn picks_lowest_covering_tier() {
        let pool = pool();
        assert_eq!(pool.get_tier_level(0), 0);
        assert_eq!(pool.get_tier_level(1_000), 0);
        assert_eq!(pool.get_tier_level(1_001), 1);
        assert_eq!(pool.get_tier_level(20_000), 2);
        assert_eq!(pool.get_tier_level(20_001), 3);

        let bounded = StakingPool {
            tier_levels: vec![10, 20],
            ..Default::default()
        };
        assert_eq!(bounded.get_tier_level(21), 2);
    }

    #[test]
    fn tier_is_monotonic_in_stake_value() {
        let pool = pool();
        let mut previous = 0;
        for value in (0..30_000u64).step_by(37) {
            let tier = pool.get_tier_level(value);
            assert!(tier >= previous);
            previous = tier;
        }
    }

    #[test]
    fn missing_lock_is_lowest_tier() {
        let pool = pool();
        assert_eq!(pool.tier_of(None).unwrap(), 0);

        let lock = StakingLock {
            amount: 4_000,
            multiplier: 200,
            ..Default::default()
        };
        assert_eq!(pool.tier_of(Some(&lock)).unwrap(), 2);
    }

    #[test]
    fn validates_pool_config() {
        assert!(StakingPool::validate_config(&[0, 10], &[100, 150], &[10, u64::MAX], 5).is_ok());
        assert_error(
            StakingPool::validate_config(&[0, 10], &[100], &[10, u64::MAX], 5),
            LaunchpadError::LockMultiplierMismatch,
        );
        assert_error(
            StakingPool::validate_config(&[0], &[100], &[20, 20, u64::MAX], 5),
            LaunchpadError::TierLevelsNotAscending,
        );
        assert_error(
            StakingPool::validate_config(&[0], &[100], &[u64::MAX], 0),
            LaunchpadError::InvalidInvestmentLockTime,
        );
    }

    #[test]
    fn top_tier_must_cover_every_stake() {
        let bounded: Vec<u64> = (1..=MAX_TIERS as u64).map(|i| i * 10).collect();
        assert_error(
            StakingPool::validate_config(&[0], &[100], &bounded, 5),
            LaunchpadError::TierLevelsNotUnbounded,
        );

        let mut levels = bounded;
        *levels.last_mut().unwrap() = u64::MAX;
        StakingPool::validate_config(&[0], &[100], &levels, 5).unwrap();

        let pool = StakingPool {
            tier_levels: levels,
            ..Default::default()
        };
        assert_eq!(pool.get_tier_level(u64::MAX), (MAX_TIERS - 1) as u8);
    }

    #[test]
    fn penalty_receiver_cannot_be_default() {
        let mut pool = pool();
        let first = Pubkey::new_unique();
        pool.penalty_receiver = first;

        assert_error(
            pool.set_penalty_receiver(Pubkey::default()),
            LaunchpadError::InvalidPenaltyReceiver,
        );
        assert_eq!(pool.penalty_receiver, first);

        let second = Pubkey::new_unique();
        assert_eq!(pool.set_penalty_receiver(second).unwrap(), first);
        assert_eq!(pool.penalty_receiver, second);
    }

    #[test]
    fn lock_time_only_extends() {
        let pool = pool();
        let mut lock = StakingLock::default();

        let (lock_time, multiplier) = pool.lock_option(1).unwrap();
        lock.stake(1_000, lock_time, multiplier, NOW).unwrap();
        assert_eq!(lock.last_distribution_timestamp, NOW);

        let (shorter, multiplier) = pool.lock_option(0).unwrap();
        assert_error(
            lock.stake(500, shorter, multiplier, NOW + 10),
            LaunchpadError::LockTimeDecreased,
        );
        assert_eq!(lock.amount, 1_000);

        let (longer, multiplier) = pool.lock_option(2).unwrap();
        lock.stake(500, longer, multiplier, NOW + 10).unwrap();
        assert_eq!(lock.amount, 1_500);
        assert_eq!(lock.lock_time, 90 * ONE_DAY);
        assert_eq!(lock.multiplier, 200);
        assert_eq!(lock.staking_start_timestamp, NOW + 10);
        // extension does not restart the penalty window
        assert_eq!(lock.last_distribution_timestamp, NOW);

        assert_error(pool.lock_option(3), LaunchpadError::InvalidLockOption);
    }

    #[test]
    fn unlocks_after_lock_time() {
        let mut lock = StakingLock::default();
        lock.stake(1_000, 30 * ONE_DAY, 150, NOW).unwrap();

        assert!(!lock.is_unlocked(NOW + 30 * ONE_DAY - 1));
        assert!(lock.is_unlocked(NOW + 30 * ONE_DAY));
    }

    #[test]
    fn penalty_decays_linearly_to_zero() {
        let mut lock = StakingLock::default();
        lock.stake(10_000, 0, 100, NOW).unwrap();

        // immediately: full 15%
        assert_eq!(lock.withdrawal_penalty(NOW, INVESTMENT_LOCK).unwrap(), 1_500);
        // halfway
        assert_eq!(
            lock.withdrawal_penalty(NOW + INVESTMENT_LOCK / 2, INVESTMENT_LOCK).unwrap(),
            750
        );
        // window elapsed
        assert_eq!(
            lock.withdrawal_penalty(NOW + INVESTMENT_LOCK, INVESTMENT_LOCK).unwrap(),
            0
        );

        lock.record_participation(NOW + 100 * ONE_DAY);
        assert_eq!(
            lock.withdrawal_penalty(NOW + 100 * ONE_DAY, INVESTMENT_LOCK).unwrap(),
            1_500
        );
    }
}
