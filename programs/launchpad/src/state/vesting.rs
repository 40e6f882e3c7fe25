use anchor_lang::prelude::*;
use crate::constants::*;
use crate::errors::LaunchpadError;

/// Release schedule for a campaign's rewards.
///
/// `rounds[i]` is an offset in seconds from the distribution start; once it
/// has elapsed, `percentages[i]` more percent of every certificate's
/// entitlement becomes claimable.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Default, Debug, PartialEq, Eq)]
pub struct VestingSchedule {
    /// Offsets from distribution start, ascending
    pub rounds: Vec<i64>,

    /// Whole-percent weight released by each round
    pub percentages: Vec<u8>,
}

impl VestingSchedule {
    pub const LEN: usize = (4 + MAX_VESTING_ROUNDS * 8) // rounds
        + (4 + MAX_VESTING_ROUNDS); // percentages

    pub fn new(rounds: Vec<i64>, percentages: Vec<u8>) -> Result<Self> {
        require!(
            rounds.len() == percentages.len(),
            LaunchpadError::VestingLengthMismatch
        );
        require!(
            !rounds.is_empty() && rounds.len() <= MAX_VESTING_ROUNDS,
            LaunchpadError::InvalidVestingRounds
        );
        require!(
            rounds.first().map_or(false, |first| *first >= 0)
                && rounds.windows(2).all(|w| w[0] < w[1]),
            LaunchpadError::VestingRoundsNotAscending
        );

        let total: u64 = percentages.iter().map(|p| *p as u64).sum();
        require!(
            total == PERCENT_DENOMINATOR,
            LaunchpadError::InvalidVestingPercentages
        );

        Ok(Self { rounds, percentages })
    }

    /// Number of rounds whose offset from `start` has elapsed at `now`
    pub fn last_applicable_round(&self, start: i64, now: i64) -> u64 {
        self.rounds
            .iter()
            .take_while(|offset| start.saturating_add(**offset) <= now)
            .count() as u64
    }

    /// Summed percentage of rounds in `[from, to)`
    pub fn percentage_between(&self, from: u64, to: u64) -> u64 {
        if from >= to {
            return 0;
        }
        self.percentages
            .iter()
            .skip(from as usize)
            .take((to - from) as usize)
            .map(|p| *p as u64)
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::test_utils::assert_error;

    fn three_rounds() -> VestingSchedule {
        VestingSchedule::new(
            vec![30 * ONE_DAY, 60 * ONE_DAY, 90 * ONE_DAY],
            vec![40, 30, 30],
        )
        .unwrap()
    }

    #[test]
    fn counts_elapsed_rounds() {
        let schedule = three_rounds();
        let start = 1_000;

        assert_eq!(schedule.last_applicable_round(start, start), 0);
        assert_eq!(schedule.last_applicable_round(start, start + 30 * ONE_DAY - 1), 0);
        assert_eq!(schedule.last_applicable_round(start, start + 30 * ONE_DAY), 1);
        assert_eq!(schedule.last_applicable_round(start, start + 65 * ONE_DAY), 2);
        assert_eq!(schedule.last_applicable_round(start, start + 365 * ONE_DAY), 3);
    }

    #[test]
    fn sums_percentages_in_half_open_range() {
        let schedule = three_rounds();

        assert_eq!(schedule.percentage_between(0, 2), 70);
        assert_eq!(schedule.percentage_between(2, 3), 30);
        assert_eq!(schedule.percentage_between(0, 3), 100);
        assert_eq!(schedule.percentage_between(2, 2), 0);
        assert_eq!(schedule.percentage_between(3, 1), 0);
    }

    #[test]
    fn rejects_malformed_schedules() {
        assert_error(
            VestingSchedule::new(vec![0, 10], vec![100]),
            LaunchpadError::VestingLengthMismatch,
        );
        assert_error(
            VestingSchedule::new(vec![], vec![]),
            LaunchpadError::InvalidVestingRounds,
        );
        assert_error(
            VestingSchedule::new(vec![10, 10], vec![50, 50]),
            LaunchpadError::VestingRoundsNotAscending,
        );
        assert_error(
            VestingSchedule::new(vec![-5, 10], vec![50, 50]),
            LaunchpadError::VestingRoundsNotAscending,
        );
        assert_error(
            VestingSchedule::new(vec![0, 10], vec![50, 40]),
            LaunchpadError::InvalidVestingPercentages,
        );
    }
}
