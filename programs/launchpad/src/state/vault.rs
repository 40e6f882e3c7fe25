use anchor_lang::prelude::*;
use crate::constants::*;
use crate::errors::LaunchpadError;
use super::certificate::InvestmentCertificate;
use super::vesting::VestingSchedule;

/// Per-campaign ledger: target raise, reward supply and both asset balances.
///
/// Embedded in the campaign account. The mutating methods are crate-private;
/// only the campaign instructions drive them, after the phase, whitelist and
/// tier checks have passed.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Default, Debug)]
pub struct Vault {
    /// Investment asset to raise
    pub target_amount: u64,

    /// Reward supply backing the sale (replaced by the funded amount)
    pub total_rewards: u64,

    /// Sum of quantized deposits; never exceeds `target_amount`
    pub invested_amount: u64,

    /// Reward asset still held for claims and the unsold return
    pub reward_balance: u64,

    /// Investment asset held until the receiver settles
    pub investment_balance: u64,

    /// Distribution start; vesting offsets count from here
    pub start_timestamp: i64,

    /// Recipient of the raised funds and of unsold rewards
    pub receiver: Pubkey,

    /// Set once the receiver has supplied the reward asset
    pub funded: bool,

    /// Set once the receiver has pulled the raised funds
    pub investment_claimed: bool,

    /// Reward release schedule
    pub schedule: VestingSchedule,
}

/// Amounts released to the receiver by `claim_investment`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InvestmentSettlement {
    pub investment_amount: u64,
    pub unsold_rewards: u64,
}

impl Vault {
    pub const LEN: usize = 8  // target_amount
        + 8   // total_rewards
        + 8   // invested_amount
        + 8   // reward_balance
        + 8   // investment_balance
        + 8   // start_timestamp
        + 32  // receiver
        + 1   // funded
        + 1   // investment_claimed
        + VestingSchedule::LEN;

    pub fn new(
        schedule: VestingSchedule,
        target_amount: u64,
        total_rewards: u64,
        receiver: Pubkey,
        start_timestamp: i64,
    ) -> Result<Self> {
        require!(target_amount > 0, LaunchpadError::InvalidTarget);

        let vault = Self {
            target_amount,
            total_rewards,
            start_timestamp,
            receiver,
            schedule,
            ..Default::default()
        };
        vault.token_price()?;
        Ok(vault)
    }

    /// `target_amount * PRECISION / total_rewards`, always > 0
    pub fn token_price(&self) -> Result<u128> {
        price_for(self.target_amount, self.total_rewards)
    }

    /// Reward units bought by `deposit`
    pub fn user_entitlement(&self, deposit: u64) -> Result<u64> {
        let price = self.token_price()?;
        let units = (deposit as u128)
            .checked_mul(PRECISION)
            .ok_or(LaunchpadError::Overflow)?
            .checked_div(price)
            .ok_or(LaunchpadError::DivisionByZero)?;
        u64::try_from(units).map_err(|_| error!(LaunchpadError::Overflow))
    }

    /// Rounds `deposit` down to a whole number of reward units.
    /// Multiply by PRECISION, divide by price, multiply back; each step truncates.
    pub fn quantize(&self, deposit: u64) -> Result<u64> {
        let price = self.token_price()?;
        let units = (deposit as u128)
            .checked_mul(PRECISION)
            .ok_or(LaunchpadError::Overflow)?
            / price;
        let quantized = units
            .checked_mul(price)
            .ok_or(LaunchpadError::Overflow)?
            / PRECISION;
        u64::try_from(quantized).map_err(|_| error!(LaunchpadError::Overflow))
    }

    pub fn remaining_target(&self) -> u64 {
        self.target_amount.saturating_sub(self.invested_amount)
    }

    pub fn is_distribution_started(&self, now: i64) -> bool {
        now >= self.start_timestamp
    }

    /// Accept the reward supply. The supplied amount becomes the new total,
    /// so supplying more than declared lowers the unit price.
    pub(crate) fn fund(&mut self, supply: u64) -> Result<()> {
        require!(!self.funded, LaunchpadError::AlreadyFunded);
        require!(
            supply >= self.total_rewards,
            LaunchpadError::InsufficientFunds
        );
        price_for(self.target_amount, supply)?;

        self.total_rewards = supply;
        self.reward_balance = supply;
        self.funded = true;
        Ok(())
    }

    /// Book a deposit and return the quantized amount the certificate holds
    pub(crate) fn mint_investment_certificate(&mut self, deposit: u64) -> Result<u64> {
        let quantized = self.quantize(deposit)?;
        require!(quantized > 0, LaunchpadError::DepositTooSmall);

        let invested_amount = self
            .invested_amount
            .checked_add(quantized)
            .ok_or(LaunchpadError::Overflow)?;
        require!(
            invested_amount <= self.target_amount,
            LaunchpadError::TargetExceeded
        );

        self.invested_amount = invested_amount;
        self.investment_balance = self
            .investment_balance
            .checked_add(quantized)
            .ok_or(LaunchpadError::Overflow)?;
        Ok(quantized)
    }

    /// Pay out every round elapsed since the certificate's last claim.
    /// The certificate advances even when the payout is zero.
    pub(crate) fn claim(&mut self, certificate: &mut InvestmentCertificate, now: i64) -> Result<u64> {
        let last_applicable_round = self
            .schedule
            .last_applicable_round(self.start_timestamp, now);
        require!(last_applicable_round > 0, LaunchpadError::VestingNotStarted);

        let percentage = self
            .schedule
            .percentage_between(certificate.vesting_applicable_round, last_applicable_round);
        let entitlement = self.user_entitlement(certificate.deposit)?;
        let payout = (entitlement as u128)
            .checked_mul(percentage as u128)
            .ok_or(LaunchpadError::Overflow)?
            / PERCENT_DENOMINATOR as u128;
        let payout = u64::try_from(payout).map_err(|_| error!(LaunchpadError::Overflow))?;

        self.reward_balance = self
            .reward_balance
            .checked_sub(payout)
            .ok_or(LaunchpadError::InsufficientVaultBalance)?;

        certificate.vesting_applicable_round = certificate
            .vesting_applicable_round
            .max(last_applicable_round);
        certificate.total_claimed = certificate
            .total_claimed
            .checked_add(payout)
            .ok_or(LaunchpadError::Overflow)?;

        Ok(payout)
    }

    /// One-shot settlement for the receiver once distribution has begun
    pub(crate) fn claim_investment(&mut self, now: i64) -> Result<InvestmentSettlement> {
        require!(
            self.is_distribution_started(now),
            LaunchpadError::NotDistributionPhase
        );
        require!(
            !self.investment_claimed,
            LaunchpadError::InvestmentAlreadyClaimed
        );

        let investment_amount = self.invested_amount.min(self.target_amount);

        let unsold_rewards = if self.invested_amount < self.target_amount {
            let unsold = (self.remaining_target() as u128)
                .checked_mul(PRECISION)
                .ok_or(LaunchpadError::Overflow)?
                / self.token_price()?;
            // the truncated price overstates unsold supply by up to about
            // total_rewards / price units; cap at what the vault holds
            u64::try_from(unsold)
                .map_err(|_| error!(LaunchpadError::Overflow))?
                .min(self.reward_balance)
        } else {
            0
        };

        self.investment_balance = self
            .investment_balance
            .checked_sub(investment_amount)
            .ok_or(LaunchpadError::InsufficientVaultBalance)?;
        self.reward_balance = self
            .reward_balance
            .checked_sub(unsold_rewards)
            .ok_or(LaunchpadError::InsufficientVaultBalance)?;
        self.investment_claimed = true;

        Ok(InvestmentSettlement {
            investment_amount,
            unsold_rewards,
        })
    }
}

fn price_for(target_amount: u64, total_rewards: u64) -> Result<u128> {
    require!(total_rewards > 0, LaunchpadError::ZeroTokenPrice);
    let price = (target_amount as u128)
        .checked_mul(PRECISION)
        .ok_or(LaunchpadError::Overflow)?
        / total_rewards as u128;
    require!(price > 0, LaunchpadError::ZeroTokenPrice);
    Ok(price)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::test_utils::assert_error;

    const START: i64 = 1_700_000_000;

    fn schedule() -> VestingSchedule {
        VestingSchedule::new(
            vec![30 * ONE_DAY, 60 * ONE_DAY, 90 * ONE_DAY],
            vec![40, 30, 30],
        )
        .unwrap()
    }

    fn funded_vault() -> Vault {
        let mut vault =
            Vault::new(schedule(), 100_000, 10_000, Pubkey::new_unique(), START).unwrap();
        vault.fund(10_000).unwrap();
        vault
    }

    fn certificate(deposit: u64) -> InvestmentCertificate {
        InvestmentCertificate {
            deposit,
            ..Default::default()
        }
    }

    #[test]
    fn prices_with_fixed_point_scale() {
        let vault = funded_vault();
        assert_eq!(vault.token_price().unwrap(), 10 * PRECISION);
        assert_eq!(vault.user_entitlement(1_000).unwrap(), 100);
    }

    #[test]
    fn rejects_zero_token_price() {
        // 1 * PRECISION / (PRECISION + 1) truncates to zero
        assert_error(
            Vault::new(schedule(), 1, PRECISION as u64 + 1, Pubkey::new_unique(), START),
            LaunchpadError::ZeroTokenPrice,
        );
        assert_error(
            Vault::new(schedule(), 1_000, 0, Pubkey::new_unique(), START),
            LaunchpadError::ZeroTokenPrice,
        );
        assert_error(
            Vault::new(schedule(), 0, 10, Pubkey::new_unique(), START),
            LaunchpadError::InvalidTarget,
        );
    }

    #[test]
    fn funds_once_and_adopts_supplied_amount() {
        let mut vault =
            Vault::new(schedule(), 100_000, 10_000, Pubkey::new_unique(), START).unwrap();

        assert_error(vault.fund(9_999), LaunchpadError::InsufficientFunds);
        assert!(!vault.funded);

        vault.fund(20_000).unwrap();
        assert!(vault.funded);
        assert_eq!(vault.total_rewards, 20_000);
        assert_eq!(vault.reward_balance, 20_000);
        assert_eq!(vault.token_price().unwrap(), 5 * PRECISION);

        assert_error(vault.fund(20_000), LaunchpadError::AlreadyFunded);
    }

    #[test]
    fn quantizes_deposit_to_whole_reward_units() {
        let mut vault = funded_vault();

        assert_eq!(vault.quantize(105).unwrap(), 100);
        assert_eq!(vault.quantize(9).unwrap(), 0);

        let deposit = vault.mint_investment_certificate(105).unwrap();
        assert_eq!(deposit, 100);
        assert_eq!(vault.invested_amount, 100);
        assert_eq!(vault.investment_balance, 100);

        assert_error(
            vault.mint_investment_certificate(9),
            LaunchpadError::DepositTooSmall,
        );
    }

    #[test]
    fn never_invests_beyond_target() {
        let mut vault = funded_vault();

        vault.mint_investment_certificate(99_990).unwrap();
        assert_error(
            vault.mint_investment_certificate(20),
            LaunchpadError::TargetExceeded,
        );
        assert_eq!(vault.invested_amount, 99_990);

        vault.mint_investment_certificate(10).unwrap();
        assert_eq!(vault.invested_amount, vault.target_amount);
        assert_eq!(vault.remaining_target(), 0);
    }

    #[test]
    fn claims_vested_rounds_once() {
        let mut vault = funded_vault();
        let deposit = vault.mint_investment_certificate(1_000).unwrap();
        let mut cert = certificate(deposit);

        assert_error(
            vault.claim(&mut cert, START + 29 * ONE_DAY),
            LaunchpadError::VestingNotStarted,
        );
        assert_eq!(cert.vesting_applicable_round, 0);

        assert_eq!(vault.claim(&mut cert, START + 65 * ONE_DAY).unwrap(), 70);
        assert_eq!(cert.vesting_applicable_round, 2);

        // same window again pays nothing
        assert_eq!(vault.claim(&mut cert, START + 66 * ONE_DAY).unwrap(), 0);
        assert_eq!(cert.vesting_applicable_round, 2);

        assert_eq!(vault.claim(&mut cert, START + 95 * ONE_DAY).unwrap(), 30);
        assert_eq!(cert.vesting_applicable_round, 3);
        assert_eq!(cert.total_claimed, 100);
        assert_eq!(vault.reward_balance, 10_000 - 100);

        assert_eq!(vault.claim(&mut cert, START + 400 * ONE_DAY).unwrap(), 0);
        assert_eq!(cert.total_claimed, 100);
    }

    #[test]
    fn advances_round_on_zero_payout() {
        let mut vault = funded_vault();
        // one reward unit: 40% of it truncates to nothing
        let deposit = vault.mint_investment_certificate(10).unwrap();
        let mut cert = certificate(deposit);
        assert_eq!(vault.user_entitlement(cert.deposit).unwrap(), 1);

        assert_eq!(vault.claim(&mut cert, START + 30 * ONE_DAY).unwrap(), 0);
        assert_eq!(cert.vesting_applicable_round, 1);

        // the first round is not counted again: 60% of one unit is still zero
        assert_eq!(vault.claim(&mut cert, START + 95 * ONE_DAY).unwrap(), 0);
        assert_eq!(cert.vesting_applicable_round, 3);
        assert_eq!(cert.total_claimed, 0);
        assert_eq!(vault.reward_balance, 10_000);
    }

    #[test]
    fn settles_undersubscribed_sale_once() {
        let mut vault = funded_vault();
        vault.mint_investment_certificate(60_000).unwrap();

        assert_error(
            vault.claim_investment(START - 1),
            LaunchpadError::NotDistributionPhase,
        );

        let settlement = vault.claim_investment(START).unwrap();
        assert_eq!(
            settlement,
            InvestmentSettlement {
                investment_amount: 60_000,
                unsold_rewards: 4_000,
            }
        );
        assert_eq!(vault.investment_balance, 0);
        assert_eq!(vault.reward_balance, 6_000);

        assert_error(
            vault.claim_investment(START + 1),
            LaunchpadError::InvestmentAlreadyClaimed,
        );
    }

    #[test]
    fn settles_full_sale_without_unsold_return() {
        let mut vault = funded_vault();
        vault.mint_investment_certificate(100_000).unwrap();

        let settlement = vault.claim_investment(START).unwrap();
        assert_eq!(settlement.investment_amount, 100_000);
        assert_eq!(settlement.unsold_rewards, 0);
        assert_eq!(vault.reward_balance, 10_000);
    }
}
