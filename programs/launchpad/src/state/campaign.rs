use anchor_lang::prelude::*;
use crate::constants::*;
use crate::errors::LaunchpadError;
use super::vault::{InvestmentSettlement, Vault};
use super::whitelist::Whitelist;

/// Campaign phase, derived from the clock on every call and never stored
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, Debug)]
pub enum Phase {
    /// Before the whitelist opens
    PreWhitelist,
    /// Investors may request whitelisting
    Whitelist,
    /// Buffer day between whitelist close and sale start
    PreSale,
    /// Whitelisted investors may invest
    Sale,
    /// Rewards vest; the receiver may settle
    Distribution,
}

/// Main campaign account - one per sale
#[account]
#[derive(Default)]
pub struct Campaign {
    // ============================================================
    // IDENTIFICATION
    // ============================================================

    /// Sequential identifier
    pub campaign_id: u64,

    /// Asset raised from investors
    pub investment_mint: Pubkey,

    /// Asset distributed as rewards
    pub reward_mint: Pubkey,

    /// Whitelist account gating this campaign
    pub whitelist: Pubkey,

    // ============================================================
    // PHASE THRESHOLDS
    // ============================================================

    pub whitelist_start: i64,
    pub sale_start: i64,
    pub distribution_start: i64,

    // ============================================================
    // ALLOCATION
    // ============================================================

    /// Maximum deposit per investor, indexed by staking tier
    pub tier_allocations: Vec<u64>,

    // ============================================================
    // ACCOUNTING
    // ============================================================

    pub vault: Vault,

    /// Number of certificates minted
    pub investor_count: u32,

    /// Number of insured certificates minted
    pub insured_count: u32,

    /// Timestamp when the campaign was created
    pub created_at: i64,

    // ============================================================
    // PDA
    // ============================================================

    pub bump: u8,
    pub investment_vault_bump: u8,
    pub reward_vault_bump: u8,
}

impl Campaign {
    pub const LEN: usize = 8  // discriminator
        + 8   // campaign_id
        + 32  // investment_mint
        + 32  // reward_mint
        + 32  // whitelist
        + 8   // whitelist_start
        + 8   // sale_start
        + 8   // distribution_start
        + (4 + MAX_TIERS * 8) // tier_allocations
        + Vault::LEN
        + 4   // investor_count
        + 4   // insured_count
        + 8   // created_at
        + 1   // bump
        + 1   // investment_vault_bump
        + 1   // reward_vault_bump
        + 32; // padding

    pub fn validate_timestamps(
        whitelist_start: i64,
        sale_start: i64,
        distribution_start: i64,
    ) -> Result<()> {
        let whitelist_end = sale_start
            .checked_sub(WHITELIST_CLOSE_BUFFER)
            .ok_or(LaunchpadError::InvalidPhaseTimestamps)?;
        require!(
            whitelist_start < whitelist_end && sale_start < distribution_start,
            LaunchpadError::InvalidPhaseTimestamps
        );
        Ok(())
    }

    pub fn phase(&self, now: i64) -> Phase {
        if now < self.whitelist_start {
            Phase::PreWhitelist
        } else if now < self.sale_start.saturating_sub(WHITELIST_CLOSE_BUFFER) {
            Phase::Whitelist
        } else if now < self.sale_start {
            Phase::PreSale
        } else if now < self.distribution_start {
            Phase::Sale
        } else {
            Phase::Distribution
        }
    }

    pub fn is_before_sale(&self, now: i64) -> bool {
        matches!(
            self.phase(now),
            Phase::PreWhitelist | Phase::Whitelist | Phase::PreSale
        )
    }

    /// Allocation cap of a tier; tiers without a configured cap get nothing
    pub fn allocation_for_tier(&self, tier: u8) -> u64 {
        self.tier_allocations
            .get(tier as usize)
            .copied()
            .unwrap_or(0)
    }

    pub(crate) fn set_tier_allocations(&mut self, caps: Vec<u64>, now: i64) -> Result<()> {
        require!(caps.len() <= MAX_TIERS, LaunchpadError::TooManyTiers);
        require!(self.is_before_sale(now), LaunchpadError::SaleAlreadyStarted);
        self.tier_allocations = caps;
        Ok(())
    }

    pub(crate) fn fund(&mut self, supply: u64, now: i64) -> Result<()> {
        require!(self.is_before_sale(now), LaunchpadError::SaleAlreadyStarted);
        self.vault.fund(supply)
    }

    pub(crate) fn apply_for_whitelist(
        &self,
        whitelist: &mut Whitelist,
        investor: Pubkey,
        now: i64,
    ) -> Result<()> {
        require!(
            self.phase(now) == Phase::Whitelist,
            LaunchpadError::NotWhitelistPhase
        );
        require!(self.vault.funded, LaunchpadError::NotFunded);
        whitelist.request(investor)
    }

    pub(crate) fn add_to_whitelist(
        &self,
        whitelist: &mut Whitelist,
        investors: &[Pubkey],
        now: i64,
    ) -> Result<u32> {
        require!(
            self.phase(now) != Phase::Distribution,
            LaunchpadError::DistributionAlreadyStarted
        );
        whitelist.bulk_add(investors)
    }

    /// Run every gate for an investment and book it in the vault.
    /// Returns the quantized deposit the certificate will hold.
    pub(crate) fn invest(
        &mut self,
        whitelist: &mut Whitelist,
        investor: &Pubkey,
        amount: u64,
        tier: u8,
        now: i64,
    ) -> Result<u64> {
        require!(self.phase(now) == Phase::Sale, LaunchpadError::NotSalePhase);
        require!(self.vault.funded, LaunchpadError::NotFunded);
        require!(whitelist.is_member(investor), LaunchpadError::NotWhitelisted);
        require!(
            !whitelist.has_invested(investor),
            LaunchpadError::AlreadyInvested
        );

        let quantized = self.vault.quantize(amount)?;
        require!(
            quantized <= self.allocation_for_tier(tier),
            LaunchpadError::AllocationExceeded
        );

        let deposit = self.vault.mint_investment_certificate(amount)?;
        whitelist.mark_invested(investor)?;
        self.investor_count = self
            .investor_count
            .checked_add(1)
            .ok_or(LaunchpadError::Overflow)?;
        Ok(deposit)
    }

    pub(crate) fn claim_investment(&mut self, now: i64) -> Result<InvestmentSettlement> {
        require!(
            self.phase(now) == Phase::Distribution,
            LaunchpadError::NotDistributionPhase
        );
        self.vault.claim_investment(now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::test_utils::assert_error;
    use crate::state::staking::{StakingLock, StakingPool};
    use crate::state::vesting::VestingSchedule;

    const WHITELIST_START: i64 = 1_700_000_000;
    const SALE_START: i64 = WHITELIST_START + 7 * ONE_DAY;
    const DISTRIBUTION_START: i64 = SALE_START + 3 * ONE_DAY;

    fn campaign() -> Campaign {
        let schedule = VestingSchedule::new(vec![0, 30 * ONE_DAY], vec![50, 50]).unwrap();
        Campaign {
            whitelist_start: WHITELIST_START,
            sale_start: SALE_START,
            distribution_start: DISTRIBUTION_START,
            tier_allocations: vec![500, 2_000, 10_000],
            vault: Vault::new(
                schedule,
                100_000,
                10_000,
                Pubkey::new_unique(),
                DISTRIBUTION_START,
            )
            .unwrap(),
            ..Default::default()
        }
    }

    fn funded_campaign() -> Campaign {
        let mut campaign = campaign();
        campaign.fund(10_000, WHITELIST_START).unwrap();
        campaign
    }

    #[test]
    fn derives_phase_from_clock() {
        let campaign = campaign();
        assert_eq!(campaign.phase(WHITELIST_START - 1), Phase::PreWhitelist);
        assert_eq!(campaign.phase(WHITELIST_START), Phase::Whitelist);
        assert_eq!(campaign.phase(SALE_START - ONE_DAY - 1), Phase::Whitelist);
        assert_eq!(campaign.phase(SALE_START - ONE_DAY), Phase::PreSale);
        assert_eq!(campaign.phase(SALE_START - 1), Phase::PreSale);
        assert_eq!(campaign.phase(SALE_START), Phase::Sale);
        assert_eq!(campaign.phase(DISTRIBUTION_START - 1), Phase::Sale);
        assert_eq!(campaign.phase(DISTRIBUTION_START), Phase::Distribution);
    }

    #[test]
    fn validates_phase_ordering() {
        assert!(Campaign::validate_timestamps(WHITELIST_START, SALE_START, DISTRIBUTION_START).is_ok());
        assert_error(
            Campaign::validate_timestamps(SALE_START - ONE_DAY, SALE_START, DISTRIBUTION_START),
            LaunchpadError::InvalidPhaseTimestamps,
        );
        assert_error(
            Campaign::validate_timestamps(WHITELIST_START, SALE_START, SALE_START),
            LaunchpadError::InvalidPhaseTimestamps,
        );
    }

    #[test]
    fn whitelist_requests_need_funding_and_phase() {
        let mut whitelist = Whitelist::default();
        let investor = Pubkey::new_unique();

        let unfunded = campaign();
        assert_error(
            unfunded.apply_for_whitelist(&mut whitelist, investor, WHITELIST_START),
            LaunchpadError::NotFunded,
        );

        let campaign = funded_campaign();
        assert_error(
            campaign.apply_for_whitelist(&mut whitelist, investor, SALE_START - ONE_DAY),
            LaunchpadError::NotWhitelistPhase,
        );
        campaign
            .apply_for_whitelist(&mut whitelist, investor, WHITELIST_START)
            .unwrap();
        assert_error(
            campaign.apply_for_whitelist(&mut whitelist, investor, WHITELIST_START + 1),
            LaunchpadError::AlreadyRequested,
        );
    }

    #[test]
    fn funding_closes_at_sale_start() {
        let mut campaign = campaign();
        assert_error(
            campaign.fund(10_000, SALE_START),
            LaunchpadError::SaleAlreadyStarted,
        );
        campaign.fund(10_000, SALE_START - 1).unwrap();
    }

    #[test]
    fn invest_composes_phase_whitelist_and_tier_gates() {
        let mut campaign = funded_campaign();
        let mut whitelist = Whitelist::default();
        let investor = Pubkey::new_unique();

        assert_error(
            campaign.invest(&mut whitelist, &investor, 100, 1, SALE_START),
            LaunchpadError::NotWhitelisted,
        );

        campaign
            .add_to_whitelist(&mut whitelist, &[investor], WHITELIST_START)
            .unwrap();

        assert_error(
            campaign.invest(&mut whitelist, &investor, 100, 1, SALE_START - 1),
            LaunchpadError::NotSalePhase,
        );
        assert_error(
            campaign.invest(&mut whitelist, &investor, 2_010, 1, SALE_START),
            LaunchpadError::AllocationExceeded,
        );
        assert_error(
            campaign.invest(&mut whitelist, &investor, 100, 7, SALE_START),
            LaunchpadError::AllocationExceeded,
        );
        assert!(whitelist.can_invest(&investor));

        // 2_009 quantizes to 2_000, which fits tier 1
        let deposit = campaign
            .invest(&mut whitelist, &investor, 2_009, 1, SALE_START)
            .unwrap();
        assert_eq!(deposit, 2_000);
        assert_eq!(campaign.vault.invested_amount, 2_000);
        assert_eq!(campaign.investor_count, 1);
        assert!(!whitelist.can_invest(&investor));

        assert_error(
            campaign.invest(&mut whitelist, &investor, 100, 1, SALE_START + 1),
            LaunchpadError::AlreadyInvested,
        );
    }

    #[test]
    fn failed_invest_leaves_whitelist_untouched() {
        let mut campaign = funded_campaign();
        campaign.tier_allocations = vec![u64::MAX];
        let mut whitelist = Whitelist::default();
        let investor = Pubkey::new_unique();
        campaign
            .add_to_whitelist(&mut whitelist, &[investor], WHITELIST_START)
            .unwrap();

        assert_error(
            campaign.invest(&mut whitelist, &investor, 100_010, 0, SALE_START),
            LaunchpadError::TargetExceeded,
        );
        assert!(whitelist.can_invest(&investor));
        assert_eq!(campaign.vault.invested_amount, 0);
    }

    #[test]
    fn top_staker_gets_top_tier_cap() {
        let mut levels: Vec<u64> = (1..MAX_TIERS as u64).map(|i| i * 10).collect();
        levels.push(u64::MAX);
        StakingPool::validate_config(&[0], &[100], &levels, ONE_DAY).unwrap();
        let pool = StakingPool {
            tier_levels: levels,
            ..Default::default()
        };

        let mut campaign = funded_campaign();
        campaign
            .set_tier_allocations(vec![100; MAX_TIERS], WHITELIST_START)
            .unwrap();
        let mut whitelist = Whitelist::default();
        let staker = Pubkey::new_unique();
        let newcomer = Pubkey::new_unique();
        campaign
            .add_to_whitelist(&mut whitelist, &[staker, newcomer], WHITELIST_START)
            .unwrap();

        let lock = StakingLock {
            amount: 1_000,
            multiplier: 100,
            ..Default::default()
        };
        let staker_tier = pool.tier_of(Some(&lock)).unwrap();
        assert_eq!(staker_tier, (MAX_TIERS - 1) as u8);
        assert_eq!(pool.tier_of(None).unwrap(), 0);

        assert_eq!(
            campaign
                .invest(&mut whitelist, &newcomer, 100, 0, SALE_START)
                .unwrap(),
            100
        );
        assert_eq!(
            campaign
                .invest(&mut whitelist, &staker, 100, staker_tier, SALE_START)
                .unwrap(),
            100
        );
    }

    #[test]
    fn tier_caps_freeze_at_sale_start() {
        let mut campaign = campaign();
        campaign
            .set_tier_allocations(vec![1, 2, 3], SALE_START - 1)
            .unwrap();
        assert_eq!(campaign.allocation_for_tier(2), 3);
        assert_eq!(campaign.allocation_for_tier(3), 0);

        assert_error(
            campaign.set_tier_allocations(vec![1], SALE_START),
            LaunchpadError::SaleAlreadyStarted,
        );
        assert_error(
            campaign.set_tier_allocations(vec![0; MAX_TIERS + 1], WHITELIST_START),
            LaunchpadError::TooManyTiers,
        );
    }

    #[test]
    fn receiver_settles_only_in_distribution() {
        let mut campaign = funded_campaign();
        assert_error(
            campaign.claim_investment(DISTRIBUTION_START - 1),
            LaunchpadError::NotDistributionPhase,
        );
        let settlement = campaign.claim_investment(DISTRIBUTION_START).unwrap();
        assert_eq!(settlement.investment_amount, 0);
        assert_eq!(settlement.unsold_rewards, 10_000);
    }
}
