use anchor_lang::prelude::*;

pub mod constants;
pub mod errors;
pub mod events;
pub mod instructions;
pub mod state;

use instructions::*;

declare_id!("AhSGC6pkQRqEKKzwLpZFfUPWuWXRJXN8SpTVU2fD9adx");

#[program]
pub mod launchpad {
    use super::*;

    // ============ Launchpad Initialization ============

    /// Create the launchpad config with the signer as authority (one-time setup)
    pub fn initialize_launchpad(ctx: Context<InitializeLaunchpad>) -> Result<()> {
        instructions::initialize_launchpad::handler(ctx)
    }

    // ============ Campaign Lifecycle ============

    /// Create a campaign with its vault, vesting schedule and whitelist
    pub fn create_campaign(
        ctx: Context<CreateCampaign>,
        params: CreateCampaignParams,
    ) -> Result<()> {
        instructions::create_campaign::handler(ctx, params)
    }

    /// Receiver supplies the reward asset before the sale opens
    pub fn fund_campaign(ctx: Context<FundCampaign>, supply: u64) -> Result<()> {
        instructions::fund_campaign::handler(ctx, supply)
    }

    /// Replace the per-tier allocation caps (before the sale)
    pub fn set_tier_allocations(
        ctx: Context<SetTierAllocations>,
        tier_allocations: Vec<u64>,
    ) -> Result<()> {
        instructions::admin::set_tier_allocations_handler(ctx, tier_allocations)
    }

    /// Invest during the sale; `insured` also pays the 15% premium
    pub fn invest(ctx: Context<Invest>, amount: u64, insured: bool) -> Result<()> {
        instructions::invest::handler(ctx, amount, insured)
    }

    /// Claim rewards vested since the certificate's last claim
    pub fn claim_rewards(ctx: Context<ClaimRewards>) -> Result<()> {
        instructions::claim::claim_rewards_handler(ctx)
    }

    /// Receiver collects raised funds and unsold rewards (once)
    pub fn claim_investment(ctx: Context<ClaimInvestment>) -> Result<()> {
        instructions::claim::claim_investment_handler(ctx)
    }

    // ============ Whitelist ============

    /// Add one address to a campaign's whitelist
    pub fn add_to_whitelist(ctx: Context<ManageWhitelist>, investor: Pubkey) -> Result<()> {
        instructions::whitelist::add_to_whitelist_handler(ctx, investor)
    }

    /// Add a batch of addresses to a campaign's whitelist
    pub fn bulk_add_to_whitelist(
        ctx: Context<ManageWhitelist>,
        investors: Vec<Pubkey>,
    ) -> Result<()> {
        instructions::whitelist::bulk_add_to_whitelist_handler(ctx, investors)
    }

    /// Request whitelisting during the whitelist phase
    pub fn apply_for_whitelist(ctx: Context<ApplyForWhitelist>) -> Result<()> {
        instructions::whitelist::apply_for_whitelist_handler(ctx)
    }

    // ============ Staking ============

    pub fn initialize_staking_pool(
        ctx: Context<InitializeStakingPool>,
        params: StakingPoolParams,
    ) -> Result<()> {
        instructions::staking::initialize_staking_pool_handler(ctx, params)
    }

    pub fn set_penalty_receiver(
        ctx: Context<SetPenaltyReceiver>,
        new_receiver: Pubkey,
    ) -> Result<()> {
        instructions::staking::set_penalty_receiver_handler(ctx, new_receiver)
    }

    /// Stake into (or extend) the caller's lock using lock option `lock_index`
    pub fn stake(ctx: Context<Stake>, amount: u64, lock_index: u8) -> Result<()> {
        instructions::staking::stake_handler(ctx, amount, lock_index)
    }

    /// Withdraw an expired lock, paying any early-exit penalty
    pub fn withdraw_stake(ctx: Context<WithdrawStake>) -> Result<()> {
        instructions::staking::withdraw_stake_handler(ctx)
    }

    // ============ Insurance ============

    pub fn create_insurance_fund(ctx: Context<CreateInsuranceFund>) -> Result<()> {
        instructions::insurance::create_insurance_fund_handler(ctx)
    }

    /// Publish the realised average price (x10_000) of a campaign
    pub fn issue_refund_allowance(
        ctx: Context<IssueRefundAllowance>,
        real_avg_price: u64,
    ) -> Result<()> {
        instructions::insurance::issue_refund_allowance_handler(ctx, real_avg_price)
    }

    /// Claim the price-protection refund of an insured certificate
    pub fn claim_refund(ctx: Context<ClaimRefund>) -> Result<()> {
        instructions::insurance::claim_refund_handler(ctx)
    }

    // ============ Admin Functions ============

    /// Pause/unpause investing, staking and whitelist requests
    pub fn set_paused(ctx: Context<SetPaused>, paused: bool) -> Result<()> {
        instructions::admin::set_paused_handler(ctx, paused)
    }

    /// Hand the authority to a new address
    pub fn transfer_authority(ctx: Context<TransferAuthority>) -> Result<()> {
        instructions::admin::transfer_authority_handler(ctx)
    }
}
