use anchor_lang::prelude::*;

// ============================================================
// PROTOCOL EVENTS
// ============================================================

#[event]
pub struct LaunchpadInitialized {
    pub authority: Pubkey,
}

#[event]
pub struct LaunchpadPauseChanged {
    pub paused: bool,
}

#[event]
pub struct AuthorityTransferred {
    pub old_authority: Pubkey,
    pub new_authority: Pubkey,
}

// ============================================================
// CAMPAIGN EVENTS
// ============================================================

#[event]
pub struct CampaignCreated {
    pub campaign_id: u64,
    pub campaign: Pubkey,
    pub investment_mint: Pubkey,
    pub reward_mint: Pubkey,
    pub receiver: Pubkey,
    pub target_amount: u64,
    pub total_rewards: u64,
    pub token_price: u128,
    pub whitelist_start: i64,
    pub sale_start: i64,
    pub distribution_start: i64,
}

#[event]
pub struct CampaignFunded {
    pub campaign_id: u64,
    pub receiver: Pubkey,
    pub supplied: u64,
    pub token_price: u128,
}

#[event]
pub struct TierAllocationsUpdated {
    pub campaign_id: u64,
    pub tier_allocations: Vec<u64>,
}

// ============================================================
// WHITELIST EVENTS
// ============================================================

#[event]
pub struct WhitelistUpdated {
    pub campaign_id: u64,
    pub added: u32,
    pub entry_count: u32,
}

#[event]
pub struct WhitelistRequested {
    pub campaign_id: u64,
    pub investor: Pubkey,
}

// ============================================================
// INVESTMENT EVENTS
// ============================================================

#[event]
pub struct Invested {
    pub campaign_id: u64,
    pub investor: Pubkey,
    pub certificate: Pubkey,
    pub requested: u64,
    pub deposit: u64,
    pub premium: u64,
    pub tier: u8,
    pub invested_amount: u64,
}

#[event]
pub struct RewardsClaimed {
    pub campaign_id: u64,
    pub investor: Pubkey,
    pub amount: u64,
    pub vesting_applicable_round: u64,
}

#[event]
pub struct InvestmentClaimed {
    pub campaign_id: u64,
    pub receiver: Pubkey,
    pub investment_amount: u64,
    pub unsold_rewards: u64,
}

// ============================================================
// STAKING EVENTS
// ============================================================

#[event]
pub struct StakingPoolInitialized {
    pub stake_mint: Pubkey,
    pub penalty_receiver: Pubkey,
    pub tier_count: u8,
}

#[event]
pub struct PenaltyReceiverUpdated {
    pub old_receiver: Pubkey,
    pub new_receiver: Pubkey,
}

#[event]
pub struct Staked {
    pub staker: Pubkey,
    pub amount: u64,
    pub total_staked: u64,
    pub lock_time: i64,
    pub multiplier: u64,
}

#[event]
pub struct StakeWithdrawn {
    pub staker: Pubkey,
    pub amount: u64,
    pub penalty: u64,
    pub penalty_receiver: Pubkey,
}

// ============================================================
// INSURANCE EVENTS
// ============================================================

#[event]
pub struct InsuranceFundCreated {
    pub mint: Pubkey,
    pub insurance_fund: Pubkey,
}

#[event]
pub struct RefundAllowanceIssued {
    pub campaign_id: u64,
    pub campaign: Pubkey,
    pub real_avg_price: u64,
}

#[event]
pub struct RefundClaimed {
    pub campaign_id: u64,
    pub investor: Pubkey,
    pub refund: u64,
    pub premium_balance: u64,
}
