use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};
use crate::state::*;
use crate::constants::*;
use crate::errors::LaunchpadError;
use crate::events::CampaignCreated;

/// Parameters for creating a new campaign
#[derive(AnchorSerialize, AnchorDeserialize, Clone)]
pub struct CreateCampaignParams {
    /// Investment asset to raise (base units)
    pub target_amount: u64,

    /// Declared reward supply; funding must supply at least this much
    pub total_rewards: u64,

    /// Unix timestamps of the phase thresholds
    pub whitelist_start: i64,
    pub sale_start: i64,
    pub distribution_start: i64,

    /// Vesting offsets (seconds after distribution start) and their weights
    pub vesting_rounds: Vec<i64>,
    pub vesting_percentages: Vec<u8>,

    /// Per-tier allocation caps (may be set later)
    pub tier_allocations: Vec<u64>,
}

#[derive(Accounts)]
pub struct CreateCampaign<'info> {
    #[account(
        mut,
        address = config.authority @ LaunchpadError::Unauthorized
    )]
    pub authority: Signer<'info>,

    #[account(
        mut,
        seeds = [LAUNCHPAD_CONFIG_SEED],
        bump = config.bump
    )]
    pub config: Box<Account<'info, LaunchpadConfig>>,

    /// Use Box to reduce stack usage - Campaign is the largest account
    #[account(
        init,
        payer = authority,
        space = Campaign::LEN,
        seeds = [CAMPAIGN_SEED, &(config.campaign_count + 1).to_le_bytes()],
        bump
    )]
    pub campaign: Box<Account<'info, Campaign>>,

    #[account(
        init,
        payer = authority,
        space = Whitelist::LEN,
        seeds = [WHITELIST_SEED, campaign.key().as_ref()],
        bump
    )]
    pub whitelist: Box<Account<'info, Whitelist>>,

    /// CHECK: Receives raised funds and unsold rewards - must not be zero address
    #[account(
        constraint = receiver.key() != Pubkey::default() @ LaunchpadError::NotReceiver
    )]
    pub receiver: UncheckedAccount<'info>,

    pub investment_mint: Box<InterfaceAccount<'info, Mint>>,

    #[account(
        constraint = reward_mint.key() != investment_mint.key() @ LaunchpadError::InvalidMint
    )]
    pub reward_mint: Box<InterfaceAccount<'info, Mint>>,

    #[account(
        init,
        payer = authority,
        token::mint = investment_mint,
        token::authority = campaign,
        token::token_program = token_program,
        seeds = [INVESTMENT_VAULT_SEED, campaign.key().as_ref()],
        bump
    )]
    pub investment_vault: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(
        init,
        payer = authority,
        token::mint = reward_mint,
        token::authority = campaign,
        token::token_program = token_program,
        seeds = [REWARD_VAULT_SEED, campaign.key().as_ref()],
        bump
    )]
    pub reward_vault: Box<InterfaceAccount<'info, TokenAccount>>,

    pub token_program: Interface<'info, TokenInterface>,
    pub system_program: Program<'info, System>,
}

pub fn handler(ctx: Context<CreateCampaign>, params: CreateCampaignParams) -> Result<()> {
    let config = &mut ctx.accounts.config;
    let campaign = &mut ctx.accounts.campaign;
    let whitelist = &mut ctx.accounts.whitelist;
    let clock = Clock::get()?;

    Campaign::validate_timestamps(
        params.whitelist_start,
        params.sale_start,
        params.distribution_start,
    )?;
    require!(
        params.tier_allocations.len() <= MAX_TIERS,
        LaunchpadError::TooManyTiers
    );

    let schedule = VestingSchedule::new(params.vesting_rounds, params.vesting_percentages)?;
    let vault = Vault::new(
        schedule,
        params.target_amount,
        params.total_rewards,
        ctx.accounts.receiver.key(),
        params.distribution_start,
    )?;
    let token_price = vault.token_price()?;

    config.campaign_count = config
        .campaign_count
        .checked_add(1)
        .ok_or(LaunchpadError::Overflow)?;

    campaign.campaign_id = config.campaign_count;
    campaign.investment_mint = ctx.accounts.investment_mint.key();
    campaign.reward_mint = ctx.accounts.reward_mint.key();
    campaign.whitelist = whitelist.key();
    campaign.whitelist_start = params.whitelist_start;
    campaign.sale_start = params.sale_start;
    campaign.distribution_start = params.distribution_start;
    campaign.tier_allocations = params.tier_allocations;
    campaign.vault = vault;
    campaign.investor_count = 0;
    campaign.insured_count = 0;
    campaign.created_at = clock.unix_timestamp;
    campaign.bump = ctx.bumps.campaign;
    campaign.investment_vault_bump = ctx.bumps.investment_vault;
    campaign.reward_vault_bump = ctx.bumps.reward_vault;

    whitelist.campaign = campaign.key();
    whitelist.entries = Vec::new();
    whitelist.bump = ctx.bumps.whitelist;

    emit!(CampaignCreated {
        campaign_id: campaign.campaign_id,
        campaign: campaign.key(),
        investment_mint: campaign.investment_mint,
        reward_mint: campaign.reward_mint,
        receiver: campaign.vault.receiver,
        target_amount: campaign.vault.target_amount,
        total_rewards: campaign.vault.total_rewards,
        token_price,
        whitelist_start: campaign.whitelist_start,
        sale_start: campaign.sale_start,
        distribution_start: campaign.distribution_start,
    });

    Ok(())
}
