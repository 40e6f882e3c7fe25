use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};
use crate::state::*;
use crate::constants::*;
use crate::errors::LaunchpadError;
use crate::events::Invested;
use super::token_transfer::transfer_tokens;

/// Whitelisted investor buys into a campaign during its sale
#[derive(Accounts)]
pub struct Invest<'info> {
    #[account(mut)]
    pub investor: Signer<'info>,

    #[account(
        mut,
        seeds = [LAUNCHPAD_CONFIG_SEED],
        bump = config.bump
    )]
    pub config: Box<Account<'info, LaunchpadConfig>>,

    #[account(
        mut,
        seeds = [CAMPAIGN_SEED, &campaign.campaign_id.to_le_bytes()],
        bump = campaign.bump
    )]
    pub campaign: Box<Account<'info, Campaign>>,

    #[account(
        mut,
        seeds = [WHITELIST_SEED, campaign.key().as_ref()],
        bump = whitelist.bump,
        constraint = whitelist.key() == campaign.whitelist @ LaunchpadError::CampaignMismatch
    )]
    pub whitelist: Box<Account<'info, Whitelist>>,

    /// One certificate per investor per campaign
    #[account(
        init,
        payer = investor,
        space = InvestmentCertificate::LEN,
        seeds = [CERTIFICATE_SEED, campaign.key().as_ref(), investor.key().as_ref()],
        bump
    )]
    pub certificate: Box<Account<'info, InvestmentCertificate>>,

    #[account(
        seeds = [STAKING_POOL_SEED],
        bump = staking_pool.bump
    )]
    pub staking_pool: Box<Account<'info, StakingPool>>,

    /// Absent when the investor never staked (lowest tier)
    #[account(
        mut,
        seeds = [STAKING_LOCK_SEED, investor.key().as_ref()],
        bump = staking_lock.bump
    )]
    pub staking_lock: Option<Box<Account<'info, StakingLock>>>,

    #[account(
        address = campaign.investment_mint @ LaunchpadError::InvalidMint
    )]
    pub investment_mint: Box<InterfaceAccount<'info, Mint>>,

    #[account(
        mut,
        token::mint = investment_mint,
        token::authority = investor,
    )]
    pub investor_token_account: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(
        mut,
        seeds = [INVESTMENT_VAULT_SEED, campaign.key().as_ref()],
        bump = campaign.investment_vault_bump
    )]
    pub investment_vault: Box<InterfaceAccount<'info, TokenAccount>>,

    /// Required only for insured investments
    #[account(
        mut,
        seeds = [INSURANCE_FUND_SEED, investment_mint.key().as_ref()],
        bump = insurance_fund.bump
    )]
    pub insurance_fund: Option<Box<Account<'info, InsuranceFund>>>,

    #[account(
        mut,
        seeds = [INSURANCE_VAULT_SEED, investment_mint.key().as_ref()],
        bump
    )]
    pub insurance_vault: Option<Box<InterfaceAccount<'info, TokenAccount>>>,

    pub token_program: Interface<'info, TokenInterface>,
    pub system_program: Program<'info, System>,
}

pub fn handler(ctx: Context<Invest>, amount: u64, insured: bool) -> Result<()> {
    let clock = Clock::get()?;
    let now = clock.unix_timestamp;

    require!(!ctx.accounts.config.paused, LaunchpadError::LaunchpadPaused);

    let investor = ctx.accounts.investor.key();
    let tier = ctx
        .accounts
        .staking_pool
        .tier_of(ctx.accounts.staking_lock.as_deref().map(|lock| &**lock))?;

    let campaign = &mut ctx.accounts.campaign;
    let deposit = campaign.invest(&mut ctx.accounts.whitelist, &investor, amount, tier, now)?;

    // Premium
    let premium = if insured {
        let premium = InsuranceFund::premium_for(deposit)?;
        let insurance_fund = ctx
            .accounts
            .insurance_fund
            .as_mut()
            .ok_or(LaunchpadError::MissingInsuranceFund)?;
        require!(
            ctx.accounts.insurance_vault.is_some(),
            LaunchpadError::MissingInsuranceFund
        );
        insurance_fund.collect_premium(premium)?;
        campaign.insured_count = campaign
            .insured_count
            .checked_add(1)
            .ok_or(LaunchpadError::Overflow)?;
        premium
    } else {
        0
    };

    if let Some(lock) = ctx.accounts.staking_lock.as_mut() {
        lock.record_participation(now);
    }

    let certificate = &mut ctx.accounts.certificate;
    certificate.campaign = campaign.key();
    certificate.owner = investor;
    certificate.deposit = deposit;
    certificate.vesting_applicable_round = 0;
    certificate.insured = insured;
    certificate.premium_paid = premium;
    certificate.total_claimed = 0;
    certificate.created_at = now;
    certificate.bump = ctx.bumps.certificate;

    let config = &mut ctx.accounts.config;
    config.total_invested = config
        .total_invested
        .checked_add(deposit)
        .ok_or(LaunchpadError::Overflow)?;

    // Transfer principal to the campaign's investment vault
    transfer_tokens(
        &ctx.accounts.token_program,
        &ctx.accounts.investment_mint,
        &ctx.accounts.investor_token_account,
        &ctx.accounts.investment_vault,
        ctx.accounts.investor.to_account_info(),
        &[],
        deposit,
    )?;

    if let Some(insurance_vault) = ctx.accounts.insurance_vault.as_ref() {
        transfer_tokens(
            &ctx.accounts.token_program,
            &ctx.accounts.investment_mint,
            &ctx.accounts.investor_token_account,
            insurance_vault,
            ctx.accounts.investor.to_account_info(),
            &[],
            premium,
        )?;
    }

    if deposit < amount {
        msg!("Deposit quantized from {} to {}", amount, deposit);
    }

    emit!(Invested {
        campaign_id: campaign.campaign_id,
        investor,
        certificate: certificate.key(),
        requested: amount,
        deposit,
        premium,
        tier,
        invested_amount: campaign.vault.invested_amount,
    });

    Ok(())
}
