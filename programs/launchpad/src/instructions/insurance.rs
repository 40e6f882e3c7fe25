use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};
use crate::state::*;
use crate::constants::*;
use crate::errors::LaunchpadError;
use crate::events::{InsuranceFundCreated, RefundAllowanceIssued, RefundClaimed};
use super::token_transfer::transfer_tokens;

/// One premium pool per investment mint
#[derive(Accounts)]
pub struct CreateInsuranceFund<'info> {
    #[account(
        mut,
        address = config.authority @ LaunchpadError::Unauthorized
    )]
    pub authority: Signer<'info>,

    #[account(
        seeds = [LAUNCHPAD_CONFIG_SEED],
        bump = config.bump
    )]
    pub config: Account<'info, LaunchpadConfig>,

    pub mint: Box<InterfaceAccount<'info, Mint>>,

    #[account(
        init,
        payer = authority,
        space = InsuranceFund::LEN,
        seeds = [INSURANCE_FUND_SEED, mint.key().as_ref()],
        bump
    )]
    pub insurance_fund: Box<Account<'info, InsuranceFund>>,

    #[account(
        init,
        payer = authority,
        token::mint = mint,
        token::authority = insurance_fund,
        token::token_program = token_program,
        seeds = [INSURANCE_VAULT_SEED, mint.key().as_ref()],
        bump
    )]
    pub insurance_vault: Box<InterfaceAccount<'info, TokenAccount>>,

    pub token_program: Interface<'info, TokenInterface>,
    pub system_program: Program<'info, System>,
}

pub fn create_insurance_fund_handler(ctx: Context<CreateInsuranceFund>) -> Result<()> {
    let fund = &mut ctx.accounts.insurance_fund;

    fund.mint = ctx.accounts.mint.key();
    fund.premium_balance = 0;
    fund.total_premiums = 0;
    fund.total_refunded = 0;
    fund.bump = ctx.bumps.insurance_fund;
    fund.vault_bump = ctx.bumps.insurance_vault;

    emit!(InsuranceFundCreated {
        mint: fund.mint,
        insurance_fund: fund.key(),
    });

    Ok(())
}

/// Publish the realised average price of a settled campaign
#[derive(Accounts)]
pub struct IssueRefundAllowance<'info> {
    #[account(
        mut,
        address = config.authority @ LaunchpadError::Unauthorized
    )]
    pub authority: Signer<'info>,

    #[account(
        seeds = [LAUNCHPAD_CONFIG_SEED],
        bump = config.bump
    )]
    pub config: Account<'info, LaunchpadConfig>,

    #[account(
        seeds = [CAMPAIGN_SEED, &campaign.campaign_id.to_le_bytes()],
        bump = campaign.bump
    )]
    pub campaign: Box<Account<'info, Campaign>>,

    /// PDA uniqueness keeps this to one allowance per campaign
    #[account(
        init,
        payer = authority,
        space = RefundAllowance::LEN,
        seeds = [REFUND_ALLOWANCE_SEED, campaign.key().as_ref()],
        bump
    )]
    pub refund_allowance: Box<Account<'info, RefundAllowance>>,

    pub system_program: Program<'info, System>,
}

pub fn issue_refund_allowance_handler(
    ctx: Context<IssueRefundAllowance>,
    real_avg_price: u64,
) -> Result<()> {
    let campaign = &ctx.accounts.campaign;
    let allowance = &mut ctx.accounts.refund_allowance;
    let clock = Clock::get()?;

    require!(
        campaign.phase(clock.unix_timestamp) == Phase::Distribution,
        LaunchpadError::NotDistributionPhase
    );
    require!(real_avg_price > 0, LaunchpadError::InvalidSettlementPrice);

    allowance.campaign = campaign.key();
    allowance.real_avg_price = real_avg_price;
    allowance.issued_at = clock.unix_timestamp;
    allowance.bump = ctx.bumps.refund_allowance;

    emit!(RefundAllowanceIssued {
        campaign_id: campaign.campaign_id,
        campaign: allowance.campaign,
        real_avg_price,
    });

    Ok(())
}

/// Insured certificate owner collects the price-protection refund
#[derive(Accounts)]
pub struct ClaimRefund<'info> {
    pub owner: Signer<'info>,

    #[account(
        seeds = [CAMPAIGN_SEED, &campaign.campaign_id.to_le_bytes()],
        bump = campaign.bump
    )]
    pub campaign: Box<Account<'info, Campaign>>,

    #[account(
        mut,
        has_one = owner @ LaunchpadError::NotCertificateOwner,
        constraint = certificate.campaign == campaign.key() @ LaunchpadError::CampaignMismatch
    )]
    pub certificate: Box<Account<'info, InvestmentCertificate>>,

    /// Campaign match is checked against the certificate in the handler
    pub refund_allowance: Box<Account<'info, RefundAllowance>>,

    #[account(
        address = campaign.investment_mint @ LaunchpadError::InvalidMint
    )]
    pub investment_mint: Box<InterfaceAccount<'info, Mint>>,

    #[account(
        mut,
        seeds = [INSURANCE_FUND_SEED, investment_mint.key().as_ref()],
        bump = insurance_fund.bump
    )]
    pub insurance_fund: Box<Account<'info, InsuranceFund>>,

    #[account(
        mut,
        seeds = [INSURANCE_VAULT_SEED, investment_mint.key().as_ref()],
        bump = insurance_fund.vault_bump
    )]
    pub insurance_vault: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(
        mut,
        token::mint = investment_mint,
    )]
    pub owner_token_account: Box<InterfaceAccount<'info, TokenAccount>>,

    pub token_program: Interface<'info, TokenInterface>,
}

pub fn claim_refund_handler(ctx: Context<ClaimRefund>) -> Result<()> {
    let campaign = &ctx.accounts.campaign;
    let fund = &mut ctx.accounts.insurance_fund;
    let certificate = &mut ctx.accounts.certificate;

    let refund = fund.claim_refund(&campaign.vault, &ctx.accounts.refund_allowance, certificate)?;

    let mint_key = fund.mint;
    let fund_seeds = &[
        INSURANCE_FUND_SEED,
        mint_key.as_ref(),
        &[fund.bump],
    ];
    let signer_seeds = &[&fund_seeds[..]];

    transfer_tokens(
        &ctx.accounts.token_program,
        &ctx.accounts.investment_mint,
        &ctx.accounts.insurance_vault,
        &ctx.accounts.owner_token_account,
        fund.to_account_info(),
        signer_seeds,
        refund,
    )?;

    emit!(RefundClaimed {
        campaign_id: campaign.campaign_id,
        investor: certificate.owner,
        refund,
        premium_balance: fund.premium_balance,
    });

    Ok(())
}
