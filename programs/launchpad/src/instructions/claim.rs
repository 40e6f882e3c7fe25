use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};
use crate::state::*;
use crate::constants::*;
use crate::errors::LaunchpadError;
use crate::events::{InvestmentClaimed, RewardsClaimed};
use super::token_transfer::transfer_tokens;

/// Certificate owner collects the rewards vested since their last claim
#[derive(Accounts)]
pub struct ClaimRewards<'info> {
    pub owner: Signer<'info>,

    #[account(
        mut,
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

    #[account(
        address = campaign.reward_mint @ LaunchpadError::InvalidMint
    )]
    pub reward_mint: Box<InterfaceAccount<'info, Mint>>,

    #[account(
        mut,
        seeds = [REWARD_VAULT_SEED, campaign.key().as_ref()],
        bump = campaign.reward_vault_bump
    )]
    pub reward_vault: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(
        mut,
        token::mint = reward_mint,
    )]
    pub owner_reward_account: Box<InterfaceAccount<'info, TokenAccount>>,

    pub token_program: Interface<'info, TokenInterface>,
}

pub fn claim_rewards_handler(ctx: Context<ClaimRewards>) -> Result<()> {
    let campaign = &mut ctx.accounts.campaign;
    let certificate = &mut ctx.accounts.certificate;
    let clock = Clock::get()?;

    let amount = campaign.vault.claim(certificate, clock.unix_timestamp)?;

    let campaign_id_bytes = campaign.campaign_id.to_le_bytes();
    let campaign_seeds = &[
        CAMPAIGN_SEED,
        campaign_id_bytes.as_ref(),
        &[campaign.bump],
    ];
    let signer_seeds = &[&campaign_seeds[..]];

    transfer_tokens(
        &ctx.accounts.token_program,
        &ctx.accounts.reward_mint,
        &ctx.accounts.reward_vault,
        &ctx.accounts.owner_reward_account,
        campaign.to_account_info(),
        signer_seeds,
        amount,
    )?;

    emit!(RewardsClaimed {
        campaign_id: campaign.campaign_id,
        investor: certificate.owner,
        amount,
        vesting_applicable_round: certificate.vesting_applicable_round,
    });

    Ok(())
}

/// Receiver settles the sale: raised funds plus any unsold rewards
#[derive(Accounts)]
pub struct ClaimInvestment<'info> {
    #[account(
        address = campaign.vault.receiver @ LaunchpadError::NotReceiver
    )]
    pub receiver: Signer<'info>,

    #[account(
        mut,
        seeds = [CAMPAIGN_SEED, &campaign.campaign_id.to_le_bytes()],
        bump = campaign.bump
    )]
    pub campaign: Box<Account<'info, Campaign>>,

    #[account(
        address = campaign.investment_mint @ LaunchpadError::InvalidMint
    )]
    pub investment_mint: Box<InterfaceAccount<'info, Mint>>,

    #[account(
        address = campaign.reward_mint @ LaunchpadError::InvalidMint
    )]
    pub reward_mint: Box<InterfaceAccount<'info, Mint>>,

    #[account(
        mut,
        seeds = [INVESTMENT_VAULT_SEED, campaign.key().as_ref()],
        bump = campaign.investment_vault_bump
    )]
    pub investment_vault: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(
        mut,
        seeds = [REWARD_VAULT_SEED, campaign.key().as_ref()],
        bump = campaign.reward_vault_bump
    )]
    pub reward_vault: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(
        mut,
        token::mint = investment_mint,
    )]
    pub receiver_investment_account: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(
        mut,
        token::mint = reward_mint,
    )]
    pub receiver_reward_account: Box<InterfaceAccount<'info, TokenAccount>>,

    pub token_program: Interface<'info, TokenInterface>,
}

pub fn claim_investment_handler(ctx: Context<ClaimInvestment>) -> Result<()> {
    let campaign = &mut ctx.accounts.campaign;
    let clock = Clock::get()?;

    let settlement = campaign.claim_investment(clock.unix_timestamp)?;

    if settlement.unsold_rewards > 0 {
        msg!(
            "Undersubscribed: {} of {} raised, returning {} unsold rewards",
            campaign.vault.invested_amount,
            campaign.vault.target_amount,
            settlement.unsold_rewards
        );
    }

    let campaign_id_bytes = campaign.campaign_id.to_le_bytes();
    let campaign_seeds = &[
        CAMPAIGN_SEED,
        campaign_id_bytes.as_ref(),
        &[campaign.bump],
    ];
    let signer_seeds = &[&campaign_seeds[..]];

    transfer_tokens(
        &ctx.accounts.token_program,
        &ctx.accounts.investment_mint,
        &ctx.accounts.investment_vault,
        &ctx.accounts.receiver_investment_account,
        campaign.to_account_info(),
        signer_seeds,
        settlement.investment_amount,
    )?;

    transfer_tokens(
        &ctx.accounts.token_program,
        &ctx.accounts.reward_mint,
        &ctx.accounts.reward_vault,
        &ctx.accounts.receiver_reward_account,
        campaign.to_account_info(),
        signer_seeds,
        settlement.unsold_rewards,
    )?;

    emit!(InvestmentClaimed {
        campaign_id: campaign.campaign_id,
        receiver: ctx.accounts.receiver.key(),
        investment_amount: settlement.investment_amount,
        unsold_rewards: settlement.unsold_rewards,
    });

    Ok(())
}
