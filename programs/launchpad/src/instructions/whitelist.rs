use anchor_lang::prelude::*;
use crate::state::*;
use crate::constants::*;
use crate::errors::LaunchpadError;
use crate::events::{WhitelistRequested, WhitelistUpdated};

/// Authority-managed whitelist membership
#[derive(Accounts)]
pub struct ManageWhitelist<'info> {
    #[account(
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

    #[account(
        mut,
        seeds = [WHITELIST_SEED, campaign.key().as_ref()],
        bump = whitelist.bump,
        constraint = whitelist.key() == campaign.whitelist @ LaunchpadError::CampaignMismatch
    )]
    pub whitelist: Box<Account<'info, Whitelist>>,
}

pub fn add_to_whitelist_handler(ctx: Context<ManageWhitelist>, investor: Pubkey) -> Result<()> {
    update_whitelist(ctx, &[investor])
}

pub fn bulk_add_to_whitelist_handler(
    ctx: Context<ManageWhitelist>,
    investors: Vec<Pubkey>,
) -> Result<()> {
    update_whitelist(ctx, &investors)
}

fn update_whitelist(ctx: Context<ManageWhitelist>, investors: &[Pubkey]) -> Result<()> {
    let campaign = &ctx.accounts.campaign;
    let whitelist = &mut ctx.accounts.whitelist;
    let clock = Clock::get()?;

    let added = campaign.add_to_whitelist(whitelist, investors, clock.unix_timestamp)?;

    emit!(WhitelistUpdated {
        campaign_id: campaign.campaign_id,
        added,
        entry_count: whitelist.allowed_count(),
    });

    Ok(())
}

/// Investor asks to be whitelisted while the whitelist phase is open
#[derive(Accounts)]
pub struct ApplyForWhitelist<'info> {
    pub investor: Signer<'info>,

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

    #[account(
        mut,
        seeds = [WHITELIST_SEED, campaign.key().as_ref()],
        bump = whitelist.bump,
        constraint = whitelist.key() == campaign.whitelist @ LaunchpadError::CampaignMismatch
    )]
    pub whitelist: Box<Account<'info, Whitelist>>,
}

pub fn apply_for_whitelist_handler(ctx: Context<ApplyForWhitelist>) -> Result<()> {
    let config = &ctx.accounts.config;
    let campaign = &ctx.accounts.campaign;
    let whitelist = &mut ctx.accounts.whitelist;
    let clock = Clock::get()?;

    require!(!config.paused, LaunchpadError::LaunchpadPaused);

    let investor = ctx.accounts.investor.key();
    campaign.apply_for_whitelist(whitelist, investor, clock.unix_timestamp)?;

    emit!(WhitelistRequested {
        campaign_id: campaign.campaign_id,
        investor,
    });

    Ok(())
}
