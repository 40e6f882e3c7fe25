use anchor_lang::prelude::*;
use crate::state::*;
use crate::constants::*;
use crate::errors::LaunchpadError;
use crate::events::{AuthorityTransferred, LaunchpadPauseChanged, TierAllocationsUpdated};

/// Pause/unpause investing, staking and whitelist requests
/// Only callable by launchpad authority
#[derive(Accounts)]
pub struct SetPaused<'info> {
    #[account(
        address = config.authority @ LaunchpadError::Unauthorized
    )]
    pub authority: Signer<'info>,

    #[account(
        mut,
        seeds = [LAUNCHPAD_CONFIG_SEED],
        bump = config.bump
    )]
    pub config: Account<'info, LaunchpadConfig>,
}

pub fn set_paused_handler(ctx: Context<SetPaused>, paused: bool) -> Result<()> {
    ctx.accounts.config.paused = paused;

    emit!(LaunchpadPauseChanged { paused });

    Ok(())
}

/// Hand the administrative capability to a new address
#[derive(Accounts)]
pub struct TransferAuthority<'info> {
    #[account(
        address = config.authority @ LaunchpadError::Unauthorized
    )]
    pub authority: Signer<'info>,

    /// CHECK: New authority address
    #[account(
        constraint = new_authority.key() != Pubkey::default() @ LaunchpadError::Unauthorized
    )]
    pub new_authority: UncheckedAccount<'info>,

    #[account(
        mut,
        seeds = [LAUNCHPAD_CONFIG_SEED],
        bump = config.bump
    )]
    pub config: Account<'info, LaunchpadConfig>,
}

pub fn transfer_authority_handler(ctx: Context<TransferAuthority>) -> Result<()> {
    let config = &mut ctx.accounts.config;
    let old_authority = config.authority;
    config.authority = ctx.accounts.new_authority.key();

    emit!(AuthorityTransferred {
        old_authority,
        new_authority: config.authority,
    });

    Ok(())
}

/// Set the per-tier allocation caps of a campaign before its sale opens
#[derive(Accounts)]
pub struct SetTierAllocations<'info> {
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
        mut,
        seeds = [CAMPAIGN_SEED, &campaign.campaign_id.to_le_bytes()],
        bump = campaign.bump
    )]
    pub campaign: Box<Account<'info, Campaign>>,
}

pub fn set_tier_allocations_handler(
    ctx: Context<SetTierAllocations>,
    tier_allocations: Vec<u64>,
) -> Result<()> {
    let campaign = &mut ctx.accounts.campaign;
    let clock = Clock::get()?;

    campaign.set_tier_allocations(tier_allocations, clock.unix_timestamp)?;

    emit!(TierAllocationsUpdated {
        campaign_id: campaign.campaign_id,
        tier_allocations: campaign.tier_allocations.clone(),
    });

    Ok(())
}
