use anchor_lang::prelude::*;
use crate::state::LaunchpadConfig;
use crate::constants::*;
use crate::events::LaunchpadInitialized;

#[derive(Accounts)]
pub struct InitializeLaunchpad<'info> {
    #[account(mut)]
    pub authority: Signer<'info>,

    #[account(
        init,
        payer = authority,
        space = LaunchpadConfig::LEN,
        seeds = [LAUNCHPAD_CONFIG_SEED],
        bump
    )]
    pub config: Account<'info, LaunchpadConfig>,

    pub system_program: Program<'info, System>,
}

pub fn handler(ctx: Context<InitializeLaunchpad>) -> Result<()> {
    let config = &mut ctx.accounts.config;

    config.authority = ctx.accounts.authority.key();
    config.paused = false;
    config.campaign_count = 0;
    config.total_invested = 0;
    config.bump = ctx.bumps.config;

    emit!(LaunchpadInitialized {
        authority: config.authority,
    });

    Ok(())
}
