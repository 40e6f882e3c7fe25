use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};
use crate::state::*;
use crate::constants::*;
use crate::errors::LaunchpadError;
use crate::events::CampaignFunded;
use super::token_transfer::transfer_tokens;

/// Receiver supplies the reward asset (once, before the sale opens)
#[derive(Accounts)]
pub struct FundCampaign<'info> {
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
        address = campaign.reward_mint @ LaunchpadError::InvalidMint
    )]
    pub reward_mint: Box<InterfaceAccount<'info, Mint>>,

    #[account(
        mut,
        token::mint = reward_mint,
        token::authority = receiver,
    )]
    pub receiver_reward_account: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(
        mut,
        seeds = [REWARD_VAULT_SEED, campaign.key().as_ref()],
        bump = campaign.reward_vault_bump
    )]
    pub reward_vault: Box<InterfaceAccount<'info, TokenAccount>>,

    pub token_program: Interface<'info, TokenInterface>,
}

pub fn handler(ctx: Context<FundCampaign>, supply: u64) -> Result<()> {
    let campaign = &mut ctx.accounts.campaign;
    let clock = Clock::get()?;

    let declared = campaign.vault.total_rewards;
    campaign.fund(supply, clock.unix_timestamp)?;

    if supply > declared {
        msg!("Funded {} above declared supply {}, price re-derived", supply, declared);
    }

    let campaign_id = campaign.campaign_id;
    let token_price = campaign.vault.token_price()?;

    transfer_tokens(
        &ctx.accounts.token_program,
        &ctx.accounts.reward_mint,
        &ctx.accounts.receiver_reward_account,
        &ctx.accounts.reward_vault,
        ctx.accounts.receiver.to_account_info(),
        &[],
        supply,
    )?;

    emit!(CampaignFunded {
        campaign_id,
        receiver: ctx.accounts.receiver.key(),
        supplied: supply,
        token_price,
    });

    Ok(())
}
