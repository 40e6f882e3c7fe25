use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};
use crate::state::*;
use crate::constants::*;
use crate::errors::LaunchpadError;
use crate::events::{PenaltyReceiverUpdated, StakeWithdrawn, Staked, StakingPoolInitialized};
use super::token_transfer::transfer_tokens;

/// Parameters for the global staking pool
#[derive(AnchorSerialize, AnchorDeserialize, Clone)]
pub struct StakingPoolParams {
    /// Lock durations offered (seconds)
    pub locks: Vec<i64>,

    /// Multiplier per lock option (x100)
    pub multipliers: Vec<u64>,

    /// Ascending tier thresholds on stake value
    pub tier_levels: Vec<u64>,

    pub minimum_amount: u64,

    /// Penalty window after an investment (seconds)
    pub investment_lock_time: i64,
}

#[derive(Accounts)]
pub struct InitializeStakingPool<'info> {
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
        init,
        payer = authority,
        space = StakingPool::LEN,
        seeds = [STAKING_POOL_SEED],
        bump
    )]
    pub staking_pool: Box<Account<'info, StakingPool>>,

    pub stake_mint: Box<InterfaceAccount<'info, Mint>>,

    #[account(
        init,
        payer = authority,
        token::mint = stake_mint,
        token::authority = staking_pool,
        token::token_program = token_program,
        seeds = [STAKING_VAULT_SEED],
        bump
    )]
    pub staking_vault: Box<InterfaceAccount<'info, TokenAccount>>,

    /// CHECK: Wallet receiving early-exit penalties
    #[account(
        constraint = penalty_receiver.key() != Pubkey::default() @ LaunchpadError::InvalidPenaltyReceiver
    )]
    pub penalty_receiver: UncheckedAccount<'info>,

    pub token_program: Interface<'info, TokenInterface>,
    pub system_program: Program<'info, System>,
}

pub fn initialize_staking_pool_handler(
    ctx: Context<InitializeStakingPool>,
    params: StakingPoolParams,
) -> Result<()> {
    StakingPool::validate_config(
        &params.locks,
        &params.multipliers,
        &params.tier_levels,
        params.investment_lock_time,
    )?;

    let pool = &mut ctx.accounts.staking_pool;
    pool.stake_mint = ctx.accounts.stake_mint.key();
    pool.locks = params.locks;
    pool.multipliers = params.multipliers;
    pool.tier_levels = params.tier_levels;
    pool.minimum_amount = params.minimum_amount;
    pool.investment_lock_time = params.investment_lock_time;
    pool.penalty_receiver = ctx.accounts.penalty_receiver.key();
    pool.total_staked = 0;
    pool.staker_count = 0;
    pool.bump = ctx.bumps.staking_pool;
    pool.vault_bump = ctx.bumps.staking_vault;

    emit!(StakingPoolInitialized {
        stake_mint: pool.stake_mint,
        penalty_receiver: pool.penalty_receiver,
        tier_count: pool.tier_levels.len() as u8,
    });

    Ok(())
}

#[derive(Accounts)]
pub struct SetPenaltyReceiver<'info> {
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
        seeds = [STAKING_POOL_SEED],
        bump = staking_pool.bump
    )]
    pub staking_pool: Box<Account<'info, StakingPool>>,
}

pub fn set_penalty_receiver_handler(
    ctx: Context<SetPenaltyReceiver>,
    new_receiver: Pubkey,
) -> Result<()> {
    let old_receiver = ctx
        .accounts
        .staking_pool
        .set_penalty_receiver(new_receiver)?;

    emit!(PenaltyReceiverUpdated {
        old_receiver,
        new_receiver,
    });

    Ok(())
}

/// Deposit into (or extend) the caller's lock
#[derive(Accounts)]
pub struct Stake<'info> {
    #[account(mut)]
    pub staker: Signer<'info>,

    #[account(
        seeds = [LAUNCHPAD_CONFIG_SEED],
        bump = config.bump
    )]
    pub config: Account<'info, LaunchpadConfig>,

    #[account(
        mut,
        seeds = [STAKING_POOL_SEED],
        bump = staking_pool.bump
    )]
    pub staking_pool: Box<Account<'info, StakingPool>>,

    #[account(
        init_if_needed,
        payer = staker,
        space = StakingLock::LEN,
        seeds = [STAKING_LOCK_SEED, staker.key().as_ref()],
        bump
    )]
    pub staking_lock: Box<Account<'info, StakingLock>>,

    #[account(
        address = staking_pool.stake_mint @ LaunchpadError::InvalidMint
    )]
    pub stake_mint: Box<InterfaceAccount<'info, Mint>>,

    #[account(
        mut,
        token::mint = stake_mint,
        token::authority = staker,
    )]
    pub staker_token_account: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(
        mut,
        seeds = [STAKING_VAULT_SEED],
        bump = staking_pool.vault_bump
    )]
    pub staking_vault: Box<InterfaceAccount<'info, TokenAccount>>,

    pub token_program: Interface<'info, TokenInterface>,
    pub system_program: Program<'info, System>,
}

pub fn stake_handler(ctx: Context<Stake>, amount: u64, lock_index: u8) -> Result<()> {
    let pool = &mut ctx.accounts.staking_pool;
    let lock = &mut ctx.accounts.staking_lock;
    let clock = Clock::get()?;

    require!(!ctx.accounts.config.paused, LaunchpadError::LaunchpadPaused);
    require!(amount >= pool.minimum_amount, LaunchpadError::StakeTooSmall);

    let (lock_time, multiplier) = pool.lock_option(lock_index)?;

    let is_new = !lock.is_open();
    if is_new {
        lock.owner = ctx.accounts.staker.key();
        lock.bump = ctx.bumps.staking_lock;
    }

    lock.stake(amount, lock_time, multiplier, clock.unix_timestamp)?;

    pool.total_staked = pool
        .total_staked
        .checked_add(amount)
        .ok_or(LaunchpadError::Overflow)?;
    if is_new {
        pool.staker_count = pool
            .staker_count
            .checked_add(1)
            .ok_or(LaunchpadError::Overflow)?;
    }

    transfer_tokens(
        &ctx.accounts.token_program,
        &ctx.accounts.stake_mint,
        &ctx.accounts.staker_token_account,
        &ctx.accounts.staking_vault,
        ctx.accounts.staker.to_account_info(),
        &[],
        amount,
    )?;

    emit!(Staked {
        staker: lock.owner,
        amount: lock.amount,
        total_staked: pool.total_staked,
        lock_time: lock.lock_time,
        multiplier: lock.multiplier,
    });

    Ok(())
}

/// Close the caller's lock once it has expired.
/// Withdrawing within `investment_lock_time` of the last investment
/// forfeits a decaying share of the stake to the penalty receiver.
#[derive(Accounts)]
pub struct WithdrawStake<'info> {
    #[account(mut)]
    pub staker: Signer<'info>,

    #[account(
        mut,
        seeds = [STAKING_POOL_SEED],
        bump = staking_pool.bump
    )]
    pub staking_pool: Box<Account<'info, StakingPool>>,

    #[account(
        mut,
        close = staker,
        seeds = [STAKING_LOCK_SEED, staker.key().as_ref()],
        bump = staking_lock.bump,
        constraint = staking_lock.owner == staker.key() @ LaunchpadError::Unauthorized
    )]
    pub staking_lock: Box<Account<'info, StakingLock>>,

    #[account(
        address = staking_pool.stake_mint @ LaunchpadError::InvalidMint
    )]
    pub stake_mint: Box<InterfaceAccount<'info, Mint>>,

    #[account(
        mut,
        seeds = [STAKING_VAULT_SEED],
        bump = staking_pool.vault_bump
    )]
    pub staking_vault: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(
        mut,
        token::mint = stake_mint,
    )]
    pub staker_token_account: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(
        mut,
        token::mint = stake_mint,
        constraint = penalty_token_account.owner == staking_pool.penalty_receiver @ LaunchpadError::Unauthorized
    )]
    pub penalty_token_account: Box<InterfaceAccount<'info, TokenAccount>>,

    pub token_program: Interface<'info, TokenInterface>,
}

pub fn withdraw_stake_handler(ctx: Context<WithdrawStake>) -> Result<()> {
    let pool = &mut ctx.accounts.staking_pool;
    let lock = &ctx.accounts.staking_lock;
    let clock = Clock::get()?;
    let now = clock.unix_timestamp;

    require!(lock.is_open(), LaunchpadError::NothingToWithdraw);
    require!(lock.is_unlocked(now), LaunchpadError::StakeLocked);

    let amount = lock.amount;
    let penalty = lock.withdrawal_penalty(now, pool.investment_lock_time)?;
    let payout = amount
        .checked_sub(penalty)
        .ok_or(LaunchpadError::Overflow)?;

    if penalty > 0 {
        msg!("Early exit penalty: {} of {}", penalty, amount);
    }

    pool.total_staked = pool
        .total_staked
        .checked_sub(amount)
        .ok_or(LaunchpadError::Overflow)?;
    pool.staker_count = pool.staker_count.saturating_sub(1);

    let pool_seeds = &[STAKING_POOL_SEED, &[pool.bump]];
    let signer_seeds = &[&pool_seeds[..]];

    transfer_tokens(
        &ctx.accounts.token_program,
        &ctx.accounts.stake_mint,
        &ctx.accounts.staking_vault,
        &ctx.accounts.staker_token_account,
        pool.to_account_info(),
        signer_seeds,
        payout,
    )?;

    transfer_tokens(
        &ctx.accounts.token_program,
        &ctx.accounts.stake_mint,
        &ctx.accounts.staking_vault,
        &ctx.accounts.penalty_token_account,
        pool.to_account_info(),
        signer_seeds,
        penalty,
    )?;

    emit!(StakeWithdrawn {
        staker: ctx.accounts.staker.key(),
        amount: payout,
        penalty,
        penalty_receiver: pool.penalty_receiver,
    });

    Ok(())
}
