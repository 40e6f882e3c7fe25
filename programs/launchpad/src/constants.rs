// ============================================================
// FIXED-POINT ARITHMETIC
// ============================================================

/// Fixed-point scale for token price and entitlement math.
/// All divisions truncate toward zero.
pub const PRECISION: u128 = 10_000_000;

/// Scale of the settlement price carried by a refund allowance
pub const REFUND_PRICE_SCALE: u128 = 10_000;

/// Multipliers are stored x100 (100 = 1.0x)
pub const MULTIPLIER_SCALE: u128 = 100;

/// Vesting percentages are whole percent
pub const PERCENT_DENOMINATOR: u64 = 100;

// ============================================================
// BASIS POINTS
// ============================================================

/// 100% in basis points (denominator for BPS calculations)
pub const BPS_DENOMINATOR: u64 = 10_000;

/// Insurance premium (15% = 1500 bps of the invested amount)
pub const INSURANCE_PREMIUM_BPS: u64 = 1_500;

/// Maximum early-exit penalty on a staking withdrawal (15% = 1500 bps)
pub const EARLY_EXIT_PENALTY_BPS: u64 = 1_500;

// ============================================================
// TIME CONSTANTS (in seconds)
// ============================================================

/// 1 day in seconds
pub const ONE_DAY: i64 = 24 * 60 * 60;

/// Whitelist requests close this long before the sale opens
pub const WHITELIST_CLOSE_BUFFER: i64 = ONE_DAY;

// ============================================================
// ACCOUNT LIMITS
// ============================================================

/// Maximum vesting rounds per campaign
pub const MAX_VESTING_ROUNDS: usize = 24;

/// Maximum tiers (allocation caps and tier thresholds)
pub const MAX_TIERS: usize = 10;

/// Maximum lock options offered by the staking pool
pub const MAX_LOCK_OPTIONS: usize = 8;

/// Maximum whitelist entries per campaign (entries and requests share the list)
pub const MAX_WHITELIST_ENTRIES: usize = 250;

/// Maximum addresses accepted by one bulk whitelist call
pub const MAX_WHITELIST_BATCH: usize = 20;

// ============================================================
// PDA SEEDS
// ============================================================

pub const LAUNCHPAD_CONFIG_SEED: &[u8] = b"launchpad_config";
pub const CAMPAIGN_SEED: &[u8] = b"campaign";
pub const WHITELIST_SEED: &[u8] = b"whitelist";
pub const CERTIFICATE_SEED: &[u8] = b"certificate";
pub const INVESTMENT_VAULT_SEED: &[u8] = b"investment_vault";
pub const REWARD_VAULT_SEED: &[u8] = b"reward_vault";
pub const STAKING_POOL_SEED: &[u8] = b"staking_pool";
pub const STAKING_VAULT_SEED: &[u8] = b"staking_vault";
pub const STAKING_LOCK_SEED: &[u8] = b"staking_lock";
pub const INSURANCE_FUND_SEED: &[u8] = b"insurance_fund";
pub const INSURANCE_VAULT_SEED: &[u8] = b"insurance_vault";
pub const REFUND_ALLOWANCE_SEED: &[u8] = b"refund_allowance";
