use anchor_lang::prelude::*;

#[error_code]
pub enum LaunchpadError {
    // ============================================================
    // PHASE ERRORS (6000-6009)
    // ============================================================

    #[msg("Campaign is not in the whitelist phase")]
    NotWhitelistPhase,

    #[msg("Campaign is not in the sale phase")]
    NotSalePhase,

    #[msg("Campaign is not in the distribution phase")]
    NotDistributionPhase,

    #[msg("Sale has already started")]
    SaleAlreadyStarted,

    #[msg("Distribution has already started")]
    DistributionAlreadyStarted,

    #[msg("No vesting round has elapsed yet")]
    VestingNotStarted,

    // ============================================================
    // IDENTITY ERRORS (6010-6019)
    // ============================================================

    #[msg("Certificate belongs to a different campaign")]
    CampaignMismatch,

    #[msg("Refund allowance belongs to a different campaign")]
    AllowanceCampaignMismatch,

    #[msg("Caller is not the certificate owner")]
    NotCertificateOwner,

    #[msg("Caller is not the campaign receiver")]
    NotReceiver,

    #[msg("Invalid mint for this account")]
    InvalidMint,

    #[msg("Unauthorized")]
    Unauthorized,

    // ============================================================
    // ALLOCATION ERRORS (6020-6029)
    // ============================================================

    #[msg("Investment exceeds the allocation for the investor's tier")]
    AllocationExceeded,

    #[msg("Investment exceeds the remaining campaign target")]
    TargetExceeded,

    #[msg("Deposit is too small to buy a whole reward unit")]
    DepositTooSmall,

    #[msg("Address is not whitelisted")]
    NotWhitelisted,

    #[msg("Whitelist is full")]
    WhitelistFull,

    #[msg("Too many addresses in one call")]
    BatchTooLarge,

    #[msg("Stake amount is below the pool minimum")]
    StakeTooSmall,

    // ============================================================
    // FUNDING ERRORS (6030-6039)
    // ============================================================

    #[msg("Supplied rewards are below the declared total")]
    InsufficientFunds,

    #[msg("Campaign is already funded")]
    AlreadyFunded,

    #[msg("Campaign is not funded yet")]
    NotFunded,

    #[msg("Vault balance is insufficient")]
    InsufficientVaultBalance,

    #[msg("Insurance fund balance is insufficient")]
    InsufficientInsuranceFund,

    #[msg("Insurance fund accounts are required for an insured investment")]
    MissingInsuranceFund,

    // ============================================================
    // ONE-SHOT ERRORS (6040-6049)
    // ============================================================

    #[msg("Whitelist already requested")]
    AlreadyRequested,

    #[msg("Address has already invested in this campaign")]
    AlreadyInvested,

    #[msg("Investment proceeds already claimed")]
    InvestmentAlreadyClaimed,

    #[msg("New lock time is shorter than the current lock")]
    LockTimeDecreased,

    #[msg("Stake is still locked")]
    StakeLocked,

    #[msg("Certificate is not insured")]
    NotInsured,

    #[msg("Settlement price leaves no refund")]
    NoRefundDue,

    #[msg("Nothing to withdraw")]
    NothingToWithdraw,

    // ============================================================
    // CONFIGURATION ERRORS (6050-6069)
    // ============================================================

    #[msg("Token price must be greater than zero")]
    ZeroTokenPrice,

    #[msg("Vesting rounds and percentages differ in length")]
    VestingLengthMismatch,

    #[msg("Vesting schedule must have between 1 and 24 rounds")]
    InvalidVestingRounds,

    #[msg("Vesting rounds must be ascending and non-negative")]
    VestingRoundsNotAscending,

    #[msg("Vesting percentages must sum to 100")]
    InvalidVestingPercentages,

    #[msg("Phase timestamps must satisfy whitelist < sale - 1 day < sale < distribution")]
    InvalidPhaseTimestamps,

    #[msg("Campaign target must be greater than zero")]
    InvalidTarget,

    #[msg("Lock options and multipliers differ in length")]
    LockMultiplierMismatch,

    #[msg("Lock option does not exist")]
    InvalidLockOption,

    #[msg("Tier levels must be strictly ascending")]
    TierLevelsNotAscending,

    #[msg("Highest tier level must be unbounded (u64::MAX)")]
    TierLevelsNotUnbounded,

    #[msg("Penalty receiver cannot be the default address")]
    InvalidPenaltyReceiver,

    #[msg("Too many tiers")]
    TooManyTiers,

    #[msg("Investment lock time must be greater than zero")]
    InvalidInvestmentLockTime,

    #[msg("Settlement price must be greater than zero")]
    InvalidSettlementPrice,

    #[msg("Invalid amount")]
    InvalidAmount,

    // ============================================================
    // PROTOCOL ERRORS (6070-6079)
    // ============================================================

    #[msg("Launchpad is currently paused")]
    LaunchpadPaused,

    #[msg("Arithmetic overflow")]
    Overflow,

    #[msg("Division by zero")]
    DivisionByZero,
}
