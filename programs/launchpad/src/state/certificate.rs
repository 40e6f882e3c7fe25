use anchor_lang::prelude::*;

/// Proof of investment in a campaign
/// One certificate per investor per campaign (the whitelist entry is one-shot)
#[account]
#[derive(Default)]
pub struct InvestmentCertificate {
    /// The campaign this certificate was minted against
    pub campaign: Pubkey,

    /// The investor's wallet address
    pub owner: Pubkey,

    /// Quantized deposit in investment-asset base units
    pub deposit: u64,

    /// First vesting round not yet paid out (never decreases)
    pub vesting_applicable_round: u64,

    /// Whether a refund can still be claimed (cleared on refund)
    pub insured: bool,

    /// Premium paid into the insurance fund at invest time
    pub premium_paid: u64,

    /// Total rewards claimed so far
    pub total_claimed: u64,

    /// Timestamp of the investment
    pub created_at: i64,

    /// PDA bump seed
    pub bump: u8,
}

impl InvestmentCertificate {
    pub const LEN: usize = 8  // discriminator
        + 32  // campaign
        + 32  // owner
        + 8   // deposit
        + 8   // vesting_applicable_round
        + 1   // insured
        + 8   // premium_paid
        + 8   // total_claimed
        + 8   // created_at
        + 1   // bump
        + 16; // padding
}
