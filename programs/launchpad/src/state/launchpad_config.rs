use anchor_lang::prelude::*;

/// Launchpad-level configuration and statistics
/// Single PDA; its `authority` is the administrative capability every
/// privileged instruction checks against
#[account]
#[derive(Default)]
pub struct LaunchpadConfig {
    /// Launchpad admin - creates campaigns, manages whitelists and insurance
    pub authority: Pubkey,

    /// Emergency pause flag (blocks new investments, stakes and requests)
    pub paused: bool,

    // ============================================================
    // STATISTICS
    // ============================================================

    /// Total campaigns created
    pub campaign_count: u64,

    /// Lifetime quantized deposits across campaigns
    pub total_invested: u64,

    /// PDA bump seed
    pub bump: u8,
}

impl LaunchpadConfig {
    pub const LEN: usize = 8  // discriminator
        + 32  // authority
        + 1   // paused
        + 8   // campaign_count
        + 8   // total_invested
        + 1   // bump
        + 64; // padding for future expansion
}
