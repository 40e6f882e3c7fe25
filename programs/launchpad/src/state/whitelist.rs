use anchor_lang::prelude::*;
use crate::constants::*;
use crate::errors::LaunchpadError;

/// Eligibility record for one address
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Default, Debug, PartialEq, Eq)]
pub struct WhitelistEntry {
    pub investor: Pubkey,

    /// Added by the launchpad authority
    pub allowed: bool,

    /// Investor asked to be whitelisted during the whitelist phase
    pub requested: bool,

    /// Flips to true on the first investment and never back
    pub invested: bool,
}

impl WhitelistEntry {
    pub const LEN: usize = 32 + 1 + 1 + 1;
}

/// Per-campaign eligibility list
#[account]
#[derive(Default)]
pub struct Whitelist {
    /// The campaign this whitelist gates
    pub campaign: Pubkey,

    pub entries: Vec<WhitelistEntry>,

    /// PDA bump seed
    pub bump: u8,
}

impl Whitelist {
    pub const LEN: usize = 8  // discriminator
        + 32  // campaign
        + (4 + MAX_WHITELIST_ENTRIES * WhitelistEntry::LEN) // entries
        + 1   // bump
        + 16; // padding

    pub fn entry(&self, investor: &Pubkey) -> Option<&WhitelistEntry> {
        self.entries.iter().find(|e| e.investor == *investor)
    }

    pub fn is_member(&self, investor: &Pubkey) -> bool {
        self.entry(investor).map_or(false, |e| e.allowed)
    }

    pub fn has_invested(&self, investor: &Pubkey) -> bool {
        self.entry(investor).map_or(false, |e| e.invested)
    }

    pub fn can_invest(&self, investor: &Pubkey) -> bool {
        self.entry(investor).map_or(false, |e| e.allowed && !e.invested)
    }

    pub fn allowed_count(&self) -> u32 {
        self.entries.iter().filter(|e| e.allowed).count() as u32
    }

    fn entry_mut_or_insert(&mut self, investor: Pubkey) -> Result<&mut WhitelistEntry> {
        let index = match self.entries.iter().position(|e| e.investor == investor) {
            Some(index) => index,
            None => {
                require!(
                    self.entries.len() < MAX_WHITELIST_ENTRIES,
                    LaunchpadError::WhitelistFull
                );
                self.entries.push(WhitelistEntry {
                    investor,
                    ..Default::default()
                });
                self.entries.len() - 1
            }
        };
        Ok(&mut self.entries[index])
    }

    /// Returns true when the address was not allowed before
    pub(crate) fn add(&mut self, investor: Pubkey) -> Result<bool> {
        let entry = self.entry_mut_or_insert(investor)?;
        let added = !entry.allowed;
        entry.allowed = true;
        Ok(added)
    }

    pub(crate) fn bulk_add(&mut self, investors: &[Pubkey]) -> Result<u32> {
        require!(
            investors.len() <= MAX_WHITELIST_BATCH,
            LaunchpadError::BatchTooLarge
        );
        let mut added = 0u32;
        for investor in investors {
            if self.add(*investor)? {
                added += 1;
            }
        }
        Ok(added)
    }

    pub(crate) fn request(&mut self, investor: Pubkey) -> Result<()> {
        let entry = self.entry_mut_or_insert(investor)?;
        require!(!entry.requested, LaunchpadError::AlreadyRequested);
        entry.requested = true;
        Ok(())
    }

    pub(crate) fn mark_invested(&mut self, investor: &Pubkey) -> Result<()> {
        let entry = self
            .entries
            .iter_mut()
            .find(|e| e.investor == *investor)
            .ok_or(LaunchpadError::NotWhitelisted)?;
        require!(entry.allowed, LaunchpadError::NotWhitelisted);
        require!(!entry.invested, LaunchpadError::AlreadyInvested);
        entry.invested = true;
        Ok(())
    }
}
