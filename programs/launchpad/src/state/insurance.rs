use anchor_lang::prelude::*;
use crate::constants::*;
use crate::errors::LaunchpadError;
use super::certificate::InvestmentCertificate;
use super::vault::Vault;

/// Shared pool of insurance premiums for one investment mint
#[account]
#[derive(Default)]
pub struct InsuranceFund {
    /// Investment mint this fund is denominated in
    pub mint: Pubkey,

    /// Premiums available for refunds
    pub premium_balance: u64,

    /// Lifetime premiums collected
    pub total_premiums: u64,

    /// Lifetime refunds paid
    pub total_refunded: u64,

    /// PDA bump seed
    pub bump: u8,

    /// Bump seed of the fund's token account
    pub vault_bump: u8,
}

impl InsuranceFund {
    pub const LEN: usize = 8  // discriminator
        + 32  // mint
        + 8   // premium_balance
        + 8   // total_premiums
        + 8   // total_refunded
        + 1   // bump
        + 1   // vault_bump
        + 16; // padding

    /// 15% of the quantized deposit
    pub fn premium_for(deposit: u64) -> Result<u64> {
        let premium = (deposit as u128)
            .checked_mul(INSURANCE_PREMIUM_BPS as u128)
            .ok_or(LaunchpadError::Overflow)?
            / BPS_DENOMINATOR as u128;
        u64::try_from(premium).map_err(|_| error!(LaunchpadError::Overflow))
    }

    pub(crate) fn collect_premium(&mut self, premium: u64) -> Result<()> {
        self.premium_balance = self
            .premium_balance
            .checked_add(premium)
            .ok_or(LaunchpadError::Overflow)?;
        self.total_premiums = self
            .total_premiums
            .checked_add(premium)
            .ok_or(LaunchpadError::Overflow)?;
        Ok(())
    }

    /// Settle an insured certificate against a published allowance.
    /// Clears `insured`, so each certificate is refunded at most once.
    pub(crate) fn claim_refund(
        &mut self,
        vault: &Vault,
        allowance: &RefundAllowance,
        certificate: &mut InvestmentCertificate,
    ) -> Result<u64> {
        require_keys_eq!(
            allowance.campaign,
            certificate.campaign,
            LaunchpadError::AllowanceCampaignMismatch
        );
        require!(certificate.insured, LaunchpadError::NotInsured);

        let entitlement = vault.user_entitlement(certificate.deposit)?;
        let refund = refund_amount(entitlement, vault.token_price()?, allowance.real_avg_price)?;
        require!(refund > 0, LaunchpadError::NoRefundDue);

        self.premium_balance = self
            .premium_balance
            .checked_sub(refund)
            .ok_or(LaunchpadError::InsufficientInsuranceFund)?;
        self.total_refunded = self
            .total_refunded
            .checked_add(refund)
            .ok_or(LaunchpadError::Overflow)?;
        certificate.insured = false;

        Ok(refund)
    }
}

/// Price protection published by the authority after the sale settles
#[account]
#[derive(Default)]
pub struct RefundAllowance {
    /// The campaign this allowance applies to
    pub campaign: Pubkey,

    /// Realised average price (x10_000 investment units per reward unit)
    pub real_avg_price: u64,

    /// Timestamp of issuance
    pub issued_at: i64,

    /// PDA bump seed
    pub bump: u8,
}

impl RefundAllowance {
    pub const LEN: usize = 8  // discriminator
        + 32  // campaign
        + 8   // real_avg_price
        + 8   // issued_at
        + 1   // bump
        + 16; // padding
}

/// `entitlement * vault price - entitlement * real price`, each term scaled
/// back to investment units with truncation. Zero when the realised price is
/// not below the vault price.
pub fn refund_amount(entitlement: u64, token_price: u128, real_avg_price: u64) -> Result<u64> {
    let paid = (entitlement as u128)
        .checked_mul(token_price)
        .ok_or(LaunchpadError::Overflow)?
        / PRECISION;
    let worth = (entitlement as u128)
        .checked_mul(real_avg_price as u128)
        .ok_or(LaunchpadError::Overflow)?
        / REFUND_PRICE_SCALE;
    let refund = paid.saturating_sub(worth);
    u64::try_from(refund).map_err(|_| error!(LaunchpadError::Overflow))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::test_utils::assert_error;
    use crate::state::vesting::VestingSchedule;

    fn vault() -> Vault {
        let schedule = VestingSchedule::new(vec![0], vec![100]).unwrap();
        let mut vault = Vault::new(schedule, 100_000, 10_000, Pubkey::new_unique(), 0).unwrap();
        vault.fund(10_000).unwrap();
        vault
    }

    fn insured_certificate(campaign: Pubkey, deposit: u64) -> InvestmentCertificate {
        InvestmentCertificate {
            campaign,
            deposit,
            insured: true,
            ..Default::default()
        }
    }

    #[test]
    fn premium_is_fifteen_percent() {
        assert_eq!(InsuranceFund::premium_for(1_000).unwrap(), 150);
        assert_eq!(InsuranceFund::premium_for(99).unwrap(), 14);
        assert_eq!(InsuranceFund::premium_for(0).unwrap(), 0);
    }

    #[test]
    fn refund_uses_truncated_terms() {
        // 100 units bought at 10.0, realised 8.0
        assert_eq!(refund_amount(100, 10 * PRECISION, 80_000).unwrap(), 200);
        // 3 units at 3.3333333, realised 1.2345
        assert_eq!(refund_amount(3, 33_333_333, 12_345).unwrap(), 9 - 3);
        assert_eq!(refund_amount(100, 10 * PRECISION, 120_000).unwrap(), 0);
    }

    #[test]
    fn refunds_once_per_certificate() {
        let vault = vault();
        let campaign = Pubkey::new_unique();
        let allowance = RefundAllowance {
            campaign,
            real_avg_price: 80_000,
            ..Default::default()
        };
        let mut fund = InsuranceFund::default();
        fund.collect_premium(150).unwrap();
        fund.collect_premium(150).unwrap();
        let mut cert = insured_certificate(campaign, 1_000);

        assert_eq!(fund.claim_refund(&vault, &allowance, &mut cert).unwrap(), 200);
        assert!(!cert.insured);
        assert_eq!(fund.premium_balance, 100);
        assert_eq!(fund.total_refunded, 200);

        assert_error(
            fund.claim_refund(&vault, &allowance, &mut cert),
            LaunchpadError::NotInsured,
        );
    }

    #[test]
    fn rejects_foreign_allowance_and_empty_fund() {
        let vault = vault();
        let campaign = Pubkey::new_unique();
        let mut fund = InsuranceFund::default();
        fund.collect_premium(150).unwrap();

        let foreign = RefundAllowance {
            campaign: Pubkey::new_unique(),
            real_avg_price: 80_000,
            ..Default::default()
        };
        let mut cert = insured_certificate(campaign, 1_000);
        assert_error(
            fund.claim_refund(&vault, &foreign, &mut cert),
            LaunchpadError::AllowanceCampaignMismatch,
        );

        let allowance = RefundAllowance {
            campaign,
            real_avg_price: 80_000,
            ..Default::default()
        };
        assert_error(
            fund.claim_refund(&vault, &allowance, &mut cert),
            LaunchpadError::InsufficientInsuranceFund,
        );
        assert!(cert.insured);

        let no_loss = RefundAllowance {
            campaign,
            real_avg_price: 100_000,
            ..Default::default()
        };
        assert_error(
            fund.claim_refund(&vault, &no_loss, &mut cert),
            LaunchpadError::NoRefundDue,
        );
    }
}
