pub mod launchpad_config;
pub mod vesting;
pub mod vault;
pub mod certificate;
pub mod whitelist;
pub mod campaign;
pub mod staking;
pub mod insurance;

pub use launchpad_config::*;
pub use vesting::*;
pub use vault::*;
pub use certificate::*;
pub use whitelist::*;
pub use campaign::*;
pub use staking::*;
pub use insurance::*;

#[cfg(test)]
pub(crate) mod test_utils {
    use anchor_lang::error::Error;
    use anchor_lang::prelude::*;
    use crate::errors::LaunchpadError;

    /// Assert that `result` failed with exactly `expected`
    pub fn assert_error<T: std::fmt::Debug>(result: Result<T>, expected: LaunchpadError) {
        match result {
            Err(Error::AnchorError(err)) => assert_eq!(
                err.error_code_number,
                u32::from(expected),
                "expected {:?}, got {}",
                expected,
                err.error_name
            ),
            other => panic!("expected {:?}, got {:?}", expected, other),
        }
    }
}
