pub mod token_transfer;
pub mod initialize_launchpad;
pub mod admin;
pub mod create_campaign;
pub mod fund_campaign;
pub mod whitelist;
pub mod invest;
pub mod claim;
pub mod staking;
pub mod insurance;

// Glob re-exports for Anchor compatibility
// `handler` is ambiguous across modules; lib.rs calls it by full path
#[allow(ambiguous_glob_reexports)]
pub use initialize_launchpad::*;
pub use admin::*;
pub use create_campaign::*;
pub use fund_campaign::*;
pub use whitelist::*;
pub use invest::*;
pub use claim::*;
pub use staking::*;
pub use insurance::*;
