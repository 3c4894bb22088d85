pub mod claim_state;
pub mod config;
pub mod distributor_state;
pub mod nonce_state;
pub mod schedule_change;
pub mod vesting;
pub mod wallet_state;

pub use claim_state::*;
pub use config::*;
pub use distributor_state::*;
pub use nonce_state::*;
pub use schedule_change::*;
pub use vesting::*;
pub use wallet_state::*;
