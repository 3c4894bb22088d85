pub mod actual_wallet;
pub mod claim;
pub mod claim_bitmap;
pub mod create_distributor;
pub mod deposit;
pub mod initialize_config;
pub mod manage_admins;
pub mod refund_request;
pub mod set_paused;
pub mod stop_vesting;
pub mod update_root;
pub mod update_schedule;
pub mod withdraw;

pub use actual_wallet::*;
pub use claim::*;
pub use claim_bitmap::*;
pub use create_distributor::*;
pub use deposit::*;
pub use initialize_config::*;
pub use manage_admins::*;
pub use refund_request::*;
pub use set_paused::*;
pub use stop_vesting::*;
pub use update_root::*;
pub use update_schedule::*;
pub use withdraw::*;
