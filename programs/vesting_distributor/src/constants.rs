use anchor_lang::prelude::*;

/**
 * Program Constants
 *
 * This module defines all the constant values used throughout the vesting distributor program.
 * These constants control percentage scaling, account capacities and PDA derivation.
 */

/// ===== PERCENTAGE CONSTANTS =====

/// Decimal places carried by a period percentage
/// - 1% == 10^9, so 100% == 100 * 10^9
#[constant]
pub const PERCENTAGE_DECIMALS: u32 = 9;

/// Percentage value representing the whole allocation (100%)
/// - The percentages of a valid schedule sum to exactly this value
#[constant]
pub const FULL_PERCENTAGE: u64 = 100 * 10u64.pow(PERCENTAGE_DECIMALS);

/// ===== CAPACITY CONSTANTS =====

/// Number of admin slots in the config account
pub const MAX_ADMINS: usize = 10;

/// Maximum number of changes accepted by one schedule update
/// - Bounded by transaction size, a change is up to 42 bytes
pub const MAX_CHANGES_PER_BATCH: usize = 27;

/// Maximum number of periods accepted by a single create_distributor call
/// - Larger schedules are created as a paused draft and staged in batches
pub const MAX_PERIODS_ON_CREATE: usize = 18;

/// Upper bound for the schedule capacity of a distributor account
pub const MAX_SCHEDULE_PERIODS: usize = 64;

/// Size of a claim bitmap in bytes
/// - One bit per allocation index: 1024 bytes track indices 0..8192
pub const CLAIM_BITMAP_BYTES: usize = 1024;

/// ===== PDA SEED CONSTANTS =====

/// Seed for the global config PDA
/// - Used in: ["config"]
#[constant]
pub const CONFIG_SEED: &str = "config";

/// Seed for creator nonce PDA derivation
/// - Used in: ["creator_nonce", creator]
/// - Lets one creator own any number of distributors for the same mint
#[constant]
pub const CREATOR_NONCE_SEED: &str = "creator_nonce";

/// Seed for distributor PDA derivation
/// - Used in: ["distributor", token_mint, creator, nonce]
#[constant]
pub const DISTRIBUTOR_SEED: &str = "distributor";

/// Seed for token vault PDA derivation
/// - Used in: ["vault", distributor_key]
/// - The vault authority is the distributor PDA itself
#[constant]
pub const VAULT_SEED: &str = "vault";

/// Seed for accrual claim status PDA derivation
/// - Used in: ["claim", distributor_key, original_wallet]
/// - Not scoped by epoch, the claimed total survives root updates
#[constant]
pub const CLAIM_SEED: &str = "claim";

/// Seed for claim bitmap PDA derivation
/// - Used in: ["bitmap", distributor_key, epoch_be]
/// - A root update moves claims to a fresh bitmap
#[constant]
pub const BITMAP_SEED: &str = "bitmap";

/// Seed suffix for the payout redirect PDA
/// - Used in: [distributor_key, original_wallet, "actual-wallet"]
#[constant]
pub const ACTUAL_WALLET_SEED: &str = "actual-wallet";

/// Seed suffix for the refund request PDA
/// - Used in: [distributor_key, original_wallet, "refund-request"]
#[constant]
pub const REFUND_REQUEST_SEED: &str = "refund-request";

/// Seed suffix for the redirect target marker PDA
/// - Used in: [distributor_key, actual_wallet, "redirect-target"]
#[constant]
pub const REDIRECT_TARGET_SEED: &str = "redirect-target";
