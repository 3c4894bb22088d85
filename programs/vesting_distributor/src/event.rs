use anchor_lang::prelude::*;

/// Event emitted when the global config is created
#[event]
pub struct ConfigInitialized {
    /// Config account public key
    pub config: Pubkey,
    /// Owner recorded in the config
    pub owner: Pubkey,
}

/// Event emitted when an admin slot is filled
#[event]
pub struct AdminAdded {
    pub owner: Pubkey,
    pub admin: Pubkey,
}

/// Event emitted when an admin slot is cleared
#[event]
pub struct AdminRemoved {
    pub owner: Pubkey,
    pub admin: Pubkey,
}

/// Event emitted when a new distributor is created
#[event]
pub struct DistributorCreated {
    /// The distributor account public key
    pub distributor: Pubkey,
    /// Nonce of the distributor
    pub nonce: u32,
    /// Admin or owner who created the distributor
    pub creator: Pubkey,
    /// Token mint address
    pub token_mint: Pubkey,
    /// Token vault address
    pub token_vault: Pubkey,
    /// Initial merkle root
    pub merkle_root: [u8; 32],
    /// Total allocation committed by the root
    pub total_amount: u64,
    /// Number of periods in the initial schedule
    pub periods: u64,
    /// Number of periods the account was sized for
    pub schedule_capacity: u64,
}

/// Event emitted when the merkle root is replaced
#[event]
pub struct MerkleRootUpdated {
    pub distributor: Pubkey,
    /// Admin or owner who replaced the root
    pub admin_or_owner: Pubkey,
    /// Epoch that starts with this root
    pub epoch: u64,
    pub merkle_root: [u8; 32],
    pub total_amount: u64,
}

/// Event emitted after a schedule batch was applied
#[event]
pub struct ScheduleUpdated {
    pub distributor: Pubkey,
    pub admin_or_owner: Pubkey,
    /// Number of changes in the batch
    pub changes: u64,
    /// Number of periods after the batch
    pub periods: u64,
    /// False for staged batches that were not validated yet
    pub validated: bool,
}

/// Event emitted when the pause flag flips
#[event]
pub struct PauseChanged {
    pub distributor: Pubkey,
    pub admin_or_owner: Pubkey,
    pub paused: bool,
}

/// Event emitted when vesting is stopped
#[event]
pub struct VestingStopped {
    pub distributor: Pubkey,
    pub admin_or_owner: Pubkey,
    /// Timestamp the schedule was cut at
    pub stopped_at: u64,
    /// Sum of percentages left in the schedule
    pub remaining_percentage: u64,
}

/// Event emitted when tokens are added to the vault
#[event]
pub struct TokensDeposited {
    pub distributor: Pubkey,
    pub depositor: Pubkey,
    pub amount: u64,
}

/// Event emitted when unvested tokens are withdrawn by the owner
#[event]
pub struct TokensWithdrawn {
    /// The distributor account public key
    pub distributor: Pubkey,
    /// Owner who withdrew the tokens
    pub owner: Pubkey,
    /// Amount of tokens withdrawn
    pub amount_withdrawn: u64,
    /// Total withdrawn from this distributor so far
    pub total_withdrawn: u64,
}

/// Event emitted when tokens are claimed
#[event]
pub struct TokensClaimed {
    /// The distributor account public key
    pub distributor: Pubkey,
    /// Epoch of the root the proof was checked against
    pub epoch: u64,
    /// Wallet committed in the merkle leaf
    pub original_wallet: Pubkey,
    /// Token account that received the tokens
    pub token_account: Pubkey,
    /// Amount of tokens transferred in this transaction
    pub amount: u64,
    /// Total claimed by this allocation (equals amount for bitmap claims)
    pub total_claimed: u64,
}

/// Event emitted when a payout redirect changes
#[event]
pub struct WalletChanged {
    pub distributor: Pubkey,
    pub original: Pubkey,
    pub previous_actual: Pubkey,
    pub actual: Pubkey,
}

/// Event emitted when a refund request is opened
#[event]
pub struct RefundRequestCreated {
    pub distributor: Pubkey,
    pub user: Pubkey,
}

/// Event emitted when a refund request is withdrawn by its user
#[event]
pub struct RefundRequestCancelled {
    pub distributor: Pubkey,
    pub user: Pubkey,
}
