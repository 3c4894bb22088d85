use anchor_lang::prelude::*;

#[error_code]
pub enum DistributorError {
    // Access control errors
    #[msg("Only the config owner can perform this action")]
    NotOwner,
    #[msg("Only an admin or the config owner can perform this action")]
    NotAdminOrOwner,
    #[msg("Signer is not allowed to claim this allocation")]
    WrongClaimer,
    #[msg("Signer is not allowed to change this wallet")]
    NotAllowedToChangeWallet,
    #[msg("Redirect target account is missing")]
    RedirectTargetRequired,

    // Merkle proof errors
    #[msg("Invalid proof")]
    InvalidProof,
    #[msg("Leaf is not part of the tree")]
    LeafNotFound,

    // Claim state errors
    #[msg("Allocation already claimed")]
    AlreadyClaimed,
    #[msg("Distributor is paused")]
    Paused,
    #[msg("Distributor is already in the requested pause state")]
    ChangingPauseValueToTheSame,
    #[msg("Vesting schedule has stopped")]
    ScheduleStopped,
    #[msg("A refund was requested for this allocation")]
    RefundRequested,
    #[msg("Refund deadline is over")]
    RefundDeadlineIsOver,
    #[msg("Nothing to claim")]
    NothingToClaim,
    #[msg("Vesting period has already started")]
    VestingAlreadyStarted,
    #[msg("Instruction does not match the distributor claim mode")]
    WrongClaimMode,
    #[msg("Schedule can only be staged while the distributor is paused")]
    ScheduleNotPaused,

    // Schedule validation errors
    #[msg("Schedule has no periods")]
    EmptySchedule,
    #[msg("Schedule periods are out of order or overlap")]
    InvalidScheduleOrder,
    #[msg("Schedule percentages do not add up to 100%")]
    PercentageDoesntCoverAllTokens,
    #[msg("Period has zero interval or zero repetitions")]
    EmptyPeriod,
    #[msg("Invalid schedule change")]
    InvalidSchedule,
    #[msg("Duration of a started period cannot increase")]
    PeriodDurationIncreased,
    #[msg("Percentage of a started period cannot increase")]
    TokenPercentageIncreased,

    // Capacity errors
    #[msg("All admin slots are taken")]
    MaxAdmins,
    #[msg("Admin not found")]
    AdminNotFound,
    #[msg("Schedule does not fit into the distributor account")]
    MaxPeriods,
    #[msg("Allocation index does not fit into the claim bitmap")]
    ClaimIndexOutOfRange,

    // Amount and arithmetic errors
    #[msg("Integer overflow")]
    IntegerOverflow,
    #[msg("Vault balance did not change by the transferred amount")]
    InvalidAmountTransferred,
    #[msg("Invalid amount")]
    InvalidAmount,
    #[msg("Amount exceeds the unvested balance")]
    AmountExceedsWithdrawable,

    // Account validation errors
    #[msg("Account must be owned by this program")]
    AccountNotOwnedByProgram,
    #[msg("Token mint does not match distributor's token mint")]
    TokenMintMismatch,
}
