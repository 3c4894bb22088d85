use anchor_lang::prelude::*;

use crate::error::DistributorError;
use crate::state::claim_state::ClaimStatus;
use crate::state::schedule_change::Change;
use crate::state::vesting::Vesting;
use crate::utils::verify_proof;

/// How a distributor tracks claims. Fixed at creation.
#[derive(AnchorSerialize, AnchorDeserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClaimMode {
    /// Allocations vest over the schedule and are claimed in parts
    #[default]
    Accrual,
    /// Every allocation is claimed once, in full
    Bitmap,
}

/**
 * Main distributor state account
 *
 * Stores the root committing to all allocations, the vesting schedule that
 * releases them and the accounting needed by the owner withdrawal.
 *
 * Derivation: ["distributor", token_mint, creator, nonce]
 *
 * Lifecycle:
 * 1. Created during create_distributor, either with a complete schedule or
 *    as a paused draft with room for `schedule_capacity` periods
 * 2. Root, schedule and pause flag updated by admins
 * 3. Optionally frozen by stop_vesting
 *
 * Claims only read this account, so claimants never contend on it.
 */
#[account]
#[derive(Default, Debug)]
pub struct MerkleDistributor {
    /// Bump seed for PDA derivation
    /// - Saved to avoid recomputation when signing vault transfers
    pub bump: u8,

    /// Nonce number for this distributor
    /// - Allows multiple distributors for the same token/creator pair
    pub nonce: u32,

    /// Admin or owner who created the distributor
    pub creator: Pubkey,

    /// Token mint address
    pub token_mint: Pubkey,

    /// Token vault account address
    /// - Derived from: ["vault", distributor_key]
    pub token_vault: Pubkey,
    pub vault_bump: u8,

    /// Incremented on every root update
    /// - Claim bitmaps are scoped by epoch
    pub epoch: u64,

    /// Root over (index, wallet, amount) leaves
    pub merkle_root: [u8; 32],

    pub paused: bool,

    pub claim_mode: ClaimMode,

    /// Last moment a refund request can be created or cancelled
    /// - `None` leaves the refund window open
    pub refund_deadline_ts: Option<u64>,

    /// Sum of all allocations committed by the current root
    pub total_amount: u64,

    /// Tokens taken back by the owner so far
    pub withdrawn_amount: u64,

    /// Set by stop_vesting, after which the schedule is frozen
    pub vesting_stopped: bool,

    /// Number of periods the account was sized for
    pub schedule_capacity: u64,

    pub vesting: Vesting,
}

impl MerkleDistributor {
    /// Includes 8-byte discriminator, excludes the schedule
    pub const BASE_LEN: usize = 8
        + 1 // bump
        + 4 // nonce
        + 32 // creator
        + 32 // token_mint
        + 32 // token_vault
        + 1 // vault_bump
        + 8 // epoch
        + 32 // merkle_root
        + 1 // paused
        + 1 // claim_mode
        + 1 + 8 // refund_deadline_ts
        + 8 // total_amount
        + 8 // withdrawn_amount
        + 1 // vesting_stopped
        + 8; // schedule_capacity

    /// Account size for a schedule of up to `capacity` periods
    pub fn space_required(capacity: usize) -> usize {
        Self::BASE_LEN + Vesting::space_required(capacity)
    }

    pub fn ensure_mode(&self, mode: ClaimMode) -> Result<()> {
        require!(self.claim_mode == mode, DistributorError::WrongClaimMode);

        Ok(())
    }

    pub fn ensure_not_paused(&self) -> Result<()> {
        require!(!self.paused, DistributorError::Paused);

        Ok(())
    }

    /// Fails with `InvalidProof` unless the current root commits to the leaf
    pub fn verify_allocation(
        &self,
        index: u64,
        original_wallet: &Pubkey,
        amount: u64,
        proof: &[[u8; 32]],
    ) -> Result<()> {
        require!(
            verify_proof(index, original_wallet, amount, proof, &self.merkle_root),
            DistributorError::InvalidProof
        );

        Ok(())
    }

    /// Unpausing requires a complete schedule unless vesting was stopped
    pub fn set_paused(&mut self, paused: bool) -> Result<()> {
        require!(
            self.paused != paused,
            DistributorError::ChangingPauseValueToTheSame
        );

        if !paused && !self.vesting_stopped {
            self.vesting.validate()?;
        }

        self.paused = paused;

        Ok(())
    }

    /// Replaces the root and returns the new epoch
    pub fn update_root(
        &mut self,
        merkle_root: [u8; 32],
        total_amount: u64,
        unpause: bool,
    ) -> Result<u64> {
        self.epoch = self
            .epoch
            .checked_add(1)
            .ok_or(DistributorError::IntegerOverflow)?;
        self.merkle_root = merkle_root;
        self.total_amount = total_amount;

        if unpause && self.paused {
            self.set_paused(false)?;
        }

        Ok(self.epoch)
    }

    fn schedule_capacity(&self) -> Result<usize> {
        usize::try_from(self.schedule_capacity).map_err(|_| error!(DistributorError::IntegerOverflow))
    }

    /// Applies a validated batch of changes to the live schedule
    pub fn update_schedule(&mut self, changes: &[Change], now: u64) -> Result<()> {
        require!(!self.vesting_stopped, DistributorError::ScheduleStopped);

        let capacity = self.schedule_capacity()?;
        self.vesting = self.vesting.apply_changes(changes, now, capacity)?;

        Ok(())
    }

    /// Applies a batch without validating the result; only while paused
    pub fn stage_schedule(&mut self, changes: &[Change], now: u64) -> Result<()> {
        require!(!self.vesting_stopped, DistributorError::ScheduleStopped);
        require!(self.paused, DistributorError::ScheduleNotPaused);

        let capacity = self.schedule_capacity()?;
        self.vesting = self.vesting.stage_changes(changes, now, capacity)?;

        Ok(())
    }

    /// Freezes the schedule at `now` and returns the percentage still vesting
    pub fn stop_vesting(&mut self, now: u64) -> Result<u64> {
        require!(!self.vesting_stopped, DistributorError::ScheduleStopped);

        self.vesting.stop(now)?;
        self.vesting_stopped = true;

        self.vesting.total_percentage()
    }

    /**
     * Amount an accrual claim delivers now
     *
     * @param status - claim record of the original wallet
     * @param amount - allocation proven against the current root
     * @param now - current unix timestamp
     *
     * The entitlement is cumulative over the whole schedule, so the record
     * is netted against everything delivered before, under any root.
     */
    pub fn accrual_claim_amount(&self, status: &ClaimStatus, amount: u64, now: u64) -> Result<u64> {
        let entitled = self.vesting.compute_claimable(now, 0, amount)?;
        let delivered = entitled.saturating_sub(status.claimed_amount);

        if delivered == 0 {
            if self.vesting.has_stopped(now)? {
                return err!(DistributorError::ScheduleStopped);
            }
            return err!(DistributorError::NothingToClaim);
        }

        msg!(
            "entitled {} claimed {} delivering {}",
            entitled,
            status.claimed_amount,
            delivered
        );

        Ok(delivered)
    }

    /// Amount the owner may take out of the vault in total at `now`
    ///
    /// Bitmap claims pay whole allocations regardless of the schedule, so
    /// nothing in a bitmap distributor is ever unvested.
    pub fn withdrawable_amount(&self, now: u64) -> Result<u64> {
        match self.claim_mode {
            ClaimMode::Accrual => self.vesting.compute_withdrawable(now, self.total_amount),
            ClaimMode::Bitmap => Ok(0),
        }
    }

    /// Books an owner withdrawal and returns the new withdrawn total
    pub fn record_withdrawal(&mut self, amount: u64, now: u64) -> Result<u64> {
        require!(amount > 0, DistributorError::InvalidAmount);

        let withdrawn = self
            .withdrawn_amount
            .checked_add(amount)
            .ok_or(DistributorError::IntegerOverflow)?;
        let withdrawable = self.withdrawable_amount(now)?;
        require!(
            withdrawn <= withdrawable,
            DistributorError::AmountExceedsWithdrawable
        );

        self.withdrawn_amount = withdrawn;

        Ok(withdrawn)
    }

    /// Refund requests can be created or cancelled up to and including the deadline
    pub fn refund_window_open(&self, now: u64) -> bool {
        self.refund_deadline_ts
            .map_or(true, |deadline| now <= deadline)
    }

    pub fn ensure_refund_window_open(&self, now: u64) -> Result<()> {
        require!(
            self.refund_window_open(now),
            DistributorError::RefundDeadlineIsOver
        );

        Ok(())
    }
}
