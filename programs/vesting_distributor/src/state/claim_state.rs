use anchor_lang::prelude::*;

use crate::constants::CLAIM_BITMAP_BYTES;
use crate::error::DistributorError;

/**
 * Accrual claim status account
 *
 * Tracks how much of a vesting allocation has been delivered so far.
 *
 * Derivation: ["claim", distributor_key, original_wallet]
 *
 * Lifecycle:
 * 1. Created on first claim (using init_if_needed)
 * 2. Updated with each subsequent claim
 *
 * Design Notes:
 * - Keyed by the wallet committed in the merkle leaf, not by the payout wallet
 * - Not scoped by epoch: when the root is replaced the claimed total carries
 *   over, so a larger allocation only releases the difference
 */
#[account]
#[derive(Default, Debug)]
pub struct ClaimStatus {
    /// Total amount delivered for this allocation (cumulative, all epochs)
    pub claimed_amount: u64,
    /// Timestamp of the last successful claim, 0 before the first one
    pub last_claimed_ts: u64,
    /// Epoch of the root used by the last claim
    pub last_epoch: u64,
    pub bump: u8,
}

impl ClaimStatus {
    /// Includes 8-byte discriminator
    pub const LEN: usize = 8 + 8 + 8 + 8 + 1;

    /// Books a delivery and returns the new cumulative total
    pub fn record_claim(&mut self, delivered: u64, now: u64, epoch: u64) -> Result<u64> {
        self.claimed_amount = self
            .claimed_amount
            .checked_add(delivered)
            .ok_or(DistributorError::IntegerOverflow)?;
        self.last_claimed_ts = now;
        self.last_epoch = epoch;

        Ok(self.claimed_amount)
    }
}

/**
 * Claim bitmap account
 *
 * One bit per allocation index, for distributors that release every
 * allocation in a single claim.
 *
 * Derivation: ["bitmap", distributor_key, epoch_be]
 *
 * The bitmap has a fixed size of CLAIM_BITMAP_BYTES; it is zero-filled when
 * the account is created and never resized. A set bit is never cleared.
 */
#[account]
#[derive(Default, Debug)]
pub struct ClaimBitmap {
    pub epoch: u64,
    pub bits: Vec<u8>,
    pub bump: u8,
}

impl ClaimBitmap {
    /// Includes 8-byte discriminator and the 4-byte vec prefix
    pub const LEN: usize = 8 + 8 + 4 + CLAIM_BITMAP_BYTES + 1;

    /// Number of allocation indices one bitmap can track
    pub const CAPACITY: u64 = (CLAIM_BITMAP_BYTES * 8) as u64;

    /// Sizes a freshly created bitmap; a no-op for an existing one
    pub fn initialize(&mut self, epoch: u64, bump: u8) {
        if self.bits.is_empty() {
            self.epoch = epoch;
            self.bits = vec![0; CLAIM_BITMAP_BYTES];
            self.bump = bump;
        }
    }

    fn locate(&self, index: u64) -> Result<(usize, u8)> {
        require!(index < Self::CAPACITY, DistributorError::ClaimIndexOutOfRange);

        let byte_index = (index / 8) as usize;
        require!(
            byte_index < self.bits.len(),
            DistributorError::ClaimIndexOutOfRange
        );

        Ok((byte_index, 1 << (index % 8)))
    }

    pub fn is_claimed(&self, index: u64) -> Result<bool> {
        let (byte_index, mask) = self.locate(index)?;

        Ok(self.bits[byte_index] & mask != 0)
    }

    /// Sets the bit for `index`, failing if it was already set
    pub fn set_claimed(&mut self, index: u64) -> Result<()> {
        let (byte_index, mask) = self.locate(index)?;
        require!(
            self.bits[byte_index] & mask == 0,
            DistributorError::AlreadyClaimed
        );

        self.bits[byte_index] |= mask;

        Ok(())
    }
}
