use anchor_lang::prelude::*;

use crate::error::DistributorError;

/**
 * Creator nonce account
 *
 * Counts the distributors created by one admin or owner, so every new
 * distributor of that creator gets its own address.
 *
 * Derivation: ["creator_nonce", creator]
 *
 * Lifecycle:
 * 1. Created on the creator's first distributor (using init_if_needed)
 * 2. Incremented with each new distributor
 */
#[account]
#[derive(Default, Debug)]
pub struct NonceState {
    /// Nonce of the latest distributor of this creator
    pub nonce: u32,
}

impl NonceState {
    /// Includes 8-byte discriminator
    pub const LEN: usize = 8 + 4;

    pub fn has_next(&self) -> bool {
        self.nonce != u32::MAX
    }

    /// Nonce the next distributor will be derived with
    pub fn next_nonce(&self) -> Result<u32> {
        require!(self.has_next(), DistributorError::IntegerOverflow);
        Ok(self.nonce.wrapping_add(1))
    }
}
