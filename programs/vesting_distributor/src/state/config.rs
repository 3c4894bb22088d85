use anchor_lang::prelude::*;

use crate::constants::MAX_ADMINS;
use crate::error::DistributorError;

/**
 * Global config account
 *
 * Holds the owner and a fixed set of admin slots. Every mutating
 * instruction is gated on it.
 *
 * Derivation: ["config"]
 *
 * Access levels:
 * - Owner: fixed at creation; manages admins and withdraws unvested tokens
 * - Admins: create distributors, update roots and schedules, pause, stop vesting
 */
#[account]
#[derive(Default, Debug)]
pub struct Config {
    pub owner: Pubkey,
    /// MAX_ADMINS slots, `None` marks a free slot
    pub admins: [Option<Pubkey>; 10],
    pub bump: u8,
}

impl Config {
    /// Includes 8-byte discriminator
    pub const LEN: usize = 8 + 32 + MAX_ADMINS * (1 + 32) + 1;

    pub fn new(owner: Pubkey, bump: u8) -> Self {
        Self {
            owner,
            admins: [None; MAX_ADMINS],
            bump,
        }
    }

    pub fn is_owner(&self, key: &Pubkey) -> bool {
        self.owner == *key
    }

    pub fn is_admin(&self, key: &Pubkey) -> bool {
        self.admins.contains(&Some(*key))
    }

    pub fn is_admin_or_owner(&self, key: &Pubkey) -> bool {
        self.is_owner(key) || self.is_admin(key)
    }

    pub fn admin_count(&self) -> usize {
        self.admins.iter().flatten().count()
    }

    /// Puts `admin` into the first free slot.
    ///
    /// Returns false when it already was an admin.
    pub fn add_admin(&mut self, admin: Pubkey) -> Result<bool> {
        if self.is_admin(&admin) {
            return Ok(false);
        }

        let slot = self
            .admins
            .iter_mut()
            .find(|slot| slot.is_none())
            .ok_or(DistributorError::MaxAdmins)?;
        *slot = Some(admin);

        Ok(true)
    }

    pub fn remove_admin(&mut self, admin: &Pubkey) -> Result<()> {
        let slot = self
            .admins
            .iter_mut()
            .find(|slot| slot.as_ref() == Some(admin))
            .ok_or(DistributorError::AdminNotFound)?;
        *slot = None;

        Ok(())
    }
}
