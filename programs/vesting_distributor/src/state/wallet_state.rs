use anchor_lang::prelude::*;

use crate::error::DistributorError;

/**
 * Payout redirect account
 *
 * Maps the wallet committed in the merkle leaf (`original`) to the wallet
 * that signs claims and receives tokens (`actual`).
 *
 * Derivation: [distributor_key, original_wallet, "actual-wallet"]
 *
 * Only one level of indirection exists: redirects are always rewritten from
 * `original`, a wallet that redirects its own allocation elsewhere can not
 * be chosen as `actual` for another one, and a wallet that is the `actual`
 * of another allocation (see `RedirectTarget`) can not redirect its own.
 */
#[account]
#[derive(Default, Debug)]
pub struct ActualWallet {
    pub original: Pubkey,
    pub actual: Pubkey,
    pub bump: u8,
}

impl ActualWallet {
    /// Includes 8-byte discriminator
    pub const LEN: usize = 8 + 32 + 32 + 1;

    pub fn is_redirected(&self) -> bool {
        self.actual != self.original
    }

    /// Points the allocation at `new_actual`
    ///
    /// @param signer - must be the current actual wallet
    /// @param new_actual_redirect - redirect record of `new_actual` as an original, if any
    /// @param original_target - marker of `original` as a redirect target, if any
    pub fn change(
        &mut self,
        signer: &Pubkey,
        new_actual: Pubkey,
        new_actual_redirect: Option<&ActualWallet>,
        original_target: Option<&RedirectTarget>,
    ) -> Result<Pubkey> {
        require!(
            self.actual == *signer,
            DistributorError::NotAllowedToChangeWallet
        );
        require!(
            self.actual != new_actual,
            DistributorError::NotAllowedToChangeWallet
        );

        if new_actual != self.original {
            let chained = new_actual_redirect.map_or(false, |redirect| redirect.is_redirected());
            require!(!chained, DistributorError::NotAllowedToChangeWallet);

            let is_target = original_target.map_or(false, |target| target.is_live());
            require!(!is_target, DistributorError::NotAllowedToChangeWallet);
        }

        let previous = self.actual;
        self.actual = new_actual;

        Ok(previous)
    }
}

/**
 * Redirect target marker
 *
 * Counts the allocations of a distributor whose `actual` is `wallet`. While
 * the count is above zero, `wallet` can not redirect its own allocation.
 *
 * Derivation: [distributor_key, wallet, "redirect-target"]
 */
#[account]
#[derive(Default, Debug)]
pub struct RedirectTarget {
    pub distributor: Pubkey,
    pub wallet: Pubkey,
    /// Number of other allocations currently paid out to `wallet`
    pub referrers: u32,
}

impl RedirectTarget {
    /// Includes 8-byte discriminator
    pub const LEN: usize = 8 + 32 + 32 + 4;

    pub fn is_live(&self) -> bool {
        self.referrers > 0
    }

    /// Registers one more allocation paid out to `wallet`
    pub fn retain(&mut self, distributor: Pubkey, wallet: Pubkey) -> Result<u32> {
        self.distributor = distributor;
        self.wallet = wallet;
        self.referrers = self
            .referrers
            .checked_add(1)
            .ok_or(DistributorError::IntegerOverflow)?;

        Ok(self.referrers)
    }

    /// Unregisters an allocation that moved away from `wallet`
    pub fn release(&mut self) -> Result<u32> {
        self.referrers = self
            .referrers
            .checked_sub(1)
            .ok_or(DistributorError::IntegerOverflow)?;

        Ok(self.referrers)
    }
}

/// Wallet that must sign a claim for `original` and own the receiving token
/// account.
pub fn resolve_payout_wallet(original: &Pubkey, redirect: Option<&ActualWallet>) -> Result<Pubkey> {
    match redirect {
        Some(redirect) => {
            require!(
                redirect.original == *original,
                DistributorError::WrongClaimer
            );
            Ok(redirect.actual)
        }
        None => Ok(*original),
    }
}

/**
 * Refund request account
 *
 * The existence of this account proves the user asked for a refund instead
 * of tokens. While `active` the allocation can not be claimed. The user can
 * cancel until the distributor's refund deadline; after it the refund is
 * final.
 *
 * Derivation: [distributor_key, original_wallet, "refund-request"]
 */
#[account]
#[derive(Default, Debug)]
pub struct RefundRequest {
    pub distributor: Pubkey,
    pub user: Pubkey,
    pub active: bool,
    pub bump: u8,
}

impl RefundRequest {
    /// Includes 8-byte discriminator
    pub const LEN: usize = 8 + 32 + 32 + 1 + 1;
}

/// Claims are blocked for as long as a refund request is active
pub fn ensure_no_active_refund(refund_request: Option<&RefundRequest>) -> Result<()> {
    require!(
        !refund_request.map_or(false, |request| request.active),
        DistributorError::RefundRequested
    );

    Ok(())
}
