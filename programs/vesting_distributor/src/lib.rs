use anchor_lang::prelude::*;

declare_id!("UkxbaevDnP2XjPE6RJFF48X2SDHcPs66WPEtQd7LKqd");

pub mod constants;
pub mod error;
pub mod event;
pub mod instructions;
pub mod state;
pub mod utils;

#[cfg(test)]
pub mod test;

use instructions::*;
use state::Change;

/**
 * Vesting Distributor Program
 *
 * A Solana program releasing tokens to a large set of recipients committed by
 * a merkle root, either at once or along a vesting schedule.
 *
 * Key Features:
 * - Merkle proofs over (index, wallet, amount) leaves, keccak256 with sorted pairs
 * - Two claim modes: one-shot claims tracked in per-epoch bitmaps, or
 *   accrual claims that deliver whatever vested since the last claim
 * - Vesting schedules of linear and airdropped periods, editable in
 *   batches without touching what already vested
 * - Root updates that keep accrual claims netted across epochs
 * - Payout redirects and refund requests per allocation
 * - Owner/admin access control through a global config
 * - Cross-program call event emission for composability
 * - Support for both SPL Token and Token 2022
 *
 * Architecture:
 * - Config PDA: owner and admin slots
 * - Nonce State PDA: distributor counter per creator
 * - Distributor PDA: root, schedule and accounting
 * - Token Vault PDA: holds the tokens to be distributed
 * - Claim Status / Claim Bitmap PDAs: what each allocation received
 * - Actual Wallet / Refund Request PDAs: per-allocation user choices
 *
 * Workflow:
 * 1. Owner initializes the config and adds admins
 * 2. Admin creates a distributor and deposits the total amount
 * 3. Users claim with merkle proofs as their allocations vest
 * 4. Admins update roots and schedules, pause or stop vesting
 * 5. Owner withdraws tokens that will not vest
 */
#[program]
pub mod vesting_distributor {
    use super::*;

    /**
     * Creates the global config
     *
     * The signer becomes the owner. Can only be called once.
     */
    pub fn initialize_config(ctx: Context<InitializeConfig>) -> Result<()> {
        handle_initialize_config(ctx)
    }

    /**
     * Grants admin rights
     *
     * @param admin - wallet to add; adding an existing admin is a no-op
     *
     * Access Control: Owner only
     */
    pub fn add_admin(ctx: Context<ManageAdmin>, admin: Pubkey) -> Result<()> {
        handle_add_admin(ctx, admin)
    }

    /**
     * Revokes admin rights
     *
     * Access Control: Owner only
     */
    pub fn remove_admin(ctx: Context<ManageAdmin>, admin: Pubkey) -> Result<()> {
        handle_remove_admin(ctx, admin)
    }

    /**
     * Creates a new distributor
     *
     * Deposits `total_amount` into a vault controlled by the distributor PDA.
     * Nonce numbers are automatically assigned using a creator-specific counter.
     *
     * @param ctx - Account context containing config, distributor, vault and creator accounts
     * @param args - Root, total amount, schedule (or capacity of a draft) and claim settings
     *
     * Access Control: Admin or owner
     */
    pub fn create_distributor(
        ctx: Context<CreateDistributor>,
        args: CreateDistributorArgs,
    ) -> Result<()> {
        handle_create_distributor(ctx, args)
    }

    /**
     * Replaces the merkle root and starts a new epoch
     *
     * Access Control: Admin or owner
     */
    pub fn update_root(ctx: Context<UpdateRoot>, args: UpdateRootArgs) -> Result<()> {
        handle_update_root(ctx, args)
    }

    /**
     * Applies a batch of changes to the vesting schedule
     *
     * The result must be a complete schedule. Started periods can only shrink.
     *
     * Access Control: Admin or owner
     */
    pub fn update_schedule(ctx: Context<UpdateSchedule>, changes: Vec<Change>) -> Result<()> {
        handle_update_schedule(ctx, changes)
    }

    /**
     * Applies a batch of changes to the schedule of a paused distributor
     * without requiring the result to be complete
     *
     * Access Control: Admin or owner
     */
    pub fn stage_schedule(ctx: Context<UpdateSchedule>, changes: Vec<Change>) -> Result<()> {
        handle_stage_schedule(ctx, changes)
    }

    /**
     * Pauses or unpauses claims
     *
     * Access Control: Admin or owner
     */
    pub fn set_paused(ctx: Context<SetPaused>, paused: bool) -> Result<()> {
        handle_set_paused(ctx, paused)
    }

    /**
     * Freezes the vesting schedule at the current time
     *
     * Access Control: Admin or owner
     * Note: The part that will never vest becomes withdrawable by the owner
     */
    pub fn stop_vesting(ctx: Context<StopVesting>) -> Result<()> {
        handle_stop_vesting(ctx)
    }

    /**
     * Tops up the distributor vault
     *
     * Access Control: Anyone
     */
    pub fn deposit(ctx: Context<Deposit>, amount: u64) -> Result<()> {
        handle_deposit(ctx, amount)
    }

    /**
     * Withdraws tokens that are not vesting
     *
     * @param amount - tokens to withdraw, bounded by the unvested share
     *
     * Access Control: Owner only
     */
    pub fn withdraw_tokens(ctx: Context<WithdrawTokens>, amount: u64) -> Result<()> {
        handle_withdraw_tokens(ctx, amount)
    }

    /**
     * Claims the vested part of an allocation
     *
     * @param ctx - Account context containing distributor, claim status, and token accounts
     * @param args - Index, original wallet, amount and merkle proof of the allocation
     *
     * Access Control: Payout wallet of an allocation with a valid merkle proof
     */
    pub fn claim(ctx: Context<Claim>, args: ClaimArgs) -> Result<()> {
        handle_claim(ctx, args)
    }

    /**
     * Claims a whole allocation once per epoch
     *
     * Access Control: Payout wallet of an allocation with a valid merkle proof
     */
    pub fn claim_bitmap(ctx: Context<ClaimWithBitmap>, args: ClaimArgs) -> Result<()> {
        handle_claim_bitmap(ctx, args)
    }

    /**
     * Creates the payout redirect of the signer's allocation, pointing at itself
     */
    pub fn init_actual_wallet(ctx: Context<InitActualWallet>) -> Result<()> {
        handle_init_actual_wallet(ctx)
    }

    /**
     * Redirects claims of an allocation to a new wallet
     *
     * Access Control: Current actual wallet of the allocation
     *
     * A wallet other allocations are redirected to can not redirect its own.
     */
    pub fn change_wallet(ctx: Context<ChangeWallet>) -> Result<()> {
        handle_change_wallet(ctx)
    }

    /**
     * Requests a refund instead of tokens
     *
     * Access Control: Original wallet of an unclaimed allocation, before the refund deadline
     */
    pub fn init_refund_request(
        ctx: Context<InitRefundRequest>,
        args: RefundRequestArgs,
    ) -> Result<()> {
        handle_init_refund_request(ctx, args)
    }

    /**
     * Withdraws a refund request
     *
     * Access Control: Requesting user, before the refund deadline
     */
    pub fn cancel_refund_request(ctx: Context<CancelRefundRequest>) -> Result<()> {
        handle_cancel_refund_request(ctx)
    }
}
