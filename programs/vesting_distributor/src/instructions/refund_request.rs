use crate::constants::*;
use crate::error::*;
use crate::event::*;
use crate::state::*;
use crate::utils::load_optional_account;
use anchor_lang::prelude::*;

/// Allocation of the user asking for a refund
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug)]
pub struct RefundRequestArgs {
    pub index: u64,
    pub amount: u64,
    pub proof: Vec<[u8; 32]>,
}

/**
 * Account context for requesting a refund instead of tokens
 *
 * Access Control: The original wallet of an allocation that was never claimed
 */
#[event_cpi]
#[derive(Accounts)]
pub struct InitRefundRequest<'info> {
    pub distributor: Account<'info, MerkleDistributor>,

    /// Derived from: [distributor_key, user, "refund-request"]
    #[account(
        init_if_needed,
        payer = user,
        space = RefundRequest::LEN,
        seeds = [distributor.key().as_ref(), user.key().as_ref(), REFUND_REQUEST_SEED.as_bytes()],
        bump
    )]
    pub refund_request: Account<'info, RefundRequest>,

    /// CHECK: Accrual claim record of the user, empty when nothing was claimed
    #[account(
        seeds = [CLAIM_SEED.as_bytes(), distributor.key().as_ref(), user.key().as_ref()],
        bump
    )]
    pub claim_status: UncheckedAccount<'info>,

    /// CHECK: Claim bitmap of the current epoch, empty when nobody claimed yet
    #[account(
        seeds = [BITMAP_SEED.as_bytes(), distributor.key().as_ref(), distributor.epoch.to_be_bytes().as_ref()],
        bump
    )]
    pub claim_bitmap: UncheckedAccount<'info>,

    #[account(mut)]
    pub user: Signer<'info>,

    pub system_program: Program<'info, System>,
}

/// True when anything of the allocation was delivered already
fn has_claimed(
    distributor: &MerkleDistributor,
    index: u64,
    claim_status: &AccountInfo,
    claim_bitmap: &AccountInfo,
) -> Result<bool> {
    match distributor.claim_mode {
        ClaimMode::Accrual => Ok(load_optional_account::<ClaimStatus>(claim_status)?
            .map_or(false, |status| status.claimed_amount > 0)),
        ClaimMode::Bitmap => match load_optional_account::<ClaimBitmap>(claim_bitmap)? {
            Some(bitmap) => bitmap.is_claimed(index),
            None => Ok(false),
        },
    }
}

/**
 * Opts the user's allocation out of the distribution
 *
 * Validation Rules:
 * - The allocation must be proven against the current root
 * - Nothing of it may have been claimed
 * - Only up to the distributor's refund deadline
 *
 * While the request is active, claims for the allocation fail.
 */
pub fn handle_init_refund_request(
    ctx: Context<InitRefundRequest>,
    args: RefundRequestArgs,
) -> Result<()> {
    let now = Clock::get()?.unix_timestamp as u64;
    let distributor = &ctx.accounts.distributor;
    let user = ctx.accounts.user.key();

    distributor.verify_allocation(args.index, &user, args.amount, &args.proof)?;
    require!(
        !has_claimed(
            distributor,
            args.index,
            &ctx.accounts.claim_status,
            &ctx.accounts.claim_bitmap,
        )?,
        DistributorError::AlreadyClaimed
    );
    distributor.ensure_refund_window_open(now)?;

    ctx.accounts.refund_request.set_inner(RefundRequest {
        distributor: distributor.key(),
        user,
        active: true,
        bump: ctx.bumps.refund_request,
    });

    emit_cpi!(RefundRequestCreated {
        distributor: distributor.key(),
        user,
    });

    Ok(())
}

/**
 * Account context for withdrawing a refund request
 *
 * Access Control: The user who created the request
 */
#[event_cpi]
#[derive(Accounts)]
pub struct CancelRefundRequest<'info> {
    pub distributor: Account<'info, MerkleDistributor>,

    #[account(
        mut,
        seeds = [distributor.key().as_ref(), user.key().as_ref(), REFUND_REQUEST_SEED.as_bytes()],
        bump = refund_request.bump
    )]
    pub refund_request: Account<'info, RefundRequest>,

    pub user: Signer<'info>,
}

/// Reactivates claims for the allocation; only up to the refund deadline
pub fn handle_cancel_refund_request(ctx: Context<CancelRefundRequest>) -> Result<()> {
    let now = Clock::get()?.unix_timestamp as u64;

    ctx.accounts.distributor.ensure_refund_window_open(now)?;
    ctx.accounts.refund_request.active = false;

    emit_cpi!(RefundRequestCancelled {
        distributor: ctx.accounts.distributor.key(),
        user: ctx.accounts.user.key(),
    });

    Ok(())
}
