use crate::constants::*;
use crate::error::*;
use crate::event::*;
use crate::instructions::claim::{check_claimer, ClaimArgs};
use crate::state::*;
use crate::utils::transfer_from_vault;
use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};

/**
 * Account context for a one-shot claim tracked in a bitmap
 *
 * Access Control: The original wallet of the allocation, or the wallet it
 * was redirected to
 */
#[event_cpi]
#[derive(Accounts)]
#[instruction(args: ClaimArgs)]
pub struct ClaimWithBitmap<'info> {
    pub distributor: Account<'info, MerkleDistributor>,

    /// Claimed bits of the current epoch
    /// - Derived from: ["bitmap", distributor_key, epoch_be]
    #[account(
        init_if_needed,
        payer = claimer,
        space = ClaimBitmap::LEN,
        seeds = [BITMAP_SEED.as_bytes(), distributor.key().as_ref(), distributor.epoch.to_be_bytes().as_ref()],
        bump
    )]
    pub claim_bitmap: Account<'info, ClaimBitmap>,

    /// CHECK: Payout redirect of the original wallet, empty when none was created
    #[account(
        seeds = [distributor.key().as_ref(), args.original_wallet.as_ref(), ACTUAL_WALLET_SEED.as_bytes()],
        bump
    )]
    pub actual_wallet: UncheckedAccount<'info>,

    /// CHECK: Refund request of the original wallet, empty when none was created
    #[account(
        seeds = [distributor.key().as_ref(), args.original_wallet.as_ref(), REFUND_REQUEST_SEED.as_bytes()],
        bump
    )]
    pub refund_request: UncheckedAccount<'info>,

    #[account(
        mut,
        seeds = [VAULT_SEED.as_bytes(), distributor.key().as_ref()],
        bump = distributor.vault_bump
    )]
    pub token_vault: InterfaceAccount<'info, TokenAccount>,

    #[account(
        mut,
        token::mint = distributor.token_mint,
        token::token_program = token_program,
    )]
    pub target_token_account: InterfaceAccount<'info, TokenAccount>,

    #[account(
        token::token_program = token_program,
        constraint = token_mint.key() == distributor.token_mint @ DistributorError::TokenMintMismatch
    )]
    pub token_mint: InterfaceAccount<'info, Mint>,

    #[account(mut)]
    pub claimer: Signer<'info>,

    pub system_program: Program<'info, System>,

    pub token_program: Interface<'info, TokenInterface>,
}

/**
 * Claims a whole allocation at most once per epoch
 *
 * Validation Process:
 * 1. Distributor must track claims in a bitmap
 * 2. Verify the merkle proof against the current root
 * 3. The index must not be claimed in this epoch
 * 4. Distributor must not be paused
 * 5. No active refund request; signer must be the payout wallet
 * 6. Set the bit and transfer the full amount
 */
pub fn handle_claim_bitmap(ctx: Context<ClaimWithBitmap>, args: ClaimArgs) -> Result<()> {
    let distributor = &ctx.accounts.distributor;

    distributor.ensure_mode(ClaimMode::Bitmap)?;
    distributor.verify_allocation(args.index, &args.original_wallet, args.amount, &args.proof)?;

    let claim_bitmap = &mut ctx.accounts.claim_bitmap;
    claim_bitmap.initialize(distributor.epoch, ctx.bumps.claim_bitmap);
    require!(
        !claim_bitmap.is_claimed(args.index)?,
        DistributorError::AlreadyClaimed
    );

    distributor.ensure_not_paused()?;

    check_claimer(
        &args.original_wallet,
        &ctx.accounts.claimer.key(),
        &ctx.accounts.target_token_account.owner,
        &ctx.accounts.actual_wallet,
        &ctx.accounts.refund_request,
    )?;

    claim_bitmap.set_claimed(args.index)?;

    let nonce_bytes = distributor.nonce.to_le_bytes();
    let seeds = &[
        DISTRIBUTOR_SEED.as_bytes(),
        distributor.token_mint.as_ref(),
        distributor.creator.as_ref(),
        nonce_bytes.as_ref(),
        &[distributor.bump],
    ];
    let signer = &[&seeds[..]];

    transfer_from_vault(
        distributor.to_account_info(),
        &mut ctx.accounts.token_vault,
        ctx.accounts.target_token_account.to_account_info(),
        ctx.accounts.token_mint.to_account_info(),
        ctx.accounts.token_program.to_account_info(),
        args.amount,
        ctx.accounts.token_mint.decimals,
        signer,
    )?;

    emit_cpi!(TokensClaimed {
        distributor: distributor.key(),
        epoch: distributor.epoch,
        original_wallet: args.original_wallet,
        token_account: ctx.accounts.target_token_account.key(),
        amount: args.amount,
        total_claimed: args.amount,
    });

    Ok(())
}
