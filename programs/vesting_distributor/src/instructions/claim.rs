use crate::constants::*;
use crate::error::*;
use crate::event::*;
use crate::state::*;
use crate::utils::{load_optional_account, transfer_from_vault};
use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};

/// Allocation being claimed, as committed by the merkle root
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug)]
pub struct ClaimArgs {
    pub index: u64,
    /// Wallet in the merkle leaf; may differ from the signer after a redirect
    pub original_wallet: Pubkey,
    pub amount: u64,
    pub proof: Vec<[u8; 32]>,
}

/**
 * Account context for claiming vested tokens
 *
 * Access Control: The original wallet of the allocation, or the wallet it
 * was redirected to
 */
#[event_cpi]
#[derive(Accounts)]
#[instruction(args: ClaimArgs)]
pub struct Claim<'info> {
    pub distributor: Account<'info, MerkleDistributor>,

    /// Claim record of the allocation
    /// - Derived from: ["claim", distributor_key, original_wallet]
    /// - One record per wallet: a wallet listed under several indices of a
    ///   root nets all of them here and receives the largest amount only
    #[account(
        init_if_needed,
        payer = claimer,
        space = ClaimStatus::LEN,
        seeds = [CLAIM_SEED.as_bytes(), distributor.key().as_ref(), args.original_wallet.as_ref()],
        bump
    )]
    pub claim_status: Account<'info, ClaimStatus>,

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

    /// Token vault holding the tokens to be distributed
    /// - Derived from: ["vault", distributor_key]
    #[account(
        mut,
        seeds = [VAULT_SEED.as_bytes(), distributor.key().as_ref()],
        bump = distributor.vault_bump
    )]
    pub token_vault: InterfaceAccount<'info, TokenAccount>,

    /// Receives the tokens; must be owned by the payout wallet
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

    /// Token program (supports both SPL Token and Token 2022)
    pub token_program: Interface<'info, TokenInterface>,
}

/// Blocks refunded allocations and checks that `claimer` is the payout
/// wallet of `original_wallet` and owns the receiving token account.
pub(crate) fn check_claimer(
    original_wallet: &Pubkey,
    claimer: &Pubkey,
    target_owner: &Pubkey,
    actual_wallet: &AccountInfo,
    refund_request: &AccountInfo,
) -> Result<()> {
    let refund = load_optional_account::<RefundRequest>(refund_request)?;
    ensure_no_active_refund(refund.as_ref())?;

    let redirect = load_optional_account::<ActualWallet>(actual_wallet)?;
    let payout_wallet = resolve_payout_wallet(original_wallet, redirect.as_ref())?;

    require_keys_eq!(*claimer, payout_wallet, DistributorError::WrongClaimer);
    require_keys_eq!(*target_owner, payout_wallet, DistributorError::WrongClaimer);

    Ok(())
}

/**
 * Claims the vested part of an allocation
 *
 * @param ctx - The account context containing all required accounts
 * @param args - Allocation and its merkle proof
 *
 * Validation Process:
 * 1. Distributor must track claims by accrual
 * 2. Verify the merkle proof against the current root
 * 3. Distributor must not be paused
 * 4. No active refund request; signer must be the payout wallet
 * 5. Deliver everything vested so far minus what was claimed before
 */
pub fn handle_claim(ctx: Context<Claim>, args: ClaimArgs) -> Result<()> {
    let now = Clock::get()?.unix_timestamp as u64;
    let distributor = &ctx.accounts.distributor;

    // ===== VALIDATION PHASE =====

    distributor.ensure_mode(ClaimMode::Accrual)?;
    distributor.verify_allocation(args.index, &args.original_wallet, args.amount, &args.proof)?;
    distributor.ensure_not_paused()?;

    check_claimer(
        &args.original_wallet,
        &ctx.accounts.claimer.key(),
        &ctx.accounts.target_token_account.owner,
        &ctx.accounts.actual_wallet,
        &ctx.accounts.refund_request,
    )?;

    // ===== EFFECTS PHASE =====

    let claim_status = &mut ctx.accounts.claim_status;
    claim_status.bump = ctx.bumps.claim_status;

    let amount = distributor.accrual_claim_amount(claim_status, args.amount, now)?;
    let total_claimed = claim_status.record_claim(amount, now, distributor.epoch)?;

    // ===== INTERACTIONS PHASE =====

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
        amount,
        ctx.accounts.token_mint.decimals,
        signer,
    )?;

    emit_cpi!(TokensClaimed {
        distributor: distributor.key(),
        epoch: distributor.epoch,
        original_wallet: args.original_wallet,
        token_account: ctx.accounts.target_token_account.key(),
        amount,
        total_claimed,
    });

    Ok(())
}
