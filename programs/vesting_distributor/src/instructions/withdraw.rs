use crate::constants::*;
use crate::error::*;
use crate::event::*;
use crate::state::*;
use crate::utils::transfer_from_vault;
use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};

/**
 * Account context for withdrawing unvested tokens
 *
 * Access Control: Config owner only
 *
 * Business Logic:
 * - Only the share of the allocation that is not vesting yet can leave
 *   the vault, summed over all withdrawals
 * - After stop_vesting this includes everything cut from the schedule
 */
#[event_cpi]
#[derive(Accounts)]
pub struct WithdrawTokens<'info> {
    #[account(
        seeds = [CONFIG_SEED.as_bytes()],
        bump = config.bump,
        constraint = config.is_owner(&owner.key()) @ DistributorError::NotOwner
    )]
    pub config: Account<'info, Config>,

    #[account(mut)]
    pub distributor: Account<'info, MerkleDistributor>,

    /// Token vault containing the tokens
    /// - Derived from: ["vault", distributor_key]
    #[account(
        mut,
        seeds = [VAULT_SEED.as_bytes(), distributor.key().as_ref()],
        bump = distributor.vault_bump
    )]
    pub token_vault: InterfaceAccount<'info, TokenAccount>,

    /// Owner's token account to receive the tokens
    #[account(
        mut,
        token::mint = distributor.token_mint,
        token::authority = owner,
        token::token_program = token_program,
    )]
    pub owner_token_account: InterfaceAccount<'info, TokenAccount>,

    /// Must match the distributor's token mint, used for transfer_checked
    #[account(
        token::token_program = token_program,
        constraint = token_mint.key() == distributor.token_mint @ DistributorError::TokenMintMismatch
    )]
    pub token_mint: InterfaceAccount<'info, Mint>,

    pub owner: Signer<'info>,

    /// Token program (supports both SPL Token and Token 2022)
    pub token_program: Interface<'info, TokenInterface>,
}

/**
 * Withdraws `amount` unvested tokens from the vault
 *
 * @param ctx - The account context containing all required accounts
 * @param amount - Tokens to withdraw
 *
 * Fails with `AmountExceedsWithdrawable` when the withdrawn total would
 * exceed the unvested share at the current time.
 */
pub fn handle_withdraw_tokens(ctx: Context<WithdrawTokens>, amount: u64) -> Result<()> {
    let now = Clock::get()?.unix_timestamp as u64;
    let distributor = &mut ctx.accounts.distributor;

    // ===== EFFECTS PHASE =====

    let total_withdrawn = distributor.record_withdrawal(amount, now)?;

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
        ctx.accounts.owner_token_account.to_account_info(),
        ctx.accounts.token_mint.to_account_info(),
        ctx.accounts.token_program.to_account_info(),
        amount,
        ctx.accounts.token_mint.decimals,
        signer,
    )?;

    emit_cpi!(TokensWithdrawn {
        distributor: distributor.key(),
        owner: ctx.accounts.owner.key(),
        amount_withdrawn: amount,
        total_withdrawn,
    });

    Ok(())
}
