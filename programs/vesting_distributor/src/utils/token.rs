use anchor_lang::prelude::*;
use anchor_spl::token_interface::{transfer_checked, TokenAccount, TransferChecked};

use crate::error::DistributorError;

/// Universal token transfer function that supports both SPL Token and Token 2022
pub fn transfer_token<'a>(
    authority: AccountInfo<'a>,
    from: AccountInfo<'a>,
    to: AccountInfo<'a>,
    mint: AccountInfo<'a>,
    token_program: AccountInfo<'a>,
    amount: u64,
    decimals: u8,
    signer_seeds: Option<&[&[&[u8]]]>,
) -> Result<()> {
    let cpi_accounts = TransferChecked {
        from,
        mint,
        to,
        authority,
    };

    let cpi_program = token_program;

    let cpi_ctx = if let Some(seeds) = signer_seeds {
        CpiContext::new_with_signer(cpi_program, cpi_accounts, seeds)
    } else {
        CpiContext::new(cpi_program, cpi_accounts)
    };

    transfer_checked(cpi_ctx, amount, decimals)
}

/// Transfer out of the distributor vault, signed by the distributor PDA
///
/// Fails with `InvalidAmountTransferred` when the vault cannot cover `amount`
/// or when its balance did not drop by exactly `amount` afterwards.
pub fn transfer_from_vault<'a>(
    distributor: AccountInfo<'a>,
    vault: &mut InterfaceAccount<'a, TokenAccount>,
    to: AccountInfo<'a>,
    mint: AccountInfo<'a>,
    token_program: AccountInfo<'a>,
    amount: u64,
    decimals: u8,
    signer_seeds: &[&[&[u8]]],
) -> Result<()> {
    let amount_before = vault.amount;
    require!(
        amount_before >= amount,
        DistributorError::InvalidAmountTransferred
    );

    transfer_token(
        distributor,
        vault.to_account_info(),
        to,
        mint,
        token_program,
        amount,
        decimals,
        Some(signer_seeds),
    )?;

    vault.reload()?;
    let amount_after = vault.amount;
    msg!(
        "vault balance {} -> {} (transfer of {})",
        amount_before,
        amount_after,
        amount
    );

    require!(
        amount_before.checked_sub(amount_after) == Some(amount),
        DistributorError::InvalidAmountTransferred
    );

    Ok(())
}
