use crate::constants::*;
use crate::error::DistributorError;
use crate::event::*;
use crate::state::*;
use crate::utils::load_optional_account;
use anchor_lang::prelude::*;

/**
 * Account context for creating a payout redirect
 *
 * The original wallet creates its redirect pointing at itself; it can be
 * changed afterwards with change_wallet.
 */
#[event_cpi]
#[derive(Accounts)]
pub struct InitActualWallet<'info> {
    pub distributor: Account<'info, MerkleDistributor>,

    /// Derived from: [distributor_key, user, "actual-wallet"]
    #[account(
        init,
        payer = user,
        space = ActualWallet::LEN,
        seeds = [distributor.key().as_ref(), user.key().as_ref(), ACTUAL_WALLET_SEED.as_bytes()],
        bump
    )]
    pub actual_wallet: Account<'info, ActualWallet>,

    #[account(mut)]
    pub user: Signer<'info>,

    pub system_program: Program<'info, System>,
}

pub fn handle_init_actual_wallet(ctx: Context<InitActualWallet>) -> Result<()> {
    let user = ctx.accounts.user.key();
    let actual_wallet = &mut ctx.accounts.actual_wallet;

    actual_wallet.set_inner(ActualWallet {
        original: user,
        actual: user,
        bump: ctx.bumps.actual_wallet,
    });

    emit_cpi!(WalletChanged {
        distributor: ctx.accounts.distributor.key(),
        original: user,
        previous_actual: user,
        actual: user,
    });

    Ok(())
}

/**
 * Account context for redirecting an allocation to another wallet
 *
 * Access Control: The current actual wallet of the allocation
 *
 * Redirect target markers are optional: `previous_target` is passed while
 * the allocation is redirected, `new_target` when `new_wallet` is not the
 * original wallet.
 */
#[event_cpi]
#[derive(Accounts)]
pub struct ChangeWallet<'info> {
    pub distributor: Account<'info, MerkleDistributor>,

    #[account(
        mut,
        seeds = [distributor.key().as_ref(), actual_wallet.original.as_ref(), ACTUAL_WALLET_SEED.as_bytes()],
        bump = actual_wallet.bump
    )]
    pub actual_wallet: Account<'info, ActualWallet>,

    /// CHECK: Only its key is stored
    pub new_wallet: UncheckedAccount<'info>,

    /// CHECK: Redirect of `new_wallet`'s own allocation, empty when none was created
    #[account(
        seeds = [distributor.key().as_ref(), new_wallet.key().as_ref(), ACTUAL_WALLET_SEED.as_bytes()],
        bump
    )]
    pub new_wallet_redirect: UncheckedAccount<'info>,

    /// CHECK: Marker of the original wallet as a redirect target, empty when none was created
    #[account(
        seeds = [distributor.key().as_ref(), actual_wallet.original.as_ref(), REDIRECT_TARGET_SEED.as_bytes()],
        bump
    )]
    pub original_target: UncheckedAccount<'info>,

    /// Marker of the wallet the allocation currently points at
    #[account(
        mut,
        seeds = [distributor.key().as_ref(), actual_wallet.actual.as_ref(), REDIRECT_TARGET_SEED.as_bytes()],
        bump
    )]
    pub previous_target: Option<Account<'info, RedirectTarget>>,

    /// Marker of `new_wallet`
    #[account(
        init_if_needed,
        payer = current_wallet,
        space = RedirectTarget::LEN,
        seeds = [distributor.key().as_ref(), new_wallet.key().as_ref(), REDIRECT_TARGET_SEED.as_bytes()],
        bump
    )]
    pub new_target: Option<Account<'info, RedirectTarget>>,

    /// Current actual wallet of the allocation
    #[account(mut)]
    pub current_wallet: Signer<'info>,

    pub system_program: Program<'info, System>,
}

/**
 * Points the allocation at `new_wallet`
 *
 * Validation Rules:
 * - Signer must be the current actual wallet
 * - `new_wallet` must differ from the current actual wallet
 * - `new_wallet` must not redirect its own allocation elsewhere, and the
 *   original wallet must not be the actual wallet of another allocation,
 *   which keeps redirects one level deep
 *
 * The marker of the previous actual wallet is released (and closed once no
 * allocation points at it), the marker of `new_wallet` is retained.
 */
pub fn handle_change_wallet(ctx: Context<ChangeWallet>) -> Result<()> {
    let distributor = ctx.accounts.distributor.key();
    let new_wallet = ctx.accounts.new_wallet.key();
    let new_wallet_redirect =
        load_optional_account::<ActualWallet>(&ctx.accounts.new_wallet_redirect)?;
    let original_target =
        load_optional_account::<RedirectTarget>(&ctx.accounts.original_target)?;

    let actual_wallet = &mut ctx.accounts.actual_wallet;
    let original = actual_wallet.original;
    let previous_actual = actual_wallet.change(
        &ctx.accounts.current_wallet.key(),
        new_wallet,
        new_wallet_redirect.as_ref(),
        original_target.as_ref(),
    )?;

    if previous_actual != original {
        let previous_target = ctx
            .accounts
            .previous_target
            .as_mut()
            .ok_or(DistributorError::RedirectTargetRequired)?;
        if previous_target.release()? == 0 {
            previous_target.close(ctx.accounts.current_wallet.to_account_info())?;
        }
    }

    if new_wallet != original {
        let new_target = ctx
            .accounts
            .new_target
            .as_mut()
            .ok_or(DistributorError::RedirectTargetRequired)?;
        let referrers = new_target.retain(distributor, new_wallet)?;
        msg!("wallet {} is the actual wallet of {} allocations", new_wallet, referrers);
    }

    emit_cpi!(WalletChanged {
        distributor,
        original,
        previous_actual,
        actual: new_wallet,
    });

    Ok(())
}
