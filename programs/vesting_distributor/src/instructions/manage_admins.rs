use crate::constants::*;
use crate::error::*;
use crate::event::*;
use crate::state::*;
use anchor_lang::prelude::*;

/**
 * Account context for adding or removing an admin
 *
 * Access Control: Config owner only
 */
#[event_cpi]
#[derive(Accounts)]
pub struct ManageAdmin<'info> {
    /// Global config holding the admin slots
    #[account(
        mut,
        seeds = [CONFIG_SEED.as_bytes()],
        bump = config.bump,
        constraint = config.is_owner(&owner.key()) @ DistributorError::NotOwner
    )]
    pub config: Account<'info, Config>,

    pub owner: Signer<'info>,
}

/**
 * Grants admin rights to `admin`
 *
 * Adding an existing admin succeeds without changes. Fails with `MaxAdmins`
 * when every slot is taken.
 */
pub fn handle_add_admin(ctx: Context<ManageAdmin>, admin: Pubkey) -> Result<()> {
    let added = ctx.accounts.config.add_admin(admin)?;

    if !added {
        msg!("{} is already an admin", admin);
        return Ok(());
    }

    emit_cpi!(AdminAdded {
        owner: ctx.accounts.owner.key(),
        admin,
    });

    Ok(())
}

/// Revokes admin rights, failing with `AdminNotFound` for a non-admin
pub fn handle_remove_admin(ctx: Context<ManageAdmin>, admin: Pubkey) -> Result<()> {
    ctx.accounts.config.remove_admin(&admin)?;

    emit_cpi!(AdminRemoved {
        owner: ctx.accounts.owner.key(),
        admin,
    });

    Ok(())
}
