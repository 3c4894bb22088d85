use crate::constants::*;
use crate::error::*;
use crate::event::*;
use crate::state::*;
use anchor_lang::prelude::*;

/**
 * Account context for pausing or unpausing claims
 *
 * Access Control: Admin or config owner
 */
#[event_cpi]
#[derive(Accounts)]
pub struct SetPaused<'info> {
    #[account(
        seeds = [CONFIG_SEED.as_bytes()],
        bump = config.bump,
        constraint = config.is_admin_or_owner(&admin_or_owner.key()) @ DistributorError::NotAdminOrOwner
    )]
    pub config: Account<'info, Config>,

    #[account(mut)]
    pub distributor: Account<'info, MerkleDistributor>,

    pub admin_or_owner: Signer<'info>,
}

/// Setting the current value fails with `ChangingPauseValueToTheSame`;
/// unpausing validates the schedule.
pub fn handle_set_paused(ctx: Context<SetPaused>, paused: bool) -> Result<()> {
    let distributor = &mut ctx.accounts.distributor;

    distributor.set_paused(paused)?;

    emit_cpi!(PauseChanged {
        distributor: distributor.key(),
        admin_or_owner: ctx.accounts.admin_or_owner.key(),
        paused,
    });

    Ok(())
}
