use crate::constants::*;
use crate::error::*;
use crate::event::*;
use crate::state::*;
use anchor_lang::prelude::*;

/**
 * Account context for stopping a vesting schedule
 *
 * Access Control: Admin or config owner
 *
 * Business Logic:
 * - What vested so far stays claimable
 * - The running period is cut after its last complete interval
 * - Periods that have not started are removed
 * - The share that will never vest becomes withdrawable by the owner
 * - The schedule can not be edited afterwards
 */
#[event_cpi]
#[derive(Accounts)]
pub struct StopVesting<'info> {
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

pub fn handle_stop_vesting(ctx: Context<StopVesting>) -> Result<()> {
    let now = Clock::get()?.unix_timestamp as u64;
    let distributor = &mut ctx.accounts.distributor;

    let remaining_percentage = distributor.stop_vesting(now)?;
    msg!(
        "vesting stopped at {}, {} periods left covering {}",
        now,
        distributor.vesting.len(),
        remaining_percentage
    );

    emit_cpi!(VestingStopped {
        distributor: distributor.key(),
        admin_or_owner: ctx.accounts.admin_or_owner.key(),
        stopped_at: now,
        remaining_percentage,
    });

    Ok(())
}
