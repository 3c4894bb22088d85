use crate::constants::*;
use crate::error::*;
use crate::event::*;
use crate::state::*;
use anchor_lang::prelude::*;

/**
 * Account context for editing a distributor's vesting schedule
 *
 * Shared by update_schedule and stage_schedule.
 *
 * Access Control: Admin or config owner
 */
#[event_cpi]
#[derive(Accounts)]
pub struct UpdateSchedule<'info> {
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

/**
 * Applies a batch of schedule changes
 *
 * @param changes - push/update/remove edits, indices refer to the schedule
 *                  before the batch
 *
 * Validation Rules:
 * - Started periods can not be removed, moved or changed in kind
 * - Started periods can not grow in percentage or duration
 * - The resulting schedule must cover exactly 100%
 * - Nothing is written when any rule fails
 */
pub fn handle_update_schedule(ctx: Context<UpdateSchedule>, changes: Vec<Change>) -> Result<()> {
    let now = Clock::get()?.unix_timestamp as u64;
    let distributor = &mut ctx.accounts.distributor;

    distributor.update_schedule(&changes, now)?;

    emit_cpi!(ScheduleUpdated {
        distributor: distributor.key(),
        admin_or_owner: ctx.accounts.admin_or_owner.key(),
        changes: changes.len() as u64,
        periods: distributor.vesting.len() as u64,
        validated: true,
    });

    Ok(())
}

/**
 * Applies a batch of schedule changes to a paused distributor without
 * checking that the result is complete
 *
 * Used to build schedules larger than one transaction can carry. The
 * schedule is validated when the distributor is unpaused.
 */
pub fn handle_stage_schedule(ctx: Context<UpdateSchedule>, changes: Vec<Change>) -> Result<()> {
    let now = Clock::get()?.unix_timestamp as u64;
    let distributor = &mut ctx.accounts.distributor;

    distributor.stage_schedule(&changes, now)?;

    emit_cpi!(ScheduleUpdated {
        distributor: distributor.key(),
        admin_or_owner: ctx.accounts.admin_or_owner.key(),
        changes: changes.len() as u64,
        periods: distributor.vesting.len() as u64,
        validated: false,
    });

    Ok(())
}
