use crate::constants::*;
use crate::error::*;
use crate::event::*;
use crate::state::*;
use anchor_lang::prelude::*;

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug)]
pub struct UpdateRootArgs {
    pub merkle_root: [u8; 32],
    /// Sum of all allocations committed by the new root
    pub total_amount: u64,
    /// Also unpause the distributor, validating its schedule
    pub unpause: bool,
}

/**
 * Account context for replacing the merkle root
 *
 * Access Control: Admin or config owner
 *
 * Business Logic:
 * - Every update starts a new epoch, so bitmap claims start over
 * - Accrual claims keep their claimed totals; raising an allocation only
 *   releases the difference
 * - A raised total has to be covered by a deposit into the vault
 */
#[event_cpi]
#[derive(Accounts)]
pub struct UpdateRoot<'info> {
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

pub fn handle_update_root(ctx: Context<UpdateRoot>, args: UpdateRootArgs) -> Result<()> {
    let distributor = &mut ctx.accounts.distributor;

    let epoch = distributor.update_root(args.merkle_root, args.total_amount, args.unpause)?;

    emit_cpi!(MerkleRootUpdated {
        distributor: distributor.key(),
        admin_or_owner: ctx.accounts.admin_or_owner.key(),
        epoch,
        merkle_root: args.merkle_root,
        total_amount: args.total_amount,
    });

    Ok(())
}
