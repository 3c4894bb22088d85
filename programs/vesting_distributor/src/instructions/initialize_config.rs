use crate::constants::*;
use crate::event::*;
use crate::state::*;
use anchor_lang::prelude::*;

/**
 * Account context for creating the global config
 *
 * The config PDA can only be created once; whoever creates it becomes the
 * owner of the program's access control.
 */
#[event_cpi]
#[derive(Accounts)]
pub struct InitializeConfig<'info> {
    /// Global config account
    /// - Derived from: ["config"]
    #[account(
        init,
        payer = owner,
        space = Config::LEN,
        seeds = [CONFIG_SEED.as_bytes()],
        bump
    )]
    pub config: Account<'info, Config>,

    /// Becomes the config owner
    #[account(mut)]
    pub owner: Signer<'info>,

    /// System program for account creation
    pub system_program: Program<'info, System>,
}

pub fn handle_initialize_config(ctx: Context<InitializeConfig>) -> Result<()> {
    let owner = ctx.accounts.owner.key();
    let config = &mut ctx.accounts.config;

    config.set_inner(Config::new(owner, ctx.bumps.config));

    emit_cpi!(ConfigInitialized {
        config: config.key(),
        owner,
    });

    Ok(())
}
