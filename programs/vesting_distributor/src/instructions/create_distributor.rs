use crate::constants::*;
use crate::error::*;
use crate::event::*;
use crate::state::*;
use crate::utils::transfer_token;
use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};

/// Parameters of a new distributor
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug)]
pub struct CreateDistributorArgs {
    /// Root over all (index, wallet, amount) allocations
    pub merkle_root: [u8; 32],
    /// Sum of all allocations, deposited into the vault on creation
    pub total_amount: u64,
    /// Complete schedule, or empty to create a paused draft
    pub schedule: Vec<Period>,
    /// Number of periods to reserve space for
    /// - Required for a draft, optional headroom otherwise
    pub periods_capacity: u64,
    pub claim_mode: ClaimMode,
    pub refund_deadline_ts: Option<u64>,
}

impl CreateDistributorArgs {
    /// Periods the distributor account is sized for
    pub fn schedule_capacity(&self) -> usize {
        let requested = std::cmp::max(self.schedule.len() as u64, self.periods_capacity);
        std::cmp::min(requested, MAX_SCHEDULE_PERIODS as u64) as usize
    }

    fn validate(&self) -> Result<()> {
        require!(self.total_amount > 0, DistributorError::InvalidAmount);
        require!(
            self.schedule.len() <= MAX_PERIODS_ON_CREATE,
            DistributorError::MaxPeriods
        );
        require!(
            self.periods_capacity <= MAX_SCHEDULE_PERIODS as u64,
            DistributorError::MaxPeriods
        );
        if self.schedule.is_empty() {
            require!(self.periods_capacity > 0, DistributorError::EmptySchedule);
        }

        Ok(())
    }
}

/**
 * Account context for creating a new distributor
 *
 * This instruction initializes a new distributor with automatic nonce management:
 * - Creates or updates the creator's nonce PDA
 * - Creates a distributor PDA sized for the requested schedule capacity
 * - Creates a token vault PDA owned by the distributor
 * - Transfers `total_amount` from the creator to the vault
 *
 * Access Control: Admin or config owner
 */
#[event_cpi]
#[derive(Accounts)]
#[instruction(args: CreateDistributorArgs)]
pub struct CreateDistributor<'info> {
    /// Global config used for access control
    #[account(
        seeds = [CONFIG_SEED.as_bytes()],
        bump = config.bump,
        constraint = config.is_admin_or_owner(&creator.key()) @ DistributorError::NotAdminOrOwner
    )]
    pub config: Account<'info, Config>,

    /// Nonce state account (PDA) that tracks nonce numbers for this creator
    /// - Derived from: ["creator_nonce", creator]
    #[account(
        init_if_needed,
        payer = creator,
        space = NonceState::LEN,
        seeds = [CREATOR_NONCE_SEED.as_bytes(), creator.key().as_ref()],
        bump,
        constraint = creator_nonce.has_next() @ DistributorError::IntegerOverflow
    )]
    pub creator_nonce: Account<'info, NonceState>,

    /// The main distributor account (PDA)
    /// - Derived from: ["distributor", token_mint, creator, current_nonce]
    /// - Nonce is automatically determined from creator_nonce.nonce + 1, which
    ///   can not wrap once the creator_nonce constraint passed
    #[account(
        init,
        payer = creator,
        space = MerkleDistributor::space_required(args.schedule_capacity()),
        seeds = [
            DISTRIBUTOR_SEED.as_bytes(),
            token_mint.key().as_ref(),
            creator.key().as_ref(),
            creator_nonce.nonce.wrapping_add(1).to_le_bytes().as_ref()
        ],
        bump
    )]
    pub distributor: Account<'info, MerkleDistributor>,

    /// Token vault account (PDA) that holds the tokens to be distributed
    /// - Controlled by the distributor PDA as token authority
    /// - Derived from: ["vault", distributor_key]
    #[account(
        init,
        token::mint = token_mint,
        token::authority = distributor,
        token::token_program = token_program,
        seeds = [VAULT_SEED.as_bytes(), distributor.key().as_ref()],
        bump,
        payer = creator,
    )]
    pub token_vault: InterfaceAccount<'info, TokenAccount>,

    /// Supports both SPL Token and Token 2022 programs
    #[account(
        token::token_program = token_program,
    )]
    pub token_mint: InterfaceAccount<'info, Mint>,

    /// Creator's token account funding the vault
    #[account(
        mut,
        token::mint = token_mint,
        token::authority = creator,
        token::token_program = token_program,
    )]
    pub creator_token_account: InterfaceAccount<'info, TokenAccount>,

    #[account(mut)]
    pub creator: Signer<'info>,

    pub system_program: Program<'info, System>,

    /// Token program (supports both SPL Token and Token 2022)
    pub token_program: Interface<'info, TokenInterface>,

    pub rent: Sysvar<'info, Rent>,
}

/**
 * Creates a new distributor with automatic nonce management
 *
 * @param ctx - The account context containing all required accounts
 * @param args - Root, total amount, schedule and claim settings
 *
 * A non-empty schedule must be complete and valid; the distributor starts
 * unpaused. An empty schedule creates a paused draft that is filled with
 * stage_schedule and validated when it gets unpaused.
 */
pub fn handle_create_distributor(
    ctx: Context<CreateDistributor>,
    args: CreateDistributorArgs,
) -> Result<()> {
    args.validate()?;

    let draft = args.schedule.is_empty();
    let vesting = if draft {
        Vesting::default()
    } else {
        Vesting::new(args.schedule.clone())?
    };
    let schedule_capacity = args.schedule_capacity() as u64;

    let creator_nonce = &mut ctx.accounts.creator_nonce;
    let current_nonce = creator_nonce.next_nonce()?;
    creator_nonce.nonce = current_nonce;

    let distributor = &mut ctx.accounts.distributor;
    distributor.set_inner(MerkleDistributor {
        bump: ctx.bumps.distributor,
        nonce: current_nonce,
        creator: ctx.accounts.creator.key(),
        token_mint: ctx.accounts.token_mint.key(),
        token_vault: ctx.accounts.token_vault.key(),
        vault_bump: ctx.bumps.token_vault,
        epoch: 0,
        merkle_root: args.merkle_root,
        paused: draft,
        claim_mode: args.claim_mode,
        refund_deadline_ts: args.refund_deadline_ts,
        total_amount: args.total_amount,
        withdrawn_amount: 0,
        vesting_stopped: false,
        schedule_capacity,
        vesting,
    });

    // Uses transfer_checked for compatibility with both SPL Token and Token 2022
    transfer_token(
        ctx.accounts.creator.to_account_info(),
        ctx.accounts.creator_token_account.to_account_info(),
        ctx.accounts.token_vault.to_account_info(),
        ctx.accounts.token_mint.to_account_info(),
        ctx.accounts.token_program.to_account_info(),
        args.total_amount,
        ctx.accounts.token_mint.decimals,
        None,
    )?;

    emit_cpi!(DistributorCreated {
        distributor: ctx.accounts.distributor.key(),
        nonce: current_nonce,
        creator: ctx.accounts.creator.key(),
        token_mint: ctx.accounts.token_mint.key(),
        token_vault: ctx.accounts.token_vault.key(),
        merkle_root: args.merkle_root,
        total_amount: args.total_amount,
        periods: args.schedule.len() as u64,
        schedule_capacity,
    });

    Ok(())
}
