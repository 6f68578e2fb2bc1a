use crate::error::LedgerError;
use crate::state::ledger::{ActionKind, Ledger};
use crate::state::relationship::Relationship;
use crate::utils::constants::LEDGER_SEED;
use crate::utils::events::ActionLogged;
use anchor_lang::prelude::*;

#[derive(Accounts)]
pub struct LogAction<'info> {
    #[account(mut)]
    pub agent: Signer<'info>,
    pub relationship: AccountLoader<'info, Relationship>,

    #[account(
        init_if_needed,
        payer = agent,
        space = 8 + Ledger::INIT_SPACE,
        seeds = [LEDGER_SEED, relationship.key().as_ref()],
        bump
    )]
    pub ledger: AccountLoader<'info, Ledger>,

    pub system_program: Program<'info, System>,
}

/// Agent-attested log append. The ledger records the authority that was
/// in effect at the time of the call, but nothing here checks that the
/// attested action actually executed on any external system — the log is
/// a claim, not a verified receipt.
pub fn log_action(
    ctx: Context<LogAction>,
    action_kind: ActionKind,
    target: Pubkey,
    value: u128,
) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let relationship_key = ctx.accounts.relationship.key();

    let relationship = ctx.accounts.relationship.load()?;
    require!(relationship.is_alive(), LedgerError::NotAlive);
    require_keys_eq!(relationship.agent, ctx.accounts.agent.key(), LedgerError::NotAgent);
    let authority_at_time = relationship.effective_authority(now);
    drop(relationship);

    let mut ledger = ctx.accounts.ledger.load_mut()?;
    ledger.relationship = relationship_key;
    ledger.append(relationship_key, action_kind, target, value, authority_at_time, now)?;
    let index = ledger.entry_count() - 1;

    emit!(ActionLogged {
        relationship: relationship_key,
        index,
        action_kind: action_kind.as_u8(),
        target,
        value,
        authority_at_time,
        timestamp: now,
    });

    Ok(())
}
