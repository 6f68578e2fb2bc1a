use crate::error::AuthorityError;
use crate::state::relationship::{ActiveIndex, PrincipalCounter, Relationship, SlashRecord};
use crate::utils::constants::{ACTIVE_INDEX_SEED, COUNTER_SEED, RELATIONSHIP_SEED, SLASH_RECORD_SEED};
use crate::utils::events::{Boosted, Heartbeat as HeartbeatEvent, Killed, RelationshipCreated, Slashed};
use anchor_lang::prelude::*;

#[derive(Accounts)]
#[instruction(agent: Pubkey)]
pub struct CreateRelationship<'info> {
    #[account(mut)]
    pub principal: Signer<'info>,

    #[account(
        init_if_needed,
        payer = principal,
        space = 8 + PrincipalCounter::INIT_SPACE,
        seeds = [COUNTER_SEED, principal.key().as_ref()],
        bump
    )]
    pub counter: AccountLoader<'info, PrincipalCounter>,

    #[account(
        init,
        payer = principal,
        space = 8 + Relationship::INIT_SPACE,
        seeds = [
            RELATIONSHIP_SEED,
            principal.key().as_ref(),
            agent.as_ref(),
            &counter.load()?.sequence.to_le_bytes()
        ],
        bump
    )]
    pub relationship: AccountLoader<'info, Relationship>,

    #[account(
        init_if_needed,
        payer = principal,
        space = 8 + ActiveIndex::INIT_SPACE,
        seeds = [ACTIVE_INDEX_SEED, principal.key().as_ref(), agent.as_ref()],
        bump
    )]
    pub active_index: AccountLoader<'info, ActiveIndex>,

    pub system_program: Program<'info, System>,
}

/// Creates a new relationship for `(principal, agent)`, derives its PDA
/// from the principal's current creation counter (so the PDA derivation
/// itself doubles as the `hash(principal || agent || sequence_number)`
/// identifier scheme), and overwrites the secondary index so the pair's
/// most recent relationship is the one found by a lookup. Earlier
/// relationships for the same pair stay independently addressable and
/// operable at their own PDA; this call never touches them.
pub fn create_relationship(
    ctx: Context<CreateRelationship>,
    agent: Pubkey,
    initial_authority: u128,
    ceiling: u128,
    decay_per_second: u128,
) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let principal_key = ctx.accounts.principal.key();

    Relationship::validate_create(&principal_key, &agent, initial_authority, ceiling, decay_per_second)?;

    let mut counter = ctx.accounts.counter.load_mut()?;
    let sequence_number = counter.sequence;
    counter.principal = principal_key;
    counter.sequence = counter
        .sequence
        .checked_add(1)
        .ok_or(AuthorityError::SequenceOverflow)?;
    drop(counter);

    let relationship_key = ctx.accounts.relationship.key();
    let mut relationship = ctx.accounts.relationship.load_init()?;
    relationship.principal = principal_key;
    relationship.agent = agent;
    relationship.stored_authority = initial_authority;
    relationship.ceiling = ceiling;
    relationship.decay_per_second = decay_per_second;
    relationship.last_refresh = now;
    relationship.created_at = now;
    relationship.sequence_number = sequence_number;
    relationship.alive = 1;
    relationship.bump = ctx.bumps.relationship;
    drop(relationship);

    let mut active_index = ctx.accounts.active_index.load_mut()?;
    active_index.principal = principal_key;
    active_index.agent = agent;
    active_index.relationship = relationship_key;
    active_index.bump = ctx.bumps.active_index;

    emit!(RelationshipCreated {
        relationship: relationship_key,
        principal: principal_key,
        agent,
        sequence_number,
        initial_authority,
        ceiling,
        decay_per_second,
        created_at: now,
    });

    Ok(())
}

#[derive(Accounts)]
pub struct AuthorityAction<'info> {
    pub principal: Signer<'info>,
    #[account(mut)]
    pub relationship: AccountLoader<'info, Relationship>,
}

pub fn heartbeat(ctx: Context<AuthorityAction>) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let mut relationship = ctx.accounts.relationship.load_mut()?;
    require_keys_eq!(
        relationship.principal,
        ctx.accounts.principal.key(),
        AuthorityError::NotPrincipal
    );

    relationship.heartbeat(now)?;

    emit!(HeartbeatEvent {
        relationship: ctx.accounts.relationship.key(),
        materialized_authority: relationship.stored_authority,
        timestamp: now,
    });
    Ok(())
}

pub fn boost(ctx: Context<AuthorityAction>, amount: u128) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let mut relationship = ctx.accounts.relationship.load_mut()?;
    require_keys_eq!(
        relationship.principal,
        ctx.accounts.principal.key(),
        AuthorityError::NotPrincipal
    );

    relationship.boost(amount, now)?;

    emit!(Boosted {
        relationship: ctx.accounts.relationship.key(),
        amount,
        new_authority: relationship.stored_authority,
        timestamp: now,
    });
    Ok(())
}

pub fn kill(ctx: Context<AuthorityAction>) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let mut relationship = ctx.accounts.relationship.load_mut()?;
    require_keys_eq!(
        relationship.principal,
        ctx.accounts.principal.key(),
        AuthorityError::NotPrincipal
    );

    relationship.kill()?;

    emit!(Killed {
        relationship: ctx.accounts.relationship.key(),
        timestamp: now,
    });
    Ok(())
}

#[derive(Accounts)]
pub struct SlashRelationship<'info> {
    #[account(mut)]
    pub slasher: Signer<'info>,
    #[account(mut)]
    pub relationship: AccountLoader<'info, Relationship>,

    #[account(
        init_if_needed,
        payer = slasher,
        space = 8 + SlashRecord::INIT_SPACE,
        seeds = [SLASH_RECORD_SEED, relationship.key().as_ref(), slasher.key().as_ref()],
        bump
    )]
    pub slash_record: AccountLoader<'info, SlashRecord>,

    pub system_program: Program<'info, System>,
}

/// Permissionless: any account may slash any alive relationship, subject
/// only to the one-hour-per-slasher cooldown tracked in `slash_record`.
pub fn slash(ctx: Context<SlashRelationship>, amount: u128) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let relationship_key = ctx.accounts.relationship.key();
    let slasher_key = ctx.accounts.slasher.key();

    let mut slash_record = ctx.accounts.slash_record.load_mut()?;
    slash_record.check_cooldown(now)?;

    let mut relationship = ctx.accounts.relationship.load_mut()?;
    relationship.slash(amount, now)?;

    slash_record.relationship = relationship_key;
    slash_record.slasher = slasher_key;
    slash_record.last_slash_time = now;

    emit!(Slashed {
        relationship: relationship_key,
        slasher: slasher_key,
        amount,
        new_authority: relationship.stored_authority,
        timestamp: now,
    });
    Ok(())
}
