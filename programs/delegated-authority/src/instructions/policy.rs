use crate::error::PolicyError;
use crate::state::policy::{validate_and_hash_policy, Policy, PolicyBinding, SpendState, Tier, TierInput};
use crate::state::relationship::Relationship;
use crate::utils::constants::{BINDING_SEED, MAX_TIERS, POLICY_SEED, SPEND_SEED};
use crate::utils::events::{PolicyBound, PolicyCreated, SpendRecorded};
use anchor_lang::prelude::*;

#[derive(Accounts)]
#[instruction(policy_id: [u8; 32])]
pub struct CreatePolicy<'info> {
    #[account(mut)]
    pub payer: Signer<'info>,

    #[account(
        init_if_needed,
        payer = payer,
        space = 8 + Policy::INIT_SPACE,
        seeds = [POLICY_SEED, &policy_id],
        bump
    )]
    pub policy: AccountLoader<'info, Policy>,

    pub system_program: Program<'info, System>,
}

/// `policy_id` is supplied by the caller but checked against the content
/// hash the program computes itself from `epoch_duration`/`tiers`, so the
/// PDA a caller names always matches the PDA its parameters derive. The
/// account itself is `init_if_needed` (a prior call may have already
/// created and populated it); `policy.exists` is what actually gates a
/// re-registration, so the second call with identical parameters fails
/// with the named `PolicyAlreadyRegistered`, not Anchor's generic
/// account-already-in-use error.
pub fn create_policy(
    ctx: Context<CreatePolicy>,
    policy_id: [u8; 32],
    epoch_duration: u64,
    tiers: Vec<TierInput>,
) -> Result<()> {
    let expected_id = validate_and_hash_policy(epoch_duration, &tiers)?;
    require!(policy_id == expected_id, PolicyError::PolicyIdMismatch);

    let mut policy = ctx.accounts.policy.load_mut()?;
    require!(policy.exists == 0, PolicyError::PolicyAlreadyRegistered);

    policy.policy_id = policy_id;
    policy.epoch_duration = epoch_duration;
    policy.tier_count = tiers.len() as u8;
    policy.exists = 1;
    policy.bump = ctx.bumps.policy;

    let mut stored_tiers = [Tier::default(); MAX_TIERS];
    for (i, input) in tiers.iter().enumerate() {
        let mut whitelist = [Pubkey::default(); crate::utils::constants::MAX_WHITELIST_PER_TIER];
        whitelist[..input.whitelist.len()].copy_from_slice(&input.whitelist);
        stored_tiers[i] = Tier {
            min_authority: input.min_authority,
            spend_cap: input.spend_cap,
            can_sub_delegate: input.can_sub_delegate as u8,
            whitelist_len: input.whitelist.len() as u8,
            _padding: [0; 14],
            whitelist,
        };
    }
    policy.tiers = stored_tiers;

    emit!(PolicyCreated {
        policy: ctx.accounts.policy.key(),
        policy_id,
        epoch_duration,
        tier_count: tiers.len() as u8,
    });

    Ok(())
}

#[derive(Accounts)]
pub struct BindPolicy<'info> {
    #[account(mut)]
    pub principal: Signer<'info>,
    pub relationship: AccountLoader<'info, Relationship>,
    /// CHECK: deserialized manually in the handler (not as a typed
    /// `AccountLoader`) so an unregistered policy PDA fails with the named
    /// `PolicyNotRegistered` instead of Anchor's generic account-validation
    /// error, which would otherwise fire before the handler body runs.
    pub policy: UncheckedAccount<'info>,

    #[account(
        init_if_needed,
        payer = principal,
        space = 8 + PolicyBinding::INIT_SPACE,
        seeds = [BINDING_SEED, relationship.key().as_ref()],
        bump
    )]
    pub binding: AccountLoader<'info, PolicyBinding>,

    pub system_program: Program<'info, System>,
}

/// `binding` is `init_if_needed` (a relationship that already has one
/// fails closed, below), so the one-shot rule is enforced by the explicit
/// `binding.policy == Pubkey::default()` check rather than by Anchor's
/// account-already-in-use failure — that's what lets a re-bind attempt
/// surface the named `AlreadyBound` instead of a generic error.
pub fn bind_policy(ctx: Context<BindPolicy>) -> Result<()> {
    let relationship = ctx.accounts.relationship.load()?;
    require_keys_eq!(
        relationship.principal,
        ctx.accounts.principal.key(),
        PolicyError::NotPrincipal
    );
    require!(relationship.is_alive(), PolicyError::NotAlive);
    drop(relationship);

    {
        let disc = Policy::DISCRIMINATOR;
        let data = ctx
            .accounts
            .policy
            .try_borrow_data()
            .map_err(|_| PolicyError::PolicyNotRegistered)?;
        require!(
            data.len() >= disc.len() + std::mem::size_of::<Policy>(),
            PolicyError::PolicyNotRegistered
        );
        require!(data[..disc.len()] == *disc, PolicyError::PolicyNotRegistered);
        let policy: &Policy = bytemuck::from_bytes(&data[disc.len()..disc.len() + std::mem::size_of::<Policy>()]);
        require!(policy.exists != 0, PolicyError::PolicyNotRegistered);
    }

    let mut binding = ctx.accounts.binding.load_mut()?;
    require!(binding.policy == Pubkey::default(), PolicyError::AlreadyBound);
    binding.relationship = ctx.accounts.relationship.key();
    binding.policy = ctx.accounts.policy.key();
    binding.bump = ctx.bumps.binding;

    emit!(PolicyBound {
        relationship: ctx.accounts.relationship.key(),
        policy: ctx.accounts.policy.key(),
    });

    Ok(())
}

#[derive(Accounts)]
pub struct RecordSpend<'info> {
    #[account(mut)]
    pub agent: Signer<'info>,
    pub relationship: AccountLoader<'info, Relationship>,
    pub policy: AccountLoader<'info, Policy>,
    pub binding: AccountLoader<'info, PolicyBinding>,

    #[account(
        init_if_needed,
        payer = agent,
        space = 8 + SpendState::INIT_SPACE,
        seeds = [SPEND_SEED, relationship.key().as_ref()],
        bump
    )]
    pub spend_state: AccountLoader<'info, SpendState>,

    pub system_program: Program<'info, System>,
}

/// Authoritative budget debit. Resolves the binding and tier exactly as
/// `check_action` would, but does **not** take a `target` and does not
/// re-check the tier's whitelist. Whitelist enforcement is therefore
/// advisory: a caller that skips `check_action` and calls this directly
/// can spend against any target as long as the tier/budget checks pass.
pub fn record_spend(ctx: Context<RecordSpend>, amount: u128) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;

    let relationship = ctx.accounts.relationship.load()?;
    require!(relationship.is_alive(), PolicyError::NotAlive);
    require_keys_eq!(relationship.agent, ctx.accounts.agent.key(), PolicyError::NotAgent);

    let binding = ctx.accounts.binding.load()?;
    require_keys_eq!(
        binding.relationship,
        ctx.accounts.relationship.key(),
        PolicyError::NotBound
    );
    require_keys_eq!(binding.policy, ctx.accounts.policy.key(), PolicyError::NotBound);

    let policy = ctx.accounts.policy.load()?;
    let auth = relationship.effective_authority(now);
    let tier_idx = policy
        .highest_qualifying_tier(auth)
        .ok_or(PolicyError::ActionNotAllowed)?;
    let tier = policy.tiers()[tier_idx];

    let mut spend_state = ctx.accounts.spend_state.load_mut()?;
    spend_state.relationship = ctx.accounts.relationship.key();
    spend_state.record_spend(amount, tier.spend_cap, policy.epoch_duration, now)?;

    emit!(SpendRecorded {
        relationship: ctx.accounts.relationship.key(),
        tier: tier_idx as u8,
        amount,
        spent_in_epoch: spend_state.spent_in_epoch,
        epoch_start: spend_state.epoch_start,
    });

    Ok(())
}
