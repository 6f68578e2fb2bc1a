use crate::error::PolicyError;
use crate::utils::constants::{MAX_TIERS, MAX_WHITELIST_PER_TIER};
use anchor_lang::prelude::*;
use anchor_lang::solana_program::keccak;
use bytemuck::{Pod, Zeroable};

/// Parameters for a single tier, as supplied by the caller of
/// `create_policy` before a `Policy` account exists. Kept separate from
/// the on-chain `Tier` so the caller can pass a `Vec` of whitelist
/// addresses of any length up to `MAX_WHITELIST_PER_TIER` without the
/// fixed-array padding the zero-copy account requires.
#[derive(AnchorSerialize, AnchorDeserialize, Clone)]
pub struct TierInput {
    pub min_authority: u128,
    pub spend_cap: u128,
    pub can_sub_delegate: bool,
    pub whitelist: Vec<Pubkey>,
}

/// Validates the tier list for a prospective policy and, if valid,
/// computes its content-addressed id. Two calls with identical
/// `epoch_duration`/`tiers` always return the same id.
pub fn validate_and_hash_policy(epoch_duration: u64, tiers: &[TierInput]) -> Result<[u8; 32]> {
    require!(
        !tiers.is_empty() && tiers.len() <= MAX_TIERS,
        PolicyError::InvalidTierCount
    );
    require!(epoch_duration != 0, PolicyError::EpochDurationZero);

    for pair in tiers.windows(2) {
        require!(
            pair[1].min_authority > pair[0].min_authority,
            PolicyError::TierAuthoritiesNotAscending
        );
    }
    for tier in tiers {
        require!(
            tier.whitelist.len() <= MAX_WHITELIST_PER_TIER,
            PolicyError::InvalidTierCount
        );
    }

    let mut preimage = Vec::new();
    preimage.extend_from_slice(&epoch_duration.to_le_bytes());
    for tier in tiers {
        preimage.extend_from_slice(&tier.min_authority.to_le_bytes());
        preimage.extend_from_slice(&tier.spend_cap.to_le_bytes());
        preimage.push(tier.can_sub_delegate as u8);
        preimage.push(tier.whitelist.len() as u8);
        for addr in &tier.whitelist {
            preimage.extend_from_slice(addr.as_ref());
        }
    }

    Ok(keccak::hash(&preimage).to_bytes())
}

/// A single privilege tier: a minimum authority threshold, a per-epoch
/// spend cap, a sub-delegation flag, and an optional target whitelist
/// (empty means any target is allowed at this tier).
#[derive(Clone, Copy, Pod, Zeroable, InitSpace)]
#[repr(C)]
pub struct Tier {
    pub min_authority: u128,
    pub spend_cap: u128,
    pub can_sub_delegate: u8,
    pub whitelist_len: u8,
    /// Pads out to `whitelist`'s effective 16-byte struct alignment (two
    /// leading `u128` fields) so the layout has no implicit padding.
    pub _padding: [u8; 14],
    pub whitelist: [Pubkey; MAX_WHITELIST_PER_TIER],
}

impl Default for Tier {
    fn default() -> Self {
        Self {
            min_authority: 0,
            spend_cap: 0,
            can_sub_delegate: 0,
            whitelist_len: 0,
            _padding: [0; 14],
            whitelist: [Pubkey::default(); MAX_WHITELIST_PER_TIER],
        }
    }
}

impl Tier {
    pub fn whitelist(&self) -> &[Pubkey] {
        &self.whitelist[..self.whitelist_len as usize]
    }

    pub fn allows_target(&self, target: &Pubkey) -> bool {
        let list = self.whitelist();
        list.is_empty() || list.contains(target)
    }
}

/// Content-addressed, immutable once registered. Two `create_policy`
/// calls with identical parameters always land on the same `Policy` PDA;
/// `exists` is checked explicitly in the handler (not left to Anchor's
/// account-already-in-use failure) so a re-registration attempt surfaces
/// `PolicyAlreadyRegistered` by name.
#[account(zero_copy)]
#[derive(InitSpace)]
#[repr(C)]
pub struct Policy {
    pub policy_id: [u8; 32],
    pub epoch_duration: u64,
    pub tier_count: u8,
    /// `0` until `create_policy` registers this PDA, `1` after. A brand
    /// new `init_if_needed` account is zeroed, so this doubles as the
    /// "not yet registered" sentinel without a separate init path.
    pub exists: u8,
    pub bump: u8,
    pub _padding: [u8; 5],
    pub tiers: [Tier; MAX_TIERS],
}

impl Policy {
    pub fn tiers(&self) -> &[Tier] {
        &self.tiers[..self.tier_count as usize]
    }

    /// Highest tier index `i` such that `auth >= tiers[i].min_authority`,
    /// or `None` if authority is below every tier's minimum. A linear
    /// scan is fine here: `tier_count <= MAX_TIERS` and tiers are stored
    /// in strictly ascending `min_authority` order.
    pub fn highest_qualifying_tier(&self, auth: u128) -> Option<usize> {
        self.tiers()
            .iter()
            .enumerate()
            .rev()
            .find(|(_, tier)| auth >= tier.min_authority)
            .map(|(i, _)| i)
    }
}

/// Relationship-to-policy binding. The account is `init_if_needed`; the
/// one-shot, irreversible rule is enforced in `bind_policy` by an explicit
/// check that `policy` is still the zero pubkey, so a second bind attempt
/// fails with the named `AlreadyBound` rather than a generic Anchor error.
#[account(zero_copy)]
#[derive(InitSpace)]
#[repr(C)]
pub struct PolicyBinding {
    pub relationship: Pubkey,
    pub policy: Pubkey,
    pub bump: u8,
    pub _padding: [u8; 7],
}

/// Per-relationship epoch spend tracker. Spend recorded while qualifying
/// for a higher tier is not reset when authority later decays into a
/// lower tier within the same epoch — spend state is keyed by
/// relationship, not by `(relationship, tier)`.
#[account(zero_copy)]
#[derive(InitSpace)]
#[repr(C)]
pub struct SpendState {
    pub relationship: Pubkey,
    pub spent_in_epoch: u128,
    pub epoch_start: i64,
    pub bump: u8,
    pub _padding: [u8; 7],
}

impl SpendState {
    /// Opens a fresh epoch if none is open yet, or if the current one has
    /// expired. Does nothing otherwise.
    pub fn roll_epoch_if_expired(&mut self, epoch_duration: u64, now: i64) {
        let expired =
            self.epoch_start == 0 || now >= self.epoch_start.saturating_add(epoch_duration as i64);
        if expired {
            self.epoch_start = now;
            self.spent_in_epoch = 0;
        }
    }

    /// `spend_cap` unless an epoch is open and unexpired, in which case
    /// it is `spend_cap - spent_in_epoch` (saturating at zero).
    pub fn remaining_budget(&self, spend_cap: u128, epoch_duration: u64, now: i64) -> u128 {
        let expired =
            self.epoch_start == 0 || now >= self.epoch_start.saturating_add(epoch_duration as i64);
        if expired {
            spend_cap
        } else {
            spend_cap.saturating_sub(self.spent_in_epoch)
        }
    }

    /// Authoritatively debits `amount` against the tier's cap, opening a
    /// new epoch first if the current one has lapsed. Note: the target
    /// whitelist is *not* re-checked here (only `check_action` does
    /// that), so whitelist enforcement is advisory only if a caller skips
    /// straight to `record_spend` without an honest advisory check first.
    pub fn record_spend(&mut self, amount: u128, spend_cap: u128, epoch_duration: u64, now: i64) -> Result<()> {
        self.roll_epoch_if_expired(epoch_duration, now);
        let new_spent = self
            .spent_in_epoch
            .checked_add(amount)
            .ok_or(PolicyError::BudgetExceeded)?;
        require!(new_spent <= spend_cap, PolicyError::BudgetExceeded);
        self.spent_in_epoch = new_spent;
        Ok(())
    }
}

/// Sentinel tier index returned by [`agent_status`] when a relationship
/// is unbound or below every tier's minimum authority.
pub const MAX_TIER_INDEX: u8 = (MAX_TIERS - 1) as u8;

/// Result of the advisory pre-flight check an orchestrator runs before
/// deciding whether to have its agent proceed with an action. Only
/// `record_spend` authoritatively mutates state; this never does.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ActionCheck {
    pub allowed: bool,
    pub tier: u8,
}

/// `(allowed, tier)` for an intended action of `amount` against `target`.
/// Unbound relationships are always `(false, 0)`. A `Some` `spend_state`
/// reflects the current epoch's consumption; `None` is treated as an
/// epoch that hasn't opened yet (full budget available), matching the
/// semantics `SpendState::remaining_budget` already applies to a zero
/// `epoch_start`.
pub fn check_action(
    binding: Option<&PolicyBinding>,
    policy: Option<&Policy>,
    spend_state: Option<&SpendState>,
    relationship: &super::relationship::Relationship,
    target: &Pubkey,
    amount: u128,
    now: i64,
) -> ActionCheck {
    let (Some(_binding), Some(policy)) = (binding, policy) else {
        return ActionCheck { allowed: false, tier: 0 };
    };

    let auth = relationship.effective_authority(now);
    let Some(tier_idx) = policy.highest_qualifying_tier(auth) else {
        return ActionCheck { allowed: false, tier: 0 };
    };
    let tier = &policy.tiers()[tier_idx];

    if !tier.allows_target(target) {
        return ActionCheck { allowed: false, tier: tier_idx as u8 };
    }

    let remaining = spend_state
        .map(|s| s.remaining_budget(tier.spend_cap, policy.epoch_duration, now))
        .unwrap_or(tier.spend_cap);
    if amount > remaining {
        return ActionCheck { allowed: false, tier: tier_idx as u8 };
    }

    ActionCheck { allowed: true, tier: tier_idx as u8 }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AgentStatus {
    pub tier: u8,
    pub remaining_budget: u128,
    pub can_sub_delegate: bool,
}

pub fn agent_status(
    binding: Option<&PolicyBinding>,
    policy: Option<&Policy>,
    spend_state: Option<&SpendState>,
    relationship: &super::relationship::Relationship,
    now: i64,
) -> AgentStatus {
    let sentinel = AgentStatus {
        tier: MAX_TIER_INDEX,
        remaining_budget: 0,
        can_sub_delegate: false,
    };
    let (Some(_binding), Some(policy)) = (binding, policy) else {
        return sentinel;
    };

    let auth = relationship.effective_authority(now);
    let Some(tier_idx) = policy.highest_qualifying_tier(auth) else {
        return sentinel;
    };
    let tier = &policy.tiers()[tier_idx];
    let remaining = spend_state
        .map(|s| s.remaining_budget(tier.spend_cap, policy.epoch_duration, now))
        .unwrap_or(tier.spend_cap);

    AgentStatus {
        tier: tier_idx as u8,
        remaining_budget: remaining,
        can_sub_delegate: tier.can_sub_delegate != 0,
    }
}

/// Authority still needed to reach the next tier up, `0` if already at
/// the top tier, or `0` if unbound (this is a pure distance query, so
/// "unbound" resolves to `0` rather than an error).
pub fn authority_to_next_tier(
    binding: Option<&PolicyBinding>,
    policy: Option<&Policy>,
    relationship: &super::relationship::Relationship,
    now: i64,
) -> u128 {
    let Some(policy) = policy.filter(|_| binding.is_some()) else {
        return 0;
    };

    let auth = relationship.effective_authority(now);
    let tiers = policy.tiers();
    match policy.highest_qualifying_tier(auth) {
        None => tiers.first().map(|t| t.min_authority.saturating_sub(auth)).unwrap_or(0),
        Some(i) if i + 1 < tiers.len() => tiers[i + 1].min_authority.saturating_sub(auth),
        Some(_) => 0,
    }
}
