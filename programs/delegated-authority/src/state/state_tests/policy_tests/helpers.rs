use crate::state::policy::{validate_and_hash_policy, Policy, PolicyBinding, SpendState, Tier, TierInput};
use crate::state::relationship::Relationship;
use crate::utils::constants::{MAX_TIERS, MAX_WHITELIST_PER_TIER};
use anchor_lang::prelude::{Error, Pubkey, Result};

pub(crate) fn assert_error<E: Into<Error>>(result: Result<()>, expected: E) {
    let actual = result.expect_err("expected an error");
    let expected: Error = expected.into();
    assert_eq!(error_code_number(&actual), error_code_number(&expected));
}

fn error_code_number(err: &Error) -> Option<u32> {
    match err {
        Error::AnchorError(anchor_err) => Some(anchor_err.error_code_number),
        Error::ProgramError(_) => None,
    }
}

pub(crate) fn deterministic_pubkey(seed: u8) -> Pubkey {
    let mut bytes = [0u8; 32];
    for (idx, byte) in bytes.iter_mut().enumerate() {
        *byte = seed.wrapping_add((idx as u8).wrapping_mul(37)).wrapping_add(1);
    }
    Pubkey::new_from_array(bytes)
}

pub(crate) fn tier_input(min_authority: u128, spend_cap: u128, whitelist: Vec<Pubkey>) -> TierInput {
    TierInput {
        min_authority,
        spend_cap,
        can_sub_delegate: false,
        whitelist,
    }
}

/// Builds an on-chain `Policy` the same way `create_policy` does: validate,
/// hash, then pack the fixed-size tier array.
pub(crate) fn build_policy(epoch_duration: u64, tiers: &[TierInput]) -> ([u8; 32], Policy) {
    let policy_id = validate_and_hash_policy(epoch_duration, tiers).expect("valid policy params");

    let mut stored_tiers = [Tier::default(); MAX_TIERS];
    for (i, input) in tiers.iter().enumerate() {
        let mut whitelist = [Pubkey::default(); MAX_WHITELIST_PER_TIER];
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

    let policy = Policy {
        policy_id,
        epoch_duration,
        tier_count: tiers.len() as u8,
        exists: 1,
        bump: 255,
        _padding: [0; 5],
        tiers: stored_tiers,
    };
    (policy_id, policy)
}

pub(crate) fn relationship_fixture(stored_authority: u128, last_refresh: i64, decay_per_second: u128) -> Relationship {
    Relationship {
        principal: deterministic_pubkey(1),
        agent: deterministic_pubkey(2),
        stored_authority,
        ceiling: u128::MAX / 2,
        decay_per_second,
        last_refresh,
        created_at: last_refresh,
        sequence_number: 0,
        alive: 1,
        bump: 255,
        _padding: [0; 6],
        reserved: [0; 128],
    }
}

pub(crate) fn binding_fixture(relationship: Pubkey, policy: Pubkey) -> PolicyBinding {
    PolicyBinding {
        relationship,
        policy,
        bump: 255,
        _padding: [0; 7],
    }
}

pub(crate) fn spend_state_fixture(relationship: Pubkey) -> SpendState {
    SpendState {
        relationship,
        epoch_start: 0,
        spent_in_epoch: 0,
        bump: 255,
        _padding: [0; 7],
    }
}
