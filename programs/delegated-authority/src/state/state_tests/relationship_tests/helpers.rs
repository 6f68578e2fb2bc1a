use crate::state::relationship::{Relationship, SlashRecord};
use anchor_lang::prelude::{Error, Pubkey, Result};

/// Asserts `result` failed with the anchor error code corresponding to
/// `expected`, by numeric code rather than string match (error messages are
/// free to change wording without breaking these tests).
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

/// Deterministic, non-default pubkey so fixtures never collide with
/// `Pubkey::default()` and failures reproduce exactly.
pub(crate) fn deterministic_pubkey(seed: u8) -> Pubkey {
    let mut bytes = [0u8; 32];
    for (idx, byte) in bytes.iter_mut().enumerate() {
        *byte = seed.wrapping_add((idx as u8).wrapping_mul(37)).wrapping_add(1);
    }
    Pubkey::new_from_array(bytes)
}

pub(crate) fn principal_key() -> Pubkey {
    deterministic_pubkey(1)
}

pub(crate) fn agent_key() -> Pubkey {
    deterministic_pubkey(2)
}

pub(crate) fn relationship_fixture(
    stored_authority: u128,
    ceiling: u128,
    decay_per_second: u128,
    last_refresh: i64,
) -> Relationship {
    Relationship {
        principal: principal_key(),
        agent: agent_key(),
        stored_authority,
        ceiling,
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

pub(crate) fn slash_record_fixture(relationship: Pubkey, slasher: Pubkey, last_slash_time: i64) -> SlashRecord {
    SlashRecord {
        relationship,
        slasher,
        last_slash_time,
        bump: 255,
        _padding: [0; 7],
    }
}
