use crate::state::ledger::{Ledger, LogEntry};
use crate::utils::constants::MAX_LOG_ENTRIES;
use anchor_lang::prelude::{Error, Pubkey, Result};

pub(crate) fn assert_error<E: Into<Error>>(result: Result<bool>, expected: E) {
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

pub(crate) fn empty_ledger(relationship: Pubkey) -> Ledger {
    Ledger {
        relationship,
        chain_head: [0u8; 32],
        count: 0,
        bump: 255,
        _padding: [0; 11],
        entries: [LogEntry::default(); MAX_LOG_ENTRIES],
    }
}
