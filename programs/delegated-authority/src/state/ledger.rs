use crate::error::LedgerError;
use crate::utils::constants::MAX_LOG_ENTRIES;
use anchor_lang::prelude::*;
use anchor_lang::solana_program::keccak;
use bytemuck::{Pod, Zeroable};
use ethnum::U256;

/// Kind of action an agent attests to having taken. The ledger does not
/// verify that the action actually happened on any external system — it
/// only records the agent's claim, stamped with the authority that was
/// in effect at the time.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum ActionKind {
    Transfer = 0,
    Swap = 1,
    ProvideLp = 2,
    Borrow = 3,
    Deploy = 4,
    Delegate = 5,
    Governance = 6,
    Custom = 7,
}

impl ActionKind {
    pub fn as_u8(self) -> u8 {
        self as u8
    }
}

/// One attested action, chained to its predecessor by `prev_hash`. Field
/// order here is chosen for a padding-free `#[repr(C)]` layout (the two
/// `u128`s need 16-byte alignment, so they lead); `canonical_hash` hashes
/// the fields in a fixed declaration order regardless of this layout
/// order, so the two are independent by design.
#[derive(Clone, Copy, Pod, Zeroable, Debug, Default, InitSpace)]
#[repr(C)]
pub struct LogEntry {
    pub value: u128,
    pub authority_at_time: u128,
    pub timestamp: i64,
    pub relationship_id: Pubkey,
    pub target: Pubkey,
    pub prev_hash: [u8; 32],
    pub action_kind: u8,
    pub _padding: [u8; 7],
}

impl LogEntry {
    /// Canonical hash over the seven declared fields, in declaration
    /// order. `_padding` is never hashed — it carries no information.
    pub fn canonical_hash(&self) -> [u8; 32] {
        keccak::hashv(&[
            self.relationship_id.as_ref(),
            &[self.action_kind],
            self.target.as_ref(),
            &self.value.to_le_bytes(),
            &self.authority_at_time.to_le_bytes(),
            &self.timestamp.to_le_bytes(),
            &self.prev_hash,
        ])
        .to_bytes()
    }
}

/// Aggregate statistics over a relationship's full log, computed in a
/// single scan. `total_value` widens to a 256-bit accumulator rather than
/// silently dropping contributions that would overflow a 128-bit sum.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LedgerSummary {
    pub total_actions: u64,
    pub highest_authority: u128,
    pub lowest_authority: u128,
    pub total_value: U256,
    pub first_action: i64,
    pub last_action: i64,
}

/// Per-relationship append-only log, backed by a fixed-capacity ring of
/// `LogEntry` (modeled on this codebase's circular price-history buffer),
/// except entries are never overwritten: once `count` reaches
/// `MAX_LOG_ENTRIES`, `append` fails with `LedgerFull` instead of
/// recycling the oldest slot. That keeps the append-only invariant
/// absolute while still bounding account size.
#[account(zero_copy)]
#[derive(InitSpace)]
#[repr(C)]
pub struct Ledger {
    pub relationship: Pubkey,
    pub chain_head: [u8; 32],
    pub count: u32,
    pub bump: u8,
    /// Pads out to `entries`' 16-byte alignment requirement (`LogEntry`
    /// contains `u128` fields).
    pub _padding: [u8; 11],
    pub entries: [LogEntry; MAX_LOG_ENTRIES],
}

impl Ledger {
    pub fn append(
        &mut self,
        relationship_id: Pubkey,
        action_kind: ActionKind,
        target: Pubkey,
        value: u128,
        authority_at_time: u128,
        timestamp: i64,
    ) -> Result<()> {
        require!(
            (self.count as usize) < MAX_LOG_ENTRIES,
            LedgerError::LedgerFull
        );

        let entry = LogEntry {
            relationship_id,
            action_kind: action_kind.as_u8(),
            _padding: [0; 7],
            target,
            value,
            authority_at_time,
            timestamp,
            prev_hash: self.chain_head,
        };

        self.entries[self.count as usize] = entry;
        self.chain_head = entry.canonical_hash();
        self.count += 1;
        Ok(())
    }

    pub fn entry_count(&self) -> u32 {
        self.count
    }

    pub fn get_entry(&self, index: u32) -> Result<LogEntry> {
        require!(index < self.count, LedgerError::IndexOutOfRange);
        Ok(self.entries[index as usize])
    }

    /// Walks the chain from the start, checking `prev_hash` linkage at
    /// every step, then checks the running hash against `chain_head`.
    /// Returns `Ok(true)`/`Ok(false)` for a fully-linked chain whose head
    /// does/doesn't match; fails with `ChainIntegrityBroken` the moment a
    /// link doesn't match, since at that point "true but mismatched head"
    /// and "broken mid-chain" are different failure modes worth
    /// distinguishing.
    pub fn verify_chain(&self) -> Result<bool> {
        let mut computed = [0u8; 32];
        for i in 0..self.count as usize {
            let entry = self.entries[i];
            if entry.prev_hash != computed {
                msg!("ledger chain integrity broken at index {}", i);
                return Err(LedgerError::ChainIntegrityBroken.into());
            }
            computed = entry.canonical_hash();
        }
        Ok(computed == self.chain_head)
    }

    pub fn summary(&self) -> LedgerSummary {
        if self.count == 0 {
            return LedgerSummary::default();
        }

        let mut summary = LedgerSummary {
            total_actions: self.count as u64,
            highest_authority: 0,
            lowest_authority: u128::MAX,
            total_value: U256::ZERO,
            first_action: self.entries[0].timestamp,
            last_action: self.entries[(self.count - 1) as usize].timestamp,
        };

        for i in 0..self.count as usize {
            let entry = &self.entries[i];
            summary.highest_authority = summary.highest_authority.max(entry.authority_at_time);
            summary.lowest_authority = summary.lowest_authority.min(entry.authority_at_time);
            summary.total_value += U256::from(entry.value);
        }

        summary
    }
}
