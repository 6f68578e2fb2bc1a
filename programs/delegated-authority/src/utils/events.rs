use anchor_lang::prelude::*;

#[event]
pub struct RelationshipCreated {
    pub relationship: Pubkey,
    pub principal: Pubkey,
    pub agent: Pubkey,
    pub sequence_number: u64,
    pub initial_authority: u128,
    pub ceiling: u128,
    pub decay_per_second: u128,
    pub created_at: i64,
}

#[event]
pub struct Heartbeat {
    pub relationship: Pubkey,
    pub materialized_authority: u128,
    pub timestamp: i64,
}

#[event]
pub struct Boosted {
    pub relationship: Pubkey,
    pub amount: u128,
    pub new_authority: u128,
    pub timestamp: i64,
}

#[event]
pub struct Slashed {
    pub relationship: Pubkey,
    pub slasher: Pubkey,
    pub amount: u128,
    pub new_authority: u128,
    pub timestamp: i64,
}

#[event]
pub struct Killed {
    pub relationship: Pubkey,
    pub timestamp: i64,
}

#[event]
pub struct PolicyCreated {
    pub policy: Pubkey,
    pub policy_id: [u8; 32],
    pub epoch_duration: u64,
    pub tier_count: u8,
}

#[event]
pub struct PolicyBound {
    pub relationship: Pubkey,
    pub policy: Pubkey,
}

#[event]
pub struct SpendRecorded {
    pub relationship: Pubkey,
    pub tier: u8,
    pub amount: u128,
    pub spent_in_epoch: u128,
    pub epoch_start: i64,
}

#[event]
pub struct ActionLogged {
    pub relationship: Pubkey,
    pub index: u32,
    pub action_kind: u8,
    pub target: Pubkey,
    pub value: u128,
    pub authority_at_time: u128,
    pub timestamp: i64,
}
