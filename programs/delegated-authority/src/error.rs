use anchor_lang::prelude::*;

#[error_code]
pub enum AuthorityError {
    #[msg("Agent cannot be the default Pubkey")]
    AgentIsZero,
    #[msg("Agent cannot be the same identity as the principal")]
    AgentIsPrincipal,
    #[msg("Initial authority exceeds the requested ceiling")]
    InitialAuthorityExceedsCeiling,
    #[msg("Decay rate must be strictly positive")]
    DecayRateIsZero,
    #[msg("Caller is not the principal of this relationship")]
    NotPrincipal,
    #[msg("Relationship is not alive")]
    NotAlive,
    #[msg("This slasher already slashed this relationship within the cooldown window")]
    SlashCooldownActive,
    #[msg("Slash amount must be non-zero")]
    SlashAmountZero,
    #[msg("Boost amount must be non-zero")]
    BoostAmountZero,
    #[msg("Principal's relationship sequence counter overflowed")]
    SequenceOverflow,
}

#[error_code]
pub enum PolicyError {
    #[msg("Tier count must be between 1 and 8 inclusive")]
    InvalidTierCount,
    #[msg("Tier min_authority values must be strictly ascending")]
    TierAuthoritiesNotAscending,
    #[msg("Epoch duration must be strictly positive")]
    EpochDurationZero,
    #[msg("A policy with this content hash is already registered")]
    PolicyAlreadyRegistered,
    #[msg("Supplied policy_id does not match the hash of the supplied parameters")]
    PolicyIdMismatch,
    #[msg("Policy is not registered")]
    PolicyNotRegistered,
    #[msg("Caller is not the principal of this relationship")]
    NotPrincipal,
    #[msg("Relationship is not alive")]
    NotAlive,
    #[msg("Relationship already has a bound policy")]
    AlreadyBound,
    #[msg("Relationship has no bound policy")]
    NotBound,
    #[msg("Caller is not the agent of this relationship")]
    NotAgent,
    #[msg("Action is not allowed under the current tier, whitelist, or budget")]
    ActionNotAllowed,
    #[msg("Spend would exceed the tier's epoch budget")]
    BudgetExceeded,
}

#[error_code]
pub enum LedgerError {
    #[msg("Caller is not the agent of this relationship")]
    NotAgent,
    #[msg("Relationship is not alive")]
    NotAlive,
    #[msg("Ledger chain integrity check failed")]
    ChainIntegrityBroken,
    #[msg("Ledger entry index is out of range")]
    IndexOutOfRange,
    #[msg("Ledger has reached its bounded capacity")]
    LedgerFull,
}
