/// PDA seed constants
pub const RELATIONSHIP_SEED: &[u8] = b"relationship";
pub const COUNTER_SEED: &[u8] = b"counter";
pub const ACTIVE_INDEX_SEED: &[u8] = b"active";
pub const SLASH_RECORD_SEED: &[u8] = b"slash";
pub const POLICY_SEED: &[u8] = b"policy";
pub const BINDING_SEED: &[u8] = b"binding";
pub const SPEND_SEED: &[u8] = b"spend";
pub const LEDGER_SEED: &[u8] = b"ledger";

/// Fixed-point scale used for authority values (18 implicit decimal places).
pub const AUTHORITY_SCALE: u128 = 1_000_000_000_000_000_000;

/// Policy tier bounds.
pub const MAX_TIERS: usize = 8;
pub const MAX_WHITELIST_PER_TIER: usize = 8;

/// Ledger capacity. Once a relationship's ledger fills, `log` fails with
/// `LedgerFull` rather than overwriting the oldest entry, preserving the
/// append-only invariant.
pub const MAX_LOG_ENTRIES: usize = 64;

/// Minimum time between two successful slashes from the same slasher
/// against the same relationship.
pub const SLASH_COOLDOWN_SECONDS: i64 = 3_600;
