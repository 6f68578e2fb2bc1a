use crate::error::AuthorityError;
use anchor_lang::prelude::*;

/// A principal's decaying delegation of authority to an agent.
///
/// The relationship's address (a PDA derived from `[RELATIONSHIP_SEED,
/// principal, agent, sequence_number]`) *is* the `relationship_id` the
/// design calls for: Solana hashes those seeds with the program id to
/// derive the account address, so no separate identifier field is stored
/// or computed here.
///
/// Authority is never decremented by a background process. `effective`
/// is computed lazily from `stored_authority` and `last_refresh` at read
/// time; every mutating operation materializes the decayed value before
/// applying its own change, which is what lets the relationship "walk
/// away" to zero authority if the principal stops participating, with no
/// clock-driven bookkeeping anywhere in the program.
#[account(zero_copy)]
#[derive(InitSpace)]
#[repr(C)]
pub struct Relationship {
    pub principal: Pubkey,
    pub agent: Pubkey,

    /// Authority as of `last_refresh`, 18-decimal fixed point.
    pub stored_authority: u128,
    /// Hard upper bound; `stored_authority <= ceiling` always.
    pub ceiling: u128,
    /// Strictly positive; consumed per second of wall time since `last_refresh`.
    pub decay_per_second: u128,

    pub last_refresh: i64,
    pub created_at: i64,

    /// Index into the principal's creation counter at the time this
    /// relationship was made; kept for audit/debugging, not load-bearing.
    pub sequence_number: u64,

    /// 0/1 in place of `bool` to keep the zero-copy layout plain old data.
    pub alive: u8,
    pub bump: u8,
    pub _padding: [u8; 6],

    pub reserved: [u8; 128],
}

impl Relationship {
    #[inline(always)]
    pub fn is_alive(&self) -> bool {
        self.alive != 0
    }

    /// Validates the parameters of a prospective `create` before any
    /// account is touched.
    pub fn validate_create(
        principal: &Pubkey,
        agent: &Pubkey,
        initial_authority: u128,
        ceiling: u128,
        decay_per_second: u128,
    ) -> Result<()> {
        require!(*agent != Pubkey::default(), AuthorityError::AgentIsZero);
        require!(agent != principal, AuthorityError::AgentIsPrincipal);
        require!(
            initial_authority <= ceiling,
            AuthorityError::InitialAuthorityExceedsCeiling
        );
        require!(decay_per_second != 0, AuthorityError::DecayRateIsZero);
        Ok(())
    }

    /// Projects `stored_authority` forward (or returns it unchanged) to
    /// time `t`, floored at zero. For `t <= last_refresh` this returns the
    /// stored value as-is, which is *not* a historical answer for times
    /// before the last refresh — callers wanting a true historical value
    /// must track that externally.
    fn project(&self, t: i64) -> u128 {
        if t <= self.last_refresh {
            return self.stored_authority;
        }
        let elapsed = (t - self.last_refresh) as u128;
        let decayed = elapsed.saturating_mul(self.decay_per_second);
        self.stored_authority.saturating_sub(decayed)
    }

    /// `0` once `alive` is false; otherwise the decayed authority at `t`.
    pub fn authority_at(&self, t: i64) -> u128 {
        if !self.is_alive() {
            return 0;
        }
        self.project(t)
    }

    #[inline(always)]
    pub fn effective_authority(&self, now: i64) -> u128 {
        self.authority_at(now)
    }

    /// Seconds until `effective_authority` reaches zero, or `0` if it is
    /// already zero or the relationship is dead.
    pub fn time_to_zero(&self, now: i64) -> u64 {
        let effective = self.effective_authority(now);
        if effective == 0 {
            return 0;
        }
        (effective / self.decay_per_second) as u64
    }

    /// Materializes decay into `stored_authority` and resets the refresh
    /// origin, without restoring any lost authority. Idempotent: calling
    /// this twice with no time passing leaves the state unchanged.
    pub fn heartbeat(&mut self, now: i64) -> Result<()> {
        require!(self.is_alive(), AuthorityError::NotAlive);
        self.stored_authority = self.project(now);
        self.last_refresh = now;
        Ok(())
    }

    /// Materializes decay, then adds `amount` clamped to `ceiling`.
    pub fn boost(&mut self, amount: u128, now: i64) -> Result<()> {
        require!(self.is_alive(), AuthorityError::NotAlive);
        require!(amount != 0, AuthorityError::BoostAmountZero);

        let effective = self.project(now);
        let boosted = effective.saturating_add(amount);
        self.stored_authority = boosted.min(self.ceiling);
        self.last_refresh = now;
        Ok(())
    }

    /// Materializes decay, then reduces authority by `amount`, saturating
    /// at zero. `last_refresh` is reset to `now` so the already-materialized
    /// value becomes the new baseline, which prevents double-counting decay
    /// that happened before the slash. Never changes `alive`. Rate limiting
    /// (one hour per `(slasher, relationship)` pair) is the caller's
    /// responsibility — this method assumes the cooldown has already been
    /// checked against a `SlashRecord`.
    pub fn slash(&mut self, amount: u128, now: i64) -> Result<()> {
        require!(self.is_alive(), AuthorityError::NotAlive);
        require!(amount != 0, AuthorityError::SlashAmountZero);

        let effective = self.project(now);
        self.stored_authority = effective.saturating_sub(amount);
        self.last_refresh = now;
        Ok(())
    }

    /// Terminal. Zeroes authority and clears `alive`; irreversible.
    pub fn kill(&mut self) -> Result<()> {
        require!(self.is_alive(), AuthorityError::NotAlive);
        self.alive = 0;
        self.stored_authority = 0;
        Ok(())
    }
}

/// Per-`(slasher, relationship)` cooldown marker. Its mere existence (or
/// absence) as a PDA is not load-bearing — the stored timestamp is what
/// gates the next slash — but keying the PDA on both identities means a
/// slasher's cooldown never collides with another slasher's against the
/// same relationship.
#[account(zero_copy)]
#[derive(InitSpace)]
#[repr(C)]
pub struct SlashRecord {
    pub relationship: Pubkey,
    pub slasher: Pubkey,
    pub last_slash_time: i64,
    pub bump: u8,
    pub _padding: [u8; 7],
}

impl SlashRecord {
    pub fn check_cooldown(&self, now: i64) -> Result<()> {
        if self.last_slash_time != 0 {
            require!(
                now - self.last_slash_time >= crate::utils::constants::SLASH_COOLDOWN_SECONDS,
                AuthorityError::SlashCooldownActive
            );
        }
        Ok(())
    }
}

/// Per-principal monotonic counter feeding the `sequence_number` seed of
/// every relationship that principal creates.
#[account(zero_copy)]
#[derive(InitSpace)]
#[repr(C)]
pub struct PrincipalCounter {
    pub principal: Pubkey,
    pub sequence: u64,
    pub bump: u8,
    pub _padding: [u8; 7],
}

/// Secondary index: the most recently created relationship for a given
/// `(principal, agent)` pair. Overwritten on every `create` for the same
/// pair; relationships created earlier for that pair remain independently
/// operable via their own address, they simply stop being "the" active
/// one for quick lookup.
#[account(zero_copy)]
#[derive(InitSpace)]
#[repr(C)]
pub struct ActiveIndex {
    pub principal: Pubkey,
    pub agent: Pubkey,
    pub relationship: Pubkey,
    pub bump: u8,
    pub _padding: [u8; 7],
}
