use super::helpers::relationship_fixture;
use proptest::prelude::*;

proptest! {
    /// Effective authority always equals the clamped linear projection from
    /// `stored_authority`/`last_refresh`, for any elapsed time.
    #[test]
    fn effective_authority_matches_clamped_projection(
        stored in 0u128..=1_000_000_000_000_000_000_000u128,
        ceiling in 0u128..=1_000_000_000_000_000_000_000u128,
        decay in 1u128..=1_000_000_000_000_000_000u128,
        elapsed in 0i64..=10_000_000i64,
    ) {
        let stored = stored.min(ceiling.max(stored));
        let ceiling = ceiling.max(stored);
        let r = relationship_fixture(stored, ceiling, decay, 0);

        let expected = stored.saturating_sub((elapsed as u128).saturating_mul(decay));
        prop_assert_eq!(r.effective_authority(elapsed), expected);
        prop_assert!(r.effective_authority(elapsed) <= r.ceiling);
    }

    /// `stored_authority <= ceiling` after any sequence of boosts.
    #[test]
    fn boost_never_exceeds_ceiling(
        stored in 0u128..=1_000_000_000_000_000_000u128,
        ceiling in 0u128..=1_000_000_000_000_000_000u128,
        amount in 1u128..=u128::MAX,
    ) {
        let stored = stored.min(ceiling);
        let mut r = relationship_fixture(stored, ceiling.max(stored), 1, 0);
        let bound_ceiling = r.ceiling;
        r.boost(amount, 0).unwrap();
        prop_assert!(r.stored_authority <= bound_ceiling);
    }

    /// Slashing never drives authority below zero and never revives a dead
    /// relationship's liveness flag.
    #[test]
    fn slash_never_underflows(
        stored in 0u128..=1_000_000_000_000_000_000u128,
        amount in 1u128..=u128::MAX,
    ) {
        let mut r = relationship_fixture(stored, stored, 1, 0);
        r.slash(amount, 0).unwrap();
        prop_assert!(r.stored_authority <= stored);
        prop_assert!(r.is_alive());
    }
}
