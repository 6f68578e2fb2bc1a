use super::helpers::{spend_state_fixture, deterministic_pubkey, tier_input, build_policy};
use proptest::prelude::*;

proptest! {
    /// `highest_qualifying_tier` is always the unique maximal index whose
    /// `min_authority` does not exceed `auth`, since tiers are stored in
    /// strictly ascending order.
    #[test]
    fn highest_qualifying_tier_is_consistent_with_ascending_mins(
        a in 1u128..1_000, b in 1_001u128..2_000, c in 2_001u128..3_000,
        auth in 0u128..4_000,
    ) {
        let tiers = vec![tier_input(a, 1, vec![]), tier_input(b, 1, vec![]), tier_input(c, 1, vec![])];
        let (_, policy) = build_policy(1, &tiers);

        let expected = if auth >= c { Some(2) } else if auth >= b { Some(1) } else if auth >= a { Some(0) } else { None };
        prop_assert_eq!(policy.highest_qualifying_tier(auth), expected);
    }

    /// Spend can never be recorded past the tier's cap within a single epoch.
    #[test]
    fn record_spend_never_exceeds_cap_within_an_epoch(
        cap in 1u128..1_000_000,
        first in 0u128..1_000_000,
        second in 0u128..1_000_000,
    ) {
        let mut spend = spend_state_fixture(deterministic_pubkey(1));
        let epoch_duration = 86_400;
        let now = 1_000;

        let first_result = spend.record_spend(first, cap, epoch_duration, now);
        if first <= cap {
            prop_assert!(first_result.is_ok());
            let second_result = spend.record_spend(second, cap, epoch_duration, now + 1);
            if first + second <= cap {
                prop_assert!(second_result.is_ok());
                prop_assert!(spend.spent_in_epoch <= cap);
            } else {
                prop_assert!(second_result.is_err());
            }
        } else {
            prop_assert!(first_result.is_err());
        }
    }
}
