//! Unit and property tests for the three core state modules. Every test here
//! runs against a stack-constructed account struct — no validator or
//! `BanksClient` required, since the decay/tier/chain arithmetic is plain
//! `impl` code over `Pod` structs.

pub mod ledger_tests;
pub mod policy_tests;
pub mod relationship_tests;
