pub mod ledger;
pub mod policy;
pub mod relationship;

pub use ledger::*;
pub use policy::*;
pub use relationship::*;

#[cfg(test)]
pub mod state_tests;
