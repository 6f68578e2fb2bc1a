pub mod helpers;
pub mod property_tests;
