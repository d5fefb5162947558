//! This crate provides deterministic fixtures and proptest strategies shared by the test suites of
//! the staking crates.

pub mod bitcoin;
pub mod fixtures;
pub mod strategies;
