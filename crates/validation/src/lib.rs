//! Validation of user-entered staking values against the governing parameter version.
//!
//! Every function in this crate is pure. Failures are returned as [`ValidationResult`] variants and
//! never as errors, so that callers can render a specific message for each of them.

pub mod amount;
pub mod lock_time;
pub mod result;

pub use amount::{
    staking_fee, unbonding_output_amount, validate_spendable, validate_stake_amount,
    validate_stake_input, validate_unbond_amount, validate_unbonding_fee,
};
pub use lock_time::{effective_lock_time, validate_lock_time};
pub use result::ValidationResult;
