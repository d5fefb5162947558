//! Errors for the staking primitives.

use thiserror::Error;

/// Error while parsing a user-entered decimal amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AmountParseError {
    /// The input is not a finite decimal number.
    #[error("not a number")]
    NotANumber,

    /// The input has more fractional digits than the denomination allows.
    #[error("more than {max} decimal places")]
    TooPrecise {
        /// The number of decimal places allowed by the denomination.
        max: u32,
    },

    /// The input is a valid number but it is negative.
    #[error("amount is negative")]
    Negative,

    /// The input is a valid number but does not fit into the smallest-unit integer range.
    #[error("amount is too large")]
    Overflow,
}
