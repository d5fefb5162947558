//! The outcome of validating a user-entered value.

use std::fmt;

use serde::{Deserialize, Serialize};
use staking_primitives::amount::{format_units, Denomination};

/// The outcome of a validation.
///
/// Failures are expected and frequent (every keystroke in an amount field), so they are plain data
/// rather than errors. All bounds are expressed in smallest units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ValidationResult {
    /// The value satisfies every constraint.
    Valid,

    /// The value is below the smallest value allowed.
    BelowMinimum {
        /// The smallest value allowed.
        min: u64,
    },

    /// The value is above the largest value allowed.
    AboveMaximum {
        /// The largest value allowed.
        max: u64,
    },

    /// The input is not a finite number.
    NotANumber,

    /// The input has more decimal places than the denomination allows.
    TooManyDecimals {
        /// The number of decimal places allowed.
        max: u32,
    },
}

impl ValidationResult {
    /// Returns whether the value satisfies every constraint.
    pub const fn is_valid(&self) -> bool {
        matches!(self, ValidationResult::Valid)
    }

    /// Renders a message for the user, formatting bounds in the display unit of `denom`.
    pub fn describe(&self, denom: Denomination) -> String {
        match self {
            ValidationResult::Valid => "valid".to_string(),
            ValidationResult::BelowMinimum { min } => {
                format!("minimum amount is {} {denom}", format_units(*min, denom))
            }
            ValidationResult::AboveMaximum { max } => {
                format!("maximum amount is {} {denom}", format_units(*max, denom))
            }
            ValidationResult::NotANumber => "amount must be a number".to_string(),
            ValidationResult::TooManyDecimals { max } => {
                format!("{denom} amounts allow at most {max} decimal places")
            }
        }
    }
}

impl fmt::Display for ValidationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationResult::Valid => write!(f, "valid"),
            ValidationResult::BelowMinimum { min } => write!(f, "below minimum of {min}"),
            ValidationResult::AboveMaximum { max } => write!(f, "above maximum of {max}"),
            ValidationResult::NotANumber => write!(f, "not a number"),
            ValidationResult::TooManyDecimals { max } => {
                write!(f, "more than {max} decimal places")
            }
        }
    }
}
