//! Validation of stake and unbond amounts.
//!
//! Every comparison is done on smallest-unit integers. Display-unit values are never compared since
//! floating point rounding would misclassify amounts close to a bound.

use bitcoin::{Amount, FeeRate};
use staking_params::ProtocolParameterVersion;
use staking_primitives::{
    amount::{parse_units, Denomination},
    errors::AmountParseError,
};
use tracing::trace;

use crate::result::ValidationResult;

/// Validates a user-entered stake amount against the bounds of `version`.
///
/// The rules are checked in order and the first failure wins: the input must be a finite number,
/// must not be more precise than `denom` allows, must be at least the minimum stake and at most the
/// maximum stake.
pub fn validate_stake_input(
    input: &str,
    denom: Denomination,
    version: &ProtocolParameterVersion,
) -> ValidationResult {
    let result = match parse_units(input, denom) {
        Ok(units) => validate_stake_amount(Amount::from_sat(units), version),
        Err(AmountParseError::NotANumber) => ValidationResult::NotANumber,
        Err(AmountParseError::TooPrecise { max }) => ValidationResult::TooManyDecimals { max },
        Err(AmountParseError::Negative) => ValidationResult::BelowMinimum {
            min: version.min_stake_amount.to_sat(),
        },
        Err(AmountParseError::Overflow) => ValidationResult::AboveMaximum {
            max: version.max_stake_amount.to_sat(),
        },
    };

    trace!(%input, %denom, version = version.version, %result, "validated stake input");

    result
}

/// Validates a stake amount in smallest units against the bounds of `version`.
pub fn validate_stake_amount(
    amount: Amount,
    version: &ProtocolParameterVersion,
) -> ValidationResult {
    if amount < version.min_stake_amount {
        return ValidationResult::BelowMinimum {
            min: version.min_stake_amount.to_sat(),
        };
    }

    if amount > version.max_stake_amount {
        return ValidationResult::AboveMaximum {
            max: version.max_stake_amount.to_sat(),
        };
    }

    ValidationResult::Valid
}

/// Validates an unbond amount against the available balance, both in smallest units.
///
/// Valid iff `0 < amount <= available`.
pub const fn validate_unbond_amount(amount: u64, available: u64) -> ValidationResult {
    if amount == 0 {
        return ValidationResult::BelowMinimum { min: 1 };
    }

    if amount > available {
        return ValidationResult::AboveMaximum { max: available };
    }

    ValidationResult::Valid
}

/// Validates that a stake plus the network fee of its transaction fit in the spendable balance.
pub fn validate_spendable(amount: Amount, fee: Amount, spendable: Amount) -> ValidationResult {
    let fits = amount
        .checked_add(fee)
        .is_some_and(|total| total <= spendable);

    if fits {
        ValidationResult::Valid
    } else {
        ValidationResult::AboveMaximum {
            max: spendable.checked_sub(fee).unwrap_or(Amount::ZERO).to_sat(),
        }
    }
}

/// Computes the network fee of a transaction of `vsize` virtual bytes at `fee_rate`.
///
/// Returns `None` on overflow.
pub fn staking_fee(fee_rate: FeeRate, vsize: u64) -> Option<Amount> {
    fee_rate.fee_vb(vsize)
}

/// Validates that a stake is large enough to pay the unbonding fee of `version` and still leave a
/// non-zero unbonding output.
pub fn validate_unbonding_fee(
    stake: Amount,
    version: &ProtocolParameterVersion,
) -> ValidationResult {
    match unbonding_output_amount(stake, version) {
        Some(_) => ValidationResult::Valid,
        None => ValidationResult::BelowMinimum {
            min: version.unbonding_fee.to_sat().saturating_add(1),
        },
    }
}

/// Returns the value of the unbonding output for `stake`, i.e. the stake minus the unbonding fee,
/// or `None` if nothing would be left.
pub fn unbonding_output_amount(
    stake: Amount,
    version: &ProtocolParameterVersion,
) -> Option<Amount> {
    stake
        .checked_sub(version.unbonding_fee)
        .filter(|output| *output > Amount::ZERO)
}
