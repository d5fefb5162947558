//! The states of a delegation.
//!
//! [`RawState`] is what the staking API reports, [`LifecycleState`] is what the delegation is from
//! the user's point of view once local knowledge (pending broadcasts, the current height) is taken
//! into account.

use std::{collections::BTreeSet, fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::errors::UnknownStateError;

/// A delegation state as reported by the staking API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RawState {
    /// The stake is included and counted.
    Active,
    /// The staker asked to unbond early and the covenant has not yet signed.
    UnbondingRequested,
    /// The unbonding transaction is on chain and its timelock is running.
    Unbonding,
    /// The stake can be withdrawn.
    Unbonded,
    /// The stake has been withdrawn.
    Withdrawn,
}

impl RawState {
    /// Returns the string the API uses for this state.
    pub const fn as_str(&self) -> &'static str {
        match self {
            RawState::Active => "active",
            RawState::UnbondingRequested => "unbonding_requested",
            RawState::Unbonding => "unbonding",
            RawState::Unbonded => "unbonded",
            RawState::Withdrawn => "withdrawn",
        }
    }
}

impl FromStr for RawState {
    type Err = UnknownStateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(RawState::Active),
            "unbonding_requested" => Ok(RawState::UnbondingRequested),
            "unbonding" => Ok(RawState::Unbonding),
            "unbonded" => Ok(RawState::Unbonded),
            "withdrawn" => Ok(RawState::Withdrawn),
            other => Err(UnknownStateError {
                raw: other.to_string(),
            }),
        }
    }
}

impl Display for RawState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The lifecycle state of a delegation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LifecycleState {
    /// Broadcast locally but not yet known to the API.
    Pending,
    /// Included after the finality provider's cap was already reached; never counted.
    Overflow,
    /// Included and counted.
    Active,
    /// Still active on chain but the staking timelock has elapsed.
    Expired,
    /// Early unbonding has been requested.
    UnbondingRequested,
    /// The unbonding timelock is running.
    Unbonding,
    /// The stake can be withdrawn.
    Unbonded,
    /// The stake has been withdrawn.
    Withdrawn,
    /// An unbonding transaction was broadcast locally and the API has not caught up yet.
    IntermediateUnbonding,
    /// A withdrawal transaction was broadcast locally and the API has not caught up yet.
    IntermediateWithdrawal,
}

impl Display for LifecycleState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state_str = match self {
            LifecycleState::Pending => "PENDING",
            LifecycleState::Overflow => "OVERFLOW",
            LifecycleState::Active => "ACTIVE",
            LifecycleState::Expired => "EXPIRED",
            LifecycleState::UnbondingRequested => "UNBONDING_REQUESTED",
            LifecycleState::Unbonding => "UNBONDING",
            LifecycleState::Unbonded => "UNBONDED",
            LifecycleState::Withdrawn => "WITHDRAWN",
            LifecycleState::IntermediateUnbonding => "INTERMEDIATE_UNBONDING",
            LifecycleState::IntermediateWithdrawal => "INTERMEDIATE_WITHDRAWAL",
        };
        write!(f, "{}", state_str)
    }
}

/// A user action on a delegation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Action {
    /// Unbond before the staking timelock elapses.
    Unbond,
    /// Withdraw the output of an early unbonding.
    WithdrawEarlyUnbonding,
    /// Withdraw the staking output after its timelock elapsed.
    WithdrawTimelock,
    /// Renew the stake with new terms or extend it to more finality providers.
    Expand,
}

impl Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let action_str = match self {
            Action::Unbond => "UNBOND",
            Action::WithdrawEarlyUnbonding => "WITHDRAW_EARLY_UNBONDING",
            Action::WithdrawTimelock => "WITHDRAW_TIMELOCK",
            Action::Expand => "EXPAND",
        };
        write!(f, "{}", action_str)
    }
}

/// The set of actions available on a delegation.
pub type ActionSet = BTreeSet<Action>;
