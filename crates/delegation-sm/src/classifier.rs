//! Classification of a single delegation.

use serde::{Deserialize, Serialize};
use staking_params::ConfigurationError;
use staking_primitives::delegation::Delegation;

use crate::{
    context::ClassifyCtx,
    errors::ClassifyResult,
    state::{Action, ActionSet, LifecycleState, RawState},
};

/// The lifecycle state of a delegation together with the actions available in it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Classification {
    /// The lifecycle state.
    pub state: LifecycleState,

    /// The actions the user may take.
    pub actions: ActionSet,
}

impl Classification {
    /// Returns whether `action` is available.
    pub fn allows(&self, action: Action) -> bool {
        self.actions.contains(&action)
    }
}

/// Classifies `delegation` in `ctx`.
///
/// A record without an API state is a local pending record. Any API state outside the enumerated
/// set is reported as [`crate::errors::UnknownStateError`] rather than mapped to a concrete state.
///
/// # Errors
///
/// [`crate::ClassifyError::UnknownState`] for an unrecognized API state, and
/// [`crate::ClassifyError::Configuration`] if `ctx.version` is not the version governing the
/// delegation.
pub fn classify(delegation: &Delegation, ctx: &ClassifyCtx<'_>) -> ClassifyResult<Classification> {
    let Some(raw) = delegation.raw_state.as_deref() else {
        return Ok(Classification {
            state: LifecycleState::Pending,
            actions: ActionSet::new(),
        });
    };

    let raw_state: RawState = raw.parse()?;
    ensure_governing_version(delegation, ctx)?;

    let state = derive_state(raw_state, delegation, ctx);
    let actions = available_actions(state, delegation, ctx);

    Ok(Classification { state, actions })
}

fn ensure_governing_version(
    delegation: &Delegation,
    ctx: &ClassifyCtx<'_>,
) -> Result<(), ConfigurationError> {
    if let Some(expected) = delegation.params_version {
        if expected != ctx.version.version {
            return Err(ConfigurationError::MismatchedVersion {
                expected,
                supplied: ctx.version.version,
            });
        }
    }

    if let Some(start_height) = delegation.start_height {
        if !ctx.version.is_active_at(start_height) {
            return Err(ConfigurationError::VersionNotActive {
                version: ctx.version.version,
                activation_height: ctx.version.activation_height,
                height: start_height,
            });
        }
    }

    Ok(())
}

fn derive_state(raw: RawState, delegation: &Delegation, ctx: &ClassifyCtx<'_>) -> LifecycleState {
    match raw {
        RawState::Active => {
            // an overflowed stake was never counted, so it cannot expire either
            if delegation.is_overflow {
                return LifecycleState::Overflow;
            }

            let expired = delegation.is_timelock_elapsed(ctx.current_height);

            if ctx.has_broadcasted_unbond {
                LifecycleState::IntermediateUnbonding
            } else if expired && ctx.has_broadcasted_withdrawal {
                LifecycleState::IntermediateWithdrawal
            } else if expired {
                LifecycleState::Expired
            } else {
                LifecycleState::Active
            }
        }
        RawState::UnbondingRequested => LifecycleState::UnbondingRequested,
        RawState::Unbonding => LifecycleState::Unbonding,
        RawState::Unbonded if ctx.has_broadcasted_withdrawal => {
            LifecycleState::IntermediateWithdrawal
        }
        RawState::Unbonded => LifecycleState::Unbonded,
        RawState::Withdrawn => LifecycleState::Withdrawn,
    }
}

fn available_actions(
    state: LifecycleState,
    delegation: &Delegation,
    ctx: &ClassifyCtx<'_>,
) -> ActionSet {
    let mut actions = ActionSet::new();

    match state {
        LifecycleState::Active => {
            actions.insert(Action::Unbond);
            if ctx.multi_staking_allowed && !ctx.is_superseded {
                actions.insert(Action::Expand);
            }
        }
        LifecycleState::Expired => {
            actions.insert(Action::Unbond);
            actions.insert(Action::WithdrawTimelock);
        }
        LifecycleState::Unbonded if delegation.is_early_unbonded() => {
            actions.insert(Action::WithdrawEarlyUnbonding);
        }
        LifecycleState::Pending
        | LifecycleState::Overflow
        | LifecycleState::UnbondingRequested
        | LifecycleState::Unbonding
        | LifecycleState::Unbonded
        | LifecycleState::Withdrawn
        | LifecycleState::IntermediateUnbonding
        | LifecycleState::IntermediateWithdrawal => {}
    }

    actions
}
