//! Local markers for transactions the user broadcast before the staking API reflected them.

use std::collections::BTreeSet;

use bitcoin::secp256k1::XOnlyPublicKey;
use serde::{Deserialize, Serialize};
use staking_primitives::{delegation::Delegation, types::DelegationId};
use tracing::debug;

use crate::state::RawState;

/// Identifies the delegation a marker belongs to.
///
/// The staker key is part of the key so that markers of different wallets sharing a store never
/// leak into each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MarkerKey {
    /// The delegation the transaction spends.
    pub delegation_id: DelegationId,

    /// The staker that broadcast the transaction.
    pub owner: XOnlyPublicKey,
}

impl MarkerKey {
    /// Returns the marker key for `delegation`.
    pub const fn of(delegation: &Delegation) -> Self {
        Self {
            delegation_id: delegation.id,
            owner: delegation.staker_key,
        }
    }
}

/// The set of unbonding and withdrawal transactions broadcast locally.
///
/// These markers feed the intermediate lifecycle states. They are dropped by [`Self::prune`] once
/// the API reports a state that makes them redundant.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BroadcastMarkers {
    #[serde(default)]
    unbond: BTreeSet<MarkerKey>,

    #[serde(default)]
    withdrawal: BTreeSet<MarkerKey>,
}

impl BroadcastMarkers {
    /// Records that an unbonding transaction for `delegation` was broadcast.
    pub fn record_unbond(&mut self, delegation: &Delegation) {
        self.unbond.insert(MarkerKey::of(delegation));
    }

    /// Records that a withdrawal transaction for `delegation` was broadcast.
    pub fn record_withdrawal(&mut self, delegation: &Delegation) {
        self.withdrawal.insert(MarkerKey::of(delegation));
    }

    /// Returns whether an unbonding transaction for `delegation` was broadcast.
    pub fn has_unbond(&self, delegation: &Delegation) -> bool {
        self.unbond.contains(&MarkerKey::of(delegation))
    }

    /// Returns whether a withdrawal transaction for `delegation` was broadcast.
    pub fn has_withdrawal(&self, delegation: &Delegation) -> bool {
        self.withdrawal.contains(&MarkerKey::of(delegation))
    }

    /// Returns whether no markers are recorded.
    pub fn is_empty(&self) -> bool {
        self.unbond.is_empty() && self.withdrawal.is_empty()
    }

    /// Drops the markers the API has caught up with and returns how many were dropped.
    ///
    /// An unbond marker is dropped as soon as the API reports any known state past `active`, and a
    /// withdrawal marker once it reports `withdrawn`. Markers of delegations carrying an unknown
    /// state are kept.
    ///
    /// `delegations` is taken to be the complete API listing of every staker it contains: a marker
    /// whose owner appears there but whose delegation does not is dropped as well. Markers of other
    /// owners are left alone.
    pub fn prune(&mut self, delegations: &[Delegation]) -> usize {
        let before = self.unbond.len() + self.withdrawal.len();

        let reported: BTreeSet<MarkerKey> = delegations
            .iter()
            .filter(|d| d.raw_state.is_some())
            .map(MarkerKey::of)
            .collect();
        let owners: BTreeSet<XOnlyPublicKey> = reported.iter().map(|key| key.owner).collect();

        let is_stale = |key: &MarkerKey| owners.contains(&key.owner) && !reported.contains(key);
        for markers in [&mut self.unbond, &mut self.withdrawal] {
            markers.retain(|key| {
                let stale = is_stale(key);
                if stale {
                    debug!(
                        delegation_id = %key.delegation_id,
                        "dropping marker of unlisted delegation"
                    );
                }
                !stale
            });
        }

        for delegation in delegations {
            let Some(state) = delegation
                .raw_state
                .as_deref()
                .and_then(|raw| raw.parse::<RawState>().ok())
            else {
                continue;
            };

            let key = MarkerKey::of(delegation);

            if state != RawState::Active && self.unbond.remove(&key) {
                debug!(delegation_id = %key.delegation_id, %state, "dropping unbond marker");
            }

            if state == RawState::Withdrawn && self.withdrawal.remove(&key) {
                debug!(delegation_id = %key.delegation_id, %state, "dropping withdrawal marker");
            }
        }

        before - (self.unbond.len() + self.withdrawal.len())
    }
}
