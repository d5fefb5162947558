//! Reconciliation of locally-created pending records with what the API reports.

use std::collections::BTreeSet;

use staking_primitives::delegation::Delegation;
use tracing::debug;

/// Drops every local record the API already knows about and returns how many were dropped.
///
/// A staking transaction is tracked locally from the moment it is broadcast until the API reports
/// it. From then on the API record is authoritative.
pub fn reconcile_pending(local: &mut Vec<Delegation>, api: &[Delegation]) -> usize {
    let known: BTreeSet<_> = api.iter().map(|d| d.id).collect();
    let before = local.len();

    local.retain(|pending| {
        let keep = !known.contains(&pending.id);
        if !keep {
            debug!(delegation_id = %pending.id, "pending delegation picked up by the api");
        }
        keep
    });

    before - local.len()
}
