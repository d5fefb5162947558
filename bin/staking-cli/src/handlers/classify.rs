use anyhow::Result;
use serde::Serialize;
use staking_delegation_sm::{classify_all, reconcile_pending, BroadcastMarkers, RowClassification};
use staking_params::ParamsVersions;
use staking_primitives::{config::StakingCfg, delegation::Delegation, types::BitcoinBlockHeight};
use tracing::info;

use crate::{
    cli::ClassifyArgs,
    input::{load_delegations, load_markers, load_versions, print_json},
};

#[derive(Debug, Serialize)]
struct ClassifyReport {
    height: BitcoinBlockHeight,
    rows: Vec<RowClassification>,

    /// The markers left after dropping those the API caught up with.
    markers: BroadcastMarkers,
}

fn classify_report(
    mut api: Vec<Delegation>,
    mut pending: Vec<Delegation>,
    mut markers: BroadcastMarkers,
    versions: &ParamsVersions,
    height: BitcoinBlockHeight,
    cfg: &StakingCfg,
) -> ClassifyReport {
    let picked_up = reconcile_pending(&mut pending, &api);
    let pruned = markers.prune(&api);
    info!(%picked_up, %pruned, "reconciled local state with the api");

    // local records come first, as they are the most recent
    pending.append(&mut api);
    let rows = classify_all(&pending, versions, height, &markers, cfg);

    ClassifyReport {
        height,
        rows,
        markers,
    }
}

pub(crate) fn handle_classify(args: ClassifyArgs, cfg: &StakingCfg) -> Result<()> {
    let versions = load_versions(&args.params.params)?;
    let api = load_delegations(&args.delegations)?;
    let pending = match &args.pending {
        Some(path) => load_delegations(path)?,
        None => Vec::new(),
    };
    let markers = load_markers(args.markers.as_deref())?;

    let report = classify_report(api, pending, markers, &versions, args.height, cfg);

    print_json(&report)
}

#[cfg(test)]
mod tests {
    use staking_delegation_sm::LifecycleState;
    use staking_test_utils::fixtures::{delegation, params_versions, pending_delegation};

    use super::*;

    #[test]
    fn pending_records_known_to_the_api_are_dropped() {
        let versions = params_versions();
        let api = vec![delegation(1, "unbonding", 100, 1_000)];
        let pending = vec![pending_delegation(1, 1_000), pending_delegation(2, 1_000)];

        let mut markers = BroadcastMarkers::default();
        markers.record_unbond(&api[0]);

        let report = classify_report(
            api,
            pending,
            markers,
            &versions,
            300,
            &StakingCfg::default(),
        );

        let states: Vec<_> = report
            .rows
            .iter()
            .map(|row| row.result.as_ref().map(|c| c.state).ok())
            .collect();
        assert_eq!(
            states,
            vec![Some(LifecycleState::Pending), Some(LifecycleState::Unbonding)]
        );
        assert!(report.markers.is_empty());
    }
}
