//! Classification of every delegation of a user at once.

use std::collections::BTreeSet;

use serde::Serialize;
use staking_params::{ConfigurationError, ParamsVersions, ProtocolParameterVersion};
use staking_primitives::{
    config::StakingCfg,
    delegation::Delegation,
    types::{BitcoinBlockHeight, DelegationId},
};
use tracing::warn;

use crate::{
    classifier::{classify, Classification},
    context::ClassifyCtx,
    errors::{ClassifyError, ClassifyResult},
    markers::BroadcastMarkers,
    state::{ActionSet, LifecycleState, RawState},
};

/// The outcome of classifying one delegation in a batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowClassification {
    /// The delegation this row belongs to.
    pub id: DelegationId,

    /// The classification, or why it failed.
    #[serde(with = "row_result")]
    pub result: Result<Classification, ClassifyError>,
}

/// Resolves the version governing `delegation`.
///
/// An embedded version number wins. Otherwise the version is selected by the inclusion height, and
/// for records not yet included by the current height, since that is the version they are being
/// created under.
pub fn resolve_version<'a>(
    delegation: &Delegation,
    versions: &'a ParamsVersions,
    current_height: BitcoinBlockHeight,
) -> Result<&'a ProtocolParameterVersion, ConfigurationError> {
    match (delegation.params_version, delegation.start_height) {
        (Some(number), _) => versions.by_number(number),
        (None, Some(start_height)) => versions.select(start_height),
        (None, None) => versions.select(current_height),
    }
}

/// Returns the ids of delegations that have been expanded by another delegation in `delegations`.
pub fn superseded_ids(delegations: &[Delegation]) -> BTreeSet<DelegationId> {
    delegations
        .iter()
        .filter_map(|d| d.previous_delegation_id)
        .collect()
}

/// Classifies every delegation in `delegations`.
///
/// A failing row never affects the others: an unknown state or an unresolvable version is reported
/// in that row only. Local records are pending regardless of the parameter versions, and an unknown
/// state is reported as such even if the row's version cannot be resolved either.
pub fn classify_all(
    delegations: &[Delegation],
    versions: &ParamsVersions,
    current_height: BitcoinBlockHeight,
    markers: &BroadcastMarkers,
    cfg: &StakingCfg,
) -> Vec<RowClassification> {
    let superseded = superseded_ids(delegations);

    delegations
        .iter()
        .map(|delegation| {
            let result = classify_row(delegation, versions, current_height, |version| {
                ClassifyCtx::new(current_height, version)
                    .with_broadcasted_unbond(markers.has_unbond(delegation))
                    .with_broadcasted_withdrawal(markers.has_withdrawal(delegation))
                    .with_multi_staking(cfg.multi_staking_enabled())
                    .with_superseded(superseded.contains(&delegation.id))
            });

            if let Err(err) = &result {
                warn!(delegation_id = %delegation.id, %err, "could not classify delegation");
            }

            RowClassification {
                id: delegation.id,
                result,
            }
        })
        .collect()
}

fn classify_row<'a>(
    delegation: &Delegation,
    versions: &'a ParamsVersions,
    current_height: BitcoinBlockHeight,
    ctx: impl FnOnce(&'a ProtocolParameterVersion) -> ClassifyCtx<'a>,
) -> ClassifyResult<Classification> {
    let Some(raw) = delegation.raw_state.as_deref() else {
        return Ok(Classification {
            state: LifecycleState::Pending,
            actions: ActionSet::new(),
        });
    };

    raw.parse::<RawState>()?;

    let version = resolve_version(delegation, versions, current_height)?;

    classify(delegation, &ctx(version))
}

mod row_result {
    use serde::{ser::SerializeMap, Serializer};

    use super::*;

    pub(super) fn serialize<S>(
        result: &Result<Classification, ClassifyError>,
        serializer: S,
    ) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(1))?;
        match result {
            Ok(classification) => map.serialize_entry("ok", classification)?,
            Err(err) => map.serialize_entry("error", &err.to_string())?,
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use staking_test_utils::{
        bitcoin::txid,
        fixtures::{delegation, params_version, params_versions, pending_delegation},
    };

    use super::*;
    use crate::{errors::UnknownStateError, state::Action};

    #[test]
    fn resolves_embedded_then_start_then_current() {
        let versions = params_versions();

        let mut embedded = delegation(1, "active", 600, 1_000);
        embedded.params_version = Some(0);
        assert_eq!(resolve_version(&embedded, &versions, 700).unwrap().version, 0);

        let included = delegation(1, "active", 100, 1_000);
        assert_eq!(resolve_version(&included, &versions, 700).unwrap().version, 0);

        let pending = pending_delegation(1, 1_000);
        assert_eq!(resolve_version(&pending, &versions, 700).unwrap().version, 1);

        embedded.params_version = Some(9);
        assert_eq!(
            resolve_version(&embedded, &versions, 700),
            Err(ConfigurationError::VersionNotFound(9))
        );
    }

    #[test]
    fn failing_row_does_not_affect_others() {
        let versions = params_versions();
        let delegations = vec![
            delegation(1, "active", 100, 1_000),
            delegation(2, "some_new_future_state", 100, 1_000),
            delegation(3, "withdrawn", 100, 1_000),
        ];

        let rows = classify_all(
            &delegations,
            &versions,
            300,
            &BroadcastMarkers::default(),
            &StakingCfg::default(),
        );

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].id, txid(1));
        assert_eq!(
            rows[0].result.as_ref().map(|c| c.state),
            Ok(LifecycleState::Active)
        );
        assert!(matches!(rows[1].result, Err(ClassifyError::UnknownState(_))));
        assert_eq!(
            rows[2].result.as_ref().map(|c| c.state),
            Ok(LifecycleState::Withdrawn)
        );
    }

    #[test]
    fn markers_and_expansions_feed_the_context() {
        let versions = params_versions();
        let original = delegation(1, "active", 100, 1_000);
        let expansion = pending_delegation(2, 1_000).expanding(original.id);
        let other = delegation(3, "active", 100, 1_000);

        let mut markers = BroadcastMarkers::default();
        markers.record_unbond(&other);

        let cfg = StakingCfg::default().with_multi_staking(true);
        let rows = classify_all(
            &[original, expansion, other],
            &versions,
            300,
            &markers,
            &cfg,
        );

        let original = rows[0].result.as_ref().unwrap();
        assert_eq!(original.state, LifecycleState::Active);
        assert!(!original.allows(Action::Expand));

        assert_eq!(
            rows[1].result.as_ref().unwrap().state,
            LifecycleState::Pending
        );
        assert_eq!(
            rows[2].result.as_ref().unwrap().state,
            LifecycleState::IntermediateUnbonding
        );
    }

    #[test]
    fn rows_serialize_as_ok_or_error() {
        let versions = params_versions();
        let rows = classify_all(
            &[
                delegation(1, "active", 100, 1_000),
                delegation(2, "slashed", 100, 1_000),
            ],
            &versions,
            300,
            &BroadcastMarkers::default(),
            &StakingCfg::default(),
        );

        let json = serde_json::to_value(&rows).unwrap();
        assert_eq!(json[0]["result"]["ok"]["state"], "ACTIVE");
        assert_eq!(json[0]["result"]["ok"]["actions"][0], "UNBOND");
        assert_eq!(
            json[1]["result"]["error"],
            "unknown delegation state \"slashed\""
        );
    }

    #[test]
    fn local_record_is_pending_before_first_activation() {
        let versions = ParamsVersions::new(vec![params_version(0, 1_000, 10_000, 1_000_000)])
            .unwrap();

        let rows = classify_all(
            &[pending_delegation(1, 1_000)],
            &versions,
            500,
            &BroadcastMarkers::default(),
            &StakingCfg::default(),
        );

        let classification = rows[0].result.as_ref().unwrap();
        assert_eq!(classification.state, LifecycleState::Pending);
        assert!(classification.actions.is_empty());
    }

    #[test]
    fn unknown_state_wins_over_unknown_version() {
        let versions = params_versions();
        let mut skewed = delegation(1, "some_new_future_state", 600, 1_000);
        skewed.params_version = Some(9);

        let rows = classify_all(
            &[skewed],
            &versions,
            700,
            &BroadcastMarkers::default(),
            &StakingCfg::default(),
        );

        assert_eq!(
            rows[0].result,
            Err(ClassifyError::UnknownState(UnknownStateError {
                raw: "some_new_future_state".to_string()
            }))
        );
    }

    #[test]
    fn unresolvable_version_of_known_state_is_reported() {
        let versions = params_versions();
        let mut embedded = delegation(1, "active", 600, 1_000);
        embedded.params_version = Some(9);

        let rows = classify_all(
            &[embedded],
            &versions,
            700,
            &BroadcastMarkers::default(),
            &StakingCfg::default(),
        );

        assert_eq!(
            rows[0].result,
            Err(ClassifyError::Configuration(
                ConfigurationError::VersionNotFound(9)
            ))
        );
    }
}
