//! Loading of the JSON inputs served by the staking API or kept locally.

use std::{fs, path::Path};

use anyhow::Context;
use serde::de::DeserializeOwned;
use staking_delegation_sm::BroadcastMarkers;
use staking_params::{wire::ParamsVersionRecord, ParamsVersions};
use staking_primitives::delegation::Delegation;
use tracing::debug;

fn read_json<T: DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;

    serde_json::from_str(&contents).with_context(|| format!("failed to parse {}", path.display()))
}

/// Loads and validates the parameter versions.
pub(crate) fn load_versions(path: &Path) -> anyhow::Result<ParamsVersions> {
    let records: Vec<ParamsVersionRecord> = read_json(path)?;
    let versions = ParamsVersions::try_from(records)?;

    debug!(count = versions.as_slice().len(), "loaded parameter versions");

    Ok(versions)
}

/// Loads a list of delegations.
pub(crate) fn load_delegations(path: &Path) -> anyhow::Result<Vec<Delegation>> {
    read_json(path)
}

/// Loads the broadcast markers, or an empty set if no path is given.
pub(crate) fn load_markers(path: Option<&Path>) -> anyhow::Result<BroadcastMarkers> {
    path.map_or_else(|| Ok(BroadcastMarkers::default()), read_json)
}

/// Prints `value` as pretty JSON on stdout.
pub(crate) fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
