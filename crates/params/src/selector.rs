//! Selection of the parameter version that governs a given Bitcoin height.

use std::collections::BTreeSet;

use serde::Serialize;
use staking_primitives::types::{BitcoinBlockHeight, ParamsVersionNumber};
use tracing::trace;

use crate::{errors::ConfigurationError, version::ProtocolParameterVersion};

/// Returns the version that governs `height`.
///
/// This is the version with the greatest `activation_height` that is not above `height`. If two
/// versions share an activation height, the one with the higher version number wins. The input does
/// not need to be sorted.
///
/// # Errors
///
/// [`ConfigurationError::EmptyVersionList`] if `versions` is empty, and
/// [`ConfigurationError::HeightPredatesGenesis`] if every version activates after `height`.
pub fn select_version(
    height: BitcoinBlockHeight,
    versions: &[ProtocolParameterVersion],
) -> Result<&ProtocolParameterVersion, ConfigurationError> {
    let first_activation = versions
        .iter()
        .map(|v| v.activation_height)
        .min()
        .ok_or(ConfigurationError::EmptyVersionList)?;

    let selected = versions
        .iter()
        .filter(|v| v.is_active_at(height))
        .max_by_key(|v| (v.activation_height, v.version))
        .ok_or(ConfigurationError::HeightPredatesGenesis {
            height,
            first_activation,
        })?;

    trace!(%height, version = selected.version, "selected protocol parameter version");

    Ok(selected)
}

/// Returns the version whose number is `version`.
///
/// This is used for delegations that embed the version they were created under.
pub fn select_version_by_number(
    version: ParamsVersionNumber,
    versions: &[ProtocolParameterVersion],
) -> Result<&ProtocolParameterVersion, ConfigurationError> {
    if versions.is_empty() {
        return Err(ConfigurationError::EmptyVersionList);
    }

    versions
        .iter()
        .find(|v| v.version == version)
        .ok_or(ConfigurationError::VersionNotFound(version))
}

/// A validated list of parameter versions, sorted by activation.
///
/// Construction enforces the invariants the selection relies on, so that lookups on this type can
/// only fail for heights before the first activation or unknown version numbers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamsVersions {
    /// Sorted ascending by `(activation_height, version)`.
    versions: Vec<ProtocolParameterVersion>,
}

impl ParamsVersions {
    /// Validates and sorts `versions`.
    ///
    /// # Errors
    ///
    /// If the list is empty, if a version number repeats, if any version is internally
    /// inconsistent, or if a newer version number activates before an older one.
    pub fn new(mut versions: Vec<ProtocolParameterVersion>) -> Result<Self, ConfigurationError> {
        if versions.is_empty() {
            return Err(ConfigurationError::EmptyVersionList);
        }

        let mut seen = BTreeSet::new();
        for version in &versions {
            if !seen.insert(version.version) {
                return Err(ConfigurationError::DuplicateVersion(version.version));
            }
            version.validate()?;
        }

        versions.sort_by_key(|v| (v.activation_height, v.version));

        if let Some(pair) = versions.windows(2).find(|w| w[1].version < w[0].version) {
            return Err(ConfigurationError::invalid(
                pair[1].version,
                format!(
                    "activates at {} after the newer version {}",
                    pair[1].activation_height, pair[0].version
                ),
            ));
        }

        Ok(Self { versions })
    }

    /// Returns the versions sorted by activation.
    pub fn as_slice(&self) -> &[ProtocolParameterVersion] {
        &self.versions
    }

    /// Returns the version that governs `height`.
    pub fn select(
        &self,
        height: BitcoinBlockHeight,
    ) -> Result<&ProtocolParameterVersion, ConfigurationError> {
        let idx = self.governing_index(height)?;
        Ok(&self.versions[idx])
    }

    /// Returns the version whose number is `version`.
    pub fn by_number(
        &self,
        version: ParamsVersionNumber,
    ) -> Result<&ProtocolParameterVersion, ConfigurationError> {
        select_version_by_number(version, &self.versions)
    }

    /// Returns the lowest activation height.
    pub fn first_activation_height(&self) -> BitcoinBlockHeight {
        // the list is never empty and is sorted by activation
        self.versions
            .first()
            .map(|v| v.activation_height)
            .unwrap_or_default()
    }

    /// Returns the version with the highest activation height, which may not have activated yet.
    pub fn latest(&self) -> Option<&ProtocolParameterVersion> {
        self.versions.last()
    }

    /// Returns whether staking is possible at all at `height`.
    pub fn is_staking_open(&self, height: BitcoinBlockHeight) -> bool {
        height >= self.first_activation_height()
    }

    /// Returns the version governing `height` along with the next scheduled version.
    pub fn window(
        &self,
        height: BitcoinBlockHeight,
    ) -> Result<VersionWindow<'_>, ConfigurationError> {
        let idx = self.governing_index(height)?;
        let current = &self.versions[idx];
        let next = self.versions[idx + 1..]
            .iter()
            .find(|v| v.activation_height > current.activation_height);

        let is_approaching_next = next.is_some_and(|next| {
            height.saturating_add(u64::from(current.confirmation_depth)) >= next.activation_height
        });

        Ok(VersionWindow {
            current,
            next,
            first_activation_height: self.first_activation_height(),
            is_approaching_next,
        })
    }

    fn governing_index(&self, height: BitcoinBlockHeight) -> Result<usize, ConfigurationError> {
        // number of versions already active at `height`; ties sort by version so the last one
        // active is the highest version number.
        let active = self
            .versions
            .partition_point(|v| v.is_active_at(height));

        let idx = active
            .checked_sub(1)
            .ok_or(ConfigurationError::HeightPredatesGenesis {
                height,
                first_activation: self.first_activation_height(),
            })?;

        trace!(
            %height,
            version = self.versions[idx].version,
            "selected protocol parameter version"
        );

        Ok(idx)
    }
}

impl TryFrom<Vec<ProtocolParameterVersion>> for ParamsVersions {
    type Error = ConfigurationError;

    fn try_from(versions: Vec<ProtocolParameterVersion>) -> Result<Self, Self::Error> {
        Self::new(versions)
    }
}

/// The version governing a height together with what comes after it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct VersionWindow<'a> {
    /// The version governing the requested height.
    pub current: &'a ProtocolParameterVersion,

    /// The next version scheduled to activate, if any.
    pub next: Option<&'a ProtocolParameterVersion>,

    /// The lowest activation height of all versions.
    pub first_activation_height: BitcoinBlockHeight,

    /// Whether a staking transaction broadcast now could be finalized under `next` instead of
    /// `current`.
    pub is_approaching_next: bool,
}
