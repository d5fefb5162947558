//! Errors for the staking parameters.

use staking_primitives::types::{BitcoinBlockHeight, ParamsVersionNumber};
use thiserror::Error;

/// The caller supplied parameter data that violates an invariant that must always hold.
///
/// These are programming or deployment defects, not user errors, and must never be silently
/// replaced by a default.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    /// No parameter versions were supplied at all.
    #[error("no protocol parameter versions were supplied")]
    EmptyVersionList,

    /// The requested height lies before the activation of the very first version.
    #[error("height {height} predates the first parameter activation at {first_activation}")]
    HeightPredatesGenesis {
        /// The requested height.
        height: BitcoinBlockHeight,
        /// The lowest activation height among the supplied versions.
        first_activation: BitcoinBlockHeight,
    },

    /// No version with the requested number exists.
    #[error("protocol parameter version {0} not found")]
    VersionNotFound(ParamsVersionNumber),

    /// The same version number appears more than once.
    #[error("protocol parameter version {0} appears more than once")]
    DuplicateVersion(ParamsVersionNumber),

    /// A version carries internally inconsistent values.
    #[error("protocol parameter version {version} is invalid: {reason}")]
    InvalidVersion {
        /// The offending version.
        version: ParamsVersionNumber,
        /// What is wrong with it.
        reason: String,
    },

    /// The version paired with a delegation is not the one that governs it.
    #[error("expected protocol parameter version {expected} but got {supplied}")]
    MismatchedVersion {
        /// The version that governs the delegation.
        expected: ParamsVersionNumber,
        /// The version that was supplied.
        supplied: ParamsVersionNumber,
    },

    /// The version paired with a delegation had not yet activated at its inclusion height.
    #[error(
        "protocol parameter version {version} activates at {activation_height}, after height {height}"
    )]
    VersionNotActive {
        /// The supplied version.
        version: ParamsVersionNumber,
        /// The activation height of the supplied version.
        activation_height: BitcoinBlockHeight,
        /// The height the version was paired with.
        height: BitcoinBlockHeight,
    },
}

impl ConfigurationError {
    pub(crate) fn invalid(version: ParamsVersionNumber, reason: impl Into<String>) -> Self {
        ConfigurationError::InvalidVersion {
            version,
            reason: reason.into(),
        }
    }
}
