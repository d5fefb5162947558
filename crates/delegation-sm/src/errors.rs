//! Errors that can occur while classifying a delegation.

use staking_params::ConfigurationError;
use thiserror::Error;

/// The API reported a delegation state this client does not know about.
///
/// This indicates version skew between the API and the client. It is neither a user error nor a
/// caller bug, and the delegation must not be treated as being in any concrete state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown delegation state {raw:?}")]
pub struct UnknownStateError {
    /// The state string as reported by the API.
    pub raw: String,
}

/// Errors that can occur while classifying a delegation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClassifyError {
    /// The API reported a state that is not enumerated.
    #[error(transparent)]
    UnknownState(#[from] UnknownStateError),

    /// The parameter data supplied with the delegation is inconsistent.
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
}

/// The result type for classification.
pub type ClassifyResult<T> = Result<T, ClassifyError>;
