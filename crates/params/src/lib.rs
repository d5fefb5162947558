//! This crate contains the versioned protocol parameters that dictate what a staker may do at a
//! given Bitcoin height, and the logic to select the version that governs a height.

pub mod errors;
pub mod selector;
pub mod version;
pub mod wire;

pub use errors::ConfigurationError;
pub use selector::{select_version, select_version_by_number, ParamsVersions, VersionWindow};
pub use version::ProtocolParameterVersion;
