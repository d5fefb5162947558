//! This crate classifies delegations into their lifecycle state and the user actions available in
//! that state.
//!
//! The classification is a pure projection of the latest API record, the governing parameter
//! version, the current Bitcoin height and the locally recorded broadcast markers. It is never
//! stored; callers recompute it whenever any of these inputs change.

pub mod batch;
pub mod classifier;
pub mod context;
pub mod errors;
pub mod markers;
pub mod pending;
pub mod state;

pub use batch::{classify_all, resolve_version, superseded_ids, RowClassification};
pub use classifier::{classify, Classification};
pub use context::ClassifyCtx;
pub use errors::{ClassifyError, UnknownStateError};
pub use markers::BroadcastMarkers;
pub use pending::reconcile_pending;
pub use state::{Action, ActionSet, LifecycleState, RawState};
