//! The context a delegation is classified in.

use staking_params::ProtocolParameterVersion;
use staking_primitives::types::BitcoinBlockHeight;

/// Everything besides the delegation record itself that the classification depends on.
///
/// The `version` must be the one that governs the delegation, as resolved by the parameter
/// selector. Pairing a delegation with any other version makes the classification meaningless.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassifyCtx<'a> {
    /// The current Bitcoin height.
    pub current_height: BitcoinBlockHeight,

    /// The parameter version governing the delegation.
    pub version: &'a ProtocolParameterVersion,

    /// Whether an unbonding transaction for this delegation was broadcast locally.
    pub has_broadcasted_unbond: bool,

    /// Whether a withdrawal transaction for this delegation was broadcast locally.
    pub has_broadcasted_withdrawal: bool,

    /// Whether expansions are allowed at all.
    pub multi_staking_allowed: bool,

    /// Whether another delegation already expands this one.
    pub is_superseded: bool,
}

impl<'a> ClassifyCtx<'a> {
    /// Creates a context with no local markers, multi-staking disabled and no superseding
    /// delegation.
    pub const fn new(
        current_height: BitcoinBlockHeight,
        version: &'a ProtocolParameterVersion,
    ) -> Self {
        Self {
            current_height,
            version,
            has_broadcasted_unbond: false,
            has_broadcasted_withdrawal: false,
            multi_staking_allowed: false,
            is_superseded: false,
        }
    }

    /// Sets whether an unbonding transaction was broadcast locally.
    pub const fn with_broadcasted_unbond(mut self, broadcasted: bool) -> Self {
        self.has_broadcasted_unbond = broadcasted;
        self
    }

    /// Sets whether a withdrawal transaction was broadcast locally.
    pub const fn with_broadcasted_withdrawal(mut self, broadcasted: bool) -> Self {
        self.has_broadcasted_withdrawal = broadcasted;
        self
    }

    /// Sets whether expansions are allowed.
    pub const fn with_multi_staking(mut self, allowed: bool) -> Self {
        self.multi_staking_allowed = allowed;
        self
    }

    /// Sets whether another delegation already expands this one.
    pub const fn with_superseded(mut self, superseded: bool) -> Self {
        self.is_superseded = superseded;
        self
    }
}
