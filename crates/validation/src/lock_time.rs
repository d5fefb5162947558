//! Validation of the staking timelock.

use staking_params::ProtocolParameterVersion;
use staking_primitives::types::BlockCount;

/// Returns whether `blocks` is an acceptable staking timelock under `version`.
///
/// When the version fixes the timelock, any positive value is accepted because it is overridden by
/// the fixed term. Otherwise `blocks` must be within `[min_lock_time, max_lock_time]`.
pub const fn validate_lock_time(blocks: BlockCount, version: &ProtocolParameterVersion) -> bool {
    if version.is_fixed_lock_time() {
        return blocks > 0;
    }

    version.min_lock_time <= blocks && blocks <= version.max_lock_time
}

/// Returns the timelock that will actually be used for a stake requested with `blocks`, or `None`
/// if `blocks` is not acceptable.
pub const fn effective_lock_time(
    blocks: BlockCount,
    version: &ProtocolParameterVersion,
) -> Option<BlockCount> {
    if !validate_lock_time(blocks, version) {
        return None;
    }

    if version.is_fixed_lock_time() {
        Some(version.min_lock_time)
    } else {
        Some(blocks)
    }
}
