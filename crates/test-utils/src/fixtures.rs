//! Deterministic parameter versions and delegations.

use std::collections::BTreeSet;

use bitcoin::Amount;
use staking_params::{ParamsVersions, ProtocolParameterVersion};
use staking_primitives::{
    delegation::Delegation,
    types::{BitcoinBlockHeight, BlockCount},
};

use crate::bitcoin::{txid, x_only_key};

/// Seed of the staker key used by [`delegation`].
pub const STAKER_SEED: u8 = 1;

/// Seed of the finality provider key used by [`delegation`].
pub const PROVIDER_SEED: u8 = 2;

/// Builds a parameter version with the given stake bounds and a fixed timelock of 1000 blocks.
pub fn params_version(
    version: u32,
    activation_height: BitcoinBlockHeight,
    min_stake: u64,
    max_stake: u64,
) -> ProtocolParameterVersion {
    ProtocolParameterVersion {
        version,
        activation_height,
        min_stake_amount: Amount::from_sat(min_stake),
        max_stake_amount: Amount::from_sat(max_stake),
        min_lock_time: 1_000,
        max_lock_time: 1_000,
        unbonding_time: 101,
        unbonding_fee: Amount::from_sat(1_000),
        confirmation_depth: 10,
        covenant_quorum: 2,
        covenant_keys: BTreeSet::from([x_only_key(101), x_only_key(102), x_only_key(103)]),
    }
}

/// The genesis version, active from height 0 with stakes in `[10_000, 1_000_000]`.
pub fn genesis_version() -> ProtocolParameterVersion {
    params_version(0, 0, 10_000, 1_000_000)
}

/// Two versions: the genesis one and a second one activating at height 500 with stakes in
/// `[5_000, 2_000_000]`.
pub fn two_versions() -> Vec<ProtocolParameterVersion> {
    vec![genesis_version(), params_version(1, 500, 5_000, 2_000_000)]
}

/// [`two_versions`] as a validated collection.
pub fn params_versions() -> ParamsVersions {
    ParamsVersions::new(two_versions()).expect("fixture versions must be valid")
}

/// Builds a delegation as reported by the API.
pub fn delegation(
    seed: u8,
    raw_state: &str,
    start_height: BitcoinBlockHeight,
    lock_time: BlockCount,
) -> Delegation {
    Delegation {
        raw_state: Some(raw_state.to_string()),
        start_height: Some(start_height),
        ..pending_delegation(seed, lock_time)
    }
}

/// Builds a delegation that only exists locally, right after its staking transaction was
/// broadcast.
pub fn pending_delegation(seed: u8, lock_time: BlockCount) -> Delegation {
    Delegation::pending(
        txid(seed),
        x_only_key(STAKER_SEED),
        vec![x_only_key(PROVIDER_SEED)],
        Amount::from_sat(50_000),
        lock_time,
    )
}
