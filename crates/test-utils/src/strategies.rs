//! Proptest strategies for staking types.

use bitcoin::Amount;
use proptest::{option, prelude::*};
use staking_primitives::delegation::Delegation;

use crate::bitcoin::{arb_txid, arb_x_only_key};

/// The states the staking API is known to report.
pub const KNOWN_RAW_STATES: [&str; 5] = [
    "active",
    "unbonding_requested",
    "unbonding",
    "unbonded",
    "withdrawn",
];

/// Generates a raw state: mostly known ones, sometimes absent, sometimes garbage.
pub fn arb_raw_state() -> impl Strategy<Value = Option<String>> {
    prop_oneof![
        6 => prop::sample::select(KNOWN_RAW_STATES.to_vec()).prop_map(|s| Some(s.to_string())),
        1 => Just(None),
        1 => "[a-z_]{1,24}".prop_map(Some),
    ]
}

/// Generates an arbitrary delegation.
pub fn arb_delegation() -> impl Strategy<Value = Delegation> {
    (
        (arb_txid(), arb_x_only_key(), prop::collection::vec(arb_x_only_key(), 1..4)),
        (1u64..10_000_000, 1u32..70_000, arb_raw_state()),
        (option::of(1u64..100_000), option::of(0u32..4), any::<bool>()),
        (option::of(arb_txid()), option::of(arb_txid())),
    )
        .prop_map(
            |(
                (id, staker_key, provider_keys),
                (amount, lock_time, raw_state),
                (start_height, params_version, is_overflow),
                (unbonding_tx, previous_delegation_id),
            )| Delegation {
                id,
                staker_key,
                provider_keys,
                amount: Amount::from_sat(amount),
                lock_time,
                raw_state,
                start_height,
                params_version,
                is_overflow,
                unbonding_tx,
                previous_delegation_id,
            },
        )
}
