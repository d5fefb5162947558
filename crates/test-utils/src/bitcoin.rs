//! Module to generate bitcoin values for testing.

use bitcoin::{
    hashes::Hash,
    key::rand::{rngs::OsRng, Rng},
    secp256k1::{Secp256k1, SecretKey, XOnlyPublicKey},
    Txid,
};
use proptest::prelude::*;

/// Returns a deterministic transaction ID made of `seed` repeated.
pub fn txid(seed: u8) -> Txid {
    Txid::from_byte_array([seed; 32])
}

/// Generates a random transaction ID.
pub fn generate_txid() -> Txid {
    let mut txid = [0u8; 32];
    OsRng.fill(&mut txid);

    Txid::from_byte_array(txid)
}

/// Returns a deterministic x-only public key derived from a secret key made of `seed` repeated.
///
/// `seed` must not be zero.
pub fn x_only_key(seed: u8) -> XOnlyPublicKey {
    let secp = Secp256k1::new();
    let sk = SecretKey::from_slice(&[seed; 32]).expect("seed must be a valid secret key");

    sk.x_only_public_key(&secp).0
}

/// Generates an arbitrary Txid.
pub fn arb_txid() -> impl Strategy<Value = Txid> {
    any::<[u8; 32]>().prop_map(Txid::from_byte_array)
}

/// Generates one of a small pool of x-only keys.
pub fn arb_x_only_key() -> impl Strategy<Value = XOnlyPublicKey> {
    (1u8..=16).prop_map(x_only_key)
}
