//! The delegation record as reported by the staking API or created locally after a broadcast.

use bitcoin::{secp256k1::XOnlyPublicKey, Amount};
use serde::{Deserialize, Deserializer, Serialize};

use crate::types::{BitcoinBlockHeight, BlockCount, DelegationId, ParamsVersionNumber};

/// A single stake of a user.
///
/// The `raw_state` is whatever the staking API reported. It is kept as an open-ended string because
/// the API may introduce new states at any time; interpreting it is the job of the classifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Delegation {
    /// The hash of the staking transaction.
    pub id: DelegationId,

    /// The key of the staker.
    pub staker_key: XOnlyPublicKey,

    /// The finality providers this stake is delegated to (more than one when multi-staking).
    pub provider_keys: Vec<XOnlyPublicKey>,

    /// The staked amount.
    pub amount: Amount,

    /// The staking timelock in blocks.
    pub lock_time: BlockCount,

    /// The state reported by the API, or `None` for a record that only exists locally.
    #[serde(default)]
    pub raw_state: Option<String>,

    /// The height at which the staking transaction was included.
    ///
    /// The API reports `0` for transactions that are not yet included; that is normalized to
    /// `None`.
    #[serde(default, deserialize_with = "deserialize_start_height")]
    pub start_height: Option<BitcoinBlockHeight>,

    /// The parameter version the delegation was created under, if the API embeds it.
    #[serde(default)]
    pub params_version: Option<ParamsVersionNumber>,

    /// Whether the finality provider's stake cap was already exceeded when this stake was
    /// included.
    #[serde(default)]
    pub is_overflow: bool,

    /// The unbonding transaction, present once the stake took the early-unbonding path.
    #[serde(default)]
    pub unbonding_tx: Option<DelegationId>,

    /// The delegation this one supersedes through an expansion.
    #[serde(default)]
    pub previous_delegation_id: Option<DelegationId>,
}

fn deserialize_start_height<'de, D>(deserializer: D) -> Result<Option<BitcoinBlockHeight>, D::Error>
where
    D: Deserializer<'de>,
{
    let height = Option::<BitcoinBlockHeight>::deserialize(deserializer)?;
    Ok(height.filter(|h| *h != 0))
}

impl Delegation {
    /// Creates a record for a staking transaction that has just been broadcast and is not yet known
    /// to the API.
    pub fn pending(
        id: DelegationId,
        staker_key: XOnlyPublicKey,
        provider_keys: Vec<XOnlyPublicKey>,
        amount: Amount,
        lock_time: BlockCount,
    ) -> Self {
        Self {
            id,
            staker_key,
            provider_keys,
            amount,
            lock_time,
            raw_state: None,
            start_height: None,
            params_version: None,
            is_overflow: false,
            unbonding_tx: None,
            previous_delegation_id: None,
        }
    }

    /// Marks this record as an expansion of `previous`.
    pub fn expanding(mut self, previous: DelegationId) -> Self {
        self.previous_delegation_id = Some(previous);
        self
    }

    /// Returns whether the staking timelock has elapsed at `current_height`.
    ///
    /// A delegation that is not yet included never has an elapsed timelock.
    pub fn is_timelock_elapsed(&self, current_height: BitcoinBlockHeight) -> bool {
        self.start_height.is_some_and(|start| {
            current_height.saturating_sub(start) >= BitcoinBlockHeight::from(self.lock_time)
        })
    }

    /// Returns whether the stake took the early-unbonding path.
    pub const fn is_early_unbonded(&self) -> bool {
        self.unbonding_tx.is_some()
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use bitcoin::{hashes::Hash, Txid};

    use super::*;

    const STAKER_KEY: &str = "79be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798";

    fn staker_key() -> XOnlyPublicKey {
        XOnlyPublicKey::from_str(STAKER_KEY).expect("must be a valid x-only key")
    }

    #[test]
    fn deserializes_api_record() {
        let txid = Txid::from_byte_array([1u8; 32]);
        let json = format!(
            r#"{{
                "id": "{txid}",
                "staker_key": "{STAKER_KEY}",
                "provider_keys": ["{STAKER_KEY}"],
                "amount": 500000,
                "lock_time": 64000,
                "raw_state": "active",
                "start_height": 860000,
                "params_version": 4
            }}"#
        );

        let delegation: Delegation = serde_json::from_str(&json).expect("must deserialize");
        assert_eq!(delegation.id, txid);
        assert_eq!(delegation.staker_key, staker_key());
        assert_eq!(delegation.amount, Amount::from_sat(500_000));
        assert_eq!(delegation.raw_state.as_deref(), Some("active"));
        assert_eq!(delegation.start_height, Some(860_000));
        assert_eq!(delegation.params_version, Some(4));
        assert!(!delegation.is_overflow);
        assert!(delegation.unbonding_tx.is_none());
        assert!(delegation.previous_delegation_id.is_none());
    }

    #[test]
    fn zero_start_height_means_unconfirmed() {
        let txid = Txid::from_byte_array([2u8; 32]);
        let json = format!(
            r#"{{
                "id": "{txid}",
                "staker_key": "{STAKER_KEY}",
                "provider_keys": [],
                "amount": 1,
                "lock_time": 10,
                "start_height": 0
            }}"#
        );

        let delegation: Delegation = serde_json::from_str(&json).expect("must deserialize");
        assert_eq!(delegation.start_height, None);
        assert!(!delegation.is_timelock_elapsed(u64::MAX));
    }

    #[test]
    fn timelock_elapses_at_end_height() {
        let mut delegation = Delegation::pending(
            Txid::from_byte_array([3u8; 32]),
            staker_key(),
            vec![staker_key()],
            Amount::from_sat(10_000),
            1000,
        );
        delegation.start_height = Some(100);

        assert!(!delegation.is_timelock_elapsed(1099));
        assert!(delegation.is_timelock_elapsed(1100));
        assert!(!delegation.is_timelock_elapsed(50));
    }

    #[test]
    fn expansion_back_reference() {
        let previous = Txid::from_byte_array([4u8; 32]);
        let delegation = Delegation::pending(
            Txid::from_byte_array([5u8; 32]),
            staker_key(),
            vec![],
            Amount::from_sat(1),
            1,
        )
        .expanding(previous);

        assert_eq!(delegation.previous_delegation_id, Some(previous));
    }
}
