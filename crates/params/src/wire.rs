//! The parameter-version record as served by the staking API.

use std::str::FromStr;

use bitcoin::{
    secp256k1::{PublicKey, XOnlyPublicKey},
    Amount,
};
use serde::{Deserialize, Serialize};
use staking_primitives::types::{BitcoinBlockHeight, BlockCount, ParamsVersionNumber};

use crate::{
    errors::ConfigurationError, selector::ParamsVersions, version::ProtocolParameterVersion,
};

/// A parameter version with the field names and units used by the staking API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParamsVersionRecord {
    /// See [`ProtocolParameterVersion::version`].
    pub version: ParamsVersionNumber,

    /// See [`ProtocolParameterVersion::activation_height`].
    pub activation_height: BitcoinBlockHeight,

    /// Minimum stake in satoshis.
    pub min_staking_amount: u64,

    /// Maximum stake in satoshis.
    pub max_staking_amount: u64,

    /// Minimum staking timelock in blocks.
    pub min_staking_time: BlockCount,

    /// Maximum staking timelock in blocks.
    pub max_staking_time: BlockCount,

    /// Unbonding timelock in blocks.
    pub unbonding_time: BlockCount,

    /// Unbonding fee in satoshis.
    pub unbonding_fee: u64,

    /// See [`ProtocolParameterVersion::confirmation_depth`].
    pub confirmation_depth: u32,

    /// See [`ProtocolParameterVersion::covenant_quorum`].
    pub covenant_quorum: u32,

    /// Hex-encoded covenant keys, either x-only (32 bytes) or compressed (33 bytes).
    #[serde(default)]
    pub covenant_pks: Vec<String>,
}

fn parse_covenant_key(
    version: ParamsVersionNumber,
    key: &str,
) -> Result<XOnlyPublicKey, ConfigurationError> {
    let parsed = if key.len() == 66 {
        PublicKey::from_str(key).map(|pk| pk.x_only_public_key().0)
    } else {
        XOnlyPublicKey::from_str(key)
    };

    parsed.map_err(|e| ConfigurationError::invalid(version, format!("covenant key {key}: {e}")))
}

impl TryFrom<ParamsVersionRecord> for ProtocolParameterVersion {
    type Error = ConfigurationError;

    fn try_from(record: ParamsVersionRecord) -> Result<Self, Self::Error> {
        let covenant_keys = record
            .covenant_pks
            .iter()
            .map(|key| parse_covenant_key(record.version, key))
            .collect::<Result<_, _>>()?;

        let version = ProtocolParameterVersion {
            version: record.version,
            activation_height: record.activation_height,
            min_stake_amount: Amount::from_sat(record.min_staking_amount),
            max_stake_amount: Amount::from_sat(record.max_staking_amount),
            min_lock_time: record.min_staking_time,
            max_lock_time: record.max_staking_time,
            unbonding_time: record.unbonding_time,
            unbonding_fee: Amount::from_sat(record.unbonding_fee),
            confirmation_depth: record.confirmation_depth,
            covenant_quorum: record.covenant_quorum,
            covenant_keys,
        };

        version.validate()?;

        Ok(version)
    }
}

impl TryFrom<Vec<ParamsVersionRecord>> for ParamsVersions {
    type Error = ConfigurationError;

    fn try_from(records: Vec<ParamsVersionRecord>) -> Result<Self, Self::Error> {
        let versions = records
            .into_iter()
            .map(ProtocolParameterVersion::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        ParamsVersions::new(versions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const X_ONLY_KEY: &str = "79be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798";
    const COMPRESSED_KEY: &str =
        "0279be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798";

    fn api_json(covenant_quorum: u32, covenant_pks: &[&str]) -> String {
        let pks = covenant_pks
            .iter()
            .map(|pk| format!("\"{pk}\""))
            .collect::<Vec<_>>()
            .join(",");

        format!(
            r#"[
                {{
                    "version": 0,
                    "activation_height": 857910,
                    "staking_cap": 100000000000,
                    "tag": "62626e31",
                    "min_staking_amount": 500000,
                    "max_staking_amount": 5000000,
                    "min_staking_time": 64000,
                    "max_staking_time": 64000,
                    "unbonding_time": 1008,
                    "unbonding_fee": 32000,
                    "confirmation_depth": 10,
                    "covenant_quorum": {covenant_quorum},
                    "covenant_pks": [{pks}]
                }},
                {{
                    "version": 1,
                    "activation_height": 864790,
                    "min_staking_amount": 500000,
                    "max_staking_amount": 50000000000,
                    "min_staking_time": 64000,
                    "max_staking_time": 64000,
                    "unbonding_time": 1008,
                    "unbonding_fee": 32000,
                    "confirmation_depth": 10,
                    "covenant_quorum": 0
                }}
            ]"#
        )
    }

    #[test]
    fn converts_api_records() {
        let records: Vec<ParamsVersionRecord> =
            serde_json::from_str(&api_json(1, &[X_ONLY_KEY])).expect("must deserialize");
        let versions = ParamsVersions::try_from(records).expect("must be valid");

        let v0 = versions.by_number(0).unwrap();
        assert_eq!(v0.min_stake_amount, Amount::from_sat(500_000));
        assert_eq!(v0.unbonding_fee, Amount::from_sat(32_000));
        assert!(v0.is_fixed_lock_time());
        assert_eq!(v0.covenant_keys.len(), 1);

        assert_eq!(versions.select(864_790).unwrap().version, 1);
    }

    #[test]
    fn compressed_and_x_only_keys_agree() {
        let x_only = parse_covenant_key(0, X_ONLY_KEY).unwrap();
        let compressed = parse_covenant_key(0, COMPRESSED_KEY).unwrap();

        assert_eq!(x_only, compressed);
    }

    #[test]
    fn rejects_bad_records() {
        let records: Vec<ParamsVersionRecord> =
            serde_json::from_str(&api_json(1, &["zz"])).expect("must deserialize");
        assert!(matches!(
            ParamsVersions::try_from(records),
            Err(ConfigurationError::InvalidVersion { version: 0, .. })
        ));

        let records: Vec<ParamsVersionRecord> =
            serde_json::from_str(&api_json(2, &[X_ONLY_KEY])).expect("must deserialize");
        assert!(
            ParamsVersions::try_from(records).is_err(),
            "quorum above the key count must be rejected"
        );
    }
}
