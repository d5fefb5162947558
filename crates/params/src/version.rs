//! A single version of the staking protocol parameters.

use std::collections::BTreeSet;

use bitcoin::{secp256k1::XOnlyPublicKey, Amount};
use serde::{Deserialize, Serialize};
use staking_primitives::types::{BitcoinBlockHeight, BlockCount, ParamsVersionNumber};

use crate::errors::ConfigurationError;

/// One historical or scheduled configuration of the staking protocol.
///
/// A version governs every height from its `activation_height` up to (but excluding) the
/// activation height of the next version. Versions are immutable once fetched; a refresh replaces
/// the whole list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProtocolParameterVersion {
    /// The version number, unique and strictly increasing across versions.
    pub version: ParamsVersionNumber,

    /// The Bitcoin height from which this version is effective.
    pub activation_height: BitcoinBlockHeight,

    /// The smallest stake accepted.
    pub min_stake_amount: Amount,

    /// The largest stake accepted.
    pub max_stake_amount: Amount,

    /// The shortest staking timelock in blocks.
    pub min_lock_time: BlockCount,

    /// The longest staking timelock in blocks.
    pub max_lock_time: BlockCount,

    /// The timelock on the unbonding output in blocks.
    pub unbonding_time: BlockCount,

    /// The fee deducted from the stake when unbonding early.
    pub unbonding_fee: Amount,

    /// The number of confirmations after which a staking transaction is considered final.
    pub confirmation_depth: u32,

    /// The number of covenant signatures required.
    pub covenant_quorum: u32,

    /// The keys of the covenant committee.
    pub covenant_keys: BTreeSet<XOnlyPublicKey>,
}

impl ProtocolParameterVersion {
    /// Returns whether the staking timelock is fixed rather than user-selectable.
    pub const fn is_fixed_lock_time(&self) -> bool {
        self.min_lock_time == self.max_lock_time
    }

    /// Returns whether this version had already activated at `height`.
    pub const fn is_active_at(&self, height: BitcoinBlockHeight) -> bool {
        self.activation_height <= height
    }

    /// Checks the internal consistency of this version.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.min_stake_amount > self.max_stake_amount {
            return Err(ConfigurationError::invalid(
                self.version,
                format!(
                    "min stake {} exceeds max stake {}",
                    self.min_stake_amount.to_sat(),
                    self.max_stake_amount.to_sat()
                ),
            ));
        }

        if self.min_lock_time > self.max_lock_time {
            return Err(ConfigurationError::invalid(
                self.version,
                format!(
                    "min lock time {} exceeds max lock time {}",
                    self.min_lock_time, self.max_lock_time
                ),
            ));
        }

        if self.covenant_quorum as usize > self.covenant_keys.len() {
            return Err(ConfigurationError::invalid(
                self.version,
                format!(
                    "covenant quorum {} exceeds the {} covenant keys",
                    self.covenant_quorum,
                    self.covenant_keys.len()
                ),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn version() -> ProtocolParameterVersion {
        ProtocolParameterVersion {
            version: 0,
            activation_height: 0,
            min_stake_amount: Amount::from_sat(10_000),
            max_stake_amount: Amount::from_sat(1_000_000),
            min_lock_time: 100,
            max_lock_time: 200,
            unbonding_time: 101,
            unbonding_fee: Amount::from_sat(1_000),
            confirmation_depth: 10,
            covenant_quorum: 0,
            covenant_keys: BTreeSet::new(),
        }
    }

    #[test]
    fn fixed_lock_time() {
        let mut params = version();
        assert!(!params.is_fixed_lock_time());

        params.max_lock_time = params.min_lock_time;
        assert!(params.is_fixed_lock_time());
    }

    #[test]
    fn rejects_inverted_bounds() {
        assert!(version().validate().is_ok());

        let mut params = version();
        params.min_stake_amount = Amount::from_sat(2_000_000);
        assert!(matches!(
            params.validate(),
            Err(ConfigurationError::InvalidVersion { version: 0, .. })
        ));

        let mut params = version();
        params.min_lock_time = 300;
        assert!(params.validate().is_err());

        let mut params = version();
        params.covenant_quorum = 1;
        assert!(params.validate().is_err(), "quorum cannot exceed key count");
    }

    #[test]
    fn test_params_serde() {
        let params = version();
        let serialized = toml::to_string(&params).unwrap();
        let deserialized: ProtocolParameterVersion = toml::from_str(&serialized).unwrap();

        assert_eq!(params, deserialized);
    }
}
