//! Staking-wide configuration passed explicitly to every decision function that needs it.

use bitcoin::Network;
use serde::{Deserialize, Serialize};

use crate::amount::Denomination;

/// Staking-wide configuration.
///
/// This is static for the lifetime of a session and is handed to the selector, validator and
/// classifier by the caller instead of being read from process-wide state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StakingCfg {
    /// The Bitcoin network the stakes live on.
    pub network: Network,

    /// The denomination in which stake amounts are entered.
    #[serde(default)]
    pub denomination: Denomination,

    /// Feature toggles.
    #[serde(default)]
    pub features: FeatureFlags,
}

/// Feature toggles that gate user actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FeatureFlags {
    /// Whether a delegation may be expanded to additional finality providers or renewed with new
    /// terms.
    #[serde(default)]
    pub multi_staking_enabled: bool,
}

impl StakingCfg {
    /// Creates a new config for `network` with the default denomination and every feature turned
    /// off.
    pub const fn new(network: Network) -> Self {
        Self {
            network,
            denomination: Denomination::Btc,
            features: FeatureFlags {
                multi_staking_enabled: false,
            },
        }
    }

    /// Updates the multi-staking feature flag and returns the updated config.
    pub fn with_multi_staking(mut self, enabled: bool) -> Self {
        self.features.multi_staking_enabled = enabled;
        self
    }

    /// Updates the denomination and returns the updated config.
    pub fn with_denomination(mut self, denomination: Denomination) -> Self {
        self.denomination = denomination;
        self
    }

    /// Returns whether multi-staking expansion is enabled.
    pub const fn multi_staking_enabled(&self) -> bool {
        self.features.multi_staking_enabled
    }
}

impl Default for StakingCfg {
    fn default() -> Self {
        Self::new(Network::Bitcoin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_staking_cfg_toml() {
        let cfg_toml = r#"
            network = "signet"
            denomination = "BABY"

            [features]
            multi_staking_enabled = true
        "#;
        let cfg: StakingCfg = toml::from_str(cfg_toml).expect("must parse staking config");

        assert_eq!(
            cfg,
            StakingCfg::new(Network::Signet)
                .with_denomination(Denomination::Baby)
                .with_multi_staking(true)
        );

        let minimal: StakingCfg =
            toml::from_str(r#"network = "bitcoin""#).expect("features must be optional");
        assert_eq!(minimal, StakingCfg::default());
    }
}
