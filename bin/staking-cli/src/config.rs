use std::{fs, path::Path};

use anyhow::{anyhow, Context};
use staking_primitives::config::StakingCfg;
use tracing::debug;

/// Loads the staking config from `path`, or the default config if no path is given.
pub(crate) fn load(path: Option<&Path>) -> anyhow::Result<StakingCfg> {
    let Some(path) = path else {
        debug!("no config file given, using defaults");
        return Ok(StakingCfg::default());
    };

    from_path(path)
}

pub(crate) fn from_path(path: impl AsRef<Path>) -> anyhow::Result<StakingCfg> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;

    let cfg: StakingCfg = toml::from_str(&contents)
        .map_err(|e| anyhow!(format!("Failed to parse config file: {}", e)))?;

    debug!(?cfg, "loaded staking config");

    Ok(cfg)
}
