use anyhow::Result;
use serde::Serialize;
use staking_params::{ParamsVersions, VersionWindow};
use staking_primitives::types::BitcoinBlockHeight;
use tracing::info;

use crate::{
    cli::{SelectVersionArgs, WindowArgs},
    input::{load_versions, print_json},
};

pub(crate) fn handle_select_version(args: SelectVersionArgs) -> Result<()> {
    let versions = load_versions(&args.params.params)?;

    let selected = match (args.version, args.height) {
        (Some(number), _) => versions.by_number(number)?,
        (None, Some(height)) => versions.select(height)?,
        (None, None) => anyhow::bail!("either --height or --version is required"),
    };

    info!(version = selected.version, "selected parameter version");

    print_json(selected)
}

#[derive(Debug, Serialize)]
struct WindowReport<'a> {
    height: BitcoinBlockHeight,
    is_staking_open: bool,
    #[serde(flatten)]
    window: Option<VersionWindow<'a>>,
}

fn window_report(
    versions: &ParamsVersions,
    height: BitcoinBlockHeight,
) -> Result<WindowReport<'_>> {
    let is_staking_open = versions.is_staking_open(height);
    let window = if is_staking_open {
        Some(versions.window(height)?)
    } else {
        None
    };

    Ok(WindowReport {
        height,
        is_staking_open,
        window,
    })
}

pub(crate) fn handle_window(args: WindowArgs) -> Result<()> {
    let versions = load_versions(&args.params.params)?;
    let report = window_report(&versions, args.height)?;

    print_json(&report)
}

#[cfg(test)]
mod tests {
    use staking_test_utils::fixtures::{params_version, params_versions};

    use super::*;

    #[test]
    fn window_before_genesis_reports_closed() {
        let versions =
            ParamsVersions::new(vec![params_version(0, 100, 10_000, 1_000_000)]).unwrap();

        let report = window_report(&versions, 50).unwrap();
        assert!(!report.is_staking_open);
        assert!(report.window.is_none());

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["is_staking_open"], false);
        assert!(json.get("current").is_none());
    }

    #[test]
    fn window_report_flattens_the_window() {
        let versions = params_versions();
        let report = window_report(&versions, 495).unwrap();

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["is_staking_open"], true);
        assert_eq!(json["current"]["version"], 0);
        assert_eq!(json["next"]["version"], 1);
        assert_eq!(json["is_approaching_next"], true);
    }
}
