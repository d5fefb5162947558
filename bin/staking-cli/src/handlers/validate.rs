use anyhow::{Context, Result};
use bitcoin::{Amount, FeeRate};
use serde::Serialize;
use staking_params::ProtocolParameterVersion;
use staking_primitives::{
    amount::{parse_units, Denomination},
    config::StakingCfg,
    types::{blocks_to_minutes, BlockCount},
};
use staking_validation::{
    effective_lock_time, staking_fee, validate_lock_time, validate_spendable,
    validate_stake_input, validate_unbond_amount, validate_unbonding_fee, ValidationResult,
};
use tracing::info;

use crate::{
    cli::{ValidateLockTimeArgs, ValidateStakeArgs, ValidateUnbondArgs},
    input::{load_versions, print_json},
};

#[derive(Debug, Serialize)]
struct Check {
    #[serde(flatten)]
    result: ValidationResult,
    message: String,
}

impl Check {
    fn new(result: ValidationResult, denom: Denomination) -> Self {
        Self {
            message: result.describe(denom),
            result,
        }
    }
}

#[derive(Debug, Serialize)]
struct LockTimeCheck {
    blocks: BlockCount,
    valid: bool,
    effective: Option<BlockCount>,
    estimated_minutes: Option<u64>,
}

impl LockTimeCheck {
    fn new(blocks: BlockCount, version: &ProtocolParameterVersion) -> Self {
        let effective = effective_lock_time(blocks, version);

        Self {
            blocks,
            valid: validate_lock_time(blocks, version),
            effective,
            estimated_minutes: effective.map(blocks_to_minutes),
        }
    }
}

#[derive(Debug, Serialize)]
struct StakeReport {
    version: u32,
    amount: Check,
    #[serde(skip_serializing_if = "Option::is_none")]
    unbonding_fee: Option<Check>,
    #[serde(skip_serializing_if = "Option::is_none")]
    balance: Option<Check>,
    #[serde(skip_serializing_if = "Option::is_none")]
    lock_time: Option<LockTimeCheck>,
    is_valid: bool,
}

fn stake_report(
    args: &ValidateStakeArgs,
    version: &ProtocolParameterVersion,
    denom: Denomination,
) -> Result<StakeReport> {
    let amount = Check::new(validate_stake_input(&args.amount, denom, version), denom);

    let stake = amount
        .result
        .is_valid()
        .then(|| parse_units(&args.amount, denom).ok())
        .flatten()
        .map(Amount::from_sat);

    let unbonding_fee =
        stake.map(|stake| Check::new(validate_unbonding_fee(stake, version), denom));

    let balance = match (stake, args.spendable) {
        (Some(stake), Some(spendable)) => {
            let fee = match args.fee_rate {
                Some(rate) => {
                    let rate = FeeRate::from_sat_per_vb(rate).context("fee rate out of range")?;
                    staking_fee(rate, args.vsize).context("fee out of range")?
                }
                None => Amount::ZERO,
            };

            let result = validate_spendable(stake, fee, Amount::from_sat(spendable));
            Some(Check::new(result, denom))
        }
        _ => None,
    };

    let lock_time = args
        .lock_time
        .map(|blocks| LockTimeCheck::new(blocks, version));

    let is_valid = amount.result.is_valid()
        && unbonding_fee.as_ref().map_or(true, |c| c.result.is_valid())
        && balance.as_ref().map_or(true, |c| c.result.is_valid())
        && lock_time.as_ref().map_or(true, |c| c.valid);

    Ok(StakeReport {
        version: version.version,
        amount,
        unbonding_fee,
        balance,
        lock_time,
        is_valid,
    })
}

pub(crate) fn handle_validate_stake(args: ValidateStakeArgs, cfg: &StakingCfg) -> Result<()> {
    let versions = load_versions(&args.params.params)?;
    let version = versions.select(args.height)?;

    let report = stake_report(&args, version, cfg.denomination)?;
    info!(is_valid = report.is_valid, version = report.version, "validated stake");

    print_json(&report)
}

pub(crate) fn handle_validate_unbond(args: ValidateUnbondArgs, cfg: &StakingCfg) -> Result<()> {
    let result = validate_unbond_amount(args.amount, args.available);

    print_json(&Check::new(result, cfg.denomination))
}

pub(crate) fn handle_validate_lock_time(args: ValidateLockTimeArgs) -> Result<()> {
    let versions = load_versions(&args.params.params)?;
    let version = versions.select(args.height)?;

    print_json(&LockTimeCheck::new(args.blocks, version))
}
