use std::path::PathBuf;

use clap::{Parser, Subcommand};
use staking_primitives::types::{BitcoinBlockHeight, BlockCount, ParamsVersionNumber};

#[derive(Parser, Debug)]
#[command(
    name = "staking-cli",
    about = "Inspect staking parameters, validate stake inputs and classify delegations",
    version
)]
pub(crate) struct Cli {
    #[arg(
        long,
        global = true,
        env = "STAKING_CONFIG",
        help = "the path to the staking config file (TOML)"
    )]
    pub(crate) config: Option<PathBuf>,

    #[command(subcommand)]
    pub(crate) command: Commands,
}

#[derive(Subcommand, Debug, Clone)]
pub(crate) enum Commands {
    SelectVersion(SelectVersionArgs),

    Window(WindowArgs),

    ValidateStake(ValidateStakeArgs),

    ValidateUnbond(ValidateUnbondArgs),

    ValidateLockTime(ValidateLockTimeArgs),

    Classify(ClassifyArgs),
}

#[derive(Parser, Debug, Clone)]
pub(crate) struct ParamsArgs {
    #[arg(
        long,
        env = "STAKING_PARAMS",
        help = "the path to the parameter versions as served by the staking API (JSON)"
    )]
    pub(crate) params: PathBuf,
}

#[derive(Parser, Debug, Clone)]
#[command(about = "Print the parameter version governing a height or with a given number")]
pub(crate) struct SelectVersionArgs {
    #[clap(flatten)]
    pub(crate) params: ParamsArgs,

    #[arg(
        long,
        required_unless_present = "version",
        conflicts_with = "version",
        help = "the bitcoin height to select the version for"
    )]
    pub(crate) height: Option<BitcoinBlockHeight>,

    #[arg(long, help = "the version number to look up")]
    pub(crate) version: Option<ParamsVersionNumber>,
}

#[derive(Parser, Debug, Clone)]
#[command(about = "Print the governing and next parameter version at a height")]
pub(crate) struct WindowArgs {
    #[clap(flatten)]
    pub(crate) params: ParamsArgs,

    #[arg(long, help = "the current bitcoin height")]
    pub(crate) height: BitcoinBlockHeight,
}

#[derive(Parser, Debug, Clone)]
#[command(about = "Validate a stake as entered by the user")]
pub(crate) struct ValidateStakeArgs {
    #[clap(flatten)]
    pub(crate) params: ParamsArgs,

    #[arg(long, help = "the current bitcoin height")]
    pub(crate) height: BitcoinBlockHeight,

    #[arg(
        long,
        allow_hyphen_values = true,
        help = "the stake amount in the configured denomination"
    )]
    pub(crate) amount: String,

    #[arg(long, help = "the staking timelock in blocks")]
    pub(crate) lock_time: Option<BlockCount>,

    #[arg(long, help = "the spendable balance in satoshis")]
    pub(crate) spendable: Option<u64>,

    #[arg(
        long,
        requires = "spendable",
        help = "the network fee rate in sat/vB"
    )]
    pub(crate) fee_rate: Option<u64>,

    #[arg(
        long,
        default_value_t = 250,
        help = "the estimated virtual size of the staking transaction"
    )]
    pub(crate) vsize: u64,
}

#[derive(Parser, Debug, Clone)]
#[command(about = "Validate an unbonding amount against the available balance")]
pub(crate) struct ValidateUnbondArgs {
    #[arg(long, help = "the amount to unbond in smallest units")]
    pub(crate) amount: u64,

    #[arg(long, help = "the available balance in smallest units")]
    pub(crate) available: u64,
}

#[derive(Parser, Debug, Clone)]
#[command(about = "Validate a staking timelock")]
pub(crate) struct ValidateLockTimeArgs {
    #[clap(flatten)]
    pub(crate) params: ParamsArgs,

    #[arg(long, help = "the current bitcoin height")]
    pub(crate) height: BitcoinBlockHeight,

    #[arg(long, help = "the requested timelock in blocks")]
    pub(crate) blocks: BlockCount,
}

#[derive(Parser, Debug, Clone)]
#[command(about = "Classify delegations into lifecycle states and available actions")]
pub(crate) struct ClassifyArgs {
    #[clap(flatten)]
    pub(crate) params: ParamsArgs,

    #[arg(long, help = "the current bitcoin height")]
    pub(crate) height: BitcoinBlockHeight,

    #[arg(long, help = "the path to the delegations as served by the staking API (JSON)")]
    pub(crate) delegations: PathBuf,

    #[arg(long, help = "the path to the locally broadcast markers (JSON)")]
    pub(crate) markers: Option<PathBuf>,

    #[arg(long, help = "the path to the locally created pending delegations (JSON)")]
    pub(crate) pending: Option<PathBuf>,
}
