use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Deserialize;
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    version,
    about = "srim - run SRIM stopping/range and TRIM simulations through Wine or a container.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run one SRIM simulation from a prepared input deck.
    Run(RunArgs),
    /// Inspect the executor configuration.
    Config(ConfigArgs),
}

/// Arguments for the `run` subcommand.
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Simulation kind: 'sr' (stopping and range tables) or 'trim'.
    #[arg(required = true, value_name = "KIND")]
    pub kind: String,

    /// Prepared input deck (SR.IN or TRIM.IN contents).
    #[arg(short, long, required = true, value_name = "PATH")]
    pub input: PathBuf,

    /// Directory receiving the inputs and recovered outputs.
    /// A temporary directory is created when omitted.
    #[arg(short = 'd', long, value_name = "DIR")]
    pub io_dir: Option<PathBuf>,

    #[command(flatten)]
    pub backend: BackendArgs,
}

/// Options selecting and parameterizing the execution backend.
#[derive(Args, Debug, Default, Clone)]
pub struct BackendArgs {
    /// Path to the executor configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Override the backend selected in the config file.
    #[arg(short, long, value_enum, value_name = "BACKEND")]
    pub backend: Option<BackendKind>,

    /// Override the SRIM installation directory of the native backend.
    #[arg(long, value_name = "PATH")]
    pub srim_dir: Option<PathBuf>,

    /// Override the container image of the docker backend.
    #[arg(long, value_name = "IMAGE")]
    pub image: Option<String>,

    /// Override the container runtime binary of the docker backend (e.g. podman).
    #[arg(long, value_name = "NAME")]
    pub runtime: Option<String>,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S native.compat-layer=wine64
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", num_args(0..))]
    pub set_values: Vec<String>,
}

#[derive(ValueEnum, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum BackendKind {
    /// Run SRIM with Wine on this machine.
    #[default]
    Native,
    /// Run SRIM inside a container image.
    Docker,
}

/// Arguments for the `config` subcommand.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show the path of the default configuration file.
    Path,
    /// Print the backend configuration after merging file, overrides and defaults.
    Show(BackendArgs),
}
