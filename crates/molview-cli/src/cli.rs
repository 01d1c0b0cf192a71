use clap::{Args, Parser, Subcommand};
use molview::core::models::policy::{AtomUpdatePolicy, DegenerateBondPolicy};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    author = "MolView Developers",
    version,
    about = "MolView CLI - Inspect molecules and compute back-to-front draw orders for rendering.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Pose a molecule and print the order its atoms and bonds should be drawn in.
    Order(OrderArgs),
    /// Print counts, capacities and header data of a molecule file.
    Info(InfoArgs),
}

/// Arguments for the `order` subcommand.
#[derive(Args, Debug)]
pub struct OrderArgs {
    /// Path to the input molecule (MDL molfile or SD file).
    #[arg(required = true, value_name = "INPUT")]
    pub input: PathBuf,

    /// Path to a view configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Rotate before ordering, e.g. `-r x:90 -r z:-45`. Replaces the rotations
    /// of the config file. Applied in the order given.
    #[arg(short = 'r', long = "rotate", value_name = "AXIS:DEG")]
    pub rotations: Vec<String>,

    /// Override how bonds between atoms that coincide on screen are handled.
    #[arg(long, value_name = "POLICY")]
    pub degenerate_bonds: Option<DegenerateBondPolicy>,

    /// Override whether moving an atom re-derives its bonds.
    #[arg(long, value_name = "POLICY")]
    pub atom_updates: Option<AtomUpdatePolicy>,
}

/// Arguments for the `info` subcommand.
#[derive(Args, Debug)]
pub struct InfoArgs {
    /// Path to the input molecule (MDL molfile or SD file).
    #[arg(required = true, value_name = "INPUT")]
    pub input: PathBuf,
}
