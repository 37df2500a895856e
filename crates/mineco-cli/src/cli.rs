use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    version,
    about = "MinECO CLI - Minimum effective contact order pathways between protein conformations.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress log output on the terminal
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Also write logs to this file, with at least DEBUG detail and span timings
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compute the minimum-ECO pathway between two structures.
    Pair(PairArgs),
    /// Walk the models of a multi-model PDB file and summarize scoring frame pairs.
    Trajectory(TrajectoryArgs),
    /// Run the trajectory analysis for every system directory under a root.
    Batch(BatchArgs),
}

/// Pathway parameters shared by every command.
#[derive(Args, Debug, Default, Clone)]
pub struct ConfigArgs {
    /// Path to a configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Residue representative position: 'CA', 'CB' or 'centroid'.
    #[arg(short, long, value_name = "NAME")]
    pub granularity: Option<String>,

    /// Maximum distance in Å between two residues for a contact.
    #[arg(short = 'd', long, value_name = "FLOAT")]
    pub distance_threshold: Option<f64>,

    /// Same-chain residues at most this far apart in sequence never form a distance contact.
    #[arg(long, value_name = "INT")]
    pub long_interaction_threshold: Option<usize>,

    /// Unique contacts whose distance changes by less than this (Å) are ignored.
    #[arg(short = 't', long, value_name = "FLOAT")]
    pub distance_change_tol: Option<f64>,

    /// Neighbourhood radius for clustering contacts in residue-index space.
    #[arg(short, long, value_name = "FLOAT")]
    pub eps: Option<f64>,

    /// Minimum neighbourhood size for a core contact.
    #[arg(long, value_name = "INT")]
    pub min_samples: Option<usize>,

    /// Residue-index distance used for clustering: 'chebyshev' or 'euclidean'.
    #[arg(short, long, value_name = "NAME")]
    pub metric: Option<String>,

    /// Give up on a structure pair after this many seconds.
    #[arg(long, value_name = "SECS")]
    pub pair_timeout: Option<f64>,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S clustering.eps=2
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", num_args(0..))]
    pub set_values: Vec<String>,
}

/// Arguments for the `pair` subcommand.
#[derive(Args, Debug)]
pub struct PairArgs {
    /// First structure (PDB).
    #[arg(required = true, value_name = "A")]
    pub first: PathBuf,

    /// Second structure (PDB).
    #[arg(required = true, value_name = "B")]
    pub second: PathBuf,

    /// Form the pathway from the contact-rich structure towards the other one.
    #[arg(short, long)]
    pub reverse: bool,

    /// Use the automatic direction even if the config file sets 'reverse'.
    #[arg(long, conflicts_with = "reverse")]
    pub no_reverse: bool,

    /// Path for the pathway log. Defaults to 'eco_<A>_<B>.log'.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    #[command(flatten)]
    pub config: ConfigArgs,
}

impl PairArgs {
    /// The direction chosen on the command line, if any.
    pub fn reverse_override(&self) -> Option<bool> {
        match (self.reverse, self.no_reverse) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        }
    }
}

/// Arguments for the `trajectory` subcommand.
#[derive(Args, Debug)]
pub struct TrajectoryArgs {
    /// Multi-model PDB file with one model per pathway frame.
    #[arg(required = true, value_name = "PATHWAY")]
    pub input: PathBuf,

    /// Path for the summary CSV. Defaults to 'anm_eco_<stem>.csv' next to the input.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Directory for the pathway log of every evaluated frame pair.
    #[arg(long, value_name = "DIR")]
    pub log_dir: Option<PathBuf>,

    #[command(flatten)]
    pub config: ConfigArgs,
}

/// Arguments for the `batch` subcommand.
#[derive(Args, Debug)]
pub struct BatchArgs {
    /// Directory whose sub-directories each hold 'step5/pathway.pdb'.
    #[arg(required = true, value_name = "ROOT")]
    pub root: PathBuf,

    /// Directory for per-pair pathway logs, one sub-directory per system.
    #[arg(long, value_name = "DIR")]
    pub log_dir: Option<PathBuf>,

    #[command(flatten)]
    pub config: ConfigArgs,
}
