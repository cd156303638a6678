use clap::{Args, Parser, Subcommand};
use molcage::core::forcefield::params::ForcefieldKind;
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
    about = "cage - assemble polyhedral molecular cages from linker fragments \
             and relax them with a discrete conformational scan.",
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
    /// Assemble a cage structure from a fragment and a polyhedral skeleton.
    Build(BuildArgs),
    /// Inspect the fragments of a linker library file.
    Library(LibraryArgs),
}

/// Arguments for the `build` subcommand.
#[derive(Args, Debug)]
pub struct BuildArgs {
    /// Path to the linker library file.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub library: PathBuf,

    /// Zero-based index of the library fragment to place on every edge.
    #[arg(short, long, default_value_t = 0, value_name = "INT")]
    pub fragment: usize,

    /// Built-in skeleton name: triangle, tetrahedron, cube, or octahedron.
    #[arg(short, long, value_name = "NAME", conflicts_with = "polyhedron_file")]
    pub polyhedron: Option<String>,

    /// Path to a TOML skeleton definition, instead of a built-in name.
    #[arg(long, value_name = "PATH")]
    pub polyhedron_file: Option<PathBuf>,

    /// Path for the output structure file (.xyz or .pdb, by extension).
    #[arg(short, long, required = true, value_name = "PATH")]
    pub output: PathBuf,

    /// Path to the CSV force-field parameter table.
    #[arg(long, required = true, value_name = "PATH")]
    pub forcefield: PathBuf,

    /// Which parameter set of the table to use ('uff' or 'dre').
    #[arg(long, default_value = "uff", value_name = "NAME")]
    pub potential: ForcefieldKind,

    /// Fix the skeleton edge length instead of deriving it from the fragment.
    #[arg(long, value_name = "FLOAT")]
    pub scale: Option<f64>,

    /// Clearance added at each edge end when the edge length is derived.
    #[arg(long, default_value_t = 1.5, value_name = "FLOAT")]
    pub bond_length: f64,

    /// Element label to place at every skeleton vertex.
    #[arg(long, value_name = "LABEL")]
    pub metal: Option<String>,

    /// Run the rotational relaxation scan after assembly.
    #[arg(long)]
    pub relax: bool,

    /// Scan step in degrees (with --relax).
    #[arg(long, default_value_t = 15.0, value_name = "DEG")]
    pub increment: f64,

    /// Exclusive scan limit in degrees (with --relax).
    #[arg(long, default_value_t = 180.0, value_name = "DEG")]
    pub scan_limit: f64,
}

/// Arguments for the `library` subcommand.
#[derive(Args, Debug)]
pub struct LibraryArgs {
    /// Path to the linker library file.
    #[arg(required = true, value_name = "PATH")]
    pub path: PathBuf,
}
