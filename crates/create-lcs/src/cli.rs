//! CLI argument parsing with clap

use camino::Utf8PathBuf;
use clap::{Args, Parser, Subcommand};

/// create-lcs - scaffold a new lambda-container-service project
///
/// Runs the `new` flow when no subcommand is given.
#[derive(Parser, Debug)]
#[command(name = "create-lcs")]
#[command(author, version, about, long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress log output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,

    #[command(flatten)]
    pub new: NewArgs,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a new project from a template (default)
    New(NewArgs),

    /// Inspect the prompts a configuration schema produces
    Schema(SchemaArgs),
}

#[derive(Args, Debug, Clone, Default)]
pub struct NewArgs {
    /// Report every step without touching the file system
    #[arg(long)]
    pub dry_run: bool,

    /// Accept every default without prompting
    #[arg(short, long)]
    pub yes: bool,

    /// Template catalog YAML replacing the built-in list
    #[arg(long, value_name = "FILE")]
    pub templates: Option<Utf8PathBuf>,

    /// Existing parent directory for the template clone; each run creates
    /// and removes its own subdirectory inside it
    #[arg(long, value_name = "DIR")]
    pub work_dir: Option<Utf8PathBuf>,
}

#[derive(Args, Debug)]
pub struct SchemaArgs {
    /// Configuration schema (.lcsconf.schema.json)
    pub file: Utf8PathBuf,

    /// Flat JSON object of dotted path to raw answer; prints the resulting configuration
    #[arg(long, value_name = "FILE")]
    pub answers: Option<Utf8PathBuf>,
}
