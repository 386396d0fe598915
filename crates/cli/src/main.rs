mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use prcs_project::{SystemRunner, DEFAULT_PROGRAM};
use tracing_subscriber::EnvFilter;

/// Output format for CLI responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    Text,
    Json,
}

/// Inspect PRCS projects and version descriptors.
#[derive(Parser)]
#[command(
    name = "prcs-info",
    version,
    about = "Inspect PRCS projects and version descriptors"
)]
struct Cli {
    /// Output format (text or json)
    #[arg(long, global = true, default_value = "text", value_enum)]
    output: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    quiet: bool,

    /// Log debug detail to stderr (RUST_LOG takes precedence)
    #[arg(long, global = true)]
    verbose: bool,

    /// prcs program to run
    #[arg(long, global = true, env = "PRCS_COMMAND", default_value = DEFAULT_PROGRAM)]
    prcs: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List every version of a project
    Versions {
        /// Project name
        project: String,
    },

    /// Check out a version's descriptor and show its contents
    Descriptor {
        /// Project name
        project: String,
        /// Version to read (latest when omitted)
        #[arg(short = 'r', long)]
        revision: Option<String>,
    },

    /// Show the contents of a descriptor file on disk, without running prcs
    Inspect {
        /// Path to the .prj descriptor file
        file: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let runner = SystemRunner::new(cli.prcs);
    match cli.command {
        Commands::Versions { project } => {
            commands::cmd_versions(&project, runner, cli.output, cli.quiet);
        }
        Commands::Descriptor { project, revision } => {
            commands::cmd_descriptor(
                &project,
                revision.as_deref(),
                runner,
                cli.output,
                cli.quiet,
            );
        }
        Commands::Inspect { file } => {
            commands::cmd_inspect(&file, cli.output, cli.quiet);
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}
