//! build-manifest - integrity manifest generator
//!
//! Run with no arguments inside a release tree to (re)write `manifest.json`.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use manifest_builder::commands;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "build-manifest")]
#[command(author, version, about = "Build a SHA-256 integrity manifest for a file tree")]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    build: BuildArgs,

    /// Log every hashed and skipped file
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Hash the tree and write the manifest (default)
    Build(BuildArgs),

    /// Summarize an existing manifest
    Show {
        /// Directory containing the manifest (defaults to the current directory)
        #[arg(short, long)]
        root: Option<PathBuf>,

        /// Manifest file name
        #[arg(short, long)]
        output: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the effective configuration as TOML
    ShowConfig {
        /// TOML config file
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

#[derive(Args, Clone, Default)]
struct BuildArgs {
    /// Directory to scan (defaults to the current directory)
    #[arg(short, long)]
    root: Option<PathBuf>,

    /// Manifest file name, relative to the root
    #[arg(short, long)]
    output: Option<String>,

    /// TOML config file overriding the default blacklist
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Write minified JSON instead of 2-space indented
    #[arg(long)]
    compact: bool,

    /// Excluded directory matching: segment or legacy-prefix
    #[arg(long, value_name = "MODE")]
    dir_match: Option<String>,

    /// Shorthand for --dir-match legacy-prefix
    #[arg(long, conflicts_with = "dir_match")]
    legacy_prefix: bool,

    /// Print the manifest instead of writing it
    #[arg(long)]
    dry_run: bool,
}

impl From<BuildArgs> for commands::BuildOptions {
    fn from(args: BuildArgs) -> Self {
        commands::BuildOptions {
            root: args.root,
            output: args.output,
            config: args.config,
            compact: args.compact,
            dir_match: args.dir_match,
            legacy_prefix: args.legacy_prefix,
            dry_run: args.dry_run,
        }
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        None => {
            commands::build(&cli.build.into())?;
        }
        Some(Commands::Build(args)) => {
            commands::build(&args.into())?;
        }
        Some(Commands::Show { root, output, json }) => {
            commands::show(root.as_deref(), output.as_deref(), json)?;
        }
        Some(Commands::ShowConfig { config }) => {
            commands::show_config(config.as_deref())?;
        }
    }

    Ok(())
}
