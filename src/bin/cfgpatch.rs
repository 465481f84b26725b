//! cfgpatch - Configuration patch CLI tool
//!
//! A command line tool for diffing configuration snapshots and synthesizing
//! minimal update requests from them. Snapshots may be JSON or YAML.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use config_patch::diff::to_json_patch;
use config_patch::value::{self, Map, Value};
use config_patch::{diff, find_changes, synthesize, PatchOptions};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "cfgpatch",
    version,
    about = "Diff configuration snapshots and build minimal update requests"
)]
struct Cli {
    /// Log debug events to stderr
    #[arg(short, long, global = true, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

/// The last-applied and desired snapshots.
#[derive(clap::Args, Debug)]
struct Snapshots {
    /// Last-applied snapshot (JSON or YAML)
    #[arg(long)]
    old: PathBuf,

    /// Desired snapshot (JSON or YAML)
    #[arg(long)]
    new: PathBuf,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the operations that turn the old snapshot into the new one
    Diff {
        #[command(flatten)]
        snapshots: Snapshots,
    },
    /// Print every changed path, one per line
    Changes {
        #[command(flatten)]
        snapshots: Snapshots,
    },
    /// Print the minimal update request
    Patch {
        #[command(flatten)]
        snapshots: Snapshots,

        /// Options document (JSON or YAML)
        #[arg(long)]
        options: Option<PathBuf>,

        /// Last path segment whose state value is not re-injected
        #[arg(long = "ignore-suffix", value_name = "SEGMENT")]
        ignore_suffix: Vec<String>,

        /// Path segment below which state values are not re-injected
        #[arg(long = "ignore-prefix", value_name = "SEGMENT")]
        ignore_prefix: Vec<String>,

        /// Last path segment that is re-injected despite the ignore rules
        #[arg(long = "include-suffix", value_name = "SEGMENT")]
        include_suffix: Vec<String>,

        /// Top-level field that is always sent
        #[arg(long = "force", value_name = "FIELD")]
        force: Vec<String>,

        #[arg(long, value_enum, default_value_t = Format::Json)]
        format: Format,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum Format {
    Json,
    Yaml,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .compact()
        .with_target(false)
        .with_writer(io::stderr)
        .with_env_filter(filter)
        .init();
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let mut output = io::stdout().lock();

    match cli.command {
        Command::Diff { snapshots } => {
            let (old, new) = snapshots.load()?;
            let ops = diff(&old, &new);
            let patch = to_json_patch(&ops)?;
            writeln!(output, "{}", serde_json::to_string_pretty(&patch)?)?;
        }
        Command::Changes { snapshots } => {
            let (old, new) = snapshots.load()?;
            for path in find_changes(&old, &new) {
                writeln!(output, "{}", path)?;
            }
        }
        Command::Patch {
            snapshots,
            options,
            ignore_suffix,
            ignore_prefix,
            include_suffix,
            force,
            format,
        } => {
            let mut merged = match &options {
                Some(file) => PatchOptions::from_yaml(&read(file)?)
                    .map_err(|e| format!("Failed to parse options {:?}: {}", file, e))?,
                None => PatchOptions::new(),
            };
            merged.extend(
                PatchOptions::new()
                    .with_ignore_in_state_suffix(ignore_suffix)
                    .with_ignore_in_state_prefix(ignore_prefix)
                    .with_include_in_state_suffix(include_suffix)
                    .with_force_update_attr(force),
            );
            debug!(options = ?merged, "patch options");

            let (old, new) = snapshots.load()?;
            let zero = Value::Map(Map::new());
            let patch = synthesize(&old, &new, &zero, &merged)?.unwrap_or(zero);
            let text = match format {
                Format::Json => value::to_json(&patch)?,
                Format::Yaml => value::to_yaml(&patch)?,
            };
            writeln!(output, "{}", text.trim_end())?;
        }
    }

    Ok(())
}

impl Snapshots {
    fn load(&self) -> Result<(Value, Value), Box<dyn std::error::Error>> {
        Ok((parse(&self.old)?, parse(&self.new)?))
    }
}

fn read(file: &Path) -> Result<String, Box<dyn std::error::Error>> {
    Ok(fs::read_to_string(file).map_err(|e| format!("Failed to read file {:?}: {}", file, e))?)
}

fn parse(file: &Path) -> Result<Value, Box<dyn std::error::Error>> {
    let content = read(file)?;
    Ok(value::from_yaml(&content).map_err(|e| format!("Failed to parse {:?}: {}", file, e))?)
}
