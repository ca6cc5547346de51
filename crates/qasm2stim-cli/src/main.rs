//! qasm2stim Command-Line Interface
//!
//! Converts directories of OpenQASM 2 Clifford circuits into Stim circuits.
//!
//! ```text
//! qasm2stim convert -d circuits/          # every .qasm in circuits/
//! qasm2stim convert -i bell.qasm --line-ending crlf
//! qasm2stim gates
//! ```

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use console::style;
use qasm2stim_batch::Config;
use qasm2stim_core::LineEnding;
use tracing_subscriber::EnvFilter;

mod commands;

use commands::{convert, gates, version};

/// qasm2stim - OpenQASM 2 to Stim circuit translator
#[derive(Parser)]
#[command(name = "qasm2stim")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// YAML configuration file
    #[arg(short, long, global = true, env = "QASM2STIM_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Translate .qasm circuits into .stim circuits
    Convert {
        /// Directory whose .qasm files are converted
        #[arg(short, long, required_unless_present = "input", conflicts_with = "input")]
        dir: Option<PathBuf>,

        /// Single .qasm file to convert
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Line separator of the written files (lf, crlf)
        #[arg(long)]
        line_ending: Option<LineEnding>,

        /// Skip files that fail to convert instead of stopping
        #[arg(short, long)]
        keep_going: bool,

        /// Read inputs into memory instead of memory-mapping them
        #[arg(long)]
        no_mmap: bool,

        /// Hide the progress bar and the summary
        #[arg(short, long)]
        quiet: bool,
    },

    /// Show the gate translation table
    Gates,

    /// Show version information
    Version,
}

/// An explicit `-v` wins over a configured level; without either, `warn`.
fn log_filter(verbose: u8, configured: Option<&str>) -> &str {
    match (verbose, configured) {
        (0, Some(level)) => level,
        (0, None) => "warn",
        (1, _) => "info",
        (2, _) => "debug",
        _ => "trace",
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match Config::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{} {}", style("Error:").red().bold(), e);
            std::process::exit(1);
        }
    };

    // Setup logging
    let filter = log_filter(cli.verbose, config.logging.level.as_deref());

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    // Execute command
    let result = match cli.command {
        Commands::Convert {
            dir,
            input,
            line_ending,
            keep_going,
            no_mmap,
            quiet,
        } => {
            let overrides = convert::Overrides {
                line_ending,
                keep_going,
                no_mmap,
            };
            match (dir, input) {
                (Some(dir), _) => convert::execute_dir(config, &dir, &overrides, quiet),
                (None, Some(input)) => convert::execute_file(config, &input, &overrides, quiet),
                (None, None) => Err(anyhow::anyhow!("Either --dir or --input is required")),
            }
        }

        Commands::Gates => {
            gates::execute();
            Ok(())
        }

        Commands::Version => {
            version::execute();
            Ok(())
        }
    };

    // Handle errors
    if let Err(e) = result {
        eprintln!("{} {:#}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_filter_defaults_to_warn() {
        assert_eq!(log_filter(0, None), "warn");
    }

    #[test]
    fn test_configured_level_without_flag() {
        assert_eq!(log_filter(0, Some("debug")), "debug");
    }

    #[test]
    fn test_verbose_flag_beats_configured_level() {
        assert_eq!(log_filter(1, Some("error")), "info");
        assert_eq!(log_filter(2, Some("error")), "debug");
        assert_eq!(log_filter(5, Some("warn")), "trace");
    }
}
