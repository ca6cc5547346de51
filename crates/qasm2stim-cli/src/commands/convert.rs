//! Convert command implementation.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use qasm2stim_batch::{BatchConverter, BatchReport, Config, ErrorPolicy};
use qasm2stim_core::LineEnding;
use tracing::debug;

/// Command-line flags that take precedence over the loaded configuration.
#[derive(Debug, Default)]
pub struct Overrides {
    pub line_ending: Option<LineEnding>,
    pub keep_going: bool,
    pub no_mmap: bool,
}

impl Overrides {
    pub fn apply(&self, config: &mut Config) {
        if let Some(line_ending) = self.line_ending {
            config.translate.line_ending = line_ending;
        }
        if self.keep_going {
            config.batch.error_policy = ErrorPolicy::Isolate;
        }
        if self.no_mmap {
            config.batch.memory_map = false;
        }
    }
}

/// Convert every matching file in `dir`.
pub fn execute_dir(mut config: Config, dir: &Path, overrides: &Overrides, quiet: bool) -> Result<()> {
    overrides.apply(&mut config);
    debug!(?config, "Effective configuration");
    let mut converter = BatchConverter::from_config(&config);

    let paths = converter
        .discover(dir)
        .with_context(|| format!("Failed to scan {}", dir.display()))?;

    if !quiet {
        println!(
            "{} Converting {} file(s) in {} ({}, {})",
            style("→").cyan().bold(),
            paths.len(),
            style(dir.display()).green(),
            style(config.translate.line_ending).yellow(),
            style(config.batch.error_policy).yellow()
        );
    }

    run(&mut converter, &paths, quiet)
}

/// Convert a single file.
pub fn execute_file(
    mut config: Config,
    input: &Path,
    overrides: &Overrides,
    quiet: bool,
) -> Result<()> {
    if !input.is_file() {
        anyhow::bail!("File not found: {}", input.display());
    }
    overrides.apply(&mut config);
    debug!(?config, "Effective configuration");
    let mut converter = BatchConverter::from_config(&config);

    if !quiet {
        println!(
            "{} Converting {}",
            style("→").cyan().bold(),
            style(input.display()).green()
        );
    }

    run(&mut converter, &[input.to_path_buf()], quiet)
}

fn run(converter: &mut BatchConverter<'_>, paths: &[PathBuf], quiet: bool) -> Result<()> {
    let progress = if quiet || paths.len() < 2 {
        ProgressBar::hidden()
    } else {
        let bar = ProgressBar::new(paths.len() as u64);
        bar.set_style(
            ProgressStyle::with_template("{spinner:.cyan} [{bar:30.cyan/blue}] {pos}/{len} {msg}")?
                .progress_chars("=> "),
        );
        bar
    };

    // Aborting errors are reported once, by the caller.
    let isolate = converter.config().error_policy == ErrorPolicy::Isolate;
    let started = Instant::now();
    let outcome = converter.convert_paths(paths, |path, result| {
        let name = path.file_name().unwrap_or(path.as_os_str()).to_string_lossy();
        if let (true, Err(e)) = (isolate, result) {
            progress.suspend(|| {
                eprintln!("{} {}", style("✗").red().bold(), e.chain());
            });
        }
        progress.set_message(name.into_owned());
        progress.inc(1);
    });
    progress.finish_and_clear();

    let report = outcome?;
    if !quiet {
        print_summary(&report, started.elapsed());
    }

    if !report.is_success() {
        anyhow::bail!(
            "{} of {} file(s) failed to convert",
            report.failures.len(),
            paths.len()
        );
    }
    Ok(())
}

fn print_summary(report: &BatchReport, elapsed: Duration) {
    println!(
        "{} Converted {} file(s) in {:.2} ms",
        style("✓").green().bold(),
        report.converted.len(),
        elapsed.as_secs_f64() * 1000.0
    );
    println!(
        "  Input: {}, output: {}",
        format_bytes(report.total_input_bytes()),
        format_bytes(report.total_output_bytes())
    );
    if let [file] = report.converted.as_slice() {
        println!(
            "  Qubits: {}, operations: {}, instructions: {}",
            file.num_qubits
                .map_or_else(|| "-".to_string(), |n| n.to_string()),
            file.num_operations,
            file.num_instructions
        );
        println!("  Output: {}", style(file.output.display()).green());
    }
    for failure in &report.failures {
        println!(
            "  {} {}",
            style("failed:").red(),
            style(failure.path.display()).dim()
        );
    }
}

/// Human-readable byte count.
pub fn format_bytes(bytes: usize) -> String {
    const KB: f64 = 1024.0;
    const MB: f64 = KB * 1024.0;

    let b = bytes as f64;
    if b >= MB {
        format!("{:.2} MB", b / MB)
    } else if b >= KB {
        format!("{:.2} KB", b / KB)
    } else {
        format!("{bytes} B")
    }
}
