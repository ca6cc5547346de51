//! Directory-level conversion.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use qasm2stim_core::{GateTable, Translator};
use tracing::{debug, info, instrument, warn};

use crate::config::{BatchConfig, Config, ErrorPolicy};
use crate::error::{BatchError, BatchResult};
use crate::loader::load_source;
use crate::writer::{output_path_for, write_output};

const MB: f64 = (1024 * 1024) as f64;

/// Outcome of converting one file.
#[derive(Debug, Clone)]
pub struct FileReport {
    pub input: PathBuf,
    pub output: PathBuf,
    pub input_bytes: usize,
    pub output_bytes: usize,
    pub num_qubits: Option<u64>,
    pub num_operations: usize,
    pub num_instructions: usize,
    pub load_time: Duration,
    pub translate_time: Duration,
    pub write_time: Duration,
}

/// A file that failed under [`ErrorPolicy::Isolate`].
#[derive(Debug)]
pub struct FileFailure {
    pub path: PathBuf,
    pub error: BatchError,
}

/// Result of a whole batch.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub converted: Vec<FileReport>,
    pub failures: Vec<FileFailure>,
}

impl BatchReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn total_input_bytes(&self) -> usize {
        self.converted.iter().map(|r| r.input_bytes).sum()
    }

    pub fn total_output_bytes(&self) -> usize {
        self.converted.iter().map(|r| r.output_bytes).sum()
    }
}

/// Converts QASM files to Stim files, one at a time.
///
/// The output buffer is reused between files; its contents never carry over.
pub struct BatchConverter<'t> {
    translator: Translator<'t>,
    config: BatchConfig,
    buffer: Vec<u8>,
}

impl BatchConverter<'static> {
    /// Converter over the standard gate table.
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            Translator::new(GateTable::standard(), config.translate),
            config.batch.clone(),
        )
    }
}

impl<'t> BatchConverter<'t> {
    pub fn new(translator: Translator<'t>, config: BatchConfig) -> Self {
        Self {
            translator,
            config,
            buffer: Vec::new(),
        }
    }

    pub fn config(&self) -> &BatchConfig {
        &self.config
    }

    /// Regular files in `dir` with the configured input extension, sorted.
    pub fn discover(&self, dir: &Path) -> BatchResult<Vec<PathBuf>> {
        if !dir.is_dir() {
            return Err(BatchError::NotADirectory(dir.to_path_buf()));
        }

        let entries = fs::read_dir(dir).map_err(|e| BatchError::access(dir, e))?;
        let mut paths = Vec::new();
        for entry in entries {
            let path = entry.map_err(|e| BatchError::access(dir, e))?.path();
            let matches = path
                .extension()
                .is_some_and(|ext| ext == self.config.input_extension.as_str());
            if matches && path.is_file() {
                paths.push(path);
            } else {
                debug!("Skipping {}", path.display());
            }
        }
        paths.sort();

        info!(
            "Found {} .{} file(s) in {}",
            paths.len(),
            self.config.input_extension,
            dir.display()
        );
        Ok(paths)
    }

    /// Translate one file and write its Stim sibling.
    ///
    /// Translation finishes in memory before the output file is created, so
    /// a failing input never produces an output file.
    #[instrument(skip_all, fields(path = %path.display()))]
    pub fn convert_file(&mut self, path: &Path) -> BatchResult<FileReport> {
        let started = Instant::now();
        let source = load_source(path, self.config.memory_map)?;
        let load_time = started.elapsed();
        info!(
            "Parsed circuit file (size: {:.2} MB, mapped: {}) in {:.2} ms",
            source.len() as f64 / MB,
            source.is_mapped(),
            load_time.as_secs_f64() * 1000.0
        );

        let started = Instant::now();
        self.buffer.clear();
        let translation = self
            .translator
            .translate_into(&source, &mut self.buffer)
            .map_err(|e| BatchError::Translate {
                path: path.to_path_buf(),
                source: e,
            })?;
        let translate_time = started.elapsed();
        info!(
            "Translated to Stim (found {} qubits, {} operations on {} lines) in {:.2} ms",
            translation
                .num_qubits
                .map_or_else(|| "no".to_string(), |n| n.to_string()),
            translation.num_operations,
            translation.num_instructions,
            translate_time.as_secs_f64() * 1000.0
        );

        let output = output_path_for(path, &self.config.output_extension);
        let started = Instant::now();
        write_output(&output, &self.buffer)?;
        let write_time = started.elapsed();
        info!(
            "Wrote Stim circuit to {} in {:.2} ms",
            output.display(),
            write_time.as_secs_f64() * 1000.0
        );

        Ok(FileReport {
            input: path.to_path_buf(),
            output,
            input_bytes: source.len(),
            output_bytes: translation.bytes_written,
            num_qubits: translation.num_qubits,
            num_operations: translation.num_operations,
            num_instructions: translation.num_instructions,
            load_time,
            translate_time,
            write_time,
        })
    }

    /// Convert `paths` in order, applying the configured error policy.
    ///
    /// `on_file` is called after each file with its outcome.
    pub fn convert_paths<F>(&mut self, paths: &[PathBuf], mut on_file: F) -> BatchResult<BatchReport>
    where
        F: FnMut(&Path, Result<&FileReport, &BatchError>),
    {
        let mut report = BatchReport::default();
        for path in paths {
            match self.convert_file(path) {
                Ok(file_report) => {
                    on_file(path, Ok(&file_report));
                    report.converted.push(file_report);
                }
                Err(error) => {
                    on_file(path, Err(&error));
                    match self.config.error_policy {
                        ErrorPolicy::Abort => return Err(error),
                        ErrorPolicy::Isolate => {
                            warn!("Skipping {}", error.chain());
                            report.failures.push(FileFailure {
                                path: path.clone(),
                                error,
                            });
                        }
                    }
                }
            }
        }
        Ok(report)
    }

    /// Discover and convert every matching file in `dir`.
    pub fn convert_dir(&mut self, dir: &Path) -> BatchResult<BatchReport> {
        let paths = self.discover(dir)?;
        self.convert_paths(&paths, |_, _| {})
    }
}
