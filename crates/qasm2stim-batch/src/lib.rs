//! File handling and directory conversion for qasm2stim.
//!
//! This crate wraps the [`qasm2stim_core`] engine with everything needed to
//! convert circuits on disk: loading inputs (memory-mapped or buffered),
//! writing `.stim` files next to their sources, walking a directory, and the
//! YAML/environment configuration that drives it.
//!
//! ```no_run
//! use std::path::Path;
//! use qasm2stim_batch::{BatchConverter, Config};
//!
//! let config = Config::load(None)?;
//! let mut converter = BatchConverter::from_config(&config);
//! let report = converter.convert_dir(Path::new("circuits"))?;
//! println!("converted {} file(s)", report.converted.len());
//! # Ok::<(), qasm2stim_batch::BatchError>(())
//! ```

mod config;
mod driver;
mod error;
mod loader;
mod writer;

pub use config::{BatchConfig, Config, ErrorPolicy, LoggingConfig};
pub use driver::{BatchConverter, BatchReport, FileFailure, FileReport};
pub use error::{BatchError, BatchResult, ConfigError, ErrorChain};
pub use loader::{SourceBuffer, load_source};
pub use writer::{output_path_for, write_output};
