//! Error types for file handling and batch conversion.

use std::error::Error as StdError;
use std::fmt;
use std::io;
use std::path::PathBuf;

use qasm2stim_core::TranslateError;
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(String),

    #[error("Failed to parse config file: {0}")]
    ParseError(String),

    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Errors that can occur while converting files.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum BatchError {
    /// Input unreadable or output unwritable.
    #[error("Cannot access {}", path.display())]
    FileAccess {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The circuit in `path` could not be translated.
    #[error("{}", path.display())]
    Translate {
        path: PathBuf,
        #[source]
        source: TranslateError,
    },

    #[error("Not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl BatchError {
    /// This error followed by its causes, `: `-separated.
    pub fn chain(&self) -> ErrorChain<'_> {
        ErrorChain(self)
    }

    pub(crate) fn access(path: impl Into<PathBuf>, source: io::Error) -> Self {
        BatchError::FileAccess {
            path: path.into(),
            source,
        }
    }
}

/// Displays an error and every error in its `source()` chain.
pub struct ErrorChain<'a>(pub &'a (dyn StdError + 'static));

impl fmt::Display for ErrorChain<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)?;
        let mut cause = self.0.source();
        while let Some(err) = cause {
            write!(f, ": {err}")?;
            cause = err.source();
        }
        Ok(())
    }
}

/// Result type for batch operations.
pub type BatchResult<T> = Result<T, BatchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_translate_chain_names_cause_once() {
        let err = BatchError::Translate {
            path: PathBuf::from("circuits/b.qasm"),
            source: TranslateError::UnknownGate {
                line: 3,
                name: "t".to_string(),
            },
        };
        assert_eq!(err.to_string(), "circuits/b.qasm");
        assert_eq!(
            err.chain().to_string(),
            "circuits/b.qasm: Unknown gate 't' at line 3"
        );
    }

    #[test]
    fn test_access_chain_names_cause_once() {
        let err = BatchError::access(
            "missing.qasm",
            io::Error::new(io::ErrorKind::NotFound, "no such file"),
        );
        assert_eq!(err.chain().to_string(), "Cannot access missing.qasm: no such file");
    }

    #[test]
    fn test_chain_without_source() {
        let err = BatchError::NotADirectory(PathBuf::from("bell.qasm"));
        assert_eq!(err.chain().to_string(), "Not a directory: bell.qasm");
    }
}
