//! Error types for the translation engine.

use std::fmt;

use thiserror::Error;

/// What the scanner saw where it expected something else.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Found {
    /// A concrete input byte.
    Byte(u8),
    /// The input ended.
    EndOfInput,
}

impl fmt::Display for Found {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Found::Byte(b) if b.is_ascii_graphic() => write!(f, "'{}'", char::from(*b)),
            Found::Byte(b) => write!(f, "ASCII({b})"),
            Found::EndOfInput => write!(f, "end of input"),
        }
    }
}

/// Errors that can occur while translating one circuit.
///
/// Every variant is fatal for the circuit being translated; the engine
/// never hands back a partial output buffer.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TranslateError {
    /// The `OPENQASM` version number could not be read.
    #[error("Malformed number at line {line}: {detail}")]
    MalformedNumber { line: usize, detail: String },

    /// The source declares a version other than 2.0.
    #[error("OPENQASM version {version:.3} at line {line} is not supported (expected 2.0)")]
    UnsupportedVersion { line: usize, version: f64 },

    /// A required token was missing.
    #[error("Syntax error at line {line}: expected {expected}, found {found}")]
    Syntax {
        line: usize,
        expected: &'static str,
        found: Found,
    },

    /// The mnemonic has no Stim counterpart.
    #[error("Unknown gate '{name}' at line {line}")]
    UnknownGate { line: usize, name: String },

    /// The mnemonic is longer than any known gate name may be.
    #[error("Gate name '{name}...' at line {line} exceeds {max} characters")]
    GateNameTooLong {
        line: usize,
        name: String,
        max: usize,
    },
}

impl TranslateError {
    /// Line of the source (1-based) where the error was detected.
    pub fn line(&self) -> usize {
        match self {
            TranslateError::MalformedNumber { line, .. }
            | TranslateError::UnsupportedVersion { line, .. }
            | TranslateError::Syntax { line, .. }
            | TranslateError::UnknownGate { line, .. }
            | TranslateError::GateNameTooLong { line, .. } => *line,
        }
    }
}

/// Returned by [`GateTable::translate`](crate::GateTable::translate) for a
/// mnemonic outside the table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown gate: {name}")]
pub struct UnknownGateError {
    pub name: String,
}

/// Result type for translation operations.
pub type TranslateResult<T> = Result<T, TranslateError>;
