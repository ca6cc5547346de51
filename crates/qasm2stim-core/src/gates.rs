//! Gate translation table between OpenQASM 2 and Stim mnemonics.

use std::sync::LazyLock;

use rustc_hash::FxHashMap;

use crate::error::UnknownGateError;

/// One row of the translation table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GateEntry {
    /// OpenQASM 2 mnemonic (lowercase).
    pub qasm: &'static str,
    /// Stim mnemonic (uppercase).
    pub stim: &'static str,
}

const fn entry(qasm: &'static str, stim: &'static str) -> GateEntry {
    GateEntry { qasm, stim }
}

/// The supported Clifford vocabulary, in display order.
pub const STANDARD_GATES: [GateEntry; 14] = [
    entry("i", "I"),
    entry("x", "X"),
    entry("y", "Y"),
    entry("z", "Z"),
    entry("h", "H"),
    entry("s", "S"),
    entry("sdg", "S_DAG"),
    entry("cx", "CX"),
    entry("cy", "CY"),
    entry("cz", "CZ"),
    entry("swap", "SWAP"),
    entry("iswap", "ISWAP"),
    entry("measure", "M"),
    entry("reset", "R"),
];

static STANDARD: LazyLock<GateTable> = LazyLock::new(|| GateTable::from_entries(&STANDARD_GATES));

/// Bidirectional, immutable mnemonic mapping.
///
/// Lookups from the QASM side are keyed by byte slices so the engine can
/// query straight out of the input buffer.
#[derive(Debug)]
pub struct GateTable {
    entries: &'static [GateEntry],
    to_stim: FxHashMap<&'static [u8], &'static str>,
    to_qasm: FxHashMap<&'static str, &'static str>,
}

impl GateTable {
    /// The process-wide table of supported gates.
    pub fn standard() -> &'static GateTable {
        &STANDARD
    }

    fn from_entries(entries: &'static [GateEntry]) -> Self {
        let mut to_stim = FxHashMap::default();
        let mut to_qasm = FxHashMap::default();
        for e in entries {
            let fresh_qasm = to_stim.insert(e.qasm.as_bytes(), e.stim).is_none();
            let fresh_stim = to_qasm.insert(e.stim, e.qasm).is_none();
            debug_assert!(fresh_qasm && fresh_stim, "duplicate mnemonic in {e:?}");
        }
        Self {
            entries,
            to_stim,
            to_qasm,
        }
    }

    /// Translate a QASM mnemonic to its Stim counterpart.
    pub fn translate(&self, mnemonic: &str) -> Result<&'static str, UnknownGateError> {
        self.lookup(mnemonic.as_bytes())
            .ok_or_else(|| UnknownGateError {
                name: mnemonic.to_string(),
            })
    }

    /// Byte-level lookup used by the engine.
    pub fn lookup(&self, mnemonic: &[u8]) -> Option<&'static str> {
        self.to_stim.get(mnemonic).copied()
    }

    /// Reverse lookup: the QASM mnemonic for a Stim mnemonic.
    pub fn source_of(&self, stim: &str) -> Option<&'static str> {
        self.to_qasm.get(stim).copied()
    }

    /// All entries in table order.
    pub fn entries(&self) -> impl Iterator<Item = &GateEntry> + '_ {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
