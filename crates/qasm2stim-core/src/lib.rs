//! `OpenQASM` 2 → Stim translation engine
//!
//! This crate converts Clifford circuits written in `OpenQASM` 2.0 into
//! Stim's line-oriented circuit format. The input is scanned once, without
//! backtracking or per-token allocation, and consecutive operations that use
//! the same gate are coalesced onto a single Stim instruction line.
//!
//! # Supported Constructs
//!
//! | Construct | Handling | Example |
//! |-----------|----------|---------|
//! | Version declaration | must be 2.0 | `OPENQASM 2.0;` |
//! | Qubit register | emitted as `#N` header | `qreg q[5];` |
//! | Classical register | skipped | `creg c[5];` |
//! | Includes | skipped | `include "qelib1.inc";` |
//! | Gate definitions | skipped | `gate foo a { ... }` |
//! | Line comments | skipped | `// comment` |
//! | Gate operations | translated | `cx q[0],q[1];` |
//! | Measurements | translated, `->` target dropped | `measure q[0] -> c[0];` |
//!
//! # Example
//!
//! ```rust
//! use qasm2stim_core::{GateTable, TranslateOptions, Translator};
//!
//! let qasm = "OPENQASM 2.0;\nqreg q[2];\nh q[0];\nh q[1];\ncx q[0],q[1];\n";
//!
//! let translator = Translator::new(GateTable::standard(), TranslateOptions::default());
//! let stim = translator.translate(qasm.as_bytes()).unwrap();
//!
//! assert_eq!(stim.as_bytes(), &b"#2\nH 0 1\nCX 0 1\n"[..]);
//! assert_eq!(stim.num_qubits(), Some(2));
//! ```
//!
//! # Supported Gates
//!
//! `i`, `x`, `y`, `z`, `h`, `s`, `sdg`, `cx`, `cy`, `cz`, `swap`, `iswap`,
//! `measure`, `reset`

mod cursor;
mod engine;
mod error;
mod gates;
mod options;

pub use engine::{MAX_GATE_NAME_LEN, OUTPUT_HEADROOM, StimBuffer, Translation, Translator};
pub use error::{Found, TranslateError, TranslateResult, UnknownGateError};
pub use gates::{GateEntry, GateTable, STANDARD_GATES};
pub use options::{LineEnding, TranslateOptions};
