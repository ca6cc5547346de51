//! Single-pass OpenQASM 2 → Stim translation.
//!
//! The engine walks the source once, left to right, and appends Stim text to
//! a caller-owned buffer. Consecutive operations with the same gate are
//! written onto one instruction line (`H 0 1 2`) instead of one line each.

use crate::cursor::{Cursor, is_mnemonic_byte};
use crate::error::{TranslateError, TranslateResult};
use crate::gates::GateTable;
use crate::options::{LineEnding, TranslateOptions};

/// Longest accepted gate mnemonic, in bytes.
pub const MAX_GATE_NAME_LEN: usize = 16;

/// Extra capacity reserved beyond the input length for the header line and
/// the final line separator.
pub const OUTPUT_HEADROOM: usize = 64;

/// Summary of one successful translation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Translation {
    /// Bytes appended to the output buffer.
    pub bytes_written: usize,
    /// Size of the `qreg` declaration, if the source had one.
    pub num_qubits: Option<u64>,
    /// Number of gate operations translated.
    pub num_operations: usize,
    /// Number of Stim instruction lines emitted (excluding the header).
    pub num_instructions: usize,
}

/// A translated circuit held in its own buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StimBuffer {
    bytes: Vec<u8>,
    translation: Translation,
}

impl StimBuffer {
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    pub fn translation(&self) -> &Translation {
        &self.translation
    }

    pub fn num_qubits(&self) -> Option<u64> {
        self.translation.num_qubits
    }
}

/// Translates OpenQASM 2 sources using a shared gate table.
#[derive(Debug, Clone, Copy)]
pub struct Translator<'t> {
    table: &'t GateTable,
    options: TranslateOptions,
}

impl Default for Translator<'static> {
    fn default() -> Self {
        Self::new(GateTable::standard(), TranslateOptions::default())
    }
}

impl<'t> Translator<'t> {
    pub fn new(table: &'t GateTable, options: TranslateOptions) -> Self {
        Self { table, options }
    }

    pub fn options(&self) -> &TranslateOptions {
        &self.options
    }

    /// Translate `input` into a freshly allocated buffer.
    pub fn translate(&self, input: &[u8]) -> TranslateResult<StimBuffer> {
        let mut bytes = Vec::new();
        let translation = self.translate_into(input, &mut bytes)?;
        Ok(StimBuffer { bytes, translation })
    }

    /// Append the translation of `input` to `out`.
    ///
    /// On error `out` is restored to its length at entry, so a failed
    /// translation never leaves partial Stim text behind.
    pub fn translate_into(&self, input: &[u8], out: &mut Vec<u8>) -> TranslateResult<Translation> {
        let start = out.len();
        out.reserve(input.len() + OUTPUT_HEADROOM);

        let result = self.scan(input, out);
        match result {
            Ok(mut translation) => {
                translation.bytes_written = out.len() - start;
                Ok(translation)
            }
            Err(e) => {
                out.truncate(start);
                Err(e)
            }
        }
    }

    #[allow(clippy::float_cmp)]
    fn scan(&self, input: &[u8], out: &mut Vec<u8>) -> TranslateResult<Translation> {
        let mut cur = Cursor::new(input);
        let mut emitter = Emitter::new(out, self.options.line_ending);
        let mut num_qubits = None;
        let mut num_operations = 0;

        loop {
            cur.skip_whitespace();
            if cur.is_eof() {
                break;
            }

            if cur.eat(b"OPENQASM") {
                let line = cur.line();
                let version = parse_version(&mut cur)?;
                if version != 2.0 {
                    return Err(TranslateError::UnsupportedVersion { line, version });
                }
                cur.skip_line();
            } else if cur.eat(b"qreg") {
                let line = cur.line();
                let digits = qubit_reference(&mut cur)?;
                let size = parse_register_size(digits, line)?;
                emitter.header(size);
                num_qubits = Some(size);
                cur.skip_line();
            } else if cur.starts_with(b"creg")
                || cur.starts_with(b"include")
                || cur.starts_with(b"gate")
                || cur.starts_with(b"//")
            {
                cur.skip_line();
            } else {
                self.gate_operation(&mut cur, &mut emitter)?;
                num_operations += 1;
            }
        }

        emitter.finish();

        Ok(Translation {
            bytes_written: 0,
            num_qubits,
            num_operations,
            num_instructions: emitter.num_instructions,
        })
    }

    /// `<mnemonic> q[a], q[b], ... ;` or `... -> <discarded>`
    fn gate_operation(&self, cur: &mut Cursor<'_>, emitter: &mut Emitter<'_>) -> TranslateResult<()> {
        let line = cur.line();
        let name = cur.take_while(is_mnemonic_byte, MAX_GATE_NAME_LEN + 1);
        if name.len() > MAX_GATE_NAME_LEN {
            return Err(TranslateError::GateNameTooLong {
                line,
                name: String::from_utf8_lossy(name).into_owned(),
                max: MAX_GATE_NAME_LEN,
            });
        }
        if name.is_empty() {
            return Err(syntax(cur, "a gate name"));
        }

        let stim = self
            .table
            .lookup(name)
            .ok_or_else(|| TranslateError::UnknownGate {
                line,
                name: String::from_utf8_lossy(name).into_owned(),
            })?;
        emitter.begin_operation(stim);

        loop {
            let digits = qubit_reference(cur)?;
            emitter.push(digits);
            cur.skip_whitespace();
            match cur.peek() {
                Some(b',') => {
                    cur.bump();
                    emitter.push(b" ");
                }
                Some(b';') => {
                    cur.bump();
                    return Ok(());
                }
                Some(b'-') if cur.starts_with(b"->") => {
                    cur.skip_line();
                    return Ok(());
                }
                _ => return Err(syntax(cur, "',', ';' or '->'")),
            }
        }
    }
}

/// Output side of the scan: the open instruction line and the buffer.
struct Emitter<'o> {
    out: &'o mut Vec<u8>,
    line_ending: &'static [u8],
    prev: Option<&'static str>,
    num_instructions: usize,
}

impl<'o> Emitter<'o> {
    fn new(out: &'o mut Vec<u8>, line_ending: LineEnding) -> Self {
        Self {
            out,
            line_ending: line_ending.as_bytes(),
            prev: None,
            num_instructions: 0,
        }
    }

    fn push(&mut self, bytes: &[u8]) {
        self.out.extend_from_slice(bytes);
    }

    fn close_line(&mut self) {
        if self.prev.take().is_some() {
            self.out.extend_from_slice(self.line_ending);
        }
    }

    fn header(&mut self, num_qubits: u64) {
        self.close_line();
        self.out.push(b'#');
        push_decimal(self.out, num_qubits);
        self.out.extend_from_slice(self.line_ending);
    }

    /// Leaves the buffer positioned for the first target of the operation.
    fn begin_operation(&mut self, stim: &'static str) {
        if self.prev == Some(stim) {
            self.out.push(b' ');
            return;
        }
        self.close_line();
        self.out.extend_from_slice(stim.as_bytes());
        self.out.push(b' ');
        self.prev = Some(stim);
        self.num_instructions += 1;
    }

    /// Terminates the open instruction line, if any.
    ///
    /// No separator is written when no gate line is open: a header-only
    /// circuit ends in `#N` plus one separator, with no blank trailing line,
    /// and an input without operations or header produces no bytes at all.
    fn finish(&mut self) {
        self.close_line();
    }
}

fn syntax(cur: &Cursor<'_>, expected: &'static str) -> TranslateError {
    TranslateError::Syntax {
        line: cur.line(),
        expected,
        found: cur.found(),
    }
}

fn expect(cur: &mut Cursor<'_>, byte: u8, expected: &'static str) -> TranslateResult<()> {
    if cur.peek() == Some(byte) {
        cur.bump();
        Ok(())
    } else {
        Err(syntax(cur, expected))
    }
}

/// `q[<digits>]`, returning the digits.
fn qubit_reference<'a>(cur: &mut Cursor<'a>) -> TranslateResult<&'a [u8]> {
    cur.skip_whitespace();
    expect(cur, b'q', "'q'")?;
    expect(cur, b'[', "'['")?;
    let digits = cur.take_while(|b| b.is_ascii_digit(), usize::MAX);
    if digits.is_empty() {
        return Err(syntax(cur, "a digit"));
    }
    expect(cur, b']', "']'")?;
    Ok(digits)
}

/// Digits with at most one decimal point, terminated by `;`.
fn parse_version(cur: &mut Cursor<'_>) -> TranslateResult<f64> {
    cur.skip_whitespace();
    let line = cur.line();
    if !cur.peek().is_some_and(|b| b.is_ascii_digit()) {
        return Err(TranslateError::MalformedNumber {
            line,
            detail: format!("expected a digit, found {}", cur.found()),
        });
    }

    let mut value = 0.0_f64;
    let mut divisor = 1.0_f64;
    let mut seen_point = false;
    while let Some(b) = cur.peek() {
        match b {
            b'0'..=b'9' => {
                value = value * 10.0 + f64::from(b - b'0');
                if seen_point {
                    divisor *= 10.0;
                }
            }
            b'.' if !seen_point => seen_point = true,
            _ => break,
        }
        cur.bump();
    }

    cur.skip_whitespace();
    if cur.peek() != Some(b';') {
        return Err(TranslateError::MalformedNumber {
            line,
            detail: format!("expected ';' after version number, found {}", cur.found()),
        });
    }
    cur.bump();
    Ok(value / divisor)
}

fn parse_register_size(digits: &[u8], line: usize) -> TranslateResult<u64> {
    digits
        .iter()
        .try_fold(0_u64, |acc, &d| {
            acc.checked_mul(10)?.checked_add(u64::from(d - b'0'))
        })
        .ok_or_else(|| TranslateError::MalformedNumber {
            line,
            detail: format!(
                "register size {} does not fit in 64 bits",
                String::from_utf8_lossy(digits)
            ),
        })
}

#[allow(clippy::cast_possible_truncation)]
fn push_decimal(out: &mut Vec<u8>, mut n: u64) {
    let mut buf = [0_u8; 20];
    let mut i = buf.len();
    loop {
        i -= 1;
        buf[i] = b'0' + (n % 10) as u8;
        n /= 10;
        if n == 0 {
            break;
        }
    }
    out.extend_from_slice(&buf[i..]);
}
