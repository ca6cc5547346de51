//! Forward-only byte cursor over the QASM source.

use crate::error::Found;

/// Bytes 9..=13 and space separate tokens.
#[inline]
pub(crate) fn is_space(b: u8) -> bool {
    matches!(b, 9..=13 | b' ')
}

#[inline]
pub(crate) fn is_mnemonic_byte(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_'
}

/// A read position in the input that only ever moves right.
pub(crate) struct Cursor<'a> {
    src: &'a [u8],
    pos: usize,
    line: usize,
}

impl<'a> Cursor<'a> {
    pub(crate) fn new(src: &'a [u8]) -> Self {
        Self {
            src,
            pos: 0,
            line: 1,
        }
    }

    pub(crate) fn is_eof(&self) -> bool {
        self.pos >= self.src.len()
    }

    pub(crate) fn line(&self) -> usize {
        self.line
    }

    pub(crate) fn peek(&self) -> Option<u8> {
        self.src.get(self.pos).copied()
    }

    pub(crate) fn found(&self) -> Found {
        self.peek().map_or(Found::EndOfInput, Found::Byte)
    }

    pub(crate) fn bump(&mut self) -> Option<u8> {
        let b = self.peek()?;
        self.pos += 1;
        if b == b'\n' {
            self.line += 1;
        }
        Some(b)
    }

    pub(crate) fn starts_with(&self, literal: &[u8]) -> bool {
        self.src[self.pos..].starts_with(literal)
    }

    /// Consume `keyword` if the input continues with it.
    pub(crate) fn eat(&mut self, keyword: &[u8]) -> bool {
        if self.starts_with(keyword) {
            // keywords never contain a newline
            self.pos += keyword.len();
            true
        } else {
            false
        }
    }

    pub(crate) fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(is_space) {
            self.bump();
        }
    }

    /// Skip through the next newline (inclusive) or to the end of input.
    pub(crate) fn skip_line(&mut self) {
        while let Some(b) = self.bump() {
            if b == b'\n' {
                break;
            }
        }
    }

    /// Consume up to `limit` bytes matching `pred` and return them.
    pub(crate) fn take_while(&mut self, pred: impl Fn(u8) -> bool, limit: usize) -> &'a [u8] {
        let start = self.pos;
        let end = self.src[start..]
            .iter()
            .take(limit)
            .position(|&b| !pred(b))
            .map_or_else(|| start.saturating_add(limit).min(self.src.len()), |n| start + n);
        self.pos = end;
        &self.src[start..end]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whitespace_class() {
        for b in [b' ', b'\t', b'\n', 0x0b, 0x0c, b'\r'] {
            assert!(is_space(b));
        }
        assert!(!is_space(b'q'));
        assert!(!is_space(0));
    }

    #[test]
    fn test_skip_tracks_lines() {
        let mut cur = Cursor::new(b"  \n\n  h");
        cur.skip_whitespace();
        assert_eq!(cur.peek(), Some(b'h'));
        assert_eq!(cur.line(), 3);
    }

    #[test]
    fn test_skip_line() {
        let mut cur = Cursor::new(b"creg c[2];\nh q[0];");
        assert!(cur.eat(b"creg"));
        cur.skip_line();
        assert_eq!(cur.peek(), Some(b'h'));
        assert_eq!(cur.line(), 2);

        let mut cur = Cursor::new(b"include \"qelib1.inc\";");
        cur.skip_line();
        assert!(cur.is_eof());
    }

    #[test]
    fn test_take_while_respects_limit() {
        let mut cur = Cursor::new(b"measure q[0];");
        assert_eq!(cur.take_while(is_mnemonic_byte, 16), b"measure");
        assert_eq!(cur.peek(), Some(b' '));

        let mut cur = Cursor::new(b"abcdefgh");
        assert_eq!(cur.take_while(is_mnemonic_byte, 3), b"abc");
        assert_eq!(cur.peek(), Some(b'd'));

        let mut cur = Cursor::new(b"ab");
        assert_eq!(cur.take_while(is_mnemonic_byte, 16), b"ab");
        assert!(cur.is_eof());
    }

    #[test]
    fn test_found_at_end() {
        let mut cur = Cursor::new(b"x");
        assert_eq!(cur.found(), Found::Byte(b'x'));
        cur.bump();
        assert_eq!(cur.found(), Found::EndOfInput);
        assert_eq!(cur.bump(), None);
    }
}
