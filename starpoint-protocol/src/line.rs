//! Line assembly for the serial link.
//!
//! Bytes arrive in arbitrary chunks; a frame is complete only once its
//! terminator (`\n`, or `\r` from hosts that send `\r\n`) has been seen.
//! The assembler keeps the unterminated tail between polls so a line split
//! across two reads is delivered whole on the second one.
//!
//! A line that does not fit in the buffer is dropped together with
//! everything up to its terminator, and assembly resumes cleanly on the
//! following line.

use heapless::Vec;

/// Longest line content that can be delivered (terminator excluded)
pub const MAX_LINE_LEN: usize = 96;

/// Pending byte capacity: one full line plus its terminator
pub const LINE_BUFFER_SIZE: usize = MAX_LINE_LEN + 1;

/// Errors that can occur while assembling lines
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LineError {
    /// A line exceeded [`MAX_LINE_LEN`] and is being discarded
    Overflow,
    /// Buffer holds unread lines; drain with `next_line` before pushing more
    Full,
}

/// One complete, unterminated line of bytes
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Line {
    bytes: Vec<u8, MAX_LINE_LEN>,
}

impl Line {
    /// Raw bytes of the line, terminator removed
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Line content with surrounding whitespace trimmed
    ///
    /// Returns `None` when the bytes are not valid UTF-8 (line noise).
    pub fn text(&self) -> Option<&str> {
        core::str::from_utf8(&self.bytes).ok().map(str::trim)
    }
}

/// Accumulates received bytes and splits them into lines
#[derive(Debug, Clone)]
pub struct LineAssembler {
    pending: Vec<u8, LINE_BUFFER_SIZE>,
    discarding: bool,
}

impl Default for LineAssembler {
    fn default() -> Self {
        Self::new()
    }
}

fn is_terminator(byte: u8) -> bool {
    byte == b'\n' || byte == b'\r'
}

impl LineAssembler {
    /// Create an empty assembler
    pub const fn new() -> Self {
        Self {
            pending: Vec::new(),
            discarding: false,
        }
    }

    /// Drop all buffered bytes
    pub fn reset(&mut self) {
        self.pending.clear();
        self.discarding = false;
    }

    /// Number of bytes that can be pushed without overflowing
    pub fn free(&self) -> usize {
        self.pending.capacity() - self.pending.len()
    }

    /// Number of bytes currently buffered
    pub fn buffered(&self) -> usize {
        self.pending.len()
    }

    /// Check whether an oversized line is being skipped
    pub fn is_discarding(&self) -> bool {
        self.discarding
    }

    /// Feed a single received byte
    ///
    /// Returns `Err(LineError::Overflow)` exactly once for each line that
    /// outgrows the buffer; the rest of that line is swallowed silently.
    pub fn push_byte(&mut self, byte: u8) -> Result<(), LineError> {
        if self.discarding {
            if is_terminator(byte) {
                self.discarding = false;
            }
            return Ok(());
        }

        if self.pending.push(byte).is_err() {
            return Err(LineError::Full);
        }

        // A full buffer with no terminator can only be an oversized line
        if self.pending.is_full() && !self.pending.iter().any(|&b| is_terminator(b)) {
            self.pending.clear();
            self.discarding = true;
            return Err(LineError::Overflow);
        }

        Ok(())
    }

    /// Feed a chunk of received bytes
    ///
    /// Stops early with `Err(LineError::Full)` if unread lines fill the
    /// buffer. An overflowing line does not stop the chunk; the overflow is
    /// reported once the whole chunk has been consumed.
    pub fn push(&mut self, bytes: &[u8]) -> Result<(), LineError> {
        let mut result = Ok(());
        for &byte in bytes {
            match self.push_byte(byte) {
                Ok(()) => {}
                Err(LineError::Full) => return Err(LineError::Full),
                Err(e) => result = Err(e),
            }
        }
        result
    }

    /// Take the oldest complete line, if any
    ///
    /// Blank lines (including the empty gap inside `\r\n`) are skipped.
    /// Bytes after the returned line's terminator stay buffered for the
    /// next call.
    pub fn next_line(&mut self) -> Option<Line> {
        loop {
            let end = self.pending.iter().position(|&b| is_terminator(b))?;

            let mut bytes = Vec::new();
            // `end` < LINE_BUFFER_SIZE, so the content always fits
            let _ = bytes.extend_from_slice(&self.pending[..end]);

            let consumed = end + 1;
            let remaining = self.pending.len() - consumed;
            self.pending.copy_within(consumed.., 0);
            self.pending.truncate(remaining);

            if bytes.iter().all(u8::is_ascii_whitespace) {
                continue;
            }
            return Some(Line { bytes });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(line: &Line) -> &str {
        line.text().unwrap()
    }

    #[test]
    fn test_complete_line_on_newline() {
        let mut asm = LineAssembler::new();
        asm.push(b"157.23,42.15\n").unwrap();
        let line = asm.next_line().unwrap();
        assert_eq!(text(&line), "157.23,42.15");
        assert!(asm.next_line().is_none());
        assert_eq!(asm.buffered(), 0);
    }

    #[test]
    fn test_partial_line_waits_for_terminator() {
        let mut asm = LineAssembler::new();
        asm.push(b"157.2").unwrap();
        assert!(asm.next_line().is_none());
        asm.push(b"3,42.15").unwrap();
        assert!(asm.next_line().is_none());
        asm.push(b"\n").unwrap();
        assert_eq!(text(&asm.next_line().unwrap()), "157.23,42.15");
    }

    #[test]
    fn test_one_line_per_call() {
        let mut asm = LineAssembler::new();
        asm.push(b"ERROR:first\n1,2\npart").unwrap();
        assert_eq!(text(&asm.next_line().unwrap()), "ERROR:first");
        assert_eq!(text(&asm.next_line().unwrap()), "1,2");
        assert!(asm.next_line().is_none());
        assert_eq!(asm.buffered(), 4);
    }

    #[test]
    fn test_crlf_and_blank_lines_skipped() {
        let mut asm = LineAssembler::new();
        asm.push(b"\r\n\n  \n10,20\r\n").unwrap();
        assert_eq!(text(&asm.next_line().unwrap()), "10,20");
        assert!(asm.next_line().is_none());
    }

    #[test]
    fn test_text_is_trimmed() {
        let mut asm = LineAssembler::new();
        asm.push(b"  ERROR:not found \t\n").unwrap();
        assert_eq!(text(&asm.next_line().unwrap()), "ERROR:not found");
    }

    #[test]
    fn test_invalid_utf8_has_no_text() {
        let mut asm = LineAssembler::new();
        asm.push(&[0xFF, 0xFE, b'\n']).unwrap();
        let line = asm.next_line().unwrap();
        assert!(line.text().is_none());
        assert_eq!(line.as_bytes(), &[0xFF, 0xFE]);
    }

    #[test]
    fn test_overflow_reported_once_then_recovers() {
        let mut asm = LineAssembler::new();
        let long = [b'x'; LINE_BUFFER_SIZE + 20];

        assert_eq!(asm.push(&long), Err(LineError::Overflow));
        assert!(asm.is_discarding());
        assert!(asm.next_line().is_none());

        // Tail of the oversized line is swallowed along with its terminator
        asm.push(b"yyy\n").unwrap();
        assert!(!asm.is_discarding());
        assert!(asm.next_line().is_none());

        asm.push(b"1,2\n").unwrap();
        assert_eq!(text(&asm.next_line().unwrap()), "1,2");
    }

    #[test]
    fn test_exactly_max_line_fits() {
        let mut asm = LineAssembler::new();
        let line = [b'a'; MAX_LINE_LEN];
        asm.push(&line).unwrap();
        asm.push(b"\n").unwrap();
        assert_eq!(asm.next_line().unwrap().as_bytes().len(), MAX_LINE_LEN);
    }

    #[test]
    fn test_full_with_unread_lines() {
        let mut asm = LineAssembler::new();
        let mut data = [b'1'; LINE_BUFFER_SIZE];
        data[1] = b'\n';
        asm.push(&data).unwrap();
        assert_eq!(asm.push_byte(b'2'), Err(LineError::Full));

        assert_eq!(text(&asm.next_line().unwrap()), "1");
        assert!(asm.push_byte(b'2').is_ok());
    }

    #[test]
    fn test_free_tracks_buffered_bytes() {
        let mut asm = LineAssembler::new();
        assert_eq!(asm.free(), LINE_BUFFER_SIZE);
        asm.push(b"abc").unwrap();
        assert_eq!(asm.free(), LINE_BUFFER_SIZE - 3);
        asm.reset();
        assert_eq!(asm.free(), LINE_BUFFER_SIZE);
    }
}
