//! Input cursor over a decoded code-point buffer.
//!
//! The cursor owns the whole input as a `Vec<char>` and exposes multi-position
//! lookahead (`peek`), destructive advancement (`advance`), and a sliding
//! `start` mark delimiting the token currently being consumed. `shift`
//! returns the pending slice as the token's raw text and resets the mark.
//!
//! [§ 3.3 Preprocessing the input stream](https://www.w3.org/TR/css-syntax-3/#input-preprocessing):
//! every U+0000 NULL is replaced with U+FFFD REPLACEMENT CHARACTER at
//! construction time. Newlines are NOT normalized; CRLF is handled by the
//! whitespace consumer instead.

use std::io;
use std::io::Read;

/// A stream of code points read from a source, with a current position and a
/// start mark for the token being built.
#[derive(Debug, Clone)]
pub struct Input {
    buf: Vec<char>,
    pos: usize,
    start: usize,
}

/// A saved cursor position, produced by [`Input::state`] and consumed by
/// [`Input::restore`]. Lets a backtracking caller rewind the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputState {
    pos: usize,
    start: usize,
}

impl InputState {
    /// The saved read position.
    #[must_use]
    pub fn pos(&self) -> usize {
        self.pos
    }

    /// The saved start mark.
    #[must_use]
    pub fn start(&self) -> usize {
        self.start
    }
}

impl Input {
    /// Create an input over an already-decoded code-point buffer.
    ///
    /// U+0000 is replaced with U+FFFD; this is the only preprocessing.
    #[must_use]
    pub fn from_chars(mut buf: Vec<char>) -> Self {
        for c in buf.iter_mut() {
            if *c == '\0' {
                *c = char::REPLACEMENT_CHARACTER;
            }
        }
        Self { buf, pos: 0, start: 0 }
    }

    /// Create an input from a string slice.
    #[must_use]
    pub fn new(input: &str) -> Self {
        Self::from_chars(input.chars().collect())
    }

    /// Create an input from raw bytes, decoded as UTF-8.
    ///
    /// Invalid sequences decode to U+FFFD, matching the replacement behavior
    /// of the rest of the pipeline.
    #[must_use]
    pub fn from_bytes(input: &[u8]) -> Self {
        Self::from_chars(String::from_utf8_lossy(input).chars().collect())
    }

    /// Create an input by reading a byte source to completion.
    ///
    /// The whole input is materialized before tokenization begins; there is
    /// no incremental decoding.
    ///
    /// # Errors
    ///
    /// Returns any I/O error raised while draining the reader.
    pub fn from_reader<R: Read>(mut reader: R) -> io::Result<Self> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        Ok(Self::from_bytes(&bytes))
    }

    /// Look at the code point `n` positions ahead without advancing.
    ///
    /// Returns `None` once `pos + n` runs past the end of the buffer.
    #[must_use]
    pub fn peek(&self, n: usize) -> Option<char> {
        self.buf.get(self.pos + n).copied()
    }

    /// Advance the position by `n` code points, clamping at the end of the
    /// buffer.
    pub fn advance(&mut self, n: usize) {
        if self.pos + n >= self.buf.len() {
            self.pos = self.buf.len();
        } else {
            self.pos += n;
        }
    }

    /// Advance one position at a time while `pred` holds for the next code
    /// point.
    pub fn advance_while<F>(&mut self, pred: F)
    where
        F: Fn(char) -> bool,
    {
        while self.peek(0).map(&pred).unwrap_or(false) {
            self.advance(1);
        }
    }

    /// The pending slice: every code point consumed since the last `shift`.
    #[must_use]
    pub fn current(&self) -> &[char] {
        &self.buf[self.start..self.pos]
    }

    /// Length of the pending slice.
    #[must_use]
    pub fn current_offset(&self) -> usize {
        self.pos - self.start
    }

    /// Return the pending slice as owned text and reset the start mark to
    /// the current position.
    pub fn shift(&mut self) -> String {
        let raw: String = self.buf[self.start..self.pos].iter().collect();
        self.start = self.pos;
        raw
    }

    /// True once the cursor has reached the end of the input.
    #[must_use]
    pub fn err(&self) -> bool {
        self.pos >= self.buf.len()
    }

    /// Capture the current cursor position for a later [`Input::restore`].
    #[must_use]
    pub fn state(&self) -> InputState {
        InputState {
            pos: self.pos,
            start: self.start,
        }
    }

    /// Rewind the cursor to a previously captured state.
    pub fn restore(&mut self, state: InputState) {
        self.pos = state.pos.min(self.buf.len());
        self.start = state.start.min(self.pos);
    }
}
