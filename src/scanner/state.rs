//! Per-input scanner state: cursor, diagnostics counters, skip log, lookahead cache

use std::fmt;

use serde::Serialize;

use super::token::{Token, TokenKind};

/// A byte offset plus its 1-based line and column
///
/// Columns count `char`s, not bytes. Only `'\n'` starts a new line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Location {
    /// Byte offset from the beginning of the input
    pub offset: usize,
    /// 1-based line number
    pub line: u32,
    /// 1-based column number
    pub column: u32,
}

impl Default for Location {
    fn default() -> Self {
        Self::START
    }
}

impl Location {
    /// Location of the first byte of any input
    pub const START: Self = Self {
        offset: 0,
        line: 1,
        column: 1,
    };

    /// Location reached after consuming `text` from here
    #[must_use]
    pub fn advance(self, text: &str) -> Self {
        let mut next = self;
        for ch in text.chars() {
            if ch == '\n' {
                next.line += 1;
                next.column = 1;
            } else {
                next.column += 1;
            }
        }
        next.offset += text.len();
        next
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Mutable cursor over one input
///
/// The input is borrowed, never copied. Everything the state records past
/// the committed cursor (the cached lookahead and the skip spans in front of
/// it) is provisional until [`commit`](Self::commit).
#[derive(Debug, Clone)]
pub struct ScannerState<'i, K: TokenKind> {
    input: &'i str,
    cursor: Location,
    skipped: Vec<Token<'i, K>>,
    committed_skips: usize,
    lookahead: Option<Token<'i, K>>,
}

impl<'i, K: TokenKind> ScannerState<'i, K> {
    /// Fresh state at the start of `input`
    #[must_use]
    pub const fn new(input: &'i str) -> Self {
        Self {
            input,
            cursor: Location::START,
            skipped: Vec::new(),
            committed_skips: 0,
            lookahead: None,
        }
    }

    /// The input being scanned
    #[must_use]
    pub const fn input(&self) -> &'i str {
        self.input
    }

    /// Committed byte offset
    #[must_use]
    pub const fn offset(&self) -> usize {
        self.cursor.offset
    }

    /// Committed location
    #[must_use]
    pub const fn location(&self) -> Location {
        self.cursor
    }

    /// Input not yet committed
    #[must_use]
    pub fn remaining(&self) -> &'i str {
        &self.input[self.cursor.offset..]
    }

    /// Skip log, in input order
    #[must_use]
    pub fn skipped(&self) -> &[Token<'i, K>] {
        &self.skipped
    }

    /// Cached lookahead token, if any
    #[must_use]
    pub const fn lookahead(&self) -> Option<&Token<'i, K>> {
        self.lookahead.as_ref()
    }

    /// Location of an arbitrary offset, or `None` if it is not a char boundary
    ///
    /// Offsets at or past the cursor resume from the committed counters.
    #[must_use]
    pub fn locate(&self, offset: usize) -> Option<Location> {
        if !self.input.is_char_boundary(offset) {
            return None;
        }
        let location = if offset >= self.cursor.offset {
            self.cursor.advance(&self.input[self.cursor.offset..offset])
        } else {
            Location::START.advance(&self.input[..offset])
        };
        Some(location)
    }

    /// Drop the provisional skip spans logged by an earlier lookahead
    pub(crate) fn discard_provisional_skips(&mut self) {
        self.skipped.truncate(self.committed_skips);
    }

    pub(crate) fn log_skip(&mut self, token: Token<'i, K>) {
        self.skipped.push(token);
    }

    pub(crate) fn cache(&mut self, token: Token<'i, K>) {
        self.lookahead = Some(token);
    }

    /// Move the cursor to `end`, folding everything consumed into the counters
    pub(crate) fn commit(&mut self, end: usize) {
        let consumed = &self.input[self.cursor.offset..end];
        self.cursor = self.cursor.advance(consumed);
        self.committed_skips = self.skipped.len();
        self.lookahead = None;
    }
}
