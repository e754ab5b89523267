//! Longest-match tokenizer with a one-token lookahead cache
//!
//! # Resolution
//!
//! At each position every pattern in the scan set is tried against the
//! remaining input. The longest match wins; equal lengths go to the kind
//! that orders first. Skip kinds are always in the scan set: a winning skip
//! match is logged and scanning continues after it. When nothing matches,
//! the result is a one-character `UNDETERMINED` token (zero-length at the end
//! of the input) so the caller can report the error and carry on.
//!
//! # Examples
//!
//! ```
//! use patscan::scanner::{PatternTable, RuleId, Tokenizer};
//!
//! let [int, plus, ws] = [RuleId::nth(0), RuleId::nth(1), RuleId::nth(2)];
//! let table = PatternTable::builder()
//!     .regex(int, "[0-9]+")
//!     .literal(plus, "+")
//!     .regex(ws, r"\s+")
//!     .skip(ws)
//!     .build()
//!     .unwrap();
//!
//! let mut tokenizer = Tokenizer::new(&table);
//! tokenizer.init("12 + 34");
//! assert_eq!(tokenizer.scan(&[]).unwrap().text(), "12");
//! assert_eq!(tokenizer.look_ahead(&[plus]).unwrap().start(), 3);
//! assert_eq!(tokenizer.scan(&[plus]).unwrap().text(), "+");
//! ```

use log::{debug, trace};

use super::error::ScanError;
use super::state::{Location, ScannerState};
use super::table::{Pattern, PatternTable};
use super::token::{Span, Token, TokenKind};

/// Scans one input at a time against a shared [`PatternTable`]
///
/// Call [`init`](Self::init) before scanning, and again to switch inputs.
#[derive(Debug)]
pub struct Tokenizer<'t, 'i, K: TokenKind> {
    table: &'t PatternTable<K>,
    state: Option<ScannerState<'i, K>>,
}

impl<'t, 'i, K: TokenKind> Tokenizer<'t, 'i, K> {
    /// Create a tokenizer with no input bound yet
    #[must_use]
    pub const fn new(table: &'t PatternTable<K>) -> Self {
        Self { table, state: None }
    }

    /// Create a tokenizer already bound to `input`
    #[must_use]
    pub const fn with_input(table: &'t PatternTable<K>, input: &'i str) -> Self {
        Self {
            table,
            state: Some(ScannerState::new(input)),
        }
    }

    /// The pattern table in use
    #[must_use]
    pub const fn table(&self) -> &'t PatternTable<K> {
        self.table
    }

    /// Bind to `input`, resetting the cursor, counters, skip log and cache
    pub fn init(&mut self, input: &'i str) {
        debug!("tokenizer init: {} byte(s)", input.len());
        self.state = Some(ScannerState::new(input));
    }

    /// Check if [`init`](Self::init) has been called
    #[must_use]
    pub const fn is_initialized(&self) -> bool {
        self.state.is_some()
    }

    fn state(&self) -> Result<&ScannerState<'i, K>, ScanError> {
        self.state.as_ref().ok_or(ScanError::NotInitialized)
    }

    fn state_mut(&mut self) -> Result<&mut ScannerState<'i, K>, ScanError> {
        self.state.as_mut().ok_or(ScanError::NotInitialized)
    }

    /// Peek at the next token without committing it
    ///
    /// `kinds` restricts which patterns are tried (skip kinds are always
    /// tried); an empty slice tries all of them. A classified lookahead is
    /// cached, and while it is cached repeated calls return it unchanged,
    /// whatever `kinds` they pass. An `UNDETERMINED` result is not reused,
    /// so a caller can retry the same position with different kinds.
    pub fn look_ahead(&mut self, kinds: &[K]) -> Result<Token<'i, K>, ScanError> {
        let table = self.table;
        let state = self.state_mut()?;

        if let Some(cached) = state.lookahead().filter(|t| !t.kind().is_sentinel()) {
            return Ok(cached.clone());
        }

        state.discard_provisional_skips();
        let token = resolve(table, state, kinds);
        trace!("lookahead {token} at {}", token.span());
        state.cache(token.clone());
        Ok(token)
    }

    /// Return the next token and commit past it
    ///
    /// Line and column counters advance over everything consumed, skipped
    /// spans included. At the end of the input this keeps returning the same
    /// zero-length token.
    pub fn scan(&mut self, kinds: &[K]) -> Result<Token<'i, K>, ScanError> {
        let token = self.look_ahead(kinds)?;
        let state = self.state_mut()?;
        state.commit(token.end());
        debug!("commit {token} at {}, cursor now {}", token.span(), state.location());
        Ok(token)
    }

    /// Skipped tokens so far, in input order
    ///
    /// Includes the spans skipped in front of a pending lookahead. Empty
    /// before [`init`](Self::init).
    #[must_use]
    pub fn skipped_tokens(&self) -> &[Token<'i, K>] {
        match &self.state {
            Some(state) => state.skipped(),
            None => &[],
        }
    }

    /// Check if `token` is empty but sits before the end of the input
    ///
    /// Such a token comes from a pattern that matched empty text; scanning
    /// again would return it forever.
    #[must_use]
    pub fn is_stalled(&self, token: &Token<'i, K>) -> bool {
        token.is_empty()
            && self
                .state
                .as_ref()
                .is_some_and(|state| token.end() < state.input().len())
    }

    /// Committed byte offset
    pub fn offset(&self) -> Result<usize, ScanError> {
        Ok(self.state()?.offset())
    }

    /// Location of the committed cursor
    pub fn location(&self) -> Result<Location, ScanError> {
        Ok(self.state()?.location())
    }

    /// Location of any offset in the input, for diagnostics
    pub fn locate(&self, offset: usize) -> Result<Location, ScanError> {
        self.state()?.locate(offset).ok_or(ScanError::InvalidOffset(offset))
    }

    /// Iterate over the rest of the input, scanning with every pattern
    ///
    /// The iterator ends after the first zero-length token. At the end of the
    /// input that is the end-of-input sentinel (or `UNDETERMINED` when none is
    /// registered). Before the end it means a pattern matched empty text, so
    /// scanning cannot advance: the empty token is yielded and iteration
    /// stops there, leaving the cursor on it. Use
    /// [`is_stalled`](Self::is_stalled) to tell the two apart.
    pub fn tokens(&mut self) -> Result<Tokens<'_, 't, 'i, K>, ScanError> {
        self.state()?;
        Ok(Tokens {
            tokenizer: self,
            done: false,
        })
    }
}

/// Iterator returned by [`Tokenizer::tokens`]
#[derive(Debug)]
pub struct Tokens<'a, 't, 'i, K: TokenKind> {
    tokenizer: &'a mut Tokenizer<'t, 'i, K>,
    done: bool,
}

impl<'i, K: TokenKind> Iterator for Tokens<'_, '_, 'i, K> {
    type Item = Token<'i, K>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let token = self.tokenizer.scan(&[]).ok()?;
        if token.is_empty() {
            self.done = true;
            if self.tokenizer.is_stalled(&token) {
                debug!("{token} matched empty text at offset {}, stopping", token.start());
            }
        }
        Some(token)
    }
}

/// Run the match loop from the committed cursor
///
/// Skip matches are logged as they are passed over. The cursor itself does
/// not move.
fn resolve<'i, K: TokenKind>(
    table: &PatternTable<K>,
    state: &mut ScannerState<'i, K>,
    kinds: &[K],
) -> Token<'i, K> {
    let input = state.input();
    let scan_set = table.scan_set(kinds);
    let mut offset = state.offset();

    loop {
        let rest = &input[offset..];
        let Some((kind, len)) = best_match(table, &scan_set, rest) else {
            return unrecognized(input, offset);
        };

        let span = Span::new(offset, offset + len);
        let token = Token::new(kind, span, &input[span.start..span.end]);
        if !table.is_skip(kind) {
            return token;
        }

        trace!("skip {token} at {span}");
        state.log_skip(token);
        offset = span.end;
    }
}

/// Longest match over `scan_set`; ties go to the lower kind
///
/// Zero-length skip matches are ignored: they would never advance.
fn best_match<K: TokenKind>(
    table: &PatternTable<K>,
    scan_set: &[&Pattern<K>],
    rest: &str,
) -> Option<(K, usize)> {
    let mut best: Option<(K, usize)> = None;
    for pattern in scan_set {
        let Some(len) = pattern.match_len(rest) else {
            continue;
        };
        if len == 0 && table.is_skip(pattern.kind()) {
            continue;
        }
        let wins = match best {
            None => true,
            Some((kind, best_len)) => len > best_len || (len == best_len && pattern.kind() < kind),
        };
        if wins {
            best = Some((pattern.kind(), len));
        }
    }
    best
}

/// Fallback when nothing matches: one character, or nothing at the end
fn unrecognized<K: TokenKind>(input: &str, offset: usize) -> Token<'_, K> {
    let width = input[offset..].chars().next().map_or(0, char::len_utf8);
    let span = Span::new(offset, offset + width);
    Token::new(K::UNDETERMINED, span, &input[span.start..span.end])
}
