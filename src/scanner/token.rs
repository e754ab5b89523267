//! Token types produced by the scanner

use std::fmt;
use std::hash::Hash;

use serde::{Deserialize, Serialize};

/// A lexical category a [`Token`] can be classified as.
///
/// Kinds are totally ordered and the order is load-bearing: when two patterns
/// match the same number of bytes, the one whose kind orders first wins. A
/// [`PatternTable`](super::PatternTable) only accepts kinds registered in
/// ascending order, so ordinal order and registration order always agree.
///
/// Two values are reserved and never registered against a matcher:
/// [`NONE`](Self::NONE) for "no kind at all" and
/// [`UNDETERMINED`](Self::UNDETERMINED) for "nothing matched here".
pub trait TokenKind: Copy + Ord + Hash + fmt::Debug + fmt::Display + Send + Sync + 'static {
    /// The absent kind
    const NONE: Self;

    /// The kind of a token no pattern could classify
    const UNDETERMINED: Self;

    /// Whether this kind is one of the two reserved sentinels
    #[must_use]
    fn is_sentinel(self) -> bool {
        self == Self::NONE || self == Self::UNDETERMINED
    }
}

/// A span in the input (byte offsets, half-open)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Span {
    /// Start byte offset
    pub start: usize,
    /// End byte offset
    pub end: usize,
}

impl Span {
    /// Create a new span
    #[must_use]
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Create an empty span at an offset
    #[must_use]
    pub const fn empty(at: usize) -> Self {
        Self { start: at, end: at }
    }

    /// Length of the span
    #[must_use]
    pub const fn len(&self) -> usize {
        self.end - self.start
    }

    /// Check if span is empty
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Check if this span contains another
    #[must_use]
    pub const fn contains(&self, other: &Self) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    /// Smallest span covering both `self` and `other`
    #[must_use]
    pub fn cover(&self, other: &Self) -> Self {
        Self {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

/// Semantic value attached to a token by a grammar-action layer
///
/// The scanner never writes a value; it only carries the slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TokenValue {
    /// Integer literal
    Integer(i64),
    /// Floating point literal
    Number(f64),
    /// String literal (after unquoting / unescaping)
    Text(String),
    /// Boolean literal
    Boolean(bool),
}

impl fmt::Display for TokenValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(v) => write!(f, "{v}"),
            Self::Number(v) => write!(f, "{v}"),
            Self::Text(v) => write!(f, "{v:?}"),
            Self::Boolean(v) => write!(f, "{v}"),
        }
    }
}

/// A classified span of input
///
/// The text borrows from the scanned input, so tokens are cheap to clone and
/// never copy source text.
#[derive(Debug, Clone, PartialEq)]
pub struct Token<'i, K> {
    kind: K,
    span: Span,
    text: &'i str,
    value: Option<TokenValue>,
}

impl<'i, K: TokenKind> Token<'i, K> {
    /// Create a classified token
    #[must_use]
    pub const fn new(kind: K, span: Span, text: &'i str) -> Self {
        Self {
            kind,
            span,
            text,
            value: None,
        }
    }

    /// Create a token that has not been classified yet
    ///
    /// Its kind is [`TokenKind::UNDETERMINED`] and its text is empty.
    #[must_use]
    pub const fn undetermined(start: usize, end: usize) -> Self {
        Self::new(K::UNDETERMINED, Span::new(start, end), "")
    }

    /// Kind of token
    #[must_use]
    pub const fn kind(&self) -> K {
        self.kind
    }

    /// Span in the input
    #[must_use]
    pub const fn span(&self) -> Span {
        self.span
    }

    /// Start byte offset
    #[must_use]
    pub const fn start(&self) -> usize {
        self.span.start
    }

    /// End byte offset
    #[must_use]
    pub const fn end(&self) -> usize {
        self.span.end
    }

    /// Length in bytes (`end - start`)
    #[must_use]
    pub const fn len(&self) -> usize {
        self.span.len()
    }

    /// Check if the token covers no input (end-of-input sentinels do this)
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.span.is_empty()
    }

    /// The matched text
    #[must_use]
    pub const fn text(&self) -> &'i str {
        self.text
    }

    /// Check whether the token was classified by a pattern
    #[must_use]
    pub fn is_undetermined(&self) -> bool {
        self.kind == K::UNDETERMINED
    }

    /// Semantic value, if a grammar action attached one
    #[must_use]
    pub const fn value(&self) -> Option<&TokenValue> {
        self.value.as_ref()
    }

    /// Attach a semantic value
    pub fn set_value(&mut self, value: TokenValue) {
        self.value = Some(value);
    }

    /// Builder-style variant of [`set_value`](Self::set_value)
    #[must_use]
    pub fn with_value(mut self, value: TokenValue) -> Self {
        self.value = Some(value);
        self
    }

    /// Remove and return the semantic value
    pub fn take_value(&mut self) -> Option<TokenValue> {
        self.value.take()
    }

    /// Widen this token's span so it also covers `other`
    ///
    /// Parsers use this to grow a node's range as they consume its children.
    /// The text is left as matched.
    pub fn update_range(&mut self, other: &Self) {
        self.span = self.span.cover(&other.span);
    }
}

impl<K: TokenKind> fmt::Display for Token<'_, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} '{}'", self.kind, self.text)
    }
}
