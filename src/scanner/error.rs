//! Scanner error types
//!
//! Configuration mistakes surface when a [`PatternTable`](super::PatternTable)
//! is built. Scanning itself only fails when the caller breaks the calling
//! contract; unmatched input is reported in-band as an `UNDETERMINED` token.

use thiserror::Error;

/// Errors detected while building a pattern table
#[derive(Debug, Error)]
pub enum PatternError {
    /// The same kind was registered twice
    #[error("kind {kind} is registered more than once")]
    DuplicateKind {
        /// The duplicated kind
        kind: String,
    },

    /// A kind was registered after a kind that orders after it
    #[error("kind {kind} registered after {previous} but orders before it")]
    OutOfOrder {
        /// The offending kind
        kind: String,
        /// The kind registered just before it
        previous: String,
    },

    /// NONE or UNDETERMINED was given a matcher
    #[error("sentinel kind {kind} cannot have a pattern")]
    SentinelKind {
        /// The sentinel kind
        kind: String,
    },

    /// A regular expression failed to compile
    #[error("invalid regex for kind {kind}: {source}")]
    InvalidRegex {
        /// The kind the regex was registered under
        kind: String,
        /// The compile error
        #[source]
        source: regex::Error,
    },

    /// A literal pattern with no text would match everywhere
    #[error("empty literal for kind {kind}")]
    EmptyLiteral {
        /// The kind the literal was registered under
        kind: String,
    },

    /// A skip kind has no pattern registered
    #[error("skip kind {kind} has no pattern")]
    UnknownSkipKind {
        /// The skip kind
        kind: String,
    },
}

/// Errors returned by the tokenizer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ScanError {
    /// `look_ahead` or `scan` was called before `init`
    #[error("tokenizer used before init")]
    NotInitialized,

    /// An offset outside the input or inside a multi-byte character
    #[error("offset {0} is not a character boundary of the input")]
    InvalidOffset(usize),
}
