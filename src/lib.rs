//! patscan - A pattern-driven lexical scanner
//!
//! Converts an input string into classified tokens using an ordered table of
//! per-kind matchers. Ambiguity is resolved by longest match, then by
//! registration order. Whitespace and comment kinds can be skipped (and
//! logged), and one token of lookahead is cached so a recursive-descent
//! parser can peek without re-scanning.

// Deny all clippy warnings in this crate
#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    missing_debug_implementations,
    missing_copy_implementations,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code,
    unused_import_braces,
    unused_qualifications
)]
// Allow some pedantic lints that are too noisy or not applicable
#![allow(
    clippy::module_name_repetitions,
    clippy::missing_errors_doc,
    clippy::cargo_common_metadata
)]

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod output;
pub mod scanner;
pub mod vocabulary;

pub use scanner::{PatternTable, Token, TokenKind, Tokenizer};
