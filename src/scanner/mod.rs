//! Pattern-driven lexical scanner
//!
//! - [`PatternTable`] - immutable kind → matcher registry, built once
//! - [`Tokenizer`] - longest-match scanning with cached lookahead
//! - [`Token`] - a classified span of input
//!
//! A table is shared read-only; each input gets its own [`Tokenizer`]:
//!
//! ```
//! use std::thread;
//! use patscan::scanner::{PatternTable, RuleId, Tokenizer};
//!
//! let word = RuleId::nth(0);
//! let table = PatternTable::builder().regex(word, r"\w+").build().unwrap();
//!
//! thread::scope(|s| {
//!     for input in ["alpha", "beta"] {
//!         let table = &table;
//!         s.spawn(move || {
//!             let mut tokenizer = Tokenizer::with_input(table, input);
//!             assert_eq!(tokenizer.scan(&[]).unwrap().text(), input);
//!         });
//!     }
//! });
//! ```

mod error;
mod matcher;
mod rule;
mod state;
mod table;
mod token;
mod tokenizer;

pub use error::{PatternError, ScanError};
pub use matcher::{EndOfInput, FnMatcher, LiteralMatcher, Matcher, RegexMatcher};
pub use rule::RuleId;
pub use state::{Location, ScannerState};
pub use table::{Pattern, PatternTable, PatternTableBuilder};
pub use token::{Span, Token, TokenKind, TokenValue};
pub use tokenizer::{Tokenizer, Tokens};
