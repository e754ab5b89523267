//! Matchers decide how much of the remaining input a pattern claims
//!
//! Every matcher answers one question: starting at the first byte of `rest`,
//! how many bytes does this pattern match? Matches that start later in the
//! input do not count.

use std::fmt;

use regex::Regex;

/// Match-at-offset-zero capability
///
/// Implementations must be `Send + Sync` so a
/// [`PatternTable`](super::PatternTable) can be shared between threads, and
/// should run in time linear in the input: the scanner has no timeout.
pub trait Matcher: fmt::Debug + Send + Sync {
    /// Length in bytes of the match at the start of `rest`, or `None`
    ///
    /// A zero-length match is legal (end-of-input sentinels use it). The
    /// returned length must land on a `char` boundary of `rest`.
    fn match_len(&self, rest: &str) -> Option<usize>;
}

/// Regular-expression matcher, anchored at the start of the remaining input
#[derive(Debug, Clone)]
pub struct RegexMatcher {
    source: String,
    regex: Regex,
}

impl RegexMatcher {
    /// Compile `pattern`, anchoring it at the start of the input
    pub fn new(pattern: &str) -> Result<Self, regex::Error> {
        let regex = Regex::new(&format!(r"\A(?:{pattern})"))?;
        Ok(Self {
            source: pattern.to_string(),
            regex,
        })
    }

    /// The pattern as written, without the anchor
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.source
    }
}

impl Matcher for RegexMatcher {
    fn match_len(&self, rest: &str) -> Option<usize> {
        self.regex.find(rest).filter(|m| m.start() == 0).map(|m| m.end())
    }
}

/// Exact-text matcher
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiteralMatcher {
    literal: String,
    case_insensitive: bool,
}

impl LiteralMatcher {
    /// Match `literal` exactly
    #[must_use]
    pub fn new(literal: impl Into<String>) -> Self {
        Self {
            literal: literal.into(),
            case_insensitive: false,
        }
    }

    /// Match `literal` ignoring ASCII case (`if`, `IF` and `If` all match)
    #[must_use]
    pub fn ascii_case_insensitive(literal: impl Into<String>) -> Self {
        Self {
            literal: literal.into(),
            case_insensitive: true,
        }
    }

    /// The literal text
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.literal
    }
}

impl Matcher for LiteralMatcher {
    fn match_len(&self, rest: &str) -> Option<usize> {
        let len = self.literal.len();
        let head = rest.get(..len)?;
        let matched = if self.case_insensitive {
            head.eq_ignore_ascii_case(&self.literal)
        } else {
            head == self.literal
        };
        matched.then_some(len)
    }
}

/// Zero-length match that only succeeds once the input is exhausted
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EndOfInput;

impl Matcher for EndOfInput {
    fn match_len(&self, rest: &str) -> Option<usize> {
        rest.is_empty().then_some(0)
    }
}

/// Hand-written matcher backed by a closure
pub struct FnMatcher<F> {
    name: &'static str,
    func: F,
}

impl<F> FnMatcher<F>
where
    F: Fn(&str) -> Option<usize> + Send + Sync,
{
    /// Wrap `func`; `name` only shows up in debug output
    pub const fn new(name: &'static str, func: F) -> Self {
        Self { name, func }
    }
}

impl<F> fmt::Debug for FnMatcher<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnMatcher").field("name", &self.name).finish_non_exhaustive()
    }
}

impl<F> Matcher for FnMatcher<F>
where
    F: Fn(&str) -> Option<usize> + Send + Sync,
{
    fn match_len(&self, rest: &str) -> Option<usize> {
        (self.func)(rest)
    }
}
