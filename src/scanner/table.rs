//! Pattern table: the per-kind matchers a tokenizer evaluates
//!
//! A table is built once and never changes afterwards. Registration order is
//! priority order, and [`PatternTableBuilder::build`] rejects registrations
//! that would let the two drift apart.

use std::collections::{HashMap, HashSet};

use log::debug;

use super::error::PatternError;
use super::matcher::{EndOfInput, LiteralMatcher, Matcher, RegexMatcher};
use super::token::TokenKind;

/// A kind paired with the matcher that recognises it
#[derive(Debug)]
pub struct Pattern<K> {
    kind: K,
    priority: usize,
    matcher: Box<dyn Matcher>,
}

impl<K: TokenKind> Pattern<K> {
    /// The kind this pattern produces
    #[must_use]
    pub const fn kind(&self) -> K {
        self.kind
    }

    /// Registration index; lower wins ties
    #[must_use]
    pub const fn priority(&self) -> usize {
        self.priority
    }

    /// The matcher
    #[must_use]
    pub fn matcher(&self) -> &dyn Matcher {
        self.matcher.as_ref()
    }

    /// Length of this pattern's match at the start of `rest`
    ///
    /// Lengths that overrun `rest` or split a character are discarded.
    #[must_use]
    pub fn match_len(&self, rest: &str) -> Option<usize> {
        let len = self.matcher.match_len(rest)?;
        if rest.is_char_boundary(len) {
            Some(len)
        } else {
            debug!("matcher for {} returned invalid length {len}; ignoring", self.kind);
            None
        }
    }
}

/// Immutable registry of patterns and skip kinds
///
/// Shareable read-only across any number of tokenizers, including ones on
/// other threads.
#[derive(Debug)]
pub struct PatternTable<K: TokenKind> {
    patterns: Vec<Pattern<K>>,
    index: HashMap<K, usize>,
    skip: HashSet<K>,
}

impl<K: TokenKind> PatternTable<K> {
    /// Start building a table
    #[must_use]
    pub fn builder() -> PatternTableBuilder<K> {
        PatternTableBuilder::new()
    }

    /// Pattern registered for `kind`
    #[must_use]
    pub fn lookup(&self, kind: K) -> Option<&Pattern<K>> {
        self.index.get(&kind).map(|&i| &self.patterns[i])
    }

    /// Priority (registration index) of `kind`
    #[must_use]
    pub fn priority(&self, kind: K) -> Option<usize> {
        self.index.get(&kind).copied()
    }

    /// All patterns, in priority order
    #[must_use]
    pub fn patterns(&self) -> &[Pattern<K>] {
        &self.patterns
    }

    /// All registered kinds, in priority order
    pub fn kinds(&self) -> impl Iterator<Item = K> + '_ {
        self.patterns.iter().map(|p| p.kind)
    }

    /// Whether `kind` is scanned but never surfaced
    #[must_use]
    pub fn is_skip(&self, kind: K) -> bool {
        self.skip.contains(&kind)
    }

    /// Skip kinds, in priority order
    pub fn skip_kinds(&self) -> impl Iterator<Item = K> + '_ {
        self.kinds().filter(|k| self.skip.contains(k))
    }

    /// Number of registered patterns
    #[must_use]
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// Check if no patterns are registered
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Patterns to evaluate for a lookahead over `candidates`
    ///
    /// Empty `candidates` means every pattern. Otherwise the candidates plus
    /// the skip kinds, deduplicated, in priority order. Unregistered
    /// candidates are ignored.
    pub(crate) fn scan_set(&self, candidates: &[K]) -> Vec<&Pattern<K>> {
        if candidates.is_empty() {
            return self.patterns.iter().collect();
        }
        let mut selected: Vec<usize> = candidates
            .iter()
            .filter_map(|k| self.index.get(k).copied())
            .chain(self.skip.iter().filter_map(|k| self.index.get(k).copied()))
            .collect();
        selected.sort_unstable();
        selected.dedup();
        selected.into_iter().map(|i| &self.patterns[i]).collect()
    }
}

/// Builder for [`PatternTable`]
///
/// Registration order is priority order. Mistakes are collected and reported
/// by [`build`](Self::build), so the chain itself never fails.
#[derive(Debug)]
pub struct PatternTableBuilder<K: TokenKind> {
    patterns: Vec<(K, Box<dyn Matcher>)>,
    skip: Vec<K>,
    errors: Vec<PatternError>,
}

impl<K: TokenKind> Default for PatternTableBuilder<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: TokenKind> PatternTableBuilder<K> {
    /// Create an empty builder
    #[must_use]
    pub const fn new() -> Self {
        Self {
            patterns: Vec::new(),
            skip: Vec::new(),
            errors: Vec::new(),
        }
    }

    /// Register an arbitrary matcher for `kind`
    #[must_use]
    pub fn pattern(mut self, kind: K, matcher: impl Matcher + 'static) -> Self {
        self.patterns.push((kind, Box::new(matcher)));
        self
    }

    /// Register an already boxed matcher for `kind`
    #[must_use]
    pub fn boxed(mut self, kind: K, matcher: Box<dyn Matcher>) -> Self {
        self.patterns.push((kind, matcher));
        self
    }

    /// Register a regular expression for `kind`
    #[must_use]
    pub fn regex(self, kind: K, pattern: &str) -> Self {
        match RegexMatcher::new(pattern) {
            Ok(matcher) => self.pattern(kind, matcher),
            Err(source) => self.fail(PatternError::InvalidRegex {
                kind: kind.to_string(),
                source,
            }),
        }
    }

    /// Register exact text for `kind`
    #[must_use]
    pub fn literal(self, kind: K, text: &str) -> Self {
        if text.is_empty() {
            return self.fail(PatternError::EmptyLiteral {
                kind: kind.to_string(),
            });
        }
        self.pattern(kind, LiteralMatcher::new(text))
    }

    /// Register the end-of-input sentinel for `kind`
    #[must_use]
    pub fn end_of_input(self, kind: K) -> Self {
        self.pattern(kind, EndOfInput)
    }

    /// Mark `kind` as skipped (scanned and logged, never returned)
    #[must_use]
    pub fn skip(mut self, kind: K) -> Self {
        self.skip.push(kind);
        self
    }

    fn fail(mut self, error: PatternError) -> Self {
        self.errors.push(error);
        self
    }

    /// Validate the registrations and freeze them into a table
    ///
    /// Fails on the first of: an earlier matcher error, a sentinel kind, a
    /// duplicate kind, a kind ordering before its predecessor, or a skip kind
    /// with no pattern.
    pub fn build(self) -> Result<PatternTable<K>, PatternError> {
        if let Some(error) = self.errors.into_iter().next() {
            return Err(error);
        }

        let mut patterns = Vec::with_capacity(self.patterns.len());
        let mut index = HashMap::with_capacity(self.patterns.len());
        let mut previous: Option<K> = None;

        for (priority, (kind, matcher)) in self.patterns.into_iter().enumerate() {
            if kind.is_sentinel() {
                return Err(PatternError::SentinelKind {
                    kind: kind.to_string(),
                });
            }
            if index.contains_key(&kind) {
                return Err(PatternError::DuplicateKind {
                    kind: kind.to_string(),
                });
            }
            if let Some(prev) = previous.filter(|&prev| kind < prev) {
                return Err(PatternError::OutOfOrder {
                    kind: kind.to_string(),
                    previous: prev.to_string(),
                });
            }
            index.insert(kind, priority);
            patterns.push(Pattern {
                kind,
                priority,
                matcher,
            });
            previous = Some(kind);
        }

        let mut skip = HashSet::with_capacity(self.skip.len());
        for kind in self.skip {
            if !index.contains_key(&kind) {
                return Err(PatternError::UnknownSkipKind {
                    kind: kind.to_string(),
                });
            }
            skip.insert(kind);
        }

        debug!("built pattern table: {} pattern(s), {} skip kind(s)", patterns.len(), skip.len());

        Ok(PatternTable {
            patterns,
            index,
            skip,
        })
    }
}
