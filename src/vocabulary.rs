//! Token vocabularies declared in TOML
//!
//! A vocabulary file lists token kinds in priority order plus the kinds to
//! skip. Loading one produces a [`PatternTable`] keyed by [`RuleId`], with
//! the names kept alongside for display.
//!
//! ```toml
//! skip = ["WHITESPACE"]
//!
//! [[token]]
//! name = "INTEGER"
//! regex = "[0-9]+"
//!
//! [[token]]
//! name = "IF"
//! literal = "if"
//! case_insensitive = true
//!
//! [[token]]
//! name = "EOF"
//! end_of_input = true
//!
//! [[token]]
//! name = "WHITESPACE"
//! regex = '\s+'
//! ```

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use log::debug;
use serde::Deserialize;
use thiserror::Error;

use crate::scanner::{
    LiteralMatcher, PatternError, PatternTable, PatternTableBuilder, RegexMatcher, RuleId, TokenKind,
};

/// Errors that can occur when loading a vocabulary
#[derive(Debug, Error)]
pub enum VocabularyError {
    /// The file could not be read
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// The file is not valid TOML or has unexpected fields
    #[error("invalid vocabulary file: {0}")]
    Toml(#[from] toml::de::Error),

    /// The pattern table rejected the registrations
    #[error(transparent)]
    Pattern(#[from] PatternError),

    /// A token entry names no matcher
    #[error("token {0} needs one of regex, literal or end_of_input")]
    MissingMatcher(String),

    /// A token entry names more than one matcher
    #[error("token {0} sets more than one of regex, literal and end_of_input")]
    AmbiguousMatcher(String),

    /// A name was used that the vocabulary does not define
    #[error("unknown token name: {0}")]
    UnknownName(String),

    /// A token was named after a sentinel
    #[error("token name {0} is reserved")]
    ReservedName(String),

    /// The same name appears twice
    #[error("token {0} is declared more than once")]
    DuplicateName(String),

    /// More tokens than a [`RuleId`] can number
    #[error("too many tokens: {0} (at most {max})", max = RuleId::MAX_RULES)]
    TooManyKinds(usize),
}

/// A vocabulary file as written on disk
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct VocabularyFile {
    /// Names of kinds that are scanned but not returned
    #[serde(default)]
    skip: Vec<String>,

    /// Token entries, in priority order
    #[serde(default, rename = "token")]
    tokens: Vec<TokenEntry>,
}

/// One `[[token]]` entry
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct TokenEntry {
    name: String,
    regex: Option<String>,
    literal: Option<String>,
    #[serde(default)]
    case_insensitive: bool,
    #[serde(default)]
    end_of_input: bool,
}

/// A loaded vocabulary: named kinds plus their pattern table
#[derive(Debug)]
pub struct Vocabulary {
    names: Vec<String>,
    by_name: HashMap<String, RuleId>,
    table: PatternTable<RuleId>,
}

impl Vocabulary {
    /// Load a vocabulary from a TOML file
    pub fn load(path: &Path) -> Result<Self, VocabularyError> {
        let content = fs::read_to_string(path)?;
        debug!("loading vocabulary from {}", path.display());
        Self::from_toml_str(&content)
    }

    /// Parse a vocabulary from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self, VocabularyError> {
        let file: VocabularyFile = toml::from_str(content)?;
        Self::from_file(file)
    }

    fn from_file(file: VocabularyFile) -> Result<Self, VocabularyError> {
        if file.tokens.len() > RuleId::MAX_RULES {
            return Err(VocabularyError::TooManyKinds(file.tokens.len()));
        }

        let mut names = Vec::with_capacity(file.tokens.len());
        let mut by_name = HashMap::with_capacity(file.tokens.len());
        let mut builder = PatternTableBuilder::new();

        for (index, entry) in file.tokens.into_iter().enumerate() {
            if entry.name == "NONE" || entry.name == "UNDETERMINED" {
                return Err(VocabularyError::ReservedName(entry.name));
            }
            let id = RuleId::from_index(index).ok_or(VocabularyError::TooManyKinds(index + 1))?;
            if by_name.insert(entry.name.clone(), id).is_some() {
                return Err(VocabularyError::DuplicateName(entry.name));
            }
            builder = register(builder, id, &entry)?;
            names.push(entry.name);
        }

        for name in &file.skip {
            let id = by_name.get(name).copied().ok_or_else(|| VocabularyError::UnknownName(name.clone()))?;
            builder = builder.skip(id);
        }

        let table = builder.build()?;
        debug!("vocabulary loaded: {} token kind(s)", names.len());
        Ok(Self {
            names,
            by_name,
            table,
        })
    }

    /// The pattern table
    #[must_use]
    pub const fn table(&self) -> &PatternTable<RuleId> {
        &self.table
    }

    /// Name of a kind; sentinels map to `NONE` / `UNDETERMINED`
    #[must_use]
    pub fn name(&self, id: RuleId) -> &str {
        if id == RuleId::NONE {
            "NONE"
        } else if id == RuleId::UNDETERMINED {
            "UNDETERMINED"
        } else {
            id.index().and_then(|i| self.names.get(i)).map_or("?", String::as_str)
        }
    }

    /// Kind registered under `name`
    #[must_use]
    pub fn id(&self, name: &str) -> Option<RuleId> {
        self.by_name.get(name).copied()
    }

    /// Resolve a list of names to kinds
    pub fn ids<S: AsRef<str>>(&self, names: &[S]) -> Result<Vec<RuleId>, VocabularyError> {
        names
            .iter()
            .map(|n| {
                let n = n.as_ref();
                self.id(n).ok_or_else(|| VocabularyError::UnknownName(n.to_string()))
            })
            .collect()
    }

    /// Token names, in priority order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    /// Number of token kinds
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Check if the vocabulary defines no tokens
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

fn register(
    builder: PatternTableBuilder<RuleId>,
    id: RuleId,
    entry: &TokenEntry,
) -> Result<PatternTableBuilder<RuleId>, VocabularyError> {
    let builder = match (&entry.regex, &entry.literal, entry.end_of_input) {
        (Some(regex), None, false) => {
            let matcher = RegexMatcher::new(regex).map_err(|source| PatternError::InvalidRegex {
                kind: entry.name.clone(),
                source,
            })?;
            builder.pattern(id, matcher)
        },
        (None, Some(literal), false) if literal.is_empty() => {
            return Err(PatternError::EmptyLiteral {
                kind: entry.name.clone(),
            }
            .into());
        },
        (None, Some(literal), false) if entry.case_insensitive => {
            builder.pattern(id, LiteralMatcher::ascii_case_insensitive(literal.as_str()))
        },
        (None, Some(literal), false) => builder.pattern(id, LiteralMatcher::new(literal.as_str())),
        (None, None, true) => builder.end_of_input(id),
        (None, None, false) => return Err(VocabularyError::MissingMatcher(entry.name.clone())),
        _ => return Err(VocabularyError::AmbiguousMatcher(entry.name.clone())),
    };
    Ok(builder)
}
