//! Runtime token kinds for vocabularies that are only known after startup

use std::fmt;

use serde::{Deserialize, Serialize};

use super::token::TokenKind;

/// A token kind numbered by registration order
///
/// `0` and `1` are the sentinels; registered kinds start at
/// [`RuleId::nth(0)`](Self::nth).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuleId(u16);

impl RuleId {
    const FIRST: u16 = 2;

    /// Largest number of kinds a vocabulary can hold
    pub const MAX_RULES: usize = (u16::MAX - Self::FIRST) as usize + 1;

    /// The kind registered `n`th (0-based)
    ///
    /// # Panics
    ///
    /// Panics if `n` is not below [`MAX_RULES`](Self::MAX_RULES); in a const
    /// context that is a compile error. Use [`from_index`](Self::from_index)
    /// for untrusted indices.
    #[must_use]
    pub const fn nth(n: u16) -> Self {
        match n.checked_add(Self::FIRST) {
            Some(raw) => Self(raw),
            None => panic!("RuleId::nth index out of range"),
        }
    }

    /// The kind registered at `index`, if it fits
    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        u16::try_from(index).ok().and_then(|n| n.checked_add(Self::FIRST)).map(Self)
    }

    /// Registration index, or `None` for the sentinels
    #[must_use]
    pub const fn index(self) -> Option<usize> {
        match self.0.checked_sub(Self::FIRST) {
            Some(n) => Some(n as usize),
            None => None,
        }
    }

    /// The raw ordinal
    #[must_use]
    pub const fn raw(self) -> u16 {
        self.0
    }
}

impl TokenKind for RuleId {
    const NONE: Self = Self(0);
    const UNDETERMINED: Self = Self(1);
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.index() {
            Some(n) => write!(f, "#{n}"),
            None if *self == Self::NONE => write!(f, "NONE"),
            None => write!(f, "UNDETERMINED"),
        }
    }
}
