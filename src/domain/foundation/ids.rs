//! Strongly-typed identifier value objects.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ValidationError;

/// Opaque chat identity of a room member (e.g. `@alice:example.org`).
///
/// This is the equality and lookup key for users; display names are
/// presentation only.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    /// Creates a new UserId, returning error if empty.
    pub fn new(id: impl Into<String>) -> Result<Self, ValidationError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(ValidationError::empty_field("user_id"));
        }
        Ok(Self(id))
    }

    /// Returns the inner string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Local part of a Matrix-style identity: `@alice:example.org` -> `alice`.
    ///
    /// Identities without the `@name:server` shape are returned unchanged.
    pub fn localpart(&self) -> &str {
        let without_sigil = self.0.strip_prefix('@').unwrap_or(&self.0);
        match without_sigil.split_once(':') {
            Some((local, _)) if !local.is_empty() => local,
            _ => &self.0,
        }
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Three-word, human-readable order identifier such as `drei-hungrige-pinguine`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderSlug(String);

impl OrderSlug {
    /// Joins three words into a slug. Words are lower-cased.
    pub fn from_words(number: &str, adjective: &str, noun: &str) -> Result<Self, ValidationError> {
        format!("{}-{}-{}", number, adjective, noun).parse()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Document filename for this order in the cached tier.
    pub fn filename(&self) -> String {
        format!("{}.toml", self.0)
    }
}

impl FromStr for OrderSlug {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let slug = s.trim().to_lowercase();
        let words: Vec<&str> = slug.split('-').collect();
        if words.len() != 3 {
            return Err(ValidationError::invalid_format(
                "order",
                "expected three words joined by '-'",
            ));
        }
        if words
            .iter()
            .any(|w| w.is_empty() || !w.chars().all(|c| c.is_ascii_alphanumeric()))
        {
            return Err(ValidationError::invalid_format(
                "order",
                "words may only contain letters and digits",
            ));
        }
        Ok(Self(slug))
    }
}

impl fmt::Display for OrderSlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Account number on the external tally ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LedgerAccountId(i64);

impl LedgerAccountId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for LedgerAccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
