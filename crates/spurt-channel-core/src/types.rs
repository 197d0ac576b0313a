//! Core selection types: category identifiers and change notifications.

use std::borrow::Borrow;
use std::fmt;
use std::str::FromStr;

use smol_str::SmolStr;

use crate::error::SelectionError;
use crate::trigger::TriggerKind;

/// Opaque identifier of a selectable category.
///
/// Always non-empty. Surrounding whitespace is trimmed on parse, the rest of
/// the token is kept verbatim.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CategoryId(SmolStr);

impl CategoryId {
    /// Parse a raw attribute value into an identifier.
    pub fn new(raw: &str) -> Result<Self, SelectionError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(SelectionError::EmptyCategoryId);
        }
        Ok(Self(SmolStr::new(trimmed)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for CategoryId {
    type Err = SelectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<&str> for CategoryId {
    type Error = SelectionError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl TryFrom<String> for CategoryId {
    type Error = SelectionError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(&s)
    }
}

impl AsRef<str> for CategoryId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for CategoryId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl PartialEq<str> for CategoryId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for CategoryId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// What a completed dispatch did to the selection.
///
/// Delivered to every subscriber once per dispatch that touched the set,
/// including dispatches whose add/remove turned out to be no-ops.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectionChange {
    /// Identifiers inserted by this dispatch, in insertion order.
    pub added: Vec<CategoryId>,
    /// Identifiers dropped by this dispatch.
    pub removed: Vec<CategoryId>,
    /// The full selection after the dispatch committed.
    pub selected: Vec<CategoryId>,
    /// The binding that fired, or `None` for programmatic dispatch.
    pub source: Option<TriggerKind>,
}

impl SelectionChange {
    /// True when the dispatch left the selection as it was, order included.
    ///
    /// An id removed and re-added at a different position shows up in both
    /// `removed` and `added`.
    pub fn is_noop(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }
}
