//! Insertion-ordered set of selected category identifiers.
//!
//! The channel builder keeps selections small (tens of categories at most),
//! so membership is a linear scan over a `Vec`. That keeps ordering trivial
//! and matches the order categories were picked in the UI.

use crate::types::CategoryId;

/// Ordered, duplicate-free list of selected categories.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SelectionSet {
    ids: Vec<CategoryId>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `id` unless it is already selected.
    ///
    /// Returns true if the set changed.
    pub fn add(&mut self, id: CategoryId) -> bool {
        if self.contains(id.as_str()) {
            return false;
        }
        self.ids.push(id);
        true
    }

    /// Drop `id` from the set. Absent identifiers are ignored.
    ///
    /// Returns true if the set changed.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.ids.len();
        self.ids.retain(|existing| existing.as_str() != id);
        self.ids.len() != before
    }

    /// A copy of this set without `id`.
    pub fn without(&self, id: &str) -> Self {
        let mut next = self.clone();
        next.remove(id);
        next
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.iter().any(|existing| existing.as_str() == id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CategoryId> {
        self.ids.iter()
    }

    pub fn as_slice(&self) -> &[CategoryId] {
        &self.ids
    }

    pub fn to_vec(&self) -> Vec<CategoryId> {
        self.ids.clone()
    }
}

impl<'a> IntoIterator for &'a SelectionSet {
    type Item = &'a CategoryId;
    type IntoIter = std::slice::Iter<'a, CategoryId>;

    fn into_iter(self) -> Self::IntoIter {
        self.ids.iter()
    }
}

impl FromIterator<CategoryId> for SelectionSet {
    fn from_iter<I: IntoIterator<Item = CategoryId>>(iter: I) -> Self {
        let mut set = SelectionSet::new();
        for id in iter {
            set.add(id);
        }
        set
    }
}
