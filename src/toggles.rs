//! Immutable expand/collapse toggle sets.
//!
//! Every operation returns a new set, so consumers can detect change by
//! comparing the old and new values.

use std::collections::HashSet;

/// Set of item identifiers currently expanded.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ToggleSet {
    ids: HashSet<String>,
}

impl ToggleSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Membership test.
    #[must_use]
    pub fn has(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    /// Flip one id's membership, returning the resulting set.
    #[must_use]
    pub fn toggle(&self, id: &str) -> Self {
        let mut ids = self.ids.clone();
        if !ids.remove(id) {
            ids.insert(id.to_string());
        }
        Self { ids }
    }

    /// Replace the set wholesale with the given ids.
    #[must_use]
    pub fn expand_all<I, S>(&self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            ids: ids.into_iter().map(Into::into).collect(),
        }
    }

    /// Empty the set.
    #[must_use]
    pub fn collapse_all(&self) -> Self {
        Self::new()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}
