//! Saved searches offered as filter presets.

use serde::{Deserialize, Serialize};

/// A saved search on the hub. Read-only reference data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedQuery {
    pub cql: String,
    pub title: String,
}

/// Find a saved search by title, ignoring case.
pub fn find_by_title<'a>(queries: &'a [SavedQuery], title: &str) -> Option<&'a SavedQuery> {
    queries
        .iter()
        .find(|q| q.title.eq_ignore_ascii_case(title.trim()))
}
