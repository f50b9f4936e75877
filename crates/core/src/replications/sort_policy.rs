//! Sort policies serialized after the CQL part of a replication filter.
//!
//! A filter looks like `<cql>::[{"attribute":"created","direction":"ascending"}]`. The
//! suffix is optional; without it the hub sorts by `modified`, newest first.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

pub const FILTER_SEPARATOR: &str = "::";
pub const DEFAULT_SORT_ATTRIBUTE: &str = "modified";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ascending => "ascending",
            Self::Descending => "descending",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortPolicy {
    pub attribute: String,
    pub direction: SortDirection,
}

impl SortPolicy {
    pub fn new(attribute: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            attribute: attribute.into(),
            direction,
        }
    }

    pub fn default_policy() -> Self {
        Self::new(DEFAULT_SORT_ATTRIBUTE, SortDirection::Descending)
    }
}

impl std::fmt::Display for SortPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let arrow = match self.direction {
            SortDirection::Ascending => '↑',
            SortDirection::Descending => '↓',
        };
        write!(f, "{} {}", self.attribute, arrow)
    }
}

/// Parses `attribute[:asc|:desc]`, defaulting to ascending.
impl FromStr for SortPolicy {
    type Err = String;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let (attribute, direction) = match input.rsplit_once(':') {
            Some((attribute, direction)) => (attribute, Some(direction)),
            None => (input, None),
        };
        let attribute = attribute.trim();
        if attribute.is_empty() {
            return Err(format!("missing attribute name in '{}'", input));
        }
        let direction = match direction.map(|d| d.trim().to_ascii_lowercase()) {
            None => SortDirection::Ascending,
            Some(d) if d == "asc" || d == "ascending" => SortDirection::Ascending,
            Some(d) if d == "desc" || d == "descending" => SortDirection::Descending,
            Some(d) => return Err(format!("unknown sort direction '{}'", d)),
        };
        Ok(Self::new(attribute, direction))
    }
}

/// A filter split into its CQL and sort-policy parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterParts {
    pub cql: String,
    pub sorts: Vec<SortPolicy>,
}

impl FilterParts {
    /// Sorts to display: the explicit ones, or the hub's default.
    pub fn effective_sorts(&self) -> Vec<SortPolicy> {
        if self.sorts.is_empty() {
            vec![SortPolicy::default_policy()]
        } else {
            self.sorts.clone()
        }
    }
}

pub fn split_filter(filter: &str) -> FilterParts {
    let Some((cql, suffix)) = filter.split_once(FILTER_SEPARATOR) else {
        return FilterParts {
            cql: filter.to_string(),
            sorts: Vec::new(),
        };
    };

    let suffix = suffix.trim();
    let sorts = if suffix.is_empty() || suffix == "[]" {
        Vec::new()
    } else {
        serde_json::from_str::<Vec<SortPolicy>>(suffix).unwrap_or_else(|err| {
            log::debug!("Ignoring unreadable sort policies '{}': {}", suffix, err);
            Vec::new()
        })
    };

    FilterParts {
        cql: cql.to_string(),
        sorts,
    }
}

/// Serialize CQL plus sort policies back into a single filter string.
pub fn join_filter(cql: &str, sorts: &[SortPolicy]) -> String {
    if sorts.is_empty() {
        return cql.to_string();
    }
    match serde_json::to_string(sorts) {
        Ok(json) => format!("{}{}{}", cql, FILTER_SEPARATOR, json),
        Err(err) => {
            log::warn!("Dropping sort policies that failed to serialize: {}", err);
            cql.to_string()
        }
    }
}
