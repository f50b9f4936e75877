//! Status derivation and ordering helpers for replications.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use super::replications_model::Replication;

/// Last-run status reported by the hub.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReplicationStatus {
    Success,
    Pending,
    Suspended,
    Canceled,
    PullInProgress,
    PushInProgress,
    Failure,
    ConnectionLost,
    ConnectionUnavailable,
    NotRun,
}

impl ReplicationStatus {
    pub const ALL: [ReplicationStatus; 10] = [
        Self::Success,
        Self::Pending,
        Self::Suspended,
        Self::Canceled,
        Self::PullInProgress,
        Self::PushInProgress,
        Self::Failure,
        Self::ConnectionLost,
        Self::ConnectionUnavailable,
        Self::NotRun,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "SUCCESS",
            Self::Pending => "PENDING",
            Self::Suspended => "SUSPENDED",
            Self::Canceled => "CANCELED",
            Self::PullInProgress => "PULL_IN_PROGRESS",
            Self::PushInProgress => "PUSH_IN_PROGRESS",
            Self::Failure => "FAILURE",
            Self::ConnectionLost => "CONNECTION_LOST",
            Self::ConnectionUnavailable => "CONNECTION_UNAVAILABLE",
            Self::NotRun => "NOT_RUN",
        }
    }

    pub fn parse(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|status| status.as_str() == code)
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Success => "Success",
            Self::Pending => "Pending",
            Self::Suspended => "Suspended",
            Self::Canceled => "Canceled",
            Self::PullInProgress => "Pulling resources...",
            Self::PushInProgress => "Pushing resources...",
            Self::Failure => "Failure",
            Self::ConnectionLost => "Connection Lost",
            Self::ConnectionUnavailable => "Connection Unavailable",
            Self::NotRun => "Not run",
        }
    }

    pub fn is_in_progress(&self) -> bool {
        matches!(self, Self::PullInProgress | Self::PushInProgress)
    }

    pub fn is_cancelable(&self) -> bool {
        matches!(
            self,
            Self::PullInProgress | Self::PushInProgress | Self::Pending
        )
    }
}

/// Human label for the replication's status, `None` for codes without a mapping.
pub fn status_display_name(replication: &Replication) -> Option<&'static str> {
    replication.status().map(|s| s.display_name())
}

pub fn cancelable(replication: &Replication) -> bool {
    replication.status().is_some_and(|s| s.is_cancelable())
}

pub fn is_in_progress(replication: &Replication) -> bool {
    replication.status().is_some_and(|s| s.is_in_progress())
}

/// Table order: idle replications by name, then in-progress ones by name.
///
/// An in-progress replication always sorts after one that is not. Ties fall back to the id
/// so the order is total and stable across polls.
pub fn rep_sort(a: &Replication, b: &Replication) -> Ordering {
    is_in_progress(a)
        .cmp(&is_in_progress(b))
        .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
        .then_with(|| a.id.cmp(&b.id))
}

/// Priority bucket label with the numeric value, e.g. `High (9)`.
pub fn priority_string(priority: u8) -> String {
    let bucket = match priority {
        8..=u8::MAX => "High",
        4..=7 => "Medium",
        _ => "Low",
    };
    format!("{} ({})", bucket, priority)
}
