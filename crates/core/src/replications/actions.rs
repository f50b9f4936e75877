//! Row actions offered for a replication.

use crate::errors::{Error, Result};

use super::replications_model::Replication;
use super::status::cancelable;

/// An entry of the per-row actions menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReplicationAction {
    Run,
    Cancel,
    Delete,
    Suspend,
    Enable,
}

impl ReplicationAction {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Run => "Run",
            Self::Cancel => "Cancel",
            Self::Delete => "Delete",
            Self::Suspend => "Disable",
            Self::Enable => "Enable",
        }
    }
}

/// Actions available for the replication's current state, in menu order.
///
/// Run and Cancel are mutually exclusive, as are Suspend and Enable.
pub fn allowed_actions(replication: &Replication) -> Vec<ReplicationAction> {
    let run_or_cancel = if cancelable(replication) {
        ReplicationAction::Cancel
    } else {
        ReplicationAction::Run
    };
    let toggle = if replication.suspended {
        ReplicationAction::Enable
    } else {
        ReplicationAction::Suspend
    };
    vec![run_or_cancel, ReplicationAction::Delete, toggle]
}

pub fn ensure_allowed(replication: &Replication, action: ReplicationAction) -> Result<()> {
    if allowed_actions(replication).contains(&action) {
        return Ok(());
    }
    Err(Error::validation(format!(
        "{} is not available for {} in its current state",
        action.label(),
        replication.name
    )))
}
