//! State for the "Create new Replication" dialog.

use crate::errors::{Error, ErrorCode, Result};
use crate::hub::Pid;
use crate::nodes::{alphabetical, Node};
use crate::queries::SavedQuery;

use super::replications_model::{NewReplication, DEFAULT_PRIORITY, MAX_PRIORITY, MIN_PRIORITY};
use super::sort_policy::{join_filter, SortPolicy};

pub const INVALID_FILTER_MESSAGE: &str = "Invalid CQL Filter!";
pub const DUPLICATE_NAME_MESSAGE: &str = "Name already in use!";
pub const SAME_SITE_MESSAGE: &str = "Source and destination must be different nodes.";

/// Inputs and field-level errors of the add-replication form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplicationForm {
    pub name: String,
    pub source_id: Option<Pid>,
    pub destination_id: Option<Pid>,
    /// CQL part only. Sort policies are kept separately and appended on submit.
    pub filter: String,
    pub bi_directional: bool,
    pub priority: u8,
    pub sort_policies: Vec<SortPolicy>,
    pub name_error: Option<String>,
    pub filter_error: Option<String>,
    pub destination_error: Option<String>,
    /// Set while a create request is in flight.
    pub save_disabled: bool,
}

impl Default for ReplicationForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            source_id: None,
            destination_id: None,
            filter: String::new(),
            bi_directional: false,
            priority: DEFAULT_PRIORITY,
            sort_policies: Vec::new(),
            name_error: None,
            filter_error: None,
            destination_error: None,
            save_disabled: false,
        }
    }
}

impl ReplicationForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_complete(&self) -> bool {
        !self.name.trim().is_empty()
            && self.source_id.is_some()
            && self.destination_id.is_some()
            && !self.filter.trim().is_empty()
    }

    pub fn can_submit(&self) -> bool {
        self.is_complete() && !self.save_disabled
    }

    /// Nodes selectable as source: everything but the chosen destination, by name.
    pub fn source_options(&self, nodes: &[Node]) -> Vec<Node> {
        Self::options_excluding(nodes, self.destination_id.as_ref())
    }

    /// Nodes selectable as destination: everything but the chosen source, by name.
    pub fn destination_options(&self, nodes: &[Node]) -> Vec<Node> {
        Self::options_excluding(nodes, self.source_id.as_ref())
    }

    fn options_excluding(nodes: &[Node], excluded: Option<&Pid>) -> Vec<Node> {
        let mut options: Vec<Node> = nodes
            .iter()
            .filter(|node| Some(&node.id) != excluded)
            .cloned()
            .collect();
        options.sort_by(alphabetical);
        options
    }

    /// Fill the filter from a saved search, or clear it when the selection is cleared.
    pub fn select_query(&mut self, query: Option<&SavedQuery>) {
        self.filter = query.map(|q| q.cql.clone()).unwrap_or_default();
        self.filter_error = None;
    }

    pub fn add_sort(&mut self, policy: SortPolicy) {
        self.sort_policies.push(policy);
    }

    pub fn remove_sort(&mut self, index: usize) -> Option<SortPolicy> {
        (index < self.sort_policies.len()).then(|| self.sort_policies.remove(index))
    }

    pub fn change_sort(&mut self, index: usize, policy: SortPolicy) -> bool {
        match self.sort_policies.get_mut(index) {
            Some(slot) => {
                *slot = policy;
                true
            }
            None => false,
        }
    }

    /// Build the create request and lock the save button until the hub answers.
    pub fn submit(&mut self) -> Result<NewReplication> {
        if self.save_disabled {
            return Err(Error::validation("A save is already in progress"));
        }
        let (Some(source_id), Some(destination_id)) =
            (self.source_id.clone(), self.destination_id.clone())
        else {
            return Err(Error::validation("Source and destination nodes are required"));
        };
        if !self.is_complete() {
            return Err(Error::validation("Name and filter are required"));
        }
        if !(MIN_PRIORITY..=MAX_PRIORITY).contains(&self.priority) {
            return Err(Error::validation(format!(
                "Priority must be between {} and {}",
                MIN_PRIORITY, MAX_PRIORITY
            )));
        }

        self.name_error = None;
        self.filter_error = None;
        self.destination_error = None;
        self.save_disabled = true;

        Ok(NewReplication {
            name: self.name.trim().to_string(),
            source_id,
            destination_id,
            filter: join_filter(self.filter.trim(), &self.sort_policies),
            bi_directional: self.bi_directional,
            priority: self.priority,
        })
    }

    /// Map hub error codes onto fields and re-enable saving.
    pub fn apply_errors(&mut self, codes: &[ErrorCode]) {
        for code in codes {
            match code {
                ErrorCode::InvalidFilter => {
                    self.filter_error = Some(INVALID_FILTER_MESSAGE.to_string());
                }
                ErrorCode::DuplicateConfiguration => {
                    self.name_error = Some(DUPLICATE_NAME_MESSAGE.to_string());
                }
                ErrorCode::SameSite => {
                    self.destination_error = Some(SAME_SITE_MESSAGE.to_string());
                }
                other => log::debug!("Ignoring unmapped replication error code {}", other),
            }
        }
        self.save_disabled = false;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
