//! State for the "Create new Node" dialog.

use crate::errors::{Error, ErrorCode, Result};

use super::nodes_model::{AddressInput, HostInput, NewNode, DEFAULT_ROOT_CONTEXT};

pub const DUPLICATE_NAME_MESSAGE: &str = "Name already in use. Please choose a new one.";
pub const INVALID_HOSTNAME_MESSAGE: &str = "Not a valid hostname.";
pub const INVALID_PORT_MESSAGE: &str =
    "Port is not in valid range. Valid range is between 0 and 65535.";

/// Inputs and field-level errors of the add-node form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeForm {
    pub name: String,
    pub hostname: String,
    /// Raw port input, parsed on submit.
    pub port: String,
    pub root_context: String,
    pub name_error: Option<String>,
    pub hostname_error: Option<String>,
    pub port_error: Option<String>,
}

impl Default for NodeForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            hostname: String::new(),
            port: String::new(),
            root_context: DEFAULT_ROOT_CONTEXT.to_string(),
            name_error: None,
            hostname_error: None,
            port_error: None,
        }
    }
}

impl NodeForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Save stays disabled until every required field has a value.
    pub fn can_submit(&self) -> bool {
        !self.name.is_empty()
            && !self.hostname.is_empty()
            && !self.port.is_empty()
            && !self.root_context.is_empty()
    }

    pub fn has_errors(&self) -> bool {
        self.name_error.is_some() || self.hostname_error.is_some() || self.port_error.is_some()
    }

    /// Build the create request. A non-numeric port is rejected locally; range checks are
    /// left to the hub.
    pub fn submit(&mut self) -> Result<NewNode> {
        if !self.can_submit() {
            return Err(Error::validation(
                "Name, hostname, port and root context are required",
            ));
        }
        self.name_error = None;
        self.hostname_error = None;
        self.port_error = None;

        let port = match self.port.trim().parse::<i32>() {
            Ok(port) => port,
            Err(_) => {
                self.port_error = Some(INVALID_PORT_MESSAGE.to_string());
                return Err(Error::validation(INVALID_PORT_MESSAGE));
            }
        };

        Ok(NewNode {
            name: self.name.clone(),
            address: AddressInput {
                host: HostInput {
                    hostname: self.hostname.clone(),
                    port,
                },
            },
            root_context: self.root_context.clone(),
        })
    }

    /// Map hub error codes onto the matching fields. Unrecognized codes are ignored.
    pub fn apply_errors(&mut self, codes: &[ErrorCode]) {
        for code in codes {
            match code {
                ErrorCode::DuplicateSite => {
                    self.name_error = Some(DUPLICATE_NAME_MESSAGE.to_string());
                }
                ErrorCode::InvalidHostname => {
                    self.hostname_error = Some(INVALID_HOSTNAME_MESSAGE.to_string());
                }
                ErrorCode::InvalidPortRange => {
                    self.port_error = Some(INVALID_PORT_MESSAGE.to_string());
                }
                other => log::debug!("Ignoring unmapped node error code {}", other),
            }
        }
    }

    /// Back to a blank dialog after success or cancel.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
