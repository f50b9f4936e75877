//! Nodes (sites): registered remote replication endpoints.

mod node_form;
mod nodes_model;
mod nodes_service;

pub use node_form::*;
pub use nodes_model::*;
pub use nodes_service::*;
