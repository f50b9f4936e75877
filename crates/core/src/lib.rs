//! Core of the replication hub console: domain models, the hub API contract, the normalized
//! cache and the services that keep it in step with the hub.

pub mod cache;
pub mod errors;
pub mod hub;
pub mod nodes;
pub mod notifications;
pub mod polling;
pub mod queries;
pub mod replications;
pub mod settings;
pub mod ui_config;
pub mod utils;

#[cfg(test)]
mod test_support;

pub use errors::{Error, ErrorCode, Result};
pub use hub::{HubApi, Pid};
