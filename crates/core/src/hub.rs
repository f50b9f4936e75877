//! Contract for the remote hub's GraphQL admin API.
//!
//! Every entity is owned by the hub. The console only mirrors what these operations
//! return, so implementations must not cache or reorder results themselves.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::errors::Result;
use crate::nodes::{NewNode, Node, NodeUpdate};
use crate::queries::SavedQuery;
use crate::replications::{NewReplication, Replication, ReplicationUpdate};
use crate::ui_config::UiConfig;

/// Opaque entity identifier issued by the hub. Never parsed or built locally.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Pid(String);

impl Pid {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Pid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Pid {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Queries and mutations exposed under `/admin/hub/graphql`.
#[async_trait]
pub trait HubApi: Send + Sync {
    async fn replications(&self) -> Result<Vec<Replication>>;
    async fn nodes(&self) -> Result<Vec<Node>>;
    async fn saved_queries(&self) -> Result<Vec<SavedQuery>>;
    async fn ui_config(&self) -> Result<UiConfig>;

    async fn create_replication(&self, input: NewReplication) -> Result<Replication>;
    async fn update_replication(&self, input: ReplicationUpdate) -> Result<bool>;
    async fn suspend_replication(&self, id: &Pid, suspend: bool) -> Result<bool>;
    async fn cancel_replication(&self, id: &Pid) -> Result<bool>;
    async fn run_replication(&self, id: &Pid) -> Result<bool>;
    async fn delete_replication(&self, id: &Pid, delete_data: bool) -> Result<bool>;
    async fn change_priority(&self, id: &Pid, priority: u8) -> Result<bool>;

    async fn create_node(&self, input: NewNode) -> Result<Node>;
    async fn update_node(&self, input: NodeUpdate) -> Result<bool>;
    async fn delete_node(&self, id: &Pid) -> Result<bool>;
}
