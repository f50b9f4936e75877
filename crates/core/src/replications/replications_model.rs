//! Replication domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::cache::CacheEntity;
use crate::hub::Pid;
use crate::nodes::Node;

use super::status::ReplicationStatus;

/// Lowest and highest priority a replication can carry. 10 runs first.
pub const MIN_PRIORITY: u8 = 1;
pub const MAX_PRIORITY: u8 = 10;
pub const DEFAULT_PRIORITY: u8 = 6;

/// A configured transfer job between two nodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Replication {
    pub id: Pid,
    pub name: String,
    pub source: Node,
    pub destination: Node,
    #[serde(default)]
    pub bi_directional: bool,
    /// CQL filter, optionally followed by `::` and a serialized sort-policy list.
    #[serde(default)]
    pub filter: String,
    #[serde(default)]
    pub suspended: bool,
    #[serde(default = "default_priority")]
    pub priority: u8,
    #[serde(default)]
    pub stats: ReplicationStats,
}

fn default_priority() -> u8 {
    DEFAULT_PRIORITY
}

/// Execution statistics reported by the hub.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplicationStats {
    /// Raw status code. Kept as text so codes this console does not know still load.
    #[serde(default)]
    pub replication_status: Option<String>,
    #[serde(default)]
    pub push_count: u64,
    #[serde(default)]
    pub pull_count: u64,
    #[serde(default)]
    pub push_bytes: u64,
    #[serde(default)]
    pub pull_bytes: u64,
    #[serde(default)]
    pub last_run: Option<DateTime<Utc>>,
    #[serde(default)]
    pub last_success: Option<DateTime<Utc>>,
    #[serde(default)]
    pub start_time: Option<DateTime<Utc>>,
}

impl ReplicationStats {
    pub fn status(&self) -> Option<ReplicationStatus> {
        self.replication_status
            .as_deref()
            .and_then(ReplicationStatus::parse)
    }

    pub fn set_status(&mut self, status: ReplicationStatus) {
        self.replication_status = Some(status.as_str().to_string());
    }

    pub fn items_transferred(&self) -> u64 {
        self.push_count.saturating_add(self.pull_count)
    }

    pub fn bytes_transferred(&self) -> u64 {
        self.push_bytes.saturating_add(self.pull_bytes)
    }
}

impl Replication {
    pub fn status(&self) -> Option<ReplicationStatus> {
        self.stats.status()
    }

    /// Either endpoint is run by an external controller.
    pub fn is_remote_managed(&self) -> bool {
        self.source.remote_managed || self.destination.remote_managed
    }
}

impl CacheEntity for Replication {
    const TYPENAME: &'static str = "ReplicationConfig";

    fn entity_id(&self) -> &Pid {
        &self.id
    }
}

/// Variables for `createReplication`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewReplication {
    pub name: String,
    pub source_id: Pid,
    pub destination_id: Pid,
    pub filter: String,
    pub bi_directional: bool,
    pub priority: u8,
}

/// Variables for `updateReplication`. Absent fields are left unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplicationUpdate {
    pub id: Pid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_id: Option<Pid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination_id: Option<Pid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bi_directional: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suspended: Option<bool>,
}

impl ReplicationUpdate {
    pub fn new(id: Pid) -> Self {
        Self {
            id,
            name: None,
            source_id: None,
            destination_id: None,
            filter: None,
            bi_directional: None,
            suspended: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.source_id.is_none()
            && self.destination_id.is_none()
            && self.filter.is_none()
            && self.bi_directional.is_none()
            && self.suspended.is_none()
    }
}
