//! In-memory hub for command tests.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use hubconsole_core::nodes::{NewNode, Node, NodeAddress, NodeUpdate};
use hubconsole_core::queries::SavedQuery;
use hubconsole_core::replications::{
    NewReplication, Replication, ReplicationStats, ReplicationUpdate, DEFAULT_PRIORITY,
};
use hubconsole_core::ui_config::UiConfig;
use hubconsole_core::{Error, HubApi, Pid, Result};
use hubconsole_storage_sqlite::SettingsRepository;

use crate::context::ServiceContext;

pub fn node(id: &str, name: &str) -> Node {
    Node {
        id: Pid::new(id),
        name: name.to_string(),
        remote_managed: false,
        address: NodeAddress {
            url: format!("https://{}:8993/services", name.to_lowercase()),
        },
    }
}

pub fn replication(id: &str, name: &str) -> Replication {
    Replication {
        id: Pid::new(id),
        name: name.to_string(),
        source: node("src", "Source"),
        destination: node("dst", "Destination"),
        bi_directional: false,
        filter: "anyText like '*'".to_string(),
        suspended: false,
        priority: DEFAULT_PRIORITY,
        stats: ReplicationStats::default(),
    }
}

/// Serves fixed lists and records every mutation it receives.
#[derive(Default)]
pub struct RecordingHub {
    pub nodes: Vec<Node>,
    pub replications: Vec<Replication>,
    pub(crate) mutations: Mutex<Vec<String>>,
}

impl RecordingHub {
    pub fn mutations(&self) -> Vec<String> {
        self.mutations
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }

    fn record(&self, mutation: String) {
        self.mutations
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .push(mutation);
    }
}

#[async_trait]
impl HubApi for RecordingHub {
    async fn replications(&self) -> Result<Vec<Replication>> {
        Ok(self.replications.clone())
    }

    async fn nodes(&self) -> Result<Vec<Node>> {
        Ok(self.nodes.clone())
    }

    async fn saved_queries(&self) -> Result<Vec<SavedQuery>> {
        Ok(Vec::new())
    }

    async fn ui_config(&self) -> Result<UiConfig> {
        Ok(UiConfig::default())
    }

    async fn create_replication(&self, input: NewReplication) -> Result<Replication> {
        self.record(format!("create_replication {}", input.name));
        Err(Error::validation("not supported"))
    }

    async fn update_replication(&self, input: ReplicationUpdate) -> Result<bool> {
        self.record(format!("update_replication {}", input.id));
        Ok(true)
    }

    async fn suspend_replication(&self, id: &Pid, suspend: bool) -> Result<bool> {
        self.record(format!("suspend_replication {} {}", id, suspend));
        Ok(true)
    }

    async fn cancel_replication(&self, id: &Pid) -> Result<bool> {
        self.record(format!("cancel_replication {}", id));
        Ok(true)
    }

    async fn run_replication(&self, id: &Pid) -> Result<bool> {
        self.record(format!("run_replication {}", id));
        Ok(true)
    }

    async fn delete_replication(&self, id: &Pid, delete_data: bool) -> Result<bool> {
        self.record(format!("delete_replication {} {}", id, delete_data));
        Ok(true)
    }

    async fn change_priority(&self, id: &Pid, priority: u8) -> Result<bool> {
        self.record(format!("change_priority {} {}", id, priority));
        Ok(true)
    }

    async fn create_node(&self, input: NewNode) -> Result<Node> {
        self.record(format!("create_node {}", input.name));
        Err(Error::validation("not supported"))
    }

    async fn update_node(&self, input: NodeUpdate) -> Result<bool> {
        self.record(format!("update_node {}", input.id));
        Ok(true)
    }

    async fn delete_node(&self, id: &Pid) -> Result<bool> {
        self.record(format!("delete_node {}", id));
        Ok(true)
    }
}

pub fn context(hub: Arc<RecordingHub>) -> ServiceContext {
    let conn = hubconsole_storage_sqlite::open_in_memory().unwrap();
    ServiceContext::new(hub, Arc::new(SettingsRepository::new(conn)), false)
}
