//! In-memory hub used by service tests.

use async_trait::async_trait;
use std::sync::Mutex;

use crate::errors::{Error, Result};
use crate::hub::{HubApi, Pid};
use crate::nodes::{derive_url, NewNode, Node, NodeAddress, NodeUpdate};
use crate::queries::SavedQuery;
use crate::replications::{
    NewReplication, Replication, ReplicationStats, ReplicationStatus, ReplicationUpdate,
    DEFAULT_PRIORITY,
};
use crate::ui_config::UiConfig;

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

/// A replication between two local nodes whose last run succeeded.
pub fn replication(id: &str, name: &str) -> Replication {
    let mut stats = ReplicationStats::default();
    stats.set_status(ReplicationStatus::Success);
    Replication {
        id: Pid::new(id),
        name: name.to_string(),
        source: node("src", "Source"),
        destination: node("dst", "Destination"),
        bi_directional: false,
        filter: "anyText like '*'".to_string(),
        suspended: false,
        priority: DEFAULT_PRIORITY,
        stats,
    }
}

struct MockState {
    nodes: Vec<Node>,
    replications: Vec<Replication>,
    saved_queries: Vec<SavedQuery>,
    ui_config: UiConfig,
    query_failure: Option<String>,
    mutation_failure: Option<Vec<String>>,
    mutation_result: bool,
    last_delete_data: Option<bool>,
    query_count: usize,
    next_id: u32,
}

pub struct MockHub {
    state: Mutex<MockState>,
}

impl Default for MockHub {
    fn default() -> Self {
        Self {
            state: Mutex::new(MockState {
                nodes: Vec::new(),
                replications: Vec::new(),
                saved_queries: Vec::new(),
                ui_config: UiConfig::default(),
                query_failure: None,
                mutation_failure: None,
                mutation_result: true,
                last_delete_data: None,
                query_count: 0,
                next_id: 100,
            }),
        }
    }
}

impl MockHub {
    pub fn set_nodes(&self, nodes: Vec<Node>) {
        self.state.lock().unwrap().nodes = nodes;
    }

    pub fn set_replications(&self, replications: Vec<Replication>) {
        self.state.lock().unwrap().replications = replications;
    }

    pub fn set_saved_queries(&self, queries: Vec<SavedQuery>) {
        self.state.lock().unwrap().saved_queries = queries;
    }

    pub fn fail_queries(&self, message: &str) {
        self.state.lock().unwrap().query_failure = Some(message.to_string());
    }

    pub fn fail_mutations_with(&self, codes: &[&str]) {
        self.state.lock().unwrap().mutation_failure =
            Some(codes.iter().map(|c| c.to_string()).collect());
    }

    pub fn clear_failures(&self) {
        let mut state = self.state.lock().unwrap();
        state.query_failure = None;
        state.mutation_failure = None;
    }

    /// Value returned by the boolean mutations.
    pub fn set_mutation_result(&self, result: bool) {
        self.state.lock().unwrap().mutation_result = result;
    }

    pub fn last_delete_data(&self) -> Option<bool> {
        self.state.lock().unwrap().last_delete_data
    }

    /// Number of list queries served.
    pub fn query_count(&self) -> usize {
        self.state.lock().unwrap().query_count
    }

    fn query<T>(&self, read: impl FnOnce(&MockState) -> T) -> Result<T> {
        let mut state = self.state.lock().unwrap();
        if let Some(message) = &state.query_failure {
            return Err(Error::Transport(message.clone()));
        }
        state.query_count += 1;
        Ok(read(&*state))
    }

    fn mutate<T>(&self, apply: impl FnOnce(&mut MockState) -> Result<T>) -> Result<T> {
        let mut state = self.state.lock().unwrap();
        if let Some(codes) = &state.mutation_failure {
            return Err(Error::from_messages(codes));
        }
        apply(&mut *state)
    }
}

impl MockState {
    fn next_id(&mut self) -> Pid {
        self.next_id += 1;
        Pid::new(format!("generated-{}", self.next_id))
    }

    fn node(&self, id: &Pid) -> Result<Node> {
        self.nodes
            .iter()
            .find(|n| &n.id == id)
            .cloned()
            .ok_or_else(|| Error::not_found(format!("node '{}'", id)))
    }
}

#[async_trait]
impl HubApi for MockHub {
    async fn replications(&self) -> Result<Vec<Replication>> {
        self.query(|s| s.replications.clone())
    }

    async fn nodes(&self) -> Result<Vec<Node>> {
        self.query(|s| s.nodes.clone())
    }

    async fn saved_queries(&self) -> Result<Vec<SavedQuery>> {
        self.query(|s| s.saved_queries.clone())
    }

    async fn ui_config(&self) -> Result<UiConfig> {
        self.query(|s| s.ui_config.clone())
    }

    async fn create_replication(&self, request: NewReplication) -> Result<Replication> {
        self.mutate(|s| {
            let replication = Replication {
                id: s.next_id(),
                name: request.name,
                source: s.node(&request.source_id)?,
                destination: s.node(&request.destination_id)?,
                bi_directional: request.bi_directional,
                filter: request.filter,
                suspended: false,
                priority: request.priority,
                stats: ReplicationStats::default(),
            };
            s.replications.push(replication.clone());
            Ok(replication)
        })
    }

    async fn update_replication(&self, _update: ReplicationUpdate) -> Result<bool> {
        self.mutate(|s| Ok(s.mutation_result))
    }

    async fn suspend_replication(&self, _id: &Pid, _suspend: bool) -> Result<bool> {
        self.mutate(|s| Ok(s.mutation_result))
    }

    async fn cancel_replication(&self, _id: &Pid) -> Result<bool> {
        self.mutate(|s| Ok(s.mutation_result))
    }

    async fn run_replication(&self, _id: &Pid) -> Result<bool> {
        self.mutate(|s| Ok(s.mutation_result))
    }

    async fn delete_replication(&self, _id: &Pid, delete_data: bool) -> Result<bool> {
        self.mutate(|s| {
            s.last_delete_data = Some(delete_data);
            Ok(s.mutation_result)
        })
    }

    async fn change_priority(&self, _id: &Pid, _priority: u8) -> Result<bool> {
        self.mutate(|s| Ok(s.mutation_result))
    }

    async fn create_node(&self, request: NewNode) -> Result<Node> {
        self.mutate(|s| {
            let node = Node {
                id: s.next_id(),
                name: request.name,
                remote_managed: false,
                address: NodeAddress {
                    url: derive_url(
                        &request.address.host.hostname,
                        request.address.host.port,
                        &request.root_context,
                    ),
                },
            };
            s.nodes.push(node.clone());
            Ok(node)
        })
    }

    async fn update_node(&self, _update: NodeUpdate) -> Result<bool> {
        self.mutate(|s| Ok(s.mutation_result))
    }

    async fn delete_node(&self, _id: &Pid) -> Result<bool> {
        self.mutate(|s| Ok(s.mutation_result))
    }
}
