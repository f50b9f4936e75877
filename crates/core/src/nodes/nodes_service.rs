//! Node list polling and node mutations.

use std::sync::Arc;

use crate::cache::{EntityCache, QueryState};
use crate::errors::{Error, ErrorCode, Result};
use crate::hub::{HubApi, Pid};
use crate::notifications::NotificationCenter;

use super::node_form::NodeForm;
use super::nodes_model::{alphabetical, Node, NodeUpdate};

/// Reads nodes through the shared cache and keeps it in step with mutations.
pub struct NodesService {
    hub: Arc<dyn HubApi>,
    cache: Arc<EntityCache<Node>>,
    notifications: Arc<NotificationCenter>,
}

impl NodesService {
    pub fn new(
        hub: Arc<dyn HubApi>,
        cache: Arc<EntityCache<Node>>,
        notifications: Arc<NotificationCenter>,
    ) -> Self {
        Self {
            hub,
            cache,
            notifications,
        }
    }

    pub fn cache(&self) -> Arc<EntityCache<Node>> {
        Arc::clone(&self.cache)
    }

    /// One poll tick: re-issue the list query and replace the cached list.
    pub async fn refresh(&self) -> Result<usize> {
        match self.hub.nodes().await {
            Ok(nodes) => {
                let count = nodes.len();
                self.cache.replace_all(nodes);
                Ok(count)
            }
            Err(err) => {
                log::warn!("Failed to load nodes: {}", err);
                self.cache.record_error(err.to_string());
                Err(err)
            }
        }
    }

    /// Current view state with nodes sorted by name.
    pub fn view(&self) -> QueryState<Vec<Node>> {
        self.cache.state().map(|mut nodes| {
            nodes.sort_by(alphabetical);
            nodes
        })
    }

    /// Resolve a node by id, or by name ignoring case.
    pub fn resolve(&self, key: &str) -> Result<Node> {
        let id = Pid::new(key);
        self.cache
            .get(&id)
            .or_else(|| self.cache.find(|n| n.name.eq_ignore_ascii_case(key)))
            .ok_or_else(|| Error::not_found(format!("node '{}'", key)))
    }

    /// Submit the add-node form. On success the node is appended to the cache and the form
    /// resets; on a structured error the matching form fields are flagged.
    pub async fn create(&self, form: &mut NodeForm) -> Result<Node> {
        let request = form.submit()?;
        match self.hub.create_node(request).await {
            Ok(node) => {
                log::info!("Created node {} ({})", node.name, node.id);
                self.cache.insert(node.clone());
                self.notifications
                    .success(format!("Created node {}.", node.name));
                form.reset();
                Ok(node)
            }
            Err(err) => {
                form.apply_errors(err.codes());
                Err(err)
            }
        }
    }

    /// Apply an edit and patch the cached node with the submitted values.
    pub async fn update(&self, update: NodeUpdate) -> Result<bool> {
        let node = self
            .cache
            .get(&update.id)
            .ok_or_else(|| Error::not_found(format!("node '{}'", update.id)))?;
        let updated = self.hub.update_node(update.clone()).await?;
        if updated {
            self.cache.patch(&update.id, |cached| {
                if let Some(name) = &update.name {
                    cached.name = name.clone();
                }
                if let Some(url) = update.patched_url(&cached.address.url) {
                    cached.address.url = url;
                }
            });
            self.notifications.success(format!("Updated node {}.", node.name));
        }
        Ok(updated)
    }

    /// Delete a node. A node still referenced by a replication is refused by the hub; the
    /// cache is left untouched and an error toast is raised.
    pub async fn delete(&self, id: &Pid) -> Result<()> {
        let node = self
            .cache
            .get(id)
            .ok_or_else(|| Error::not_found(format!("node '{}'", id)))?;

        match self.hub.delete_node(id).await {
            Ok(_) => {
                self.cache.remove(id);
                self.notifications
                    .success(format!("Deleted node {}.", node.name));
                Ok(())
            }
            Err(err) => {
                if err.has_code(&ErrorCode::SiteInUse) {
                    self.notifications.error(format!(
                        "Failed to delete {}. It is used by a Replication.",
                        node.name
                    ));
                }
                Err(err)
            }
        }
    }
}
