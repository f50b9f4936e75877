//! Replication list polling, row actions and form submission.

use std::sync::Arc;

use crate::cache::{EntityCache, QueryState};
use crate::errors::{Error, Result};
use crate::hub::{HubApi, Pid};
use crate::nodes::Node;
use crate::notifications::NotificationCenter;
use crate::queries::SavedQuery;

use super::actions::{ensure_allowed, ReplicationAction};
use super::replication_form::ReplicationForm;
use super::replications_model::{Replication, ReplicationUpdate, MAX_PRIORITY, MIN_PRIORITY};
use super::status::{rep_sort, ReplicationStatus};

/// Replications split into the tables of the home view.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReplicationGroups {
    pub active: Vec<Replication>,
    pub inactive: Vec<Replication>,
    /// Only populated when remote-managed replications are segregated.
    pub remote_managed: Vec<Replication>,
}

impl ReplicationGroups {
    pub fn partition(replications: Vec<Replication>, segregate_remote: bool) -> Self {
        let mut groups = Self::default();
        for replication in replications {
            if segregate_remote && replication.is_remote_managed() {
                groups.remote_managed.push(replication);
            } else if replication.suspended {
                groups.inactive.push(replication);
            } else {
                groups.active.push(replication);
            }
        }
        groups.active.sort_by(rep_sort);
        groups.inactive.sort_by(rep_sort);
        groups.remote_managed.sort_by(rep_sort);
        groups
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty() && self.inactive.is_empty() && self.remote_managed.is_empty()
    }

    pub fn len(&self) -> usize {
        self.active.len() + self.inactive.len() + self.remote_managed.len()
    }
}

pub struct ReplicationsService {
    hub: Arc<dyn HubApi>,
    cache: Arc<EntityCache<Replication>>,
    notifications: Arc<NotificationCenter>,
    segregate_remote: bool,
}

impl ReplicationsService {
    pub fn new(
        hub: Arc<dyn HubApi>,
        cache: Arc<EntityCache<Replication>>,
        notifications: Arc<NotificationCenter>,
        segregate_remote: bool,
    ) -> Self {
        Self {
            hub,
            cache,
            notifications,
            segregate_remote,
        }
    }

    pub fn cache(&self) -> Arc<EntityCache<Replication>> {
        Arc::clone(&self.cache)
    }

    /// One poll tick: re-issue the list query and replace the cached list.
    pub async fn refresh(&self) -> Result<usize> {
        match self.hub.replications().await {
            Ok(replications) => {
                let count = replications.len();
                log::debug!("Loaded {} replications", count);
                self.cache.replace_all(replications);
                Ok(count)
            }
            Err(err) => {
                log::warn!("Failed to load replications: {}", err);
                self.cache.record_error(err.to_string());
                Err(err)
            }
        }
    }

    pub fn view(&self) -> QueryState<ReplicationGroups> {
        let segregate = self.segregate_remote;
        self.cache
            .state()
            .map(|replications| ReplicationGroups::partition(replications, segregate))
    }

    /// Resolve a replication by id, or by name ignoring case.
    pub fn resolve(&self, key: &str) -> Result<Replication> {
        let id = Pid::new(key);
        self.cache
            .get(&id)
            .or_else(|| self.cache.find(|r| r.name.eq_ignore_ascii_case(key)))
            .ok_or_else(|| Error::not_found(format!("replication '{}'", key)))
    }

    fn cached(&self, id: &Pid) -> Result<Replication> {
        self.cache
            .get(id)
            .ok_or_else(|| Error::not_found(format!("replication '{}'", id)))
    }

    pub async fn saved_queries(&self) -> Result<Vec<SavedQuery>> {
        self.hub.saved_queries().await
    }

    /// Submit the add-replication form. The created entity is appended to the cache.
    pub async fn create(&self, form: &mut ReplicationForm) -> Result<Replication> {
        let request = form.submit()?;
        match self.hub.create_replication(request).await {
            Ok(replication) => {
                log::info!("Created replication {} ({})", replication.name, replication.id);
                self.cache.insert(replication.clone());
                self.notifications
                    .success(format!("Created replication {}.", replication.name));
                form.reset();
                Ok(replication)
            }
            Err(err) => {
                form.apply_errors(err.codes());
                Err(err)
            }
        }
    }

    pub async fn run(&self, id: &Pid) -> Result<bool> {
        let replication = self.cached(id)?;
        ensure_allowed(&replication, ReplicationAction::Run)?;
        let started = self.hub.run_replication(id).await?;
        if started {
            self.cache
                .patch(id, |r| r.stats.set_status(ReplicationStatus::Pending));
            self.notifications
                .success(format!("Running replication for {}.", replication.name));
        }
        Ok(started)
    }

    pub async fn cancel(&self, id: &Pid) -> Result<bool> {
        let replication = self.cached(id)?;
        ensure_allowed(&replication, ReplicationAction::Cancel)?;
        let canceled = self.hub.cancel_replication(id).await?;
        if canceled {
            self.cache
                .patch(id, |r| r.stats.set_status(ReplicationStatus::Canceled));
            self.notifications.success(format!(
                "Canceled currently running replication for {}.",
                replication.name
            ));
        }
        Ok(canceled)
    }

    /// Suspend (`true`) or re-enable (`false`) a replication.
    pub async fn set_suspended(&self, id: &Pid, suspend: bool) -> Result<bool> {
        let replication = self.cached(id)?;
        let action = if suspend {
            ReplicationAction::Suspend
        } else {
            ReplicationAction::Enable
        };
        ensure_allowed(&replication, action)?;
        let changed = self.hub.suspend_replication(id, suspend).await?;
        if changed {
            self.cache.patch(id, |r| r.suspended = suspend);
            let verb = if suspend { "Suspended" } else { "Enabled" };
            self.notifications
                .success(format!("{} replication {}.", verb, replication.name));
        }
        Ok(changed)
    }

    pub async fn delete(&self, id: &Pid, delete_data: bool) -> Result<bool> {
        let replication = self.cached(id)?;
        let deleted = self.hub.delete_replication(id, delete_data).await?;
        if deleted {
            self.cache.remove(id);
            self.notifications
                .success(format!("Deleted {}.", replication.name));
        }
        Ok(deleted)
    }

    /// Patches the cached priority once the mutation returns, without waiting for a poll.
    pub async fn change_priority(&self, id: &Pid, priority: u8) -> Result<()> {
        if !(MIN_PRIORITY..=MAX_PRIORITY).contains(&priority) {
            return Err(Error::validation(format!(
                "Priority must be between {} and {}",
                MIN_PRIORITY, MAX_PRIORITY
            )));
        }
        let replication = self.cached(id)?;
        self.hub.change_priority(id, priority).await?;
        self.cache.patch(id, |r| r.priority = priority);
        self.notifications.success(format!(
            "Changed priority of {} to {}.",
            replication.name, priority
        ));
        Ok(())
    }

    /// Apply an edit. Node references are resolved against the given node list so the
    /// cached copy keeps full source/destination snapshots.
    pub async fn update(
        &self,
        update: ReplicationUpdate,
        nodes: &[Node],
    ) -> Result<bool> {
        if update.is_empty() {
            return Err(Error::validation("Nothing to update"));
        }
        let replication = self.cached(&update.id)?;
        let find_node = |id: &Pid| {
            nodes
                .iter()
                .find(|n| &n.id == id)
                .cloned()
                .ok_or_else(|| Error::not_found(format!("node '{}'", id)))
        };
        let source = update.source_id.as_ref().map(find_node).transpose()?;
        let destination = update.destination_id.as_ref().map(find_node).transpose()?;

        let updated = self.hub.update_replication(update.clone()).await?;
        if updated {
            self.cache.patch(&update.id, |cached| {
                if let Some(name) = &update.name {
                    cached.name = name.clone();
                }
                if let Some(source) = source {
                    cached.source = source;
                }
                if let Some(destination) = destination {
                    cached.destination = destination;
                }
                if let Some(filter) = &update.filter {
                    cached.filter = filter.clone();
                }
                if let Some(bi_directional) = update.bi_directional {
                    cached.bi_directional = bi_directional;
                }
                if let Some(suspended) = update.suspended {
                    cached.suspended = suspended;
                }
            });
            self.notifications
                .success(format!("Updated replication {}.", replication.name));
        }
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notifications::NotificationLevel;
    use crate::test_support::{node, replication, MockHub};

    fn service(hub: Arc<MockHub>, segregate: bool) -> (ReplicationsService, Arc<NotificationCenter>) {
        let notifications = Arc::new(NotificationCenter::new());
        let service = ReplicationsService::new(
            hub,
            Arc::new(EntityCache::new()),
            Arc::clone(&notifications),
            segregate,
        );
        (service, notifications)
    }

    fn groups(service: &ReplicationsService) -> ReplicationGroups {
        match service.view() {
            QueryState::Ready(groups) => groups,
            other => panic!("expected ready state, got {:?}", other),
        }
    }

    fn names(reps: &[Replication]) -> Vec<&str> {
        reps.iter().map(|r| r.name.as_str()).collect()
    }

    #[tokio::test]
    async fn partitions_by_suspended_and_sorts() {
        let hub = Arc::new(MockHub::default());
        let mut paused = replication("3", "paused");
        paused.suspended = true;
        let mut busy = replication("4", "Aardvark");
        busy.stats.set_status(ReplicationStatus::PushInProgress);
        hub.set_replications(vec![
            replication("1", "zeta"),
            busy,
            paused,
            replication("2", "Beta"),
        ]);
        let (service, _) = service(hub, false);
        service.refresh().await.unwrap();

        let groups = groups(&service);
        assert_eq!(names(&groups.active), vec!["Beta", "zeta", "Aardvark"]);
        assert_eq!(names(&groups.inactive), vec!["paused"]);
        assert!(groups.remote_managed.is_empty());
    }

    #[tokio::test]
    async fn segregates_remote_managed_when_enabled() {
        let hub = Arc::new(MockHub::default());
        let mut cloud = replication("1", "cloud");
        cloud.destination.remote_managed = true;
        hub.set_replications(vec![cloud, replication("2", "local")]);

        let (flat, _) = service(Arc::clone(&hub), false);
        flat.refresh().await.unwrap();
        assert_eq!(groups(&flat).active.len(), 2);

        let (split, _) = service(hub, true);
        split.refresh().await.unwrap();
        let groups = groups(&split);
        assert_eq!(names(&groups.remote_managed), vec!["cloud"]);
        assert_eq!(names(&groups.active), vec!["local"]);
    }

    #[tokio::test]
    async fn repeated_polls_keep_rows_stable() {
        let hub = Arc::new(MockHub::default());
        hub.set_replications(vec![replication("1", "b"), replication("2", "a")]);
        let (service, _) = service(hub, false);
        service.refresh().await.unwrap();
        let first = groups(&service);
        service.refresh().await.unwrap();
        service.refresh().await.unwrap();
        assert_eq!(groups(&service), first);
    }

    #[tokio::test]
    async fn run_patches_status_to_pending() {
        let hub = Arc::new(MockHub::default());
        hub.set_replications(vec![replication("1", "Nightly")]);
        let (service, notifications) = service(hub, false);
        service.refresh().await.unwrap();

        assert!(service.run(&Pid::new("1")).await.unwrap());
        let cached = service.cache().get(&Pid::new("1")).unwrap();
        assert_eq!(cached.status(), Some(ReplicationStatus::Pending));
        assert_eq!(
            notifications.drain()[0].message,
            "Running replication for Nightly."
        );

        // now cancelable, so run is no longer offered
        assert!(matches!(
            service.run(&Pid::new("1")).await,
            Err(Error::Validation(_))
        ));
    }

    #[tokio::test]
    async fn cancel_patches_status_to_canceled() {
        let hub = Arc::new(MockHub::default());
        let mut rep = replication("1", "Nightly");
        rep.stats.set_status(ReplicationStatus::PullInProgress);
        hub.set_replications(vec![rep]);
        let (service, notifications) = service(hub, false);
        service.refresh().await.unwrap();

        assert!(service.cancel(&Pid::new("1")).await.unwrap());
        let cached = service.cache().get(&Pid::new("1")).unwrap();
        assert_eq!(cached.status(), Some(ReplicationStatus::Canceled));
        assert_eq!(
            notifications.drain()[0].message,
            "Canceled currently running replication for Nightly."
        );
    }

    #[tokio::test]
    async fn false_mutation_result_leaves_cache_alone() {
        let hub = Arc::new(MockHub::default());
        hub.set_replications(vec![replication("1", "Nightly")]);
        hub.set_mutation_result(false);
        let (service, notifications) = service(hub, false);
        service.refresh().await.unwrap();

        assert!(!service.set_suspended(&Pid::new("1"), true).await.unwrap());
        assert!(!service.cache().get(&Pid::new("1")).unwrap().suspended);
        assert!(notifications.is_empty());
    }

    #[tokio::test]
    async fn suspend_and_enable_flip_flag() {
        let hub = Arc::new(MockHub::default());
        hub.set_replications(vec![replication("1", "Nightly")]);
        let (service, notifications) = service(hub, false);
        service.refresh().await.unwrap();

        service.set_suspended(&Pid::new("1"), true).await.unwrap();
        assert_eq!(groups(&service).inactive.len(), 1);
        service.set_suspended(&Pid::new("1"), false).await.unwrap();
        assert_eq!(groups(&service).active.len(), 1);

        let messages: Vec<_> = notifications.drain().into_iter().map(|n| n.message).collect();
        assert_eq!(
            messages,
            vec!["Suspended replication Nightly.", "Enabled replication Nightly."]
        );
    }

    #[tokio::test]
    async fn delete_removes_entry_and_passes_flag() {
        let hub = Arc::new(MockHub::default());
        hub.set_replications(vec![replication("1", "a"), replication("2", "b")]);
        let (service, notifications) = service(Arc::clone(&hub), false);
        service.refresh().await.unwrap();

        assert!(service.delete(&Pid::new("1"), false).await.unwrap());
        assert_eq!(service.cache().len(), 1);
        assert_eq!(hub.last_delete_data(), Some(false));
        assert_eq!(notifications.drain()[0].message, "Deleted a.");
    }

    #[tokio::test]
    async fn change_priority_validates_and_patches() {
        let hub = Arc::new(MockHub::default());
        hub.set_replications(vec![replication("1", "a")]);
        let (service, _) = service(hub, false);
        service.refresh().await.unwrap();

        assert!(service.change_priority(&Pid::new("1"), 0).await.is_err());
        assert!(service.change_priority(&Pid::new("1"), 11).await.is_err());
        service.change_priority(&Pid::new("1"), 9).await.unwrap();
        assert_eq!(service.cache().get(&Pid::new("1")).unwrap().priority, 9);
    }

    #[tokio::test]
    async fn create_appends_and_resets_form() {
        let hub = Arc::new(MockHub::default());
        hub.set_nodes(vec![node("a", "Alpha"), node("b", "Bravo")]);
        let (service, _) = service(hub, false);
        service.refresh().await.unwrap();

        let mut form = ReplicationForm {
            name: "Nightly".to_string(),
            source_id: Some(Pid::new("a")),
            destination_id: Some(Pid::new("b")),
            filter: "anyText like '*'".to_string(),
            ..ReplicationForm::default()
        };
        let created = service.create(&mut form).await.unwrap();
        assert_eq!(created.source.name, "Alpha");
        assert_eq!(service.cache().len(), 1);
        assert_eq!(form, ReplicationForm::default());
    }

    #[tokio::test]
    async fn create_error_maps_to_form_and_keeps_input() {
        let hub = Arc::new(MockHub::default());
        hub.set_nodes(vec![node("a", "Alpha"), node("b", "Bravo")]);
        hub.fail_mutations_with(&["INVALID_FILTER"]);
        let (service, notifications) = service(hub, false);

        let mut form = ReplicationForm {
            name: "Nightly".to_string(),
            source_id: Some(Pid::new("a")),
            destination_id: Some(Pid::new("b")),
            filter: "not cql".to_string(),
            ..ReplicationForm::default()
        };
        assert!(service.create(&mut form).await.is_err());
        assert_eq!(form.filter_error.as_deref(), Some("Invalid CQL Filter!"));
        assert!(!form.save_disabled);
        assert!(notifications.is_empty());
    }

    #[tokio::test]
    async fn update_patches_fields_and_nodes() {
        let hub = Arc::new(MockHub::default());
        hub.set_replications(vec![replication("1", "a")]);
        let (service, notifications) = service(hub, false);
        service.refresh().await.unwrap();

        let nodes = vec![node("n-9", "Zulu")];
        let mut update = ReplicationUpdate::new(Pid::new("1"));
        update.name = Some("renamed".to_string());
        update.destination_id = Some(Pid::new("n-9"));
        assert!(service.update(update, &nodes).await.unwrap());

        let cached = service.cache().get(&Pid::new("1")).unwrap();
        assert_eq!(cached.name, "renamed");
        assert_eq!(cached.destination.name, "Zulu");
        assert_eq!(notifications.drain()[0].level, NotificationLevel::Success);

        let empty = ReplicationUpdate::new(Pid::new("1"));
        assert!(service.update(empty, &nodes).await.is_err());
    }

    #[tokio::test]
    async fn saved_queries_pass_through() {
        let hub = Arc::new(MockHub::default());
        hub.set_saved_queries(vec![SavedQuery {
            cql: "title like 'cat'".to_string(),
            title: "Cats".to_string(),
        }]);
        let (service, _) = service(hub, false);
        let queries = service.saved_queries().await.unwrap();
        assert_eq!(queries[0].title, "Cats");
    }

    #[tokio::test]
    async fn failed_poll_shows_error_view() {
        let hub = Arc::new(MockHub::default());
        hub.fail_queries("boom");
        let (service, _) = service(hub, false);
        assert_eq!(service.view(), QueryState::Loading);
        assert!(service.refresh().await.is_err());
        assert!(matches!(service.view(), QueryState::Failed(_)));
    }
}
