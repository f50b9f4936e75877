//! Service wiring for one console run.

use anyhow::Context;
use std::sync::{Arc, PoisonError, RwLock};

use hubconsole_core::cache::EntityCache;
use hubconsole_core::nodes::NodesService;
use hubconsole_core::notifications::NotificationCenter;
use hubconsole_core::replications::ReplicationsService;
use hubconsole_core::settings::{SettingsRepositoryTrait, SettingsService};
use hubconsole_core::ui_config::UiConfig;
use hubconsole_core::HubApi;
use hubconsole_hub_client::HubClient;
use hubconsole_storage_sqlite::SettingsRepository;

use crate::config::ConsoleConfig;

pub struct ServiceContext {
    pub hub: Arc<dyn HubApi>,
    pub notifications: Arc<NotificationCenter>,
    pub replications_service: Arc<ReplicationsService>,
    pub nodes_service: Arc<NodesService>,
    pub settings_service: Arc<SettingsService>,
    pub ui_config: Arc<RwLock<UiConfig>>,
}

impl ServiceContext {
    pub fn build(config: &ConsoleConfig) -> anyhow::Result<Self> {
        let client = HubClient::new(&config.hub_url, config.insecure)
            .with_context(|| format!("invalid hub URL '{}'", config.hub_url))?;
        log::info!("Using hub endpoint {}", client.endpoint());

        let conn = match &config.settings_path {
            Some(path) => hubconsole_storage_sqlite::open(path)
                .with_context(|| format!("failed to open settings at {}", path.display()))?,
            None => hubconsole_storage_sqlite::open_in_memory()?,
        };

        Ok(Self::new(
            Arc::new(client),
            Arc::new(SettingsRepository::new(conn)),
            config.segregate_remote,
        ))
    }

    pub fn new(
        hub: Arc<dyn HubApi>,
        settings: Arc<dyn SettingsRepositoryTrait>,
        segregate_remote: bool,
    ) -> Self {
        let notifications = Arc::new(NotificationCenter::new());
        let replications_service = Arc::new(ReplicationsService::new(
            Arc::clone(&hub),
            Arc::new(EntityCache::new()),
            Arc::clone(&notifications),
            segregate_remote,
        ));
        let nodes_service = Arc::new(NodesService::new(
            Arc::clone(&hub),
            Arc::new(EntityCache::new()),
            Arc::clone(&notifications),
        ));

        Self {
            hub,
            notifications,
            replications_service,
            nodes_service,
            settings_service: Arc::new(SettingsService::new(settings)),
            ui_config: Arc::new(RwLock::new(UiConfig::default())),
        }
    }

    pub fn replications_service(&self) -> Arc<ReplicationsService> {
        Arc::clone(&self.replications_service)
    }

    pub fn nodes_service(&self) -> Arc<NodesService> {
        Arc::clone(&self.nodes_service)
    }

    pub fn settings_service(&self) -> Arc<SettingsService> {
        Arc::clone(&self.settings_service)
    }

    pub fn get_ui_config(&self) -> UiConfig {
        self.ui_config
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Fetch the banner configuration. A failure leaves the banner off.
    pub async fn refresh_ui_config(&self) -> UiConfig {
        match self.hub.ui_config().await {
            Ok(config) => {
                *self
                    .ui_config
                    .write()
                    .unwrap_or_else(PoisonError::into_inner) = config.clone();
                config
            }
            Err(err) => {
                log::warn!("Failed to load UI config: {}", err);
                self.get_ui_config()
            }
        }
    }
}
