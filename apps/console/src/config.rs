//! Command-line and environment configuration.

use clap::Args;
use directories::BaseDirs;
use std::path::PathBuf;
use std::time::Duration;

use hubconsole_core::polling::{LIST_POLL_INTERVAL_SECS, ROW_REDRAW_INTERVAL_SECS};

pub const DEFAULT_HUB_URL: &str = "https://localhost:8993";
const APP_DIR: &str = "hubconsole";
const SETTINGS_FILE: &str = "settings.db";

#[derive(Debug, Clone, Args)]
pub struct ConfigArgs {
    /// Base URL of the replication hub, e.g. https://localhost:8993
    #[arg(long, env = "HUBCONSOLE_URL", default_value = DEFAULT_HUB_URL, global = true)]
    pub url: String,
    /// Accept self-signed hub certificates.
    #[arg(long, env = "HUBCONSOLE_INSECURE", global = true)]
    pub insecure: bool,
    /// Settings database path. Defaults to the platform data directory.
    #[arg(long, env = "HUBCONSOLE_SETTINGS", global = true)]
    pub settings: Option<PathBuf>,
    /// Show remote-managed replications in their own table.
    #[arg(long, global = true)]
    pub segregate_remote: bool,
}

#[derive(Debug, Clone)]
pub struct ConsoleConfig {
    pub hub_url: String,
    pub insecure: bool,
    /// `None` keeps settings in memory for this run only.
    pub settings_path: Option<PathBuf>,
    pub segregate_remote: bool,
    pub poll_interval: Duration,
    pub redraw_interval: Duration,
}

impl ConsoleConfig {
    pub fn from_args(args: ConfigArgs) -> Self {
        let settings_path = args.settings.or_else(default_settings_path);
        if settings_path.is_none() {
            log::warn!("No data directory found. Settings will not persist between runs.");
        }
        Self {
            hub_url: args.url.trim().trim_end_matches('/').to_string(),
            insecure: args.insecure,
            settings_path,
            segregate_remote: args.segregate_remote,
            poll_interval: Duration::from_secs(LIST_POLL_INTERVAL_SECS),
            redraw_interval: Duration::from_secs(ROW_REDRAW_INTERVAL_SECS),
        }
    }
}

fn default_settings_path() -> Option<PathBuf> {
    BaseDirs::new().map(|dirs| dirs.data_dir().join(APP_DIR).join(SETTINGS_FILE))
}
