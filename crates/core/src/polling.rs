//! Fixed-interval list polling.
//!
//! Each tick re-issues every list query in turn. A tick never overlaps the previous one, and
//! every completed response replaces its cached list, so the newest response always wins.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinHandle;

use crate::errors::Result;
use crate::nodes::NodesService;
use crate::replications::ReplicationsService;

/// List query cadence.
pub const LIST_POLL_INTERVAL_SECS: u64 = 10;

/// Cadence for recomputing relative timestamps. No network traffic.
pub const ROW_REDRAW_INTERVAL_SECS: u64 = 60;

/// A list view that can be refreshed from the hub.
#[async_trait]
pub trait PollSource: Send + Sync {
    fn label(&self) -> &'static str;

    /// Refresh the cached list, returning the number of rows received.
    async fn poll(&self) -> Result<usize>;
}

#[async_trait]
impl PollSource for ReplicationsService {
    fn label(&self) -> &'static str {
        "replications"
    }

    async fn poll(&self) -> Result<usize> {
        self.refresh().await
    }
}

#[async_trait]
impl PollSource for NodesService {
    fn label(&self) -> &'static str {
        "nodes"
    }

    async fn poll(&self) -> Result<usize> {
        self.refresh().await
    }
}

/// Outcome of one source's refresh within a tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollEvent {
    pub source: &'static str,
    pub outcome: std::result::Result<usize, String>,
    pub at: DateTime<Utc>,
}

/// Owns the background polling task.
pub struct ListPoller {
    interval: Duration,
    task: Mutex<Option<JoinHandle<()>>>,
}

impl Default for ListPoller {
    fn default() -> Self {
        Self::new(Duration::from_secs(LIST_POLL_INTERVAL_SECS))
    }
}

impl ListPoller {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            task: Mutex::new(None),
        }
    }

    /// Spawn the poll loop unless one is already running. The loop ends when the event
    /// receiver is dropped or `stop` is called.
    pub async fn start(
        &self,
        sources: Vec<Arc<dyn PollSource>>,
        events: mpsc::UnboundedSender<PollEvent>,
    ) {
        let mut guard = self.task.lock().await;
        if let Some(handle) = guard.as_ref() {
            if !handle.is_finished() {
                return;
            }
            guard.take();
        }

        let period = self.interval;
        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                for source in &sources {
                    let outcome = source.poll().await.map_err(|err| err.to_string());
                    if let Err(message) = &outcome {
                        log::debug!("Poll of {} failed: {}", source.label(), message);
                    }
                    let event = PollEvent {
                        source: source.label(),
                        outcome,
                        at: Utc::now(),
                    };
                    if events.send(event).is_err() {
                        log::debug!("Poll listener gone. Stopping list poller.");
                        return;
                    }
                }
            }
        });
        *guard = Some(handle);
    }

    pub async fn stop(&self) {
        if let Some(handle) = self.task.lock().await.take() {
            handle.abort();
        }
    }

    pub async fn is_running(&self) -> bool {
        self.task
            .lock()
            .await
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }
}
