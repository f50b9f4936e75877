//! GraphQL client for the hub's admin endpoint.

use async_trait::async_trait;
use log::debug;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use std::time::Duration;

use hubconsole_core::nodes::{NewNode, Node, NodeUpdate};
use hubconsole_core::queries::SavedQuery;
use hubconsole_core::replications::{NewReplication, Replication, ReplicationUpdate};
use hubconsole_core::ui_config::UiConfig;
use hubconsole_core::{HubApi, Pid};

use crate::error::{HubClientError, Result};
use crate::operations::{self, Operation};
use crate::types::{GraphQlRequest, GraphQlResponse, ReplicationRoot};

/// Default timeout for API requests.
const DEFAULT_TIMEOUT_SECS: u64 = 30;
const MAX_LOG_BODY_CHARS: usize = 512;

/// Path of the GraphQL endpoint relative to the hub's base URL.
pub const GRAPHQL_PATH: &str = "/admin/hub/graphql";

/// Client for the hub GraphQL API.
#[derive(Debug, Clone)]
pub struct HubClient {
    client: reqwest::Client,
    endpoint: String,
}

impl HubClient {
    fn log_response(status: reqwest::StatusCode, body: &str) {
        if status.is_success() {
            debug!("Hub response status: {}", status);
            return;
        }

        let mut preview = body.chars().take(MAX_LOG_BODY_CHARS).collect::<String>();
        if body.chars().count() > MAX_LOG_BODY_CHARS {
            preview.push_str("...");
        }
        debug!("Hub response error ({}): {}", status, preview);
    }

    /// Create a client for the hub at `base_url` (e.g. "https://localhost:8993").
    ///
    /// With `insecure` the hub's certificate is not verified, which development hubs with
    /// self-signed certificates need.
    pub fn new(base_url: &str, insecure: bool) -> Result<Self> {
        let base = base_url.trim().trim_end_matches('/');
        if !(base.starts_with("https://") || base.starts_with("http://")) {
            return Err(HubClientError::invalid_request(format!(
                "Hub URL must start with http:// or https://, got '{}'",
                base_url
            )));
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .danger_accept_invalid_certs(insecure)
            .build()?;

        Ok(Self {
            client,
            endpoint: format!("{}{}", base, GRAPHQL_PATH),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Decode a response body into the operation's `data`.
    ///
    /// A GraphQL `errors` array wins over any partial data, since mutation failures are
    /// reported that way with a structured code as the message.
    fn decode_body(status: reqwest::StatusCode, body: &str) -> Result<Value> {
        if !status.is_success() {
            let message = serde_json::from_str::<GraphQlResponse>(body)
                .ok()
                .filter(|parsed| !parsed.errors.is_empty())
                .map(|parsed| {
                    parsed
                        .errors
                        .into_iter()
                        .map(|e| e.message)
                        .collect::<Vec<_>>()
                        .join(", ")
                })
                .unwrap_or_else(|| format!("Request failed: {}", body));
            return Err(HubClientError::api(status.as_u16(), message));
        }

        let parsed: GraphQlResponse = serde_json::from_str(body).map_err(|e| {
            log::error!("Failed to deserialize hub response: {}", e);
            HubClientError::Json(e)
        })?;

        if !parsed.errors.is_empty() {
            return Err(HubClientError::GraphQl {
                messages: parsed.errors.into_iter().map(|e| e.message).collect(),
            });
        }

        parsed
            .data
            .filter(|data| !data.is_null())
            .ok_or_else(|| HubClientError::missing_data("data"))
    }

    /// Pull `field` out of a query result nested under `replication`.
    fn query_field<T: DeserializeOwned>(data: Value, field: &str) -> Result<T> {
        let root: ReplicationRoot = serde_json::from_value(data)?;
        Self::take_field(root.replication, field)
    }

    fn take_field<T: DeserializeOwned>(mut data: Value, field: &str) -> Result<T> {
        let value = data
            .get_mut(field)
            .map(Value::take)
            .ok_or_else(|| HubClientError::missing_data(field))?;
        Ok(serde_json::from_value(value)?)
    }

    /// Boolean mutation results; `null` reads as false.
    fn take_flag(data: Value, field: &str) -> Result<bool> {
        let flag: Option<bool> = Self::take_field(data, field)?;
        Ok(flag.unwrap_or(false))
    }

    async fn execute(&self, operation: &Operation, variables: Value) -> Result<Value> {
        let request = GraphQlRequest {
            operation_name: operation.name,
            query: operation.document,
            variables,
        };
        debug!("Sending {} to {}", operation.name, self.endpoint);

        let response = self.client.post(&self.endpoint).json(&request).send().await?;
        let status = response.status();
        let body = response.text().await?;
        Self::log_response(status, &body);
        Self::decode_body(status, &body)
    }

    async fn query<T: DeserializeOwned>(&self, operation: &Operation) -> Result<T> {
        let data = self.execute(operation, json!({})).await?;
        Self::query_field(data, operation.field)
    }

    async fn mutate<T: DeserializeOwned>(&self, operation: &Operation, variables: Value) -> Result<T> {
        let data = self.execute(operation, variables).await?;
        Self::take_field(data, operation.field)
    }

    async fn mutate_flag(&self, operation: &Operation, variables: Value) -> Result<bool> {
        let data = self.execute(operation, variables).await?;
        Self::take_flag(data, operation.field)
    }
}

#[async_trait]
impl HubApi for HubClient {
    async fn replications(&self) -> hubconsole_core::Result<Vec<Replication>> {
        Ok(self.query(&operations::ALL_REPLICATIONS).await?)
    }

    async fn nodes(&self) -> hubconsole_core::Result<Vec<Node>> {
        Ok(self.query(&operations::ALL_SITES).await?)
    }

    async fn saved_queries(&self) -> hubconsole_core::Result<Vec<SavedQuery>> {
        Ok(self.query(&operations::ALL_QUERIES).await?)
    }

    async fn ui_config(&self) -> hubconsole_core::Result<UiConfig> {
        let config: Option<UiConfig> = self.query(&operations::UI_CONFIG).await?;
        Ok(config.unwrap_or_default())
    }

    async fn create_replication(
        &self,
        request: NewReplication,
    ) -> hubconsole_core::Result<Replication> {
        let variables = serde_json::to_value(&request)?;
        Ok(self
            .mutate(&operations::CREATE_REPLICATION, variables)
            .await?)
    }

    async fn update_replication(&self, update: ReplicationUpdate) -> hubconsole_core::Result<bool> {
        let variables = serde_json::to_value(&update)?;
        Ok(self
            .mutate_flag(&operations::UPDATE_REPLICATION, variables)
            .await?)
    }

    async fn suspend_replication(&self, id: &Pid, suspend: bool) -> hubconsole_core::Result<bool> {
        Ok(self
            .mutate_flag(
                &operations::SUSPEND_REPLICATION,
                json!({ "id": id, "suspend": suspend }),
            )
            .await?)
    }

    async fn cancel_replication(&self, id: &Pid) -> hubconsole_core::Result<bool> {
        Ok(self
            .mutate_flag(&operations::CANCEL_REPLICATION, json!({ "id": id }))
            .await?)
    }

    async fn run_replication(&self, id: &Pid) -> hubconsole_core::Result<bool> {
        Ok(self
            .mutate_flag(&operations::RUN_REPLICATION, json!({ "id": id }))
            .await?)
    }

    async fn delete_replication(
        &self,
        id: &Pid,
        delete_data: bool,
    ) -> hubconsole_core::Result<bool> {
        Ok(self
            .mutate_flag(
                &operations::DELETE_REPLICATION,
                json!({ "id": id, "deleteData": delete_data }),
            )
            .await?)
    }

    async fn change_priority(&self, id: &Pid, priority: u8) -> hubconsole_core::Result<bool> {
        Ok(self
            .mutate_flag(
                &operations::CHANGE_PRIORITY,
                json!({ "id": id, "priority": priority }),
            )
            .await?)
    }

    async fn create_node(&self, request: NewNode) -> hubconsole_core::Result<Node> {
        let variables = serde_json::to_value(&request)?;
        Ok(self.mutate(&operations::CREATE_SITE, variables).await?)
    }

    async fn update_node(&self, update: NodeUpdate) -> hubconsole_core::Result<bool> {
        let variables = serde_json::to_value(&update)?;
        Ok(self.mutate_flag(&operations::UPDATE_SITE, variables).await?)
    }

    async fn delete_node(&self, id: &Pid) -> hubconsole_core::Result<bool> {
        Ok(self
            .mutate_flag(&operations::DELETE_SITE, json!({ "id": id }))
            .await?)
    }
}
