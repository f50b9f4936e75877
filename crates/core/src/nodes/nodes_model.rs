//! Node (site) domain models.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::cache::CacheEntity;
use crate::hub::Pid;

/// Root context used when the operator does not provide one.
pub const DEFAULT_ROOT_CONTEXT: &str = "services";

/// Help text shown next to the root context input.
pub const ROOT_CONTEXT_HELP: &str = "The path under which the replication services can be found. \
Typically this is under `services` for DDF-based nodes. HDFS-based systems require entering the \
full path after the port; ie `/webhdfs/v1/desiredDirectoryPath`";

/// A registered remote replication endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    pub id: Pid,
    pub name: String,
    #[serde(default)]
    pub remote_managed: bool,
    #[serde(default)]
    pub address: NodeAddress,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeAddress {
    #[serde(default)]
    pub url: String,
}

impl CacheEntity for Node {
    const TYPENAME: &'static str = "ReplicationSite";

    fn entity_id(&self) -> &Pid {
        &self.id
    }
}

/// Host portion of a node address as the hub expects it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostInput {
    pub hostname: String,
    pub port: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressInput {
    pub host: HostInput,
}

/// Variables for `createReplicationSite`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewNode {
    pub name: String,
    pub address: AddressInput,
    pub root_context: String,
}

/// Variables for `updateReplicationSite`. Absent fields are left unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeUpdate {
    pub id: Pid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<AddressInput>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub root_context: Option<String>,
}

impl NodeUpdate {
    /// The URL the node will have once this update is applied, or `None` when the update
    /// leaves the address alone or a missing part cannot be recovered from `current_url`.
    pub fn patched_url(&self, current_url: &str) -> Option<String> {
        if self.address.is_none() && self.root_context.is_none() {
            return None;
        }
        let current = UrlParts::parse(current_url);
        let (hostname, port) = match &self.address {
            Some(address) => (address.host.hostname.clone(), address.host.port),
            None => {
                let parts = current.as_ref()?;
                (parts.hostname.clone(), parts.port)
            }
        };
        let root_context = match &self.root_context {
            Some(context) => context.clone(),
            None => current?.root_context,
        };
        Some(derive_url(&hostname, port, &root_context))
    }
}

/// Address parts recovered from a node URL of the form `scheme://host:port/context`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlParts {
    pub hostname: String,
    pub port: i32,
    pub root_context: String,
}

impl UrlParts {
    pub fn parse(url: &str) -> Option<Self> {
        let rest = url.split_once("://").map_or(url, |(_, rest)| rest);
        let (authority, context) = rest.split_once('/').unwrap_or((rest, ""));
        let (hostname, port) = authority.rsplit_once(':')?;
        if hostname.is_empty() {
            return None;
        }
        Some(Self {
            hostname: hostname.to_string(),
            port: port.parse().ok()?,
            root_context: context.to_string(),
        })
    }
}

/// The URL the hub derives for a node from its address parts.
pub fn derive_url(hostname: &str, port: i32, root_context: &str) -> String {
    let context = root_context.trim().trim_start_matches('/');
    format!("https://{}:{}/{}", hostname.trim(), port, context)
}

/// Case-insensitive ordering by name.
pub fn alphabetical(a: &Node, b: &Node) -> Ordering {
    a.name.to_lowercase().cmp(&b.name.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(id: &str, name: &str) -> Node {
        Node {
            id: Pid::new(id),
            name: name.to_string(),
            remote_managed: false,
            address: NodeAddress::default(),
        }
    }

    #[test]
    fn deserializes_site_payload() {
        let json = r#"{"id":"abc","name":"Alpha","remoteManaged":true,"address":{"url":"https://alpha:8993/services"}}"#;
        let parsed: Node = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.id, Pid::new("abc"));
        assert!(parsed.remote_managed);
        assert_eq!(parsed.address.url, "https://alpha:8993/services");
    }

    #[test]
    fn remote_managed_defaults_to_false() {
        let parsed: Node =
            serde_json::from_str(r#"{"id":"1","name":"n","address":{"url":"u"}}"#).unwrap();
        assert!(!parsed.remote_managed);
    }

    #[test]
    fn new_node_serializes_nested_address() {
        let input = NewNode {
            name: "Bravo".to_string(),
            address: AddressInput {
                host: HostInput {
                    hostname: "bravo.local".to_string(),
                    port: 8993,
                },
            },
            root_context: "services".to_string(),
        };
        let value = serde_json::to_value(&input).unwrap();
        assert_eq!(value["address"]["host"]["hostname"], "bravo.local");
        assert_eq!(value["address"]["host"]["port"], 8993);
        assert_eq!(value["rootContext"], "services");
    }

    #[test]
    fn node_update_omits_absent_fields() {
        let update = NodeUpdate {
            id: Pid::new("n1"),
            name: Some("Renamed".to_string()),
            address: None,
            root_context: None,
        };
        let value = serde_json::to_value(&update).unwrap();
        assert_eq!(value["name"], "Renamed");
        assert!(value.get("address").is_none());
        assert!(value.get("rootContext").is_none());
    }

    #[test]
    fn derive_url_strips_leading_slashes() {
        assert_eq!(
            derive_url("host", 8993, "/webhdfs/v1/data"),
            "https://host:8993/webhdfs/v1/data"
        );
        assert_eq!(derive_url("host", 443, "services"), "https://host:443/services");
    }

    #[test]
    fn url_parts_split_host_port_and_context() {
        let parts = UrlParts::parse("https://old:8993/webhdfs/v1/data").unwrap();
        assert_eq!(parts.hostname, "old");
        assert_eq!(parts.port, 8993);
        assert_eq!(parts.root_context, "webhdfs/v1/data");
        assert!(UrlParts::parse("not a url").is_none());
        assert!(UrlParts::parse("https://host:port/services").is_none());
    }

    #[test]
    fn patched_url_keeps_parts_not_submitted() {
        let mut update = NodeUpdate {
            id: Pid::new("n1"),
            name: None,
            address: Some(AddressInput {
                host: HostInput {
                    hostname: "new".to_string(),
                    port: 9000,
                },
            }),
            root_context: None,
        };
        assert_eq!(
            update.patched_url("https://old:8993/webhdfs/v1/data").as_deref(),
            Some("https://new:9000/webhdfs/v1/data")
        );

        update.address = None;
        update.root_context = Some("webhdfs/v1/x".to_string());
        assert_eq!(
            update.patched_url("https://a:8993/services").as_deref(),
            Some("https://a:8993/webhdfs/v1/x")
        );
        assert_eq!(update.patched_url("unparseable"), None);

        update.root_context = None;
        assert_eq!(update.patched_url("https://a:8993/services"), None);
    }

    #[test]
    fn alphabetical_ignores_case() {
        let mut nodes = vec![node("1", "charlie"), node("2", "Alpha"), node("3", "bravo")];
        nodes.sort_by(alphabetical);
        let names: Vec<_> = nodes.iter().map(|n| n.name.as_str()).collect();
        assert_eq!(names, vec!["Alpha", "bravo", "charlie"]);
    }
}
