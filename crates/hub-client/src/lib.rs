//! reqwest-based transport for the hub's GraphQL admin API.

pub mod client;
pub mod error;
pub mod operations;
pub mod types;

pub use client::{HubClient, GRAPHQL_PATH};
pub use error::{HubClientError, Result};
