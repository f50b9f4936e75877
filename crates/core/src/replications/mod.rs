//! Replication jobs: models, helpers, actions, the create form and the service.

mod actions;
mod replication_form;
mod replications_model;
mod replications_service;
mod sort_policy;
mod status;

pub use actions::*;
pub use replication_form::*;
pub use replications_model::*;
pub use replications_service::*;
pub use sort_policy::*;
pub use status::*;
