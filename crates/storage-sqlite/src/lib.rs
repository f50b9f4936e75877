//! SQLite persistence for the console's local settings.

pub mod db;
pub mod errors;
pub mod settings;

pub use db::{open, open_in_memory, SharedConnection};
pub use errors::StorageError;
pub use settings::SettingsRepository;
