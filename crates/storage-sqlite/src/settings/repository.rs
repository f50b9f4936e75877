use async_trait::async_trait;
use rusqlite::{params, OptionalExtension};

use hubconsole_core::settings::SettingsRepositoryTrait;
use hubconsole_core::Result;

use crate::db::SharedConnection;
use crate::errors::StorageError;

pub struct SettingsRepository {
    conn: SharedConnection,
}

impl SettingsRepository {
    pub fn new(conn: SharedConnection) -> Self {
        SettingsRepository { conn }
    }

    fn get_setting_impl(&self, key: &str) -> std::result::Result<Option<String>, StorageError> {
        let conn = self.conn.lock().map_err(|_| StorageError::LockPoisoned)?;
        let value = conn
            .query_row(
                "SELECT setting_value FROM app_settings WHERE setting_key = ?1",
                [key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set_setting_impl(&self, key: &str, value: &str) -> std::result::Result<(), StorageError> {
        let conn = self.conn.lock().map_err(|_| StorageError::LockPoisoned)?;
        conn.execute(
            "INSERT INTO app_settings (setting_key, setting_value) VALUES (?1, ?2)
             ON CONFLICT(setting_key) DO UPDATE SET
                setting_value = excluded.setting_value,
                updated_at = CURRENT_TIMESTAMP",
            params![key, value],
        )?;
        Ok(())
    }
}

#[async_trait]
impl SettingsRepositoryTrait for SettingsRepository {
    fn get_setting(&self, key: &str) -> Result<Option<String>> {
        Ok(self.get_setting_impl(key)?)
    }

    async fn set_setting(&self, key: &str, value: &str) -> Result<()> {
        self.set_setting_impl(key, value)?;
        log::debug!("Stored setting {}", key);
        Ok(())
    }
}
