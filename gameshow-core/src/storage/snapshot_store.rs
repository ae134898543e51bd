use crate::error::Result;
use crate::storage::Storage;
use chrono::{DateTime, Utc};
use rusqlite::{params, OptionalExtension};
use serde::{de::DeserializeOwned, Serialize};

pub struct SnapshotStore<'a> {
    storage: &'a Storage,
}

impl<'a> SnapshotStore<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    pub async fn save<T: Serialize>(&self, name: &str, value: &T) -> Result<()> {
        let data = serde_json::to_string(value)?;
        let conn = self.storage.get_connection().await;

        conn.execute(
            "INSERT OR REPLACE INTO snapshots (name, data, updated_at) VALUES (?1, ?2, ?3)",
            params![name, data, Utc::now().timestamp()],
        )?;

        tracing::debug!("Saved snapshot '{}' ({} bytes)", name, data.len());
        Ok(())
    }

    pub async fn load<T: DeserializeOwned>(&self, name: &str) -> Result<Option<T>> {
        let conn = self.storage.get_connection().await;

        let data: Option<String> = conn
            .query_row(
                "SELECT data FROM snapshots WHERE name = ?1",
                params![name],
                |row| row.get(0),
            )
            .optional()?;

        match data {
            Some(data) => Ok(Some(serde_json::from_str(&data)?)),
            None => Ok(None),
        }
    }

    pub async fn updated_at(&self, name: &str) -> Result<Option<DateTime<Utc>>> {
        let conn = self.storage.get_connection().await;

        let timestamp: Option<i64> = conn
            .query_row(
                "SELECT updated_at FROM snapshots WHERE name = ?1",
                params![name],
                |row| row.get(0),
            )
            .optional()?;

        Ok(timestamp.and_then(|ts| DateTime::from_timestamp(ts, 0)))
    }

    pub async fn exists(&self, name: &str) -> Result<bool> {
        let conn = self.storage.get_connection().await;

        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM snapshots WHERE name = ?1",
            params![name],
            |row| row.get(0),
        )?;

        Ok(count > 0)
    }
}
