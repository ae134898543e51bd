use crate::error::Result;
use crate::event::ContractEvent;
use crate::storage::Storage;
use chrono::{DateTime, Utc};
use rusqlite::params;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredEvent {
    pub seq: i64,
    pub contract: String,
    pub name: String,
    pub payload: serde_json::Value,
    pub recorded_at: DateTime<Utc>,
}

pub struct EventStore<'a> {
    storage: &'a Storage,
}

impl<'a> EventStore<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Append events in order; returns how many were written.
    pub async fn append<E: ContractEvent>(&self, contract: &str, events: &[E]) -> Result<usize> {
        if events.is_empty() {
            return Ok(0);
        }

        let mut conn = self.storage.get_connection().await;
        let tx = conn.transaction()?;
        let now = Utc::now().timestamp();

        for event in events {
            let payload = serde_json::to_string(event)?;
            tx.execute(
                "INSERT INTO events (contract, name, payload, recorded_at) VALUES (?1, ?2, ?3, ?4)",
                params![contract, event.name(), payload, now],
            )?;
        }
        tx.commit()?;

        tracing::debug!("Recorded {} {} events", events.len(), contract);
        Ok(events.len())
    }

    /// Most recent `limit` events, oldest first.
    pub async fn list(&self, contract: Option<&str>, limit: usize) -> Result<Vec<StoredEvent>> {
        let conn = self.storage.get_connection().await;
        let limit = limit as i64;

        let mut stmt = conn.prepare(
            "SELECT seq, contract, name, payload, recorded_at FROM (
                SELECT seq, contract, name, payload, recorded_at
                FROM events
                WHERE ?1 IS NULL OR contract = ?1
                ORDER BY seq DESC
                LIMIT ?2
             ) ORDER BY seq ASC",
        )?;

        let rows = stmt.query_map(params![contract, limit], |row| {
            let payload: String = row.get(3)?;
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                payload,
                row.get::<_, i64>(4)?,
            ))
        })?;

        let mut events = Vec::new();
        for row in rows {
            let (seq, contract, name, payload, recorded_at) = row?;
            events.push(StoredEvent {
                seq,
                contract,
                name,
                payload: serde_json::from_str(&payload)?,
                recorded_at: DateTime::from_timestamp(recorded_at, 0).unwrap_or_else(Utc::now),
            });
        }

        Ok(events)
    }

    pub async fn count(&self, contract: Option<&str>) -> Result<u64> {
        let conn = self.storage.get_connection().await;

        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM events WHERE ?1 IS NULL OR contract = ?1",
            params![contract],
            |row| row.get(0),
        )?;

        Ok(count as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::TokenEvent;
    use crate::{Address, Amount};

    #[tokio::test]
    async fn test_append_and_list_in_order() {
        let storage = Storage::in_memory().await.unwrap();
        let store = EventStore::new(&storage);
        let alice = Address::from_label("alice");

        let events: Vec<TokenEvent> = (1..=3)
            .map(|n| TokenEvent::Transfer {
                from: None,
                to: Some(alice),
                amount: Amount::from_wei(n),
            })
            .collect();
        assert_eq!(store.append("token", &events).await.unwrap(), 3);

        let listed = store.list(Some("token"), 2).await.unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].payload["amount"], 2);
        assert_eq!(listed[1].payload["amount"], 3);
        assert_eq!(listed[1].name, "Transfer");
        assert!(listed[0].seq < listed[1].seq);
    }

    #[tokio::test]
    async fn test_filter_by_contract() {
        let storage = Storage::in_memory().await.unwrap();
        let store = EventStore::new(&storage);
        let owner = Address::from_label("owner");

        store
            .append(
                "token",
                &[TokenEvent::OwnershipTransferred {
                    previous_owner: owner,
                    new_owner: Address::from_label("next"),
                }],
            )
            .await
            .unwrap();

        assert_eq!(store.count(Some("token")).await.unwrap(), 1);
        assert_eq!(store.count(Some("betting")).await.unwrap(), 0);
        assert_eq!(store.count(None).await.unwrap(), 1);
        assert!(store.list(Some("betting"), 10).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_clear_removes_events() {
        let storage = Storage::in_memory().await.unwrap();
        let store = EventStore::new(&storage);
        let alice = Address::from_label("alice");

        store
            .append(
                "token",
                &[TokenEvent::Transfer {
                    from: Some(alice),
                    to: None,
                    amount: Amount::from_wei(1),
                }],
            )
            .await
            .unwrap();
        storage.clear().await.unwrap();

        assert_eq!(store.count(None).await.unwrap(), 0);
    }
}
