use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::fetcher::Record;

use super::store::{primary_keys, SyncError, SyncReport, SyncStore};

/// In-process store with the same reconciliation rules as `PgStore`.
#[derive(Default)]
pub struct MemoryStore {
    entities: Mutex<HashMap<String, BTreeMap<String, Record>>>,
    calls: Mutex<Vec<(String, usize)>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// (entity, record count) for every `changes` call, in order.
    pub fn calls(&self) -> Vec<(String, usize)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn ids(&self, entity: &str) -> Vec<String> {
        self.entities
            .lock()
            .unwrap()
            .get(entity)
            .map(|rows| rows.keys().cloned().collect())
            .unwrap_or_default()
    }

    pub fn get(&self, entity: &str, id: &str) -> Option<Record> {
        self.entities.lock().unwrap().get(entity).and_then(|rows| rows.get(id).cloned())
    }
}

#[async_trait]
impl SyncStore for MemoryStore {
    async fn changes(&self, records: Vec<Record>, entity: &str) -> Result<SyncReport, SyncError> {
        self.calls.lock().unwrap().push((entity.to_string(), records.len()));
        let keys = primary_keys(&records)?;

        let mut entities = self.entities.lock().unwrap();
        let rows = entities.entry(entity.to_string()).or_default();
        let mut report = SyncReport::default();

        for (key, record) in keys.iter().zip(records) {
            if rows.insert(key.clone(), record).is_some() { report.updated += 1; } else { report.inserted += 1; }
        }

        let keep: HashSet<&String> = keys.iter().collect();
        let before = rows.len();
        rows.retain(|id, _| keep.contains(id));
        report.deleted = before - rows.len();

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn records(v: serde_json::Value) -> Vec<Record> {
        v.as_array().unwrap().iter().map(|r| r.as_object().cloned().unwrap()).collect()
    }

    #[tokio::test]
    async fn second_sync_updates_and_deletes() {
        let store = MemoryStore::new();
        let first = store.changes(records(json!([{"id": "1"}, {"id": "2"}])), "Data").await.unwrap();
        assert_eq!(first, SyncReport { inserted: 2, updated: 0, deleted: 0 });

        let second = store
            .changes(records(json!([{"id": "2", "text": "edited"}, {"id": "3"}])), "Data")
            .await
            .unwrap();
        assert_eq!(second, SyncReport { inserted: 1, updated: 1, deleted: 1 });
        assert_eq!(store.ids("Data"), vec!["2", "3"]);
        assert_eq!(store.get("Data", "2").unwrap()["text"], "edited");
    }

    #[tokio::test]
    async fn entities_are_isolated() {
        let store = MemoryStore::new();
        store.changes(records(json!([{"id": "1"}])), "Data").await.unwrap();
        store.changes(records(json!([{"id": "9"}])), "Users").await.unwrap();
        assert_eq!(store.ids("Data"), vec!["1"]);
        assert_eq!(store.ids("Users"), vec!["9"]);
    }

    #[tokio::test]
    async fn rejected_payload_leaves_store_untouched() {
        let store = MemoryStore::new();
        store.changes(records(json!([{"id": "1"}])), "Data").await.unwrap();
        let err = store.changes(records(json!([{"id": "2"}, {"text": "no id"}])), "Data").await.unwrap_err();
        assert!(matches!(err, SyncError::MissingPrimaryKey { index: 1 }));
        assert_eq!(store.ids("Data"), vec!["1"]);
    }
}
