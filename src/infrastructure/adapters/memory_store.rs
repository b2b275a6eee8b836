//! In-process record store
//!
//! Records live in memory for the lifetime of the process. Identifiers are
//! allocated per resource and never reused after a delete.

use crate::domain::records::{RecordId, RecordStore, StoredRecord};
use crate::shared::error::AppResult;
use async_trait::async_trait;
use serde_json::{Map, Value};
use std::collections::{BTreeMap, HashMap};
use tokio::sync::RwLock;
use tracing::debug;

#[derive(Debug, Default)]
struct Collection {
    next_id: RecordId,
    records: BTreeMap<RecordId, Map<String, Value>>,
}

/// `RecordStore` backed by a map per resource
#[derive(Debug, Default)]
pub struct InMemoryRecordStore {
    collections: RwLock<HashMap<String, Collection>>,
}

impl InMemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RecordStore for InMemoryRecordStore {
    async fn list(&self, resource: &str) -> AppResult<Vec<StoredRecord>> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(resource)
            .map(|c| {
                c.records
                    .iter()
                    .map(|(id, fields)| StoredRecord { id: *id, fields: fields.clone() })
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn get(&self, resource: &str, id: RecordId) -> AppResult<Option<StoredRecord>> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(resource)
            .and_then(|c| c.records.get(&id))
            .map(|fields| StoredRecord { id, fields: fields.clone() }))
    }

    async fn insert(&self, resource: &str, fields: Map<String, Value>) -> AppResult<StoredRecord> {
        let mut collections = self.collections.write().await;
        let collection = collections.entry(resource.to_string()).or_default();
        collection.next_id += 1;
        let id = collection.next_id;
        collection.records.insert(id, fields.clone());
        debug!(resource = %resource, id = id, "Inserted record");
        Ok(StoredRecord { id, fields })
    }

    async fn update(
        &self,
        resource: &str,
        id: RecordId,
        fields: Map<String, Value>,
    ) -> AppResult<Option<StoredRecord>> {
        let mut collections = self.collections.write().await;
        let Some(existing) = collections
            .get_mut(resource)
            .and_then(|c| c.records.get_mut(&id))
        else {
            return Ok(None);
        };
        *existing = fields.clone();
        Ok(Some(StoredRecord { id, fields }))
    }

    async fn delete(&self, resource: &str, id: RecordId) -> AppResult<bool> {
        let mut collections = self.collections.write().await;
        Ok(collections
            .get_mut(resource)
            .map(|c| c.records.remove(&id).is_some())
            .unwrap_or(false))
    }
}
