//! Stored records and the data-access port used by record services.

use crate::shared::error::AppResult;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Numeric record identifier, unique per resource
pub type RecordId = u64;

/// A persisted record: its id plus the validated fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredRecord {
    pub id: RecordId,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

/// Data-access collaborator keyed by resource name.
///
/// Implementations receive only clean, validated field maps.
#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn list(&self, resource: &str) -> AppResult<Vec<StoredRecord>>;

    async fn get(&self, resource: &str, id: RecordId) -> AppResult<Option<StoredRecord>>;

    async fn insert(&self, resource: &str, fields: Map<String, Value>) -> AppResult<StoredRecord>;

    /// Replace the fields of an existing record; `None` when it does not exist
    async fn update(
        &self,
        resource: &str,
        id: RecordId,
        fields: Map<String, Value>,
    ) -> AppResult<Option<StoredRecord>>;

    /// `true` when a record was removed
    async fn delete(&self, resource: &str, id: RecordId) -> AppResult<bool>;

    /// Cheap availability check used by health checks
    async fn ping(&self) -> AppResult<()> {
        Ok(())
    }
}
