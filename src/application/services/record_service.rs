//! Record service: validates request bodies and forwards clean records to
//! the data-access collaborator.

use crate::application::catalog::ResourceDefinition;
use crate::domain::records::{RecordId, RecordStore, StoredRecord};
use crate::domain::validation::ValidationOutcome;
use crate::shared::error::{AppError, AppResult};
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::{debug, info};

/// CRUD operations for one resource
pub struct RecordService {
    definition: ResourceDefinition,
    store: Arc<dyn RecordStore>,
}

impl RecordService {
    pub fn new(definition: ResourceDefinition, store: Arc<dyn RecordStore>) -> Self {
        Self { definition, store }
    }

    pub fn resource(&self) -> &str {
        self.definition.name
    }

    pub fn definition(&self) -> &ResourceDefinition {
        &self.definition
    }

    pub async fn list(&self) -> AppResult<Vec<StoredRecord>> {
        self.store.list(self.resource()).await
    }

    pub async fn find(&self, id: RecordId) -> AppResult<StoredRecord> {
        self.store
            .get(self.resource(), id)
            .await?
            .ok_or(AppError::RecordNotFound)
    }

    pub async fn create(&self, input: &Map<String, Value>) -> AppResult<StoredRecord> {
        let fields = self.clean(input)?;
        let record = self.store.insert(self.resource(), fields).await?;
        info!(resource = %self.resource(), id = record.id, "Record created");
        Ok(record)
    }

    /// Full replacement of an existing record
    pub async fn update(&self, id: RecordId, input: &Map<String, Value>) -> AppResult<StoredRecord> {
        let fields = self.clean(input)?;
        let record = self
            .store
            .update(self.resource(), id, fields)
            .await?
            .ok_or(AppError::RecordNotFound)?;
        info!(resource = %self.resource(), id = id, "Record updated");
        Ok(record)
    }

    pub async fn delete(&self, id: RecordId) -> AppResult<()> {
        if !self.store.delete(self.resource(), id).await? {
            return Err(AppError::RecordNotFound);
        }
        info!(resource = %self.resource(), id = id, "Record deleted");
        Ok(())
    }

    fn clean(&self, input: &Map<String, Value>) -> AppResult<Map<String, Value>> {
        match self.definition.rules.validate(input) {
            ValidationOutcome::Clean(fields) => Ok(fields),
            ValidationOutcome::Invalid(errors) => {
                let fields: Vec<&str> = errors.fields().collect();
                debug!(resource = %self.resource(), fields = ?fields, "Validation failed");
                Err(AppError::Validation(errors))
            }
        }
    }
}
