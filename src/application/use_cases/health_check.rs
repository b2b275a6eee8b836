use crate::{domain::health::HealthReport, domain::records::RecordStore};
use std::sync::Arc;
use tracing::warn;

/// Health check use case
pub struct HealthCheckUseCase {
    store: Arc<dyn RecordStore>,
    resources: usize,
}

impl HealthCheckUseCase {
    pub fn new(store: Arc<dyn RecordStore>, resources: usize) -> Self {
        Self { store, resources }
    }

    /// Ping the record store and build the report
    pub async fn execute(&self) -> HealthReport {
        let store_available = match self.store.ping().await {
            Ok(()) => true,
            Err(e) => {
                warn!(error = %e, "Record store health check failed");
                false
            }
        };
        HealthReport::new(self.resources, store_available)
    }
}
