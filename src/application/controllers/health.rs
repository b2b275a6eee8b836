use crate::application::use_cases::HealthCheckUseCase;
use crate::domain::routing::{Handler, PathParams, RequestContext, ResponseSink};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::error;

/// Public `GET /health` handler
pub struct HealthController {
    use_case: Arc<HealthCheckUseCase>,
}

impl HealthController {
    pub fn new(use_case: Arc<HealthCheckUseCase>) -> Arc<dyn Handler> {
        Arc::new(Self { use_case })
    }
}

#[async_trait]
impl Handler for HealthController {
    async fn handle(&self, _ctx: &RequestContext, sink: &mut ResponseSink, _params: &PathParams) {
        let report = self.use_case.execute().await;
        match serde_json::to_value(&report) {
            Ok(payload) => sink.json(payload, None),
            Err(e) => {
                error!("Failed to serialize health report: {}", e);
                sink.error_json("Error interno del servidor.", 500);
            }
        }
    }
}
