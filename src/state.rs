use crate::config::AnalyticsConfig;
use std::sync::Arc;

/// Shared, read-only handler state. Analytics are recomputed per request.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AnalyticsConfig>,
    pub request_schema: Arc<serde_json::Value>,
}

impl AppState {
    pub fn new(config: AnalyticsConfig, request_schema: serde_json::Value) -> Self {
        Self {
            config: Arc::new(config),
            request_schema: Arc::new(request_schema),
        }
    }
}
