use mailsift_classifiers::InferenceService;
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::Arc;

/// Application state shared across all requests
#[derive(Clone)]
pub struct AppState {
    /// Inference over the model loaded at startup
    pub service: Arc<InferenceService>,

    /// Prometheus metrics handle for rendering, when metrics are enabled
    pub metrics_handle: Option<PrometheusHandle>,
}

impl AppState {
    pub fn new(service: InferenceService) -> Self {
        Self {
            service: Arc::new(service),
            metrics_handle: None,
        }
    }

    /// Attach the Prometheus handle rendered at /metrics
    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics_handle = Some(handle);
        self
    }
}
