use candidate_shortlist::config::AppConfig;
use candidate_shortlist::error::AppError;
use candidate_shortlist::workflows::shortlist::ShortlistEngine;
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Shared engine built from the loaded shortlist defaults.
pub(crate) fn build_engine(config: &AppConfig) -> Result<Arc<ShortlistEngine>, AppError> {
    let engine = ShortlistEngine::new(config.shortlist.clone())?;
    Ok(Arc::new(engine))
}
