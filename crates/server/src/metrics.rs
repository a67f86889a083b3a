//! Prometheus metrics
//!
//! The recorder is process-global; `init_metrics` installs it once and
//! every later call reuses the same handle.

use axum::extract::State;
use axum::http::StatusCode;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use once_cell::sync::OnceCell;

use crate::state::AppState;

static HANDLE: OnceCell<PrometheusHandle> = OnceCell::new();

/// Install the Prometheus recorder
///
/// Returns `None` if another recorder was installed first.
pub fn init_metrics() -> Option<PrometheusHandle> {
    HANDLE
        .get_or_try_init(|| {
            PrometheusBuilder::new()
                .install_recorder()
                .map_err(|e| tracing::warn!(error = %e, "Failed to install metrics recorder"))
        })
        .ok()
        .cloned()
}

/// GET /metrics
pub async fn metrics_handler(State(state): State<AppState>) -> (StatusCode, String) {
    match &state.metrics {
        Some(handle) => (StatusCode::OK, handle.render()),
        None => (StatusCode::NOT_FOUND, "metrics disabled\n".to_string()),
    }
}

/// Sessions currently held in memory
pub fn record_active_sessions(count: usize) {
    ::metrics::gauge!("tara_active_sessions").set(count as f64);
}
