//! Application State
//!
//! Shared state across all handlers.

use std::sync::Arc;

use metrics_exporter_prometheus::PrometheusHandle;
use tara_agent::{AgentError, TarotAssistant};
use tara_config::Settings;

use crate::session::SessionManager;

/// Application state
#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<Settings>,
    pub assistant: Arc<TarotAssistant>,
    pub sessions: Arc<SessionManager>,
    /// Prometheus handle; `None` when metrics are disabled
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    /// Build the assistant and its backends from settings
    pub fn new(settings: Settings) -> Result<Self, AgentError> {
        let assistant = TarotAssistant::from_settings(&settings)?;
        Ok(Self::with_assistant(settings, assistant))
    }

    /// Wrap an already-built assistant
    pub fn with_assistant(settings: Settings, assistant: TarotAssistant) -> Self {
        let sessions = Arc::new(SessionManager::new(settings.server.max_sessions));
        Self {
            settings: Arc::new(settings),
            assistant: Arc::new(assistant),
            sessions,
            metrics: None,
        }
    }

    pub fn with_metrics(mut self, handle: Option<PrometheusHandle>) -> Self {
        self.metrics = handle;
        self
    }
}
