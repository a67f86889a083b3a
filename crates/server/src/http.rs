//! HTTP Endpoints
//!
//! REST API for the tarot assistant.

use std::time::Duration;

use axum::{
    extract::{Json, Path, State},
    http::{HeaderValue, Method, StatusCode},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use tara_agent::{AskResponse, ConversationContext};
use tara_core::Language;

use crate::metrics::metrics_handler;
use crate::state::AppState;
use crate::ServerError;

/// Create the application router
pub fn create_router(state: AppState) -> Router {
    let server = &state.settings.server;
    let cors_layer = build_cors_layer(&server.cors_origins, server.cors_enabled);
    let timeout = Duration::from_secs(server.timeout_seconds);

    Router::new()
        .route("/ask", post(ask))
        .route("/api/sessions", post(create_session))
        .route("/api/sessions/:id", get(get_session).delete(delete_session))
        .route("/health", get(health_check))
        .route("/metrics", get(metrics_handler))
        .layer(TimeoutLayer::new(timeout))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer)
        .with_state(state)
}

/// Build CORS layer from configured origins
///
/// - disabled: permissive
/// - no origins configured: any origin
/// - otherwise: the parseable configured origins
fn build_cors_layer(origins: &[String], enabled: bool) -> CorsLayer {
    if !enabled {
        tracing::warn!("CORS is disabled - allowing all origins");
        return CorsLayer::permissive();
    }

    let base = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers(Any);

    if origins.is_empty() {
        return base.allow_origin(Any);
    }

    let parsed_origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| {
            origin.parse::<HeaderValue>().ok().or_else(|| {
                tracing::warn!("Invalid CORS origin: {}", origin);
                None
            })
        })
        .collect();

    if parsed_origins.is_empty() {
        tracing::error!("All configured CORS origins are invalid, allowing any origin");
        return base.allow_origin(Any);
    }

    tracing::info!("CORS configured with {} origins", parsed_origins.len());
    base.allow_origin(parsed_origins)
}

fn parse_language(code: Option<&str>) -> Result<Language, ServerError> {
    match code {
        None => Ok(Language::English),
        Some(code) => Language::from_code(code)
            .ok_or_else(|| ServerError::InvalidRequest(format!("unsupported language '{}'", code))),
    }
}

/// Ask request
#[derive(Debug, Deserialize)]
struct AskRequest {
    question: String,
    #[serde(default)]
    language: Option<String>,
    #[serde(default)]
    session_id: Option<String>,
}

/// Ask a question, inside a session when one is named
async fn ask(
    State(state): State<AppState>,
    Json(request): Json<AskRequest>,
) -> Result<Json<AskResponse>, ServerError> {
    let language = parse_language(request.language.as_deref())?;

    let response = match &request.session_id {
        Some(id) => {
            let session = state
                .sessions
                .get(id)
                .ok_or_else(|| ServerError::SessionNotFound(id.clone()))?;
            session.touch();

            let mut context = session.context().lock().await;
            state.assistant.ask(&request.question, &mut context).await?
        }
        None => {
            let mut context = ConversationContext::new(language);
            state.assistant.ask(&request.question, &mut context).await?
        }
    };

    Ok(Json(response))
}

/// Create session request
#[derive(Debug, Default, Deserialize)]
struct CreateSessionRequest {
    #[serde(default)]
    language: Option<String>,
}

#[derive(Debug, Serialize)]
struct CreateSessionResponse {
    session_id: String,
    language: Language,
}

/// Create a session
async fn create_session(
    State(state): State<AppState>,
    request: Option<Json<CreateSessionRequest>>,
) -> Result<(StatusCode, Json<CreateSessionResponse>), ServerError> {
    let request = request.map(|Json(r)| r).unwrap_or_default();
    let language = parse_language(request.language.as_deref())?;
    let session = state.sessions.create(language)?;

    Ok((
        StatusCode::CREATED,
        Json(CreateSessionResponse {
            session_id: session.id.clone(),
            language,
        }),
    ))
}

/// Get session info
async fn get_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, ServerError> {
    let session = state
        .sessions
        .get(&id)
        .ok_or_else(|| ServerError::SessionNotFound(id.clone()))?;
    let context = session.context().lock().await;

    Ok(Json(serde_json::json!({
        "session_id": session.id,
        "language": session.language,
        "created_at": session.created_at(),
        "turn_count": context.len(),
        "history": context.history(),
    })))
}

/// Delete session
async fn delete_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ServerError> {
    if state.sessions.remove(&id) {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ServerError::SessionNotFound(id))
    }
}

/// Liveness and basic status
async fn health_check(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
        "sessions": state.sessions.count(),
        "cache_enabled": state.settings.cache.enabled,
        "translation_provider": state.settings.translation.provider,
    }))
}
