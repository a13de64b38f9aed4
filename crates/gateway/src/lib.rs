//! HTTP gateway for Chatwise.
//!
//! Exposes the chat endpoint, a health check, and the embedded chat page.
//! Each `POST /chat` loads the session's history, runs the dispatcher on
//! it, and saves it back while holding that session's lock.
//!
//! Built on Axum.

pub mod frontend;

use axum::extract::DefaultBodyLimit;
use axum::{
    Router,
    extract::State,
    response::Json,
    routing::{get, post},
};
use chatwise_agent::Dispatcher;
use chatwise_config::AppConfig;
use chatwise_core::message::SessionId;
use chatwise_core::session::SessionStore;
use chatwise_memory::{InMemorySessionStore, SessionLocks};
use chatwise_tools::OpenWeatherClient;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info};

/// Largest accepted request body.
pub const MAX_BODY_BYTES: usize = 64 * 1024;

/// Shared application state for the gateway.
pub struct GatewayState {
    pub dispatcher: Dispatcher,
    pub sessions: Arc<dyn SessionStore>,
    pub locks: SessionLocks,
}

impl GatewayState {
    pub fn new(dispatcher: Dispatcher, sessions: Arc<dyn SessionStore>) -> Self {
        Self {
            dispatcher,
            sessions,
            locks: SessionLocks::new(),
        }
    }
}

type SharedState = Arc<GatewayState>;

/// Build the Axum router with all gateway routes.
pub fn build_router(state: SharedState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/chat", post(chat_handler))
        .with_state(state)
        .merge(frontend::frontend_router())
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(tower_http::trace::TraceLayer::new_for_http())
}

/// Build a dispatcher wired to the configured weather service and
/// language model.
pub fn build_dispatcher(config: &AppConfig) -> Result<Dispatcher, Box<dyn std::error::Error>> {
    let weather = OpenWeatherClient::new(
        config.weather.base_url.clone(),
        config.weather.api_key.clone(),
        config.weather.timeout_secs,
    )?;

    let dispatcher = Dispatcher::new(Arc::new(weather));
    Ok(match chatwise_providers::build_from_config(&config.llm)? {
        Some(provider) => dispatcher.with_provider(provider),
        None => dispatcher,
    })
}

/// Start the gateway HTTP server.
pub async fn start(config: AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    let addr = format!("{}:{}", config.gateway.host, config.gateway.port);

    let dispatcher = build_dispatcher(&config)?;
    let sessions = Arc::new(InMemorySessionStore::new(config.gateway.max_sessions));
    let state = Arc::new(GatewayState::new(dispatcher, sessions));

    let app = build_router(state);

    info!(addr = %addr, "Gateway starting");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

// --- Handlers ---

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

#[derive(Deserialize)]
struct ChatRequest {
    #[serde(default)]
    message: String,
    #[serde(default)]
    session_id: Option<String>,
}

#[derive(Serialize)]
struct ChatResponse {
    response: String,
    session_id: String,
}

async fn chat_handler(
    State(state): State<SharedState>,
    Json(payload): Json<ChatRequest>,
) -> Json<ChatResponse> {
    let session_id = payload
        .session_id
        .as_deref()
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(SessionId::from)
        .unwrap_or_default();

    info!(
        session = %session_id,
        message_len = payload.message.len(),
        "Chat message received"
    );

    let _guard = state.locks.acquire(&session_id).await;
    let response = match state
        .dispatcher
        .handle_message(state.sessions.as_ref(), &session_id, &payload.message)
        .await
    {
        Ok(reply) => reply,
        Err(e) => {
            error!(error = %e, session = %session_id, "Session storage failed");
            format!("Error processing message: {e}")
        }
    };

    Json(ChatResponse {
        response,
        session_id: session_id.to_string(),
    })
}
