//! HTTP Handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use agent_core::{
    AssistantSession, ExchangeOutcome, Message, SessionId, SharedSession, SubmitRejected,
    WidgetState,
};
use plan_advisor::{AdvisorError, PerformancePoint, PlanInfo, TabPayload, TabView};

use crate::state::AppState;

// ============================================================================
// Response Types
// ============================================================================

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub provider: String,
    pub provider_reachable: bool,
    pub sessions: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

pub type ApiError = (StatusCode, Json<ErrorResponse>);

fn api_error(status: StatusCode, code: &str, error: impl Into<String>) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            error: error.into(),
            code: code.into(),
        }),
    )
}

/// Client-facing view of a chat session
#[derive(Debug, Serialize)]
pub struct SessionView {
    pub id: String,
    pub widget: WidgetState,
    pub is_loading: bool,
    pub history_window: usize,
    pub messages: Vec<Message>,
}

impl From<&AssistantSession> for SessionView {
    fn from(session: &AssistantSession) -> Self {
        Self {
            id: session.id().to_string(),
            widget: session.widget(),
            is_loading: session.is_loading(),
            history_window: session.history_window(),
            messages: session.transcript().messages().to_vec(),
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WidgetAction {
    Open,
    Toggle,
    Close,
}

#[derive(Debug, Deserialize)]
pub struct WidgetRequest {
    pub action: WidgetAction,
}

#[derive(Debug, Deserialize)]
pub struct MessageRequest {
    pub text: String,
}

// ============================================================================
// Dashboard
// ============================================================================

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let provider = state.assistant.provider();
    let provider_reachable = provider.health_check().await.unwrap_or(false);

    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        provider: provider.name().to_string(),
        provider_reachable,
        sessions: state.sessions.len().await,
    })
}

pub async fn account(State(state): State<AppState>) -> Json<PlanInfo> {
    Json(state.snapshot.plan.clone())
}

pub async fn performance(State(state): State<AppState>) -> Json<Vec<PerformancePoint>> {
    Json(state.snapshot.performance.clone())
}

/// Render one dashboard tab
pub async fn tab_view(
    State(state): State<AppState>,
    Path(tab): Path<String>,
) -> Result<Json<TabPayload>, ApiError> {
    let tab: TabView = tab
        .parse()
        .map_err(|e: AdvisorError| api_error(StatusCode::NOT_FOUND, "UNKNOWN_TAB", e.to_string()))?;

    Ok(Json(state.dashboard.render(tab, &state.snapshot)))
}

// ============================================================================
// Assistant Sessions
// ============================================================================

async fn find_session(state: &AppState, id: &str) -> Result<SharedSession, ApiError> {
    state
        .sessions
        .get(&SessionId::from_string(id))
        .await
        .ok_or_else(|| api_error(StatusCode::NOT_FOUND, "SESSION_NOT_FOUND", "Session not found"))
}

/// Start a session with the widget expanded and the greeting in place
pub async fn create_session(
    State(state): State<AppState>,
) -> (StatusCode, Json<SessionView>) {
    let mut session = state.assistant.new_session();
    session.open();

    let view = SessionView::from(&session);
    state.sessions.insert(session).await;
    tracing::info!(session = %view.id, "session created");

    (StatusCode::CREATED, Json(view))
}

pub async fn get_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SessionView>, ApiError> {
    let session = find_session(&state, &id).await?;
    let guard = session.lock().await;
    Ok(Json(SessionView::from(&*guard)))
}

pub async fn update_widget(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<WidgetRequest>,
) -> Result<Json<SessionView>, ApiError> {
    let session = find_session(&state, &id).await?;
    let mut guard = session.lock().await;

    match payload.action {
        WidgetAction::Open => guard.open(),
        WidgetAction::Toggle => guard.toggle_minimized(),
        WidgetAction::Close => guard.close(),
    }

    Ok(Json(SessionView::from(&*guard)))
}

/// Submit a message and wait for the assistant turn.
///
/// The session lock is released while the provider is awaited, so reads and
/// widget changes proceed and a concurrent submit sees the busy flag. The
/// exchange runs on its own task: a client that disconnects mid-request does
/// not leave the session stuck in the loading state.
pub async fn post_message(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<MessageRequest>,
) -> Result<Json<SessionView>, ApiError> {
    let session = find_session(&state, &id).await?;

    let pending = session
        .lock()
        .await
        .begin_submit(&payload.text)
        .map_err(|rejected| match rejected {
            SubmitRejected::Empty => {
                api_error(StatusCode::BAD_REQUEST, "EMPTY_MESSAGE", rejected.to_string())
            }
            SubmitRejected::Busy => {
                api_error(StatusCode::CONFLICT, "SESSION_BUSY", rejected.to_string())
            }
        })?;

    let assistant = state.assistant.clone();
    let task_session = session.clone();
    let session_id = id.clone();
    let exchange = tokio::spawn(async move {
        let outcome = assistant.exchange(&pending).await;
        if let ExchangeOutcome::Failed { error, .. } = &outcome {
            tracing::warn!(session = %session_id, error = %error, "assistant reply replaced by fallback");
        }

        let mut guard = task_session.lock().await;
        guard.complete_exchange(outcome);
        SessionView::from(&*guard)
    });

    match exchange.await {
        Ok(view) => Ok(Json(view)),
        Err(e) => {
            tracing::error!(session = %id, error = %e, "exchange task aborted");
            let mut guard = session.lock().await;
            if guard.is_loading() {
                guard.complete_exchange(ExchangeOutcome::Failed {
                    notice: state.assistant.config().fallback_reply.clone(),
                    error: e.to_string(),
                });
            }
            Err(api_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "EXCHANGE_ABORTED",
                "The assistant turn could not be completed",
            ))
        }
    }
}

pub async fn delete_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    if state.sessions.remove(&SessionId::from_string(id.as_str())).await {
        tracing::info!(session = %id, "session ended");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(api_error(StatusCode::NOT_FOUND, "SESSION_NOT_FOUND", "Session not found"))
    }
}
