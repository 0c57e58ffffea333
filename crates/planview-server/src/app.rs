//! Router

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

use crate::handlers::{
    account, create_session, delete_session, get_session, health_check, performance,
    post_message, tab_view, update_widget,
};
use crate::state::AppState;

/// API routes, with the WASM frontend served from `static_dir` for everything else
pub fn router(state: AppState, static_dir: &str) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Health & account
        .route("/health", get(health_check))
        .route("/api/account", get(account))
        .route("/api/performance", get(performance))
        .route("/api/views/{tab}", get(tab_view))

        // Assistant
        .route("/api/assistant/sessions", post(create_session))
        .route("/api/assistant/sessions/{id}", get(get_session).delete(delete_session))
        .route("/api/assistant/sessions/{id}/widget", post(update_widget))
        .route("/api/assistant/sessions/{id}/messages", post(post_message))

        // Static files (WASM frontend)
        .fallback_service(ServeDir::new(static_dir))

        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    use agent_core::{
        AgentError, Assistant, Completion, GenerationOptions, LlmProvider, Message, SessionId,
    };
    use async_trait::async_trait;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use plan_advisor::{assistant_config, sample_snapshot, Dashboard};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    struct EchoProvider {
        fail: bool,
    }

    #[async_trait]
    impl LlmProvider for EchoProvider {
        fn name(&self) -> &str {
            "Echo"
        }

        async fn health_check(&self) -> agent_core::Result<bool> {
            Ok(!self.fail)
        }

        async fn complete(
            &self,
            messages: &[Message],
            options: &GenerationOptions,
        ) -> agent_core::Result<Completion> {
            if self.fail {
                return Err(AgentError::ProviderUnavailable("offline".into()));
            }
            let last = messages.last().map(|m| m.content.clone()).unwrap_or_default();
            Ok(Completion::text(format!("You said: {last}"), options.model.clone()))
        }
    }

    /// Replies only after a fixed delay
    struct SlowProvider {
        delay: Duration,
    }

    #[async_trait]
    impl LlmProvider for SlowProvider {
        fn name(&self) -> &str {
            "Slow"
        }

        async fn health_check(&self) -> agent_core::Result<bool> {
            Ok(true)
        }

        async fn complete(
            &self,
            _messages: &[Message],
            options: &GenerationOptions,
        ) -> agent_core::Result<Completion> {
            tokio::time::sleep(self.delay).await;
            Ok(Completion::text("Sorry for the wait.", options.model.clone()))
        }
    }

    fn state_with(provider: Arc<dyn LlmProvider>) -> AppState {
        let snapshot = sample_snapshot();
        let config = assistant_config(&snapshot, GenerationOptions::default(), 10);
        let assistant = Assistant::new(provider, config);
        AppState::new(assistant, snapshot, Dashboard::default())
    }

    fn test_state(fail: bool) -> AppState {
        state_with(Arc::new(EchoProvider { fail }))
    }

    async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        }
        .unwrap();

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, json)
    }

    async fn new_session(app: &Router) -> String {
        let (status, body) = send(app, "POST", "/api/assistant/sessions", None).await;
        assert_eq!(status, StatusCode::CREATED);
        body["id"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn test_health() {
        let app = router(test_state(false), "static");
        let (status, body) = send(&app, "GET", "/health", None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["provider"], "Echo");
        assert_eq!(body["provider_reachable"], true);
    }

    #[tokio::test]
    async fn test_account_and_performance() {
        let app = router(test_state(false), "static");

        let (_, account) = send(&app, "GET", "/api/account", None).await;
        assert_eq!(account["plan_id"], "84291-01");

        let (_, series) = send(&app, "GET", "/api/performance", None).await;
        assert_eq!(series.as_array().unwrap().len(), 12);
    }

    #[tokio::test]
    async fn test_tab_views() {
        let app = router(test_state(false), "static");

        let (status, body) = send(&app, "GET", "/api/views/Summary", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["tab"], "summary");
        assert_eq!(body["total_balance"], "$302,931.50");
        assert_eq!(body["vested_balance"], "$287,784.93");

        let (status, body) = send(&app, "GET", "/api/views/activity", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["transactions"].as_array().unwrap().len(), 6);

        let (status, body) = send(&app, "GET", "/api/views/settings", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["code"], "UNKNOWN_TAB");
    }

    #[tokio::test]
    async fn test_new_session_is_expanded_with_greeting() {
        let app = router(test_state(false), "static");
        let (_, body) = send(&app, "POST", "/api/assistant/sessions", None).await;

        assert_eq!(body["widget"], "expanded");
        assert_eq!(body["is_loading"], false);
        let messages = body["messages"].as_array().unwrap();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0]["role"], "assistant");
        assert!(messages[0]["content"].as_str().unwrap().starts_with("Hello Alexander!"));
    }

    #[tokio::test]
    async fn test_message_round_trip() {
        let app = router(test_state(false), "static");
        let id = new_session(&app).await;

        let uri = format!("/api/assistant/sessions/{id}/messages");
        let (status, body) = send(&app, "POST", &uri, Some(json!({"text": "What is vesting?"}))).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["is_loading"], false);
        let messages = body["messages"].as_array().unwrap();
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[1]["role"], "user");
        assert_eq!(messages[2]["content"], "You said: What is vesting?");
    }

    #[tokio::test]
    async fn test_empty_message_rejected() {
        let app = router(test_state(false), "static");
        let id = new_session(&app).await;

        let uri = format!("/api/assistant/sessions/{id}/messages");
        let (status, body) = send(&app, "POST", &uri, Some(json!({"text": "   "}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "EMPTY_MESSAGE");

        let (_, session) = send(&app, "GET", &format!("/api/assistant/sessions/{id}"), None).await;
        assert_eq!(session["messages"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_busy_session_conflict() {
        let state = test_state(false);
        let app = router(state.clone(), "static");
        let id = new_session(&app).await;

        let session = state.sessions.get(&SessionId::from_string(id.as_str())).await.unwrap();
        let _pending = session.lock().await.begin_submit("first").unwrap();

        let uri = format!("/api/assistant/sessions/{id}/messages");
        let (status, body) = send(&app, "POST", &uri, Some(json!({"text": "second"}))).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["code"], "SESSION_BUSY");
        assert_eq!(session.lock().await.transcript().len(), 2);
    }

    #[tokio::test]
    async fn test_dropped_request_still_completes_exchange() {
        let provider = SlowProvider { delay: Duration::from_millis(300) };
        let app = router(state_with(Arc::new(provider)), "static");
        let id = new_session(&app).await;
        let session_uri = format!("/api/assistant/sessions/{id}");

        // Client gives up long before the provider answers
        let uri = format!("{session_uri}/messages");
        let abandoned = tokio::time::timeout(
            Duration::from_millis(50),
            send(&app, "POST", &uri, Some(json!({"text": "Are you there?"}))),
        )
        .await;
        assert!(abandoned.is_err());

        let (_, body) = send(&app, "GET", &session_uri, None).await;
        assert_eq!(body["is_loading"], true);

        tokio::time::sleep(Duration::from_millis(600)).await;

        let (_, body) = send(&app, "GET", &session_uri, None).await;
        assert_eq!(body["is_loading"], false);
        let messages = body["messages"].as_array().unwrap();
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[1]["content"], "Are you there?");
        assert_eq!(messages[2]["content"], "Sorry for the wait.");

        let (status, _) = send(&app, "POST", &uri, Some(json!({"text": "Thanks"}))).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_provider_failure_appends_fallback() {
        let app = router(test_state(true), "static");
        let id = new_session(&app).await;

        let uri = format!("/api/assistant/sessions/{id}/messages");
        let (status, body) = send(&app, "POST", &uri, Some(json!({"text": "Hello"}))).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["is_loading"], false);
        let messages = body["messages"].as_array().unwrap();
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[2]["role"], "assistant");
        assert_eq!(messages[2]["content"], agent_core::DEFAULT_FALLBACK_REPLY);
    }

    #[tokio::test]
    async fn test_widget_actions() {
        let app = router(test_state(false), "static");
        let id = new_session(&app).await;
        let uri = format!("/api/assistant/sessions/{id}/widget");

        let (_, body) = send(&app, "POST", &uri, Some(json!({"action": "toggle"}))).await;
        assert_eq!(body["widget"], "minimized");

        let (_, body) = send(&app, "POST", &uri, Some(json!({"action": "close"}))).await;
        assert_eq!(body["widget"], "closed");
        assert_eq!(body["messages"].as_array().unwrap().len(), 1);

        let (_, body) = send(&app, "POST", &uri, Some(json!({"action": "open"}))).await;
        assert_eq!(body["widget"], "expanded");
    }

    #[tokio::test]
    async fn test_delete_session() {
        let app = router(test_state(false), "static");
        let id = new_session(&app).await;
        let uri = format!("/api/assistant/sessions/{id}");

        let (status, _) = send(&app, "DELETE", &uri, None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, body) = send(&app, "GET", &uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["code"], "SESSION_NOT_FOUND");

        let (status, _) = send(&app, "DELETE", &uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
