//! planview HTTP Server
//!
//! Axum-based server exposing the dashboard tab views and assistant chat
//! sessions, and serving the WASM frontend.

mod app;
mod config;
mod handlers;
mod state;

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use agent_core::{Assistant, GenerationOptions, LlmProvider};
use agent_runtime::GeminiProvider;
use plan_advisor::{assistant_config, sample_snapshot, Dashboard, PortfolioSummary};

use crate::config::{ProviderKind, ServerConfig};
use crate::state::AppState;

fn build_provider(config: &ServerConfig) -> anyhow::Result<Arc<dyn LlmProvider>> {
    match config.provider {
        ProviderKind::Gemini => Ok(Arc::new(GeminiProvider::from_env()?)),
        #[cfg(feature = "ollama")]
        ProviderKind::Ollama => Ok(Arc::new(agent_runtime::OllamaProvider::from_env())),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment first so a RUST_LOG from .env reaches the filter
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::from_env()?;

    // Initialize LLM provider
    let provider = build_provider(&config)?;
    match provider.health_check().await {
        Ok(true) => tracing::info!("✓ Connected to {}", provider.name()),
        Ok(false) | Err(_) => {
            tracing::warn!("⚠ {} not reachable - assistant replies will fall back", provider.name());
        }
    }

    // Account data and assistant
    let snapshot = sample_snapshot();
    let summary = PortfolioSummary::from_holdings(&snapshot.holdings, &config.vesting);
    tracing::info!(
        plan = %snapshot.plan.plan_name,
        holdings = snapshot.holdings.len(),
        total_balance = %summary.total_balance,
        vesting_factor = %config.vesting.factor(),
        "account loaded"
    );

    let generation = GenerationOptions {
        model: config.model.clone(),
        ..Default::default()
    };
    let assistant = Assistant::new(
        provider,
        assistant_config(&snapshot, generation, config.history_window),
    );
    tracing::info!(model = %config.model, history_window = config.history_window, "assistant ready");

    let state = AppState::new(assistant, snapshot, Dashboard::new(config.vesting));
    let app = app::router(state, &config.static_dir);

    // Start server
    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;

    tracing::info!("══════════════════════════════════════════════════");
    tracing::info!("🚀 planview server running on http://{}", config.bind_addr);
    tracing::info!("══════════════════════════════════════════════════");
    tracing::info!("");
    tracing::info!("Endpoints:");
    tracing::info!("  GET    /health                                - Health check");
    tracing::info!("  GET    /api/account                           - Plan info");
    tracing::info!("  GET    /api/views/{{tab}}                       - Dashboard tab");
    tracing::info!("  GET    /api/performance                       - Balance history");
    tracing::info!("  POST   /api/assistant/sessions                - Start chat session");
    tracing::info!("  GET    /api/assistant/sessions/{{id}}           - Session state");
    tracing::info!("  POST   /api/assistant/sessions/{{id}}/widget    - Open / toggle / close");
    tracing::info!("  POST   /api/assistant/sessions/{{id}}/messages  - Send message");
    tracing::info!("  DELETE /api/assistant/sessions/{{id}}           - End session");
    tracing::info!("");

    axum::serve(listener, app).await?;

    Ok(())
}
