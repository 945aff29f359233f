//! Axum server wiring.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    Router,
    routing::{get, post, put},
};
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::AppState;
use crate::api::{chat, knowledge, threads};
use crate::config::AppConfig;

/// Build the application router over the shared state.
///
/// Split out from [`start_server`] so integration tests can drive the exact
/// production routes in-process.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/api/chat", post(chat::api_chat))
        .route("/api/chat/stream", get(chat::api_chat_stream))
        .route(
            "/api/knowledge",
            get(knowledge::api_list_documents).post(knowledge::api_upsert_document),
        )
        .route(
            "/api/knowledge/stats",
            get(knowledge::api_knowledge_stats),
        )
        .route(
            "/api/knowledge/{id}",
            axum::routing::delete(knowledge::api_delete_document),
        )
        .route(
            "/api/threads",
            get(threads::api_list_threads).post(threads::api_create_thread),
        )
        .route(
            "/api/threads/{id}",
            get(threads::api_get_thread).delete(threads::api_delete_thread),
        )
        .route("/api/threads/{id}/agent", put(threads::api_set_agent_mode))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        // SSE runs keep comfortably inside this; a wedged provider call is
        // already bounded by the client-side request timeout.
        .layer(TimeoutLayer::new(Duration::from_secs(120)))
        .with_state(state)
}

/// Start the server and block until shutdown, flushing the store on exit.
pub async fn start_server(config: Arc<AppConfig>, state: AppState) -> anyhow::Result<()> {
    let store = Arc::clone(&state.store);
    let app = build_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!(
        name: "server.started",
        address = %addr,
        "Server started"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!(name: "server.shutdown", "Shutdown signal received");
        })
        .await?;

    store.close().await?;
    info!(name: "store.flushed", "Vector store flushed");
    Ok(())
}
