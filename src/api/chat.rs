//! Chat endpoints.
//!
//! `POST /api/chat` runs one orchestration and returns the full reply.
//! `GET /api/chat/stream` runs the same pipeline over SSE, emitting named
//! `progress` events at each checkpoint before the final `done` payload.

use std::convert::Infallible;
use std::time::Duration;

use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::sse::{Event, KeepAlive, Sse},
};
use futures::Stream;
use serde::{Deserialize, Serialize};

use crate::AppState;
use crate::domain::{AgentLog, AgentRole, ChatMessage, Document};
use crate::session::ChatThread;

/// Threads created implicitly get a title clipped from the first query.
const AUTO_TITLE_LEN: usize = 48;

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    /// Existing thread to continue; a new thread is created when absent.
    #[serde(default)]
    pub thread_id: Option<String>,
    pub query: String,
    /// Manual override; absent or SUPERVISOR means auto-routing.
    #[serde(default)]
    pub agent: Option<AgentRole>,
}

/// A retrieved document as presented to callers: embedding stripped, content
/// clipped to a snippet.
#[derive(Debug, Clone, Serialize)]
pub struct CitationDoc {
    pub id: String,
    pub title: String,
    pub category: String,
    pub snippet: String,
}

impl From<&Document> for CitationDoc {
    fn from(doc: &Document) -> Self {
        Self {
            id: doc.id.clone(),
            title: doc.metadata.title.clone(),
            category: doc.scope().to_string(),
            snippet: doc.content.chars().take(200).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub text: String,
    pub agent: AgentRole,
    pub context: Vec<CitationDoc>,
    pub logs: Vec<AgentLog>,
    pub thread_id: String,
}

/// Events emitted on the SSE variant.
#[derive(Debug, Serialize)]
#[serde(tag = "type", content = "data")]
pub enum ChatEvent {
    #[serde(rename = "progress")]
    Progress { agent: AgentRole, stage: String },
    #[serde(rename = "done")]
    Done(ChatResponse),
    #[serde(rename = "error")]
    Error { message: String },
}

fn resolve_thread(
    state: &AppState,
    thread_id: Option<&str>,
    query: &str,
) -> Result<ChatThread, (StatusCode, String)> {
    match thread_id {
        Some(id) => state
            .threads
            .get(id)
            .ok_or_else(|| (StatusCode::NOT_FOUND, format!("Unknown thread: {id}"))),
        None => {
            let title: String = query.chars().take(AUTO_TITLE_LEN).collect();
            Ok(state.threads.create(title, AgentRole::Supervisor))
        }
    }
}

/// Shared pipeline for both chat variants: orchestrate, then append the
/// exchange to the thread.
async fn run_chat(
    state: &AppState,
    thread: &ChatThread,
    query: &str,
    agent_override: Option<AgentRole>,
    progress: Option<&crate::agents::ProgressSink>,
) -> ChatResponse {
    // A non-supervisor thread mode acts as a standing override unless the
    // request names a role explicitly.
    let forced = agent_override.or(Some(thread.agent_mode));

    let reply = state
        .orchestrator
        .run(query, forced, &thread.messages, progress)
        .await;

    state.threads.append(&thread.id, ChatMessage::user(query));
    state.threads.append(
        &thread.id,
        ChatMessage::assistant(reply.text.clone(), reply.agent),
    );

    ChatResponse {
        text: reply.text,
        agent: reply.agent,
        context: reply.context.iter().map(CitationDoc::from).collect(),
        logs: reply.logs,
        thread_id: thread.id.clone(),
    }
}

pub async fn api_chat(
    State(state): State<AppState>,
    Json(req): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, (StatusCode, String)> {
    if req.query.trim().is_empty() {
        return Err((StatusCode::BAD_REQUEST, "Query cannot be empty".to_string()));
    }

    let thread = resolve_thread(&state, req.thread_id.as_deref(), &req.query)?;
    let response = run_chat(&state, &thread, &req.query, req.agent, None).await;
    Ok(Json(response))
}

#[derive(Debug, Deserialize)]
pub struct ChatStreamParams {
    #[serde(default)]
    pub thread_id: Option<String>,
    pub query: String,
    #[serde(default)]
    pub agent: Option<AgentRole>,
}

pub async fn api_chat_stream(
    State(state): State<AppState>,
    Query(params): Query<ChatStreamParams>,
) -> Result<Sse<impl Stream<Item = Result<Event, Infallible>>>, (StatusCode, String)> {
    if params.query.trim().is_empty() {
        return Err((StatusCode::BAD_REQUEST, "Query cannot be empty".to_string()));
    }

    let thread = resolve_thread(&state, params.thread_id.as_deref(), &params.query)?;

    let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel::<ChatEvent>();

    tokio::spawn(async move {
        let progress_tx = tx.clone();
        let sink = move |agent: AgentRole, stage: &str| {
            let _ = progress_tx.send(ChatEvent::Progress {
                agent,
                stage: stage.to_string(),
            });
        };

        let response = run_chat(&state, &thread, &params.query, params.agent, Some(&sink)).await;
        let _ = tx.send(ChatEvent::Done(response));
    });

    let stream = async_stream::stream! {
        while let Some(event) = rx.recv().await {
            let json = serde_json::to_string(&event).unwrap_or_else(|_| "{}".to_string());
            let name = match &event {
                ChatEvent::Progress { .. } => "progress",
                ChatEvent::Done(_) => "done",
                ChatEvent::Error { .. } => "error",
            };
            yield Ok(Event::default().event(name).data(json));
        }
    };

    Ok(Sse::new(stream).keep_alive(KeepAlive::new().interval(Duration::from_secs(15))))
}
