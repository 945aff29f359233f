//! Conversation thread endpoints.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};

use crate::AppState;
use crate::domain::AgentRole;
use crate::session::ChatThread;

#[derive(Debug, Serialize)]
pub struct ThreadSummary {
    pub id: String,
    pub title: String,
    pub created_at: i64,
    pub updated_at: i64,
    pub agent_mode: AgentRole,
    pub message_count: usize,
}

impl From<&ChatThread> for ThreadSummary {
    fn from(t: &ChatThread) -> Self {
        Self {
            id: t.id.clone(),
            title: t.title.clone(),
            created_at: t.created_at,
            updated_at: t.updated_at,
            agent_mode: t.agent_mode,
            message_count: t.messages.len(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateThreadRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub agent_mode: Option<AgentRole>,
}

#[derive(Debug, Deserialize)]
pub struct SetAgentModeRequest {
    pub agent_mode: AgentRole,
}

pub async fn api_list_threads(State(state): State<AppState>) -> Json<Vec<ThreadSummary>> {
    Json(state.threads.list().iter().map(ThreadSummary::from).collect())
}

pub async fn api_create_thread(
    State(state): State<AppState>,
    Json(req): Json<CreateThreadRequest>,
) -> (StatusCode, Json<ChatThread>) {
    let thread = state.threads.create(
        req.title.unwrap_or_else(|| "New conversation".to_string()),
        req.agent_mode.unwrap_or(AgentRole::Supervisor),
    );
    (StatusCode::CREATED, Json(thread))
}

pub async fn api_get_thread(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ChatThread>, StatusCode> {
    state.threads.get(&id).map(Json).ok_or(StatusCode::NOT_FOUND)
}

pub async fn api_set_agent_mode(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<SetAgentModeRequest>,
) -> Result<StatusCode, StatusCode> {
    if state.threads.set_agent_mode(&id, req.agent_mode) {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(StatusCode::NOT_FOUND)
    }
}

pub async fn api_delete_thread(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> StatusCode {
    if state.threads.delete(&id) {
        StatusCode::NO_CONTENT
    } else {
        StatusCode::NOT_FOUND
    }
}
