//! Knowledge collection endpoints.
//!
//! Producers (task CRUD, briefing sync, file uploads) push documents here;
//! the embedding is always computed server-side.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};

use crate::AppState;
use crate::domain::{Document, DocumentDraft, DocumentKind, DocumentMeta};
use crate::store::{CategoryFilter, StoreError, StoreStats};

/// A document as presented to callers; the embedding stays server-side.
#[derive(Debug, Clone, Serialize)]
pub struct DocumentView {
    pub id: String,
    pub kind: DocumentKind,
    pub content: String,
    pub metadata: DocumentMeta,
    /// Whether similarity search can see this document.
    pub embedded: bool,
}

impl From<Document> for DocumentView {
    fn from(doc: Document) -> Self {
        Self {
            id: doc.id,
            kind: doc.kind,
            content: doc.content,
            metadata: doc.metadata,
            embedded: !doc.embedding.is_empty(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ListParams {
    /// Category label or `ALL` (default).
    #[serde(default)]
    pub category: Option<String>,
}

fn store_error(e: StoreError) -> (StatusCode, String) {
    tracing::error!(name: "knowledge.persist.failed", error = %e, "Store mutation failed");
    (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
}

pub async fn api_list_documents(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Json<Vec<DocumentView>> {
    let filter = params
        .category
        .as_deref()
        .map_or(CategoryFilter::All, CategoryFilter::parse);

    let docs = state.store.list_by_category(&filter).await;
    Json(docs.into_iter().map(DocumentView::from).collect())
}

pub async fn api_upsert_document(
    State(state): State<AppState>,
    Json(draft): Json<DocumentDraft>,
) -> Result<(StatusCode, Json<DocumentView>), (StatusCode, String)> {
    if draft.id.trim().is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            "Document id cannot be empty".to_string(),
        ));
    }

    let doc = state.store.upsert(draft).await.map_err(store_error)?;
    Ok((StatusCode::CREATED, Json(DocumentView::from(doc))))
}

pub async fn api_delete_document(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, (StatusCode, String)> {
    state.store.remove(&id).await.map_err(store_error)?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn api_knowledge_stats(State(state): State<AppState>) -> Json<StoreStats> {
    Json(state.store.stats().await)
}
