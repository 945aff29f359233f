//! Durable, queryable document collection.
//!
//! [`VectorStore`] is explicitly constructed and dependency-injected (no
//! module-level singleton): [`VectorStore::open`] loads the persisted
//! snapshot or bootstraps the core-memory seed set, and [`VectorStore::close`]
//! flushes. The whole collection lives in memory and is persisted as a single
//! JSON file after every mutation.
//!
//! Concurrency discipline: one async mutex serializes every
//! read-modify-persist sequence, giving last-writer-wins on the snapshot.

use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::info;

use crate::defaults;
use crate::domain::{Document, DocumentDraft, KnowledgeCategory};
use crate::llm::Embedder;

/// Errors surfaced by mutating store operations.
///
/// Persistence failure is a hard error: silently losing a knowledge-base
/// write would be worse than a visible failure. The in-memory state stays
/// updated, so the caller may retry the persist by re-issuing the mutation.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("failed to persist document collection: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to encode document collection: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Filter for enumeration views.
///
/// `Category` matches `metadata.category` only. Kind (TASK/BRIEFING/...) is a
/// separate provenance axis and is deliberately not matched here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryFilter {
    All,
    Category(KnowledgeCategory),
}

impl CategoryFilter {
    /// Parse a filter label; `"ALL"` selects everything.
    #[must_use]
    pub fn parse(label: &str) -> Self {
        if label.eq_ignore_ascii_case("ALL") {
            Self::All
        } else {
            Self::Category(KnowledgeCategory::parse(label))
        }
    }
}

/// Operator-facing collection counts. Not used by search logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct StoreStats {
    pub total_docs: usize,
    pub core_identity: usize,
    pub tech_docs: usize,
    pub marketing_ops: usize,
}

/// In-memory document collection persisted to a single JSON snapshot.
pub struct VectorStore {
    documents: Mutex<Vec<Document>>,
    path: PathBuf,
    embedder: Arc<dyn Embedder>,
}

impl std::fmt::Debug for VectorStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VectorStore")
            .field("path", &self.path)
            .finish()
    }
}

impl VectorStore {
    /// Open the store at `path`.
    ///
    /// Reads the persisted collection in full if present; otherwise ingests
    /// the core-memory seed set through the normal upsert path (so the seeds
    /// get embedded and persisted like any other document).
    pub async fn open(
        path: impl Into<PathBuf>,
        embedder: Arc<dyn Embedder>,
    ) -> Result<Self, StoreError> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let store = Self {
            documents: Mutex::new(Vec::new()),
            path,
            embedder,
        };

        match tokio::fs::read(&store.path).await {
            Ok(bytes) => {
                let docs: Vec<Document> = serde_json::from_slice(&bytes)?;
                info!(
                    name: "store.loaded",
                    path = %store.path.display(),
                    documents = docs.len(),
                    "Vector store loaded"
                );
                *store.documents.lock().await = docs;
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!(name: "store.bootstrap", path = %store.path.display(), "Initializing core memory");
                for draft in defaults::core_memory() {
                    store.upsert(draft).await?;
                }
            }
            Err(e) => return Err(e.into()),
        }

        Ok(store)
    }

    /// Flush the current collection to disk.
    pub async fn close(&self) -> Result<(), StoreError> {
        let docs = self.documents.lock().await;
        self.persist(&docs).await
    }

    /// Insert or replace a document by id.
    ///
    /// The content is embedded via the injected [`Embedder`]; an embedding
    /// failure stores the document with an empty embedding (invisible to
    /// search, still enumerable) rather than failing the upsert.
    pub async fn upsert(&self, draft: DocumentDraft) -> Result<Document, StoreError> {
        // Embed outside the collection lock; provider calls can be slow.
        let embedding = self.embedder.embed(&draft.content).await;

        let doc = Document {
            id: draft.id,
            kind: draft.kind,
            content: draft.content,
            metadata: draft.metadata,
            embedding,
        };

        let mut docs = self.documents.lock().await;
        docs.retain(|d| d.id != doc.id);
        docs.push(doc.clone());
        self.persist(&docs).await?;
        Ok(doc)
    }

    /// Remove a document by id. Absent ids are a no-op, not an error.
    pub async fn remove(&self, id: &str) -> Result<(), StoreError> {
        let mut docs = self.documents.lock().await;
        docs.retain(|d| d.id != id);
        self.persist(&docs).await
    }

    /// All documents, in insertion order.
    pub async fn list_all(&self) -> Vec<Document> {
        self.documents.lock().await.clone()
    }

    /// Documents matching an enumeration filter.
    pub async fn list_by_category(&self, filter: &CategoryFilter) -> Vec<Document> {
        let docs = self.documents.lock().await;
        match filter {
            CategoryFilter::All => docs.clone(),
            CategoryFilter::Category(cat) => docs
                .iter()
                .filter(|d| d.metadata.category.as_ref() == Some(cat))
                .cloned()
                .collect(),
        }
    }

    /// Collection counts for operator dashboards.
    pub async fn stats(&self) -> StoreStats {
        let docs = self.documents.lock().await;
        let count = |cat: &KnowledgeCategory| {
            docs.iter()
                .filter(|d| d.metadata.category.as_ref() == Some(cat))
                .count()
        };
        StoreStats {
            total_docs: docs.len(),
            core_identity: count(&KnowledgeCategory::CoreIdentity),
            tech_docs: count(&KnowledgeCategory::TechDocs),
            marketing_ops: count(&KnowledgeCategory::MarketingOps),
        }
    }

    /// Write the full collection snapshot, replacing the previous file
    /// atomically via a sibling temp file.
    async fn persist(&self, docs: &[Document]) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec_pretty(docs)?;
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, &bytes).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}
