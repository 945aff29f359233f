//! Scoped cosine-similarity search over the vector store.
//!
//! The category allow-list is the access-control boundary between agent roles
//! and knowledge: it is applied to the candidate set BEFORE scoring, so
//! out-of-scope documents never influence ranking or leak through ties.

use std::sync::Arc;

use crate::domain::{Document, KnowledgeCategory};
use crate::llm::Embedder;
use crate::store::VectorStore;

/// Tuned retrieval constants, kept as named overridable configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RetrievalPolicy {
    /// Fixed relevance floor; scores at or below it are not relevant.
    pub similarity_floor: f32,
    /// Result cap for orchestrated retrieval.
    pub max_results: usize,
    /// Trailing conversation messages included in the generation prompt.
    pub history_window: usize,
}

impl Default for RetrievalPolicy {
    fn default() -> Self {
        Self {
            similarity_floor: 0.35,
            max_results: 5,
            history_window: 6,
        }
    }
}

/// Nearest-neighbor retrieval with access scoping.
#[derive(Clone)]
pub struct SearchEngine {
    store: Arc<VectorStore>,
    embedder: Arc<dyn Embedder>,
    policy: RetrievalPolicy,
}

impl std::fmt::Debug for SearchEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchEngine")
            .field("store", &self.store)
            .field("policy", &self.policy)
            .finish()
    }
}

impl SearchEngine {
    #[must_use]
    pub fn new(store: Arc<VectorStore>, embedder: Arc<dyn Embedder>, policy: RetrievalPolicy) -> Self {
        Self {
            store,
            embedder,
            policy,
        }
    }

    #[must_use]
    pub fn policy(&self) -> &RetrievalPolicy {
        &self.policy
    }

    /// Top-`limit` documents for `query`, restricted to `allowed_categories`.
    ///
    /// An empty allow-list means no restriction. Fails soft: a query that
    /// cannot be embedded yields an empty result set, never an error.
    /// Deterministic for a fixed store: ties keep the store's enumeration
    /// order (stable sort).
    pub async fn search(
        &self,
        query: &str,
        limit: usize,
        allowed_categories: &[KnowledgeCategory],
    ) -> Vec<Document> {
        let query_embedding = self.embedder.embed(query).await;
        if query_embedding.is_empty() {
            return Vec::new();
        }

        // Scope filter first, scoring second.
        let candidates: Vec<Document> = self
            .store
            .list_all()
            .await
            .into_iter()
            .filter(|doc| {
                allowed_categories.is_empty() || allowed_categories.contains(&doc.scope())
            })
            .collect();

        let mut scored: Vec<(f32, Document)> = candidates
            .into_iter()
            .map(|doc| {
                // Documents without an embedding score -1 so any positive
                // floor excludes them.
                let score = if doc.embedding.is_empty() {
                    -1.0
                } else {
                    cosine_similarity(&query_embedding, &doc.embedding)
                };
                (score, doc)
            })
            .collect();

        scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));

        scored
            .into_iter()
            .filter(|(score, _)| *score > self.policy.similarity_floor)
            .take(limit)
            .map(|(_, doc)| doc)
            .collect()
    }
}

/// Cosine of the angle between two vectors; 0 when either norm is 0.
#[must_use]
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    dot / (norm_a * norm_b)
}
