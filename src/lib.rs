//! PoolPays Intelligence Hub
//!
//! A retrieval-augmented multi-agent assistant for a marketing-operations
//! workspace: an embedded, file-persisted vector store of knowledge
//! documents, cosine-similarity search scoped by permission categories
//! ("neural folders"), a supervisor that routes queries to specialist
//! personas, and an orchestrator that assembles persona + history + retrieved
//! context into one generation call with a full audit trail.
//!
//! # Modules
//!
//! - [`domain`]: documents, categories, roles, audit logs, chat messages
//! - [`store`]: durable document collection with core-memory bootstrap
//! - [`search`]: scoped cosine-similarity retrieval
//! - [`agents`]: supervisor router and orchestration pipeline
//! - [`llm`]: embedding/generation provider traits and the Gemini client
//! - [`session`]: conversation thread storage
//! - [`api`] / [`server`]: REST surface

// Allow pedantic clippy warnings that don't add value for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::missing_fields_in_debug)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::default_trait_access)]
#![allow(clippy::unused_async)]

pub mod agents;
pub mod api;
pub mod config;
pub mod defaults;
pub mod domain;
pub mod llm;
pub mod search;
pub mod server;
pub mod session;
pub mod store;

use std::sync::Arc;

use crate::agents::Orchestrator;
use crate::config::AppConfig;
use crate::session::ThreadStore;
use crate::store::VectorStore;

/// Application state shared across all handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Document collection (explicitly owned, injected everywhere).
    pub store: Arc<VectorStore>,
    /// Multi-agent pipeline for chat interactions.
    pub orchestrator: Arc<Orchestrator>,
    /// Conversation thread store.
    pub threads: ThreadStore,
    /// Global configuration.
    pub config: Arc<AppConfig>,
}
