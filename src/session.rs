//! Conversation thread storage.
//!
//! Threads are append-only message logs owned by the HTTP layer. The
//! orchestrator only ever receives a read-only trailing slice of a thread's
//! messages; it never mutates thread storage.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{AgentRole, ChatMessage};

/// An ordered, append-only conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatThread {
    pub id: String,
    pub title: String,
    pub messages: Vec<ChatMessage>,
    /// Unix epoch milliseconds.
    pub created_at: i64,
    /// Unix epoch milliseconds.
    pub updated_at: i64,
    /// Current agent mode; SUPERVISOR means auto-routing.
    pub agent_mode: AgentRole,
}

/// Thread-safe in-memory store for all conversation threads.
#[derive(Debug, Clone, Default)]
pub struct ThreadStore {
    inner: Arc<RwLock<HashMap<String, ChatThread>>>,
}

impl ThreadStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new thread and return it.
    pub fn create(&self, title: impl Into<String>, agent_mode: AgentRole) -> ChatThread {
        let now = chrono::Utc::now().timestamp_millis();
        let thread = ChatThread {
            id: Uuid::new_v4().to_string(),
            title: title.into(),
            messages: Vec::new(),
            created_at: now,
            updated_at: now,
            agent_mode,
        };
        self.inner
            .write()
            .unwrap()
            .insert(thread.id.clone(), thread.clone());
        thread
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<ChatThread> {
        self.inner.read().unwrap().get(id).cloned()
    }

    /// All threads, most recently updated first.
    #[must_use]
    pub fn list(&self) -> Vec<ChatThread> {
        let mut threads: Vec<ChatThread> = self.inner.read().unwrap().values().cloned().collect();
        threads.sort_by_key(|t| std::cmp::Reverse(t.updated_at));
        threads
    }

    /// Append a message to a thread. Returns false if the thread is unknown.
    pub fn append(&self, id: &str, message: ChatMessage) -> bool {
        let mut guard = self.inner.write().unwrap();
        match guard.get_mut(id) {
            Some(thread) => {
                thread.messages.push(message);
                thread.updated_at = chrono::Utc::now().timestamp_millis();
                true
            }
            None => false,
        }
    }

    /// Switch a thread's agent mode. Returns false if the thread is unknown.
    pub fn set_agent_mode(&self, id: &str, mode: AgentRole) -> bool {
        let mut guard = self.inner.write().unwrap();
        match guard.get_mut(id) {
            Some(thread) => {
                thread.agent_mode = mode;
                thread.updated_at = chrono::Utc::now().timestamp_millis();
                true
            }
            None => false,
        }
    }

    pub fn delete(&self, id: &str) -> bool {
        self.inner.write().unwrap().remove(id).is_some()
    }

    #[must_use]
    pub fn count(&self) -> usize {
        self.inner.read().unwrap().len()
    }
}
