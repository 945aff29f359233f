//! Shared test doubles for the provider traits.
//!
//! Each integration test binary pulls in the subset it needs.
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use poolpays_hub::llm::{Embedder, Generator, ModelTier};

/// Embedder keyed on a single keyword: texts containing it embed to `[1, 0]`,
/// everything else to `[0, 1]`. Blank input returns no embedding, matching
/// the provider contract.
pub struct KeywordEmbedder {
    pub keyword: String,
}

impl KeywordEmbedder {
    pub fn new(keyword: &str) -> Arc<Self> {
        Arc::new(Self {
            keyword: keyword.to_lowercase(),
        })
    }
}

#[async_trait::async_trait]
impl Embedder for KeywordEmbedder {
    async fn embed(&self, text: &str) -> Vec<f32> {
        if text.trim().is_empty() {
            Vec::new()
        } else if text.to_lowercase().contains(&self.keyword) {
            vec![1.0, 0.0]
        } else {
            vec![0.0, 1.0]
        }
    }
}

/// Embedder returning an exact vector per known text, and a default for the
/// rest. Lets tests pin similarity scores precisely.
#[derive(Default)]
pub struct MapEmbedder {
    pub map: HashMap<String, Vec<f32>>,
    pub default: Vec<f32>,
}

#[async_trait::async_trait]
impl Embedder for MapEmbedder {
    async fn embed(&self, text: &str) -> Vec<f32> {
        if text.trim().is_empty() {
            return Vec::new();
        }
        self.map.get(text).cloned().unwrap_or_else(|| self.default.clone())
    }
}

/// Generator with a canned reply that records every prompt and counts calls.
pub struct ScriptedGenerator {
    pub reply: String,
    pub prompts: Mutex<Vec<(ModelTier, String)>>,
    pub calls: AtomicUsize,
}

impl ScriptedGenerator {
    pub fn new(reply: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: reply.to_string(),
            prompts: Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_prompt(&self) -> String {
        self.prompts
            .lock()
            .unwrap()
            .last()
            .map(|(_, p)| p.clone())
            .unwrap_or_default()
    }
}

#[async_trait::async_trait]
impl Generator for ScriptedGenerator {
    async fn generate(&self, tier: ModelTier, prompt: &str) -> String {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts
            .lock()
            .unwrap()
            .push((tier, prompt.to_string()));
        self.reply.clone()
    }
}
