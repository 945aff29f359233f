//! Embedding and generation provider abstractions.
//!
//! The hub treats both capabilities as opaque external services with
//! deliberately soft failure contracts:
//!
//! - [`Embedder::embed`] never fails: empty or whitespace input, provider
//!   errors, and timeouts all degrade to an empty vector, which callers must
//!   treat as "no embedding available".
//! - [`Generator::generate`] never fails: provider errors degrade to a
//!   literal `[SYSTEM ERROR]` diagnostic string returned as if it were an
//!   answer.
//!
//! [`GeminiClient`] implements both traits against the Gemini REST API.

pub mod gemini;

pub use gemini::GeminiClient;

use std::time::Duration;

/// Model tier to use for a generation call.
///
/// Fast is used for cheap intent classification, Smart for final answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelTier {
    Fast,
    Smart,
}

/// Text embedding provider.
#[async_trait::async_trait]
pub trait Embedder: Send + Sync {
    /// Embed `text` into a fixed-length vector.
    ///
    /// Returns an empty vector for empty/whitespace input or on any provider
    /// failure. Never errors.
    async fn embed(&self, text: &str) -> Vec<f32>;
}

/// Text generation provider.
#[async_trait::async_trait]
pub trait Generator: Send + Sync {
    /// Generate text for `prompt` using the given model tier.
    ///
    /// On provider failure returns a diagnostic string starting with
    /// [`SYSTEM_ERROR_PREFIX`] instead of erroring.
    async fn generate(&self, tier: ModelTier, prompt: &str) -> String;
}

/// Prefix of the degraded-answer sentinel emitted on generation failure.
pub const SYSTEM_ERROR_PREFIX: &str = "[SYSTEM ERROR]";

/// Gemini connection and model settings.
#[derive(Clone)]
pub struct GeminiSettings {
    /// Base URL for the Gemini API.
    pub base_url: String,
    /// API key, sent as the `x-goog-api-key` header.
    pub api_key: String,
    /// Model used for intent classification ([`ModelTier::Fast`]).
    pub fast_model: String,
    /// Model used for final answers ([`ModelTier::Smart`]).
    pub smart_model: String,
    /// Dedicated embedding model.
    pub embedding_model: String,
    /// Upper bound on any single provider call.
    pub request_timeout: Duration,
}

impl std::fmt::Debug for GeminiSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiSettings")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .field("fast_model", &self.fast_model)
            .field("smart_model", &self.smart_model)
            .field("embedding_model", &self.embedding_model)
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

impl GeminiSettings {
    /// The model id backing a [`ModelTier`].
    #[must_use]
    pub fn model_for(&self, tier: ModelTier) -> &str {
        match tier {
            ModelTier::Fast => &self.fast_model,
            ModelTier::Smart => &self.smart_model,
        }
    }
}

/// Load Gemini settings from the environment.
///
/// `GEMINI_API_KEY` is required; everything else has a default.
pub fn load_gemini_settings() -> Result<GeminiSettings, String> {
    let api_key = std::env::var("GEMINI_API_KEY")
        .map_err(|_| "Missing required env var: GEMINI_API_KEY".to_string())?;
    if api_key.trim().is_empty() {
        return Err("GEMINI_API_KEY cannot be empty".to_string());
    }

    let base_url = std::env::var("GEMINI_BASE_URL")
        .unwrap_or_else(|_| "https://generativelanguage.googleapis.com".to_string());

    let fast_model =
        std::env::var("GEMINI_FAST_MODEL").unwrap_or_else(|_| "gemini-2.5-flash".to_string());
    let smart_model =
        std::env::var("GEMINI_SMART_MODEL").unwrap_or_else(|_| "gemini-3-pro-preview".to_string());
    let embedding_model = std::env::var("GEMINI_EMBEDDING_MODEL")
        .unwrap_or_else(|_| "text-embedding-004".to_string());

    let request_timeout = std::env::var("GEMINI_TIMEOUT_SECS")
        .ok()
        .and_then(|s| s.parse().ok())
        .map_or(Duration::from_secs(30), Duration::from_secs);

    Ok(GeminiSettings {
        base_url,
        api_key,
        fast_model,
        smart_model,
        embedding_model,
        request_timeout,
    })
}
