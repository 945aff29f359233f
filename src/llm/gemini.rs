//! Gemini REST API client.
//!
//! Implements both [`Embedder`] and [`Generator`] against the
//! `generativelanguage` endpoints (`:embedContent` / `:generateContent`).
//! Every call carries the configured request timeout so a silent provider
//! surfaces as a degraded result instead of a hang.

use super::{Embedder, Generator, GeminiSettings, ModelTier, SYSTEM_ERROR_PREFIX};

/// HTTP client for the Gemini API.
#[derive(Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
    settings: GeminiSettings,
}

impl std::fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiClient")
            .field("settings", &self.settings)
            .finish()
    }
}

impl GeminiClient {
    /// Create a new client with the given settings.
    #[must_use]
    pub fn new(settings: GeminiSettings) -> Self {
        let http = reqwest::Client::builder()
            .timeout(settings.request_timeout)
            .build()
            .unwrap_or_default();
        Self { http, settings }
    }

    fn endpoint(&self, model: &str, action: &str) -> String {
        format!(
            "{}/v1beta/models/{model}:{action}",
            self.settings.base_url.trim_end_matches('/')
        )
    }

    async fn post(
        &self,
        url: &str,
        body: &serde_json::Value,
    ) -> anyhow::Result<serde_json::Value> {
        let resp = self
            .http
            .post(url)
            .header("x-goog-api-key", &self.settings.api_key)
            .json(body)
            .send()
            .await?
            .error_for_status()?;
        Ok(resp.json().await?)
    }
}

#[async_trait::async_trait]
impl Embedder for GeminiClient {
    async fn embed(&self, text: &str) -> Vec<f32> {
        // Empty input would be rejected by the API; skip the round trip.
        if text.trim().is_empty() {
            return Vec::new();
        }

        let url = self.endpoint(&self.settings.embedding_model, "embedContent");
        let body = serde_json::json!({
            "content": { "parts": [{ "text": text }] }
        });

        match self.post(&url, &body).await {
            Ok(v) => v["embedding"]["values"]
                .as_array()
                .map(|arr| {
                    arr.iter()
                        .filter_map(|x| x.as_f64())
                        .map(|x| x as f32)
                        .collect()
                })
                .unwrap_or_default(),
            Err(e) => {
                tracing::warn!(
                    name: "gemini.embed.failed",
                    model = %self.settings.embedding_model,
                    error = %e,
                    "Embedding call failed, returning empty vector"
                );
                Vec::new()
            }
        }
    }
}

#[async_trait::async_trait]
impl Generator for GeminiClient {
    async fn generate(&self, tier: ModelTier, prompt: &str) -> String {
        let model = self.settings.model_for(tier).to_string();
        let url = self.endpoint(&model, "generateContent");
        let body = serde_json::json!({
            "contents": [{ "parts": [{ "text": prompt }] }]
        });

        match self.post(&url, &body).await {
            Ok(v) => v["candidates"][0]["content"]["parts"][0]["text"]
                .as_str()
                .unwrap_or_default()
                .to_string(),
            Err(e) => {
                tracing::error!(
                    name: "gemini.generate.failed",
                    model = %model,
                    error = %e,
                    "Generation call failed"
                );
                format!(
                    "{SYSTEM_ERROR_PREFIX}: Could not generate response using model {model}. \
                     Please check API key or quota."
                )
            }
        }
    }
}
