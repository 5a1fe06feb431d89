use async_trait::async_trait;
use serde_json::json;

use crate::config::GenerationConfig;
use crate::error::{KonspektError, Result};

const SYSTEM_PROMPT: &str = "You are a helpful assistant.";

/// Seam over the text-generation endpoint so the pipeline can be exercised
/// without network calls.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Issue a single prompt and return the trimmed completion text.
    ///
    /// One outbound call per invocation, no caching, no retries; any
    /// non-success response or transport error aborts the calling stage.
    async fn generate(&self, prompt: &str, max_tokens: u32, temperature: f32) -> Result<String>;
}

/// Chat-completions client for an Azure OpenAI deployment.
pub struct AzureOpenAiClient {
    http: reqwest::Client,
    config: GenerationConfig,
}

impl AzureOpenAiClient {
    pub fn new(config: GenerationConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;
        Ok(Self { http, config })
    }
}

#[async_trait]
impl TextGenerator for AzureOpenAiClient {
    async fn generate(&self, prompt: &str, max_tokens: u32, temperature: f32) -> Result<String> {
        let response = self
            .http
            .post(self.config.completions_url())
            .header("Content-Type", "application/json")
            .header("api-key", self.config.api_key.as_str())
            .json(&json!({
                "messages": [
                    {
                        "role": "system",
                        "content": SYSTEM_PROMPT,
                    },
                    {
                        "role": "user",
                        "content": prompt,
                    },
                ],
                "max_tokens": max_tokens,
                "temperature": temperature,
            }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(KonspektError::GenerationFailed {
                stage: "completion request",
                reason: format!("endpoint returned {status}: {}", snippet(&body)),
            });
        }

        let body = response.json::<serde_json::Value>().await?;
        let content = body["choices"][0]["message"]["content"]
            .as_str()
            .ok_or_else(|| KonspektError::GenerationFailed {
                stage: "completion response",
                reason: format!("no completion text in response: {body}"),
            })?;

        Ok(content.trim().to_string())
    }
}

fn snippet(body: &str) -> &str {
    let end = body
        .char_indices()
        .nth(200)
        .map(|(i, _)| i)
        .unwrap_or(body.len());
    &body[..end]
}
