use std::time::Duration;

use crate::error::{KonspektError, Result};

/// Connection settings for the Azure OpenAI generation endpoint.
///
/// Built once at startup so a missing variable fails the process before any
/// pipeline work starts, instead of surfacing mid-request.
#[derive(Clone, Debug)]
pub struct GenerationConfig {
    pub endpoint: String,
    pub deployment: String,
    pub api_version: String,
    pub api_key: String,
    pub timeout: Duration,
}

impl GenerationConfig {
    pub const DEFAULT_DEPLOYMENT: &'static str = "gpt-4o";
    pub const DEFAULT_API_VERSION: &'static str = "2024-09-01-preview";

    pub fn from_env() -> Result<Self> {
        let endpoint = require_env("ENDPOINT_USEAST")?;
        let api_key = require_env("AZURE_OPENAI_KEY_USEAST")?;

        Ok(Self {
            endpoint,
            deployment: Self::DEFAULT_DEPLOYMENT.to_string(),
            api_version: Self::DEFAULT_API_VERSION.to_string(),
            api_key,
            timeout: Duration::from_secs(120),
        })
    }

    pub fn completions_url(&self) -> String {
        format!(
            "{}/openai/deployments/{}/chat/completions?api-version={}",
            self.endpoint.trim_end_matches('/'),
            self.deployment,
            self.api_version
        )
    }
}

/// YouTube Data API settings for the metadata provider.
#[derive(Clone, Debug)]
pub struct YoutubeConfig {
    pub api_key: String,
}

impl YoutubeConfig {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            api_key: require_env("YOUTUBE_API_KEY")?,
        })
    }
}

fn require_env(env_var: &str) -> Result<String> {
    match std::env::var(env_var) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(KonspektError::MissingConfig {
            env_var: env_var.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn completions_url_handles_trailing_slash() {
        let config = GenerationConfig {
            endpoint: "https://example.openai.azure.com/".to_string(),
            deployment: "gpt-4o".to_string(),
            api_version: "2024-09-01-preview".to_string(),
            api_key: "key".to_string(),
            timeout: Duration::from_secs(120),
        };

        assert_eq!(
            config.completions_url(),
            "https://example.openai.azure.com/openai/deployments/gpt-4o/chat/completions?api-version=2024-09-01-preview"
        );
    }
}
