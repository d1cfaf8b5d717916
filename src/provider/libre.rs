// LibreTranslate adapter
//
// Works against any LibreTranslate deployment; the endpoint is configurable
// so self-hosted instances can be used instead of the hosted service.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use crate::config::ProvidersConfig;
use crate::error::{AnuvadError, Result};
use super::{build_http_client, Translator};

const API_KEY_ENV: &str = "LIBRETRANSLATE_API_KEY";

#[derive(Debug, Deserialize)]
struct LibreResponse {
    #[serde(rename = "translatedText")]
    translated_text: String,
}

pub struct LibreTranslator {
    client: Client,
    endpoint: String,
    api_key: Option<String>,
}

impl LibreTranslator {
    pub fn new(config: &ProvidersConfig) -> Self {
        Self {
            client: build_http_client(config),
            endpoint: config.libretranslate_endpoint.trim_end_matches('/').to_string(),
            api_key: std::env::var(API_KEY_ENV).ok(),
        }
    }
}

#[async_trait]
impl Translator for LibreTranslator {
    fn name(&self) -> &'static str {
        "libretranslate"
    }

    fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    async fn translate(&self, text: &str, from: &str, to: &str) -> Result<String> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| AnuvadError::ProviderNotConfigured(self.name().to_string()))?;

        let body = json!({
            "q": text,
            "source": from,
            "target": to,
            "format": "text",
            "api_key": api_key,
        });

        let url = format!("{}/translate", self.endpoint);

        debug!("Sending translation request to {} ({} -> {})", url, from, to);

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| AnuvadError::provider(self.name(), format!("HTTP request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(AnuvadError::provider(
                self.name(),
                format!("API error {}: {}", status, error_text),
            ));
        }

        let parsed: LibreResponse = response
            .json()
            .await
            .map_err(|e| AnuvadError::provider(self.name(), format!("Failed to parse response: {}", e)))?;

        if parsed.translated_text.is_empty() {
            return Err(AnuvadError::provider(self.name(), "Empty translation received"));
        }

        Ok(parsed.translated_text)
    }
}
