// Google Cloud Translation v2 adapter
//
// Uses the REST endpoint with an API key. The v2 API accepts plain-text
// requests and returns translations under data.translations.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use crate::config::ProvidersConfig;
use crate::error::{AnuvadError, Result};
use super::{build_http_client, Translator};

const API_KEY_ENV: &str = "GOOGLE_TRANSLATE_API_KEY";
const ENDPOINT: &str = "https://translation.googleapis.com/language/translate/v2";

#[derive(Debug, Deserialize)]
struct GoogleResponse {
    data: GoogleData,
}

#[derive(Debug, Deserialize)]
struct GoogleData {
    translations: Vec<GoogleTranslation>,
}

#[derive(Debug, Deserialize)]
struct GoogleTranslation {
    #[serde(rename = "translatedText")]
    translated_text: String,
}

pub struct GoogleTranslator {
    client: Client,
    api_key: Option<String>,
}

impl GoogleTranslator {
    pub fn new(config: &ProvidersConfig) -> Self {
        Self {
            client: build_http_client(config),
            api_key: std::env::var(API_KEY_ENV).ok(),
        }
    }
}

#[async_trait]
impl Translator for GoogleTranslator {
    fn name(&self) -> &'static str {
        "google"
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
        });

        debug!("Sending translation request to Google ({} -> {})", from, to);

        let response = self
            .client
            .post(ENDPOINT)
            .query(&[("key", api_key)])
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

        let parsed: GoogleResponse = response
            .json()
            .await
            .map_err(|e| AnuvadError::provider(self.name(), format!("Failed to parse response: {}", e)))?;

        let translated = parsed
            .data
            .translations
            .into_iter()
            .next()
            .map(|t| t.translated_text)
            .ok_or_else(|| AnuvadError::provider(self.name(), "Empty translation list in response"))?;

        if translated.is_empty() {
            return Err(AnuvadError::provider(self.name(), "Empty translation received"));
        }

        Ok(translated)
    }
}
