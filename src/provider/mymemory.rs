// MyMemory adapter
//
// Free-tier API; a contact email in the `de` parameter raises the daily
// quota, so it is treated as the provider credential. MyMemory throttles
// aggressively: on HTTP 429 the adapter sleeps a long fixed backoff before
// surfacing the failure, so the chain does not hammer it while it is
// cooling down. Single attempt per invocation, no internal retry.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::config::ProvidersConfig;
use crate::error::{AnuvadError, Result};
use super::{build_http_client, Translator};

const CONTACT_EMAIL_ENV: &str = "MYMEMORY_EMAIL";
const ENDPOINT: &str = "https://api.mymemory.translated.net/get";

#[derive(Debug, Deserialize)]
struct MyMemoryResponse {
    #[serde(rename = "responseData")]
    response_data: MyMemoryData,
    #[serde(rename = "responseStatus")]
    response_status: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct MyMemoryData {
    #[serde(rename = "translatedText")]
    translated_text: Option<String>,
}

pub struct MyMemoryTranslator {
    client: Client,
    contact_email: Option<String>,
    rate_limited_backoff: Duration,
}

impl MyMemoryTranslator {
    pub fn new(config: &ProvidersConfig) -> Self {
        Self {
            client: build_http_client(config),
            contact_email: std::env::var(CONTACT_EMAIL_ENV).ok(),
            rate_limited_backoff: Duration::from_secs(config.rate_limited_backoff_secs),
        }
    }

    /// MyMemory reports its status both as the HTTP code and inside the
    /// body; the body value is a string on some error paths.
    fn body_status_ok(status: &serde_json::Value) -> bool {
        match status {
            serde_json::Value::Number(n) => n.as_i64() == Some(200),
            serde_json::Value::String(s) => s == "200",
            _ => false,
        }
    }
}

#[async_trait]
impl Translator for MyMemoryTranslator {
    fn name(&self) -> &'static str {
        "mymemory"
    }

    fn is_configured(&self) -> bool {
        self.contact_email.is_some()
    }

    async fn translate(&self, text: &str, from: &str, to: &str) -> Result<String> {
        let contact_email = self
            .contact_email
            .as_deref()
            .ok_or_else(|| AnuvadError::ProviderNotConfigured(self.name().to_string()))?;

        let langpair = format!("{}|{}", from, to);

        debug!("Sending translation request to MyMemory ({})", langpair);

        let response = self
            .client
            .get(ENDPOINT)
            .query(&[("q", text), ("langpair", &langpair), ("de", contact_email)])
            .send()
            .await
            .map_err(|e| AnuvadError::provider(self.name(), format!("HTTP request failed: {}", e)))?;

        if response.status() == StatusCode::TOO_MANY_REQUESTS {
            warn!(
                "MyMemory rate limited the request, backing off for {:?}",
                self.rate_limited_backoff
            );
            tokio::time::sleep(self.rate_limited_backoff).await;
            return Err(AnuvadError::provider(self.name(), "Rate limited (HTTP 429)"));
        }

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(AnuvadError::provider(
                self.name(),
                format!("API error {}: {}", status, error_text),
            ));
        }

        let parsed: MyMemoryResponse = response
            .json()
            .await
            .map_err(|e| AnuvadError::provider(self.name(), format!("Failed to parse response: {}", e)))?;

        if !Self::body_status_ok(&parsed.response_status) {
            return Err(AnuvadError::provider(
                self.name(),
                format!("API reported status {}", parsed.response_status),
            ));
        }

        let translated = parsed
            .response_data
            .translated_text
            .unwrap_or_default();

        if translated.is_empty() {
            return Err(AnuvadError::provider(self.name(), "Empty translation received"));
        }

        Ok(translated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_body_status_accepts_number_and_string() {
        assert!(MyMemoryTranslator::body_status_ok(&serde_json::json!(200)));
        assert!(MyMemoryTranslator::body_status_ok(&serde_json::json!("200")));
        assert!(!MyMemoryTranslator::body_status_ok(&serde_json::json!(403)));
        assert!(!MyMemoryTranslator::body_status_ok(&serde_json::json!("QUOTA")));
    }
}
