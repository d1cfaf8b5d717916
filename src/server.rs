//! HTTP surface of the gateway.
//!
//! One POST endpoint accepting both the single-text and batch request shapes,
//! plus a health endpoint reporting provider state. The wire format carries
//! several historical spellings for the language fields; those are collapsed
//! into one canonical request struct right after parsing so nothing past the
//! boundary sees the aliases.

use std::collections::HashMap;
use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Json;
use axum::routing::{get, post};
use axum::Router;
use serde::Deserialize;
use serde_json::{json, Value};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::error::{AnuvadError, Result};
use crate::service::TranslationService;

const DEFAULT_LANGUAGE: &str = "en";

/// Request body as it arrives on the wire, aliases and all
#[derive(Debug, Deserialize)]
pub struct RawTranslateRequest {
    text: Option<String>,
    texts: Option<Vec<String>>,
    #[serde(rename = "sourceLanguage")]
    source_language: Option<String>,
    #[serde(rename = "targetLanguage")]
    target_language: Option<String>,
    #[serde(rename = "source_language")]
    source_language_snake: Option<String>,
    #[serde(rename = "target_language")]
    target_language_snake: Option<String>,
    from: Option<String>,
    to: Option<String>,
}

#[derive(Debug)]
enum Payload {
    Single(String),
    Batch(Vec<String>),
}

/// Canonical request after alias resolution
#[derive(Debug)]
struct TranslateRequest {
    payload: Payload,
    from: String,
    to: String,
}

impl RawTranslateRequest {
    /// Collapse the wire shape into the canonical request. Language aliases
    /// resolve first-present-wins: camelCase, then snake_case, then the
    /// short form; both languages default to "en".
    fn normalize(self) -> std::result::Result<TranslateRequest, String> {
        let payload = match (self.texts, self.text) {
            (Some(texts), _) => Payload::Batch(texts),
            (None, Some(text)) => Payload::Single(text),
            (None, None) => return Err("Missing 'text' or 'texts' field".to_string()),
        };

        let from = self
            .source_language
            .or(self.source_language_snake)
            .or(self.from)
            .unwrap_or_else(|| DEFAULT_LANGUAGE.to_string());
        let to = self
            .target_language
            .or(self.target_language_snake)
            .or(self.to)
            .unwrap_or_else(|| DEFAULT_LANGUAGE.to_string());

        Ok(TranslateRequest { payload, from, to })
    }
}

pub fn router(service: Arc<TranslationService>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/translate", post(translate_handler).options(preflight_handler))
        .route("/health", get(health_handler))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(service)
}

/// Bind and serve until the process is stopped
pub async fn serve(service: Arc<TranslationService>, host: &str, port: u16) -> Result<()> {
    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AnuvadError::Server(format!("Failed to bind {}: {}", addr, e)))?;

    info!("Translation gateway listening on {}", addr);

    axum::serve(listener, router(service))
        .await
        .map_err(|e| AnuvadError::Server(format!("Server error: {}", e)))?;

    Ok(())
}

async fn translate_handler(
    State(service): State<Arc<TranslationService>>,
    Json(raw): Json<RawTranslateRequest>,
) -> std::result::Result<Json<Value>, (StatusCode, Json<Value>)> {
    let request = raw.normalize().map_err(|message| {
        (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": message })),
        )
    })?;

    match process(&service, request).await {
        Ok(body) => Ok(Json(body)),
        Err(e) => Err(internal_error(e)),
    }
}

async fn process(service: &TranslationService, request: TranslateRequest) -> Result<Value> {
    match request.payload {
        Payload::Single(text) => {
            let translation = service.translate(&text, &request.from, &request.to).await;
            Ok(json!({
                "translatedText": translation.text,
                "provider": translation.provider,
                "cached": translation.cached,
            }))
        }
        Payload::Batch(texts) => {
            let translations: HashMap<String, String> =
                service.batch_translate(&texts, &request.from, &request.to).await;
            Ok(json!({
                "translations": translations,
                "provider": "batch",
                "cached": false,
            }))
        }
    }
}

/// 500 body still carries an empty translatedText so callers that read the
/// field unconditionally do not break
fn internal_error(error: AnuvadError) -> (StatusCode, Json<Value>) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({
            "error": "Translation request failed",
            "details": error.to_string(),
            "translatedText": "",
            "provider": "error",
            "cached": false,
        })),
    )
}

async fn preflight_handler() -> StatusCode {
    StatusCode::OK
}

async fn health_handler(State(service): State<Arc<TranslationService>>) -> Json<Value> {
    let providers: Vec<Value> = service
        .provider_status()
        .into_iter()
        .map(|p| {
            json!({
                "name": p.name,
                "configured": p.configured,
                "circuitOpen": p.circuit_open,
                "failures": p.failures,
            })
        })
        .collect();

    let cache = service.cache_stats().await;

    Json(json!({
        "status": "ok",
        "providers": providers,
        "cache": {
            "entries": cache.entries,
            "hits": cache.hits,
            "misses": cache.misses,
        },
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, Method, Request};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    use crate::config::LimitsConfig;
    use crate::provider::{MockTranslator, Translator};

    fn test_limits() -> LimitsConfig {
        LimitsConfig {
            breaker_failure_threshold: 5,
            breaker_open_secs: 300,
            min_call_interval_ms: 0,
            max_text_chars: 5000,
            max_batch_items: 10,
            batch_item_delay_ms: 0,
        }
    }

    fn test_router(providers: Vec<Arc<dyn Translator>>) -> Router {
        let service = Arc::new(TranslationService::with_providers(
            providers,
            test_limits(),
            64,
        ));
        router(service)
    }

    fn healthy_provider() -> Arc<dyn Translator> {
        let mut mock = MockTranslator::new();
        mock.expect_name().return_const("google");
        mock.expect_is_configured().return_const(true);
        mock.expect_translate()
            .returning(|_, _, _| Ok("जमा करें".to_string()));
        Arc::new(mock)
    }

    fn post_json(body: &str) -> Request<Body> {
        Request::builder()
            .method(Method::POST)
            .uri("/translate")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .expect("request")
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = response.into_body().collect().await.expect("body").to_bytes();
        serde_json::from_slice(&bytes).expect("json body")
    }

    #[tokio::test]
    async fn test_empty_body_is_bad_request() {
        let app = test_router(vec![healthy_provider()]);
        let response = app.oneshot(post_json("{}")).await.expect("response");

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert!(body["error"].as_str().expect("error field").contains("text"));
    }

    #[tokio::test]
    async fn test_get_is_method_not_allowed() {
        let app = test_router(vec![healthy_provider()]);
        let request = Request::builder()
            .method(Method::GET)
            .uri("/translate")
            .body(Body::empty())
            .expect("request");

        let response = app.oneshot(request).await.expect("response");
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn test_options_returns_ok_with_cors_headers() {
        let app = test_router(vec![healthy_provider()]);
        let request = Request::builder()
            .method(Method::OPTIONS)
            .uri("/translate")
            .header(header::ORIGIN, "https://example.com")
            .body(Body::empty())
            .expect("request");

        let response = app.oneshot(request).await.expect("response");
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response
            .headers()
            .contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN));
    }

    #[tokio::test]
    async fn test_single_translation_then_cached_repeat() {
        let app = test_router(vec![healthy_provider()]);

        let body = r#"{"text": "Submit", "from": "en", "to": "hi"}"#;
        let first = body_json(app.clone().oneshot(post_json(body)).await.expect("response")).await;
        assert_eq!(first["translatedText"], "जमा करें");
        assert_eq!(first["provider"], "google");
        assert_eq!(first["cached"], false);

        let second = body_json(app.oneshot(post_json(body)).await.expect("response")).await;
        assert_eq!(second["translatedText"], "जमा करें");
        assert_eq!(second["provider"], "cache");
        assert_eq!(second["cached"], true);
    }

    #[tokio::test]
    async fn test_snake_case_aliases_resolve_like_camel_case() {
        let mut mock = MockTranslator::new();
        mock.expect_name().return_const("google");
        mock.expect_translate()
            .withf(|_, from, to| from == "en" && to == "hi")
            .times(1)
            .returning(|_, _, _| Ok("जमा करें".to_string()));
        let app = test_router(vec![Arc::new(mock)]);

        let snake = r#"{"text": "Submit", "source_language": "en", "target_language": "hi"}"#;
        let first = body_json(app.clone().oneshot(post_json(snake)).await.expect("response")).await;
        assert_eq!(first["provider"], "google");

        // camelCase spelling of the same request resolves to the same
        // canonical key and is served from cache
        let camel = r#"{"text": "Submit", "sourceLanguage": "en", "targetLanguage": "hi"}"#;
        let second = body_json(app.oneshot(post_json(camel)).await.expect("response")).await;
        assert_eq!(second["provider"], "cache");
        assert_eq!(second["cached"], true);
    }

    #[tokio::test]
    async fn test_languages_default_to_english() {
        // from and to both default to "en", which short-circuits to identity
        let mut mock = MockTranslator::new();
        mock.expect_name().return_const("google");
        mock.expect_translate().times(0);
        let app = test_router(vec![Arc::new(mock)]);

        let body = body_json(
            app.oneshot(post_json(r#"{"text": "Submit"}"#))
                .await
                .expect("response"),
        )
        .await;
        assert_eq!(body["translatedText"], "Submit");
        assert_eq!(body["provider"], "none");
    }

    #[tokio::test]
    async fn test_batch_shape_returns_translation_map() {
        let app = test_router(vec![healthy_provider()]);

        let body = r#"{"texts": ["Submit", "Cancel"], "sourceLanguage": "en", "targetLanguage": "hi"}"#;
        let response = body_json(app.oneshot(post_json(body)).await.expect("response")).await;

        assert_eq!(response["provider"], "batch");
        assert_eq!(response["cached"], false);
        assert_eq!(response["translations"]["Submit"], "जमा करें");
        assert_eq!(response["translations"]["Cancel"], "जमा करें");
    }

    #[tokio::test]
    async fn test_health_reports_providers() {
        let app = test_router(vec![healthy_provider()]);
        let request = Request::builder()
            .method(Method::GET)
            .uri("/health")
            .body(Body::empty())
            .expect("request");

        let body = body_json(app.oneshot(request).await.expect("response")).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["providers"][0]["name"], "google");
        assert_eq!(body["providers"][0]["configured"], true);
        assert_eq!(body["providers"][0]["circuitOpen"], false);
    }
}
