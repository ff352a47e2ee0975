pub mod countries;
pub mod extract;
pub mod filter;
pub mod instagram;
pub mod models;
pub mod serp;

use std::sync::Arc;

use anyhow::Context;
use async_trait::async_trait;
use axum::extract::State;
use axum::http::header::AUTHORIZATION;
use axum::http::HeaderMap;
use axum::routing::post;
use axum::{Json, Router};
use serde_json::json;

use lensgram_http::error::AppError;
use lensgram_kernel::settings::Settings;
use lensgram_kernel::{InitCtx, Module};

use instagram::{ImageResolver, InstagramClient};
use models::ProcessRequest;
use serp::{SerpApiClient, VisualSearch};

/// Dependencies shared by every request through the relay pipeline.
#[derive(Clone)]
pub struct LensState {
    resolver: Arc<dyn ImageResolver>,
    search: Arc<dyn VisualSearch>,
    bearer_secret: Option<String>,
}

/// Lens module: the Instagram-to-Google-Lens relay endpoint.
pub struct LensModule {
    state: LensState,
}

impl LensModule {
    pub fn from_settings(settings: &Settings) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .build()
            .context("failed to build outbound HTTP client")?;

        let state = LensState {
            resolver: Arc::new(InstagramClient::new(http.clone(), &settings.instagram)),
            search: Arc::new(SerpApiClient::new(http, &settings.serpapi)),
            bearer_secret: settings.auth.bearer_secret.clone(),
        };

        Ok(Self { state })
    }
}

#[async_trait]
impl Module for LensModule {
    fn name(&self) -> &'static str {
        "lens"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        if ctx.settings.serpapi.api_key.is_none() {
            tracing::warn!(
                module = self.name(),
                "SERP_API_KEY is not configured; visual search calls will fail upstream"
            );
        }

        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            protected = self.state.bearer_secret.is_some(),
            "lens module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        Router::new()
            .route("/process_instagram_url", post(process_instagram_url))
            .with_state(self.state.clone())
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        Some(json!({
            "paths": {
                "/process_instagram_url": {
                    "post": {
                        "summary": "Relay an Instagram post image through Google Lens",
                        "tags": ["Lens"],
                        "requestBody": {
                            "required": true,
                            "content": {
                                "application/json": {
                                    "schema": {
                                        "$ref": "#/components/schemas/ProcessRequest"
                                    }
                                }
                            }
                        },
                        "responses": {
                            "200": {
                                "description": "Filtered visual search payload",
                                "content": {
                                    "application/json": {
                                        "schema": {
                                            "$ref": "#/components/schemas/ProcessResponse"
                                        }
                                    }
                                }
                            },
                            "400": {
                                "description": "Malformed URL or unknown country",
                                "content": {
                                    "application/json": {
                                        "schema": {
                                            "$ref": "#/components/schemas/ErrorResponse"
                                        }
                                    }
                                }
                            },
                            "401": {
                                "description": "Missing or malformed bearer credential",
                                "content": {
                                    "application/json": {
                                        "schema": {
                                            "$ref": "#/components/schemas/ErrorResponse"
                                        }
                                    }
                                }
                            },
                            "403": {
                                "description": "Mismatched bearer credential",
                                "content": {
                                    "application/json": {
                                        "schema": {
                                            "$ref": "#/components/schemas/ErrorResponse"
                                        }
                                    }
                                }
                            },
                            "500": {
                                "description": "Upstream contract violation",
                                "content": {
                                    "application/json": {
                                        "schema": {
                                            "$ref": "#/components/schemas/ErrorResponse"
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            },
            "components": {
                "schemas": {
                    "ProcessRequest": {
                        "type": "object",
                        "properties": {
                            "url": {
                                "type": "string",
                                "description": "Instagram post URL containing /p/<shortcode>/"
                            },
                            "country": {
                                "type": "string",
                                "description": "Country name localizing the search",
                                "default": "India"
                            }
                        },
                        "required": ["url"]
                    },
                    "ProcessResponse": {
                        "type": "object",
                        "properties": {
                            "google_lens_result": {
                                "type": "object",
                                "description": "Raw search payload with non-purchasable matches removed"
                            }
                        },
                        "required": ["google_lens_result"]
                    }
                }
            }
        }))
    }
}

/// `POST /process_instagram_url` handler
async fn process_instagram_url(
    State(state): State<LensState>,
    headers: HeaderMap,
    Json(request): Json<ProcessRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    let auth_header = headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok());

    run_pipeline(&state, auth_header, &request).await.map(Json)
}

/// The sequential relay pipeline. The first failing stage aborts the request;
/// no partial results are ever returned.
async fn run_pipeline(
    state: &LensState,
    auth_header: Option<&str>,
    request: &ProcessRequest,
) -> Result<serde_json::Value, AppError> {
    // Auth gate runs before anything leaves the process.
    if let Some(secret) = state.bearer_secret.as_deref() {
        lensgram_authz::verify_bearer(auth_header, secret)?;
    }

    let shortcode = extract::shortcode(&request.url)?;

    let image_url = state.resolver.resolve_thumbnail(shortcode).await?;
    tracing::debug!(shortcode, %image_url, "resolved post thumbnail");

    let region = countries::region_code(&request.country).ok_or_else(|| {
        AppError::bad_request(format!("Unknown country: {}", request.country))
    })?;

    let mut result = state.search.search(&image_url, Some(region)).await?;
    filter::retain_purchasable(&mut result);

    Ok(json!({ "google_lens_result": result }))
}

/// Create a new instance of the lens module
pub fn create_module(settings: &Settings) -> anyhow::Result<Arc<dyn Module>> {
    Ok(Arc::new(LensModule::from_settings(settings)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;
    use std::sync::atomic::{AtomicBool, Ordering};

    struct StubResolver {
        image_url: Option<String>,
        called: Arc<AtomicBool>,
    }

    #[async_trait]
    impl ImageResolver for StubResolver {
        async fn resolve_thumbnail(&self, _shortcode: &str) -> Result<String, AppError> {
            self.called.store(true, Ordering::SeqCst);
            match &self.image_url {
                Some(url) => Ok(url.clone()),
                None => Err(AppError::upstream(
                    503,
                    "Error retrieving data from Instagram",
                )),
            }
        }
    }

    struct StubSearch {
        payload: Value,
        called: Arc<AtomicBool>,
    }

    #[async_trait]
    impl VisualSearch for StubSearch {
        async fn search(&self, _image_url: &str, _region: Option<&str>) -> Result<Value, AppError> {
            self.called.store(true, Ordering::SeqCst);
            Ok(self.payload.clone())
        }
    }

    struct Harness {
        state: LensState,
        resolver_called: Arc<AtomicBool>,
        search_called: Arc<AtomicBool>,
    }

    fn harness(
        image_url: Option<&str>,
        payload: Value,
        bearer_secret: Option<&str>,
    ) -> Harness {
        let resolver_called = Arc::new(AtomicBool::new(false));
        let search_called = Arc::new(AtomicBool::new(false));

        let state = LensState {
            resolver: Arc::new(StubResolver {
                image_url: image_url.map(str::to_owned),
                called: resolver_called.clone(),
            }),
            search: Arc::new(StubSearch {
                payload,
                called: search_called.clone(),
            }),
            bearer_secret: bearer_secret.map(str::to_owned),
        };

        Harness {
            state,
            resolver_called,
            search_called,
        }
    }

    fn request(url: &str, country: &str) -> ProcessRequest {
        ProcessRequest {
            url: url.to_string(),
            country: country.to_string(),
        }
    }

    #[tokio::test]
    async fn end_to_end_filters_matches_and_wraps_payload() {
        let h = harness(
            Some("https://img/x.jpg"),
            serde_json::json!({
                "visual_matches": [
                    {"price": {"value": 10}, "in_stock": true},
                    {"in_stock": false}
                ]
            }),
            None,
        );

        let response = run_pipeline(
            &h.state,
            None,
            &request("https://instagram.com/p/ABC123/", "India"),
        )
        .await
        .unwrap();

        assert_eq!(
            response,
            serde_json::json!({
                "google_lens_result": {
                    "visual_matches": [
                        {"price": {"value": 10}, "in_stock": true}
                    ]
                }
            })
        );
    }

    #[tokio::test]
    async fn resolver_failure_short_circuits_search() {
        let h = harness(None, serde_json::json!({}), None);

        let err = run_pipeline(
            &h.state,
            None,
            &request("https://instagram.com/p/ABC123/", "India"),
        )
        .await
        .unwrap_err();

        assert!(matches!(err, AppError::Upstream { status: 503, .. }));
        assert!(h.resolver_called.load(Ordering::SeqCst));
        assert!(!h.search_called.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn malformed_url_rejected_before_any_outbound_call() {
        let h = harness(Some("https://img/x.jpg"), serde_json::json!({}), None);

        let err = run_pipeline(
            &h.state,
            None,
            &request("https://instagram.com/stories/xyz/", "India"),
        )
        .await
        .unwrap_err();

        assert!(matches!(err, AppError::BadRequest { .. }));
        assert!(!h.resolver_called.load(Ordering::SeqCst));
        assert!(!h.search_called.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn unknown_country_rejected_before_search() {
        let h = harness(Some("https://img/x.jpg"), serde_json::json!({}), None);

        let err = run_pipeline(
            &h.state,
            None,
            &request("https://instagram.com/p/ABC123/", "Atlantis"),
        )
        .await
        .unwrap_err();

        assert!(matches!(err, AppError::BadRequest { .. }));
        assert!(!h.search_called.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn missing_bearer_rejected_before_any_outbound_call() {
        let h = harness(Some("https://img/x.jpg"), serde_json::json!({}), Some("s3cret"));

        let err = run_pipeline(
            &h.state,
            None,
            &request("https://instagram.com/p/ABC123/", "India"),
        )
        .await
        .unwrap_err();

        assert!(matches!(err, AppError::Unauthorized { .. }));
        assert!(!h.resolver_called.load(Ordering::SeqCst));
        assert!(!h.search_called.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn mismatched_bearer_is_forbidden() {
        let h = harness(Some("https://img/x.jpg"), serde_json::json!({}), Some("s3cret"));

        let err = run_pipeline(
            &h.state,
            Some("Bearer wrong"),
            &request("https://instagram.com/p/ABC123/", "India"),
        )
        .await
        .unwrap_err();

        assert!(matches!(err, AppError::Forbidden { .. }));
        assert!(!h.resolver_called.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn matching_bearer_is_accepted() {
        let h = harness(
            Some("https://img/x.jpg"),
            serde_json::json!({"visual_matches": []}),
            Some("s3cret"),
        );

        let response = run_pipeline(
            &h.state,
            Some("Bearer s3cret"),
            &request("https://instagram.com/p/ABC123/", "India"),
        )
        .await
        .unwrap();

        assert!(response.get("google_lens_result").is_some());
    }

    #[tokio::test]
    async fn route_answers_200_with_wrapped_payload() {
        use axum::body::Body;
        use axum::http::{Request, StatusCode};
        use tower::ServiceExt;

        let h = harness(
            Some("https://img/x.jpg"),
            serde_json::json!({"visual_matches": []}),
            None,
        );
        let router = Router::new()
            .route("/process_instagram_url", post(process_instagram_url))
            .with_state(h.state);

        let response = router
            .oneshot(
                Request::post("/process_instagram_url")
                    .header("content-type", "application/json")
                    .body(Body::from(
                        r#"{"url": "https://instagram.com/p/ABC123/"}"#,
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(
            body,
            serde_json::json!({"google_lens_result": {"visual_matches": []}})
        );
    }

    #[tokio::test]
    async fn protected_route_answers_401_without_credential() {
        use axum::body::Body;
        use axum::http::{Request, StatusCode};
        use tower::ServiceExt;

        let h = harness(Some("https://img/x.jpg"), serde_json::json!({}), Some("s3cret"));
        let resolver_called = h.resolver_called.clone();
        let router = Router::new()
            .route("/process_instagram_url", post(process_instagram_url))
            .with_state(h.state);

        let response = router
            .oneshot(
                Request::post("/process_instagram_url")
                    .header("content-type", "application/json")
                    .body(Body::from(
                        r#"{"url": "https://instagram.com/p/ABC123/"}"#,
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert!(!resolver_called.load(Ordering::SeqCst));
    }
}
