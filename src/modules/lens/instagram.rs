//! Thumbnail resolution against Instagram's internal GraphQL endpoint.

use anyhow::Context;
use async_trait::async_trait;
use serde_json::json;

use lensgram_http::error::AppError;
use lensgram_kernel::settings::InstagramSettings;

/// JSON path of the thumbnail URL inside the GraphQL response.
const THUMBNAIL_PATH: &str = "/data/xdt_shortcode_media/thumbnail_src";

/// Resolves a post shortcode to a direct thumbnail image URL.
#[async_trait]
pub trait ImageResolver: Send + Sync {
    async fn resolve_thumbnail(&self, shortcode: &str) -> Result<String, AppError>;
}

/// Client for the provider's undocumented internal protocol: a form-encoded
/// POST with a fixed `doc_id` and a browser User-Agent. The payload shape and
/// response structure may change without notice; this is best effort against
/// the current format.
pub struct InstagramClient {
    http: reqwest::Client,
    endpoint: String,
    doc_id: String,
    user_agent: String,
}

impl InstagramClient {
    pub fn new(http: reqwest::Client, settings: &InstagramSettings) -> Self {
        Self {
            http,
            endpoint: settings.endpoint.clone(),
            doc_id: settings.doc_id.clone(),
            user_agent: settings.user_agent.clone(),
        }
    }
}

#[async_trait]
impl ImageResolver for InstagramClient {
    async fn resolve_thumbnail(&self, shortcode: &str) -> Result<String, AppError> {
        let variables = json!({
            "shortcode": shortcode,
            "fetch_tagged_user_count": null,
            "hoisted_comment_id": null,
            "hoisted_reply_id": null,
        });

        let response = self
            .http
            .post(&self.endpoint)
            .header(reqwest::header::USER_AGENT, &self.user_agent)
            .form(&[
                ("variables", variables.to_string()),
                ("doc_id", self.doc_id.clone()),
            ])
            .send()
            .await
            .context("instagram graphql request failed")?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(%status, shortcode, "instagram answered non-success");
            return Err(AppError::upstream(
                status.as_u16(),
                "Error retrieving data from Instagram",
            ));
        }

        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|_| AppError::upstream_contract("Invalid response structure from Instagram"))?;

        body.pointer(THUMBNAIL_PATH)
            .and_then(serde_json::Value::as_str)
            .map(str::to_owned)
            .ok_or_else(|| {
                AppError::upstream_contract("Invalid response structure from Instagram")
            })
    }
}
