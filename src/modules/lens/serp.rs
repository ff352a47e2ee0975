//! Visual search against SerpApi's Google Lens engine.

use anyhow::Context;
use async_trait::async_trait;
use serde_json::Value;

use lensgram_http::error::AppError;
use lensgram_kernel::settings::SerpApiSettings;

const ENGINE: &str = "google_lens";

/// Runs a visual search over a target image URL.
#[async_trait]
pub trait VisualSearch: Send + Sync {
    async fn search(&self, image_url: &str, region: Option<&str>) -> Result<Value, AppError>;
}

/// Authenticated GET client for the search provider. Returns the raw JSON
/// payload; filtering happens downstream.
pub struct SerpApiClient {
    http: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
}

impl SerpApiClient {
    pub fn new(http: reqwest::Client, settings: &SerpApiSettings) -> Self {
        Self {
            http,
            endpoint: settings.endpoint.clone(),
            api_key: settings.api_key.clone(),
        }
    }
}

#[async_trait]
impl VisualSearch for SerpApiClient {
    async fn search(&self, image_url: &str, region: Option<&str>) -> Result<Value, AppError> {
        let mut params: Vec<(&str, &str)> = vec![("engine", ENGINE), ("url", image_url)];
        if let Some(key) = self.api_key.as_deref() {
            params.push(("api_key", key));
        }
        if let Some(region) = region {
            params.push(("country", region));
        }

        let response = self
            .http
            .get(&self.endpoint)
            .query(&params)
            .send()
            .await
            .context("google lens request failed")?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(%status, "google lens search answered non-success");
            return Err(AppError::upstream(
                status.as_u16(),
                "Error retrieving data from Google Lens API",
            ));
        }

        response.json().await.map_err(|_| {
            AppError::upstream_contract("Invalid response structure from Google Lens API")
        })
    }
}
