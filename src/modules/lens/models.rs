use serde::Deserialize;

fn default_country() -> String {
    "India".to_string()
}

/// Inbound request body for the relay endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct ProcessRequest {
    /// Instagram post URL containing a `/p/<shortcode>/` segment
    pub url: String,
    /// Country name used to localize the visual search
    #[serde(default = "default_country")]
    pub country: String,
}
