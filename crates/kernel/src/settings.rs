use std::path::PathBuf;

use anyhow::{anyhow, Context};
use serde::Deserialize;

const DEFAULT_ENV: &str = "local";
const ENV_VAR_NAME: &str = "LENSGRAM_ENV";
const CONFIG_DIR_ENV: &str = "LENSGRAM_CONFIG_DIR";

/// Environment variable the original deployment used for the SerpApi key.
const SERP_API_KEY_ENV: &str = "SERP_API_KEY";
/// Environment variable carrying the inbound bearer secret, when the
/// deployment wants the endpoint protected.
const BEARER_SECRET_ENV: &str = "LENSGRAM_BEARER_SECRET";

/// Deployment environment the application is running in.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Local,
    Staging,
    Production,
}

/// Top-level configuration structure loaded from layered sources.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Settings {
    #[serde(default)]
    pub environment: Environment,
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub instagram: InstagramSettings,
    #[serde(default)]
    pub serpapi: SerpApiSettings,
    #[serde(default)]
    pub auth: AuthSettings,
    #[serde(default)]
    pub telemetry: TelemetrySettings,
}

impl Settings {
    /// Load configuration by layering `.env`, base file, and environment overlay.
    pub fn load() -> anyhow::Result<Self> {
        // Allow missing `.env` files without failing.
        let _ = dotenvy::dotenv();

        let environment = std::env::var(ENV_VAR_NAME).unwrap_or_else(|_| DEFAULT_ENV.to_string());
        let config_dir = std::env::var(CONFIG_DIR_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|_| {
                // Default to repo root `config` directory.
                std::env::current_dir()
                    .map(|cwd| cwd.join("config"))
                    .expect("unable to resolve current directory")
            });

        let base_path = config_dir.join("base.toml");
        let environment_filename = format!("{}.toml", environment);
        let environment_path = config_dir.join(environment_filename);

        let builder = config::Config::builder()
            .add_source(config::File::from(base_path).required(false))
            .add_source(config::File::from(environment_path).required(false))
            .add_source(config::Environment::with_prefix("LENSGRAM").separator("_"));

        let cfg = builder
            .build()
            .with_context(|| "failed to build configuration")?;

        let mut settings: Settings = cfg
            .try_deserialize()
            .with_context(|| "failed to deserialize configuration")?;

        // Well-known credential variables take precedence over file config.
        if let Ok(key) = std::env::var(SERP_API_KEY_ENV) {
            settings.serpapi.api_key = Some(key);
        }
        if let Ok(secret) = std::env::var(BEARER_SECRET_ENV) {
            settings.auth.bearer_secret = Some(secret);
        }

        // Override environment field with parsed enum variant.
        settings.environment = match environment.as_str() {
            "local" => Environment::Local,
            "staging" => Environment::Staging,
            "production" => Environment::Production,
            other => {
                return Err(anyhow!(
                    "unsupported environment '{}'; expected local/staging/production",
                    other
                ));
            }
        };

        Ok(settings)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "ServerSettings::default_host")]
    pub host: String,
    #[serde(default = "ServerSettings::default_port")]
    pub port: u16,
    #[serde(default = "ServerSettings::default_request_timeout_ms")]
    pub request_timeout_ms: u64,
}

impl ServerSettings {
    fn default_host() -> String {
        "0.0.0.0".to_string()
    }

    fn default_port() -> u16 {
        8000
    }

    fn default_request_timeout_ms() -> u64 {
        15000
    }
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: Self::default_host(),
            port: Self::default_port(),
            request_timeout_ms: Self::default_request_timeout_ms(),
        }
    }
}

/// Knobs for the Instagram GraphQL resolver. Endpoint, document id, and
/// browser identification belong to the provider's undocumented internal
/// protocol and may stop working without notice.
#[derive(Debug, Clone, Deserialize)]
pub struct InstagramSettings {
    #[serde(default = "InstagramSettings::default_endpoint")]
    pub endpoint: String,
    #[serde(default = "InstagramSettings::default_doc_id")]
    pub doc_id: String,
    #[serde(default = "InstagramSettings::default_user_agent")]
    pub user_agent: String,
}

impl InstagramSettings {
    fn default_endpoint() -> String {
        "https://www.instagram.com/graphql/query".to_string()
    }

    fn default_doc_id() -> String {
        "8845758582119845".to_string()
    }

    fn default_user_agent() -> String {
        "Mozilla/5.0 (X11; Ubuntu; Linux x86_64; rv:130.0) Gecko/20100101 Firefox/130.0"
            .to_string()
    }
}

impl Default for InstagramSettings {
    fn default() -> Self {
        Self {
            endpoint: Self::default_endpoint(),
            doc_id: Self::default_doc_id(),
            user_agent: Self::default_user_agent(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SerpApiSettings {
    #[serde(default = "SerpApiSettings::default_endpoint")]
    pub endpoint: String,
    /// SerpApi credential. A missing key is not a startup error: the
    /// upstream call simply fails with the provider's status.
    #[serde(default)]
    pub api_key: Option<String>,
}

impl SerpApiSettings {
    fn default_endpoint() -> String {
        "https://serpapi.com/search".to_string()
    }
}

impl Default for SerpApiSettings {
    fn default() -> Self {
        Self {
            endpoint: Self::default_endpoint(),
            api_key: None,
        }
    }
}

/// Inbound auth gate. When `bearer_secret` is unset the endpoint is open.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct AuthSettings {
    #[serde(default)]
    pub bearer_secret: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct TelemetrySettings {
    #[serde(default)]
    pub log_format: LogFormat,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_environment_is_local() {
        let settings = Settings::default();
        assert_eq!(settings.environment, Environment::Local);
    }

    #[test]
    fn default_server_binding_is_all_interfaces_port_8000() {
        let settings = Settings::default();
        assert_eq!(settings.server.host, "0.0.0.0");
        assert_eq!(settings.server.port, 8000);
    }

    #[test]
    fn default_auth_gate_is_open() {
        let settings = Settings::default();
        assert!(settings.auth.bearer_secret.is_none());
    }

    #[test]
    fn default_instagram_endpoint_points_at_graphql() {
        let settings = Settings::default();
        assert_eq!(
            settings.instagram.endpoint,
            "https://www.instagram.com/graphql/query"
        );
        assert!(!settings.instagram.doc_id.is_empty());
    }
}
