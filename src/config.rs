//! Application configuration loaded from environment variables.

use serde::Deserialize;
use url::Url;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    // === Consulta API ===
    /// Base URL of the Consulta API (`/inserir`, `/listar`, ... are appended).
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Full URL of the database reset endpoint.
    #[serde(default = "default_api_database_reset")]
    pub api_database_reset: String,

    /// Optional timeout for outbound API calls, in milliseconds.
    /// Unset means requests wait for the API indefinitely.
    #[serde(default)]
    pub http_timeout_ms: Option<u64>,

    // === Server Configuration ===
    /// Address the HTTP server binds to.
    #[serde(default = "default_host")]
    pub host: String,

    /// HTTP server port.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Install the Prometheus recorder and serve `/metrics`.
    #[serde(default = "default_true")]
    pub metrics_enabled: bool,
}

fn default_api_base_url() -> String {
    "http://localhost:5000/api/v1/consulta".to_string()
}

fn default_api_database_reset() -> String {
    "http://localhost:5000/api/v1/database/reset".to_string()
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_true() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            api_database_reset: default_api_database_reset(),
            http_timeout_ms: None,
            host: default_host(),
            port: default_port(),
            metrics_enabled: default_true(),
        }
    }
}

impl Config {
    /// Load configuration from environment, reading .env file first.
    pub fn load() -> Result<Self, envy::Error> {
        dotenvy::dotenv().ok();
        envy::from_env()
    }

    /// Check if the configuration is valid.
    pub fn validate(&self) -> Result<(), String> {
        check_http_url("API_BASE_URL", &self.api_base_url)?;
        check_http_url("API_DATABASE_RESET", &self.api_database_reset)?;

        if self.port == 0 {
            return Err("PORT must be non-zero".to_string());
        }

        if self.http_timeout_ms == Some(0) {
            return Err("HTTP_TIMEOUT_MS must be positive when set".to_string());
        }

        Ok(())
    }

    /// Address string for the listener (`host:port`).
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn check_http_url(name: &str, value: &str) -> Result<(), String> {
    let url = Url::parse(value).map_err(|e| format!("{name} is not a valid URL: {e}"))?;
    match url.scheme() {
        "http" | "https" => Ok(()),
        other => Err(format!("{name} must use http or https, got {other}")),
    }
}
