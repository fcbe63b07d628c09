//! Consulta API client wrapper.

use std::time::{Duration, Instant};

use reqwest::{RequestBuilder, StatusCode};
use tracing::{debug, error, instrument, warn};

use crate::config::Config;
use crate::error::ApiError;
use crate::metrics::{self, CallOutcome};

use super::types::{Consulta, ConsultaId, ConsultaUpdate, NewConsulta};

/// Consulta API endpoints called by the gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display, strum::IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum Endpoint {
    /// `POST {base}/inserir`.
    Create,
    /// `GET {base}/listar`.
    List,
    /// `POST {base}/atualizar`.
    Update,
    /// `DELETE {base}/excluir`.
    Delete,
    /// `DELETE {reset_url}`.
    Reset,
}

impl Endpoint {
    /// Status the API answers with when the call succeeds.
    pub fn success_status(self) -> StatusCode {
        match self {
            Endpoint::Create => StatusCode::CREATED,
            _ => StatusCode::OK,
        }
    }
}

/// Outcome of a mutating call that reached the API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiOutcome {
    /// The API answered with the endpoint's success status.
    Success,
    /// Any other status.
    Rejected {
        /// Status returned by the API.
        status: StatusCode,
        /// Raw response body.
        body: String,
    },
}

/// Consulta API client.
#[derive(Debug, Clone)]
pub struct ConsultaClient {
    /// HTTP client for API requests.
    http: reqwest::Client,
    /// Base URL for record endpoints, without trailing slash.
    base_url: String,
    /// Database reset URL.
    reset_url: String,
}

impl ConsultaClient {
    /// Create a new client from config.
    pub fn new(config: &Config) -> Result<Self, reqwest::Error> {
        let mut builder = reqwest::Client::builder()
            // Keep idle connections for 90 seconds
            .pool_idle_timeout(Duration::from_secs(90));

        if let Some(timeout_ms) = config.http_timeout_ms {
            builder = builder.timeout(Duration::from_millis(timeout_ms));
        }

        Ok(Self {
            http: builder.build()?,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            reset_url: config.api_database_reset.clone(),
        })
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Get the reset URL.
    pub fn reset_url(&self) -> &str {
        &self.reset_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    /// Create a record. Success is HTTP 201.
    #[instrument(skip(self, consulta), fields(nome = %consulta.nome))]
    pub async fn create(&self, consulta: &NewConsulta) -> Result<ApiOutcome, ApiError> {
        let request = self.http.post(self.url("inserir")).json(consulta);
        self.execute(Endpoint::Create, request).await
    }

    /// Fetch every record.
    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<Consulta>, ApiError> {
        let endpoint = Endpoint::List;
        let start = Instant::now();

        let response = self
            .http
            .get(self.url("listar"))
            .send()
            .await
            .map_err(|source| transport_error(endpoint, source, start))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|source| transport_error(endpoint, source, start))?;

        if !status.is_success() {
            let body = String::from_utf8_lossy(&body).into_owned();
            warn!(status = %status, body = %body, "Listing request failed");
            metrics::record_api_call(endpoint, CallOutcome::Rejected, start);
            return Err(ApiError::UnexpectedStatus {
                endpoint,
                status,
                body,
            });
        }

        let consultas: Vec<Consulta> = serde_json::from_slice(&body).map_err(|source| {
            error!(error = %source, "Failed to parse listing");
            metrics::record_api_call(endpoint, CallOutcome::DecodeError, start);
            ApiError::Decode { endpoint, source }
        })?;

        metrics::record_api_call(endpoint, CallOutcome::Success, start);
        debug!(count = consultas.len(), "Retrieved consultas");

        Ok(consultas)
    }

    /// Update a record. Success is HTTP 200.
    #[instrument(skip(self, update), fields(id = update.id))]
    pub async fn update(&self, update: &ConsultaUpdate) -> Result<ApiOutcome, ApiError> {
        let request = self.http.post(self.url("atualizar")).json(update);
        self.execute(Endpoint::Update, request).await
    }

    /// Delete a record; the id travels in the request body. Success is HTTP 200.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: u64) -> Result<ApiOutcome, ApiError> {
        let request = self.http.delete(self.url("excluir")).json(&ConsultaId { id });
        self.execute(Endpoint::Delete, request).await
    }

    /// Drop and recreate the API's dataset. Success is HTTP 200.
    #[instrument(skip(self))]
    pub async fn reset_database(&self) -> Result<ApiOutcome, ApiError> {
        let request = self.http.delete(&self.reset_url);
        self.execute(Endpoint::Reset, request).await
    }

    /// Send `request` and classify the response against the endpoint's success status.
    async fn execute(
        &self,
        endpoint: Endpoint,
        request: RequestBuilder,
    ) -> Result<ApiOutcome, ApiError> {
        let start = Instant::now();

        let response = request
            .send()
            .await
            .map_err(|source| transport_error(endpoint, source, start))?;

        let status = response.status();
        if status == endpoint.success_status() {
            metrics::record_api_call(endpoint, CallOutcome::Success, start);
            debug!(status = %status, "Consulta API accepted request");
            return Ok(ApiOutcome::Success);
        }

        let body = response
            .text()
            .await
            .map_err(|source| transport_error(endpoint, source, start))?;
        metrics::record_api_call(endpoint, CallOutcome::Rejected, start);
        warn!(status = %status, body = %body, "Consulta API rejected request");

        Ok(ApiOutcome::Rejected { status, body })
    }
}

fn transport_error(endpoint: Endpoint, source: reqwest::Error, start: Instant) -> ApiError {
    error!(endpoint = %endpoint, error = %source, "Consulta API unreachable");
    metrics::record_api_call(endpoint, CallOutcome::TransportError, start);
    ApiError::Transport { endpoint, source }
}
