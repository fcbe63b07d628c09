//! Unified error types for the gateway.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tracing::error;

use crate::consulta::Endpoint;

/// Unified error type for the gateway.
///
/// Every variant maps to a plain-text browser response through
/// [`IntoResponse`]; the `Display` text is the body the user sees.
#[derive(Error, Debug)]
pub enum GatewayError {
    /// The API did not answer 201 to a create call.
    #[error("Erro ao inserir consulta: {body}")]
    CreateRejected {
        /// Status returned by the API.
        status: StatusCode,
        /// Raw error body returned by the API.
        body: String,
    },

    /// The API did not answer 200 to an update call.
    #[error("Erro ao atualizar consulta")]
    UpdateRejected {
        /// Status returned by the API.
        status: StatusCode,
    },

    /// The API did not answer 200 to a delete call.
    #[error("Erro ao excluir consulta")]
    DeleteRejected {
        /// Status returned by the API.
        status: StatusCode,
    },

    /// The API did not answer 200 to a reset call.
    #[error("Erro ao resetar o banco de dados")]
    ResetRejected {
        /// Status returned by the API.
        status: StatusCode,
    },

    /// Path id is not a non-negative integer; no such route.
    #[error("Not Found")]
    InvalidId,

    /// No record with this id in the API listing.
    #[error("Consulta não encontrada")]
    NotFound {
        /// The id that was looked up.
        id: u64,
    },

    /// The API could not be reached or answered unusably.
    #[error("Erro ao comunicar com a API de consultas: {0}")]
    Api(#[from] ApiError),

    /// Page template failed to render.
    #[error("Erro ao renderizar página: {0}")]
    Template(#[from] askama::Error),
}

impl GatewayError {
    /// Status code sent to the browser for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            GatewayError::InvalidId | GatewayError::NotFound { .. } => StatusCode::NOT_FOUND,
            GatewayError::Api(_) => StatusCode::BAD_GATEWAY,
            GatewayError::CreateRejected { .. }
            | GatewayError::UpdateRejected { .. }
            | GatewayError::DeleteRejected { .. }
            | GatewayError::ResetRejected { .. }
            | GatewayError::Template(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!(status = %status, error = %self, "request failed");
        }
        (status, self.to_string()).into_response()
    }
}

/// Failures talking to the Consulta API.
///
/// A response with an unexpected status on a mutating endpoint is not an
/// error here; it comes back as [`ApiOutcome::Rejected`](crate::consulta::ApiOutcome).
#[derive(Error, Debug)]
pub enum ApiError {
    /// No complete response was received (refused, DNS, timeout, body cut off).
    #[error("{endpoint} request failed: {source}")]
    Transport {
        /// Endpoint that was called.
        endpoint: Endpoint,
        /// Underlying client error.
        #[source]
        source: reqwest::Error,
    },

    /// The listing endpoint answered with a non-2xx status.
    #[error("{endpoint} returned HTTP {status}: {body}")]
    UnexpectedStatus {
        /// Endpoint that was called.
        endpoint: Endpoint,
        /// Status returned by the API.
        status: StatusCode,
        /// Raw response body.
        body: String,
    },

    /// The response body was not the expected JSON.
    #[error("failed to decode {endpoint} response: {source}")]
    Decode {
        /// Endpoint that was called.
        endpoint: Endpoint,
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },
}

/// Convenient Result type alias.
pub type Result<T> = std::result::Result<T, GatewayError>;
