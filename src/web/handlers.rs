//! HTTP handlers for the browser routes.
//!
//! Each handler runs one linear sequence: build the payload, make at most one
//! API call, branch on its outcome, then render or redirect.

use axum::extract::rejection::PathRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::{Form, Json};
use metrics_exporter_prometheus::PrometheusHandle;
use serde::Serialize;
use tracing::info;

use crate::consulta::{
    find_by_id, ApiOutcome, ConsultaClient, ConsultaForm, ConsultaUpdate, NewConsulta,
};
use crate::error::{GatewayError, Result};

use super::templates::{render, CreatePage, EditPage, IndexPage, ListPage};

/// Application state shared with handlers.
#[derive(Clone)]
pub struct AppState {
    /// Client for the Consulta API.
    pub client: ConsultaClient,
    /// Prometheus handle, when metrics are enabled.
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    /// Create new app state.
    pub fn new(client: ConsultaClient) -> Self {
        Self {
            client,
            metrics: None,
        }
    }

    /// Attach a Prometheus handle to serve at `/metrics`.
    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Status: "ok".
    pub status: &'static str,
}

/// Health check handler - always returns 200.
pub async fn health() -> impl IntoResponse {
    Json(HealthResponse { status: "ok" })
}

/// Prometheus exposition, or 404 when metrics are disabled.
pub async fn metrics(State(state): State<AppState>) -> Response {
    match &state.metrics {
        Some(handle) => handle.render().into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

/// `GET /`
pub async fn index() -> Result<Html<String>> {
    render(&IndexPage {})
}

/// `GET /inserir`
pub async fn create_form() -> Result<Html<String>> {
    render(&CreatePage {})
}

/// `POST /inserir`
pub async fn create(
    State(state): State<AppState>,
    Form(form): Form<ConsultaForm>,
) -> Result<Redirect> {
    let payload = NewConsulta::from(form);

    match state.client.create(&payload).await? {
        ApiOutcome::Success => {
            info!(nome = %payload.nome, "Consulta created");
            Ok(Redirect::to("/listar"))
        }
        ApiOutcome::Rejected { status, body } => {
            Err(GatewayError::CreateRejected { status, body })
        }
    }
}

/// `GET /listar`
pub async fn list(State(state): State<AppState>) -> Result<Html<String>> {
    let consultas = state.client.list().await?;
    render(&ListPage { consultas })
}

/// Record id from the path. Anything but a non-negative integer is an
/// unknown route, not a bad request.
fn consulta_id(path: std::result::Result<Path<u64>, PathRejection>) -> Result<u64> {
    path.map(|Path(id)| id).map_err(|_| GatewayError::InvalidId)
}

/// `GET /atualizar/:id`
pub async fn update_form(
    State(state): State<AppState>,
    path: std::result::Result<Path<u64>, PathRejection>,
) -> Result<Html<String>> {
    let id = consulta_id(path)?;
    let consultas = state.client.list().await?;
    let consulta = find_by_id(consultas, id).ok_or(GatewayError::NotFound { id })?;
    render(&EditPage { consulta })
}

/// `POST /atualizar/:id`
pub async fn update(
    State(state): State<AppState>,
    path: std::result::Result<Path<u64>, PathRejection>,
    Form(form): Form<ConsultaForm>,
) -> Result<Redirect> {
    let id = consulta_id(path)?;
    let payload = ConsultaUpdate::new(id, form);

    match state.client.update(&payload).await? {
        ApiOutcome::Success => {
            info!(id, "Consulta updated");
            Ok(Redirect::to("/listar"))
        }
        ApiOutcome::Rejected { status, .. } => Err(GatewayError::UpdateRejected { status }),
    }
}

/// `POST /excluir/:id`
pub async fn delete(
    State(state): State<AppState>,
    path: std::result::Result<Path<u64>, PathRejection>,
) -> Result<Redirect> {
    let id = consulta_id(path)?;
    match state.client.delete(id).await? {
        ApiOutcome::Success => {
            info!(id, "Consulta deleted");
            Ok(Redirect::to("/listar"))
        }
        ApiOutcome::Rejected { status, .. } => Err(GatewayError::DeleteRejected { status }),
    }
}

/// `GET /reset-database`
pub async fn reset_database(State(state): State<AppState>) -> Result<Redirect> {
    match state.client.reset_database().await? {
        ApiOutcome::Success => {
            info!("Consulta database reset");
            Ok(Redirect::to("/"))
        }
        ApiOutcome::Rejected { status, .. } => Err(GatewayError::ResetRejected { status }),
    }
}
