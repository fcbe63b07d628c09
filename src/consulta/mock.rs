//! Mock Consulta API server for testing.
//!
//! Serves the backend's routes from an in-memory store on a loopback port,
//! so the real [`ConsultaClient`](super::ConsultaClient) can be exercised
//! without the backend. Every call is recorded with its JSON body, and each
//! endpoint can be forced to answer with a fixed error status.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use axum::body::{Body, Bytes};
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use futures::stream;
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tracing::warn;

use super::client::Endpoint;
use super::types::{Consulta, ConsultaUpdate, NewConsulta};

/// Configuration for mock API behavior.
///
/// A `Some(status)` makes that endpoint answer with `status` and a
/// `{"message": ...}` body instead of touching the store.
#[derive(Debug, Clone, Default)]
pub struct MockConfig {
    pub create_status: Option<StatusCode>,
    pub list_status: Option<StatusCode>,
    pub update_status: Option<StatusCode>,
    pub delete_status: Option<StatusCode>,
    pub reset_status: Option<StatusCode>,
    /// Cut the connection partway through those forced error bodies.
    pub abort_error_body: bool,
}

/// A request received by the mock API.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    /// Endpoint that was hit.
    pub endpoint: Endpoint,
    /// JSON body, or `Value::Null` when the request had none.
    pub body: Value,
}

#[derive(Debug, Default)]
struct MockStore {
    next_id: u64,
    consultas: Vec<Consulta>,
    received: Vec<RecordedCall>,
    config: MockConfig,
}

impl MockStore {
    fn record(&mut self, endpoint: Endpoint, body: Value) {
        self.received.push(RecordedCall { endpoint, body });
    }
}

#[derive(Debug, Clone, Default)]
struct Shared(Arc<Mutex<MockStore>>);

impl Shared {
    fn lock(&self) -> MutexGuard<'_, MockStore> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Mock Consulta API listening on `127.0.0.1`.
///
/// The server task is aborted when the value is dropped.
#[derive(Debug)]
pub struct MockConsultaApi {
    shared: Shared,
    addr: SocketAddr,
    server: JoinHandle<()>,
}

impl MockConsultaApi {
    /// Start a mock API with default configuration.
    pub async fn start() -> std::io::Result<Self> {
        Self::with_config(MockConfig::default()).await
    }

    /// Start a mock API with custom configuration.
    pub async fn with_config(config: MockConfig) -> std::io::Result<Self> {
        let shared = Shared::default();
        shared.lock().config = config;

        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;

        let router = Router::new()
            .route("/api/v1/consulta/inserir", post(insert))
            .route("/api/v1/consulta/listar", get(list))
            .route("/api/v1/consulta/atualizar", post(update))
            .route("/api/v1/consulta/excluir", delete(remove))
            .route("/api/v1/database/reset", delete(reset))
            .with_state(shared.clone());

        let server = tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, router).await {
                warn!(error = %e, "Mock consulta API stopped");
            }
        });

        Ok(Self {
            shared,
            addr,
            server,
        })
    }

    /// Base URL to configure as `API_BASE_URL`.
    pub fn base_url(&self) -> String {
        format!("http://{}/api/v1/consulta", self.addr)
    }

    /// URL to configure as `API_DATABASE_RESET`.
    pub fn reset_url(&self) -> String {
        format!("http://{}/api/v1/database/reset", self.addr)
    }

    /// Insert a record directly, bypassing the HTTP interface.
    pub fn seed(&self, consulta: Consulta) {
        let mut store = self.shared.lock();
        store.next_id = store.next_id.max(consulta.id);
        store.consultas.push(consulta);
    }

    /// Replace the mock configuration.
    pub fn set_config(&self, config: MockConfig) {
        self.shared.lock().config = config;
    }

    /// Snapshot of the stored records.
    pub fn consultas(&self) -> Vec<Consulta> {
        self.shared.lock().consultas.clone()
    }

    /// Every request received so far, oldest first.
    pub fn received(&self) -> Vec<RecordedCall> {
        self.shared.lock().received.clone()
    }
}

impl Drop for MockConsultaApi {
    fn drop(&mut self) {
        self.server.abort();
    }
}

/// A loopback port with nothing listening on it.
pub async fn unused_port() -> std::io::Result<u16> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    Ok(listener.local_addr()?.port())
}

fn message(status: StatusCode, text: &str) -> Response {
    (status, Json(json!({ "message": text }))).into_response()
}

/// Forced error response, optionally with a body stream that fails midway.
fn forced(config: &MockConfig, status: StatusCode, text: &str) -> Response {
    if !config.abort_error_body {
        return message(status, text);
    }

    let chunks: Vec<Result<Bytes, std::io::Error>> = vec![
        Ok(Bytes::from(format!(r#"{{"message":"{text}"#))),
        Err(std::io::Error::other("connection reset by mock")),
    ];
    (status, Body::from_stream(stream::iter(chunks))).into_response()
}

async fn insert(State(shared): State<Shared>, Json(body): Json<Value>) -> Response {
    let mut store = shared.lock();
    store.record(Endpoint::Create, body.clone());

    if let Some(status) = store.config.create_status {
        return forced(&store.config, status, "Erro ao inserir consulta");
    }

    let Ok(new) = serde_json::from_value::<NewConsulta>(body) else {
        return message(StatusCode::INTERNAL_SERVER_ERROR, "Erro ao inserir consulta");
    };

    store.next_id += 1;
    let consulta = Consulta {
        id: store.next_id,
        nome: new.nome,
        data_nascimento: new.data_nascimento,
        data_atendimento: new.data_atendimento,
        horario: new.horario,
        tipo: new.tipo,
    };
    store.consultas.push(consulta.clone());

    (StatusCode::CREATED, Json(consulta)).into_response()
}

async fn list(State(shared): State<Shared>) -> Response {
    let mut store = shared.lock();
    store.record(Endpoint::List, Value::Null);

    if let Some(status) = store.config.list_status {
        return forced(&store.config, status, "Erro ao listar consultas");
    }

    // Same order as the backend: by appointment date, then time.
    let mut consultas = store.consultas.clone();
    consultas.sort_by(|a, b| {
        (&a.data_atendimento, &a.horario).cmp(&(&b.data_atendimento, &b.horario))
    });

    Json(consultas).into_response()
}

async fn update(State(shared): State<Shared>, Json(body): Json<Value>) -> Response {
    let mut store = shared.lock();
    store.record(Endpoint::Update, body.clone());

    if let Some(status) = store.config.update_status {
        return forced(&store.config, status, "Erro ao atualizar consulta");
    }

    let Ok(update) = serde_json::from_value::<ConsultaUpdate>(body) else {
        return message(StatusCode::INTERNAL_SERVER_ERROR, "Erro ao atualizar consulta");
    };

    match store.consultas.iter_mut().find(|c| c.id == update.id) {
        Some(consulta) => {
            let fields = update.fields;
            consulta.nome = fields.nome;
            consulta.data_nascimento = fields.data_nascimento;
            consulta.data_atendimento = fields.data_atendimento;
            consulta.horario = fields.horario;
            consulta.tipo = fields.tipo;
            (StatusCode::OK, Json(consulta.clone())).into_response()
        }
        None => message(StatusCode::NOT_FOUND, "Consulta não encontrada"),
    }
}

async fn remove(State(shared): State<Shared>, Json(body): Json<Value>) -> Response {
    let mut store = shared.lock();
    store.record(Endpoint::Delete, body.clone());

    if let Some(status) = store.config.delete_status {
        return forced(&store.config, status, "Erro ao excluir consulta");
    }

    let Some(id) = body.get("id").and_then(Value::as_u64) else {
        return message(StatusCode::BAD_REQUEST, "ID não fornecido");
    };

    let before = store.consultas.len();
    store.consultas.retain(|c| c.id != id);
    if store.consultas.len() == before {
        message(StatusCode::NOT_FOUND, "Consulta não encontrada")
    } else {
        message(StatusCode::OK, "Consulta excluída com sucesso")
    }
}

async fn reset(State(shared): State<Shared>) -> Response {
    let mut store = shared.lock();
    store.record(Endpoint::Reset, Value::Null);

    if let Some(status) = store.config.reset_status {
        return forced(&store.config, status, "Erro ao resetar o banco de dados");
    }

    store.consultas.clear();
    store.next_id = 0;
    message(StatusCode::OK, "Banco de dados resetado com sucesso")
}
