//! Integration tests for the Consulta gateway.
//!
//! Each test runs the gateway on a loopback port in front of the mock
//! Consulta API and drives it the way a browser would.
//! Run with: cargo test --test integration

use std::net::SocketAddr;

use consulta_gateway::config::Config;
use consulta_gateway::consulta::{ConsultaClient, Endpoint, MockConsultaApi};
use consulta_gateway::web::{create_router, AppState};
use pretty_assertions::assert_eq;
use reqwest::redirect::Policy;
use reqwest::StatusCode;
use serde_json::json;
use tokio::net::TcpListener;

const ANA: [(&str, &str); 5] = [
    ("nome", "Ana"),
    ("data_nascimento", "2000-01-01"),
    ("data_atendimento", "2024-05-01"),
    ("horario", "10:00"),
    ("tipo", "rotina"),
];

/// Start the gateway against `api` and return its address.
async fn spawn_gateway(api: &MockConsultaApi) -> SocketAddr {
    let config = Config {
        api_base_url: api.base_url(),
        api_database_reset: api.reset_url(),
        ..Config::default()
    };
    let client = ConsultaClient::new(&config).expect("client");
    let router = create_router(AppState::new(client));

    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("gateway server");
    });

    addr
}

/// Browser-like client that does not follow redirects.
fn browser() -> reqwest::Client {
    reqwest::Client::builder()
        .redirect(Policy::none())
        .build()
        .expect("browser client")
}

/// Submitting the creation form for Ana redirects to the listing.
#[tokio::test]
async fn test_create_redirects_to_listing() {
    let api = MockConsultaApi::start().await.unwrap();
    let gateway = spawn_gateway(&api).await;

    let response = browser()
        .post(format!("http://{gateway}/inserir"))
        .form(&ANA)
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()["location"], "/listar");

    let calls = api.received();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].endpoint, Endpoint::Create);
    assert_eq!(
        calls[0].body,
        json!({
            "nome": "Ana",
            "data_nascimento": "2000-01-01",
            "data_atendimento": "2024-05-01",
            "horario": "10:00",
            "tipo": "rotina",
        })
    );
}

/// Create, edit, list, delete and reset, following redirects like a browser.
#[tokio::test]
async fn test_full_appointment_lifecycle() {
    let api = MockConsultaApi::start().await.unwrap();
    let gateway = spawn_gateway(&api).await;
    let browser = reqwest::Client::new();

    // Create lands on the listing page
    let listing = browser
        .post(format!("http://{gateway}/inserir"))
        .form(&ANA)
        .send()
        .await
        .unwrap();
    assert_eq!(listing.status(), StatusCode::OK);
    assert!(listing.url().path().ends_with("/listar"));
    let html = listing.text().await.unwrap();
    assert_eq!(html.matches("data-id=").count(), 1);
    assert!(html.contains("Ana"));

    let id = api.consultas()[0].id;

    // Edit form is pre-filled
    let edit = browser
        .get(format!("http://{gateway}/atualizar/{id}"))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(edit.contains(r#"name="tipo" value="rotina""#));

    // Update changes the stored record
    let mut updated = ANA;
    updated[4] = ("tipo", "retorno");
    let response = browser
        .post(format!("http://{gateway}/atualizar/{id}"))
        .form(&updated)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(api.consultas()[0].tipo, "retorno");

    // Delete empties the listing
    let listing = browser
        .post(format!("http://{gateway}/excluir/{id}"))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert_eq!(listing.matches("data-id=").count(), 0);

    // Reset returns to the home page
    let home = browser
        .get(format!("http://{gateway}/reset-database"))
        .send()
        .await
        .unwrap();
    assert_eq!(home.status(), StatusCode::OK);
    assert_eq!(home.url().path(), "/");

    let endpoints: Vec<Endpoint> = api.received().iter().map(|c| c.endpoint).collect();
    assert_eq!(
        endpoints,
        vec![
            Endpoint::Create,
            Endpoint::List,
            Endpoint::List,
            Endpoint::Update,
            Endpoint::List,
            Endpoint::Delete,
            Endpoint::List,
            Endpoint::Reset,
        ]
    );
}

/// Editing a record the API does not know is a 404.
#[tokio::test]
async fn test_edit_unknown_record_is_not_found() {
    let api = MockConsultaApi::start().await.unwrap();
    let gateway = spawn_gateway(&api).await;

    let response = browser()
        .get(format!("http://{gateway}/atualizar/12"))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(response.text().await.unwrap(), "Consulta não encontrada");
}
