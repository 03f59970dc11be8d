//! Servidor falso da API REST para os testes de integração.
//! Responde com corpos pré-definidos por "MÉTODO caminho" e registra cada requisição.

#![allow(dead_code)]

use std::{
    collections::HashMap,
    net::SocketAddr,
    sync::{Arc, Mutex},
    time::Duration,
};

use axum::{
    Json, Router,
    body::Bytes,
    extract::State,
    http::{HeaderMap, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
};
use serde_json::{Value, json};
use sysaccessos_console::{AppState, ConsoleConfig, ViewRouter};

#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub body: Option<Value>,
    pub accept: Option<String>,
    pub request_id: Option<String>,
}

#[derive(Clone)]
struct Canned {
    status: StatusCode,
    body: Value,
    delay: Option<Duration>,
}

#[derive(Default)]
struct Inner {
    routes: HashMap<String, Canned>,
    requests: Vec<Recorded>,
}

#[derive(Clone, Default)]
pub struct MockApi {
    inner: Arc<Mutex<Inner>>,
}

impl MockApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Define (ou substitui) a resposta de `method path`.
    pub fn on(&self, method: &str, path: &str, status: u16, body: Value) -> &Self {
        self.insert(method, path, status, body, None)
    }

    pub fn on_slow(&self, method: &str, path: &str, delay: Duration, body: Value) -> &Self {
        self.insert(method, path, 200, body, Some(delay))
    }

    fn insert(&self, method: &str, path: &str, status: u16, body: Value, delay: Option<Duration>) -> &Self {
        let canned = Canned {
            status: StatusCode::from_u16(status).unwrap(),
            body,
            delay,
        };
        self.inner
            .lock()
            .unwrap()
            .routes
            .insert(format!("{method} {path}"), canned);
        self
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.inner.lock().unwrap().requests.clone()
    }

    pub fn count(&self, method: &str, path: &str) -> usize {
        self.requests()
            .iter()
            .filter(|r| r.method == method && r.path == path)
            .count()
    }

    pub fn last(&self, method: &str, path: &str) -> Option<Recorded> {
        self.requests()
            .into_iter()
            .rev()
            .find(|r| r.method == method && r.path == path)
    }

    /// Sobe o servidor em 127.0.0.1:0 e devolve a URL base (com `/api`).
    pub async fn start(&self) -> String {
        let app = Router::new().fallback(respond).with_state(self.clone());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr: SocketAddr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}/api")
    }
}

async fn respond(
    State(mock): State<MockApi>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let path = uri.path().strip_prefix("/api").unwrap_or(uri.path()).to_string();
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };

    let canned = {
        let mut inner = mock.inner.lock().unwrap();
        inner.requests.push(Recorded {
            method: method.to_string(),
            path: path.clone(),
            query: uri.query().map(str::to_string),
            body: serde_json::from_slice(&body).ok(),
            accept: header("accept"),
            request_id: header("x-request-id"),
        });
        inner.routes.get(&format!("{method} {path}")).cloned()
    };

    match canned {
        Some(canned) => {
            if let Some(delay) = canned.delay {
                tokio::time::sleep(delay).await;
            }
            if canned.status == StatusCode::NO_CONTENT {
                return canned.status.into_response();
            }
            (canned.status, Json(canned.body)).into_response()
        }
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({"success": false, "message": format!("Rota não simulada: {method} {path}")})),
        )
            .into_response(),
    }
}

// =============================================================================
//  MONTAGEM
// =============================================================================

pub async fn state_for(mock: &MockApi) -> AppState {
    let config = ConsoleConfig {
        api_base_url: mock.start().await,
        timeout: Some(Duration::from_secs(5)),
    };
    AppState::new(&config).unwrap()
}

pub async fn router_for(mock: &MockApi) -> ViewRouter {
    ViewRouter::new(state_for(mock).await)
}

// =============================================================================
//  DADOS
// =============================================================================

pub fn user(id: i64, name: &str, role: &str, card: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "email": format!("{}@empresa.com", name.to_lowercase()),
        "registrationCode": format!("{id}00"),
        "role": role,
        "cardIdentifier": card,
    })
}

pub fn area(id: i64, name: &str) -> Value {
    json!({
        "id": id,
        "active": true,
        "name": name,
        "description": format!("Descrição de {name}"),
        "location": "Bloco A",
        "securityLevel": "GERAL",
        "notes": null,
        "inUse": false,
        "status": "Disponivel",
        "occupantName": null,
        "occupantCardIdentifier": null,
        "lastMovementAt": null,
        "usageDeadline": null,
    })
}

pub fn permission(id: i64, user_id: i64, area_id: i64) -> Value {
    json!({
        "id": id,
        "userId": user_id,
        "userName": "Ana",
        "areaId": area_id,
        "areaName": "Laboratório",
        "accessLevel": "PADRAO",
        "validFrom": "2025-01-01",
        "validUntil": "2025-12-31",
        "status": "ATIVA",
        "notes": null,
    })
}

pub fn history_entry(id: i64, user_id: i64, area_id: i64) -> Value {
    json!({
        "id": id,
        "userId": user_id,
        "userName": "Ana",
        "areaId": area_id,
        "areaName": "Laboratório",
        "eventType": "ENTRADA",
        "result": "AUTORIZADO",
        "cardIdentifier": "12345",
        "notes": null,
        "recordedAt": "2025-03-10T12:00:00Z",
    })
}
