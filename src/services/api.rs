// src/services/api.rs
//
// Cliente HTTP compartilhado por todos os serviços.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex, PoisonError},
    time::Duration,
};

use futures_util::future::{BoxFuture, FutureExt, Shared};
use reqwest::{
    Method, RequestBuilder, Url,
    header::{ACCEPT, HeaderMap, HeaderValue},
};
use serde::{Serialize, de::DeserializeOwned};
use uuid::Uuid;

use crate::common::error::AppError;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/api";
const REQUEST_ID: &str = "x-request-id";

// Resposta já lida por completo; é o que os GETs concorrentes compartilham
#[derive(Debug)]
struct RawResponse {
    status: u16,
    body: Vec<u8>,
}

type SharedGet = Shared<BoxFuture<'static, Result<Arc<RawResponse>, Arc<reqwest::Error>>>>;
type InFlightMap = Mutex<HashMap<String, InFlight>>;

// GET em andamento e quantos chamadores ainda esperam por ele
struct InFlight {
    id: Uuid,
    waiters: usize,
    request: SharedGet,
}

// Registro de um chamador no mapa. Ao sair (resposta recebida ou future cancelado,
// por exemplo por um `try_join!` vizinho que falhou) libera a entrada: com a resposta
// em mãos ela sai na hora; cancelado, sai quando não resta mais ninguém esperando.
struct Waiter<'a> {
    in_flight: &'a InFlightMap,
    key: &'a str,
    id: Uuid,
    done: bool,
}

impl Drop for Waiter<'_> {
    fn drop(&mut self) {
        let mut in_flight = self.in_flight.lock().unwrap_or_else(PoisonError::into_inner);
        let release = match in_flight.get_mut(self.key) {
            Some(entry) if entry.id == self.id => {
                entry.waiters = entry.waiters.saturating_sub(1);
                self.done || entry.waiters == 0
            }
            _ => false,
        };
        if release {
            in_flight.remove(self.key);
        }
    }
}

/// Cliente da API REST. Barato de clonar: todos os clones usam o mesmo pool de conexões
/// e o mesmo mapa de GETs em andamento.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    in_flight: Arc<InFlightMap>,
}

impl ApiClient {
    /// Sem timeout quando `timeout` é `None`.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self, AppError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let mut builder = reqwest::Client::builder().default_headers(headers);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            http: builder.build()?,
            base_url: base_url.trim_end_matches('/').to_string(),
            in_flight: Arc::new(Mutex::new(HashMap::new())),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Monta a URL final: base + caminho (sem alterações) + query string.
    pub fn endpoint(&self, path: &str, query: &[(&str, String)]) -> Result<Url, AppError> {
        let raw = format!("{}{}", self.base_url, path);
        let url = if query.is_empty() {
            Url::parse(&raw)
        } else {
            Url::parse_with_params(&raw, query.iter().map(|(k, v)| (*k, v.as_str())))
        };
        url.map_err(|e| AppError::Internal(anyhow::anyhow!("URL inválida '{raw}': {e}")))
    }

    // =============================================================================
    //  LEITURA (com de-duplicação)
    // =============================================================================

    /// GET tipado. Dois GETs idênticos em andamento ao mesmo tempo viram uma única
    /// requisição; assim que ela termina, o próximo GET vai de novo para a rede.
    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, AppError> {
        let url = self.endpoint(path, query)?;
        let key = url.to_string();

        let (shared, mut waiter) = {
            let mut in_flight = self.in_flight.lock().unwrap_or_else(PoisonError::into_inner);
            let entry = in_flight
                .entry(key.clone())
                .and_modify(|existing| {
                    tracing::debug!(url = %key, "GET já em andamento, reaproveitando");
                    existing.waiters += 1;
                })
                .or_insert_with(|| InFlight {
                    id: Uuid::new_v4(),
                    waiters: 1,
                    request: Self::fetch(self.http.get(url)).boxed().shared(),
                });
            let waiter = Waiter {
                in_flight: &*self.in_flight,
                key: &key,
                id: entry.id,
                done: false,
            };
            (entry.request.clone(), waiter)
        };

        let outcome = shared.await;
        waiter.done = true;
        drop(waiter);

        let raw = outcome.inspect_err(|e| tracing::warn!(url = %key, "🔥 Falha no GET: {e}"))?;
        Self::decode(Method::GET, &key, &raw)
    }

    // =============================================================================
    //  ESCRITA
    // =============================================================================

    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, AppError>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        self.send_json(Method::POST, path, body).await
    }

    pub async fn put<B, T>(&self, path: &str, body: &B) -> Result<T, AppError>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        self.send_json(Method::PUT, path, body).await
    }

    /// DELETE: o corpo da resposta (se houver) é ignorado.
    pub async fn delete(&self, path: &str) -> Result<(), AppError> {
        let url = self.endpoint(path, &[])?;
        let key = url.to_string();
        let raw = Self::fetch(self.http.delete(url))
            .await
            .inspect_err(|e| tracing::warn!(url = %key, "🔥 Falha no DELETE: {e}"))?;

        if !(200..300).contains(&raw.status) {
            tracing::warn!(url = %key, status = raw.status, "API recusou o DELETE");
            return Err(AppError::from_response(raw.status, &raw.body));
        }
        Ok(())
    }

    async fn send_json<B, T>(&self, method: Method, path: &str, body: &B) -> Result<T, AppError>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        let url = self.endpoint(path, &[])?;
        let key = url.to_string();
        let request = self.http.request(method.clone(), url).json(body);
        let raw = Self::fetch(request)
            .await
            .inspect_err(|e| tracing::warn!(url = %key, "🔥 Falha no {method}: {e}"))?;
        Self::decode(method, &key, &raw)
    }

    // --- Internos ---

    async fn fetch(request: RequestBuilder) -> Result<Arc<RawResponse>, Arc<reqwest::Error>> {
        let request_id = Uuid::new_v4().to_string();
        let (client, request) = request.header(REQUEST_ID, &request_id).build_split();
        let request = request.map_err(Arc::new)?;
        tracing::debug!(method = %request.method(), url = %request.url(), %request_id, "→ API");

        let response = client.execute(request).await.map_err(Arc::new)?;
        let status = response.status().as_u16();
        let body = response.bytes().await.map_err(Arc::new)?;
        Ok(Arc::new(RawResponse {
            status,
            body: body.to_vec(),
        }))
    }

    fn decode<T: DeserializeOwned>(
        method: Method,
        url: &str,
        raw: &RawResponse,
    ) -> Result<T, AppError> {
        if !(200..300).contains(&raw.status) {
            tracing::warn!(%method, url, status = raw.status, "API devolveu erro");
            return Err(AppError::from_response(raw.status, &raw.body));
        }
        Ok(serde_json::from_slice(&raw.body)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_appends_path_and_encodes_query() {
        let api = ApiClient::new("http://localhost:8080/api/", None).unwrap();
        assert_eq!(api.base_url(), "http://localhost:8080/api");

        let plain = api.endpoint("/areas", &[]).unwrap();
        assert_eq!(plain.as_str(), "http://localhost:8080/api/areas");

        let query = api
            .endpoint("/history", &[("start", "2025-01-02T00:00:00Z".to_string())])
            .unwrap();
        assert_eq!(
            query.as_str(),
            "http://localhost:8080/api/history?start=2025-01-02T00%3A00%3A00Z"
        );
    }

    fn pending_entry(waiters: usize) -> (Uuid, InFlight) {
        let id = Uuid::new_v4();
        let raw = Arc::new(RawResponse {
            status: 200,
            body: b"[]".to_vec(),
        });
        let request = futures_util::future::ready(Ok(raw)).boxed().shared();
        (id, InFlight { id, waiters, request })
    }

    #[test]
    fn cancelled_waiters_release_the_entry_when_the_last_one_leaves() {
        let map = InFlightMap::default();
        let (id, entry) = pending_entry(2);
        map.lock().unwrap().insert("k".to_string(), entry);

        let waiter = |done| Waiter { in_flight: &map, key: "k", id, done };
        drop(waiter(false));
        assert_eq!(map.lock().unwrap().get("k").map(|e| e.waiters), Some(1));
        drop(waiter(false));
        assert!(map.lock().unwrap().is_empty());
    }

    #[test]
    fn finished_waiter_releases_the_entry_at_once() {
        let map = InFlightMap::default();
        let (id, entry) = pending_entry(3);
        map.lock().unwrap().insert("k".to_string(), entry);

        drop(Waiter { in_flight: &map, key: "k", id, done: true });
        assert!(map.lock().unwrap().is_empty());
    }

    #[test]
    fn stale_waiter_leaves_a_newer_entry_alone() {
        let map = InFlightMap::default();
        let (_, entry) = pending_entry(1);
        map.lock().unwrap().insert("k".to_string(), entry);

        drop(Waiter { in_flight: &map, key: "k", id: Uuid::new_v4(), done: true });
        assert_eq!(map.lock().unwrap().len(), 1);
    }

    #[test]
    fn non_success_status_becomes_api_error() {
        let raw = RawResponse {
            status: 404,
            body: r#"{"message":"Área não encontrada."}"#.as_bytes().to_vec(),
        };
        let err = ApiClient::decode::<serde_json::Value>(Method::GET, "/areas/9", &raw).unwrap_err();
        assert!(matches!(err, AppError::Api { status: 404, .. }));
        assert_eq!(err.server_message(), Some("Área não encontrada."));
    }
}
