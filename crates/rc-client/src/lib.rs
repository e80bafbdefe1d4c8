//! HTTP adapters for the route solver and graph store.
//!
//! `HttpClient` implements both `RouteService` and `GraphStore` against a
//! JSON API:
//!
//! | Call             | Request                  | Response               |
//! |------------------|--------------------------|------------------------|
//! | `request_route`  | `POST /route`            | `RouteResult`          |
//! | `list_graphs`    | `GET /graphs`            | `[GraphSummary]`       |
//! | `load_graph`     | `GET /graphs/{id}`       | `GraphData`            |
//! | `save_graph`     | `POST /graphs`           | `SaveReceipt`          |
//!
//! The trait methods never surface transport errors to the editor (except
//! `save_graph`, which reports them for the user notice). The `try_*`
//! methods expose the underlying `ClientError` for callers that want it.

pub mod config;

pub use config::ClientConfig;

use rc_core::model::{
    GraphData, GraphSummary, RouteRequest, RouteResult, SaveGraphRequest, SaveReceipt,
};
use rc_editor::{GraphStore, RouteService};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Error bodies are cut to this many characters in `ClientError::Status`.
const MAX_ERROR_BODY: usize = 200;

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("server answered {status}: {body}")]
    Status { status: u16, body: String },
}

pub struct HttpClient {
    http: Client,
    base_url: String,
}

impl HttpClient {
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        let http = Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn read<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ClientError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::Status {
                status: status.as_u16(),
                body: body.chars().take(MAX_ERROR_BODY).collect(),
            });
        }
        Ok(response.json().await?)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let response = self
            .http
            .get(self.url(path))
            .header("Accept", "application/json")
            .send()
            .await?;
        Self::read(response).await
    }

    async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ClientError> {
        let response = self.http.post(self.url(path)).json(body).send().await?;
        Self::read(response).await
    }

    pub async fn try_route(&self, request: &RouteRequest) -> Result<RouteResult, ClientError> {
        self.post("/route", request).await
    }

    pub async fn try_list(&self) -> Result<Vec<GraphSummary>, ClientError> {
        self.get("/graphs").await
    }

    pub async fn try_load(&self, id: u64) -> Result<GraphData, ClientError> {
        self.get(&format!("/graphs/{id}")).await
    }
}

impl RouteService for HttpClient {
    async fn request_route(&self, request: &RouteRequest) -> RouteResult {
        match self.try_route(request).await {
            Ok(result) => result,
            Err(err) => {
                log::warn!("route request failed: {err}");
                RouteResult::empty()
            }
        }
    }
}

impl GraphStore for HttpClient {
    type Error = ClientError;

    async fn list_graphs(&self) -> Vec<GraphSummary> {
        self.try_list().await.unwrap_or_else(|err| {
            log::warn!("listing graphs failed: {err}");
            Vec::new()
        })
    }

    async fn load_graph(&self, id: u64) -> Option<GraphData> {
        match self.try_load(id).await {
            Ok(data) => Some(data),
            Err(err) => {
                log::warn!("loading graph {id} failed: {err}");
                None
            }
        }
    }

    async fn save_graph(&self, request: &SaveGraphRequest) -> Result<SaveReceipt, ClientError> {
        self.post("/graphs", request).await
    }
}
