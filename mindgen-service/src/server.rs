use crate::error::{Result, ServiceError};
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::routing::{get, post};
use axum::{Json, Router};
use mindgen_core::{Corpus, GenerationRequest, MindMapResponse, generate_mindmap};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{debug, info};

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Artificial pause before each generation.
    pub response_delay: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            response_delay: Duration::from_millis(1000),
        }
    }
}

impl ServerConfig {
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn with_response_delay(mut self, delay: Duration) -> Self {
        self.response_delay = delay;
        self
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub version: String,
}

#[derive(Clone)]
struct AppState {
    corpus: Arc<Corpus>,
    response_delay: Duration,
}

pub struct MindMapServer {
    config: ServerConfig,
    corpus: Arc<Corpus>,
}

impl MindMapServer {
    pub fn new(corpus: Corpus) -> Self {
        Self {
            config: ServerConfig::default(),
            corpus: Arc::new(corpus),
        }
    }

    pub fn with_config(mut self, config: ServerConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    pub fn router(&self) -> Router {
        let state = AppState {
            corpus: self.corpus.clone(),
            response_delay: self.config.response_delay,
        };

        Router::new()
            .route("/generate_mindmap", post(create_mindmap))
            .route("/health", get(health_check))
            .layer(CorsLayer::permissive())
            .layer(TraceLayer::new_for_http())
            .with_state(state)
    }

    /// Bind the configured address and serve until the process stops.
    pub async fn run(&self) -> Result<()> {
        let listener = TcpListener::bind(self.config.bind_address()).await?;
        self.serve(listener).await
    }

    pub async fn serve(&self, listener: TcpListener) -> Result<()> {
        let addr: SocketAddr = listener.local_addr()?;
        info!(
            "Serving mind maps on http://{} ({} topics, delay {:?})",
            addr,
            self.corpus.topics.len(),
            self.config.response_delay
        );
        axum::serve(listener, self.router()).await?;
        Ok(())
    }
}

async fn create_mindmap(
    State(state): State<AppState>,
    payload: std::result::Result<Json<GenerationRequest>, JsonRejection>,
) -> std::result::Result<Json<MindMapResponse>, ServiceError> {
    let Json(request) = payload?;
    let params = request.validate()?;
    debug!("Generate request: {:?}", params);

    if !state.response_delay.is_zero() {
        tokio::time::sleep(state.response_delay).await;
    }

    let response = generate_mindmap(&state.corpus, &request)?;
    info!(
        "Generated outline '{}' with {} nodes",
        response.data.name,
        response.data.node_count()
    );

    Ok(Json(response))
}

async fn health_check() -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorBody;
    use std::collections::HashSet;

    async fn spawn_server(delay: Duration) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let server = MindMapServer::new(Corpus::builtin())
            .with_config(ServerConfig::default().with_response_delay(delay));
        tokio::spawn(async move {
            server.serve(listener).await.unwrap();
        });
        format!("http://{}", addr)
    }

    #[test]
    fn test_config_defaults() {
        let config = ServerConfig::default();
        assert_eq!(config.bind_address(), "0.0.0.0:8000");
        assert_eq!(config.response_delay, Duration::from_secs(1));

        let config = config.with_host("127.0.0.1").with_port(9000);
        assert_eq!(config.bind_address(), "127.0.0.1:9000");
    }

    #[tokio::test]
    async fn test_health() {
        let base = spawn_server(Duration::ZERO).await;
        let health: HealthStatus = reqwest::get(format!("{}/health", base))
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(health.status, "ok");
        assert_eq!(health.version, env!("CARGO_PKG_VERSION"));
    }

    #[tokio::test]
    async fn test_generate_clamps_and_echoes_keyword() {
        let base = spawn_server(Duration::ZERO).await;
        let response = reqwest::Client::new()
            .post(format!("{}/generate_mindmap", base))
            .json(&serde_json::json!({
                "keyword": "人工",
                "depth": 9,
                "maxNodesPerLevel": 1
            }))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), 200);

        let body: MindMapResponse = response.json().await.unwrap();
        assert_eq!(body.keyword, "人工");
        assert_eq!(body.data.name, "人工智能");
        assert_eq!(body.data.depth(), 4);
        assert_eq!(body.data.children.len(), 3);

        let ids: HashSet<&str> = body.data.walk().iter().map(|(_, n)| n.id.as_str()).collect();
        assert_eq!(ids.len(), body.data.node_count());
    }

    #[tokio::test]
    async fn test_generate_without_links() {
        let base = spawn_server(Duration::ZERO).await;
        let body: MindMapResponse = reqwest::Client::new()
            .post(format!("{}/generate_mindmap", base))
            .json(&GenerationRequest::new("人工智能").with_include_links(false))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert!(body.data.walk().iter().all(|(_, n)| n.url.is_none()));
        assert_eq!(body.data.depth(), 2);
    }

    #[tokio::test]
    async fn test_empty_keyword_is_bad_request() {
        let base = spawn_server(Duration::ZERO).await;
        let response = reqwest::Client::new()
            .post(format!("{}/generate_mindmap", base))
            .json(&serde_json::json!({ "keyword": "   " }))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), 400);
        let body: ErrorBody = response.json().await.unwrap();
        assert_eq!(body.detail, "关键词不能为空");
    }

    #[tokio::test]
    async fn test_malformed_body_rejected() {
        let base = spawn_server(Duration::ZERO).await;
        let response = reqwest::Client::new()
            .post(format!("{}/generate_mindmap", base))
            .header("content-type", "application/json")
            .body("{\"depth\": 2}")
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), reqwest::StatusCode::UNPROCESSABLE_ENTITY);
        let body: ErrorBody = response.json().await.unwrap();
        assert!(body.detail.contains("keyword"));
    }

    #[tokio::test]
    async fn test_unparseable_body_is_json_error() {
        let base = spawn_server(Duration::ZERO).await;
        let response = reqwest::Client::new()
            .post(format!("{}/generate_mindmap", base))
            .header("content-type", "application/json")
            .body("not json")
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), reqwest::StatusCode::BAD_REQUEST);
        let body: ErrorBody = response.json().await.unwrap();
        assert!(!body.detail.is_empty());
    }

    #[tokio::test]
    async fn test_cors_headers_present() {
        let base = spawn_server(Duration::ZERO).await;
        let response = reqwest::Client::new()
            .get(format!("{}/health", base))
            .header("origin", "http://localhost:5173")
            .send()
            .await
            .unwrap();
        assert_eq!(
            response
                .headers()
                .get("access-control-allow-origin")
                .and_then(|v| v.to_str().ok()),
            Some("*")
        );
    }

    #[tokio::test]
    async fn test_response_delay_applied() {
        let base = spawn_server(Duration::from_millis(200)).await;
        let start = std::time::Instant::now();
        let response = reqwest::Client::new()
            .post(format!("{}/generate_mindmap", base))
            .json(&GenerationRequest::new("数据科学"))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), 200);
        assert!(start.elapsed() >= Duration::from_millis(200));
    }
}
