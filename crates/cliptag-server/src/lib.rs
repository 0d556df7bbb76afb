//! Cliptag Server - HTTP API server.
//!
//! This crate provides the HTTP API for the Cliptag clipboard manager.
//!
//! ## Endpoints
//!
//! - `POST /api/analyze` - Classify a capture and derive its display title
//! - `GET /api/health` - Liveness probe
//!
//! ## Example
//!
//! ```no_run
//! use cliptag_server::{Server, ServerConfig};
//!
//! #[tokio::main]
//! async fn main() {
//!     let server = Server::new(ServerConfig::default()).unwrap();
//!     server.run().await.unwrap();
//! }
//! ```

pub mod error;
mod handlers;
pub mod models;
pub mod state;

use std::net::SocketAddr;

use axum::routing::{get, post};
use axum::Router;
use socket2::{Domain, Protocol, Socket, Type};
use thiserror::Error;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

pub use error::{ApiError, Result};
pub use state::AppState;

/// Default server port.
pub const DEFAULT_PORT: u16 = 48901;

/// Default server host (localhost only).
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default maximum accepted content size in bytes. The classifier itself
/// applies no bound, so the limit is enforced at this boundary.
pub const DEFAULT_MAX_CONTENT_LEN: usize = 512 * 1024;

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Host to bind to (default: 127.0.0.1).
    pub host: String,
    /// Port to bind to.
    pub port: u16,
    /// Maximum accepted content size in bytes.
    pub max_content_len: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            max_content_len: DEFAULT_MAX_CONTENT_LEN,
        }
    }
}

impl ServerConfig {
    /// Sets the host.
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Sets the port.
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Sets the maximum accepted content size.
    pub fn with_max_content_len(mut self, max_content_len: usize) -> Self {
        self.max_content_len = max_content_len;
        self
    }
}

/// Server error types.
#[derive(Debug, Error)]
pub enum ServerError {
    /// Failed to bind to address.
    #[error("failed to bind to {0}: {1}")]
    BindError(SocketAddr, std::io::Error),

    /// Server runtime error.
    #[error("server error: {0}")]
    Runtime(String),
}

/// The HTTP API server.
pub struct Server {
    router: Router,
    addr: SocketAddr,
}

impl Server {
    /// Creates a new server with the given configuration.
    pub fn new(config: ServerConfig) -> std::result::Result<Self, ServerError> {
        let state = AppState::new(config.max_content_len);
        Self::with_state(config, state)
    }

    /// Creates a server with custom application state.
    pub fn with_state(
        config: ServerConfig,
        state: AppState,
    ) -> std::result::Result<Self, ServerError> {
        // Permissive CORS for the web client.
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);

        let router = Router::new()
            .route("/api/analyze", post(handlers::analyze_content))
            .route("/api/health", get(handlers::health))
            .layer(cors)
            .with_state(state);

        let addr = format!("{}:{}", config.host, config.port)
            .parse()
            .map_err(|e| ServerError::Runtime(format!("invalid address: {}", e)))?;

        Ok(Self { router, addr })
    }

    /// Returns the server address.
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Runs the server until shutdown.
    pub async fn run(self) -> std::result::Result<(), ServerError> {
        info!("Starting Cliptag API server on {}", self.addr);

        // Create socket with SO_REUSEADDR to allow binding even when
        // sockets are lingering in TIME_WAIT.
        let socket = Socket::new(Domain::IPV4, Type::STREAM, Some(Protocol::TCP))
            .map_err(|e| ServerError::BindError(self.addr, e))?;

        socket
            .set_reuse_address(true)
            .map_err(|e| ServerError::BindError(self.addr, e))?;

        socket
            .bind(&self.addr.into())
            .map_err(|e| ServerError::BindError(self.addr, e))?;
        socket
            .listen(128)
            .map_err(|e| ServerError::BindError(self.addr, e))?;

        // Set non-blocking for tokio
        socket
            .set_nonblocking(true)
            .map_err(|e| ServerError::BindError(self.addr, e))?;

        let std_listener: std::net::TcpListener = socket.into();
        let listener = tokio::net::TcpListener::from_std(std_listener)
            .map_err(|e| ServerError::BindError(self.addr, e))?;

        axum::serve(listener, self.router)
            .await
            .map_err(|e| ServerError::Runtime(e.to_string()))?;

        Ok(())
    }

    /// Returns the router for testing.
    pub fn router(&self) -> Router {
        self.router.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use serde_json::json;
    use tower::ServiceExt;

    fn create_test_app() -> Router {
        create_test_app_with_limit(DEFAULT_MAX_CONTENT_LEN)
    }

    fn create_test_app_with_limit(max_content_len: usize) -> Router {
        let state = AppState::new(max_content_len);

        Router::new()
            .route("/api/analyze", post(handlers::analyze_content))
            .route("/api/health", get(handlers::health))
            .with_state(state)
    }

    async fn analyze(app: Router, content: &str) -> (StatusCode, serde_json::Value) {
        let request = Request::builder()
            .method("POST")
            .uri("/api/analyze")
            .header("content-type", "application/json")
            .body(Body::from(json!({ "content": content }).to_string()))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        (status, json)
    }

    #[tokio::test]
    async fn test_analyze_url() {
        let (status, json) = analyze(create_test_app(), "https://github.com/rust-lang/rust").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["content_type"], "url");
        assert_eq!(json["title"], "Link: github.com");
        let tags: Vec<&str> = json["tags"]
            .as_array()
            .unwrap()
            .iter()
            .map(|t| t.as_str().unwrap())
            .collect();
        assert!(tags.contains(&"github"));
        assert!(json.get("language").is_none());
    }

    #[tokio::test]
    async fn test_analyze_sql() {
        let (status, json) = analyze(create_test_app(), "SELECT * FROM users;").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["content_type"], "sql");
        assert_eq!(json["language"], "sql");
        assert_eq!(json["title"], "SQL SELECT");
    }

    #[tokio::test]
    async fn test_analyze_empty_content() {
        let (status, json) = analyze(create_test_app(), "").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["content_type"], "text");
        assert!(json["tags"].as_array().unwrap().is_empty());
        assert!((json["confidence"].as_f64().unwrap() - 0.8).abs() < 1e-6);
        assert!(!json["title"].as_str().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_analyze_returns_latency() {
        let (status, json) = analyze(create_test_app(), "Hello world").await;

        assert_eq!(status, StatusCode::OK);
        assert!(json["latency_ms"].is_number());
    }

    #[tokio::test]
    async fn test_analyze_content_too_large() {
        let app = create_test_app_with_limit(16);
        let (status, json) = analyze(app, &"x".repeat(64)).await;

        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(json["code"], "content_too_large");
    }

    #[tokio::test]
    async fn test_analyze_rejects_malformed_body() {
        let app = create_test_app();
        let request = Request::builder()
            .method("POST")
            .uri("/api/analyze")
            .header("content-type", "application/json")
            .body(Body::from(json!({ "text": "wrong field" }).to_string()))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert!(response.status().is_client_error());
    }

    #[tokio::test]
    async fn test_health() {
        let app = create_test_app();
        let request = Request::builder()
            .method("GET")
            .uri("/api/health")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["status"], "ok");
    }

    #[tokio::test]
    async fn test_server_config_default() {
        let config = ServerConfig::default();
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.max_content_len, DEFAULT_MAX_CONTENT_LEN);
    }

    #[tokio::test]
    async fn test_server_config_builders() {
        let config = ServerConfig::default()
            .with_host("0.0.0.0")
            .with_port(9000)
            .with_max_content_len(1024);
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 9000);
        assert_eq!(config.max_content_len, 1024);
    }
}
