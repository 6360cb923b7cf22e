//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (tracing, timeout, request ID, metrics)
//! - Bind server to listener
//! - Drain in-flight requests on shutdown

use axum::{
    body::Body,
    http::Request,
    middleware,
    routing::get,
    Router,
};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::GatewayConfig;
use crate::employees::EmployeeRepository;
use crate::http::handlers;
use crate::http::middleware::track_metrics;
use crate::upstream::UpstreamResult;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub repository: Arc<EmployeeRepository>,
}

/// HTTP server for the employee gateway.
pub struct HttpServer {
    router: Router,
    config: GatewayConfig,
}

impl HttpServer {
    /// Create a new HTTP server, building the upstream client from configuration.
    pub fn new(config: GatewayConfig) -> UpstreamResult<Self> {
        let repository = EmployeeRepository::from_config(&config.upstream)?;
        Ok(Self::with_repository(config, repository))
    }

    /// Create a new HTTP server around an existing repository.
    pub fn with_repository(config: GatewayConfig, repository: EmployeeRepository) -> Self {
        let state = AppState {
            repository: Arc::new(repository),
        };
        let router = Self::build_router(&config, state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &GatewayConfig, state: AppState) -> Router {
        Router::new()
            .route("/", get(handlers::list_employees).post(handlers::create_employee))
            .route("/search/{name}", get(handlers::search_employees))
            .route("/highestSalary", get(handlers::highest_salary))
            .route(
                "/topTenHighestEarningEmployeeNames",
                get(handlers::top_ten_highest_earning),
            )
            .route(
                "/{id}",
                get(handlers::get_employee).delete(handlers::delete_employee),
            )
            .route_layer(middleware::from_fn(track_metrics))
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                let request_id = request
                    .headers()
                    .get("x-request-id")
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or("unknown");
                tracing::info_span!(
                    "request",
                    request_id = %request_id,
                    method = %request.method(),
                    path = %request.uri().path(),
                )
            }))
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
    }

    /// Serve until `shutdown` resolves, then drain in-flight requests.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: impl Future<Output = ()> + Send + 'static,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            upstream = %self.config.upstream.base_url,
            fallback_enabled = self.config.upstream.fallback_enabled,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                shutdown.await;
                tracing::info!("Shutdown signal received, draining connections");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a handle to the router, e.g. to drive it in process.
    pub fn router(&self) -> Router {
        self.router.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::UpstreamConfig;
    use axum::http::StatusCode;
    use serde_json::Value;
    use tower::ServiceExt;

    fn offline_server() -> HttpServer {
        let addr = std::net::TcpListener::bind("127.0.0.1:0").unwrap().local_addr().unwrap();
        let mut config = GatewayConfig::default();
        config.upstream = UpstreamConfig {
            base_url: format!("http://{}", addr),
            connect_timeout_secs: 1,
            read_timeout_secs: 1,
            fallback_enabled: true,
        };
        HttpServer::new(config).unwrap()
    }

    async fn call(router: Router, request: Request<Body>) -> (StatusCode, axum::http::HeaderMap, Vec<u8>) {
        let response = router.oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, headers, body.to_vec())
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_static_routes_win_over_id() {
        let router = offline_server().router();

        let (status, headers, body) = call(router.clone(), get("/highestSalary")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(headers[handlers::SOURCE_HEADER.as_str()], "fallback");
        assert_eq!(serde_json::from_slice::<Value>(&body).unwrap(), 725_000);

        let (status, _, body) = call(router, get("/topTenHighestEarningEmployeeNames")).await;
        assert_eq!(status, StatusCode::OK);
        let top: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(top.as_array().unwrap().len(), 10);
        assert_eq!(top[0]["employee_salary"], 725_000);
    }

    #[tokio::test]
    async fn test_run_stops_on_trigger() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let shutdown = crate::lifecycle::Shutdown::new();
        let server = tokio::spawn(offline_server().run(listener, shutdown.signal()));

        let client = reqwest::Client::builder().no_proxy().build().unwrap();
        let res = client.get(format!("http://{}/4", addr)).send().await.unwrap();
        assert_eq!(res.status(), StatusCode::OK);

        shutdown.trigger();
        tokio::time::timeout(Duration::from_secs(5), server)
            .await
            .expect("server did not stop")
            .unwrap()
            .unwrap();
    }

    #[tokio::test]
    async fn test_request_id_is_set() {
        let router = offline_server().router();
        let (_, headers, _) = call(router, get("/4")).await;
        assert!(headers.contains_key("x-request-id"));
    }

    #[tokio::test]
    async fn test_invalid_id_is_bad_request() {
        let router = offline_server().router();
        let (status, _, body) = call(router, get("/not-a-number")).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        let body: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body["message"], "Invalid request");

        let (status, _, _) = call(offline_server().router(), get("/+4")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_create_rejects_malformed_json() {
        let router = offline_server().router();
        let request = Request::builder()
            .method("POST")
            .uri("/")
            .header("content-type", "application/json")
            .body(Body::from("{not json"))
            .unwrap();

        let (status, _, body) = call(router, request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let body: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body["status"], "BAD_REQUEST");
    }
}
