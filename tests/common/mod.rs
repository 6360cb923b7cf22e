//! Shared utilities for integration testing.

#![allow(dead_code)]

use axum::Router;
use employee_gateway::config::{GatewayConfig, UpstreamConfig};
use employee_gateway::http::HttpServer;
use employee_gateway::lifecycle::Shutdown;
use serde_json::{json, Value};
use tokio::net::TcpListener;

/// Base URL of a port nobody listens on.
pub fn unreachable_upstream() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

/// Serve `router` as a stand-in upstream API and return its base URL.
pub async fn start_stub_upstream(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let _ = axum::serve(listener, router).await;
    });

    format!("http://{}", addr)
}

/// A running gateway under test.
pub struct TestGateway {
    pub url: String,
    shutdown: Shutdown,
}

impl TestGateway {
    pub fn client(&self) -> reqwest::Client {
        reqwest::Client::builder().no_proxy().build().unwrap()
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.url, path)
    }
}

impl Drop for TestGateway {
    fn drop(&mut self) {
        self.shutdown.trigger();
    }
}

/// Start the gateway against `upstream_url` on an ephemeral port.
pub async fn start_gateway(upstream_url: &str, fallback_enabled: bool) -> TestGateway {
    let mut config = GatewayConfig::default();
    config.listener.bind_address = "127.0.0.1:0".into();
    config.upstream = UpstreamConfig {
        base_url: upstream_url.to_string(),
        connect_timeout_secs: 2,
        read_timeout_secs: 2,
        fallback_enabled,
    };
    config.observability.metrics_enabled = false;

    let listener = TcpListener::bind(&config.listener.bind_address).await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config).unwrap();
    tokio::spawn(server.run(listener, shutdown.signal()));

    TestGateway {
        url: format!("http://{}", addr),
        shutdown,
    }
}

/// Employee object as the upstream API spells it.
pub fn upstream_employee(id: u64, name: &str, salary: u64, age: u32) -> Value {
    json!({
        "id": id,
        "employee_name": name,
        "employee_salary": salary,
        "employee_age": age,
        "profile_image": ""
    })
}
