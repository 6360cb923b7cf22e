//! Employee gateway library.
//!
//! HTTP façade over a third-party employee REST API, with a built-in
//! fallback dataset for reads when upstream is unavailable.

pub mod config;
pub mod employees;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod upstream;

pub use config::schema::GatewayConfig;
pub use employees::EmployeeRepository;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use upstream::UpstreamClient;
