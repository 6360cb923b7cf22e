//! HTTP API subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, request ID, tracing, timeout)
//!     → middleware.rs (per-route metrics)
//!     → handlers.rs (path/body extraction, repository call)
//!     → error.rs (failures rendered as JSON error bodies)
//!     → Send to client
//! ```

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod server;

pub use error::ApiError;
pub use handlers::SOURCE_HEADER;
pub use server::{AppState, HttpServer};
