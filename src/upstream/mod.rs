//! Upstream employee API integration.
//!
//! # Data Flow
//! ```text
//! GatewayConfig.upstream (base URL, timeouts)
//!     → client.rs (one HTTP call per operation, bounded by timeouts)
//!     → types.rs (envelope decoding, error classification)
//!     → employees::repository (fallback policy, transformations)
//! ```
//!
//! # Constraints
//! - Path suffixes are fixed; only the base URL is configurable
//! - No retries, no backoff, no circuit breaking
//! - Every call has a connect and a read deadline

pub mod client;
pub mod types;

pub use client::UpstreamClient;
pub use types::{Envelope, Operation, UpstreamError, UpstreamResult};
