//! Medref Observability
//!
//! - Console logging through `tracing-subscriber`, compact or JSON
//! - HTTP request logging with a per-request id
//! - Prometheus metrics for requests and guard decisions
//!
//! # Examples
//!
//! ```no_run
//! use medref_observability::{init_metrics, init_tracing};
//!
//! #[tokio::main]
//! async fn main() {
//!     init_tracing();
//!     let handle = init_metrics(true);
//!     // ... application code ...
//! }
//! ```

pub mod logging;
pub mod metrics;

pub use metrics_exporter_prometheus::PrometheusHandle;

pub use logging::{RequestId, init_tracing, logging_middleware};
pub use metrics::{init_metrics, metrics_middleware, track_access_check, track_guard_decision};
