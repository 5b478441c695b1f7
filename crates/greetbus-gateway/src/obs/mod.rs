//! Observability: Prometheus registry and HTTP instrumentation.
//!
//! Metrics live in one `GreetBusMetrics` value built from config at start-up
//! and shared behind `Arc`. The bus records publish/consume/reply samples,
//! the `track_http` middleware records request/response samples, and the
//! `/metrics` handler renders the registry in text exposition format.

pub mod metrics;
pub mod middleware;

pub use metrics::{GreetBusMetrics, DEFAULT_LATENCY_BUCKETS};
pub use middleware::track_http;
