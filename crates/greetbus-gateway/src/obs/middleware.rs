//! HTTP instrumentation (request count, latency, in-flight gauge).
//!
//! Installed with `route_layer`, so `MatchedPath` is always present and the
//! `route` label stays bounded by the router's own table.

use axum::extract::{MatchedPath, Request, State};
use axum::middleware::Next;
use axum::response::Response;
use prometheus::IntGauge;
use tokio::time::Instant;

use crate::app_state::AppState;

pub async fn track_http(State(app): State<AppState>, req: Request, next: Next) -> Response {
    let started = Instant::now();
    let route = req
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_owned())
        .unwrap_or_else(|| "unmatched".to_owned());
    let method = req.method().as_str().to_owned();

    let metrics = app.metrics();
    let response = {
        let _active = ActiveGuard::new(&metrics.http_active);
        next.run(req).await
    };

    let status = response.status().as_u16().to_string();
    let labels = [method.as_str(), route.as_str(), status.as_str()];
    metrics.http_requests.with_label_values(&labels).inc();
    metrics
        .http_duration
        .with_label_values(&labels)
        .observe(started.elapsed().as_secs_f64());

    response
}

/// Decrements on drop, so aborted requests (client went away) leave the
/// gauge balanced.
struct ActiveGuard<'a>(&'a IntGauge);

impl<'a> ActiveGuard<'a> {
    fn new(gauge: &'a IntGauge) -> Self {
        gauge.inc();
        Self(gauge)
    }
}

impl Drop for ActiveGuard<'_> {
    fn drop(&mut self) {
        self.0.dec();
    }
}
