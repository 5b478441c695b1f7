//! Shared helpers for gateway integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{HeaderMap, Method, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use greetbus_core::SeededRandomness;
use greetbus_gateway::app_state::AppState;
use greetbus_gateway::config::GatewayConfig;
use greetbus_gateway::services::GreetingWorker;

/// State with a greeting worker driven by a seeded random source.
pub fn seeded_state(seed: u64) -> AppState {
    let state = AppState::without_services(GatewayConfig::default()).unwrap();
    let worker = GreetingWorker::from_config(&state.cfg().worker, state.metrics())
        .unwrap()
        .with_randomness(Arc::new(SeededRandomness::new(seed)));
    state.bus().register(Arc::new(worker));
    state
}

pub struct Reply {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

pub async fn call(app: &Router, method: Method, uri: &str) -> Reply {
    let req = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    let resp = app.clone().oneshot(req).await.unwrap();

    let status = resp.status();
    let headers = resp.headers().clone();
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    Reply {
        status,
        headers,
        body: String::from_utf8(bytes.to_vec()).unwrap(),
    }
}

pub async fn get(app: &Router, uri: &str) -> Reply {
    call(app, Method::GET, uri).await
}

/// Sample lines of `metric` whose labels contain every `needle`.
pub fn samples<'a>(scrape: &'a str, metric: &str, needles: &[&str]) -> Vec<&'a str> {
    scrape
        .lines()
        .filter(|l| !l.starts_with('#'))
        .filter(|l| l.starts_with(&format!("{metric}{{")) || l.starts_with(&format!("{metric} ")))
        .filter(|l| needles.iter().all(|n| l.contains(n)))
        .collect()
}

/// Numeric value at the end of a sample line.
pub fn value(line: &str) -> f64 {
    line.rsplit(' ').next().unwrap().parse().unwrap()
}
