#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

mod common;

use std::collections::HashSet;
use std::time::Duration;

use axum::http::StatusCode;
use futures_util::future::join_all;
use tokio::time::Instant;

use greetbus_core::greeting::GREETINGS;
use greetbus_gateway::app_state::AppState;
use greetbus_gateway::config::{self, GatewayConfig};
use greetbus_gateway::router::build_router;

use common::{get, seeded_state};

#[tokio::test(start_paused = true)]
async fn greeting_is_plain_text_from_catalog() {
    let app = build_router(seeded_state(1));

    let started = Instant::now();
    let reply = get(&app, "/greeting").await;
    let elapsed = started.elapsed();

    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.headers["content-type"], "text/plain");
    assert!(GREETINGS.contains(&reply.body.as_str()), "body={:?}", reply.body);
    assert!(elapsed >= Duration::from_millis(20), "returned after {elapsed:?}");
    assert!(elapsed <= Duration::from_millis(101), "returned after {elapsed:?}");
}

#[tokio::test(start_paused = true)]
async fn concurrent_greetings_all_succeed_within_ceiling() {
    let app = build_router(seeded_state(2));

    let started = Instant::now();
    let replies = join_all((0..64).map(|_| get(&app, "/greeting"))).await;
    let elapsed = started.elapsed();

    let mut seen = HashSet::new();
    for r in &replies {
        assert_eq!(r.status, StatusCode::OK);
        assert!(GREETINGS.contains(&r.body.as_str()), "body={:?}", r.body);
        seen.insert(r.body.clone());
    }
    // 64 draws over 4 greetings: every one should appear.
    assert_eq!(seen.len(), GREETINGS.len());
    assert!(elapsed >= Duration::from_millis(20));
    assert!(elapsed <= Duration::from_millis(101), "took {elapsed:?}");
}

#[tokio::test]
async fn missing_worker_returns_500_without_waiting() {
    let state = AppState::without_services(GatewayConfig::default()).unwrap();
    let app = build_router(state);

    let started = Instant::now();
    let reply = tokio::time::timeout(Duration::from_secs(1), get(&app, "/greeting"))
        .await
        .expect("must not hang");

    assert_eq!(reply.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(reply.body.contains("NO_HANDLERS"));
    assert!(!reply.body.contains("greetings"), "cause leaked: {}", reply.body);
    // No consumer means no delay was ever scheduled.
    assert!(started.elapsed() < Duration::from_millis(500), "took {:?}", started.elapsed());
}

#[tokio::test(start_paused = true)]
async fn request_timeout_maps_to_500() {
    let cfg = config::load_from_str(
        "version: 1\ngateway: { request_timeout_ms: 10 }\nworker: { min_delay_ms: 50, max_delay_ms: 60 }\n",
    )
    .unwrap();
    let app = build_router(AppState::new(cfg).unwrap());

    let reply = get(&app, "/greeting").await;
    assert_eq!(reply.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(reply.body.contains("TIMEOUT"));
}

#[tokio::test]
async fn probes_report_ready_then_draining() {
    let state = seeded_state(3);
    let app = build_router(state.clone());

    let health = get(&app, "/healthz").await;
    assert_eq!((health.status, health.body.as_str()), (StatusCode::OK, "ok"));

    let ready = get(&app, "/readyz").await;
    assert_eq!(ready.status, StatusCode::OK);

    state.set_draining();
    let ready = get(&app, "/readyz").await;
    assert_eq!(ready.status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(ready.body, "draining");
}

#[tokio::test]
async fn unknown_route_is_404() {
    let app = build_router(seeded_state(4));
    assert_eq!(get(&app, "/nope").await.status, StatusCode::NOT_FOUND);
}
