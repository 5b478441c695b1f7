//! Axum router wiring.
//!
//! `/greeting` plus the ops endpoints. Request metrics are a `route_layer`
//! so they see the matched route. Panics are turned into 500s inside the
//! metrics layer, so a panicking handler is still counted.

use axum::{middleware, routing::get, Router};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;

use crate::{app_state::AppState, obs, ops, transport};

pub fn build_router(state: AppState) -> Router {
    let routes = Router::new()
        .route("/greeting", get(transport::http::greeting))
        .route("/metrics", get(ops::metrics).post(ops::metrics))
        .route("/healthz", get(ops::healthz))
        .route("/readyz", get(ops::readyz));
    instrument(routes, state)
}

/// Layers shared by every route. Must run after all routes are added.
fn instrument(routes: Router<AppState>, state: AppState) -> Router {
    routes
        .route_layer(CatchPanicLayer::new())
        .route_layer(middleware::from_fn_with_state(state.clone(), obs::track_http))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
