use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use greetbus_core::error::GreetBusError;

use crate::app_state::AppState;

/// Bus failure surfaced to an HTTP caller.
///
/// Always 500; the body names a stable code and never the internal cause.
#[derive(Debug)]
pub struct ApiError(pub GreetBusError);

impl From<GreetBusError> for ApiError {
    fn from(e: GreetBusError) -> Self {
        Self(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(json!({ "error": self.0.client_code().as_str() }));
        (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
    }
}

/// `GET /greeting`: one bus request, one reply, written back as text.
pub async fn greeting(State(app): State<AppState>) -> Result<Response, ApiError> {
    let address = app.greeting_address();
    let body = app.bus().request(address).await.map_err(|e| {
        tracing::error!(%address, code = e.client_code().as_str(), error = %e, "greeting request failed");
        ApiError(e)
    })?;

    Ok(([(header::CONTENT_TYPE, "text/plain")], body).into_response())
}
