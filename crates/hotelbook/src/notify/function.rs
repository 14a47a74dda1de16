use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde_json::{json, Value};

use super::dispatch::Notifier;
use super::payload::EmailPayload;
use super::NotifyError;

pub const SEND_EMAIL_PATH: &str = "/functions/v1/send-email";

const CORS_HEADERS: [(&str, &str); 3] = [
    ("access-control-allow-origin", "*"),
    (
        "access-control-allow-headers",
        "authorization, x-client-info, apikey, content-type",
    ),
    ("access-control-allow-methods", "POST, OPTIONS"),
];

/// The `send-email` function: CORS preflight plus the JSON dispatch endpoint.
pub fn send_email_router(notifier: Arc<Notifier>) -> Router {
    Router::new()
        .route(SEND_EMAIL_PATH, post(send_handler).options(preflight_handler))
        .with_state(notifier)
}

pub(crate) async fn preflight_handler() -> Response {
    (CORS_HEADERS, "ok").into_response()
}

pub(crate) async fn send_handler(State(notifier): State<Arc<Notifier>>, body: Bytes) -> Response {
    match handle(&notifier, &body).await {
        Ok(report) => (
            StatusCode::OK,
            CORS_HEADERS,
            Json(json!({ "success": true, "results": report })),
        )
            .into_response(),
        Err(error) => {
            tracing::error!(error = %error, "send-email function failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                CORS_HEADERS,
                Json(json!({ "success": false, "error": error.to_string() })),
            )
                .into_response()
        }
    }
}

async fn handle(notifier: &Notifier, body: &[u8]) -> Result<super::DispatchReport, NotifyError> {
    let value: Value = serde_json::from_slice(body)
        .map_err(|error| NotifyError::InvalidPayload(error.to_string()))?;
    if !notifier.is_ready() {
        return Err(NotifyError::NotConfigured);
    }
    let payload = EmailPayload::from_value(value)?;
    tracing::info!(kind = payload.kind(), "send-email payload received");
    notifier.dispatch(&payload).await
}
