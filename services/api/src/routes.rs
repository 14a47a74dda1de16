use crate::infra::{AppState, Services};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Extension, Json, Router};
use hotelbook::admin::admin_router;
use hotelbook::auth::auth_router;
use hotelbook::bookings::booking_router;
use hotelbook::catalog::hotel_router;
use hotelbook::contacts::contact_router;
use hotelbook::notify::send_email_router;
use hotelbook::ratings::rating_router;
use hotelbook::store::Database;
use serde_json::json;

/// Full API surface: domain routers, the send-email function and operational endpoints.
pub(crate) fn with_hotelbook_routes<D>(services: Services<D>) -> Router
where
    D: Database + 'static,
{
    Router::new()
        .merge(hotel_router(services.hotels))
        .merge(booking_router(services.bookings))
        .merge(rating_router(services.ratings))
        .merge(contact_router(services.contacts))
        .merge(admin_router(services.admin))
        .merge(auth_router())
        .merge(send_email_router(services.notifier))
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}
