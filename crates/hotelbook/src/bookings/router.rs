use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};

use super::domain::{BookingRequest, StatusUpdate};
use super::service::BookingService;
use crate::auth::{AdminUser, CurrentUser};
use crate::error::ServiceError;
use crate::store::Database;

/// Guest booking endpoints plus admin management.
pub fn booking_router<D>(service: Arc<BookingService<D>>) -> Router
where
    D: Database + 'static,
{
    Router::new()
        .route(
            "/api/v1/bookings",
            get(list_handler::<D>).post(create_handler::<D>),
        )
        .route("/api/v1/bookings/mine", get(mine_handler::<D>))
        .route(
            "/api/v1/bookings/:booking_id",
            get(detail_handler::<D>).delete(delete_handler::<D>),
        )
        .route("/api/v1/bookings/:booking_id/cancel", post(cancel_handler::<D>))
        .route("/api/v1/bookings/:booking_id/confirm", post(confirm_handler::<D>))
        .route("/api/v1/bookings/:booking_id/status", put(status_handler::<D>))
        .route("/api/v1/hotels/:hotel_id/bookings", get(hotel_handler::<D>))
        .with_state(service)
}

pub(crate) async fn create_handler<D>(
    State(service): State<Arc<BookingService<D>>>,
    CurrentUser(user): CurrentUser,
    Json(request): Json<BookingRequest>,
) -> Result<Response, ServiceError>
where
    D: Database + 'static,
{
    let confirmation = service.create_booking(&user, request).await?;
    Ok((StatusCode::CREATED, Json(confirmation)).into_response())
}

pub(crate) async fn list_handler<D>(
    State(service): State<Arc<BookingService<D>>>,
    AdminUser(_): AdminUser,
) -> Result<Response, ServiceError>
where
    D: Database + 'static,
{
    Ok(Json(service.get_all_bookings()?).into_response())
}

pub(crate) async fn mine_handler<D>(
    State(service): State<Arc<BookingService<D>>>,
    CurrentUser(user): CurrentUser,
) -> Result<Response, ServiceError>
where
    D: Database + 'static,
{
    Ok(Json(service.get_user_bookings(&user.uid)?).into_response())
}

pub(crate) async fn detail_handler<D>(
    State(service): State<Arc<BookingService<D>>>,
    CurrentUser(user): CurrentUser,
    Path(booking_id): Path<String>,
) -> Result<Response, ServiceError>
where
    D: Database + 'static,
{
    Ok(Json(service.get_booking_for(&user, &booking_id)?).into_response())
}

pub(crate) async fn cancel_handler<D>(
    State(service): State<Arc<BookingService<D>>>,
    CurrentUser(user): CurrentUser,
    Path(booking_id): Path<String>,
) -> Result<Response, ServiceError>
where
    D: Database + 'static,
{
    Ok(Json(service.cancel_booking(&user, &booking_id)?).into_response())
}

pub(crate) async fn confirm_handler<D>(
    State(service): State<Arc<BookingService<D>>>,
    AdminUser(_): AdminUser,
    Path(booking_id): Path<String>,
) -> Result<Response, ServiceError>
where
    D: Database + 'static,
{
    Ok(Json(service.confirm_booking(&booking_id)?).into_response())
}

pub(crate) async fn status_handler<D>(
    State(service): State<Arc<BookingService<D>>>,
    AdminUser(_): AdminUser,
    Path(booking_id): Path<String>,
    Json(update): Json<StatusUpdate>,
) -> Result<Response, ServiceError>
where
    D: Database + 'static,
{
    Ok(Json(service.update_booking_status(&booking_id, update.status)?).into_response())
}

pub(crate) async fn delete_handler<D>(
    State(service): State<Arc<BookingService<D>>>,
    AdminUser(_): AdminUser,
    Path(booking_id): Path<String>,
) -> Result<Response, ServiceError>
where
    D: Database + 'static,
{
    service.delete_booking(&booking_id)?;
    Ok(StatusCode::NO_CONTENT.into_response())
}

pub(crate) async fn hotel_handler<D>(
    State(service): State<Arc<BookingService<D>>>,
    AdminUser(_): AdminUser,
    Path(hotel_id): Path<String>,
) -> Result<Response, ServiceError>
where
    D: Database + 'static,
{
    Ok(Json(service.get_hotel_bookings(&hotel_id)?).into_response())
}
