use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post},
    Json, Router,
};
use serde_json::json;

use super::domain::ContactForm;
use super::service::ContactService;
use crate::auth::AdminUser;
use crate::error::ServiceError;
use crate::store::Database;

/// Public contact form plus the admin inbox.
pub fn contact_router<D>(service: Arc<ContactService<D>>) -> Router
where
    D: Database + 'static,
{
    Router::new()
        .route(
            "/api/v1/contact",
            post(submit_handler::<D>).get(list_handler::<D>),
        )
        .route("/api/v1/contact/unread-count", get(unread_handler::<D>))
        .route("/api/v1/contact/:message_id", delete(delete_handler::<D>))
        .route("/api/v1/contact/:message_id/read", post(read_handler::<D>))
        .route(
            "/api/v1/contact/:message_id/replied",
            post(replied_handler::<D>),
        )
        .with_state(service)
}

pub(crate) async fn submit_handler<D>(
    State(service): State<Arc<ContactService<D>>>,
    Json(form): Json<ContactForm>,
) -> Response
where
    D: Database + 'static,
{
    match service.send_message(form).await {
        Ok(receipt) => (StatusCode::CREATED, Json(receipt)).into_response(),
        Err(ServiceError::Validation(reason)) => {
            let payload = json!({
                "success": false,
                "message": reason,
            });
            (StatusCode::UNPROCESSABLE_ENTITY, Json(payload)).into_response()
        }
        Err(other) => other.into_response(),
    }
}

pub(crate) async fn list_handler<D>(
    State(service): State<Arc<ContactService<D>>>,
    AdminUser(_): AdminUser,
) -> Result<Response, ServiceError>
where
    D: Database + 'static,
{
    Ok(Json(service.get_all_messages()?).into_response())
}

pub(crate) async fn unread_handler<D>(
    State(service): State<Arc<ContactService<D>>>,
    AdminUser(_): AdminUser,
) -> Result<Response, ServiceError>
where
    D: Database + 'static,
{
    let count = service.get_unread_count()?;
    Ok(Json(json!({ "count": count })).into_response())
}

pub(crate) async fn read_handler<D>(
    State(service): State<Arc<ContactService<D>>>,
    AdminUser(_): AdminUser,
    Path(message_id): Path<String>,
) -> Result<Response, ServiceError>
where
    D: Database + 'static,
{
    Ok(Json(service.mark_as_read(&message_id)?).into_response())
}

pub(crate) async fn replied_handler<D>(
    State(service): State<Arc<ContactService<D>>>,
    AdminUser(_): AdminUser,
    Path(message_id): Path<String>,
) -> Result<Response, ServiceError>
where
    D: Database + 'static,
{
    Ok(Json(service.mark_as_replied(&message_id)?).into_response())
}

pub(crate) async fn delete_handler<D>(
    State(service): State<Arc<ContactService<D>>>,
    AdminUser(_): AdminUser,
    Path(message_id): Path<String>,
) -> Result<Response, ServiceError>
where
    D: Database + 'static,
{
    service.delete_message(&message_id)?;
    Ok(StatusCode::NO_CONTENT.into_response())
}
