use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, put},
    Json, Router,
};

use super::domain::{RatingForm, RatingStatus};
use super::service::RatingService;
use crate::auth::CurrentUser;
use crate::error::ServiceError;
use crate::store::Database;

pub fn rating_router<D>(service: Arc<RatingService<D>>) -> Router
where
    D: Database + 'static,
{
    Router::new()
        .route("/api/v1/ratings", get(list_handler::<D>))
        .route("/api/v1/ratings/mine", get(mine_handler::<D>))
        .route(
            "/api/v1/ratings/:rating_id",
            put(update_handler::<D>).delete(delete_handler::<D>),
        )
        .route(
            "/api/v1/hotels/:hotel_id/ratings",
            get(hotel_handler::<D>).post(create_handler::<D>),
        )
        .route(
            "/api/v1/hotels/:hotel_id/ratings/average",
            get(average_handler::<D>),
        )
        .route(
            "/api/v1/hotels/:hotel_id/ratings/status",
            get(status_handler::<D>),
        )
        .with_state(service)
}

async fn list_handler<D>(
    State(service): State<Arc<RatingService<D>>>,
) -> Result<Response, ServiceError>
where
    D: Database + 'static,
{
    Ok(Json(service.get_all_ratings()?).into_response())
}

async fn mine_handler<D>(
    State(service): State<Arc<RatingService<D>>>,
    CurrentUser(user): CurrentUser,
) -> Result<Response, ServiceError>
where
    D: Database + 'static,
{
    Ok(Json(service.get_user_ratings(&user.uid)?).into_response())
}

async fn hotel_handler<D>(
    State(service): State<Arc<RatingService<D>>>,
    Path(hotel_id): Path<String>,
) -> Result<Response, ServiceError>
where
    D: Database + 'static,
{
    Ok(Json(service.get_hotel_ratings(&hotel_id)?).into_response())
}

async fn create_handler<D>(
    State(service): State<Arc<RatingService<D>>>,
    CurrentUser(user): CurrentUser,
    Path(hotel_id): Path<String>,
    Json(form): Json<RatingForm>,
) -> Result<Response, ServiceError>
where
    D: Database + 'static,
{
    let rating = service.add_rating(&user, &hotel_id, form)?;
    Ok((StatusCode::CREATED, Json(rating)).into_response())
}

async fn average_handler<D>(
    State(service): State<Arc<RatingService<D>>>,
    Path(hotel_id): Path<String>,
) -> Result<Response, ServiceError>
where
    D: Database + 'static,
{
    Ok(Json(service.get_average_rating(&hotel_id)?).into_response())
}

async fn status_handler<D>(
    State(service): State<Arc<RatingService<D>>>,
    CurrentUser(user): CurrentUser,
    Path(hotel_id): Path<String>,
) -> Result<Response, ServiceError>
where
    D: Database + 'static,
{
    let has_rated = service.has_user_rated(&user, &hotel_id)?;
    Ok(Json(RatingStatus {
        hotel_id,
        has_rated,
    })
    .into_response())
}

async fn update_handler<D>(
    State(service): State<Arc<RatingService<D>>>,
    CurrentUser(user): CurrentUser,
    Path(rating_id): Path<String>,
    Json(form): Json<RatingForm>,
) -> Result<Response, ServiceError>
where
    D: Database + 'static,
{
    Ok(Json(service.update_rating(&user, &rating_id, form)?).into_response())
}

async fn delete_handler<D>(
    State(service): State<Arc<RatingService<D>>>,
    CurrentUser(user): CurrentUser,
    Path(rating_id): Path<String>,
) -> Result<Response, ServiceError>
where
    D: Database + 'static,
{
    service.delete_rating(&user, &rating_id)?;
    Ok(StatusCode::NO_CONTENT.into_response())
}
