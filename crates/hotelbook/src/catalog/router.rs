use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};

use super::domain::{HotelDraft, HotelFilter, HotelPatch};
use super::service::HotelService;
use crate::auth::AdminUser;
use crate::error::ServiceError;
use crate::store::Database;

/// Public catalog reads plus admin-only maintenance.
pub fn hotel_router<D>(service: Arc<HotelService<D>>) -> Router
where
    D: Database + 'static,
{
    Router::new()
        .route(
            "/api/v1/hotels",
            get(list_handler::<D>).post(create_handler::<D>),
        )
        .route(
            "/api/v1/hotels/:hotel_id",
            get(detail_handler::<D>)
                .put(update_handler::<D>)
                .delete(delete_handler::<D>),
        )
        .with_state(service)
}

pub(crate) async fn list_handler<D>(
    State(service): State<Arc<HotelService<D>>>,
    Query(filter): Query<HotelFilter>,
) -> Result<Response, ServiceError>
where
    D: Database + 'static,
{
    let hotels = service.get_filtered_hotels(&filter)?;
    Ok(Json(hotels).into_response())
}

pub(crate) async fn detail_handler<D>(
    State(service): State<Arc<HotelService<D>>>,
    Path(hotel_id): Path<String>,
) -> Result<Response, ServiceError>
where
    D: Database + 'static,
{
    let hotel = service.get_hotel_by_id(&hotel_id)?;
    Ok(Json(hotel).into_response())
}

pub(crate) async fn create_handler<D>(
    State(service): State<Arc<HotelService<D>>>,
    AdminUser(admin): AdminUser,
    Json(draft): Json<HotelDraft>,
) -> Result<Response, ServiceError>
where
    D: Database + 'static,
{
    let hotel = service.add_hotel(draft)?;
    tracing::debug!(admin = %admin.uid, hotel_id = %hotel.id, "catalog entry created");
    Ok((StatusCode::CREATED, Json(hotel)).into_response())
}

pub(crate) async fn update_handler<D>(
    State(service): State<Arc<HotelService<D>>>,
    AdminUser(_): AdminUser,
    Path(hotel_id): Path<String>,
    Json(patch): Json<HotelPatch>,
) -> Result<Response, ServiceError>
where
    D: Database + 'static,
{
    let hotel = service.update_hotel(&hotel_id, patch)?;
    Ok(Json(hotel).into_response())
}

pub(crate) async fn delete_handler<D>(
    State(service): State<Arc<HotelService<D>>>,
    AdminUser(_): AdminUser,
    Path(hotel_id): Path<String>,
) -> Result<Response, ServiceError>
where
    D: Database + 'static,
{
    service.delete_hotel(&hotel_id)?;
    Ok(StatusCode::NO_CONTENT.into_response())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::testing::{bearer, with_verifier};
    use crate::store::InMemoryDatabase;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Method, Request};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn app() -> Router {
        let service = HotelService::new(Arc::new(InMemoryDatabase::default()));
        with_verifier(hotel_router(Arc::new(service)))
    }

    fn write(method: Method, uri: &str, role: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::AUTHORIZATION, bearer("ops", role))
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .expect("request")
    }

    fn draft(name: &str, stars: u8, price: f64) -> Value {
        json!({
            "name": name,
            "stars": stars,
            "price": price,
            "description": "Rooms with a view.",
            "images": []
        })
    }

    async fn body(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body");
        serde_json::from_slice(&bytes).expect("json")
    }

    #[tokio::test]
    async fn only_admins_edit_the_catalog() {
        let response = app()
            .oneshot(write(
                Method::POST,
                "/api/v1/hotels",
                "user",
                draft("Urban Boutique Hotel", 3, 99.0),
            ))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn created_hotels_are_listed_filtered_and_patched() {
        let app = app();
        let mut ids = Vec::new();
        for (name, stars, price) in [
            ("Urban Boutique Hotel", 3, 99.0),
            ("Historic Palace Hotel", 5, 399.0),
            ("Seaside Resort & Spa", 4, 189.0),
        ] {
            let response = app
                .clone()
                .oneshot(write(Method::POST, "/api/v1/hotels", "admin", draft(name, stars, price)))
                .await
                .expect("response");
            assert_eq!(response.status(), StatusCode::CREATED);
            ids.push(body(response).await["id"].as_str().expect("id").to_string());
        }

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/api/v1/hotels?minPrice=100&sortBy=stars-desc")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");
        let names: Vec<Value> = body(response)
            .await
            .as_array()
            .expect("list")
            .iter()
            .map(|hotel| hotel["name"].clone())
            .collect();
        assert_eq!(
            names,
            vec![json!("Historic Palace Hotel"), json!("Seaside Resort & Spa")]
        );

        let response = app
            .clone()
            .oneshot(write(
                Method::PUT,
                &format!("/api/v1/hotels/{}", ids[0]),
                "admin",
                json!({ "price": 109 }),
            ))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body(response).await["price"], json!(109.0));

        let response = app
            .oneshot(write(
                Method::PUT,
                "/api/v1/hotels/missing",
                "admin",
                json!({ "stars": 4 }),
            ))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
