use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::{Duration, Utc};
use serde_json::json;
use tower::ServiceExt;

use super::common::*;
use crate::auth::Role;
use crate::store::{Database, Query, Table};

#[tokio::test]
async fn create_route_requires_a_session() {
    let harness = harness();
    let response = router(&harness)
        .oneshot(json_request(
            Request::post("/api/v1/bookings"),
            serde_json::to_value(request("Standard Room")).unwrap(),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(harness.service.get_all_bookings().unwrap().is_empty());
}

#[tokio::test]
async fn create_route_returns_confirmation() {
    let harness = harness();
    let response = router(&harness)
        .oneshot(json_request(
            authed(Request::post("/api/v1/bookings"), &guest()),
            json!({
                "hotelId": HOTEL_ID,
                "checkIn": date(6, 2),
                "checkOut": date(6, 4),
                "guests": 1,
                "roomType": "Standard Room"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = json_body(response).await;
    assert_eq!(body["success"], json!(true));
    assert!(body["bookingId"].is_string());
}

#[tokio::test]
async fn invalid_stay_is_unprocessable() {
    let harness = harness();
    let response = router(&harness)
        .oneshot(json_request(
            authed(Request::post("/api/v1/bookings"), &guest()),
            json!({
                "hotelId": HOTEL_ID,
                "checkIn": date(6, 4),
                "checkOut": date(6, 2),
                "guests": 2,
                "roomType": "Standard Room"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        json_body(response).await,
        json!({ "error": "checkOut must be after checkIn" })
    );
}

#[tokio::test]
async fn past_check_in_is_unprocessable() {
    let harness = harness();
    let yesterday = Utc::now().date_naive() - Duration::days(1);
    let response = router(&harness)
        .oneshot(json_request(
            authed(Request::post("/api/v1/bookings"), &guest()),
            json!({
                "hotelId": HOTEL_ID,
                "checkIn": yesterday,
                "checkOut": yesterday + Duration::days(2),
                "guests": 2,
                "roomType": "Standard Room"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        json_body(response).await,
        json!({ "error": "checkIn cannot be in the past" })
    );
    assert!(harness.service.get_all_bookings().unwrap().is_empty());
}

#[tokio::test]
async fn admin_listing_is_forbidden_for_guests() {
    let harness = harness();
    let response = router(&harness)
        .oneshot(
            authed(Request::get("/api/v1/bookings"), &guest())
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = router(&harness)
        .oneshot(
            authed(Request::get("/api/v1/bookings"), &admin())
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn mine_route_lists_only_the_callers_bookings() {
    let harness = harness();
    harness
        .service
        .create_booking(&guest(), request("Standard Room"))
        .await
        .unwrap();
    harness
        .service
        .create_booking(&user("noah", Role::User), request("Standard Room"))
        .await
        .unwrap();

    let response = router(&harness)
        .oneshot(
            authed(Request::get("/api/v1/bookings/mine"), &guest())
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body.as_array().map(Vec::len), Some(1));
    assert_eq!(body[0]["userId"], json!("amira"));
}

#[tokio::test]
async fn admin_sets_status_and_strangers_cannot_view() {
    let harness = harness();
    let id = harness
        .service
        .create_booking(&guest(), request("Standard Room"))
        .await
        .unwrap()
        .booking_id
        .unwrap();

    let response = router(&harness)
        .oneshot(json_request(
            authed(
                Request::put(format!("/api/v1/bookings/{id}/status")),
                &admin(),
            ),
            json!({ "status": "completed" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await["status"], json!("completed"));

    let response = router(&harness)
        .oneshot(
            authed(
                Request::get(format!("/api/v1/bookings/{id}")),
                &user("noah", Role::User),
            )
            .body(Body::empty())
            .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn delete_route_removes_booking() {
    let harness = harness();
    let id = harness
        .service
        .create_booking(&guest(), request("Standard Room"))
        .await
        .unwrap()
        .booking_id
        .unwrap();

    let response = router(&harness)
        .oneshot(
            authed(Request::delete(format!("/api/v1/bookings/{id}")), &admin())
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert!(harness
        .db
        .select(Table::Bookings, &Query::new())
        .unwrap()
        .is_empty());
}
