use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::Request;
use axum::response::Response;
use axum::{Extension, Router};
use chrono::{Datelike, Duration, NaiveDate, Utc};
use serde_json::{json, Value};

use crate::auth::{AuthUser, ClaimMetadata, Claims, Role, TokenVerifier};
use crate::bookings::{booking_router, BookingRequest, BookingService};
use crate::notify::testing::RecordingMailer;
use crate::notify::Notifier;
use crate::store::{to_row, Database, InMemoryDatabase, Table};

pub(super) const HOTEL_ID: &str = "hotel-grand";
pub(super) const SECRET: &str = "bookings-test-secret";

pub(super) struct Harness {
    pub db: Arc<InMemoryDatabase>,
    pub mailer: Arc<RecordingMailer>,
    pub service: Arc<BookingService<InMemoryDatabase>>,
}

pub(super) fn harness_with(mailer: RecordingMailer) -> Harness {
    let db = Arc::new(InMemoryDatabase::default());
    db.insert(
        Table::Hotels,
        to_row(&json!({
            "id": HOTEL_ID,
            "name": "Grand Hotel Paradise",
            "stars": 5,
            "price": 299,
            "description": "Luxury in the heart of the city.",
            "roomTypes": [
                { "name": "Standard Room", "price": 299, "capacity": 2 },
                { "name": "Deluxe Room", "price": 449, "capacity": 3 }
            ]
        }))
        .expect("hotel row"),
    )
    .expect("hotel inserted");

    let mailer = Arc::new(mailer);
    let notifier = Arc::new(Notifier::new(
        mailer.clone(),
        "HotelBook <onboarding@resend.dev>",
        "ops@hotelbook.example",
    ));
    let service = Arc::new(BookingService::new(db.clone(), notifier));
    Harness { db, mailer, service }
}

pub(super) fn harness() -> Harness {
    harness_with(RecordingMailer::default())
}

pub(super) fn user(uid: &str, role: Role) -> AuthUser {
    AuthUser {
        uid: uid.to_string(),
        email: format!("{uid}@example.com"),
        display_name: uid.to_string(),
        role,
        issued_at: None,
    }
}

pub(super) fn guest() -> AuthUser {
    user("amira", Role::User)
}

pub(super) fn admin() -> AuthUser {
    user("ops", Role::Admin)
}

/// A date in next calendar year, so stays are never in the past.
pub(super) fn date(month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(Utc::now().year() + 1, month, day).expect("valid date")
}

pub(super) fn request(room_type: &str) -> BookingRequest {
    BookingRequest {
        hotel_id: HOTEL_ID.to_string(),
        check_in: date(6, 2),
        check_out: date(6, 5),
        guests: 2,
        room_type: room_type.to_string(),
    }
}

pub(super) fn token_for(user: &AuthUser) -> String {
    let role = match user.role {
        Role::Admin => "admin",
        Role::User => "user",
    };
    TokenVerifier::new(SECRET)
        .issue(&Claims {
            sub: user.uid.clone(),
            email: Some(user.email.clone()),
            exp: (Utc::now() + Duration::hours(1)).timestamp(),
            iat: None,
            app_metadata: ClaimMetadata {
                role: Some(role.to_string()),
                ..ClaimMetadata::default()
            },
            user_metadata: ClaimMetadata::default(),
        })
        .unwrap()
}

pub(super) fn router(harness: &Harness) -> Router {
    booking_router(harness.service.clone())
        .layer(Extension(Arc::new(TokenVerifier::new(SECRET))))
}

pub(super) fn authed(request: axum::http::request::Builder, user: &AuthUser) -> axum::http::request::Builder {
    request.header(
        axum::http::header::AUTHORIZATION,
        format!("Bearer {}", token_for(user)),
    )
}

pub(super) fn json_request(builder: axum::http::request::Builder, body: Value) -> Request<Body> {
    builder
        .header(axum::http::header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub(super) async fn json_body(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
