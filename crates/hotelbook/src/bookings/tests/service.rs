use super::common::*;
use crate::auth::Role;
use crate::bookings::domain::BOOKING_CREATED_MESSAGE;
use crate::bookings::{BookingRequest, BookingStatus};
use crate::error::ServiceError;
use crate::notify::testing::RecordingMailer;
use crate::store::{to_row, Database, Table};
use serde_json::json;

#[tokio::test]
async fn create_booking_prices_server_side_and_stores_pending() {
    let harness = harness();
    let confirmation = harness
        .service
        .create_booking(&guest(), request("Deluxe Room"))
        .await
        .expect("booking created");

    assert!(confirmation.success);
    assert_eq!(confirmation.message, BOOKING_CREATED_MESSAGE);

    let booking = harness
        .service
        .get_booking_by_id(confirmation.booking_id.as_deref().expect("id"))
        .expect("stored");
    assert_eq!(booking.status, BookingStatus::Pending);
    assert_eq!(booking.total_price, Some(449.0 * 3.0));
    assert_eq!(booking.hotel_name.as_deref(), Some("Grand Hotel Paradise"));
    assert_eq!(booking.user_id, "amira");
}

#[tokio::test]
async fn create_booking_notifies_admin_and_guest() {
    let harness = harness();
    harness
        .service
        .create_booking(&guest(), request("Standard Room"))
        .await
        .expect("booking created");

    let sent = harness.mailer.sent();
    assert_eq!(sent.len(), 2);
    assert_eq!(sent[0].subject, "[HotelBook] New Booking - Grand Hotel Paradise");
    assert_eq!(sent[1].to, vec!["amira@example.com".to_string()]);
    assert!(sent[1].html.contains("$897.00"));
}

#[tokio::test]
async fn email_failure_does_not_fail_the_booking() {
    for mailer in [RecordingMailer::rejecting("domain not verified"), RecordingMailer::unready()] {
        let harness = harness_with(mailer);
        let confirmation = harness
            .service
            .create_booking(&guest(), request("Standard Room"))
            .await
            .expect("booking still created");
        assert!(confirmation.success);
        assert_eq!(harness.service.get_all_bookings().expect("list").len(), 1);
    }
}

#[tokio::test]
async fn unknown_hotel_and_invalid_requests_are_rejected() {
    let harness = harness();
    let missing_hotel = BookingRequest {
        hotel_id: "nowhere".to_string(),
        ..request("Standard Room")
    };
    assert!(matches!(
        harness.service.create_booking(&guest(), missing_hotel).await,
        Err(ServiceError::NotFound("hotel"))
    ));

    let no_room = request("  ");
    assert!(matches!(
        harness.service.create_booking(&guest(), no_room).await,
        Err(ServiceError::Validation(_))
    ));
    assert!(harness.mailer.sent().is_empty());
}

#[test]
fn listings_are_newest_first_and_scoped() {
    let harness = harness();
    for (id, user_id, created_at) in [
        ("b-1", "amira", "2025-05-01T09:00:00Z"),
        ("b-2", "noah", "2025-05-02T09:00:00Z"),
        ("b-3", "amira", "2025-05-03T09:00:00Z"),
    ] {
        harness
            .db
            .insert(
                Table::Bookings,
                to_row(&json!({
                    "id": id,
                    "userId": user_id,
                    "hotelId": HOTEL_ID,
                    "checkIn": "2025-06-02",
                    "checkOut": "2025-06-05",
                    "guests": 2,
                    "roomType": "Standard Room",
                    "status": "pending",
                    "createdAt": created_at
                }))
                .expect("row"),
            )
            .expect("inserted");
    }

    let mine: Vec<_> = harness
        .service
        .get_user_bookings("amira")
        .expect("mine")
        .into_iter()
        .map(|booking| booking.id)
        .collect();
    assert_eq!(mine, vec!["b-3", "b-1"]);

    let all: Vec<_> = harness
        .service
        .get_all_bookings()
        .expect("all")
        .into_iter()
        .map(|booking| booking.id)
        .collect();
    assert_eq!(all, vec!["b-3", "b-2", "b-1"]);
    assert_eq!(
        harness.service.get_hotel_bookings(HOTEL_ID).expect("hotel").len(),
        3
    );
    assert!(harness.service.get_hotel_bookings("elsewhere").expect("hotel").is_empty());
}

#[tokio::test]
async fn owners_cancel_their_own_bookings_only() {
    let harness = harness();
    let id = harness
        .service
        .create_booking(&guest(), request("Standard Room"))
        .await
        .expect("created")
        .booking_id
        .expect("id");

    let stranger = user("noah", Role::User);
    assert!(matches!(
        harness.service.cancel_booking(&stranger, &id),
        Err(ServiceError::Forbidden(_))
    ));

    let cancelled = harness.service.cancel_booking(&guest(), &id).expect("cancelled");
    assert_eq!(cancelled.status, BookingStatus::Cancelled);
    assert!(cancelled.updated_at >= Some(cancelled.created_at));

    let confirmed = harness.service.confirm_booking(&id).expect("confirmed");
    assert_eq!(confirmed.status, BookingStatus::Confirmed);
    assert!(harness.service.get_booking_for(&admin(), &id).is_ok());
}

#[tokio::test]
async fn status_changes_and_deletes_report_missing_bookings() {
    let harness = harness();
    assert!(matches!(
        harness
            .service
            .update_booking_status("missing", BookingStatus::Completed),
        Err(ServiceError::NotFound("booking"))
    ));
    assert!(matches!(
        harness.service.delete_booking("missing"),
        Err(ServiceError::NotFound("booking"))
    ));
}
