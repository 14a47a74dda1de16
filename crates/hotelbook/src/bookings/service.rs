use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use super::domain::{
    Booking, BookingConfirmation, BookingRequest, BookingStatus, BOOKING_CREATED_MESSAGE,
};
use super::pricing::{calculate_total_price, nightly_rate};
use crate::auth::AuthUser;
use crate::catalog::Hotel;
use crate::error::ServiceError;
use crate::notify::{BookingPayload, EmailPayload, Notifier};
use crate::store::{self, Database, Order, Query, StoreError, Table};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct NewBooking<'a> {
    user_id: &'a str,
    hotel_id: &'a str,
    hotel_name: &'a str,
    check_in: NaiveDate,
    check_out: NaiveDate,
    guests: u32,
    room_type: &'a str,
    total_price: f64,
    status: BookingStatus,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct StatusPatch {
    status: BookingStatus,
    updated_at: DateTime<Utc>,
}

/// Booking lifecycle over the `bookings` table.
pub struct BookingService<D> {
    db: Arc<D>,
    notifier: Arc<Notifier>,
}

impl<D> BookingService<D>
where
    D: Database + 'static,
{
    pub fn new(db: Arc<D>, notifier: Arc<Notifier>) -> Self {
        Self { db, notifier }
    }

    pub fn get_all_bookings(&self) -> Result<Vec<Booking>, ServiceError> {
        let query = Query::new().order("createdAt", Order::Descending);
        Ok(store::fetch_all(self.db.as_ref(), Table::Bookings, &query)?)
    }

    pub fn get_user_bookings(&self, user_id: &str) -> Result<Vec<Booking>, ServiceError> {
        let query = Query::new()
            .eq("userId", user_id)
            .order("createdAt", Order::Descending);
        Ok(store::fetch_all(self.db.as_ref(), Table::Bookings, &query)?)
    }

    pub fn get_hotel_bookings(&self, hotel_id: &str) -> Result<Vec<Booking>, ServiceError> {
        let query = Query::new().eq("hotelId", hotel_id);
        Ok(store::fetch_all(self.db.as_ref(), Table::Bookings, &query)?)
    }

    pub fn get_booking_by_id(&self, id: &str) -> Result<Booking, ServiceError> {
        store::fetch_single(self.db.as_ref(), Table::Bookings, &Query::by_id(id)).map_err(
            |error| match error {
                StoreError::NotFound => ServiceError::NotFound("booking"),
                other => other.into(),
            },
        )
    }

    /// Fetches a booking the caller owns (admins may read any booking).
    pub fn get_booking_for(&self, user: &AuthUser, id: &str) -> Result<Booking, ServiceError> {
        let booking = self.get_booking_by_id(id)?;
        user.ensure_owner_or_admin(&booking.user_id)?;
        Ok(booking)
    }

    /// Prices and stores a pending booking, then notifies the admin and the guest.
    /// Notification failures are logged and never undo the booking.
    pub async fn create_booking(
        &self,
        user: &AuthUser,
        request: BookingRequest,
    ) -> Result<BookingConfirmation, ServiceError> {
        request.validate(Utc::now().date_naive())?;
        let hotel: Hotel =
            store::fetch_single(self.db.as_ref(), Table::Hotels, &Query::by_id(&request.hotel_id))
                .map_err(|error| match error {
                    StoreError::NotFound => ServiceError::NotFound("hotel"),
                    other => other.into(),
                })?;

        let rate = nightly_rate(&hotel, &request.room_type);
        let total_price = calculate_total_price(rate, request.check_in, request.check_out);
        let now = Utc::now();

        let booking: Booking = store::insert_as(
            self.db.as_ref(),
            Table::Bookings,
            &NewBooking {
                user_id: &user.uid,
                hotel_id: &hotel.id,
                hotel_name: &hotel.name,
                check_in: request.check_in,
                check_out: request.check_out,
                guests: request.guests,
                room_type: &request.room_type,
                total_price,
                status: BookingStatus::Pending,
                created_at: now,
                updated_at: now,
            },
        )?;
        tracing::info!(
            booking_id = %booking.id,
            hotel_id = %hotel.id,
            user_id = %user.uid,
            total_price,
            "booking created"
        );

        let payload = EmailPayload::Booking(BookingPayload {
            booking_id: booking.id.clone(),
            user_email: user.email.clone(),
            user_name: user.public_name().to_string(),
            hotel_name: hotel.name.clone(),
            check_in: request.check_in.to_string(),
            check_out: request.check_out.to_string(),
            guests: request.guests,
            room_type: request.room_type.clone(),
            total_price,
        });
        match self.notifier.dispatch(&payload).await {
            Ok(report) if report.all_delivered() => {}
            Ok(report) => tracing::warn!(
                booking_id = %booking.id,
                error = report.first_error().unwrap_or("unknown"),
                "booking notification failed, booking kept"
            ),
            Err(error) => tracing::warn!(
                booking_id = %booking.id,
                error = %error,
                "booking notification failed, booking kept"
            ),
        }

        Ok(BookingConfirmation {
            success: true,
            booking_id: Some(booking.id),
            message: BOOKING_CREATED_MESSAGE.to_string(),
        })
    }

    pub fn update_booking_status(
        &self,
        id: &str,
        status: BookingStatus,
    ) -> Result<Booking, ServiceError> {
        let patch = store::to_row(&StatusPatch {
            status,
            updated_at: Utc::now(),
        })?;
        if self.db.update(Table::Bookings, &Query::by_id(id), patch)? == 0 {
            return Err(ServiceError::NotFound("booking"));
        }
        tracing::info!(booking_id = %id, status = status.label(), "booking status updated");
        self.get_booking_by_id(id)
    }

    /// Owners may cancel their own bookings; admins may cancel any.
    pub fn cancel_booking(&self, user: &AuthUser, id: &str) -> Result<Booking, ServiceError> {
        self.get_booking_for(user, id)?;
        self.update_booking_status(id, BookingStatus::Cancelled)
    }

    pub fn confirm_booking(&self, id: &str) -> Result<Booking, ServiceError> {
        self.update_booking_status(id, BookingStatus::Confirmed)
    }

    pub fn delete_booking(&self, id: &str) -> Result<(), ServiceError> {
        if self.db.delete(Table::Bookings, &Query::by_id(id))? == 0 {
            return Err(ServiceError::NotFound("booking"));
        }
        tracing::info!(booking_id = %id, "booking deleted");
        Ok(())
    }
}
