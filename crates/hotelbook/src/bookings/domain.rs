use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ServiceError;

pub const MAX_GUESTS: u32 = 6;

pub const BOOKING_CREATED_MESSAGE: &str =
    "Booking created successfully! Check your email for confirmation.";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    #[default]
    Pending,
    Confirmed,
    Cancelled,
    Completed,
}

impl BookingStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Cancelled => "cancelled",
            Self::Completed => "completed",
        }
    }
}

/// Row of the `bookings` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: String,
    pub user_id: String,
    pub hotel_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hotel_name: Option<String>,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub guests: u32,
    pub room_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_price: Option<f64>,
    pub status: BookingStatus,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// What the booking form submits. The total is always computed server-side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequest {
    pub hotel_id: String,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub guests: u32,
    pub room_type: String,
}

impl BookingRequest {
    /// Checks the form against the booking rules. `today` is the earliest allowed check-in.
    pub fn validate(&self, today: NaiveDate) -> Result<(), ServiceError> {
        if self.hotel_id.trim().is_empty() {
            return Err(ServiceError::invalid("hotelId is required"));
        }
        if self.room_type.trim().is_empty() {
            return Err(ServiceError::invalid("roomType is required"));
        }
        if !(1..=MAX_GUESTS).contains(&self.guests) {
            return Err(ServiceError::invalid(format!(
                "guests must be between 1 and {MAX_GUESTS}"
            )));
        }
        if self.check_out <= self.check_in {
            return Err(ServiceError::invalid("checkOut must be after checkIn"));
        }
        if self.check_in < today {
            return Err(ServiceError::invalid("checkIn cannot be in the past"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingConfirmation {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub booking_id: Option<String>,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusUpdate {
    pub status: BookingStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 15).expect("valid")
    }

    fn request() -> BookingRequest {
        BookingRequest {
            hotel_id: "h-1".to_string(),
            check_in: NaiveDate::from_ymd_opt(2025, 7, 1).expect("valid"),
            check_out: NaiveDate::from_ymd_opt(2025, 7, 4).expect("valid"),
            guests: 2,
            room_type: "Standard Room".to_string(),
        }
    }

    #[test]
    fn accepts_a_well_formed_request() {
        assert!(request().validate(today()).is_ok());
    }

    #[test]
    fn rejects_inverted_or_empty_stays() {
        let same_day = BookingRequest {
            check_out: request().check_in,
            ..request()
        };
        assert!(matches!(same_day.validate(today()), Err(ServiceError::Validation(_))));
    }

    #[test]
    fn rejects_guest_counts_outside_the_form_range() {
        for guests in [0, MAX_GUESTS + 1] {
            let invalid = BookingRequest { guests, ..request() };
            assert!(invalid.validate(today()).is_err(), "guests={guests}");
        }
    }

    #[test]
    fn rejects_check_in_before_today() {
        let yesterday = today().pred_opt().expect("valid");
        let stale = BookingRequest {
            check_in: yesterday,
            check_out: today(),
            ..request()
        };
        match stale.validate(today()) {
            Err(ServiceError::Validation(message)) => {
                assert_eq!(message, "checkIn cannot be in the past")
            }
            other => panic!("expected validation error, got {other:?}"),
        }

        let same_day = BookingRequest {
            check_in: today(),
            ..request()
        };
        assert!(same_day.validate(today()).is_ok());
    }

    #[test]
    fn status_serializes_lowercase() {
        assert_eq!(
            serde_json::to_value(BookingStatus::Cancelled).expect("json"),
            serde_json::json!("cancelled")
        );
        let update: StatusUpdate =
            serde_json::from_str(r#"{"status":"completed"}"#).expect("status json");
        assert_eq!(update.status, BookingStatus::Completed);
    }
}
