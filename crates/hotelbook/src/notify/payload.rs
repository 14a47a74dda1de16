use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::NotifyError;

/// Body accepted by the `send-email` function, discriminated by its `type` field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum EmailPayload {
    Contact(ContactPayload),
    Booking(BookingPayload),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactPayload {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingPayload {
    pub booking_id: String,
    pub user_email: String,
    pub user_name: String,
    pub hotel_name: String,
    /// `YYYY-MM-DD` or an RFC 3339 timestamp.
    pub check_in: String,
    pub check_out: String,
    pub guests: u32,
    pub room_type: String,
    pub total_price: f64,
}

impl EmailPayload {
    /// Parses an untyped body, reporting an unknown `type` separately from missing fields.
    pub fn from_value(value: Value) -> Result<Self, NotifyError> {
        match value.get("type").and_then(Value::as_str) {
            Some("contact") | Some("booking") => serde_json::from_value(value)
                .map_err(|error| NotifyError::InvalidPayload(error.to_string())),
            _ => Err(NotifyError::InvalidType),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            EmailPayload::Contact(_) => "contact",
            EmailPayload::Booking(_) => "booking",
        }
    }
}
