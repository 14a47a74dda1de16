use std::sync::Mutex;

use async_trait::async_trait;

use super::mailer::{Mailer, MailerError, OutboundEmail};
use super::payload::BookingPayload;

/// Captures every message handed to it; can be told to reject or to report itself unready.
#[derive(Default)]
pub(crate) struct RecordingMailer {
    sent: Mutex<Vec<OutboundEmail>>,
    rejection: Option<String>,
    unready: bool,
}

impl RecordingMailer {
    pub(crate) fn rejecting(message: &str) -> Self {
        Self {
            rejection: Some(message.to_string()),
            ..Self::default()
        }
    }

    pub(crate) fn unready() -> Self {
        Self {
            unready: true,
            ..Self::default()
        }
    }

    pub(crate) fn sent(&self) -> Vec<OutboundEmail> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    fn ready(&self) -> bool {
        !self.unready
    }

    async fn send(&self, email: &OutboundEmail) -> Result<(), MailerError> {
        self.sent.lock().unwrap().push(email.clone());
        match &self.rejection {
            Some(message) => Err(MailerError::Rejected(message.clone())),
            None => Ok(()),
        }
    }
}

pub(crate) fn booking_payload() -> BookingPayload {
    BookingPayload {
        booking_id: "9b1deb4d-3b7d-4bad-9bdd-2b0d7b3dcb6d".to_string(),
        user_email: "amira@example.com".to_string(),
        user_name: "Amira".to_string(),
        hotel_name: "Grand Hotel Paradise".to_string(),
        check_in: "2025-06-02".to_string(),
        check_out: "2025-06-05".to_string(),
        guests: 2,
        room_type: "Deluxe Room".to_string(),
        total_price: 1347.0,
    }
}
