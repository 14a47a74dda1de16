//! Transactional email: payload parsing, HTML rendering, provider delivery and the
//! `send-email` HTTP function that browsers and the domain services both use.

pub mod dispatch;
pub mod function;
pub mod mailer;
pub mod payload;
pub mod templates;

#[cfg(test)]
pub(crate) mod testing;

pub use dispatch::{DispatchReport, Notifier};
pub use function::send_email_router;
pub use mailer::{DeliveryResult, LogMailer, Mailer, MailerError, OutboundEmail, ResendMailer};
pub use payload::{BookingPayload, ContactPayload, EmailPayload};

/// Failures that abort a dispatch before any message leaves the process.
#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("Invalid payload type. Must be \"contact\" or \"booking\"")]
    InvalidType,
    #[error("invalid payload: {0}")]
    InvalidPayload(String),
    #[error("RESEND_API_KEY is not configured")]
    NotConfigured,
}
