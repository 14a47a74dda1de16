use std::sync::Arc;

use chrono::{Datelike, Utc};
use serde::{Deserialize, Serialize};

use super::mailer::{DeliveryResult, Mailer, OutboundEmail};
use super::payload::EmailPayload;
use super::templates::{self, RenderedEmail};
use super::NotifyError;
use crate::config::EmailConfig;

/// Outcome of one dispatch, keyed by recipient role.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DispatchReport {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admin: Option<DeliveryResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guest: Option<DeliveryResult>,
}

impl DispatchReport {
    pub fn all_delivered(&self) -> bool {
        [&self.admin, &self.guest]
            .into_iter()
            .flatten()
            .all(|result| result.success)
    }

    pub fn first_error(&self) -> Option<&str> {
        [&self.admin, &self.guest]
            .into_iter()
            .flatten()
            .find_map(|result| result.error.as_deref())
    }
}

/// Renders payloads and sends one message per recipient through a [`Mailer`].
#[derive(Clone)]
pub struct Notifier {
    mailer: Arc<dyn Mailer>,
    from: String,
    admin_email: String,
}

impl Notifier {
    pub fn new(
        mailer: Arc<dyn Mailer>,
        from: impl Into<String>,
        admin_email: impl Into<String>,
    ) -> Self {
        Self {
            mailer,
            from: from.into(),
            admin_email: admin_email.into(),
        }
    }

    pub fn from_config(mailer: Arc<dyn Mailer>, config: &EmailConfig) -> Self {
        Self::new(mailer, config.from.clone(), config.admin_email.clone())
    }

    pub fn is_ready(&self) -> bool {
        self.mailer.ready()
    }

    pub async fn dispatch(&self, payload: &EmailPayload) -> Result<DispatchReport, NotifyError> {
        if !self.mailer.ready() {
            return Err(NotifyError::NotConfigured);
        }

        let year = Utc::now().year();
        let mut report = DispatchReport::default();
        match payload {
            EmailPayload::Contact(contact) => {
                let email = templates::contact_admin_email(contact, year);
                report.admin = Some(self.deliver(&self.admin_email, email).await);
            }
            EmailPayload::Booking(booking) => {
                let admin = templates::booking_admin_email(booking, year);
                report.admin = Some(self.deliver(&self.admin_email, admin).await);

                let guest = templates::guest_confirmation_email(booking, &self.admin_email, year);
                report.guest = Some(self.deliver(&booking.user_email, guest).await);
            }
        }

        tracing::debug!(kind = payload.kind(), delivered = report.all_delivered(), "notification dispatched");
        Ok(report)
    }

    async fn deliver(&self, to: &str, rendered: RenderedEmail) -> DeliveryResult {
        let email = OutboundEmail {
            from: self.from.clone(),
            to: vec![to.to_string()],
            subject: rendered.subject,
            html: rendered.html,
        };
        match self.mailer.send(&email).await {
            Ok(()) => DeliveryResult::delivered(),
            Err(error) => {
                tracing::warn!(to = %to, subject = %email.subject, error = %error, "email delivery failed");
                DeliveryResult::failed(error.to_string())
            }
        }
    }
}
