use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::domain::{ContactForm, ContactMessage, ContactReceipt, ContactStatus, MESSAGE_SENT};
use crate::error::ServiceError;
use crate::notify::{ContactPayload, EmailPayload, Notifier};
use crate::store::{self, Database, Order, Query, StoreError, Table};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct NewContact<'a> {
    name: &'a str,
    email: &'a str,
    subject: &'a str,
    message: &'a str,
    status: ContactStatus,
    created_at: DateTime<Utc>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct StatusPatch {
    status: ContactStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    replied_at: Option<DateTime<Utc>>,
}

pub struct ContactService<D> {
    db: Arc<D>,
    notifier: Arc<Notifier>,
}

impl<D> ContactService<D>
where
    D: Database + 'static,
{
    pub fn new(db: Arc<D>, notifier: Arc<Notifier>) -> Self {
        Self { db, notifier }
    }

    /// Stores the message as unread and forwards it to the admin inbox. A failed email is
    /// logged only.
    pub async fn send_message(&self, form: ContactForm) -> Result<ContactReceipt, ServiceError> {
        form.validate()?;
        let stored: ContactMessage = store::insert_as(
            self.db.as_ref(),
            Table::Contacts,
            &NewContact {
                name: form.name.trim(),
                email: form.email.trim(),
                subject: form.subject.trim(),
                message: &form.message,
                status: ContactStatus::Unread,
                created_at: Utc::now(),
            },
        )?;
        tracing::info!(message_id = %stored.id, subject = %stored.subject, "contact message saved");

        let payload = EmailPayload::Contact(ContactPayload {
            name: stored.name.clone(),
            email: stored.email.clone(),
            subject: stored.subject.clone(),
            message: stored.message.clone(),
        });
        match self.notifier.dispatch(&payload).await {
            Ok(report) if report.all_delivered() => {}
            Ok(report) => tracing::warn!(
                message_id = %stored.id,
                error = report.first_error().unwrap_or("unknown"),
                "contact notification failed, message kept"
            ),
            Err(error) => tracing::warn!(
                message_id = %stored.id,
                error = %error,
                "contact notification failed, message kept"
            ),
        }

        Ok(ContactReceipt {
            success: true,
            message_id: Some(stored.id),
            message: MESSAGE_SENT.to_string(),
        })
    }

    pub fn get_all_messages(&self) -> Result<Vec<ContactMessage>, ServiceError> {
        let query = Query::new().order("createdAt", Order::Descending);
        Ok(store::fetch_all(self.db.as_ref(), Table::Contacts, &query)?)
    }

    pub fn mark_as_read(&self, id: &str) -> Result<ContactMessage, ServiceError> {
        self.set_status(id, ContactStatus::Read, None)
    }

    pub fn mark_as_replied(&self, id: &str) -> Result<ContactMessage, ServiceError> {
        self.set_status(id, ContactStatus::Replied, Some(Utc::now()))
    }

    pub fn delete_message(&self, id: &str) -> Result<(), ServiceError> {
        if self.db.delete(Table::Contacts, &Query::by_id(id))? == 0 {
            return Err(ServiceError::NotFound("message"));
        }
        tracing::info!(message_id = %id, "contact message deleted");
        Ok(())
    }

    pub fn get_unread_count(&self) -> Result<usize, ServiceError> {
        let query = Query::new().eq("status", "unread");
        Ok(self.db.count(Table::Contacts, &query)?)
    }

    fn set_status(
        &self,
        id: &str,
        status: ContactStatus,
        replied_at: Option<DateTime<Utc>>,
    ) -> Result<ContactMessage, ServiceError> {
        let patch = store::to_row(&StatusPatch { status, replied_at })?;
        if self.db.update(Table::Contacts, &Query::by_id(id), patch)? == 0 {
            return Err(ServiceError::NotFound("message"));
        }
        store::fetch_single(self.db.as_ref(), Table::Contacts, &Query::by_id(id)).map_err(
            |error| match error {
                StoreError::NotFound => ServiceError::NotFound("message"),
                other => other.into(),
            },
        )
    }
}
